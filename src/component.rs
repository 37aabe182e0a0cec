//! Component factories.
//!
//! `component` wraps a setup procedure into a reusable factory. Each
//! `Factory::create` call runs the setup synchronously against a fresh
//! context; whatever the setup mounted into that context's fragment
//! becomes the returned `Component`.

use std::any::Any;
use std::rc::Rc;

use crate::context::{self, Context};
use crate::dom::Fragment;
use crate::error::ComposeError;

/// Opaque result of a completed factory invocation.
///
/// A component owns its finished fragment until it is mounted; mounting
/// moves the fragment's children into the destination, after which the
/// component is spent (mounting it again inserts nothing). Clones alias
/// the same fragment.
#[derive(Clone)]
pub struct Component {
    fragment: Fragment,
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component").finish_non_exhaustive()
    }
}

impl Component {
    /// The fragment this component owns.
    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}

/// A reusable component factory produced by [`component`].
#[derive(Clone)]
pub struct Factory {
    setup: Rc<dyn Fn(&Context) -> Result<(), ComposeError>>,
}

impl Factory {
    /// Build one component instance.
    ///
    /// Creates a fresh context (given properties, new empty fragment),
    /// activates it, runs the setup synchronously, and restores the
    /// previously active context before returning — also when the setup
    /// fails, in which case its error propagates and the partially built
    /// fragment is discarded.
    pub fn create<P: Any>(&self, props: P) -> Result<Component, ComposeError> {
        let context = Rc::new(Context::new(Rc::new(props)));
        let guard = context::activate(Rc::clone(&context));
        let outcome = (self.setup)(&context);
        drop(guard);
        outcome?;
        Ok(Component {
            fragment: context.fragment().clone(),
        })
    }
}

/// Wrap a setup procedure into a factory.
///
/// During the setup run the new context is the active one, so the
/// contextual helpers (`use_mount`, `use_ref`, `use_ref_mount`) operate
/// on its fragment without explicit threading. The setup may itself
/// invoke other factories; contexts nest and are restored strictly.
pub fn component<S>(setup: S) -> Factory
where
    S: Fn(&Context) -> Result<(), ComposeError> + 'static,
{
    Factory {
        setup: Rc::new(setup),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

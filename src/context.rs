//! Construction contexts and the active-scope stack.
//!
//! Exactly one context is active per thread at any instant. Factories
//! push a fresh context for the duration of their setup run and pop it on
//! every exit path; nested factory invocations nest strictly, never
//! interleave.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::Fragment;
use crate::error::ComposeError;

/// Live construction state for one in-progress component instance:
/// the caller-supplied properties and the owned, initially-empty
/// fragment that setup code appends into.
pub struct Context {
    props: Rc<dyn Any>,
    fragment: Fragment,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").finish_non_exhaustive()
    }
}

impl Context {
    pub(crate) fn new(props: Rc<dyn Any>) -> Self {
        Context {
            props,
            fragment: Fragment::new(),
        }
    }

    /// The properties this instance was created with, downcast to their
    /// concrete type. `None` if `P` is not the type the caller passed.
    pub fn props<P: 'static>(&self) -> Option<&P> {
        self.props.downcast_ref::<P>()
    }

    /// The fragment owned by this context.
    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}

thread_local! {
    static ACTIVE: RefCell<Vec<Rc<Context>>> = RefCell::new(Vec::new());
}

/// Install a context as the active one. The returned guard restores the
/// previously active context when dropped, on success, error return and
/// unwind alike.
pub(crate) fn activate(context: Rc<Context>) -> ScopeGuard {
    ACTIVE.with(|stack| stack.borrow_mut().push(context));
    ScopeGuard { _private: () }
}

/// The currently active context.
pub(crate) fn current() -> Result<Rc<Context>, ComposeError> {
    ACTIVE
        .with(|stack| stack.borrow().last().cloned())
        .ok_or(ComposeError::NoActiveContext)
}

pub(crate) struct ScopeGuard {
    _private: (),
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        ACTIVE.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

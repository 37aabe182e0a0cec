//! Reference resolution within the active fragment.
//!
//! A descendant element is tagged by carrying a marker class of the form
//! `ref:<name>` in its `class` attribute. That class token is the only
//! naming channel the resolver recognizes.

use crate::context;
use crate::dom::{self, Handle};
use crate::error::ComposeError;

/// Prefix of the reference marker class. `ref:<name>` tags an element
/// for lookup under `<name>`.
pub const REF_PREFIX: &str = "ref:";

/// Look up the element tagged `ref:<name>` in the active context's
/// fragment.
///
/// Returns the first match in document order; uniqueness of names is not
/// enforced. The lookup is a snapshot: content mounted later is never
/// found retroactively by an earlier call, and a lookup performed after
/// mounting nested content can match inside that content.
pub fn use_ref(name: &str) -> Result<Handle, ComposeError> {
    let context = context::current()?;
    let marker = format!("{}{}", REF_PREFIX, name);
    dom::find_first(context.fragment().handle(), &|node| {
        dom::has_class(node, &marker)
    })
    .ok_or_else(|| ComposeError::ReferenceNotFound {
        name: name.to_string(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

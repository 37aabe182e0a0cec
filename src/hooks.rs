//! Contextual mount helpers.
//!
//! Conveniences over the active context, the mount engine and the
//! reference resolver. Callable only during a factory's synchronous
//! setup run; outside of one they fail with `NoActiveContext`.

use crate::context;
use crate::error::ComposeError;
use crate::mount::{mount, Mountable};
use crate::refs::use_ref;

/// Mount content into the active context's root fragment.
pub fn use_mount<M: Into<Mountable>>(content: M) -> Result<(), ComposeError> {
    let context = context::current()?;
    mount(content, context.fragment().handle());
    Ok(())
}

/// Resolve the reference `name`, then mount content into it.
///
/// The resolved element gets the full target handling of [`mount`],
/// including the placeholder rule for `<template>` references.
pub fn use_ref_mount<M: Into<Mountable>>(name: &str, content: M) -> Result<(), ComposeError> {
    let target = use_ref(name)?;
    mount(content, &target);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

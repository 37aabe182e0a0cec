//! Error types for the composition engine.

use std::fmt;

/// Errors raised by contextual operations.
///
/// Both kinds are raised synchronously at the call site and are never
/// retried or recovered internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// A contextual helper or reference lookup ran with no component
    /// under construction on the current thread.
    NoActiveContext,
    /// No descendant of the active fragment carries the marker class
    /// for the requested reference name.
    ReferenceNotFound { name: String },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveContext => {
                write!(f, "no active context: helpers may only run during component setup")
            }
            Self::ReferenceNotFound { name } => {
                write!(f, "no element tagged 'ref:{}' in the active fragment", name)
            }
        }
    }
}

impl std::error::Error for ComposeError {}

//! # Graft — component composition over detached fragments
//!
//! A minimal utility for building user interfaces out of structured HTML
//! fragments, without a reactive framework. A component is just the
//! finished fragment of one factory run; composition is moving fragment
//! children into a target tree.
//!
//! ## Core Invariants
//!
//! 1. **One active context**: exactly one construction context is active
//!    per thread at any instant. Factories push a fresh context for their
//!    synchronous setup run and restore the previous one on every exit
//!    path, success, error and unwind alike.
//!
//! 2. **Insertion moves**: mounting a node, fragment or component moves
//!    it into the target. Nothing is cloned; a mounted component's
//!    fragment is empty afterwards and the component is spent.
//!
//! 3. **Order preservation**: mounting a nested content value appends
//!    its leaves in the left-to-right order of a full in-order
//!    flattening, with empty markers contributing nothing.
//!
//! 4. **Text is text**: string content becomes a single text node and is
//!    never parsed as markup.
//!
//! 5. **Reference markers**: `class="ref:<name>"` is the only channel by
//!    which [`use_ref`] discovers elements; resolution returns the first
//!    match in document order and enforces no uniqueness.
//!
//! ## Example
//!
//! ```
//! use graft::{component, dom, html, mount, use_ref, use_mount};
//!
//! let counter = component(|_| {
//!     use_mount(html!("<span class=\"ref:value\">0</span>"))?;
//!     let value = use_ref("value")?;
//!     dom::set_text(&value, "1");
//!     Ok(())
//! });
//!
//! let container = dom::create_element("div");
//! mount(counter.create(()).unwrap(), &container);
//! assert_eq!(dom::text_content(&container), "1");
//! ```

pub mod dom;

mod component;
mod context;
mod error;
mod hooks;
mod markup;
mod mount;
mod refs;


pub use component::{component, Component, Factory};
pub use context::Context;
pub use dom::Fragment;
pub use error::ComposeError;
pub use hooks::{use_mount, use_ref_mount};
pub use markup::parse_markup;
pub use mount::{mount, Mountable};
pub use refs::{use_ref, REF_PREFIX};

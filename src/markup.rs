//! Markup parsing into detached fragments.
//!
//! A thin wrapper over html5ever's fragment parser. Malformed markup is
//! not an error here: the parser's own recovery rules apply, and whatever
//! tree it produces becomes the fragment.

use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{local_name, namespace_url, ns, parse_fragment, ParseOpts, QualName};
use log::trace;
use markup5ever_rcdom::{NodeData, RcDom};

use crate::dom::{self, Fragment, Handle};

/// Parse a markup string into a detached fragment.
///
/// Parsing happens in a `<body>` context, so content models follow what
/// a browser would build for body-level markup.
pub fn parse_markup(text: &str) -> Fragment {
    let dom = parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::new(None, ns!(html), local_name!("body")),
        Vec::new(),
    )
    .one(StrTendril::from(text));

    // The fragment parser wraps its output in a synthetic <html> root;
    // unwrap it and re-home the parsed nodes into a fresh fragment.
    let fragment = Fragment::new();
    let roots: Vec<Handle> = dom.document.children.borrow().clone();
    for root in roots {
        match &root.data {
            NodeData::Element { name, .. } if name.local == local_name!("html") => {
                for child in dom::take_children(&root) {
                    dom::append(fragment.handle(), child);
                }
            }
            _ => dom::append(fragment.handle(), root.clone()),
        }
    }

    trace!("parsed markup into {} top-level node(s)", fragment.len());
    fragment
}

/// Build a fragment from interpolated markup.
///
/// Interpolated values are stringified and substituted verbatim, with no
/// escaping, before the result is parsed. Equivalent to
/// `parse_markup(&format!(...))`.
#[macro_export]
macro_rules! html {
    ($($arg:tt)*) => {
        $crate::parse_markup(&format!($($arg)*))
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

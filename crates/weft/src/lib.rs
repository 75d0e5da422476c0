//! Weft
//!
//! In-memory HTML/XML element trees: build nodes with attributes and nested
//! content, mutate them after construction and serialize to markup on demand.
//!
//! # Example
//! ```rust
//! use weft::prelude::*;
//!
//! let mut tree = ElementTree::new();
//! let mut html = Html::new(&mut tree);
//! let button = html.input(Params::new().attr("type", "button").attr("onclick", "alert(\"hi\");")).unwrap();
//!
//! assert_eq!(
//!     tree.serialize(button).unwrap().as_str(),
//!     r#"<input type="button" onclick="alert(\"hi\");" />"#
//! );
//! ```

use tracing_subscriber::EnvFilter;

// Re-export sub-crates for advanced usage
pub use weft_dom as dom;
pub use weft_forms as forms;
pub use weft_html as html;

pub use weft_dom::{DomError, DomResult, ElementTree, NodeId, Params, SerializeOptions, content};
pub use weft_forms::{Form, FormError, FormResult};
pub use weft_html::{Html, Xml, XmlDocument};

/// Weft version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commonly used types
pub mod prelude {
    pub use weft_dom::{
        AttrValue, Attributes, Component, Content, ContentList, ElementTree, Key, NodeId, Params, SafeString, Widget,
        content,
    };
    pub use weft_forms::{FieldParams, Fieldset, Form, FormButton, FormField};
    pub use weft_html::{Button, Html, Javascript, Table, Xml, XmlDocument};
}

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok();
    if installed {
        tracing::debug!("weft {}: tracing initialized", VERSION);
    } else {
        tracing::debug!("weft {}: subscriber already installed", VERSION);
    }
    installed
}

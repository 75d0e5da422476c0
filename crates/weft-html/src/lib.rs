//! Weft HTML Builders
//!
//! Convenience layers on top of `weft-dom`: a tag factory with list and
//! image helpers, tables, buttons, Javascript snippet generation and XML
//! documents with namespaced tags.
//!
//! # Example
//! ```rust
//! use weft_dom::{ElementTree, Params, content};
//! use weft_html::Html;
//!
//! let mut tree = ElementTree::new();
//! let mut html = Html::new(&mut tree);
//! let list = html
//!     .ulist_with(Params::new().id("menu"), |h| Ok(content![h.li("Home")?, h.li("About")?]))
//!     .unwrap();
//!
//! assert_eq!(
//!     tree.serialize(list).unwrap().as_str(),
//!     r#"<ul id="menu"><li class="item_1 first">Home</li><li class="item_2 last">About</li></ul>"#
//! );
//! ```

mod button;
mod factory;
mod javascript;
mod table;
mod xml;

pub use button::Button;
pub use factory::{Html, nowrap};
pub use javascript::{JsArg, Javascript};
pub use table::Table;
pub use xml::{Xml, XmlDocument};

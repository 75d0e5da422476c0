//! Weft Forms
//!
//! Form fields that render themselves into a [`weft_dom::ElementTree`] and a
//! [`Form`] container wrapping each visible field in a labelled list item.
//! Fields can be grouped into [`Fieldset`]s, and forms end with their
//! [`FormButton`]s.
//!
//! # Example
//! ```rust
//! use weft_dom::ElementTree;
//! use weft_forms::{FieldParams, Form, TextField};
//!
//! let mut tree = ElementTree::new();
//! let mut form = Form::new().id("login");
//! form.add(TextField::new(FieldParams::new().name("user").label("User")).unwrap());
//! let id = form.render(&mut tree).unwrap();
//!
//! assert!(tree.serialize(id).unwrap().as_str().contains(r#"<label for="user" id="user_label">User</label>"#));
//! ```

mod button;
mod date;
mod field;
mod fieldset;
mod form;
mod input;
mod options;
mod textarea;

pub use button::FormButton;
pub use date::{DateField, DatetimeField, TimeField};
pub use field::{FieldParams, FieldState, FieldValue, FormField};
pub use fieldset::Fieldset;
pub use form::Form;
pub use input::{FileField, HiddenField, InputField, PasswordField, TextField};
pub use options::{BooleanField, CheckboxField, OptionList, RadioField, SelectField};
pub use textarea::TextareaField;

use weft_dom::DomError;

/// Result type for form operations
pub type FormResult<T> = Result<T, FormError>;

/// Form construction and lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Must provide parameter name for {field_type}")]
    MissingName { field_type: &'static str },

    #[error("Unknown form field: {name}")]
    UnknownField { name: String },

    #[error(transparent)]
    Dom(#[from] DomError),
}

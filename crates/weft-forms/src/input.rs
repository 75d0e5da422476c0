//! Input Fields
//!
//! `input` based fields: generic inputs, text, password, file and hidden.

use weft_dom::{DomResult, ElementTree, NodeId, Params};

use crate::FormResult;
use crate::field::{FieldParams, FieldState, FieldValue, FormField, input_attributes};

/// `<input>` with a configurable `type` (default `text`)
#[derive(Debug, Clone)]
pub struct InputField {
    state: FieldState,
}

impl InputField {
    pub fn new(params: FieldParams) -> FormResult<Self> {
        Self::typed("input_field", "text", params)
    }

    /// Input whose `type` defaults to `input_type` unless the params set one
    pub(crate) fn typed(field_type: &'static str, input_type: &str, mut params: FieldParams) -> FormResult<Self> {
        if !params.attrs.contains("type") {
            params.attrs.set("type", input_type);
        }
        Ok(Self {
            state: FieldState::new(field_type, params)?,
        })
    }

    pub fn input_type(&self) -> String {
        self.state
            .attributes()
            .get("type")
            .map(|t| t.stringify())
            .unwrap_or_default()
    }
}

impl FormField for InputField {
    fn state(&self) -> &FieldState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    fn type_name(&self) -> &'static str {
        "input_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        tree.create(Params::new().tag("input").attrs(input_attributes(&self.state)))
    }
}

/// Input variants that only fix the `type` attribute
macro_rules! input_variant {
    ($(#[$meta:meta])* $name:ident, $type_name:literal, $input_type:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            input: InputField,
        }

        impl $name {
            pub fn new(mut params: FieldParams) -> FormResult<Self> {
                params.attrs.set("type", $input_type);
                Ok(Self {
                    input: InputField::typed($type_name, $input_type, params)?,
                })
            }
        }

        impl FormField for $name {
            fn state(&self) -> &FieldState {
                self.input.state()
            }

            fn state_mut(&mut self) -> &mut FieldState {
                self.input.state_mut()
            }

            fn type_name(&self) -> &'static str {
                $type_name
            }

            fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
                self.input.element(tree)
            }
        }
    };
}

input_variant!(
    /// Single line text input
    TextField,
    "text_field",
    "text"
);
input_variant!(
    /// Masked password input
    PasswordField,
    "password_field",
    "password"
);

/// `<input type="file">`. File inputs never render a value.
#[derive(Debug, Clone)]
pub struct FileField {
    input: InputField,
}

impl FileField {
    pub fn new(mut params: FieldParams) -> FormResult<Self> {
        params.value = FieldValue::default();
        Ok(Self {
            input: InputField::typed("file_field", "file", params)?,
        })
    }
}

impl FormField for FileField {
    fn state(&self) -> &FieldState {
        self.input.state()
    }

    fn state_mut(&mut self) -> &mut FieldState {
        self.input.state_mut()
    }

    fn type_name(&self) -> &'static str {
        "file_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        let mut attrs = self.state().attributes().clone();
        attrs.remove("value");
        tree.create(Params::new().tag("input").attrs(attrs))
    }
}

/// `<input type="hidden">`, rendered the same way when readonly
#[derive(Debug, Clone)]
pub struct HiddenField {
    input: InputField,
}

impl HiddenField {
    pub fn new(mut params: FieldParams) -> FormResult<Self> {
        params.attrs.set("type", "hidden");
        Ok(Self {
            input: InputField::typed("hidden_field", "hidden", params)?,
        })
    }

    /// Hidden counterpart of another field: same name, id and value
    pub(crate) fn from_state(state: &FieldState) -> Self {
        let mut params = FieldParams::new().attr("type", "hidden").value(state.value().clone());
        if let Some(id) = state.dom_id() {
            params = params.id(id);
        }
        Self {
            input: InputField {
                state: FieldState::named(state.name().to_string(), params),
            },
        }
    }
}

impl FormField for HiddenField {
    fn state(&self) -> &FieldState {
        self.input.state()
    }

    fn state_mut(&mut self) -> &mut FieldState {
        self.input.state_mut()
    }

    fn type_name(&self) -> &'static str {
        "hidden_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        self.input.element(tree)
    }

    fn readonly_element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        self.input.element(tree)
    }

    fn to_hidden_field(&self) -> HiddenField {
        self.clone()
    }

    fn is_hidden_input(&self) -> bool {
        true
    }
}

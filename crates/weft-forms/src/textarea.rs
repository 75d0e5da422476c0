//! Textarea Field

use weft_dom::{DomResult, ElementTree, NodeId, Params};

use crate::FormResult;
use crate::field::{FieldParams, FieldState, FormField, readonly_attributes};

/// Multi line text input. Always renders an open/close pair, even when empty.
#[derive(Debug, Clone)]
pub struct TextareaField {
    state: FieldState,
}

impl TextareaField {
    pub fn new(params: FieldParams) -> FormResult<Self> {
        Ok(Self {
            state: FieldState::new("textarea_field", params)?,
        })
    }
}

impl FormField for TextareaField {
    fn state(&self) -> &FieldState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    fn type_name(&self) -> &'static str {
        "textarea_field"
    }

    fn element(&self, tree: &mut ElementTree) -> DomResult<NodeId> {
        tree.create(
            Params::new()
                .tag("textarea")
                .attrs(readonly_attributes(self.state.attributes()))
                .content(self.state.value().display())
                .force_closing_tag(true),
        )
    }
}

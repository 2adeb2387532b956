// Dynamic form renderer
// Maps a declared layout + schema + widget catalog into an ordered render
// tree. Output order always follows the declared layout order.

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use super::model::{
    FieldGroup, FieldSpec, FieldWidget, FormError, FormLayout, FormSchema, GroupMember,
    WidgetCatalog, CLIENT_ID_FIELD, CLIENT_TYPE_FIELD,
};

/// How a rendered input reaches the external form-data holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    OnBlur,
    OnChange,
}

/// One option of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// The input control of a bespoke rendered field.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    ReadOnlyText { default: Option<String> },
    Select { options: Vec<SelectOption> },
    Textarea,
    Password,
}

/// A field the renderer built itself instead of taking from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub id: String,
    pub label: String,
    pub control: Control,
    /// `None` for inputs that never report back (the password confirmation).
    pub binding: Option<Binding>,
}

/// One node of the rendered layout, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum FormNode {
    /// Catalog widget passed through unchanged.
    Widget(FieldWidget),
    /// Bespoke control built by the renderer.
    Field(RenderedField),
    /// Titled group of nodes.
    Fieldset {
        title: String,
        children: Vec<FormNode>,
    },
    /// A display group hidden by the filter; keeps its layout position
    /// without visual output.
    Placeholder,
}

/// Render the declared layout into an ordered tree.
///
/// `ids` supplies the rendered identity of every bespoke field; ids must be
/// unique within one rendered form.
pub fn render_form(
    layout: &FormLayout,
    schema: &FormSchema,
    catalog: &WidgetCatalog,
    ids: &HashMap<String, String>,
    form_data: &Map<String, Value>,
) -> Result<Vec<FormNode>, FormError> {
    let mut renderer = Renderer {
        schema,
        catalog,
        ids,
        seen_ids: HashSet::new(),
    };

    let mut nodes = Vec::with_capacity(layout.fields.len());
    for spec in &layout.fields {
        let node = match spec {
            FieldSpec::Plain(name) => renderer.plain_field(name)?,
            FieldSpec::Group(group) => renderer.field_group(group, layout, form_data)?,
        };
        nodes.push(node);
    }
    Ok(nodes)
}

struct Renderer<'a> {
    schema: &'a FormSchema,
    catalog: &'a WidgetCatalog,
    ids: &'a HashMap<String, String>,
    seen_ids: HashSet<String>,
}

impl<'a> Renderer<'a> {
    fn plain_field(&mut self, name: &str) -> Result<FormNode, FormError> {
        match name {
            CLIENT_ID_FIELD => {
                let property = self.property(name)?;
                let default = property
                    .default
                    .as_ref()
                    .map(|value| value_as_string(value));
                let field = RenderedField {
                    id: self.claim_id(name)?,
                    label: property.title.clone(),
                    control: Control::ReadOnlyText { default },
                    binding: Some(Binding::OnBlur),
                };
                Ok(FormNode::Field(field))
            }
            CLIENT_TYPE_FIELD => {
                let property = self.property(name)?;
                let options = property
                    .enum_values
                    .iter()
                    .map(|value| SelectOption {
                        value: value.clone(),
                        label: capitalize(value),
                    })
                    .collect();
                let field = RenderedField {
                    id: self.claim_id(name)?,
                    label: property.title.clone(),
                    control: Control::Select { options },
                    binding: Some(Binding::OnChange),
                };
                Ok(FormNode::Field(field))
            }
            _ => Ok(FormNode::Widget(self.catalog_widget(name)?)),
        }
    }

    fn field_group(
        &mut self,
        group: &FieldGroup,
        layout: &FormLayout,
        form_data: &Map<String, Value>,
    ) -> Result<FormNode, FormError> {
        // Hidden groups claim no ids; uniqueness applies to rendered output
        if let Some(filter_key) = &layout.filter_display_group_by {
            let selected = form_data
                .get(filter_key)
                .and_then(Value::as_str)
                .unwrap_or_default();
            if !group.title.eq_ignore_ascii_case(selected) {
                return Ok(FormNode::Placeholder);
            }
        }

        let mut children = Vec::with_capacity(group.members.len());
        for member in &group.members {
            match member {
                GroupMember::Plain(key) => {
                    children.push(FormNode::Widget(self.catalog_widget(key)?));
                }
                GroupMember::Textarea { key } => {
                    let property = self.property(key)?;
                    children.push(FormNode::Field(RenderedField {
                        id: self.claim_id(key)?,
                        label: property.title.clone(),
                        control: Control::Textarea,
                        binding: Some(Binding::OnBlur),
                    }));
                }
                GroupMember::Password { key, confirmation } => {
                    let property = self.property(key)?;
                    let id = self.claim_id(key)?;
                    let confirm_id = format!("{id}2");
                    children.push(FormNode::Field(RenderedField {
                        id,
                        label: property.title.clone(),
                        control: Control::Password,
                        binding: Some(Binding::OnBlur),
                    }));
                    if *confirmation {
                        self.claim_raw_id(&confirm_id)?;
                        children.push(FormNode::Field(RenderedField {
                            id: confirm_id,
                            label: "Confirm Password".to_string(),
                            control: Control::Password,
                            binding: None,
                        }));
                    }
                }
            }
        }

        Ok(FormNode::Fieldset {
            title: group.title.clone(),
            children,
        })
    }

    fn property(&self, name: &str) -> Result<&'a super::model::PropertySchema, FormError> {
        self.schema
            .property(name)
            .ok_or_else(|| FormError::UnknownProperty(name.to_string()))
    }

    fn catalog_widget(&self, name: &str) -> Result<FieldWidget, FormError> {
        self.catalog
            .widget(name)
            .cloned()
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn claim_id(&mut self, field: &str) -> Result<String, FormError> {
        let id = self
            .ids
            .get(field)
            .cloned()
            .ok_or_else(|| FormError::MissingId(field.to_string()))?;
        self.claim_raw_id(&id)?;
        Ok(id)
    }

    fn claim_raw_id(&mut self, id: &str) -> Result<(), FormError> {
        if !self.seen_ids.insert(id.to_string()) {
            return Err(FormError::DuplicateId(id.to_string()));
        }
        Ok(())
    }
}

fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// Form layout, schema, and widget catalog types

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Field rendered read-only with its schema default; updates reach the
/// external form-data holder on blur.
pub const CLIENT_ID_FIELD: &str = "CLIENT_ID";

/// Field rendered as a select over the schema's enumerated values.
pub const CLIENT_TYPE_FIELD: &str = "CLIENT_TYPE";

/// Rendering contract violations. These indicate a mismatch between the
/// declared layout and the supplied schema/catalog/ids, not an
/// environmental fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("no widget in catalog for field `{0}`")]
    UnknownField(String),
    #[error("no schema property for field `{0}`")]
    UnknownProperty(String),
    #[error("no rendered id supplied for field `{0}`")]
    MissingId(String),
    #[error("duplicate rendered id `{0}`")]
    DuplicateId(String),
}

/// Ordered form layout: plain fields and titled field groups.
#[derive(Debug, Clone)]
pub struct FormLayout {
    pub fields: Vec<FieldSpec>,
    /// When set, a field group is displayed only if its title matches the
    /// current form-data value of this field (case-insensitively).
    pub filter_display_group_by: Option<String>,
}

impl FormLayout {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            filter_display_group_by: None,
        }
    }

    pub fn filter_display_group_by(mut self, field: impl Into<String>) -> Self {
        self.filter_display_group_by = Some(field.into());
        self
    }
}

/// One entry in the declared layout order.
#[derive(Debug, Clone)]
pub enum FieldSpec {
    /// A single field, rendered from the widget catalog (or bespoke for
    /// [`CLIENT_ID_FIELD`] / [`CLIENT_TYPE_FIELD`]).
    Plain(String),
    /// A titled group of members rendered as a fieldset.
    Group(FieldGroup),
}

#[derive(Debug, Clone)]
pub struct FieldGroup {
    pub title: String,
    pub members: Vec<GroupMember>,
}

/// A member of a field group.
#[derive(Debug, Clone)]
pub enum GroupMember {
    /// Catalog widget rendered as-is.
    Plain(String),
    /// Multi-line input wired to the form-data holder on blur.
    Textarea { key: String },
    /// Password input wired on blur; `confirmation` adds a second,
    /// un-wired "Confirm Password" input.
    Password { key: String, confirmation: bool },
}

impl GroupMember {
    pub fn key(&self) -> &str {
        match self {
            Self::Plain(key) => key,
            Self::Textarea { key } => key,
            Self::Password { key, .. } => key,
        }
    }
}

/// Per-field schema: display title, default value, enumerated values.
#[derive(Debug, Clone, Default)]
pub struct PropertySchema {
    pub title: String,
    pub default: Option<Value>,
    pub enum_values: Vec<String>,
}

/// Schema for every field the layout may reference.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    properties: HashMap<String, PropertySchema>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, property: PropertySchema) -> Self {
        self.properties.insert(name.into(), property);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.get(name)
    }
}

/// A field widget pre-rendered by the external form library. The content is
/// opaque to the renderer and passed through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWidget {
    pub name: String,
    pub content: Value,
}

/// Pre-rendered field widgets keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct WidgetCatalog {
    widgets: HashMap<String, FieldWidget>,
}

impl WidgetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_widget(mut self, name: impl Into<String>, content: Value) -> Self {
        let name = name.into();
        self.widgets.insert(
            name.clone(),
            FieldWidget {
                name,
                content,
            },
        );
        self
    }

    pub fn widget(&self, name: &str) -> Option<&FieldWidget> {
        self.widgets.get(name)
    }
}

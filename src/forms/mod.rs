// Dynamic form module
// Declarative form layouts rendered into an ordered tree of controls

mod model;
mod render;

pub use model::{
    FieldGroup, FieldSpec, FieldWidget, FormError, FormLayout, FormSchema, GroupMember,
    PropertySchema, WidgetCatalog, CLIENT_ID_FIELD, CLIENT_TYPE_FIELD,
};
pub use render::{render_form, Binding, Control, FormNode, RenderedField, SelectOption};

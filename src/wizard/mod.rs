// Client creation wizard module
// Explicit wizard state with pure transitions, plus the async driver that
// submits the collected configuration to the creation endpoint

mod creator;
mod state;

pub use creator::{ClientCreator, WizardDriver};
pub use state::{
    Advance, ClientConfiguration, CreateClientWizard, CreationOutcome, Platform, ValidationState,
    WizardError, WizardStep, APP_IDENTIFIER_FIELD, CLIENT_NAME_FIELD,
};

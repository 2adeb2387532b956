// Mobile client creation driver
// Performs the single POST per result-step entry and normalizes every
// failure shape into one user-visible outcome

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use super::state::{
    Advance, ClientConfiguration, CreateClientWizard, CreationOutcome, ValidationState,
    WizardError, WizardStep,
};

#[derive(Debug, Error)]
enum CreationError {
    #[error("Failed to connect the API")]
    Api,
    #[error("No metadata about client creation.")]
    MissingMetadata,
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

/// HTTP client for the mobile client creation endpoint.
pub struct ClientCreator {
    http: reqwest::Client,
    endpoint: String,
}

impl ClientCreator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// POST the configuration to the creation endpoint.
    ///
    /// Network failures, non-ok statuses, and ok responses without a
    /// `metadata` field all normalize into [`CreationOutcome::Failed`]
    /// carrying the underlying message. No retries.
    pub async fn create(&self, configuration: &ClientConfiguration) -> CreationOutcome {
        match self.post(configuration).await {
            Ok(result) => CreationOutcome::Created { result },
            Err(err) => CreationOutcome::Failed {
                details: err.to_string(),
            },
        }
    }

    async fn post(&self, configuration: &ClientConfiguration) -> Result<Value, CreationError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(configuration)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CreationError::Api);
        }

        let body: Value = response.json().await?;
        if body.get("metadata").is_some() {
            Ok(body)
        } else {
            Err(CreationError::MissingMetadata)
        }
    }
}

/// Callback fired with the full response body after a successful creation.
pub type ClientCreatedHook = Box<dyn Fn(&Value) + Send + Sync>;

/// Wizard state machine wired to the creation endpoint.
///
/// Transitions delegate to [`CreateClientWizard`]; [`WizardDriver::advance`]
/// additionally performs the submission when the state machine asks for it.
pub struct WizardDriver {
    wizard: CreateClientWizard,
    creator: ClientCreator,
    on_created: Option<ClientCreatedHook>,
}

impl WizardDriver {
    pub fn new(creator: ClientCreator) -> Self {
        Self {
            wizard: CreateClientWizard::new(),
            creator,
            on_created: None,
        }
    }

    /// Register the collaborator notified after a successful creation.
    pub fn on_client_created(mut self, hook: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_created = Some(Box::new(hook));
        self
    }

    pub fn wizard(&self) -> &CreateClientWizard {
        &self.wizard
    }

    pub fn open(&mut self) {
        self.wizard.open();
    }

    pub fn close(&mut self) {
        self.wizard.close();
    }

    pub fn back(&mut self) {
        self.wizard.back();
    }

    pub fn select_platform(&mut self, element_id: &str) -> Result<(), WizardError> {
        self.wizard.select_platform(element_id)
    }

    pub fn configure_client(
        &mut self,
        fields: serde_json::Map<String, Value>,
        validation: &HashMap<String, ValidationState>,
    ) {
        self.wizard.configure_client(fields, validation);
    }

    /// Advance the wizard one step, submitting the configuration when the
    /// result step is entered. The submission runs to completion before
    /// `loading` clears; there is no cancellation.
    pub async fn advance(&mut self) -> WizardStep {
        if self.wizard.next() == Advance::Submit {
            let outcome = match self.wizard.configuration().cloned() {
                Some(configuration) => self.creator.create(&configuration).await,
                None => CreationOutcome::Failed {
                    details: "missing client configuration".to_string(),
                },
            };
            if let CreationOutcome::Created { result } = &outcome {
                if let Some(hook) = &self.on_created {
                    hook(result);
                }
            }
            self.wizard.complete(outcome);
        }
        self.wizard.step()
    }
}

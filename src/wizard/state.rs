// Client creation wizard state machine

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Form-data key for the client name. The name must be present and valid
/// before the wizard allows submission.
pub const CLIENT_NAME_FIELD: &str = "name";

/// Form-data key for the application identifier (bundle id / package name).
pub const APP_IDENTIFIER_FIELD: &str = "appIdentifier";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("unsupported platform {0}")]
    UnsupportedPlatform(String),
}

/// Mobile client platform, chosen on the first wizard step and immutable
/// for the rest of the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Cordova,
    Xamarin,
}

impl Platform {
    /// Map a platform selector element id to a platform.
    ///
    /// An unrecognised id is a UI/data contract mismatch, not an
    /// environmental fault, and is surfaced as an error immediately.
    pub fn from_element_id(element_id: &str) -> Result<Self, WizardError> {
        match element_id {
            "platform-android" => Ok(Self::Android),
            "platform-ios" => Ok(Self::Ios),
            "platform-cordova" => Ok(Self::Cordova),
            "platform-xamarin" => Ok(Self::Xamarin),
            other => Err(WizardError::UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Cordova => "cordova",
            Self::Xamarin => "xamarin",
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "cordova" => Ok(Self::Cordova),
            "xamarin" => Ok(Self::Xamarin),
            other => Err(WizardError::UnsupportedPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The configuration object accumulated across wizard steps and POSTed to
/// the creation endpoint on completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientConfiguration {
    #[serde(rename = "clientType")]
    pub client_type: Platform,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ClientConfiguration {
    fn new(client_type: Platform) -> Self {
        Self {
            client_type,
            fields: Map::new(),
        }
    }
}

/// Per-field validation state reported by the active platform sub-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Success,
    Warning,
    Error,
}

/// Wizard steps in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectPlatform,
    ConfigureClient,
    ShowResult,
}

impl WizardStep {
    pub fn index(&self) -> usize {
        match self {
            Self::SelectPlatform => 0,
            Self::ConfigureClient => 1,
            Self::ShowResult => 2,
        }
    }

    fn forward(&self) -> Option<Self> {
        match self {
            Self::SelectPlatform => Some(Self::ConfigureClient),
            Self::ConfigureClient => Some(Self::ShowResult),
            Self::ShowResult => None,
        }
    }
}

/// Result of a completed creation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CreationOutcome {
    /// The endpoint returned ok with creation metadata; carries the full
    /// response body.
    Created { result: Value },
    /// Anything else: network failure, non-ok status, or an ok response
    /// without metadata.
    Failed { details: String },
}

impl CreationOutcome {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Created { .. } => "Mobile client successfully created.",
            Self::Failed { .. } => "Failed when creating mobile client.",
        }
    }
}

/// Outcome of a `next()` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The step did not change (already last, or forward navigation is
    /// currently disabled).
    Stayed,
    /// Moved forward one step without side effects.
    Moved(WizardStep),
    /// Entered the result step; the caller must perform exactly one
    /// submission and report back via `complete()`.
    Submit,
}

/// The client creation wizard: select platform, configure, show result.
///
/// Holds only state; transitions are pure and side-effect free. Submission
/// is signalled to the caller through [`Advance::Submit`] so the state
/// machine can be tested without any I/O.
#[derive(Debug)]
pub struct CreateClientWizard {
    attempt: Attempt,
    modal_open: bool,
    loading: bool,
    reset_on_start: bool,
}

/// State scoped to one creation attempt, discarded wholesale on reset.
#[derive(Debug)]
struct Attempt {
    step: WizardStep,
    configuration: Option<ClientConfiguration>,
    validated: bool,
    outcome: Option<CreationOutcome>,
}

impl Default for CreateClientWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateClientWizard {
    pub fn new() -> Self {
        Self {
            attempt: Attempt::fresh(),
            modal_open: false,
            loading: false,
            reset_on_start: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.attempt.step
    }

    pub fn is_open(&self) -> bool {
        self.modal_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_validated(&self) -> bool {
        self.attempt.validated
    }

    pub fn configuration(&self) -> Option<&ClientConfiguration> {
        self.attempt.configuration.as_ref()
    }

    pub fn outcome(&self) -> Option<&CreationOutcome> {
        self.attempt.outcome.as_ref()
    }

    /// Show the modal. When the previous attempt ran to completion the
    /// wizard starts over: configuration and result are discarded and the
    /// platform selection step is shown again.
    pub fn open(&mut self) {
        if self.reset_on_start {
            self.attempt = Attempt::fresh();
            self.reset_on_start = false;
        }
        self.modal_open = true;
        self.loading = false;
    }

    /// Hide the modal, unless a submission is in flight.
    pub fn close(&mut self) {
        if !self.loading {
            self.modal_open = false;
        }
    }

    /// Choose the client platform from a selector element id and advance to
    /// the configuration step. Only meaningful on the selection step; the
    /// platform is immutable for the rest of the attempt.
    pub fn select_platform(&mut self, element_id: &str) -> Result<(), WizardError> {
        let platform = Platform::from_element_id(element_id)?;
        let state = &mut self.attempt;
        if state.step == WizardStep::SelectPlatform {
            state.configuration = Some(ClientConfiguration::new(platform));
            state.validated = false;
            state.step = WizardStep::ConfigureClient;
        }
        Ok(())
    }

    /// Merge a field update from the active platform sub-form and recompute
    /// whether the configuration is complete and valid.
    pub fn configure_client(
        &mut self,
        fields: Map<String, Value>,
        validation: &HashMap<String, ValidationState>,
    ) {
        let state = &mut self.attempt;
        let Some(configuration) = state.configuration.as_mut() else {
            return;
        };
        for (key, value) in fields {
            // clientType is fixed at selection time
            if key == "clientType" {
                continue;
            }
            configuration.fields.insert(key, value);
        }
        state.validated = validation.contains_key(CLIENT_NAME_FIELD)
            && validation.contains_key(APP_IDENTIFIER_FIELD)
            && !validation
                .values()
                .any(|field| *field == ValidationState::Error);
    }

    fn next_disabled(&self) -> bool {
        let state = &self.attempt;
        match state.step {
            WizardStep::SelectPlatform => state.configuration.is_none(),
            WizardStep::ConfigureClient => !state.validated,
            WizardStep::ShowResult => true,
        }
    }

    /// Advance one step. Entering the result step sets `loading` and asks
    /// the caller to submit; the transition fires at most once per attempt
    /// because the result step has no forward edge.
    pub fn next(&mut self) -> Advance {
        if self.next_disabled() {
            return Advance::Stayed;
        }
        let state = &mut self.attempt;
        match state.step.forward() {
            Some(next) => {
                state.step = next;
                if next == WizardStep::ShowResult {
                    self.loading = true;
                    Advance::Submit
                } else {
                    Advance::Moved(next)
                }
            }
            None => Advance::Stayed,
        }
    }

    /// Retreat one step. Only the configuration step can go back; the
    /// result step is terminal for the attempt.
    pub fn back(&mut self) {
        let state = &mut self.attempt;
        if state.step == WizardStep::ConfigureClient {
            state.step = WizardStep::SelectPlatform;
        }
    }

    /// Record the outcome of the submission started by [`Advance::Submit`].
    pub fn complete(&mut self, outcome: CreationOutcome) {
        self.attempt.outcome = Some(outcome);
        self.loading = false;
        self.reset_on_start = true;
    }
}

impl Attempt {
    fn fresh() -> Self {
        Self {
            step: WizardStep::SelectPlatform,
            configuration: None,
            validated: false,
            outcome: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_validation() -> HashMap<String, ValidationState> {
        HashMap::from([
            (CLIENT_NAME_FIELD.to_string(), ValidationState::Success),
            (APP_IDENTIFIER_FIELD.to_string(), ValidationState::Success),
        ])
    }

    fn fields(pairs: &[(&str, &str)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    #[test]
    fn test_platform_from_element_id() {
        assert_eq!(
            Platform::from_element_id("platform-android"),
            Ok(Platform::Android)
        );
        assert_eq!(
            Platform::from_element_id("platform-xamarin"),
            Ok(Platform::Xamarin)
        );
        assert_eq!(
            Platform::from_element_id("platform-blackberry"),
            Err(WizardError::UnsupportedPlatform(
                "platform-blackberry".to_string()
            ))
        );
    }

    #[test]
    fn test_select_platform_advances_and_seeds_configuration() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.select_platform("platform-ios").unwrap();

        assert_eq!(wizard.step(), WizardStep::ConfigureClient);
        assert_eq!(wizard.configuration().unwrap().client_type, Platform::Ios);
        assert!(!wizard.is_validated());
    }

    #[test]
    fn test_next_noop_on_selection_without_platform() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        assert_eq!(wizard.next(), Advance::Stayed);
        assert_eq!(wizard.step(), WizardStep::SelectPlatform);
    }

    #[test]
    fn test_next_noop_while_not_validated() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.select_platform("platform-android").unwrap();

        assert_eq!(wizard.next(), Advance::Stayed);
        assert_eq!(wizard.step(), WizardStep::ConfigureClient);
    }

    #[test]
    fn test_validation_requires_name_and_app_id() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.select_platform("platform-android").unwrap();

        let partial = HashMap::from([(CLIENT_NAME_FIELD.to_string(), ValidationState::Success)]);
        wizard.configure_client(fields(&[("name", "myapp")]), &partial);
        assert!(!wizard.is_validated());

        wizard.configure_client(
            fields(&[("appIdentifier", "org.example.myapp")]),
            &valid_validation(),
        );
        assert!(wizard.is_validated());
    }

    #[test]
    fn test_validation_fails_on_any_error_field() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.select_platform("platform-android").unwrap();

        let mut validation = valid_validation();
        validation.insert("dmzUrl".to_string(), ValidationState::Error);
        wizard.configure_client(fields(&[("name", "myapp")]), &validation);
        assert!(!wizard.is_validated());
    }

    #[test]
    fn test_configure_cannot_change_platform() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.select_platform("platform-android").unwrap();

        wizard.configure_client(fields(&[("clientType", "ios")]), &valid_validation());
        assert_eq!(
            wizard.configuration().unwrap().client_type,
            Platform::Android
        );
    }

    #[test]
    fn test_next_into_result_signals_submit_once() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.select_platform("platform-android").unwrap();
        wizard.configure_client(fields(&[("name", "myapp")]), &valid_validation());

        assert_eq!(wizard.next(), Advance::Submit);
        assert_eq!(wizard.step(), WizardStep::ShowResult);
        assert!(wizard.is_loading());

        // Result step has no forward edge, so the signal cannot repeat
        assert_eq!(wizard.next(), Advance::Stayed);
    }

    #[test]
    fn test_back_only_from_configure_step() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::SelectPlatform);

        wizard.select_platform("platform-android").unwrap();
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::SelectPlatform);

        wizard.select_platform("platform-android").unwrap();
        wizard.configure_client(fields(&[("name", "myapp")]), &valid_validation());
        wizard.next();
        wizard.complete(CreationOutcome::Failed {
            details: "boom".to_string(),
        });
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::ShowResult);
    }

    #[test]
    fn test_close_is_noop_while_loading() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.select_platform("platform-android").unwrap();
        wizard.configure_client(fields(&[("name", "myapp")]), &valid_validation());
        wizard.next();

        assert!(wizard.is_loading());
        wizard.close();
        assert!(wizard.is_open());

        wizard.complete(CreationOutcome::Failed {
            details: "boom".to_string(),
        });
        wizard.close();
        assert!(!wizard.is_open());
    }

    #[test]
    fn test_open_resets_after_completed_attempt() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.select_platform("platform-cordova").unwrap();
        wizard.configure_client(fields(&[("name", "myapp")]), &valid_validation());
        wizard.next();
        wizard.complete(CreationOutcome::Created {
            result: json!({"metadata": {"name": "myapp"}}),
        });

        wizard.open();
        assert_eq!(wizard.step(), WizardStep::SelectPlatform);
        assert!(wizard.configuration().is_none());
        assert!(wizard.outcome().is_none());
    }

    #[test]
    fn test_open_preserves_state_mid_attempt() {
        let mut wizard = CreateClientWizard::new();
        wizard.open();
        wizard.select_platform("platform-android").unwrap();
        wizard.close();

        wizard.open();
        assert_eq!(wizard.step(), WizardStep::ConfigureClient);
        assert!(wizard.configuration().is_some());
    }

    #[test]
    fn test_configuration_serializes_with_wire_names() {
        let mut configuration = ClientConfiguration::new(Platform::Android);
        configuration
            .fields
            .insert("name".to_string(), json!("myapp"));
        configuration
            .fields
            .insert("appIdentifier".to_string(), json!("org.example.myapp"));

        let value = serde_json::to_value(&configuration).unwrap();
        assert_eq!(
            value,
            json!({
                "clientType": "android",
                "name": "myapp",
                "appIdentifier": "org.example.myapp"
            })
        );
    }

    #[test]
    fn test_outcome_texts() {
        let created = CreationOutcome::Created {
            result: json!({"metadata": {}}),
        };
        assert_eq!(created.text(), "Mobile client successfully created.");
        let failed = CreationOutcome::Failed {
            details: "x".to_string(),
        };
        assert_eq!(failed.text(), "Failed when creating mobile client.");
    }
}

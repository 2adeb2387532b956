// Configuration structs

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Default listen port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 4000;

/// Default location of the services config file.
pub const DEFAULT_SERVICES_CONFIG_FILE: &str = "/etc/mdc/servicesConfig.json";

const DEFAULT_USER_NAME: &str = "testuser";
const DEFAULT_USER_EMAIL: &str = "testuser@localhost";
const DEFAULT_NAMESPACE: &str = "myproject";

/// Runtime mode, selected by `MDC_ENV`.
///
/// Production serves the built frontend bundle and trusts the forwarded-auth
/// headers for user identity; anything else is a developer setup that takes
/// identity from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Production,
    Development,
}

/// Console configuration, constructed once at startup and passed by
/// reference to the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port (`PORT`, default 4000)
    pub port: u16,

    /// Runtime mode (`MDC_ENV=production` selects production)
    pub mode: Mode,

    /// Path to the services config file (`MOBILE_SERVICES_CONFIG_FILE`)
    pub services_config_file: PathBuf,

    /// Cluster master host (`OPENSHIFT_HOST`, required)
    pub openshift_host: String,

    /// User token (`OPENSHIFT_USER_TOKEN`, required outside production)
    pub user_token: Option<String>,

    /// User name for non-production identity (`OPENSHIFT_USER_NAME`)
    pub user_name: String,

    /// User email for non-production identity (`OPENSHIFT_USER_EMAIL`)
    pub user_email: String,

    /// Console namespace on the cluster (`OPENSHIFT_MDC_NAMESPACE`)
    pub mdc_namespace: String,

    /// Identity management host override (`IDM_URL`)
    pub idm_url: Option<String>,

    /// Push server host override (`UPS_URL`)
    pub ups_url: Option<String>,

    /// Metrics service host override (`METRICS_URL`)
    pub metrics_url: Option<String>,
}

impl Config {
    /// Build a configuration from an injected variable lookup.
    ///
    /// `lookup` returns the value of a named variable, or `None` when unset.
    /// Tests use this to avoid mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        let mode = match get("MDC_ENV").as_deref() {
            Some("production") => Mode::Production,
            _ => Mode::Development,
        };

        let config = Self {
            port,
            mode,
            services_config_file: get("MOBILE_SERVICES_CONFIG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVICES_CONFIG_FILE)),
            openshift_host: get("OPENSHIFT_HOST").unwrap_or_default(),
            user_token: get("OPENSHIFT_USER_TOKEN"),
            user_name: get("OPENSHIFT_USER_NAME").unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            user_email: get("OPENSHIFT_USER_EMAIL")
                .unwrap_or_else(|| DEFAULT_USER_EMAIL.to_string()),
            mdc_namespace: get("OPENSHIFT_MDC_NAMESPACE")
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            idm_url: get("IDM_URL"),
            ups_url: get("UPS_URL"),
            metrics_url: get("METRICS_URL"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate operator-supplied configuration. Failures here are fatal at
    /// startup: a console without a cluster host or developer token cannot
    /// serve anything useful.
    fn validate(&self) -> Result<()> {
        if self.openshift_host.is_empty() {
            bail!("OPENSHIFT_HOST environment variable is not set");
        }
        if self.user_token.is_none() && self.mode != Mode::Production {
            bail!(
                "The app is running in non-production mode and requires the \
                 OPENSHIFT_USER_TOKEN environment variable to be set"
            );
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.mode == Mode::Production
    }
}

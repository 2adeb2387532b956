// Configuration loader
// Reads the process environment once at startup

use anyhow::Result;

use super::settings::Config;

/// Load configuration from the process environment.
///
/// Missing required variables (`OPENSHIFT_HOST`, and `OPENSHIFT_USER_TOKEN`
/// outside production mode) are reported as errors; the caller is expected
/// to treat them as fatal.
pub fn load_config() -> Result<Config> {
    Config::from_lookup(|name| std::env::var(name).ok())
}

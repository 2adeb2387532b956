// Service directory
// Reads service descriptors from the services config file and enriches them
// with static display metadata. Read failures of any kind fall back to the
// environment-derived default list with a logged warning; the directory
// never surfaces an error to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use super::catalog::{self, IDENTITY_MANAGEMENT_TYPE, METRICS_TYPE, PUSH_TYPE};
use crate::config::Config;

/// A single service entry from the services config file.
///
/// Only `type` and `url` are required; any additional keys are carried
/// through the merge so a descriptor can override display metadata such as
/// `icon` or `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(rename = "type")]
    pub service_type: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServiceDescriptor {
    pub fn new(service_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            url: url.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServicesFile {
    services: Vec<ServiceDescriptor>,
}

/// Build the default service list from configuration.
///
/// Identity management, push, and metrics point at their per-service host
/// override when present, else at the cluster host. Sync has no default.
pub fn default_services(config: &Config) -> Vec<ServiceDescriptor> {
    let host = |override_url: &Option<String>| {
        format!(
            "https://{}",
            override_url.as_deref().unwrap_or(&config.openshift_host)
        )
    };

    vec![
        ServiceDescriptor::new(IDENTITY_MANAGEMENT_TYPE, host(&config.idm_url)),
        ServiceDescriptor::new(PUSH_TYPE, host(&config.ups_url)),
        ServiceDescriptor::new(METRICS_TYPE, host(&config.metrics_url)),
    ]
}

/// Read the service descriptors from `path` and return them as view models.
///
/// Every call re-reads the file; the HTTP layer may add caching if call
/// volume ever warrants it.
pub async fn get_services(path: &Path, defaults: &[ServiceDescriptor]) -> Vec<Value> {
    let descriptors = match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<ServicesFile>(&bytes) {
            Ok(file) => file.services,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    %err,
                    "failed to parse services config file, default services will be used"
                );
                defaults.to_vec()
            }
        },
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                %err,
                "can not read services config file, default services will be used"
            );
            defaults.to_vec()
        }
    };

    descriptors.into_iter().map(into_view_model).collect()
}

/// Merge static display metadata under the descriptor. Descriptor keys win
/// on collision, so a descriptor-supplied `icon` or `name` suppresses the
/// static default. Unknown service types pass through unchanged.
fn into_view_model(descriptor: ServiceDescriptor) -> Value {
    let descriptor_fields = as_object(serde_json::to_value(&descriptor).unwrap_or_default());

    match catalog::display_info(&descriptor.service_type) {
        Some(info) => {
            let mut merged = as_object(serde_json::to_value(info).unwrap_or_default());
            for (key, value) in descriptor_fields {
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        None => Value::Object(descriptor_fields),
    }
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::io::Write;

    fn test_config() -> Config {
        Config::from_lookup(|name| match name {
            "OPENSHIFT_HOST" => Some("cluster.example.com".to_string()),
            "OPENSHIFT_USER_TOKEN" => Some("abc".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_default_services_use_cluster_host() {
        let defaults = default_services(&test_config());
        assert_eq!(defaults.len(), 3);
        for descriptor in &defaults {
            assert_eq!(descriptor.url, "https://cluster.example.com");
        }
        let types: Vec<&str> = defaults.iter().map(|d| d.service_type.as_str()).collect();
        assert_eq!(types, vec!["identity-management", "push", "metrics"]);
    }

    #[test]
    fn test_default_services_prefer_overrides() {
        let config = Config::from_lookup(|name| match name {
            "OPENSHIFT_HOST" => Some("cluster.example.com".to_string()),
            "OPENSHIFT_USER_TOKEN" => Some("abc".to_string()),
            "UPS_URL" => Some("push.example.com".to_string()),
            _ => None,
        })
        .unwrap();

        let defaults = default_services(&config);
        assert_eq!(defaults[1].url, "https://push.example.com");
        assert_eq!(defaults[0].url, "https://cluster.example.com");
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let config = test_config();
        let defaults = default_services(&config);
        let items = get_services(Path::new("/nonexistent/servicesConfig.json"), &defaults).await;

        assert_eq!(items.len(), 3);
        let push = items
            .iter()
            .find(|item| item["type"] == "push")
            .expect("push entry missing");
        assert_eq!(push["name"], "Push Notifications");
        assert_eq!(push["icon"], "/img/push.png");
        assert_eq!(push["url"], "https://cluster.example.com");
    }

    #[tokio::test]
    async fn test_malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not valid json").unwrap();

        let defaults = default_services(&test_config());
        let items = get_services(file.path(), &defaults).await;
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn test_descriptor_fields_win_on_merge() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"services": [{{"type": "push", "url": "https://x", "icon": "/img/custom.png"}}]}}"#
        )
        .unwrap();

        let items = get_services(file.path(), &[]).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Push Notifications");
        assert_eq!(items[0]["icon"], "/img/custom.png");
        assert_eq!(items[0]["url"], "https://x");
    }

    #[tokio::test]
    async fn test_unknown_type_passes_through_unchanged() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"services": [{{"type": "fax-gateway", "url": "https://fax"}}]}}"#
        )
        .unwrap();

        let items = get_services(file.path(), &[]).await;
        assert_eq!(
            items[0],
            serde_json::json!({"type": "fax-gateway", "url": "https://fax"})
        );
    }
}

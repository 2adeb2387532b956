// Static display metadata for the known mobile service types

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

pub const IDENTITY_MANAGEMENT_TYPE: &str = "identity-management";
pub const PUSH_TYPE: &str = "push";
pub const METRICS_TYPE: &str = "metrics";
pub const SYNC_TYPE: &str = "sync";

/// Display metadata merged onto a service descriptor to build the view model
/// returned by `/api/mobileservices`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDisplayInfo {
    pub name: &'static str,
    pub icon: &'static str,
    #[serde(rename = "docsLink")]
    pub docs_link: &'static str,
    pub description: &'static str,
}

static MOBILE_SERVICES: Lazy<HashMap<&'static str, ServiceDisplayInfo>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        IDENTITY_MANAGEMENT_TYPE,
        ServiceDisplayInfo {
            name: "Identity Management",
            icon: "/img/keycloak.png",
            docs_link: "https://docs.aerogear.org/aerogear/latest/identity-management.html",
            description: "Identity Management - Identity and Access Management",
        },
    );
    map.insert(
        PUSH_TYPE,
        ServiceDisplayInfo {
            name: "Push Notifications",
            icon: "/img/push.png",
            docs_link: "https://docs.aerogear.org/aerogear/latest/push-notifications.html",
            description: "Unified Push Server for sending native push notifications",
        },
    );
    map.insert(
        METRICS_TYPE,
        ServiceDisplayInfo {
            name: "Mobile Metrics",
            icon: "/img/metrics.png",
            docs_link: "https://docs.aerogear.org/aerogear/latest/mobile-metrics.html",
            description: "Installs a metrics service based on Prometheus and Grafana",
        },
    );
    map.insert(
        SYNC_TYPE,
        ServiceDisplayInfo {
            name: "Sync",
            icon: "/img/sync.svg",
            docs_link: "https://docs.aerogear.org/aerogear/latest/data-sync.html",
            description: "Data synchronization service for mobile clients",
        },
    );
    map
});

/// Look up the display metadata for a service type. Unknown types return
/// `None` and the caller passes the raw descriptor through unchanged.
pub fn display_info(service_type: &str) -> Option<&'static ServiceDisplayInfo> {
    MOBILE_SERVICES.get(service_type)
}

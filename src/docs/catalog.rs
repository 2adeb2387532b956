// Static SDK setup instructions per client platform

use serde::Serialize;
use std::collections::BTreeMap;

use crate::services::{IDENTITY_MANAGEMENT_TYPE, METRICS_TYPE, PUSH_TYPE, SYNC_TYPE};
use crate::wizard::Platform;

pub const DEFAULT_DOCS_VERSION: &str = "latest";

/// One setup step: introductory text plus optional shell/code snippets.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocStep {
    pub introduction: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
}

impl DocStep {
    fn text(introduction: &str) -> Self {
        Self {
            introduction: introduction.to_string(),
            commands: vec![],
        }
    }

    fn with_commands(introduction: &str, commands: &[&str]) -> Self {
        Self {
            introduction: introduction.to_string(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Setup instructions for one backend service SDK on a platform.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSdkDocs {
    #[serde(rename = "serviceLogoUrl")]
    pub service_logo_url: String,
    #[serde(rename = "serviceName")]
    pub service_name: String,
    #[serde(rename = "serviceDescription")]
    pub service_description: String,
    #[serde(rename = "setupText")]
    pub setup_text: String,
    #[serde(rename = "docsLink")]
    pub docs_link: String,
    pub steps: Vec<DocStep>,
}

/// Setup instructions for a platform: framework-level steps plus one
/// section per supported backend service.
#[derive(Debug, Clone, Serialize)]
pub struct FrameworkDocs {
    pub icon: String,
    pub title: String,
    pub steps: Vec<DocStep>,
    pub services: BTreeMap<String, ServiceSdkDocs>,
}

/// Build the setup docs for `platform`, embedding `docs_version` into every
/// documentation link.
pub fn framework_docs(platform: Platform, docs_version: &str) -> FrameworkDocs {
    match platform {
        Platform::Android => android_docs(docs_version),
        Platform::Ios => ios_docs(docs_version),
        Platform::Cordova => cordova_docs(docs_version),
        Platform::Xamarin => xamarin_docs(docs_version),
    }
}

fn docs_link(docs_version: &str, page: &str) -> String {
    format!("https://docs.aerogear.org/aerogear/{docs_version}/{page}")
}

fn service_section(
    docs_version: &str,
    service_type: &str,
    setup_text: &str,
    steps: Vec<DocStep>,
) -> (String, ServiceSdkDocs) {
    let (logo, name, description, page) = match service_type {
        IDENTITY_MANAGEMENT_TYPE => (
            "/img/keycloak.png",
            "Identity Management",
            "Identity Management - Identity and Access Management",
            "identity-management.html#setup",
        ),
        PUSH_TYPE => (
            "/img/push.png",
            "Push Notifications",
            "Unified Push Server for sending native push notifications",
            "push-notifications.html#setup",
        ),
        METRICS_TYPE => (
            "/img/metrics.png",
            "Mobile Metrics",
            "Installs a metrics service based on Prometheus and Grafana",
            "mobile-metrics.html#setup",
        ),
        _ => (
            "/img/sync.svg",
            "Sync",
            "Data synchronization service for mobile clients",
            "data-sync.html#setup",
        ),
    };
    (
        service_type.to_string(),
        ServiceSdkDocs {
            service_logo_url: logo.to_string(),
            service_name: name.to_string(),
            service_description: description.to_string(),
            setup_text: setup_text.to_string(),
            docs_link: docs_link(docs_version, page),
            steps,
        },
    )
}

fn android_docs(docs_version: &str) -> FrameworkDocs {
    FrameworkDocs {
        icon: "/img/android.png".to_string(),
        title: "Android".to_string(),
        steps: vec![
            DocStep::text(
                "Create file `mobile-services.json` in your app's `assets` folder and copy \
                 contents from the right panel into it.",
            ),
            DocStep::with_commands(
                "Add the AeroGear Core dependency, the module manages and binds all services \
                 together on the client side.",
                &["```implementation 'org.aerogear:android-core:latest'```"],
            ),
        ],
        services: BTreeMap::from([
            service_section(
                docs_version,
                IDENTITY_MANAGEMENT_TYPE,
                "Identity Management SDK setup",
                vec![DocStep::with_commands(
                    "Add the Auth dependency to your application module:",
                    &["```implementation 'org.aerogear:android-auth:latest'```"],
                )],
            ),
            service_section(
                docs_version,
                PUSH_TYPE,
                "Push SDK setup",
                vec![DocStep::with_commands(
                    "Add the Unified Push dependency needed for device registration:",
                    &["```implementation 'org.aerogear:android-push:latest'```"],
                )],
            ),
            service_section(
                docs_version,
                METRICS_TYPE,
                "Mobile Metrics SDK setup",
                vec![DocStep::with_commands(
                    "Metrics is included in all SDK modules; add this dependency to enable it:",
                    &["```implementation 'org.aerogear:android-metrics:latest'```"],
                )],
            ),
            service_section(
                docs_version,
                SYNC_TYPE,
                "Sync SDK setup",
                vec![DocStep::text(
                    "Follow the data sync documentation to configure the sync client.",
                )],
            ),
        ]),
    }
}

fn ios_docs(docs_version: &str) -> FrameworkDocs {
    FrameworkDocs {
        icon: "/img/apple.png".to_string(),
        title: "iOS".to_string(),
        steps: vec![
            DocStep::text(
                "Create file `mobile-services.json` in your Xcode project and copy contents \
                 from the right panel into it.",
            ),
            DocStep::with_commands(
                "Install the AeroGear Core pod, the module manages and binds all services \
                 together on the client side.",
                &["```pod 'AGSCore'```", "```pod install```"],
            ),
        ],
        services: BTreeMap::from([
            service_section(
                docs_version,
                IDENTITY_MANAGEMENT_TYPE,
                "Identity Management SDK setup",
                vec![DocStep::with_commands(
                    "Add the Auth pod to your Podfile and install:",
                    &["```pod 'AGSAuth'```"],
                )],
            ),
            service_section(
                docs_version,
                PUSH_TYPE,
                "Push SDK setup",
                vec![DocStep::with_commands(
                    "Add the Push pod needed for device registration:",
                    &["```pod 'AGSPush'```"],
                )],
            ),
            service_section(
                docs_version,
                METRICS_TYPE,
                "Mobile Metrics SDK setup",
                vec![DocStep::text(
                    "Metrics is included in all SDK modules and enabled through the core pod.",
                )],
            ),
            service_section(
                docs_version,
                SYNC_TYPE,
                "Sync SDK setup",
                vec![DocStep::text(
                    "Follow the data sync documentation to configure the sync client.",
                )],
            ),
        ]),
    }
}

fn cordova_docs(docs_version: &str) -> FrameworkDocs {
    FrameworkDocs {
        icon: "/img/cordova.png".to_string(),
        title: "Cordova".to_string(),
        steps: vec![
            DocStep::text(
                "Create file `mobile-services.json` in your app's source folder and copy \
                 contents from the right panel into it.",
            ),
            DocStep::with_commands(
                "Install the Core AeroGear module, the module manages and binds all services \
                 together on the client side.",
                &[
                    "Open a terminal and navigate to your application project root folder.",
                    "```npm install @aerogear/app```",
                ],
            ),
            DocStep::with_commands(
                "Initialize the AeroGear Core module with the contents of \
                 `mobile-services.json`.",
                &["```import { init } from \"@aerogear/app\";```"],
            ),
        ],
        services: BTreeMap::from([
            service_section(
                docs_version,
                IDENTITY_MANAGEMENT_TYPE,
                "Identity Management SDK setup",
                vec![DocStep::with_commands(
                    "Execute following commands in your project directory to install all \
                     necessary NPM packages needed for the Identity Management service:",
                    &["```npm install @aerogear/auth```"],
                )],
            ),
            service_section(
                docs_version,
                PUSH_TYPE,
                "Push SDK setup",
                vec![DocStep::with_commands(
                    "Execute following commands in your project directory to install all \
                     necessary NPM packages needed for the Push Notifications service:",
                    &[
                        "```cordova plugin add @aerogear/cordova-plugin-aerogear-push```",
                        "```npm install --save @aerogear/push```",
                    ],
                )],
            ),
            service_section(
                docs_version,
                METRICS_TYPE,
                "Mobile Metrics SDK setup",
                vec![DocStep::with_commands(
                    "Metrics is included in all SDK modules; install this plugin to enable it:",
                    &["```cordova plugin add @aerogear/cordova-plugin-aerogear-metrics```"],
                )],
            ),
            service_section(
                docs_version,
                SYNC_TYPE,
                "Sync SDK setup",
                vec![DocStep::text(
                    "Execute following commands in your project directory to install all \
                     necessary NPM packages needed for the Sync service:",
                )],
            ),
        ]),
    }
}

fn xamarin_docs(docs_version: &str) -> FrameworkDocs {
    FrameworkDocs {
        icon: "/img/xamarin.svg".to_string(),
        title: "Xamarin".to_string(),
        steps: vec![
            DocStep::text(
                "Create file `mobile-services.json` in your app's resources and copy contents \
                 from the right panel into it.",
            ),
            DocStep::with_commands(
                "Install the AeroGear Core NuGet package, the module manages and binds all \
                 services together on the client side.",
                &["```dotnet add package AeroGear.Mobile.Core```"],
            ),
        ],
        services: BTreeMap::from([
            service_section(
                docs_version,
                IDENTITY_MANAGEMENT_TYPE,
                "Identity Management SDK setup",
                vec![DocStep::with_commands(
                    "Add the Auth package to your project:",
                    &["```dotnet add package AeroGear.Mobile.Auth```"],
                )],
            ),
            service_section(
                docs_version,
                PUSH_TYPE,
                "Push SDK setup",
                vec![DocStep::with_commands(
                    "Add the Push package needed for device registration:",
                    &["```dotnet add package AeroGear.Mobile.Push```"],
                )],
            ),
            service_section(
                docs_version,
                METRICS_TYPE,
                "Mobile Metrics SDK setup",
                vec![DocStep::text(
                    "Metrics is included in all SDK modules and enabled through the core package.",
                )],
            ),
            service_section(
                docs_version,
                SYNC_TYPE,
                "Sync SDK setup",
                vec![DocStep::text(
                    "Follow the data sync documentation to configure the sync client.",
                )],
            ),
        ]),
    }
}

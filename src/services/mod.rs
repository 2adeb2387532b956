// Mobile services module
// Service directory and static display metadata

mod catalog;
mod directory;

pub use catalog::{
    display_info, ServiceDisplayInfo, IDENTITY_MANAGEMENT_TYPE, METRICS_TYPE, PUSH_TYPE, SYNC_TYPE,
};
pub use directory::{default_services, get_services, ServiceDescriptor};

// SDK setup documentation module
// Static per-platform setup instructions served by the console

mod catalog;

pub use catalog::{framework_docs, DocStep, FrameworkDocs, ServiceSdkDocs, DEFAULT_DOCS_VERSION};

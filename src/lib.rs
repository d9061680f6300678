pub mod cache;
pub mod config;
pub mod doc;
pub mod error;
pub mod format;
pub mod http;
pub mod render;
pub mod search;
pub mod server;
pub mod source;
pub mod tools;
pub mod tracing;

pub use cache::VersionCache;
pub use config::{Config, Mode, ProjectConfig};
pub use doc::{DocGraph, ElementKind, ElementRef, Site, VersionKey};
pub use error::{DocsError, FetchError};
pub use search::SearchOutcome;

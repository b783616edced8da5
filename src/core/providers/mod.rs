pub mod forge;
pub mod paper;
pub mod provider;
pub mod registry;
pub mod vanilla;

pub use provider::{VersionProvider, DEFAULT_ARTIFACT_NAME};
pub use registry::{Provider, ProviderRegistry};

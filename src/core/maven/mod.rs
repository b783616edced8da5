mod metadata;

pub use metadata::MavenMetadata;

/// Forge's Maven repository.
pub const FORGE_MAVEN: &str = "https://maven.minecraftforge.net";

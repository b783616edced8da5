// ─── Dispenser Core ───
// Resolves, caches and downloads server jars for several Minecraft server families.
//
// Architecture:
//   core/
//     cache/      — Per-software catalog cache with staleness timestamp
//     version/    — Canonical catalog + Mojang manifest / version JSON
//     maven/      — maven-metadata.xml listing
//     providers/  — Vanilla, Paper, Forge + the fixed registry
//     downloader/ — Streaming artifact downloads
//     state/      — Settings and process-start initialization
//     dispense    — Download one version into a directory
//     update      — Replace an installed version

pub mod cache;
pub mod dispense;
pub mod downloader;
pub mod error;
pub mod http;
pub mod maven;
pub mod providers;
pub mod software;
pub mod state;
#[cfg(test)]
pub(crate) mod test_support;
pub mod update;
pub mod version;

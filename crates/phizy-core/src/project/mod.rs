//! Project state on disk: manifest, `.env`, generated sources, and project creation

pub mod create;
pub mod env;
pub mod manifest;
pub mod patch;

pub use create::{create_project, CreateOptions};
pub use manifest::{ProjectManifest, MANIFEST_FILE};

//! Runtime configuration: package manager selection and resolved settings

pub mod package_manager;
pub mod settings;

pub use package_manager::PackageManagerKind;
pub use settings::{Settings, SettingsArgs, PACKAGE_MANAGER_ENV, TEMPLATE_DIR_ENV};

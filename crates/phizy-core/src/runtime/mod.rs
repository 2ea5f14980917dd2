//! External process execution for the project's package manager

pub mod packages;

pub use packages::{NodePackageManager, PackageManager};

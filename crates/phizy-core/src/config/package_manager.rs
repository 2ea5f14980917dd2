//! Node package manager selection

use std::fmt;
use std::path::Path;

/// Supported Node package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PackageManagerKind {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Lockfiles in order of preference, mapped to the manager that writes them
const LOCKFILES: &[(&str, PackageManagerKind)] = &[
    ("pnpm-lock.yaml", PackageManagerKind::Pnpm),
    ("yarn.lock", PackageManagerKind::Yarn),
    ("bun.lock", PackageManagerKind::Bun),
    ("bun.lockb", PackageManagerKind::Bun),
    ("package-lock.json", PackageManagerKind::Npm),
];

impl PackageManagerKind {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "npm",
            PackageManagerKind::Pnpm => "pnpm",
            PackageManagerKind::Yarn => "yarn",
            PackageManagerKind::Bun => "bun",
        }
    }

    /// Subcommand that adds packages to the project
    pub fn add_subcommand(&self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "install",
            _ => "add",
        }
    }

    /// Subcommand that removes packages from the project
    pub fn remove_subcommand(&self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "uninstall",
            _ => "remove",
        }
    }

    /// Program and leading args used to run a package binary (npx-style)
    pub fn exec_prefix(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            PackageManagerKind::Npm => ("npx", &[]),
            PackageManagerKind::Pnpm => ("pnpm", &["exec"]),
            PackageManagerKind::Yarn => ("yarn", &[]),
            PackageManagerKind::Bun => ("bunx", &[]),
        }
    }

    /// Parse a package manager name, as given on the command line or in the environment
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Some(PackageManagerKind::Npm),
            "pnpm" => Some(PackageManagerKind::Pnpm),
            "yarn" => Some(PackageManagerKind::Yarn),
            "bun" => Some(PackageManagerKind::Bun),
            _ => None,
        }
    }

    /// Detect the package manager a project uses from its lockfile
    pub fn detect(project_root: &Path) -> Option<Self> {
        LOCKFILES
            .iter()
            .find(|(lockfile, _)| project_root.join(lockfile).is_file())
            .map(|(_, kind)| *kind)
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

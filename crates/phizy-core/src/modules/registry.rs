//! Static module registration

use super::Module;
use crate::error::{Result, StackError};

/// Immutable set of known modules, in registration order
pub struct ModuleRegistry {
    modules: Vec<Box<dyn Module>>,
}

/// Collects modules and validates them into a [`ModuleRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    modules: Vec<Box<dyn Module>>,
}

impl RegistryBuilder {
    pub fn register(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Validate names and dependency edges
    ///
    /// Fails on duplicate names, self-dependencies, and dependencies on
    /// modules that were never registered.
    pub fn build(self) -> Result<ModuleRegistry> {
        let names: Vec<&str> = self.modules.iter().map(|m| m.name()).collect();

        for (idx, name) in names.iter().enumerate() {
            if names[..idx].contains(name) {
                return Err(StackError::InvalidRegistry(format!(
                    "module \"{}\" is registered twice",
                    name
                )));
            }
        }

        for module in &self.modules {
            for dep in module.dependencies() {
                if *dep == module.name() {
                    return Err(StackError::InvalidRegistry(format!(
                        "module \"{}\" depends on itself",
                        dep
                    )));
                }
                if !names.contains(dep) {
                    return Err(StackError::InvalidRegistry(format!(
                        "module \"{}\" depends on unknown module \"{}\"",
                        module.name(),
                        dep
                    )));
                }
            }
        }

        Ok(ModuleRegistry {
            modules: self.modules,
        })
    }
}

impl ModuleRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding the modules that ship with phizy-stack
    pub fn builtin() -> Result<Self> {
        Self::builder()
            .register(super::builtin::AuthModule)
            .register(super::builtin::DatabaseModule)
            .register(super::builtin::EmailModule)
            .build()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Module> {
        self.modules
            .iter()
            .find(|m| m.name() == name)
            .map(|m| m.as_ref())
    }

    /// Look up a module, failing with the list of valid names
    pub fn resolve(&self, name: &str) -> Result<&dyn Module> {
        self.get(name).ok_or_else(|| StackError::ModuleNotFound {
            name: name.to_string(),
            available: self.names().iter().map(|n| n.to_string()).collect(),
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Module> {
        self.modules.iter().map(|m| m.as_ref())
    }

    /// Installed modules, other than `name` itself, that declare `name` as a dependency
    ///
    /// Installed names without a registered definition are treated as having
    /// no dependencies.
    pub fn dependents_of<'a>(&self, name: &str, installed: &'a [String]) -> Vec<&'a str> {
        installed
            .iter()
            .filter(|m| m.as_str() != name)
            .filter(|m| {
                self.get(m)
                    .is_some_and(|module| module.dependencies().contains(&name))
            })
            .map(String::as_str)
            .collect()
    }
}

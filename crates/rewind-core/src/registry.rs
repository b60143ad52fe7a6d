#![forbid(unsafe_code)]

//! Explicit command registry.
//!
//! Hosts register a factory per command id at startup and create commands
//! by id later (menus, scripts, key bindings). The recorder never touches
//! the registry.

use std::collections::BTreeMap;
use std::fmt;

use crate::command::Command;

/// Factory producing a fresh, default-initialized command.
pub type CommandFactory = Box<dyn Fn() -> Box<dyn Command> + Send + Sync>;

/// Errors from registering or creating commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("command id '{0}' is already registered")]
    Duplicate(String),
    #[error("no command registered under id '{0}'")]
    Unknown(String),
}

/// Mapping from command id to factory.
#[derive(Default)]
pub struct CommandRegistry {
    factories: BTreeMap<String, CommandFactory>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("ids", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `id`. Ids are unique.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn Command> + Send + Sync + 'static,
    {
        let id = id.into();
        if self.factories.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }
        tracing::debug!(target: "rewind.registry", id = %id, "command registered");
        self.factories.insert(id, Box::new(factory));
        Ok(())
    }

    /// Build the command registered under `id`.
    ///
    /// Returns the very instance the factory produced.
    pub fn create(&self, id: &str) -> Result<Box<dyn Command>, RegistryError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| RegistryError::Unknown(id.to_string()))?;
        Ok(factory())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

//! Generation switches.
//!
//! A run is configured by a flat map of string switches (`db`, `id`, `bin`,
//! `inherit`, `ns`). [`GeneratorConfig::from_switches`] resolves the map into
//! typed settings once, so the emitters never look at raw strings.

use crate::error::CodegenError;
use std::collections::HashMap;

/// Switch naming the aggregate database type.
pub const SWITCH_DATABASE: &str = "db";
/// Switch selecting the identifier representation.
pub const SWITCH_ID: &str = "id";
/// Switch enabling the binary channel (`on` or `only`).
pub const SWITCH_BINARY: &str = "bin";
/// Switch naming a trait every generated type implements.
pub const SWITCH_INHERIT: &str = "inherit";
/// Switch wrapping the output in a module.
pub const SWITCH_NAMESPACE: &str = "ns";

/// Default name of the aggregate database type.
pub const DEFAULT_DATABASE_NAME: &str = "GameDatabase";
/// Default path of the runtime crate in emitted code.
pub const DEFAULT_RUNTIME_PATH: &str = "::castledb_core";

/// Which load/save channels are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryMode {
    /// JSON load only.
    #[default]
    Off,
    /// JSON load plus binary load and save.
    On,
    /// Binary load and save only.
    Only,
}

impl BinaryMode {
    /// Parses a `bin` switch value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "on" => Some(Self::On),
            "only" => Some(Self::Only),
            _ => None,
        }
    }

    /// Returns true if the JSON load channel is emitted.
    #[must_use]
    pub const fn emits_json(self) -> bool {
        !matches!(self, Self::Only)
    }

    /// Returns true if the binary load and save channels are emitted.
    #[must_use]
    pub const fn emits_binary(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// Representation of unique identifier columns.
///
/// Only the textual form is implemented. The `id` switch is accepted so that
/// existing invocations keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdRepresentation {
    /// Identifiers are strings.
    #[default]
    Text,
}

/// Resolved generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Name of the aggregate database type.
    pub database_name: String,
    /// Identifier representation.
    pub id_representation: IdRepresentation,
    /// Emitted load/save channels.
    pub binary_mode: BinaryMode,
    /// Path of a trait implemented by every generated record and the aggregate.
    pub inherit: Option<String>,
    /// Module wrapping the whole output.
    pub namespace: Option<String>,
    /// Path of the runtime crate used by emitted code.
    pub runtime_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            id_representation: IdRepresentation::default(),
            binary_mode: BinaryMode::default(),
            inherit: None,
            namespace: None,
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a switch map into a configuration.
    ///
    /// Unknown keys are logged and ignored. Empty values count as absent.
    ///
    /// # Arguments
    /// * `switches` - Switch key to value
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidSwitch` if `bin` holds a value other than
    /// `on` or `only`.
    pub fn from_switches(switches: &HashMap<String, String>) -> Result<Self, CodegenError> {
        let mut keys: Vec<&String> = switches.keys().collect();
        keys.sort();
        for key in keys {
            if ![
                SWITCH_DATABASE,
                SWITCH_ID,
                SWITCH_BINARY,
                SWITCH_INHERIT,
                SWITCH_NAMESPACE,
            ]
            .contains(&key.as_str())
            {
                tracing::warn!(switch = %key, "ignoring unknown switch");
            }
        }

        let value = |key: &str| {
            switches
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(name) = value(SWITCH_DATABASE) {
            config.database_name = name.to_string();
        }
        if let Some(id) = value(SWITCH_ID) {
            tracing::warn!(value = %id, "identifier representation switch has no effect");
        }
        if let Some(bin) = value(SWITCH_BINARY) {
            config.binary_mode = BinaryMode::parse(bin)
                .ok_or_else(|| CodegenError::invalid_switch(SWITCH_BINARY, bin))?;
        }
        config.inherit = value(SWITCH_INHERIT).map(str::to_string);
        config.namespace = value(SWITCH_NAMESPACE).map(str::to_string);

        Ok(config)
    }

    /// Sets the aggregate database type name.
    #[must_use]
    pub fn with_database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = name.into();
        self
    }

    /// Sets the emitted channels.
    #[must_use]
    pub fn with_binary_mode(mut self, mode: BinaryMode) -> Self {
        self.binary_mode = mode;
        self
    }

    /// Sets the trait implemented by every generated type.
    #[must_use]
    pub fn with_inherit(mut self, path: impl Into<String>) -> Self {
        self.inherit = Some(path.into());
        self
    }

    /// Sets the wrapping module.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the runtime crate path used by emitted code.
    #[must_use]
    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }
}

//! Observable events
//!
//! Only schema construction and loading emit events. Field conversion and
//! validation are pure and never log.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Schema directory scan started
    SchemaLoadStart,
    /// One schema file parsed and built
    SchemaLoaded,
    /// Schema added to a registry
    SchemaRegistered,
    /// Schema file or declaration rejected
    SchemaLoadFailed,
    /// All schema files loaded
    SchemaLoadComplete,
    /// Integer field declared with min_value > max_value
    IntBoundsInverted,
    /// Configuration file loaded
    ConfigLoaded,
}

impl Event {
    /// Returns the string representation for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaLoadStart => "SCHEMA_LOAD_START",
            Event::SchemaLoaded => "SCHEMA_LOADED",
            Event::SchemaRegistered => "SCHEMA_REGISTERED",
            Event::SchemaLoadFailed => "SCHEMA_LOAD_FAILED",
            Event::SchemaLoadComplete => "SCHEMA_LOAD_COMPLETE",
            Event::IntBoundsInverted => "INT_BOUNDS_INVERTED",
            Event::ConfigLoaded => "CONFIG_LOADED",
        }
    }

    /// Returns whether this event signals a problem
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::IntBoundsInverted | Event::SchemaLoadFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Severity levels and the process-wide level registry
//!
//! Levels are ordered by numeric value; the registry maps names to values,
//! accepts custom levels until it is sealed, and is seeded with the
//! built-in set (TRACE through CRITICAL, plus SUCCESS).

use super::error::{LoggerError, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// An ordered severity level.
///
/// Equality and ordering compare the numeric value only; the name is a
/// registry-interned label used for display and serialization.
#[derive(Debug, Clone, Copy)]
pub struct Level {
    value: u8,
    name: &'static str,
}

impl Level {
    pub const TRACE: Level = Level { value: 5, name: "TRACE" };
    pub const DEBUG: Level = Level { value: 10, name: "DEBUG" };
    pub const INFO: Level = Level { value: 20, name: "INFO" };
    pub const SUCCESS: Level = Level { value: 25, name: "SUCCESS" };
    pub const WARNING: Level = Level { value: 30, name: "WARNING" };
    pub const ERROR: Level = Level { value: 40, name: "ERROR" };
    pub const CRITICAL: Level = Level { value: 50, name: "CRITICAL" };

    const BUILTINS: [Level; 7] = [
        Level::TRACE,
        Level::DEBUG,
        Level::INFO,
        Level::SUCCESS,
        Level::WARNING,
        Level::ERROR,
        Level::CRITICAL,
    ];

    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Filtering predicate: records at or above `threshold` are kept.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, threshold: Level) -> bool {
        self.value >= threshold.value
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self.value {
            0..=9 => BrightBlack,
            10..=19 => Blue,
            20..=24 => Cyan,
            25..=29 => Green,
            30..=39 => Yellow,
            40..=49 => Red,
            _ => BrightRed,
        }
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Level {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        resolve(s)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        resolve(&name).map_err(D::Error::custom)
    }
}

/// Name/value table of registered levels.
///
/// Exposed as a type so tests can exercise private instances; runtime code
/// goes through the process-wide instance via [`register`], [`resolve`],
/// [`resolve_value`], and [`seal`].
#[derive(Debug)]
pub struct LevelRegistry {
    by_name: HashMap<&'static str, Level>,
    by_value: HashMap<u8, Level>,
    sealed: bool,
}

impl LevelRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            by_name: HashMap::new(),
            by_value: HashMap::new(),
            sealed: false,
        };
        for level in Level::BUILTINS {
            registry.by_name.insert(level.name, level);
            registry.by_value.insert(level.value, level);
        }
        registry
    }

    /// Register a custom level. Names are canonicalized to uppercase and
    /// interned for the lifetime of the process.
    pub fn register(&mut self, name: &str, value: u8) -> Result<Level> {
        if self.sealed {
            return Err(LoggerError::RegistryClosed);
        }
        let canonical = name.trim().to_uppercase();
        if canonical.is_empty() {
            return Err(LoggerError::config("levels", "level name must be non-empty"));
        }
        if self.by_name.contains_key(canonical.as_str()) || self.by_value.contains_key(&value) {
            return Err(LoggerError::DuplicateLevel {
                name: canonical,
                value,
            });
        }
        let interned: &'static str = Box::leak(canonical.into_boxed_str());
        let level = Level {
            value,
            name: interned,
        };
        self.by_name.insert(interned, level);
        self.by_value.insert(value, level);
        Ok(level)
    }

    pub fn resolve(&self, name: &str) -> Result<Level> {
        let canonical = name.trim().to_uppercase();
        // WARN is a common spelling of the built-in WARNING
        let lookup = if canonical == "WARN" { "WARNING" } else { canonical.as_str() };
        self.by_name
            .get(lookup)
            .copied()
            .ok_or_else(|| LoggerError::UnknownLevel(name.to_string()))
    }

    pub fn resolve_value(&self, value: u8) -> Result<Level> {
        self.by_value
            .get(&value)
            .copied()
            .ok_or_else(|| LoggerError::UnknownLevel(value.to_string()))
    }

    /// One-shot: after sealing, `register` fails with `RegistryClosed`.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<RwLock<LevelRegistry>> = Lazy::new(|| RwLock::new(LevelRegistry::new()));

/// Register a custom level in the process-wide registry.
///
/// Must happen before the first logger is built; afterwards the registry
/// is sealed and registration fails with [`LoggerError::RegistryClosed`].
pub fn register(name: &str, value: u8) -> Result<Level> {
    REGISTRY.write().register(name, value)
}

/// Resolve a level by name (case-insensitive) in the process-wide registry.
pub fn resolve(name: &str) -> Result<Level> {
    REGISTRY.read().resolve(name)
}

/// Resolve a level by numeric value in the process-wide registry.
pub fn resolve_value(value: u8) -> Result<Level> {
    REGISTRY.read().resolve_value(value)
}

pub(crate) fn seal() {
    REGISTRY.write().seal();
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker returned by priority lookups for important declarations
pub const IMPORTANT: &str = "important";

/// A single `name: value` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name, ASCII-lowercased unless it is a custom property (`--*`)
    pub name: String,

    /// Serialized value, whitespace-normalized
    pub value: String,

    /// Whether the declaration carried `!important`
    #[serde(default)]
    pub important: bool,
}

impl Property {
    /// Create a normal-priority property
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: normalize_name(&name.into()),
            value: value.into(),
            important: false,
        }
    }

    /// Builder method: set the importance flag
    pub fn with_important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    /// Priority marker (`"important"`) or `None`
    pub fn priority(&self) -> Option<&'static str> {
        self.important.then_some(IMPORTANT)
    }

    /// Whether this property answers to `name`
    pub fn is_named(&self, name: &str) -> bool {
        if is_custom(name) {
            self.name == name
        } else {
            self.name.eq_ignore_ascii_case(name)
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

fn is_custom(name: &str) -> bool {
    name.starts_with("--")
}

/// Lowercase a property name; custom property names are case-sensitive and kept as is
pub fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if is_custom(name) {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

//! Enumerations used by the schema models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Referential action for a foreign key's `on_delete` / `on_update`
///
/// An absent action means the target database's default applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferentialAction {
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "RESTRICT")]
    Restrict,
}

impl ReferentialAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::Restrict => "RESTRICT",
        }
    }
}

impl FromStr for ReferentialAction {
    type Err = ();

    /// Spellings are matched exactly; `cascade` is not `CASCADE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASCADE" => Ok(ReferentialAction::Cascade),
            "SET NULL" => Ok(ReferentialAction::SetNull),
            "RESTRICT" => Ok(ReferentialAction::Restrict),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enforcement level of a validation-rule annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementLevel {
    Soft,
    Hard,
}

impl EnforcementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnforcementLevel::Soft => "soft",
            EnforcementLevel::Hard => "hard",
        }
    }
}

impl FromStr for EnforcementLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soft" => Ok(EnforcementLevel::Soft),
            "hard" => Ok(EnforcementLevel::Hard),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EnforcementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

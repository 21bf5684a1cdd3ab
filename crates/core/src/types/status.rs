//! Status and classification enums.
//!
//! Wire names are SCREAMING_SNAKE_CASE so persisted blobs and report cells
//! read `ACTIVE`, `PLOT`, `ADMIN`, and so on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Error returned when parsing one of the enums in this module fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Commercial state of an interaction (customer enquiry).
///
/// There is no ordering constraint between the variants: a privileged user may
/// move an enquiry from any status to any other, including out of `Sold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnquiryStatus {
    #[default]
    Active,
    Booked,
    Sold,
}

impl EnquiryStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Booked, Self::Sold];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Booked => "BOOKED",
            Self::Sold => "SOLD",
        }
    }
}

impl fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnquiryStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "BOOKED" => Ok(Self::Booked),
            "SOLD" => Ok(Self::Sold),
            _ => Err(ParseEnumError::new("enquiry status", s)),
        }
    }
}

/// Display status of a unit.
///
/// Derived, never stored: a unit with no interactions is `Available`,
/// otherwise it carries the status of its most recent interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitStatus {
    Available,
    Enquiry(EnquiryStatus),
}

impl UnitStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Enquiry(status) => status.as_str(),
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UnitStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Kind of sellable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    #[default]
    Plot,
    Flat,
    House,
}

impl InstrumentType {
    /// Wire name of the unit type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plot => "PLOT",
            Self::Flat => "FLAT",
            Self::House => "HOUSE",
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLOT" => Ok(Self::Plot),
            "FLAT" => Ok(Self::Flat),
            "HOUSE" => Ok(Self::House),
            _ => Err(ParseEnumError::new("unit type", s)),
        }
    }
}

/// Session role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Creates and deletes projects, adds units, edits and deletes enquiries.
    Admin,
    /// Logs enquiries only.
    #[default]
    Editor,
}

impl UserRole {
    /// Whether this role may perform privileged writes.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// The other role.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Admin => Self::Editor,
            Self::Editor => Self::Admin,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Editor => write!(f, "EDITOR"),
        }
    }
}

impl FromStr for UserRole {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

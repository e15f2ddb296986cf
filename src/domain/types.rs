//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, a known
//! status vocabulary) so that once a value reaches the domain layer it can be
//! treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Status is outside of the backend vocabulary.
    #[error("unknown truck status: {0}")]
    UnknownStatus(String),
}

/// Unique, backend-assigned identifier of a truck.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i64", into = "i64")]
pub struct TruckId(i64);

impl TruckId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i64` backing this identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for TruckId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for TruckId {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TruckId> for i64 {
    fn from(value: TruckId) -> Self {
        value.0
    }
}

/// Operational state of a truck as understood by the backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckStatus {
    Operational,
    InMaintenance,
}

impl TruckStatus {
    /// Every status accepted by the backend, in display order.
    pub const ALL: [TruckStatus; 2] = [TruckStatus::Operational, TruckStatus::InMaintenance];

    /// Wire representation used by the backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            TruckStatus::Operational => "OPERATIONAL",
            TruckStatus::InMaintenance => "IN_MAINTENANCE",
        }
    }

    /// Human readable label for templates.
    pub const fn label(self) -> &'static str {
        match self {
            TruckStatus::Operational => "Operational",
            TruckStatus::InMaintenance => "In maintenance",
        }
    }
}

impl Display for TruckStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TruckStatus {
    type Err = TypeConstraintError;

    /// Accepts the backend spelling in any case, with spaces or dashes in
    /// place of underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "OPERATIONAL" => Ok(TruckStatus::Operational),
            "IN_MAINTENANCE" => Ok(TruckStatus::InMaintenance),
            "" => Err(TypeConstraintError::EmptyString),
            _ => Err(TypeConstraintError::UnknownStatus(s.trim().to_string())),
        }
    }
}

/// Loading state of a value fetched from the backend.
///
/// Keeps "not requested yet" and "request failed" apart so views never have
/// to guess from an empty placeholder.
#[derive(Clone, Debug, Serialize, PartialEq, Default)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum LoadState<T> {
    #[default]
    NotLoaded,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(err) => LoadState::Failed(err.to_string()),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }
}

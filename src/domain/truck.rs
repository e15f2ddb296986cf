use serde::{Deserialize, Serialize};

use crate::domain::types::{TruckId, TruckStatus};

/// Truck record as returned by the backend.
///
/// `status` keeps the raw backend string so values outside of
/// [`TruckStatus`] still render.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Truck {
    pub id: TruckId,
    pub model: String,
    pub status: String,
    #[serde(default)]
    pub details: String,
}

impl Truck {
    /// Parsed status, when the backend sent a known value.
    pub fn status_kind(&self) -> Option<TruckStatus> {
        self.status.parse().ok()
    }
}

/// Payload sent to the backend when creating or replacing a truck.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTruck {
    pub model: String,
    pub status: TruckStatus,
    pub details: String,
}

impl NewTruck {
    #[must_use]
    pub fn new(model: impl Into<String>, status: TruckStatus, details: impl Into<String>) -> Self {
        Self {
            model: model.into().trim().to_string(),
            status,
            details: details.into().trim().to_string(),
        }
    }
}

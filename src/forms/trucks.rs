use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::truck::{NewTruck, Truck};
use crate::domain::types::TruckStatus;
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, PartialEq, Eq)]
/// Form data for creating a truck or replacing an existing one.
pub struct TruckForm {
    /// Model designation shown in the list.
    #[validate(length(min = 1, max = 255))]
    pub model: String,
    /// One of the [`TruckStatus`] spellings, case-insensitive.
    pub status: String,
    /// Free-form notes.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub details: String,
}

impl TruckForm {
    /// Validates the form and converts it into the backend payload.
    pub fn to_new_truck(&self) -> Result<NewTruck, FormError> {
        let trimmed = Self {
            model: self.model.trim().to_string(),
            status: self.status.trim().to_string(),
            details: self.details.trim().to_string(),
        };
        trimmed.validate()?;
        let status: TruckStatus = trimmed.status.parse()?;
        Ok(NewTruck::new(trimmed.model, status, trimmed.details))
    }

    /// Status carried over from the backend that the form cannot submit.
    pub fn unsupported_status(&self) -> Option<&str> {
        let status = self.status.trim();
        if status.is_empty() || status.parse::<TruckStatus>().is_ok() {
            None
        } else {
            Some(status)
        }
    }
}

impl From<&Truck> for TruckForm {
    /// Prefills the edit form from the backend record.
    fn from(truck: &Truck) -> Self {
        Self {
            model: truck.model.clone(),
            status: truck
                .status_kind()
                .map(|status| status.as_str().to_string())
                .unwrap_or_else(|| truck.status.clone()),
            details: truck.details.clone(),
        }
    }
}

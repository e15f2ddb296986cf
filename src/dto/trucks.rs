use serde::{Deserialize, Serialize};

use crate::domain::truck::Truck;
use crate::domain::types::{LoadState, TruckId, TruckStatus};
use crate::forms::trucks::TruckForm;
use crate::pagination::PageState;

/// Query parameters accepted by the truck list page.
///
/// The page is kept as typed by the user so that malformed values end up as a
/// warning on the list instead of a rejected request.
#[derive(Debug, Default, Deserialize)]
pub struct TruckListQuery {
    /// One-based page requested by the pager.
    pub page: Option<String>,
}

impl TruckListQuery {
    pub fn page(page: usize) -> Self {
        Self {
            page: Some(page.to_string()),
        }
    }
}

/// Data required to render the truck list.
#[derive(Debug)]
pub struct TruckListPageData {
    pub trucks: PageState,
    /// Page asked for but outside of the available range or not a number.
    pub rejected_page: Option<String>,
}

/// Data required to render the truck details page.
#[derive(Debug)]
pub struct TruckPageData {
    pub id: TruckId,
    pub truck: LoadState<Truck>,
}

/// Status option rendered in the truck form select.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// All statuses the backend accepts, in display order.
pub fn status_options() -> Vec<StatusOption> {
    TruckStatus::ALL
        .iter()
        .map(|status| StatusOption {
            value: status.as_str(),
            label: status.label(),
        })
        .collect()
}

/// Data required to render the edit form.
#[derive(Debug)]
pub struct TruckFormPageData {
    pub id: TruckId,
    pub form: TruckForm,
}

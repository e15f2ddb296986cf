use crate::client::errors::ClientError;
use crate::client::{TruckReader, TruckWriter};
use crate::controller::{PageChange, TruckListController};
use crate::domain::truck::Truck;
use crate::domain::types::{LoadState, TruckId};
use crate::dto::trucks::{TruckFormPageData, TruckListPageData, TruckListQuery, TruckPageData};
use crate::forms::trucks::TruckForm;
use crate::services::{ServiceError, ServiceResult};

/// Non-positive identifiers can never exist on the backend.
fn parse_id(id: i64) -> ServiceResult<TruckId> {
    TruckId::new(id).map_err(|_| ServiceError::NotFound)
}

/// Loads the truck list page.
///
/// The list starts on page 1; any other requested page is then navigated to
/// through the controller, which rejects pages outside of the range reported
/// by the first response. Requests for a page other than 1 therefore cost two
/// backend round-trips, and in offset/limit mode without a count header each
/// of them also fetches the whole collection.
pub async fn load_truck_list<R>(
    repo: &R,
    query: TruckListQuery,
    page_size: usize,
) -> ServiceResult<TruckListPageData>
where
    R: TruckReader + ?Sized,
{
    let mut controller = TruckListController::new(repo, page_size);
    controller.initialize().await.map_err(|err| {
        log::error!("Failed to load trucks: {err}");
        err
    })?;

    let mut rejected_page = None;
    let requested = query
        .page
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty());
    if let Some(raw) = requested {
        match raw.parse::<usize>() {
            Ok(1) => {}
            Ok(page) => {
                let change = controller.go_to_page(page).await.map_err(|err| {
                    log::error!("Failed to load truck page {page}: {err}");
                    err
                })?;
                if change == PageChange::Rejected {
                    rejected_page = Some(raw.to_string());
                }
            }
            Err(_) => {
                log::debug!("Ignoring malformed truck page '{raw}'");
                rejected_page = Some(raw.to_string());
            }
        }
    }

    Ok(TruckListPageData {
        trucks: controller.state().clone(),
        rejected_page,
    })
}

/// Loads a single truck for the details page.
///
/// A missing truck is an error; any other backend failure is reported inside
/// the page data so the view can still render.
pub async fn load_truck<R>(repo: &R, id: i64) -> ServiceResult<TruckPageData>
where
    R: TruckReader + ?Sized,
{
    let id = parse_id(id)?;
    let truck = match repo.fetch_by_id(id).await {
        Err(ClientError::NotFound) => return Err(ServiceError::NotFound),
        result => {
            if let Err(err) = &result {
                log::error!("Failed to load truck {id}: {err}");
            }
            LoadState::from_result(result)
        }
    };
    Ok(TruckPageData { id, truck })
}

/// Loads the truck to prefill the edit form.
pub async fn load_truck_form<R>(repo: &R, id: i64) -> ServiceResult<TruckFormPageData>
where
    R: TruckReader + ?Sized,
{
    let id = parse_id(id)?;
    let truck = repo.fetch_by_id(id).await.map_err(|err| {
        log::error!("Failed to load truck {id} for editing: {err}");
        err
    })?;
    Ok(TruckFormPageData {
        id,
        form: TruckForm::from(&truck),
    })
}

/// Validates the create form and stores a new truck.
pub async fn create_truck<R>(repo: &R, form: &TruckForm) -> ServiceResult<Truck>
where
    R: TruckWriter + ?Sized,
{
    let new_truck = form.to_new_truck().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        err
    })?;
    let truck = repo.create_truck(&new_truck).await.map_err(|err| {
        log::error!("Failed to create a truck: {err}");
        err
    })?;
    log::info!("Created truck {}", truck.id);
    Ok(truck)
}

/// Validates the edit form and replaces the stored truck.
pub async fn update_truck<R>(repo: &R, id: i64, form: &TruckForm) -> ServiceResult<Truck>
where
    R: TruckWriter + ?Sized,
{
    let id = parse_id(id)?;
    let updates = form.to_new_truck().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        err
    })?;
    let truck = repo.update_truck(id, &updates).await.map_err(|err| {
        log::error!("Failed to update truck {id}: {err}");
        err
    })?;
    Ok(truck)
}

pub async fn delete_truck<R>(repo: &R, id: i64) -> ServiceResult<()>
where
    R: TruckWriter + ?Sized,
{
    let id = parse_id(id)?;
    repo.delete_truck(id).await.map_err(|err| {
        log::error!("Failed to delete truck {id}: {err}");
        err
    })?;
    log::info!("Deleted truck {id}");
    Ok(())
}

//! Access layer for the truck REST backend.
//!
//! [`TruckReader`] and [`TruckWriter`] are the seams the controller and the
//! services depend on; [`http::HttpTruckClient`] is the production
//! implementation and [`mock::MockTruckClient`] backs unit tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::errors::ClientResult;
use crate::domain::truck::{NewTruck, Truck};
use crate::domain::types::TruckId;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod wire;

/// Backend used when no other location is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";

/// Pagination contract spoken by the backend.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// `GET /trucks/paginated?page=&size=` returning
    /// `{content, totalElements, totalPages}`.
    #[default]
    PageSize,
    /// `GET /trucks?_start=&_limit=` returning a bare array, with the total
    /// count in `x-total-count` or derived from the full collection.
    OffsetLimit,
}

/// One page of trucks with the totals reported (or derived) for the whole
/// collection.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct PageResult {
    pub items: Vec<Truck>,
    pub total_items: usize,
    pub total_pages: usize,
}

#[async_trait]
pub trait TruckReader {
    /// Whole, unfiltered truck collection.
    async fn fetch_all(&self) -> ClientResult<Vec<Truck>>;
    async fn fetch_by_id(&self, id: TruckId) -> ClientResult<Truck>;
    /// Page of `size` trucks starting at the zero-based `offset`.
    ///
    /// Page-numbered backends can only serve offsets that are a multiple of
    /// `size`; other offsets fail with [`errors::ClientError::InvalidRequest`].
    async fn fetch_page(&self, offset: usize, size: usize) -> ClientResult<PageResult>;
}

#[async_trait]
pub trait TruckWriter {
    async fn create_truck(&self, truck: &NewTruck) -> ClientResult<Truck>;
    async fn update_truck(&self, id: TruckId, truck: &NewTruck) -> ClientResult<Truck>;
    async fn delete_truck(&self, id: TruckId) -> ClientResult<()>;
}

//! Mock truck client for isolating the controller and services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::client::errors::ClientResult;
use crate::client::{PageResult, TruckReader, TruckWriter};
use crate::domain::truck::{NewTruck, Truck};
use crate::domain::types::TruckId;

mock! {
    pub TruckClient {}

    #[async_trait]
    impl TruckReader for TruckClient {
        async fn fetch_all(&self) -> ClientResult<Vec<Truck>>;
        async fn fetch_by_id(&self, id: TruckId) -> ClientResult<Truck>;
        async fn fetch_page(&self, offset: usize, size: usize) -> ClientResult<PageResult>;
    }

    #[async_trait]
    impl TruckWriter for TruckClient {
        async fn create_truck(&self, truck: &NewTruck) -> ClientResult<Truck>;
        async fn update_truck(&self, id: TruckId, truck: &NewTruck) -> ClientResult<Truck>;
        async fn delete_truck(&self, id: TruckId) -> ClientResult<()>;
    }
}

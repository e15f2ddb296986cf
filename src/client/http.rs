//! reqwest-backed implementation of the truck client traits.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};

use crate::client::errors::{ClientError, ClientResult};
use crate::client::wire::{self, PagedEnvelope};
use crate::client::{PageResult, PaginationMode, TruckReader, TruckWriter};
use crate::domain::truck::{NewTruck, Truck};
use crate::domain::types::TruckId;

/// Talks to `{base_url}/trucks`. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpTruckClient {
    client: reqwest::Client,
    base_url: String,
    mode: PaginationMode,
}

impl HttpTruckClient {
    pub fn new(base_url: impl Into<String>, mode: PaginationMode) -> ClientResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url, mode))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        mode: PaginationMode,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            mode,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    fn trucks_url(&self) -> String {
        format!("{}/trucks", self.base_url)
    }

    fn truck_url(&self, id: TruckId) -> String {
        format!("{}/trucks/{id}", self.base_url)
    }

    async fn fetch_window(&self, offset: usize, size: usize) -> ClientResult<PageResult> {
        let response = self
            .client
            .get(self.trucks_url())
            .query(&[("_start", offset), ("_limit", size)])
            .send()
            .await?;
        let response = ensure_success(response, false).await?;

        let header_total = wire::total_count(response.headers());
        let items: Vec<Truck> = response.json().await?;

        let total_items = match header_total {
            Some(total) => total,
            None => {
                log::debug!("No {} header, counting the full collection", wire::TOTAL_COUNT_HEADER);
                self.fetch_all().await?.len()
            }
        };

        Ok(PageResult::from_window(items, total_items, size))
    }

    async fn fetch_envelope(&self, offset: usize, size: usize) -> ClientResult<PageResult> {
        let page = offset / size;
        let response = self
            .client
            .get(format!("{}/paginated", self.trucks_url()))
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;
        let response = ensure_success(response, false).await?;
        let envelope: PagedEnvelope<Truck> = response.json().await?;
        Ok(envelope.into())
    }
}

/// Maps non-success statuses to errors. A 404 means a missing entity only
/// when the request addressed a single truck.
async fn ensure_success(response: Response, entity_request: bool) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if entity_request && status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TruckReader for HttpTruckClient {
    async fn fetch_all(&self) -> ClientResult<Vec<Truck>> {
        log::debug!("GET {}", self.trucks_url());
        let response = self.client.get(self.trucks_url()).send().await?;
        let response = ensure_success(response, false).await?;
        Ok(response.json().await?)
    }

    async fn fetch_by_id(&self, id: TruckId) -> ClientResult<Truck> {
        log::debug!("GET {}", self.truck_url(id));
        let response = self.client.get(self.truck_url(id)).send().await?;
        let response = ensure_success(response, true).await?;
        Ok(response.json().await?)
    }

    async fn fetch_page(&self, offset: usize, size: usize) -> ClientResult<PageResult> {
        if size == 0 {
            return Err(ClientError::InvalidRequest(
                "page size must be greater than zero".to_string(),
            ));
        }
        if self.mode == PaginationMode::PageSize && offset % size != 0 {
            return Err(ClientError::InvalidRequest(format!(
                "offset {offset} is not a multiple of page size {size}"
            )));
        }
        log::debug!("Fetching trucks offset={offset} size={size} ({:?})", self.mode);
        match self.mode {
            PaginationMode::PageSize => self.fetch_envelope(offset, size).await,
            PaginationMode::OffsetLimit => self.fetch_window(offset, size).await,
        }
    }
}

#[async_trait]
impl TruckWriter for HttpTruckClient {
    async fn create_truck(&self, truck: &NewTruck) -> ClientResult<Truck> {
        log::debug!("POST {}", self.trucks_url());
        let response = self.client.post(self.trucks_url()).json(truck).send().await?;
        let response = ensure_success(response, false).await?;
        Ok(response.json().await?)
    }

    async fn update_truck(&self, id: TruckId, truck: &NewTruck) -> ClientResult<Truck> {
        log::debug!("PUT {}", self.truck_url(id));
        let response = self
            .client
            .put(self.truck_url(id))
            .json(truck)
            .send()
            .await?;
        let response = ensure_success(response, true).await?;
        Ok(response.json().await?)
    }

    async fn delete_truck(&self, id: TruckId) -> ClientResult<()> {
        log::debug!("DELETE {}", self.truck_url(id));
        let response = self.client.delete(self.truck_url(id)).send().await?;
        ensure_success(response, true).await?;
        Ok(())
    }
}

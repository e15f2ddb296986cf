//! Pagination state machine behind the truck list view.
//!
//! The controller owns a single [`PageState`] snapshot and replaces it
//! wholesale whenever a page fetch completes. Every load is tagged with a
//! monotonically increasing request id; a completion is applied only when
//! its id is still the most recent one issued, so responses arriving out of
//! order can never overwrite a newer page.

use std::sync::Arc;

use crate::client::errors::{ClientError, ClientResult};
use crate::client::{PageResult, TruckReader};
use crate::pagination::PageState;

/// Outcome of a navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageChange {
    /// The fetched page replaced the current state.
    Applied,
    /// A newer load was issued before this one completed; its result was
    /// discarded.
    Superseded,
    /// The requested page is outside the known range; nothing was fetched.
    Rejected,
}

/// A page load that has been issued but not yet applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingLoad {
    request_id: u64,
    page: usize,
    offset: usize,
    size: usize,
}

impl PendingLoad {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Zero-based index of the first truck on the page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Issues the backend request for this load.
    pub async fn fetch<C>(&self, client: &C) -> ClientResult<PageResult>
    where
        C: TruckReader + ?Sized,
    {
        client.fetch_page(self.offset, self.size).await
    }
}

pub struct TruckListController<'a, C: ?Sized> {
    client: &'a C,
    page_size: usize,
    state: Arc<PageState>,
    last_issued: u64,
}

impl<'a, C> TruckListController<'a, C>
where
    C: TruckReader + ?Sized,
{
    /// Creates a controller showing nothing yet. A zero `page_size` is
    /// raised to one.
    pub fn new(client: &'a C, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            client,
            page_size,
            state: Arc::new(PageState::empty(page_size)),
            last_issued: 0,
        }
    }

    pub fn client(&self) -> &'a C {
        self.client
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Shared handle to the current snapshot; stays valid after the
    /// controller moves on to another page.
    pub fn snapshot(&self) -> Arc<PageState> {
        Arc::clone(&self.state)
    }

    /// Resets to page 1 and loads it.
    pub async fn initialize(&mut self) -> ClientResult<PageChange> {
        self.state = Arc::new(PageState::empty(self.page_size));
        self.load_page(1).await
    }

    /// Fetches `page` and applies it unless a newer load was issued in the
    /// meantime. On error the current state is kept and the error returned.
    pub async fn load_page(&mut self, page: usize) -> ClientResult<PageChange> {
        let pending = self.begin_load(page)?;
        let result = pending.fetch(self.client).await.map_err(|err| {
            log::warn!("Failed to load truck page {page}: {err}");
            err
        })?;
        Ok(self.complete_load(pending, result))
    }

    /// Loads `page` if it lies within the current `1..=total_pages`.
    ///
    /// The range is checked against the state at call time only; a backend
    /// whose collection shrank in the meantime may answer with an empty page,
    /// which is applied as is.
    pub async fn go_to_page(&mut self, page: usize) -> ClientResult<PageChange> {
        if !self.state.accepts(page) {
            log::debug!(
                "Rejected navigation to page {page} (total pages: {})",
                self.state.total_pages
            );
            return Ok(PageChange::Rejected);
        }
        self.load_page(page).await
    }

    /// Registers a new load for `page` and returns the ticket to fetch and
    /// complete it with. Issuing a ticket invalidates all earlier ones.
    ///
    /// Fails with [`ClientError::InvalidRequest`] when the page's offset does
    /// not fit in `usize`; no ticket is issued then.
    pub fn begin_load(&mut self, page: usize) -> ClientResult<PendingLoad> {
        let offset = page
            .saturating_sub(1)
            .checked_mul(self.page_size)
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!("page {page} is beyond addressable range"))
            })?;
        self.last_issued += 1;
        Ok(PendingLoad {
            request_id: self.last_issued,
            page,
            offset,
            size: self.page_size,
        })
    }

    /// Applies a fetched page if `pending` is the latest issued load.
    pub fn complete_load(&mut self, pending: PendingLoad, result: PageResult) -> PageChange {
        if pending.request_id != self.last_issued {
            log::debug!(
                "Discarding stale response for page {} (request {}, latest {})",
                pending.page,
                pending.request_id,
                self.last_issued
            );
            return PageChange::Superseded;
        }
        self.state = Arc::new(PageState::from_result(pending.page, self.page_size, result));
        PageChange::Applied
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use mockall::predicate::eq;

    use super::*;
    use crate::client::errors::ClientError;
    use crate::client::mock::MockTruckClient;
    use crate::domain::truck::Truck;
    use crate::domain::types::TruckId;
    use crate::pagination::total_pages_for;

    fn fleet(total: usize) -> Vec<Truck> {
        (1..=total as i64)
            .map(|id| Truck {
                id: TruckId::new(id).unwrap(),
                model: format!("Truck #{id}"),
                status: "OPERATIONAL".to_string(),
                details: String::new(),
            })
            .collect()
    }

    fn window(total: usize, offset: usize, size: usize) -> PageResult {
        let trucks = fleet(total);
        PageResult {
            items: trucks.into_iter().skip(offset).take(size).collect(),
            total_items: total,
            total_pages: total_pages_for(total, size),
        }
    }

    /// Client serving an in-memory fleet of `total` trucks.
    fn backend(total: usize) -> MockTruckClient {
        let mut client = MockTruckClient::new();
        client
            .expect_fetch_page()
            .returning(move |offset, size| Ok(window(total, offset, size)));
        client
    }

    fn ids(state: &PageState) -> Vec<i64> {
        state.items.iter().map(|truck| truck.id.get()).collect()
    }

    #[test]
    fn initialize_loads_first_page() {
        let mut client = MockTruckClient::new();
        client
            .expect_fetch_page()
            .with(eq(0), eq(5))
            .times(1)
            .returning(|offset, size| Ok(window(11, offset, size)));
        let mut controller = TruckListController::new(&client, 5);

        assert_eq!(block_on(controller.initialize()).unwrap(), PageChange::Applied);

        let state = controller.state();
        assert_eq!(state.current_page, 1);
        assert_eq!(state.total_items, 11);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.pages, vec![1, 2, 3]);
        assert_eq!(ids(state), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn eleven_trucks_in_pages_of_five() {
        let client = backend(11);
        let mut controller = TruckListController::new(&client, 5);
        block_on(controller.initialize()).unwrap();

        let before = controller.snapshot();
        assert_eq!(block_on(controller.go_to_page(4)).unwrap(), PageChange::Rejected);
        assert_eq!(*controller.state(), *before);

        assert_eq!(block_on(controller.go_to_page(2)).unwrap(), PageChange::Applied);
        assert_eq!(controller.state().current_page, 2);
        assert_eq!(ids(controller.state()), vec![6, 7, 8, 9, 10]);

        block_on(controller.go_to_page(3)).unwrap();
        assert_eq!(ids(controller.state()), vec![11]);
    }

    #[test]
    fn empty_backend_rejects_every_page() {
        let mut client = MockTruckClient::new();
        client
            .expect_fetch_page()
            .times(1)
            .returning(|offset, size| Ok(window(0, offset, size)));
        let mut controller = TruckListController::new(&client, 5);
        block_on(controller.initialize()).unwrap();

        assert_eq!(controller.state().total_pages, 0);
        assert!(controller.state().items.is_empty());
        assert_eq!(block_on(controller.go_to_page(1)).unwrap(), PageChange::Rejected);
    }

    #[test]
    fn navigation_before_first_load_is_rejected_without_fetching() {
        let mut client = MockTruckClient::new();
        client.expect_fetch_page().never();
        let mut controller = TruckListController::new(&client, 5);

        assert_eq!(block_on(controller.go_to_page(1)).unwrap(), PageChange::Rejected);
        assert_eq!(*controller.state(), PageState::empty(5));
    }

    #[test]
    fn out_of_range_pages_do_not_fetch() {
        let mut client = MockTruckClient::new();
        client
            .expect_fetch_page()
            .times(1)
            .returning(|offset, size| Ok(window(4, offset, size)));
        let mut controller = TruckListController::new(&client, 2);
        block_on(controller.initialize()).unwrap();

        for page in [0, 3, 100] {
            assert_eq!(
                block_on(controller.go_to_page(page)).unwrap(),
                PageChange::Rejected
            );
        }
        assert_eq!(controller.state().current_page, 1);
    }

    #[test]
    fn load_page_sets_items_and_pager_from_result() {
        for (total, size) in [(1, 2), (5, 2), (10, 5), (11, 2)] {
            let client = backend(total);
            let mut controller = TruckListController::new(&client, size);
            block_on(controller.initialize()).unwrap();
            let last = controller.state().total_pages;

            block_on(controller.load_page(last)).unwrap();

            let expected = window(total, (last - 1) * size, size);
            let state = controller.state();
            assert_eq!(state.current_page, last);
            assert_eq!(state.items, expected.items);
            assert_eq!(state.pages, (1..=last).collect::<Vec<_>>());
        }
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let mut client = MockTruckClient::new();
        client
            .expect_fetch_page()
            .with(eq(0), eq(5))
            .returning(|offset, size| Ok(window(11, offset, size)));
        client
            .expect_fetch_page()
            .with(eq(5), eq(5))
            .returning(|_, _| Err(ClientError::Transport("connection refused".into())));
        let mut controller = TruckListController::new(&client, 5);
        block_on(controller.initialize()).unwrap();
        let before = controller.snapshot();

        let err = block_on(controller.go_to_page(2)).unwrap_err();

        assert!(err.is_transport());
        assert_eq!(*controller.state(), *before);
    }

    #[test]
    fn shrinking_backend_replaces_state_without_revalidation() {
        let mut client = MockTruckClient::new();
        client
            .expect_fetch_page()
            .with(eq(0), eq(5))
            .returning(|offset, size| Ok(window(11, offset, size)));
        client
            .expect_fetch_page()
            .with(eq(10), eq(5))
            .returning(|offset, size| Ok(window(4, offset, size)));
        let mut controller = TruckListController::new(&client, 5);
        block_on(controller.initialize()).unwrap();

        assert_eq!(block_on(controller.go_to_page(3)).unwrap(), PageChange::Applied);

        let state = controller.state();
        assert_eq!(state.current_page, 3);
        assert_eq!(state.total_pages, 1);
        assert!(state.items.is_empty());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let client = backend(11);
        let mut controller = TruckListController::new(&client, 5);
        block_on(controller.initialize()).unwrap();

        let second = controller.begin_load(2).unwrap();
        let third = controller.begin_load(3).unwrap();
        assert!(third.request_id() > second.request_id());
        assert_eq!(second.offset(), 5);
        assert_eq!(third.offset(), 10);

        let third_result = block_on(third.fetch(controller.client())).unwrap();
        let second_result = block_on(second.fetch(controller.client())).unwrap();

        assert_eq!(
            controller.complete_load(third, third_result),
            PageChange::Applied
        );
        assert_eq!(
            controller.complete_load(second, second_result),
            PageChange::Superseded
        );
        assert_eq!(controller.state().current_page, 3);
        assert_eq!(ids(controller.state()), vec![11]);
    }

    #[test]
    fn older_completion_is_discarded_even_when_it_arrives_first() {
        let client = backend(11);
        let mut controller = TruckListController::new(&client, 5);
        block_on(controller.initialize()).unwrap();

        let second = controller.begin_load(2).unwrap();
        let second_result = block_on(second.fetch(controller.client())).unwrap();
        let third = controller.begin_load(3).unwrap();

        assert_eq!(
            controller.complete_load(second, second_result),
            PageChange::Superseded
        );
        assert_eq!(controller.state().current_page, 1);

        let third_result = block_on(third.fetch(controller.client())).unwrap();
        controller.complete_load(third, third_result);
        assert_eq!(controller.state().current_page, 3);
    }

    #[test]
    fn unaddressable_page_fails_without_fetching() {
        let mut client = MockTruckClient::new();
        client
            .expect_fetch_page()
            .with(eq(0), eq(5))
            .times(1)
            .returning(|offset, size| Ok(window(11, offset, size)));
        let mut controller = TruckListController::new(&client, 5);
        block_on(controller.initialize()).unwrap();
        let before = controller.snapshot();

        let err = block_on(controller.load_page(usize::MAX)).unwrap_err();

        assert!(matches!(err, ClientError::InvalidRequest(_)));
        assert_eq!(*controller.state(), *before);

        // The failed attempt issued no ticket, so a later load still applies.
        let pending = controller.begin_load(2).unwrap();
        assert_eq!(pending.request_id(), 2);
    }

    #[test]
    fn snapshots_outlive_state_replacement() {
        let client = backend(11);
        let mut controller = TruckListController::new(&client, 5);
        block_on(controller.initialize()).unwrap();
        let first = controller.snapshot();

        block_on(controller.go_to_page(2)).unwrap();

        assert_eq!(first.current_page, 1);
        assert_eq!(controller.state().current_page, 2);
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        let client = backend(3);
        let controller = TruckListController::new(&client, 0);
        assert_eq!(controller.page_size(), 1);
    }
}

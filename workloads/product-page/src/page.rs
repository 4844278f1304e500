//! The mounted product page.
//!
//! [`ProductPage`] owns the selection and shipping state, restores them from
//! the snapshot store when mounted, and writes a fresh snapshot after every
//! change. Storage failures are logged and never surface to the caller.

use vitrine_cache::{CacheError, Clock, KvStore, SnapshotRead, SnapshotStore, SystemClock};
use vitrine_commerce::{standard_options, Address, Product, ShippingOption};
use vitrine_data::{LookupOutcome, PostalLookup};
use vitrine_observability::StructuredLogger;

use crate::data::PersistedSelection;
use crate::error::LookupError;
use crate::options::{PageOptions, ResponseOrdering};
use crate::sections::render_page;
use crate::shipping::{Completion, LookupTicket, ShippingState};
use crate::state::SelectionState;

/// A product detail page bound to a snapshot store.
pub struct ProductPage<S, C = SystemClock> {
    product: Product,
    selection: SelectionState,
    shipping: ShippingState,
    gallery_open: bool,
    ordering: ResponseOrdering,
    snapshots: SnapshotStore<PersistedSelection, S, C>,
    logger: StructuredLogger,
}

impl<S: KvStore, C: Clock> ProductPage<S, C> {
    /// Mount the page: restore a fresh snapshot if there is one, then save.
    ///
    /// An expired snapshot is deleted and a malformed one ignored; in both
    /// cases the page starts from defaults.
    pub fn mount(
        product: Product,
        snapshots: SnapshotStore<PersistedSelection, S, C>,
        logger: StructuredLogger,
    ) -> Self {
        let mut page = Self {
            selection: SelectionState::new(product.image_count()),
            shipping: ShippingState::new(),
            product,
            gallery_open: false,
            ordering: ResponseOrdering::default(),
            snapshots,
            logger,
        };
        page.hydrate();
        page.persist();
        page
    }

    /// Mount with the key, lifetime and ordering from `options`.
    pub fn mount_with_options(
        product: Product,
        store: S,
        clock: C,
        options: &PageOptions,
        logger: StructuredLogger,
    ) -> Self {
        let snapshots = options.snapshot_store(store, clock);
        Self::mount(product, snapshots, logger).with_ordering(options.ordering)
    }

    /// Set the overlapping lookup policy.
    pub fn with_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn shipping(&self) -> &ShippingState {
        &self.shipping
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    pub fn is_gallery_open(&self) -> bool {
        self.gallery_open
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    pub fn snapshots(&self) -> &SnapshotStore<PersistedSelection, S, C> {
        &self.snapshots
    }

    /// URL of the image being shown.
    pub fn current_image(&self) -> Option<&str> {
        self.product.image(self.selection.image_index())
    }

    /// Both a size and a color are chosen.
    pub fn can_purchase(&self) -> bool {
        self.selection.can_purchase()
    }

    /// Number shown on the cart badge.
    pub fn cart_count(&self) -> u32 {
        self.selection.quantity()
    }

    /// Delivery options, available once an address is resolved.
    pub fn shipping_options(&self) -> Vec<ShippingOption> {
        if self.shipping.address().is_some() {
            standard_options()
        } else {
            Vec::new()
        }
    }

    /// The state as it would be saved.
    pub fn snapshot(&self) -> PersistedSelection {
        PersistedSelection {
            selected_size: self.selection.size().unwrap_or_default().to_string(),
            selected_color: self.selection.color().unwrap_or_default().to_string(),
            selected_image: i64::try_from(self.selection.image_index()).unwrap_or(i64::MAX),
            cep: self.shipping.postal_code().to_string(),
            address: self.shipping.address().cloned(),
            quantity: i64::from(self.selection.quantity()),
            is_favorite: self.selection.is_favorite(),
        }
    }

    /// Render the full page as HTML.
    pub fn render(&self) -> String {
        render_page(
            &self.product,
            &self.selection,
            &self.shipping,
            self.gallery_open,
        )
    }

    pub fn previous_image(&mut self) -> bool {
        let changed = self.selection.previous_image();
        self.persist_if(changed)
    }

    pub fn next_image(&mut self) -> bool {
        let changed = self.selection.next_image();
        self.persist_if(changed)
    }

    pub fn select_image(&mut self, index: usize) -> bool {
        let changed = self.selection.select_image(index);
        self.persist_if(changed)
    }

    pub fn select_size(&mut self, size: &str) -> bool {
        let changed = self.selection.select_size(size);
        self.persist_if(changed)
    }

    pub fn select_color(&mut self, color: &str) -> bool {
        let changed = self.selection.select_color(color);
        self.persist_if(changed)
    }

    pub fn increment_quantity(&mut self) -> bool {
        let changed = self.selection.increment_quantity();
        self.persist_if(changed)
    }

    pub fn decrement_quantity(&mut self) -> bool {
        let changed = self.selection.decrement_quantity();
        self.persist_if(changed)
    }

    pub fn toggle_favorite(&mut self) -> bool {
        let changed = self.selection.toggle_favorite();
        self.persist_if(changed)
    }

    /// Type into the CEP field. The value is normalized as it is stored.
    pub fn edit_postal_code(&mut self, input: &str) -> bool {
        let changed = self.shipping.edit_postal_code(input);
        self.persist_if(changed)
    }

    pub fn open_gallery(&mut self) {
        self.gallery_open = true;
    }

    pub fn close_gallery(&mut self) {
        self.gallery_open = false;
    }

    /// Validate the CEP field and start a lookup.
    ///
    /// Fails without touching the network when the field does not hold
    /// exactly eight digits.
    pub fn begin_lookup(&mut self) -> Result<LookupTicket, LookupError> {
        match self.shipping.begin_lookup() {
            Ok(ticket) => {
                self.logger
                    .info_builder("CEP lookup started")
                    .field("cep", ticket.code().formatted())
                    .field_i64("token", ticket_token(&ticket))
                    .emit();
                Ok(ticket)
            }
            Err(err) => {
                self.logger
                    .debug_builder("CEP rejected")
                    .field("cep", self.shipping.postal_code())
                    .field("error", err.to_string())
                    .emit();
                Err(err)
            }
        }
    }

    /// Apply the outcome of a lookup started with [`Self::begin_lookup`].
    pub fn complete_lookup(&mut self, ticket: &LookupTicket, outcome: LookupOutcome) -> Completion {
        let before = self.shipping.address().cloned();
        let result = outcome_label(&outcome);
        let completion = self
            .shipping
            .complete_lookup(ticket, outcome, self.ordering);

        match completion {
            Completion::Applied => {
                self.logger
                    .info_builder("CEP lookup finished")
                    .field("cep", ticket.code().formatted())
                    .field_i64("token", ticket_token(ticket))
                    .field("outcome", result)
                    .emit();
                if self.shipping.address() != before.as_ref() {
                    self.persist();
                }
            }
            Completion::Stale => {
                self.logger
                    .debug_builder("Dropped stale CEP lookup")
                    .field_i64("token", ticket_token(ticket))
                    .emit();
            }
        }
        completion
    }

    /// Look up the CEP field and apply the result.
    ///
    /// Returns this attempt's address or error. Under
    /// [`ResponseOrdering::LastRequestWins`] a result superseded by a newer
    /// lookup is returned but not applied.
    pub async fn search_postal_code<L>(&mut self, lookup: &L) -> Result<Address, LookupError>
    where
        L: PostalLookup + ?Sized,
    {
        let ticket = self.begin_lookup()?;
        let outcome = lookup.lookup(ticket.code()).await;
        let result = match &outcome {
            LookupOutcome::Found(address) => Ok(address.clone()),
            LookupOutcome::NotFound => Err(LookupError::NotFound),
            LookupOutcome::Failed(err) => Err(LookupError::Failed(err.clone())),
        };
        self.complete_lookup(&ticket, outcome);
        result
    }

    /// Drop the saved snapshot and return to defaults.
    pub fn reset(&mut self) {
        self.selection = SelectionState::new(self.product.image_count());
        self.shipping = ShippingState::new();
        self.gallery_open = false;
        match self.snapshots.clear() {
            Ok(()) => self.logger.info("Selection reset"),
            Err(err) => self.log_storage_failure("Failed to clear selection", &err),
        }
    }

    fn hydrate(&mut self) {
        match self.snapshots.load() {
            Ok(SnapshotRead::Fresh(snapshot)) => {
                let age = self.snapshots.now_millis().saturating_sub(snapshot.timestamp);
                self.apply(&snapshot.data);
                self.logger
                    .info_builder("Restored saved selection")
                    .field_i64("age_ms", age)
                    .field_bool("has_address", snapshot.data.address.is_some())
                    .emit();
            }
            Ok(SnapshotRead::Expired { age }) => {
                self.logger
                    .info_builder("Discarded expired selection")
                    .duration_ms("age_ms", age)
                    .emit();
            }
            Ok(SnapshotRead::Missing) => self.logger.debug("No saved selection"),
            Err(err) => self.log_storage_failure("Ignoring unreadable selection", &err),
        }
    }

    fn apply(&mut self, saved: &PersistedSelection) {
        let mut selection = SelectionState::new(self.product.image_count());
        selection.select_image(saved.image_index(self.product.image_count()));
        selection.select_size(saved.size().unwrap_or_default());
        selection.select_color(saved.color().unwrap_or_default());
        selection.set_quantity(saved.quantity());
        selection.set_favorite(saved.is_favorite);

        self.selection = selection;
        self.shipping = ShippingState::restore(&saved.cep, saved.address.clone());
    }

    fn persist_if(&mut self, changed: bool) -> bool {
        if changed {
            self.persist();
        }
        changed
    }

    fn persist(&self) {
        match self.snapshots.save(&self.snapshot()) {
            Ok(timestamp) => self
                .logger
                .debug_builder("Saved selection")
                .field_i64("timestamp", timestamp)
                .emit(),
            Err(err) => self.log_storage_failure("Failed to save selection", &err),
        }
    }

    fn log_storage_failure(&self, message: &str, err: &CacheError) {
        self.logger
            .warn_builder(message)
            .field("key", self.snapshots.key())
            .field("error", err.to_string())
            .emit();
    }
}

fn ticket_token(ticket: &LookupTicket) -> i64 {
    i64::try_from(ticket.token()).unwrap_or(i64::MAX)
}

fn outcome_label(outcome: &LookupOutcome) -> &'static str {
    match outcome {
        LookupOutcome::Found(_) => "found",
        LookupOutcome::NotFound => "not_found",
        LookupOutcome::Failed(_) => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use vitrine_cache::{Cache, FileStore, ManualClock, MemoryStore};
    use vitrine_commerce::PostalCode;
    use vitrine_data::FetchError;
    use vitrine_observability::{LogLevel, LogSink};

    use crate::data::sample_product;

    const KEY: &str = "productPageData";
    const NOW: i64 = 1_700_000_000_000;

    /// Answers from a fixed table and records every code it was asked for.
    #[derive(Default)]
    struct ScriptedLookup {
        answers: HashMap<String, LookupOutcome>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedLookup {
        fn with(mut self, digits: &str, outcome: LookupOutcome) -> Self {
            self.answers.insert(digits.to_string(), outcome);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl PostalLookup for ScriptedLookup {
        async fn lookup(&self, code: &PostalCode) -> LookupOutcome {
            self.calls.borrow_mut().push(code.as_str().to_string());
            self.answers
                .get(code.as_str())
                .cloned()
                .unwrap_or(LookupOutcome::NotFound)
        }
    }

    /// Reads work, writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KvStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
            Err(CacheError::StoreError("read-only".to_string()))
        }

        fn delete(&self, key: &str) -> Result<(), CacheError> {
            self.0.delete(key)
        }
    }

    fn paulista() -> Address {
        Address::new("Avenida Paulista", "Bela Vista", "São Paulo", "SP", "01310-100")
    }

    fn centro() -> Address {
        Address::new("Avenida Rio Branco", "Centro", "Rio de Janeiro", "RJ", "20040-020")
    }

    fn buffered_logger() -> StructuredLogger {
        StructuredLogger::new("test")
            .with_min_level(LogLevel::Debug)
            .with_sink(LogSink::buffer())
    }

    fn mount<'a>(store: &'a MemoryStore, clock: &ManualClock) -> ProductPage<&'a MemoryStore, ManualClock> {
        let snapshots = SnapshotStore::with_clock(store, clock.clone(), KEY);
        ProductPage::mount(sample_product(), snapshots, buffered_logger())
    }

    fn stored(store: &MemoryStore) -> serde_json::Value {
        Cache::new(store)
            .get::<serde_json::Value>(KEY)
            .unwrap()
            .expect("snapshot stored")
    }

    fn messages(page: &ProductPage<&MemoryStore, ManualClock>) -> Vec<String> {
        page.logger()
            .sink()
            .entries()
            .into_iter()
            .map(|entry| entry.message)
            .collect()
    }

    #[test]
    fn test_mount_defaults_and_saves() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(NOW);
        let page = mount(&store, &clock);

        assert_eq!(page.selection().image_index(), 0);
        assert_eq!(page.selection().size(), None);
        assert_eq!(page.selection().color(), None);
        assert_eq!(page.selection().quantity(), 1);
        assert!(!page.selection().is_favorite());
        assert_eq!(page.shipping().postal_code(), "");
        assert!(page.shipping().address().is_none());

        let saved = stored(&store);
        assert_eq!(saved["timestamp"], NOW);
        assert_eq!(saved["quantity"], 1);
        assert_eq!(saved["selectedSize"], "");
        assert!(saved["address"].is_null());
        assert!(messages(&page).contains(&"No saved selection".to_string()));
    }

    #[test]
    fn test_every_change_writes_fresh_snapshot() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(NOW);
        let mut page = mount(&store, &clock);

        clock.advance(Duration::from_secs(1));
        assert!(page.select_size("42"));
        let saved = stored(&store);
        assert_eq!(saved["selectedSize"], "42");
        assert_eq!(saved["timestamp"], NOW + 1_000);

        clock.advance(Duration::from_secs(1));
        page.select_color("Preto");
        page.next_image();
        page.increment_quantity();
        page.toggle_favorite();
        page.edit_postal_code("01310100");

        let saved = stored(&store);
        assert_eq!(saved["selectedColor"], "Preto");
        assert_eq!(saved["selectedImage"], 1);
        assert_eq!(saved["quantity"], 2);
        assert_eq!(saved["isFavorite"], true);
        assert_eq!(saved["cep"], "01310-100");
        assert_eq!(saved["timestamp"], NOW + 2_000);
    }

    #[test]
    fn test_unchanged_state_is_not_rewritten() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(NOW);
        let mut page = mount(&store, &clock);

        clock.advance(Duration::from_secs(5));
        assert!(!page.previous_image());
        assert!(!page.decrement_quantity());
        assert_eq!(stored(&store)["timestamp"], NOW);
    }

    #[test]
    fn test_round_trip_within_window() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(NOW);
        let mut page = mount(&store, &clock);
        page.select_image(3);
        page.select_size("40");
        page.select_color("Azul");
        page.increment_quantity();
        page.increment_quantity();
        page.toggle_favorite();
        page.edit_postal_code("01310-100");
        let ticket = page.begin_lookup().unwrap();
        page.complete_lookup(&ticket, LookupOutcome::Found(paulista()));
        let before = page.snapshot();

        clock.advance(Duration::from_secs(14 * 60));
        let restored = mount(&store, &clock);
        assert_eq!(restored.snapshot(), before);
        assert_eq!(restored.selection().image_index(), 3);
        assert_eq!(restored.selection().size(), Some("40"));
        assert_eq!(restored.selection().color(), Some("Azul"));
        assert_eq!(restored.selection().quantity(), 3);
        assert!(restored.selection().is_favorite());
        assert_eq!(restored.shipping().postal_code(), "01310-100");
        assert_eq!(restored.shipping().address(), Some(&paulista()));
        assert!(messages(&restored).contains(&"Restored saved selection".to_string()));
    }

    #[test]
    fn test_sixteen_minute_old_snapshot_is_discarded() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(NOW);
        let mut page = mount(&store, &clock);
        page.select_size("44");
        page.toggle_favorite();

        clock.advance(Duration::from_secs(16 * 60));
        let page = mount(&store, &clock);
        assert_eq!(page.selection().size(), None);
        assert!(!page.selection().is_favorite());
        assert!(messages(&page).contains(&"Discarded expired selection".to_string()));

        // The old snapshot is gone; only the fresh defaults remain.
        let saved = stored(&store);
        assert_eq!(saved["selectedSize"], "");
        assert_eq!(saved["timestamp"], NOW + 16 * 60 * 1_000);
    }

    #[test]
    fn test_malformed_snapshot_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.set(KEY, b"{not json").unwrap();
        let clock = ManualClock::new(NOW);

        let page = mount(&store, &clock);
        assert_eq!(page.selection().quantity(), 1);
        assert!(messages(&page).contains(&"Ignoring unreadable selection".to_string()));
        assert_eq!(stored(&store)["timestamp"], NOW);
    }

    #[test]
    fn test_corrupt_snapshot_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();
        let clock = ManualClock::new(NOW);
        let open = |clock: &ManualClock| {
            let snapshots = SnapshotStore::with_clock(FileStore::open(&path), clock.clone(), KEY);
            ProductPage::mount(sample_product(), snapshots, buffered_logger())
        };

        let mut page = open(&clock);
        assert_eq!(page.selection().size(), None);
        assert!(page.select_size("42"));
        let warnings = page
            .logger()
            .sink()
            .entries()
            .into_iter()
            .filter(|entry| entry.level == LogLevel::Warn)
            .count();
        assert_eq!(warnings, 1);

        clock.advance(Duration::from_secs(60));
        let reopened = open(&clock);
        assert_eq!(reopened.selection().size(), Some("42"));
    }

    #[test]
    fn test_null_address_field_keeps_selection() {
        let store = MemoryStore::new();
        let raw = serde_json::json!({
            "selectedSize": "42",
            "selectedColor": "Preto",
            "cep": "01001-000",
            "address": {
                "street": null,
                "neighborhood": "Sé",
                "city": "São Paulo",
                "state": "SP",
                "cep": "01001-000",
            },
            "quantity": 3,
            "isFavorite": true,
            "timestamp": NOW,
        });
        store.set(KEY, raw.to_string().as_bytes()).unwrap();

        let page = mount(&store, &ManualClock::new(NOW + 1));
        assert_eq!(page.selection().size(), Some("42"));
        assert_eq!(page.selection().color(), Some("Preto"));
        assert_eq!(page.selection().quantity(), 3);
        assert!(page.selection().is_favorite());
        let address = page.shipping().address().unwrap();
        assert_eq!(address.street, "");
        assert_eq!(address.city, "São Paulo");
    }

    #[test]
    fn test_falsy_fields_fall_back() {
        let store = MemoryStore::new();
        let raw = serde_json::json!({
            "selectedSize": "",
            "selectedColor": null,
            "selectedImage": 42,
            "cep": "01310100",
            "quantity": 0,
            "timestamp": NOW,
        });
        store.set(KEY, raw.to_string().as_bytes()).unwrap();
        let clock = ManualClock::new(NOW + 1);

        let page = mount(&store, &clock);
        assert_eq!(page.selection().size(), None);
        assert_eq!(page.selection().color(), None);
        assert_eq!(page.selection().image_index(), 3);
        assert_eq!(page.selection().quantity(), 1);
        assert_eq!(page.shipping().postal_code(), "01310-100");
        assert!(page.shipping().address().is_none());
    }

    #[test]
    fn test_write_failures_are_logged_not_raised() {
        let store = ReadOnlyStore(MemoryStore::new());
        let snapshots = SnapshotStore::with_clock(&store, ManualClock::new(NOW), KEY);
        let mut page = ProductPage::mount(sample_product(), snapshots, buffered_logger());

        assert!(page.select_size("41"));
        assert_eq!(page.selection().size(), Some("41"));

        let warnings: Vec<_> = page
            .logger()
            .sink()
            .entries()
            .into_iter()
            .filter(|entry| entry.level == LogLevel::Warn)
            .collect();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message, "Failed to save selection");
        assert_eq!(
            warnings[0].field("key"),
            Some(&serde_json::Value::from(KEY))
        );
    }

    #[tokio::test]
    async fn test_short_code_never_reaches_network() {
        let store = MemoryStore::new();
        let mut page = mount(&store, &ManualClock::new(NOW));
        let lookup = ScriptedLookup::default();

        page.edit_postal_code("1234567");
        let err = page.search_postal_code(&lookup).await.unwrap_err();

        assert_eq!(err.to_string(), "CEP deve conter 8 dígitos");
        assert!(lookup.calls().is_empty());
        assert!(page.shipping().address().is_none());
        assert!(!page.shipping().is_loading());
    }

    #[tokio::test]
    async fn test_successful_lookup_mirrors_address() {
        let store = MemoryStore::new();
        let mut page = mount(&store, &ManualClock::new(NOW));
        let lookup =
            ScriptedLookup::default().with("01310100", LookupOutcome::Found(paulista()));

        page.edit_postal_code("01310-100");
        let address = page.search_postal_code(&lookup).await.unwrap();

        assert_eq!(address.street, "Avenida Paulista");
        assert_eq!(page.shipping().address(), Some(&paulista()));
        assert!(page.shipping().error().is_none());
        assert!(!page.shipping().is_loading());
        assert_eq!(lookup.calls(), vec!["01310100".to_string()]);
        assert_eq!(page.shipping_options().len(), 2);
        assert_eq!(stored(&store)["address"]["street"], "Avenida Paulista");
        assert_eq!(stored(&store)["address"]["cep"], "01310-100");
    }

    #[tokio::test]
    async fn test_not_found_and_failure_clear_address() {
        let store = MemoryStore::new();
        let mut page = mount(&store, &ManualClock::new(NOW));
        let lookup = ScriptedLookup::default()
            .with("01310100", LookupOutcome::Found(paulista()))
            .with(
                "99999999",
                LookupOutcome::Failed(FetchError::Connection("reset".to_string())),
            );

        page.edit_postal_code("01310-100");
        page.search_postal_code(&lookup).await.unwrap();

        page.edit_postal_code("00000000");
        let err = page.search_postal_code(&lookup).await.unwrap_err();
        assert_eq!(err, LookupError::NotFound);
        assert_eq!(page.shipping().error(), Some(&LookupError::NotFound));
        assert!(page.shipping().address().is_none());
        assert!(!page.shipping().is_loading());

        page.edit_postal_code("99999-999");
        let err = page.search_postal_code(&lookup).await.unwrap_err();
        assert_eq!(err.to_string(), "Erro ao buscar CEP");
        assert!(page.shipping().address().is_none());
        assert!(!page.shipping().is_loading());
        assert!(page.shipping_options().is_empty());
        assert!(stored(&store)["address"].is_null());
    }

    #[test]
    fn test_overlapping_lookups_last_response_wins() {
        let store = MemoryStore::new();
        let mut page = mount(&store, &ManualClock::new(NOW));

        page.edit_postal_code("01310-100");
        let first = page.begin_lookup().unwrap();
        page.edit_postal_code("20040-020");
        let second = page.begin_lookup().unwrap();

        page.complete_lookup(&second, LookupOutcome::Found(centro()));
        page.complete_lookup(&first, LookupOutcome::Found(paulista()));

        assert_eq!(page.shipping().address(), Some(&paulista()));
        assert_eq!(stored(&store)["address"]["city"], "São Paulo");
    }

    #[test]
    fn test_overlapping_lookups_last_request_wins() {
        let store = MemoryStore::new();
        let mut page =
            mount(&store, &ManualClock::new(NOW)).with_ordering(ResponseOrdering::LastRequestWins);

        page.edit_postal_code("01310-100");
        let first = page.begin_lookup().unwrap();
        page.edit_postal_code("20040-020");
        let second = page.begin_lookup().unwrap();

        page.complete_lookup(&second, LookupOutcome::Found(centro()));
        let late = page.complete_lookup(&first, LookupOutcome::Found(paulista()));

        assert_eq!(late, Completion::Stale);
        assert_eq!(page.shipping().address(), Some(&centro()));
        assert_eq!(stored(&store)["address"]["city"], "Rio de Janeiro");
    }

    #[test]
    fn test_edit_during_lookup_drops_old_result() {
        let store = MemoryStore::new();
        let mut page =
            mount(&store, &ManualClock::new(NOW)).with_ordering(ResponseOrdering::LastRequestWins);

        page.edit_postal_code("01310-100");
        let ticket = page.begin_lookup().unwrap();
        page.edit_postal_code("20040-020");

        let completion = page.complete_lookup(&ticket, LookupOutcome::Found(paulista()));
        assert_eq!(completion, Completion::Stale);
        assert!(page.shipping().address().is_none());
        assert!(!page.shipping().is_loading());
        assert_eq!(stored(&store)["cep"], "20040-020");
        assert!(stored(&store)["address"].is_null());
    }

    #[test]
    fn test_purchase_and_cart() {
        let store = MemoryStore::new();
        let mut page = mount(&store, &ManualClock::new(NOW));
        assert!(!page.can_purchase());
        assert_eq!(page.cart_count(), 1);

        page.select_size("39");
        assert!(!page.can_purchase());
        page.select_color("Vermelho");
        assert!(page.can_purchase());

        page.increment_quantity();
        assert_eq!(page.cart_count(), 2);
    }

    #[test]
    fn test_gallery_overlay_is_not_persisted() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(NOW);
        let mut page = mount(&store, &clock);

        page.next_image();
        page.open_gallery();
        assert!(page.is_gallery_open());
        assert_eq!(page.current_image(), Some(page.product().images[1].as_str()));
        assert!(page.render().contains("gallery-overlay"));

        let restored = mount(&store, &clock);
        assert!(!restored.is_gallery_open());
        assert_eq!(restored.selection().image_index(), 1);

        page.close_gallery();
        assert!(!page.is_gallery_open());
    }

    #[test]
    fn test_reset_clears_snapshot() {
        let store = MemoryStore::new();
        let mut page = mount(&store, &ManualClock::new(NOW));
        page.select_size("42");
        page.reset();

        assert_eq!(page.selection().size(), None);
        assert!(!store.exists(KEY).unwrap());
    }

    #[test]
    fn test_mount_with_options() {
        let store = MemoryStore::new();
        let options = PageOptions {
            storage_key: "pdp".to_string(),
            ttl_minutes: 1,
            ordering: ResponseOrdering::LastRequestWins,
            ..PageOptions::default()
        };
        let clock = ManualClock::new(NOW);
        let mut page = ProductPage::mount_with_options(
            sample_product(),
            &store,
            clock.clone(),
            &options,
            StructuredLogger::disabled(),
        );
        page.select_size("43");

        assert_eq!(page.ordering(), ResponseOrdering::LastRequestWins);
        assert!(store.exists("pdp").unwrap());

        clock.advance(Duration::from_secs(61));
        let page = ProductPage::mount_with_options(
            sample_product(),
            &store,
            clock,
            &options,
            StructuredLogger::disabled(),
        );
        assert_eq!(page.selection().size(), None);
    }
}

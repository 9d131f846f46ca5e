//! Generic Resource Store
//!
//! One store per backend resource, each holding the current page of
//! entities plus pagination, a loading flag and the last error. Every
//! action follows the same contract:
//!
//! - entry: `loading = true`, `error = None`
//! - success: collection/pagination updated, `loading = false`
//! - failure: `error` set to the backend message (or the resource's
//!   fallback text), `loading = false`, error returned to the caller
//!
//! Mutations never patch the local collection. After a successful create,
//! update or delete the store re-fetches the current page exactly once and
//! only then clears `loading`.

use quejas_core::{query_pairs, EnvelopeShape, PageEnvelope, Pagination};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

/// Localized fallback messages shown when the backend gives none
#[derive(Debug, Clone, Copy)]
pub struct StoreMessages {
    pub fetch: &'static str,
    pub fetch_one: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

/// Describes one backend resource
pub trait Resource: Send + Sync + 'static {
    /// Entity returned by the backend
    type Entity: DeserializeOwned + Serialize + Clone + Send + Sync + 'static;
    /// Create request body
    type Create: Serialize + Send + Sync;
    /// Partial update request body
    type Update: Serialize + Send + Sync;
    /// List filters, sent as query parameters
    type Filters: Serialize + Clone + Default + Send + Sync;
    /// Resource-specific state kept next to the collection
    type Extra: Clone + Default + Send + Sync;

    /// Name used in logs
    const NAME: &'static str;
    /// Collection path, e.g. `/complaints`
    const PATH: &'static str;
    /// Envelope returned by the list endpoint
    const ENVELOPE: EnvelopeShape = EnvelopeShape::Flat;
    /// Fallback messages
    const MESSAGES: StoreMessages;

    /// Path for creating an entity
    fn create_path() -> String {
        Self::PATH.to_string()
    }

    /// Path of a single entity
    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// Snapshot of a store
#[derive(Debug, Clone)]
pub struct StoreState<T, X> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<T>,
    pub extra: X,
}

impl<T, X: Default> Default for StoreState<T, X> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            loading: false,
            error: None,
            selected: None,
            extra: X::default(),
        }
    }
}

/// Message recorded in store state for a failed action
///
/// HTTP failures and local validation carry a message meant for users;
/// transport and decoding failures do not, so the fallback is shown.
pub fn display_message(err: &ClientError, fallback: &str) -> String {
    match err {
        ClientError::Validation { .. } => err.message(),
        _ if err.status().is_some() && !err.message().is_empty() => err.message(),
        _ => fallback.to_string(),
    }
}

/// Accept an entity either bare or wrapped in `{data: ...}`
pub(crate) fn unwrap_entity<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    if let Some(inner) = value.get("data") {
        if let Ok(entity) = serde_json::from_value::<T>(inner.clone()) {
            return Some(entity);
        }
    }
    serde_json::from_value(value).ok()
}

/// Store for one resource
pub struct ResourceStore<R: Resource> {
    client: Arc<ApiClient>,
    state: RwLock<StoreState<R::Entity, R::Extra>>,
    filters: RwLock<R::Filters>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: RwLock::new(StoreState::default()),
            filters: RwLock::new(R::Filters::default()),
            _resource: PhantomData,
        }
    }

    /// The API client this store talks through
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState<R::Entity, R::Extra>> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState<R::Entity, R::Extra>> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of the current state
    pub fn state(&self) -> StoreState<R::Entity, R::Extra> {
        self.read().clone()
    }

    pub fn items(&self) -> Vec<R::Entity> {
        self.read().items.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.read().pagination
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn selected(&self) -> Option<R::Entity> {
        self.read().selected.clone()
    }

    pub fn extra(&self) -> R::Extra {
        self.read().extra.clone()
    }

    /// Filters of the page currently shown
    pub fn current_filters(&self) -> R::Filters {
        self.filters.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Back to the initial empty state
    pub fn reset(&self) {
        *self.write() = StoreState::default();
        *self.filters.write().unwrap_or_else(|e| e.into_inner()) = R::Filters::default();
    }

    /// Mutate resource-specific state
    pub(crate) fn update_extra<F: FnOnce(&mut R::Extra)>(&self, f: F) {
        f(&mut self.write().extra);
    }

    /// Overwrite pagination from a non-list fetch
    pub(crate) fn set_pagination(&self, pagination: Pagination) {
        self.write().pagination = pagination;
    }

    fn begin(&self) {
        let mut state = self.write();
        state.loading = true;
        state.error = None;
    }

    fn settle<T>(&self, result: ClientResult<T>, fallback: &str) -> ClientResult<T> {
        let mut state = self.write();
        state.loading = false;
        if let Err(e) = &result {
            let message = display_message(e, fallback);
            warn!(resource = R::NAME, error = %e, "Store action failed");
            state.error = Some(message);
        }
        result
    }

    /// Run an action under the loading/error contract
    pub(crate) async fn run<T, F, Fut>(&self, fallback: &str, action: F) -> ClientResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        self.begin();
        let result = action().await;
        self.settle(result, fallback)
    }

    /// GET the list endpoint and replace the collection
    async fn load_page(&self, filters: &R::Filters) -> ClientResult<()> {
        let query = query_pairs(filters);
        let body = self.client.get::<Value>(R::PATH, &query).await?;

        let page = PageEnvelope::<R::Entity>::decode(R::ENVELOPE, body)
            .map_err(|e| ClientError::decode(format!("{} list: {}", R::NAME, e)))?;
        let (items, pagination) = page.into_parts();

        info!(
            resource = R::NAME,
            count = items.len(),
            page = pagination.page,
            total = pagination.total,
            "Fetched page"
        );

        let mut state = self.write();
        state.items = items;
        state.pagination = pagination;
        Ok(())
    }

    /// Fetch a page; on success the filters become the current page
    pub async fn fetch(&self, filters: R::Filters) -> ClientResult<()> {
        self.run(R::MESSAGES.fetch, || async {
            self.load_page(&filters).await?;
            *self.filters.write().unwrap_or_else(|e| e.into_inner()) = filters.clone();
            Ok(())
        })
        .await
    }

    /// Re-fetch the current page
    pub async fn refresh(&self) -> ClientResult<()> {
        let filters = self.current_filters();
        self.fetch(filters).await
    }

    /// Re-fetch the current page inside an already running action
    async fn reload_current(&self) -> ClientResult<()> {
        let filters = self.current_filters();
        debug!(resource = R::NAME, "Re-fetching current page after mutation");
        self.load_page(&filters).await
    }

    /// Fetch one entity and make it the selected one
    pub async fn get_by_id(&self, id: &str) -> ClientResult<R::Entity> {
        self.run(R::MESSAGES.fetch_one, || async {
            let body = self.client.get::<Value>(&R::item_path(id), &[]).await?;
            let entity: R::Entity = unwrap_entity(body)
                .ok_or_else(|| ClientError::decode(format!("{} {}: unexpected body", R::NAME, id)))?;
            self.write().selected = Some(entity.clone());
            Ok(entity)
        })
        .await
    }

    /// Create an entity, then re-fetch the current page
    ///
    /// Returns the created entity when the backend echoes one back.
    pub async fn create(&self, dto: &R::Create) -> ClientResult<Option<R::Entity>> {
        self.run(R::MESSAGES.create, || async {
            let body = self.client.post::<_, Value>(&R::create_path(), dto).await?;
            info!(resource = R::NAME, "Created");
            self.reload_current().await?;
            Ok(unwrap_entity(body))
        })
        .await
    }

    /// Update an entity, then re-fetch the current page
    pub async fn update(&self, id: &str, dto: &R::Update) -> ClientResult<Option<R::Entity>> {
        self.run(R::MESSAGES.update, || async {
            let body = self.client.patch::<_, Value>(&R::item_path(id), dto).await?;
            info!(resource = R::NAME, id = id, "Updated");
            self.reload_current().await?;
            Ok(unwrap_entity(body))
        })
        .await
    }

    /// Delete an entity, then re-fetch the current page
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.run(R::MESSAGES.delete, || async {
            self.client.delete(&R::item_path(id)).await?;
            info!(resource = R::NAME, id = id, "Deleted");
            self.write().selected = None;
            self.reload_current().await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::token::MemoryTokenStore;
    use crate::transport::{Method, MockTransport};
    use quejas_core::{EntityRef, PageRequest};
    use serde_json::json;

    struct Tags;

    impl Resource for Tags {
        type Entity = EntityRef;
        type Create = Value;
        type Update = Value;
        type Filters = PageRequest;
        type Extra = ();

        const NAME: &'static str = "tags";
        const PATH: &'static str = "/tags";
        const MESSAGES: StoreMessages = StoreMessages {
            fetch: "Error al cargar etiquetas",
            fetch_one: "Error al cargar la etiqueta",
            create: "Error al crear la etiqueta",
            update: "Error al actualizar la etiqueta",
            delete: "Error al eliminar la etiqueta",
        };
    }

    fn store() -> (ResourceStore<Tags>, Arc<MockTransport>) {
        let mock = MockTransport::shared();
        let config = ClientConfig::default().with_api_url("http://mock.local");
        let client = ApiClient::new(&config, mock.clone(), Arc::new(MemoryTokenStore::new()));
        (ResourceStore::new(Arc::new(client)), mock)
    }

    fn page(items: Value, total: u64) -> Value {
        json!({"data": items, "page": 1, "limit": 10, "total": total, "totalPages": 1})
    }

    #[tokio::test]
    async fn test_fetch_success_updates_state() {
        let (store, mock) = store();
        mock.on(Method::GET, "/tags", 200, page(json!([{"id": 1, "name": "a"}]), 1));

        store.fetch(PageRequest::default()).await.unwrap();

        let state = store.state();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.pagination.total, 1);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_uses_fallback_message() {
        let (store, mock) = store();
        mock.fail_once(Method::GET, "/tags", "connection reset");

        assert!(store.fetch(PageRequest::default()).await.is_err());
        assert_eq!(store.error().as_deref(), Some("Error al cargar etiquetas"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_error_cleared_on_next_action() {
        let (store, mock) = store();
        mock.once(Method::GET, "/tags", 500, json!({"message": "db down"}));
        mock.on(Method::GET, "/tags", 200, page(json!([]), 0));

        assert!(store.fetch(PageRequest::default()).await.is_err());
        assert_eq!(store.error().as_deref(), Some("db down"));

        store.refresh().await.unwrap();
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_unwraps_data() {
        let (store, mock) = store();
        mock.on(Method::GET, "/tags/5", 200, json!({"data": {"id": 5, "name": "five"}}));

        let tag = store.get_by_id("5").await.unwrap();
        assert_eq!(tag.name, "five");
        assert_eq!(store.selected().unwrap().id, "5");
    }

    #[tokio::test]
    async fn test_failed_refetch_fails_mutation() {
        let (store, mock) = store();
        mock.on(Method::POST, "/tags", 201, json!({"id": 2, "name": "b"}));
        mock.once(Method::GET, "/tags", 500, json!({"message": "list unavailable"}));

        let err = store.create(&json!({"name": "b"})).await.unwrap_err();
        assert_eq!(err.message(), "list unavailable");
        assert_eq!(store.error().as_deref(), Some("list unavailable"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_current_page() {
        let (store, mock) = store();
        mock.on(Method::GET, "/tags", 200, page(json!([{"id": 1, "name": "a"}]), 1));
        mock.on(Method::POST, "/tags", 201, json!({"id": 2, "name": "b"}));
        store.fetch(PageRequest { page: 1, limit: 10 }).await.unwrap();

        mock.once(Method::GET, "/tags", 500, json!({"message": "boom"}));
        assert!(store.fetch(PageRequest { page: 5, limit: 10 }).await.is_err());
        assert_eq!(store.current_filters().page, 1);
        assert_eq!(store.pagination().page, 1);
        assert_eq!(store.items().len(), 1);

        mock.clear_requests();
        store.create(&json!({"name": "b"})).await.unwrap();
        let refetch = mock.last_request().unwrap();
        assert_eq!(refetch.method, Method::GET);
        assert_eq!(refetch.query_param("page").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_reset_restores_initial_state() {
        let (store, mock) = store();
        mock.on(Method::GET, "/tags", 200, page(json!([{"id": 1, "name": "a"}]), 1));
        store
            .fetch(PageRequest { page: 3, limit: 5 })
            .await
            .unwrap();

        store.reset();
        assert!(store.items().is_empty());
        assert_eq!(store.current_filters(), PageRequest::default());
        assert_eq!(store.pagination(), Pagination::default());
    }

    #[test]
    fn test_display_message() {
        let fallback = "fallback";
        assert_eq!(display_message(&ClientError::from_status(403, "no access"), fallback), "no access");
        assert_eq!(display_message(&ClientError::validation("too big"), fallback), "too big");
        assert_eq!(display_message(&ClientError::transport("reset"), fallback), fallback);
        assert_eq!(display_message(&ClientError::decode("bad json"), fallback), fallback);
    }

    #[test]
    fn test_unwrap_entity() {
        let bare: Option<EntityRef> = unwrap_entity(json!({"id": 1, "name": "x"}));
        assert!(bare.is_some());
        let wrapped: Option<EntityRef> = unwrap_entity(json!({"data": {"id": 1, "name": "x"}}));
        assert!(wrapped.is_some());
        let id_only: Option<EntityRef> = unwrap_entity(json!({"success": true}));
        assert!(id_only.is_none());
        assert!(unwrap_entity::<EntityRef>(Value::Null).is_none());
    }
}

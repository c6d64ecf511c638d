//! Menu cache
//!
//! Owns the canonical list of sellable items. The list is a snapshot that
//! is only ever replaced whole: a refresh drops items the backend no
//! longer lists, and readers holding the previous `Arc` keep a consistent
//! view.

use std::sync::Arc;

use serde::Deserialize;
use shared::{CategoryFilter, MenuItem, RemoteMenuItem};

use crate::error::ClientResult;
use crate::http::{Endpoint, HttpClient};
use crate::store::{KeyValueStore, keys, set_json};

/// Cached snapshot record
///
/// Any stored category is ignored; it is derived again from the code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedMenuItem {
    id: i64,
    code: String,
    #[serde(alias = "fullname")]
    full_name: String,
    #[serde(default)]
    category_type: String,
}

impl From<CachedMenuItem> for MenuItem {
    fn from(cached: CachedMenuItem) -> Self {
        MenuItem::new(cached.id, cached.code, cached.full_name, cached.category_type)
    }
}

/// Read the last menu snapshot from storage
///
/// Absent, unreadable or corrupt snapshots yield an empty list.
pub fn load_cache<S: KeyValueStore + ?Sized>(store: &S) -> Vec<MenuItem> {
    let raw = match store.get(keys::MENU_ITEMS) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Menu cache unreadable, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<CachedMenuItem>>(&raw) {
        Ok(records) => records.into_iter().map(MenuItem::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Menu cache corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Fetch the full catalog from the backend
pub async fn fetch_menu<H: HttpClient + ?Sized>(
    http: &H,
    endpoint: &Endpoint,
) -> ClientResult<Vec<MenuItem>> {
    let records: Vec<RemoteMenuItem> = http.get(&endpoint.menu_url()).await?;
    Ok(records.into_iter().map(MenuItem::from).collect())
}

/// Category + text filter over a menu snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    pub category: CategoryFilter,
    pub search: String,
}

impl MenuFilter {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    /// Category matches and the name contains the search text (case-insensitive)
    pub fn matches(&self, item: &MenuItem) -> bool {
        if !self.category.matches(item.category) {
            return false;
        }
        let needle = self.search.to_lowercase();
        needle.is_empty() || item.full_name.to_lowercase().contains(&needle)
    }

    /// Lazily filter a snapshot without touching it
    pub fn apply<'a>(&'a self, items: &'a [MenuItem]) -> impl Iterator<Item = &'a MenuItem> + 'a {
        items.iter().filter(move |item| self.matches(item))
    }
}

/// Items matching both the category and the search text
pub fn filter(items: &[MenuItem], category: CategoryFilter, search_text: &str) -> Vec<MenuItem> {
    MenuFilter::new(category, search_text)
        .apply(items)
        .cloned()
        .collect()
}

/// The menu snapshot plus its refresh policy
#[derive(Debug, Clone, Default)]
pub struct MenuCache {
    items: Arc<[MenuItem]>,
    auto_refresh_attempted: bool,
}

impl MenuCache {
    /// Start from the stored snapshot
    pub fn open<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let items = load_cache(store);
        tracing::debug!(count = items.len(), "Menu cache loaded");
        Self {
            items: items.into(),
            auto_refresh_attempted: false,
        }
    }

    /// Current snapshot
    pub fn items(&self) -> Arc<[MenuItem]> {
        Arc::clone(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by its business code
    pub fn find(&self, code: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.code == code)
    }

    /// Replace the snapshot with the backend's catalog
    ///
    /// On failure the current snapshot is kept and the error is returned
    /// for display.
    pub async fn refresh<H, S>(
        &mut self,
        http: &H,
        store: &mut S,
        endpoint: &Endpoint,
    ) -> ClientResult<Arc<[MenuItem]>>
    where
        H: HttpClient + ?Sized,
        S: KeyValueStore + ?Sized,
    {
        let items = match fetch_menu(http, endpoint).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, cached = self.items.len(), "Menu refresh failed, keeping cache");
                return Err(e);
            }
        };

        if let Err(e) = set_json(store, keys::MENU_ITEMS, &items) {
            // the fresh list is still better than the stale one
            tracing::warn!(error = %e, "Failed to persist menu snapshot");
        }

        tracing::info!(previous = self.items.len(), current = items.len(), "Menu refreshed");
        self.items = items.into();
        Ok(self.items())
    }

    /// First-access policy: refresh automatically only when the cache is empty
    ///
    /// Returns `Ok(true)` when a refresh ran. Attempted at most once per
    /// session; later refreshes are explicit.
    pub async fn ensure_loaded<H, S>(
        &mut self,
        http: &H,
        store: &mut S,
        endpoint: &Endpoint,
    ) -> ClientResult<bool>
    where
        H: HttpClient + ?Sized,
        S: KeyValueStore + ?Sized,
    {
        if !self.items.is_empty() || self.auto_refresh_attempted {
            return Ok(false);
        }
        self.auto_refresh_attempted = true;
        self.refresh(http, store, endpoint).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::testing::{MockHttp, MockReply, menu_item, remote_records};
    use serde_json::json;
    use shared::Category;

    fn endpoint() -> Endpoint {
        Endpoint::parse("pos.local").unwrap()
    }

    fn sample_menu() -> Vec<MenuItem> {
        vec![
            menu_item("1001", "Nasi Goreng"),
            menu_item("1002", "Mie Goreng"),
            menu_item("2001", "Es Teh Manis"),
            menu_item("2002", "Kopi Susu"),
            menu_item("3001", "Kerupuk"),
        ]
    }

    #[test]
    fn test_load_cache_missing_or_corrupt_is_empty() {
        let mut store = MemoryStore::new();
        assert!(load_cache(&store).is_empty());

        store.set(keys::MENU_ITEMS, "{not json".into()).unwrap();
        assert!(load_cache(&store).is_empty());

        store.set(keys::MENU_ITEMS, "{\"id\": 1}".into()).unwrap();
        assert!(load_cache(&store).is_empty());
    }

    #[test]
    fn test_load_cache_rederives_category() {
        let mut store = MemoryStore::new();
        let raw = json!([
            {"id": 1, "code": "2001", "fullname": "Es Teh", "category": "Food", "categoryType": "glass"},
            {"id": 2, "code": "1001", "fullName": "Sate", "category": "Whatever"}
        ]);
        store.set(keys::MENU_ITEMS, raw.to_string()).unwrap();

        let items = load_cache(&store);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, Category::Beverage);
        assert_eq!(items[0].category_type, "glass");
        assert_eq!(items[1].category, Category::Food);
        assert_eq!(items[1].category_type, "");
    }

    #[test]
    fn test_filter_by_category_and_text() {
        let items = sample_menu();

        assert_eq!(filter(&items, CategoryFilter::All, "").len(), 5);
        assert_eq!(
            filter(&items, CategoryFilter::Only(Category::Food), "").len(),
            2
        );

        let hits = filter(&items, CategoryFilter::All, "GORENG");
        assert_eq!(hits.len(), 2);

        let hits = filter(&items, CategoryFilter::Only(Category::Beverage), "goreng");
        assert!(hits.is_empty());

        let hits = filter(&items, CategoryFilter::Only(Category::Beverage), "susu");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "2002");

        let hits = filter(&items, CategoryFilter::Only(Category::Others), "");
        assert_eq!(hits[0].code, "3001");

        // source untouched
        assert_eq!(items.len(), 5);
    }

    #[test]
    fn test_menu_filter_is_lazy_view() {
        let items = sample_menu();
        let menu_filter = MenuFilter::new(CategoryFilter::All, "kopi");
        let mut view = menu_filter.apply(&items);
        assert_eq!(view.next().map(|i| i.code.as_str()), Some("2002"));
        assert!(view.next().is_none());
    }

    #[tokio::test]
    async fn test_refresh_replaces_whole_snapshot() {
        let ten: Vec<(i64, String, String)> = (0..10)
            .map(|i| (i, format!("1{:03}", i), format!("Item {}", i)))
            .collect();
        let ten_refs: Vec<(i64, &str, &str)> = ten
            .iter()
            .map(|(id, c, n)| (*id, c.as_str(), n.as_str()))
            .collect();
        let http = MockHttp::new().with_menu(remote_records(&ten_refs));
        let mut store = MemoryStore::new();
        let mut cache = MenuCache::open(&store);

        cache.refresh(&http, &mut store, &endpoint()).await.unwrap();
        assert_eq!(cache.len(), 10);

        // three items removed upstream, ids reassigned
        let seven: Vec<(i64, &str, &str)> = ten_refs[3..]
            .iter()
            .map(|(id, c, n)| (id + 100, *c, *n))
            .collect();
        http.set_menu(MockReply::Json(remote_records(&seven)));

        let items = cache.refresh(&http, &mut store, &endpoint()).await.unwrap();
        assert_eq!(items.len(), 7);
        for gone in ["1000", "1001", "1002"] {
            assert!(cache.find(gone).is_none());
        }
        assert_eq!(cache.find("1003").map(|i| i.id), Some(103));

        // persisted snapshot matches
        let reopened = MenuCache::open(&store);
        assert_eq!(reopened.len(), 7);
        assert!(reopened.find("1000").is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_cache() {
        let http = MockHttp::new().with_menu(remote_records(&[
            (1, "1001", "Nasi Goreng"),
            (2, "2001", "Es Teh"),
        ]));
        let mut store = MemoryStore::new();
        let mut cache = MenuCache::open(&store);
        cache.refresh(&http, &mut store, &endpoint()).await.unwrap();
        let before = cache.items();

        http.set_menu(MockReply::Status(500, "db down".into()));
        let err = cache.refresh(&http, &mut store, &endpoint()).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(cache.items(), before);
        assert_eq!(MenuCache::open(&store).len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_rejects_malformed_catalog() {
        let http = MockHttp::new().with_menu(json!({"items": []}));
        let mut store = MemoryStore::new();
        let mut cache = MenuCache::open(&store);

        let err = cache.refresh(&http, &mut store, &endpoint()).await.unwrap_err();
        assert_eq!(err.code(), shared::ErrorCode::InvalidResponse);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_loaded_only_when_empty() {
        let http = MockHttp::new().with_menu(remote_records(&[(1, "1001", "Nasi Goreng")]));
        let mut store = MemoryStore::new();

        let mut cache = MenuCache::open(&store);
        assert!(cache.ensure_loaded(&http, &mut store, &endpoint()).await.unwrap());
        assert_eq!(cache.len(), 1);
        assert_eq!(http.calls().len(), 1);

        // non-empty cache shown as-is on next session
        let mut cache = MenuCache::open(&store);
        assert!(!cache.ensure_loaded(&http, &mut store, &endpoint()).await.unwrap());
        assert_eq!(http.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_loaded_attempts_once() {
        let http = MockHttp::new();
        http.set_menu(MockReply::Status(503, "busy".into()));
        let mut store = MemoryStore::new();
        let mut cache = MenuCache::open(&store);

        assert!(cache.ensure_loaded(&http, &mut store, &endpoint()).await.is_err());
        assert!(!cache.ensure_loaded(&http, &mut store, &endpoint()).await.unwrap());
        assert_eq!(http.calls().len(), 1);
    }
}

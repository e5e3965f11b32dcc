//! In-memory event storage.
//!
//! [`EventRegistry`] keeps every event in a `BTreeMap` keyed by id behind a
//! [`tokio::sync::RwLock`]. Ids come from an atomic counter, so allocation
//! never waits on the map lock. Used when PostgreSQL persistence is
//! disabled and throughout the test suite.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Event, EventId, NewEvent, Page, PageRequest};
use crate::error::ApiError;
use crate::persistence::EventRepository;

/// Process-local [`EventRepository`].
///
/// # Concurrency
///
/// - Lookups and listings take the read lock and may run concurrently.
/// - Inserts take the write lock only to store the finished event.
#[derive(Debug)]
pub struct EventRegistry {
    events: RwLock<BTreeMap<EventId, Event>>,
    next_id: AtomicI64,
}

impl EventRegistry {
    /// Creates an empty registry whose first id is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns the number of stored events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns `true` if no event has been stored.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventRepository for EventRegistry {
    async fn insert(&self, event: NewEvent) -> Result<Event, ApiError> {
        let id = EventId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let event = event.with_id(id);
        let mut map = self.events.write().await;
        if map.contains_key(&id) {
            return Err(ApiError::Internal(format!("event {id} already exists")));
        }
        map.insert(id, event.clone());
        Ok(event)
    }

    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, ApiError> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Event>, ApiError> {
        let map = self.events.read().await;
        let mut sorted: Vec<&Event> = map.values().collect();
        sorted.sort_by(|a, b| request.sort.compare(a, b));

        let total_elements = sorted.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = sorted
            .into_iter()
            .skip(skip)
            .take(request.size as usize)
            .cloned()
            .collect();

        Ok(Page {
            content,
            request: *request,
            total_elements,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::event::tests::spring_submission;
    use crate::domain::{EventSubmission, Sort};

    fn named(name: &str) -> NewEvent {
        NewEvent::from_submission(EventSubmission {
            name: name.to_string(),
            ..spring_submission()
        })
    }

    async fn seeded(names: &[&str]) -> EventRegistry {
        let registry = EventRegistry::new();
        for name in names {
            let Ok(_) = registry.insert(named(name)).await else {
                panic!("insert failed");
            };
        }
        registry
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let registry = EventRegistry::new();
        let Ok(first) = registry.insert(named("a")).await else {
            panic!("insert failed");
        };
        let Ok(second) = registry.insert(named("b")).await else {
            panic!("insert failed");
        };

        assert_eq!(first.id, EventId::new(1));
        assert_eq!(second.id, EventId::new(2));
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn find_by_id_returns_stored_event() {
        let registry = EventRegistry::new();
        let Ok(stored) = registry.insert(named("spring")).await else {
            panic!("insert failed");
        };

        let Ok(Some(found)) = registry.find_by_id(stored.id).await else {
            panic!("event not found");
        };
        assert_eq!(found, stored);

        let Ok(missing) = registry.find_by_id(EventId::new(99)).await else {
            panic!("lookup failed");
        };
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        let registry = Arc::new(EventRegistry::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry.insert(named(&format!("event{i}"))).await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            let Ok(Ok(event)) = handle.await else {
                panic!("insert task failed");
            };
            ids.push(event.id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn default_page_is_ordered_by_id() {
        let registry = seeded(&["c", "a", "b"]).await;
        let Ok(page) = registry.find_page(&PageRequest::default()).await else {
            panic!("listing failed");
        };

        let names: Vec<&str> = page.content.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages(), 1);
    }

    #[tokio::test]
    async fn sorts_and_slices_requested_page() {
        let registry = seeded(&["a", "b", "c", "d", "e"]).await;
        let Ok(sort) = "name,desc".parse::<Sort>() else {
            panic!("valid sort");
        };

        let Ok(page) = registry.find_page(&PageRequest::new(1, 2, sort)).await else {
            panic!("listing failed");
        };

        let names: Vec<&str> = page.content.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);
        assert_eq!(page.total_pages(), 3);
    }

    #[tokio::test]
    async fn equal_keys_fall_back_to_id() {
        let registry = seeded(&["same", "same", "same"]).await;
        let Ok(sort) = "name,desc".parse::<Sort>() else {
            panic!("valid sort");
        };

        let Ok(page) = registry.find_page(&PageRequest::new(0, 10, sort)).await else {
            panic!("listing failed");
        };

        let ids: Vec<i64> = page.content.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let registry = seeded(&["a"]).await;
        let Ok(page) = registry
            .find_page(&PageRequest::new(5, 10, Sort::default()))
            .await
        else {
            panic!("listing failed");
        };

        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 1);
    }
}

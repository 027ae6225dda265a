//! In-memory backend fake shared by the unit tests of this crate.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use propfinder_core::{BookmarkReference, PropertyId, PropertyRecord, RemoteError, UserId};

use crate::api::{BookmarkApi, PropertyApi};

#[derive(Default)]
pub(crate) struct FakeBackend {
    bookmarks: Mutex<Vec<BookmarkReference>>,
    properties: HashMap<PropertyId, PropertyRecord>,
    failing: HashSet<PropertyId>,
    pub(crate) offline: AtomicBool,
    in_flight: AtomicUsize,
    pub(crate) max_in_flight: AtomicUsize,
    pub(crate) hydrations: AtomicUsize,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_property(mut self, id: i64, title: &str) -> Self {
        let id = PropertyId::new(id);
        self.properties.insert(id, PropertyRecord::new(id, title));
        self
    }

    pub(crate) fn with_bookmark(self, user: i64, property: i64) -> Self {
        self.bookmarks
            .lock()
            .unwrap()
            .push(BookmarkReference::new(UserId::new(user), PropertyId::new(property)));
        self
    }

    pub(crate) fn failing_on(mut self, property: i64) -> Self {
        self.failing.insert(PropertyId::new(property));
        self
    }

    pub(crate) fn bookmarked(&self, user: i64) -> Vec<PropertyId> {
        self.bookmarks
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == UserId::new(user))
            .map(|b| b.property_id)
            .collect()
    }

    fn check_online(&self) -> Result<(), RemoteError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(RemoteError::network("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl BookmarkApi for FakeBackend {
    async fn list_bookmarks(&self, user_id: UserId) -> Result<Vec<BookmarkReference>, RemoteError> {
        self.check_online()?;
        let bookmarks = self.bookmarks.lock().unwrap();
        Ok(bookmarks.iter().filter(|b| b.user_id == user_id).cloned().collect())
    }

    async fn add_bookmark(&self, user_id: UserId, property_id: PropertyId) -> Result<(), RemoteError> {
        self.check_online()?;
        self.bookmarks
            .lock()
            .unwrap()
            .push(BookmarkReference::new(user_id, property_id));
        Ok(())
    }

    async fn remove_bookmark(&self, user_id: UserId, property_id: PropertyId) -> Result<(), RemoteError> {
        self.check_online()?;
        self.bookmarks
            .lock()
            .unwrap()
            .retain(|b| !(b.user_id == user_id && b.property_id == property_id));
        Ok(())
    }

    async fn is_bookmarked(&self, user_id: UserId, property_id: PropertyId) -> Result<bool, RemoteError> {
        self.check_online()?;
        let bookmarks = self.bookmarks.lock().unwrap();
        Ok(bookmarks
            .iter()
            .any(|b| b.user_id == user_id && b.property_id == property_id))
    }
}

#[async_trait::async_trait]
impl PropertyApi for FakeBackend {
    async fn get_property(&self, property_id: PropertyId) -> Result<PropertyRecord, RemoteError> {
        self.check_online()?;
        self.hydrations.fetch_add(1, Ordering::SeqCst);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Later ids finish sooner so completion order differs from request order.
        let rounds = 16usize.saturating_sub(property_id.get().rem_euclid(16) as usize);
        for _ in 0..rounds {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&property_id) {
            return Err(RemoteError::from_status(500, "boom"));
        }
        self.properties
            .get(&property_id)
            .cloned()
            .ok_or(RemoteError::NotFound)
    }
}

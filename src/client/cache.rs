//! Read cache shared by every [`ServiceClient`](super::ServiceClient).
//!
//! Each cached read lives in its own slot guarded by an async mutex, so
//! concurrent reads of the same key wait for a single fetch and then observe
//! its result. Slots register under a [`Topic`] when created; invalidating a
//! topic drops all of its slots and the next read refetches. Failed fetches
//! leave the slot empty.

use tokio::sync::Mutex as AsyncMutex;

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::common::ServiceError;
use crate::models::{
    ContactSubmission, ContentBlock, GalleryItem, Notice, Principal, StaffMember, UserProfile,
    UserRole,
};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum QueryKey {
    ContentBlock(String),
    AllContentBlocks,
    StaffList,
    StaffMember(i64),
    Notices,
    Notice(i64),
    GalleryItems,
    GalleryItem(i64),
    ContactSubmissions(Principal),
    CallerProfile(Principal),
    UserProfile { caller: Principal, user: Principal },
    CallerRole(Principal),
    IsAdmin(Principal),
}

/// Entity families a mutation can invalidate.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Topic {
    ContentBlocks,
    Staff,
    Notices,
    Gallery,
    ContactSubmissions,
    Profiles,
    Roles,
}

#[derive(Debug, Clone)]
pub enum QueryData {
    ContentBlock(Option<ContentBlock>),
    ContentBlocks(Vec<(String, ContentBlock)>),
    StaffList(Vec<StaffMember>),
    StaffMember(Option<StaffMember>),
    Notices(Vec<Notice>),
    Notice(Option<Notice>),
    GalleryItems(Vec<GalleryItem>),
    GalleryItem(Option<GalleryItem>),
    ContactSubmissions(Vec<ContactSubmission>),
    Profile(Option<UserProfile>),
    Role(UserRole),
    Flag(bool),
}

/// Values that can be stored in a [`QueryCache`] slot.
pub trait Cached: Clone + Sized {
    fn into_data(self) -> QueryData;
    fn from_data(data: &QueryData) -> Option<Self>;
}

macro_rules! impl_cached {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Cached for $ty {
                fn into_data(self) -> QueryData {
                    QueryData::$variant(self)
                }

                fn from_data(data: &QueryData) -> Option<Self> {
                    match data {
                        QueryData::$variant(value) => Some(value.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_cached! {
    Option<ContentBlock> => ContentBlock,
    Vec<(String, ContentBlock)> => ContentBlocks,
    Vec<StaffMember> => StaffList,
    Option<StaffMember> => StaffMember,
    Vec<Notice> => Notices,
    Option<Notice> => Notice,
    Vec<GalleryItem> => GalleryItems,
    Option<GalleryItem> => GalleryItem,
    Vec<ContactSubmission> => ContactSubmissions,
    Option<UserProfile> => Profile,
    UserRole => Role,
    bool => Flag,
}

type Slot = Arc<AsyncMutex<Option<QueryData>>>;

#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Slot>>,
    subscriptions: Mutex<HashMap<Topic, HashSet<QueryKey>>>,
}

impl QueryKey {
    pub fn topic(&self) -> Topic {
        match self {
            Self::ContentBlock(_) | Self::AllContentBlocks => Topic::ContentBlocks,
            Self::StaffList | Self::StaffMember(_) => Topic::Staff,
            Self::Notices | Self::Notice(_) => Topic::Notices,
            Self::GalleryItems | Self::GalleryItem(_) => Topic::Gallery,
            Self::ContactSubmissions(_) => Topic::ContactSubmissions,
            Self::CallerProfile(_) | Self::UserProfile { .. } => Topic::Profiles,
            Self::CallerRole(_) | Self::IsAdmin(_) => Topic::Roles,
        }
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, or runs `fetcher` and stores its
    /// result.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ServiceError>
    where
        T: Cached,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let slot = self.slot(&key);
        let mut stored = slot.lock().await;

        if let Some(value) = stored.as_ref().and_then(T::from_data) {
            return Ok(value);
        }

        let value = fetcher().await?;
        *stored = Some(value.clone().into_data());
        Ok(value)
    }

    /// Drops every cached read registered under `topics`.
    pub fn invalidate(&self, topics: &[Topic]) {
        let mut stale = Vec::new();
        {
            let mut subscriptions = self.subscriptions.lock().unwrap_or_else(|p| p.into_inner());
            for topic in topics {
                if let Some(keys) = subscriptions.remove(topic) {
                    stale.extend(keys);
                }
            }
        }

        if stale.is_empty() {
            return;
        }

        log::debug!("Invalidating {} cached reads for {:?}", stale.len(), topics);
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        for key in &stale {
            entries.remove(key);
        }
    }

    /// Drops specific keys without touching the rest of their topic.
    pub fn forget(&self, keys: &[QueryKey]) {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        for key in keys {
            entries.remove(key);
        }
    }

    /// Keys currently registered under `topic`.
    pub fn dependents(&self, topic: Topic) -> Vec<QueryKey> {
        let subscriptions = self.subscriptions.lock().unwrap_or_else(|p| p.into_inner());
        subscriptions
            .get(&topic)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether a completed fetch is stored for `key`.
    pub fn is_cached(&self, key: &QueryKey) -> bool {
        let entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        entries
            .get(key)
            .and_then(|slot| slot.try_lock().ok().map(|stored| stored.is_some()))
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).clear();
        self.subscriptions.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }

    fn slot(&self, key: &QueryKey) -> Slot {
        let slot = {
            let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            entries.entry(key.clone()).or_default().clone()
        };

        self.subscriptions
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .entry(key.topic())
            .or_default()
            .insert(key.clone());

        slot
    }
}

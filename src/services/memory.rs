//! In-process content service used when no database is configured, and by the
//! test suite.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::common::{IdentityError, ServiceError};
use crate::models::{
    ContactDraft, ContactSubmission, ContentBlock, EntityRef, GalleryDraft, GalleryItem,
    Notice, NoticeDraft, Principal, StaffDraft, StaffMember, UserAccount, UserProfile,
    UserRole, timestamp,
};
use crate::services::content::{
    ContentService, ServiceResult, require_caller, require_notice_date,
};
use crate::services::identity::IdentityStore;

#[derive(Debug, Default)]
struct Sequences {
    staff: i64,
    notices: i64,
    gallery: i64,
    contacts: i64,
}

#[derive(Debug, Default)]
struct MemoryState {
    content_blocks: BTreeMap<String, ContentBlock>,
    staff: BTreeMap<i64, StaffMember>,
    notices: BTreeMap<i64, Notice>,
    gallery: BTreeMap<i64, GalleryItem>,
    contacts: BTreeMap<i64, ContactSubmission>,
    roles: HashMap<Principal, UserRole>,
    profiles: HashMap<Principal, UserProfile>,
    accounts: HashMap<String, UserAccount>,
    sequences: Sequences,
}

pub struct MemoryBackend {
    state: RwLock<MemoryState>,
    admin_secret: Option<String>,
    calls: AtomicUsize,
    latency: Option<Duration>,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl MemoryState {
    fn role_of(&self, caller: Option<Principal>) -> UserRole {
        caller
            .and_then(|p| self.roles.get(&p).copied())
            .unwrap_or_default()
    }

    fn require_admin(&self, caller: Option<Principal>) -> ServiceResult<Principal> {
        let principal = require_caller(caller)?;
        if self.role_of(Some(principal)).is_admin() {
            Ok(principal)
        } else {
            Err(ServiceError::Unauthorized("admin role required".into()))
        }
    }

    fn require_user(&self, caller: Option<Principal>) -> ServiceResult<Principal> {
        let principal = require_caller(caller)?;
        match self.role_of(Some(principal)) {
            UserRole::Admin | UserRole::User => Ok(principal),
            UserRole::Guest => Err(ServiceError::Unauthorized("caller is not registered".into())),
        }
    }

    fn has_admin(&self) -> bool {
        self.roles.values().any(UserRole::is_admin)
    }
}

impl MemoryBackend {
    pub fn new(admin_secret: Option<String>) -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            admin_secret,
            calls: AtomicUsize::new(0),
            latency: None,
        }
    }

    /// Delays every content service call by `latency` after counting it.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of content service calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Sets a role directly, bypassing the admin check.
    pub async fn seed_role(&self, user: Principal, role: UserRole) {
        self.state.write().await.roles.insert(user, role);
    }

    async fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl ContentService for MemoryBackend {
    async fn get_content_block(&self, key: &str) -> ServiceResult<Option<ContentBlock>> {
        self.hit().await;
        Ok(self.state.read().await.content_blocks.get(key).cloned())
    }

    async fn get_all_content_blocks(&self) -> ServiceResult<Vec<(String, ContentBlock)>> {
        self.hit().await;
        let state = self.state.read().await;
        Ok(state
            .content_blocks
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn update_content_block(
        &self,
        caller: Option<Principal>,
        key: &str,
        block: ContentBlock,
    ) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        state.content_blocks.insert(key.to_string(), block);
        Ok(())
    }

    async fn delete_content_block(
        &self,
        caller: Option<Principal>,
        key: &str,
    ) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        state
            .content_blocks
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(EntityRef::ContentBlock(key.to_string())))
    }

    async fn list_staff_members(&self) -> ServiceResult<Vec<StaffMember>> {
        self.hit().await;
        Ok(self.state.read().await.staff.values().cloned().collect())
    }

    async fn get_staff_member(&self, id: i64) -> ServiceResult<Option<StaffMember>> {
        self.hit().await;
        Ok(self.state.read().await.staff.get(&id).cloned())
    }

    async fn add_staff_member(
        &self,
        caller: Option<Principal>,
        draft: &StaffDraft,
    ) -> ServiceResult<i64> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        let id = next_id(&mut state.sequences.staff);
        state.staff.insert(id, StaffMember::from_draft(id, draft));
        Ok(id)
    }

    async fn update_staff_member(
        &self,
        caller: Option<Principal>,
        id: i64,
        draft: &StaffDraft,
    ) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        match state.staff.get_mut(&id) {
            Some(member) => {
                *member = StaffMember::from_draft(id, draft);
                Ok(())
            }
            None => Err(ServiceError::NotFound(EntityRef::Staff(id))),
        }
    }

    async fn delete_staff_member(&self, caller: Option<Principal>, id: i64) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        state
            .staff
            .remove(&id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound(EntityRef::Staff(id)))
    }

    async fn list_notices(&self) -> ServiceResult<Vec<Notice>> {
        self.hit().await;
        Ok(self.state.read().await.notices.values().cloned().collect())
    }

    async fn get_notice(&self, id: i64) -> ServiceResult<Option<Notice>> {
        self.hit().await;
        Ok(self.state.read().await.notices.get(&id).cloned())
    }

    async fn add_notice(
        &self,
        caller: Option<Principal>,
        draft: &NoticeDraft,
    ) -> ServiceResult<i64> {
        self.hit().await;
        let date = require_notice_date(draft)?;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        let id = next_id(&mut state.sequences.notices);
        state.notices.insert(
            id,
            Notice {
                id,
                title: draft.title.clone(),
                body: draft.body.clone(),
                date,
            },
        );
        Ok(id)
    }

    async fn update_notice(
        &self,
        caller: Option<Principal>,
        id: i64,
        draft: &NoticeDraft,
    ) -> ServiceResult<()> {
        self.hit().await;
        let date = require_notice_date(draft)?;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        let notice = state
            .notices
            .get_mut(&id)
            .ok_or(ServiceError::NotFound(EntityRef::Notice(id)))?;
        notice.title = draft.title.clone();
        notice.body = draft.body.clone();
        notice.date = date;
        Ok(())
    }

    async fn delete_notice(&self, caller: Option<Principal>, id: i64) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        state
            .notices
            .remove(&id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound(EntityRef::Notice(id)))
    }

    async fn list_gallery_items(&self) -> ServiceResult<Vec<GalleryItem>> {
        self.hit().await;
        Ok(self.state.read().await.gallery.values().cloned().collect())
    }

    async fn get_gallery_item(&self, id: i64) -> ServiceResult<Option<GalleryItem>> {
        self.hit().await;
        Ok(self.state.read().await.gallery.get(&id).cloned())
    }

    async fn add_gallery_item(
        &self,
        caller: Option<Principal>,
        draft: &GalleryDraft,
    ) -> ServiceResult<i64> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        let id = next_id(&mut state.sequences.gallery);
        state.gallery.insert(
            id,
            GalleryItem {
                id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                image_url: draft.image_url.clone(),
                date_added: timestamp::now_nanos(),
            },
        );
        Ok(id)
    }

    async fn update_gallery_item(
        &self,
        caller: Option<Principal>,
        id: i64,
        draft: &GalleryDraft,
    ) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        let item = state
            .gallery
            .get_mut(&id)
            .ok_or(ServiceError::NotFound(EntityRef::Gallery(id)))?;
        item.title = draft.title.clone();
        item.description = draft.description.clone();
        item.image_url = draft.image_url.clone();
        Ok(())
    }

    async fn delete_gallery_item(&self, caller: Option<Principal>, id: i64) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        state
            .gallery
            .remove(&id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound(EntityRef::Gallery(id)))
    }

    async fn submit_contact_form(&self, draft: &ContactDraft) -> ServiceResult<i64> {
        self.hit().await;
        let mut state = self.state.write().await;
        let id = next_id(&mut state.sequences.contacts);
        state.contacts.insert(
            id,
            ContactSubmission {
                id,
                name: draft.name.clone(),
                email: draft.email.clone(),
                message: draft.message.clone(),
                timestamp: timestamp::now_nanos(),
            },
        );
        Ok(id)
    }

    async fn get_all_contact_submissions(
        &self,
        caller: Option<Principal>,
    ) -> ServiceResult<Vec<ContactSubmission>> {
        self.hit().await;
        let state = self.state.read().await;
        state.require_admin(caller)?;
        Ok(state.contacts.values().cloned().collect())
    }

    async fn delete_contact_submission(
        &self,
        caller: Option<Principal>,
        id: i64,
    ) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        state
            .contacts
            .remove(&id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound(EntityRef::ContactSubmission(id)))
    }

    async fn initialize_access(&self, caller: Principal, secret: &str) -> ServiceResult<UserRole> {
        self.hit().await;
        let mut state = self.state.write().await;

        let secret_matches = match &self.admin_secret {
            Some(expected) if expected != secret => return Err(ServiceError::InvalidSecret),
            Some(_) => true,
            None => false,
        };

        if let Some(role) = state.roles.get(&caller) {
            return Ok(*role);
        }

        let role = if secret_matches && !state.has_admin() {
            log::info!("Granting admin role to first verified caller {}", caller);
            UserRole::Admin
        } else {
            UserRole::User
        };
        state.roles.insert(caller, role);
        Ok(role)
    }

    async fn get_caller_role(&self, caller: Option<Principal>) -> ServiceResult<UserRole> {
        self.hit().await;
        Ok(self.state.read().await.role_of(caller))
    }

    async fn is_caller_admin(&self, caller: Option<Principal>) -> ServiceResult<bool> {
        self.hit().await;
        Ok(self.state.read().await.role_of(caller).is_admin())
    }

    async fn assign_role(
        &self,
        caller: Option<Principal>,
        user: Principal,
        role: UserRole,
    ) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        state.require_admin(caller)?;
        state.roles.insert(user, role);
        Ok(())
    }

    async fn get_caller_profile(
        &self,
        caller: Option<Principal>,
    ) -> ServiceResult<Option<UserProfile>> {
        self.hit().await;
        let state = self.state.read().await;
        let principal = state.require_user(caller)?;
        Ok(state.profiles.get(&principal).cloned())
    }

    async fn get_user_profile(
        &self,
        caller: Option<Principal>,
        user: Principal,
    ) -> ServiceResult<Option<UserProfile>> {
        self.hit().await;
        let state = self.state.read().await;
        let principal = require_caller(caller)?;
        if principal != user && !state.role_of(caller).is_admin() {
            return Err(ServiceError::Unauthorized(
                "can only view your own profile".into(),
            ));
        }
        Ok(state.profiles.get(&user).cloned())
    }

    async fn save_caller_profile(
        &self,
        caller: Option<Principal>,
        profile: &UserProfile,
    ) -> ServiceResult<()> {
        self.hit().await;
        let mut state = self.state.write().await;
        let principal = state.require_user(caller)?;
        state.profiles.insert(principal, profile.clone());
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for MemoryBackend {
    async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserAccount, IdentityError> {
        let mut state = self.state.write().await;
        if state.accounts.contains_key(email) {
            return Err(IdentityError::AlreadyExists(EntityRef::Account(
                email.to_string(),
            )));
        }

        let account = UserAccount {
            id: Principal::new(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        state.accounts.insert(email.to_string(), account.clone());
        Ok(account)
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, IdentityError> {
        let state = self.state.read().await;
        Ok(state.accounts.get(email).cloned())
    }
}

//! The content service surface.
//!
//! Every page and panel talks to the site's data through this trait. Reads of
//! public content need no caller; mutations and private reads take the calling
//! [`Principal`] and fail with [`ServiceError::Unauthorized`] unless the caller
//! holds the required role.

use async_trait::async_trait;

use crate::common::ServiceError;
use crate::models::{
    ContactDraft, ContactSubmission, ContentBlock, GalleryDraft, GalleryItem, Notice,
    NoticeDraft, Principal, StaffDraft, StaffMember, UserProfile, UserRole,
};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[async_trait]
pub trait ContentService: Send + Sync {
    // Content blocks
    async fn get_content_block(&self, key: &str) -> ServiceResult<Option<ContentBlock>>;

    /// All blocks ordered by key.
    async fn get_all_content_blocks(&self) -> ServiceResult<Vec<(String, ContentBlock)>>;

    /// Inserts or replaces the block stored under `key`.
    async fn update_content_block(
        &self,
        caller: Option<Principal>,
        key: &str,
        block: ContentBlock,
    ) -> ServiceResult<()>;

    async fn delete_content_block(&self, caller: Option<Principal>, key: &str)
    -> ServiceResult<()>;

    // Staff
    async fn list_staff_members(&self) -> ServiceResult<Vec<StaffMember>>;

    async fn get_staff_member(&self, id: i64) -> ServiceResult<Option<StaffMember>>;

    async fn add_staff_member(
        &self,
        caller: Option<Principal>,
        draft: &StaffDraft,
    ) -> ServiceResult<i64>;

    async fn update_staff_member(
        &self,
        caller: Option<Principal>,
        id: i64,
        draft: &StaffDraft,
    ) -> ServiceResult<()>;

    async fn delete_staff_member(&self, caller: Option<Principal>, id: i64) -> ServiceResult<()>;

    // Notices
    async fn list_notices(&self) -> ServiceResult<Vec<Notice>>;

    async fn get_notice(&self, id: i64) -> ServiceResult<Option<Notice>>;

    async fn add_notice(&self, caller: Option<Principal>, draft: &NoticeDraft)
    -> ServiceResult<i64>;

    async fn update_notice(
        &self,
        caller: Option<Principal>,
        id: i64,
        draft: &NoticeDraft,
    ) -> ServiceResult<()>;

    async fn delete_notice(&self, caller: Option<Principal>, id: i64) -> ServiceResult<()>;

    // Gallery
    async fn list_gallery_items(&self) -> ServiceResult<Vec<GalleryItem>>;

    async fn get_gallery_item(&self, id: i64) -> ServiceResult<Option<GalleryItem>>;

    /// `date_added` is stamped by the service.
    async fn add_gallery_item(
        &self,
        caller: Option<Principal>,
        draft: &GalleryDraft,
    ) -> ServiceResult<i64>;

    async fn update_gallery_item(
        &self,
        caller: Option<Principal>,
        id: i64,
        draft: &GalleryDraft,
    ) -> ServiceResult<()>;

    async fn delete_gallery_item(&self, caller: Option<Principal>, id: i64) -> ServiceResult<()>;

    // Contact submissions
    /// Open to anonymous callers.
    async fn submit_contact_form(&self, draft: &ContactDraft) -> ServiceResult<i64>;

    async fn get_all_contact_submissions(
        &self,
        caller: Option<Principal>,
    ) -> ServiceResult<Vec<ContactSubmission>>;

    async fn delete_contact_submission(
        &self,
        caller: Option<Principal>,
        id: i64,
    ) -> ServiceResult<()>;

    // Access control
    /// Registers `caller` and checks the admin secret.
    ///
    /// A matching secret promotes the caller to admin when no admin exists
    /// yet. A mismatching secret fails with [`ServiceError::InvalidSecret`].
    async fn initialize_access(&self, caller: Principal, secret: &str) -> ServiceResult<UserRole>;

    async fn get_caller_role(&self, caller: Option<Principal>) -> ServiceResult<UserRole>;

    async fn is_caller_admin(&self, caller: Option<Principal>) -> ServiceResult<bool>;

    async fn assign_role(
        &self,
        caller: Option<Principal>,
        user: Principal,
        role: UserRole,
    ) -> ServiceResult<()>;

    // Profiles
    async fn get_caller_profile(&self, caller: Option<Principal>)
    -> ServiceResult<Option<UserProfile>>;

    /// Readable by the profile owner and by admins.
    async fn get_user_profile(
        &self,
        caller: Option<Principal>,
        user: Principal,
    ) -> ServiceResult<Option<UserProfile>>;

    async fn save_caller_profile(
        &self,
        caller: Option<Principal>,
        profile: &UserProfile,
    ) -> ServiceResult<()>;
}

/// Resolves the caller or rejects an anonymous request.
pub(crate) fn require_caller(caller: Option<Principal>) -> ServiceResult<Principal> {
    caller.ok_or_else(|| ServiceError::Unauthorized("anonymous caller".into()))
}

pub(crate) fn require_notice_date(draft: &NoticeDraft) -> ServiceResult<i64> {
    draft
        .date
        .ok_or_else(|| ServiceError::InvalidRequest("notice date is required".into()))
}

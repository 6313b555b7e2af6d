use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::{IdentityError, ServiceError};
use crate::db;
use crate::models::{
    ContactDraft, ContactSubmission, ContentBlock, EntityRef, GalleryDraft, GalleryItem,
    Notice, NoticeDraft, Principal, StaffDraft, StaffMember, UserAccount, UserProfile,
    UserRole, timestamp,
};
use crate::services::content::{
    ContentService, ServiceResult, require_caller, require_notice_date,
};
use crate::services::identity::IdentityStore;

/// Content service backed by PostgreSQL.
pub struct PgBackend {
    pool: PgPool,
    admin_secret: Option<String>,
}

impl PgBackend {
    pub fn new(pool: PgPool, admin_secret: Option<String>) -> Self {
        Self { pool, admin_secret }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn role_of(&self, caller: Option<Principal>) -> ServiceResult<UserRole> {
        match caller {
            Some(principal) => Ok(db::roles::get_user_role(&self.pool, principal)
                .await?
                .unwrap_or_default()),
            None => Ok(UserRole::Guest),
        }
    }

    async fn require_admin(&self, caller: Option<Principal>) -> ServiceResult<Principal> {
        let principal = require_caller(caller)?;
        if db::roles::user_is_admin(&self.pool, principal).await? {
            Ok(principal)
        } else {
            Err(ServiceError::Unauthorized("admin role required".into()))
        }
    }

    async fn require_user(&self, caller: Option<Principal>) -> ServiceResult<Principal> {
        let principal = require_caller(caller)?;
        match self.role_of(Some(principal)).await? {
            UserRole::Admin | UserRole::User => Ok(principal),
            UserRole::Guest => Err(ServiceError::Unauthorized("caller is not registered".into())),
        }
    }
}

fn found_or(found: bool, entity: EntityRef) -> ServiceResult<()> {
    if found {
        Ok(())
    } else {
        Err(ServiceError::NotFound(entity))
    }
}

#[async_trait]
impl ContentService for PgBackend {
    async fn get_content_block(&self, key: &str) -> ServiceResult<Option<ContentBlock>> {
        Ok(db::content_blocks::get_content_block(&self.pool, key).await?)
    }

    async fn get_all_content_blocks(&self) -> ServiceResult<Vec<(String, ContentBlock)>> {
        let rows = db::content_blocks::list_content_blocks(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let block = row.block();
                (row.key, block)
            })
            .collect())
    }

    async fn update_content_block(
        &self,
        caller: Option<Principal>,
        key: &str,
        block: ContentBlock,
    ) -> ServiceResult<()> {
        self.require_admin(caller).await?;
        Ok(db::content_blocks::upsert_content_block(&self.pool, key, &block).await?)
    }

    async fn delete_content_block(
        &self,
        caller: Option<Principal>,
        key: &str,
    ) -> ServiceResult<()> {
        self.require_admin(caller).await?;
        let found = db::content_blocks::delete_content_block(&self.pool, key).await?;
        found_or(found, EntityRef::ContentBlock(key.to_string()))
    }

    async fn list_staff_members(&self) -> ServiceResult<Vec<StaffMember>> {
        Ok(db::staff::list_staff_members(&self.pool).await?)
    }

    async fn get_staff_member(&self, id: i64) -> ServiceResult<Option<StaffMember>> {
        Ok(db::staff::get_staff_member(&self.pool, id).await?)
    }

    async fn add_staff_member(
        &self,
        caller: Option<Principal>,
        draft: &StaffDraft,
    ) -> ServiceResult<i64> {
        self.require_admin(caller).await?;
        Ok(db::staff::insert_staff_member(&self.pool, draft).await?)
    }

    async fn update_staff_member(
        &self,
        caller: Option<Principal>,
        id: i64,
        draft: &StaffDraft,
    ) -> ServiceResult<()> {
        self.require_admin(caller).await?;
        let found = db::staff::update_staff_member(&self.pool, id, draft).await?;
        found_or(found, EntityRef::Staff(id))
    }

    async fn delete_staff_member(&self, caller: Option<Principal>, id: i64) -> ServiceResult<()> {
        self.require_admin(caller).await?;
        let found = db::staff::delete_staff_member(&self.pool, id).await?;
        found_or(found, EntityRef::Staff(id))
    }

    async fn list_notices(&self) -> ServiceResult<Vec<Notice>> {
        Ok(db::notices::list_notices(&self.pool).await?)
    }

    async fn get_notice(&self, id: i64) -> ServiceResult<Option<Notice>> {
        Ok(db::notices::get_notice(&self.pool, id).await?)
    }

    async fn add_notice(
        &self,
        caller: Option<Principal>,
        draft: &NoticeDraft,
    ) -> ServiceResult<i64> {
        let date = require_notice_date(draft)?;
        self.require_admin(caller).await?;
        Ok(db::notices::insert_notice(&self.pool, &draft.title, &draft.body, date).await?)
    }

    async fn update_notice(
        &self,
        caller: Option<Principal>,
        id: i64,
        draft: &NoticeDraft,
    ) -> ServiceResult<()> {
        let date = require_notice_date(draft)?;
        self.require_admin(caller).await?;
        let found =
            db::notices::update_notice(&self.pool, id, &draft.title, &draft.body, date).await?;
        found_or(found, EntityRef::Notice(id))
    }

    async fn delete_notice(&self, caller: Option<Principal>, id: i64) -> ServiceResult<()> {
        self.require_admin(caller).await?;
        let found = db::notices::delete_notice(&self.pool, id).await?;
        found_or(found, EntityRef::Notice(id))
    }

    async fn list_gallery_items(&self) -> ServiceResult<Vec<GalleryItem>> {
        Ok(db::gallery::list_gallery_items(&self.pool).await?)
    }

    async fn get_gallery_item(&self, id: i64) -> ServiceResult<Option<GalleryItem>> {
        Ok(db::gallery::get_gallery_item(&self.pool, id).await?)
    }

    async fn add_gallery_item(
        &self,
        caller: Option<Principal>,
        draft: &GalleryDraft,
    ) -> ServiceResult<i64> {
        self.require_admin(caller).await?;
        Ok(db::gallery::insert_gallery_item(&self.pool, draft, timestamp::now_nanos()).await?)
    }

    async fn update_gallery_item(
        &self,
        caller: Option<Principal>,
        id: i64,
        draft: &GalleryDraft,
    ) -> ServiceResult<()> {
        self.require_admin(caller).await?;
        let found = db::gallery::update_gallery_item(&self.pool, id, draft).await?;
        found_or(found, EntityRef::Gallery(id))
    }

    async fn delete_gallery_item(&self, caller: Option<Principal>, id: i64) -> ServiceResult<()> {
        self.require_admin(caller).await?;
        let found = db::gallery::delete_gallery_item(&self.pool, id).await?;
        found_or(found, EntityRef::Gallery(id))
    }

    async fn submit_contact_form(&self, draft: &ContactDraft) -> ServiceResult<i64> {
        Ok(
            db::contact::insert_contact_submission(&self.pool, draft, timestamp::now_nanos())
                .await?,
        )
    }

    async fn get_all_contact_submissions(
        &self,
        caller: Option<Principal>,
    ) -> ServiceResult<Vec<ContactSubmission>> {
        self.require_admin(caller).await?;
        Ok(db::contact::list_contact_submissions(&self.pool).await?)
    }

    async fn delete_contact_submission(
        &self,
        caller: Option<Principal>,
        id: i64,
    ) -> ServiceResult<()> {
        self.require_admin(caller).await?;
        let found = db::contact::delete_contact_submission(&self.pool, id).await?;
        found_or(found, EntityRef::ContactSubmission(id))
    }

    async fn initialize_access(&self, caller: Principal, secret: &str) -> ServiceResult<UserRole> {
        let may_claim_admin = match &self.admin_secret {
            Some(expected) if expected != secret => return Err(ServiceError::InvalidSecret),
            Some(_) => true,
            None => false,
        };

        let role = db::roles::register_caller(&self.pool, caller, may_claim_admin).await?;
        Ok(role)
    }

    async fn get_caller_role(&self, caller: Option<Principal>) -> ServiceResult<UserRole> {
        self.role_of(caller).await
    }

    async fn is_caller_admin(&self, caller: Option<Principal>) -> ServiceResult<bool> {
        match caller {
            Some(principal) => Ok(db::roles::user_is_admin(&self.pool, principal).await?),
            None => Ok(false),
        }
    }

    async fn assign_role(
        &self,
        caller: Option<Principal>,
        user: Principal,
        role: UserRole,
    ) -> ServiceResult<()> {
        self.require_admin(caller).await?;
        Ok(db::roles::assign_role(&self.pool, user, role).await?)
    }

    async fn get_caller_profile(
        &self,
        caller: Option<Principal>,
    ) -> ServiceResult<Option<UserProfile>> {
        let principal = self.require_user(caller).await?;
        Ok(db::profiles::get_profile(&self.pool, principal).await?)
    }

    async fn get_user_profile(
        &self,
        caller: Option<Principal>,
        user: Principal,
    ) -> ServiceResult<Option<UserProfile>> {
        let principal = require_caller(caller)?;
        if principal != user && !self.role_of(caller).await?.is_admin() {
            return Err(ServiceError::Unauthorized(
                "can only view your own profile".into(),
            ));
        }
        Ok(db::profiles::get_profile(&self.pool, user).await?)
    }

    async fn save_caller_profile(
        &self,
        caller: Option<Principal>,
        profile: &UserProfile,
    ) -> ServiceResult<()> {
        let principal = self.require_user(caller).await?;
        Ok(db::profiles::save_profile(&self.pool, principal, profile).await?)
    }
}

#[async_trait]
impl IdentityStore for PgBackend {
    async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<UserAccount, IdentityError> {
        db::accounts::insert_account(&self.pool, email, password_hash)
            .await?
            .ok_or_else(|| IdentityError::AlreadyExists(EntityRef::Account(email.to_string())))
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, IdentityError> {
        Ok(db::accounts::find_account_by_email(&self.pool, email).await?)
    }
}

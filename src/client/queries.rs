use std::future::Future;
use std::sync::Arc;

use super::{AccessState, Cached, QueryKey, ServiceClient};
use crate::common::{ClientError, ServiceError};
use crate::log_failure;
use crate::models::{
    ContactSubmission, ContentBlock, GalleryItem, Notice, Principal, StaffMember, UserProfile,
    UserRole,
};
use crate::services::{ContentService, ServiceResult};

impl ServiceClient {
    async fn query<T, F, Fut>(&self, key: QueryKey, op: F) -> Result<T, ClientError>
    where
        T: Cached + Default,
        F: FnOnce(Arc<dyn ContentService>) -> Fut,
        Fut: Future<Output = ServiceResult<T>>,
    {
        let Some(connection) = &self.connection else {
            return Ok(T::default());
        };

        let service = connection.service.clone();
        let context = format!("query {:?}", key);

        self.cache
            .fetch(key, move || op(service))
            .await
            .map_err(|e| {
                log_failure!(context, &e);
                e.into()
            })
    }

    pub async fn content_block(&self, key: &str) -> Result<Option<ContentBlock>, ClientError> {
        let owned = key.to_string();
        self.query(QueryKey::ContentBlock(owned.clone()), |svc| async move {
            svc.get_content_block(&owned).await
        })
        .await
    }

    pub async fn all_content_blocks(&self) -> Result<Vec<(String, ContentBlock)>, ClientError> {
        self.query(QueryKey::AllContentBlocks, |svc| async move {
            svc.get_all_content_blocks().await
        })
        .await
    }

    pub async fn staff_list(&self) -> Result<Vec<StaffMember>, ClientError> {
        self.query(QueryKey::StaffList, |svc| async move {
            svc.list_staff_members().await
        })
        .await
    }

    pub async fn staff_member(&self, id: i64) -> Result<Option<StaffMember>, ClientError> {
        self.query(QueryKey::StaffMember(id), |svc| async move {
            svc.get_staff_member(id).await
        })
        .await
    }

    pub async fn notices(&self) -> Result<Vec<Notice>, ClientError> {
        self.query(QueryKey::Notices, |svc| async move { svc.list_notices().await })
            .await
    }

    pub async fn notice(&self, id: i64) -> Result<Option<Notice>, ClientError> {
        self.query(QueryKey::Notice(id), |svc| async move { svc.get_notice(id).await })
            .await
    }

    pub async fn gallery_items(&self) -> Result<Vec<GalleryItem>, ClientError> {
        self.query(QueryKey::GalleryItems, |svc| async move {
            svc.list_gallery_items().await
        })
        .await
    }

    pub async fn gallery_item(&self, id: i64) -> Result<Option<GalleryItem>, ClientError> {
        self.query(QueryKey::GalleryItem(id), |svc| async move {
            svc.get_gallery_item(id).await
        })
        .await
    }

    /// Admin only. Empty for anonymous callers.
    pub async fn contact_submissions(&self) -> Result<Vec<ContactSubmission>, ClientError> {
        let Some(principal) = self.principal() else {
            return Ok(Vec::new());
        };

        self.query(QueryKey::ContactSubmissions(principal), |svc| async move {
            svc.get_all_contact_submissions(Some(principal)).await
        })
        .await
    }

    pub async fn caller_profile(&self) -> Result<Option<UserProfile>, ClientError> {
        let Some(principal) = self.principal() else {
            return Ok(None);
        };

        self.query(QueryKey::CallerProfile(principal), |svc| async move {
            svc.get_caller_profile(Some(principal)).await
        })
        .await
    }

    pub async fn user_profile(&self, user: Principal) -> Result<Option<UserProfile>, ClientError> {
        let Some(caller) = self.principal() else {
            return Ok(None);
        };

        self.query(QueryKey::UserProfile { caller, user }, |svc| async move {
            svc.get_user_profile(Some(caller), user).await
        })
        .await
    }

    pub async fn caller_role(&self) -> Result<UserRole, ClientError> {
        let Some(principal) = self.principal() else {
            return Ok(UserRole::Guest);
        };

        self.query(QueryKey::CallerRole(principal), |svc| async move {
            svc.get_caller_role(Some(principal)).await
        })
        .await
    }

    /// Fails when the service rejected the caller's unlock token.
    pub async fn is_caller_admin(&self) -> Result<bool, ClientError> {
        if self.access() == Some(AccessState::Rejected) {
            return Err(ServiceError::InvalidSecret.into());
        }

        let Some(principal) = self.principal() else {
            return Ok(false);
        };

        self.query(QueryKey::IsAdmin(principal), |svc| async move {
            svc.is_caller_admin(Some(principal)).await
        })
        .await
    }
}

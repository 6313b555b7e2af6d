use std::future::Future;
use std::sync::Arc;

use super::{ServiceClient, Topic};
use crate::common::ClientError;
use crate::log_failure;
use crate::models::{
    ContactDraft, ContentBlock, GalleryDraft, NoticeDraft, Principal, StaffDraft, UserProfile,
    UserRole,
};
use crate::services::{ContentService, ServiceResult};

/// Every write the client can issue.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mutation {
    UpdateContentBlock,
    DeleteContentBlock,
    AddStaffMember,
    UpdateStaffMember,
    DeleteStaffMember,
    AddNotice,
    UpdateNotice,
    DeleteNotice,
    AddGalleryItem,
    UpdateGalleryItem,
    DeleteGalleryItem,
    SubmitContactForm,
    DeleteContactSubmission,
    SaveCallerProfile,
    AssignRole,
}

impl Mutation {
    /// Topics whose cached reads go stale when this mutation succeeds.
    pub fn invalidates(&self) -> &'static [Topic] {
        match self {
            Self::UpdateContentBlock | Self::DeleteContentBlock => &[Topic::ContentBlocks],
            Self::AddStaffMember | Self::UpdateStaffMember | Self::DeleteStaffMember => {
                &[Topic::Staff]
            }
            Self::AddNotice | Self::UpdateNotice | Self::DeleteNotice => &[Topic::Notices],
            Self::AddGalleryItem | Self::UpdateGalleryItem | Self::DeleteGalleryItem => {
                &[Topic::Gallery]
            }
            Self::SubmitContactForm | Self::DeleteContactSubmission => {
                &[Topic::ContactSubmissions]
            }
            Self::SaveCallerProfile => &[Topic::Profiles],
            Self::AssignRole => &[Topic::Roles],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateContentBlock => "update_content_block",
            Self::DeleteContentBlock => "delete_content_block",
            Self::AddStaffMember => "add_staff_member",
            Self::UpdateStaffMember => "update_staff_member",
            Self::DeleteStaffMember => "delete_staff_member",
            Self::AddNotice => "add_notice",
            Self::UpdateNotice => "update_notice",
            Self::DeleteNotice => "delete_notice",
            Self::AddGalleryItem => "add_gallery_item",
            Self::UpdateGalleryItem => "update_gallery_item",
            Self::DeleteGalleryItem => "delete_gallery_item",
            Self::SubmitContactForm => "submit_contact_form",
            Self::DeleteContactSubmission => "delete_contact_submission",
            Self::SaveCallerProfile => "save_caller_profile",
            Self::AssignRole => "assign_role",
        }
    }
}

impl ServiceClient {
    async fn mutate<T, F, Fut>(&self, mutation: Mutation, op: F) -> Result<T, ClientError>
    where
        F: FnOnce(Arc<dyn ContentService>, Option<Principal>) -> Fut,
        Fut: Future<Output = ServiceResult<T>>,
    {
        let Some(connection) = &self.connection else {
            log::warn!("{} attempted without a connection", mutation.name());
            return Err(ClientError::NotConnected);
        };

        match op(connection.service.clone(), self.principal()).await {
            Ok(value) => {
                self.cache.invalidate(mutation.invalidates());
                Ok(value)
            }
            Err(e) => {
                log_failure!(mutation.name(), &e);
                Err(e.into())
            }
        }
    }

    pub async fn update_content_block(
        &self,
        key: &str,
        title: &str,
        content: &str,
    ) -> Result<(), ClientError> {
        let block = ContentBlock::new(title, content);
        self.mutate(Mutation::UpdateContentBlock, |svc, caller| async move {
            svc.update_content_block(caller, key, block).await
        })
        .await
    }

    pub async fn delete_content_block(&self, key: &str) -> Result<(), ClientError> {
        self.mutate(Mutation::DeleteContentBlock, |svc, caller| async move {
            svc.delete_content_block(caller, key).await
        })
        .await
    }

    pub async fn add_staff_member(&self, draft: &StaffDraft) -> Result<i64, ClientError> {
        self.mutate(Mutation::AddStaffMember, |svc, caller| async move {
            svc.add_staff_member(caller, draft).await
        })
        .await
    }

    pub async fn update_staff_member(&self, id: i64, draft: &StaffDraft) -> Result<(), ClientError> {
        self.mutate(Mutation::UpdateStaffMember, |svc, caller| async move {
            svc.update_staff_member(caller, id, draft).await
        })
        .await
    }

    pub async fn delete_staff_member(&self, id: i64) -> Result<(), ClientError> {
        self.mutate(Mutation::DeleteStaffMember, |svc, caller| async move {
            svc.delete_staff_member(caller, id).await
        })
        .await
    }

    pub async fn add_notice(&self, draft: &NoticeDraft) -> Result<i64, ClientError> {
        self.mutate(Mutation::AddNotice, |svc, caller| async move {
            svc.add_notice(caller, draft).await
        })
        .await
    }

    pub async fn update_notice(&self, id: i64, draft: &NoticeDraft) -> Result<(), ClientError> {
        self.mutate(Mutation::UpdateNotice, |svc, caller| async move {
            svc.update_notice(caller, id, draft).await
        })
        .await
    }

    pub async fn delete_notice(&self, id: i64) -> Result<(), ClientError> {
        self.mutate(Mutation::DeleteNotice, |svc, caller| async move {
            svc.delete_notice(caller, id).await
        })
        .await
    }

    pub async fn add_gallery_item(&self, draft: &GalleryDraft) -> Result<i64, ClientError> {
        self.mutate(Mutation::AddGalleryItem, |svc, caller| async move {
            svc.add_gallery_item(caller, draft).await
        })
        .await
    }

    pub async fn update_gallery_item(
        &self,
        id: i64,
        draft: &GalleryDraft,
    ) -> Result<(), ClientError> {
        self.mutate(Mutation::UpdateGalleryItem, |svc, caller| async move {
            svc.update_gallery_item(caller, id, draft).await
        })
        .await
    }

    pub async fn delete_gallery_item(&self, id: i64) -> Result<(), ClientError> {
        self.mutate(Mutation::DeleteGalleryItem, |svc, caller| async move {
            svc.delete_gallery_item(caller, id).await
        })
        .await
    }

    /// Open to anonymous callers.
    pub async fn submit_contact_form(&self, draft: &ContactDraft) -> Result<i64, ClientError> {
        self.mutate(Mutation::SubmitContactForm, |svc, _| async move {
            svc.submit_contact_form(draft).await
        })
        .await
    }

    pub async fn delete_contact_submission(&self, id: i64) -> Result<(), ClientError> {
        self.mutate(Mutation::DeleteContactSubmission, |svc, caller| async move {
            svc.delete_contact_submission(caller, id).await
        })
        .await
    }

    pub async fn save_caller_profile(&self, profile: &UserProfile) -> Result<(), ClientError> {
        self.mutate(Mutation::SaveCallerProfile, |svc, caller| async move {
            svc.save_caller_profile(caller, profile).await
        })
        .await
    }

    pub async fn assign_role(&self, user: Principal, role: UserRole) -> Result<(), ClientError> {
        self.mutate(Mutation::AssignRole, |svc, caller| async move {
            svc.assign_role(caller, user, role).await
        })
        .await
    }
}

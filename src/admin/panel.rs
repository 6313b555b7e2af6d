//! Management panels for the admin dashboard.
//!
//! Every panel moves between listing, editing, confirming a delete and
//! inspecting one entity. Panels are rebuilt from the request on every
//! round-trip, so a transition is a plain value and [`PanelState::save`] or
//! [`PanelState::confirm_delete`] are the only steps that reach the service.

#![allow(async_fn_in_trait)]

use std::fmt::{Debug, Display};
use std::str::FromStr;

use crate::client::ServiceClient;
use crate::common::{ClientError, PanelError};
use crate::models::{
    ContactDraft, ContactSubmission, ContentBlockDraft, GalleryDraft, GalleryItem,
    KeyedContentBlock, Notice, NoticeDraft, RequiredFields, StaffDraft, StaffMember,
};

/// An entity type listed by a panel.
pub trait Managed: Clone + Debug + PartialEq + Sized {
    type Id: Clone + Debug + Display + FromStr + PartialEq;
    type Draft: Clone + Debug + Default + PartialEq + RequiredFields;

    /// Singular label used in messages, e.g. "notice".
    const NOUN: &'static str;

    fn id(&self) -> Self::Id;

    async fn list(client: &ServiceClient) -> Result<Vec<Self>, ClientError>;

    async fn find(client: &ServiceClient, id: &Self::Id) -> Result<Option<Self>, ClientError>;

    async fn remove(client: &ServiceClient, id: &Self::Id) -> Result<(), ClientError>;
}

/// An entity type the admin can create and update.
pub trait Editable: Managed {
    fn to_draft(&self) -> Self::Draft;

    async fn create(client: &ServiceClient, draft: &Self::Draft) -> Result<Self::Id, ClientError>;

    async fn update(
        client: &ServiceClient,
        id: &Self::Id,
        draft: &Self::Draft,
    ) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<E: Managed> {
    Viewing,
    /// `current` is `None` when creating.
    Editing {
        current: Option<E::Id>,
        draft: E::Draft,
    },
    ConfirmingDelete(E::Id),
    Inspecting(E),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SaveOutcome<Id> {
    Created(Id),
    Updated(Id),
}

impl<Id> SaveOutcome<Id> {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
        }
    }
}

impl<E: Managed> Default for PanelState<E> {
    fn default() -> Self {
        Self::Viewing
    }
}

impl<E: Managed> PanelState<E> {
    pub fn request_delete(id: E::Id) -> Self {
        Self::ConfirmingDelete(id)
    }

    pub fn inspect(entity: E) -> Self {
        Self::Inspecting(entity)
    }

    pub fn cancel(&mut self) {
        *self = Self::Viewing;
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, Self::Viewing)
    }

    /// Deletes the entity awaiting confirmation and returns to listing.
    pub async fn confirm_delete(&mut self, client: &ServiceClient) -> Result<E::Id, PanelError> {
        let Self::ConfirmingDelete(id) = self else {
            return Err(PanelError::InvalidState);
        };

        let id = id.clone();
        E::remove(client, &id).await?;
        *self = Self::Viewing;
        Ok(id)
    }
}

impl<E: Editable> PanelState<E> {
    pub fn open_create() -> Self {
        Self::Editing {
            current: None,
            draft: E::Draft::default(),
        }
    }

    pub fn open_edit(entity: &E) -> Self {
        Self::Editing {
            current: Some(entity.id()),
            draft: entity.to_draft(),
        }
    }

    /// Replaces the draft being edited. Other states are returned unchanged.
    pub fn with_draft(self, draft: E::Draft) -> Self {
        match self {
            Self::Editing { current, .. } => Self::Editing { current, draft },
            other => other,
        }
    }

    pub fn draft(&self) -> Option<&E::Draft> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Validates the draft and issues the create or update.
    ///
    /// The panel stays in `Editing` with its draft intact when validation or
    /// the service call fails.
    pub async fn save(&mut self, client: &ServiceClient) -> Result<SaveOutcome<E::Id>, PanelError> {
        let Self::Editing { current, draft } = self else {
            return Err(PanelError::InvalidState);
        };

        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(PanelError::MissingFields(missing));
        }

        let outcome = match current {
            Some(id) => {
                E::update(client, id, draft).await?;
                SaveOutcome::Updated(id.clone())
            }
            None => SaveOutcome::Created(E::create(client, draft).await?),
        };

        *self = Self::Viewing;
        Ok(outcome)
    }
}

impl Managed for KeyedContentBlock {
    type Id = String;
    type Draft = ContentBlockDraft;

    const NOUN: &'static str = "content block";

    fn id(&self) -> String {
        self.key.clone()
    }

    async fn list(client: &ServiceClient) -> Result<Vec<Self>, ClientError> {
        let blocks = client.all_content_blocks().await?;
        Ok(blocks.into_iter().map(KeyedContentBlock::from).collect())
    }

    async fn find(client: &ServiceClient, id: &String) -> Result<Option<Self>, ClientError> {
        let block = client.content_block(id).await?;
        Ok(block.map(|b| KeyedContentBlock::from((id.clone(), b))))
    }

    async fn remove(client: &ServiceClient, id: &String) -> Result<(), ClientError> {
        client.delete_content_block(id).await
    }
}

impl Editable for KeyedContentBlock {
    fn to_draft(&self) -> ContentBlockDraft {
        ContentBlockDraft {
            key: self.key.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }

    async fn create(
        client: &ServiceClient,
        draft: &ContentBlockDraft,
    ) -> Result<String, ClientError> {
        let key = draft.key.trim().to_string();
        client
            .update_content_block(&key, draft.title.trim(), &draft.content)
            .await?;
        Ok(key)
    }

    // The key is fixed once the block exists.
    async fn update(
        client: &ServiceClient,
        id: &String,
        draft: &ContentBlockDraft,
    ) -> Result<(), ClientError> {
        client
            .update_content_block(id, draft.title.trim(), &draft.content)
            .await
    }
}

impl Managed for StaffMember {
    type Id = i64;
    type Draft = StaffDraft;

    const NOUN: &'static str = "staff member";

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(client: &ServiceClient) -> Result<Vec<Self>, ClientError> {
        client.staff_list().await
    }

    async fn find(client: &ServiceClient, id: &i64) -> Result<Option<Self>, ClientError> {
        client.staff_member(*id).await
    }

    async fn remove(client: &ServiceClient, id: &i64) -> Result<(), ClientError> {
        client.delete_staff_member(*id).await
    }
}

impl Editable for StaffMember {
    fn to_draft(&self) -> StaffDraft {
        StaffMember::to_draft(self)
    }

    async fn create(client: &ServiceClient, draft: &StaffDraft) -> Result<i64, ClientError> {
        client.add_staff_member(draft).await
    }

    async fn update(client: &ServiceClient, id: &i64, draft: &StaffDraft) -> Result<(), ClientError> {
        client.update_staff_member(*id, draft).await
    }
}

impl Managed for Notice {
    type Id = i64;
    type Draft = NoticeDraft;

    const NOUN: &'static str = "notice";

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(client: &ServiceClient) -> Result<Vec<Self>, ClientError> {
        client.notices().await
    }

    async fn find(client: &ServiceClient, id: &i64) -> Result<Option<Self>, ClientError> {
        client.notice(*id).await
    }

    async fn remove(client: &ServiceClient, id: &i64) -> Result<(), ClientError> {
        client.delete_notice(*id).await
    }
}

impl Editable for Notice {
    fn to_draft(&self) -> NoticeDraft {
        Notice::to_draft(self)
    }

    async fn create(client: &ServiceClient, draft: &NoticeDraft) -> Result<i64, ClientError> {
        client.add_notice(draft).await
    }

    async fn update(client: &ServiceClient, id: &i64, draft: &NoticeDraft) -> Result<(), ClientError> {
        client.update_notice(*id, draft).await
    }
}

impl Managed for GalleryItem {
    type Id = i64;
    type Draft = GalleryDraft;

    const NOUN: &'static str = "gallery item";

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(client: &ServiceClient) -> Result<Vec<Self>, ClientError> {
        client.gallery_items().await
    }

    async fn find(client: &ServiceClient, id: &i64) -> Result<Option<Self>, ClientError> {
        client.gallery_item(*id).await
    }

    async fn remove(client: &ServiceClient, id: &i64) -> Result<(), ClientError> {
        client.delete_gallery_item(*id).await
    }
}

impl Editable for GalleryItem {
    fn to_draft(&self) -> GalleryDraft {
        GalleryItem::to_draft(self)
    }

    async fn create(client: &ServiceClient, draft: &GalleryDraft) -> Result<i64, ClientError> {
        client.add_gallery_item(draft).await
    }

    async fn update(
        client: &ServiceClient,
        id: &i64,
        draft: &GalleryDraft,
    ) -> Result<(), ClientError> {
        client.update_gallery_item(*id, draft).await
    }
}

// Submissions are read-only: listed, inspected and deleted.
impl Managed for ContactSubmission {
    type Id = i64;
    type Draft = ContactDraft;

    const NOUN: &'static str = "inquiry";

    fn id(&self) -> i64 {
        self.id
    }

    async fn list(client: &ServiceClient) -> Result<Vec<Self>, ClientError> {
        client.contact_submissions().await
    }

    async fn find(client: &ServiceClient, id: &i64) -> Result<Option<Self>, ClientError> {
        let submissions = client.contact_submissions().await?;
        Ok(submissions.into_iter().find(|s| s.id == *id))
    }

    async fn remove(client: &ServiceClient, id: &i64) -> Result<(), ClientError> {
        client.delete_contact_submission(*id).await
    }
}

//! Record form workflow
//!
//! A record form keeps the raw field values of the create or edit form in
//! the admin session. Submitting validates the fields, uploads the selected
//! image and then creates or updates the record. On success the draft is
//! cleared; on failure it is kept for another attempt. Either way a
//! notification is queued for the next page.

use tracing::warn;
use uuid::Uuid;

use super::context::{FormDraft, Notification, Session};
use crate::database::ResourceRepository;
use crate::models::{FormFields, Resource};
use crate::services::media::{MediaUploadService, UploadedFile};
use crate::utils::errors::{Result, TechClubError};
use crate::utils::logging::log_admin_action;

/// Result of a form submission
#[derive(Debug)]
pub enum SubmitOutcome<R> {
    Created(R),
    Updated(R),
    Rejected(TechClubError),
}

impl<R> SubmitOutcome<R> {
    pub fn is_saved(&self) -> bool {
        !matches!(self, SubmitOutcome::Rejected(_))
    }
}

pub struct RecordForm<'a, R: Resource> {
    repository: &'a ResourceRepository<R>,
    media: &'a MediaUploadService,
}

impl<'a, R: Resource> RecordForm<'a, R> {
    pub fn new(repository: &'a ResourceRepository<R>, media: &'a MediaUploadService) -> Self {
        Self { repository, media }
    }

    /// Bind an existing record into the session draft for editing
    pub async fn begin_edit(&self, session: &mut Session, id: Uuid) -> Result<R> {
        let record = self.repository.find(id).await?;
        session.set_draft(R::KIND, FormDraft::for_edit(id, record.to_form()));
        Ok(record)
    }

    /// Drop the draft, leaving edit mode
    pub fn cancel(&self, session: &mut Session) {
        session.clear_draft(R::KIND);
    }

    /// Validate and persist a submission
    ///
    /// The draft's bound id decides between create and update. Fields are
    /// stored in the draft before anything else so a failure leaves them in
    /// place.
    pub async fn submit(
        &self,
        session: &mut Session,
        fields: FormFields,
        file: Option<UploadedFile>,
    ) -> SubmitOutcome<R> {
        let bound_id = session.draft(R::KIND).and_then(|draft| draft.id);
        session.set_draft(
            R::KIND,
            FormDraft {
                id: bound_id,
                fields: fields.clone(),
            },
        );

        // Browsers send an empty, unnamed part when no file was chosen
        let file = file.filter(|f| !f.file_name.is_empty() || !f.is_empty());

        let (verb, saved) = match bound_id {
            None => ("created", self.create(&fields, file).await),
            Some(id) => ("updated", self.update(id, &fields, file).await),
        };

        match saved {
            Ok(record) => {
                session.clear_draft(R::KIND);
                let id = record.id().to_string();
                log_admin_action(&session.email, verb, Some(R::KIND.slug()), Some(&id));
                session.notify(Notification::success(format!(
                    "{} \"{}\" {}",
                    R::KIND.label(),
                    record.display_name(),
                    verb
                )));
                if bound_id.is_some() {
                    SubmitOutcome::Updated(record)
                } else {
                    SubmitOutcome::Created(record)
                }
            }
            Err(e) => {
                warn!(kind = %R::KIND, error = %e, "Form submission failed, draft kept");
                session.notify(Notification::error(e.user_message()));
                SubmitOutcome::Rejected(e)
            }
        }
    }

    async fn create(&self, fields: &FormFields, file: Option<UploadedFile>) -> Result<R> {
        let draft = R::draft_from_form(fields)?;
        let file = file.ok_or_else(|| TechClubError::Validation("An image is required".to_string()))?;

        let image_url = self.media.upload(&file, R::KIND.bucket()).await?;
        match self.repository.create(&draft, &image_url).await {
            Ok(record) => Ok(record),
            Err(e) => {
                self.repository.remove_image(&image_url).await;
                Err(e)
            }
        }
    }

    /// Upload first, update, then drop the replaced image
    async fn update(&self, id: Uuid, fields: &FormFields, file: Option<UploadedFile>) -> Result<R> {
        let patch = R::patch_from_form(fields)?;
        let Some(file) = file else {
            return self.repository.update(id, &patch).await;
        };

        let previous = self.repository.find(id).await?;
        let image_url = self.media.upload(&file, R::KIND.bucket()).await?;
        match self
            .repository
            .update(id, &R::image_patch(patch, image_url.clone()))
            .await
        {
            Ok(record) => {
                self.repository.remove_image(previous.image_url()).await;
                Ok(record)
            }
            Err(e) => {
                self.repository.remove_image(&image_url).await;
                Err(e)
            }
        }
    }
}

// src/services/update_service.rs
// DOCUMENTATION: Business logic for organizer updates
// PURPOSE: Updates carry no ownership; anyone past the gate may delete them

use crate::db::RecordStore;
use crate::errors::GalleryError;
use crate::models::{CreateUpdateRequest, Update};
use uuid::Uuid;

pub struct UpdateService;

impl UpdateService {
    /// All updates, newest first
    pub async fn list_updates(records: &dyn RecordStore) -> Result<Vec<Update>, GalleryError> {
        records.list_updates().await
    }

    pub async fn create_update(
        records: &dyn RecordStore,
        req: CreateUpdateRequest,
    ) -> Result<Update, GalleryError> {
        let update = Update::new(req)?;
        records.insert_update(&update).await?;
        log::info!("Update {} posted: {}", update.id, update.title);
        Ok(update)
    }

    /// Delete by id; unknown ids are not an error
    pub async fn delete_update(records: &dyn RecordStore, id: Uuid) -> Result<(), GalleryError> {
        if records.delete_update(id).await? {
            log::info!("Update {} deleted", id);
        } else {
            log::debug!("Delete of unknown update {}", id);
        }
        Ok(())
    }
}

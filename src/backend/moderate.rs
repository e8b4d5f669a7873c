use log::{error, info, warn};

use super::api::{GalleryItem, ModerationAction, ModerationRequest, ModerationResponse};
use super::error::ApiError;
use super::store::{Filter, PumpkinStore};
use super::Backend;

impl<S: PumpkinStore> Backend<S> {
    /// Approve (make visible) or reject (delete) a pending pumpkin.
    pub fn moderate(&self, request: &ModerationRequest) -> Result<ModerationResponse, ApiError> {
        if request.admin_password != self.config.admin_password {
            warn!("Moderation attempt with wrong password");
            return Err(ApiError::WrongPassword);
        }

        let action: ModerationAction = request.action.parse()?;

        let id = match request.pumpkin_id {
            Some(id) if id != 0 => id,
            _ => return Err(ApiError::MissingId),
        };

        let rows = match action {
            ModerationAction::Approve => self.store.update_visible(&Filter::Id(id), true),
            ModerationAction::Reject => self.store.delete(&Filter::Id(id)),
        }
        .map_err(|e| {
            error!("{} of pumpkin {id} failed: {e}", action.as_str());
            ApiError::Storage(e)
        })?;

        info!("Pumpkin {id}: {} ({} rows)", action.as_str(), rows.len());

        Ok(ModerationResponse {
            success: true,
            data: rows,
        })
    }

    /// Pumpkins with the given visibility, newest first
    pub fn list(&self, visible: bool) -> Result<Vec<GalleryItem>, ApiError> {
        let rows = self.store.select(&Filter::Visible(visible))?;
        Ok(rows.into_iter().map(GalleryItem::from).collect())
    }
}

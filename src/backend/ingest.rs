use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use log::{error, info, warn};

use super::api::{Origin, SubmitRequest, SubmitResponse};
use super::error::ApiError;
use super::store::{Filter, NewPumpkin, PumpkinStore};
use super::Backend;

/// Client ids shorter than this are rejected
pub const MIN_USER_ID_LEN: usize = 10;

/// Largest accepted data URL, in characters (about 5MB of image)
pub const MAX_IMAGE_CHARS: usize = 7_000_000;

/// Image types accepted after `data:image/`
pub const IMAGE_FORMATS: [&str; 5] = ["png", "jpeg", "jpg", "gif", "webp"];

/// Tolerant base64, as browsers decode it: padding optional, trailing bits ignored
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Check a submission without touching storage.
///
/// Order matters: the first failing rule is the one reported.
pub fn validate_submission(request: &SubmitRequest) -> Result<(), ApiError> {
    if request.user_id.chars().count() < MIN_USER_ID_LEN {
        return Err(ApiError::InvalidUser);
    }
    if !has_image_prefix(&request.image_data) {
        return Err(ApiError::InvalidImageFormat);
    }
    if request.image_data.chars().count() > MAX_IMAGE_CHARS {
        return Err(ApiError::ImageTooLarge);
    }
    if !payload_decodes(&request.image_data) {
        return Err(ApiError::CorruptImage);
    }
    Ok(())
}

/// `data:image/<format>;base64,` with one of [`IMAGE_FORMATS`]
pub fn has_image_prefix(data: &str) -> bool {
    data.strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .is_some_and(|(format, _)| IMAGE_FORMATS.contains(&format))
}

/// The text between the first and second comma must be valid base64
fn payload_decodes(data: &str) -> bool {
    let encoded: String = data
        .split(',')
        .nth(1)
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    LENIENT.decode(encoded).is_ok()
}

impl<S: PumpkinStore> Backend<S> {
    /// Validate, check the per-client and per-IP quota, then store the
    /// pumpkin hidden until moderated.
    pub fn submit(&self, request: &SubmitRequest, origin: &Origin) -> Result<SubmitResponse, ApiError> {
        if let Err(e) = validate_submission(request) {
            warn!("Rejected submission from {}: {e}", request.user_id);
            return Err(e);
        }

        let ip = origin.client_ip();
        let quota = self.config.max_per_client;

        let user_count = self
            .store
            .count(&Filter::UserId(request.user_id.clone()))
            .map_err(|e| {
                error!("Counting rows by user id failed: {e}");
                ApiError::UserCount(e)
            })?;

        let ip_count = self.store.count(&Filter::UserIp(ip.clone())).map_err(|e| {
            error!("Counting rows by IP failed: {e}");
            ApiError::IpCount(e)
        })?;

        if user_count >= quota || ip_count >= quota {
            warn!("Quota reached for user {} / ip {ip}", request.user_id);
            return Err(ApiError::QuotaExceeded(quota));
        }

        let row = self
            .store
            .insert(NewPumpkin {
                img: request.image_data.clone(),
                visible: false,
                user_id: request.user_id.clone(),
                user_ip: ip,
                created_at: chrono::Utc::now().to_rfc3339(),
            })
            .map_err(|e| {
                error!("Inserting pumpkin failed: {e}");
                ApiError::Insert(e)
            })?;

        info!("Stored pumpkin {} pending moderation", row.id);

        Ok(SubmitResponse {
            success: true,
            data: vec![row],
            remaining: quota.saturating_sub(1 + user_count.max(ip_count)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(image_data: &str) -> SubmitRequest {
        SubmitRequest {
            image_data: image_data.to_string(),
            user_id: "4b0c0a3e-3f4f-4c1e-9d1b-6a1f2c3d4e5f".to_string(),
        }
    }

    #[test]
    fn test_accepts_png_data_url() {
        assert!(validate_submission(&request("data:image/png;base64,iVBORw0KGgo=")).is_ok());
    }

    #[test]
    fn test_prefix_formats() {
        for format in IMAGE_FORMATS {
            assert!(has_image_prefix(&format!("data:image/{format};base64,AAAA")));
        }
        assert!(!has_image_prefix("data:image/svg+xml;base64,AAAA"));
        assert!(!has_image_prefix("data:text/plain;base64,AAAA"));
        assert!(!has_image_prefix("image/png;base64,AAAA"));
        assert!(!has_image_prefix("data:image/png,AAAA"));
    }

    #[test]
    fn test_short_user_id_checked_first() {
        let mut req = request("not an image");
        req.user_id = "short".to_string();
        assert!(matches!(validate_submission(&req), Err(ApiError::InvalidUser)));
    }

    #[test]
    fn test_oversized_payload() {
        let mut data = String::from("data:image/png;base64,");
        data.push_str(&"A".repeat(MAX_IMAGE_CHARS));
        assert!(matches!(validate_submission(&request(&data)), Err(ApiError::ImageTooLarge)));
    }

    #[test]
    fn test_corrupt_base64() {
        assert!(matches!(
            validate_submission(&request("data:image/png;base64,@@@@")),
            Err(ApiError::CorruptImage)
        ));
    }

    #[test]
    fn test_unpadded_base64_is_accepted() {
        assert!(validate_submission(&request("data:image/png;base64,iVBORw0KGgo")).is_ok());
    }
}

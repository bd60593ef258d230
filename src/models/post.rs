use super::{require_min_chars, UserResponse};
use crate::entities::image;
use crate::error::AppError;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const TITLE_MIN: usize = 10;
pub const DESCRIPTION_MIN: usize = 10;

/// Image payload; `data` is base64 encoded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImagePayload {
    /// Identifies an existing image on update; ignored on create.
    #[serde(default)]
    pub id: Option<i32>,
    #[schema(example = "cat.png")]
    pub name: String,
    pub data: String,
}

impl ImagePayload {
    pub fn decode(&self) -> Result<Vec<u8>, AppError> {
        B64.decode(&self.data)
            .map_err(|_| AppError::validation(format!("Image {} is not valid base64", self.name)))
    }

    pub fn decode_image(&self) -> Result<DecodedImage, AppError> {
        Ok(DecodedImage {
            id: self.id,
            name: self.name.clone(),
            data: self.decode()?,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostRequest {
    #[schema(example = "I have questions")]
    pub title: String,
    #[schema(example = "This is a mediator entity")]
    pub description: String,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

impl PostRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_min_chars("Title", &self.title, TITLE_MIN)?;
        require_min_chars("Description", &self.description, DESCRIPTION_MIN)
    }

    /// Decodes every image up front so a bad payload fails before any write.
    pub fn decoded_images(&self) -> Result<Vec<DecodedImage>, AppError> {
        self.images.iter().map(ImagePayload::decode_image).collect()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachImagesRequest {
    pub images: Vec<ImagePayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImagesRequest {
    pub image_ids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub id: Option<i32>,
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageResponse {
    pub id: i32,
    pub name: String,
    pub data: String,
}

impl From<image::Model> for ImageResponse {
    fn from(image: image::Model) -> Self {
        ImageResponse {
            id: image.id,
            name: image.name,
            data: B64.encode(image.data),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub author: UserResponse,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub images: Vec<ImageResponse>,
}

use super::require_min_chars;
use crate::entities::message;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MESSAGE_MIN: usize = 2;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub receiver_id: i32,
    #[schema(example = "Hello, how are you?")]
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMessageRequest {
    pub text: String,
}

pub fn validate_message_text(text: &str) -> Result<(), AppError> {
    require_min_chars("Text", text, MESSAGE_MIN)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<message::Model> for MessageResponse {
    fn from(message: message::Model) -> Self {
        MessageResponse {
            id: message.id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            text: message.text,
            created_at: message.created_at,
        }
    }
}

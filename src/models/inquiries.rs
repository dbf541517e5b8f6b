use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: String,
    pub text: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Clone, Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatInquiry {
    pub id: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub customer_contact: Option<String>,
    pub summary: String,
    pub full_history: Json<Vec<ChatMessage>>,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInquiry {
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub customer_contact: Option<String>,
    pub summary: String,
    pub full_history: Vec<ChatMessage>,
}

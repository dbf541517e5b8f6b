use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, Deserialize, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: String,
    pub sale_id: Option<String>,
    pub amount_in_cents: i64,
    pub qr_copy_paste: String,
    pub qr_image_url: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCharge {
    pub amount_in_cents: i64,
    pub tx_id: Option<String>,
}

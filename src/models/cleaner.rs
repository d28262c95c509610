use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const PAY_MODEL_HOURLY: &str = "hourly";
pub const PAY_MODEL_PERCENTAGE: &str = "percentage";

// Both rates are stored; `pay_model` selects which one applies when a
// booking's cleaner pay is derived.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Cleaner {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pay_model: String,
    pub hourly_rate: Decimal,
    pub percentage: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

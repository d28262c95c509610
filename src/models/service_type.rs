use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Active service/cleaning-type labels and their dashboard display colors.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ServiceType {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Catalog entry plus the clean/dirty counters. The counters are mutated
/// outside this service (when jobs complete and laundry comes back); here
/// they are only read as a snapshot for the reservation check.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct LinenProduct {
    pub id: Uuid,
    pub name: String,
    pub clean_quantity: i32,
    pub dirty_quantity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One (product, quantity) pair inside a booking's linen-usage list.
/// Owned by the booking row as JSONB; never queried on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinenUsageItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
}

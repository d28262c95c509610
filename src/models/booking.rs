use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::linen::LinenUsageItem;

pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

pub const PAYMENT_UNPAID: &str = "unpaid";
pub const PAYMENT_PAID: &str = "paid";
pub const PAYMENT_REFUNDED: &str = "refunded";

pub const PAYMENT_METHODS: &[&str] = &["cash", "card", "bank_transfer", "invoice"];
pub const PAYMENT_STATUSES: &[&str] = &[PAYMENT_UNPAID, PAYMENT_PAID, PAYMENT_REFUNDED];
pub const BOOKING_STATUSES: &[&str] = &[STATUS_SCHEDULED, STATUS_COMPLETED, STATUS_CANCELLED];

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub cleaner_id: Option<Uuid>,
    pub scheduled_at: NaiveDateTime,
    pub address: String,
    pub service_type: String,
    pub cleaning_types: Json<Vec<String>>,
    pub hours: Option<Decimal>,
    pub cost_per_hour: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    pub total_cost: Decimal,
    // True once the operator has typed a total by hand; hour edits no longer
    // recompute it until the rate changes or the override is cleared.
    pub manual_total: bool,
    pub cleaner_pay: Decimal,
    pub payment_method: String,
    pub payment_status: String,
    pub linen_usage: Json<Vec<LinenUsageItem>>,
    pub notes: Option<String>,
    pub access_details: Option<String>,
    pub status: String,
    pub invoice_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Joined projection for the list view: customer/cleaner names come along so
// the dashboard table renders without follow-up lookups.
#[derive(Debug, Serialize, FromRow)]
pub struct BookingListRow {
    pub id: Uuid,
    pub customer_name: String,
    pub cleaner_name: Option<String>,
    pub scheduled_at: NaiveDateTime,
    pub address: String,
    pub service_type: String,
    pub total_cost: Decimal,
    pub payment_status: String,
    pub status: String,
}

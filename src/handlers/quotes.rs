use axum::{extract::State, Json};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json as Jsonb;
use uuid::Uuid;

use crate::{
    error::{ServiceError, ServiceResult},
    models::{
        booking::{PAYMENT_UNPAID, STATUS_SCHEDULED},
        Booking, LinenUsageItem,
    },
    pricing::{self, EndOfTenancySelection},
    AppState,
};

pub const END_OF_TENANCY: &str = "end_of_tenancy";

#[derive(Serialize)]
pub struct QuoteResponse {
    pub total: i64,
}

#[derive(Deserialize)]
pub struct EndOfTenancyBookingPayload {
    pub customer_id: Uuid,
    pub address: String,
    pub scheduled_at: NaiveDateTime,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub selection: EndOfTenancySelection,
}

// Price a wizard selection without persisting anything.
pub async fn quote_end_of_tenancy(
    Json(selection): Json<EndOfTenancySelection>,
) -> Json<QuoteResponse> {
    Json(QuoteResponse {
        total: pricing::quote(&selection),
    })
}

// Flatten the wizard selection into a booking. The quoted package price is
// not hours-derived, so it lands as a manual total.
pub async fn create_end_of_tenancy_booking(
    State(state): State<AppState>,
    Json(payload): Json<EndOfTenancyBookingPayload>,
) -> ServiceResult<Json<Booking>> {
    if payload.address.trim().is_empty() {
        return Err(ServiceError::Validation("address is required".into()));
    }

    let total = Decimal::from(pricing::quote(&payload.selection));

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (
            customer_id, scheduled_at, address, service_type, cleaning_types,
            total_cost, manual_total, cleaner_pay, payment_method, payment_status,
            linen_usage, notes, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(payload.customer_id)
    .bind(payload.scheduled_at)
    .bind(&payload.address)
    .bind(END_OF_TENANCY)
    .bind(Jsonb(Vec::<String>::new()))
    .bind(total)
    .bind(true)
    .bind(Decimal::ZERO)
    .bind(payload.payment_method.as_deref().unwrap_or("bank_transfer"))
    .bind(PAYMENT_UNPAID)
    .bind(Jsonb(Vec::<LinenUsageItem>::new()))
    .bind(&payload.notes)
    .bind(STATUS_SCHEDULED)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(booking))
}

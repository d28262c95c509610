use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json as Jsonb;
use sqlx::{Postgres, QueryBuilder};
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    costing::{CostSheet, Discount, PayModel},
    database::Database,
    error::{ServiceError, ServiceResult},
    models::{
        booking::{BOOKING_STATUSES, PAYMENT_METHODS, PAYMENT_STATUSES, PAYMENT_UNPAID, STATUS_CANCELLED, STATUS_SCHEDULED},
        Booking, BookingListRow, Cleaner, LinenProduct, LinenUsageItem,
    },
    stock, AppState,
};

#[derive(Deserialize)]
pub struct BookingFilters {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub customer_id: Option<Uuid>,
    pub cleaner_id: Option<Uuid>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Deserialize)]
pub struct BookingPayload {
    pub customer_id: Uuid,
    pub cleaner_id: Option<Uuid>,
    pub scheduled_at: NaiveDateTime,
    pub address: String,
    pub service_type: String,
    #[serde(default)]
    pub cleaning_types: Vec<String>,
    pub hours: Option<Decimal>,
    pub cost_per_hour: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    // Present and different from the derived figure = manual override.
    pub total_cost: Option<Decimal>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub notes: Option<String>,
    pub access_details: Option<String>,
}

#[derive(Deserialize)]
pub struct AssignCleanerPayload {
    pub cleaner_id: Uuid,
}

#[derive(Deserialize)]
pub struct DuplicatePayload {
    pub scheduled_at: NaiveDateTime,
}

#[derive(Deserialize)]
pub struct PaymentStatusPayload {
    pub payment_status: String,
}

#[derive(Deserialize)]
pub struct LinenDeltaPayload {
    pub product_id: Uuid,
    pub delta: i32,
}

#[derive(Deserialize)]
pub struct AirbnbBulkPayload {
    pub customer_id: Uuid,
    pub cleaner_id: Option<Uuid>,
    pub address: String,
    pub scheduled_dates: Vec<NaiveDateTime>,
    pub hours: Decimal,
    pub cost_per_hour: Decimal,
    #[serde(default)]
    pub cleaning_types: Vec<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct BulkEditPayload {
    pub booking_ids: Vec<Uuid>,
    pub field: String,
    pub value: serde_json::Value,
}

#[derive(Serialize)]
pub struct BulkOutcome {
    pub created: usize,
    pub failed: usize,
}

#[derive(Serialize)]
pub struct BulkEditOutcome {
    pub updated: usize,
    pub failed: usize,
}

pub(super) async fn load_booking(db: &Database, id: Uuid) -> ServiceResult<Booking> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(ServiceError::NotFound("booking"))
}

async fn load_cleaner(db: &Database, id: Uuid) -> ServiceResult<Cleaner> {
    sqlx::query_as::<_, Cleaner>("SELECT * FROM cleaners WHERE id = $1 AND is_active = true")
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(ServiceError::NotFound("cleaner"))
}

async fn cleaner_pay_for(
    db: &Database,
    cleaner_id: Option<Uuid>,
    sheet: &CostSheet,
) -> ServiceResult<Decimal> {
    match cleaner_id {
        Some(id) => {
            let cleaner = load_cleaner(db, id).await?;
            Ok(sheet.cleaner_pay(PayModel::for_cleaner(&cleaner)))
        }
        None => Ok(Decimal::ZERO),
    }
}

fn validate_payload(payload: &BookingPayload) -> ServiceResult<()> {
    if payload.address.trim().is_empty() {
        return Err(ServiceError::Validation("address is required".into()));
    }
    if payload.service_type.trim().is_empty() {
        return Err(ServiceError::Validation("service type is required".into()));
    }
    if payload.hours.is_some_and(|h| h < Decimal::ZERO) {
        return Err(ServiceError::Validation("hours cannot be negative".into()));
    }
    if payload.cost_per_hour.is_some_and(|r| r < Decimal::ZERO) {
        return Err(ServiceError::Validation("hourly rate cannot be negative".into()));
    }
    if payload
        .discount_percent
        .is_some_and(|p| p < Decimal::ZERO || p > Decimal::ONE_HUNDRED)
    {
        return Err(ServiceError::Validation(
            "discount percentage must be between 0 and 100".into(),
        ));
    }
    if let Some(method) = payload.payment_method.as_deref() {
        if !PAYMENT_METHODS.contains(&method) {
            return Err(ServiceError::Validation(format!(
                "unknown payment method: {method}"
            )));
        }
    }
    if let Some(status) = payload.payment_status.as_deref() {
        if !PAYMENT_STATUSES.contains(&status) {
            return Err(ServiceError::Validation(format!(
                "unknown payment status: {status}"
            )));
        }
    }
    Ok(())
}

fn sheet_from_payload(payload: &BookingPayload) -> CostSheet {
    let sheet = CostSheet::new(
        payload.hours.unwrap_or(Decimal::ZERO),
        payload.cost_per_hour.unwrap_or(Decimal::ZERO),
        Discount::from_fields(payload.discount_amount, payload.discount_percent),
    );
    match payload.total_cost {
        Some(total) if total != sheet.total_cost => sheet.with_manual_total(total),
        _ => sheet,
    }
}

fn sheet_from_booking(booking: &Booking) -> CostSheet {
    CostSheet::restore(
        booking.hours.unwrap_or(Decimal::ZERO),
        booking.cost_per_hour.unwrap_or(Decimal::ZERO),
        Discount::from_fields(booking.discount_amount, booking.discount_percent),
        booking.total_cost,
        booking.manual_total,
    )
}

fn parse_filter_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|s| {
        if s.is_empty() {
            None
        } else {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
        }
    })
}

// Bookings list with optional filters and pagination, newest first.
pub async fn bookings_list(
    State(state): State<AppState>,
    Query(filters): Query<BookingFilters>,
) -> ServiceResult<Json<Vec<BookingListRow>>> {
    let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
        r#"
        SELECT
            b.id,
            c.name AS customer_name,
            cl.name AS cleaner_name,
            b.scheduled_at,
            b.address,
            b.service_type,
            b.total_cost,
            b.payment_status,
            b.status
        FROM bookings b
        JOIN customers c ON b.customer_id = c.id
        LEFT JOIN cleaners cl ON b.cleaner_id = cl.id
        WHERE 1 = 1
        "#,
    );

    if let Some(status) = &filters.status {
        query_builder.push(" AND b.status = ");
        query_builder.push_bind(status.clone());
    }
    if let Some(payment_status) = &filters.payment_status {
        query_builder.push(" AND b.payment_status = ");
        query_builder.push_bind(payment_status.clone());
    }
    if let Some(customer_id) = filters.customer_id {
        query_builder.push(" AND b.customer_id = ");
        query_builder.push_bind(customer_id);
    }
    if let Some(cleaner_id) = filters.cleaner_id {
        query_builder.push(" AND b.cleaner_id = ");
        query_builder.push_bind(cleaner_id);
    }
    if let Some(date) = parse_filter_date(filters.date_from.as_deref()) {
        query_builder.push(" AND b.scheduled_at::date >= ");
        query_builder.push_bind(date);
    }
    if let Some(date) = parse_filter_date(filters.date_to.as_deref()) {
        query_builder.push(" AND b.scheduled_at::date <= ");
        query_builder.push_bind(date);
    }

    query_builder.push(" ORDER BY b.scheduled_at DESC");
    query_builder.push(" LIMIT ");
    query_builder.push_bind(filters.limit.unwrap_or(50).clamp(1, 200));
    query_builder.push(" OFFSET ");
    query_builder.push_bind(filters.offset.unwrap_or(0).max(0));

    let rows = query_builder
        .build_query_as::<BookingListRow>()
        .fetch_all(&state.db)
        .await?;

    Ok(Json(rows))
}

pub async fn booking_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ServiceResult<Json<Booking>> {
    let booking = load_booking(&state.db, id).await?;
    Ok(Json(booking))
}

pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<BookingPayload>,
) -> ServiceResult<Json<Booking>> {
    validate_payload(&payload)?;

    let sheet = sheet_from_payload(&payload);
    let cleaner_pay = cleaner_pay_for(&state.db, payload.cleaner_id, &sheet).await?;

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (
            customer_id, cleaner_id, scheduled_at, address, service_type,
            cleaning_types, hours, cost_per_hour, discount_amount, discount_percent,
            total_cost, manual_total, cleaner_pay, payment_method, payment_status,
            linen_usage, notes, access_details, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
        RETURNING *
        "#,
    )
    .bind(payload.customer_id)
    .bind(payload.cleaner_id)
    .bind(payload.scheduled_at)
    .bind(&payload.address)
    .bind(&payload.service_type)
    .bind(Jsonb(&payload.cleaning_types))
    .bind(payload.hours)
    .bind(payload.cost_per_hour)
    .bind(payload.discount_amount)
    .bind(payload.discount_percent)
    .bind(sheet.total_cost)
    .bind(sheet.manual_total)
    .bind(cleaner_pay)
    .bind(payload.payment_method.as_deref().unwrap_or("cash"))
    .bind(payload.payment_status.as_deref().unwrap_or(PAYMENT_UNPAID))
    .bind(Jsonb(Vec::<LinenUsageItem>::new()))
    .bind(&payload.notes)
    .bind(&payload.access_details)
    .bind(STATUS_SCHEDULED)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(booking))
}

// Full edit. The cost sheet is restored from the stored row so the manual
// override keeps its meaning: hour and discount edits leave a hand-typed
// total in place, a rate change resumes auto-derivation.
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BookingPayload>,
) -> ServiceResult<Json<Booking>> {
    validate_payload(&payload)?;

    let existing = load_booking(&state.db, id).await?;

    let mut sheet = sheet_from_booking(&existing);
    if let Some(rate) = payload.cost_per_hour {
        if existing.cost_per_hour != Some(rate) {
            sheet = sheet.with_rate(rate);
        }
    }
    if let Some(hours) = payload.hours {
        sheet = sheet.with_hours(hours);
    }
    sheet = sheet.with_discount(Discount::from_fields(
        payload.discount_amount,
        payload.discount_percent,
    ));
    if let Some(total) = payload.total_cost {
        if total != sheet.total_cost {
            sheet = sheet.with_manual_total(total);
        }
    }

    let cleaner_pay = cleaner_pay_for(&state.db, payload.cleaner_id, &sheet).await?;

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings SET
            customer_id = $2, cleaner_id = $3, scheduled_at = $4, address = $5,
            service_type = $6, cleaning_types = $7, hours = $8, cost_per_hour = $9,
            discount_amount = $10, discount_percent = $11, total_cost = $12,
            manual_total = $13, cleaner_pay = $14, payment_method = $15,
            payment_status = $16, notes = $17, access_details = $18, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.customer_id)
    .bind(payload.cleaner_id)
    .bind(payload.scheduled_at)
    .bind(&payload.address)
    .bind(&payload.service_type)
    .bind(Jsonb(&payload.cleaning_types))
    .bind(payload.hours)
    .bind(payload.cost_per_hour)
    .bind(payload.discount_amount)
    .bind(payload.discount_percent)
    .bind(sheet.total_cost)
    .bind(sheet.manual_total)
    .bind(cleaner_pay)
    .bind(payload.payment_method.as_deref().unwrap_or(existing.payment_method.as_str()))
    .bind(payload.payment_status.as_deref().unwrap_or(existing.payment_status.as_str()))
    .bind(&payload.notes)
    .bind(&payload.access_details)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(booking))
}

pub async fn assign_cleaner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignCleanerPayload>,
) -> ServiceResult<Json<Booking>> {
    let booking = load_booking(&state.db, id).await?;
    let cleaner = load_cleaner(&state.db, payload.cleaner_id).await?;

    let sheet = sheet_from_booking(&booking);
    let cleaner_pay = sheet.cleaner_pay(PayModel::for_cleaner(&cleaner));

    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET cleaner_id = $2, cleaner_pay = $3, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(cleaner.id)
    .bind(cleaner_pay)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(booking))
}

// Copy a booking to a new date. Payment state starts over and any dispatched
// invoice stays with the original.
pub async fn duplicate_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DuplicatePayload>,
) -> ServiceResult<Json<Booking>> {
    let source = load_booking(&state.db, id).await?;

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (
            customer_id, cleaner_id, scheduled_at, address, service_type,
            cleaning_types, hours, cost_per_hour, discount_amount, discount_percent,
            total_cost, manual_total, cleaner_pay, payment_method, payment_status,
            linen_usage, notes, access_details, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
        RETURNING *
        "#,
    )
    .bind(source.customer_id)
    .bind(source.cleaner_id)
    .bind(payload.scheduled_at)
    .bind(&source.address)
    .bind(&source.service_type)
    .bind(&source.cleaning_types)
    .bind(source.hours)
    .bind(source.cost_per_hour)
    .bind(source.discount_amount)
    .bind(source.discount_percent)
    .bind(source.total_cost)
    .bind(source.manual_total)
    .bind(source.cleaner_pay)
    .bind(&source.payment_method)
    .bind(PAYMENT_UNPAID)
    .bind(&source.linen_usage)
    .bind(&source.notes)
    .bind(&source.access_details)
    .bind(STATUS_SCHEDULED)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(booking))
}

// Soft delete: the booking stays on record as cancelled.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ServiceResult<Json<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(STATUS_CANCELLED)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ServiceError::NotFound("booking"))?;

    Ok(Json(booking))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ServiceResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound("booking"));
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn set_payment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentStatusPayload>,
) -> ServiceResult<Json<Booking>> {
    if !PAYMENT_STATUSES.contains(&payload.payment_status.as_str()) {
        return Err(ServiceError::Validation(format!(
            "unknown payment status: {}",
            payload.payment_status
        )));
    }

    let booking = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET payment_status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&payload.payment_status)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ServiceError::NotFound("booking"))?;

    Ok(Json(booking))
}

// Apply a linen quantity delta against the current clean-stock snapshot.
// The check is not a reservation; concurrent sessions read their own
// snapshots and last write wins, as in the dashboard this replaces.
pub async fn adjust_linen(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinenDeltaPayload>,
) -> ServiceResult<Json<Vec<LinenUsageItem>>> {
    let booking = load_booking(&state.db, id).await?;

    let product = sqlx::query_as::<_, LinenProduct>("SELECT * FROM linen_products WHERE id = $1")
        .bind(payload.product_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(ServiceError::NotFound("linen product"))?;

    let mut usage = booking.linen_usage.0;
    stock::apply_delta(
        &mut usage,
        product.id,
        &product.name,
        payload.delta,
        product.clean_quantity,
    )?;

    sqlx::query("UPDATE bookings SET linen_usage = $2, updated_at = NOW() WHERE id = $1")
        .bind(id)
        .bind(Jsonb(&usage))
        .execute(&state.db)
        .await?;

    Ok(Json(usage))
}

fn validate_airbnb_dates(dates: &[NaiveDateTime]) -> ServiceResult<()> {
    if dates.is_empty() {
        return Err(ServiceError::Validation(
            "at least one scheduled date is required".into(),
        ));
    }
    let mut seen = HashSet::new();
    for date in dates {
        if !seen.insert(date) {
            return Err(ServiceError::Validation(
                "scheduled dates must be distinct".into(),
            ));
        }
    }
    Ok(())
}

// One wizard submission fans out into N bookings sharing everything but the
// date. Inserts run concurrently; failures are counted, the successful
// subset stands.
pub async fn bulk_create_airbnb(
    State(state): State<AppState>,
    Json(payload): Json<AirbnbBulkPayload>,
) -> ServiceResult<Json<BulkOutcome>> {
    validate_airbnb_dates(&payload.scheduled_dates)?;
    if payload.address.trim().is_empty() {
        return Err(ServiceError::Validation("address is required".into()));
    }
    if payload.hours < Decimal::ZERO || payload.cost_per_hour < Decimal::ZERO {
        return Err(ServiceError::Validation(
            "hours and hourly rate cannot be negative".into(),
        ));
    }

    let sheet = CostSheet::new(payload.hours, payload.cost_per_hour, Discount::None);
    let cleaner_pay = cleaner_pay_for(&state.db, payload.cleaner_id, &sheet).await?;

    let inserts = payload.scheduled_dates.iter().map(|scheduled_at| {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                customer_id, cleaner_id, scheduled_at, address, service_type,
                cleaning_types, hours, cost_per_hour, total_cost, manual_total,
                cleaner_pay, payment_method, payment_status, linen_usage, notes, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(payload.customer_id)
        .bind(payload.cleaner_id)
        .bind(scheduled_at)
        .bind(&payload.address)
        .bind("airbnb")
        .bind(Jsonb(&payload.cleaning_types))
        .bind(payload.hours)
        .bind(payload.cost_per_hour)
        .bind(sheet.total_cost)
        .bind(false)
        .bind(cleaner_pay)
        .bind(payload.payment_method.as_deref().unwrap_or("invoice"))
        .bind(PAYMENT_UNPAID)
        .bind(Jsonb(Vec::<LinenUsageItem>::new()))
        .bind(&payload.notes)
        .bind(STATUS_SCHEDULED)
        .execute(&state.db)
    });

    let results = join_all(inserts).await;
    let created = results.iter().filter(|result| result.is_ok()).count();
    let failed = results.len() - created;
    for result in &results {
        if let Err(err) = result {
            log::warn!("bulk airbnb insert failed: {err}");
        }
    }

    Ok(Json(BulkOutcome { created, failed }))
}

enum BulkEdit {
    Status(String),
    PaymentStatus(String),
    Cleaner(Option<Uuid>),
}

// The bulk-editable fields are a closed set; anything else is rejected
// before a single row is touched.
fn parse_bulk_edit(field: &str, value: &serde_json::Value) -> ServiceResult<BulkEdit> {
    match field {
        "status" => {
            let status = value
                .as_str()
                .filter(|s| BOOKING_STATUSES.contains(s))
                .ok_or_else(|| ServiceError::Validation(format!("invalid status: {value}")))?;
            Ok(BulkEdit::Status(status.to_string()))
        }
        "payment_status" => {
            let status = value
                .as_str()
                .filter(|s| PAYMENT_STATUSES.contains(s))
                .ok_or_else(|| {
                    ServiceError::Validation(format!("invalid payment status: {value}"))
                })?;
            Ok(BulkEdit::PaymentStatus(status.to_string()))
        }
        "cleaner_id" => {
            if value.is_null() {
                return Ok(BulkEdit::Cleaner(None));
            }
            let id = value
                .as_str()
                .and_then(|s| Uuid::parse_str(s).ok())
                .ok_or_else(|| ServiceError::Validation(format!("invalid cleaner id: {value}")))?;
            Ok(BulkEdit::Cleaner(Some(id)))
        }
        other => Err(ServiceError::Validation(format!(
            "field is not bulk-editable: {other}"
        ))),
    }
}

pub async fn bulk_edit(
    State(state): State<AppState>,
    Json(payload): Json<BulkEditPayload>,
) -> ServiceResult<Json<BulkEditOutcome>> {
    if payload.booking_ids.is_empty() {
        return Err(ServiceError::Validation(
            "at least one booking id is required".into(),
        ));
    }
    let edit = parse_bulk_edit(&payload.field, &payload.value)?;

    let updates = payload.booking_ids.iter().map(|booking_id| {
        let query = match &edit {
            BulkEdit::Status(status) => sqlx::query(
                "UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(*booking_id)
            .bind(status.clone()),
            BulkEdit::PaymentStatus(status) => sqlx::query(
                "UPDATE bookings SET payment_status = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(*booking_id)
            .bind(status.clone()),
            BulkEdit::Cleaner(cleaner_id) => sqlx::query(
                "UPDATE bookings SET cleaner_id = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(*booking_id)
            .bind(*cleaner_id),
        };
        query.execute(&state.db)
    });

    let results = join_all(updates).await;
    let updated = results
        .iter()
        .filter(|result| matches!(result, Ok(done) if done.rows_affected() > 0))
        .count();
    let failed = results.len() - updated;
    for result in &results {
        if let Err(err) = result {
            log::warn!("bulk edit failed: {err}");
        }
    }

    Ok(Json(BulkEditOutcome { updated, failed }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn payload() -> BookingPayload {
        BookingPayload {
            customer_id: Uuid::new_v4(),
            cleaner_id: None,
            scheduled_at: at(2, 10),
            address: "12 Harbour Lane".into(),
            service_type: "domestic".into(),
            cleaning_types: vec!["deep".into()],
            hours: Some(Decimal::from(3)),
            cost_per_hour: Some(Decimal::from(18)),
            discount_amount: None,
            discount_percent: None,
            total_cost: None,
            payment_method: None,
            payment_status: None,
            notes: None,
            access_details: None,
        }
    }

    #[test]
    fn payload_without_override_derives_the_total() {
        let sheet = sheet_from_payload(&payload());
        assert!(!sheet.manual_total);
        assert_eq!(sheet.total_cost, Decimal::from(54));
    }

    #[test]
    fn payload_total_differing_from_derived_is_manual() {
        let mut p = payload();
        p.total_cost = Some(Decimal::from(60));
        let sheet = sheet_from_payload(&p);
        assert!(sheet.manual_total);
        assert_eq!(sheet.total_cost, Decimal::from(60));
    }

    #[test]
    fn payload_total_equal_to_derived_stays_automatic() {
        let mut p = payload();
        p.total_cost = Some(Decimal::from(54));
        assert!(!sheet_from_payload(&p).manual_total);
    }

    #[test]
    fn validation_rejects_blank_address_and_bad_enums() {
        let mut p = payload();
        p.address = "  ".into();
        assert!(validate_payload(&p).is_err());

        let mut p = payload();
        p.payment_method = Some("barter".into());
        assert!(validate_payload(&p).is_err());

        let mut p = payload();
        p.discount_percent = Some(Decimal::from(150));
        assert!(validate_payload(&p).is_err());

        assert!(validate_payload(&payload()).is_ok());
    }

    #[test]
    fn airbnb_dates_must_be_present_and_distinct() {
        assert!(validate_airbnb_dates(&[]).is_err());
        assert!(validate_airbnb_dates(&[at(1, 10), at(1, 10)]).is_err());
        assert!(validate_airbnb_dates(&[at(1, 10), at(2, 10), at(3, 10)]).is_ok());
    }

    #[test]
    fn bulk_edit_fields_are_a_closed_set() {
        assert!(parse_bulk_edit("status", &serde_json::json!("completed")).is_ok());
        assert!(parse_bulk_edit("status", &serde_json::json!("vanished")).is_err());
        assert!(parse_bulk_edit("payment_status", &serde_json::json!("paid")).is_ok());
        assert!(matches!(
            parse_bulk_edit("cleaner_id", &serde_json::Value::Null),
            Ok(BulkEdit::Cleaner(None))
        ));
        assert!(parse_bulk_edit("total_cost", &serde_json::json!(0)).is_err());
    }

    #[test]
    fn filter_dates_parse_or_fall_away() {
        assert_eq!(
            parse_filter_date(Some("2026-03-02")),
            NaiveDate::from_ymd_opt(2026, 3, 2)
        );
        assert_eq!(parse_filter_date(Some("")), None);
        assert_eq!(parse_filter_date(Some("not-a-date")), None);
        assert_eq!(parse_filter_date(None), None);
    }
}

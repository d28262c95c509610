use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    clients::ClientError,
    error::{ServiceError, ServiceResult},
    models::{Booking, Customer},
    AppState,
};

use super::bookings::load_booking;

#[derive(Serialize)]
pub struct InvoiceResponse {
    pub invoice_id: String,
}

#[derive(Serialize)]
pub struct PaymentLinkResponse {
    pub url: String,
}

#[derive(Serialize)]
pub struct SentResponse {
    pub sent: bool,
}

fn upstream(service: &'static str) -> impl FnOnce(ClientError) -> ServiceError {
    move |err| {
        log::error!("{service} call failed: {err}");
        ServiceError::Upstream { service }
    }
}

async fn load_customer_with_email(
    db: &crate::database::Database,
    booking: &Booking,
) -> ServiceResult<(Customer, String)> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
        .bind(booking.customer_id)
        .fetch_optional(db)
        .await?
        .ok_or(ServiceError::NotFound("customer"))?;

    let email = customer
        .email
        .clone()
        .filter(|email| !email.is_empty())
        .ok_or_else(|| {
            ServiceError::Validation("customer has no email address on record".into())
        })?;

    Ok((customer, email))
}

// Create + send an invoice through the third-party API, then record the
// provider's id on the booking and flip the payment method over.
pub async fn send_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ServiceResult<Json<InvoiceResponse>> {
    let booking = load_booking(&state.db, id).await?;
    let (customer, email) = load_customer_with_email(&state.db, &booking).await?;

    let description = format!(
        "{} cleaning at {} on {}",
        booking.service_type.replace('_', " "),
        booking.address,
        booking.scheduled_at.format("%d %B %Y")
    );

    let invoice_id = state
        .invoicing
        .create_invoice(&customer.name, &email, &description, booking.total_cost)
        .await
        .map_err(upstream("invoicing"))?;

    state
        .invoicing
        .send_invoice(&invoice_id)
        .await
        .map_err(upstream("invoicing"))?;

    sqlx::query(
        "UPDATE bookings SET invoice_id = $2, payment_method = 'invoice', updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .bind(&invoice_id)
    .execute(&state.db)
    .await?;

    Ok(Json(InvoiceResponse { invoice_id }))
}

// Templated booking-confirmation email.
pub async fn send_booking_email(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ServiceResult<Json<SentResponse>> {
    let booking = load_booking(&state.db, id).await?;
    let (customer, email) = load_customer_with_email(&state.db, &booking).await?;

    let params = serde_json::json!({
        "customer_name": customer.name,
        "service_type": booking.service_type,
        "scheduled_at": booking.scheduled_at.format("%d %B %Y, %H:%M").to_string(),
        "address": booking.address,
        "total_cost": booking.total_cost,
    });

    state
        .email
        .send_template("booking_confirmation", &email, params)
        .await
        .map_err(upstream("email"))?;

    Ok(Json(SentResponse { sent: true }))
}

// Payment link for the outstanding total.
pub async fn create_payment_link(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ServiceResult<Json<PaymentLinkResponse>> {
    let booking = load_booking(&state.db, id).await?;

    let url = state
        .payments
        .create_payment_link(&booking.id.to_string(), booking.total_cost)
        .await
        .map_err(upstream("payments"))?;

    Ok(Json(PaymentLinkResponse { url }))
}

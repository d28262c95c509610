use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{ServiceError, ServiceResult},
    models::Customer,
    AppState,
};

#[derive(Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
}

fn validate_payload(payload: &CustomerPayload) -> ServiceResult<()> {
    if payload.name.trim().is_empty() {
        return Err(ServiceError::Validation("customer name is required".into()));
    }
    if payload
        .email
        .as_deref()
        .is_some_and(|email| !email.is_empty() && !email.contains('@'))
    {
        return Err(ServiceError::Validation("email address is invalid".into()));
    }
    Ok(())
}

pub async fn customers_list(State(state): State<AppState>) -> ServiceResult<Json<Vec<Customer>>> {
    let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY name")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(customers))
}

pub async fn customer_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ServiceResult<Json<Customer>> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(ServiceError::NotFound("customer"))?;

    Ok(Json(customer))
}

pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> ServiceResult<Json<Customer>> {
    validate_payload(&payload)?;

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        INSERT INTO customers (
            name, email, phone, address_line1, address_line2, city, postal_code, notes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.address_line1)
    .bind(&payload.address_line2)
    .bind(&payload.city)
    .bind(&payload.postal_code)
    .bind(&payload.notes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(customer))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerPayload>,
) -> ServiceResult<Json<Customer>> {
    validate_payload(&payload)?;

    let customer = sqlx::query_as::<_, Customer>(
        r#"
        UPDATE customers SET
            name = $2, email = $3, phone = $4, address_line1 = $5, address_line2 = $6,
            city = $7, postal_code = $8, notes = $9, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.address_line1)
    .bind(&payload.address_line2)
    .bind(&payload.city)
    .bind(&payload.postal_code)
    .bind(&payload.notes)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ServiceError::NotFound("customer"))?;

    Ok(Json(customer))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: Option<&str>) -> CustomerPayload {
        CustomerPayload {
            name: name.into(),
            email: email.map(String::from),
            phone: None,
            address_line1: None,
            address_line2: None,
            city: None,
            postal_code: None,
            notes: None,
        }
    }

    #[test]
    fn name_is_required() {
        assert!(validate_payload(&payload("", None)).is_err());
        assert!(validate_payload(&payload("   ", None)).is_err());
        assert!(validate_payload(&payload("Rowan Hart", None)).is_ok());
    }

    #[test]
    fn email_shape_is_checked_when_present() {
        assert!(validate_payload(&payload("Rowan Hart", Some("rowan"))).is_err());
        assert!(validate_payload(&payload("Rowan Hart", Some("rowan@example.com"))).is_ok());
    }
}

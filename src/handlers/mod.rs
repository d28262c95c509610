pub mod bookings;
pub mod cleaners;
pub mod customers;
pub mod invoices;
pub mod linen;
pub mod quotes;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::ServiceResult, models::ServiceType, AppState};

#[derive(Serialize)]
pub struct DashboardSummary {
    pub scheduled_bookings: i64,
    pub unpaid_bookings: i64,
    pub customer_count: i64,
    pub active_cleaner_count: i64,
}

// Headline counts for the dashboard landing view.
pub async fn dashboard(State(state): State<AppState>) -> ServiceResult<Json<DashboardSummary>> {
    let scheduled_bookings =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE status = 'scheduled'")
            .fetch_one(&state.db)
            .await?;

    let unpaid_bookings = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM bookings WHERE payment_status = 'unpaid' AND status != 'cancelled'",
    )
    .fetch_one(&state.db)
    .await?;

    let customer_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
        .fetch_one(&state.db)
        .await?;

    let active_cleaner_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cleaners WHERE is_active = true")
            .fetch_one(&state.db)
            .await?;

    Ok(Json(DashboardSummary {
        scheduled_bookings,
        unpaid_bookings,
        customer_count,
        active_cleaner_count,
    }))
}

// Active service/cleaning-type labels and their display colors.
pub async fn service_types_list(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<ServiceType>>> {
    let service_types = sqlx::query_as::<_, ServiceType>(
        "SELECT * FROM service_types WHERE is_active = true ORDER BY name",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(service_types))
}

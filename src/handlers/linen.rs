use axum::{extract::State, Json};

use crate::{error::ServiceResult, models::LinenProduct, AppState};

// The clean/dirty counters are a snapshot: selection checks happen against
// whatever the dashboard fetched last, not a live reservation.
pub async fn products_list(State(state): State<AppState>) -> ServiceResult<Json<Vec<LinenProduct>>> {
    let products = sqlx::query_as::<_, LinenProduct>(
        "SELECT * FROM linen_products WHERE is_active = true ORDER BY name",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(products))
}

use axum::{extract::State, Json};

use crate::{error::ServiceResult, models::Cleaner, AppState};

// Active cleaners with their rate snapshot; the booking form reads this to
// derive cleaner pay.
pub async fn cleaners_list(State(state): State<AppState>) -> ServiceResult<Json<Vec<Cleaner>>> {
    let cleaners =
        sqlx::query_as::<_, Cleaner>("SELECT * FROM cleaners WHERE is_active = true ORDER BY name")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(cleaners))
}

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::models::{ContactsPayload, TenantId};
use crate::utils::logging::*;
use crate::utils::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemsParams {
    pub user_id: Option<String>,
    pub org_id: Option<String>,
}

/// GET /hubspot/items[?user_id=..&org_id=..]
///
/// Sem os dois ids usa os tokens globais
pub async fn get_items(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ItemsParams>,
) -> AppResult<Json<ContactsPayload>> {
    log_request_received("/hubspot/items", "GET");

    let tenant = TenantId::from_optional(params.user_id, params.org_id);
    let payload = state
        .hubspot
        .fetch_contacts(&state.token_manager, &tenant)
        .await?;

    Ok(Json(payload))
}

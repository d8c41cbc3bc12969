use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use matchodds::error::{validate_search_limit, AppError};
use matchodds::DEFAULT_SEARCH_LIMIT;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<usize>,
}

/// Search players by name substring
pub async fn search_players(
    state: web::Data<Arc<AppState>>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    validate_search_limit(limit)?;

    let matches = state.catalog.search(&query.q, limit);
    Ok(HttpResponse::Ok().json(matches))
}

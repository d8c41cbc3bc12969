use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::AppState;
use matchodds::error::AppError;
use matchodds::models::{Player, PredictRequest};
use matchodds::predictor;

/// Predict a match between two catalog players
pub async fn predict_match(
    state: web::Data<Arc<AppState>>,
    req: web::Json<PredictRequest>,
) -> Result<HttpResponse, AppError> {
    let player1 = lookup(&state, &req.player1)?;
    let player2 = lookup(&state, &req.player2)?;

    let response = predictor::predict_match(player1, player2, req.surface);
    Ok(HttpResponse::Ok().json(response))
}

fn lookup<'a>(state: &'a AppState, name: &str) -> Result<&'a Player, AppError> {
    state
        .catalog
        .get(name)
        .ok_or_else(|| AppError::ValidationError(format!("Unknown player: {}", name)))
}

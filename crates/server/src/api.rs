//! JSON API mirroring the HTML front end.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use catalog::{options as axis_options, Axis, Category, TrainingRow};
use recommender::ModelInfo;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::session::SessionStore;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub accuracy: f64,
    pub correct: usize,
    pub total: usize,
}

/// Raw codes; unlike the HTML form these are not checked against their axes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PredictRequest {
    pub genre: u8,
    pub age_rating: u8,
    pub length: u8,
    pub era: u8,
    pub user_rating: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub label: String,
    pub will_watch: bool,
    /// `[p(Won't Watch), p(Will Watch)]`
    pub probabilities: [f64; 2],
    pub confidence: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptionView {
    pub code: u8,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AxisOptions {
    pub axis: Axis,
    pub title: String,
    pub options: Vec<OptionView>,
}

/// `POST /api/sessions`
pub async fn create_session(
    State(store): State<SessionStore>,
) -> Result<(StatusCode, Json<SessionCreated>), AppError> {
    let session = store.create().await?;
    let report = session.report();
    Ok((
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id: session.id().to_string(),
            accuracy: report.accuracy,
            correct: report.correct,
            total: report.total,
        }),
    ))
}

/// `GET /api/sessions/:id/training`
pub async fn training(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TrainingRow>>, AppError> {
    let session = store.get(&id).await?;
    Ok(Json(session.report().table.rows().to_vec()))
}

/// `GET /api/sessions/:id/model`
pub async fn model_info(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
) -> Result<Json<ModelInfo>, AppError> {
    let session = store.get(&id).await?;
    Ok(Json(session.model_info()))
}

/// `POST /api/sessions/:id/predict`
pub async fn predict(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    let session = store.get(&id).await?;
    let prediction = session.predict_codes([
        request.genre,
        request.age_rating,
        request.length,
        request.era,
        request.user_rating,
    ])?;

    Ok(Json(PredictResponse {
        label: prediction.outcome.label().to_string(),
        will_watch: prediction.will_watch(),
        probabilities: prediction.probabilities,
        confidence: prediction.confidence(),
    }))
}

/// `GET /api/options`
pub async fn options() -> Json<Vec<AxisOptions>> {
    let all = Axis::ALL
        .into_iter()
        .map(|axis| AxisOptions {
            axis,
            title: axis.title().to_string(),
            options: axis_options(axis)
                .into_iter()
                .map(|(code, label)| OptionView {
                    code,
                    label: label.to_string(),
                })
                .collect(),
        })
        .collect();
    Json(all)
}

use crate::errors::AppError;
use crate::models::{AnswerForm, Record, StatsQuery, StatsResponse, SubmissionResponse};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::storage::ResponseStore;
use crate::ui::{render_stats, render_survey};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

pub async fn index() -> Html<String> {
    Html(render_survey(None, ""))
}

/// Form submission: redirects to the day's statistics, or re-renders the
/// form with the problem shown inline.
pub async fn submit(State(state): State<AppState>, Form(form): Form<AnswerForm>) -> Response {
    let answer = form.answer.clone();
    let result = match with_store(&state, move |store| store.append(&answer)).await {
        Ok(result) => result.map_err(AppError::from),
        Err(err) => Err(err),
    };

    match result {
        Ok(submission) => {
            info!(day = %submission.day, "survey submitted");
            Redirect::to(&format!("/stats?date={}", submission.day)).into_response()
        }
        Err(err) => {
            let page = render_survey(Some(&err.message), &form.answer);
            (err.status, Html(page)).into_response()
        }
    }
}

pub async fn stats_page(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Html<String>, AppError> {
    let stats = collect_stats(&state, query.date).await?;
    Ok(Html(render_stats(&stats, &state.layout)))
}

pub async fn api_submit(
    State(state): State<AppState>,
    Json(payload): Json<AnswerForm>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let submission = with_store(&state, move |store| store.append(&payload.answer)).await??;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            date: submission.day,
            time: submission.record.time,
            answer: submission.record.answer,
        }),
    ))
}

pub async fn api_days(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let days = with_store(&state, |store| store.list_days()).await?;
    Ok(Json(days))
}

pub async fn api_day_answers(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> Result<Json<Vec<Record>>, AppError> {
    let records = with_store(&state, move |store| store.list_by_day(&day)).await?;
    Ok(Json(records))
}

pub async fn api_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    Ok(Json(collect_stats(&state, query.date).await?))
}

async fn collect_stats(state: &AppState, requested: Option<String>) -> Result<StatsResponse, AppError> {
    let layout = state.layout.clone();
    with_store(state, move |store| {
        let mut rng = StdRng::from_entropy();
        build_stats(store, &layout, requested.as_deref(), &mut rng)
    })
    .await
}

/// Runs blocking store work off the async workers. The store lock is held
/// until the work finishes, so read-modify-write cycles stay serialized.
async fn with_store<T, F>(state: &AppState, work: F) -> Result<T, AppError>
where
    F: FnOnce(&ResponseStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let guard = state.store.lock().await;
    let store = guard.clone();
    let result = tokio::task::spawn_blocking(move || work(&store))
        .await
        .map_err(AppError::internal);
    drop(guard);
    result
}

//! Route handlers.

use askama::Template;
use axum::extract::{Form, Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use serde::Deserialize;
use uuid::Uuid;

use seoscope_core::InputType;

use crate::error::AppError;
use crate::state::AppState;
use crate::views::{FormTemplate, ResultsTemplate};

/// File name offered to browsers for every report.
pub const REPORT_FILENAME: &str = "seoscope_report.pdf";

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    pub input_type: String,
    #[serde(default)]
    pub user_input: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub sig: Option<String>,
}

pub async fn index() -> Result<Html<String>, AppError> {
    Ok(Html(FormTemplate::default().render()?))
}

pub async fn health() -> &'static str {
    "ok"
}

/// Runs the analysis, writes the report under a fresh id and shows the results.
///
/// Expired reports are swept before the new one is written.
pub async fn analyze(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> Result<Html<String>, AppError> {
    let input_type: InputType = form.input_type.parse().map_err(|_| AppError::BadInput(form.input_type.clone()))?;

    let result = state.analyzer.analyze(input_type, &form.user_input).await;
    if result.is_error() {
        tracing::warn!(?input_type, input_len = form.user_input.len(), "analysis degraded");
    }

    let id = Uuid::new_v4();
    let path = state.report_path(&id);
    tokio::fs::create_dir_all(state.output_dir.as_path()).await?;

    let worker = state.clone();
    let report = result.clone();
    let report_path = path.clone();
    tokio::task::spawn_blocking(move || -> Result<(), AppError> {
        worker.sweep_reports()?;
        worker.renderer.render_to_file(&report, &report_path)?;
        Ok(())
    })
    .await??;
    tracing::info!(%id, path = %path.display(), "report written");

    let preview_chars = state.analyzer.config().thresholds.preview_chars;
    let page = ResultsTemplate::from_result(&result, state.download_link(&id), preview_chars);
    Ok(Html(page.render()?))
}

/// Serves a report when the id exists and the signature matches.
pub async fn download(
    State(state): State<AppState>, Path(id): Path<String>, Query(query): Query<DownloadQuery>,
) -> Result<impl IntoResponse, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound)?;
    let path = state.report_path(&id);
    if !tokio::fs::try_exists(&path).await? {
        return Err(AppError::NotFound);
    }

    match query.sig.as_deref() {
        Some(sig) if state.verify(&id, sig) => {}
        _ => return Err(AppError::Forbidden),
    }

    let bytes = tokio::fs::read(&path).await?;
    tracing::info!(%id, bytes = bytes.len(), "report served");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", REPORT_FILENAME)),
        ],
        bytes,
    ))
}

/// Downloads always need an explicit report id.
pub async fn download_without_id() -> AppError {
    AppError::NotFound
}

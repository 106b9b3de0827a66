//! Axum route handlers for the board page.
//!
//! Each form on the page posts to one handler, which turns the submission
//! into a single `Command`. Successful commands redirect back to `/`;
//! rejected uploads re-render the page with the alert.

use askama::Template;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::filters::{FilterOptions, FilterSelection};
use crate::board::ingest::{FileSelection, IngestError};
use crate::board::models::JobRecord;
use crate::board::{Command, JobBoard, ModalClick};
use crate::config::Config;
use crate::errors::AppError;
use crate::render::render_page;
use crate::state::AppState;

/// Multipart field carrying the uploaded job file.
pub const UPLOAD_FIELD: &str = "jsonFile";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SortForm {
    #[serde(default)]
    pub sort_by: String,
}

#[derive(Debug, Deserialize)]
pub struct DismissForm {
    pub target: ModalClick,
}

#[derive(Debug, Serialize)]
pub struct BoardSnapshot {
    pub total: usize,
    pub visible: usize,
    pub jobs: Vec<JobRecord>,
    pub filter_options: FilterOptions,
    pub selection: FilterSelection,
    pub filtered: bool,
    pub active_sort: Option<String>,
    pub detail_open: bool,
}

impl BoardSnapshot {
    fn of(board: &JobBoard) -> Self {
        Self {
            total: board.records().len(),
            visible: board.view().len(),
            jobs: board.view().iter().map(|r| JobRecord::clone(r)).collect(),
            filter_options: board.options().clone(),
            selection: board.selection().clone(),
            filtered: !board.selection().is_unfiltered(),
            active_sort: board.active_sort().map(|m| m.label().to_string()),
            detail_open: board.detail().is_some(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let board = state.board.lock().await;
    page_response(&board, &state.config, StatusCode::OK, None)
}

/// POST /upload
///
/// The whole body is read before the board is locked, so a slow upload never
/// blocks other actions.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let outcome = match read_upload(&mut multipart).await {
        Ok(selection) => state.board.lock().await.ingest(&selection).map(|_| ()),
        Err(e) => Err(e),
    };

    let Err(e) = outcome else {
        return Ok(Redirect::to("/").into_response());
    };

    warn!(error = %e, "Upload rejected");
    let status = if e.is_selection_problem() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    let board = state.board.lock().await;
    page_response(&board, &state.config, status, Some(e.to_string()))
}

/// POST /filter
pub async fn handle_filter(
    State(state): State<AppState>,
    Form(selection): Form<FilterSelection>,
) -> Result<Redirect, AppError> {
    state
        .board
        .lock()
        .await
        .dispatch(Command::Filter(selection))?;
    Ok(Redirect::to("/"))
}

/// POST /sort
pub async fn handle_sort(
    State(state): State<AppState>,
    Form(form): Form<SortForm>,
) -> Result<Redirect, AppError> {
    state
        .board
        .lock()
        .await
        .dispatch(Command::Sort(form.sort_by))?;
    Ok(Redirect::to("/"))
}

/// POST /jobs/:index
pub async fn handle_open_detail(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    state
        .board
        .lock()
        .await
        .dispatch(Command::OpenDetail(index))?;
    Ok(Redirect::to("/"))
}

/// POST /detail/dismiss
pub async fn handle_dismiss_detail(
    State(state): State<AppState>,
    Form(form): Form<DismissForm>,
) -> Result<Redirect, AppError> {
    state
        .board
        .lock()
        .await
        .dispatch(Command::ModalClick(form.target))?;
    Ok(Redirect::to("/"))
}

/// GET /api/v1/board
pub async fn handle_snapshot(State(state): State<AppState>) -> Json<BoardSnapshot> {
    let board = state.board.lock().await;
    Json(BoardSnapshot::of(&board))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn page_response(
    board: &JobBoard,
    config: &Config,
    status: StatusCode,
    alert: Option<String>,
) -> Result<Response, AppError> {
    let page = render_page(board, Local::now(), &config.timestamp_format, alert);
    Ok((status, Html(page.render()?)).into_response())
}

/// Pulls the job file out of the multipart body.
///
/// A missing file field is a selection with no file. A broken stream before
/// the file field is reached is a read failure; one while reading the file is
/// recorded on the selection so the name check still runs first.
async fn read_upload(multipart: &mut Multipart) -> Result<FileSelection, IngestError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IngestError::ReadFailed(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        return Ok(match field.bytes().await {
            Ok(contents) => FileSelection::new(file_name, contents),
            Err(e) => FileSelection::unreadable(file_name, e.to_string()),
        });
    }

    Ok(FileSelection::none())
}

use axum::{
    extract::{
        rejection::{BytesRejection, JsonRejection, PathRejection},
        DefaultBodyLimit, Path, State,
    },
    routing::{get, post},
    Router,
    Json,
    http::Method,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    models::{Dataset, RowIssue},
    services::{
        download,
        excel::{utils::is_spreadsheet_type, WorkbookReader},
        row_ingest::{self, RowsPayload},
        session::SheetSession,
        summary::{frequency::format_percentage, ColumnKind, ColumnReport, ColumnSummary},
    },
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes(max_file_size: usize) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/sheets/upload", post(upload_sheet))
        .route("/sheets/analyze", post(analyze_sheet))
        .route("/sheets/rows", post(load_rows))
        .route("/sheets/current", get(current_sheet))
        .route("/sheets/page/:index", get(go_to_page))
        .route("/sheets/next", post(next_page))
        .route("/sheets/previous", post(previous_page))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
pub struct FileInfo {
    #[serde(rename = "type")]
    file_type: String,
    signed_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    files: Vec<FileInfo>,
}

#[derive(Debug, Serialize, Clone)]
pub struct BinView {
    range_start: f64,
    range_end: f64,
    count: usize,
    label: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct FrequencyView {
    value: serde_json::Value,
    label: String,
    percentage: f64,
    display: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SummaryView {
    UniqueValues {
        count: usize,
    },
    Histogram {
        bins: Vec<BinView>,
    },
    FrequencyBreakdown {
        top: Vec<FrequencyView>,
        other_percentage: f64,
        other_display: String,
    },
}

#[derive(Debug, Serialize, Clone)]
pub struct ColumnView {
    name: String,
    kind: ColumnKind,
    distinct_count: usize,
    summary: SummaryView,
}

#[derive(Debug, Serialize, Clone)]
pub struct PageView {
    current_page_index: usize,
    page_count: usize,
    page_size: usize,
    start_index: usize,
    end_index: usize,
    is_first_page: bool,
    is_last_page: bool,
    rows: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Clone)]
pub struct SheetView {
    source: String,
    loaded_at: DateTime<Utc>,
    row_count: usize,
    column_count: usize,
    columns: Vec<ColumnView>,
    issues: Vec<RowIssue>,
    page: PageView,
}

impl From<&ColumnReport> for ColumnView {
    fn from(report: &ColumnReport) -> Self {
        let summary = match &report.summary {
            ColumnSummary::UniqueValues { count } => SummaryView::UniqueValues { count: *count },
            ColumnSummary::Histogram { bins } => SummaryView::Histogram {
                bins: bins
                    .iter()
                    .map(|bin| BinView {
                        range_start: bin.range_start,
                        range_end: bin.range_end,
                        count: bin.count,
                        label: bin.label(),
                    })
                    .collect(),
            },
            ColumnSummary::FrequencyBreakdown(breakdown) => SummaryView::FrequencyBreakdown {
                top: breakdown
                    .top
                    .iter()
                    .map(|entry| FrequencyView {
                        value: entry.value.to_json(),
                        label: entry.label(),
                        percentage: entry.percentage,
                        display: format_percentage(entry.percentage),
                    })
                    .collect(),
                other_percentage: breakdown.other_percentage,
                other_display: format_percentage(breakdown.other_percentage),
            },
        };

        ColumnView {
            name: report.name.clone(),
            kind: report.kind,
            distinct_count: report.distinct_count,
            summary,
        }
    }
}

fn page_view(session: &SheetSession) -> PageView {
    let window = session.window();
    PageView {
        current_page_index: window.current_page_index,
        page_count: window.page_count,
        page_size: window.page_size,
        start_index: window.rows.start,
        end_index: window.rows.end,
        is_first_page: window.is_first_page,
        is_last_page: window.is_last_page,
        rows: session.visible_rows(),
    }
}

fn sheet_view(session: &SheetSession) -> SheetView {
    SheetView {
        source: session.source.clone(),
        loaded_at: session.loaded_at,
        row_count: session.dataset.row_count(),
        column_count: session.dataset.column_count(),
        columns: session.columns.iter().map(ColumnView::from).collect(),
        issues: session.dataset.issues().to_vec(),
        page: page_view(session),
    }
}

/// Builds and stores a new session off the async executor. `decode` runs on
/// the blocking pool together with the summary pass.
async fn replace_session<F>(
    state: &AppState,
    source: String,
    decode: F,
) -> Result<SheetView, AppError>
where
    F: FnOnce() -> Result<Dataset, AppError> + Send + 'static,
{
    let start = std::time::Instant::now();
    let page_size = state.config.page_size;

    let session = tokio::task::spawn_blocking(move || -> Result<SheetSession, AppError> {
        let dataset = decode()?;
        Ok(SheetSession::build(source, dataset, page_size)?)
    })
    .await??;

    let view = sheet_view(&session);
    state.sessions.replace(session);
    tracing::info!("Sheet loaded in {:?}", start.elapsed());

    Ok(view)
}

#[axum::debug_handler]
async fn upload_sheet(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SheetView>, AppError> {
    let body = body?;
    tracing::info!("Received upload of {}KB", body.len() / 1024);
    if body.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()));
    }

    let reader = WorkbookReader::new(state.config.max_file_size);
    let view =
        replace_session(&state, "upload".to_string(), move || reader.read_bytes(body)).await?;
    Ok(Json(view))
}

#[axum::debug_handler]
async fn analyze_sheet(
    State(state): State<Arc<AppState>>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<SheetView>, AppError> {
    let Json(request) = request?;
    let file_info = request.files.first()
        .ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    tracing::info!(
        "Processing file type: {}, URL length: {}",
        file_info.file_type,
        file_info.signed_url.len()
    );

    if !is_spreadsheet_type(&file_info.file_type) {
        return Err(AppError::InvalidInput(format!(
            "Unsupported file type: {}",
            file_info.file_type
        )));
    }

    let download_start = std::time::Instant::now();
    let max_file_size = state.config.max_file_size;
    let file_data = download::load_file_from_url(&file_info.signed_url, max_file_size).await?;
    tracing::info!(
        "File downloaded, size: {}KB, took: {:?}",
        file_data.len() / 1024,
        download_start.elapsed()
    );

    let reader = WorkbookReader::new(max_file_size);
    let view =
        replace_session(&state, "url".to_string(), move || reader.read_bytes(file_data)).await?;
    Ok(Json(view))
}

async fn load_rows(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RowsPayload>, JsonRejection>,
) -> Result<Json<SheetView>, AppError> {
    let Json(payload) = payload?;
    tracing::info!("Received {} JSON rows", payload.rows.len());
    let view = replace_session(&state, "rows".to_string(), move || {
        Ok(row_ingest::ingest(payload)?)
    })
    .await?;
    Ok(Json(view))
}

async fn current_sheet(State(state): State<Arc<AppState>>) -> Result<Json<SheetView>, AppError> {
    state.sessions.read(sheet_view).map(Json)
}

async fn go_to_page(
    State(state): State<Arc<AppState>>,
    index: Result<Path<usize>, PathRejection>,
) -> Result<Json<PageView>, AppError> {
    let Path(index) = index?;
    state.sessions
        .update(|session| {
            session.go_to_page(index);
            page_view(session)
        })
        .map(Json)
}

async fn next_page(State(state): State<Arc<AppState>>) -> Result<Json<PageView>, AppError> {
    state.sessions
        .update(|session| {
            session.next_page();
            page_view(session)
        })
        .map(Json)
}

async fn previous_page(State(state): State<Arc<AppState>>) -> Result<Json<PageView>, AppError> {
    state.sessions
        .update(|session| {
            session.previous_page();
            page_view(session)
        })
        .map(Json)
}

//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{converter, ConversionSession};
use crate::error::{KonversiError, KonversiResult};
use crate::excel;
use crate::siswa::{self, Page, DEFAULT_PER_PAGE};
use crate::types::{ConversionRange, ImportRecord, Siswa, SiswaInput, EXPORT_FILE_NAME};

use super::server::AppState;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a failed operation
pub fn status_for(error: &KonversiError) -> StatusCode {
    match error {
        KonversiError::NotFound(_) => StatusCode::NOT_FOUND,
        KonversiError::ImportParseFailure(_) | KonversiError::Json(_) | KonversiError::Yaml(_) => {
            StatusCode::BAD_REQUEST
        }
        e if e.is_user_error() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond<T: Serialize>(result: KonversiResult<T>) -> Response {
    match result {
        Ok(data) => Json(ApiResponse::ok(data)).into_response(),
        Err(e) => failure(&e),
    }
}

fn failure(error: &KonversiError) -> Response {
    let status = status_for(error);
    if status.is_server_error() {
        tracing::error!(error = %error, "request failed");
    }
    (status, Json(ApiResponse::<()>::err(error.to_string()))).into_response()
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Konversi Nilai API Server".to_string(),
        version: state.version.clone(),
        description: "Student records and score range conversion".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("GET", "/siswa", "Search and page through students"),
            EndpointInfo::new("POST", "/siswa", "Create a student"),
            EndpointInfo::new("GET", "/siswa/:id", "Get a student"),
            EndpointInfo::new("PUT", "/siswa/:id", "Update a student"),
            EndpointInfo::new("DELETE", "/siswa/:id", "Delete a student"),
            EndpointInfo::new("POST", "/api/v1/convert", "Rescale numbers into a range"),
            EndpointInfo::new("POST", "/api/v1/import", "Read records from a workbook"),
            EndpointInfo::new("POST", "/api/v1/export", "Convert records and download hasil_konversi.xlsx"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: ["siswa", "convert", "import", "export"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
    }))
}

// ==================== Students ====================

/// Listing query: `?q=ani&page=2&per_page=10`
#[derive(Deserialize, Default)]
pub struct SiswaQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// GET /siswa - Search and paginate students
pub async fn list_siswa(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SiswaQuery>,
) -> Response {
    let all = state.siswa.list();
    let found: Vec<Siswa> = siswa::search(&all, &query.q).into_iter().cloned().collect();
    let page: Page<Siswa> = siswa::paginate(
        &found,
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    );
    respond(Ok(page))
}

/// POST /siswa - Create a student
pub async fn create_siswa(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SiswaInput>,
) -> Response {
    match state.siswa.create(input) {
        Ok(created) => (StatusCode::CREATED, Json(ApiResponse::ok(created))).into_response(),
        Err(e) => failure(&e),
    }
}

/// GET /siswa/:id - Get one student
pub async fn get_siswa(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Response {
    respond(state.siswa.get(id))
}

/// PUT /siswa/:id - Update a student
pub async fn update_siswa(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(input): Json<SiswaInput>,
) -> Response {
    respond(state.siswa.update(id, input))
}

/// Delete response
#[derive(Serialize)]
pub struct DeleteResponse {
    pub id: u64,
    pub message: String,
}

/// DELETE /siswa/:id - Delete a student
pub async fn delete_siswa(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> Response {
    respond(state.siswa.delete(id).map(|removed| DeleteResponse {
        id: removed.id,
        message: format!("student {} deleted", removed.id),
    }))
}

// ==================== Conversion ====================

/// Numbers either as comma separated text or as a list of strings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum NumberInput {
    Text(String),
    List(Vec<String>),
}

impl NumberInput {
    fn entries(&self) -> Vec<String> {
        match self {
            NumberInput::Text(text) => converter::split_input(text)
                .into_iter()
                .map(str::to_string)
                .collect(),
            NumberInput::List(items) => items.clone(),
        }
    }
}

/// Convert request
#[derive(Deserialize)]
pub struct ConvertRequest {
    pub input: NumberInput,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Convert response
#[derive(Serialize, Default)]
pub struct ConvertResponse {
    pub values: Vec<i64>,
    pub text: String,
    /// Input positions that were not numbers
    pub skipped: Vec<usize>,
    pub min: i64,
    pub max: i64,
}

fn resolve_range(default: ConversionRange, min: Option<i64>, max: Option<i64>) -> ConversionRange {
    ConversionRange::new(min.unwrap_or(default.min), max.unwrap_or(default.max))
}

/// POST /api/v1/convert - Rescale numbers
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConvertRequest>,
) -> Response {
    let range = resolve_range(state.default_range, req.min, req.max);
    let result = converter::convert(&req.input.entries(), range).map(|conversion| {
        let values = conversion.values();
        ConvertResponse {
            text: converter::join_values(&values),
            skipped: conversion.skipped(),
            values,
            min: range.min,
            max: range.max,
        }
    });
    respond(result)
}

/// Import response
#[derive(Serialize, Default)]
pub struct ImportResponse {
    pub count: usize,
    pub groups: Vec<String>,
    pub records: Vec<ImportRecord>,
}

/// POST /api/v1/import - Read records from an uploaded workbook (raw body)
pub async fn import_excel(body: Bytes) -> Response {
    respond(excel::import_workbook_bytes(&body).map(|records| {
        let mut groups: Vec<String> = Vec::new();
        for record in &records {
            if !groups.contains(&record.group) {
                groups.push(record.group.clone());
            }
        }
        ImportResponse {
            count: records.len(),
            groups,
            records,
        }
    }))
}

/// Export request
#[derive(Deserialize)]
pub struct ExportRequest {
    pub records: Vec<ImportRecord>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

fn export_workbook(session: &mut ConversionSession) -> KonversiResult<Vec<u8>> {
    session.convert()?;
    session.export_bytes()
}

/// POST /api/v1/export - Convert records and download the workbook
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportRequest>,
) -> Response {
    let mut session = ConversionSession::new(resolve_range(state.default_range, req.min, req.max));
    session.load_records(req.records);

    match export_workbook(&mut session) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => failure(&e),
    }
}

//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the course endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    errors::{session_error_response, upload_error_response},
    state::{AppState, SessionToken},
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use syllabus_core::{
    domain::{Course, SyllabusUpload},
    pipeline::process_upload,
    stats::CourseStats,
};
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
        list_courses_handler,
        upload_syllabus_handler,
        remove_course_handler,
        overview_handler,
    ),
    components(
        schemas(
            crate::web::auth::SignupRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::AuthResponse,
            CourseResponse,
            OverviewResponse,
        )
    ),
    tags(
        (name = "Syllabus Analyzer API", description = "Upload syllabi and review estimated workload and difficulty.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// A course as shown to the client.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub file_name: String,
    pub course_name: String,
    pub hours_per_week: f64,
    pub difficulty: f64,
    pub reasoning: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            file_name: course.file_name,
            course_name: course.course_name,
            hours_per_week: course.hours_per_week,
            difficulty: course.difficulty,
            reasoning: course.reasoning,
        }
    }
}

/// Semester overview across the current course list.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub course_count: usize,
    pub total_hours: f64,
    pub average_hours: f64,
    pub average_difficulty: f64,
    /// One of `Manageable`, `Moderate`, `Challenging`.
    pub workload: String,
}

impl From<CourseStats> for OverviewResponse {
    fn from(stats: CourseStats) -> Self {
        Self {
            course_count: stats.course_count,
            total_hours: stats.total_hours,
            average_hours: stats.average_hours,
            average_difficulty: stats.average_difficulty,
            workload: stats.workload.label().to_string(),
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the courses of the logged-in user, in upload order.
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "Current course list", body = [CourseResponse]),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_courses_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let courses = app_state
        .sessions
        .courses(&token)
        .await
        .map_err(session_error_response)?;

    Ok(Json(
        courses.into_iter().map(CourseResponse::from).collect::<Vec<_>>(),
    ))
}

/// Upload a syllabus PDF and add its analysis to the course list.
///
/// Accepts a multipart/form-data request with a single file part.
#[utoipa::path(
    post,
    path = "/courses",
    request_body(content_type = "multipart/form-data", description = "The syllabus PDF to analyze."),
    responses(
        (status = 201, description = "Syllabus analyzed", body = CourseResponse),
        (status = 400, description = "Not a PDF, or not enough text could be extracted"),
        (status = 401, description = "Not logged in"),
        (status = 502, description = "The analysis service failed")
    )
)]
pub async fn upload_syllabus_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // Skip plain form fields; the first part carrying a file name is the upload.
    let field = loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart data: {}", e),
                )
            })?
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    "Multipart form must include a file".to_string(),
                )
            })?;
        if field.file_name().is_some() {
            break field;
        }
    };

    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let data: Bytes = field.bytes().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read file bytes: {}", e),
        )
    })?;

    info!(%file_name, size = data.len(), "Received syllabus upload");

    let upload = SyllabusUpload {
        file_name,
        content_type,
        bytes: data.to_vec(),
    };

    let course = process_upload(app_state.analyzer.as_ref(), upload)
        .await
        .map_err(upload_error_response)?;

    app_state
        .sessions
        .add_course(&token, course.clone())
        .await
        .map_err(|e| {
            error!("Failed to store analyzed course: {:?}", e);
            session_error_response(e)
        })?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// Remove one course from the list.
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "The id of the course to remove.")
    ),
    responses(
        (status = 204, description = "Course removed"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No course with that id")
    )
)]
pub async fn remove_course_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let removed = app_state
        .sessions
        .remove_course(&token, id)
        .await
        .map_err(session_error_response)?;

    info!(course = %removed.course_name, "Removed course");
    Ok(StatusCode::NO_CONTENT)
}

/// Average hours, average difficulty and overall workload for the semester.
#[utoipa::path(
    get,
    path = "/overview",
    responses(
        (status = 200, description = "Semester overview", body = OverviewResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn overview_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let stats = app_state
        .sessions
        .overview(&token)
        .await
        .map_err(session_error_response)?;

    Ok(Json(OverviewResponse::from(stats)))
}

use std::collections::BTreeMap;

use aggregator::{SearchOverrides, search_with_resume};
use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use common::{
    AlertSubscription, CompanyReviews, FilterCriteria, JobCard, JobData, JobSource, ValidationError,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::{AppState, Session};

/// Filtered view returned by the job and filter endpoints.
#[derive(Debug, Serialize)]
pub struct JobsResponse {
    status: String,
    criteria: FilterCriteria,
    total_results: usize,
    filtered_results: usize,
    counts: BTreeMap<JobSource, usize>,
    jobs: BTreeMap<JobSource, Vec<JobCard>>,
}

impl From<Session> for JobsResponse {
    fn from(session: Session) -> Self {
        Self {
            total_results: session.jobs.total(),
            filtered_results: session.filtered.total(),
            counts: session.filtered.counts(),
            jobs: session.filtered.cards(),
            criteria: session.criteria,
            status: session.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    status: String,
    query: JobData,
    counts: BTreeMap<JobSource, usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OverrideParams {
    keyword: Option<String>,
    location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewsBody {
    #[serde(default)]
    company_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AlertBody {
    #[serde(default)]
    keyword: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    email: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/resume", post(upload_resume))
        .route("/jobs", get(get_jobs))
        .route(
            "/filters",
            get(get_filters).put(put_filters).delete(reset_filters),
        )
        .route("/reviews", post(get_reviews))
        .route("/alerts", post(create_alert))
        .with_state(state)
}

/// Handler for GET / (root)
async fn root_handler() -> &'static str {
    "🔍 JobCipher Session API\n\nEndpoints:\n  POST   /resume   - Upload a resume (multipart 'file') and search all sources\n  GET    /jobs     - Current filtered results\n  GET    /filters  - Active filters\n  PUT    /filters  - Replace filters and re-apply\n  DELETE /filters  - Reset filters\n  POST   /reviews  - Company reviews {\"company_name\"}\n  POST   /alerts   - Job alert {\"keyword\", \"location\", \"email\"}\n\nExample:\n  curl -F file=@resume.pdf 'http://127.0.0.1:3000/resume'"
}

/// POST /resume
async fn upload_resume(
    State(state): State<AppState>,
    Query(params): Query<OverrideParams>,
    mut multipart: Multipart,
) -> Result<Json<ResumeResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
            let contents = field.bytes().await?;
            upload = Some((file_name, contents.to_vec()));
            break;
        }
    }
    let (file_name, contents) = upload.ok_or(ValidationError::MissingFile)?;

    state.set_status("Uploading and Extracting Information...").await;
    let overrides = SearchOverrides {
        keyword: params.keyword,
        location: params.location,
    };

    let search = match search_with_resume(&state.client, &file_name, contents, &overrides).await {
        Ok(search) => search,
        Err(e) => {
            state.set_status(e.to_string()).await;
            return Err(e.into());
        }
    };

    let session = state
        .replace_results(search.jobs, "Job Search Successful!")
        .await;
    info!(total = session.jobs.total(), "Session results replaced");

    Ok(Json(ResumeResponse {
        status: session.status,
        query: search.query,
        counts: session.jobs.counts(),
    }))
}

/// GET /jobs
async fn get_jobs(State(state): State<AppState>) -> Json<JobsResponse> {
    Json(state.snapshot().await.into())
}

/// GET /filters
async fn get_filters(State(state): State<AppState>) -> Json<FilterCriteria> {
    Json(state.snapshot().await.criteria)
}

/// PUT /filters
async fn put_filters(
    State(state): State<AppState>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<JobsResponse>, AppError> {
    let session = state.apply_criteria(criteria).await?;
    Ok(Json(session.into()))
}

/// DELETE /filters
async fn reset_filters(State(state): State<AppState>) -> Json<JobsResponse> {
    Json(state.reset_filters().await.into())
}

/// POST /reviews
async fn get_reviews(
    State(state): State<AppState>,
    Json(body): Json<ReviewsBody>,
) -> Result<Json<CompanyReviews>, AppError> {
    let reviews = state.client.company_reviews(&body.company_name).await?;
    Ok(Json(reviews))
}

/// POST /alerts
async fn create_alert(
    State(state): State<AppState>,
    Json(body): Json<AlertBody>,
) -> Result<(StatusCode, Json<AlertSubscription>), AppError> {
    let alert = AlertSubscription::new(&body.keyword, &body.location, &body.email, Utc::now())?;
    state.client.subscribe_alert(&alert).await?;
    info!(keyword = %alert.keyword, location = %alert.location, "Job alert created");
    Ok((StatusCode::CREATED, Json(alert)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregator::{Endpoints, JobCipherClient};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use common::{JobCollection, JobRecord, record::keys};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    // Port 9 (discard) has no listener, so any upstream call fails fast.
    fn offline_state() -> AppState {
        AppState::new(JobCipherClient::new(Endpoints::with_base("http://127.0.0.1:9")))
    }

    async fn loaded_state() -> AppState {
        let state = offline_state();
        let jobs = JobCollection::new(
            vec![
                JobRecord::new().with(keys::TITLE, "C++ Engineer").with(keys::COMPANY, "Acme"),
                JobRecord::new().with(keys::TITLE, "C Engineer").with(keys::COMPANY, "Acme"),
            ],
            vec![
                JobRecord::new()
                    .with(keys::JOB_TITLE, "Backend Developer")
                    .with(keys::EXPERIENCE, "5+ years"),
            ],
            vec![JobRecord::new().with(keys::TITLE, "SRE")],
        );
        state.replace_results(jobs, "Job Search Successful!").await;
        state
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str("--XBOUNDARY\r\n");
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str("--XBOUNDARY--\r\n");

        Request::builder()
            .method("POST")
            .uri("/resume")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_jobs_returns_everything_unfiltered() {
        let request = Request::builder().uri("/jobs").body(Body::empty()).unwrap();
        let (status, body) = send(loaded_state().await, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_results"], 4);
        assert_eq!(body["filtered_results"], 4);
        assert_eq!(body["counts"]["LinkedIn Jobs"], 2);
        assert_eq!(body["jobs"]["Naukri Jobs"][0]["title"], "Backend Developer");
        assert_eq!(body["status"], "Job Search Successful!");
    }

    #[tokio::test]
    async fn test_put_filters_applies_literal_keyword() {
        let state = loaded_state().await;
        let (status, body) = send(
            state.clone(),
            json_request("PUT", "/filters", json!({ "keyword": "C++" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filtered_results"], 1);
        assert_eq!(body["jobs"]["LinkedIn Jobs"][0]["title"], "C++ Engineer");
        assert_eq!(body["counts"]["CareerJet Jobs"], 0);

        let request = Request::builder().uri("/filters").body(Body::empty()).unwrap();
        let (_, criteria) = send(state, request).await;
        assert_eq!(criteria["keyword"], "C++");
    }

    #[tokio::test]
    async fn test_experience_ceiling_over_http() {
        let (_, body) = send(
            loaded_state().await,
            json_request("PUT", "/filters", json!({ "experience": 3 })),
        )
        .await;
        // Only the Naukri record states experience, and 5 > 3.
        assert_eq!(body["filtered_results"], 0);
    }

    #[tokio::test]
    async fn test_delete_filters_restores_results() {
        let state = loaded_state().await;
        send(state.clone(), json_request("PUT", "/filters", json!({ "company": "nobody" }))).await;

        let request = Request::builder()
            .method("DELETE")
            .uri("/filters")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filtered_results"], 4);
        assert_eq!(body["criteria"]["company"], Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_compensation_is_rejected() {
        let (status, body) = send(
            loaded_state().await,
            json_request("PUT", "/filters", json!({ "ctc_filters": "negotiable" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "FILTER_ERROR");
    }

    #[tokio::test]
    async fn test_blank_company_name_is_rejected() {
        let (status, body) = send(
            offline_state(),
            json_request("POST", "/reviews", json!({ "company_name": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please enter a company name");
    }

    #[tokio::test]
    async fn test_alert_requires_email() {
        let (status, body) = send(
            offline_state(),
            json_request("POST", "/alerts", json!({ "keyword": "Rust" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please login to create job alerts");
    }

    #[tokio::test]
    async fn test_resume_without_file_is_rejected() {
        let request = multipart_request(&[("note", None, "hello")]);
        let (status, body) = send(offline_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please select a file to upload");
    }

    #[tokio::test]
    async fn test_resume_upstream_failure_keeps_previous_results() {
        let state = loaded_state().await;
        let request = multipart_request(&[("file", Some("cv.pdf"), "%PDF-1.4")]);
        let (status, body) = send(state.clone(), request).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");

        let session = state.snapshot().await;
        assert_eq!(session.jobs.total(), 4);
        assert!(session.status.starts_with("Resume extraction"));
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = build_router(offline_state()).oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("POST   /resume"));
    }
}

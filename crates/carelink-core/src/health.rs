use axum::http::StatusCode;

/// `GET /healthz` — answers as long as the process is serving requests.
/// Checks against the database or the clinical-data server belong to the
/// owning service's deep `/health` handler.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

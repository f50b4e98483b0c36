use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use uuid::Uuid;

/// Stamps each request with a v7 UUID so ids in the logs sort by arrival.
#[derive(Clone, Default)]
pub struct SortableRequestId;

impl MakeRequestId for SortableRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let value = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(value))
    }
}

/// `x-request-id` layer for service routers.
pub fn request_id_layer() -> SetRequestIdLayer<SortableRequestId> {
    SetRequestIdLayer::new(
        axum::http::HeaderName::from_static("x-request-id"),
        SortableRequestId,
    )
}

use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::payment::{Payment, PaymentRequest},
    },
    axum::{
        Json, Router,
        body::Body,
        extract::{DefaultBodyLimit, Path, State, rejection::JsonRejection},
        http::{HeaderMap, Request, StatusCode},
        routing::{get, post},
    },
    std::time::Duration,
    tower::ServiceBuilder,
    tower_http::{
        catch_panic::CatchPanicLayer,
        request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
        timeout::TimeoutLayer,
        trace::TraceLayer,
    },
    tracing::Span,
};

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route("/ping", get(ping))
        .route("/payments", post(create_payment))
        .route("/payments/{id}", get(get_payment));

    // Outermost first: the id is set before the span opens, and panics
    // become 500s inside the span.
    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CatchPanicLayer::new())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(DefaultBodyLimit::max(16 * 1024)),
        )
        .with_state(state)
}

fn request_span(req: &Request<Body>) -> Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id,
    )
}

async fn ping() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<Payment>, ApiError> {
    let Json(mut req) = body?;

    // A non-empty header wins over a key sent in the body.
    if let Some(key) = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|k| !k.is_empty())
    {
        req.idempotency_key = Some(key.to_string());
    }

    tracing::info!(currency = %req.currency, amount = req.amount, "creating payment");
    let payment = state.payments.create(req).await?;
    Ok(Json(payment))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, ApiError> {
    let payment = state.payments.get(&id).await?;
    Ok(Json(payment))
}

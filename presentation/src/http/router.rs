use super::handlers::{auth, health::health, ingredients, kids, remedies, shopping_lists};
use super::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Level;

/// Build the API router. State is applied by the caller with `.with_state(...)`.
pub fn create_router(body_limit: usize) -> Router<AppState> {
    let cors = CorsLayer::permissive();
    let body_limit = RequestBodyLimitLayer::new(body_limit);
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &axum::http::Request<_>| {
            let req_id = req
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri(),
                req_id
            )
        })
        .on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
        .on_response(
            tower_http::trace::DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Millis),
        );
    let req_id = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/kids", post(kids::create_kid).get(kids::list_kids))
        .route("/kids/{kid_id}", put(kids::update_kid))
        .route("/kids/{kid_id}/symptom", put(kids::update_symptom))
        .route("/kids/{kid_id}/remedies", get(kids::remedy_history))
        .route(
            "/ingredients",
            post(ingredients::add_ingredient)
                .get(ingredients::list_ingredients)
                .put(ingredients::update_ingredient),
        )
        .route(
            "/remedies/{provider}/{kid_id}",
            get(remedies::generate_remedy),
        )
        .route("/shopping-lists", get(shopping_lists::list_shopping_lists))
        .layer(cors)
        .layer(trace)
        .layer(req_id)
        .layer(body_limit)
}

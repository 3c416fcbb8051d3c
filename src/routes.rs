use axum::{
    extract::{rejection::PathRejection, FromRequestParts, Path, State},
    http::{request::Parts, Method},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use dioxus::prelude::{Element, Properties, VirtualDom};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::debug;

use crate::{
    counter::{CounterDisplay, CounterDisplayProps, CounterPayload},
    error::{AppError, ParamError},
    params::{resolve, ParamSource, RouteParams},
    shell::PageShell,
    state::AppState,
    views::{
        NoteView, NoteViewProps, SubmissionView, SubmissionViewProps, TestSummary, TestView,
        TestViewProps, TestsList, TestsListProps, TESTS_COLLECTION,
    },
};

// page routes are rendered server side into the bundle's index.html; anything
// else falls through to the client bundle

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    let client_bundle = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(counter_page))
        .route("/note/:_id", get(note_page))
        .route("/test/:_id", get(test_page))
        .route("/submission/:_id", get(submission_page))
        .route("/tests", get(tests_page))
        .route("/api/counter", get(counter_api))
        .route("/api/tests", get(tests_api))
        .route("/health", get(health))
        .fallback_service(client_bundle)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn unreadable(rejection: PathRejection) -> ParamError {
    ParamError::Unreadable(rejection.body_text())
}

/// Parameter source that reads `_id` from the request only when awaited.
fn deferred_params(mut parts: Parts) -> ParamSource {
    ParamSource::deferred(async move {
        let Path(params) = Path::<RouteParams>::from_request_parts(&mut parts, &())
            .await
            .map_err(unreadable)?;
        Ok(params)
    })
}

fn render_page<P: Clone + Properties + 'static>(
    shell: &PageShell,
    title: &str,
    component: fn(P) -> Element,
    props: P,
) -> Html<String> {
    let mut dom = VirtualDom::new_with_props(component, props);
    dom.rebuild_in_place();
    let body = dioxus_ssr::render(&dom);

    Html(shell.render(title, &body))
}

async fn note_page(
    State(state): State<AppState>,
    params: Result<Path<RouteParams>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let Path(params) = params.map_err(unreadable)?;
    let id = resolve(ParamSource::Ready(params)).await?;

    debug!("Rendering note {id}");
    Ok(render_page(&state.shell, "Note", NoteView, NoteViewProps { id }))
}

async fn test_page(State(state): State<AppState>, parts: Parts) -> Result<Html<String>, AppError> {
    let id = resolve(deferred_params(parts)).await?;

    debug!("Rendering test {id}");
    Ok(render_page(&state.shell, "Test", TestView, TestViewProps { id }))
}

async fn submission_page(State(state): State<AppState>, parts: Parts) -> Result<Html<String>, AppError> {
    let id = resolve(deferred_params(parts)).await?;

    debug!("Rendering submission {id}");
    Ok(render_page(&state.shell, "Submission", SubmissionView, SubmissionViewProps { id }))
}

async fn load_tests(state: &AppState) -> Result<Vec<TestSummary>, AppError> {
    let documents = state.store.list(TESTS_COLLECTION).await?;
    Ok(documents.iter().filter_map(TestSummary::from_document).collect())
}

async fn tests_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let tests = load_tests(&state).await?;
    Ok(render_page(&state.shell, "Tests", TestsList, TestsListProps { tests }))
}

async fn counter_page(State(state): State<AppState>) -> Html<String> {
    let payload = state.counter.load().await;
    render_page(&state.shell, "Home", CounterDisplay, CounterDisplayProps { text: payload.text() })
}

async fn counter_api(State(state): State<AppState>) -> Json<CounterPayload> {
    Json(state.counter.load().await)
}

async fn tests_api(State(state): State<AppState>) -> Result<Json<Vec<TestSummary>>, AppError> {
    Ok(Json(load_tests(&state).await?))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "studyhall",
    }))
}

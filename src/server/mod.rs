use axum::{
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::library::Library;

pub mod extract;
pub mod routes;

/// Server state
pub struct AppState {
    pub library: Library,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/books", get(routes::list_books).post(routes::add_book))
        .route("/books/recent", get(routes::recent_books))
        .route("/books/{id}", get(routes::get_book).delete(routes::delete_book))
        .route("/books/{id}/progress", put(routes::update_progress))
        .route("/books/{id}/summaries", get(routes::list_summaries).post(routes::summarize))
        .route("/books/{id}/summaries/latest", get(routes::latest_summary))
        .route("/stats", get(routes::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, library: Library) -> anyhow::Result<()> {
    let state = Arc::new(AppState { library });
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

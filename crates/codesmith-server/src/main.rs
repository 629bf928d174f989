//! Binary entrypoint for the codesmith HTTP server.
//!
//! Reads configuration from environment variables (a `.env` file is loaded
//! if present):
//! - `CODESMITH_DB_PATH`: SQLite database file path (default: "codesmith.db")
//! - `CODESMITH_PORT`: Server listen port (default: "3000")
//! - `CODESMITH_API_KEY`: Provider API key (required)
//! - `CODESMITH_API_BASE_URL`: OpenAI-compatible base URL (default: OpenRouter)
//! - `CODESMITH_MODEL`: Model slug to request

use std::sync::Arc;

use codesmith_server::model::{ChatModel, CodeModel, ModelConfig};
use codesmith_server::router::build_router;
use codesmith_server::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_path =
        std::env::var("CODESMITH_DB_PATH").unwrap_or_else(|_| "codesmith.db".to_string());
    let port = std::env::var("CODESMITH_PORT").unwrap_or_else(|_| "3000".to_string());

    let config = ModelConfig::from_env().expect("Failed to read model configuration");
    let model: Arc<dyn CodeModel> = Arc::new(ChatModel::new(config));

    let state = AppState::new(&db_path, model).expect("Failed to initialize application state");

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("codesmith server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

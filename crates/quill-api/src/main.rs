//! quill-api - HTTP API server for the quill note backend.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use quill_api::handlers::notes;
use quill_api::services::{NoteAccessController, NoteService, RedisListCache};
use quill_api::AppState;
use quill_core::{CacheConsistency, CollaborationDirectory, ListCache, NoteStore};
use quill_db::Database;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

fn cache_consistency_from_env() -> quill_core::Result<CacheConsistency> {
    match std::env::var("NOTE_CACHE_CONSISTENCY") {
        Ok(raw) => CacheConsistency::parse(&raw).ok_or_else(|| {
            quill_core::Error::Config(format!(
                "NOTE_CACHE_CONSISTENCY must be \"eventual\" or \"strict\", got {:?}",
                raw
            ))
        }),
        Err(_) => Ok(CacheConsistency::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "quill_api=debug,quill_db=debug,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = Database::connect(&database_url).await?;

    let cache = RedisListCache::from_env().await;
    let consistency = cache_consistency_from_env()?;

    let store: Arc<dyn NoteStore> = Arc::new(db.notes);
    let directory: Arc<dyn CollaborationDirectory> = Arc::new(db.collaborations);
    let cache: Arc<dyn ListCache> = Arc::new(cache);

    let state = AppState {
        notes: NoteService::new(
            store.clone(),
            directory.clone(),
            cache,
            consistency,
        ),
        access: NoteAccessController::new(store, directory),
    };

    let app = Router::new()
        .route("/notes", post(notes::create_note).get(notes::list_notes))
        .route(
            "/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!(
        subsystem = "api",
        op = "startup",
        addr = %bind_addr,
        cache_consistency = ?consistency,
        "quill-api listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

//! Blog server with on-demand rendering
//!
//! Serves the generated public directory, regenerating the home page when
//! its revalidation interval has elapsed and rendering post pages on first
//! request (no post paths are enumerated at build time).

use anyhow::Result;
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cache::StampDb;
use crate::cms::{CmsClient, CmsError};
use crate::content::normalize;
use crate::generator::{post_output_path, Generator, PostCard};
use crate::Spacetraveling;

/// Server state
struct ServerState {
    app: Spacetraveling,
    client: CmsClient,
    generator: Generator,
    stamps: Mutex<StampDb>,
}

/// One page of the listing as returned by the load-more endpoint
#[derive(Serialize)]
struct FeedPage {
    posts: Vec<PostCard>,
    next_page: Option<String>,
}

#[derive(Deserialize)]
struct LoadMoreParams {
    cursor: String,
}

/// Start the blog server
pub async fn start(app: &Spacetraveling, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        app: app.clone(),
        client: app.cms_client()?,
        generator: Generator::new(app)?,
        stamps: Mutex::new(StampDb::load(&app.base_dir)),
    });

    let serve_dir = ServeDir::new(&app.public_dir).append_index_html_on_directories(true);

    let router = Router::new()
        .route("/", get(home_handler))
        .route("/post/:slug", get(post_handler))
        .route("/api/posts", get(load_more_handler))
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Serve the home page, regenerating it when stale or missing.
/// When regeneration fails but a copy exists, the stale copy is served.
async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    let rel = "index.html";
    let path = state.app.public_dir.join(rel);

    let stale = {
        let stamps = state.stamps.lock().await;
        stamps.is_stale(rel, state.app.config.revalidate_secs)
    };

    if stale || !path.exists() {
        if let Err(e) = regenerate_home(&state).await {
            if path.exists() {
                tracing::warn!("Revalidation failed, serving stale home page: {e:#}");
            } else {
                tracing::error!("Home page generation failed: {e:#}");
                return (StatusCode::BAD_GATEWAY, "Content service unavailable").into_response();
            }
        }
    }

    serve_html(&path).await
}

async fn regenerate_home(state: &ServerState) -> Result<()> {
    let props = state.generator.home_props(&state.client).await?;
    let rel = state.generator.write_home(&props.props)?;

    let mut stamps = state.stamps.lock().await;
    stamps.touch(&rel);
    stamps.save(&state.app.base_dir)?;
    Ok(())
}

/// Serve a post page, rendering it on demand the first time it is requested
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    AxumPath(slug): AxumPath<String>,
) -> Response {
    let rel = post_output_path(&slug);
    let path = state.app.public_dir.join(&rel);

    if !path.exists() {
        tracing::info!("Rendering post on demand: {}", slug);
        match render_post_on_demand(&state, &slug).await {
            Ok(()) => {}
            Err(e) => return post_error_response(&slug, e),
        }
    }

    serve_html(&path).await
}

async fn render_post_on_demand(state: &ServerState, slug: &str) -> Result<()> {
    let props = state.generator.post_props(&state.client, slug).await?;
    let rel = state.generator.write_post(&props.props)?;

    let mut stamps = state.stamps.lock().await;
    stamps.touch(&rel);
    stamps.save(&state.app.base_dir)?;
    Ok(())
}

fn post_error_response(slug: &str, err: anyhow::Error) -> Response {
    match err.downcast_ref::<CmsError>() {
        Some(CmsError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, "Post not found").into_response()
        }
        Some(CmsError::FetchFailure(_)) => {
            tracing::error!("Fetching post {slug} failed: {err:#}");
            (StatusCode::BAD_GATEWAY, "Content service unavailable").into_response()
        }
        _ => {
            tracing::error!("Rendering post {slug} failed: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Rendering failed").into_response()
        }
    }
}

/// Follow one next-page cursor and answer the normalized batch as JSON
async fn load_more_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<LoadMoreParams>,
) -> Response {
    if !state.client.trusted_cursor(&params.cursor) {
        return (StatusCode::BAD_REQUEST, "Cursor not recognized").into_response();
    }

    let batch = match state.client.get_page(&params.cursor).await {
        Ok(batch) => batch,
        Err(e) => {
            tracing::error!("Load-more fetch failed: {e}");
            return (StatusCode::BAD_GATEWAY, "Content service unavailable").into_response();
        }
    };

    let summaries = match normalize::batch(&batch) {
        Ok(summaries) => summaries,
        Err(e) => {
            tracing::error!("Load-more batch rejected: {e}");
            return (StatusCode::BAD_GATEWAY, "Malformed content").into_response();
        }
    };

    let page = FeedPage {
        posts: summaries
            .iter()
            .map(|s| state.generator.post_card(s))
            .collect(),
        next_page: batch.next_cursor(),
    };

    Json(page).into_response()
}

/// Serve a generated HTML file
async fn serve_html(path: &Path) -> Response {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Html(content).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{self, Credit, ImageSet, ListType, Movie, MovieList};
use crate::templates;
use crate::tmdb::{MovieCatalog, TmdbClient};
use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn MovieCatalog>,
    pub homepage_limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    list_type: Option<String>,
}

pub async fn run_server(config: Config) -> Result<()> {
    let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbClient::from_config(&config)?);
    info!("Using TMDB at {}", config.tmdb.base_url);

    let state = AppState {
        catalog,
        homepage_limit: config.homepage_limit,
    };
    let app = build_router(state).layer(TraceLayer::new_for_http());

    info!("Listening on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(homepage))
        .route("/movie/:movie_id", get(movie_details))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn homepage(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> AppResult<Html<String>> {
    let selected = selected_list(query.list_type.as_deref());
    let list = state.catalog.get_movies_list(selected.as_str()).await?;

    let mut movies = models::view::<MovieList>(&list).results;
    movies.truncate(state.homepage_limit);
    debug!(list_type = selected.as_str(), count = movies.len(), "Rendering homepage");

    Ok(Html(templates::home_page(&movies, selected)))
}

async fn movie_details(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Html<String>> {
    let movie_id: u64 = raw_id
        .parse()
        .map_err(|e| AppError::bad_request("Movie ids are numeric.", e))?;
    let (details, cast, images) = tokio::try_join!(
        state.catalog.get_single_movie(movie_id),
        state.catalog.get_single_movie_cast(movie_id),
        state.catalog.get_movie_images(movie_id),
    )
    .map_err(AppError::for_movie)?;

    let movie: Movie = models::view(&details);
    let cast: Vec<Credit> = models::view_list(&cast);
    let images: ImageSet = models::view(&images);
    debug!(movie_id, cast = cast.len(), "Rendering movie page");

    Ok(Html(templates::movie_page(&movie, &cast, &images)))
}

/// Unknown categories fall back to the default list instead of reaching TMDB.
fn selected_list(raw: Option<&str>) -> ListType {
    match raw {
        None => ListType::default(),
        Some(value) => ListType::parse(value).unwrap_or_else(|| {
            warn!("Unknown list_type '{}', using default", value);
            ListType::default()
        }),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}

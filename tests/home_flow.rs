use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use moviedeck::app::{build_router, AppState};
use moviedeck::config::TmdbConfig;
use moviedeck::error::TmdbError;
use moviedeck::tmdb::{MovieCatalog, TmdbClient};
use moviedeck::transport::Transport;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Movie(u64),
    Cast(u64),
    Images(u64),
    List(String),
}

#[derive(Default)]
struct FakeCatalog {
    calls: Mutex<Vec<Call>>,
    fail_with: Option<u16>,
}

impl FakeCatalog {
    fn failing(status: u16) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(status),
        }
    }

    fn record(&self, call: Call) -> Result<(), TmdbError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with {
            Some(status) => Err(TmdbError::Status {
                status,
                url: "https://api.themoviedb.org/3/secret-internal-path".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MovieCatalog for FakeCatalog {
    async fn get_single_movie(&self, movie_id: u64) -> Result<Value, TmdbError> {
        self.record(Call::Movie(movie_id))?;
        Ok(matrix())
    }

    async fn get_single_movie_cast(&self, movie_id: u64) -> Result<Value, TmdbError> {
        self.record(Call::Cast(movie_id))?;
        Ok(json!([
            {"name": "Keanu Reeves", "character": "Neo"},
            {"name": "Laurence Fishburne", "character": "Morpheus"},
            {"name": "Carrie-Anne Moss", "character": "Trinity"}
        ]))
    }

    async fn get_movie_images(&self, movie_id: u64) -> Result<Value, TmdbError> {
        self.record(Call::Images(movie_id))?;
        Ok(json!({
            "backdrops": [{"file_path": "/path/to/backdrop1.jpg"}],
            "posters": [{"file_path": "/path/to/poster1.jpg"}]
        }))
    }

    async fn get_movies_list(&self, list_type: &str) -> Result<Value, TmdbError> {
        self.record(Call::List(list_type.to_string()))?;
        Ok(json!({ "page": 1, "results": vec![matrix(); 10], "total_pages": 1 }))
    }
}

fn matrix() -> Value {
    json!({
        "title": "The Matrix",
        "id": 603,
        "overview": "A computer hacker learns from mysterious rebels about the true nature of his reality...",
        "release_date": "1999-03-30"
    })
}

fn app_with(catalog: Arc<FakeCatalog>) -> Router {
    build_router(AppState {
        catalog,
        homepage_limit: 8,
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::get(uri)
        .body(Body::empty())
        .expect("failed to build request");
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn homepage_calls_list_once_per_list_type() {
    for list_type in ["popular", "top_rated", "now_playing", "upcoming"] {
        let catalog = Arc::new(FakeCatalog::default());
        let (status, _body) = get(
            app_with(catalog.clone()),
            &format!("/?list_type={list_type}"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(catalog.calls(), vec![Call::List(list_type.to_string())]);
    }
}

#[tokio::test]
async fn homepage_defaults_to_popular() {
    let catalog = Arc::new(FakeCatalog::default());
    let (status, body) = get(app_with(catalog.clone()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(catalog.calls(), vec![Call::List("popular".to_string())]);
    assert!(body.contains("Popular movies"));
}

#[tokio::test]
async fn homepage_renders_at_most_the_configured_number_of_movies() {
    let catalog = Arc::new(FakeCatalog::default());
    let (_, body) = get(app_with(catalog), "/?list_type=top_rated").await;

    assert_eq!(body.matches(r#"href="/movie/603""#).count(), 8);
}

#[tokio::test]
async fn homepage_upstream_failure_is_a_generic_bad_gateway() {
    let catalog = Arc::new(FakeCatalog::failing(500));
    let (status, body) = get(app_with(catalog.clone()), "/?list_type=upcoming").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(catalog.calls().len(), 1);
    assert!(!body.contains("secret-internal-path"));
}

#[tokio::test]
async fn homepage_upstream_404_is_bad_gateway() {
    let catalog = Arc::new(FakeCatalog::failing(404));
    let (status, body) = get(app_with(catalog.clone()), "/?list_type=popular").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(catalog.calls(), vec![Call::List("popular".to_string())]);
    assert!(!body.contains("Movie not found."));
}

#[tokio::test]
async fn movie_page_fetches_details_cast_and_images() {
    let catalog = Arc::new(FakeCatalog::default());
    let (status, body) = get(app_with(catalog.clone()), "/movie/603").await;

    assert_eq!(status, StatusCode::OK);
    let mut calls = catalog.calls();
    calls.sort_by_key(|c| format!("{c:?}"));
    assert_eq!(
        calls,
        vec![Call::Cast(603), Call::Images(603), Call::Movie(603)]
    );
    assert!(body.contains("The Matrix"));
    assert!(body.contains("Keanu Reeves"));
    assert!(body.contains("Morpheus"));
    assert!(body.contains("https://image.tmdb.org/t/p/w780/path/to/backdrop1.jpg"));
}

#[tokio::test]
async fn movie_page_upstream_404_is_not_found() {
    let catalog = Arc::new(FakeCatalog::failing(404));
    let (status, body) = get(app_with(catalog), "/movie/999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Movie not found."));
}

#[tokio::test]
async fn movie_page_upstream_failure_is_bad_gateway() {
    let catalog = Arc::new(FakeCatalog::failing(503));
    let (status, _body) = get(app_with(catalog), "/movie/603").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn movie_page_non_numeric_id_is_html_bad_request() {
    let catalog = Arc::new(FakeCatalog::default());
    let (status, body) = get(app_with(catalog.clone()), "/movie/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("<h1>400 Bad Request</h1>"));
    assert!(body.contains("Movie ids are numeric."));
    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get(app_with(Arc::new(FakeCatalog::default())), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

struct StaticTransport {
    body: Value,
    urls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Transport for StaticTransport {
    async fn get_json(&self, url: &str, _bearer_token: &str) -> Result<Value, TmdbError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(self.body.clone())
    }
}

#[tokio::test]
async fn homepage_over_real_client_hits_list_endpoint() {
    let transport = Arc::new(StaticTransport {
        body: json!({ "page": 1, "results": [matrix()] }),
        urls: Mutex::new(Vec::new()),
    });
    let client = TmdbClient::new(
        transport.clone(),
        TmdbConfig::new("https://api.themoviedb.org/3", "token"),
    );
    let app = build_router(AppState {
        catalog: Arc::new(client),
        homepage_limit: 8,
    });

    let (status, body) = get(app, "/?list_type=now_playing").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The Matrix"));
    assert_eq!(
        *transport.urls.lock().unwrap(),
        vec!["https://api.themoviedb.org/3/movie/now_playing".to_string()]
    );
}

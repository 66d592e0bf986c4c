use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, RwLock},
};

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tokio::{net::TcpListener, sync::mpsc::Receiver, task::JoinHandle};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    constants::MAX_BOARD_SETS,
    domain::BenchmarkSet,
    web::{
        browser::{BrowserLauncher, launch_detached},
        errors::PresenterError,
        template::Render,
    },
};

/// The latest benchmark sets received, in arrival order.
///
/// Holds at most `limit` sets; pushing beyond that drops the oldest one.
#[derive(Clone, Debug)]
pub struct ResultBoard {
    sets: Arc<RwLock<VecDeque<BenchmarkSet>>>,
    limit: usize,
}

impl Default for ResultBoard {
    fn default() -> Self {
        Self::with_limit(MAX_BOARD_SETS)
    }
}

impl ResultBoard {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            sets: Arc::new(RwLock::new(VecDeque::new())),
            limit: limit.max(1),
        }
    }

    pub fn push(&self, set: BenchmarkSet) {
        let mut sets = self
            .sets
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        while sets.len() >= self.limit {
            sets.pop_front();
        }
        sets.push_back(set);
    }

    pub fn snapshot(&self) -> Vec<BenchmarkSet> {
        self.sets
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

#[derive(Clone)]
pub struct DashboardState {
    pub renderer: Arc<dyn Render>,
    pub board: ResultBoard,
}

pub fn dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler(State(state): State<DashboardState>) -> Response {
    let results = state.board.snapshot();
    match state.renderer.render(&results) {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render dashboard");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Drains the result stream into the board until every producer is gone.
pub fn collect_results(mut results: Receiver<BenchmarkSet>, board: ResultBoard) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(set) = results.recv().await {
            tracing::debug!(label = %set.label, "Received benchmark set");
            board.push(set);
        }
        tracing::debug!("Result stream closed");
    })
}

pub fn dashboard_url(addr: SocketAddr) -> String {
    if addr.ip().is_loopback() || addr.ip().is_unspecified() {
        format!("http://localhost:{}", addr.port())
    } else {
        format!("http://{}", addr)
    }
}

pub async fn bind_dashboard(bind: &str) -> Result<TcpListener, PresenterError> {
    TcpListener::bind(bind)
        .await
        .map_err(|source| PresenterError::Bind {
            addr: bind.to_string(),
            source,
        })
}

/// Serves the dashboard on an already bound listener.
///
/// Starts collecting `results` and fires the browser launch, then serves
/// until the listener fails.
pub async fn serve_dashboard(
    listener: TcpListener,
    renderer: Arc<dyn Render>,
    results: Receiver<BenchmarkSet>,
    launcher: Arc<dyn BrowserLauncher>,
) -> Result<(), PresenterError> {
    let addr = listener.local_addr().map_err(PresenterError::Serve)?;
    let board = ResultBoard::default();
    collect_results(results, board.clone());

    let url = dashboard_url(addr);
    tracing::info!(%url, "Dashboard listening");
    launch_detached(launcher, url);

    let app = dashboard_router(DashboardState { renderer, board });
    axum::serve(listener, app)
        .await
        .map_err(PresenterError::Serve)
}

/// Binds `bind` and serves the dashboard; blocks for the life of the server.
///
/// A bind failure is returned before any browser launch is attempted.
#[tracing::instrument(skip(renderer, results, launcher))]
pub async fn start_server(
    bind: &str,
    renderer: Arc<dyn Render>,
    results: Receiver<BenchmarkSet>,
    launcher: Arc<dyn BrowserLauncher>,
) -> Result<(), PresenterError> {
    let listener = bind_dashboard(bind).await?;
    serve_dashboard(listener, renderer, results, launcher).await
}

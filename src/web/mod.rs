//! Browser front end: the rendering and input collaborator. Serves the
//! embedded canvas UI, streams per-tick frames over SSE, and feeds button
//! and click input into the placement controller. The simulation core never
//! sees any of this.

mod assets;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context as _, Result};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::buildings::BuildingKind;
use crate::engine::{Engine, EngineBuilder, EngineSettings};
use crate::placement::{ClickOutcome, PlacementController};
use crate::scenario::Scenario;
use crate::world::{World, WorldSnapshot};

/// One frame pushed to the browser: the world view plus what the placement
/// controller is currently waiting for.
#[derive(Clone, Serialize)]
pub struct UiFrame {
    pub snapshot: WorldSnapshot,
    pub armed: Option<BuildingKind>,
}

#[derive(Clone, Serialize)]
pub struct StateEnvelope {
    pub scenario: String,
    pub grid_size: usize,
    pub cell_size_px: u32,
    pub frame: UiFrame,
}

/// Everything the timer task and the request handlers mutate, behind one
/// lock so no two callbacks ever touch the world concurrently.
struct SimState {
    engine: Engine,
    world: World,
    placement: PlacementController,
}

struct AppState {
    sim: Mutex<SimState>,
    broadcaster: broadcast::Sender<String>,
    scenario_name: String,
    grid_size: usize,
    cell_size_px: u32,
    tick_interval_ms: u64,
}

pub struct WebServerConfig {
    pub scenario: Scenario,
    pub snapshot_interval: u64,
    pub snapshot_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        scenario,
        snapshot_interval,
        snapshot_dir,
        host,
        port,
    } = config;

    let world = scenario.build_world()?;
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        snapshot_interval_ticks: snapshot_interval,
        snapshot_dir,
    };
    let engine = EngineBuilder::new(settings).with_standard_systems().build();
    let placement = PlacementController::new(scenario.cell_size_px);

    let (tx, _) = broadcast::channel::<String>(256);
    let state = Arc::new(AppState {
        sim: Mutex::new(SimState {
            engine,
            world,
            placement,
        }),
        broadcaster: tx,
        scenario_name: scenario.name.clone(),
        grid_size: scenario.grid_size,
        cell_size_px: scenario.cell_size_px,
        tick_interval_ms: scenario.tick_interval_ms,
    });

    let ticker = state.clone();
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(Duration::from_millis(ticker.tick_interval_ms));
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the zeroth firing is immediate; the first step waits a full period
        timer.tick().await;
        loop {
            timer.tick().await;
            let payload = {
                let mut sim = ticker.sim.lock().expect("sim lock poisoned");
                let SimState {
                    engine,
                    world,
                    placement,
                } = &mut *sim;
                match engine.step(world) {
                    Ok(snapshot) => {
                        let frame = UiFrame {
                            snapshot,
                            armed: placement.armed_kind(),
                        };
                        serde_json::to_string(&frame).ok()
                    }
                    Err(err) => {
                        // the core never fails; this is snapshot IO
                        tracing::error!(error = %err, "tick failed");
                        None
                    }
                }
            };
            if let Some(payload) = payload {
                let _ = ticker.broadcaster.send(payload);
            }
        }
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/api/state", get(current_state))
        .route("/api/arm/:kind", post(arm))
        .route("/api/click", post(click))
        .route("/api/events", get(stream_events))
        .with_state(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    tracing::info!(%addr, scenario = %scenario.name, "town UI listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down town UI");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        assets::STYLES_CSS,
    )
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        assets::APP_JS,
    )
}

async fn current_state(State(state): State<Arc<AppState>>) -> Json<StateEnvelope> {
    let frame = {
        let sim = state.sim.lock().expect("sim lock poisoned");
        UiFrame {
            snapshot: sim.world.snapshot(&state.scenario_name),
            armed: sim.placement.armed_kind(),
        }
    };
    Json(StateEnvelope {
        scenario: state.scenario_name.clone(),
        grid_size: state.grid_size,
        cell_size_px: state.cell_size_px,
        frame,
    })
}

#[derive(Serialize)]
struct ArmResponse {
    armed: BuildingKind,
}

async fn arm(State(state): State<Arc<AppState>>, Path(kind): Path<String>) -> Response {
    let Ok(kind) = kind.parse::<BuildingKind>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut sim = state.sim.lock().expect("sim lock poisoned");
    sim.placement.arm(kind);
    tracing::debug!(%kind, "placement armed");
    Json(ArmResponse { armed: kind }).into_response()
}

#[derive(Deserialize)]
struct ClickRequest {
    x: i32,
    y: i32,
}

#[derive(Serialize)]
struct ClickResponse {
    placed: bool,
    armed: Option<BuildingKind>,
    frame: Option<UiFrame>,
}

async fn click(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClickRequest>,
) -> Json<ClickResponse> {
    let mut sim = state.sim.lock().expect("sim lock poisoned");
    let SimState {
        world, placement, ..
    } = &mut *sim;
    let outcome = placement.click(world, request.x, request.y);
    let response = match outcome {
        ClickOutcome::Placed { x, y, kind } => {
            tracing::debug!(%kind, x, y, "building placed");
            // redraw every viewer right away rather than waiting for the tick
            let frame = UiFrame {
                snapshot: world.snapshot(&state.scenario_name),
                armed: None,
            };
            if let Ok(payload) = serde_json::to_string(&frame) {
                let _ = state.broadcaster.send(payload);
            }
            ClickResponse {
                placed: true,
                armed: None,
                frame: Some(frame),
            }
        }
        ClickOutcome::Rejected(_) | ClickOutcome::NotArmed => ClickResponse {
            placed: false,
            armed: placement.armed_kind(),
            frame: None,
        },
    };
    Json(response)
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}

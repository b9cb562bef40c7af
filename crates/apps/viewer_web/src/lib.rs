use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use navigation::{AssetLoadFailure, Session, SwapTicket, ViewerConfig};
use runtime::Generation;
use scene::camera::LookCamera;
use tour::{MANIFEST_VERSION, TourManifest, ViewpointGraph, default_tour};

mod host;
mod loading;

use host::WebHost;
use loading::LoadingScreen;

const LOOK_SPEED: f64 = 0.005;

struct ViewerState {
    config: ViewerConfig,
    session: Option<Session<WebHost>>,
    /// Last swap generation handed out; the next session continues after it.
    last_generation: Generation,
    camera: LookCamera,
    canvas_width: f64,
    canvas_height: f64,
}

#[derive(Debug, Serialize)]
struct ViewerStatus<'a> {
    tour: Option<&'a str>,
    viewpoint: Option<&'a str>,
    buttons: usize,
    busy: bool,
    generation: u64,
}

thread_local! {
    static STATE: RefCell<ViewerState> = RefCell::new(ViewerState {
        config: ViewerConfig::default(),
        session: None,
        last_generation: Generation(0),
        camera: LookCamera::new(ViewerConfig::default().fov_horizontal),
        canvas_width: 1280.0,
        canvas_height: 720.0,
    });

    // Completions reported while the state is borrowed are replayed afterwards.
    static COMPLETIONS: RefCell<Vec<(SwapTicket, Result<(), String>)>> =
        const { RefCell::new(Vec::new()) };
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    tracing_wasm::set_as_global_default();
    Ok(())
}

/// Replaces the viewer configuration. Takes effect on the next tour start.
#[wasm_bindgen]
pub fn set_config(json: &str) -> Result<(), JsValue> {
    let config = ViewerConfig::from_json_str(json).map_err(to_js)?;
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.camera = LookCamera::new(config.fov_horizontal);
        s.config = config;
    });
    Ok(())
}

#[wasm_bindgen]
pub fn start_default_tour() -> Result<(), JsValue> {
    let asset_root = STATE.with(|state| state.borrow().config.asset_root.clone());
    let graph = default_tour(&asset_root).map_err(to_js)?;
    let started = start_session(graph);
    replay_completions();
    started
}

/// Fetches a tour manifest and starts it. Relative asset paths resolve
/// against the manifest's directory.
#[wasm_bindgen]
pub fn load_tour(url: String) {
    spawn_local(async move {
        let graph = match fetch_tour(&url).await {
            Ok(graph) => graph,
            Err(err) => {
                tracing::error!(url = %url, error = ?err, "failed to load tour");
                return;
            }
        };
        if let Err(err) = start_session(graph) {
            tracing::error!(url = %url, error = ?err, "failed to start tour");
        }
        replay_completions();
    });
}

#[wasm_bindgen]
pub fn set_canvas_size(width: f64, height: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.canvas_width = width;
        s.canvas_height = height;
    });
}

/// Look around. Intended usage: call with pointer drag delta in pixels.
#[wasm_bindgen]
pub fn camera_look(delta_x_px: f64, delta_y_px: f64) {
    STATE.with(|state| {
        state
            .borrow_mut()
            .camera
            .look(delta_x_px, delta_y_px, LOOK_SPEED);
    });
    replay_completions();
}

/// Current camera orientation as `[yaw, pitch, fov]` in radians.
#[wasm_bindgen]
pub fn camera_orientation() -> Vec<f64> {
    STATE.with(|state| {
        let camera = state.borrow().camera;
        vec![camera.yaw_rad, camera.pitch_rad, camera.fov_horizontal_rad()]
    })
}

/// Hover highlight for the button under the pointer.
#[wasm_bindgen]
pub fn pointer_move(x_px: f64, y_px: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let index = button_under_pointer(&s, x_px, y_px);
        if let Some(session) = s.session.as_mut() {
            session.hover(index);
        }
    });
    replay_completions();
}

/// Clicks the button under the pointer. Returns whether a transition ran.
#[wasm_bindgen]
pub fn pointer_click(x_px: f64, y_px: f64) -> Result<bool, JsValue> {
    let result = STATE.with(|state| {
        let mut s = state.borrow_mut();
        let index = button_under_pointer(&s, x_px, y_px);
        let Some(session) = s.session.as_mut() else {
            return Ok(false);
        };
        if let Some(index) = index {
            session.activate(index);
        }
        let report = session.pump().map_err(to_js)?;
        Ok(report.is_some())
    });
    replay_completions();
    result
}

/// Completion of the texture request tagged `generation`.
#[wasm_bindgen]
pub fn texture_loaded(generation: f64, ok: bool, reason: Option<String>) {
    let ticket = SwapTicket {
        generation: Generation(generation as u64),
    };
    let result = if ok {
        Ok(())
    } else {
        Err(reason.unwrap_or_else(|| "unknown error".to_string()))
    };
    COMPLETIONS.with(|queue| queue.borrow_mut().push((ticket, result)));
    replay_completions();
}

#[wasm_bindgen]
pub fn current_viewpoint() -> Option<String> {
    STATE.with(|state| {
        let s = state.borrow();
        let session = s.session.as_ref()?;
        session.current_viewpoint().map(ToString::to_string)
    })
}

/// Snapshot of the session as JSON, for page scripts and debugging.
#[wasm_bindgen]
pub fn status_json() -> Result<String, JsValue> {
    STATE.with(|state| {
        let s = state.borrow();
        let status = match s.session.as_ref() {
            Some(session) => ViewerStatus {
                tour: session.graph().name(),
                viewpoint: session.current_viewpoint().map(|id| id.as_str()),
                buttons: session.active_hotspots().len(),
                busy: session.is_busy(),
                generation: session.generation().0,
            },
            None => ViewerStatus {
                tour: None,
                viewpoint: None,
                buttons: 0,
                busy: false,
                generation: 0,
            },
        };
        serde_json::to_string(&status).map_err(to_js)
    })
}

fn start_session(graph: ViewpointGraph) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        if let Some(mut previous) = s.session.take() {
            previous.shutdown();
            s.last_generation = s.last_generation.max(previous.generation());
        }
        COMPLETIONS.with(|queue| queue.borrow_mut().clear());
        let config = s.config.clone();
        let host = WebHost::new(LoadingScreen::attach(config.loading_tips.clone()));
        let mut session = Session::with_generation(graph, config, host, s.last_generation);
        let initialized = session.initialize();
        s.last_generation = session.generation();
        let report = initialized.map_err(to_js)?;
        tracing::info!(viewpoint = %report.to, buttons = report.created, "tour started");
        s.session = Some(session);
        Ok(())
    })
}

fn button_under_pointer(state: &ViewerState, x_px: f64, y_px: f64) -> Option<usize> {
    let session = state.session.as_ref()?;
    let ray = state
        .camera
        .screen_ray(x_px, y_px, state.canvas_width, state.canvas_height)?;
    let entity = session.host().pick(ray)?;
    session.find_button(|button| button.entity() == entity)
}

fn replay_completions() {
    STATE.with(|state| {
        let Ok(mut s) = state.try_borrow_mut() else {
            return;
        };
        let Some(session) = s.session.as_mut() else {
            COMPLETIONS.with(|queue| queue.borrow_mut().clear());
            return;
        };
        let completions = COMPLETIONS.with(|queue| std::mem::take(&mut *queue.borrow_mut()));
        for (ticket, result) in completions {
            let asset_path = session.host().settle_swap(ticket);
            let result = result
                .map_err(|reason| AssetLoadFailure::new(asset_path.unwrap_or_default(), reason));
            session.texture_loaded(ticket, result);
        }
    });
}

async fn fetch_tour(url: &str) -> Result<ViewpointGraph, JsValue> {
    let resp = Request::get(url).send().await.map_err(to_js)?;
    let text = resp.text().await.map_err(to_js)?;
    let mut manifest = TourManifest::from_json_str(&text).map_err(to_js)?;
    if manifest.version != MANIFEST_VERSION {
        return Err(JsValue::from_str(&format!(
            "unsupported manifest version: {}",
            manifest.version
        )));
    }
    if let Some((base, _)) = url.rsplit_once('/') {
        manifest.rebase_assets(base);
    }
    ViewpointGraph::from_manifest(&manifest).map_err(to_js)
}

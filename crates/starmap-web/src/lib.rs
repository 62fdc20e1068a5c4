//! Browser bindings for the star map.
//!
//! The page calls `starmap_init` once with a canvas id and a config JSON,
//! then forwards DOM events through the `starmap_*` exports. Geolocation and
//! persistence stay on the JS side and report back through
//! `starmap_set_location` / `starmap_report_save`. Rows the host reads back
//! from its database come in through `starmap_load_history`.
//!
//! Outgoing data (selection events, notices, search results, history) is
//! handed over as JSON strings.

pub mod canvas;
pub mod runner;

pub use canvas::Canvas2dSurface;
pub use runner::SkyRunner;

use std::cell::RefCell;

use starmap_engine::{HistoryQuery, InputEvent, LocationOutcome, StarmapConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SkyRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Logs and returns `None` before init.
fn with_runner<R>(f: impl FnOnce(&mut SkyRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::error!("star map not initialized; call starmap_init() first");
                None
            }
        }
    })
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Set up logging, parse the config and bind to `<canvas id=canvas_id>`.
/// An empty `canvas_id` runs headless; draw with `starmap_frame_json`.
#[wasm_bindgen]
pub fn starmap_init(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let mut config = if config_json.trim().is_empty() {
        StarmapConfig::default()
    } else {
        StarmapConfig::from_json(config_json).map_err(js_err)?
    };
    // Ignore the error: the logger may already be set by a previous init.
    let _ = console_log::init_with_level(config.log_level());

    // Different twinkle per page load.
    config.starfield_seed ^= js_sys::Date::now() as u64;

    let surface = if canvas_id.is_empty() {
        None
    } else {
        Some(Canvas2dSurface::from_element_id(canvas_id)?)
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(SkyRunner::new(config, surface));
    });
    with_runner(|r| r.fit_to_canvas());

    log::info!("starmap: initialized");
    Ok(())
}

/// Replace the built-in catalog with `{ "stars": [...], "constellations": [...] }`.
#[wasm_bindgen]
pub fn starmap_load_catalog(json: &str) -> Result<(), JsValue> {
    with_runner(|r| {
        r.app_mut().load_catalog_json(json).map_err(js_err)?;
        r.tick();
        Ok(())
    })
    .unwrap_or(Ok(()))
}

#[wasm_bindgen]
pub fn starmap_resize(width: f32, height: f32, dpr: f32) {
    with_runner(|r| r.resize(width, height, dpr));
}

/// Returns true while the pointer is over a star.
#[wasm_bindgen]
pub fn starmap_pointer_move(x: f32, y: f32) -> bool {
    with_runner(|r| {
        r.push_input(InputEvent::PointerMove { x, y });
        r.tick();
        r.app().context().hover().is_some()
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn starmap_click(x: f32, y: f32) {
    with_runner(|r| {
        r.push_input(InputEvent::Click { x, y });
        r.tick();
    });
}

#[wasm_bindgen]
pub fn starmap_search(term: &str) {
    with_runner(|r| {
        r.push_input(InputEvent::Search { term: term.to_string() });
        r.tick();
    });
}

/// Pick a star from the search results list.
#[wasm_bindgen]
pub fn starmap_select(name: &str) {
    with_runner(|r| {
        r.push_input(InputEvent::SelectByName { name: name.to_string() });
        r.tick();
    });
}

#[wasm_bindgen]
pub fn starmap_deselect() {
    with_runner(|r| {
        r.push_input(InputEvent::Deselect);
        r.tick();
    });
}

/// Returns true when AR mode is now on.
#[wasm_bindgen]
pub fn starmap_toggle_ar() -> bool {
    with_runner(|r| {
        r.push_input(InputEvent::ToggleAr);
        r.tick();
        r.app().mode().is_ar()
    })
    .unwrap_or(false)
}

// ---- Geolocation ----

#[wasm_bindgen]
pub fn starmap_set_location(lat: f64, lng: f64) {
    with_runner(|r| r.set_location(LocationOutcome::Resolved { lat, lng }));
}

#[wasm_bindgen]
pub fn starmap_location_failed(reason: &str) {
    with_runner(|r| r.set_location(LocationOutcome::Failed(reason.to_string())));
}

#[wasm_bindgen]
pub fn starmap_location_unsupported() {
    with_runner(|r| r.set_location(LocationOutcome::Unsupported));
}

// ---- Session and persistence ----

#[wasm_bindgen]
pub fn starmap_sign_in(user_id: &str) {
    with_runner(|r| r.app_mut().sign_in(user_id));
}

#[wasm_bindgen]
pub fn starmap_sign_out() {
    with_runner(|r| r.app_mut().sign_out());
}

/// Outcome of persisting a `selected` event. `error` is ignored when `ok`.
#[wasm_bindgen]
pub fn starmap_report_save(name: &str, ok: bool, error: Option<String>) {
    let outcome = if ok {
        Ok(())
    } else {
        Err(error.unwrap_or_else(|| "unknown error".to_string()))
    };
    with_runner(|r| r.app_mut().report_save(name, outcome));
}

// ---- Rendering ----

#[wasm_bindgen]
pub fn starmap_render() {
    with_runner(|r| r.render());
}

/// One frame as a JSON array of draw commands.
#[wasm_bindgen]
pub fn starmap_frame_json() -> Result<String, JsValue> {
    with_runner(|r| r.frame_json().map_err(js_err)).unwrap_or_else(|| Ok("[]".to_string()))
}

/// One frame as flat `[x, y, r, g, b, a]` triangle vertices.
#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn starmap_vector_frame() -> Vec<f32> {
    with_runner(|r| r.vector_frame()).unwrap_or_default()
}

// ---- Outgoing data ----

#[wasm_bindgen]
pub fn starmap_take_events() -> Result<String, JsValue> {
    with_runner(|r| r.events_json().map_err(js_err)).unwrap_or_else(|| Ok("[]".to_string()))
}

#[wasm_bindgen]
pub fn starmap_take_notices() -> Result<String, JsValue> {
    with_runner(|r| r.notices_json().map_err(js_err)).unwrap_or_else(|| Ok("[]".to_string()))
}

#[wasm_bindgen]
pub fn starmap_search_results() -> Result<String, JsValue> {
    with_runner(|r| r.search_results_json().map_err(js_err)).unwrap_or_else(|| Ok("[]".to_string()))
}

// ---- History ----

/// Signed-in user's observations, newest first. `date` is `YYYY-MM-DD` or
/// empty; `utc_offset_minutes` is the viewer's offset east of UTC.
#[wasm_bindgen]
pub fn starmap_history(name: &str, date: &str, utc_offset_minutes: i32) -> Result<String, JsValue> {
    let query = HistoryQuery::new()
        .with_name(name)
        .with_offset_minutes(utc_offset_minutes)
        .with_date_str(date)
        .map_err(js_err)?;
    with_runner(|r| r.history_json(&query).map_err(js_err)).unwrap_or_else(|| Ok("[]".to_string()))
}

/// Replace the signed-in user's history with rows fetched from the hosted
/// database. Returns how many rows were loaded.
#[wasm_bindgen]
pub fn starmap_load_history(json: &str) -> Result<u32, JsValue> {
    with_runner(|r| r.app_mut().load_history_json(json).map(|n| n as u32).map_err(js_err))
        .unwrap_or(Ok(0))
}

#[wasm_bindgen]
pub fn starmap_history_delete(id: f64) -> Result<(), JsValue> {
    with_runner(|r| r.app_mut().delete_observation(id as u64).map_err(js_err)).unwrap_or(Ok(()))
}

/// Returns how many records were removed.
#[wasm_bindgen]
pub fn starmap_history_clear() -> u32 {
    with_runner(|r| r.app_mut().clear_observations() as u32).unwrap_or(0)
}

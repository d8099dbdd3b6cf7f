pub mod runner;

pub use runner::EngineRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

// wasm-bindgen exports free functions only, so the runner lives in a
// thread-local and every export borrows it through `with_runner`.
thread_local! {
    static RUNNER: RefCell<Option<EngineRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. `None` (with an error logged) before
/// `orrery_init` has succeeded.
fn with_runner<R>(f: impl FnOnce(&mut EngineRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::error!("orrery not initialized; call orrery_init() first");
                None
            }
        }
    })
}

fn not_initialized() -> JsError {
    JsError::new("orrery not initialized; call orrery_init() first")
}

fn to_js(e: orrery_engine::EngineError) -> JsError {
    JsError::new(&e.to_string())
}

/// Create the engine from a JSON config (`""` or `"{}"` for defaults).
/// Calling again replaces the previous engine and its staged tables.
#[wasm_bindgen]
pub fn orrery_init(config_json: &str) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = EngineRunner::from_json(config_json).map_err(to_js)?;
    let bodies = runner.body_count();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized with {bodies} bodies");
    Ok(())
}

/// Stage one body's ephemeris table text. Returns its sample count.
#[wasm_bindgen]
pub fn orrery_load_table(body_id: &str, text: &str) -> Result<u32, JsError> {
    with_runner(|r| r.load_table(body_id, text))
        .ok_or_else(not_initialized)?
        .map(|n| n as u32)
        .map_err(to_js)
}

/// Load every staged table. Returns how many bodies have samples.
#[wasm_bindgen]
pub fn orrery_load_all() -> u32 {
    with_runner(|r| r.load_all().loaded.len() as u32).unwrap_or(0)
}

/// Apply axial tilts from a fact sheet. Returns how many bodies matched.
#[wasm_bindgen]
pub fn orrery_load_facts(json: &str) -> Result<u32, JsError> {
    with_runner(|r| r.load_facts(json))
        .ok_or_else(not_initialized)?
        .map(|n| n as u32)
        .map_err(to_js)
}

/// Jump every body to its sample for `date`. Returns the number of bodies
/// that have no such sample and were left in place.
#[wasm_bindgen]
pub fn orrery_set_target_date(date: &str) -> u32 {
    with_runner(|r| r.set_target_date(date) as u32).unwrap_or(0)
}

/// Select the playback window. Returns how many bodies will take part.
#[wasm_bindgen]
pub fn orrery_select_window(start: &str, end: &str) -> Result<u32, JsError> {
    with_runner(|r| r.select_window(start, end))
        .ok_or_else(not_initialized)?
        .map(|n| n as u32)
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn orrery_set_duration(secs: f32) -> Result<(), JsError> {
    with_runner(|r| r.set_duration(secs))
        .ok_or_else(not_initialized)?
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn orrery_start() {
    with_runner(|r| r.start());
}

#[wasm_bindgen]
pub fn orrery_reset() {
    with_runner(|r| r.reset());
}

/// Advance one frame. True on the frame playback finishes.
#[wasm_bindgen]
pub fn orrery_tick(dt: f32) -> bool {
    with_runner(|r| r.tick(dt)).unwrap_or(false)
}

// ---- Data accessors ----

/// Body transforms, 7 floats each: position xyz, rotation xyzw.
#[wasm_bindgen]
pub fn get_transforms_ptr() -> *const f32 {
    with_runner(|r| r.transforms_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(|r| r.body_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_transform_floats() -> u32 {
    orrery_engine::TransformRecord::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_body_ids() -> js_sys::Array {
    with_runner(|r| r.body_ids().into_iter().map(JsValue::from).collect())
        .unwrap_or_else(js_sys::Array::new)
}

/// Every stored date key of a body, chronologically.
#[wasm_bindgen]
pub fn get_dates(body_id: &str) -> js_sys::Array {
    with_runner(|r| {
        r.engine()
            .all_dates(body_id)
            .into_iter()
            .map(JsValue::from)
            .collect()
    })
    .unwrap_or_else(js_sys::Array::new)
}

/// Full position history of a body as flat xyz floats.
#[wasm_bindgen]
pub fn get_orbit_trace(body_id: &str) -> js_sys::Float32Array {
    let trace = with_runner(|r| r.orbit_trace(body_id)).unwrap_or_default();
    js_sys::Float32Array::from(trace.as_slice())
}

#[wasm_bindgen]
pub fn is_animating() -> bool {
    with_runner(|r| r.is_animating()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_progress() -> f32 {
    with_runner(|r| r.progress()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_elapsed_time() -> f32 {
    with_runner(|r| r.elapsed_time()).unwrap_or(0.0)
}

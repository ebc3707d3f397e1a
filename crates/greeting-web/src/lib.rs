//! Browser entry point for the greeting page.
//!
//! `greeting_init` looks up the page's attachment points, installs click and
//! resize listeners, and drives a single `requestAnimationFrame` loop that
//! runs only while the core has confetti in flight or timers pending.

pub mod canvas;
pub mod page;
pub mod runner;

pub use runner::GreetingRunner;

use std::cell::RefCell;

use greeting_core::{Gesture, Greeting, GreetingConfig, PageManifest};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlCanvasElement, Window};

use crate::canvas::CanvasSurface;
use crate::page::{selectors, DomPage};

/// State of the animation-frame loop.
#[derive(Default)]
struct FrameLoop {
    callback: Option<Closure<dyn FnMut(f64)>>,
    /// A frame has been requested and not yet delivered.
    pending: bool,
    /// Timestamp of the previous frame; `None` after the loop went idle.
    last: Option<f64>,
}

thread_local! {
    static RUNNER: RefCell<Option<GreetingRunner>> = RefCell::new(None);
    static FRAME_LOOP: RefCell<FrameLoop> = RefCell::new(FrameLoop::default());
}

/// Run `f` against the runner. Returns `None` before `greeting_init`.
fn with_runner<R>(f: impl FnOnce(&mut GreetingRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

fn viewport(window: &Window) -> (f32, f32) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
    (width as f32, height as f32)
}

/// Ask for another frame if the core has work and none is outstanding.
fn request_frame() {
    if !with_runner(|r| r.wants_frame()).unwrap_or(false) {
        return;
    }
    FRAME_LOOP.with(|cell| {
        let mut frame = cell.borrow_mut();
        if frame.pending {
            return;
        }
        let Some(callback) = frame.callback.as_ref() else {
            return;
        };
        let requested = window()
            .and_then(|w| w.request_animation_frame(callback.as_ref().unchecked_ref()));
        match requested {
            Ok(_) => frame.pending = true,
            Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
        }
    });
}

fn on_frame(timestamp: f64) {
    let dt = FRAME_LOOP.with(|cell| {
        let mut frame = cell.borrow_mut();
        frame.pending = false;
        let dt = frame.last.map_or(0.0, |last| timestamp - last);
        frame.last = Some(timestamp);
        dt
    });

    with_runner(|r| r.tick(dt));

    if with_runner(|r| r.wants_frame()).unwrap_or(false) {
        request_frame();
    } else {
        FRAME_LOOP.with(|cell| cell.borrow_mut().last = None);
    }
}

/// Forward a gesture to the core and wake the frame loop if it produced work.
fn dispatch(gesture: Gesture) {
    with_runner(|r| r.handle(gesture));
    request_frame();
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live for the whole page.
    closure.forget();
    Ok(())
}

/// The element a click landed on, or its closest ancestor matching `selector`.
fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}

fn install_listeners(window: &Window, page: &DomPage) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    listen(page.card(), "click", |event| {
        let on_continue = closest(&event, selectors::NAV_BUTTON).is_some();
        dispatch(Gesture::CardClick { on_continue });
    })?;

    listen(page.flame(), "click", |_| dispatch(Gesture::FlameClick))?;

    let buttons = document.query_selector_all(selectors::NAV_BUTTON)?;
    for i in 0..buttons.length() {
        let Some(button) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let target = button.clone();
        listen(&button, "click", move |_| {
            dispatch(Gesture::NavButton { next: target.get_attribute("data-next") });
        })?;
    }

    // Delegated, so dots appended later are covered too.
    listen(page.dot_strip(), "click", |event| {
        let target = closest(&event, selectors::DOT).and_then(|dot| dot.get_attribute("data-target"));
        dispatch(Gesture::DotClick { target });
    })?;

    if let Some(button) = page.photos_button() {
        listen(button, "click", |_| dispatch(Gesture::RevealPhotosClick))?;
    }

    let resize_window = window.clone();
    listen(window, "resize", move |_| {
        let (width, height) = viewport(&resize_window);
        dispatch(Gesture::Resize { width, height });
    })?;

    Ok(())
}

/// Start the page. `manifest_json` overrides the built-in manifest.
#[wasm_bindgen]
pub fn greeting_init(manifest_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if with_runner(|_| ()).is_some() {
        log::warn!("greeting: already initialized");
        return Ok(());
    }

    let manifest = match manifest_json {
        Some(json) => PageManifest::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => PageManifest::default(),
    };

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let canvas = document
        .get_element_by_id(selectors::CANVAS)
        .ok_or_else(|| JsValue::from_str("missing page element: confetti"))?
        .dyn_into::<HtmlCanvasElement>()?;

    let (width, height) = viewport(&window);
    let config = GreetingConfig {
        viewport_width: width,
        viewport_height: height,
        ..GreetingConfig::default()
    };
    let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
    let greeting = Greeting::new(config, manifest, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let page = DomPage::attach(&document)?;
    install_listeners(&window, &page)?;

    let mut runner = GreetingRunner::new(greeting, page, CanvasSurface::new(canvas)?);
    runner.init();
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    FRAME_LOOP.with(|cell| {
        cell.borrow_mut().callback = Some(Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>));
    });

    log::info!("greeting: initialized");
    Ok(())
}

/// Fire one confetti burst on demand.
#[wasm_bindgen]
pub fn greeting_fire_burst() {
    with_runner(|r| r.fire_burst());
    request_frame();
}

/// Show a section by id; unknown ids are ignored.
#[wasm_bindgen]
pub fn greeting_navigate(section: &str) {
    dispatch(Gesture::NavButton { next: Some(section.to_owned()) });
}

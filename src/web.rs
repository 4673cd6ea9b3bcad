//! Browser host: a full-page canvas driven by `requestAnimationFrame`.
//!
//! Load the wasm module, then call [`run`] (optionally with an options JSON
//! string). The canvas is appended to `<body>` and follows the window size
//! and device pixel ratio.
//!
//! ```js
//! import init, { run } from "./orrery.js";
//! await init();
//! run();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement,
    KeyboardEvent, MouseEvent, WheelEvent,
};

use crate::error::OrreryError;
use crate::input::{InputEvent, MouseButton};
use crate::options::Options;
use crate::OrreryEngine;

/// `WheelEvent.deltaMode` for line-based deltas.
const DOM_DELTA_LINE: u32 = 1;
/// `WheelEvent.deltaMode` for page-based deltas.
const DOM_DELTA_PAGE: u32 = 2;
/// Pixels per wheel line when the browser reports lines.
const LINE_HEIGHT_PX: f64 = 100.0;

type SharedEngine = Rc<RefCell<OrreryEngine>>;

impl From<OrreryError> for JsValue {
    fn from(e: OrreryError) -> Self {
        Self::from_str(&e.to_string())
    }
}

fn js_error(context: &str, e: &JsValue) -> OrreryError {
    OrreryError::Web(format!("{context}: {e:?}"))
}

/// Route `log` records to the browser console and panics to
/// `console.error`. Runs when the module is instantiated.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Create the canvas, start the engine and enter the animation loop.
///
/// `options_json` may hold a (partial) options object; missing fields take
/// their defaults.
///
/// # Errors
///
/// Returns an error string if the options do not parse or the page has no
/// `window`, `document` or `<body>`. GPU initialization runs
/// asynchronously and reports failures to the console.
#[wasm_bindgen]
pub fn run(options_json: Option<String>) -> Result<(), JsValue> {
    let options = match options_json {
        Some(json) => Options::from_json_str(&json)?,
        None => Options::default(),
    };

    let window = web_sys::window()
        .ok_or_else(|| OrreryError::Web("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| OrreryError::Web("no document".into()))?;
    let body = document
        .body()
        .ok_or_else(|| OrreryError::Web("no <body>".into()))?;

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| OrreryError::Web("element is not a canvas".into()))?;
    canvas.style().set_property("display", "block")?;
    body.style().set_property("margin", "0")?;
    body.style().set_property("overflow", "hidden")?;
    let _ = body.append_child(&canvas)?;

    let (width, height, dpr) = window_metrics(&window);
    size_canvas(&canvas, width, height, dpr, options.render.max_pixel_ratio);

    wasm_bindgen_futures::spawn_local(async move {
        let target = wgpu::SurfaceTarget::Canvas(canvas.clone());
        match OrreryEngine::new(target, (width, height), dpr, options).await {
            Ok(engine) => {
                let engine = Rc::new(RefCell::new(engine));
                if let Err(e) = install(&window, &canvas, &engine) {
                    log::error!("Failed to install web host: {e}");
                }
            }
            Err(e) => log::error!("Failed to initialize engine: {e}"),
        }
    });

    Ok(())
}

/// Logical viewport size and device pixel ratio of `window`.
fn window_metrics(window: &web_sys::Window) -> (f64, f64, f64) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0)
    };
    (
        dimension(window.inner_width()),
        dimension(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

/// Match the canvas CSS size to the logical size and its backing store to
/// the physical size.
fn size_canvas(
    canvas: &HtmlCanvasElement,
    width: f64,
    height: f64,
    device_pixel_ratio: f64,
    max_pixel_ratio: f64,
) {
    let viewport = crate::gpu::viewport::Viewport::new(
        width,
        height,
        device_pixel_ratio,
        max_pixel_ratio,
    );
    let (physical_w, physical_h) = viewport.physical_size();
    canvas.set_width(physical_w);
    canvas.set_height(physical_h);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{width}px"));
    let _ = style.set_property("height", &format!("{height}px"));
}

/// Register `handler` for `event` on `target` for the page lifetime.
fn listen(
    target: &EventTarget,
    event: &str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), OrreryError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| js_error(event, &e))?;
    closure.forget();
    Ok(())
}

fn request_animation_frame(
    window: &web_sys::Window,
    callback: &Closure<dyn FnMut()>,
) {
    if let Err(e) =
        window.request_animation_frame(callback.as_ref().unchecked_ref())
    {
        log::error!("requestAnimationFrame failed: {e:?}");
    }
}

/// Wheel `deltaY` in pixels, whatever unit the browser reported.
fn wheel_pixels(event: &WheelEvent, viewport_height: f64) -> f32 {
    let delta = event.delta_y();
    let pixels = match event.delta_mode() {
        DOM_DELTA_LINE => delta * LINE_HEIGHT_PX,
        DOM_DELTA_PAGE => delta * viewport_height,
        _ => delta,
    };
    pixels as f32
}

fn install(
    window: &web_sys::Window,
    canvas: &HtmlCanvasElement,
    engine: &SharedEngine,
) -> Result<(), OrreryError> {
    // Resize
    {
        let engine = engine.clone();
        let canvas = canvas.clone();
        let win = window.clone();
        listen(window, "resize", true, move |_| {
            let (width, height, dpr) = window_metrics(&win);
            let mut engine = engine.borrow_mut();
            let max_ratio = engine.options().render.max_pixel_ratio;
            size_canvas(&canvas, width, height, dpr, max_ratio);
            engine.resize(width, height, dpr);
        })?;
    }

    // Mouse
    {
        let engine = engine.clone();
        listen(canvas, "mousedown", true, move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Some(button) = MouseButton::from_dom(event.button()) else {
                return;
            };
            let mut engine = engine.borrow_mut();
            let _ = engine.handle_input(InputEvent::ModifiersChanged {
                shift: event.shift_key(),
            });
            let _ = engine.handle_input(InputEvent::CursorMoved {
                x: event.client_x() as f32,
                y: event.client_y() as f32,
            });
            let _ = engine.handle_input(InputEvent::MouseButton {
                button,
                pressed: true,
            });
        })?;
    }
    {
        let engine = engine.clone();
        listen(window, "mousemove", true, move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                let _ = engine.borrow_mut().handle_input(
                    InputEvent::CursorMoved {
                        x: event.client_x() as f32,
                        y: event.client_y() as f32,
                    },
                );
            }
        })?;
    }
    {
        let engine = engine.clone();
        listen(window, "mouseup", true, move |event| {
            let button = event
                .dyn_ref::<MouseEvent>()
                .and_then(|e| MouseButton::from_dom(e.button()));
            if let Some(button) = button {
                let _ = engine.borrow_mut().handle_input(
                    InputEvent::MouseButton {
                        button,
                        pressed: false,
                    },
                );
            }
        })?;
    }
    {
        let engine = engine.clone();
        listen(window, "blur", true, move |_| {
            let _ = engine.borrow_mut().handle_input(InputEvent::CursorLeft);
        })?;
    }
    listen(canvas, "contextmenu", false, |event| event.prevent_default())?;

    // Wheel
    {
        let engine = engine.clone();
        listen(canvas, "wheel", false, move |event| {
            event.prevent_default();
            if let Some(event) = event.dyn_ref::<WheelEvent>() {
                let mut engine = engine.borrow_mut();
                let height = engine.state.viewport.height();
                let _ = engine.handle_input(InputEvent::Scroll {
                    delta_y: wheel_pixels(event, height),
                });
            }
        })?;
    }

    // Keyboard
    for (name, pressed) in [("keydown", true), ("keyup", false)] {
        let engine = engine.clone();
        listen(window, name, true, move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let mut engine = engine.borrow_mut();
            let _ = engine.handle_input(InputEvent::ModifiersChanged {
                shift: event.shift_key(),
            });
            if pressed && !event.repeat() {
                let _ = engine.handle_key(&event.code());
            }
        })?;
    }

    // Animation loop
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
        Rc::new(RefCell::new(None));
    let next = frame.clone();
    let engine = engine.clone();
    let win = window.clone();
    *frame.borrow_mut() = Some(Closure::new(move || {
        {
            let mut engine = engine.borrow_mut();
            match engine.frame() {
                Ok(()) => {}
                Err(
                    wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost,
                ) => engine.reconfigure(),
                Err(e) => log::error!("render error: {e:?}"),
            }
        }
        if let Some(callback) = next.borrow().as_ref() {
            request_animation_frame(&win, callback);
        }
    }));
    if let Some(callback) = frame.borrow().as_ref() {
        request_animation_frame(window, callback);
    }

    log::info!("orrery running");
    Ok(())
}

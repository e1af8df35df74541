// web.rs - Browser host: HTML canvas, requestAnimationFrame, DOM orbs
//
// The exported `AnimatedBackground` owns scene and host in one Rc. Every
// JS callback holds only a Weak to it, and borrows with try_borrow_mut so a
// callback can never panic across the JS boundary.
//
// Orbs run on their own setInterval clock. They share nothing with the
// frame loop except the page.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::{FrameRequest, Host, HostError, Listener, OrbLoop, Subscription};
use crate::color::Color;
use crate::orbs::OrbField;
use crate::render::Surface;
use crate::scene::{Scene, SceneConfig};
use crate::world::Viewport;

const ORB_TICK_MS: i32 = 16;
const CANVAS_OPACITY: &str = "0.6";

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        HostError::Js(format!("{value:?}"))
    }
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Keep decorative layers out of hit testing
fn pass_through(el: &HtmlElement) {
    if let Err(e) = el.style().set_property("pointer-events", "none") {
        warn!("could not disable pointer events: {e:?}");
    }
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color, alpha: f32) {
        self.ctx.begin_path();
        if self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.fill();
    }

    fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
        alpha: f32,
    ) {
        self.ctx.begin_path();
        self.ctx.move_to(from.0 as f64, from.1 as f64);
        self.ctx.line_to(to.0 as f64, to.1 as f64);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn reset_alpha(&mut self) {
        self.ctx.set_global_alpha(1.0);
    }

    fn resize(&mut self, viewport: Viewport) {
        let (w, h) = viewport.pixel_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }
}

struct OrbAnimation {
    field: OrbField,
    elements: Vec<HtmlElement>,
    started_ms: f64,
}

impl OrbAnimation {
    fn apply(&self, now_ms: f64) {
        let elapsed = (now_ms - self.started_ms) / 1000.0;
        for (el, (x, y)) in self.elements.iter().zip(self.field.offsets(elapsed)) {
            let transform = format!("translate({x:.2}px, {y:.2}px)");
            if let Err(e) = el.style().set_property("transform", &transform) {
                warn!("could not move orb: {e:?}");
            }
        }
    }

    fn clear(&self) {
        for el in &self.elements {
            if let Err(e) = el.style().remove_property("transform") {
                warn!("could not reset orb: {e:?}");
            }
        }
    }
}

struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    orb_selector: String,
    orbs: Rc<RefCell<Option<OrbAnimation>>>,
    on_frame: Closure<dyn FnMut(f64)>,
    on_resize: Closure<dyn FnMut()>,
    on_pointer: Closure<dyn FnMut(MouseEvent)>,
    on_orb_tick: Closure<dyn FnMut()>,
    next_id: u32,
}

impl WebHost {
    fn new(
        window: Window,
        canvas: HtmlCanvasElement,
        orb_selector: String,
        inner: Weak<Inner>,
    ) -> Self {
        let on_frame = {
            let inner = inner.clone();
            Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
                if let Some(inner) = inner.upgrade() {
                    inner.frame();
                }
            })
        };
        let on_resize = {
            let inner = inner.clone();
            Closure::<dyn FnMut()>::new(move || {
                if let Some(inner) = inner.upgrade() {
                    inner.resize();
                }
            })
        };
        let on_pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
            if let Some(inner) = inner.upgrade() {
                inner.pointer_moved(e.client_x() as f32, e.client_y() as f32);
            }
        });

        let orbs: Rc<RefCell<Option<OrbAnimation>>> = Rc::new(RefCell::new(None));
        let on_orb_tick = {
            let orbs = Rc::clone(&orbs);
            Closure::<dyn FnMut()>::new(move || {
                if let Ok(orbs) = orbs.try_borrow() {
                    if let Some(anim) = orbs.as_ref() {
                        anim.apply(js_sys::Date::now());
                    }
                }
            })
        };

        Self {
            window,
            canvas,
            orb_selector,
            orbs,
            on_frame,
            on_resize,
            on_pointer,
            on_orb_tick,
            next_id: 1,
        }
    }

    fn callback(&self, listener: Listener) -> (&'static str, &js_sys::Function) {
        match listener {
            Listener::Resize => ("resize", self.on_resize.as_ref().unchecked_ref()),
            Listener::PointerMove => ("mousemove", self.on_pointer.as_ref().unchecked_ref()),
        }
    }

    fn orb_elements(&self) -> Result<Vec<HtmlElement>, HostError> {
        let document = self.window.document().ok_or(HostError::Missing("document"))?;
        let nodes = document.query_selector_all(&self.orb_selector)?;
        let elements = (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();
        Ok(elements)
    }
}

impl Host for WebHost {
    type Surface = CanvasSurface;

    fn viewport(&self) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Viewport::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
    }

    fn acquire_surface(&mut self) -> Option<CanvasSurface> {
        let ctx = self
            .canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        pass_through(&self.canvas);
        if let Err(e) = self.canvas.style().set_property("opacity", CANVAS_OPACITY) {
            warn!("could not set canvas opacity: {e:?}");
        }
        Some(CanvasSurface { canvas: self.canvas.clone(), ctx })
    }

    fn subscribe(&mut self, listener: Listener) -> Result<Subscription, HostError> {
        let (event, callback) = self.callback(listener);
        self.window.add_event_listener_with_callback(event, callback)?;
        let id = self.next_id;
        self.next_id += 1;
        Ok(Subscription::new(listener, id))
    }

    fn unsubscribe(&mut self, subscription: Subscription) -> Result<(), HostError> {
        let (event, callback) = self.callback(subscription.listener());
        self.window.remove_event_listener_with_callback(event, callback)?;
        Ok(())
    }

    fn request_frame(&mut self) -> Result<FrameRequest, HostError> {
        let id = self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())?;
        Ok(FrameRequest(id))
    }

    fn cancel_frame(&mut self, request: FrameRequest) -> Result<(), HostError> {
        self.window.cancel_animation_frame(request.0)?;
        Ok(())
    }

    fn start_orbs(&mut self, field: OrbField) -> Result<OrbLoop, HostError> {
        let elements = self.orb_elements()?;
        elements.iter().for_each(pass_through);
        debug!("animating {} orbs", elements.len());

        *self.orbs.borrow_mut() = Some(OrbAnimation {
            field,
            elements,
            started_ms: js_sys::Date::now(),
        });
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                self.on_orb_tick.as_ref().unchecked_ref(),
                ORB_TICK_MS,
            )
            .inspect_err(|_| {
                self.orbs.borrow_mut().take();
            })?;
        Ok(OrbLoop(id))
    }

    fn stop_orbs(&mut self, orbs: OrbLoop) -> Result<(), HostError> {
        self.window.clear_interval_with_handle(orbs.0);
        if let Some(anim) = self.orbs.borrow_mut().take() {
            anim.clear();
        }
        Ok(())
    }
}

struct Inner {
    scene: RefCell<Scene<CanvasSurface>>,
    host: RefCell<WebHost>,
}

impl Inner {
    fn frame(&self) {
        let (Ok(mut scene), Ok(mut host)) =
            (self.scene.try_borrow_mut(), self.host.try_borrow_mut())
        else {
            warn!("frame callback re-entered, skipping");
            return;
        };
        scene.frame(&mut *host);
    }

    fn resize(&self) {
        let (Ok(mut scene), Ok(host)) = (self.scene.try_borrow_mut(), self.host.try_borrow()) else {
            return;
        };
        scene.resize(&*host);
    }

    fn pointer_moved(&self, x: f32, y: f32) {
        if let Ok(mut scene) = self.scene.try_borrow_mut() {
            scene.pointer_moved(x, y);
        }
    }
}

/// Ember particle background bound to a canvas element.
#[wasm_bindgen]
pub struct AnimatedBackground {
    inner: Rc<Inner>,
}

#[wasm_bindgen]
impl AnimatedBackground {
    /// `canvas_id`: id of the target canvas. `orb_selector`: CSS selector of
    /// the floating orb elements.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, orb_selector: &str) -> Result<AnimatedBackground, JsValue> {
        let window = web_sys::window().ok_or(HostError::Missing("window"))?;
        let document = window.document().ok_or(HostError::Missing("document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or(HostError::Missing("canvas element"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| HostError::Missing("canvas element"))?;

        // Math.random has 53 bits of mantissa
        let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
        let orb_selector = orb_selector.to_owned();
        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| Inner {
            scene: RefCell::new(Scene::new(SceneConfig::default(), seed)),
            host: RefCell::new(WebHost::new(window, canvas, orb_selector, weak.clone())),
        });
        Ok(Self { inner })
    }

    pub fn mount(&self) -> Result<(), JsValue> {
        let mut scene = self.inner.scene.try_borrow_mut().map_err(|_| HostError::Busy)?;
        let mut host = self.inner.host.try_borrow_mut().map_err(|_| HostError::Busy)?;
        scene.mount(&mut *host)?;
        Ok(())
    }

    pub fn unmount(&self) {
        let inner = &self.inner;
        let (Ok(mut scene), Ok(mut host)) =
            (inner.scene.try_borrow_mut(), inner.host.try_borrow_mut())
        else {
            warn!("unmount requested while a callback is running");
            return;
        };
        scene.unmount(&mut *host);
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.scene.try_borrow().is_ok_and(|s| s.is_mounted())
    }
}

impl Drop for AnimatedBackground {
    // Listeners still registered with the window would call dropped closures
    fn drop(&mut self) {
        self.unmount();
    }
}

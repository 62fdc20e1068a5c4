use glam::Vec2;
use starmap_engine::{Color, CursorHint, DrawSurface, FontSpec, TextAlign, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`DrawSurface`] backed by a page `<canvas>` and its 2D context.
///
/// Coordinates are CSS pixels; [`resize`](Self::resize) scales the backing
/// store and context transform for the device pixel ratio.
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// Look up `<canvas id=...>` in the current document.
    pub fn from_element_id(id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing canvas #{}", id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Current CSS size of the element.
    pub fn css_size(&self) -> (f32, f32) {
        (self.canvas.client_width() as f32, self.canvas.client_height() as f32)
    }

    pub fn device_pixel_ratio() -> f32 {
        web_sys::window()
            .map(|w| w.device_pixel_ratio() as f32)
            .unwrap_or(1.0)
    }

    /// Size the backing store for `viewport` and scale drawing by its dpr.
    pub fn resize(&self, viewport: &Viewport) {
        let (w, h) = viewport.backing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let dpr = viewport.dpr as f64;
        warn_on_err("setTransform", self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0));
    }

    pub fn set_cursor(&self, hint: CursorHint) {
        set_property(self.canvas.as_ref(), "style.cursor", hint.as_css());
    }
}

impl DrawSurface for Canvas2dSurface {
    fn clear(&mut self, width: f32, height: f32, color: Color) {
        set_property(self.ctx.as_ref(), "fillStyle", &color.to_css());
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        set_property(self.ctx.as_ref(), "fillStyle", &color.to_css());
        self.ctx.begin_path();
        warn_on_err(
            "arc",
            self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            ),
        );
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        set_property(self.ctx.as_ref(), "strokeStyle", &color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &FontSpec, align: TextAlign, color: Color) {
        self.ctx.set_font(&font.to_string());
        self.ctx.set_text_align(align.as_css());
        set_property(self.ctx.as_ref(), "fillStyle", &color.to_css());
        warn_on_err("fillText", self.ctx.fill_text(text, pos.x as f64, pos.y as f64));
    }
}

/// Assign `target.a.b = value`, walking dotted paths.
fn set_property(target: &JsValue, path: &str, value: &str) {
    let mut obj = target.clone();
    let mut keys = path.split('.').peekable();
    while let Some(key) = keys.next() {
        let key = JsValue::from_str(key);
        if keys.peek().is_none() {
            warn_on_err(path, js_sys::Reflect::set(&obj, &key, &JsValue::from_str(value)).map(|_| ()));
            return;
        }
        match js_sys::Reflect::get(&obj, &key) {
            Ok(next) => obj = next,
            Err(e) => {
                log::warn!("{}: {:?}", path, e);
                return;
            }
        }
    }
}

fn warn_on_err(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("canvas {} failed: {:?}", op, e);
    }
}

use chrono::{DateTime, Utc};
use starmap_engine::{
    CommandList, HistoryQuery, InputEvent, InputQueue, LocationOutcome, StarMapApp,
    StarmapConfig, Viewport,
};

use crate::canvas::Canvas2dSurface;

/// Owns the app, its input queue and the page canvas.
///
/// The `#[wasm_bindgen]` exports in `lib.rs` keep one of these in a
/// `thread_local!`, push input into it and pump it.
pub struct SkyRunner {
    app: StarMapApp,
    input: InputQueue,
    surface: Option<Canvas2dSurface>,
}

impl SkyRunner {
    /// `surface` is `None` for hosts that replay [`frame_json`](Self::frame_json)
    /// on their own canvas.
    pub fn new(config: StarmapConfig, surface: Option<Canvas2dSurface>) -> Self {
        Self {
            app: StarMapApp::new(config),
            input: InputQueue::new(),
            surface,
        }
    }

    pub fn app(&self) -> &StarMapApp {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut StarMapApp {
        &mut self.app
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply queued input and redraw the canvas if anything visible changed.
    pub fn tick(&mut self) {
        self.app.update(&self.input, now());
        self.input.drain();

        if let Some(surface) = &self.surface {
            surface.set_cursor(self.app.cursor());
        }
        if self.app.needs_redraw() {
            self.render();
        }
    }

    /// Unconditional redraw onto the page canvas.
    pub fn render(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.app.render(surface);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) {
        let viewport = Viewport::new(width, height).with_dpr(dpr);
        if let Some(surface) = &self.surface {
            surface.resize(&viewport);
        }
        self.push_input(InputEvent::Resize {
            width,
            height,
            dpr: viewport.dpr,
        });
        self.tick();
    }

    /// Size to the canvas element's current CSS box.
    pub fn fit_to_canvas(&mut self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let (w, h) = surface.css_size();
        if w > 0.0 && h > 0.0 {
            self.resize(w, h, Canvas2dSurface::device_pixel_ratio());
        }
    }

    pub fn set_location(&mut self, outcome: LocationOutcome) {
        self.app.set_location_outcome(&outcome);
        self.tick();
    }

    /// Render into a command list and serialize it.
    pub fn frame_json(&mut self) -> Result<String, serde_json::Error> {
        let mut commands = CommandList::new();
        self.app.render(&mut commands);
        commands.to_json()
    }

    /// Tessellated triangles as `[x, y, r, g, b, a]` per vertex.
    #[cfg(feature = "vectors")]
    pub fn vector_frame(&mut self) -> Vec<f32> {
        let mut surface = starmap_engine::VectorSurface::new();
        self.app.render(&mut surface);
        surface.as_floats().to_vec()
    }

    pub fn events_json(&mut self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.app.take_events())
    }

    pub fn notices_json(&mut self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.app.take_notices())
    }

    pub fn search_results_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.app.search_results())
    }

    pub fn history_json(&self, query: &HistoryQuery) -> starmap_engine::Result<String> {
        starmap_engine::history::observation::records_to_json(&self.app.observations(query))
    }
}

/// Wall-clock time from the browser.
pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

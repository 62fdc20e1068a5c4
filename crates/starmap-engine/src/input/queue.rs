/// Input events the star map understands.
/// Pointer coordinates are CSS pixels relative to the canvas' top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The cursor moved over the canvas.
    PointerMove { x: f32, y: f32 },
    /// The canvas was clicked or tapped.
    Click { x: f32, y: f32 },
    /// The canvas changed size or pixel density.
    Resize { width: f32, height: f32, dpr: f32 },
    /// The search box changed.
    Search { term: String },
    /// A star was picked by name from the search results list.
    SelectByName { name: String },
    /// Clear hover and selection.
    Deselect,
    /// Flip between the sky map and the AR placeholder.
    ToggleAr,
}

/// A queue of input events.
/// The host pushes events as they happen; the app drains them on each update.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

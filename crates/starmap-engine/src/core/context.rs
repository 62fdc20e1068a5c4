use glam::Vec2;

use crate::assets::catalog::{Constellation, Star};
use crate::core::location::ObserverLocation;
use crate::input::hit_test::hit_test;
use crate::renderer::projection::Viewport;

/// Everything one redraw of the sky needs, plus the transient pointer state.
///
/// `stars` is the *displayed* catalog (already filtered). Replacing it or
/// resizing the viewport drops hover and selection.
#[derive(Debug, Clone, Default)]
pub struct SkyContext {
    stars: Vec<Star>,
    constellations: Vec<Constellation>,
    viewport: Viewport,
    hover: Option<usize>,
    selection: Option<Star>,
    location: Option<ObserverLocation>,
}

impl SkyContext {
    pub fn new(stars: Vec<Star>, constellations: Vec<Constellation>, viewport: Viewport) -> Self {
        Self {
            stars,
            constellations,
            viewport,
            hover: None,
            selection: None,
            location: None,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Index into [`stars`](Self::stars) of the hovered star.
    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    pub fn hovered_star(&self) -> Option<&Star> {
        self.hover.and_then(|i| self.stars.get(i))
    }

    pub fn selection(&self) -> Option<&Star> {
        self.selection.as_ref()
    }

    pub fn location(&self) -> Option<&ObserverLocation> {
        self.location.as_ref()
    }

    /// Swap in a new displayed catalog.
    pub fn set_stars(&mut self, stars: Vec<Star>) {
        self.stars = stars;
        self.clear_pointer_state();
    }

    pub fn set_constellations(&mut self, constellations: Vec<Constellation>) {
        self.constellations = constellations;
        self.clear_pointer_state();
    }

    /// Returns true when the geometry actually changed.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        if self.viewport == viewport {
            return false;
        }
        self.viewport = viewport;
        self.clear_pointer_state();
        true
    }

    pub fn set_location(&mut self, location: Option<ObserverLocation>) {
        self.location = location;
    }

    /// Recompute hover from scratch. Returns true if it changed.
    pub fn pointer_moved(&mut self, pointer: Vec2, hit_radius: f32) -> bool {
        let hover = hit_test(&self.stars, &self.viewport, pointer, hit_radius);
        let changed = hover != self.hover;
        self.hover = hover;
        changed
    }

    /// Commit the current hover as the selection. `None` when nothing is hovered.
    pub fn commit_hover(&mut self) -> Option<&Star> {
        let star = self.hovered_star()?.clone();
        self.selection = Some(star);
        self.selection.as_ref()
    }

    /// Select a displayed star by name, independent of the pointer.
    pub fn select_by_name(&mut self, name: &str) -> Option<&Star> {
        let star = self.stars.iter().find(|s| s.name == name)?.clone();
        self.selection = Some(star);
        self.selection.as_ref()
    }

    pub fn deselect(&mut self) {
        self.clear_pointer_state();
    }

    fn clear_pointer_state(&mut self) {
        self.hover = None;
        self.selection = None;
    }
}

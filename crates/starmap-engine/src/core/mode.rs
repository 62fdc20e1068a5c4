use crate::core::context::SkyContext;

/// What the canvas is showing.
///
/// The AR variant is a placeholder with no sensor or tracking logic. It
/// parks the sky context so toggling back restores the same map.
#[derive(Debug, Clone)]
pub enum DisplayMode {
    Normal(SkyContext),
    ArPlaceholder { parked: SkyContext },
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Normal(SkyContext::default())
    }
}

impl DisplayMode {
    pub fn is_ar(&self) -> bool {
        matches!(self, DisplayMode::ArPlaceholder { .. })
    }

    /// Flip between the sky map and the AR placeholder.
    pub fn toggle(self) -> Self {
        match self {
            DisplayMode::Normal(ctx) => DisplayMode::ArPlaceholder { parked: ctx },
            DisplayMode::ArPlaceholder { parked } => DisplayMode::Normal(parked),
        }
    }

    /// The sky context, whichever mode is active.
    pub fn context(&self) -> &SkyContext {
        match self {
            DisplayMode::Normal(ctx) => ctx,
            DisplayMode::ArPlaceholder { parked } => parked,
        }
    }

    pub fn context_mut(&mut self) -> &mut SkyContext {
        match self {
            DisplayMode::Normal(ctx) => ctx,
            DisplayMode::ArPlaceholder { parked } => parked,
        }
    }

    /// The sky context only while the map is live; pointer input goes here.
    pub fn active_sky_mut(&mut self) -> Option<&mut SkyContext> {
        match self {
            DisplayMode::Normal(ctx) => Some(ctx),
            DisplayMode::ArPlaceholder { .. } => None,
        }
    }
}

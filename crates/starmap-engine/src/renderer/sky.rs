//! Full redraw of the sky chart.
//!
//! Paint order, back to front:
//! 1. background fill
//! 2. decorative starfield
//! 3. constellation edges
//! 4. catalog stars (halo, body, label)
//! 5. observer location readout
//!
//! A redraw reads the context and never changes it. Only the starfield
//! generator advances.

use glam::Vec2;

use crate::assets::catalog::find_star;
use crate::config::StarmapConfig;
use crate::core::context::SkyContext;
use crate::core::mode::DisplayMode;
use crate::renderer::traits::{DrawSurface, TextAlign};
use crate::systems::starfield::Starfield;

/// Radius of a magnitude-0 star is `8 - 0`; fainter stars shrink down to the floor.
const STAR_RADIUS_BASE: f32 = 8.0;
const STAR_RADIUS_MIN: f32 = 2.0;
/// Halo radius relative to the star body.
const HALO_SCALE: f32 = 2.0;

const AR_TITLE: &str = "AR Mode";
const AR_CAPTION: &str = "Point your device at the sky to see constellations overlaid";

/// `max(2, 8 - magnitude)`.
pub fn star_radius(magnitude: f32) -> f32 {
    (STAR_RADIUS_BASE - magnitude).max(STAR_RADIUS_MIN)
}

pub fn has_halo(magnitude: f32, config: &StarmapConfig) -> bool {
    magnitude < config.halo_below_magnitude
}

pub fn shows_label(magnitude: f32, hovered: bool, config: &StarmapConfig) -> bool {
    hovered || magnitude < config.label_below_magnitude
}

/// Draw whatever the display mode calls for.
pub fn render<S: DrawSurface + ?Sized>(
    mode: &DisplayMode,
    config: &StarmapConfig,
    starfield: &mut Starfield,
    surface: &mut S,
) {
    match mode {
        DisplayMode::Normal(ctx) => render_sky(ctx, config, starfield, surface),
        DisplayMode::ArPlaceholder { parked } => render_ar_placeholder(parked, config, surface),
    }
}

/// One complete sky redraw.
pub fn render_sky<S: DrawSurface + ?Sized>(
    ctx: &SkyContext,
    config: &StarmapConfig,
    starfield: &mut Starfield,
    surface: &mut S,
) {
    let vp = ctx.viewport();
    surface.clear(vp.width, vp.height, config.background);
    starfield.draw(surface, vp, config);
    draw_edges(ctx, config, surface);
    draw_stars(ctx, config, surface);
    draw_readout(ctx, config, surface);
}

fn draw_edges<S: DrawSurface + ?Sized>(ctx: &SkyContext, config: &StarmapConfig, surface: &mut S) {
    let vp = ctx.viewport();
    let stars = ctx.stars();
    for constellation in ctx.constellations() {
        for edge in &constellation.edges {
            // Endpoints filtered out of the displayed catalog just skip this edge.
            let (Some(a), Some(b)) = (find_star(stars, &edge.from), find_star(stars, &edge.to)) else {
                continue;
            };
            surface.stroke_line(
                vp.project(a.ra, a.dec),
                vp.project(b.ra, b.dec),
                config.edge_width,
                config.edge_color,
            );
        }
    }
}

fn draw_stars<S: DrawSurface + ?Sized>(ctx: &SkyContext, config: &StarmapConfig, surface: &mut S) {
    let vp = ctx.viewport();
    for (index, star) in ctx.stars().iter().enumerate() {
        let center = vp.project(star.ra, star.dec);
        let radius = star_radius(star.magnitude);
        let hovered = ctx.hover() == Some(index);

        if has_halo(star.magnitude, config) {
            surface.fill_circle(center, radius * HALO_SCALE, config.halo_color);
        }

        let body = if hovered { config.hover_color } else { config.star_color };
        surface.fill_circle(center, radius, body);

        if shows_label(star.magnitude, hovered, config) {
            surface.fill_text(
                &star.name,
                Vec2::new(center.x, center.y - radius - config.label_offset),
                &config.label_font,
                TextAlign::Center,
                config.label_color,
            );
        }
    }
}

fn draw_readout<S: DrawSurface + ?Sized>(ctx: &SkyContext, config: &StarmapConfig, surface: &mut S) {
    let Some(location) = ctx.location() else {
        return;
    };
    let vp = ctx.viewport();
    surface.fill_text(
        &location.readout(),
        Vec2::new(vp.width - config.readout_right_inset, config.readout_top),
        &config.readout_font,
        TextAlign::Right,
        config.readout_color,
    );
}

/// Stand-in screen for AR mode. No sky, no pointer interaction.
pub fn render_ar_placeholder<S: DrawSurface + ?Sized>(
    ctx: &SkyContext,
    config: &StarmapConfig,
    surface: &mut S,
) {
    let vp = ctx.viewport();
    let center = Vec2::new(vp.width / 2.0, vp.height / 2.0);

    surface.clear(vp.width, vp.height, config.background);
    surface.fill_circle(center - Vec2::new(0.0, 40.0), 48.0, config.edge_color.with_alpha(0.2));
    surface.fill_circle(center - Vec2::new(0.0, 40.0), 24.0, config.hover_color.with_alpha(0.6));
    surface.fill_text(
        AR_TITLE,
        center + Vec2::new(0.0, 32.0),
        &config.label_font,
        TextAlign::Center,
        config.label_color,
    );
    surface.fill_text(
        AR_CAPTION,
        center + Vec2::new(0.0, 52.0),
        &config.readout_font,
        TextAlign::Center,
        config.label_color.with_alpha(0.6),
    );
}

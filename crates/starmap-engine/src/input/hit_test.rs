use glam::Vec2;

use crate::assets::catalog::Star;
use crate::renderer::projection::Viewport;

/// Index of the star under `pointer`, if any.
///
/// A star counts when the pointer is strictly closer than `radius` to its
/// projected center. Every star is checked in catalog order and the last one
/// in range wins, so overlapping stars resolve to the later entry rather
/// than the closest one.
pub fn hit_test(stars: &[Star], viewport: &Viewport, pointer: Vec2, radius: f32) -> Option<usize> {
    let mut found = None;
    for (index, star) in stars.iter().enumerate() {
        let center = viewport.project(star.ra, star.dec);
        if pointer.distance(center) < radius {
            found = Some(index);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::builtin::builtin_catalog;

    fn viewport() -> Viewport {
        // 1 px per degree on both axes; ra 180 / dec 0 lands on (180, 90).
        Viewport::new(360.0, 180.0)
    }

    #[test]
    fn threshold_is_strict() {
        let stars = vec![Star::new("Center", 180.0, 0.0, 1.0)];
        assert_eq!(hit_test(&stars, &viewport(), Vec2::new(180.0 + 14.999, 90.0), 15.0), Some(0));
        assert_eq!(hit_test(&stars, &viewport(), Vec2::new(180.0 + 15.0, 90.0), 15.0), None);
        assert_eq!(hit_test(&stars, &viewport(), Vec2::new(180.0, 90.0 - 15.0), 15.0), None);
        assert_eq!(hit_test(&stars, &viewport(), Vec2::new(189.0, 102.0), 15.0), None);
        assert_eq!(hit_test(&stars, &viewport(), Vec2::new(188.0, 101.0), 15.0), Some(0));
    }

    #[test]
    fn last_star_in_range_wins() {
        let stars = vec![
            Star::new("First", 180.0, 0.0, 1.0),
            Star::new("Second", 180.0, 0.0, 3.0),
        ];
        assert_eq!(hit_test(&stars, &viewport(), Vec2::new(181.0, 90.0), 15.0), Some(1));
    }

    #[test]
    fn later_star_wins_even_when_farther() {
        let stars = vec![
            Star::new("Near", 180.0, 0.0, 1.0),
            Star::new("Far", 190.0, 0.0, 1.0),
        ];
        // 1 px from Near, 9 px from Far.
        assert_eq!(hit_test(&stars, &viewport(), Vec2::new(181.0, 90.0), 15.0), Some(1));
    }

    #[test]
    fn empty_catalog_never_hits() {
        assert_eq!(hit_test(&[], &viewport(), Vec2::ZERO, 15.0), None);
    }

    #[test]
    fn sirius_click_scenario() {
        let sirius = vec![Star::new("Sirius", 101.28, -16.72, -1.46)];
        let vp = Viewport::new(800.0, 600.0);
        // Sirius projects to about (225.07, 355.73).
        assert_eq!(hit_test(&sirius, &vp, Vec2::new(225.0, 358.0), 15.0), Some(0));
        assert_eq!(hit_test(&sirius, &vp, Vec2::new(225.0, 340.0), 15.0), None);
    }

    #[test]
    fn builtin_catalog_hover() {
        let catalog = builtin_catalog();
        let vp = Viewport::new(800.0, 600.0);
        let vega = vp.project(279.23, 38.78);
        let idx = hit_test(&catalog.stars, &vp, vega, 15.0).unwrap();
        assert_eq!(catalog.stars[idx].name, "Vega");
    }
}

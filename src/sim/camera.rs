//! Horizontal follow camera

/// Where the camera wants to be: player centered, clamped to the world.
/// A viewport wider than the world pins the camera at 0.
#[inline]
pub fn camera_target(player_x: f32, viewport_width: f32, world_width: f32) -> f32 {
    let max = (world_width - viewport_width).max(0.0);
    (player_x - viewport_width / 2.0).clamp(0.0, max)
}

/// Move the camera a `smoothing` fraction of the way to its target
#[inline]
pub fn update_camera(
    camera_x: f32,
    player_x: f32,
    viewport_width: f32,
    world_width: f32,
    smoothing: f32,
) -> f32 {
    let target = camera_target(player_x, viewport_width, world_width);
    camera_x + (target - camera_x) * smoothing
}

/// Jump straight to the target (new game, respawn, resize)
#[inline]
pub fn snap_camera(player_x: f32, viewport_width: f32, world_width: f32) -> f32 {
    camera_target(player_x, viewport_width, world_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_clamps_to_world() {
        assert_eq!(camera_target(50.0, 800.0, 8000.0), 0.0);
        assert_eq!(camera_target(7990.0, 800.0, 8000.0), 7200.0);
        assert_eq!(camera_target(1000.0, 800.0, 8000.0), 600.0);
    }

    #[test]
    fn test_wide_viewport_pins_to_zero() {
        assert_eq!(camera_target(500.0, 9000.0, 8000.0), 0.0);
    }

    #[test]
    fn test_smoothing_moves_fraction_of_distance() {
        let next = update_camera(0.0, 1000.0, 800.0, 8000.0, 0.1);
        assert!((next - 60.0).abs() < 1e-4);
        let next = update_camera(next, 1000.0, 800.0, 8000.0, 0.1);
        assert!((next - 114.0).abs() < 1e-4);
    }

    #[test]
    fn test_converges_to_target() {
        let mut cam = 0.0;
        for _ in 0..300 {
            cam = update_camera(cam, 1000.0, 800.0, 8000.0, 0.1);
        }
        assert!((cam - 600.0).abs() < 0.01);
    }

    #[test]
    fn test_snap_has_no_smoothing() {
        assert_eq!(snap_camera(3000.0, 800.0, 8000.0), 2600.0);
    }
}

use glam::Vec2;

/// Viewer pose in world space.
///
/// * Angles are **degrees**: 0° = +x (east), counter-clockwise positive,
///   with world y growing down the screen.  So 90° faces up-screen.
/// * `eye_height` is world units above the floor plane; walls are one
///   `cell_size` tall, so half a cell puts the eye mid-wall.
/// * Mutated between frames by input handling; read-only during a render.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    pos: Vec2,
    view_angle: f32, // degrees, normalized to [0, 360)
    fov: f32,        // horizontal field of view, degrees
    eye_height: f32,
    plane_dist: f32, // derived: half plane width / tan(half fov)
}

impl Player {
    /// Create a viewer at `pos` facing `view_angle`, projecting onto a
    /// plane `plane_w` pixels wide.
    ///
    /// ```text
    /// plane_dist = (plane_w / 2) / tan(fov / 2)
    /// ```
    pub fn new(pos: Vec2, view_angle: f32, fov: f32, eye_height: f32, plane_w: usize) -> Self {
        assert!(
            fov.is_finite() && fov > 0.0 && fov < 180.0,
            "fov must lie in (0, 180) degrees, got {fov}"
        );
        let plane_dist = (plane_w as f32) * 0.5 / (fov * 0.5).to_radians().tan();
        Self {
            pos,
            view_angle: view_angle.rem_euclid(360.0),
            fov,
            eye_height,
            plane_dist,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }
    #[inline]
    pub fn view_angle(&self) -> f32 {
        self.view_angle
    }
    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }
    #[inline]
    pub fn eye_height(&self) -> f32 {
        self.eye_height
    }
    #[inline]
    pub fn plane_dist(&self) -> f32 {
        self.plane_dist
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the viewer looks.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        let (s, c) = self.view_angle.to_radians().sin_cos();
        Vec2::new(c, -s) // world y is screen-down
    }

    /// Unit vector pointing to the viewer's screen-right.
    #[inline(always)]
    pub fn right(self) -> Vec2 {
        self.forward().perp()
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Pin the position directly (collision checks live with the caller).
    #[inline]
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Move by `forward` units and `side` (strafe), no collision.
    pub fn step(&mut self, forward: f32, side: f32) {
        self.pos += self.forward() * forward + self.right() * side;
    }

    /// Rotate the view (positive = counter-clockwise / screen-left).
    pub fn turn(&mut self, delta_deg: f32) {
        self.view_angle = (self.view_angle + delta_deg).rem_euclid(360.0);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_dist_matches_fov_geometry() {
        // 60° fov on an 800-wide plane: 400 / tan(30°) ≈ 692.82
        let p = Player::new(Vec2::ZERO, 0.0, 60.0, 32.0, 800);
        assert!((p.plane_dist() - 692.82).abs() < 0.01);

        // 90° fov: plane_dist equals half the plane width
        let p = Player::new(Vec2::ZERO, 0.0, 90.0, 32.0, 640);
        assert!((p.plane_dist() - 320.0).abs() < 1e-3);
    }

    #[test]
    fn forward_and_right_follow_screen_convention() {
        let east = Player::new(Vec2::ZERO, 0.0, 60.0, 32.0, 800);
        assert!((east.forward() - Vec2::new(1.0, 0.0)).length() < 1e-6);
        assert!((east.right() - Vec2::new(0.0, 1.0)).length() < 1e-6);

        // 90° looks up-screen (negative y)
        let north = Player::new(Vec2::ZERO, 90.0, 60.0, 32.0, 800);
        assert!((north.forward() - Vec2::new(0.0, -1.0)).length() < 1e-5);
        assert!((north.right() - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn constructor_and_turn_normalize_angle() {
        let mut p = Player::new(Vec2::ZERO, 450.0, 60.0, 32.0, 800);
        assert!((p.view_angle() - 90.0).abs() < 1e-6);
        p.turn(-100.0);
        assert!((p.view_angle() - 350.0).abs() < 1e-4);
    }

    #[test]
    fn step_moves_along_view_axes() {
        let mut p = Player::new(Vec2::new(10.0, 10.0), 90.0, 60.0, 32.0, 800);
        p.step(5.0, 0.0);
        assert!((p.pos() - Vec2::new(10.0, 5.0)).length() < 1e-4);
        p.step(0.0, 2.0);
        assert!((p.pos() - Vec2::new(12.0, 5.0)).length() < 1e-4);
    }
}

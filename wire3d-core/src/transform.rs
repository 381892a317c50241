/// Model rotation and the rotation state driven by each frame
use crate::geometry::Vertex3D;

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Spin at `rates` (radians per second) for `dt` seconds
    pub fn advance(&mut self, rates: [f32; 3], dt: f32) {
        self.rotate(rates[0] * dt, rates[1] * dt, rates[2] * dt);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotate `p` about Z by `angle_z`, then about Y by `angle_y`, then about X by `angle_x`.
///
/// Each stage is the right-handed rotation for its axis.
pub fn rotate_3d(p: Vertex3D, angle_x: f32, angle_y: f32, angle_z: f32) -> Vertex3D {
    let (sin_z, cos_z) = angle_z.sin_cos();
    let x1 = p.x * cos_z - p.y * sin_z;
    let y1 = p.x * sin_z + p.y * cos_z;
    let z1 = p.z;

    let (sin_y, cos_y) = angle_y.sin_cos();
    let x2 = x1 * cos_y + z1 * sin_y;
    let y2 = y1;
    let z2 = -x1 * sin_y + z1 * cos_y;

    let (sin_x, cos_x) = angle_x.sin_cos();
    let x3 = x2;
    let y3 = y2 * cos_x - z2 * sin_x;
    let z3 = y2 * sin_x + z2 * cos_x;

    Vertex3D::new(x3, y3, z3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_close(a: Vertex3D, b: Vertex3D) {
        assert!((a - b).norm() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_advance_scales_by_delta() {
        let mut state = RotationState::zero();
        state.advance([0.0, 1.0, 2.0], 0.5);
        assert_eq!(state, RotationState::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        for p in [
            Vertex3D::new(1.0, 2.0, 3.0),
            Vertex3D::new(-4.5, 0.0, 7.25),
            Vertex3D::origin(),
        ] {
            assert_close(rotate_3d(p, 0.0, 0.0, 0.0), p);
        }
    }

    #[test]
    fn test_single_axis_quarter_turns() {
        let x = Vertex3D::new(1.0, 0.0, 0.0);
        let y = Vertex3D::new(0.0, 1.0, 0.0);

        assert_close(rotate_3d(x, 0.0, 0.0, FRAC_PI_2), y);
        assert_close(rotate_3d(x, 0.0, FRAC_PI_2, 0.0), Vertex3D::new(0.0, 0.0, -1.0));
        assert_close(rotate_3d(y, FRAC_PI_2, 0.0, 0.0), Vertex3D::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_order_is_z_then_y_then_x() {
        // Z takes x to y, Y leaves y alone, X takes y to z
        let p = rotate_3d(Vertex3D::new(1.0, 0.0, 0.0), FRAC_PI_2, FRAC_PI_2, FRAC_PI_2);
        assert_close(p, Vertex3D::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rotation_keeps_length() {
        let p = Vertex3D::new(1.0, 2.0, 3.0);
        let rotated = rotate_3d(p, 0.3, -1.1, 2.4);
        assert!((rotated.coords.norm() - p.coords.norm()).abs() < 1e-5);
    }
}

/// Camera and weak-perspective projection utilities
use crate::geometry::{Vertex2D, Vertex3D};

/// Project a model-space point to screen space.
///
/// The point is pushed `camera_distance` away from the viewer and divided by
/// its own depth. Screen y grows downward. A depth at or near zero yields
/// non-finite coordinates; see [`is_drawable`].
pub fn project(
    p: &Vertex3D,
    camera_distance: f32,
    focal_length: f32,
    screen_width: f32,
    screen_height: f32,
) -> Vertex2D {
    let z = p.z + camera_distance;
    Vertex2D::new(
        screen_width / 2.0 + (p.x / z) * focal_length,
        screen_height / 2.0 - (p.y / z) * focal_length,
    )
}

/// Whether a projected point can be handed to a line drawer
pub fn is_drawable(p: &Vertex2D) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Camera placement and the logical screen it projects onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub distance: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            distance: 4.0,
            screen_width: width as f32,
            screen_height: height as f32,
        }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn project(&self, p: &Vertex3D, focal_length: f32) -> Vertex2D {
        project(
            p,
            self.distance,
            focal_length,
            self.screen_width,
            self.screen_height,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Zoom control: larger values magnify, and the value never drops below `floor`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalLength {
    value: f32,
    floor: f32,
    step: f32,
}

impl FocalLength {
    pub fn new(value: f32, floor: f32, step: f32) -> Self {
        Self {
            value: value.max(floor),
            floor,
            step,
        }
    }

    pub fn get(&self) -> f32 {
        self.value
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    pub fn set(&mut self, value: f32) {
        self.value = value.max(self.floor);
    }

    pub fn zoom_in(&mut self) {
        self.set(self.value + self.step);
    }

    pub fn zoom_out(&mut self) {
        self.set(self.value - self.step);
    }
}

impl Default for FocalLength {
    fn default() -> Self {
        Self::new(200.0, 200.0, 100.0)
    }
}

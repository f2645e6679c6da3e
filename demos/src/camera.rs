use glsandbox::cgmath::prelude::*;
use glsandbox::cgmath::{self, Deg, Matrix4, Point3, Vector3};
use glsandbox::prelude::*;

const MOVEMENT_SPEED: f32 = 2.5;
const MOUSE_SENSITIVITY: f32 = 0.1;
const MAX_PITCH: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 45.0;

/// A fly camera. WASD moves on the horizontal plane of the camera, Space and LShift
/// move up and down, the mouse looks around and the wheel zooms.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    zoom: f32,
}

impl Camera {
    pub fn new(position: Point3<f32>) -> Self {
        let mut camera = Camera {
            position,
            front: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
            right: Vector3::unit_x(),
            world_up: Vector3::unit_y(),
            yaw: -90.0,
            pitch: 0.0,
            zoom: MAX_ZOOM,
        };

        camera.update_vectors();
        camera
    }

    #[inline]
    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    /// Field of view in degrees.
    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn process_input(&mut self, input: &Input, dt: f32) {
        let velocity = MOVEMENT_SPEED * dt;

        if input.is_key_down(Key::W) {
            self.position += self.front * velocity;
        }

        if input.is_key_down(Key::S) {
            self.position -= self.front * velocity;
        }

        if input.is_key_down(Key::A) {
            self.position -= self.right * velocity;
        }

        if input.is_key_down(Key::D) {
            self.position += self.right * velocity;
        }

        if input.is_key_down(Key::Space) {
            self.position += self.up * velocity;
        }

        if input.is_key_down(Key::LShift) {
            self.position -= self.up * velocity;
        }

        let (dx, dy) = input.mouse_movement();
        if dx != 0.0 || dy != 0.0 {
            self.yaw += dx * MOUSE_SENSITIVITY;
            // Screen y grows downwards.
            self.pitch = (self.pitch - dy * MOUSE_SENSITIVITY)
                .max(-MAX_PITCH)
                .min(MAX_PITCH);
            self.update_vectors();
        }

        let scroll = input.mouse_scroll();
        if scroll != 0.0 {
            self.zoom = (self.zoom - scroll).max(MIN_ZOOM).min(MAX_ZOOM);
        }
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_at(self.position, self.position + self.front, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Matrix4<f32> {
        cgmath::perspective(Deg(self.zoom), aspect, 0.1, 100.0)
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());

        self.front = Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_looking_down_negative_z() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 3.0));
        assert!((camera.front() - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn pitch_is_constrained() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 3.0));
        let mut input = Input::new();
        input.on_mouse_moved(0.0, -10_000.0);
        camera.process_input(&input, 0.016);

        assert!(camera.front().y < 1.0);
        assert!(camera.front().y > 0.99);
    }

    #[test]
    fn moves_forward() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 3.0));
        let mut input = Input::new();
        input.on_key_pressed(Key::W);
        camera.process_input(&input, 1.0);

        assert!((camera.position.z - 0.5).abs() < 1e-5);
    }
}

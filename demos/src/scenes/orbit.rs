use glsandbox::cgmath::{self, Deg, InnerSpace, Matrix4, Point3, Vector3};
use glsandbox::prelude::*;

use super::mesh::Mesh;
use super::Viewport;

const CRATES: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [2.0, 5.0, -15.0],
    [-1.5, -2.2, -2.5],
    [-3.8, -2.0, -12.3],
    [2.4, -0.4, -3.5],
    [-1.7, 3.0, -7.5],
    [1.3, -2.0, -2.5],
    [1.5, 2.0, -2.5],
    [1.5, 0.2, -1.5],
    [-1.3, 1.0, -1.5],
];

/// Where the orbiting camera stands after `angle` radians on a circle of `radius`
/// around the origin.
pub fn orbit_position(angle: f32, radius: f32, height: f32) -> Point3<f32> {
    Point3::new(angle.sin() * radius, height, angle.cos() * radius)
}

/// A field of crates watched by a camera that circles around the origin and keeps
/// looking at it.
pub struct Orbit {
    viewport: Viewport,
    renderer: Renderer,
    cube: Mesh,
    shader: Shader,
    texture: Texture,

    angle: f32,
    speed: f32,
    radius: f32,
    height: f32,
    fov: f32,
}

impl Orbit {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;

        let shader = Shader::from_file(device, ctx.asset("shaders/textured.glsl"))?;
        shader.bind();
        shader.set_uniform_1i("u_Texture", 0)?;

        device.set_capability(Capability::DepthTest, true);

        Ok(Orbit {
            viewport,
            renderer: Renderer::new(device),
            cube: Mesh::cube(device)?,
            shader,
            texture: Texture::from_file(device, ctx.asset("textures/crate.png"))?,

            angle: 0.0,
            speed: 0.5,
            radius: 10.0,
            height: 0.0,
            fov: 45.0,
        })
    }
}

impl Scene for Orbit {
    fn on_update(&mut self, dt: f32) -> Result<()> {
        self.angle += self.speed * dt;
        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        let eye = orbit_position(self.angle, self.radius, self.height);
        let view = Matrix4::look_at(eye, Point3::new(0.0, 0.0, 0.0), Vector3::unit_y());
        let projection = cgmath::perspective(Deg(self.fov), self.viewport.aspect(), 0.1, 100.0);

        self.renderer.set_clear_color([0.1, 0.1, 0.1, 1.0]);
        self.renderer.clear_with(ClearFlags::COLOR | ClearFlags::DEPTH);
        self.texture.bind(0)?;

        self.shader.bind();
        self.shader.set_uniform_mat4("u_Projection", &projection)?;
        self.shader.set_uniform_mat4("u_View", &view)?;

        let axis = Vector3::new(1.0, 0.3, 0.5).normalize();
        for (i, position) in CRATES.iter().enumerate() {
            let model = Matrix4::from_translation(Vector3::from(*position))
                * Matrix4::from_axis_angle(axis, Deg(20.0 * i as f32));
            self.shader.set_uniform_mat4("u_Model", &model)?;
            self.cube.draw(&self.renderer, &self.shader);
        }

        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.slider_f32("Orbit Speed", &mut self.speed, -2.0, 2.0);
        ui.slider_f32("Radius", &mut self.radius, 1.0, 30.0);
        ui.slider_f32("Height", &mut self.height, -10.0, 10.0);
        ui.slider_f32("Field of View", &mut self.fov, 10.0, 120.0);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glsandbox::cgmath::EuclideanSpace;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn keeps_radius() {
        for &angle in &[0.0, 0.7, FRAC_PI_2, 3.0] {
            let p = orbit_position(angle, 10.0, 2.0);
            assert!((Vector3::new(p.x, 0.0, p.z).magnitude() - 10.0).abs() < 1e-4);
            assert_eq!(p.y, 2.0);
        }

        let p = orbit_position(0.0, 10.0, 0.0);
        assert!((p.to_vec() - Vector3::new(0.0, 0.0, 10.0)).magnitude() < 1e-6);
    }
}

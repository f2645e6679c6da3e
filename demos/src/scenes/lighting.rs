use glsandbox::cgmath::{Matrix4, Point3, Vector3};
use glsandbox::prelude::*;

use super::mesh::Mesh;
use super::Viewport;
use crate::camera::Camera;

/// Phong shading of a single cube lit by a point light. The light itself is drawn as
/// a small unlit cube, and can either be placed by hand or orbit the object.
pub struct Lighting {
    viewport: Viewport,
    renderer: Renderer,
    camera: Camera,
    cube: Mesh,
    object_shader: Shader,
    light_shader: Shader,

    object_color: [f32; 4],
    light_color: [f32; 4],
    light_position: Vector3<f32>,
    ambient: f32,
    specular: f32,
    shininess: f32,
    orbit: bool,
    angle: f32,
}

impl Lighting {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;

        device.set_capability(Capability::DepthTest, true);

        Ok(Lighting {
            viewport,
            renderer: Renderer::new(device),
            camera: Camera::new(Point3::new(0.0, 1.0, 5.0)),
            cube: Mesh::cube(device)?,
            object_shader: Shader::from_file(device, ctx.asset("shaders/lighting.glsl"))?,
            light_shader: Shader::from_file(device, ctx.asset("shaders/light_source.glsl"))?,

            object_color: [1.0, 0.5, 0.31, 1.0],
            light_color: [1.0, 1.0, 1.0, 1.0],
            light_position: Vector3::new(1.2, 1.0, 2.0),
            ambient: 0.1,
            specular: 0.5,
            shininess: 32.0,
            orbit: false,
            angle: 0.0,
        })
    }
}

impl Scene for Lighting {
    fn process_input(&mut self, input: &Input, dt: f32) -> Result<()> {
        self.camera.process_input(input, dt);
        Ok(())
    }

    fn on_update(&mut self, dt: f32) -> Result<()> {
        if self.orbit {
            self.angle += dt;
            let radius = (self.light_position.x.powi(2) + self.light_position.z.powi(2))
                .sqrt()
                .max(1.0);
            self.light_position.x = self.angle.sin() * radius;
            self.light_position.z = self.angle.cos() * radius;
        }

        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        let projection = self.camera.projection(self.viewport.aspect());
        let view = self.camera.view();
        let eye = self.camera.position;
        let [r, g, b, _] = self.light_color;

        self.renderer.set_clear_color([0.1, 0.1, 0.1, 1.0]);
        self.renderer.clear_with(ClearFlags::COLOR | ClearFlags::DEPTH);

        let shader = &self.object_shader;
        shader.bind();
        shader.set_uniform_mat4("u_Projection", &projection)?;
        shader.set_uniform_mat4("u_View", &view)?;
        shader.set_uniform_mat4("u_Model", &Matrix4::from_scale(1.5))?;
        let [or, og, ob, _] = self.object_color;
        shader.set_uniform_3f("u_ObjectColor", or, og, ob)?;
        shader.set_uniform_3f("u_LightColor", r, g, b)?;
        shader.set_uniform_vec3("u_LightPosition", self.light_position)?;
        shader.set_uniform_3f("u_ViewPosition", eye.x, eye.y, eye.z)?;
        shader.set_uniform_1f("u_Ambient", self.ambient)?;
        shader.set_uniform_1f("u_Specular", self.specular)?;
        shader.set_uniform_1f("u_Shininess", self.shininess)?;
        self.cube.draw(&self.renderer, shader);

        let model = Matrix4::from_translation(self.light_position) * Matrix4::from_scale(0.2);
        let shader = &self.light_shader;
        shader.bind();
        shader.set_uniform_mat4("u_MVP", &(projection * view * model))?;
        shader.set_uniform_3f("u_LightColor", r, g, b)?;
        self.cube.draw(&self.renderer, shader);

        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.text("Light Position");
        ui.slider_f32("X", &mut self.light_position.x, -10.0, 10.0);
        ui.slider_f32("Y", &mut self.light_position.y, -10.0, 10.0);
        ui.slider_f32("Z", &mut self.light_position.z, -10.0, 10.0);
        ui.checkbox("Orbit", &mut self.orbit);

        ui.text("Material");
        ui.slider_f32("Ambient", &mut self.ambient, 0.0, 1.0);
        ui.slider_f32("Specular", &mut self.specular, 0.0, 1.0);
        ui.slider_f32("Shininess", &mut self.shininess, 1.0, 256.0);
        ui.color_edit4("Object Color", &mut self.object_color);
        ui.color_edit4("Light Color", &mut self.light_color);
        Ok(())
    }
}

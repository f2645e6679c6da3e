use std::rc::Rc;

use glsandbox::cgmath::{Deg, Matrix3, Matrix4, Point3, Vector3};
use glsandbox::prelude::*;

use super::mesh::Mesh;
use super::Viewport;
use crate::camera::Camera;

/// Face images of the sky, in the order cube maps expect them.
const FACES: [&str; 6] = [
    "textures/skybox/right.png",
    "textures/skybox/left.png",
    "textures/skybox/top.png",
    "textures/skybox/bottom.png",
    "textures/skybox/front.png",
    "textures/skybox/back.png",
];

/// A couple of crates surrounded by a sky box. The sky is drawn last at the far plane,
/// so only the pixels left uncovered by the scene get shaded.
pub struct Skybox {
    device: Rc<Device>,
    viewport: Viewport,
    renderer: Renderer,
    camera: Camera,
    cube: Mesh,
    object_shader: Shader,
    sky_shader: Shader,
    crate_texture: Texture,
    sky: Texture,
    spin: f32,
    angle: f32,
}

impl Skybox {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;

        let faces: Vec<_> = FACES.iter().map(|v| ctx.asset(v)).collect();
        let sky = Texture::cube_map(device, &faces)?;
        let sky_shader = Shader::from_file(device, ctx.asset("shaders/skybox.glsl"))?;
        sky_shader.bind();
        sky_shader.set_uniform_1i("u_Skybox", 0)?;

        let object_shader = Shader::from_file(device, ctx.asset("shaders/textured.glsl"))?;
        object_shader.bind();
        object_shader.set_uniform_1i("u_Texture", 0)?;
        let crate_texture = Texture::from_file(device, ctx.asset("textures/crate.png"))?;

        device.set_capability(Capability::DepthTest, true);

        Ok(Skybox {
            device: device.clone(),
            viewport,
            renderer: Renderer::new(device),
            camera: Camera::new(Point3::new(0.0, 0.0, 3.0)),
            cube: Mesh::cube(device)?,
            object_shader,
            sky_shader,
            crate_texture,
            sky,
            spin: 20.0,
            angle: 0.0,
        })
    }
}

impl Scene for Skybox {
    fn process_input(&mut self, input: &Input, dt: f32) -> Result<()> {
        self.camera.process_input(input, dt);
        Ok(())
    }

    fn on_update(&mut self, dt: f32) -> Result<()> {
        self.angle = (self.angle + self.spin * dt) % 360.0;
        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        let projection = self.camera.projection(self.viewport.aspect());
        let view = self.camera.view();

        self.renderer.clear_with(ClearFlags::COLOR | ClearFlags::DEPTH);

        self.crate_texture.bind(0)?;
        self.object_shader.bind();
        self.object_shader.set_uniform_mat4("u_Projection", &projection)?;
        self.object_shader.set_uniform_mat4("u_View", &view)?;

        for &(x, z) in &[(-1.0f32, -1.0f32), (1.5, -2.5)] {
            let model = Matrix4::from_translation(Vector3::new(x, 0.0, z))
                * Matrix4::from_angle_y(Deg(self.angle));
            self.object_shader.set_uniform_mat4("u_Model", &model)?;
            self.cube.draw(&self.renderer, &self.object_shader);
        }

        // The sky sits at depth 1.0, which only passes against a cleared depth buffer
        // with a less-or-equal test. Dropping the translation keeps it around the camera.
        let rotation = Matrix3::from_cols(view.x.truncate(), view.y.truncate(), view.z.truncate());
        self.device.set_depth_func(Comparison::LessOrEqual);
        self.sky.bind(0)?;
        self.sky_shader.bind();
        self.sky_shader.set_uniform_mat4("u_Projection", &projection)?;
        self.sky_shader
            .set_uniform_mat4("u_View", &Matrix4::from(rotation))?;
        self.cube.draw(&self.renderer, &self.sky_shader);
        self.device.set_depth_func(Comparison::Less);

        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.text("WASD to move, mouse to look around");
        ui.slider_f32("Spin", &mut self.spin, -180.0, 180.0);
        Ok(())
    }
}

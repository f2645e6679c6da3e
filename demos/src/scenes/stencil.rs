use std::rc::Rc;

use glsandbox::cgmath::{Matrix4, Point3, Vector3};
use glsandbox::prelude::*;

use super::mesh::Mesh;
use super::Viewport;
use crate::camera::Camera;

const CRATES: [(f32, f32); 2] = [(-1.0, -1.0), (2.0, 0.0)];

/// Outlines objects with the stencil buffer: the crates mark the stencil buffer while
/// drawn, then slightly larger copies are drawn in a flat color wherever the mark is
/// missing.
pub struct Outline {
    device: Rc<Device>,
    viewport: Viewport,
    renderer: Renderer,
    camera: Camera,

    cube: Mesh,
    floor: Mesh,
    object_shader: Shader,
    outline_shader: Shader,
    crate_texture: Texture,
    floor_texture: Texture,

    color: [f32; 4],
    thickness: f32,
    enabled: bool,
}

impl Outline {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;

        let object_shader = Shader::from_file(device, ctx.asset("shaders/textured.glsl"))?;
        object_shader.bind();
        object_shader.set_uniform_1i("u_Texture", 0)?;

        let outline_shader = Shader::from_file(device, ctx.asset("shaders/single_color.glsl"))?;

        let repeat = TextureParams {
            wrap: TextureWrap::Repeat,
            filter: TextureFilter::Linear,
        };

        device.set_capability(Capability::DepthTest, true);
        device.set_capability(Capability::StencilTest, true);
        device.set_stencil_op(StencilAction::Keep, StencilAction::Keep, StencilAction::Replace);

        Ok(Outline {
            device: device.clone(),
            viewport,
            renderer: Renderer::new(device),
            camera: Camera::new(Point3::new(0.0, 1.0, 4.0)),

            cube: Mesh::cube(device)?,
            floor: Mesh::plane(device, 5.0)?,
            object_shader,
            outline_shader,
            crate_texture: Texture::from_file(device, ctx.asset("textures/crate.png"))?,
            floor_texture: Texture::from_file_with(device, ctx.asset("textures/bricks.png"), repeat)?,

            color: [0.04, 0.28, 0.26, 1.0],
            thickness: 0.1,
            enabled: true,
        })
    }

    fn draw_crates(&self, shader: &Shader, scale: f32) -> Result<()> {
        for &(x, z) in &CRATES {
            let model =
                Matrix4::from_translation(Vector3::new(x, 0.0, z)) * Matrix4::from_scale(scale);
            shader.set_uniform_mat4("u_Model", &model)?;
            self.cube.draw(&self.renderer, shader);
        }

        Ok(())
    }
}

impl Scene for Outline {
    fn process_input(&mut self, input: &Input, dt: f32) -> Result<()> {
        self.camera.process_input(input, dt);
        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        let projection = self.camera.projection(self.viewport.aspect());
        let view = self.camera.view();

        self.renderer.set_clear_color([0.1, 0.1, 0.1, 1.0]);
        self.renderer.clear_with(ClearFlags::ALL);

        self.object_shader.bind();
        self.object_shader.set_uniform_mat4("u_Projection", &projection)?;
        self.object_shader.set_uniform_mat4("u_View", &view)?;

        // The floor leaves the stencil buffer untouched.
        self.device.set_stencil_mask(0x00);
        self.floor_texture.bind(0)?;
        let model = Matrix4::from_translation(Vector3::new(0.0, -0.5, 0.0));
        self.object_shader.set_uniform_mat4("u_Model", &model)?;
        self.floor.draw(&self.renderer, &self.object_shader);

        self.device.set_stencil_func(Comparison::Always, 1, 0xFF);
        self.device.set_stencil_mask(0xFF);
        self.crate_texture.bind(0)?;
        self.draw_crates(&self.object_shader, 1.0)?;

        if self.enabled {
            self.device.set_stencil_func(Comparison::NotEqual, 1, 0xFF);
            self.device.set_stencil_mask(0x00);
            self.device.set_capability(Capability::DepthTest, false);

            self.outline_shader.bind();
            self.outline_shader.set_uniform_mat4("u_Projection", &projection)?;
            self.outline_shader.set_uniform_mat4("u_View", &view)?;
            let [r, g, b, a] = self.color;
            self.outline_shader.set_uniform_4f("u_Color", r, g, b, a)?;
            self.draw_crates(&self.outline_shader, 1.0 + self.thickness)?;

            self.device.set_capability(Capability::DepthTest, true);
        }

        // Clearing the stencil buffer next frame needs the full write mask.
        self.device.set_stencil_mask(0xFF);
        self.device.set_stencil_func(Comparison::Always, 0, 0xFF);
        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.checkbox("Outline", &mut self.enabled);
        ui.slider_f32("Thickness", &mut self.thickness, 0.0, 0.5);
        ui.color_edit4("Outline Color", &mut self.color);
        Ok(())
    }
}

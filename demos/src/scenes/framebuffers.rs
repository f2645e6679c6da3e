use std::rc::Rc;

use glsandbox::cgmath::{Matrix4, Point3, Vector3};
use glsandbox::prelude::*;

use super::mesh::Mesh;
use super::Viewport;
use crate::camera::Camera;

/// Renders a small scene into an off-screen framebuffer, then draws its color texture
/// over the whole screen through a post-processing pass.
pub struct PostProcessing {
    device: Rc<Device>,
    viewport: Viewport,
    renderer: Renderer,
    camera: Camera,
    target: Framebuffer,

    cube: Mesh,
    floor: Mesh,
    screen: Mesh,
    object_shader: Shader,
    post_shader: Shader,
    crate_texture: Texture,
    floor_texture: Texture,

    invert: bool,
    grayscale: bool,
    sharpen: bool,
    blur: bool,
    edges: bool,
}

fn render_target(device: &Rc<Device>, viewport: &Viewport) -> Result<Framebuffer> {
    let [w, h] = viewport.get();
    Ok(Framebuffer::new(device, w.max(1), h.max(1))?)
}

impl PostProcessing {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;
        let target = render_target(device, &viewport)?;

        let object_shader = Shader::from_file(device, ctx.asset("shaders/textured.glsl"))?;
        object_shader.bind();
        object_shader.set_uniform_1i("u_Texture", 0)?;

        let post_shader = Shader::from_files(
            device,
            ctx.asset("shaders/screen.vert"),
            ctx.asset("shaders/post_processing.frag"),
        )?;
        post_shader.bind();
        post_shader.set_uniform_1i("u_Screen", 0)?;

        let repeat = TextureParams {
            wrap: TextureWrap::Repeat,
            filter: TextureFilter::Linear,
        };

        Ok(PostProcessing {
            device: device.clone(),
            viewport,
            renderer: Renderer::new(device),
            camera: Camera::new(Point3::new(0.0, 1.0, 4.0)),
            target,

            cube: Mesh::cube(device)?,
            floor: Mesh::plane(device, 5.0)?,
            screen: Mesh::screen_quad(device)?,
            object_shader,
            post_shader,
            crate_texture: Texture::from_file(device, ctx.asset("textures/crate.png"))?,
            floor_texture: Texture::from_file_with(device, ctx.asset("textures/checker.png"), repeat)?,

            invert: false,
            grayscale: false,
            sharpen: false,
            blur: false,
            edges: false,
        })
    }

    fn kernel(&self) -> i32 {
        if self.sharpen {
            1
        } else if self.blur {
            2
        } else if self.edges {
            3
        } else {
            0
        }
    }
}

impl Scene for PostProcessing {
    fn process_input(&mut self, input: &Input, dt: f32) -> Result<()> {
        self.camera.process_input(input, dt);
        Ok(())
    }

    fn on_update(&mut self, _: f32) -> Result<()> {
        let [w, h] = self.viewport.get();
        let color = self.target.color();
        if (w, h) != (color.width(), color.height()) && w > 0 && h > 0 {
            self.target = render_target(&self.device, &self.viewport)?;
        }

        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        let projection = self.camera.projection(self.viewport.aspect());
        let view = self.camera.view();

        self.target.bind();
        self.device.set_capability(Capability::DepthTest, true);
        self.renderer.set_clear_color([0.1, 0.1, 0.1, 1.0]);
        self.renderer.clear_with(ClearFlags::COLOR | ClearFlags::DEPTH);

        self.object_shader.bind();
        self.object_shader.set_uniform_mat4("u_Projection", &projection)?;
        self.object_shader.set_uniform_mat4("u_View", &view)?;

        self.floor_texture.bind(0)?;
        let model = Matrix4::from_translation(Vector3::new(0.0, -0.5, 0.0));
        self.object_shader.set_uniform_mat4("u_Model", &model)?;
        self.floor.draw(&self.renderer, &self.object_shader);

        self.crate_texture.bind(0)?;
        for &(x, z) in &[(-1.0f32, -1.0f32), (2.0, 0.0), (0.5, -3.0)] {
            let model = Matrix4::from_translation(Vector3::new(x, 0.0, z));
            self.object_shader.set_uniform_mat4("u_Model", &model)?;
            self.cube.draw(&self.renderer, &self.object_shader);
        }

        self.target.unbind();
        self.device.set_capability(Capability::DepthTest, false);
        self.renderer.clear();

        self.target.color().bind(0)?;
        self.post_shader.bind();
        self.post_shader.set_uniform_1i("u_Invert", self.invert as i32)?;
        self.post_shader
            .set_uniform_1i("u_Grayscale", self.grayscale as i32)?;
        self.post_shader.set_uniform_1i("u_Kernel", self.kernel())?;
        self.screen.draw(&self.renderer, &self.post_shader);

        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.checkbox("Invert Colors", &mut self.invert);
        ui.checkbox("Grayscale", &mut self.grayscale);

        ui.text("Kernel");
        if ui.checkbox("Sharpen", &mut self.sharpen) && self.sharpen {
            self.blur = false;
            self.edges = false;
        }

        if ui.checkbox("Blur", &mut self.blur) && self.blur {
            self.sharpen = false;
            self.edges = false;
        }

        if ui.checkbox("Edge Detection", &mut self.edges) && self.edges {
            self.sharpen = false;
            self.blur = false;
        }

        Ok(())
    }
}

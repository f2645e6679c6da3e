use glsandbox::cgmath::Point3;
use glsandbox::prelude::*;

use super::mesh::Mesh;
use super::Viewport;
use crate::camera::Camera;

/// Number of cubes along each axis.
const GRID: i32 = 10;

/// A grid of textured cubes drawn with one instanced call. Each instance reads its
/// offset from a per-instance attribute.
pub struct Instancing {
    viewport: Viewport,
    renderer: Renderer,
    camera: Camera,
    cube: Mesh,
    // Keeps the instance attribute storage alive.
    _offsets: VertexBuffer,
    shader: Shader,
    texture: Texture,
    instances: f32,
}

/// Offsets of the instances, spaced two units apart around the origin.
fn offsets() -> Vec<[f32; 3]> {
    let mut offsets = Vec::with_capacity((GRID * GRID * GRID) as usize);
    for y in 0..GRID {
        for x in 0..GRID {
            for z in 0..GRID {
                let v = |i: i32| (i - GRID / 2) as f32 * 2.0 + 1.0;
                offsets.push([v(x), v(y), v(z)]);
            }
        }
    }

    offsets
}

impl Instancing {
    pub fn new(ctx: &SceneContext, viewport: Viewport) -> Result<Self> {
        let device = &ctx.device;
        let cube = Mesh::cube(device)?;

        let offsets = VertexBuffer::from_slice(device, &offsets())?;
        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(3);
        cube.vertex_array.add_instance_buffer(&offsets, &layout)?;

        let shader = Shader::from_file(device, ctx.asset("shaders/instancing.glsl"))?;
        let texture = Texture::from_file_with(
            device,
            ctx.asset("textures/crate.png"),
            TextureParams {
                wrap: TextureWrap::Repeat,
                filter: TextureFilter::Nearest,
            },
        )?;

        shader.bind();
        shader.set_uniform_1i("u_Texture", 0)?;

        device.set_capability(Capability::DepthTest, true);

        Ok(Instancing {
            viewport,
            renderer: Renderer::new(device),
            camera: Camera::new(Point3::new(0.0, 0.0, 15.0)),
            cube,
            _offsets: offsets,
            shader,
            texture,
            instances: (GRID * GRID * GRID) as f32,
        })
    }
}

impl Scene for Instancing {
    fn process_input(&mut self, input: &Input, dt: f32) -> Result<()> {
        self.camera.process_input(input, dt);
        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        let mvp = self.camera.projection(self.viewport.aspect()) * self.camera.view();

        self.renderer.set_clear_color([0.05, 0.05, 0.08, 1.0]);
        self.renderer.clear_with(ClearFlags::COLOR | ClearFlags::DEPTH);
        self.texture.bind(0)?;

        self.shader.bind();
        self.shader.set_uniform_mat4("u_MVP", &mvp)?;
        self.renderer.draw_instanced(
            &self.cube.vertex_array,
            &self.cube.indices,
            &self.shader,
            self.instances as u32,
        );

        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        let p = self.camera.position;
        ui.text(&format!("Camera ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
        ui.slider_f32("Instances", &mut self.instances, 0.0, (GRID * GRID * GRID) as f32);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn thousand_distinct_offsets() {
        let offsets = offsets();
        assert_eq!(offsets.len(), 1000);

        let mut sorted: Vec<_> = offsets.iter().map(|v| format!("{:?}", v)).collect();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 1000);
    }
}

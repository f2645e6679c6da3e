use glutin;
use glutin::GlContext;

use glsandbox::gl;
use glsandbox::prelude::*;

/// A window with an OpenGL 3.3 core context made current on the calling thread.
pub struct Window {
    window: glutin::GlWindow,
    events_loop: glutin::EventsLoop,
}

impl Window {
    pub fn new(params: &WindowParams) -> Result<Self> {
        let builder = glutin::WindowBuilder::new()
            .with_title(params.title.clone())
            .with_dimensions(glutin::dpi::LogicalSize::new(
                f64::from(params.size[0]),
                f64::from(params.size[1]),
            ));

        let context = glutin::ContextBuilder::new()
            .with_multisampling(params.multisample)
            .with_gl_profile(glutin::GlProfile::Core)
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)))
            .with_vsync(params.vsync);

        let events_loop = glutin::EventsLoop::new();
        let window = glutin::GlWindow::new(builder, context, &events_loop)
            .map_err(|err| format_err!("Failed to create window: {}", err))?;

        unsafe {
            window
                .make_current()
                .map_err(|err| format_err!("Failed to make context current: {}", err))?;
            gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);
        }

        Ok(Window {
            window,
            events_loop,
        })
    }

    /// The size of the client area in pixels.
    pub fn dimensions(&self) -> [u32; 2] {
        match self.window.get_inner_size() {
            Some(size) => {
                let size = size.to_physical(self.window.get_hidpi_factor());
                [size.width as u32, size.height as u32]
            }
            None => [0, 0],
        }
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Feeds pending events into `input`. Returns `false` once the window has been
    /// asked to close.
    pub fn poll_events(&mut self, input: &mut Input) -> bool {
        let mut alive = true;

        self.events_loop.poll_events(|event| match event {
            glutin::Event::WindowEvent { event, .. } => match event {
                glutin::WindowEvent::CloseRequested => alive = false,

                glutin::WindowEvent::Focused(false) => input.reset(),

                glutin::WindowEvent::KeyboardInput {
                    input:
                        glutin::KeyboardInput {
                            state,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    if let Some(key) = from_virtual_key_code(key) {
                        match state {
                            glutin::ElementState::Pressed => input.on_key_pressed(key),
                            glutin::ElementState::Released => input.on_key_released(key),
                        }
                    }
                }

                glutin::WindowEvent::MouseWheel { delta, .. } => match delta {
                    glutin::MouseScrollDelta::LineDelta(_, y) => input.on_mouse_wheel(y),
                    glutin::MouseScrollDelta::PixelDelta(pos) => {
                        input.on_mouse_wheel(pos.y as f32 / 16.0)
                    }
                },

                _ => {}
            },

            glutin::Event::DeviceEvent {
                event: glutin::DeviceEvent::MouseMotion { delta },
                ..
            } => input.on_mouse_moved(delta.0 as f32, delta.1 as f32),

            _ => {}
        });

        alive
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.window
            .swap_buffers()
            .map_err(|err| format_err!("Failed to swap buffers: {}", err))?;
        Ok(())
    }
}

fn from_virtual_key_code(key: glutin::VirtualKeyCode) -> Option<Key> {
    match key {
        glutin::VirtualKeyCode::Key1 => Some(Key::Key1),
        glutin::VirtualKeyCode::Key2 => Some(Key::Key2),
        glutin::VirtualKeyCode::Key3 => Some(Key::Key3),
        glutin::VirtualKeyCode::Key4 => Some(Key::Key4),
        glutin::VirtualKeyCode::Key5 => Some(Key::Key5),
        glutin::VirtualKeyCode::Key6 => Some(Key::Key6),
        glutin::VirtualKeyCode::Key7 => Some(Key::Key7),
        glutin::VirtualKeyCode::Key8 => Some(Key::Key8),
        glutin::VirtualKeyCode::Key9 => Some(Key::Key9),
        glutin::VirtualKeyCode::Key0 => Some(Key::Key0),
        glutin::VirtualKeyCode::A => Some(Key::A),
        glutin::VirtualKeyCode::D => Some(Key::D),
        glutin::VirtualKeyCode::E => Some(Key::E),
        glutin::VirtualKeyCode::Q => Some(Key::Q),
        glutin::VirtualKeyCode::S => Some(Key::S),
        glutin::VirtualKeyCode::W => Some(Key::W),
        glutin::VirtualKeyCode::Escape => Some(Key::Escape),
        glutin::VirtualKeyCode::Space => Some(Key::Space),
        glutin::VirtualKeyCode::Return => Some(Key::Return),
        glutin::VirtualKeyCode::Back => Some(Key::Back),
        glutin::VirtualKeyCode::Tab => Some(Key::Tab),
        glutin::VirtualKeyCode::LShift => Some(Key::LShift),
        glutin::VirtualKeyCode::LControl => Some(Key::LControl),
        glutin::VirtualKeyCode::Left => Some(Key::Left),
        glutin::VirtualKeyCode::Up => Some(Key::Up),
        glutin::VirtualKeyCode::Right => Some(Key::Right),
        glutin::VirtualKeyCode::Down => Some(Key::Down),
        _ => None,
    }
}

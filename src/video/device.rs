use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::backends::{self, Visitor};
use super::errors::Result;
use super::types::error_code::{self, NO_ERROR};
use super::types::*;

/// Upper bound of stale error flags drained before a call. Some drivers keep
/// reporting a lost context forever.
const MAX_PENDING_ERRORS: usize = 32;

/// A mirror of the objects currently bound to the device.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pub program: u32,
    pub vertex_array: u32,
    pub array_buffer: u32,
    pub element_buffer: u32,
    pub framebuffer: u32,
    pub texture_slot: u32,
}

/// The device context that every handle talks to.
///
/// It lives on the thread that owns the OpenGL context, handles share it through `Rc`
/// so it is neither `Send` nor `Sync`.
pub struct Device {
    visitor: RefCell<Box<dyn Visitor>>,
    bindings: Cell<Bindings>,
    failures: Cell<u32>,
}

impl Device {
    pub fn new(visitor: Box<dyn Visitor>) -> Rc<Self> {
        Rc::new(Device {
            visitor: RefCell::new(visitor),
            bindings: Cell::new(Bindings::default()),
            failures: Cell::new(0),
        })
    }

    /// Creates a device that talks to the current OpenGL context.
    ///
    /// # Safety
    ///
    /// The function pointers of `gl` must be loaded, and their context must be current
    /// on the calling thread for the whole lifetime of the device.
    #[cfg(not(target_arch = "wasm32"))]
    pub unsafe fn gl() -> Result<Rc<Self>> {
        let visitor = backends::new()?;
        let device = Device::new(visitor);
        info!("Device: {}", device.description());
        Ok(device)
    }

    /// Creates a device backed by the in-memory model.
    pub fn headless() -> Rc<Self> {
        Device::new(backends::new_headless())
    }

    pub fn description(&self) -> String {
        unsafe { self.visitor.borrow_mut().description() }
    }

    /// Performs a raw call on the visitor. Pending errors are drained first, and errors
    /// raised by the call are logged together with `op` and its call site.
    ///
    /// Failures never abort the caller, they are counted in `failures`.
    pub fn call<F, T>(&self, op: &str, file: &str, line: u32, func: F) -> T
    where
        F: FnOnce(&mut dyn Visitor) -> T,
    {
        self.checked_call(op, file, line, func).0
    }

    /// Like `call`, but also returns whether the call succeeded.
    pub fn checked_call<F, T>(&self, op: &str, file: &str, line: u32, func: F) -> (T, bool)
    where
        F: FnOnce(&mut dyn Visitor) -> T,
    {
        let mut visitor = self.visitor.borrow_mut();

        unsafe {
            clear_errors(&mut **visitor);
            let v = func(&mut **visitor);
            let succeed = log_call(&mut **visitor, op, file, line);
            if !succeed {
                self.failures.set(self.failures.get() + 1);
            }

            (v, succeed)
        }
    }

    /// Number of device calls that reported an error so far.
    #[inline]
    pub fn failures(&self) -> u32 {
        self.failures.get()
    }

    #[inline]
    pub fn bindings(&self) -> Bindings {
        self.bindings.get()
    }

    fn update_bindings<F>(&self, func: F)
    where
        F: FnOnce(&mut Bindings),
    {
        let mut bindings = self.bindings.get();
        func(&mut bindings);
        self.bindings.set(bindings);
    }

    pub fn bind_buffer(&self, target: BufferTarget, id: u32) {
        gl_call!(self, bind_buffer(target, id));
        self.update_bindings(|v| match target {
            BufferTarget::Array => v.array_buffer = id,
            BufferTarget::ElementArray => v.element_buffer = id,
        });
    }

    pub fn delete_buffer(&self, id: u32) {
        gl_call!(self, delete_buffer(id));
        self.update_bindings(|v| {
            if v.array_buffer == id {
                v.array_buffer = 0;
            }

            if v.element_buffer == id {
                v.element_buffer = 0;
            }
        });
    }

    pub fn bind_vertex_array(&self, id: u32) {
        gl_call!(self, bind_vertex_array(id));
        self.update_bindings(|v| v.vertex_array = id);
    }

    pub fn delete_vertex_array(&self, id: u32) {
        gl_call!(self, delete_vertex_array(id));
        self.update_bindings(|v| {
            if v.vertex_array == id {
                v.vertex_array = 0;
            }
        });
    }

    pub fn bind_program(&self, id: u32) {
        gl_call!(self, use_program(id));
        self.update_bindings(|v| v.program = id);
    }

    pub fn delete_program(&self, id: u32) {
        gl_call!(self, delete_program(id));
        self.update_bindings(|v| {
            if v.program == id {
                v.program = 0;
            }
        });
    }

    pub fn bind_texture(&self, slot: u32, target: TextureTarget, id: u32) {
        gl_call!(self, active_texture(slot));
        gl_call!(self, bind_texture(target, id));
        self.update_bindings(|v| v.texture_slot = slot);
    }

    pub fn bind_framebuffer(&self, id: u32) {
        gl_call!(self, bind_framebuffer(id));
        self.update_bindings(|v| v.framebuffer = id);
    }

    pub fn delete_framebuffer(&self, id: u32) {
        gl_call!(self, delete_framebuffer(id));
        self.update_bindings(|v| {
            if v.framebuffer == id {
                v.framebuffer = 0;
            }
        });
    }

    pub fn set_capability(&self, capability: Capability, enable: bool) {
        gl_call!(self, set_capability(capability, enable));
    }

    pub fn set_depth_func(&self, comparison: Comparison) {
        gl_call!(self, depth_func(comparison));
    }

    pub fn set_depth_mask(&self, write: bool) {
        gl_call!(self, depth_mask(write));
    }

    pub fn set_stencil_func(&self, comparison: Comparison, reference: i32, mask: u32) {
        gl_call!(self, stencil_func(comparison, reference, mask));
    }

    pub fn set_stencil_op(&self, fail: StencilAction, zfail: StencilAction, pass: StencilAction) {
        gl_call!(self, stencil_op(fail, zfail, pass));
    }

    pub fn set_stencil_mask(&self, mask: u32) {
        gl_call!(self, stencil_mask(mask));
    }

    pub fn set_blend_func(&self, src: BlendFactor, dst: BlendFactor) {
        gl_call!(self, blend_func(src, dst));
    }

    pub fn set_polygon_mode(&self, mode: PolygonMode) {
        gl_call!(self, polygon_mode(mode));
    }

    pub fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        gl_call!(self, viewport(x, y, width, height));
    }

    pub fn set_clear_color(&self, color: [f32; 4]) {
        gl_call!(self, clear_color(color));
    }

    /// Restores the render state every scene starts with: depth, stencil, blending
    /// and face culling disabled with their default functions, filled polygons and
    /// the default framebuffer.
    pub fn reset_render_state(&self) {
        for &capability in &[
            Capability::DepthTest,
            Capability::StencilTest,
            Capability::Blend,
            Capability::CullFace,
        ] {
            self.set_capability(capability, false);
        }

        self.set_depth_func(Comparison::Less);
        self.set_depth_mask(true);
        self.set_stencil_func(Comparison::Always, 0, 0xFF);
        self.set_stencil_op(StencilAction::Keep, StencilAction::Keep, StencilAction::Keep);
        self.set_stencil_mask(0xFF);
        self.set_blend_func(BlendFactor::One, BlendFactor::Zero);
        self.set_polygon_mode(PolygonMode::Fill);
        self.set_clear_color([0.0, 0.0, 0.0, 1.0]);

        self.bind_framebuffer(0);
        self.bind_program(0);
        self.bind_vertex_array(0);
    }
}

/// Discards every pending error flag.
///
/// # Safety
///
/// See `Visitor`.
pub unsafe fn clear_errors(visitor: &mut dyn Visitor) {
    for _ in 0..MAX_PENDING_ERRORS {
        let code = visitor.get_error();
        if code == NO_ERROR {
            return;
        }

        trace!("Discards stale error flag {:#06x}.", code);
    }
}

/// Polls the error flags raised by `op`, logging each one with its call site.
/// Returns `false` if the call failed.
///
/// # Safety
///
/// See `Visitor`.
pub unsafe fn log_call(visitor: &mut dyn Visitor, op: &str, file: &str, line: u32) -> bool {
    let mut succeed = true;

    for _ in 0..MAX_PENDING_ERRORS {
        let code = visitor.get_error();
        if code == NO_ERROR {
            break;
        }

        error!(
            "[OpenGL Error] ({:#06x}): {} {}:{} {}",
            code,
            op,
            file,
            line,
            error_code::describe(code)
        );

        succeed = false;
    }

    succeed
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::video::backends::headless::HeadlessVisitor;
    use crate::video::types::error_code::*;

    #[test]
    fn failed_calls_are_counted() {
        let visitor = HeadlessVisitor::new();
        let state = visitor.state();
        let device = Device::new(Box::new(visitor));

        let id = gl_call!(device, create_buffer());
        assert!(id > 0);
        assert_eq!(device.failures(), 0);

        // Binds an unknown buffer.
        device.bind_buffer(BufferTarget::Array, id + 100);
        assert_eq!(device.failures(), 1);
        assert_eq!(state.borrow().pending_errors(), 0);

        device.bind_buffer(BufferTarget::Array, id);
        assert_eq!(device.failures(), 1);
        assert_eq!(device.bindings().array_buffer, id);
    }

    #[test]
    fn stale_errors_are_not_blamed() {
        let visitor = HeadlessVisitor::new();
        let state = visitor.state();
        let device = Device::new(Box::new(visitor));

        state.borrow_mut().inject_error(INVALID_ENUM);
        state.borrow_mut().inject_error(OUT_OF_MEMORY);
        gl_call!(device, create_texture());

        assert_eq!(device.failures(), 0);
        assert_eq!(state.borrow().pending_errors(), 0);
    }

    #[test]
    fn log_call_reports_failure() {
        let mut visitor = HeadlessVisitor::new();
        let state = visitor.state();

        unsafe {
            assert!(log_call(&mut visitor, "noop", file!(), line!()));

            state.borrow_mut().inject_error(INVALID_OPERATION);
            assert!(!log_call(&mut visitor, "noop", file!(), line!()));
            assert!(log_call(&mut visitor, "noop", file!(), line!()));
        }
    }

    #[test]
    fn reset_render_state() {
        let visitor = HeadlessVisitor::new();
        let state = visitor.state();
        let device = Device::new(Box::new(visitor));

        device.set_capability(Capability::DepthTest, true);
        device.set_capability(Capability::StencilTest, true);
        device.set_depth_func(Comparison::Equal);
        device.set_stencil_mask(0x00);
        device.set_polygon_mode(PolygonMode::Line);
        device.reset_render_state();

        let state = state.borrow();
        assert!(state.capabilities.is_empty());
        assert_eq!(state.depth_func, Comparison::Less);
        assert_eq!(state.stencil.write_mask, 0xFF);
        assert_eq!(state.polygon_mode, PolygonMode::Fill);
        assert_eq!(device.failures(), 0);
        assert_eq!(device.bindings(), Bindings::default());
    }
}

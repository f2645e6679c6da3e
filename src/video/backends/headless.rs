//! A software model of the device. Nothing is rasterized, but objects, bindings and
//! calls are tracked closely enough to observe what the frontend asked for.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::rc::Rc;

use super::Visitor;
use crate::video::types::error_code::*;
use crate::video::types::*;

#[derive(Debug, Clone, PartialEq)]
pub struct BufferObject {
    pub data: Vec<u8>,
    pub hint: BufferHint,
}

/// The configuration of one attribute slot inside a vertex array.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    /// The array buffer that was bound when the pointer was described.
    pub buffer: u32,
    pub pointer: Option<AttributePointer>,
    pub enabled: bool,
    pub divisor: u32,
}

impl Default for AttributeRecord {
    fn default() -> Self {
        AttributeRecord {
            buffer: 0,
            pointer: None,
            enabled: false,
            divisor: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VertexArrayObject {
    pub attributes: BTreeMap<u32, AttributeRecord>,
    pub element_buffer: u32,
}

#[derive(Debug, Clone)]
pub struct TextureObject {
    pub target: Option<TextureTarget>,
    pub wrap: TextureWrap,
    pub filter: TextureFilter,
    /// Dimensions of every uploaded image.
    pub images: HashMap<ImageTarget, (u32, u32)>,
    /// Pixels of every image uploaded with data.
    pub pixels: HashMap<ImageTarget, Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct ShaderObject {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
    pub log: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProgramObject {
    pub shaders: Vec<u32>,
    pub linked: bool,
    pub log: String,
    pub uniforms: HashMap<String, i32>,
    pub values: HashMap<i32, UniformVariable>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FramebufferObject {
    pub color: u32,
    pub depth_stencil: u32,
}

/// One indexed draw as seen by the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub vertex_array: u32,
    pub element_buffer: u32,
    pub program: u32,
    pub count: u32,
    pub format: IndexFormat,
    /// `None` for non-instanced draws.
    pub instances: Option<u32>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StencilState {
    pub comparison: Comparison,
    pub reference: i32,
    pub read_mask: u32,
    pub write_mask: u32,
    pub ops: (StencilAction, StencilAction, StencilAction),
}

#[derive(Debug, Clone)]
pub struct HeadlessState {
    next_id: u32,
    errors: VecDeque<u32>,
    draw_error: Option<u32>,

    pub array_buffer: u32,
    /// Element buffer binding used while no vertex array is bound.
    pub element_buffer: u32,
    pub vertex_array: u32,
    pub program: u32,
    pub framebuffer: u32,
    pub active_texture: u32,
    pub texture_units: HashMap<(u32, TextureTarget), u32>,

    pub buffers: HashMap<u32, BufferObject>,
    pub vertex_arrays: HashMap<u32, VertexArrayObject>,
    pub textures: HashMap<u32, TextureObject>,
    pub shaders: HashMap<u32, ShaderObject>,
    pub programs: HashMap<u32, ProgramObject>,
    pub framebuffers: HashMap<u32, FramebufferObject>,
    pub renderbuffers: HashMap<u32, (u32, u32)>,

    pub capabilities: HashSet<Capability>,
    pub depth_func: Comparison,
    pub depth_mask: bool,
    pub stencil: StencilState,
    pub blend: (BlendFactor, BlendFactor),
    pub polygon_mode: PolygonMode,
    pub viewport: (i32, i32, u32, u32),
    pub clear_color: [f32; 4],

    /// Number of uniform location queries issued so far.
    pub uniform_queries: usize,
    pub clears: Vec<ClearFlags>,
    pub draws: Vec<DrawRecord>,
}

impl Default for HeadlessState {
    fn default() -> Self {
        HeadlessState {
            next_id: 0,
            errors: VecDeque::new(),
            draw_error: None,

            array_buffer: 0,
            element_buffer: 0,
            vertex_array: 0,
            program: 0,
            framebuffer: 0,
            active_texture: 0,
            texture_units: HashMap::new(),

            buffers: HashMap::new(),
            vertex_arrays: HashMap::new(),
            textures: HashMap::new(),
            shaders: HashMap::new(),
            programs: HashMap::new(),
            framebuffers: HashMap::new(),
            renderbuffers: HashMap::new(),

            capabilities: HashSet::new(),
            depth_func: Comparison::Less,
            depth_mask: true,
            stencil: StencilState {
                comparison: Comparison::Always,
                reference: 0,
                read_mask: 0xFF,
                write_mask: 0xFF,
                ops: (StencilAction::Keep, StencilAction::Keep, StencilAction::Keep),
            },
            blend: (BlendFactor::One, BlendFactor::Zero),
            polygon_mode: PolygonMode::Fill,
            viewport: (0, 0, 0, 0),
            clear_color: [0.0, 0.0, 0.0, 0.0],

            uniform_queries: 0,
            clears: Vec::new(),
            draws: Vec::new(),
        }
    }
}

impl HeadlessState {
    /// Queues an error flag, as if the device raised it during the next call.
    pub fn inject_error(&mut self, code: u32) {
        self.errors.push_back(code);
    }

    /// Makes the next draw call raise `code` instead of drawing.
    pub fn inject_draw_error(&mut self, code: u32) {
        self.draw_error = Some(code);
    }

    /// Number of error flags that have not been polled yet.
    pub fn pending_errors(&self) -> usize {
        self.errors.len()
    }

    /// Number of device objects that are still alive.
    pub fn live_objects(&self) -> usize {
        self.buffers.len()
            + self.vertex_arrays.len()
            + self.textures.len()
            + self.shaders.len()
            + self.programs.len()
            + self.framebuffers.len()
            + self.renderbuffers.len()
    }

    /// The element buffer the next draw would read from.
    pub fn current_element_buffer(&self) -> u32 {
        if self.vertex_array == 0 {
            self.element_buffer
        } else {
            self.vertex_arrays
                .get(&self.vertex_array)
                .map(|v| v.element_buffer)
                .unwrap_or(0)
        }
    }

    /// The texture bound to `target` on `slot`.
    pub fn bound_texture(&self, slot: u32, target: TextureTarget) -> u32 {
        self.texture_units.get(&(slot, target)).cloned().unwrap_or(0)
    }

    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn raise(&mut self, code: u32) {
        self.errors.push_back(code);
    }

    fn bound_buffer(&self, target: BufferTarget) -> u32 {
        match target {
            BufferTarget::Array => self.array_buffer,
            BufferTarget::ElementArray => self.current_element_buffer(),
        }
    }

    fn draw(&mut self, count: u32, format: IndexFormat, instances: Option<u32>) {
        if let Some(code) = self.draw_error.take() {
            self.raise(code);
            return;
        }

        let element_buffer = self.current_element_buffer();
        if self.vertex_array == 0 || self.program == 0 || element_buffer == 0 {
            self.raise(INVALID_OPERATION);
            return;
        }

        self.draws.push(DrawRecord {
            vertex_array: self.vertex_array,
            element_buffer,
            program: self.program,
            count,
            format,
            instances,
        });
    }
}

/// Collects uniform declarations of the form `uniform <type> <name>[<len>];`.
fn scan_uniforms(source: &str, uniforms: &mut Vec<(String, bool)>) {
    for line in source.lines() {
        let line = line.trim();
        if !line.starts_with("uniform ") {
            continue;
        }

        let decl = line.trim_end_matches(';').trim();
        let name = match decl.split_whitespace().last() {
            Some(v) => v.trim_end_matches(';'),
            None => continue,
        };

        let (name, array) = match name.find('[') {
            Some(i) => (&name[..i], true),
            None => (name, false),
        };

        if !uniforms.iter().any(|(v, _)| v == name) {
            uniforms.push((name.to_owned(), array));
        }
    }
}

pub struct HeadlessVisitor {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessVisitor {
    pub fn new() -> Self {
        HeadlessVisitor {
            state: Rc::new(RefCell::new(HeadlessState::default())),
        }
    }

    /// Returns a shared handle to the modelled device state.
    pub fn state(&self) -> Rc<RefCell<HeadlessState>> {
        self.state.clone()
    }
}

impl Default for HeadlessVisitor {
    fn default() -> Self {
        HeadlessVisitor::new()
    }
}

impl Visitor for HeadlessVisitor {
    unsafe fn get_error(&mut self) -> u32 {
        self.state.borrow_mut().errors.pop_front().unwrap_or(NO_ERROR)
    }

    unsafe fn description(&mut self) -> String {
        "Headless".to_owned()
    }

    unsafe fn create_buffer(&mut self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.buffers.insert(
            id,
            BufferObject {
                data: Vec::new(),
                hint: BufferHint::Static,
            },
        );
        id
    }

    unsafe fn bind_buffer(&mut self, target: BufferTarget, id: u32) {
        let mut state = self.state.borrow_mut();
        if id != 0 && !state.buffers.contains_key(&id) {
            state.raise(INVALID_VALUE);
            return;
        }

        match target {
            BufferTarget::Array => state.array_buffer = id,
            BufferTarget::ElementArray => {
                let vao = state.vertex_array;
                match state.vertex_arrays.get_mut(&vao) {
                    Some(v) => v.element_buffer = id,
                    None => state.element_buffer = id,
                }
            }
        }
    }

    unsafe fn buffer_data(
        &mut self,
        target: BufferTarget,
        size: usize,
        data: Option<&[u8]>,
        hint: BufferHint,
    ) {
        let mut state = self.state.borrow_mut();
        let id = state.bound_buffer(target);

        // The device reads `size` bytes from the source.
        let mut bytes = vec![0; size];
        if let Some(data) = data {
            if data.len() < size {
                state.raise(INVALID_VALUE);
                return;
            }

            bytes.copy_from_slice(&data[..size]);
        }

        match state.buffers.get_mut(&id) {
            Some(buffer) => {
                buffer.data = bytes;
                buffer.hint = hint;
            }
            None => state.raise(INVALID_OPERATION),
        }
    }

    unsafe fn buffer_sub_data(&mut self, target: BufferTarget, offset: usize, data: &[u8]) {
        let mut state = self.state.borrow_mut();
        let id = state.bound_buffer(target);

        let code = match state.buffers.get_mut(&id) {
            Some(buffer) => {
                if offset + data.len() > buffer.data.len() {
                    INVALID_VALUE
                } else {
                    buffer.data[offset..offset + data.len()].copy_from_slice(data);
                    NO_ERROR
                }
            }
            None => INVALID_OPERATION,
        };

        if code != NO_ERROR {
            state.raise(code);
        }
    }

    unsafe fn delete_buffer(&mut self, id: u32) {
        let mut state = self.state.borrow_mut();
        if state.buffers.remove(&id).is_none() {
            return;
        }

        if state.array_buffer == id {
            state.array_buffer = 0;
        }

        if state.element_buffer == id {
            state.element_buffer = 0;
        }

        for vao in state.vertex_arrays.values_mut() {
            if vao.element_buffer == id {
                vao.element_buffer = 0;
            }
        }
    }

    unsafe fn create_vertex_array(&mut self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.vertex_arrays.insert(id, VertexArrayObject::default());
        id
    }

    unsafe fn bind_vertex_array(&mut self, id: u32) {
        let mut state = self.state.borrow_mut();
        if id != 0 && !state.vertex_arrays.contains_key(&id) {
            state.raise(INVALID_OPERATION);
            return;
        }

        state.vertex_array = id;
    }

    unsafe fn delete_vertex_array(&mut self, id: u32) {
        let mut state = self.state.borrow_mut();
        if state.vertex_arrays.remove(&id).is_some() && state.vertex_array == id {
            state.vertex_array = 0;
        }
    }

    unsafe fn enable_vertex_attribute(&mut self, index: u32) {
        let mut state = self.state.borrow_mut();
        let vao = state.vertex_array;
        match state.vertex_arrays.get_mut(&vao) {
            Some(v) => v.attributes.entry(index).or_default().enabled = true,
            None => state.raise(INVALID_OPERATION),
        }
    }

    unsafe fn vertex_attribute_pointer(&mut self, index: u32, pointer: AttributePointer) {
        let mut state = self.state.borrow_mut();
        let vao = state.vertex_array;
        let buffer = state.array_buffer;

        if buffer == 0 || pointer.size == 0 || pointer.size > 4 {
            let code = if buffer == 0 {
                INVALID_OPERATION
            } else {
                INVALID_VALUE
            };
            state.raise(code);
            return;
        }

        match state.vertex_arrays.get_mut(&vao) {
            Some(v) => {
                let attribute = v.attributes.entry(index).or_default();
                attribute.buffer = buffer;
                attribute.pointer = Some(pointer);
            }
            None => state.raise(INVALID_OPERATION),
        }
    }

    unsafe fn vertex_attribute_divisor(&mut self, index: u32, divisor: u32) {
        let mut state = self.state.borrow_mut();
        let vao = state.vertex_array;
        match state.vertex_arrays.get_mut(&vao) {
            Some(v) => v.attributes.entry(index).or_default().divisor = divisor,
            None => state.raise(INVALID_OPERATION),
        }
    }

    unsafe fn create_texture(&mut self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.textures.insert(
            id,
            TextureObject {
                target: None,
                wrap: TextureWrap::Repeat,
                filter: TextureFilter::Linear,
                images: HashMap::new(),
                pixels: HashMap::new(),
            },
        );
        id
    }

    unsafe fn active_texture(&mut self, slot: u32) {
        let mut state = self.state.borrow_mut();
        if slot >= 32 {
            state.raise(INVALID_ENUM);
            return;
        }

        state.active_texture = slot;
    }

    unsafe fn bind_texture(&mut self, target: TextureTarget, id: u32) {
        let mut state = self.state.borrow_mut();
        let slot = state.active_texture;

        if id != 0 {
            let mismatch = match state.textures.get_mut(&id) {
                Some(texture) => match texture.target {
                    Some(v) => v != target,
                    None => {
                        texture.target = Some(target);
                        false
                    }
                },
                None => true,
            };

            if mismatch {
                state.raise(INVALID_OPERATION);
                return;
            }
        }

        state.texture_units.insert((slot, target), id);
    }

    unsafe fn texture_parameters(
        &mut self,
        target: TextureTarget,
        wrap: TextureWrap,
        filter: TextureFilter,
    ) {
        let mut state = self.state.borrow_mut();
        let id = state.bound_texture(state.active_texture, target);
        match state.textures.get_mut(&id) {
            Some(texture) => {
                texture.wrap = wrap;
                texture.filter = filter;
            }
            None => state.raise(INVALID_OPERATION),
        }
    }

    unsafe fn texture_image(
        &mut self,
        target: ImageTarget,
        width: u32,
        height: u32,
        pixels: Option<&[u8]>,
    ) {
        let mut state = self.state.borrow_mut();
        let id = state.bound_texture(state.active_texture, target.texture_target());

        if let Some(bytes) = pixels {
            if bytes.len() < (width * height * 4) as usize {
                state.raise(INVALID_OPERATION);
                return;
            }
        }

        match state.textures.get_mut(&id) {
            Some(texture) => {
                texture.images.insert(target, (width, height));
                match pixels {
                    Some(bytes) => {
                        let len = (width * height * 4) as usize;
                        texture.pixels.insert(target, bytes[..len].to_vec());
                    }
                    None => {
                        texture.pixels.remove(&target);
                    }
                }
            }
            None => state.raise(INVALID_OPERATION),
        }
    }

    unsafe fn delete_texture(&mut self, id: u32) {
        let mut state = self.state.borrow_mut();
        if state.textures.remove(&id).is_some() {
            state.texture_units.retain(|_, v| *v != id);
        }
    }

    unsafe fn create_shader(&mut self, stage: ShaderStage) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.shaders.insert(
            id,
            ShaderObject {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        id
    }

    unsafe fn compile_shader(&mut self, id: u32, source: &str) -> bool {
        let mut state = self.state.borrow_mut();
        match state.shaders.get_mut(&id) {
            Some(shader) => {
                shader.source = source.to_owned();
                shader.compiled = source.contains("void main");
                shader.log = if shader.compiled {
                    String::new()
                } else {
                    "0:1(1): error: entry point `void main()` is not defined".to_owned()
                };
                shader.compiled
            }
            None => {
                state.raise(INVALID_VALUE);
                false
            }
        }
    }

    unsafe fn shader_info_log(&mut self, id: u32) -> String {
        let state = self.state.borrow();
        state
            .shaders
            .get(&id)
            .map(|v| v.log.clone())
            .unwrap_or_default()
    }

    unsafe fn delete_shader(&mut self, id: u32) {
        let mut state = self.state.borrow_mut();
        state.shaders.remove(&id);
    }

    unsafe fn create_program(&mut self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.programs.insert(id, ProgramObject::default());
        id
    }

    unsafe fn attach_shader(&mut self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(&shader) {
            state.raise(INVALID_VALUE);
            return;
        }

        match state.programs.get_mut(&program) {
            Some(v) => v.shaders.push(shader),
            None => state.raise(INVALID_VALUE),
        }
    }

    unsafe fn detach_shader(&mut self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        if let Some(v) = state.programs.get_mut(&program) {
            v.shaders.retain(|v| *v != shader);
        }
    }

    unsafe fn link_program(&mut self, program: u32) -> bool {
        let mut state = self.state.borrow_mut();

        let shaders = match state.programs.get(&program) {
            Some(v) => v.shaders.clone(),
            None => {
                state.raise(INVALID_VALUE);
                return false;
            }
        };

        let mut stages = Vec::new();
        let mut uniforms = Vec::new();
        let mut log = String::new();

        for id in &shaders {
            if let Some(shader) = state.shaders.get(id) {
                if !shader.compiled {
                    log = format!("error: {} shader {} is not compiled", shader.stage, id);
                }

                stages.push(shader.stage);
                scan_uniforms(&shader.source, &mut uniforms);
            }
        }

        for stage in &[ShaderStage::Vertex, ShaderStage::Fragment] {
            if stages.iter().filter(|v| *v == stage).count() != 1 {
                log = format!("error: program requires exactly one {} shader", stage);
            }
        }

        if let Some(v) = state.programs.get_mut(&program) {
            v.linked = log.is_empty();
            v.log = log;
            v.values.clear();
            v.uniforms.clear();

            if v.linked {
                for (location, (name, array)) in uniforms.into_iter().enumerate() {
                    if array {
                        v.uniforms.insert(format!("{}[0]", name), location as i32);
                    }

                    v.uniforms.insert(name, location as i32);
                }
            }

            v.linked
        } else {
            false
        }
    }

    unsafe fn validate_program(&mut self, program: u32) -> bool {
        let mut state = self.state.borrow_mut();
        let has_vertex_array = state.vertex_array != 0;

        match state.programs.get_mut(&program) {
            Some(v) if !v.linked => false,
            Some(v) if !has_vertex_array => {
                // Core profiles validate against the current state, which needs a vertex
                // array object.
                v.log = "Validation Failed: No vertex array object bound.".to_owned();
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    unsafe fn program_info_log(&mut self, program: u32) -> String {
        let state = self.state.borrow();
        state
            .programs
            .get(&program)
            .map(|v| v.log.clone())
            .unwrap_or_default()
    }

    unsafe fn use_program(&mut self, program: u32) {
        let mut state = self.state.borrow_mut();
        if program != 0 && !state.programs.get(&program).map_or(false, |v| v.linked) {
            state.raise(INVALID_OPERATION);
            return;
        }

        state.program = program;
    }

    unsafe fn delete_program(&mut self, program: u32) {
        let mut state = self.state.borrow_mut();
        if state.programs.remove(&program).is_some() && state.program == program {
            state.program = 0;
        }
    }

    unsafe fn uniform_location(&mut self, program: u32, name: &str) -> i32 {
        let mut state = self.state.borrow_mut();
        state.uniform_queries += 1;

        let location = state
            .programs
            .get(&program)
            .map(|v| (v.linked, v.uniforms.get(name).cloned().unwrap_or(-1)));

        match location {
            Some((true, location)) => location,
            _ => {
                state.raise(INVALID_OPERATION);
                -1
            }
        }
    }

    unsafe fn uniform(&mut self, location: i32, variable: &UniformVariable) {
        let mut state = self.state.borrow_mut();
        let program = state.program;

        if program == 0 {
            state.raise(INVALID_OPERATION);
            return;
        }

        // Writing to location -1 is silently ignored.
        if location < 0 {
            return;
        }

        if let Some(v) = state.programs.get_mut(&program) {
            v.values.insert(location, variable.clone());
        }
    }

    unsafe fn create_framebuffer(&mut self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.framebuffers.insert(
            id,
            FramebufferObject {
                color: 0,
                depth_stencil: 0,
            },
        );
        id
    }

    unsafe fn bind_framebuffer(&mut self, id: u32) {
        let mut state = self.state.borrow_mut();
        if id != 0 && !state.framebuffers.contains_key(&id) {
            state.raise(INVALID_OPERATION);
            return;
        }

        state.framebuffer = id;
    }

    unsafe fn framebuffer_texture(&mut self, attachment: Attachment, texture: u32) {
        let mut state = self.state.borrow_mut();
        let id = state.framebuffer;
        match state.framebuffers.get_mut(&id) {
            Some(fbo) => match attachment {
                Attachment::Color0 => fbo.color = texture,
                Attachment::DepthStencil => fbo.depth_stencil = texture,
            },
            None => state.raise(INVALID_OPERATION),
        }
    }

    unsafe fn framebuffer_renderbuffer(&mut self, attachment: Attachment, renderbuffer: u32) {
        self.framebuffer_texture(attachment, renderbuffer);
    }

    unsafe fn framebuffer_status(&mut self) -> FramebufferStatus {
        let state = self.state.borrow();
        match state.framebuffers.get(&state.framebuffer) {
            Some(fbo) if fbo.color == 0 => FramebufferStatus::MissingAttachment,
            Some(fbo) => {
                let color = state
                    .textures
                    .get(&fbo.color)
                    .map_or(false, |v| v.images.contains_key(&ImageTarget::Texture2D));

                if color {
                    FramebufferStatus::Complete
                } else {
                    FramebufferStatus::IncompleteAttachment
                }
            }
            // The default framebuffer is always complete.
            None => FramebufferStatus::Complete,
        }
    }

    unsafe fn delete_framebuffer(&mut self, id: u32) {
        let mut state = self.state.borrow_mut();
        if state.framebuffers.remove(&id).is_some() && state.framebuffer == id {
            state.framebuffer = 0;
        }
    }

    unsafe fn create_renderbuffer(&mut self, width: u32, height: u32) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.renderbuffers.insert(id, (width, height));
        id
    }

    unsafe fn delete_renderbuffer(&mut self, id: u32) {
        self.state.borrow_mut().renderbuffers.remove(&id);
    }

    unsafe fn set_capability(&mut self, capability: Capability, enable: bool) {
        let mut state = self.state.borrow_mut();
        if enable {
            state.capabilities.insert(capability);
        } else {
            state.capabilities.remove(&capability);
        }
    }

    unsafe fn depth_func(&mut self, comparison: Comparison) {
        self.state.borrow_mut().depth_func = comparison;
    }

    unsafe fn depth_mask(&mut self, write: bool) {
        self.state.borrow_mut().depth_mask = write;
    }

    unsafe fn stencil_func(&mut self, comparison: Comparison, reference: i32, mask: u32) {
        let mut state = self.state.borrow_mut();
        state.stencil.comparison = comparison;
        state.stencil.reference = reference;
        state.stencil.read_mask = mask;
    }

    unsafe fn stencil_op(&mut self, fail: StencilAction, zfail: StencilAction, pass: StencilAction) {
        self.state.borrow_mut().stencil.ops = (fail, zfail, pass);
    }

    unsafe fn stencil_mask(&mut self, mask: u32) {
        self.state.borrow_mut().stencil.write_mask = mask;
    }

    unsafe fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.state.borrow_mut().blend = (src, dst);
    }

    unsafe fn polygon_mode(&mut self, mode: PolygonMode) {
        self.state.borrow_mut().polygon_mode = mode;
    }

    unsafe fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.state.borrow_mut().viewport = (x, y, width, height);
    }

    unsafe fn clear_color(&mut self, color: [f32; 4]) {
        self.state.borrow_mut().clear_color = color;
    }

    unsafe fn clear(&mut self, flags: ClearFlags) {
        self.state.borrow_mut().clears.push(flags);
    }

    unsafe fn draw_elements(&mut self, count: u32, format: IndexFormat) {
        self.state.borrow_mut().draw(count, format, None);
    }

    unsafe fn draw_elements_instanced(&mut self, count: u32, format: IndexFormat, instances: u32) {
        self.state.borrow_mut().draw(count, format, Some(instances));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniforms() {
        let mut uniforms = Vec::new();
        scan_uniforms(
            "uniform mat4 u_MVP;\n  uniform highp vec4 u_Color;\nuniform sampler2D u_Textures[2];",
            &mut uniforms,
        );
        scan_uniforms("uniform mat4 u_MVP;", &mut uniforms);

        assert_eq!(
            uniforms,
            vec![
                ("u_MVP".to_owned(), false),
                ("u_Color".to_owned(), false),
                ("u_Textures".to_owned(), true),
            ]
        );
    }

    #[test]
    fn sub_data_out_of_range() {
        let mut visitor = HeadlessVisitor::new();
        let state = visitor.state();

        unsafe {
            let id = visitor.create_buffer();
            visitor.bind_buffer(BufferTarget::Array, id);
            visitor.buffer_data(BufferTarget::Array, 4, None, BufferHint::Dynamic);
            visitor.buffer_sub_data(BufferTarget::Array, 2, &[1, 2, 3]);

            assert_eq!(visitor.get_error(), INVALID_VALUE);
            assert_eq!(visitor.get_error(), NO_ERROR);
            assert_eq!(state.borrow().buffers[&id].data, vec![0, 0, 0, 0]);
        }
    }

    #[test]
    fn element_buffer_is_vertex_array_state() {
        let mut visitor = HeadlessVisitor::new();
        let state = visitor.state();

        unsafe {
            let vao = visitor.create_vertex_array();
            let ebo = visitor.create_buffer();
            visitor.bind_vertex_array(vao);
            visitor.bind_buffer(BufferTarget::ElementArray, ebo);
            visitor.bind_vertex_array(0);
            assert_eq!(state.borrow().current_element_buffer(), 0);

            visitor.bind_vertex_array(vao);
            assert_eq!(state.borrow().current_element_buffer(), ebo);
        }
    }
}

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use cgmath::{Matrix4, Vector3, Vector4};
use smallvec::SmallVec;

use super::device::Device;
use super::errors::{Error, Result};
use super::types::{ShaderStage, UniformVariable};

/// The stage sources found in a combined shader file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: Option<String>,
    pub fragment: Option<String>,
}

impl ShaderSource {
    /// Splits a combined source. A line containing `#shader vertex` or `#shader fragment`
    /// starts the named section, every other line is appended to the current section.
    /// Lines before the first marker are dropped.
    pub fn parse(source: &str) -> Self {
        let mut parsed = ShaderSource::default();
        let mut stage = None;

        for line in source.lines() {
            if line.contains("#shader") {
                if line.contains("vertex") {
                    stage = Some(ShaderStage::Vertex);
                } else if line.contains("fragment") {
                    stage = Some(ShaderStage::Fragment);
                }

                continue;
            }

            let section = match stage {
                Some(ShaderStage::Vertex) => &mut parsed.vertex,
                Some(ShaderStage::Fragment) => &mut parsed.fragment,
                None => continue,
            };

            let section = section.get_or_insert_with(String::new);
            section.push_str(line);
            section.push('\n');
        }

        parsed
    }
}

/// A linked shader program.
///
/// Uniform locations are resolved lazily and memoized by name, misses included. A
/// missing uniform is reported once with `warn!`, writing to it is a no-op.
pub struct Shader {
    device: Rc<Device>,
    id: u32,
    label: String,
    locations: RefCell<HashMap<String, i32>>,
}

impl Shader {
    /// Creates a program from a combined source file holding both stages.
    pub fn from_file<P: AsRef<Path>>(device: &Rc<Device>, path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = ShaderSource::parse(&read(path)?);

        let vs = source.vertex.ok_or_else(|| Error::ShaderStageMissing {
            path: path.to_owned(),
            stage: ShaderStage::Vertex,
        })?;

        let fs = source.fragment.ok_or_else(|| Error::ShaderStageMissing {
            path: path.to_owned(),
            stage: ShaderStage::Fragment,
        })?;

        Shader::link(device, &vs, &fs, path.display().to_string())
    }

    /// Creates a program from a vertex and a fragment source file.
    pub fn from_files<P1, P2>(device: &Rc<Device>, vs: P1, fs: P2) -> Result<Self>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
    {
        let label = format!("{}+{}", vs.as_ref().display(), fs.as_ref().display());
        let vs = read(vs.as_ref())?;
        let fs = read(fs.as_ref())?;
        Shader::link(device, &vs, &fs, label)
    }

    pub fn from_sources(device: &Rc<Device>, vs: &str, fs: &str) -> Result<Self> {
        Shader::link(device, vs, fs, "<memory>".to_owned())
    }

    fn link(device: &Rc<Device>, vs: &str, fs: &str, label: String) -> Result<Self> {
        let vs = compile(device, ShaderStage::Vertex, vs)?;
        let fs = match compile(device, ShaderStage::Fragment, fs) {
            Ok(v) => v,
            Err(err) => {
                gl_call!(device, delete_shader(vs));
                return Err(err);
            }
        };

        let id = gl_call!(device, create_program());
        gl_call!(device, attach_shader(id, vs));
        gl_call!(device, attach_shader(id, fs));

        let result = if !gl_call!(device, link_program(id)) {
            Err(Error::ShaderLink(gl_call!(device, program_info_log(id))))
        } else {
            // Validation depends on the state bound at this moment, not on the program.
            if !gl_call!(device, validate_program(id)) {
                let log = gl_call!(device, program_info_log(id));
                warn!("Shader program {} did not validate: {}", label, log.trim());
            }

            Ok(())
        };

        gl_call!(device, detach_shader(id, vs));
        gl_call!(device, detach_shader(id, fs));
        gl_call!(device, delete_shader(vs));
        gl_call!(device, delete_shader(fs));

        if let Err(err) = result {
            device.delete_program(id);
            return Err(err);
        }

        debug!("Links shader program {} from {}.", id, label);
        Ok(Shader {
            device: device.clone(),
            id,
            label,
            locations: RefCell::new(HashMap::new()),
        })
    }

    pub fn bind(&self) {
        self.device.bind_program(self.id);
    }

    pub fn unbind(&self) {
        self.device.bind_program(0);
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.device.bindings().program == self.id
    }

    /// Returns the location of the uniform `name`, or -1 if the program has none.
    pub fn uniform_location(&self, name: &str) -> i32 {
        if let Some(&location) = self.locations.borrow().get(name) {
            return location;
        }

        let location = gl_call!(self.device, uniform_location(self.id, name));
        if location == -1 {
            warn!("Uniform '{}' doesn't exist in shader {}.", name, self.label);
        }

        self.locations.borrow_mut().insert(name.to_owned(), location);
        location
    }

    /// Assigns `variable` to the uniform `name`. The program must be bound.
    pub fn set_uniform(&self, name: &str, variable: UniformVariable) -> Result<()> {
        if !self.is_bound() {
            return Err(Error::ProgramNotBound(self.id));
        }

        let location = self.uniform_location(name);
        if location != -1 {
            gl_call!(self.device, uniform(location, &variable));
        }

        Ok(())
    }

    pub fn set_uniform_1i(&self, name: &str, v: i32) -> Result<()> {
        self.set_uniform(name, UniformVariable::I32(v))
    }

    pub fn set_uniform_1f(&self, name: &str, v: f32) -> Result<()> {
        self.set_uniform(name, UniformVariable::F32(v))
    }

    pub fn set_uniform_3f(&self, name: &str, v0: f32, v1: f32, v2: f32) -> Result<()> {
        self.set_uniform(name, UniformVariable::Vector3f([v0, v1, v2]))
    }

    pub fn set_uniform_vec3(&self, name: &str, v: Vector3<f32>) -> Result<()> {
        self.set_uniform(name, UniformVariable::Vector3f(v.into()))
    }

    pub fn set_uniform_4f(&self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) -> Result<()> {
        self.set_uniform(name, UniformVariable::Vector4f([v0, v1, v2, v3]))
    }

    pub fn set_uniform_vec4(&self, name: &str, v: Vector4<f32>) -> Result<()> {
        self.set_uniform(name, UniformVariable::Vector4f(v.into()))
    }

    pub fn set_uniform_mat4(&self, name: &str, v: &Matrix4<f32>) -> Result<()> {
        self.set_uniform(name, UniformVariable::Matrix4f((*v).into()))
    }

    /// Assigns an `int` array, e.g. the texture units of a sampler array.
    pub fn set_uniform_1iv(&self, name: &str, v: &[i32]) -> Result<()> {
        self.set_uniform(name, UniformVariable::I32Array(SmallVec::from_slice(v)))
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.device.delete_program(self.id);
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| Error::Io(PathBuf::from(path), err.to_string()))
}

fn compile(device: &Rc<Device>, stage: ShaderStage, source: &str) -> Result<u32> {
    let id = gl_call!(device, create_shader(stage));
    if gl_call!(device, compile_shader(id, source)) {
        return Ok(id);
    }

    let log = gl_call!(device, shader_info_log(id));
    gl_call!(device, delete_shader(id));
    Err(Error::ShaderCompile { stage, log })
}

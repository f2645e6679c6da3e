use gl;
use gl::types::*;
use std::cmp;
use std::ffi;

use crate::video::errors::{Error, Result};
use crate::video::{MAX_TEXTURE_SLOTS, MAX_VERTEX_ATTRIBUTES};

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the same API.
/// For example, both `Version::GL(3, 0) >= Version::ES(3, 0)` and `Version::ES(3, 0) >=
/// Version::GL(3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            match major1.cmp(&major2) {
                cmp::Ordering::Equal => Some(minor1.cmp(&minor2)),
                v => Some(v),
            }
        }
    }
}

impl Version {
    /// Parses a `GL_VERSION` string, e.g. `"4.6.0 NVIDIA 535.54"` or `"OpenGL ES 3.2 Mesa"`.
    pub fn parse(desc: &str) -> Result<Version> {
        // Profile names like "OpenGL ES-CM 1.1" carry the version after the next space.
        let (es, desc) = if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else if desc.starts_with("OpenGL ES-") {
            let rest = desc.splitn(2, ' ').nth(1).unwrap_or("");
            (true, rest)
        } else {
            (false, desc)
        };

        let malformed = || Error::Backend(format!("[GL] Version string {:?} is malformed.", desc));

        let number = desc.split(' ').next().ok_or_else(malformed)?;
        let mut iter = number.split('.');
        let major = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;
        let minor = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Capabilities {
    pub version: Version,
    pub vendor: String,
    pub renderer: String,
    pub max_texture_units: u32,
    pub max_vertex_attributes: u32,
}

impl Capabilities {
    /// Queries the capabilities of the current context.
    ///
    /// # Safety
    ///
    /// You must ensure that the functions belong to the current context, otherwise you
    /// will get an undefined behavior.
    pub unsafe fn parse() -> Result<Capabilities> {
        let version = Version::parse(&get_string(gl::VERSION)?)?;
        let vendor = get_string(gl::VENDOR)?;
        let renderer = get_string(gl::RENDERER)?;

        let mut max_texture_units = 0;
        gl::GetIntegerv(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, &mut max_texture_units);

        let mut max_vertex_attributes = 0;
        gl::GetIntegerv(gl::MAX_VERTEX_ATTRIBS, &mut max_vertex_attributes);

        Ok(Capabilities {
            version,
            vendor,
            renderer,
            max_texture_units: max_texture_units.max(0) as u32,
            max_vertex_attributes: max_vertex_attributes.max(0) as u32,
        })
    }
}

impl Capabilities {
    /// Checks that the context supports everything the video handles rely on.
    pub fn check(&self) -> Result<()> {
        let supported = match self.version {
            Version::GL(..) => self.version >= Version::GL(3, 3),
            Version::ES(..) => self.version >= Version::ES(3, 0),
        };

        if !supported {
            return Err(Error::Requirement(format!(
                "vertex array objects and instanced drawing (found {:?}, requires GL 3.3 or ES 3.0)",
                self.version
            )));
        }

        if self.max_texture_units < MAX_TEXTURE_SLOTS {
            return Err(Error::Requirement(format!(
                "{} texture units (found {})",
                MAX_TEXTURE_SLOTS, self.max_texture_units
            )));
        }

        if self.max_vertex_attributes < MAX_VERTEX_ATTRIBUTES {
            return Err(Error::Requirement(format!(
                "{} vertex attributes (found {})",
                MAX_VERTEX_ATTRIBUTES, self.max_vertex_attributes
            )));
        }

        Ok(())
    }
}

unsafe fn get_string(name: GLenum) -> Result<String> {
    let desc = gl::GetString(name);
    if desc.is_null() {
        return Err(Error::Backend(
            "[GL] glGetString returned null, is the context current?".into(),
        ));
    }

    let bytes = ffi::CStr::from_ptr(desc as *const _).to_bytes().to_vec();
    String::from_utf8(bytes).map_err(|_| Error::Backend("[GL] String is unformaled.".into()))
}

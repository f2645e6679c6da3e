use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::device::Device;
use super::errors::{Error, Result};
use super::types::{CubeFace, ImageTarget, TextureFilter, TextureTarget, TextureWrap};
use super::MAX_TEXTURE_SLOTS;

/// Sampling parameters of a texture.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureParams {
    pub wrap: TextureWrap,
    pub filter: TextureFilter,
}

impl Default for TextureParams {
    fn default() -> Self {
        TextureParams {
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
        }
    }
}

/// A 2D texture or a cube map with RGBA8 storage.
pub struct Texture {
    device: Rc<Device>,
    id: u32,
    target: TextureTarget,
    dimensions: (u32, u32),
}

impl Texture {
    /// Loads a 2D texture from an image file. Rows are flipped so the first row of the
    /// file ends up at texture coordinate `v = 1`.
    pub fn from_file<P: AsRef<Path>>(device: &Rc<Device>, path: P) -> Result<Self> {
        Texture::from_file_with(device, path, TextureParams::default())
    }

    pub fn from_file_with<P: AsRef<Path>>(
        device: &Rc<Device>,
        path: P,
        params: TextureParams,
    ) -> Result<Self> {
        let (width, height, pixels) = decode(path.as_ref(), true)?;
        let texture = Texture::create(device, TextureTarget::Texture2D, (width, height), params);
        texture.upload(ImageTarget::Texture2D, Some(pixels.as_slice()));
        texture.unbind();
        Ok(texture)
    }

    /// Loads a cube map from exactly six images, ordered right, left, top, bottom,
    /// front and back. All faces must share the size of the first one.
    pub fn cube_map<P: AsRef<Path>>(device: &Rc<Device>, faces: &[P]) -> Result<Self> {
        if faces.len() != CubeFace::ALL.len() {
            return Err(Error::CubeMapFaces(faces.len()));
        }

        let mut images: Vec<(u32, u32, Vec<u8>)> = Vec::with_capacity(faces.len());
        for path in faces {
            let path = path.as_ref();
            let image = decode(path, false)?;

            if let Some(&(width, height, _)) = images.first() {
                if (width, height) != (image.0, image.1) {
                    return Err(Error::CubeMapFaceSize(path.to_owned()));
                }
            }

            images.push(image);
        }

        let params = TextureParams {
            wrap: TextureWrap::Clamp,
            filter: TextureFilter::Linear,
        };

        let dimensions = (images[0].0, images[0].1);
        let texture = Texture::create(device, TextureTarget::CubeMap, dimensions, params);
        for (face, (_, _, pixels)) in CubeFace::ALL.iter().zip(images.iter()) {
            texture.upload(ImageTarget::CubeFace(*face), Some(pixels.as_slice()));
        }

        texture.unbind();
        Ok(texture)
    }

    /// Creates a 2D texture from tightly packed RGBA8 pixels.
    pub fn from_rgba(
        device: &Rc<Device>,
        width: u32,
        height: u32,
        pixels: &[u8],
        params: TextureParams,
    ) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4));

        match expected {
            Some(expected) if expected == pixels.len() => {}
            _ => {
                let expected = expected.unwrap_or(usize::MAX);
                return Err(Error::TextureDataSize(pixels.len(), expected));
            }
        }

        let texture = Texture::create(device, TextureTarget::Texture2D, (width, height), params);
        texture.upload(ImageTarget::Texture2D, Some(pixels));
        texture.unbind();
        Ok(texture)
    }

    /// Allocates an uninitialized 2D texture, usually as a render target.
    pub fn empty(device: &Rc<Device>, width: u32, height: u32, params: TextureParams) -> Self {
        let texture = Texture::create(device, TextureTarget::Texture2D, (width, height), params);
        texture.upload(ImageTarget::Texture2D, None);
        texture.unbind();
        texture
    }

    fn create(
        device: &Rc<Device>,
        target: TextureTarget,
        dimensions: (u32, u32),
        params: TextureParams,
    ) -> Self {
        let id = gl_call!(device, create_texture());
        device.bind_texture(0, target, id);
        gl_call!(device, texture_parameters(target, params.wrap, params.filter));

        Texture {
            device: device.clone(),
            id,
            target,
            dimensions,
        }
    }

    fn upload(&self, target: ImageTarget, pixels: Option<&[u8]>) {
        let (width, height) = self.dimensions;
        gl_call!(self.device, texture_image(target, width, height, pixels));
    }

    /// Binds this texture to the texture unit `slot`.
    pub fn bind(&self, slot: u32) -> Result<()> {
        if slot >= MAX_TEXTURE_SLOTS {
            return Err(Error::TextureSlot(slot, MAX_TEXTURE_SLOTS));
        }

        self.device.bind_texture(slot, self.target, self.id);
        Ok(())
    }

    /// Binds this texture to the texture unit 0.
    pub fn bind_default(&self) {
        self.device.bind_texture(0, self.target, self.id);
    }

    /// Clears the binding of the active texture unit.
    pub fn unbind(&self) {
        let slot = self.device.bindings().texture_slot;
        self.device.bind_texture(slot, self.target, 0);
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn target(&self) -> TextureTarget {
        self.target
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.dimensions.1
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        gl_call!(self.device, delete_texture(self.id));
    }
}

/// Reads and decodes an image file into RGBA8 pixels.
fn decode(path: &Path, flip: bool) -> Result<(u32, u32, Vec<u8>)> {
    let bytes = fs::read(path).map_err(|err| Error::Io(PathBuf::from(path), err.to_string()))?;

    let image = image::load_from_memory(&bytes).map_err(|err| Error::TextureDecode {
        path: path.to_owned(),
        reason: err.to_string(),
    })?;

    let image = if flip { image.flipv() } else { image };
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();

    debug!("Decodes {:?} ({}x{}).", path, width, height);
    Ok((width, height, rgba.into_raw()))
}

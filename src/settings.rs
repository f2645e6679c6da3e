//! Functions for loading the sandbox settings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// A structure containing configuration data for the sandbox, which are used to
/// create the window and to locate assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowParams,
    /// The root directory of shaders and textures.
    pub assets: PathBuf,
    /// Filter directives of the logger, e.g. `"info,glsandbox=debug"`.
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the size in *points* of the client area of the window.
    pub size: [u32; 2],
    /// Sets the multisampling level to request. A value of 0 indicates that
    /// multisampling must not be enabled.
    pub multisample: u16,
    /// Specifies whether should we have vsync.
    pub vsync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            window: WindowParams::default(),
            assets: PathBuf::from("assets"),
            log_filter: None,
        }
    }
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "GL Sandbox".to_owned(),
            size: [960, 540],
            multisample: 4,
            vsync: true,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let text = match fs::read_to_string(path) {
            Ok(v) => v,
            Err(ref err) if err.kind() == io::ErrorKind::NotFound => {
                info!("Settings file {:?} not found, uses defaults.", path);
                return Ok(Settings::default());
            }
            Err(err) => bail!("Failed to read settings {:?}: {}", path, err),
        };

        Settings::parse(&text).map_err(|err| format_err!("Malformed settings {:?}: {}", path, err))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial() {
        let settings = Settings::parse(r#"{ "window": { "title": "t" }, "assets": "res" }"#).unwrap();
        assert_eq!(settings.window.title, "t");
        assert_eq!(settings.window.size, [960, 540]);
        assert_eq!(settings.assets, PathBuf::from("res"));
        assert!(settings.log_filter.is_none());
    }

    #[test]
    fn malformed() {
        assert!(Settings::parse("{ \"window\": 3 }").is_err());
    }

    #[test]
    fn missing() {
        let settings = Settings::load("this/settings/does/not/exist.json").unwrap();
        assert_eq!(settings.window.size, WindowParams::default().size);
    }
}

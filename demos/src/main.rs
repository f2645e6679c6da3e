//! The sandbox host: opens a window, installs the logger and runs the scene gallery
//! until the window is closed or Escape is pressed.
//!
//! Settings are read from `settings.json` in the working directory, or from the path in
//! the `GLSANDBOX_SETTINGS` environment variable.

extern crate env_logger;
#[macro_use]
extern crate failure;
extern crate glsandbox;
extern crate glutin;
#[macro_use]
extern crate log;

mod camera;
mod overlay;
mod scenes;
mod ui;
mod window;

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use glsandbox::prelude::*;

use self::overlay::Overlay;
use self::scenes::Viewport;
use self::ui::KeyboardUi;
use self::window::Window;

const SETTINGS_VARIABLE: &str = "GLSANDBOX_SETTINGS";

fn init_logger(settings: &Settings) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(ref filter) = settings.log_filter {
        builder.parse(filter);
    }

    builder.init();
}

fn main() -> Result<()> {
    let path = env::var_os(SETTINGS_VARIABLE)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));

    let settings = Settings::load(&path)?;
    init_logger(&settings);
    info!("Settings: {:?}", settings);

    let mut window = Window::new(&settings.window)?;
    let device = unsafe { Device::gl()? };

    let viewport = Viewport::default();
    viewport.set(window.dimensions());

    let mut menu = SceneMenu::new();
    scenes::register(&mut menu, &viewport);

    let ctx = SceneContext::new(device.clone(), settings.assets.clone());
    let mut gallery = Gallery::new(ctx, menu);
    let renderer = Renderer::new(&device);

    let mut input = Input::new();
    let mut ui = KeyboardUi::new();
    let mut overlay = Overlay::new();
    let mut title = String::new();
    let mut scene = None;
    let mut last = Instant::now();

    while window.poll_events(&mut input)
        && !input.is_key_press(Key::Escape)
        && !overlay.should_quit()
    {
        let now = Instant::now();
        let elapsed = now - last;
        let dt = elapsed.as_secs() as f32 + elapsed.subsec_nanos() as f32 * 1e-9;
        last = now;

        let [w, h] = window.dimensions();
        viewport.set([w, h]);
        device.set_viewport(0, 0, w, h);
        overlay.apply(&device);
        renderer.clear_with(ClearFlags::ALL);

        ui.begin(&input, dt);
        gallery.frame(&input, &mut ui, dt);
        overlay.on_ui(&mut ui);
        ui.end();

        let current = gallery.current_name().map(|v| v.to_owned());
        if current != scene {
            ui.reset_focus();
            scene = current;
        }

        let next = format!(
            "{} | {} | {}",
            settings.window.title,
            scene.as_ref().map(|v| v.as_str()).unwrap_or("Menu"),
            ui.title()
        );

        if next != title {
            window.set_title(&next);
            for text in ui.texts() {
                debug!("{}", text);
            }

            title = next;
        }

        window.swap_buffers()?;
        input.advance();
    }

    info!("Exits with {} failed device calls.", device.failures());
    Ok(())
}

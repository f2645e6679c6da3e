use std::rc::Rc;

use glsandbox::prelude::*;

/// Controls the host draws below every scene.
#[derive(Debug, Default, Clone)]
pub struct Overlay {
    pub wireframe: bool,
    quit: bool,
}

impl Overlay {
    pub fn new() -> Self {
        Overlay::default()
    }

    /// Applies the global render options. Scene transitions reset the render state,
    /// so this runs at the start of every frame.
    pub fn apply(&self, device: &Rc<Device>) {
        let mode = if self.wireframe {
            PolygonMode::Line
        } else {
            PolygonMode::Fill
        };

        device.set_polygon_mode(mode);
    }

    pub fn on_ui(&mut self, ui: &mut dyn Ui) {
        ui.checkbox("Wireframe Mode", &mut self.wireframe);
        if ui.button("Close Application") {
            self.quit = true;
        }
    }

    #[inline]
    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ui::KeyboardUi;
    use glsandbox::video::backends::headless::HeadlessVisitor;

    #[test]
    fn wireframe_toggle() {
        let visitor = HeadlessVisitor::new();
        let state = visitor.state();
        let device = Device::new(Box::new(visitor));

        let mut overlay = Overlay::new();
        let mut ui = KeyboardUi::new();
        let mut input = Input::new();
        input.on_key_pressed(Key::Return);

        ui.begin(&input, 0.016);
        overlay.on_ui(&mut ui);
        ui.end();

        assert!(overlay.wireframe);
        assert!(!overlay.should_quit());

        overlay.apply(&device);
        assert_eq!(state.borrow().polygon_mode, PolygonMode::Line);

        device.reset_render_state();
        overlay.wireframe = false;
        overlay.apply(&device);
        assert_eq!(state.borrow().polygon_mode, PolygonMode::Fill);
        assert_eq!(device.failures(), 0);
    }
}

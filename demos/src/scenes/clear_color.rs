use glsandbox::prelude::*;

/// Fills the screen with an editable color.
pub struct ClearColor {
    renderer: Renderer,
    color: [f32; 4],
}

impl SceneFactory for ClearColor {
    fn create(ctx: &SceneContext) -> Result<Self> {
        Ok(ClearColor {
            renderer: Renderer::new(&ctx.device),
            color: [0.2, 0.3, 0.8, 1.0],
        })
    }
}

impl Scene for ClearColor {
    fn on_render(&mut self) -> Result<()> {
        self.renderer.set_clear_color(self.color);
        self.renderer.clear();
        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.color_edit4("Clear Color", &mut self.color);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ui::KeyboardUi;
    use glsandbox::video::backends::headless::HeadlessVisitor;

    #[test]
    fn restores_clear_color_on_back() {
        let visitor = HeadlessVisitor::new();
        let state = visitor.state();
        let device = Device::new(Box::new(visitor));

        let mut menu = SceneMenu::new();
        menu.register::<ClearColor>("Clear Color");
        let mut gallery = Gallery::new(SceneContext::new(device, "assets"), menu);
        assert!(gallery.select("Clear Color"));

        let input = Input::new();
        let mut ui = KeyboardUi::new();
        ui.begin(&input, 0.016);
        gallery.frame(&input, &mut ui, 0.016);
        assert_eq!(state.borrow().clear_color, [0.2, 0.3, 0.8, 1.0]);

        gallery.back();
        assert_eq!(state.borrow().clear_color, [0.0, 0.0, 0.0, 1.0]);
    }
}

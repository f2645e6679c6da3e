use super::{Scene, SceneContext, SceneMenu, Ui};
use crate::errors::Result;
use crate::input::Input;

/// Label of the button that leaves the current scene.
pub const BACK_LABEL: &str = "<-";

struct Current {
    index: usize,
    scene: Box<dyn Scene>,
}

/// Owns the menu and the scene that currently runs.
///
/// The menu lives as long as the gallery, while scenes are dropped whenever the gallery
/// switches away from them. Every switch restores the default render state.
pub struct Gallery {
    ctx: SceneContext,
    current: Option<Current>,
    menu: SceneMenu,
    back: bool,
}

impl Gallery {
    pub fn new(ctx: SceneContext, menu: SceneMenu) -> Self {
        Gallery {
            ctx,
            current: None,
            menu,
            back: false,
        }
    }

    #[inline]
    pub fn context(&self) -> &SceneContext {
        &self.ctx
    }

    #[inline]
    pub fn menu(&self) -> &SceneMenu {
        &self.menu
    }

    #[inline]
    pub fn menu_mut(&mut self) -> &mut SceneMenu {
        &mut self.menu
    }

    #[inline]
    pub fn is_menu_current(&self) -> bool {
        self.current.is_none()
    }

    /// Name of the running scene, `None` while the menu is shown.
    pub fn current_name(&self) -> Option<&str> {
        self.current
            .as_ref()
            .and_then(|v| self.menu.name(v.index))
    }

    /// Switches to the scene registered as `name`. Returns `false` if there is no such
    /// scene or if it failed to construct, in which case the menu is shown.
    pub fn select(&mut self, name: &str) -> bool {
        match self.menu.position(name) {
            Some(index) => self.select_index(index),
            None => {
                warn!("Scene '{}' is not registered.", name);
                false
            }
        }
    }

    fn select_index(&mut self, index: usize) -> bool {
        self.discard();

        match self.menu.create(index, &self.ctx) {
            Some(Ok(scene)) => {
                info!("Enters scene '{}'.", self.menu.name(index).unwrap_or_default());
                self.current = Some(Current { index, scene });
                true
            }
            Some(Err(err)) => {
                error!(
                    "Failed to create scene '{}': {}",
                    self.menu.name(index).unwrap_or_default(),
                    err
                );
                false
            }
            None => false,
        }
    }

    /// Drops the running scene and shows the menu again.
    pub fn back(&mut self) {
        if self.current.is_some() {
            self.discard();
            info!("Returns to menu.");
        }
    }

    fn discard(&mut self) {
        if let Some(current) = self.current.take() {
            drop(current);
            self.ctx.device.reset_render_state();
        }
    }

    /// Runs one frame of the current scene: input, update, render and UI. Transitions
    /// requested during the frame are applied at its end.
    ///
    /// A scene whose callback fails is dropped and the menu takes over.
    pub fn frame(&mut self, input: &Input, ui: &mut dyn Ui, dt: f32) {
        let result = match self.current {
            Some(ref mut current) => {
                if ui.button(BACK_LABEL) {
                    self.back = true;
                }

                Gallery::run(current.scene.as_mut(), input, ui, dt)
            }
            None => Gallery::run(&mut self.menu, input, ui, dt),
        };

        if let Err(err) = result {
            error!(
                "Scene '{}' failed: {}",
                self.current_name().unwrap_or("menu"),
                err
            );

            self.back = true;
        }

        if self.back {
            self.back = false;
            self.back();
        } else if self.current.is_none() {
            if let Some(index) = self.menu.take_selection() {
                self.select_index(index);
            }
        }
    }

    fn run(scene: &mut dyn Scene, input: &Input, ui: &mut dyn Ui, dt: f32) -> Result<()> {
        scene.process_input(input, dt)?;
        scene.on_update(dt)?;
        scene.on_render()?;
        scene.on_ui(ui)
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.current = None;
    }
}

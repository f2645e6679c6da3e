use super::{Scene, SceneContext, Ui};
use crate::errors::Result;

/// Scenes that can be registered by type.
pub trait SceneFactory: Scene + Sized + 'static {
    fn create(ctx: &SceneContext) -> Result<Self>;
}

type FactoryFn = Box<dyn Fn(&SceneContext) -> Result<Box<dyn Scene>>>;

/// The registry of scenes, which is also the scene drawn when nothing else runs.
///
/// Entries are listed in registration order. Clicking one records a selection that the
/// gallery picks up at the end of the frame.
#[derive(Default)]
pub struct SceneMenu {
    entries: Vec<(String, FactoryFn)>,
    selection: Option<usize>,
}

impl SceneMenu {
    pub fn new() -> Self {
        SceneMenu::default()
    }

    /// Registers the scene type `T` under `name`.
    pub fn register<T: SceneFactory>(&mut self, name: &str) -> &mut Self {
        self.register_with(name, T::create)
    }

    /// Registers a closure that constructs a scene under `name`.
    pub fn register_with<T, F>(&mut self, name: &str, func: F) -> &mut Self
    where
        T: Scene + 'static,
        F: Fn(&SceneContext) -> Result<T> + 'static,
    {
        info!("Registers scene '{}'.", name);

        let factory: FactoryFn = Box::new(move |ctx: &SceneContext| {
            let scene = func(ctx)?;
            Ok(Box::new(scene) as Box<dyn Scene>)
        });

        self.entries.push((name.to_owned(), factory));
        self
    }

    /// Names of the registered scenes, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|v| v.0.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|v| v.0 == name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|v| v.0.as_str())
    }

    /// Takes the entry picked in the UI, if any.
    pub fn take_selection(&mut self) -> Option<usize> {
        self.selection.take()
    }

    pub(crate) fn create(&self, index: usize, ctx: &SceneContext) -> Option<Result<Box<dyn Scene>>> {
        self.entries.get(index).map(|v| (v.1)(ctx))
    }
}

impl Scene for SceneMenu {
    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        for (i, (name, _)) in self.entries.iter().enumerate() {
            if ui.button(name) && self.selection.is_none() {
                self.selection = Some(i);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Empty;

    impl Scene for Empty {}

    impl SceneFactory for Empty {
        fn create(_: &SceneContext) -> Result<Self> {
            Ok(Empty)
        }
    }

    #[test]
    fn registration_order() {
        let mut menu = SceneMenu::new();
        menu.register::<Empty>("Clear Color")
            .register_with("Texture 2D", |_| Ok(Empty))
            .register::<Empty>("Batching");

        let names: Vec<_> = menu.names().collect();
        assert_eq!(names, ["Clear Color", "Texture 2D", "Batching"]);
        assert_eq!(menu.position("Batching"), Some(2));
        assert_eq!(menu.position("Nope"), None);
    }
}

extern crate env_logger;
#[macro_use]
extern crate failure;
extern crate glsandbox;

use std::cell::RefCell;
use std::rc::Rc;

use glsandbox::errors::Result;
use glsandbox::prelude::*;
use glsandbox::video::backends::headless::{HeadlessState, HeadlessVisitor};

type Journal = Rc<RefCell<Vec<String>>>;

struct Probe {
    name: &'static str,
    journal: Journal,
    fail_update: bool,
    device: Rc<Device>,
}

impl Scene for Probe {
    fn on_update(&mut self, _: f32) -> Result<()> {
        self.journal.borrow_mut().push(format!("update {}", self.name));
        if self.fail_update {
            bail!("{} gave up", self.name);
        }

        Ok(())
    }

    fn on_render(&mut self) -> Result<()> {
        self.device.set_capability(Capability::DepthTest, true);
        self.device.set_capability(Capability::StencilTest, true);
        Ok(())
    }

    fn on_ui(&mut self, ui: &mut dyn Ui) -> Result<()> {
        ui.text(self.name);
        Ok(())
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.journal.borrow_mut().push(format!("drop {}", self.name));
    }
}

/// Clicks the button labelled `click`, once.
#[derive(Default)]
struct ScriptedUi {
    click: Option<String>,
    buttons: Vec<String>,
}

impl ScriptedUi {
    fn clicking(label: &str) -> Self {
        ScriptedUi {
            click: Some(label.to_owned()),
            buttons: Vec::new(),
        }
    }
}

impl Ui for ScriptedUi {
    fn text(&mut self, _: &str) {}

    fn button(&mut self, label: &str) -> bool {
        self.buttons.push(label.to_owned());
        if self.click.as_ref().map_or(false, |v| v == label) {
            self.click = None;
            return true;
        }

        false
    }

    fn checkbox(&mut self, _: &str, _: &mut bool) -> bool {
        false
    }

    fn slider_f32(&mut self, _: &str, _: &mut f32, _: f32, _: f32) -> bool {
        false
    }

    fn color_edit4(&mut self, _: &str, _: &mut [f32; 4]) -> bool {
        false
    }
}

fn gallery() -> (Gallery, Journal, Rc<RefCell<HeadlessState>>) {
    let _ = env_logger::try_init();
    let visitor = HeadlessVisitor::new();
    let state = visitor.state();
    let device = Device::new(Box::new(visitor));
    let journal = Journal::default();

    let mut menu = SceneMenu::new();
    for &(name, fail_update) in &[("A", false), ("B", false), ("Flaky", true)] {
        let journal = journal.clone();
        menu.register_with(name, move |ctx: &SceneContext| {
            journal.borrow_mut().push(format!("create {}", name));
            Ok(Probe {
                name,
                journal: journal.clone(),
                fail_update,
                device: ctx.device.clone(),
            })
        });
    }

    let journal_of_broken = journal.clone();
    menu.register_with("Broken", move |_: &SceneContext| -> Result<Probe> {
        journal_of_broken.borrow_mut().push("create Broken".to_owned());
        Err(format_err!("missing assets"))
    });

    let ctx = SceneContext::new(device, "assets");
    (Gallery::new(ctx, menu), journal, state)
}

#[test]
fn starts_with_menu() {
    let (gallery, journal, _) = gallery();
    assert!(gallery.is_menu_current());
    assert_eq!(gallery.current_name(), None);

    let names: Vec<_> = gallery.menu().names().collect();
    assert_eq!(names, ["A", "B", "Flaky", "Broken"]);
    assert!(journal.borrow().is_empty());
}

#[test]
fn select_and_back() {
    let (mut gallery, journal, _) = gallery();
    let menu = gallery.menu() as *const SceneMenu;

    assert!(gallery.select("A"));
    assert_eq!(gallery.current_name(), Some("A"));

    gallery.back();
    assert!(gallery.is_menu_current());
    assert_eq!(gallery.menu() as *const SceneMenu, menu);
    assert_eq!(*journal.borrow(), ["create A", "drop A"]);

    // Going back from the menu does nothing.
    gallery.back();
    assert_eq!(journal.borrow().len(), 2);
}

#[test]
fn select_drops_previous_first() {
    let (mut gallery, journal, _) = gallery();

    assert!(gallery.select("A"));
    assert!(gallery.select("B"));
    assert_eq!(gallery.current_name(), Some("B"));
    assert_eq!(*journal.borrow(), ["create A", "drop A", "create B"]);

    drop(gallery);
    assert_eq!(journal.borrow().last().map(|v| v.as_str()), Some("drop B"));
}

#[test]
fn failed_construction_shows_menu() {
    let (mut gallery, journal, _) = gallery();

    assert!(gallery.select("A"));
    assert!(!gallery.select("Broken"));
    assert!(gallery.is_menu_current());
    assert_eq!(*journal.borrow(), ["create A", "drop A", "create Broken"]);

    assert!(!gallery.select("Unknown"));
    assert!(gallery.is_menu_current());
}

#[test]
fn frame() {
    let (mut gallery, journal, state) = gallery();
    let input = Input::new();

    let mut ui = ScriptedUi::clicking("B");
    gallery.frame(&input, &mut ui, 0.016);
    assert_eq!(ui.buttons, ["A", "B", "Flaky", "Broken"]);
    assert_eq!(gallery.current_name(), Some("B"));

    let mut ui = ScriptedUi::default();
    gallery.frame(&input, &mut ui, 0.016);
    assert_eq!(ui.buttons, ["<-"]);
    assert_eq!(gallery.current_name(), Some("B"));
    assert!(!state.borrow().capabilities.is_empty());

    let mut ui = ScriptedUi::clicking("<-");
    gallery.frame(&input, &mut ui, 0.016);
    assert!(gallery.is_menu_current());
    assert!(state.borrow().capabilities.is_empty());

    assert_eq!(
        *journal.borrow(),
        ["create B", "update B", "update B", "drop B"]
    );
}

#[test]
fn failing_scene_returns_to_menu() {
    let (mut gallery, journal, _) = gallery();
    let input = Input::new();

    assert!(gallery.select("Flaky"));
    gallery.frame(&input, &mut ScriptedUi::default(), 0.016);

    assert!(gallery.is_menu_current());
    assert_eq!(*journal.borrow(), ["create Flaky", "update Flaky", "drop Flaky"]);
}

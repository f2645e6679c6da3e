use glsandbox::prelude::*;
use glsandbox::scene::gallery::BACK_LABEL;

/// Per-frame navigation requests read from the keyboard.
#[derive(Debug, Default, Copy, Clone)]
struct Actions {
    previous: bool,
    next: bool,
    activate: bool,
    back: bool,
    /// Direction and amount of slider adjustment, scaled by the frame time.
    adjust: f32,
}

/// An immediate-mode `Ui` driven by the keyboard.
///
/// Widgets are focusable in the order they are drawn. Up and Down move the focus,
/// Enter activates the focused button or checkbox, Left and Right drag the focused
/// slider, and Backspace clicks the back button wherever it is. The focused widget is
/// described by `title`, which the host shows in the window title.
pub struct KeyboardUi {
    actions: Actions,
    focus: usize,
    cursor: usize,
    focused: Option<String>,
    texts: Vec<String>,
}

impl KeyboardUi {
    pub fn new() -> Self {
        KeyboardUi {
            actions: Actions::default(),
            focus: 0,
            cursor: 0,
            focused: None,
            texts: Vec::new(),
        }
    }

    /// Starts a new frame.
    pub fn begin(&mut self, input: &Input, dt: f32) {
        let mut adjust = 0.0;
        if input.is_key_down(Key::Left) {
            adjust -= dt;
        }

        if input.is_key_down(Key::Right) {
            adjust += dt;
        }

        if input.is_key_down(Key::LShift) {
            adjust *= 4.0;
        }

        self.actions = Actions {
            previous: input.is_key_press(Key::Up),
            next: input.is_key_press(Key::Down),
            activate: input.is_key_press(Key::Return),
            back: input.is_key_press(Key::Back),
            adjust,
        };

        self.cursor = 0;
        self.focused = None;
        self.texts.clear();
    }

    /// Ends the frame and moves the focus for the next one.
    pub fn end(&mut self) {
        if self.cursor == 0 {
            self.focus = 0;
            return;
        }

        if self.actions.previous {
            self.focus = (self.focus + self.cursor - 1) % self.cursor;
        } else if self.actions.next {
            self.focus = (self.focus + 1) % self.cursor;
        } else if self.focus >= self.cursor {
            self.focus = self.cursor - 1;
        }
    }

    /// Moves the focus back to the first widget.
    pub fn reset_focus(&mut self) {
        self.focus = 0;
    }

    /// Description of the focused widget as of the last frame.
    pub fn title(&self) -> &str {
        self.focused.as_ref().map(|v| v.as_str()).unwrap_or("")
    }

    /// Texts drawn during the last frame.
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    fn next_widget(&mut self) -> bool {
        let focused = self.cursor == self.focus;
        self.cursor += 1;
        focused
    }
}

impl Ui for KeyboardUi {
    fn text(&mut self, text: &str) {
        self.texts.push(text.to_owned());
    }

    fn button(&mut self, label: &str) -> bool {
        let focused = self.next_widget();
        if focused {
            self.focused = Some(format!("[{}]", label));
        }

        (focused && self.actions.activate) || (label == BACK_LABEL && self.actions.back)
    }

    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        let focused = self.next_widget();
        let changed = focused && self.actions.activate;
        if changed {
            *value = !*value;
        }

        if focused {
            let mark = if *value { "x" } else { " " };
            self.focused = Some(format!("[{}] {}", mark, label));
        }

        changed
    }

    fn slider_f32(&mut self, label: &str, value: &mut f32, min: f32, max: f32) -> bool {
        let focused = self.next_widget();
        let mut changed = false;

        if focused {
            if self.actions.adjust != 0.0 {
                let v = (*value + self.actions.adjust * (max - min) * 0.25).max(min).min(max);
                changed = v != *value;
                *value = v;
            }

            self.focused = Some(format!("{} < {:.3} >", label, value));
        }

        changed
    }

    fn color_edit4(&mut self, label: &str, color: &mut [f32; 4]) -> bool {
        let mut changed = false;
        for (channel, v) in ["r", "g", "b", "a"].iter().zip(color.iter_mut()) {
            changed |= self.slider_f32(&format!("{}.{}", label, channel), v, 0.0, 1.0);
        }

        changed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn frame<F: FnMut(&mut KeyboardUi)>(ui: &mut KeyboardUi, input: &Input, mut func: F) {
        ui.begin(input, 0.1);
        func(ui);
        ui.end();
    }

    #[test]
    fn focus_wraps() {
        let mut ui = KeyboardUi::new();
        let mut input = Input::new();
        input.on_key_pressed(Key::Up);

        frame(&mut ui, &input, |ui| {
            ui.button("a");
            ui.button("b");
            ui.button("c");
        });

        input.advance();
        frame(&mut ui, &input, |ui| {
            ui.button("a");
            ui.button("b");
            ui.button("c");
        });

        assert_eq!(ui.title(), "[c]");
    }

    #[test]
    fn activate_and_back() {
        let mut ui = KeyboardUi::new();
        let mut input = Input::new();
        input.on_key_pressed(Key::Return);
        input.on_key_pressed(Key::Back);

        ui.begin(&input, 0.1);
        assert!(ui.button("first"));
        assert!(!ui.button("second"));
        assert!(ui.button(BACK_LABEL));
        ui.end();
    }

    #[test]
    fn slider_is_clamped() {
        let mut ui = KeyboardUi::new();
        let mut input = Input::new();
        input.on_key_pressed(Key::Right);

        let mut v = 0.9;
        for _ in 0..10 {
            frame(&mut ui, &input, |ui| {
                ui.slider_f32("v", &mut v, 0.0, 1.0);
            });
        }

        assert_eq!(v, 1.0);
    }
}

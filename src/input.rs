//! A per-frame snapshot of keyboard and mouse state.

use std::collections::HashSet;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub enum Key {
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Key0,

    A,
    D,
    E,
    Q,
    S,
    W,

    Escape,
    Space,
    Return,
    /// The Backspace key, right over Enter.
    Back,
    Tab,
    LShift,
    LControl,

    Left,
    Up,
    Right,
    Down,
}

/// Keyboard and mouse state of the current frame.
///
/// The host feeds events through the `on_*` methods and calls `advance` once the frame
/// has been processed, which forgets the per-frame deltas.
#[derive(Debug, Clone, Default)]
pub struct Input {
    downs: HashSet<Key>,
    presses: HashSet<Key>,
    releases: HashSet<Key>,
    mouse_movement: (f32, f32),
    mouse_scroll: f32,
}

impl Input {
    pub fn new() -> Self {
        Input::default()
    }

    /// Checks if a key is currently held down.
    #[inline]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.downs.contains(&key)
    }

    /// Checks if a key has been pressed down during the last frame.
    #[inline]
    pub fn is_key_press(&self, key: Key) -> bool {
        self.presses.contains(&key)
    }

    /// Checks if a key has been released during the last frame.
    #[inline]
    pub fn is_key_release(&self, key: Key) -> bool {
        self.releases.contains(&key)
    }

    /// Mouse movement in pixels since the last frame.
    #[inline]
    pub fn mouse_movement(&self) -> (f32, f32) {
        self.mouse_movement
    }

    /// Scrolled lines since the last frame.
    #[inline]
    pub fn mouse_scroll(&self) -> f32 {
        self.mouse_scroll
    }

    pub fn on_key_pressed(&mut self, key: Key) {
        if self.downs.insert(key) {
            self.presses.insert(key);
        }
    }

    pub fn on_key_released(&mut self, key: Key) {
        if self.downs.remove(&key) {
            self.releases.insert(key);
        }
    }

    pub fn on_mouse_moved(&mut self, dx: f32, dy: f32) {
        self.mouse_movement.0 += dx;
        self.mouse_movement.1 += dy;
    }

    pub fn on_mouse_wheel(&mut self, lines: f32) {
        self.mouse_scroll += lines;
    }

    /// Releases every held key, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        let downs: Vec<_> = self.downs.iter().cloned().collect();
        for key in downs {
            self.on_key_released(key);
        }
    }

    /// Forgets the per-frame state.
    pub fn advance(&mut self) {
        self.presses.clear();
        self.releases.clear();
        self.mouse_movement = (0.0, 0.0);
        self.mouse_scroll = 0.0;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut input = Input::new();
        input.on_key_pressed(Key::W);
        input.on_key_pressed(Key::W);
        assert!(input.is_key_down(Key::W));
        assert!(input.is_key_press(Key::W));

        input.advance();
        assert!(input.is_key_down(Key::W));
        assert!(!input.is_key_press(Key::W));

        input.on_key_released(Key::W);
        assert!(!input.is_key_down(Key::W));
        assert!(input.is_key_release(Key::W));
    }

    #[test]
    fn mouse() {
        let mut input = Input::new();
        input.on_mouse_moved(1.0, 2.0);
        input.on_mouse_moved(1.0, -1.0);
        input.on_mouse_wheel(0.5);
        assert_eq!(input.mouse_movement(), (2.0, 1.0));
        assert_eq!(input.mouse_scroll(), 0.5);

        input.advance();
        assert_eq!(input.mouse_movement(), (0.0, 0.0));
    }
}

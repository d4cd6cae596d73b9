//! Keyboard state

/// Held direction keys, fed from keydown/keyup events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Handle a keydown; returns true if the key is one we track
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    /// Handle a keyup; returns true if the key is one we track
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    /// Release everything (window blur, replay)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Net horizontal direction: -1, 0 or 1
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    fn set_key(&mut self, key: &str, held: bool) -> bool {
        match key {
            "ArrowLeft" => self.left = held,
            "ArrowRight" => self.right = held,
            _ => return false,
        }
        true
    }
}

/// Keys the game reacts to. Hosts map their device codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Either control key.
    Ctrl,
    /// Either alt key.
    Alt,
    /// A printable key, lowercase.
    Char(char),
    /// Anything else, by host key code.
    Other(u32),
}

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key: Key },
    KeyUp { key: Key },
}

impl InputEvent {
    /// The key and whether it went down.
    pub fn key(&self) -> (Key, bool) {
        match *self {
            InputEvent::KeyDown { key } => (key, true),
            InputEvent::KeyUp { key } => (key, false),
        }
    }
}

/// Held-down state of the gameplay keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerInput {
    pub moving_up: bool,
    pub moving_down: bool,
    pub moving_left: bool,
    pub moving_right: bool,
    pub jumping: bool,
    pub shooting: bool,
}

impl PlayerInput {
    /// Track a key press or release. Returns false for keys that are not
    /// gameplay keys.
    pub fn apply(&mut self, key: Key, pressed: bool) -> bool {
        let flag = match key {
            Key::Up => &mut self.moving_up,
            Key::Down => &mut self.moving_down,
            Key::Left => &mut self.moving_left,
            Key::Right => &mut self.moving_right,
            Key::Ctrl => &mut self.jumping,
            Key::Alt => &mut self.shooting,
            Key::Char(_) | Key::Other(_) => return false,
        };
        *flag = pressed;
        true
    }

    /// -1 for left, +1 for right, 0 for neither or both.
    pub fn horizontal(&self) -> i32 {
        self.moving_right as i32 - self.moving_left as i32
    }
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them each frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

//! Shared record of which logical controls are currently held.
//!
//! Input handlers write it on press/release edges; the simulation samples it
//! once per tick.  Nothing is queued: the last write wins.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Jump,
    Throw,
    Confirm,
}

/// Plain snapshot of every control flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub throw: bool,
    pub confirm: bool,
}

impl Controls {
    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Jump => self.jump,
            Control::Throw => self.throw,
            Control::Confirm => self.confirm,
        }
    }

    fn slot(&mut self, control: Control) -> &mut bool {
        match control {
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Jump => &mut self.jump,
            Control::Throw => &mut self.throw,
            Control::Confirm => &mut self.confirm,
        }
    }

    /// True while any control that counts as player activity is held.
    pub fn any_movement(&self) -> bool {
        self.left || self.right || self.jump
    }
}

/// Cheaply cloneable handle; every clone sees the same flags.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    flags: Rc<Cell<Controls>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, control: Control, pressed: bool) {
        let mut flags = self.flags.get();
        *flags.slot(control) = pressed;
        self.flags.set(flags);
    }

    pub fn press(&self, control: Control) {
        self.set(control, true);
    }

    pub fn release(&self, control: Control) {
        self.set(control, false);
    }

    pub fn release_all(&self) {
        self.flags.set(Controls::default());
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        self.flags.get().get(control)
    }

    pub fn snapshot(&self) -> Controls {
        self.flags.get()
    }
}

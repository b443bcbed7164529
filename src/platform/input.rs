//! Input adapters
//!
//! Two device flavours feed the same simulation:
//! - pointer/touch: the ship steps toward the pointer, a tap fires
//! - keyboard: left/right, fire, fire-mode cycle, plus menu keys
//!
//! Both are sampled once per tick into an immutable `TickInput`.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::game::{Command, GamePhase};
use crate::sim::{Steer, TickInput};

/// Pointer/touch state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Field position while the pointer is down, `None` when released
    pub position: Option<Vec2>,
    /// A new press landed this tick
    pub tapped: bool,
}

impl PointerState {
    /// Map window pixels to field units. `y_up` flips toolkits whose origin
    /// is the bottom-left corner.
    pub fn field_position(window_pos: Vec2, window_size: Vec2, y_up: bool) -> Vec2 {
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            return window_pos;
        }
        let scaled = window_pos / window_size * Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);
        if y_up {
            Vec2::new(scaled.x, FIELD_HEIGHT - scaled.y)
        } else {
            scaled
        }
    }

    pub fn press(&mut self, pos: Vec2) {
        self.position = Some(pos);
        self.tapped = true;
    }

    pub fn drag(&mut self, pos: Vec2) {
        if self.position.is_some() {
            self.position = Some(pos);
        }
    }

    pub fn release(&mut self) {
        self.position = None;
    }

    /// Forget one-shot state after the tick consumed it
    pub fn end_tick(&mut self) {
        self.tapped = false;
    }
}

impl From<&PointerState> for TickInput {
    fn from(pointer: &PointerState) -> Self {
        TickInput {
            steer: pointer.position.map(Steer::Toward).unwrap_or_default(),
            fire: pointer.tapped,
            cycle_fire_mode: false,
        }
    }
}

/// Logical keys, independent of the physical layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    CycleFireMode,
    Pause,
    Restart,
    Menu,
    Quit,
}

/// Held keys plus keys pressed since the last tick
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
}

impl KeyState {
    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Menu/pause commands for the current phase
    pub fn commands(&self, phase: GamePhase) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.was_pressed(Key::Quit) {
            commands.push(Command::Quit);
        }
        match phase {
            GamePhase::Menu if self.was_pressed(Key::Fire) => commands.push(Command::Start),
            GamePhase::Playing | GamePhase::Paused if self.was_pressed(Key::Pause) => {
                commands.push(Command::Pause)
            }
            GamePhase::GameOver => {
                if self.was_pressed(Key::Restart) || self.was_pressed(Key::Fire) {
                    commands.push(Command::Restart);
                } else if self.was_pressed(Key::Menu) {
                    commands.push(Command::Menu);
                }
            }
            _ => {}
        }
        commands
    }

    /// Forget one-shot presses after the tick consumed them
    pub fn end_tick(&mut self) {
        self.pressed.clear();
    }
}

impl From<&KeyState> for TickInput {
    fn from(keys: &KeyState) -> Self {
        let mut direction = 0.0;
        if keys.is_held(Key::Left) {
            direction -= 1.0;
        }
        if keys.is_held(Key::Right) {
            direction += 1.0;
        }
        TickInput {
            steer: if direction == 0.0 {
                Steer::Hold
            } else {
                Steer::Axis(direction)
            },
            fire: keys.is_held(Key::Fire),
            cycle_fire_mode: keys.was_pressed(Key::CycleFireMode),
        }
    }
}

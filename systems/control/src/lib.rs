#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn controller that gates player input while motion is in flight.
//!
//! The controller is the only component that decides whether an input event
//! becomes a command. It tracks how many tile motions the presentation layer
//! still has to animate and drops directional input outright while any remain,
//! so animation timing never leaks into game logic.

use twenty48_core::{Command, Direction, Event};

/// Logical inputs a presentation layer can forward to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerInput {
    /// A directional move request.
    Move(Direction),
    /// A request to restart the session.
    Retry,
}

/// Observable lifecycle state of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlState {
    /// Directional input is accepted.
    Idle,
    /// Motion is in flight; directional input is dropped, not queued.
    Resolving,
    /// The session ended; only a retry is meaningful.
    GameOver,
}

/// Pure system that turns player input into commands and tracks turn phase.
#[derive(Debug)]
pub struct Control {
    state: ControlState,
    in_flight: usize,
    terminal_pending: bool,
}

impl Control {
    /// Creates a controller that accepts input immediately.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ControlState::Idle,
            in_flight: 0,
            terminal_pending: false,
        }
    }

    /// Current lifecycle state of the controller.
    #[must_use]
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Number of tile motions the presentation layer has yet to finish.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Translates a player input into commands according to the current state.
    ///
    /// Directional input is accepted only while idle with no motion in
    /// flight; otherwise it is dropped. A retry is honoured in every state:
    /// the session resets outright, abandoning any in-flight animation.
    pub fn handle_input(&mut self, input: PlayerInput, out: &mut Vec<Command>) {
        match input {
            PlayerInput::Move(direction) => {
                if self.state == ControlState::Idle && self.in_flight == 0 {
                    out.push(Command::Move { direction });
                }
            }
            PlayerInput::Retry => out.push(Command::Reset),
        }
    }

    /// Consumes world events to track motion counts and terminal transitions.
    pub fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TileMoved { .. } | Event::TilesMerged { .. } | Event::TileSpawned { .. } => {
                    self.in_flight = self.in_flight.saturating_add(1);
                    if self.state == ControlState::Idle {
                        self.state = ControlState::Resolving;
                    }
                }
                Event::GameEnded => self.terminal_pending = true,
                Event::SessionReset => {
                    self.state = ControlState::Idle;
                    self.in_flight = 0;
                    self.terminal_pending = false;
                }
                _ => {}
            }
        }
        self.settle();
    }

    /// Signals that the presentation layer finished animating one motion.
    pub fn motion_complete(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.settle();
    }

    fn settle(&mut self) {
        if self.in_flight > 0 {
            return;
        }
        if self.terminal_pending {
            self.state = ControlState::GameOver;
            self.terminal_pending = false;
        } else if self.state == ControlState::Resolving {
            self.state = ControlState::Idle;
        }
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::new()
    }
}

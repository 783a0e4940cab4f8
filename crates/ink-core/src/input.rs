//! Input events delivered to the builder
//!
//! Edge detection happens here, on the input side. The state machine only
//! ever sees explicit press/hold/release events.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One input event. Pointer samples are `None` when the pointer source had
/// no pose this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Place button went down
    PlacePressed(Option<Vec3>),
    /// Place button still down
    PlaceHeld(Option<Vec3>),
    /// Place button went up
    PlaceReleased(Option<Vec3>),
    /// The press-hold cycle was interrupted (e.g. placement disabled mid-hold)
    PlaceCancelled,
    /// Undo button went down
    Undo,
}

/// Button edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Held,
    Released,
}

/// Turns a polled button level into edges
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdge {
    down: bool,
}

impl ButtonEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's level; `None` while the button stays up
    pub fn update(&mut self, down: bool) -> Option<Edge> {
        let edge = match (self.down, down) {
            (false, true) => Some(Edge::Pressed),
            (true, true) => Some(Edge::Held),
            (true, false) => Some(Edge::Released),
            (false, false) => None,
        };
        self.down = down;
        edge
    }

    pub fn is_down(&self) -> bool {
        self.down
    }
}

/// Adapter for input sources that can only be polled per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSampler {
    place: ButtonEdge,
    undo: ButtonEdge,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert one tick of raw button levels into events.
    ///
    /// Undo fires once per press regardless of how long it is held.
    pub fn sample(&mut self, place_down: bool, undo_down: bool, pointer: Option<Vec3>) -> Vec<InputEvent> {
        let mut events = Vec::new();

        match self.place.update(place_down) {
            Some(Edge::Pressed) => events.push(InputEvent::PlacePressed(pointer)),
            Some(Edge::Held) => events.push(InputEvent::PlaceHeld(pointer)),
            Some(Edge::Released) => events.push(InputEvent::PlaceReleased(pointer)),
            None => {}
        }

        if self.undo.update(undo_down) == Some(Edge::Pressed) {
            events.push(InputEvent::Undo);
        }

        events
    }
}

use bevy::prelude::*;
use orrery_core::BodyId;
use std::collections::VecDeque;

/// Input coming from the UI between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    SetSpeed { body: BodyId, value: f64 },
    TogglePause,
}

/// FIFO of control events, drained once at the start of every tick
#[derive(Resource, Debug, Default)]
pub struct ControlQueue {
    pending: VecDeque<ControlEvent>,
}

impl ControlQueue {
    pub fn push(&mut self, event: ControlEvent) {
        self.pending.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = ControlEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

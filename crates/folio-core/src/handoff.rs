//! Typed signals passed between section controllers.
//!
//! Controllers publish into a [`SignalBus`]; the choreographer drains it and
//! delivers each signal to its recipient after the scroll pass.

use glam::Vec2;
use std::collections::VecDeque;

/// Blob state at the moment Skills finishes with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobHandoff {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub rotation: f32,
}

impl BlobHandoff {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.center_y)
    }

    pub fn is_finite(&self) -> bool {
        [
            self.center_x,
            self.center_y,
            self.width,
            self.height,
            self.scale,
            self.rotation,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recipient {
    Skills,
    Projects,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlobSignal {
    /// Skills finished its reverse morph scrolling down.
    HandoffFinished(BlobHandoff),
    /// Skills re-entered its reverse morph scrolling up.
    Reset,
    /// Projects gave the blob back to Skills.
    Takeover,
}

impl BlobSignal {
    pub fn recipient(&self) -> Recipient {
        match self {
            BlobSignal::HandoffFinished(_) | BlobSignal::Reset => Recipient::Projects,
            BlobSignal::Takeover => Recipient::Skills,
        }
    }
}

/// FIFO of pending signals.
#[derive(Debug, Default)]
pub struct SignalBus {
    queue: VecDeque<BlobSignal>,
    published: u64,
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, signal: BlobSignal) {
        log::debug!("[handoff] publish {:?}", signal);
        self.published += 1;
        self.queue.push_back(signal);
    }

    pub fn drain(&mut self) -> Vec<BlobSignal> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total signals ever published.
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Drop anything pending, e.g. across a rebuild.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

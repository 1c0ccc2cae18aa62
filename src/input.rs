//! Per-tick input as seen by the simulation.

use std::collections::HashMap;
use std::hash::Hash;

/// A key counts as held if its last press/repeat event arrived within this
/// many frames. Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so a window of 6 frames (≈120 ms at 50
/// ticks/s) is refreshed before expiry.
pub const HOLD_WINDOW: u64 = 6;

/// Keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Speed boost modifier.
    pub boost: bool,
}

impl HeldKeys {
    /// Sum of the unit deltas of every held direction key. Opposite keys
    /// cancel out.
    pub fn delta(&self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= 1;
        }
        if self.down {
            dy += 1;
        }
        if self.left {
            dx -= 1;
        }
        if self.right {
            dx += 1;
        }
        (dx, dy)
    }
}

/// Discrete key-press events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    FireBeam,
    EnterEnhanced,
    TriggerPulse,
    TriggerAreaEffect,
}

#[derive(Clone, Debug, Default)]
pub struct InputSnapshot {
    pub held: HeldKeys,
    /// Presses since the previous tick, oldest first.
    pub actions: Vec<Action>,
}

impl InputSnapshot {
    pub fn idle() -> Self {
        InputSnapshot::default()
    }

    pub fn with_actions(actions: &[Action]) -> Self {
        InputSnapshot {
            held: HeldKeys::default(),
            actions: actions.to_vec(),
        }
    }

    pub fn holding(held: HeldKeys) -> Self {
        InputSnapshot {
            held,
            actions: Vec::new(),
        }
    }
}

/// Frame at which each key was last seen (press or repeat).
///
/// Classic terminals report OS auto-repeat as further presses, so a press
/// only counts as new when the key is not already held.
#[derive(Clone, Debug)]
pub struct KeyFrames<K> {
    last_seen: HashMap<K, u64>,
}

impl<K: Copy + Eq + Hash> Default for KeyFrames<K> {
    fn default() -> Self {
        KeyFrames {
            last_seen: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> KeyFrames<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    pub fn is_held(&self, key: &K, frame: u64) -> bool {
        self.last_seen
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Records a press on `frame`. Returns whether it is a fresh press rather
    /// than auto-repeat of a key still held.
    pub fn press(&mut self, key: K, frame: u64) -> bool {
        let fresh = !self.is_held(&key, frame);
        self.last_seen.insert(key, frame);
        fresh
    }

    /// Repeat event: keeps the key held without counting as a press.
    pub fn refresh(&mut self, key: K, frame: u64) {
        self.last_seen.insert(key, frame);
    }

    pub fn release(&mut self, key: &K) {
        self.last_seen.remove(key);
    }
}

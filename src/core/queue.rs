//! core/queue.rs
//! Which track plays next.
//!
//! Tracks are indices into the GUI's track list. The queue never sees paths,
//! so a rescan only needs `reset(len)`.
//!
//! - Sequential: neighbour in list order, no wrap-around.
//! - Shuffle: a shuffle bag. A random permutation of all indices consumed from
//!   the back; refilled and reshuffled once empty.
//! - Repeat: replay the same track when it ends.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Oldest history entries are dropped past this many.
const HISTORY_CAP: usize = 500;

/// User-facing playback modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayModes {
    pub shuffle: bool,
    pub repeat: bool,
    /// Start the next track automatically when one ends.
    pub auto_advance: bool,
}

impl Default for PlayModes {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: false,
            auto_advance: true,
        }
    }
}

pub struct PlayQueue<R = StdRng> {
    len: usize,
    current: Option<usize>,
    modes: PlayModes,
    bag: Vec<usize>,
    history: Vec<usize>,
    rng: R,
}

impl PlayQueue<StdRng> {
    pub fn new(modes: PlayModes) -> Self {
        Self::with_rng(modes, StdRng::from_entropy())
    }
}

impl<R: Rng> PlayQueue<R> {
    pub fn with_rng(modes: PlayModes, rng: R) -> Self {
        Self {
            len: 0,
            current: None,
            modes,
            bag: Vec::new(),
            history: Vec::new(),
            rng,
        }
    }

    /// New track list. Everything index-based is stale now.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.current = None;
        self.bag.clear();
        self.history.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn modes(&self) -> PlayModes {
        self.modes
    }

    /// Make `index` the current track. Out-of-range indices are ignored.
    pub fn set_current(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        if let Some(prev) = self.current {
            if prev != index {
                self.history.push(prev);
                if self.history.len() > HISTORY_CAP {
                    self.history.remove(0);
                }
            }
        }
        self.bag.retain(|&i| i != index);
        self.current = Some(index);
    }

    pub fn set_shuffle(&mut self, on: bool) {
        if on && !self.modes.shuffle {
            // Fresh permutation on the next pick.
            self.bag.clear();
        }
        self.modes.shuffle = on;
    }

    pub fn set_repeat(&mut self, on: bool) {
        self.modes.repeat = on;
    }

    pub fn set_auto_advance(&mut self, on: bool) {
        self.modes.auto_advance = on;
    }

    /// The track "Next" should play, or `None` to do nothing.
    /// Does not move the cursor; call `set_current` once playback starts.
    pub fn next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }

        if self.modes.shuffle {
            if self.bag.is_empty() {
                self.refill_bag();
            }
            return self.bag.pop();
        }

        match self.current {
            None => Some(0),
            Some(i) if i + 1 < self.len => Some(i + 1),
            Some(_) => None,
        }
    }

    /// The track "Previous" should play, or `None` to do nothing.
    ///
    /// In shuffle mode this steps back through history and moves the cursor
    /// itself, so the track being left is not pushed again. A following
    /// `set_current` with the same index is then a no-op.
    pub fn previous(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }

        if self.modes.shuffle {
            while let Some(i) = self.history.pop() {
                if i < self.len {
                    self.bag.retain(|&b| b != i);
                    self.current = Some(i);
                    return Some(i);
                }
            }
        }

        match self.current {
            None => Some(0),
            Some(0) => None,
            Some(i) => Some(i - 1),
        }
    }

    /// The current track finished on its own.
    pub fn on_track_ended(&mut self) -> Option<usize> {
        if self.modes.repeat {
            return self.current.filter(|&i| i < self.len);
        }
        if !self.modes.auto_advance {
            return None;
        }
        self.next()
    }

    fn refill_bag(&mut self) {
        self.bag = (0..self.len)
            .filter(|&i| self.len == 1 || Some(i) != self.current)
            .collect();
        self.bag.shuffle(&mut self.rng);
    }
}

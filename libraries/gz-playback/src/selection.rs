//! Next/previous track selection
//!
//! Pure index arithmetic over the full catalog. The filtered view never
//! affects which track plays next.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Flags that influence `next_index`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayMode {
    /// Uniform random selection
    pub shuffle: bool,
    /// Stay on the current track (takes precedence over shuffle)
    pub repeat_one: bool,
}

/// Catalog index of the next track
///
/// Shuffle redraws until the pick differs from `current`, so the same track
/// never plays twice in a row unless the catalog has one track.
pub fn next_index<R: Rng + ?Sized>(
    current: Option<usize>,
    len: usize,
    mode: PlayMode,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    if mode.repeat_one {
        if let Some(current) = current.filter(|&c| c < len) {
            return Some(current);
        }
    }

    if mode.shuffle {
        if len == 1 {
            return Some(0);
        }
        loop {
            let pick = rng.gen_range(0..len);
            if Some(pick) != current {
                return Some(pick);
            }
        }
    }

    Some(match current {
        Some(c) => (c + 1) % len,
        None => 0,
    })
}

/// Catalog index of the previous track (always sequential)
pub fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    Some(match current {
        Some(c) => (c % len + len - 1) % len,
        None => len - 1,
    })
}

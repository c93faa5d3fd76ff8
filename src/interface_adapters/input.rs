// Shared key-state table.
//
// Input sources flip individual bits as keys go down and up; the simulator
// copies the whole table once per tick so a single tick never sees a key
// change state halfway through.

use crate::domain::state::{Action, KeySnapshot};
use std::array;
use std::sync::atomic::{AtomicBool, Ordering};

/// Key-state table for both players, safe to share across tasks.
#[derive(Debug, Default)]
pub struct InputTable {
    bits: [[AtomicBool; Action::COUNT]; 2],
}

impl InputTable {
    pub fn new() -> InputTable {
        InputTable {
            bits: array::from_fn(|_| array::from_fn(|_| AtomicBool::new(false))),
        }
    }

    /// Records a key transition for one player's action.
    pub fn set(&self, player: usize, action: Action, pressed: bool) {
        self.bits[player][action as usize].store(pressed, Ordering::Relaxed);
    }

    /// Copies the table for one tick's worth of simulation.
    pub fn snapshot(&self) -> KeySnapshot {
        array::from_fn(|player| array::from_fn(|key| self.bits[player][key].load(Ordering::Relaxed)))
    }

    /// Releases every key of both players.
    pub fn clear(&self) {
        for row in &self.bits {
            for bit in row {
                bit.store(false, Ordering::Relaxed);
            }
        }
    }
}

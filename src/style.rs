//! Visual Parameter Tables
//!
//! Fixed tables for the "messy" card look. Rotation and delay are functions
//! of final position only, never of record content, so re-rendering a fixed
//! order is visually identical.

use serde::{Deserialize, Serialize};

/// Stagger unit for entrance animations, in seconds per position.
pub const STAGGER_UNIT_SECS: f64 = 0.1;

/// Neutral card background when a record has no color of its own.
pub const DEFAULT_CARD_COLOR: &str = "#ffffff";

/// Largest tilt magnitude a custom table may use, in degrees.
pub const MAX_ROTATION_DEGREES: f32 = 4.0;

const DEFAULT_TABLE: [f32; 6] = [-1.5, 1.0, -0.75, 2.0, -2.25, 1.5];

/// Fixed ordered sequence of small signed tilt angles, indexed by card
/// position modulo table length. Signs alternate so adjacent cards never
/// share an identical tilt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotationTable {
    angles: Vec<f32>,
}

impl RotationTable {
    /// Build a custom table. Rejects tables that would break the look:
    /// empty, tilts beyond [`MAX_ROTATION_DEGREES`], or equal adjacent
    /// entries (the wrap-around pair counts as adjacent, since indexing
    /// is modular).
    pub fn custom(angles: Vec<f32>) -> Result<Self, &'static str> {
        if angles.is_empty() {
            return Err("Rotation table must not be empty");
        }
        if angles.iter().any(|a| a.abs() > MAX_ROTATION_DEGREES) {
            return Err("Rotation angles must stay within +/-4 degrees");
        }
        if angles.len() > 1 {
            for i in 0..angles.len() {
                let next = (i + 1) % angles.len();
                if angles[i] == angles[next] {
                    return Err("Adjacent rotation angles must differ");
                }
            }
        }
        Ok(Self { angles })
    }

    /// Tilt angle in degrees for a card at the given display position.
    pub fn angle_for(&self, position: usize) -> f32 {
        self.angles[position % self.angles.len()]
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

impl Default for RotationTable {
    fn default() -> Self {
        Self {
            angles: DEFAULT_TABLE.to_vec(),
        }
    }
}

//! Review Presentation Engine - Single Entry Point
//!
//! CRITICAL: arrange MUST be an unbiased permutation. Never a filter,
//! never a sort-by-random-key.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use uuid::Uuid;

use crate::records::ReviewRecord;
use crate::style::{RotationTable, STAGGER_UNIT_SECS};
use crate::ENGINE_VERSION;

/// One review record paired with its randomized position and the visual
/// parameters derived from that position. A lightweight read-only view:
/// it never copies the record's text or image data.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayEntry<'a> {
    pub record: &'a ReviewRecord,
    pub position: usize,
    /// Tilt in degrees, from the engine's rotation table.
    pub rotation_angle: f32,
    /// Entrance animation delay in seconds.
    pub reveal_delay: f64,
}

impl DisplayEntry<'_> {
    /// Stable identifier for this entry's presentation lifetime, for the
    /// renderer to key list items on.
    pub fn display_key(&self) -> String {
        format!("{}-{}", self.record.name, self.position)
    }
}

/// Converts an unordered review collection into a display-ordered sequence
/// with position-derived visual variation. Stateless: each call owns its
/// copy of the reference list and its own random draws.
pub struct ReviewPresentationEngine {
    rotation: RotationTable,
    stagger_unit: f64,
}

impl ReviewPresentationEngine {
    pub fn new() -> Self {
        Self {
            rotation: RotationTable::default(),
            stagger_unit: STAGGER_UNIT_SECS,
        }
    }

    pub fn with_style(rotation: RotationTable, stagger_unit: f64) -> Self {
        Self {
            rotation,
            stagger_unit,
        }
    }

    /// Arrange records for one presentation cycle, drawing from the thread
    /// RNG. A new cycle may produce a different order.
    pub fn arrange<'a>(&self, records: &'a [ReviewRecord]) -> Vec<DisplayEntry<'a>> {
        self.arrange_with(records, &mut rand::thread_rng())
    }

    /// Arrange with a caller-supplied random source. Fixing the source fixes
    /// the permutation, and the derived visuals are pure in position, so the
    /// whole output is then reproducible.
    ///
    /// The input slice is never reordered; the shuffle permutes a copied
    /// list of references.
    pub fn arrange_with<'a, R: Rng>(
        &self,
        records: &'a [ReviewRecord],
        rng: &mut R,
    ) -> Vec<DisplayEntry<'a>> {
        let mut deck: Vec<&ReviewRecord> = records.iter().collect();

        // Fisher-Yates: last index down to 1, swap with a uniform draw
        // from [0, i]. Every one of the n! orderings is equally likely.
        for i in (1..deck.len()).rev() {
            let j = rng.gen_range(0..=i);
            deck.swap(i, j);
        }

        deck.into_iter()
            .enumerate()
            .map(|(position, record)| DisplayEntry {
                record,
                position,
                rotation_angle: self.rotation.angle_for(position),
                reveal_delay: position as f64 * self.stagger_unit,
            })
            .collect()
    }

    /// Arrange one full presentation session, wrapping the entries in a
    /// session manifest. `Some(seed)` produces a reproducible arrangement;
    /// `None` draws fresh randomness per session.
    pub fn arrange_session<'a>(
        &self,
        records: &'a [ReviewRecord],
        seed: Option<u64>,
    ) -> Arrangement<'a> {
        let entries = match seed {
            Some(s) => self.arrange_with(records, &mut StdRng::seed_from_u64(s)),
            None => self.arrange(records),
        };

        Arrangement {
            session_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            seed,
            entries,
        }
    }

    pub fn rotation(&self) -> &RotationTable {
        &self.rotation
    }
}

impl Default for ReviewPresentationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One presentation cycle's output: the shuffled entries plus session
/// metadata. Discarded after the cycle; never persisted by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct Arrangement<'a> {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub engine_version: String,
    pub seed: Option<u64>,
    pub entries: Vec<DisplayEntry<'a>>,
}

impl Arrangement<'_> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

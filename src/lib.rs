//! ReviewDeck Core - Review Presentation Engine
//!
//! # The Four Rules (Non-Negotiable)
//! 1. Shuffling Is A Permutation, Never A Filter
//! 2. Every Ordering Is Equally Likely
//! 3. Visual Variation Is A Function Of Position, Not Content
//! 4. Loading Validates, Rendering Falls Back

pub mod records;
pub mod validation;
pub mod style;
pub mod engine;

pub use records::{ReviewRecord, ImageRef, ReviewCollection, CollectionConfig, CollectionError};
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, ViolationSeverity};
pub use style::{RotationTable, STAGGER_UNIT_SECS, DEFAULT_CARD_COLOR};
pub use engine::{ReviewPresentationEngine, DisplayEntry, Arrangement};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MIN_COLLECTION_VERSION: &str = "1.0.0";

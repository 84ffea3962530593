use thiserror::Error;

/// Failures the sandpile core can report. Construction errors are fatal
/// and surface before any simulation work; bounds errors mark contract
/// violations on the public pile accessors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PileError {
    #[error("grid size must be at least 1, got {0}")]
    InvalidSize(u32),

    #[error("toppling threshold must be at least 1; a zero threshold never drains a cell")]
    InvalidThreshold,

    #[error("center weight must be a finite number")]
    InvalidWeight,

    #[error("coordinate ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: u32, y: u32, size: u32 },
}

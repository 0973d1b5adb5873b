use serde::Serialize;
use thiserror::Error;

/// Fatal build errors. Per-record problems are collected into a
/// [`BuildReport`] instead; anything surfacing through this enum aborts the
/// run for the affected scope.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The builders produced an inconsistent graph. This is a defect in the
    /// pipeline, not bad input data, so it is never downgraded to a report
    /// entry.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("{path}: {count} malformed records exceeds limit of {limit}")]
    TooManyMalformed {
        path: String,
        count: usize,
        limit: usize,
    },

    #[error("failed to read FASTA {path}: {reason}")]
    Fasta { path: String, reason: String },
}

/// Errors from the sequence store. An unknown name or an out-of-range
/// interval must surface as its own variant, never as an empty sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("unknown sequence name: {0}")]
    UnknownName(String),

    #[error("interval {start}..{end} out of range for {name} (len {len})")]
    OutOfRange {
        name: String,
        start: u64,
        end: u64,
        len: u64,
    },
}

/// A single input row that could not be parsed into its expected fields.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MalformedRecord {
    pub path: String,
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoundarySide {
    Start,
    End,
}

impl std::fmt::Display for BoundarySide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundarySide::Start => write!(f, "start"),
            BoundarySide::End => write!(f, "end"),
        }
    }
}

/// An alt locus the wirer had to skip, with the reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkippedLocus {
    /// The chromosome-sizes cross-reference never supplied a length, so no
    /// node can be created for the scaffold.
    UnresolvedAltLength { name: String },
    /// No backbone node ends (or starts) at the locus coordinate, so the
    /// bubble cannot be attached.
    UnresolvedBoundary {
        name: String,
        chrom: String,
        coord: u64,
        side: BoundarySide,
    },
}

impl SkippedLocus {
    pub fn locus_name(&self) -> &str {
        match self {
            SkippedLocus::UnresolvedAltLength { name } => name,
            SkippedLocus::UnresolvedBoundary { name, .. } => name,
        }
    }
}

impl std::fmt::Display for SkippedLocus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkippedLocus::UnresolvedAltLength { name } => {
                write!(f, "{name}: no length resolved from chromosome sizes")
            }
            SkippedLocus::UnresolvedBoundary {
                name,
                chrom,
                coord,
                side,
            } => {
                write!(f, "{name}: no backbone node at {chrom}:{coord} ({side})")
            }
        }
    }
}

/// Recoverable conditions collected over a whole run. The run completes with
/// this report alongside the assembled graph unless a fatal error occurred.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub malformed: Vec<MalformedRecord>,
    pub skipped: Vec<SkippedLocus>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.skipped.is_empty()
    }

    pub fn record_malformed(&mut self, path: &str, line: usize, reason: impl Into<String>) {
        self.malformed.push(MalformedRecord {
            path: path.to_string(),
            line,
            reason: reason.into(),
        });
    }

    pub fn record_skipped(&mut self, skipped: SkippedLocus) {
        self.skipped.push(skipped);
    }
}

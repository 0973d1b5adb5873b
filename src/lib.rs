//! Build a graph representation of a reference assembly with alternate
//! loci: each chromosome becomes a chain of sequence blocks split where alt
//! scaffolds attach, and each alt scaffold becomes a bubble wired into that
//! chain between its two flanking blocks.

pub mod assembler;
pub mod backbone;
pub mod breakpoints;
pub mod errors;
pub mod graph;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod store;
pub mod wiring;

pub use errors::{BuildError, BuildReport, FetchError, SkippedLocus};
pub use graph::{Edge, Graph, IdAllocator, Node, Span};
pub use model::{AltLocus, Chromosome};
pub use pipeline::{build_graph, run_build, Args, BuildOutcome};
pub use store::SequenceStore;

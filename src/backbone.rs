//! Backbone construction: partition one chromosome into contiguous blocks
//! at its breakpoints and publish the coordinate lookup tables the wirer
//! needs.

use std::collections::HashMap;

use crate::errors::BuildError;
use crate::graph::{Edge, IdAllocator, Node};
use crate::model::Chromosome;
use crate::store::SequenceStore;

/// Coordinate → node-id lookup tables, keyed by `(chromosome, coordinate)`.
/// Populated once per chromosome during backbone construction and read-only
/// afterward. For every interior breakpoint `b` of a chromosome,
/// `ends[(chrom, b)]` and `starts[(chrom, b)]` are the two backbone nodes
/// meeting at `b`.
#[derive(Debug, Clone, Default)]
pub struct BoundaryIndex {
    starts: HashMap<(String, u64), u64>,
    ends: HashMap<(String, u64), u64>,
}

impl BoundaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_starting_at(&self, chrom: &str, coord: u64) -> Option<u64> {
        self.starts.get(&(chrom.to_string(), coord)).copied()
    }

    pub fn node_ending_at(&self, chrom: &str, coord: u64) -> Option<u64> {
        self.ends.get(&(chrom.to_string(), coord)).copied()
    }

    pub fn merge(&mut self, other: BoundaryIndex) {
        self.starts.extend(other.starts);
        self.ends.extend(other.ends);
    }

    /// The breakpoint sequence of a chromosome, reconstructed from the end
    /// coordinates of its registered blocks.
    pub fn breakpoints_of(&self, chrom: &str) -> Vec<u64> {
        let mut coords: Vec<u64> = self
            .ends
            .keys()
            .filter(|(name, _)| name == chrom)
            .map(|&(_, coord)| coord)
            .collect();
        coords.sort_unstable();
        coords
    }
}

/// Backbone output for one chromosome: the blocks in ascending coordinate
/// order, plus any sub-block chain edges when a maximum block size is set.
#[derive(Debug, Default)]
pub struct BackboneBlocks {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Walk the breakpoints of `chrom` in ascending order, cutting a node for
/// every non-empty interval between consecutive boundaries. The first and
/// last coordinate of each interval are registered in the boundary index.
///
/// With `max_node_size` set, an interval longer than the window is split
/// into fixed-size sub-blocks chained with explicit edges; only the first
/// sub-block appears in `starts` and only the last in `ends`, so the bubble
/// wiring is unaffected.
///
/// The breakpoint sequence must terminate at the chromosome length;
/// anything else is a defect in breakpoint computation, reported as
/// [`BuildError::InvariantViolation`].
pub fn build_backbone(
    chrom: &Chromosome,
    breakpoints: &[u64],
    store: &SequenceStore,
    ids: &IdAllocator,
    index: &mut BoundaryIndex,
    max_node_size: Option<u64>,
) -> Result<BackboneBlocks, BuildError> {
    let mut blocks = BackboneBlocks::default();
    let mut cursor = 0u64;

    for &boundary in breakpoints {
        if boundary == cursor {
            continue;
        }
        if boundary < cursor {
            return Err(BuildError::InvariantViolation(format!(
                "breakpoints for {} are not ascending: {} after {}",
                chrom.name, boundary, cursor
            )));
        }

        let window = match max_node_size {
            Some(window) if window > 0 && boundary - cursor > window => window,
            _ => boundary - cursor,
        };

        let mut sub_start = cursor;
        let mut previous: Option<u64> = None;
        while sub_start < boundary {
            let sub_end = (sub_start + window).min(boundary);
            let sequence = store.fetch(&chrom.name, sub_start, sub_end)?;
            let node = Node::new(ids.next_id(), &chrom.name, sub_start, sub_end, sequence);
            if let Some(prev) = previous {
                blocks.edges.push(Edge::new(prev, node.id));
            }
            previous = Some(node.id);
            if sub_start == cursor {
                index.starts.insert((chrom.name.clone(), cursor), node.id);
            }
            if sub_end == boundary {
                index.ends.insert((chrom.name.clone(), boundary), node.id);
            }
            blocks.nodes.push(node);
            sub_start = sub_end;
        }
        cursor = boundary;
    }

    if cursor != chrom.len {
        return Err(BuildError::InvariantViolation(format!(
            "breakpoints for {} end at {} instead of the chromosome length {}",
            chrom.name, cursor, chrom.len
        )));
    }
    Ok(blocks)
}

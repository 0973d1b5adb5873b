use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::atomic::{AtomicU64, Ordering};

/// Where a node's sequence came from: origin name plus the half-open
/// interval it covers on that origin. Kept for tests and debugging; the GFA
/// output only carries it as a label tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub origin: String,
    pub start: u64,
    pub end: u64,
}

/// A sequence block in the graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: u64,
    pub label: String,
    pub sequence: Vec<u8>,
    pub span: Span,
}

impl Node {
    pub fn new(id: u64, origin: &str, start: u64, end: u64, sequence: Vec<u8>) -> Self {
        Node {
            id,
            label: format!("{origin}:{start}"),
            sequence,
            span: Span {
                origin: origin.to_string(),
                start,
                end,
            },
        }
    }
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Edge {
    pub from: u64,
    pub to: u64,
}

impl Edge {
    pub fn new(from: u64, to: u64) -> Self {
        Edge { from, to }
    }
}

/// Thread-safe source of node ids, starting at 1 so that 0 never names a
/// node. Ids are handed out monotonically; reproducibility comes from
/// callers allocating in a fixed order, not from the counter itself.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// The assembled graph: caller-owned node and edge collections.
#[derive(Debug, Default)]
pub struct Graph {
    pub nodes: HashMap<u64, Node>,
    pub edges: HashSet<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            nodes: HashMap::new(),
            edges: HashSet::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges touching the given node, in either direction.
    pub fn edges_of(&self, id: u64) -> Vec<Edge> {
        let mut found: Vec<Edge> = self
            .edges
            .iter()
            .filter(|e| e.from == id || e.to == id)
            .copied()
            .collect();
        found.sort();
        found
    }

    /// Write the graph as GFA 1.0. Nodes become `S` lines in ascending id
    /// order with the label in an `LB:Z:` tag; edges become `L` lines in
    /// ascending `(from, to)` order. Output is byte-identical across runs
    /// for identical graphs.
    pub fn write_gfa(&self, path: &str) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "H\tVN:Z:1.0")?;

        let mut ids: Vec<u64> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let node = &self.nodes[&id];
            writer.write_all(b"S\t")?;
            write!(writer, "{id}\t")?;
            writer.write_all(&node.sequence)?;
            writeln!(writer, "\tLB:Z:{}", node.label)?;
        }

        let mut edges: Vec<Edge> = self.edges.iter().copied().collect();
        edges.sort();
        for edge in edges {
            writeln!(writer, "L\t{}\t+\t{}\t+\t0M", edge.from, edge.to)?;
        }

        writer.flush()
    }
}

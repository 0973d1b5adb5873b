//! Bubble wiring: one node per alt locus, connected to the backbone node
//! ending at the locus start and the backbone node starting at the locus
//! end.

use crate::backbone::BoundaryIndex;
use crate::errors::{BoundarySide, BuildError, BuildReport, SkippedLocus};
use crate::graph::{Edge, IdAllocator, Node};
use crate::model::AltLocus;
use crate::store::SequenceStore;

#[derive(Debug, Default)]
pub struct WiredLoci {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Wire every alt locus into the backbone. Loci are processed in input
/// order so allocated ids are reproducible.
///
/// A locus without a resolved length, or whose flanking backbone nodes
/// cannot be found, is recorded in the report and skipped without a node —
/// a single bad record never aborts the batch, and no unreachable node is
/// left behind. Sequence fetch failures are fatal: by this point the locus
/// has a store-backed name and length, so a miss means the stores and the
/// placement data disagree.
pub fn wire_alt_loci(
    loci: &[AltLocus],
    index: &BoundaryIndex,
    store: &SequenceStore,
    ids: &IdAllocator,
    report: &mut BuildReport,
) -> Result<WiredLoci, BuildError> {
    let mut wired = WiredLoci::default();

    for locus in loci {
        let Some(len) = locus.len else {
            report.record_skipped(SkippedLocus::UnresolvedAltLength {
                name: locus.name.clone(),
            });
            continue;
        };

        let pre = index.node_ending_at(&locus.chrom, locus.start_pos);
        let post = index.node_starting_at(&locus.chrom, locus.end_pos);
        let (pre, post) = match (pre, post) {
            (Some(pre), Some(post)) => (pre, post),
            (pre, _) => {
                let (coord, side) = if pre.is_none() {
                    (locus.start_pos, BoundarySide::Start)
                } else {
                    (locus.end_pos, BoundarySide::End)
                };
                report.record_skipped(SkippedLocus::UnresolvedBoundary {
                    name: locus.name.clone(),
                    chrom: locus.chrom.clone(),
                    coord,
                    side,
                });
                continue;
            }
        };

        let sequence = store.fetch(&locus.name, 0, len)?;
        let node = Node::new(ids.next_id(), &locus.name, 0, len, sequence);
        wired.edges.push(Edge::new(pre, node.id));
        wired.edges.push(Edge::new(node.id, post));
        wired.nodes.push(node);
    }
    Ok(wired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backbone::build_backbone;
    use crate::model::Chromosome;
    use std::collections::HashMap;

    fn scenario_store() -> SequenceStore {
        let mut primary = HashMap::new();
        primary.insert("chr1".to_string(), vec![b'C'; 1000]);
        let mut alt = HashMap::new();
        alt.insert("KI270762.1".to_string(), vec![b'G'; 50]);
        alt.insert("KI270759.1".to_string(), vec![b'T'; 40]);
        SequenceStore::from_parts(primary, alt, HashMap::new())
    }

    fn backbone_index(store: &SequenceStore, ids: &IdAllocator) -> (BoundaryIndex, Vec<Node>) {
        let chrom = Chromosome::new("chr1", 1000);
        let mut index = BoundaryIndex::new();
        let blocks =
            build_backbone(&chrom, &[200, 400, 1000], store, ids, &mut index, None).unwrap();
        (index, blocks.nodes)
    }

    #[test]
    fn bubble_connects_flanking_blocks() {
        // Scenario: chr1 of length 1000, one alt locus over [200, 400).
        let store = scenario_store();
        let ids = IdAllocator::new();
        let (index, backbone) = backbone_index(&store, &ids);
        let loci = vec![AltLocus::new("KI270762.1", "chr1", 200, 400).with_len(50)];
        let mut report = BuildReport::default();
        let wired = wire_alt_loci(&loci, &index, &store, &ids, &mut report).unwrap();

        assert_eq!(wired.nodes.len(), 1);
        let alt = &wired.nodes[0];
        assert_eq!(alt.span.start, 0);
        assert_eq!(alt.span.end, 50);
        assert_eq!(
            wired.edges,
            vec![
                Edge::new(backbone[0].id, alt.id),
                Edge::new(alt.id, backbone[2].id),
            ]
        );
        assert!(report.is_clean());
    }

    #[test]
    fn unmatched_boundary_skips_locus_not_batch() {
        // End coordinate 401 matches no breakpoint; the other locus still
        // gets wired.
        let store = scenario_store();
        let ids = IdAllocator::new();
        let (index, _) = backbone_index(&store, &ids);
        let loci = vec![
            AltLocus::new("KI270759.1", "chr1", 200, 401).with_len(40),
            AltLocus::new("KI270762.1", "chr1", 200, 400).with_len(50),
        ];
        let mut report = BuildReport::default();
        let wired = wire_alt_loci(&loci, &index, &store, &ids, &mut report).unwrap();

        assert_eq!(wired.nodes.len(), 1);
        assert_eq!(wired.nodes[0].span.origin, "KI270762.1");
        assert_eq!(wired.edges.len(), 2);
        assert_eq!(
            report.skipped,
            vec![SkippedLocus::UnresolvedBoundary {
                name: "KI270759.1".to_string(),
                chrom: "chr1".to_string(),
                coord: 401,
                side: BoundarySide::End,
            }]
        );
    }

    #[test]
    fn unresolved_length_blocks_node_creation() {
        let store = scenario_store();
        let ids = IdAllocator::new();
        let (index, _) = backbone_index(&store, &ids);
        let loci = vec![
            AltLocus::new("KI270759.1", "chr1", 200, 400),
            AltLocus::new("KI270762.1", "chr1", 200, 400).with_len(50),
        ];
        let mut report = BuildReport::default();
        let wired = wire_alt_loci(&loci, &index, &store, &ids, &mut report).unwrap();

        assert_eq!(wired.nodes.len(), 1);
        assert_eq!(wired.nodes[0].span.origin, "KI270762.1");
        assert_eq!(
            report.skipped,
            vec![SkippedLocus::UnresolvedAltLength {
                name: "KI270759.1".to_string(),
            }]
        );
    }

    #[test]
    fn missing_start_boundary_is_reported_with_side() {
        let store = scenario_store();
        let ids = IdAllocator::new();
        let (index, _) = backbone_index(&store, &ids);
        let loci = vec![AltLocus::new("KI270762.1", "chr1", 199, 400).with_len(50)];
        let mut report = BuildReport::default();
        let wired = wire_alt_loci(&loci, &index, &store, &ids, &mut report).unwrap();
        assert!(wired.nodes.is_empty());
        assert!(matches!(
            report.skipped[0],
            SkippedLocus::UnresolvedBoundary {
                coord: 199,
                side: BoundarySide::Start,
                ..
            }
        ));
    }
}

use std::collections::BTreeSet;

use crate::model::AltLocus;

/// Compute the breakpoint sequence for one chromosome: the ascending,
/// duplicate-free union of every alt-locus start and end on that
/// chromosome, always terminated by the chromosome length. Zero is the
/// implicit first boundary and never an element.
///
/// Pure: two chromosomes with identical alt-locus coordinate sets get
/// identical breakpoint sequences.
pub fn chromosome_breakpoints(loci: &[AltLocus], chrom_name: &str, chrom_len: u64) -> Vec<u64> {
    let mut points: BTreeSet<u64> = BTreeSet::new();
    for locus in loci.iter().filter(|l| l.chrom == chrom_name) {
        points.insert(locus.start_pos);
        points.insert(locus.end_pos);
    }
    points.insert(chrom_len);
    points.remove(&0);
    points.into_iter().collect()
}

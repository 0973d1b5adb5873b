use std::collections::HashMap;

use altgraph::pipeline::Args;
use altgraph::store::SequenceStore;

/// In-memory store for one chromosome of `A`s plus alt scaffolds of `G`s.
pub fn test_store(chrom: &str, chrom_len: usize, alts: &[(&str, usize)]) -> SequenceStore {
    let mut primary = HashMap::new();
    primary.insert(chrom.to_string(), vec![b'A'; chrom_len]);
    let mut alt = HashMap::new();
    for (name, len) in alts {
        alt.insert(name.to_string(), vec![b'G'; *len]);
    }
    SequenceStore::from_parts(primary, alt, HashMap::new())
}

/// Args for a file-based run with everything else defaulted.
pub fn default_test_args(
    alt_loci: String,
    chrom_sizes: String,
    primary: String,
    alt_fasta: String,
    output: String,
) -> Args {
    Args {
        alt_loci,
        chrom_sizes,
        primary,
        alt_fasta,
        name_map: None,
        output,
        report: None,
        max_node_size: None,
        max_malformed: 25,
        threads: 1,
        verbose: false,
    }
}

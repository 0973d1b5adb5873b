//! In-memory sequence retrieval backed by two FASTA stores.
//!
//! Display names are translated through a remapping table into store
//! accessions, then routed to the primary-assembly store or the
//! alt-scaffold store by name convention: chromosome names carry the `chr`
//! prefix, alt scaffolds use accession-style names (`KI270762.1`).

use std::collections::HashMap;
use std::io::BufReader;
use std::path::Path;

use noodles::fasta;

use crate::errors::{BuildError, FetchError};

#[derive(Debug, Default)]
pub struct SequenceStore {
    primary: HashMap<String, Vec<u8>>,
    alt: HashMap<String, Vec<u8>>,
    name_map: HashMap<String, String>,
}

impl SequenceStore {
    /// Load both stores from FASTA files. `name_map` translates display
    /// names to the accessions used in the FASTA headers; an empty map
    /// means names are used as-is.
    pub fn from_fasta_files(
        primary: &Path,
        alt: &Path,
        name_map: HashMap<String, String>,
    ) -> Result<Self, BuildError> {
        Ok(SequenceStore {
            primary: load_fasta(primary)?,
            alt: load_fasta(alt)?,
            name_map,
        })
    }

    /// Build a store from already-loaded sequences. Used by tests and by
    /// callers that fetch sequences through other means.
    pub fn from_parts(
        primary: HashMap<String, Vec<u8>>,
        alt: HashMap<String, Vec<u8>>,
        name_map: HashMap<String, String>,
    ) -> Self {
        SequenceStore {
            primary,
            alt,
            name_map,
        }
    }

    /// Fetch `[start, end)` of the named sequence. Unknown names and
    /// out-of-range intervals are distinct errors; this never substitutes
    /// an empty or placeholder sequence.
    pub fn fetch(&self, name: &str, start: u64, end: u64) -> Result<Vec<u8>, FetchError> {
        let accession = self
            .name_map
            .get(name)
            .map(String::as_str)
            .unwrap_or(name);
        let bank = if is_alt_scaffold(name) {
            &self.alt
        } else {
            &self.primary
        };
        let sequence = bank
            .get(accession)
            .ok_or_else(|| FetchError::UnknownName(name.to_string()))?;
        let len = sequence.len() as u64;
        if start > end || end > len {
            return Err(FetchError::OutOfRange {
                name: name.to_string(),
                start,
                end,
                len,
            });
        }
        Ok(sequence[start as usize..end as usize].to_vec())
    }
}

/// Chromosome names start with `chr`; everything else is treated as an alt
/// scaffold accession.
fn is_alt_scaffold(name: &str) -> bool {
    !name.starts_with("chr")
}

fn load_fasta(path: &Path) -> Result<HashMap<String, Vec<u8>>, BuildError> {
    let file = std::fs::File::open(path)?;
    let mut reader = fasta::io::Reader::new(BufReader::new(file));

    let mut sequences = HashMap::new();
    for result in reader.records() {
        let record = result.map_err(|e| BuildError::Fasta {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let name = String::from_utf8_lossy(record.name()).to_string();
        sequences.insert(name, record.sequence().as_ref().to_vec());
    }
    Ok(sequences)
}

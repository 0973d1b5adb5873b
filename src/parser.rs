//! Parsers for the three row-oriented input files: alt-locus placements,
//! chromosome sizes, and the name-remapping table.
//!
//! Rows that cannot be parsed are collected into the [`BuildReport`] rather
//! than aborting; a file only fails outright when its malformed count
//! exceeds the caller's limit.

use std::collections::HashMap;
use std::path::Path;

use crate::errors::{BuildError, BuildReport};
use crate::model::{AltLocus, Chromosome};

/// Parse the alt-locus placement file. Only rows whose region-type field
/// (index 7) starts with `ALT` are kept; comment (`#`) and empty lines are
/// ignored. The host chromosome field is numeric and gets the `chr` prefix.
pub fn parse_alt_loci(
    path: &Path,
    report: &mut BuildReport,
    max_malformed: usize,
) -> Result<Vec<AltLocus>, BuildError> {
    let text = std::fs::read_to_string(path)?;
    parse_alt_loci_text(&text, &path.display().to_string(), report, max_malformed)
}

pub fn parse_alt_loci_text(
    text: &str,
    label: &str,
    report: &mut BuildReport,
    max_malformed: usize,
) -> Result<Vec<AltLocus>, BuildError> {
    let mut loci = Vec::new();
    let mut malformed = 0usize;

    for (i, line) in text.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_num = i + 1;
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < 8 {
            malformed += 1;
            report.record_malformed(
                label,
                line_num,
                format!("expected at least 8 fields, found {}", parts.len()),
            );
            check_limit(label, malformed, max_malformed)?;
            continue;
        }
        if !parts[7].starts_with("ALT") {
            continue;
        }

        let start = parts[2].parse::<u64>();
        let end = parts[3].parse::<u64>();
        match (start, end) {
            (Ok(start), Ok(end)) if start <= end => {
                loci.push(AltLocus::new(parts[5], format!("chr{}", parts[1]), start, end));
            }
            (Ok(start), Ok(end)) => {
                malformed += 1;
                report.record_malformed(
                    label,
                    line_num,
                    format!("interval start {start} is past end {end}"),
                );
                check_limit(label, malformed, max_malformed)?;
            }
            _ => {
                malformed += 1;
                report.record_malformed(
                    label,
                    line_num,
                    format!("non-numeric coordinates: {} {}", parts[2], parts[3]),
                );
                check_limit(label, malformed, max_malformed)?;
            }
        }
    }
    Ok(loci)
}

/// Parse the chromosome-sizes file. `*_alt` rows write their length back
/// onto the matching [`AltLocus`] records (matched by accession name);
/// `*random` and `chrUn*` contigs are dropped; everything else becomes a
/// [`Chromosome`].
pub fn parse_chrom_sizes(
    path: &Path,
    loci: &mut [AltLocus],
    report: &mut BuildReport,
    max_malformed: usize,
) -> Result<Vec<Chromosome>, BuildError> {
    let text = std::fs::read_to_string(path)?;
    parse_chrom_sizes_text(&text, &path.display().to_string(), loci, report, max_malformed)
}

pub fn parse_chrom_sizes_text(
    text: &str,
    label: &str,
    loci: &mut [AltLocus],
    report: &mut BuildReport,
    max_malformed: usize,
) -> Result<Vec<Chromosome>, BuildError> {
    // Index the authoritative locus records up front so the length update
    // lands on them, not on a temporary. A scaffold placed more than once
    // shares its name across several records; all of them get the length.
    let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, locus) in loci.iter().enumerate() {
        by_name.entry(locus.name.clone()).or_default().push(i);
    }

    let mut chromosomes = Vec::new();
    let mut malformed = 0usize;

    for (i, line) in text.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_num = i + 1;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (name, len) = match (parts.first(), parts.get(1)) {
            (Some(name), Some(len)) => (*name, *len),
            _ => {
                malformed += 1;
                report.record_malformed(label, line_num, "expected name and length fields");
                check_limit(label, malformed, max_malformed)?;
                continue;
            }
        };
        let len = match len.parse::<u64>() {
            Ok(len) => len,
            Err(_) => {
                malformed += 1;
                report.record_malformed(label, line_num, format!("non-numeric length: {len}"));
                check_limit(label, malformed, max_malformed)?;
                continue;
            }
        };

        if name.ends_with("_alt") {
            let Some(accession) = alt_accession(name) else {
                malformed += 1;
                report.record_malformed(label, line_num, format!("unrecognized alt contig: {name}"));
                check_limit(label, malformed, max_malformed)?;
                continue;
            };
            if let Some(indices) = by_name.get(accession.as_str()) {
                for &idx in indices {
                    loci[idx].len = Some(len);
                }
            }
        } else if name.ends_with("random") || name.starts_with("chrUn") {
            continue;
        } else {
            chromosomes.push(Chromosome::new(name, len));
        }
    }
    Ok(chromosomes)
}

/// Parse the two-column display-name → accession table.
pub fn parse_name_map(path: &Path) -> Result<HashMap<String, String>, BuildError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_name_map_text(&text))
}

pub fn parse_name_map_text(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        if let (Some(display), Some(accession)) = (fields.next(), fields.next()) {
            map.insert(display.to_string(), accession.to_string());
        }
    }
    map
}

/// Turn a sizes-file alt contig name into the accession used by the
/// placement file: `chr1_KI270762v1_alt` → `KI270762.1`.
pub fn alt_accession(contig: &str) -> Option<String> {
    let middle = contig.split('_').nth(1)?;
    Some(match middle.find('v') {
        Some(pos) => {
            let mut accession = middle.to_string();
            accession.replace_range(pos..pos + 1, ".");
            accession
        }
        None => middle.to_string(),
    })
}

fn check_limit(label: &str, count: usize, limit: usize) -> Result<(), BuildError> {
    if count > limit {
        return Err(BuildError::TooManyMalformed {
            path: label.to_string(),
            count,
            limit,
        });
    }
    Ok(())
}

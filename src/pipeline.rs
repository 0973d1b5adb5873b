//! End-to-end orchestration: parse inputs, index breakpoints, build
//! backbones, wire bubbles, assemble, serialize.

use std::path::Path;

use clap::Parser;
use rayon::prelude::*;

use crate::assembler::assemble;
use crate::backbone::{build_backbone, BoundaryIndex};
use crate::breakpoints::chromosome_breakpoints;
use crate::errors::{BoundarySide, BuildError, BuildReport, SkippedLocus};
use crate::graph::{Edge, Graph, IdAllocator, Node};
use crate::model::{AltLocus, Chromosome};
use crate::parser::{parse_alt_loci, parse_chrom_sizes, parse_name_map};
use crate::store::SequenceStore;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "altgraph",
    version,
    about = "Reference + alt-scaffold bubble graph construction"
)]
pub struct Args {
    /// Alt-locus placement file
    #[arg(long)]
    pub alt_loci: String,

    /// Chromosome sizes file
    #[arg(long)]
    pub chrom_sizes: String,

    /// Primary assembly FASTA
    #[arg(long)]
    pub primary: String,

    /// Alt-scaffold assembly FASTA
    #[arg(long)]
    pub alt_fasta: String,

    /// Two-column display-name -> accession table for the sequence stores
    #[arg(long)]
    pub name_map: Option<String>,

    /// Output GFA file
    #[arg(short, long, default_value = "graph.gfa")]
    pub output: String,

    /// Write the build report as JSON
    #[arg(long)]
    pub report: Option<String>,

    /// Split backbone blocks longer than this into chained sub-blocks
    #[arg(long)]
    pub max_node_size: Option<u64>,

    /// Abort a file when more than this many of its records are malformed
    #[arg(long, default_value_t = 25)]
    pub max_malformed: usize,

    /// Number of threads
    #[arg(short, long, default_value_t = 1)]
    pub threads: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a completed run hands back: the assembled graph plus the collected
/// per-record conditions.
#[derive(Debug)]
pub struct BuildOutcome {
    pub graph: Graph,
    pub report: BuildReport,
}

/// The core build over already-parsed inputs. Chromosomes are processed in
/// name order and breakpoints in ascending order, so node ids and edges are
/// reproducible across runs. Breakpoint computation is pure per chromosome
/// and fans out over rayon; backbone construction stays sequential to keep
/// the id sequence fixed.
pub fn build_graph(
    mut chromosomes: Vec<Chromosome>,
    loci: &[AltLocus],
    store: &SequenceStore,
    max_node_size: Option<u64>,
    verbose: bool,
    report: &mut BuildReport,
) -> Result<Graph, BuildError> {
    chromosomes.sort_by(|a, b| a.name.cmp(&b.name));

    // A locus reaching past its host chromosome can never be wired, and
    // letting it contribute breakpoints would corrupt the partition. Pull
    // it out before indexing.
    let lengths: std::collections::HashMap<&str, u64> = chromosomes
        .iter()
        .map(|c| (c.name.as_str(), c.len))
        .collect();
    let (loci, overhanging): (Vec<&AltLocus>, Vec<&AltLocus>) = loci.iter().partition(|l| {
        lengths
            .get(l.chrom.as_str())
            .map_or(true, |&len| l.end_pos <= len)
    });
    for locus in overhanging {
        report.record_skipped(SkippedLocus::UnresolvedBoundary {
            name: locus.name.clone(),
            chrom: locus.chrom.clone(),
            coord: locus.end_pos,
            side: BoundarySide::End,
        });
    }
    let loci: Vec<AltLocus> = loci.into_iter().cloned().collect();

    let breakpoints: Vec<Vec<u64>> = chromosomes
        .par_iter()
        .map(|chrom| chromosome_breakpoints(&loci, &chrom.name, chrom.len))
        .collect();

    let ids = IdAllocator::new();
    let mut index = BoundaryIndex::new();
    let mut backbone_nodes: Vec<Node> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();

    for (chrom, points) in chromosomes.iter().zip(&breakpoints) {
        let blocks = build_backbone(chrom, points, store, &ids, &mut index, max_node_size)?;
        if verbose {
            println!(
                "{}: {} breakpoints, {} blocks",
                chrom.name,
                points.len(),
                blocks.nodes.len()
            );
        }
        backbone_nodes.extend(blocks.nodes);
        edges.extend(blocks.edges);
    }

    let wired = crate::wiring::wire_alt_loci(&loci, &index, store, &ids, report)?;
    if verbose {
        println!(
            "wired {} of {} alt loci",
            wired.nodes.len(),
            loci.len()
        );
    }
    edges.extend(wired.edges);

    assemble(backbone_nodes, wired.nodes, edges)
}

/// File-based entry point used by the binary: parse, build, write the GFA
/// and the optional JSON report, print a summary of collected conditions.
pub fn run_build(args: &Args) -> Result<BuildOutcome, BuildError> {
    let _ = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global();

    let mut report = BuildReport::default();

    let mut loci = parse_alt_loci(Path::new(&args.alt_loci), &mut report, args.max_malformed)?;
    let chromosomes = parse_chrom_sizes(
        Path::new(&args.chrom_sizes),
        &mut loci,
        &mut report,
        args.max_malformed,
    )?;
    let name_map = match &args.name_map {
        Some(path) => parse_name_map(Path::new(path))?,
        None => Default::default(),
    };
    let store = SequenceStore::from_fasta_files(
        Path::new(&args.primary),
        Path::new(&args.alt_fasta),
        name_map,
    )?;

    if args.verbose {
        println!(
            "{} chromosomes, {} alt loci",
            chromosomes.len(),
            loci.len()
        );
    }

    let graph = build_graph(
        chromosomes,
        &loci,
        &store,
        args.max_node_size,
        args.verbose,
        &mut report,
    )?;
    graph.write_gfa(&args.output)?;
    if args.verbose {
        println!(
            "wrote {} nodes, {} edges to {}",
            graph.node_count(),
            graph.edge_count(),
            args.output
        );
    }

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
    }
    if !report.is_clean() {
        eprintln!(
            "{} malformed records, {} loci skipped",
            report.malformed.len(),
            report.skipped.len()
        );
        for skipped in &report.skipped {
            eprintln!("  skipped {skipped}");
        }
    }

    Ok(BuildOutcome { graph, report })
}

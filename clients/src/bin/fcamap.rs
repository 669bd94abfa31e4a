//! `fcamap`: aligns two ontologies with formal concept analysis.
//!
//! Loads a source and a target ontology (JSON documents), runs lexical
//! matching followed by the configured structural and refinement passes,
//! and prints the resulting correspondences.
//!
//! **Usage:**
//! ```text
//! fcamap --source <a.json> --target <b.json> [--config <c.toml>]
//!        [--reference <r.json>] [--out <mapping.json>] [--dot-dir <dir>]
//!        [--strict] [--refine-classes] [--verbose]
//! ```
//!
//! Exits non-zero if an input cannot be read or an output cannot be written.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fcamap_alignment::{Category, Evaluation, Mapping};
use fcamap_matching::{create_lexical_matcher, run, MatchConfig, MatcherSetting};
use fcamap_model::Ontology;
use tracing_subscriber::EnvFilter;

/// Align two ontologies.
#[derive(Parser)]
#[command(name = "fcamap", about = "FCA-based ontology matching")]
struct Args {
    /// Source ontology document.
    #[arg(long)]
    source: PathBuf,

    /// Target ontology document.
    #[arg(long)]
    target: PathBuf,

    /// Matcher configuration (TOML). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference alignment to evaluate against.
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Where to write the resulting mapping.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory receiving one Graphviz file per lexical lattice.
    #[arg(long)]
    dot_dir: Option<PathBuf>,

    /// Fail when a lattice lacks its top or bottom concept.
    #[arg(long)]
    strict: bool,

    /// Validate class correspondences against instance correspondences.
    #[arg(long)]
    refine_classes: bool,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    config.strict_lattice |= args.strict;
    config.refine_classes |= args.refine_classes;
    tracing::debug!(?config, "effective configuration");

    let source = Arc::new(
        Ontology::load(&args.source).with_context(|| "Failed to load source ontology")?,
    );
    let target = Arc::new(
        Ontology::load(&args.target).with_context(|| "Failed to load target ontology")?,
    );

    let mapping = run(Arc::clone(&source), Arc::clone(&target), &config)?;

    println!("fcamap alignment: {} -> {}", source.iri, target.iri);
    println!("==========================");
    println!();
    for c in &mapping {
        println!("[{}] {} = {}", c.category, c.source, c.target);
    }
    println!();
    println!(
        "Summary: {} classes, {} properties, {} instances",
        mapping.count_category(Category::Class),
        mapping.count_category(Category::Property),
        mapping.count_category(Category::Instance)
    );

    if let Some(path) = &args.reference {
        let reference = Mapping::load(path)?;
        print_evaluation(&mapping, &reference);
    }

    if let Some(path) = &args.out {
        mapping.save(path)?;
        println!("Wrote {}", path.display());
    }

    if let Some(dir) = &args.dot_dir {
        write_lattices(dir, source, target, &config)?;
    }

    Ok(())
}

fn print_evaluation(mapping: &Mapping, reference: &Mapping) {
    let overall = Evaluation::compare(mapping, reference);

    println!();
    println!("Evaluation against reference");
    println!("----------------------------");
    for category in [Category::Class, Category::Property, Category::Instance] {
        let eval = overall.for_category(category);
        println!(
            "{:<9} P={:.3} R={:.3} F={:.3}  ({} correct, {} missing, {} spurious)",
            category.as_str(),
            eval.precision(),
            eval.recall(),
            eval.f_measure(),
            eval.correct.len(),
            eval.missing.len(),
            eval.spurious.len()
        );
    }
    println!(
        "{:<9} P={:.3} R={:.3} F={:.3}",
        "all",
        overall.precision(),
        overall.recall(),
        overall.f_measure()
    );
    for c in &overall.missing {
        println!("  missing  {c}");
    }
    for c in &overall.spurious {
        println!("  spurious {c}");
    }
}

fn write_lattices(dir: &Path, source: Arc<Ontology>, target: Arc<Ontology>, config: &MatchConfig) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut matcher = create_lexical_matcher(config);
    matcher.set_source_target(source, target);
    let lattices = matcher.lattices()?;
    matcher.close();

    for (name, lattice) in lattices {
        let path = dir.join(format!("{name}.dot"));
        std::fs::write(&path, lattice.to_dot())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

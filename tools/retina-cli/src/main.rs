//! Retina - CLI for building and querying content-based image retrieval
//! databases.
//!
//! `retina build` extracts descriptors for every image in a directory and
//! writes them to a CSV database; `retina query` loads a database and prints
//! the closest matches for a target image.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use retina_core::FeatureKind;
use retina_search::RetrievalEngine;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retina")]
#[command(about = "Build and query content-based image retrieval databases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract features for a directory of images and save them to a CSV
    /// database
    Build {
        /// Directory of images to index (non-recursive)
        #[arg(short = 'd', long)]
        dir: PathBuf,

        /// Feature type: baseline, histogram, multi_histogram,
        /// texture_color, dnn_embedding, custom
        #[arg(short = 'f', long, default_value = "baseline")]
        feature: String,

        /// Output database file
        #[arg(short = 'o', long, default_value = "features.csv")]
        output: PathBuf,

        /// Precomputed embedding table (required for dnn_embedding)
        #[arg(short = 'c', long)]
        embeddings: Option<PathBuf>,
    },

    /// Find the closest matches for a target image in a saved database
    Query {
        /// Target image
        #[arg(short = 't', long)]
        target: PathBuf,

        /// Feature type the database is expected to hold
        #[arg(short = 'f', long)]
        feature: Option<String>,

        /// Database file produced by `retina build`
        #[arg(short = 'i', long, default_value = "features.csv")]
        input: PathBuf,

        /// Number of matches to print
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,

        /// Precomputed embedding table, used when the target itself is not
        /// in the database
        #[arg(short = 'c', long)]
        embeddings: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        let chain: Vec<_> = e.chain().collect();
        if let Some(root_cause) = chain.last() {
            eprintln!("Error: {}", root_cause);
        }
        if chain.len() > 1 {
            eprintln!("\nContext:");
            for cause in chain.iter().take(chain.len() - 1) {
                eprintln!("  - {}", cause);
            }
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { dir, feature, output, embeddings } => {
            build(&dir, &feature, &output, embeddings)
        }
        Commands::Query { target, feature, input, count, embeddings } => {
            query(&target, feature.as_deref(), &input, count, embeddings)
        }
    }
}

fn build(
    dir: &std::path::Path,
    feature: &str,
    output: &std::path::Path,
    embeddings: Option<PathBuf>,
) -> Result<()> {
    let kind = parse_kind(feature)?;

    let mut engine = RetrievalEngine::new();
    if let Some(csv) = embeddings {
        engine.set_embedding_table(csv);
    }

    let count = engine
        .build_database(dir, kind)
        .with_context(|| format!("failed to build {kind} database from {}", dir.display()))?;
    if count == 0 {
        bail!("no images indexed from {}", dir.display());
    }

    engine
        .save_features(output)
        .with_context(|| format!("failed to write database to {}", output.display()))?;

    println!("Indexed {count} images ({kind}) into {}", output.display());
    Ok(())
}

fn query(
    target: &std::path::Path,
    feature: Option<&str>,
    input: &std::path::Path,
    count: usize,
    embeddings: Option<PathBuf>,
) -> Result<()> {
    let mut engine = RetrievalEngine::new();
    if let Some(csv) = embeddings {
        engine.set_embedding_table(csv);
    }

    engine
        .load_features(input)
        .with_context(|| format!("failed to load database from {}", input.display()))?;

    // The database header is authoritative; a mismatched -f is only a warning.
    if let Some(requested) = feature {
        let requested = parse_kind(requested)?;
        if requested != engine.kind() {
            warn!(
                requested = %requested,
                stored = %engine.kind(),
                "requested feature type differs from database; using stored type"
            );
        }
    }

    let matches = engine
        .query_path(target, count)
        .with_context(|| format!("failed to query {}", target.display()))?;
    if matches.is_empty() {
        bail!("no matches found in {}", input.display());
    }

    println!("Top {} matches for {}:", matches.len(), target.display());
    for (rank, m) in matches.iter().enumerate() {
        println!("{:>3}. {}  (distance {:.6})", rank + 1, m.path, m.distance);
    }
    Ok(())
}

fn parse_kind(name: &str) -> Result<FeatureKind> {
    FeatureKind::try_from_name(name).ok_or_else(|| {
        let known: Vec<&str> = FeatureKind::ALL.into_iter().map(FeatureKind::as_str).collect();
        anyhow::anyhow!("unknown feature type '{name}' (expected one of: {})", known.join(", "))
    })
}

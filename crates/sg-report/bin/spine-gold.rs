//! Cross-validation driver: diffs pairs of captured skeleton snapshots.
//!
//! Each runtime adapter writes its sampled skeleton to a JSON file; this
//! binary walks (gold, candidate) pairs of those files, diffs each pair, and
//! prints one report per pair. A failing pair (unreadable file, malformed
//! snapshot, topology mismatch) is logged and skipped so the remaining pairs
//! still run.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sg_gold::diff::{Alignment, DiffConfig, diff_skeletons};
use sg_gold::metric::ScalarMetric;
use sg_gold::sampler::{JsonSnapshotSampler, SkeletonSampler};
use sg_report::table::{ReportOptions, render};

/// Cross-validate two skeletal-animation runtimes.
#[derive(Parser, Debug)]
#[command(name = "spine-gold")]
#[command(version, about = "Diff captured skeleton snapshots pairwise", long_about = None)]
struct Args {
    /// Snapshot JSON files, taken as (gold, candidate) pairs
    #[arg(required = true)]
    snapshots: Vec<PathBuf>,

    /// Print per-frame rows
    #[arg(long = "frames")]
    frames: bool,

    /// Print per-bone rows
    #[arg(long = "bones")]
    bones: bool,

    /// Print raw values from both sides next to each bone row
    #[arg(long = "both")]
    both: bool,

    /// Dump active transform-constraint mixes per frame
    #[arg(long = "constraints")]
    constraints: bool,

    /// Select a single animation ("setup" for the bind pose)
    #[arg(long = "animation")]
    animation: Option<String>,

    /// Select a single frame index
    #[arg(long = "frame")]
    frame: Option<usize>,

    /// Select a single bone by name
    #[arg(long = "bone")]
    bone: Option<String>,

    /// Match bones by name instead of declared index
    #[arg(long = "by-name")]
    by_name: bool,

    /// Wrap rotation differences into (-pi, pi]
    #[arg(long = "angle")]
    angle: bool,

    /// Emit each diff tree as JSON instead of a table
    #[arg(long = "json")]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if args.snapshots.len() % 2 != 0 {
        log::error!("expected an even number of snapshot paths (gold/candidate pairs)");
        return ExitCode::FAILURE;
    }

    let config = DiffConfig {
        alignment: if args.by_name { Alignment::ByName } else { Alignment::Positional },
        rotation_metric: if args.angle {
            ScalarMetric::AngleDifference
        } else {
            ScalarMetric::Difference
        },
    };
    let options = ReportOptions {
        frames: args.frames,
        bones: args.bones,
        both: args.both,
        constraints: args.constraints,
        animation: args.animation.clone(),
        frame: args.frame,
        bone: args.bone.clone(),
    };

    let mut failed = false;
    for pair in args.snapshots.chunks(2) {
        println!();
        println!("{} vs {}", pair[0].display(), pair[1].display());
        if let Err(err) = compare_pair(&pair[0], &pair[1], &config, &options, args.json) {
            log::error!("skipping pair: {err:#}");
            failed = true;
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn compare_pair(
    gold: &Path,
    candidate: &Path,
    config: &DiffConfig,
    options: &ReportOptions,
    json: bool,
) -> Result<()> {
    let mut gold_sampler = JsonSnapshotSampler::new(gold, "gold");
    let mut candidate_sampler = JsonSnapshotSampler::new(candidate, "candidate");

    let a = gold_sampler.sample(1.0).context("reading gold snapshot")?;
    let b = candidate_sampler.sample(1.0).context("reading candidate snapshot")?;

    let diff = diff_skeletons(&a, &b, config)
        .with_context(|| format!("comparing {} against {}", gold.display(), candidate.display()))?;

    if json {
        println!("{}", diff.to_json());
    } else {
        print!("{}", render(&diff, &a, &b, options));
    }
    Ok(())
}

//! Compress command implementation.

use crate::utils::{check_overwrite, compressed_path, create_progress_bar, format_size};
use huffpack_huffman::{PackOptions, Package, PackageStats};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for the compress command.
#[derive(Debug, Clone, Default)]
pub struct CompressOptions {
    /// Explicit output path (single input only).
    pub output: Option<PathBuf>,
    /// File whose bytes are stored as package metadata.
    pub metadata: Option<PathBuf>,
    /// Skip the post-encode verification.
    pub no_verify: bool,
    /// Overwrite existing outputs.
    pub force: bool,
    /// Print per-file results.
    pub verbose: bool,
    /// Show a progress bar.
    pub progress: bool,
}

pub fn cmd_compress(
    files: &[PathBuf],
    options: &CompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Err("no input files".into());
    }
    if options.output.is_some() && files.len() > 1 {
        return Err("--output can only be used with a single input file".into());
    }

    let metadata = match &options.metadata {
        Some(path) => fs::read(path)?,
        None => Vec::new(),
    };
    let pack_options = PackOptions::default().with_verify(!options.no_verify);

    let targets = plan_targets(files, options.output.as_deref());

    // Check every target before doing any work.
    for (_, output) in &targets {
        check_overwrite(output, options.force)?;
    }

    let show_progress = options.progress && targets.len() > 1;
    let pb = create_progress_bar(targets.len() as u64, show_progress);

    // Each file is an independent encode; nothing is shared between them.
    let results: Vec<(&Path, Result<PackageStats, String>)> = targets
        .par_iter()
        .map(|(input, output)| {
            let result = compress_file(input, output, &metadata, &pack_options)
                .map_err(|e| e.to_string());
            pb.inc(1);
            (*input, result)
        })
        .collect();

    pb.finish_and_clear();

    let mut failures = 0usize;
    for ((input, result), (_, output)) in results.iter().zip(&targets) {
        match result {
            Ok(stats) => {
                if options.verbose {
                    println!(
                        "{} -> {} ({} -> {}, {:.1}% saved)",
                        input.display(),
                        output.display(),
                        format_size(stats.original_size),
                        format_size(stats.package_size),
                        stats.space_savings()
                    );
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("  FAILED: {} - {}", input.display(), e);
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} files failed to compress", failures, targets.len()).into());
    }

    info!(files = targets.len(), "compression complete");
    Ok(())
}

/// Pair each input with its output path, dropping inputs that would write
/// the same output as an earlier one.
fn plan_targets<'a>(files: &'a [PathBuf], output: Option<&Path>) -> Vec<(&'a Path, PathBuf)> {
    let mut seen = HashSet::new();
    let mut targets = Vec::with_capacity(files.len());

    for input in files {
        let target = output.map_or_else(|| compressed_path(input), Path::to_path_buf);
        let key = fs::canonicalize(input)
            .map(|path| compressed_path(&path))
            .unwrap_or_else(|_| target.clone());
        if seen.insert(key) {
            targets.push((input.as_path(), target));
        } else {
            debug!(input = %input.display(), "skipping duplicate input");
        }
    }

    targets
}

fn compress_file(
    input: &Path,
    output: &Path,
    metadata: &[u8],
    options: &PackOptions,
) -> Result<PackageStats, Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    debug!(input = %input.display(), bytes = data.len(), "compressing");

    let package = Package::compress(&data, metadata, options)?;

    let mut writer = BufWriter::new(File::create(output)?);
    package.write(&mut writer)?;
    writer.flush()?;

    Ok(package.stats())
}

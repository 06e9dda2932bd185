//! Decompress command implementation.

use crate::utils::{check_overwrite, decompressed_path, format_size};
use huffpack_huffman::Package;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    metadata_out: Option<&Path>,
    force: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output: PathBuf = output.map_or_else(|| decompressed_path(input), Path::to_path_buf);
    check_overwrite(&output, force)?;
    if let Some(path) = metadata_out {
        check_overwrite(path, force)?;
    }

    let mut reader = BufReader::new(File::open(input)?);
    let package = Package::read(&mut reader)?;
    let data = package.decompress()?;
    debug!(
        input = %input.display(),
        bytes = data.len(),
        metadata = package.metadata().len(),
        "decompressed"
    );

    // Metadata first, so a failure never leaves output without its sidecar.
    if let Some(path) = metadata_out {
        fs::write(path, package.metadata())?;
    }
    fs::write(&output, &data)?;

    if verbose {
        println!(
            "{} -> {} ({})",
            input.display(),
            output.display(),
            format_size(data.len() as u64)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use huffpack_huffman::PackOptions;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("huffpack-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_package(dir: &Path) -> PathBuf {
        let package =
            Package::compress(b"sample content", b"hdr".to_vec(), &PackOptions::default()).unwrap();
        let path = dir.join("sample.bin.huf");
        fs::write(&path, package.to_bytes()).unwrap();
        path
    }

    #[test]
    fn test_writes_output_and_metadata() {
        let dir = scratch_dir("decompress-ok");
        let input = write_package(&dir);
        let meta = dir.join("sample.hdr");

        cmd_decompress(&input, None, Some(&meta), false, false).unwrap();
        assert_eq!(fs::read(dir.join("sample.bin")).unwrap(), b"sample content");
        assert_eq!(fs::read(&meta).unwrap(), b"hdr");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_failed_metadata_write_leaves_no_output() {
        let dir = scratch_dir("decompress-meta-fail");
        let input = write_package(&dir);
        let meta = dir.join("missing-dir").join("sample.hdr");

        assert!(cmd_decompress(&input, None, Some(&meta), false, false).is_err());
        assert!(!dir.join("sample.bin").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}

//! Test command implementation.

use huffpack_huffman::Package;
use std::fs;
use std::path::PathBuf;

pub fn cmd_test(files: &[PathBuf], verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut ok_count = 0usize;
    let mut errors: Vec<(String, String)> = Vec::new();

    for file in files {
        let name = file.display().to_string();
        let result = fs::read(file)
            .map_err(huffpack_core::HuffpackError::from)
            .and_then(|bytes| Package::from_bytes(&bytes))
            .and_then(|package| package.decompress());

        match result {
            Ok(data) => {
                ok_count += 1;
                if verbose {
                    println!("  OK: {} ({} bytes)", name, data.len());
                }
            }
            Err(e) => {
                if verbose {
                    println!("  FAILED: {} - {}", name, e);
                }
                errors.push((name, e.to_string()));
            }
        }
    }

    println!();
    println!("Results:");
    println!("  Total files: {}", files.len());
    println!("  OK: {}", ok_count);
    println!("  Errors: {}", errors.len());

    if !errors.is_empty() {
        if !verbose {
            println!();
            println!("Failed files:");
            for (name, error) in &errors {
                println!("  {}: {}", name, error);
            }
        }
        return Err(format!("{} file(s) failed integrity check", errors.len()).into());
    }

    println!();
    println!("All files OK");
    Ok(())
}

//! Info command implementation.

use crate::utils::format_size;
use huffpack_huffman::{CodeTable, HuffmanTree, Package, PackageStats};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// JSON output structure for the info command.
#[derive(Serialize)]
struct InfoOutput {
    file: String,
    original_size: u64,
    package_size: u64,
    container_size: u64,
    metadata_size: u64,
    content_crc: String,
    distinct_symbols: usize,
    payload_bits: u64,
    padding_bits: u64,
    bits_per_symbol: f64,
    ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    codes: Option<Vec<CodeEntry>>,
}

#[derive(Serialize)]
struct CodeEntry {
    symbol: u8,
    frequency: u64,
    code: String,
}

pub fn cmd_info(
    file: &Path,
    json: bool,
    show_codes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let package = Package::from_bytes(&fs::read(file)?)?;
    let stats = package.stats();
    let codes = if show_codes {
        Some(code_entries(&package)?)
    } else {
        None
    };

    if json {
        let output = InfoOutput {
            file: file.display().to_string(),
            original_size: stats.original_size,
            package_size: stats.package_size,
            container_size: stats.container_size,
            metadata_size: stats.metadata_size,
            content_crc: format!("{:08x}", package.content_crc()),
            distinct_symbols: stats.distinct_symbols,
            payload_bits: stats.payload_bits,
            padding_bits: stats.padding_bits,
            bits_per_symbol: stats.bits_per_symbol,
            ratio: stats.ratio,
            codes,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_stats(file, &package, &stats);

    if let Some(codes) = codes {
        println!();
        println!("Code table:");
        println!("  {:>6}  {:>12}  Code", "Symbol", "Count");
        for entry in codes {
            println!("  {:>6}  {:>12}  {}", entry.symbol, entry.frequency, entry.code);
        }
    }

    Ok(())
}

fn print_stats(file: &Path, package: &Package, stats: &PackageStats) {
    for line in stats_lines(file, package, stats) {
        println!("{}", line);
    }
}

fn stats_lines(file: &Path, package: &Package, stats: &PackageStats) -> Vec<String> {
    let mut lines = vec![
        "Package Information".to_string(),
        "===================".to_string(),
        format!("File: {}", file.display()),
        format!(
            "Original size: {} ({} bytes)",
            format_size(stats.original_size),
            stats.original_size
        ),
        format!(
            "Package size: {} ({} bytes)",
            format_size(stats.package_size),
            stats.package_size
        ),
        format!("Container size: {} bytes", stats.container_size),
        format!("Metadata size: {} bytes", stats.metadata_size),
        format!("Content CRC-32: {:08x}", package.content_crc()),
        String::new(),
        "Coding:".to_string(),
        format!("  Distinct symbols: {}", stats.distinct_symbols),
        format!("  Payload bits: {}", stats.payload_bits),
        format!("  Padding bits: {}", stats.padding_bits),
    ];
    if stats.original_size > 0 {
        lines.push(format!("  Average code length: {:.3} bits", stats.bits_per_symbol));
        lines.push(format!("  Compression ratio: {:.3}", stats.ratio));
        lines.push(format!("  Space savings: {:.1}%", stats.space_savings()));
    }
    lines
}

/// Rebuild the code table from the stored frequencies.
fn code_entries(package: &Package) -> Result<Vec<CodeEntry>, Box<dyn std::error::Error>> {
    let frequencies = package.container().frequencies();
    if frequencies.is_empty() {
        return Ok(Vec::new());
    }

    let tree = HuffmanTree::build(frequencies)?;
    let table = CodeTable::generate(tree.root());
    Ok(table
        .iter()
        .map(|(symbol, code)| CodeEntry {
            symbol,
            frequency: frequencies.get(symbol).unwrap_or(0),
            code: code.to_string(),
        })
        .collect())
}

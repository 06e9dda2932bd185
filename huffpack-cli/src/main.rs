//! huffpack CLI - static Huffman compression for arbitrary files.

mod commands;
mod logging;
mod utils;

use clap::{Parser, Subcommand};
use commands::{CompressOptions, cmd_compress, cmd_decompress, cmd_info, cmd_test};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huffpack")]
#[command(author, version, about = "Pure Rust static Huffman compressor")]
#[command(long_about = "
huffpack compresses files with a static Huffman code. The code table travels
inside each .huf package, together with optional opaque metadata and a CRC-32
of the original content.

Examples:
  huffpack compress song.wav --metadata song.hdr
  huffpack compress *.log
  huffpack decompress song.wav.huf --metadata-out song.hdr
  huffpack test song.wav.huf
  huffpack info song.wav.huf --codes
")]
struct Cli {
    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files into .huf packages
    #[command(alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File stored verbatim as package metadata
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Skip decoding the result to verify it
        #[arg(long)]
        no_verify: bool,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a .huf package
    #[command(alias = "d", alias = "x")]
    Decompress {
        /// Package to decompress
        file: PathBuf,

        /// Output file (defaults to the input without .huf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the package metadata to this file
        #[arg(long)]
        metadata_out: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Decode packages and check their CRC
    #[command(alias = "t")]
    Test {
        /// Packages to test
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show statistics about a package
    #[command(alias = "i")]
    Info {
        /// Package to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Print the rebuilt code table
        #[arg(short, long)]
        codes: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    let verbose = cli.verbose > 0 && !cli.quiet;

    let result = match cli.command {
        Commands::Compress {
            files,
            output,
            metadata,
            no_verify,
            force,
        } => cmd_compress(
            &files,
            &CompressOptions {
                output,
                metadata,
                no_verify,
                force,
                verbose,
                progress: !cli.quiet,
            },
        ),
        Commands::Decompress {
            file,
            output,
            metadata_out,
            force,
        } => cmd_decompress(
            &file,
            output.as_deref(),
            metadata_out.as_deref(),
            force,
            verbose,
        ),
        Commands::Test { files } => cmd_test(&files, verbose),
        Commands::Info { file, json, codes } => cmd_info(&file, json, codes),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

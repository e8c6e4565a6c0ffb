mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{cmd_extract, cmd_load_psl, cmd_parse, cmd_tld};

#[derive(Parser)]
#[command(name = "urlscan")]
#[command(
    about = "URL and email extraction for anti-spam scanning",
    long_about = "urlscan - Find and normalize URLs and email addresses embedded in text\n\n\
    Scans plain-text or HTML bodies for URLs and email addresses, classifies each\n\
    host against a public-suffix list, and decodes obfuscated numeric hosts.\n\n\
    Examples:\n\
      urlscan extract message.txt --psl-file public_suffix_list.dat.gz\n\
      urlscan parse 'http://user@example.com:8080/path?q=1'\n\
      urlscan tld example.co.uk --psl-file public_suffix_list.dat.gz\n\
      urlscan load-psl public_suffix_list.dat -o normalized.txt"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract URLs and email addresses from text files or stdin
    Extract {
        /// Input files (one record per line), or "-" for stdin
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Suffix-list file to classify hosts against (plain or .gz)
        #[arg(long, value_name = "FILE")]
        psl_file: Option<PathBuf>,

        /// Output format: json (default, NDJSON) or text (raw URL per line)
        #[arg(long, default_value = "json")]
        format: String,

        /// Treat input as HTML (suppresses NOHTML matchers: bare @, ftp.)
        #[arg(long)]
        html: bool,

        /// Output only unique URLs (deduplicate by raw text)
        #[arg(short, long)]
        unique: bool,

        /// Show extraction statistics to stderr
        #[arg(short, long)]
        stats: bool,
    },

    /// Parse a single URL or mailto address and print its components
    Parse {
        /// The URL or mailto address to parse
        #[arg(value_name = "URL")]
        input: String,
    },

    /// Classify a host string against a suffix list
    Tld {
        /// The host to classify (e.g. "example.co.uk")
        #[arg(value_name = "HOST")]
        host: String,

        /// Suffix-list file to classify against (plain or .gz)
        #[arg(long, value_name = "FILE")]
        psl_file: Option<PathBuf>,
    },

    /// Load a suffix-list file and report accepted/skipped rule counts
    LoadPsl {
        /// Suffix-list file to load (plain or .gz)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the normalized, accepted patterns to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    urlscan::logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            inputs,
            psl_file,
            format,
            html,
            unique,
            stats,
        } => cmd_extract(inputs, psl_file, format, html, unique, stats),
        Commands::Parse { input } => cmd_parse(input),
        Commands::Tld { host, psl_file } => cmd_tld(host, psl_file),
        Commands::LoadPsl { file, output } => cmd_load_psl(file, output),
    }
}

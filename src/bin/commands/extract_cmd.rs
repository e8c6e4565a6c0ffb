use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use urlscan::matchers::MatcherSetBuilder;
use urlscan::{find_urls, Url};

use crate::cli_utils::{format_number, LineScanner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => anyhow::bail!("Invalid format '{}', expected: json or text", s),
        }
    }
}

#[derive(Default)]
struct ExtractionStats {
    lines_processed: usize,
    urls_found: usize,
    bytes_processed: usize,
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_extract(
    inputs: Vec<PathBuf>,
    psl_file: Option<PathBuf>,
    format: String,
    html: bool,
    unique: bool,
    stats: bool,
) -> Result<()> {
    let output_format = OutputFormat::from_str(&format)?;

    let mut builder = MatcherSetBuilder::new();
    if let Some(ref path) = psl_file {
        builder
            .add_suffix_file(path)
            .with_context(|| format!("failed to load suffix list: {}", path.display()))?;
    }
    let matchers = builder.build();

    let start_time = Instant::now();
    let mut total = ExtractionStats::default();
    let mut seen = if unique { Some(HashSet::new()) } else { None };

    let stdout = std::io::stdout();
    let mut writer = std::io::BufWriter::new(stdout.lock());

    for input_path in &inputs {
        process_file(
            input_path,
            &matchers,
            html,
            output_format,
            &mut total,
            &mut seen,
            &mut writer,
        )?;
    }
    writer.flush()?;

    if stats {
        let elapsed = start_time.elapsed();
        eprintln!();
        eprintln!("[INFO] Lines processed: {}", format_number(total.lines_processed));
        eprintln!("[INFO] URLs found: {}", format_number(total.urls_found));
        eprintln!(
            "[INFO] Throughput: {:.2} MB/s",
            if elapsed.as_secs_f64() > 0.0 {
                (total.bytes_processed as f64 / 1_000_000.0) / elapsed.as_secs_f64()
            } else {
                0.0
            }
        );
        eprintln!("[INFO] Total time: {:.2}s", elapsed.as_secs_f64());
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn process_file<W: Write>(
    input_path: &PathBuf,
    matchers: &urlscan::MatcherSet,
    html: bool,
    output_format: OutputFormat,
    stats: &mut ExtractionStats,
    seen: &mut Option<HashSet<String>>,
    writer: &mut W,
) -> Result<()> {
    let reader = urlscan::file_reader::open(input_path)
        .with_context(|| format!("failed to open {}", input_path.display()))?;

    let mut scanner = LineScanner::new(reader);
    let mut line_buf = Vec::with_capacity(4096);

    while scanner.read_line(&mut line_buf)? {
        stats.lines_processed += 1;
        stats.bytes_processed += line_buf.len();

        for url in find_urls(matchers, &line_buf, html) {
            if let Some(ref mut seen_set) = seen {
                if !seen_set.insert(url.raw.clone()) {
                    continue;
                }
            }
            write_url(writer, &url, output_format)?;
            stats.urls_found += 1;
        }
    }

    Ok(())
}

fn write_url<W: Write>(writer: &mut W, url: &Url, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let record = serde_json::json!({
                "raw": url.raw,
                "scheme": url.scheme_str(),
                "host": url.host_str(),
                "tld": url.tld_str(),
            });
            writeln!(writer, "{}", serde_json::to_string(&record)?)?;
        }
        OutputFormat::Text => writeln!(writer, "{}", url.raw)?,
    }
    Ok(())
}

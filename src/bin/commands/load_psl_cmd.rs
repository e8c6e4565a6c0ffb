use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use urlscan::matchers::load_suffix_rules;

pub fn cmd_load_psl(file: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let reader = urlscan::file_reader::open(&file)
        .with_context(|| format!("failed to open {}", file.display()))?;
    let lines: Vec<String> = reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("failed to read {}", file.display()))?;

    let total_rules = lines
        .iter()
        .map(|l| l.trim_end_matches(['\r', '\n']))
        .filter(|l| !l.is_empty() && !l.starts_with("//"))
        .count();

    let accepted = load_suffix_rules(std::io::Cursor::new(lines.join("\n")))?;
    let skipped = total_rules - accepted.len();

    println!(
        "{} rules accepted, {} skipped (exceptions or malformed lines)",
        accepted.len(),
        skipped
    );

    if let Some(out_path) = output {
        let mut out = File::create(&out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?;
        for matcher in &accepted {
            writeln!(out, "{}", String::from_utf8_lossy(&matcher.pattern))?;
        }
        println!("wrote {} patterns to {}", accepted.len(), out_path.display());
    }

    Ok(())
}

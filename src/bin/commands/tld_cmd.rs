use anyhow::{Context, Result};
use std::path::PathBuf;
use urlscan::matchers::MatcherSetBuilder;

pub fn cmd_tld(host: String, psl_file: Option<PathBuf>) -> Result<()> {
    let mut builder = MatcherSetBuilder::new();
    if let Some(ref path) = psl_file {
        builder
            .add_suffix_file(path)
            .with_context(|| format!("failed to load suffix list: {}", path.display()))?;
    }
    let matchers = builder.build();

    match matchers.find_tld(host.as_bytes()) {
        Some((begin, end)) => {
            println!("{}..{} => {}", begin, end, &host[begin..end]);
            Ok(())
        }
        None => {
            eprintln!("no TLD matched for '{host}'");
            std::process::exit(1);
        }
    }
}

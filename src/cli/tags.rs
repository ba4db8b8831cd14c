use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use writ::reader::{align, AlignedChunkSet, Alignment, ChunkIndex, ChunkPattern, Fields};

/// Show the chunk keys the given patterns resolve to
pub fn run(
    mut patterns: Vec<String>,
    parent: Option<PathBuf>,
    exact: bool,
    json: bool,
) -> Result<()> {
    let patterns = if patterns.len() == 1 {
        Fields::Single(patterns.remove(0))
    } else {
        Fields::Tuple(patterns)
    };

    let indexes = patterns.try_map(|template| {
        let pattern = match &parent {
            Some(parent) => ChunkPattern::with_parent(parent, &template),
            None => ChunkPattern::parse(template.as_str()),
        }
        .with_context(|| format!("Invalid pattern {:?}", template))?;
        ChunkIndex::build(pattern).with_context(|| format!("Failed to index {:?}", template))
    })?;

    let policy = if exact {
        Alignment::Exact
    } else {
        Alignment::Intersect
    };
    let sets = align(&indexes, policy).context("Failed to align patterns")?;
    info!("{} chunk keys resolved", sets.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&sets)?);
    } else {
        print_table(&indexes, &sets);
    }

    Ok(())
}

fn print_table(indexes: &Fields<ChunkIndex>, sets: &[AlignedChunkSet]) {
    for (i, index) in indexes.iter().enumerate() {
        println!(
            "Pattern {}: {} ({} files)",
            i + 1,
            index.pattern().template(),
            index.len()
        );
    }
    println!();

    for set in sets {
        let files: Vec<String> = set.files.iter().map(|p| p.display().to_string()).collect();

        #[cfg(feature = "colorized_output")]
        println!("{:>8}  {}", console::style(&set.key).bold(), files.join("  "));

        #[cfg(not(feature = "colorized_output"))]
        println!("{:>8}  {}", set.key, files.join("  "));
    }

    println!();
    println!("{} chunks", sets.len());
}

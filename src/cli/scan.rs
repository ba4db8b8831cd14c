use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

use writ::reader::SourceConfig;
use writ::store::Element;

use super::config::Config;
use super::DtypeArg;

/// Read every item of a configured source and print its shapes
pub fn run(config_path: PathBuf, dtype: DtypeArg, limit: Option<usize>) -> Result<()> {
    let config = Config::from_file(&config_path)?;
    let limit = limit.or(config.scan.limit);

    match dtype {
        DtypeArg::F32 => scan::<f32>(&config.source, limit),
        DtypeArg::F64 => scan::<f64>(&config.source, limit),
    }
}

fn scan<A: Element>(source: &SourceConfig, limit: Option<usize>) -> Result<()> {
    let start = Instant::now();
    let reader = source
        .open::<A>()
        .context("Failed to open configured source")?;
    info!("Planned {} items in {:.2?}", reader.len(), start.elapsed());

    let mut served = 0usize;
    for record in reader.records().take(limit.unwrap_or(usize::MAX)) {
        let (label, arrays) = record.with_context(|| format!("Failed after {} items", served))?;
        let shapes: Vec<String> = arrays
            .iter()
            .map(|array| format!("{:?}", array.shape()))
            .collect();
        println!("{:>8}  {}", label, shapes.join(" "));
        served += 1;
    }

    println!();
    println!(
        "Read {} of {} items in {:.2?}",
        served,
        reader.len(),
        start.elapsed()
    );

    Ok(())
}

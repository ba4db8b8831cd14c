use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use writ::store::{kinds, NpzContainer};

/// List the distinct field sets held by the groups of a container
pub fn run(container: PathBuf, json: bool) -> Result<()> {
    if !container.exists() {
        anyhow::bail!("File does not exist: {}", container.display());
    }

    let found = read_kinds(&container)
        .with_context(|| format!("Failed to list groups of {}", container.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    println!("Container: {}", container.display());
    println!("Field sets: {}", found.len());
    println!();
    for fields in &found {
        let names: Vec<&str> = fields.iter().map(String::as_str).collect();

        #[cfg(feature = "colorized_output")]
        println!("  {}", console::style(names.join(", ")).cyan());

        #[cfg(not(feature = "colorized_output"))]
        println!("  {}", names.join(", "));
    }

    Ok(())
}

fn read_kinds(path: &Path) -> Result<BTreeSet<BTreeSet<String>>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "npz" => Ok(kinds(&NpzContainer::<f64>::new(path))?),
        #[cfg(feature = "hdf5")]
        "h5" | "hdf5" | "h5py" | "he5" => Ok(kinds(&writ::store::H5Container::<f64>::new(path))?),
        other => anyhow::bail!("Unsupported container extension {:?}", other),
    }
}

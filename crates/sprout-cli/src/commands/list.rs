//! List command implementation
//!
//! Prints the sound catalog as a table.

use anyhow::Result;
use colored::Colorize;
use sprout_spec::{Catalog, SoundCategory, SoundDefinition};
use std::process::ExitCode;

/// Run the list command
///
/// # Arguments
/// * `catalog` - Catalog to print
/// * `category` - Only print this category
/// * `json` - Print the catalog document as JSON instead
pub fn run(catalog: &Catalog, category: Option<SoundCategory>, json: bool) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog.to_document())?);
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "{:<20} {:<12} {:<18} {:>8} {:>7}  {}",
        "ID".bold(),
        "CATEGORY".bold(),
        "ALGORITHM".bold(),
        "SECONDS".bold(),
        "VOLUME".bold(),
        "FREQUENCIES".bold()
    );

    let mut count = 0;
    for def in catalog.iter() {
        let def_category = def.id.category();
        if category.is_some_and(|c| c != def_category) {
            continue;
        }
        println!(
            "{:<20} {:<12} {:<18} {:>8.2} {:>7.2}  {}",
            def.id.as_str().cyan(),
            def_category.as_str(),
            def.algorithm.as_str(),
            def.duration,
            def.volume,
            format_frequencies(&frequencies_of(def))
        );
        count += 1;
    }

    println!("\n{} sounds", count.to_string().green().bold());
    if category.map_or(true, |c| c == SoundCategory::Music) {
        println!(
            "{} {} ({} candidates)",
            "music:".dimmed(),
            catalog.music().name,
            catalog.music().candidates.len()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn frequencies_of(def: &SoundDefinition) -> Vec<f64> {
    match (def.frequencies(), def.base_frequency) {
        ([], Some(base)) => vec![base],
        (set, _) => set.to_vec(),
    }
}

fn format_frequencies(freqs: &[f64]) -> String {
    if freqs.is_empty() {
        return "-".to_string();
    }
    freqs
        .iter()
        .map(|f| format!("{:.0}", f))
        .collect::<Vec<_>>()
        .join(" ")
}

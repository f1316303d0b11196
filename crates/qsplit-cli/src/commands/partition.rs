//! Partition command implementation.

use anyhow::Result;
use console::style;

use qsplit_compile::{PartitionMap, find_cross_partition_sites};

use super::common::load_document;

/// Execute the partition command.
pub fn execute(input: &str, partitions: usize, as_json: bool) -> Result<()> {
    let doc = load_document(input)?;
    let map = PartitionMap::for_document(&doc, partitions);
    let sites = find_cross_partition_sites(&doc, &map);

    if as_json {
        let value = serde_json::json!({
            "num_wires": doc.num_wires(),
            "num_partitions": map.num_partitions(),
            "assignment": map.assignment(),
            "sizes": map.sizes(),
            "cross_partition_sites": sites,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{} {} wires in {} partitions",
        style("→").cyan().bold(),
        doc.num_wires(),
        map.num_partitions()
    );
    println!();
    println!("  {:<10} {:<12} {}", "Partition", "Wires", "Size");
    for p in 0..map.num_partitions() {
        let wires = map.wires_in(p);
        let span = if wires.is_empty() {
            "-".to_string()
        } else {
            format!("{}..={}", wires.start, wires.end - 1)
        };
        println!("  {:<10} {:<12} {}", p, span, wires.len());
    }

    println!();
    if sites.is_empty() {
        println!("{} No cross-partition gates", style("✓").green().bold());
    } else {
        println!(
            "{} {} cross-partition gates:",
            style("!").yellow().bold(),
            sites.len()
        );
        for site in &sites {
            println!(
                "  column {:<4} {} {} → {}  (partitions {})",
                site.column,
                style(site.kind.op()).cyan(),
                site.source,
                site.target,
                site.pair
            );
        }
    }

    Ok(())
}

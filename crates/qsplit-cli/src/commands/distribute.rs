//! Distribute command implementation.

use anyhow::Result;
use console::style;

use qsplit_compile::{PassManagerBuilder, lower};
use qsplit_emit::emit;
use qsplit_ir::json;

use super::common::{load_document, parse_dialect, write_output};

/// Execute the distribute command.
pub fn execute(
    input: &str,
    partitions: usize,
    output: Option<&str>,
    emit_as: Option<&str>,
    validate: bool,
) -> Result<()> {
    let dialect = emit_as.map(parse_dialect).transpose()?;

    eprintln!(
        "{} Distributing {} over {} partitions",
        style("→").cyan().bold(),
        style(input).green(),
        style(partitions).yellow()
    );

    let mut doc = load_document(input)?;
    let original_wires = doc.num_wires();

    let (pm, mut props) = PassManagerBuilder::new()
        .with_partitions(partitions)
        .with_validation(validate)
        .build();
    eprintln!("  Running {} passes", pm.len());
    pm.run(&mut doc, &mut props)?;

    if let Some(map) = &props.partition_map {
        eprintln!("  Partition sizes: {:?}", map.sizes());
    }
    if let Some(report) = &props.rewrite_report {
        eprintln!(
            "  Rewrote {} gates, {} → {} wires",
            report.sites.len(),
            original_wires,
            doc.num_wires()
        );
        for link in &report.links {
            eprintln!(
                "    link {}: ancillas {} and {}",
                style(link.pair).cyan(),
                link.a,
                link.b
            );
        }
    }

    let text = match dialect {
        Some(dialect) => emit(&lower(&doc)?, dialect)?,
        None => json::to_json_pretty(&doc)?,
    };
    write_output(output, &text)?;

    eprintln!("{} Distribution complete", style("✓").green().bold());
    if let Some(path) = output {
        eprintln!("  Output: {}", style(path).green());
    }

    Ok(())
}

//! Export command implementation.

use anyhow::Result;
use console::style;

use qsplit_compile::lower;
use qsplit_emit::emit;

use super::common::{load_document, parse_dialect, write_output};

/// Execute the export command.
///
/// Status goes to stderr so the emitted program can be piped.
pub fn execute(input: &str, format: &str, output: Option<&str>) -> Result<()> {
    let dialect = parse_dialect(format)?;

    eprintln!(
        "{} Exporting {} as {}",
        style("→").cyan().bold(),
        style(input).green(),
        style(dialect).yellow()
    );

    let doc = load_document(input)?;
    eprintln!(
        "  Loaded: {} wires, {} columns",
        doc.num_wires(),
        doc.num_columns()
    );

    let program = lower(&doc)?;
    eprintln!(
        "  Lowered: {} instructions in {} columns",
        program.len(),
        program.num_columns()
    );

    let text = emit(&program, dialect)?;
    write_output(output, &text)?;

    eprintln!("{} Export complete", style("✓").green().bold());
    if let Some(path) = output {
        eprintln!("  Output: {}", style(path).green());
    }

    Ok(())
}

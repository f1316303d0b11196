//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - circuit lowering and partition rewriting",
        style("qsplit").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsplit-ir       Circuit documents, gate catalog, instruction stream");
    println!("  qsplit-compile  Lowering, partitioning, cross-partition rewriting");
    println!("  qsplit-emit     Dialect emitters");
    println!("  qsplit-cli      Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}

//! Dialects command implementation.

use console::style;

use qsplit_emit::Dialect;

/// Execute the dialects command.
pub fn execute() {
    println!("{}", style("Output dialects:").bold());
    for dialect in Dialect::ALL {
        println!(
            "  {:<8} {:<34} .{}",
            style(dialect.name()).cyan(),
            dialect.description(),
            dialect.extension()
        );
    }
}

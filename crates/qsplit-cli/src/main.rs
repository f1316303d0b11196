//! qsplit Command-Line Interface
//!
//! Lowers column-based circuit documents to text dialects and distributes
//! them over contiguous partitions of wires.
//!
//! ```text
//! qsplit export     -i bell.json -f qasm3
//! qsplit partition  -i bell.json -n 2
//! qsplit distribute -i bell.json -n 2 -o split.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{dialects, distribute, export, partition, version};

/// qsplit - lower and distribute quantum circuit documents
#[derive(Parser)]
#[command(name = "qsplit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower a circuit document and emit it in a dialect
    Export {
        /// Input document (JSON)
        #[arg(short, long)]
        input: String,

        /// Output dialect (qasm2, qasm3, qiskit, quil, pyquil, cirq, tfq, quest, qsharp, braket, qobj)
        #[arg(short, long, env = "QSPLIT_DIALECT", default_value = "qasm2")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Partition the wires and rewrite cross-partition gates
    Distribute {
        /// Input document (JSON)
        #[arg(short, long)]
        input: String,

        /// Number of partitions
        #[arg(short = 'n', long, env = "QSPLIT_PARTITIONS", default_value = "2")]
        partitions: usize,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Lower and emit in this dialect instead of writing the document
        #[arg(long)]
        emit: Option<String>,

        /// Skip validation of the rewritten document
        #[arg(long)]
        no_validate: bool,
    },

    /// Show the partition map and the gates that cross it
    Partition {
        /// Input document (JSON)
        #[arg(short, long)]
        input: String,

        /// Number of partitions
        #[arg(short = 'n', long, env = "QSPLIT_PARTITIONS", default_value = "2")]
        partitions: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List supported output dialects
    Dialects,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Export {
            input,
            format,
            output,
        } => export::execute(&input, &format, output.as_deref()),

        Commands::Distribute {
            input,
            partitions,
            output,
            emit,
            no_validate,
        } => distribute::execute(
            &input,
            partitions,
            output.as_deref(),
            emit.as_deref(),
            !no_validate,
        ),

        Commands::Partition {
            input,
            partitions,
            json,
        } => partition::execute(&input, partitions, json),

        Commands::Dialects => {
            dialects::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

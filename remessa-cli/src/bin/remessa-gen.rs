//! CLI tool to generate a CNAB400 remittance file from a JSON request.

use clap::Parser;
use remessa_cli::{build_remessa, load_request, overwrite_report, write_output};
use std::io::{self, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Generate a remittance file for the boletos in a request file.
#[derive(Parser)]
#[command(name = "remessa-gen")]
struct Cli {
    /// Request file (JSON: bank, config, boletos)
    input: String,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Show paths, bank, and record counts on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Report columns overwritten by later writes on stderr
    #[arg(long)]
    trace: bool,

    /// Log filter, e.g. "debug" or "cnab400_rs=trace"
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let remessa = match load_request(&cli.input).and_then(build_remessa) {
        Ok(remessa) => remessa,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!("Request: {}", cli.input);
        eprintln!("Output:  {}", cli.output.as_deref().unwrap_or("(stdout)"));
        eprintln!("Bank:    {} {}", remessa.bank().code(), remessa.bank().name());
    }

    let result = if cli.trace {
        remessa.generate_traced().map(|(text, trace)| {
            eprint!("{}", overwrite_report(&trace));
            text
        })
    } else {
        remessa.generate()
    };

    let text = match result {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Remittance error: {e}");
            process::exit(1);
        }
    };

    if let Some(out_path) = &cli.output {
        if let Err(e) = write_output(Path::new(out_path), &text) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    } else if let Err(e) = io::stdout().write_all(text.as_bytes()) {
        eprintln!("Error writing output: {e}");
        process::exit(1);
    }

    if cli.verbose {
        eprintln!("Records: {} boletos -> {} lines", remessa.len(), remessa.len() + 2);
    }
}

//! retrace CLI - retirement trace comparison

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, EXIT_FAILURE, EXIT_SUCCESS};
use retrace::{Result, TraceSet, compare, parse};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "retrace=debug"
    } else if cli.silent {
        "retrace=error"
    } else {
        "retrace=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(default_level.parse().unwrap()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(&cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_FAILURE
        }
    };
    std::process::exit(exit_code);
}

/// Parse both traces, compare them, and print the report.
///
/// Mismatches are the report, not a failure: the run exits 0 whether or not
/// the traces agree. Only unreadable input aborts.
fn run(cli: &Cli) -> Result<()> {
    let reference = parse::spike::parse_trace_file(&cli.spike, cli.reset_vector)?;
    println!("{} reference events parsed", reference.len());

    let rtl = parse::rtl::parse_trace_file(&cli.rtl)?;
    println!("{} design events parsed", rtl.len());

    let reference = TraceSet::from_events(reference);
    let rtl = TraceSet::from_events(rtl);

    let report = compare::compare_trace_sets(&reference, &rtl);
    for mismatch in &report.mismatches {
        println!("{mismatch}");
    }
    println!("{} events compared", report.compared);

    Ok(())
}

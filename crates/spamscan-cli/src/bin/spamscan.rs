// spamscan: report which records of a message file contain flagged phrases.
//
// Usage:
//   spamscan [OPTIONS] [PATH]
//
// Options:
//   -i, --input PATH       Input file (`-` for stdin)
//   --trace                Print every transition (default)
//   -q, --quiet            Do not print transitions
//   --overflow=POLICY      saturate | wrap | reject
//   -v, --verbose          Debug logging on stderr
//   -h, --help             Print help

use std::fs::File;
use std::io::{self, Read, Write};

use spamscan_cli::{CliConfig, ConsoleTrace, Input};
use spamscan_detect::{NoTrace, ReadSource, ScanOptions, SpamDetector};
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if spamscan_cli::wants_help(&args) {
        println!("spamscan: Report records containing flagged phrases.");
        println!();
        println!("Usage: spamscan [OPTIONS] [PATH]");
        println!();
        println!(
            "Reads <DOC> records from PATH (default: ${}, then ./{}).",
            spamscan_cli::INPUT_ENV,
            spamscan_cli::DEFAULT_INPUT
        );
        println!("Prints the transition trace, then the ids of flagged records.");
        println!();
        println!("Options:");
        println!("  -i, --input PATH       Input file (`-` for stdin)");
        println!("  --trace                Print every transition (default)");
        println!("  -q, --quiet            Do not print transitions");
        println!(
            "  --overflow=POLICY      saturate | wrap | reject (or ${})",
            spamscan_cli::OVERFLOW_ENV
        );
        println!("  -v, --verbose          Debug logging on stderr");
        println!("  -h, --help             Print this help");
        return;
    }

    let config = spamscan_cli::parse_args(
        &args,
        std::env::var(spamscan_cli::INPUT_ENV).ok(),
        std::env::var(spamscan_cli::OVERFLOW_ENV).ok(),
    )
    .unwrap_or_else(|e| spamscan_cli::fatal(&e));

    init_logging(&config);
    tracing::debug!(?config, "configuration resolved");

    let reader: Box<dyn Read> = match &config.input {
        Input::Stdin => Box::new(io::stdin().lock()),
        Input::File(path) => Box::new(File::open(path).unwrap_or_else(|e| {
            spamscan_cli::fatal(&format!("failed to open {}: {e}", path.display()))
        })),
    };

    let mut detector =
        SpamDetector::new().unwrap_or_else(|e| spamscan_cli::fatal(&e.to_string()));
    detector.set_options(ScanOptions {
        overflow: config.overflow,
        trace: false,
    });

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut source = ReadSource::new(reader);

    let result = if config.trace {
        let mut trace = ConsoleTrace::new(&mut out);
        detector.scan_with_observer(&mut source, &mut trace)
    } else {
        detector.scan_with_observer(&mut source, &mut NoTrace)
    };

    if let Some(e) = source.take_error() {
        let _ = out.flush();
        spamscan_cli::fatal(&format!("failed to read input: {e}"));
    }

    match result {
        Ok(report) => {
            tracing::debug!(
                flagged = report.flagged_ids.len(),
                records = report.records_closed,
                "scan finished"
            );
            let _ = writeln!(out, "{}", spamscan_cli::format_result(&report.flagged_ids));
        }
        Err(e) => {
            let _ = out.flush();
            spamscan_cli::fatal(&e.to_string());
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(config: &CliConfig) {
    let default = if config.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

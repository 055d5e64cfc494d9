// spamscan-cli: argument parsing, input resolution and console tracing.

use std::io::Write;
use std::path::PathBuf;
use std::process;

use spamscan_detect::{OverflowPolicy, TraceEvent, TraceObserver};

/// Input file used when nothing else is configured.
pub const DEFAULT_INPUT: &str = "messagefile.txt";

/// Environment variable naming the input file.
pub const INPUT_ENV: &str = "SPAMSCAN_INPUT";

/// Environment variable naming the overflow policy.
pub const OVERFLOW_ENV: &str = "SPAMSCAN_OVERFLOW";

/// Where the scan reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Input::Stdin
        } else {
            Input::File(PathBuf::from(arg))
        }
    }
}

/// Fully resolved command-line configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub input: Input,
    pub trace: bool,
    pub overflow: OverflowPolicy,
    pub verbose: bool,
}

/// Resolve the configuration from arguments and environment values.
///
/// Input search order:
/// 1. positional `PATH` or `-i/--input PATH` (`-` means stdin)
/// 2. `SPAMSCAN_INPUT`
/// 3. `./messagefile.txt`
///
/// `--overflow=POLICY` takes precedence over `SPAMSCAN_OVERFLOW`.
pub fn parse_args(
    args: &[String],
    env_input: Option<String>,
    env_overflow: Option<String>,
) -> Result<CliConfig, String> {
    let mut input = None;
    let mut trace = true;
    let mut verbose = false;
    let mut overflow_name = env_overflow;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix("--input=") {
            input = Some(Input::from_arg(val));
        } else if arg == "-i" || arg == "--input" {
            let val = iter
                .next()
                .ok_or_else(|| format!("{arg} requires a value"))?;
            input = Some(Input::from_arg(val));
        } else if let Some(val) = arg.strip_prefix("--overflow=") {
            overflow_name = Some(val.to_string());
        } else if arg == "--trace" {
            trace = true;
        } else if arg == "--quiet" || arg == "-q" {
            trace = false;
        } else if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else if arg == "-" || !arg.starts_with('-') {
            if input.is_some() {
                return Err(format!("unexpected argument: {arg}"));
            }
            input = Some(Input::from_arg(arg));
        } else {
            return Err(format!("unknown option: {arg}"));
        }
    }

    let input = input
        .or_else(|| {
            env_input
                .filter(|p| !p.is_empty())
                .map(|p| Input::from_arg(&p))
        })
        .unwrap_or_else(|| Input::File(PathBuf::from(DEFAULT_INPUT)));

    let overflow = match overflow_name {
        Some(name) => OverflowPolicy::from_name(&name).ok_or_else(|| {
            format!("unknown overflow policy: {name} (expected saturate, wrap or reject)")
        })?,
        None => OverflowPolicy::default(),
    };

    Ok(CliConfig {
        input,
        trace,
        overflow,
        verbose,
    })
}

/// Format the result line.
pub fn format_result(ids: &[u64]) -> String {
    let mut line = String::from("The following messages were spam:");
    for id in ids {
        line.push(' ');
        line.push_str(&id.to_string());
    }
    line
}

/// Writes `"state"-c->` for every step and `<end>` at the end of input.
///
/// The consumed byte is written raw, so the trace reproduces the input
/// interleaved with state names.
pub struct ConsoleTrace<W: Write> {
    out: W,
}

impl<W: Write> ConsoleTrace<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceObserver for ConsoleTrace<W> {
    fn observe(&mut self, event: TraceEvent<'_>) {
        match event {
            TraceEvent::Step { from, symbol, .. } => {
                let _ = write!(self.out, "\"{from}\"-");
                let _ = self.out.write_all(&[symbol]);
                let _ = write!(self.out, "->");
            }
            TraceEvent::End { .. } => {
                let _ = writeln!(self.out, "<end>");
            }
        }
    }
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let cfg = parse_args(&[], None, None).unwrap();
        assert_eq!(cfg.input, Input::File(PathBuf::from(DEFAULT_INPUT)));
        assert!(cfg.trace);
        assert!(!cfg.verbose);
        assert_eq!(cfg.overflow, OverflowPolicy::Saturate);
    }

    #[test]
    fn input_precedence() {
        let env = Some("from-env.txt".to_string());
        let cfg = parse_args(&args(&["mail.txt"]), env.clone(), None).unwrap();
        assert_eq!(cfg.input, Input::File(PathBuf::from("mail.txt")));

        let cfg = parse_args(&args(&["-i", "-"]), env.clone(), None).unwrap();
        assert_eq!(cfg.input, Input::Stdin);

        let cfg = parse_args(&args(&["--input=a.txt"]), env.clone(), None).unwrap();
        assert_eq!(cfg.input, Input::File(PathBuf::from("a.txt")));

        let cfg = parse_args(&[], env, None).unwrap();
        assert_eq!(cfg.input, Input::File(PathBuf::from("from-env.txt")));

        let cfg = parse_args(&[], Some(String::new()), None).unwrap();
        assert_eq!(cfg.input, Input::File(PathBuf::from(DEFAULT_INPUT)));
    }

    #[test]
    fn flags() {
        let cfg = parse_args(&args(&["-q", "-v", "--overflow=reject"]), None, None).unwrap();
        assert!(!cfg.trace);
        assert!(cfg.verbose);
        assert_eq!(cfg.overflow, OverflowPolicy::Reject);
    }

    #[test]
    fn overflow_from_env_is_overridden_by_flag() {
        let env = Some("wrap".to_string());
        let cfg = parse_args(&[], None, env.clone()).unwrap();
        assert_eq!(cfg.overflow, OverflowPolicy::Wrap);
        let cfg = parse_args(&args(&["--overflow=saturate"]), None, env).unwrap();
        assert_eq!(cfg.overflow, OverflowPolicy::Saturate);
    }

    #[test]
    fn errors() {
        assert!(parse_args(&args(&["-i"]), None, None).is_err());
        assert!(parse_args(&args(&["--bogus"]), None, None).is_err());
        assert!(parse_args(&args(&["a", "b"]), None, None).is_err());
        let err = parse_args(&args(&["--overflow=clamp"]), None, None).unwrap_err();
        assert!(err.contains("clamp"));
    }

    #[test]
    fn help_flag() {
        assert!(wants_help(&args(&["x", "-h"])));
        assert!(!wants_help(&args(&["x"])));
    }

    #[test]
    fn result_line() {
        assert_eq!(format_result(&[]), "The following messages were spam:");
        assert_eq!(
            format_result(&[42, 7]),
            "The following messages were spam: 42 7"
        );
    }

    #[test]
    fn console_trace_format() {
        let mut trace = ConsoleTrace::new(Vec::new());
        trace.observe(TraceEvent::Step {
            from: "start",
            symbol: b'<',
            to: "open_doc_0",
        });
        trace.observe(TraceEvent::Step {
            from: "open_doc_0",
            symbol: b'D',
            to: "open_doc_1",
        });
        trace.observe(TraceEvent::End { state: "open_doc_1" });
        let out = String::from_utf8(trace.into_inner()).unwrap();
        assert_eq!(out, "\"start\"-<->\"open_doc_0\"-D-><end>\n");
    }
}

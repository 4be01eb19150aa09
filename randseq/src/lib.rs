//! randseq: print `n` uniform [0, 1) random numbers on one line.
//!
//! # Usage
//!
//! ```bash
//! randseq 5
//! randseq --seed 42 --algorithm glibc 1000
//! ```
//!
//! # Exit Codes
//!
//! - 0: Sequence printed (also for `n <= 0`, which prints an empty line)
//! - 1: Missing or malformed `n`; `Usage: <program> n` goes to stderr

pub mod error;
pub mod logging;

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::io::{BufWriter, Write};
use std::process::ExitCode;
use tracing::{debug, error};
use unitrandom::{Algorithm, Seed, UnitSource};

pub use error::CliError;

const DEFAULT_PROGRAM: &str = "randseq";

#[derive(Parser, Debug)]
#[command(name = "randseq", version)]
#[command(about = "Print n uniform [0,1) random numbers, space-separated", long_about = None)]
struct Args {
    /// How many numbers to print (negative prints none)
    #[arg(value_name = "n", allow_negative_numbers = true, value_parser = parse_count)]
    count: i64,

    /// Random seed (defaults to OS entropy)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Random source
    #[arg(
        short = 'a',
        long = "algorithm",
        value_enum,
        ignore_case = true,
        default_value_t = Algorithm::Xoshiro
    )]
    algorithm: Algorithm,
}

/// Read `n` the way `parseInt` does: skip leading whitespace, take an
/// optional sign and the run of decimal digits after it, ignore the rest.
/// `"1.5"` is 1 and `"5abc"` is 5. No digits, or a value outside i64, fails.
pub fn parse_count(text: &str) -> Result<i64, String> {
    let trimmed = text.trim_start();
    let sign_len = match trimmed.as_bytes().first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digits_len == 0 {
        return Err(format!("{:?} does not start with an integer", text));
    }

    trimmed[..sign_len + digits_len]
        .parse::<i64>()
        .map_err(|e| format!("{:?}: {}", text, e))
}

/// Run the printer and map the outcome to a process exit code.
pub fn run<I, T, O, E>(args: I, out: &mut O, err: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    O: Write,
    E: Write,
{
    match execute(args, out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_broken_pipe() => {
            debug!("stdout closed early");
            ExitCode::SUCCESS
        }
        Err(e @ CliError::InvalidArgument { .. }) => {
            // Nothing more we can report if stderr is gone too
            let _ = writeln!(err, "{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Parse `args`, then write the sequence (or clap's help/version text) to `out`.
pub fn execute<I, T, O>(args: I, out: &mut O) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    O: Write,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

    let parsed = match Args::try_parse_from(&args) {
        Ok(parsed) => parsed,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", e.render())?;
            return Ok(());
        }
        Err(e) => {
            debug!(kind = ?e.kind(), "rejected arguments");
            return Err(CliError::InvalidArgument { program });
        }
    };

    // The count loop never runs for a non-positive bound
    let count = u64::try_from(parsed.count).unwrap_or(0);
    let seed = Seed::from(parsed.seed).resolve();
    debug!(algorithm = %parsed.algorithm, seed, count, "generating sequence");

    let mut source = parsed.algorithm.build(seed, count);
    write_sequence(&mut source, count, out)?;
    Ok(())
}

/// Write `count` draws from `source` separated by single spaces, then a newline.
pub fn write_sequence<S, O>(source: &mut S, count: u64, out: &mut O) -> std::io::Result<()>
where
    S: UnitSource,
    O: Write,
{
    let mut out = BufWriter::new(out);
    for (i, value) in source.draws(count).enumerate() {
        if i > 0 {
            out.write_all(b" ")?;
        }
        write!(out, "{}", value)?;
    }
    out.write_all(b"\n")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use unitrandom::Xoshiro256PlusPlus;

    fn execute_to_string(args: &[&str]) -> Result<String, CliError> {
        let mut out = Vec::new();
        execute(args.iter().copied(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn tokens(output: &str) -> Vec<f64> {
        output
            .split_whitespace()
            .map(|t| t.parse::<f64>().unwrap_or_else(|e| panic!("Bad token {:?}: {}", t, e)))
            .collect()
    }

    #[test]
    fn test_five_values_in_range() {
        let output = execute_to_string(&["randseq", "5"]).unwrap();
        assert!(output.ends_with('\n'));
        assert!(!output.starts_with(' '));
        assert!(!output.trim_end_matches('\n').ends_with(' '));

        let values = tokens(&output);
        assert_eq!(values.len(), 5);
        for v in values {
            assert!((0.0..1.0).contains(&v), "Value out of range: {}", v);
        }
    }

    #[test]
    fn test_zero_prints_empty_line() {
        assert_eq!(execute_to_string(&["randseq", "0"]).unwrap(), "\n");
    }

    #[test]
    fn test_negative_prints_empty_line() {
        assert_eq!(execute_to_string(&["randseq", "-3"]).unwrap(), "\n");
    }

    #[test]
    fn test_missing_argument_is_invalid() {
        let result = execute_to_string(&["randseq"]);
        assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
    }

    #[test]
    fn test_leading_integer_is_used() {
        for (arg, expected) in [("1.5", 1), ("5abc", 5), (" 7", 7), ("+3", 3), ("007", 7)] {
            let output = execute_to_string(&["randseq", arg])
                .unwrap_or_else(|e| panic!("{:?} rejected: {}", arg, e));
            assert_eq!(tokens(&output).len(), expected, "Wrong count for {:?}", arg);
        }
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("42"), Ok(42));
        assert_eq!(parse_count("  -12xyz"), Ok(-12));
        assert_eq!(parse_count("9e3"), Ok(9));
        assert_eq!(parse_count("-9223372036854775808"), Ok(i64::MIN));
        assert!(parse_count("").is_err());
        assert!(parse_count("-").is_err());
        assert!(parse_count(".5").is_err());
        assert!(parse_count("x12").is_err());
        assert!(parse_count("9223372036854775808").is_err());
    }

    #[test]
    fn test_non_numeric_argument_is_invalid() {
        for bad in ["abc", ".5", "", " ", "99999999999999999999"] {
            let result = execute_to_string(&["randseq", bad]);
            assert!(
                matches!(result, Err(CliError::InvalidArgument { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_extra_positional_is_invalid() {
        let result = execute_to_string(&["randseq", "3", "4"]);
        assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
    }

    #[test]
    fn test_usage_message_names_program() {
        let err = execute_to_string(&["./bin/randseq"]).unwrap_err();
        assert_eq!(err.to_string(), "Usage: ./bin/randseq n");
    }

    #[test]
    fn test_run_writes_usage_to_stderr_only() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(["randseq", "abc"], &mut out, &mut err);
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Usage: randseq n\n");
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let args = ["randseq", "--seed", "42", "20"];
        let first = execute_to_string(&args).unwrap();
        let second = execute_to_string(&args).unwrap();
        assert_eq!(first, second);
        assert_eq!(tokens(&first).len(), 20);
    }

    #[test]
    fn test_glibc_algorithm_first_value() {
        let output = execute_to_string(&["randseq", "-a", "glibc", "-s", "1", "1"]).unwrap();
        let values = tokens(&output);
        assert_eq!(values, vec![1804289383.0 / 2147483648.0]);
    }

    #[test]
    fn test_unknown_algorithm_is_invalid() {
        let result = execute_to_string(&["randseq", "-a", "mersenne", "3"]);
        assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let output = execute_to_string(&["randseq", "--help"]).unwrap();
        assert!(output.contains("Usage:"));
        assert!(output.contains("--seed"));
        assert!(output.contains("switch-mask-shift"), "help was {:?}", output);
    }

    #[test]
    fn test_algorithm_name_ignores_case() {
        let output = execute_to_string(&["randseq", "-a", "Tent-Hybrid", "-s", "3", "4"]).unwrap();
        assert_eq!(tokens(&output).len(), 4);
    }

    /// Writer that fails every call with the given error kind.
    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "write failed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(self.0, "flush failed"))
        }
    }

    #[test]
    fn test_broken_pipe_exits_success() {
        let mut out = FailingWriter(io::ErrorKind::BrokenPipe);
        let mut err = Vec::new();
        let code = run(["randseq", "10"], &mut out, &mut err);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(err.is_empty());
    }

    #[test]
    fn test_other_write_error_exits_failure() {
        let mut out = FailingWriter(io::ErrorKind::Other);
        let mut err = Vec::new();
        let code = run(["randseq", "10"], &mut out, &mut err);
        assert_eq!(code, ExitCode::FAILURE);
        assert!(err.is_empty());
    }

    #[test]
    fn test_write_sequence_tokens_round_trip() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
        let expected: Vec<f64> = Xoshiro256PlusPlus::seed_from_u64(9).draws(50).collect();

        let mut out = Vec::new();
        write_sequence(&mut rng, 50, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(tokens(&output), expected);
        assert_eq!(output.matches(' ').count(), 49);
    }
}

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Binary entry point for the cpumask-convert tool.
//!
//! This module is excluded from mutation testing because testing process entry/exit behavior
//! is impractical - it requires spawning subprocesses and checking exit codes.

use std::io::IsTerminal;
use std::process::ExitCode;

use argh::FromArgs;
use cpumask_convert::{Mode, RunInput, run};
use tracing::Level;

/// Exit code for a command line that does not name exactly one input.
const USAGE_EXIT_CODE: u8 = 2;

/// Convert a hexadecimal CPU affinity mask (e.g. ff or 0x0f,0x100) to a CPU list, or a CPU
/// list (e.g. 0-3,8) to a hexadecimal mask.
#[derive(FromArgs)]
struct Args {
    /// how to read the input (auto, mask, list); auto detects it
    #[argh(option)]
    mode: Option<Mode>,

    /// print CPU lists with ranges (0-3) instead of every CPU (0,1,2,3)
    #[argh(switch)]
    compact: bool,

    /// log details of the conversion to stderr
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// the hex mask or CPU list to convert
    #[argh(positional)]
    input: String,
}

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    let env_args: Vec<String> = std::env::args().collect();
    let str_args: Vec<&str> = env_args.iter().map(String::as_str).collect();

    let program_name = str_args.first().copied().unwrap_or("cpumask-convert");

    let args: Args = match Args::from_args(&[program_name], str_args.get(1..).unwrap_or(&[])) {
        Ok(args) => args,
        Err(early_exit) => {
            if early_exit.status.is_ok() {
                // --help was requested.
                println!("{}", early_exit.output);
                return ExitCode::SUCCESS;
            }

            eprintln!("{}", early_exit.output);
            if let Err(usage) = Args::from_args(&[program_name], &["--help"]) {
                eprintln!("{}", usage.output);
            }
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();

    let input = RunInput {
        input: args.input,
        mode: args.mode.unwrap_or_default(),
        compact: args.compact,
    };

    match run(&input) {
        Ok(outcome) => {
            println!("{}", outcome.output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

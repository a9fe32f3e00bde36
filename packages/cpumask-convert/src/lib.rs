#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A command-line tool that converts a hexadecimal CPU affinity mask to a CPU list, or a CPU
//! list to a mask, whichever it is given.
//!
//! This crate provides the core logic, exposed via the [`run`] function. The conversion itself
//! lives in the [`cpumask`] crate. The binary entry point is in `main.rs`.

mod types;

use cpumask::{Direction, InputKind, Mask};
use tracing::{debug, warn};
pub use types::*;

/// Core logic of the tool, extracted for testability.
///
/// This function contains all the business logic without any process-global dependencies
/// like `std::env::args()`, making it suitable for direct testing.
#[doc(hidden)]
pub fn run(input: &RunInput) -> Result<RunOutcome, cpumask::Error> {
    let (output, direction, kind) = match input.mode {
        Mode::Auto => {
            let conversion = cpumask::convert(&input.input)?;
            (conversion.output, conversion.direction, Some(conversion.kind))
        }
        Mode::Mask => (
            cpumask::decode_mask(&input.input)?,
            Direction::MaskToList,
            None,
        ),
        Mode::List => (
            cpumask::encode_list(&input.input)?,
            Direction::ListToMask,
            None,
        ),
    };

    debug!(input = %input.input, ?kind, ?direction, "converted");

    if kind == Some(InputKind::Ambiguous) {
        warn!(
            "'{}' is valid both as a hex mask and as a CPU list, treating it as a {}; \
             use --mode to choose explicitly",
            input.input,
            describe_source(direction)
        );
    }

    let output = if input.compact && direction == Direction::MaskToList {
        cpumask::emit(Mask::from_hex(&input.input)?.cpus())
    } else {
        output
    };

    Ok(RunOutcome {
        output,
        direction,
        kind,
    })
}

fn describe_source(direction: Direction) -> &'static str {
    match direction {
        Direction::MaskToList => "hex mask",
        Direction::ListToMask => "CPU list",
    }
}

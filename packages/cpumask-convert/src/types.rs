// Public API types for cpumask-convert.
//
// These types are used by main.rs and exposed via the crate's public API.

use cpumask::{Direction, InputKind};

/// Which way to convert the input.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum Mode {
    /// Detect from the input whether it is a mask or a list.
    #[default]
    Auto,
    /// The input is a hex mask, print it as a CPU list.
    Mask,
    /// The input is a CPU list, print it as a hex mask.
    List,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "mask" => Ok(Self::Mask),
            "list" => Ok(Self::List),
            _ => Err(format!(
                "Invalid mode: '{s}'. Valid options are: auto, mask, list"
            )),
        }
    }
}

/// Input parameters for the `run` function.
///
/// This is the parsed and validated input that the core logic operates on.
#[doc(hidden)]
#[derive(Debug)]
#[allow(
    clippy::exhaustive_structs,
    reason = "This is a hidden struct for internal/test use only"
)]
pub struct RunInput {
    /// The mask or CPU list to convert.
    pub input: String,
    /// Which way to convert the input.
    pub mode: Mode,
    /// Print CPU lists with ranges instead of every ID.
    pub compact: bool,
}

/// The outcome of a successful run.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(
    clippy::exhaustive_structs,
    reason = "This is a hidden struct for internal/test use only"
)]
pub struct RunOutcome {
    /// The converted value, ready to print.
    pub output: String,
    /// Which way the input was converted.
    pub direction: Direction,
    /// How the input was classified, if it was classified at all. Forced modes skip this.
    pub kind: Option<InputKind>,
}

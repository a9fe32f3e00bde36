#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Conversion between hexadecimal CPU affinity masks and the `cpulist` format used by Linux
//! utilities such as `taskset` and files such as `/sys/devices/system/cpu/online`.
//!
//! Example mask: `10f`. The same set of processors as a cpulist: `0,1,2,3,8` or `0-3,8`.
//!
//! # Masks
//!
//! A mask is a hexadecimal number where bit `i` set means processor `i` is selected. A `0x`
//! prefix is optional and digits may be in either case. Masks are emitted in lowercase without
//! a prefix, at least two digits wide.
//!
//! A mask may be supplied as several comma-separated segments. The segments are **added
//! together** as integers: `01,01` is the mask `2`, selecting processor 1. This lets callers
//! pass pre-shifted parts of a mask wider than one machine word.
//!
//! # Lists
//!
//! A cpulist is a comma-separated list of one or more items, where each item is either:
//!
//! * a single integer (e.g. `1`)
//! * a range of integers (e.g. `2-4`)
//! * a range of integers with a stride (step size) operator (e.g. `5-9:2` which is equivalent to `5,7,9`)
//!
//! Whitespace or extra characters are not allowed anywhere in the string.
//!
//! The identifiers in the list are of size `u32`.
//!
//! # Example
//!
//! ```
//! assert_eq!(cpumask::encode_list("0-3,8").unwrap(), "10f");
//! assert_eq!(cpumask::decode_mask("10f").unwrap(), "0,1,2,3,8");
//!
//! // When the caller does not know which of the two it has.
//! let conversion = cpumask::convert("0x10f").unwrap();
//! assert_eq!(conversion.output, "0,1,2,3,8");
//! ```
//!
//! Compact output with ranges is also available:
//!
//! ```
//! let mask: cpumask::Mask = "ff0f".parse().unwrap();
//!
//! assert_eq!(cpumask::emit(mask.cpus()), "0-3,8-15");
//! ```

mod convert;
mod emit;
mod error;
mod mask;
mod parse;

pub use convert::*;
pub use emit::*;
pub use error::*;
pub use mask::*;
pub use parse::*;

/// Numeric identifier of a processor, the unit of both masks and lists.
pub type CpuId = u32;

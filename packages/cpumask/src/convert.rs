use crate::{Error, Mask, emit_expanded};

/// Decodes a hexadecimal CPU mask into the canonical CPU list: ascending IDs, comma-separated,
/// without ranges. A zero mask yields an empty string.
///
/// Comma-separated segments are summed, see [`Mask::from_hex`].
///
/// ```
/// assert_eq!(cpumask::decode_mask("0x13").unwrap(), "0,1,4");
/// assert_eq!(cpumask::decode_mask("01,01").unwrap(), "1");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if a segment is not a valid hexadecimal number.
pub fn decode_mask(input: &str) -> crate::Result<String> {
    Ok(emit_expanded(Mask::from_hex(input)?.cpus()))
}

/// Encodes a CPU list (single IDs and `lo-hi` ranges) as a lowercase hexadecimal mask without
/// a prefix, at least two digits wide.
///
/// ```
/// assert_eq!(cpumask::encode_list("0").unwrap(), "01");
/// assert_eq!(cpumask::encode_list("0-3,8").unwrap(), "10f");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if a token is neither an integer nor a well-formed range.
pub fn encode_list(input: &str) -> crate::Result<String> {
    Ok(Mask::from_cpulist(input)?.to_hex())
}

/// What an input string looks like, judged by its characters alone.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum InputKind {
    /// Hex digits only, with at least one `0x` prefix or hex letter.
    Mask,

    /// Decimal IDs with at least one range.
    List,

    /// Plain decimal numbers, which read equally well as a mask and as a list.
    Ambiguous,

    /// Neither a mask nor a list.
    Unrecognized,
}

/// Which way an input was converted.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(
    clippy::exhaustive_enums,
    reason = "a conversion only ever goes one of these two ways"
)]
pub enum Direction {
    /// Hex mask in, CPU list out.
    MaskToList,

    /// CPU list in, hex mask out.
    ListToMask,
}

/// The result of [`convert()`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct Conversion {
    /// The converted value.
    pub output: String,

    /// Which way the input was converted.
    pub direction: Direction,

    /// How the input was classified. [`InputKind::Ambiguous`] means the direction was
    /// chosen by preference and the other reading would also have succeeded.
    pub kind: InputKind,
}

/// Classifies the input as a mask, a list or neither, without parsing it.
#[must_use]
pub fn classify(input: &str) -> InputKind {
    if input.is_empty() {
        return InputKind::Unrecognized;
    }

    let tokens = || input.split(',');

    if tokens().all(is_decimal_token) {
        InputKind::Ambiguous
    } else if tokens().all(is_hex_token) {
        InputKind::Mask
    } else if tokens().all(is_list_token) {
        InputKind::List
    } else {
        InputKind::Unrecognized
    }
}

/// Converts a hex mask to a CPU list or a CPU list to a hex mask, whichever the input is.
///
/// The direction is picked with [`classify()`]. Input that could be either (plain decimal
/// numbers such as `"3"`) is read as a mask first, and the returned [`Conversion::kind`] is
/// [`InputKind::Ambiguous`] so the caller can flag it.
///
/// ```
/// use cpumask::{Direction, InputKind};
///
/// let conversion = cpumask::convert("0-3").unwrap();
/// assert_eq!(conversion.output, "0f");
/// assert_eq!(conversion.direction, Direction::ListToMask);
///
/// let conversion = cpumask::convert("ff").unwrap();
/// assert_eq!(conversion.output, "0,1,2,3,4,5,6,7");
///
/// let conversion = cpumask::convert("3").unwrap();
/// assert_eq!(conversion.output, "0,1");
/// assert_eq!(conversion.kind, InputKind::Ambiguous);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the input clearly is a mask or a list but is malformed,
/// or [`Error::AmbiguousInput`] with both failure reasons if it reads as neither.
pub fn convert(input: &str) -> crate::Result<Conversion> {
    let kind = classify(input);

    let (output, direction) = match kind {
        InputKind::Mask => (decode_mask(input)?, Direction::MaskToList),
        InputKind::List => (encode_list(input)?, Direction::ListToMask),
        InputKind::Ambiguous | InputKind::Unrecognized => {
            match (decode_mask(input), encode_list(input)) {
                (Ok(output), _) => (output, Direction::MaskToList),
                (Err(_), Ok(output)) => (output, Direction::ListToMask),
                (Err(as_mask), Err(as_list)) => {
                    return Err(Error::AmbiguousInput {
                        input: input.to_string(),
                        as_mask: Box::new(as_mask),
                        as_list: Box::new(as_list),
                    });
                }
            }
        }
    };

    Ok(Conversion {
        output,
        direction,
        kind,
    })
}

/// Converts the input in the given direction, without classifying it first.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the input is not valid for that direction.
pub fn convert_as(input: &str, direction: Direction) -> crate::Result<String> {
    match direction {
        Direction::MaskToList => decode_mask(input),
        Direction::ListToMask => encode_list(input),
    }
}

fn is_decimal_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_hex_token(token: &str) -> bool {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_list_token(token: &str) -> bool {
    token.bytes().next().is_some_and(|b| b.is_ascii_digit())
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b'-' || b == b':')
}

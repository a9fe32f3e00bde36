use std::fmt;
use std::str::FromStr;

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

use crate::parse::{Span, parse_spans};
use crate::{CpuId, Error};

const BITS_PER_DIGIT: usize = 4;

/// Hex masks are never rendered with fewer digits than this (one byte).
const MIN_HEX_DIGITS: usize = 2;

/// A CPU affinity mask: a bitset where bit `i` is set if processor `i` is a member.
///
/// The mask has no fixed width. Its textual form is a hexadecimal number, optionally supplied
/// as several comma-separated segments that are summed (see [`Mask::from_hex`]).
///
/// ```
/// use cpumask::Mask;
///
/// let mask = Mask::from_cpus([0, 1, 2, 3, 8]);
/// assert_eq!(mask.to_string(), "10f");
///
/// let parsed: Mask = "0x10f".parse().unwrap();
/// assert_eq!(parsed, mask);
/// assert_eq!(parsed.cpus().collect::<Vec<_>>(), vec![0, 1, 2, 3, 8]);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Mask {
    // Never has trailing (high) zero bits, so equal masks have equal representations.
    bits: BitVec<u64, Lsb0>,
}

impl Mask {
    /// Creates a mask with no processors in it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mask with the given processors in it. Duplicates are ignored.
    #[must_use]
    pub fn from_cpus(ids: impl IntoIterator<Item = CpuId>) -> Self {
        let mut bits = BitVec::new();

        for id in ids {
            let index = bit_index(id);

            if index >= bits.len() {
                bits.resize(index.wrapping_add(1), false);
            }

            bits.set(index, true);
        }

        Self { bits }
    }

    /// Creates a mask from a [CPU list][crate::parse], filling in ranges without expanding
    /// them into individual IDs first.
    ///
    /// ```
    /// use cpumask::Mask;
    ///
    /// assert_eq!(Mask::from_cpulist("0-3,8").unwrap(), Mask::from_cpus([0, 1, 2, 3, 8]));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the text is not a valid CPU list.
    pub fn from_cpulist(cpulist: &str) -> crate::Result<Self> {
        let spans = parse_spans(cpulist)?;

        let width = spans
            .iter()
            .map(|span| bit_index(*span.ids.end()).wrapping_add(1))
            .max()
            .unwrap_or(0);

        let mut bits = BitVec::repeat(false, width);

        for span in &spans {
            set_span(&mut bits, span);
        }

        // A strided range does not necessarily include its end.
        let mut mask = Self { bits };
        mask.trim();
        Ok(mask)
    }

    /// Parses a hexadecimal mask.
    ///
    /// The input is one or more comma-separated segments, each of them hex digits with an
    /// optional `0x` prefix. The segments are added together as integers, so `"01,01"` is the
    /// mask `2` and not the mask `1`. Callers supplying masks wider than one machine word are
    /// expected to pass pre-shifted segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] naming the offending segment if a segment is empty or
    /// contains anything other than hex digits, or if the mask addresses a processor beyond
    /// the range of [`CpuId`].
    pub fn from_hex(text: &str) -> crate::Result<Self> {
        let mut sum = Self::new();

        for segment in text.split(',') {
            sum = sum.checked_add(&parse_segment(segment)?).ok_or_else(|| {
                Error::invalid_format(
                    text,
                    "mask addresses processors beyond the supported ID range",
                )
            })?;
        }

        Ok(sum)
    }

    /// Adds two masks as integers, with carry. This is not a union of the two sets:
    /// `1 + 1` is the mask `2`.
    ///
    /// Returns `None` if the sum has a bit set beyond the range of [`CpuId`].
    #[must_use]
    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        let width = self.bits.len().max(rhs.bits.len());

        let mut bits = BitVec::with_capacity(width.saturating_add(1));
        let mut carry = false;

        for index in 0..width {
            let (a, b) = (self.bit(index), rhs.bit(index));

            bits.push(a ^ b ^ carry);
            carry = (a && b) || (carry && (a ^ b));
        }

        if carry {
            bits.push(true);
        }

        let mut sum = Self { bits };
        sum.trim();

        fits_cpu_ids(sum.bits.len()).then_some(sum)
    }

    /// Whether no processor is in the mask.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Whether the given processor is in the mask.
    #[must_use]
    pub fn contains(&self, id: CpuId) -> bool {
        self.bit(bit_index(id))
    }

    /// The processors in the mask, in ascending order.
    pub fn cpus(&self) -> impl Iterator<Item = CpuId> + '_ {
        self.bits.iter_ones().map(|index| {
            CpuId::try_from(index).expect("mask width is limited to the CpuId range on creation")
        })
    }

    /// Renders the mask as lowercase hex without a prefix, zero-padded to at least two digits.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let digit_count = self
            .bits
            .len()
            .div_ceil(BITS_PER_DIGIT)
            .max(MIN_HEX_DIGITS);

        (0..digit_count)
            .rev()
            .map(|digit| {
                let lowest_bit = digit.wrapping_mul(BITS_PER_DIGIT);

                let value = (0..BITS_PER_DIGIT)
                    .filter(|offset| self.bit(lowest_bit.wrapping_add(*offset)))
                    .fold(0_u32, |acc, offset| acc | (1 << offset));

                char::from_digit(value, 16).expect("a value of four bits is always a hex digit")
            })
            .collect()
    }

    fn bit(&self, index: usize) -> bool {
        self.bits.get(index).is_some_and(|bit| *bit)
    }

    fn trim(&mut self) {
        let len = self.bits.last_one().map_or(0, |highest| highest.wrapping_add(1));
        self.bits.truncate(len);
    }
}

/// Parses a single hex segment, without any summing.
fn parse_segment(segment: &str) -> crate::Result<Mask> {
    let digits = segment
        .strip_prefix("0x")
        .or_else(|| segment.strip_prefix("0X"))
        .unwrap_or(segment);

    if digits.is_empty() {
        return Err(Error::invalid_format(segment, "expected hexadecimal digits"));
    }

    let mut bits = BitVec::with_capacity(digits.len().saturating_mul(BITS_PER_DIGIT));

    // Least significant digit comes last in the text but first in the bitset.
    for c in digits.chars().rev() {
        let value = c.to_digit(16).ok_or_else(|| {
            Error::invalid_format(segment, format!("'{c}' is not a hexadecimal digit"))
        })?;

        for offset in 0..BITS_PER_DIGIT {
            bits.push(value & (1 << offset) != 0);
        }
    }

    let mut mask = Mask { bits };
    mask.trim();

    if !fits_cpu_ids(mask.bits.len()) {
        return Err(Error::invalid_format(
            segment,
            "mask addresses processors beyond the supported ID range",
        ));
    }

    Ok(mask)
}

fn set_span(bits: &mut BitVec<u64, Lsb0>, span: &Span) {
    let start = bit_index(*span.ids.start());
    let end = bit_index(*span.ids.end());

    if span.stride == 1 {
        if let Some(run) = bits.get_mut(start..=end) {
            run.fill(true);
        }
    } else {
        for index in (start..=end).step_by(span.stride) {
            bits.set(index, true);
        }
    }
}

/// Whether a mask of this many bits only addresses IDs that fit in [`CpuId`].
fn fits_cpu_ids(width: usize) -> bool {
    width
        .checked_sub(1)
        .is_none_or(|highest| CpuId::try_from(highest).is_ok())
}

fn bit_index(id: CpuId) -> usize {
    usize::try_from(id).expect("CpuId always fits in usize on supported targets")
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Mask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

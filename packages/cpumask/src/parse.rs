use std::ops::RangeInclusive;

use itertools::Itertools;

use crate::{CpuId, Error};

/// One token of a CPU list: a single ID is a span of length one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Span {
    pub(crate) ids: RangeInclusive<CpuId>,
    pub(crate) stride: usize,
}

impl Span {
    fn single(id: CpuId) -> Self {
        Self {
            ids: id..=id,
            stride: 1,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = CpuId> {
        self.ids.clone().step_by(self.stride)
    }
}

/// Parses a [CPU list][crate] and returns the processor IDs in ascending order, removing
/// duplicates.
///
/// Each comma-separated token is a single ID (`5`), an inclusive range (`2-4`) or an inclusive
/// range with a stride (`5-9:2`). Overlapping tokens are fine, each ID is reported once.
///
/// Unlike the kernel, we do not accept an empty list or empty tokens: a CPU list handed to us
/// is expected to name at least one processor.
pub fn parse(cpulist: &str) -> crate::Result<Vec<CpuId>> {
    Ok(parse_spans(cpulist)?
        .iter()
        .flat_map(Span::iter)
        .sorted()
        .dedup()
        .collect())
}

/// Parses a CPU list into its tokens without expanding the ranges.
pub(crate) fn parse_spans(cpulist: &str) -> crate::Result<Vec<Span>> {
    if cpulist.is_empty() {
        return Err(Error::invalid_format(
            cpulist,
            "a CPU list must name at least one processor",
        ));
    }

    cpulist.split(',').map(parse_part).collect()
}

fn parse_part(part: &str) -> crate::Result<Span> {
    if part.is_empty() {
        return Err(Error::invalid_format(part, "empty entry between separators"));
    }

    if let Some((range_start, range_end_inc)) = part.split_once('-') {
        parse_range(range_start, range_end_inc)
    } else {
        parse_id(part, "entry is not a range but is not an integer either").map(Span::single)
    }
}

fn parse_range(range_start: &str, range_end_inc: &str) -> crate::Result<Span> {
    let range_start = parse_id(range_start, "range start is not an integer")?;

    // If no stride is specified, we just default to 1 and pretend it was specified.
    let (range_end_inc, stride) = match range_end_inc.split_once(':') {
        Some((range_end_inc, stride)) => (
            parse_id(range_end_inc, "range end is not an integer")?,
            parse_id(stride, "range stride is not an integer")?,
        ),
        None => (parse_id(range_end_inc, "range end is not an integer")?, 1),
    };

    if stride == 0 {
        return Err(Error::invalid_format(
            format!("{range_start}-{range_end_inc}:{stride}"),
            "range stride must not be zero",
        ));
    }

    if range_start > range_end_inc {
        return Err(Error::invalid_format(
            format!("{range_start}-{range_end_inc}"),
            "range start must be <= end",
        ));
    }

    let stride = usize::try_from(stride)
        .map_err(|_inner| Error::invalid_format(stride.to_string(), "range stride is too large"))?;

    Ok(Span {
        ids: range_start..=range_end_inc,
        stride,
    })
}

/// Parses a plain decimal processor ID.
///
/// `str::parse` would also accept a leading `+`, which is not part of the CPU list syntax.
fn parse_id(text: &str, problem: &str) -> crate::Result<CpuId> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_format(text, problem));
    }

    text.parse::<CpuId>()
        .map_err(|inner| Error::invalid_format(text, format!("{problem}: {inner}")))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parse_smoke_test() {
        assert_eq!(parse("555").unwrap(), vec![555]);

        assert_eq!(parse("0,1,2,3").unwrap(), vec![0, 1, 2, 3]);

        assert_eq!(parse("2,3,1").unwrap(), vec![1, 2, 3]);

        assert_eq!(parse("0-3").unwrap(), vec![0, 1, 2, 3]);

        assert_eq!(parse("0-5,1-6").unwrap(), vec![0, 1, 2, 3, 4, 5, 6]);

        assert_eq!(parse("0-3,2-5").unwrap(), vec![0, 1, 2, 3, 4, 5]);

        assert_eq!(parse("0-0:5").unwrap(), vec![0]);

        assert_eq!(parse("0-0,1-1,3-3").unwrap(), vec![0, 1, 3]);
        assert_eq!(
            parse("0-10:3,5-15:3").unwrap(),
            vec![0, 3, 5, 6, 8, 9, 11, 14]
        );

        assert_eq!(parse("0-10:999999").unwrap(), vec![0]);

        assert_eq!(
            parse("0,1,2-4,5-9:2,6-10:2").unwrap(),
            vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]
        );
    }

    #[test]
    fn range_at_end_of_id_space() {
        assert_eq!(
            parse("4294967294-4294967295").unwrap(),
            vec![4_294_967_294, 4_294_967_295]
        );
    }

    #[test]
    fn empty_is_error() {
        parse("").unwrap_err();
        parse("1,,2").unwrap_err();
        parse("1,").unwrap_err();
        parse(",1").unwrap_err();
    }

    #[test]
    fn zero_stride_is_error() {
        parse("1-22:0").unwrap_err();
    }

    #[test]
    fn range_direction_fail_is_error() {
        let error = parse("3-1").unwrap_err();

        assert!(matches!(
            error,
            Error::InvalidFormat { ref invalid_value, .. } if invalid_value == "3-1"
        ));
    }

    #[test]
    fn garbage_is_error() {
        parse("foo").unwrap_err();
        parse("123-foo").unwrap_err();
        parse("foo-123").unwrap_err();
        parse("123-456:foo").unwrap_err();
        parse("123-foo:456").unwrap_err();
        parse("1-2-3").unwrap_err();
        parse("+5").unwrap_err();
        parse(" 5").unwrap_err();
        parse("4294967296").unwrap_err();
    }

    #[test]
    fn spans_keep_ranges_unexpanded() {
        assert_eq!(
            parse_spans("7,0-4000000000,2-8:3").unwrap(),
            vec![
                Span::single(7),
                Span {
                    ids: 0..=4_000_000_000,
                    stride: 1,
                },
                Span {
                    ids: 2..=8,
                    stride: 3,
                },
            ]
        );
    }

    #[test]
    fn error_names_offending_token() {
        let error = parse("1,2,x7,4").unwrap_err();

        assert!(matches!(
            error,
            Error::InvalidFormat { ref invalid_value, .. } if invalid_value == "x7"
        ));
    }
}

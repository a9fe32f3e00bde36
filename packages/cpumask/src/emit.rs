use std::collections::VecDeque;

use itertools::{FoldWhile, Itertools};

use crate::CpuId;

/// Generates the canonical CPU list for a set of processor IDs: every ID spelled out in
/// ascending order, comma-separated, without ranges.
///
/// This is the form produced when decoding a mask. An empty set yields an empty string.
pub fn emit_expanded(ids: impl IntoIterator<Item = CpuId>) -> String {
    ids.into_iter().sorted_unstable().dedup().join(",")
}

/// Generates a compact CPU list that can be parsed by [`parse()`][crate::parse], coalescing
/// runs of consecutive IDs into ranges.
///
/// The exact emitted representation is unspecified and may change across versions of this crate.
/// All we promise is that it is a recognizable CPU list and can be parsed by this crate.
pub fn emit(ids: impl IntoIterator<Item = CpuId>) -> String {
    // Sorted remaining IDs that we have not yet grouped.
    let mut remaining = ids
        .into_iter()
        .unique()
        .sorted_unstable()
        .collect::<VecDeque<_>>();

    // Each group is (start ID, len).
    let mut groups: Vec<(CpuId, CpuId)> = Vec::new();

    while !remaining.is_empty() {
        let group = remaining
            .iter()
            .fold_while(None, |acc: Option<(CpuId, CpuId)>, id: &CpuId| {
                if let Some((start, len)) = acc {
                    if start.checked_add(len) == Some(*id) {
                        FoldWhile::Continue(Some((start, len.wrapping_add(1))))
                    } else {
                        FoldWhile::Done(Some((start, len)))
                    }
                } else {
                    FoldWhile::Continue(Some((*id, 1)))
                }
            });

        let (start, len) = group
            .into_inner()
            .expect("this must be Some if we still have remaining IDs");

        groups.push((start, len));

        for _ in 0..len {
            remaining.pop_front();
        }
    }

    groups
        .into_iter()
        .map(|(start, len)| {
            // A group is never empty and never extends past CpuId::MAX, so this cannot wrap.
            let end = start.wrapping_add(len).wrapping_sub(1);

            match len {
                1 => start.to_string(),
                2 => format!("{start},{end}"),
                _ => format!("{start}-{end}"),
            }
        })
        .join(",")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn emit_expanded_smoke_test() {
        assert_eq!(emit_expanded([]), "");

        assert_eq!(emit_expanded([0]), "0");

        assert_eq!(emit_expanded([3, 1, 2, 0]), "0,1,2,3");

        assert_eq!(emit_expanded([5, 5, 1, 5]), "1,5");
    }

    #[test]
    fn emit_smoke_test() {
        assert_eq!(emit([]), "");

        assert_eq!(emit([555]), "555");

        assert_eq!(emit([555, 666]), "555,666");

        assert_eq!(emit([0, 1, 2, 3]), "0-3");

        assert_eq!(emit([0, 1, 2, 3, 6, 7, 8, 11, 12, 13]), "0-3,6-8,11-13");

        assert_eq!(emit([1, 2, 3]), "1-3");

        assert_eq!(emit([0, 1, 3]), "0,1,3");

        assert_eq!(emit([0, 3, 5, 6, 8, 9, 11, 14]), "0,3,5,6,8,9,11,14");

        assert_eq!(emit([3, 2, 1, 0, 2]), "0-3");
    }

    #[test]
    fn emit_at_end_of_id_space() {
        assert_eq!(
            emit([CpuId::MAX - 2, CpuId::MAX - 1, CpuId::MAX]),
            "4294967293-4294967295"
        );
    }

    #[test]
    fn emitted_list_parses_back() {
        let ids = vec![0, 1, 2, 7, 9, 10, 11, 12, 40];

        assert_eq!(crate::parse(&emit(ids.iter().copied())).unwrap(), ids);
    }
}

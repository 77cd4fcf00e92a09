use itertools::Itertools;
use std::collections::BTreeMap;

use crate::libs::interval::ScoredInterval;

/// A maximal group of transitively overlapping intervals on one sequence,
/// sorted by `(start, end, id)`
pub type Pile = Vec<ScoredInterval>;

/// Partitions `intervals` into piles.
///
/// Sequences are visited in lexicographic order. Within a sequence the
/// intervals are swept by `(start, end, id)`; a new pile starts when the next
/// start lies beyond the running maximum end. The result depends only on the
/// set of intervals, not on their input order.
///
/// ```
/// # use gaqc::libs::interval::ScoredInterval;
/// # use gaqc::libs::pile::piles;
/// let input = vec![
///     ScoredInterval::new("c", "chr1", 30, 40, 1.0),
///     ScoredInterval::new("a", "chr1", 1, 10, 1.0),
///     ScoredInterval::new("b", "chr1", 5, 20, 1.0),
/// ];
/// let piles = piles(input);
/// assert_eq!(piles.len(), 2);
/// assert_eq!(piles[0].len(), 2);
/// assert_eq!(piles[1][0].id, "c");
/// ```
pub fn piles(intervals: Vec<ScoredInterval>) -> Vec<Pile> {
    let mut intervals_of: BTreeMap<String, Vec<ScoredInterval>> = BTreeMap::new();
    for itv in intervals {
        intervals_of.entry(itv.seqid.clone()).or_default().push(itv);
    }

    let mut piles: Vec<Pile> = vec![];
    for (_, intervals) in intervals_of {
        let mut current: Pile = vec![];
        let mut running_max = 0;

        for itv in intervals.into_iter().sorted_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.end.cmp(&b.end))
                .then_with(|| a.id.cmp(&b.id))
        }) {
            if current.is_empty() {
                running_max = itv.end;
            } else if itv.start > running_max {
                piles.push(std::mem::take(&mut current));
                running_max = itv.end;
            } else {
                running_max = running_max.max(itv.end);
            }
            current.push(itv);
        }

        if !current.is_empty() {
            piles.push(current);
        }
    }

    piles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn itv(id: &str, seqid: &str, start: u64, end: u64) -> ScoredInterval {
        ScoredInterval::new(id, seqid, start, end, 1.0)
    }

    fn ids(piles: &[Pile]) -> Vec<Vec<&str>> {
        piles
            .iter()
            .map(|p| p.iter().map(|x| x.id.as_str()).collect())
            .collect()
    }

    #[test]
    fn transitive_overlap_joins_one_pile() {
        // a and c do not touch, b bridges them
        let input = vec![
            itv("a", "chr1", 1, 10),
            itv("b", "chr1", 8, 15),
            itv("c", "chr1", 14, 30),
        ];
        assert_eq!(ids(&piles(input)), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn running_max_is_kept_across_short_members() {
        // b is nested in a, c overlaps a but not b
        let input = vec![
            itv("a", "chr1", 1, 100),
            itv("b", "chr1", 5, 10),
            itv("c", "chr1", 50, 120),
        ];
        assert_eq!(ids(&piles(input)), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn shared_endpoint_overlaps_adjacent_does_not() {
        let input = vec![itv("a", "chr1", 1, 10), itv("b", "chr1", 10, 20)];
        assert_eq!(piles(input).len(), 1);

        let input = vec![itv("a", "chr1", 1, 10), itv("b", "chr1", 11, 20)];
        assert_eq!(ids(&piles(input)), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn sequences_never_share_a_pile() {
        let input = vec![
            itv("b", "chr2", 1, 10),
            itv("a", "chr1", 1, 10),
            itv("c", "chr2", 5, 6),
        ];
        assert_eq!(ids(&piles(input)), vec![vec!["a"], vec!["b", "c"]]);
    }

    #[test]
    fn identical_coordinates_break_ties_on_id() {
        let input = vec![
            itv("z", "chr1", 1, 10),
            itv("m", "chr1", 1, 10),
            itv("a", "chr1", 1, 10),
        ];
        assert_eq!(ids(&piles(input)), vec![vec!["a", "m", "z"]]);
    }

    #[test]
    fn piles_partition_the_input() {
        let mut input = vec![];
        for i in 0..200u64 {
            let start = (i * 37) % 1000 + 1;
            let seqid = if i % 3 == 0 { "chr1" } else { "chr2" };
            input.push(itv(&format!("g{:03}", i), seqid, start, start + (i % 11) * 7));
        }
        let total = input.len();

        let piles = piles(input);
        assert!(piles.iter().all(|p| !p.is_empty()));
        assert_eq!(piles.iter().map(|p| p.len()).sum::<usize>(), total);

        // members of different piles on one sequence never overlap
        for (i, p) in piles.iter().enumerate() {
            for q in &piles[i + 1..] {
                for x in p {
                    assert!(q.iter().all(|y| !x.overlaps(y)));
                }
            }
        }
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let mut input = vec![];
        for i in 0..100u64 {
            let start = (i * 53) % 700 + 1;
            input.push(itv(&format!("g{:03}", i), "chr1", start, start + (i % 5) * 9));
        }
        let expected = piles(input.clone());

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..10 {
            input.shuffle(&mut rng);
            assert_eq!(piles(input.clone()), expected);
        }
    }
}

use crate::libs::interval::ScoredInterval;

/// The chosen non-overlapping members of a pile, ordered by end coordinate
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    pub members: Vec<&'a ScoredInterval>,
    pub score: f64,
}

impl<'a> Selection<'a> {
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.members.iter().map(|&x| x.id.as_str())
    }
}

/// Weighted interval scheduling over one pile.
///
/// Members are ordered by `(end, start, id)`. `p(i)` counts the members that
/// end strictly before member `i` starts, and
/// `best[i + 1] = max(best[i], score_i + best[p(i)])`.
///
/// When taking member `i` ties with skipping it, `i` is taken, so among
/// equally scoring chains the one reaching the later-ending member wins.
///
/// ```
/// # use gaqc::libs::interval::ScoredInterval;
/// # use gaqc::libs::select::best_chain;
/// let pile = vec![
///     ScoredInterval::new("A", "chr1", 1, 10, 4.0),
///     ScoredInterval::new("B", "chr1", 5, 15, 6.0),
///     ScoredInterval::new("C", "chr1", 12, 20, 5.0),
/// ];
/// let chain = best_chain(&pile);
/// assert_eq!(chain.ids().collect::<Vec<_>>(), vec!["A", "C"]);
/// assert_eq!(chain.score, 9.0);
/// ```
pub fn best_chain(pile: &[ScoredInterval]) -> Selection {
    let mut order: Vec<&ScoredInterval> = pile.iter().collect();
    order.sort_by(|a, b| {
        a.end
            .cmp(&b.end)
            .then(a.start.cmp(&b.start))
            .then_with(|| a.id.cmp(&b.id))
    });
    let ends: Vec<u64> = order.iter().map(|x| x.end).collect();

    let n = order.len();
    // best[k]: optimum over the first k members
    let mut best = vec![0.0f64; n + 1];
    let mut prev = vec![0usize; n];
    let mut taken = vec![false; n];

    for (i, itv) in order.iter().enumerate() {
        // ends[..i] is sorted, so the compatible members form a prefix
        let p = ends[..i].partition_point(|&e| e < itv.start);
        prev[i] = p;

        let with = itv.score + best[p];
        if with >= best[i] {
            best[i + 1] = with;
            taken[i] = true;
        } else {
            best[i + 1] = best[i];
        }
    }

    let mut members = vec![];
    let mut k = n;
    while k > 0 {
        let i = k - 1;
        if taken[i] {
            members.push(order[i]);
            k = prev[i];
        } else {
            k = i;
        }
    }
    members.reverse();

    Selection {
        members,
        score: best[n],
    }
}

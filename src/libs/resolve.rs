//! Overlap resolution of gene models.
//!
//! Candidates are scored from their transcripts, clustered into piles of
//! overlapping models, and each pile keeps its best non-overlapping chain.

use log::{debug, warn};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::io::Write;

use crate::libs::error::{QcError, Result};
use crate::libs::gff::{Gff, AED_KEY};
use crate::libs::interval::ScoredInterval;
use crate::libs::pile::piles;
use crate::libs::select::best_chain;
use crate::libs::sizes::Sizes;

/// Feature types that make up a candidate
#[derive(Debug, Clone)]
pub struct Options {
    /// Top-level candidates, e.g. `gene`
    pub candidate: String,
    /// Scored children of a candidate, e.g. `mRNA`
    pub transcript: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            candidate: "gene".to_string(),
            transcript: "mRNA".to_string(),
        }
    }
}

/// Builds one interval per top-level candidate.
///
/// Every transcript of a candidate is scored as `(1 - AED) * length`; the
/// best one, the first in file order on ties, provides the candidate's score
/// and coordinates.
pub fn score_candidates(gff: &Gff, sizes: &Sizes, opt: &Options) -> Result<Vec<ScoredInterval>> {
    let mut intervals: Vec<ScoredInterval> = vec![];
    let mut seen: HashSet<&str> = HashSet::new();

    for candidate in gff.top_level().filter(|f| f.kind == opt.candidate) {
        let id = candidate.id().ok_or_else(|| {
            QcError::missing_attribute(
                format!("{}:{}-{}", candidate.seqid, candidate.start, candidate.end),
                "ID",
            )
        })?;
        if !seen.insert(id) {
            return Err(QcError::DuplicateId { id: id.to_string() });
        }

        let mut best: Option<ScoredInterval> = None;
        for transcript in gff.children(id).filter(|f| f.kind == opt.transcript) {
            let tid = transcript
                .id()
                .ok_or_else(|| QcError::missing_attribute(format!("child of {}", id), "ID"))?;
            let aed = transcript
                .attributes
                .aed
                .ok_or_else(|| QcError::missing_attribute(tid, AED_KEY))?;
            let length = sizes.require(tid)?;

            let itv = ScoredInterval::from_aed(
                id,
                &transcript.seqid,
                transcript.start,
                transcript.end,
                aed,
                length,
            );
            debug!("{} scored {:.2} by {}", id, itv.score, tid);
            if best.as_ref().map_or(true, |b| itv.score > b.score) {
                best = Some(itv);
            }
        }

        let itv = best.ok_or_else(|| QcError::NoTranscript {
            id: id.to_string(),
            kind: opt.transcript.clone(),
        })?;
        intervals.push(itv);
    }

    for orphan in gff.features().iter().filter(|f| {
        f.kind == opt.transcript && !f.parents().iter().any(|p| seen.contains(p.as_str()))
    }) {
        warn!(
            "{} `{}` has no {} parent, ignored",
            opt.transcript,
            orphan.id().unwrap_or("."),
            opt.candidate
        );
    }

    Ok(intervals)
}

/// Kept and removed candidate ids of one run; together they are exactly the
/// input ids.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Resolution {
    pub kept: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub piles: usize,
}

impl Resolution {
    /// One id per line, sorted, no header
    pub fn write_removed<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        for id in &self.removed {
            writeln!(writer, "{}", id)?;
        }
        Ok(())
    }
}

/// Piles the candidates and selects the best chain of every pile.
///
/// Piles are independent and resolved on the current rayon pool.
///
/// ```
/// # use gaqc::libs::interval::ScoredInterval;
/// # use gaqc::libs::resolve::resolve;
/// let res = resolve(vec![
///     ScoredInterval::new("g1", "chr1", 1, 100, 5.0),
///     ScoredInterval::new("g2", "chr1", 50, 150, 3.0),
///     ScoredInterval::new("g3", "chr2", 1, 100, 1.0),
/// ]);
/// assert_eq!(res.piles, 2);
/// assert!(res.kept.contains("g1") && res.kept.contains("g3"));
/// assert!(res.removed.contains("g2"));
/// ```
pub fn resolve(candidates: Vec<ScoredInterval>) -> Resolution {
    let all: BTreeSet<String> = candidates.iter().map(|x| x.id.clone()).collect();
    let piles = piles(candidates);

    let kept: BTreeSet<String> = piles
        .par_iter()
        .map(|pile| {
            let chain = best_chain(pile);
            debug!(
                "pile of {} on {}: kept {} scoring {:.2}",
                pile.len(),
                pile[0].seqid,
                chain.members.len(),
                chain.score
            );
            chain.ids().map(|e| e.to_string()).collect::<Vec<_>>()
        })
        .flatten()
        .collect();
    let removed = all.difference(&kept).cloned().collect();

    Resolution {
        kept,
        removed,
        piles: piles.len(),
    }
}

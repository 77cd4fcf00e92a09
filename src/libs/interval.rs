/// A candidate gene model reduced to what overlap resolution needs.
///
/// Coordinates are 1-based and inclusive, `start <= end`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredInterval {
    pub id: String,
    pub seqid: String,
    pub start: u64,
    pub end: u64,
    pub score: f64,
}

impl ScoredInterval {
    pub fn new(id: &str, seqid: &str, start: u64, end: u64, score: f64) -> Self {
        debug_assert!(start <= end, "{}: {} > {}", id, start, end);
        Self {
            id: id.to_string(),
            seqid: seqid.to_string(),
            start,
            end,
            score,
        }
    }

    /// Score is `(1 - AED) * length`, where `length` is the coding length of
    /// the representative transcript rather than the genomic span.
    ///
    /// ```
    /// # use gaqc::libs::interval::ScoredInterval;
    /// let itv = ScoredInterval::from_aed("g1", "chr1", 100, 900, 0.25, 600);
    /// assert_eq!(itv.score, 450.0);
    /// ```
    pub fn from_aed(id: &str, seqid: &str, start: u64, end: u64, aed: f64, length: u64) -> Self {
        Self::new(id, seqid, start, end, (1.0 - aed) * length as f64)
    }

    /// True intersection on the same sequence; a shared endpoint is a shared
    /// base.
    ///
    /// ```
    /// # use gaqc::libs::interval::ScoredInterval;
    /// let a = ScoredInterval::new("a", "chr1", 1, 10, 1.0);
    /// let b = ScoredInterval::new("b", "chr1", 10, 20, 1.0);
    /// let c = ScoredInterval::new("c", "chr1", 11, 20, 1.0);
    /// let d = ScoredInterval::new("d", "chr2", 1, 10, 1.0);
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&c));
    /// assert!(!a.overlaps(&d));
    /// ```
    pub fn overlaps(&self, other: &ScoredInterval) -> bool {
        self.seqid == other.seqid && self.start <= other.end && other.start <= self.end
    }
}

impl std::fmt::Display for ScoredInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}({}:{}-{}, {:.2})",
            self.id, self.seqid, self.start, self.end, self.score
        )
    }
}

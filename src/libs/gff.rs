use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::io::BufRead;

use crate::libs::error::{QcError, Result};

/// Confidence attribute written by MAKER on transcript records
pub const AED_KEY: &str = "_AED";

//----------------------------
// Attributes
//----------------------------
/// The ninth GFF3 column, with the keys this crate relies on pulled out and
/// validated once, at parse time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub id: Option<String>,
    pub name: Option<String>,
    pub parents: Vec<String>,
    /// Annotation Edit Distance, always within [0, 1]
    pub aed: Option<f64>,
    /// Everything else, in the order of appearance
    pub others: IndexMap<String, String>,
}

impl Attributes {
    /// ```
    /// # use gaqc::libs::gff::Attributes;
    /// let attrs = Attributes::parse("ID=mRNA1;Parent=gene1,gene2;_AED=0.25;Note=x").unwrap();
    /// assert_eq!(attrs.id.as_deref(), Some("mRNA1"));
    /// assert_eq!(attrs.parents, vec!["gene1", "gene2"]);
    /// assert_eq!(attrs.aed, Some(0.25));
    /// assert_eq!(attrs.others.get("Note").unwrap(), "x");
    ///
    /// assert!(Attributes::parse(".").unwrap().id.is_none());
    /// assert!(Attributes::parse("ID=a;_AED=1.5").is_err());
    /// assert!(Attributes::parse("ID").is_err());
    /// ```
    pub fn parse(column: &str) -> std::result::Result<Self, String> {
        let mut attrs = Attributes::default();
        if column == "." {
            return Ok(attrs);
        }

        for pair in column.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("malformed attribute `{}`", pair))?;

            match key {
                "ID" => attrs.id = Some(value.to_string()),
                "Name" => attrs.name = Some(value.to_string()),
                "Parent" => attrs.parents = value.split(',').map(|e| e.to_string()).collect(),
                AED_KEY => {
                    let aed = value
                        .parse::<f64>()
                        .map_err(|_| format!("`{}` is not a number: {}", AED_KEY, value))?;
                    if !(0.0..=1.0).contains(&aed) {
                        return Err(format!("`{}` out of [0, 1]: {}", AED_KEY, value));
                    }
                    attrs.aed = Some(aed);
                }
                _ => {
                    attrs.others.insert(key.to_string(), value.to_string());
                }
            }
        }

        Ok(attrs)
    }
}

//----------------------------
// Feature
//----------------------------
#[derive(Debug, Clone)]
pub struct Feature {
    pub seqid: String,
    pub source: String,
    pub kind: String,
    pub start: u64,
    pub end: u64,
    pub score: Option<f64>,
    pub strand: char,
    pub phase: Option<u8>,
    pub attributes: Attributes,
    line: String,
}

impl Feature {
    /// Parses one tab-separated record. `line_no` is 1-based and only used
    /// in error messages.
    ///
    /// ```
    /// # use gaqc::libs::gff::Feature;
    /// let line = "chr1\tmaker\tmRNA\t100\t900\t.\t+\t.\tID=m1;Parent=g1;_AED=0.10";
    /// let f = Feature::parse(line, 1).unwrap();
    /// assert_eq!(f.kind, "mRNA");
    /// assert_eq!((f.start, f.end), (100, 900));
    /// assert_eq!(f.id(), Some("m1"));
    /// assert_eq!(f.to_string(), line);
    ///
    /// assert!(Feature::parse("chr1\tmaker\tmRNA\t900\t100\t.\t+\t.\tID=m1", 7).is_err());
    /// ```
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 9 {
            return Err(QcError::parse(
                line_no,
                format!("expected 9 columns, found {}", fields.len()),
            ));
        }

        let coord = |s: &str, what: &str| {
            s.parse::<u64>()
                .map_err(|_| QcError::parse(line_no, format!("invalid {}: {}", what, s)))
        };
        let start = coord(fields[3], "start")?;
        let end = coord(fields[4], "end")?;
        if start == 0 {
            return Err(QcError::parse(line_no, "start 0, coordinates are 1-based"));
        }
        if start > end {
            return Err(QcError::parse(
                line_no,
                format!("start {} is greater than end {}", start, end),
            ));
        }

        let score = match fields[5] {
            "." => None,
            s => Some(
                s.parse::<f64>()
                    .map_err(|_| QcError::parse(line_no, format!("invalid score: {}", s)))?,
            ),
        };

        let strand = match fields[6] {
            "+" | "-" | "." | "?" => fields[6].chars().next().unwrap_or('.'),
            s => return Err(QcError::parse(line_no, format!("invalid strand: {}", s))),
        };

        let phase = match fields[7] {
            "." => None,
            "0" => Some(0),
            "1" => Some(1),
            "2" => Some(2),
            s => return Err(QcError::parse(line_no, format!("invalid phase: {}", s))),
        };

        let attributes = Attributes::parse(fields[8]).map_err(|e| QcError::parse(line_no, e))?;

        Ok(Self {
            seqid: fields[0].to_string(),
            source: fields[1].to_string(),
            kind: fields[2].to_string(),
            start,
            end,
            score,
            strand,
            phase,
            attributes,
            line: line.to_string(),
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.attributes.id.as_deref()
    }

    pub fn parents(&self) -> &[String] {
        &self.attributes.parents
    }

    pub fn is_top_level(&self) -> bool {
        self.attributes.parents.is_empty()
    }
}

impl std::fmt::Display for Feature {
    /// The record exactly as it was read
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.line)
    }
}

//----------------------------
// Gff
//----------------------------
/// A fully materialized GFF3 file with id and parent/child lookups.
#[derive(Debug, Default)]
pub struct Gff {
    headers: Vec<String>,
    features: Vec<Feature>,
    index_of: HashMap<String, usize>,
    children_of: HashMap<String, Vec<usize>>,
}

impl Gff {
    /// Reads records until EOF or a `##FASTA` directive. `##` directives met
    /// before the first record are kept as the header; other comments are
    /// dropped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut gff = Gff::default();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');

            if line.starts_with("##FASTA") {
                break;
            }
            if line.starts_with('#') {
                if gff.features.is_empty() && line.starts_with("##") && line != "###" {
                    gff.headers.push(line.to_string());
                }
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let feature = Feature::parse(line, i + 1)?;
            gff.push(feature);
        }

        Ok(gff)
    }

    fn push(&mut self, feature: Feature) {
        let idx = self.features.len();
        if let Some(id) = feature.id() {
            // multi-line features share an ID; the first line represents them
            self.index_of.entry(id.to_string()).or_insert(idx);
        }
        for parent in feature.parents() {
            self.children_of.entry(parent.clone()).or_default().push(idx);
        }
        self.features.push(feature);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// ```
    /// # use gaqc::libs::gff::Gff;
    /// let text = "chr1\tm\tgene\t1\t9\t.\t+\t.\tID=g1\n";
    /// let gff = Gff::from_reader(text.as_bytes()).unwrap();
    /// assert!(gff.get("g1").is_some());
    /// assert!(gff.get("g2").is_none());
    /// ```
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.index_of.get(id).map(|&i| &self.features[i])
    }

    /// Direct children of `id`, in file order
    pub fn children<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Feature> + 'a {
        self.children_of
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.features[i])
    }

    /// Records without a `Parent`, in file order
    pub fn top_level(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.is_top_level())
    }

    /// Every record transitively owned by one of `ids`, the owners included,
    /// in file order. An id without a record is a `Consistency` error.
    pub fn owned_by(&self, ids: &BTreeSet<String>) -> Result<Vec<&Feature>> {
        let mut marked = vec![false; self.features.len()];
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        for id in ids {
            let idx = *self
                .index_of
                .get(id.as_str())
                .ok_or_else(|| QcError::Consistency { id: id.clone() })?;
            marked[idx] = true;
            if seen.insert(id.as_str()) {
                queue.push_back(id.as_str());
            }
        }

        while let Some(id) = queue.pop_front() {
            for &idx in self.children_of.get(id).into_iter().flatten() {
                marked[idx] = true;
                if let Some(child) = self.features[idx].id() {
                    if seen.insert(child) {
                        queue.push_back(child);
                    }
                }
            }
        }

        Ok(self
            .features
            .iter()
            .zip(marked)
            .filter_map(|(f, m)| if m { Some(f) } else { None })
            .collect())
    }
}

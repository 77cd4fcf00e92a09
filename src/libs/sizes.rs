use indexmap::IndexMap;
use log::warn;
use std::io::{BufRead, Write};

use crate::libs::error::{QcError, Result};

/// Read-only `id -> length` lookup, built once per run.
///
/// The source is either a two-column `.sizes` table (`id size`, whitespace
/// separated, further columns ignored) or a FASTA file whose sequence lengths
/// are counted. Ids keep their input order; a repeated id keeps its first
/// position and its last size.
#[derive(Debug, Default)]
pub struct Sizes {
    name: String,
    size_of: IndexMap<String, u64>,
}

impl Sizes {
    /// Opens `infile` and dispatches on its first non-blank byte: `>` means
    /// FASTA, anything else a table.
    pub fn from_path(infile: &str) -> anyhow::Result<Self> {
        let mut reader = crate::reader(infile)?;
        if is_fa(&mut reader)? {
            Self::from_fasta(infile, reader)
        } else {
            Ok(Self::from_table(infile, reader)?)
        }
    }

    /// ```
    /// # use gaqc::libs::sizes::Sizes;
    /// let text = "# comment\nm1\t600\nm2 300 extra\n\n";
    /// let sizes = Sizes::from_table("cds.sizes", text.as_bytes()).unwrap();
    /// assert_eq!(sizes.len(), 2);
    /// assert_eq!(sizes.get("m2"), Some(300));
    /// assert_eq!(sizes.get("m3"), None);
    /// assert!(sizes.require("m3").is_err());
    /// ```
    pub fn from_table<R: BufRead>(name: &str, reader: R) -> Result<Self> {
        let mut sizes = Self {
            name: name.to_string(),
            size_of: IndexMap::new(),
        };

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 2 {
                return Err(QcError::parse(i + 1, format!("{}: expected `id size`", name)));
            }
            let size = fields[1].parse::<u64>().map_err(|_| {
                QcError::parse(i + 1, format!("{}: invalid size {}", name, fields[1]))
            })?;
            sizes.insert(fields[0], size);
        }

        Ok(sizes)
    }

    /// Counts the sequence lengths of a FASTA stream.
    ///
    /// ```
    /// # use gaqc::libs::sizes::Sizes;
    /// let fa = ">m1 cds\nATGAAA\nTAA\n>m2\nATGTGA\n";
    /// let sizes = Sizes::from_fasta("cds.fa", fa.as_bytes()).unwrap();
    /// assert_eq!(sizes.get("m1"), Some(9));
    /// assert_eq!(sizes.require("m2").unwrap(), 6);
    /// ```
    pub fn from_fasta<R: BufRead>(name: &str, reader: R) -> anyhow::Result<Self> {
        let mut sizes = Self {
            name: name.to_string(),
            size_of: IndexMap::new(),
        };
        let mut fa_in = noodles_fasta::io::Reader::new(reader);

        for result in fa_in.records() {
            let record = result?;
            let id = std::str::from_utf8(record.name())?;
            sizes.insert(id, record.sequence().len() as u64);
        }

        Ok(sizes)
    }

    fn insert(&mut self, id: &str, size: u64) {
        if self.size_of.insert(id.to_string(), size).is_some() {
            warn!("`{}` appears more than once in {}", id, self.name);
        }
    }

    /// Name of the source, used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.size_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size_of.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<u64> {
        self.size_of.get(id).copied()
    }

    /// Like [`Sizes::get`], but a miss is a `MissingSize` error
    pub fn require(&self, id: &str) -> Result<u64> {
        self.get(id)
            .ok_or_else(|| QcError::missing_size(id, self.name.as_str()))
    }

    /// Writes `id<TAB>size` lines in input order, the format read back by
    /// [`Sizes::from_table`].
    pub fn write_table<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        for (id, size) in &self.size_of {
            writeln!(writer, "{}\t{}", id, size)?;
        }
        Ok(())
    }
}

/// Peeks at the first non-whitespace byte without consuming it.
fn is_fa<R: BufRead + ?Sized>(reader: &mut R) -> std::io::Result<bool> {
    loop {
        let (skip, found) = {
            let buf = reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(false);
            }
            match buf.iter().position(|b| !b.is_ascii_whitespace()) {
                Some(i) => (i, Some(buf[i] == b'>')),
                None => (buf.len(), None),
            }
        };
        reader.consume(skip);
        if let Some(is_fa) = found {
            return Ok(is_fa);
        }
    }
}

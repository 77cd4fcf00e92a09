//! Error taxonomy of the annotation QC library.
//!
//! Every variant is fatal for a run: a skipped record would silently change
//! the score comparisons inside a pile.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QcError {
    /// A record lacks an attribute needed to score it
    #[error("`{id}` has no `{attribute}` attribute")]
    MissingAttribute { id: String, attribute: String },

    /// An id is absent from the length table
    #[error("`{id}` not found in the length table {table}")]
    MissingSize { id: String, table: String },

    /// A candidate without any transcript to be scored by
    #[error("`{id}` has no {kind} to score it by")]
    NoTranscript { id: String, kind: String },

    /// Two candidates share one id
    #[error("candidate id `{id}` is used more than once")]
    DuplicateId { id: String },

    /// A kept candidate is absent from the annotation records
    #[error("kept candidate `{id}` is absent from the annotation records")]
    Consistency { id: String },

    /// A malformed input line (1-based line number)
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QcError {
    pub fn missing_attribute<S: Into<String>, T: Into<String>>(id: S, attribute: T) -> Self {
        Self::MissingAttribute {
            id: id.into(),
            attribute: attribute.into(),
        }
    }

    pub fn missing_size<S: Into<String>, T: Into<String>>(id: S, table: T) -> Self {
        Self::MissingSize {
            id: id.into(),
            table: table.into(),
        }
    }

    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = QcError::missing_attribute("mRNA1", "_AED");
        assert_eq!(err.to_string(), "`mRNA1` has no `_AED` attribute");

        let err = QcError::missing_size("mRNA1", "cds.sizes");
        assert_eq!(
            err.to_string(),
            "`mRNA1` not found in the length table cds.sizes"
        );

        let err = QcError::Consistency {
            id: "gene1".to_string(),
        };
        assert!(err.to_string().contains("gene1"));

        let err = QcError::parse(3, "expected 9 columns");
        assert_eq!(err.to_string(), "line 3: expected 9 columns");
    }
}

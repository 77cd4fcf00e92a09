use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Opens `input` for buffered reading. `stdin` reads the standard input,
/// files ending in `.gz` are decompressed on the fly.
///
/// ```
/// use std::io::BufRead;
/// let reader = gaqc::reader("tests/uniq/pile.sizes").unwrap();
/// assert_eq!(reader.lines().count(), 6);
///
/// assert!(gaqc::reader("tests/uniq/not_exists.sizes").is_err());
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Opens `output` for buffered writing; `stdout` writes to the screen.
pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

/// An output that stays invisible until [`Staged::commit`].
///
/// Files are written to a temporary file next to the target and renamed into
/// place on commit; `stdout` is held in memory. Dropping an uncommitted
/// `Staged` leaves nothing behind.
pub enum Staged {
    Stdout(Vec<u8>),
    File {
        path: PathBuf,
        tmp: BufWriter<NamedTempFile>,
    },
}

/// Opens `output` as a [`Staged`] writer. Fails early if the target
/// directory can not hold the file.
pub fn staged(output: &str) -> anyhow::Result<Staged> {
    if output == "stdout" {
        return Ok(Staged::Stdout(vec![]));
    }

    let path = PathBuf::from(output);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let tmp = NamedTempFile::new_in(&dir)
        .with_context(|| format!("could not create {}", output))?;

    Ok(Staged::File {
        path,
        tmp: BufWriter::new(tmp),
    })
}

impl Staged {
    /// Moves the content to its destination.
    pub fn commit(self) -> anyhow::Result<()> {
        match self {
            Staged::Stdout(buf) => {
                let mut out = std::io::stdout().lock();
                out.write_all(&buf)?;
                out.flush()?;
            }
            Staged::File { path, tmp } => {
                let tmp = tmp.into_inner().map_err(|e| e.into_error())?;
                tmp.persist(&path)
                    .with_context(|| format!("could not create {}", path.display()))?;
            }
        }
        Ok(())
    }
}

impl Write for Staged {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Staged::Stdout(v) => v.write(buf),
            Staged::File { tmp, .. } => tmp.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Staged::Stdout(_) => Ok(()),
            Staged::File { tmp, .. } => tmp.flush(),
        }
    }
}

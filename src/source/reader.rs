//! Line-oriented sample source
//!
//! Each record is one line of whitespace-separated decimal numbers:
//! `x y` or `x y z` (`z` defaults to 0). Blank lines are skipped. Any other
//! shape is a fatal [`TraceVisError::MalformedSample`].

use super::SampleSource;
use crate::error::{Result, TraceVisError};
use crate::types::{Point3, Sample};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Parse one record. Returns `Ok(None)` for a blank line.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_sample_line(line_no: usize, line: &str) -> Result<Option<Point3>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }

    if fields.len() < 2 || fields.len() > 3 {
        return Err(TraceVisError::malformed(
            line_no,
            line.trim_end(),
            format!("expected 2 or 3 fields, found {}", fields.len()),
        ));
    }

    let mut coords = [0.0f64; 3];
    for (i, field) in fields.iter().enumerate() {
        let value: f64 = field.parse().map_err(|_| {
            TraceVisError::malformed(
                line_no,
                line.trim_end(),
                format!("field {} ({:?}) is not a number", i + 1, field),
            )
        })?;
        if !value.is_finite() {
            return Err(TraceVisError::malformed(
                line_no,
                line.trim_end(),
                format!("field {} is not finite", i + 1),
            ));
        }
        coords[i] = value;
    }

    Ok(Some(Point3::from(coords)))
}

/// Reads `x y [z]` records from a buffered reader
pub struct LineSource<R> {
    reader: R,
    line_no: usize,
    buf: String,
    name: String,
}

impl LineSource<BufReader<File>> {
    /// Open a file-backed source
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceVisError::SourceUnavailable {
            path: PathBuf::from(path),
            source,
        })?;
        tracing::info!("Opened sample file {:?}", path);
        Ok(Self::with_name(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_name(reader, "reader".to_string())
    }

    fn with_name(reader: R, name: String) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
            name,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead + Send> SampleSource for LineSource<R> {
    fn next_sample(&mut self) -> Result<Option<Sample>> {
        loop {
            self.buf.clear();
            let read = match self.reader.read_line(&mut self.buf) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    return Err(TraceVisError::malformed(
                        self.line_no + 1,
                        "",
                        "line is not valid UTF-8",
                    ));
                }
                Err(e) => return Err(e.into()),
            };
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            if let Some(point) = parse_sample_line(self.line_no, &self.buf)? {
                return Ok(Some(Sample::plain(point)));
            }
        }
    }

    fn describe(&self) -> String {
        format!("lines from {}", self.name)
    }
}

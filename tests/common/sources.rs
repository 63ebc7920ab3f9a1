//! Sample source helpers

use std::io::Write;
use tempfile::NamedTempFile;
use tracevis_rs::error::Result;
use tracevis_rs::{Sample, SampleSource};

/// Write `content` to a temporary point file
pub fn point_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Source that replays a fixed list of samples
pub struct VecSource {
    samples: std::vec::IntoIter<Sample>,
}

impl VecSource {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples: samples.into_iter(),
        }
    }
}

impl SampleSource for VecSource {
    fn next_sample(&mut self) -> Result<Option<Sample>> {
        Ok(self.samples.next())
    }

    fn describe(&self) -> String {
        "vec source".to_string()
    }
}

//! JSON-lines telemetry reader.
//!
//! One sample per line, using the backend's column names:
//!
//! ```text
//! {"temperature": 24.6, "humidity": 61.0, "created_at_ms": 1718000000000}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::io::BufRead;

use crate::error::Error;
use crate::sample::Sample;

/// Decode and validate one line.
pub fn parse_line(line: &str) -> Result<Sample, Error> {
    // Out-of-contract values fail inside `Sample`'s deserializer; re-run
    // validation on the raw numbers so the caller gets the typed reason.
    serde_json::from_str::<Sample>(line).map_err(|e| {
        if e.is_data() {
            classify_rejection(line).unwrap_or(Error::Parse("sample fields missing or mistyped"))
        } else {
            Error::Parse("line is not valid JSON")
        }
    })
}

fn classify_rejection(line: &str) -> Option<Error> {
    let v: serde_json::Value = serde_json::from_str(line).ok()?;
    let field = |a: &str, b: &str| v.get(a).or_else(|| v.get(b)).and_then(serde_json::Value::as_f64);
    let t = field("temperature_c", "temperature")?;
    let rh = field("humidity_pct", "humidity")?;
    Sample::new(t, rh, 0).err().map(Error::InvalidSample)
}

/// Iterator over the samples of a JSON-lines stream.
///
/// Yields `(line_number, result)` so callers can report bad lines and
/// keep going. A read error is reported once and ends the stream.
pub struct JsonLinesReader<R> {
    inner: R,
    line_no: usize,
    buf: String,
    failed: bool,
}

impl<R: BufRead> JsonLinesReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_no: 0,
            buf: String::new(),
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for JsonLinesReader<R> {
    type Item = (usize, Result<Sample, Error>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    let line = self.buf.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    return Some((self.line_no, parse_line(line)));
                }
                Err(_) => {
                    self.failed = true;
                    self.line_no += 1;
                    return Some((self.line_no, Err(Error::Parse("read failed"))));
                }
            }
        }
    }
}

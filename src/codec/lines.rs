use std::io::{BufRead, ErrorKind, Write};

use super::{decode_record, CodecError};
use crate::sample::RideRequest;

/// Reads one record per line from a JSON-lines stream.
///
/// Blank lines are skipped. A malformed line, including one that is not
/// UTF-8, yields a [`CodecError::Line`] and reading carries on with the next
/// one; only an IO error from the underlying reader ends the stream.
pub struct RecordReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<RideRequest, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
            self.line += 1;
            let line = self.line;

            let text = match std::str::from_utf8(&self.buf) {
                Ok(text) => text,
                Err(e) => {
                    return Some(Err(CodecError::Line {
                        line,
                        message: format!("invalid UTF-8: {}", e),
                    }))
                }
            };

            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            return Some(decode_record(trimmed).map_err(|e| CodecError::Line {
                line,
                message: e.to_string(),
            }));
        }
    }
}

/// Writes records as JSON lines.
pub struct RecordWriter<W: Write> {
    inner: W,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn write(&mut self, record: &RideRequest) -> Result<(), CodecError> {
        serde_json::to_writer(&mut self.inner, record)?;
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), CodecError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

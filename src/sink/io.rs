use std::io::Write;

use super::{SinkError, TextSink};

/// Adapts any [`std::io::Write`] into a [`TextSink`], so a
/// [`JsonPrinter`](crate::JsonPrinter) can write to files, sockets, or
/// standard output.
pub struct IoSink<W>(pub W);

impl<W> IoSink<W> {
    /// Return the wrapped writer
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> TextSink for IoSink<W> {
    fn write(&mut self, data: &[u8]) -> Result<(), SinkError> {
        self.0.write_all(data)?;
        Ok(())
    }
}

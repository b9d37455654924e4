mod io;
mod null;

pub use io::IoSink;
pub use null::NullSink;

use thiserror::Error;

use crate::JsonEvent;

/// An error returned by a sink. Returning it from a sink method aborts the
/// `feed` or print call that invoked the sink; the parser surfaces it as
/// [`ParseError::Callback`](crate::ParseError::Callback) without
/// interpreting it.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("event consumer aborted")]
    Aborted,
}

/// A sink receives the events produced by the
/// [`JsonParser`](crate::JsonParser), in document order, on the call stack of
/// [`feed()`](crate::JsonParser::feed()). Closures
/// `FnMut(JsonEvent) -> Result<(), SinkError>` implement this trait.
pub trait EventSink {
    /// Consume one event. Payload slices become invalid when this method
    /// returns. Returning an error stops the parser; it will not recover.
    fn event(&mut self, event: JsonEvent<'_>) -> Result<(), SinkError>;
}

impl<F: FnMut(JsonEvent<'_>) -> Result<(), SinkError>> EventSink for F {
    fn event(&mut self, event: JsonEvent<'_>) -> Result<(), SinkError> {
        self(event)
    }
}

/// A sink receives chunks of JSON text from the
/// [`JsonPrinter`](crate::JsonPrinter).
pub trait TextSink {
    /// Append a chunk of output. Chunks concatenate to the printed document.
    fn write(&mut self, data: &[u8]) -> Result<(), SinkError>;
}

impl TextSink for Vec<u8> {
    fn write(&mut self, data: &[u8]) -> Result<(), SinkError> {
        self.extend_from_slice(data);
        Ok(())
    }
}

impl<T: TextSink + ?Sized> TextSink for &mut T {
    fn write(&mut self, data: &[u8]) -> Result<(), SinkError> {
        (**self).write(data)
    }
}

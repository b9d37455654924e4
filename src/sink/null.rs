use super::{EventSink, SinkError};
use crate::JsonEvent;

/// An [`EventSink`] that discards all events. Useful when only the validity
/// of a document matters.
///
/// ```
/// use jsonpush::sink::NullSink;
/// use jsonpush::JsonParser;
///
/// let mut parser = JsonParser::new(NullSink);
/// parser.feed(br#"{"valid": true}"#).unwrap();
/// assert!(parser.is_done());
/// ```
pub struct NullSink;

impl EventSink for NullSink {
    fn event(&mut self, _event: JsonEvent<'_>) -> Result<(), SinkError> {
        Ok(())
    }
}

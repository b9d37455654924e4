use crate::sink::{EventSink, SinkError, TextSink};
use crate::JsonEvent;

/// Only the first 36 ASCII characters need an escape; single-character
/// entries pass through unchanged.
#[rustfmt::skip]
const CHARACTER_ESCAPE: [&str; 36] = [
    "\\u0000", "\\u0001", "\\u0002", "\\u0003", "\\u0004", "\\u0005", "\\u0006", "\\u0007", /*  0-7  */
    "\\b"    ,     "\\t",     "\\n", "\\u000b",     "\\f",     "\\r", "\\u000e", "\\u000f", /*  8-f  */
    "\\u0010", "\\u0011", "\\u0012", "\\u0013", "\\u0014", "\\u0015", "\\u0016", "\\u0017", /* 10-17 */
    "\\u0018", "\\u0019", "\\u001a", "\\u001b", "\\u001c", "\\u001d", "\\u001e", "\\u001f", /* 18-1f */
    " "      , "!"      , "\\\""   , "#",
];

/// Produces JSON text from a stream of [`JsonEvent`]s — the inverse of the
/// [`JsonParser`](crate::JsonParser).
///
/// The printer does not validate the event stream; feeding it events that do
/// not form a well-formed document produces text that is not well-formed
/// either. It is free to normalize whitespace, so reformatting is not
/// byte-identical.
///
/// ```
/// use jsonpush::{JsonEvent, JsonPrinter};
///
/// let mut printer = JsonPrinter::new(Vec::new());
/// printer.print_raw(JsonEvent::StartArray).unwrap();
/// printer.print_raw(JsonEvent::ValueInt(b"1")).unwrap();
/// printer.print_raw(JsonEvent::ValueString(b"two")).unwrap();
/// printer.print_raw(JsonEvent::EndArray).unwrap();
/// assert_eq!(printer.into_sink(), br#"[1,"two"]"#);
/// ```
pub struct JsonPrinter<S> {
    sink: S,

    /// The string written for one level of indentation in pretty mode
    indent: String,

    /// `true` if the [`EventSink`] impl should pretty-print
    pretty: bool,

    indent_level: usize,

    /// A container was just opened and has no child yet
    enter_object: bool,

    /// A field name was just printed; its value follows without a separator
    after_key: bool,

    /// Nothing has been printed yet
    first: bool,
}

impl<S> JsonPrinter<S>
where
    S: TextSink,
{
    /// Create a printer that prints compact JSON when used as an event sink
    pub fn new(sink: S) -> Self {
        Self::with_mode(sink, false)
    }

    /// Create a printer that pretty-prints when used as an event sink
    pub fn new_pretty(sink: S) -> Self {
        Self::with_mode(sink, true)
    }

    fn with_mode(sink: S, pretty: bool) -> Self {
        JsonPrinter {
            sink,
            indent: "\t".to_string(),
            pretty,
            indent_level: 0,
            enter_object: true,
            after_key: false,
            first: true,
        }
    }

    /// Set the string written for one level of indentation (default: one tab)
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Append one event without any eye candy
    pub fn print_raw(&mut self, event: JsonEvent<'_>) -> Result<(), SinkError> {
        self.print_mode(event, false)
    }

    /// Append one event with newlines and indentation
    pub fn print_pretty(&mut self, event: JsonEvent<'_>) -> Result<(), SinkError> {
        self.print_mode(event, true)
    }

    /// Get a reference to the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the printer and return the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn print_indent(&mut self) -> Result<(), SinkError> {
        self.sink.write(b"\n")?;
        for _ in 0..self.indent_level {
            self.sink.write(self.indent.as_bytes())?;
        }
        Ok(())
    }

    /// Escape a string to be a valid JSON string on the wire. No UTF-8
    /// verification is done; bytes above the escape table pass through.
    fn print_string(&mut self, data: &[u8]) -> Result<(), SinkError> {
        self.sink.write(b"\"")?;
        let mut start = 0;
        for (i, &c) in data.iter().enumerate() {
            let escape = if (c as usize) < CHARACTER_ESCAPE.len() {
                let e = CHARACTER_ESCAPE[c as usize];
                if e.len() > 1 {
                    Some(e)
                } else {
                    None
                }
            } else if c == b'\\' {
                Some("\\\\")
            } else {
                None
            };
            if let Some(escape) = escape {
                if start < i {
                    self.sink.write(&data[start..i])?;
                }
                self.sink.write(escape.as_bytes())?;
                start = i + 1;
            }
        }
        if start < data.len() {
            self.sink.write(&data[start..])?;
        }
        self.sink.write(b"\"")
    }

    fn print_mode(&mut self, event: JsonEvent<'_>, pretty: bool) -> Result<(), SinkError> {
        let enter_object = self.enter_object;
        let closing = matches!(event, JsonEvent::EndArray | JsonEvent::EndObject);

        if !enter_object && !self.after_key && !closing {
            self.sink.write(b",")?;
            if pretty {
                self.print_indent()?;
            }
        }
        if pretty && enter_object && !self.first && !closing {
            self.print_indent()?;
        }

        self.first = false;
        self.enter_object = false;
        self.after_key = false;

        match event {
            JsonEvent::StartArray => {
                self.sink.write(b"[")?;
                self.indent_level += 1;
                self.enter_object = true;
            }

            JsonEvent::StartObject => {
                self.sink.write(b"{")?;
                self.indent_level += 1;
                self.enter_object = true;
            }

            JsonEvent::EndArray | JsonEvent::EndObject => {
                self.indent_level = self.indent_level.saturating_sub(1);
                if pretty && !enter_object {
                    self.print_indent()?;
                }
                self.sink.write(if matches!(event, JsonEvent::EndObject) {
                    b"}"
                } else {
                    b"]"
                })?;
            }

            JsonEvent::FieldName(data) => {
                self.print_string(data)?;
                self.sink
                    .write(if pretty { b": ".as_slice() } else { b":".as_slice() })?;
                self.after_key = true;
            }

            JsonEvent::ValueString(data) => self.print_string(data)?,
            JsonEvent::ValueInt(data) | JsonEvent::ValueFloat(data) => self.sink.write(data)?,
            JsonEvent::ValueTrue => self.sink.write(b"true")?,
            JsonEvent::ValueFalse => self.sink.write(b"false")?,
            JsonEvent::ValueNull => self.sink.write(b"null")?,

            // fragments cannot be framed as JSON text; the printer expects
            // fully buffered events
            JsonEvent::PartialFieldName(_)
            | JsonEvent::PartialString(_)
            | JsonEvent::PartialValue(_) => {}
        }

        Ok(())
    }
}

/// A parser can push its events straight into a printer, reformatting a
/// document in a single streaming pass.
impl<S> EventSink for JsonPrinter<S>
where
    S: TextSink,
{
    fn event(&mut self, event: JsonEvent<'_>) -> Result<(), SinkError> {
        let pretty = self.pretty;
        self.print_mode(event, pretty)
    }
}

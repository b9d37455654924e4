//! # Jsonpush
//!
//! A streaming, event-based JSON parser and printer.
//!
//! The parser is a table-driven pushdown automaton. It consumes input as an
//! arbitrary sequence of byte chunks — split anywhere, including in the
//! middle of an escape sequence, a surrogate pair, a number, or a comment —
//! and pushes a linear stream of structural events ([`JsonEvent`]) into a
//! user-supplied [`EventSink`]. Memory is bounded by the configurable limits
//! on nesting depth and primitive length. The printer does the inverse:
//! given a stream of events, it produces compact or indented JSON text.
//!
//! ## Parsing
//!
//! Implement [`EventSink`] and hand it to the parser. Events are delivered
//! in document order, on the call stack of [`feed()`](JsonParser::feed()).
//!
//! ```
//! use jsonpush::sink::SinkError;
//! use jsonpush::{EventSink, JsonEvent, JsonParser};
//!
//! #[derive(Default)]
//! struct FieldNames(Vec<String>);
//!
//! impl EventSink for FieldNames {
//!     fn event(&mut self, event: JsonEvent<'_>) -> Result<(), SinkError> {
//!         if let JsonEvent::FieldName(name) = event {
//!             self.0.push(String::from_utf8_lossy(name).into_owned());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let json = br#"{"name": "Elvis", "age": 42}"#;
//!
//! let mut parser = JsonParser::new(FieldNames::default());
//! parser.feed(json).unwrap();
//! parser.finish().unwrap();
//! assert!(parser.is_done());
//! assert_eq!(parser.into_sink().0, vec!["name", "age"]);
//! ```
//!
//! Input can arrive in chunks of any size; the parser's explicit state
//! carries everything needed to resume:
//!
//! ```
//! use jsonpush::sink::NullSink;
//! use jsonpush::JsonParser;
//!
//! let mut parser = JsonParser::new(NullSink);
//! parser.feed(b"{\"a\": \"ab").unwrap();
//! assert!(!parser.is_done());
//! parser.feed(b"cd\"}").unwrap();
//! assert!(parser.is_done());
//! ```
//!
//! ## Printing
//!
//! [`JsonPrinter`] consumes events and writes JSON text to a
//! [`TextSink`](sink::TextSink). Since the printer itself implements
//! [`EventSink`], reformatting a document is a parser piped into a printer:
//!
//! ```
//! use jsonpush::{JsonParser, JsonPrinter};
//!
//! let mut parser = JsonParser::new(JsonPrinter::new(Vec::new()));
//! parser.feed(b" [ 1 , 2 , { \"a\" : true } ] ").unwrap();
//! assert!(parser.is_done());
//! assert_eq!(parser.into_sink().into_sink(), br#"[1,2,{"a":true}]"#);
//! ```
//!
//! ## Options
//!
//! [`JsonParserOptions`](options::JsonParserOptions) controls resource
//! limits (`max_nesting`, `max_data`), tolerance for C-style (`/* ... */`)
//! and YAML-style (`# ...`) comments, and the parse mode. The non-default
//! [`ParseMode`](options::ParseMode)s trade the convenience of fully
//! buffered payloads for tighter memory control: `PartialData` hands out
//! payload fragments instead of growing the token buffer, and `InPlace`
//! borrows payloads directly from the input chunk, escapes left undecoded.
//!
//! ## Materializing a document
//!
//! For testing and compatibility reasons, the `serde_json` feature provides
//! `jsonpush::serde_json::from_slice`, which assembles the event stream into
//! a Serde JSON `Value`. If you find
//! yourself doing this, your data fits into memory and you are most likely
//! better off using Serde JSON directly.
mod event;
pub mod options;
mod parser;
mod printer;
pub mod sink;

#[cfg(feature = "serde_json")]
pub mod serde_json;

pub use event::{
    InvalidFloatValueError, InvalidIntValueError, InvalidStringValueError, JsonEvent,
};
pub use parser::{JsonParser, ParseError};
pub use printer::JsonPrinter;
pub use sink::{EventSink, TextSink};

use jsonpush::options::{JsonParserOptions, JsonParserOptionsBuilder, ParseMode};
use jsonpush::sink::{NullSink, SinkError};
use jsonpush::{EventSink, JsonEvent, JsonParser, JsonPrinter, ParseError};

/// An owned copy of a parser event, so sequences can be compared after the
/// parser is gone
#[derive(Debug, Clone, PartialEq, Eq)]
enum Ev {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName(Vec<u8>),
    ValueString(Vec<u8>),
    ValueInt(Vec<u8>),
    ValueFloat(Vec<u8>),
    ValueTrue,
    ValueFalse,
    ValueNull,
    PartialFieldName(Vec<u8>),
    PartialString(Vec<u8>),
    PartialValue(Vec<u8>),
}

impl From<JsonEvent<'_>> for Ev {
    fn from(event: JsonEvent<'_>) -> Self {
        match event {
            JsonEvent::StartObject => Ev::StartObject,
            JsonEvent::EndObject => Ev::EndObject,
            JsonEvent::StartArray => Ev::StartArray,
            JsonEvent::EndArray => Ev::EndArray,
            JsonEvent::FieldName(d) => Ev::FieldName(d.to_vec()),
            JsonEvent::ValueString(d) => Ev::ValueString(d.to_vec()),
            JsonEvent::ValueInt(d) => Ev::ValueInt(d.to_vec()),
            JsonEvent::ValueFloat(d) => Ev::ValueFloat(d.to_vec()),
            JsonEvent::ValueTrue => Ev::ValueTrue,
            JsonEvent::ValueFalse => Ev::ValueFalse,
            JsonEvent::ValueNull => Ev::ValueNull,
            JsonEvent::PartialFieldName(d) => Ev::PartialFieldName(d.to_vec()),
            JsonEvent::PartialString(d) => Ev::PartialString(d.to_vec()),
            JsonEvent::PartialValue(d) => Ev::PartialValue(d.to_vec()),
        }
    }
}

/// Collects events; optionally aborts parsing after a number of events
#[derive(Default)]
struct EventCollector {
    events: Vec<Ev>,
    abort_after: Option<usize>,
}

impl EventSink for EventCollector {
    fn event(&mut self, event: JsonEvent<'_>) -> Result<(), SinkError> {
        if let Some(n) = self.abort_after {
            if self.events.len() >= n {
                return Err(SinkError::Aborted);
            }
        }
        self.events.push(event.into());
        Ok(())
    }
}

fn parse_events_with(json: &[u8], options: JsonParserOptions) -> Vec<Ev> {
    let mut parser = JsonParser::new_with_options(EventCollector::default(), options);
    parser.feed(json).unwrap();
    parser.finish().unwrap();
    assert!(parser.is_done(), "document should be complete");
    assert_eq!(parser.parsed_bytes(), json.len());
    parser.into_sink().events
}

fn parse_events(json: &[u8]) -> Vec<Ev> {
    parse_events_with(json, JsonParserOptions::default())
}

fn parse_error_with(json: &[u8], options: JsonParserOptions) -> ParseError {
    let mut parser = JsonParser::new_with_options(EventCollector::default(), options);
    match parser.feed(json).and_then(|()| parser.finish()) {
        Err(e) => e,
        Ok(()) => panic!("expected a parse error"),
    }
}

fn parse_error(json: &[u8]) -> ParseError {
    parse_error_with(json, JsonParserOptions::default())
}

/// Reformat a document in one streaming pass (parser piped into a printer)
fn reformat(json: &[u8]) -> Vec<u8> {
    let mut parser = JsonParser::new(JsonPrinter::new(Vec::new()));
    parser.feed(json).unwrap();
    parser.finish().unwrap();
    assert!(parser.is_done());
    parser.into_sink().into_sink()
}

/// Feeding the same document in chunks, at every possible split point and
/// byte by byte, must produce the same events as feeding it at once
fn assert_chunk_invariant_with(json: &[u8], options: JsonParserOptions) {
    let expected = parse_events_with(json, options);

    for split in 0..=json.len() {
        let mut parser = JsonParser::new_with_options(EventCollector::default(), options);
        parser.feed(&json[..split]).unwrap();
        parser.feed(&json[split..]).unwrap();
        parser.finish().unwrap();
        assert!(parser.is_done(), "split at {split}");
        assert_eq!(parser.into_sink().events, expected, "split at {split}");
    }

    let mut parser = JsonParser::new_with_options(EventCollector::default(), options);
    for &b in json {
        parser.feed_byte(b).unwrap();
    }
    parser.finish().unwrap();
    assert!(parser.is_done());
    assert_eq!(parser.into_sink().events, expected, "byte-by-byte");
}

fn comments_allowed() -> JsonParserOptions {
    JsonParserOptionsBuilder::default()
        .with_allow_c_comments(true)
        .with_allow_yaml_comments(true)
        .build()
}

/// Merge partial events into the terminal event that follows them, so
/// fragmented streams can be compared against buffered ones
fn coalesce(events: Vec<Ev>) -> Vec<Ev> {
    let mut out = Vec::new();
    let mut fragment: Vec<u8> = Vec::new();
    for ev in events {
        match ev {
            Ev::PartialFieldName(d) | Ev::PartialString(d) | Ev::PartialValue(d) => {
                fragment.extend(d);
            }
            Ev::FieldName(d) => {
                fragment.extend(d);
                out.push(Ev::FieldName(std::mem::take(&mut fragment)));
            }
            Ev::ValueString(d) => {
                fragment.extend(d);
                out.push(Ev::ValueString(std::mem::take(&mut fragment)));
            }
            Ev::ValueInt(d) => {
                fragment.extend(d);
                out.push(Ev::ValueInt(std::mem::take(&mut fragment)));
            }
            Ev::ValueFloat(d) => {
                fragment.extend(d);
                out.push(Ev::ValueFloat(std::mem::take(&mut fragment)));
            }
            other => out.push(other),
        }
    }
    out
}

/// Test that a simple object produces the expected event sequence
#[test]
fn simple_object() {
    assert_eq!(
        parse_events(br#"{"a":1}"#),
        vec![
            Ev::StartObject,
            Ev::FieldName(b"a".to_vec()),
            Ev::ValueInt(b"1".to_vec()),
            Ev::EndObject,
        ]
    );
}

/// Test that literals and numbers in an array are identified
#[test]
fn array_of_literals() {
    assert_eq!(
        parse_events(b"[true, false, null, -0.5e+2]"),
        vec![
            Ev::StartArray,
            Ev::ValueTrue,
            Ev::ValueFalse,
            Ev::ValueNull,
            Ev::ValueFloat(b"-0.5e+2".to_vec()),
            Ev::EndArray,
        ]
    );
}

/// Test that a document consisting of a single string works and that a
/// surrogate pair is assembled into one UTF-8 sequence
#[test]
fn top_level_string_surrogate_pair() {
    assert_eq!(
        parse_events(br#""\uD83D\uDE00""#),
        vec![Ev::ValueString(vec![0xF0, 0x9F, 0x98, 0x80])]
    );
    assert_eq!(
        parse_events(br#""\uD83D\uDE00""#),
        vec![Ev::ValueString("😀".as_bytes().to_vec())]
    );
}

/// Test that a BMP escape becomes a three-byte UTF-8 sequence
#[test]
fn top_level_string_bmp_escape() {
    assert_eq!(
        parse_events(br#""\uf944""#),
        vec![Ev::ValueString(vec![0xEF, 0xA5, 0x84])]
    );
}

/// Test that escapes below 0x80 and two-byte sequences decode as well
#[test]
fn unicode_escape_widths() {
    assert_eq!(
        parse_events(br#""\u0041\u00e9""#),
        vec![Ev::ValueString("A\u{e9}".as_bytes().to_vec())]
    );
}

/// Test that a sequence of UNICODE escapes is transformed into UTF-8
/// encoded characters
#[test]
fn unicode_escape_sequences() {
    let events = parse_events(
        br#"["\uf944\ufbde\ufe3b\u277a\u260e\u2108\u0123\u4567\u89ab\ucdef\uabcd\uef4a"]"#,
    );
    assert_eq!(
        events[1],
        Ev::ValueString("籠ﯞ︻❺☎℈ģ䕧覫췯ꯍ\u{ef4a}".as_bytes().to_vec())
    );
}

/// Test that all simple escape sequences are transformed into the
/// corresponding representation
#[test]
fn escape_sequences() {
    assert_eq!(
        parse_events(br#"["\b\f\n\r\t\"\\\/"]"#),
        vec![
            Ev::StartArray,
            Ev::ValueString(b"\x08\x0C\n\r\t\"\\/".to_vec()),
            Ev::EndArray,
        ]
    );
}

/// Test that comments are skipped where allowed and that a document after
/// them parses normally
#[test]
fn comments_before_object() {
    assert_eq!(
        parse_events_with(b"/* c */ # y\n { }", comments_allowed()),
        vec![Ev::StartObject, Ev::EndObject]
    );
}

/// Test that a string can be split across two feed calls
#[test]
fn string_split_across_feeds() {
    let mut parser = JsonParser::new(EventCollector::default());
    parser.feed(b"\"ab").unwrap();
    assert!(!parser.is_done());
    parser.feed(b"cd\"").unwrap();
    assert!(parser.is_done());
    assert_eq!(
        parser.into_sink().events,
        vec![Ev::ValueString(b"abcd".to_vec())]
    );
}

/// Test that chunk boundaries may fall anywhere, including mid-escape,
/// mid-surrogate, and mid-number
#[test]
fn chunk_invariance() {
    assert_chunk_invariant_with(
        br#"{"k": "a\u00e9\uD83D\uDE00\t\\b", "n": [-12.5e+3, 0, 17, true, false, null], "e": {}}"#,
        JsonParserOptions::default(),
    );
}

/// Test that chunk boundaries may fall inside comments
#[test]
fn chunk_invariance_with_comments() {
    assert_chunk_invariant_with(
        b"/* c */ { \"a\" /* k */ : # y\n 1, \"b\": [1 /* m */, 2] } # tail\n",
        comments_allowed(),
    );
}

/// Test that begin and end events balance and that keys alternate with
/// values inside objects
#[test]
fn balance_and_alternation() {
    let events = parse_events(
        br#"{"a": {"b": [1, {"c": null}]}, "d": [[]], "e": "x"}"#,
    );
    let mut depth = 0usize;
    for ev in &events {
        match ev {
            Ev::StartObject | Ev::StartArray => depth += 1,
            Ev::EndObject | Ev::EndArray => depth -= 1,
            _ => {}
        }
    }
    assert_eq!(depth, 0);

    // inside an object, a field name must be followed by exactly one value
    let opens = events
        .iter()
        .filter(|e| matches!(e, Ev::StartObject))
        .count();
    let keys = events.iter().filter(|e| matches!(e, Ev::FieldName(_))).count();
    assert_eq!(opens, 3);
    assert_eq!(keys, 5);
}

/// Test that empty input is accepted but never complete
#[test]
fn empty_input() {
    let mut parser = JsonParser::new(NullSink);
    parser.feed(b"").unwrap();
    assert!(!parser.is_done());
    parser.feed(b"   \t\r\n ").unwrap();
    assert!(!parser.is_done());
}

/// Test that a top-level number is complete without a delimiter and that
/// finish() delivers its event
#[test]
fn top_level_number_with_finish() {
    let mut parser = JsonParser::new(EventCollector::default());
    parser.feed(b"42").unwrap();
    assert!(parser.is_done());
    parser.finish().unwrap();
    assert!(parser.is_done());
    assert_eq!(parser.into_sink().events, vec![Ev::ValueInt(b"42".to_vec())]);
}

/// Test that trailing whitespace delivers a top-level number without finish()
#[test]
fn top_level_number_with_trailing_whitespace() {
    let mut parser = JsonParser::new(EventCollector::default());
    parser.feed(b"-0.5e+2 ").unwrap();
    assert!(parser.is_done());
    assert_eq!(
        parser.into_sink().events,
        vec![Ev::ValueFloat(b"-0.5e+2".to_vec())]
    );
}

/// Test that a top-level literal is delivered by finish()
#[test]
fn top_level_literal() {
    let mut parser = JsonParser::new(EventCollector::default());
    parser.feed(b"true").unwrap();
    parser.finish().unwrap();
    assert!(parser.is_done());
    assert_eq!(parser.into_sink().events, vec![Ev::ValueTrue]);
}

/// Test that incomplete numbers are not accepted as complete documents
#[test]
fn incomplete_numbers() {
    for doc in [&b"-"[..], b"1.", b"1e", b"1e+"] {
        let mut parser = JsonParser::new(NullSink);
        parser.feed(doc).unwrap();
        parser.finish().unwrap();
        assert!(!parser.is_done(), "{:?} should be incomplete", doc);
    }
}

/// Test that malformed numbers are rejected
#[test]
fn malformed_numbers() {
    assert!(matches!(parse_error(b"01"), ParseError::UnexpectedChar(b'1')));
    assert!(matches!(parse_error(b"+1"), ParseError::UnexpectedChar(b'+')));
    assert!(matches!(parse_error(b"1.e5"), ParseError::UnexpectedChar(b'e')));
    assert!(matches!(parse_error(b"-x"), ParseError::UnexpectedChar(b'x')));
}

/// Test that mismatched brackets are caught by the mode stack
#[test]
fn mismatched_brackets() {
    assert!(matches!(
        parse_error(br#"{"a":1]"#),
        ParseError::PopUnexpectedMode
    ));
    assert!(matches!(parse_error(b"[1}"), ParseError::PopUnexpectedMode));
}

/// Test that a closing bracket outside of any structure is caught
#[test]
fn pop_empty() {
    assert!(matches!(parse_error(b"{}]"), ParseError::PopEmpty));
}

/// Test that a comma outside of any structure is caught
#[test]
fn comma_out_of_structure() {
    assert!(matches!(parse_error(b","), ParseError::CommaOutOfStructure));
    assert!(matches!(
        parse_error(b"{} ,"),
        ParseError::CommaOutOfStructure
    ));
}

/// Test that non-whitespace control characters are illegal, also inside
/// strings
#[test]
fn bad_char() {
    assert!(matches!(parse_error(b"\x01"), ParseError::BadChar(0x01)));
    assert!(matches!(
        parse_error(b"\"a\x02b\""),
        ParseError::BadChar(0x02)
    ));
}

/// Test that a newline inside a string is rejected
#[test]
fn newline_in_string() {
    assert!(matches!(
        parse_error(b"\"a\nb\""),
        ParseError::UnexpectedChar(b'\n')
    ));
}

/// Test that a document nesting deeper than max_nesting fails and that the
/// limit is a hard cap, not a soft ceiling
#[test]
fn nesting_limit() {
    let options = JsonParserOptionsBuilder::default().with_max_nesting(3).build();
    assert!(matches!(
        parse_error_with(b"[[[[]]]]", options),
        ParseError::NestingLimit
    ));

    // exactly three levels is fine
    parse_events_with(
        br#"{"key":[{"key":"value"},{"key":"value"},{"key":"value"}]}"#,
        options,
    );
}

/// Test that a primitive longer than max_data fails and that one of exactly
/// max_data bytes is accepted
#[test]
fn data_limit() {
    let options = JsonParserOptionsBuilder::default().with_max_data(6).build();
    assert!(matches!(
        parse_error_with(br#"["1234567"]"#, options),
        ParseError::DataLimit
    ));
    assert!(matches!(
        parse_error_with(b"[12345678901234]", options),
        ParseError::DataLimit
    ));

    // six bytes on the dot; escapes count decoded
    parse_events_with(br#"["123456", 123456, "\u0130AAAA"]"#, options);
}

/// Test that comments are a fatal classification when not enabled
#[test]
fn comment_not_allowed() {
    assert!(matches!(
        parse_error(b"/* c */ {}"),
        ParseError::CommentNotAllowed
    ));
    assert!(matches!(
        parse_error(b"# y\n {}"),
        ParseError::CommentNotAllowed
    ));

    let c_only = JsonParserOptionsBuilder::default()
        .with_allow_c_comments(true)
        .build();
    assert!(matches!(
        parse_error_with(b"/* ok */ # no\n {}", c_only),
        ParseError::CommentNotAllowed
    ));
}

/// Test that a primitive pending when a disallowed comment marker is seen
/// is still flushed before the error is reported
#[test]
fn comment_not_allowed_flushes_pending() {
    let mut parser = JsonParser::new(EventCollector::default());
    let err = parser.feed(b"[1/* c */, 2]").unwrap_err();
    assert!(matches!(err, ParseError::CommentNotAllowed));
    assert_eq!(
        parser.sink.events,
        vec![Ev::StartArray, Ev::ValueInt(b"1".to_vec())]
    );

    let mut parser = JsonParser::new(EventCollector::default());
    let err = parser.feed(b"[1# y\n]").unwrap_err();
    assert!(matches!(err, ParseError::CommentNotAllowed));
    assert_eq!(
        parser.sink.events,
        vec![Ev::StartArray, Ev::ValueInt(b"1".to_vec())]
    );
}

/// Test that a comment interrupting a number flushes it first and resumes
/// at the value-complete point
#[test]
fn comment_interrupting_number() {
    assert_eq!(
        parse_events_with(b"[1/* c */, 2]", comments_allowed()),
        vec![
            Ev::StartArray,
            Ev::ValueInt(b"1".to_vec()),
            Ev::ValueInt(b"2".to_vec()),
            Ev::EndArray,
        ]
    );
}

/// Test that comments between keys, colons, and values restore the saved
/// state
#[test]
fn comment_positions() {
    assert_eq!(
        parse_events_with(
            b"{ /* a */ \"k\" /* b */ : /* c */ 1 /* d */ , \"l\": # e\n 2 } # f\n",
            comments_allowed()
        ),
        vec![
            Ev::StartObject,
            Ev::FieldName(b"k".to_vec()),
            Ev::ValueInt(b"1".to_vec()),
            Ev::FieldName(b"l".to_vec()),
            Ev::ValueInt(b"2".to_vec()),
            Ev::EndObject,
        ]
    );
}

/// Test that an unterminated C-style comment leaves the document incomplete
#[test]
fn unterminated_comment() {
    let mut parser = JsonParser::new_with_options(NullSink, comments_allowed());
    parser.feed(b"{} /* never closed").unwrap();
    parser.finish().unwrap();
    assert!(!parser.is_done());
}

/// Test that a high surrogate must be followed by a low surrogate
#[test]
fn missing_low_surrogate() {
    assert!(matches!(
        parse_error(br#""\uD800\u0041""#),
        ParseError::UnicodeMissingLowSurrogate
    ));
    assert!(matches!(
        parse_error(br#""\uD800\uD800""#),
        ParseError::UnicodeMissingLowSurrogate
    ));
}

/// Test that a lone low surrogate is rejected
#[test]
fn unexpected_low_surrogate() {
    assert!(matches!(
        parse_error(br#""\uDC00""#),
        ParseError::UnicodeUnexpectedLowSurrogate
    ));
}

/// Test that a high surrogate followed by a plain character is a syntax
/// error
#[test]
fn high_surrogate_then_plain_char() {
    assert!(matches!(
        parse_error(br#""\uD800x""#),
        ParseError::UnexpectedChar(b'x')
    ));
}

/// Test that a sink error aborts parsing immediately
#[test]
fn callback_abort() {
    let sink = EventCollector {
        abort_after: Some(2),
        ..Default::default()
    };
    let mut parser = JsonParser::new(sink);
    let err = parser.feed(br#"{"a": 1, "b": 2}"#).unwrap_err();
    assert!(matches!(err, ParseError::Callback(_)));
    assert_eq!(parser.sink.events.len(), 2);
}

/// Test that parsed_bytes points at the offending byte after an error
#[test]
fn parsed_bytes_error_position() {
    let mut parser = JsonParser::new(NullSink);
    let err = parser.feed(br#"{"a": x}"#).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedChar(b'x')));
    assert_eq!(parser.parsed_bytes(), 6);
}

/// Test that parsed_bytes accumulates across feed calls
#[test]
fn parsed_bytes_across_feeds() {
    let mut parser = JsonParser::new(NullSink);
    parser.feed(b"[1, ").unwrap();
    parser.feed(b"2").unwrap();
    let err = parser.feed(b", x]").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedChar(b'x')));
    assert_eq!(parser.parsed_bytes(), 7);
}

/// Test compact printing of a parsed document
#[test]
fn printer_compact() {
    assert_eq!(
        reformat(b" { \"a\" : 1 , \"b\" : [ true , \"x\" , -0.5e+2 ] , \"c\" : null } "),
        br#"{"a":1,"b":[true,"x",-0.5e+2],"c":null}"#
    );
}

/// Test pretty printing with a two-space indent
#[test]
fn printer_pretty() {
    let events = [
        JsonEvent::StartObject,
        JsonEvent::FieldName(b"a"),
        JsonEvent::ValueInt(b"1"),
        JsonEvent::FieldName(b"b"),
        JsonEvent::StartArray,
        JsonEvent::ValueTrue,
        JsonEvent::StartObject,
        JsonEvent::EndObject,
        JsonEvent::EndArray,
        JsonEvent::EndObject,
    ];
    let mut printer = JsonPrinter::new(Vec::new()).with_indent("  ");
    for ev in events {
        printer.print_pretty(ev).unwrap();
    }
    assert_eq!(
        String::from_utf8(printer.into_sink()).unwrap(),
        "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    {}\n  ]\n}"
    );
}

/// Test pretty printing with the default tab indent
#[test]
fn printer_pretty_default_indent() {
    let mut printer = JsonPrinter::new(Vec::new());
    for ev in [
        JsonEvent::StartArray,
        JsonEvent::ValueInt(b"1"),
        JsonEvent::ValueInt(b"2"),
        JsonEvent::EndArray,
    ] {
        printer.print_pretty(ev).unwrap();
    }
    assert_eq!(
        String::from_utf8(printer.into_sink()).unwrap(),
        "[\n\t1,\n\t2\n]"
    );
}

/// Test that reformatting is idempotent
#[test]
fn roundtrip_idempotence() {
    for doc in [
        r#"{"a":1}"#.as_bytes(),
        r#"[true, false, null, -0.5e+2, "séq\n"]"#.as_bytes(),
        r#"{"k": {"nested": [1, 2, {"deep": "😀"}]}, "e": [], "o": {}}"#.as_bytes(),
        r#""top""#.as_bytes(),
    ] {
        let once = reformat(doc);
        let twice = reformat(&once);
        assert_eq!(once, twice);
    }
}

/// Test that strings re-escape on output
#[test]
fn roundtrip_escapes() {
    assert_eq!(reformat(br#"["\b\"\\"]"#), br#"["\b\"\\"]"#);
}

/// Test that partial-data mode emits fragments instead of growing the
/// buffer
#[test]
fn partial_mode_long_string() {
    let options = JsonParserOptionsBuilder::default()
        .with_mode(ParseMode::PartialData)
        .with_buffer_initial_size(4)
        .build();
    assert_eq!(
        parse_events_with(br#""abcdefgh""#, options),
        vec![
            Ev::PartialString(b"abcd".to_vec()),
            Ev::ValueString(b"efgh".to_vec()),
        ]
    );
}

/// Test that partial-data mode flushes the buffer at the end of every feed
/// call
#[test]
fn partial_mode_chunk_flush() {
    let options = JsonParserOptionsBuilder::default()
        .with_mode(ParseMode::PartialData)
        .build();
    let mut parser = JsonParser::new_with_options(EventCollector::default(), options);
    parser.feed(b"\"ab").unwrap();
    parser.feed(b"cd\"").unwrap();
    assert!(parser.is_done());
    assert_eq!(
        parser.into_sink().events,
        vec![
            Ev::PartialString(b"ab".to_vec()),
            Ev::ValueString(b"cd".to_vec()),
        ]
    );
}

/// Test that numbers and field names fragment with their own event kinds
#[test]
fn partial_mode_numbers_and_keys() {
    let options = JsonParserOptionsBuilder::default()
        .with_mode(ParseMode::PartialData)
        .with_buffer_initial_size(4)
        .build();
    assert_eq!(
        parse_events_with(br#"{"abcdefg": 123456}"#, options),
        vec![
            Ev::StartObject,
            Ev::PartialFieldName(b"abcd".to_vec()),
            Ev::FieldName(b"efg".to_vec()),
            Ev::PartialValue(b"1234".to_vec()),
            Ev::ValueInt(b"56".to_vec()),
            Ev::EndObject,
        ]
    );
}

/// Test that coalescing the fragments of partial-data mode reproduces the
/// buffered event stream, whatever the chunking
#[test]
fn partial_mode_reassembly() {
    let doc = br#"{"first_name": "Elvis", "counts": [123456789, -2.75e-1], "x": "abcdefghijklmnop"}"#;
    let buffered = parse_events(doc);

    let options = JsonParserOptionsBuilder::default()
        .with_mode(ParseMode::PartialData)
        .with_buffer_initial_size(3)
        .build();
    for chunk_size in [1, 2, 5, doc.len()] {
        let mut parser = JsonParser::new_with_options(EventCollector::default(), options);
        for chunk in doc.chunks(chunk_size) {
            parser.feed(chunk).unwrap();
        }
        parser.finish().unwrap();
        assert!(parser.is_done());
        assert_eq!(
            coalesce(parser.into_sink().events),
            buffered,
            "chunk size {chunk_size}"
        );
    }
}

/// Test that in-place mode borrows payloads from the input with escapes
/// left undecoded
#[test]
fn in_place_mode() {
    let options = JsonParserOptionsBuilder::default()
        .with_mode(ParseMode::InPlace)
        .build();
    assert_eq!(
        parse_events_with(br#"["a\nb", 12, "", true]"#, options),
        vec![
            Ev::StartArray,
            Ev::ValueString(b"a\\nb".to_vec()),
            Ev::ValueInt(b"12".to_vec()),
            Ev::ValueString(b"".to_vec()),
            Ev::ValueTrue,
            Ev::EndArray,
        ]
    );
}

/// Test that in-place mode emits a partial event when a token is cut by the
/// end of a chunk
#[test]
fn in_place_mode_chunked() {
    let options = JsonParserOptionsBuilder::default()
        .with_mode(ParseMode::InPlace)
        .build();
    let mut parser = JsonParser::new_with_options(EventCollector::default(), options);
    parser.feed(br#"["ab"#).unwrap();
    parser.feed(br#"cd", 1]"#).unwrap();
    assert!(parser.is_done());
    assert_eq!(
        parser.into_sink().events,
        vec![
            Ev::StartArray,
            Ev::PartialString(b"ab".to_vec()),
            Ev::ValueString(b"cd".to_vec()),
            Ev::ValueInt(b"1".to_vec()),
            Ev::EndArray,
        ]
    );
}

/// Test that in-place mode does not validate surrogate pairs
#[test]
fn in_place_mode_surrogates_unvalidated() {
    let options = JsonParserOptionsBuilder::default()
        .with_mode(ParseMode::InPlace)
        .build();
    assert_eq!(
        parse_events_with(br#""\uD800""#, options),
        vec![Ev::ValueString(b"\\uD800".to_vec())]
    );
}

/// Test that unbounded nesting just grows
#[test]
fn deep_nesting_unbounded() {
    let mut doc = vec![b'['; 1000];
    doc.extend(std::iter::repeat(b']').take(1000));
    let events = parse_events(&doc);
    assert_eq!(events.len(), 2000);
}

/// Test that keys and strings are distinguished purely by position
#[test]
fn keys_versus_strings() {
    assert_eq!(
        parse_events(br#"{"a": "b", "c": {"d": "e"}}"#),
        vec![
            Ev::StartObject,
            Ev::FieldName(b"a".to_vec()),
            Ev::ValueString(b"b".to_vec()),
            Ev::FieldName(b"c".to_vec()),
            Ev::StartObject,
            Ev::FieldName(b"d".to_vec()),
            Ev::ValueString(b"e".to_vec()),
            Ev::EndObject,
            Ev::EndObject,
        ]
    );
}

/// Test that empty keys and empty strings are fine
#[test]
fn empty_strings() {
    assert_eq!(
        parse_events(br#"{"": ""}"#),
        vec![
            Ev::StartObject,
            Ev::FieldName(b"".to_vec()),
            Ev::ValueString(b"".to_vec()),
            Ev::EndObject,
        ]
    );
}

/// Test that bytes above 127 pass through strings untouched
#[test]
fn high_bytes_in_strings() {
    assert_eq!(
        parse_events("\"caf\u{e9} ☕\"".as_bytes()),
        vec![Ev::ValueString("caf\u{e9} ☕".as_bytes().to_vec())]
    );
}

/// Test that two parsers are fully independent
#[test]
fn independent_instances() {
    let mut a = JsonParser::new(EventCollector::default());
    let mut b = JsonParser::new(EventCollector::default());
    a.feed(b"[1, ").unwrap();
    b.feed(br#"{"x""#).unwrap();
    a.feed(b"2]").unwrap();
    b.feed(b": 3}").unwrap();
    assert!(a.is_done());
    assert!(b.is_done());
    assert_eq!(
        a.into_sink().events,
        vec![
            Ev::StartArray,
            Ev::ValueInt(b"1".to_vec()),
            Ev::ValueInt(b"2".to_vec()),
            Ev::EndArray,
        ]
    );
    assert_eq!(
        b.into_sink().events,
        vec![
            Ev::StartObject,
            Ev::FieldName(b"x".to_vec()),
            Ev::ValueInt(b"3".to_vec()),
            Ev::EndObject,
        ]
    );
}

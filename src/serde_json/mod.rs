//! Materialize a JSON document into a Serde JSON
//! [`Value`](::serde_json::Value) by collecting the parser's event stream.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::event::{InvalidFloatValueError, InvalidStringValueError};
use crate::sink::{EventSink, SinkError};
use crate::{JsonEvent, JsonParser, ParseError};

/// An error that can happen when materializing a JSON document
#[derive(Error, Debug)]
pub enum FromSliceError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    InvalidString(#[from] InvalidStringValueError),

    #[error("{0}")]
    InvalidFloat(#[from] InvalidFloatValueError),

    #[error("number cannot be represented: {0}")]
    InvalidNumber(String),

    #[error("JSON text ended prematurely")]
    Incomplete,
}

/// Assembles values from the event stream. Containers under construction
/// live on a stack together with the field name they will be attached under.
#[derive(Default)]
struct ValueBuilder {
    stack: Vec<(Option<String>, Value)>,
    current_key: Option<String>,
    result: Option<Value>,
    error: Option<FromSliceError>,
}

impl ValueBuilder {
    fn attach(&mut self, value: Value) {
        if let Some((_, parent)) = self.stack.last_mut() {
            match parent {
                Value::Object(m) => {
                    if let Some(key) = self.current_key.take() {
                        m.insert(key, value);
                    }
                }
                Value::Array(a) => a.push(value),
                _ => {}
            }
        } else {
            self.result = Some(value);
        }
    }

    fn try_event(&mut self, event: &JsonEvent<'_>) -> Result<(), FromSliceError> {
        match *event {
            JsonEvent::StartObject => {
                self.stack
                    .push((self.current_key.take(), Value::Object(Map::new())));
            }

            JsonEvent::StartArray => {
                self.stack.push((self.current_key.take(), Value::Array(vec![])));
            }

            JsonEvent::EndObject | JsonEvent::EndArray => {
                if let Some((key, value)) = self.stack.pop() {
                    self.current_key = key;
                    self.attach(value);
                }
            }

            JsonEvent::FieldName(_) => {
                self.current_key = Some(event.as_str()?.to_owned());
            }

            JsonEvent::ValueString(_) => {
                self.attach(Value::String(event.as_str()?.to_owned()));
            }

            JsonEvent::ValueInt(data) => {
                let number = if let Ok(i) = event.as_int::<i64>() {
                    Number::from(i)
                } else if let Ok(u) = event.as_int::<u64>() {
                    Number::from(u)
                } else {
                    return Err(FromSliceError::InvalidNumber(
                        String::from_utf8_lossy(data).into_owned(),
                    ));
                };
                self.attach(Value::Number(number));
            }

            JsonEvent::ValueFloat(data) => {
                let f = event.as_float()?;
                let number = Number::from_f64(f).ok_or_else(|| {
                    FromSliceError::InvalidNumber(String::from_utf8_lossy(data).into_owned())
                })?;
                self.attach(Value::Number(number));
            }

            JsonEvent::ValueTrue => self.attach(Value::Bool(true)),
            JsonEvent::ValueFalse => self.attach(Value::Bool(false)),
            JsonEvent::ValueNull => self.attach(Value::Null),

            // not produced in the default (buffered) parse mode
            JsonEvent::PartialFieldName(_)
            | JsonEvent::PartialString(_)
            | JsonEvent::PartialValue(_) => {}
        }
        Ok(())
    }
}

impl EventSink for ValueBuilder {
    fn event(&mut self, event: JsonEvent<'_>) -> Result<(), SinkError> {
        match self.try_event(&event) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.error = Some(e);
                Err(SinkError::Aborted)
            }
        }
    }
}

/// Parse a byte slice into a Serde JSON [Value]
///
/// ```
/// use serde_json::json;
/// use jsonpush::serde_json::from_slice;
///
/// let json = r#"{"name": "Elvis"}"#.as_bytes();
/// let expected = json!({
///     "name": "Elvis"
/// });
/// let actual = from_slice(json).unwrap();
/// assert_eq!(expected, actual);
/// ```
pub fn from_slice(v: &[u8]) -> Result<Value, FromSliceError> {
    let mut parser = JsonParser::new(ValueBuilder::default());
    let fed = parser.feed(v).and_then(|()| parser.finish());
    if let Err(e) = fed {
        if let Some(builder_error) = parser.sink.error.take() {
            return Err(builder_error);
        }
        return Err(e.into());
    }
    if !parser.is_done() {
        return Err(FromSliceError::Incomplete);
    }
    parser.into_sink().result.ok_or(FromSliceError::Incomplete)
}

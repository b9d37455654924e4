use std::num::ParseFloatError;
use std::str::{from_utf8, Utf8Error};

use btoi::ParseIntegerError;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, FromPrimitive, Zero};
use thiserror::Error;

/// An error that can happen when reading an event's payload as a string
#[derive(Error, Debug)]
pub enum InvalidStringValueError {
    #[error("event does not carry a payload")]
    NoPayload,

    #[error("invalid string: {0}")]
    Utf8(#[from] Utf8Error),
}

/// An error that can happen when trying to parse an event's payload to an
/// integer
#[derive(Error, Debug)]
pub enum InvalidIntValueError {
    #[error("event does not carry a payload")]
    NoPayload,

    #[error("invalid integer: {0}")]
    Parse(#[from] ParseIntegerError),
}

/// An error that can happen when trying to parse an event's payload to a float
#[derive(Error, Debug)]
pub enum InvalidFloatValueError {
    #[error("unable to convert payload to string: {0}")]
    String(#[from] InvalidStringValueError),

    #[error("unable to parse payload to float: {0}")]
    Float(#[from] ParseFloatError),
}

/// All possible JSON events pushed into an [`EventSink`](crate::EventSink)
/// by the [`JsonParser`](crate::JsonParser).
///
/// Events that carry a payload borrow it from the parser's token buffer (or,
/// in [`ParseMode::InPlace`](crate::options::ParseMode::InPlace), from the
/// input chunk). The slice is only valid for the duration of the sink call;
/// copy it if you need to keep it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JsonEvent<'a> {
    /// The start of a JSON object.
    StartObject,

    /// The end of a JSON object.
    EndObject,

    /// The start of a JSON array.
    StartArray,

    /// The end of a JSON array.
    EndArray,

    /// A field name. The payload contains the decoded name.
    FieldName(&'a [u8]),

    /// A string value. The payload contains the decoded string.
    ValueString(&'a [u8]),

    /// An integer value. The payload contains the textual lexeme. Call
    /// [`as_int()`](Self::as_int()) to convert it.
    ValueInt(&'a [u8]),

    /// A floating point value. The payload contains the textual lexeme. Call
    /// [`as_float()`](Self::as_float()) to convert it.
    ValueFloat(&'a [u8]),

    /// The boolean value `true`.
    ValueTrue,

    /// The boolean value `false`.
    ValueFalse,

    /// A `null` value.
    ValueNull,

    /// A leading fragment of a field name. Only emitted in
    /// [`ParseMode::PartialData`](crate::options::ParseMode::PartialData) and
    /// [`ParseMode::InPlace`](crate::options::ParseMode::InPlace); the
    /// terminal [`FieldName`](Self::FieldName) carries the remaining bytes.
    PartialFieldName(&'a [u8]),

    /// A leading fragment of a string value. See
    /// [`PartialFieldName`](Self::PartialFieldName).
    PartialString(&'a [u8]),

    /// A leading fragment of a number lexeme. See
    /// [`PartialFieldName`](Self::PartialFieldName).
    PartialValue(&'a [u8]),
}

impl<'a> JsonEvent<'a> {
    /// Return the payload bytes of events that carry one, or `None` for
    /// structural and literal events.
    pub fn payload(&self) -> Option<&'a [u8]> {
        match *self {
            JsonEvent::FieldName(d)
            | JsonEvent::ValueString(d)
            | JsonEvent::ValueInt(d)
            | JsonEvent::ValueFloat(d)
            | JsonEvent::PartialFieldName(d)
            | JsonEvent::PartialString(d)
            | JsonEvent::PartialValue(d) => Some(d),
            _ => None,
        }
    }

    /// `true` if this is one of the fragment events of the non-default parse
    /// modes.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            JsonEvent::PartialFieldName(_)
                | JsonEvent::PartialString(_)
                | JsonEvent::PartialValue(_)
        )
    }

    /// Get the payload as a string. Call this after you've received
    /// [`FieldName`](Self::FieldName) or [`ValueString`](Self::ValueString).
    pub fn as_str(&self) -> Result<&'a str, InvalidStringValueError> {
        match self.payload() {
            Some(d) => Ok(from_utf8(d)?),
            None => Err(InvalidStringValueError::NoPayload),
        }
    }

    /// Parse the payload as an integer. Call this after you've received
    /// [`ValueInt`](Self::ValueInt).
    pub fn as_int<I>(&self) -> Result<I, InvalidIntValueError>
    where
        I: FromPrimitive + Zero + CheckedAdd + CheckedSub + CheckedMul,
    {
        match self.payload() {
            Some(d) => Ok(btoi::btoi(d)?),
            None => Err(InvalidIntValueError::NoPayload),
        }
    }

    /// Parse the payload as a float. Call this after you've received
    /// [`ValueFloat`](Self::ValueFloat).
    pub fn as_float(&self) -> Result<f64, InvalidFloatValueError> {
        Ok(self.as_str()?.parse()?)
    }
}

#[cfg(test)]
mod test {
    use super::JsonEvent;

    #[test]
    fn payload() {
        assert_eq!(JsonEvent::ValueInt(b"42").payload(), Some(&b"42"[..]));
        assert_eq!(JsonEvent::StartObject.payload(), None);
        assert_eq!(JsonEvent::ValueTrue.payload(), None);
    }

    #[test]
    fn as_int() {
        assert_eq!(JsonEvent::ValueInt(b"42").as_int::<i64>().unwrap(), 42);
        assert_eq!(JsonEvent::ValueInt(b"-7").as_int::<i32>().unwrap(), -7);
        assert!(JsonEvent::ValueInt(b"300").as_int::<u8>().is_err());
        assert!(JsonEvent::ValueTrue.as_int::<i64>().is_err());
    }

    #[test]
    fn as_float() {
        assert_eq!(JsonEvent::ValueFloat(b"-0.5e+2").as_float().unwrap(), -50.0);
    }

    #[test]
    fn as_str() {
        assert_eq!(
            JsonEvent::ValueString("caf\u{e9}".as_bytes()).as_str().unwrap(),
            "café"
        );
        assert!(JsonEvent::ValueString(b"\xff").as_str().is_err());
    }
}

use crate::protobuf::varint::read_varint;
use crate::protobuf::{ErrorKind, Field, Fields, ProtobufError};

/// Defines how to deserialize a type from an encoded message.
///
/// # Usage
///
/// Given the Protocol Buffers schema:
///
/// ```proto
/// message Var {
///     required string name = 1;
///     optional bool duplicable = 3;
/// }
/// ```
///
/// A decoder could be written as follows:
///
/// ```
/// use opwrap::protobuf::{DecodeMessage, Fields, ProtobufError};
///
/// #[derive(Default)]
/// struct Var {
///     name: String,
///     duplicable: bool,
/// }
///
/// impl DecodeMessage for Var {
///     fn decode_fields(mut fields: Fields<'_>) -> Result<Self, ProtobufError> {
///         let mut var = Var::default();
///         while let Some(field) = fields.next()? {
///             match field.number() {
///                 1 => var.name = field.read_string()?.to_string(),
///                 3 => var.duplicable = field.get_bool()?,
///                 // Fields which are unrecognized or not useful are ignored.
///                 _ => {}
///             }
///         }
///         Ok(var)
///     }
/// }
///
/// let message: &[u8] = &[
///     0x0A, 0x01, 0x58, // name = "X"
///     0x18, 0x01, // duplicable = true
/// ];
/// let var = Var::decode(message).unwrap();
/// assert_eq!(var.name, "X");
/// assert!(var.duplicable);
/// ```
pub trait DecodeMessage: Sized {
    /// Decode a message which occupies all of `buf`.
    fn decode(buf: &[u8]) -> Result<Self, ProtobufError> {
        let ctx = Some(std::any::type_name::<Self>());
        Self::decode_fields(Fields::new(buf, ctx))
    }

    /// Decode a message from an iterator over message fields.
    fn decode_fields(fields: Fields<'_>) -> Result<Self, ProtobufError>;

    /// Decode a message stored in a field in a parent message.
    fn decode_field(field: &Field<'_>) -> Result<Self, ProtobufError> {
        let ctx = Some(std::any::type_name::<Self>());
        Self::decode_fields(field.read_message(ctx)?)
    }
}

/// Iterator over a stream of length-delimited messages.
///
/// Each message is preceded by its length in bytes, encoded as a varint. This
/// is the framing used when several messages are written to one file.
pub struct DelimitedMessages<'a> {
    buf: &'a [u8],
}

impl<'a> DelimitedMessages<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        DelimitedMessages { buf }
    }
}

impl<'a> Iterator for DelimitedMessages<'a> {
    type Item = Result<&'a [u8], ProtobufError>;

    fn next(&mut self) -> Option<Self::Item> {
        let buf = self.buf;
        if buf.is_empty() {
            return None;
        }

        let message = read_varint(buf)
            .map_err(ProtobufError::from)
            .and_then(|(len, len_len)| {
                usize::try_from(len)
                    .ok()
                    .and_then(|len| len.checked_add(len_len))
                    .and_then(|end| buf.get(len_len..end).map(|msg| (msg, end)))
                    .ok_or(ProtobufError::new(ErrorKind::Eof))
            });

        match message {
            Ok((msg, end)) => {
                self.buf = &buf[end..];
                Some(Ok(msg))
            }
            Err(err) => {
                // Stop after the first error, as the framing is lost.
                self.buf = &[];
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DelimitedMessages;
    use crate::protobuf::varint::encode_varint;
    use crate::protobuf::ErrorKind;

    #[test]
    fn test_delimited_messages() {
        let mut buf = Vec::new();
        for msg in [&b"abc"[..], &b""[..], &b"de"[..]] {
            buf.extend(encode_varint(msg.len() as u64));
            buf.extend_from_slice(msg);
        }

        let messages: Vec<_> = DelimitedMessages::new(&buf)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(messages, [&b"abc"[..], &b""[..], &b"de"[..]]);
    }

    #[test]
    fn test_truncated_delimited_message() {
        let mut buf = encode_varint(10);
        buf.extend_from_slice(b"short");

        let mut messages = DelimitedMessages::new(&buf);
        let err = messages.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Eof);
        assert!(messages.next().is_none());
    }
}

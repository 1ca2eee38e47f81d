use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::protobuf::varint::read_varint;

/// File format of an operator registry dump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FileType {
    /// JSON document of the form `{"ops": [...]}`.
    Json,
    /// Stream of length-delimited `OpProto` Protocol Buffers messages.
    Protobuf,
}

impl FileType {
    /// Return the file type that corresponds to the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().unwrap_or_default();

        if ext.eq_ignore_ascii_case(OsStr::new("json")) {
            Some(FileType::Json)
        } else if ext.eq_ignore_ascii_case(OsStr::new("pb")) {
            Some(FileType::Protobuf)
        } else {
            None
        }
    }

    /// Infer file type from the content of a file.
    ///
    /// An empty buffer is a protobuf stream with no messages, so it loads as
    /// an empty registry.
    pub fn from_buffer(data: &[u8]) -> Option<Self> {
        if data.is_empty() {
            return Some(FileType::Protobuf);
        }

        if data.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{') {
            return Some(FileType::Json);
        }

        // Protobuf dumps have no file type identifier, so check that the data
        // starts with a plausible message length followed by the tag of the
        // `OpProto.type` field (field 1, wire type 2).
        let (len, len_len) = read_varint(data).ok()?;
        let body = &data[len_len..];
        let len_fits = usize::try_from(len).is_ok_and(|len| len <= body.len());
        if len_fits && body.first() == Some(&0x0a) {
            return Some(FileType::Protobuf);
        }

        None
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Json => write!(f, "JSON"),
            FileType::Protobuf => write!(f, "protobuf"),
        }
    }
}

use std::borrow::Cow;
use std::fmt;

use clap::ValueEnum;
use encoding_rs::{UTF_8, WINDOWS_1252};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encodings a question source may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceEncoding {
    /// UTF-8 with an optional leading byte order mark.
    #[value(name = "utf-8-sig")]
    Utf8Sig,
    #[value(name = "utf-8")]
    Utf8,
    /// ISO-8859-1. Decodes any byte sequence.
    #[value(name = "latin-1")]
    Latin1,
    #[value(name = "cp1252")]
    Cp1252,
}

/// The order encodings are tried in when none is configured.
pub const DEFAULT_ENCODINGS: [SourceEncoding; 4] = [
    SourceEncoding::Utf8Sig,
    SourceEncoding::Utf8,
    SourceEncoding::Latin1,
    SourceEncoding::Cp1252,
];

impl SourceEncoding {
    pub fn name(self) -> &'static str {
        match self {
            SourceEncoding::Utf8Sig => "utf-8-sig",
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Latin1 => "latin-1",
            SourceEncoding::Cp1252 => "cp1252",
        }
    }

    /// Decode `bytes`, returning `None` if they are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            SourceEncoding::Utf8Sig => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
            }
            SourceEncoding::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            SourceEncoding::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())),
            SourceEncoding::Cp1252 => {
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

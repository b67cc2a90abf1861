//! Source encoding detection and decoding.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::debug;

use crate::error::{IngestError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Character encoding of a raw extract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceEncoding {
    /// UTF-8 when the bytes are valid UTF-8, Latin-1 otherwise.
    #[default]
    Auto,
    /// Strict UTF-8.
    Utf8,
    /// ISO-8859-1, decoded as Windows-1252 (a superset).
    Latin1,
}

impl SourceEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceEncoding::Auto => "auto",
            SourceEncoding::Utf8 => "UTF-8",
            SourceEncoding::Latin1 => "Latin-1",
        }
    }
}

/// Decodes raw file bytes into UTF-8 text.
///
/// A UTF-8 byte order mark is dropped. UTF-16 files are rejected.
pub fn decode_source(bytes: &[u8], encoding: SourceEncoding, path: &Path) -> Result<String> {
    if bytes.len() >= 2 {
        if bytes[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    let bytes = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);

    match encoding {
        SourceEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| IngestError::InvalidEncoding {
                path: path.to_path_buf(),
                encoding: SourceEncoding::Utf8.as_str(),
            }),
        SourceEncoding::Latin1 => Ok(decode_latin1(bytes).into_owned()),
        SourceEncoding::Auto => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(_) => {
                debug!(path = %path.display(), "source is not UTF-8, decoding as Latin-1");
                Ok(decode_latin1(bytes).into_owned())
            }
        },
    }
}

fn decode_latin1(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("sales.csv")
    }

    #[test]
    fn auto_keeps_valid_utf8() {
        let text = decode_source(b"CITY\nNantes\n", SourceEncoding::Auto, path()).unwrap();
        assert_eq!(text, "CITY\nNantes\n");
    }

    #[test]
    fn auto_falls_back_to_latin1() {
        let source = b"CUSTOMERNAME\nCaf\xe9 Ltd\n";
        let text = decode_source(source, SourceEncoding::Auto, path()).unwrap();
        assert_eq!(text, "CUSTOMERNAME\nCaf\u{e9} Ltd\n");
    }

    #[test]
    fn strict_utf8_rejects_latin1_bytes() {
        let result = decode_source(b"Caf\xe9", SourceEncoding::Utf8, path());
        assert!(matches!(result, Err(IngestError::InvalidEncoding { .. })));
    }

    #[test]
    fn utf8_bom_is_removed() {
        let text = decode_source(b"\xEF\xBB\xBFSALES\n1\n", SourceEncoding::Auto, path()).unwrap();
        assert_eq!(text, "SALES\n1\n");
    }

    #[test]
    fn utf16_is_rejected() {
        let result = decode_source(&[0xFF, 0xFE, 0x41, 0x00], SourceEncoding::Auto, path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }
}

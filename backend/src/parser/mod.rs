//! Sheet export decoding and row tokenizing.
//!
//! Raw bytes are decoded with encoding auto-detection, then handed to a
//! [`RowTokenizer`]. No procurement-specific logic here.

pub mod tokenizer;

pub use tokenizer::{tokenize, QuoteBalanceTokenizer, RowTokenizer};

use std::path::Path;

use crate::error::{CsvError, CsvResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is always reported as `utf-8`; chardet is only consulted
/// for bytes that are not.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Latin-1 labels use the windows-1252 table, as browsers do. Unknown
/// encodings fall back to lossy UTF-8. Never fails.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Guess whether a sheet was exported tab-separated.
///
/// Looks at the first line only: returns `\t` when it holds more tabs than
/// commas, so it can be used as a secondary delimiter.
pub fn detect_secondary_delimiter(content: &str) -> Option<char> {
    let first_line = content.lines().next().unwrap_or("");
    let tabs = first_line.matches('\t').count();
    let commas = first_line.matches(',').count();

    (tabs > commas).then_some('\t')
}

/// Decoded sheet text plus the encoding it was read with.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: String,
}

/// Detect encoding and decode in one step.
pub fn decode_bytes_auto(bytes: &[u8]) -> CsvResult<DecodedText> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let text = decode_content(bytes, &encoding);

    Ok(DecodedText { text, encoding })
}

/// Read a file and decode it with auto-detection.
pub fn read_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<DecodedText> {
    let bytes = std::fs::read(path.as_ref())?;
    decode_bytes_auto(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        let decoded = decode_bytes_auto("Sr. No,Manager\n1,Gaurav".as_bytes()).unwrap();
        assert_eq!(decoded.encoding, "utf-8");
        assert!(decoded.text.starts_with("Sr. No"));
    }

    #[test]
    fn test_bom_stripped() {
        let bytes = b"\xEF\xBB\xBFSr. No,Manager";
        let decoded = decode_bytes_auto(bytes).unwrap();
        assert_eq!(decoded.encoding, "utf-8");
        assert_eq!(decoded.text, "Sr. No,Manager");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_latin1_uses_windows_1252_table() {
        assert_eq!(decode_content(&[b'1', 0xBD], "iso-8859-1"), "1½");
        assert_eq!(decode_content(&[0xA4], "latin1"), "¤");
        assert_eq!(decode_content(&[0x80], "cp1252"), "€");
    }

    #[test]
    fn test_valid_utf8_is_never_redetected() {
        let samples = [
            "Sr. No,Manager,New Vendor-1\n1,Asha,Tata ₹ Steel\n",
            "Sr. No,Manager\n1,José\n",
            "Average Spent (₹ Lakhs)\n175\n",
        ];

        for sample in samples {
            let decoded = decode_bytes_auto(sample.as_bytes()).unwrap();
            assert_eq!(decoded.encoding, "utf-8");
            assert_eq!(decoded.text, sample);
        }
    }

    #[test]
    fn test_unknown_encoding_is_lossy() {
        let decoded = decode_content(b"abc\xFF", "klingon");
        assert!(decoded.starts_with("abc"));
    }

    #[test]
    fn test_empty_bytes_error() {
        assert!(matches!(decode_bytes_auto(b""), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_detect_secondary_delimiter() {
        assert_eq!(detect_secondary_delimiter("a\tb\tc\n1\t2\t3"), Some('\t'));
        assert_eq!(detect_secondary_delimiter("a,b,c\n1\t2"), None);
        assert_eq!(detect_secondary_delimiter(""), None);
    }

    #[test]
    fn test_read_file_auto() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        std::fs::write(&path, "a,b\n1,2").unwrap();

        let decoded = read_file_auto(&path).unwrap();
        assert_eq!(decoded.text, "a,b\n1,2");
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_file_auto("/definitely/not/here.csv");
        assert!(matches!(result, Err(CsvError::Io(_))));
    }
}

//! Span dump format detection.
//!
//! Dumps arrive as plain JSON (a `{"spans": ...}` document or a bare span
//! array), as JSON Lines with one span per line, or as a gzipped variant of
//! either. Detection sniffs magic bytes and the leading structure without
//! parsing the full payload.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Text encoding of a span dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpEncoding {
    /// A single JSON document (object or array).
    Json,
    /// JSON Lines: one span object per line.
    JsonLines,
}

/// Detected span dump format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpFormat {
    /// Text encoding of the (possibly decompressed) payload.
    pub encoding: DumpEncoding,
    /// Whether the payload is gzip-compressed.
    pub gzipped: bool,
}

impl std::fmt::Display for DumpFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.encoding {
            DumpEncoding::Json => "JSON",
            DumpEncoding::JsonLines => "JSON Lines",
        };
        if self.gzipped {
            write!(f, "{} (gzipped)", name)
        } else {
            write!(f, "{}", name)
        }
    }
}

/// Gzip magic bytes.
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Bytes decompressed from a gzip member for sniffing.
const SNIFF_LEN: usize = 1024;

/// Detect the dump format of a file.
///
/// # Example
/// ```no_run
/// use docshape::detect::detect_dump_from_path;
///
/// let format = detect_dump_from_path("spans.json.gz").unwrap();
/// println!("Format: {}", format);
/// ```
pub fn detect_dump_from_path<P: AsRef<Path>>(path: P) -> Result<DumpFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut head = vec![0u8; SNIFF_LEN];
    let n = read_up_to(&mut reader, &mut head)?;
    detect_dump_from_bytes(&head[..n])
}

/// Detect the dump format from leading bytes.
///
/// `data` must contain at least the first few bytes of the file; for gzipped
/// input a prefix of the compressed stream suffices.
pub fn detect_dump_from_bytes(data: &[u8]) -> Result<DumpFormat> {
    if data.len() < 2 {
        return Err(Error::UnknownFormat);
    }

    if data.starts_with(GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(data);
        let mut head = vec![0u8; SNIFF_LEN];
        let n = read_up_to(&mut decoder, &mut head).map_err(|_| Error::UnknownFormat)?;
        let encoding = sniff_encoding(&head[..n])?;
        return Ok(DumpFormat {
            encoding,
            gzipped: true,
        });
    }

    Ok(DumpFormat {
        encoding: sniff_encoding(data)?,
        gzipped: false,
    })
}

/// Check if a file looks like a span dump.
pub fn is_span_dump<P: AsRef<Path>>(path: P) -> bool {
    detect_dump_from_path(path).is_ok()
}

/// Check if bytes look like a span dump.
pub fn is_span_dump_bytes(data: &[u8]) -> bool {
    detect_dump_from_bytes(data).is_ok()
}

/// Read until the buffer is full or the stream ends. Errors after the first
/// byte are swallowed: a truncated gzip tail still yields enough to sniff.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    loop {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Ok(filled),
            Ok(n) => {
                filled += n;
                if filled == buf.len() {
                    return Ok(filled);
                }
            }
            Err(_) if filled > 0 => return Ok(filled),
            Err(e) => return Err(e),
        }
    }
}

/// Classify decompressed payload bytes by their leading structure.
///
/// `[` opens a JSON array dump. `{` opens either a JSON document or a JSON
/// Lines stream; the two are told apart by whether the first line is a
/// complete object with further content following.
fn sniff_encoding(data: &[u8]) -> Result<DumpEncoding> {
    let first = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .ok_or(Error::UnknownFormat)?;

    match data[first] {
        b'[' => Ok(DumpEncoding::Json),
        b'{' => {
            if looks_like_json_lines(&data[first..]) {
                Ok(DumpEncoding::JsonLines)
            } else {
                Ok(DumpEncoding::Json)
            }
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// First line closes its braces and a second object follows on a later line.
fn looks_like_json_lines(data: &[u8]) -> bool {
    let newline = match data.iter().position(|&b| b == b'\n') {
        Some(i) => i,
        None => return false,
    };

    let mut depth = 0i32;
    let mut in_string = false;
    let mut escaped = false;
    for &b in &data[..newline] {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => depth -= 1,
            _ => {}
        }
    }

    depth == 0 && data[newline..].iter().any(|&b| b == b'{')
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_detect_array_dump() {
        let format = detect_dump_from_bytes(b"[{\"text\": \"hi\"}]").unwrap();
        assert_eq!(format.encoding, DumpEncoding::Json);
        assert!(!format.gzipped);
    }

    #[test]
    fn test_detect_object_dump() {
        let data = b"{\n  \"spans\": [],\n  \"entities\": []\n}";
        let format = detect_dump_from_bytes(data).unwrap();
        assert_eq!(format.encoding, DumpEncoding::Json);
    }

    #[test]
    fn test_detect_json_lines() {
        let data = b"{\"text\": \"a\", \"page\": 1}\n{\"text\": \"b\", \"page\": 1}\n";
        let format = detect_dump_from_bytes(data).unwrap();
        assert_eq!(format.encoding, DumpEncoding::JsonLines);
    }

    #[test]
    fn test_single_line_object_is_json() {
        let data = b"{\"spans\": []}";
        let format = detect_dump_from_bytes(data).unwrap();
        assert_eq!(format.encoding, DumpEncoding::Json);
    }

    #[test]
    fn test_brace_in_string_does_not_confuse_sniffer() {
        let data = b"{\"text\": \"open { brace\",\n  \"page\": 1}";
        let format = detect_dump_from_bytes(data).unwrap();
        assert_eq!(format.encoding, DumpEncoding::Json);
    }

    #[test]
    fn test_detect_gzipped_dump() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"[{\"text\": \"hi\"}]").unwrap();
        let compressed = encoder.finish().unwrap();

        let format = detect_dump_from_bytes(&compressed).unwrap();
        assert_eq!(format.encoding, DumpEncoding::Json);
        assert!(format.gzipped);
    }

    #[test]
    fn test_detect_unknown_format() {
        assert!(matches!(
            detect_dump_from_bytes(b"%PDF-1.7"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_dump_from_bytes(b""),
            Err(Error::UnknownFormat)
        ));
        assert!(!is_span_dump_bytes(b"plain text"));
    }

    #[test]
    fn test_format_display() {
        let format = DumpFormat {
            encoding: DumpEncoding::JsonLines,
            gzipped: true,
        };
        assert_eq!(format.to_string(), "JSON Lines (gzipped)");
    }
}

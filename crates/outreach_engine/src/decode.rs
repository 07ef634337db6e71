use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into the document a `<meta charset>` declaration is looked for.
const META_SNIFF_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDocument {
    pub html: String,
    pub encoding_label: &'static str,
    /// Some bytes could not be mapped and were replaced.
    pub lossy: bool,
}

/// Decode page bytes into UTF-8.
///
/// Precedence: byte order mark, `Content-Type` charset, `<meta charset>` in
/// the document head, then statistical detection. Undecodable sequences are
/// replaced rather than rejected; a half-readable profile still yields a name.
pub fn decode_document(bytes: &[u8], content_type: Option<&str>) -> DecodedDocument {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| content_type.and_then(header_charset))
        .or_else(|| meta_charset(bytes))
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (html, used, lossy) = encoding.decode(bytes);
    DecodedDocument {
        html: html.into_owned(),
        encoding_label: used.name(),
        lossy,
    }
}

fn header_charset(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches('"').as_bytes())
    })
}

fn meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    // A UTF-16 declaration inside ASCII-compatible bytes means UTF-8.
    Encoding::for_label(label.as_bytes()).map(Encoding::output_encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins_over_detection() {
        let decoded = decode_document(b"caf\xe9", Some("text/html; charset=ISO-8859-1"));
        assert_eq!(decoded.html, "caf\u{e9}");
        assert_eq!(decoded.encoding_label, "windows-1252");
        assert!(!decoded.lossy);
    }

    #[test]
    fn bom_is_honoured_and_stripped() {
        let decoded = decode_document(b"\xEF\xBB\xBF<h1>Jane</h1>", Some("text/html"));
        assert_eq!(decoded.html, "<h1>Jane</h1>");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn meta_charset_is_used_without_header() {
        let bytes = b"<html><head><meta charset=\"windows-1252\"></head><body>Ren\xe9</body></html>";
        let decoded = decode_document(bytes, None);
        assert!(decoded.html.contains("Ren\u{e9}"));
        assert_eq!(decoded.encoding_label, "windows-1252");
    }
}

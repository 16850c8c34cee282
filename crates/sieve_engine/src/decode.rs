use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into a saved page to look for a `<meta charset>` declaration.
const META_PRESCAN_BYTES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("page is not valid {encoding}")]
    Malformed { encoding: String },
}

/// Decodes a saved page snapshot into UTF-8: BOM -> explicit charset hint ->
/// `<meta charset>` in the head -> chardetng guess.
pub fn decode_page(bytes: &[u8], charset_hint: Option<&str>) -> Result<DecodedPage, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    let declared = charset_hint
        .map(str::to_string)
        .or_else(|| meta_charset(&bytes[..bytes.len().min(META_PRESCAN_BYTES)]));
    if let Some(enc) = declared.and_then(|label| Encoding::for_label(label.trim().as_bytes())) {
        return decode_with(bytes, enc);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn meta_charset(head: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(head).to_ascii_lowercase();
    let start = text.find("charset=")? + "charset=".len();
    let value: String = text[start..]
        .trim_start_matches(&['"', '\''][..])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    (!value.is_empty()).then_some(value)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedPage, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: enc.name().to_string(),
        });
    }
    Ok(DecodedPage {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_wins() {
        let decoded = decode_page(b"\xEF\xBB\xBF<p>hi</p>", Some("windows-1252")).unwrap();
        assert_eq!(decoded.html, "<p>hi</p>");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn meta_charset_is_honoured() {
        let page = b"<html><head><meta charset=\"iso-8859-1\"></head><body>caf\xe9</body></html>";
        let decoded = decode_page(page, None).unwrap();
        assert!(decoded.html.contains("café"));
    }

    #[test]
    fn invalid_utf8_with_explicit_hint_fails() {
        let err = decode_page(b"ab\xc3", Some("utf-8")).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Malformed {
                encoding: "UTF-8".to_string()
            }
        );
    }
}

use bstr::ByteSlice;

use super::MimeKind;

// Only the head of the body is looked at
const SNIFF_WINDOW: usize = 512;

/// Coarse guess of what a body is, independent from its Content-Type header.
pub(crate) fn infer_kind(body: &[u8]) -> MimeKind {
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        return MimeKind::Other;
    }

    let head = trimmed[..trimmed.len().min(SNIFF_WINDOW)].to_ascii_lowercase();

    if head.starts_with(b"{") || head.starts_with(b"[") {
        if serde_json::from_slice::<serde_json::Value>(trimmed).is_ok() {
            return MimeKind::Json;
        }
    }

    if head.starts_with_str("<!doctype html") || head.starts_with_str("<html") {
        return MimeKind::Html;
    }

    if head.starts_with_str("<?xml") {
        // XHTML documents come with an XML declaration too
        if head.contains_str("<html") {
            return MimeKind::Html;
        }
        return MimeKind::Xml;
    }

    if head.starts_with(b"<") && head.contains_str("<body") {
        return MimeKind::Html;
    }

    match std::str::from_utf8(body) {
        Ok(_) => MimeKind::PlainText,
        Err(_) => MimeKind::Other
    }
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_documents() {
        assert_eq!(infer_kind(b"  {\"a\": 1}"), MimeKind::Json);
        assert_eq!(infer_kind(b"[1, 2, 3]"), MimeKind::Json);
        // looks like JSON but is not
        assert_eq!(infer_kind(b"{not json"), MimeKind::PlainText);
    }

    #[test]
    fn markup_documents() {
        assert_eq!(infer_kind(b"<!DOCTYPE html><html></html>"), MimeKind::Html);
        assert_eq!(infer_kind(b"\n<HTML><body>x</body></HTML>"), MimeKind::Html);
        assert_eq!(infer_kind(b"<?xml version=\"1.0\"?><feed/>"), MimeKind::Xml);
        assert_eq!(infer_kind(b"<?xml version=\"1.0\"?><html xmlns=\"x\"/>"), MimeKind::Html);
        assert_eq!(infer_kind(b"<div><body>x</body></div>"), MimeKind::Html);
    }

    #[test]
    fn text_binary_and_empty() {
        assert_eq!(infer_kind(b"just some words"), MimeKind::PlainText);
        assert_eq!(infer_kind(&[0xff, 0xfe, 0x00, 0x01]), MimeKind::Other);
        assert_eq!(infer_kind(b""), MimeKind::Other);
        assert_eq!(infer_kind(b"   \r\n"), MimeKind::Other);
    }
}

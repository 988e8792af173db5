pub(crate) mod request;
pub(crate) mod response;
pub(crate) mod stream;

pub(crate) use request::{classify_request, classify_request_content};
pub(crate) use response::classify_response;
pub(crate) use stream::classify_stream;

use crate::{
    palette::{resolve::PaletteResolver, ColorLabel},
    settings::RuleSlot,
    traffic::MimeKind
};

/// What counts as "text" for the content fallback
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum TextMatch {
    /// `text/plain...` only, used for responses
    PlainOnly,
    /// any `text/...`, used at request time
    AnyText
}

// Header and sniffed kind are both enough on their own. `content_type` is expected lowercase.
pub(super) fn is_json(kind: Option<MimeKind>, content_type: &str) -> bool {
    kind == Some(MimeKind::Json) || content_type.contains("json")
}

pub(super) fn is_xml(kind: Option<MimeKind>, content_type: &str) -> bool {
    kind == Some(MimeKind::Xml) || content_type.contains("xml")
}

pub(super) fn is_html(kind: Option<MimeKind>, content_type: &str) -> bool {
    kind == Some(MimeKind::Html) || content_type.contains("html")
}

fn is_text(kind: Option<MimeKind>, content_type: &str, text_match: TextMatch) -> bool {
    let by_header = match text_match {
        TextMatch::PlainOnly => content_type.starts_with("text/plain"),
        TextMatch::AnyText => content_type.starts_with("text/")
    };

    by_header || kind == Some(MimeKind::PlainText)
}

/// Picks the single content slot for a body. The first matching content kind decides the slot,
/// an unresolved slot is not followed by the next kind.
pub(crate) fn content_slot(kind: Option<MimeKind>, content_type: &str, text_match: TextMatch) -> Option<RuleSlot> {
    if is_json(kind, content_type) {
        Some(RuleSlot::Json)
    }
    else if is_xml(kind, content_type) {
        Some(RuleSlot::Xml)
    }
    else if is_html(kind, content_type) {
        Some(RuleSlot::Html)
    }
    else if is_text(kind, content_type, text_match) {
        Some(RuleSlot::Text)
    }
    else {
        None
    }
}

pub(crate) fn classify_content(
    resolver: &PaletteResolver,
    kind: Option<MimeKind>,
    content_type: &str,
    text_match: TextMatch
) -> Option<ColorLabel> {
    let content_type = content_type.to_ascii_lowercase();
    let slot = content_slot(kind, &content_type, text_match)?;
    resolver.resolve(slot)
}

// ---------------------------------------------------------------------------------------------- //

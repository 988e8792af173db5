use super::{classify_content, TextMatch};
use crate::{
    palette::{resolve::PaletteResolver, ColorLabel},
    traffic::TrafficRequest
};

pub(crate) const MUTATING_METHOD_COLOR: ColorLabel = ColorLabel::YELLOW;
pub(crate) const DESTRUCTIVE_METHOD_COLOR: ColorLabel = ColorLabel::RED;

/// Provisional mark from the method alone, before any response exists.
pub(crate) fn classify_request(method: &str) -> Option<ColorLabel> {
    match method.to_ascii_uppercase().as_str() {
        "POST" | "PUT" | "PATCH" => Some(MUTATING_METHOD_COLOR),
        "DELETE" => Some(DESTRUCTIVE_METHOD_COLOR),
        _ => None
    }
}

/// Content-type-only resolution of the request's own body, any `text/` type counts as text
pub(crate) fn classify_request_content(request: &TrafficRequest, resolver: &PaletteResolver) -> Option<ColorLabel> {
    classify_content(resolver, None, &request.content_type(), TextMatch::AnyText)
}

// ---------------------------------------------------------------------------------------------- //

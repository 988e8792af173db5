use super::{classify_content, is_html, is_json, TextMatch};
use crate::{
    palette::{resolve::PaletteResolver, ColorLabel},
    settings::RuleSlot,
    traffic::{MimeKind, TrafficRecord}
};

// Ordered slot chains of the status tiers. The first slot that resolves wins.
const TIER_5XX: &[RuleSlot] = &[RuleSlot::Status5xx];
const TIER_4XX: &[RuleSlot] = &[RuleSlot::Status4xx];
const TIER_3XX: &[RuleSlot] = &[RuleSlot::Status3xx];
const TIER_GET_JSON: &[RuleSlot] = &[RuleSlot::GetJson, RuleSlot::GetHtml, RuleSlot::Get];
const TIER_GET_HTML: &[RuleSlot] = &[RuleSlot::GetHtml, RuleSlot::Get];
const TIER_GET: &[RuleSlot] = &[RuleSlot::Get];
const TIER_POST: &[RuleSlot] = &[RuleSlot::Post];
const TIER_OTHER_METHOD: &[RuleSlot] = &[RuleSlot::OtherMethod];

/// Slots to try for a status code, before the content fallback. Informational
/// statuses have no tier. `content_type` is expected lowercase.
pub(crate) fn status_tier(status: u16, method: &str, kind: MimeKind, content_type: &str) -> &'static [RuleSlot] {
    match status {
        500..=u16::MAX => TIER_5XX,
        400..=499 => TIER_4XX,
        300..=399 => TIER_3XX,
        200..=299 => {
            if method.eq_ignore_ascii_case("GET") {
                if is_json(Some(kind), content_type) {
                    TIER_GET_JSON
                }
                else if is_html(Some(kind), content_type) {
                    TIER_GET_HTML
                }
                else {
                    TIER_GET
                }
            }
            else if method.eq_ignore_ascii_case("POST") {
                TIER_POST
            }
            else {
                TIER_OTHER_METHOD
            }
        },
        _ => &[]
    }
}

/// Resolves the highlight of a completed exchange.
///
/// Status tiers come first; when the tier has nothing configured (or the status is below 200)
/// the content type alone decides. `None` means the caller must leave the record alone.
pub(crate) fn classify_response(record: &TrafficRecord, resolver: &PaletteResolver) -> Option<ColorLabel> {
    let response = record.response.as_ref()?;
    let content_type = response.content_type().to_ascii_lowercase();
    let kind = response.inferred_kind;

    let tier = status_tier(response.status, &record.request.method, kind, &content_type);
    resolver.log().debug(
        &format!(
            "Crayon: {} {} -> status {}, kind {:?}, tier {:?}",
            &record.request.method,
            &record.request.url,
            response.status,
            kind,
            tier
        )
    );

    resolver
        .resolve_first(tier)
        .or_else(|| classify_content(resolver, Some(kind), &content_type, TextMatch::PlainOnly))
}

// ---------------------------------------------------------------------------------------------- //

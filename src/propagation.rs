use crate::{
    classify::classify_response,
    gateway::HighlightGateway,
    http_storage::TrafficHistory,
    palette::resolve::PaletteResolver,
    traffic::TrafficRecord
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PropagationMode {
    /// Run the response rules on every match
    Apply,
    /// Drop the highlight of every match
    Clear
}

impl PropagationMode {
    fn verb(&self) -> &'static str {
        match self {
            PropagationMode::Apply => "Auto-highlighted",
            PropagationMode::Clear => "Removed highlights from"
        }
    }
}

/// Path of `url` up to and including its last `/`, query string dropped.
///
/// The scheme and authority are kept as they are. When the path has no separator after
/// its leading one (or there is no path at all) the URL comes back without its query.
pub(crate) fn get_prefix(url: &str) -> String {
    let without_query = match url.find('?') {
        Some(query_start) if query_start > 0 => &url[..query_start],
        _ => url
    };

    let path_start = match without_query.find("://") {
        Some(scheme_end) => {
            let authority_start = scheme_end + 3;
            match without_query[authority_start..].find('/') {
                Some(offset) => authority_start + offset,
                None => return without_query.to_string()
            }
        },
        None => 0
    };

    match without_query[path_start..].rfind('/') {
        Some(last_slash) if last_slash > 0 => {
            without_query[..path_start + last_slash + 1].to_string()
        },
        _ => without_query.to_string()
    }
}

/// Applies the rules (or clears highlights) on every stored record sharing the reference's prefix.
///
/// In `Apply` mode only records the rules resolved for are counted, in `Clear` mode every match is.
pub(crate) fn propagate<H: TrafficHistory + ?Sized>(
    reference: &TrafficRecord,
    history: &mut H,
    mode: PropagationMode,
    resolver: &PaletteResolver,
    gateway: &HighlightGateway
) -> usize {
    let prefix = get_prefix(&reference.request.url);
    propagate_prefix(&prefix, history, mode, resolver, gateway)
}

pub(crate) fn propagate_prefix<H: TrafficHistory + ?Sized>(
    prefix: &str,
    history: &mut H,
    mode: PropagationMode,
    resolver: &PaletteResolver,
    gateway: &HighlightGateway
) -> usize {
    let mut count: usize = 0;
    for record in history.query_by_prefix(prefix) {
        match mode {
            PropagationMode::Apply => {
                if let Some(color) = classify_response(record, resolver) {
                    gateway.apply(record, color);
                    count += 1;
                }
            },
            PropagationMode::Clear => {
                gateway.clear(record);
                count += 1;
            }
        }
    }

    resolver.log().info(&format!("Crayon: {} {} item(s) with prefix: {}", mode.verb(), count, prefix));
    count
}

/// Rules over an explicit selection. Returns how many records were highlighted.
pub(crate) fn highlight_selection(
    records: Vec<&mut TrafficRecord>,
    resolver: &PaletteResolver,
    gateway: &HighlightGateway
) -> usize {
    let total = records.len();
    let mut count: usize = 0;
    for record in records {
        if let Some(color) = classify_response(record, resolver) {
            gateway.apply(record, color);
            count += 1;
        }
    }

    resolver.log().info(&format!("Crayon: Auto-highlighted {} of {} item(s)", count, total));
    count
}

pub(crate) fn clear_selection(
    records: Vec<&mut TrafficRecord>,
    resolver: &PaletteResolver,
    gateway: &HighlightGateway
) -> usize {
    let total = records.len();
    for record in records {
        gateway.clear(record);
    }

    resolver.log().info(&format!("Crayon: Removed highlights from {} item(s)", total));
    total
}

// ---------------------------------------------------------------------------------------------- //

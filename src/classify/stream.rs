use crate::{
    palette::{resolve::PaletteResolver, ColorLabel},
    settings::RuleSlot,
    traffic::Direction
};

pub(crate) fn stream_slot(direction: Direction) -> RuleSlot {
    match direction {
        Direction::ToClient => RuleSlot::StreamIncoming,
        Direction::ToServer => RuleSlot::StreamOutgoing
    }
}

/// Stream frames are told apart by direction only, payloads are never inspected.
pub(crate) fn classify_stream(direction: Direction, resolver: &PaletteResolver) -> Option<ColorLabel> {
    resolver.resolve(stream_slot(direction))
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{logging::RecordingLog, settings::HighlightSettings};

    #[test]
    fn direction_picks_slot() {
        let settings = HighlightSettings::default();
        let log = RecordingLog::default();
        let resolver = PaletteResolver::new(&settings, &log);
        assert_eq!(classify_stream(Direction::ToClient, &resolver), Some(ColorLabel::GREEN));
        assert_eq!(classify_stream(Direction::ToServer, &resolver), Some(ColorLabel::YELLOW));
    }

    #[test]
    fn unset_direction_is_absent() {
        let settings = HighlightSettings::empty().with(RuleSlot::StreamIncoming, "CYAN");
        let log = RecordingLog::default();
        let resolver = PaletteResolver::new(&settings, &log);
        assert_eq!(classify_stream(Direction::ToClient, &resolver), Some(ColorLabel::CYAN));
        assert_eq!(classify_stream(Direction::ToServer, &resolver), None);
    }
}

use super::ColorLabel;
use crate::{
    logging::HostLog,
    settings::{RuleSlot, SettingsStore}
};

/// Turns a rule slot into a palette color using the current settings snapshot.
///
/// `None` is the universal "could not resolve" answer: the slot is unset, or its
/// stored value is not a palette name. The latter is reported as a configuration
/// error and never goes further than this point.
pub(crate) struct PaletteResolver<'a> {
    settings: &'a dyn SettingsStore,
    log: &'a dyn HostLog
}

impl<'a> PaletteResolver<'a> {
    pub(crate) fn new(settings: &'a dyn SettingsStore, log: &'a dyn HostLog) -> Self {
        PaletteResolver { settings, log }
    }

    pub(crate) fn resolve(&self, slot: RuleSlot) -> Option<ColorLabel> {
        let color_name = self.settings.get_string(slot.key())?;
        match color_name.parse::<ColorLabel>() {
            Ok(color) => Some(color),
            Err(_) => {
                self.log.error(&format!("invalid color name in settings: {}", color_name));
                None
            }
        }
    }

    /// First slot of the chain that resolves wins; later slots are not even looked up.
    pub(crate) fn resolve_first(&self, chain: &[RuleSlot]) -> Option<ColorLabel> {
        chain
            .iter()
            .find_map(|slot| self.resolve(*slot))
    }

    pub(crate) fn log(&self) -> &dyn HostLog {
        self.log
    }
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{logging::RecordingLog, settings::HighlightSettings};

    #[test]
    fn resolves_configured_slot() {
        let settings = HighlightSettings::empty().with(RuleSlot::Json, "MAGENTA");
        let log = RecordingLog::default();
        let resolver = PaletteResolver::new(&settings, &log);
        assert_eq!(resolver.resolve(RuleSlot::Json), Some(ColorLabel::MAGENTA));
        assert!(log.errors().is_empty());
    }

    #[test]
    fn unset_slot_is_absent_without_error() {
        let settings = HighlightSettings::empty();
        let log = RecordingLog::default();
        let resolver = PaletteResolver::new(&settings, &log);
        assert_eq!(resolver.resolve(RuleSlot::Status5xx), None);
        assert!(log.errors().is_empty());
    }

    #[test]
    fn invalid_name_is_absent_and_logged_once() {
        let settings = HighlightSettings::empty().with(RuleSlot::Status5xx, "NOT_A_COLOR");
        let log = RecordingLog::default();
        let resolver = PaletteResolver::new(&settings, &log);
        assert_eq!(resolver.resolve(RuleSlot::Status5xx), None);
        assert_eq!(log.errors(), vec!["invalid color name in settings: NOT_A_COLOR".to_string()]);
    }

    #[test]
    fn none_is_a_resolved_value() {
        let settings = HighlightSettings::empty().with(RuleSlot::Text, "NONE");
        let log = RecordingLog::default();
        let resolver = PaletteResolver::new(&settings, &log);
        assert_eq!(resolver.resolve(RuleSlot::Text), Some(ColorLabel::NONE));
    }

    #[test]
    fn chain_stops_at_first_resolved_slot() {
        let settings = HighlightSettings::empty()
            .with(RuleSlot::GetJson, "bogus")
            .with(RuleSlot::GetHtml, "CYAN")
            .with(RuleSlot::Get, "also bogus");
        let log = RecordingLog::default();
        let resolver = PaletteResolver::new(&settings, &log);
        let chain = [RuleSlot::GetJson, RuleSlot::GetHtml, RuleSlot::Get];
        assert_eq!(resolver.resolve_first(&chain), Some(ColorLabel::CYAN));
        // only the slot before the match was looked at
        assert_eq!(log.errors().len(), 1);
    }
}

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::palette::ColorLabel;

pub(crate) const LOG_ENABLED_KEY: &str = "logging-enabled";
pub(crate) const DEBUG_MODE_KEY: &str = "debug-mode";

/// Named rule slots an operator can bind a color to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RuleSlot {
    Html,
    Json,
    Xml,
    Text,
    Status5xx,
    Status4xx,
    Status3xx,
    Get,
    GetJson,
    GetHtml,
    Post,
    OtherMethod,
    StreamIncoming,
    StreamOutgoing
}

impl RuleSlot {
    pub(crate) const ALL: [RuleSlot; 14] = [
        RuleSlot::Status5xx,
        RuleSlot::Status4xx,
        RuleSlot::Status3xx,
        RuleSlot::GetJson,
        RuleSlot::GetHtml,
        RuleSlot::Get,
        RuleSlot::Post,
        RuleSlot::OtherMethod,
        RuleSlot::Json,
        RuleSlot::Xml,
        RuleSlot::Html,
        RuleSlot::Text,
        RuleSlot::StreamIncoming,
        RuleSlot::StreamOutgoing
    ];

    pub(crate) fn key(&self) -> &'static str {
        match self {
            RuleSlot::Html => "html-color",
            RuleSlot::Json => "json-color",
            RuleSlot::Xml => "xml-color",
            RuleSlot::Text => "text-color",
            RuleSlot::Status5xx => "status-5xx-color",
            RuleSlot::Status4xx => "status-4xx-color",
            RuleSlot::Status3xx => "status-3xx-color",
            RuleSlot::Get => "get-color",
            RuleSlot::GetJson => "get-json-color",
            RuleSlot::GetHtml => "get-html-color",
            RuleSlot::Post => "post-color",
            RuleSlot::OtherMethod => "other-method-color",
            RuleSlot::StreamIncoming => "stream-incoming-color",
            RuleSlot::StreamOutgoing => "stream-outgoing-color"
        }
    }

    pub(crate) fn default_color(&self) -> ColorLabel {
        match self {
            RuleSlot::Html => ColorLabel::BLUE,
            RuleSlot::Json => ColorLabel::GREEN,
            RuleSlot::Xml => ColorLabel::BLUE,
            RuleSlot::Text => ColorLabel::GRAY,
            RuleSlot::Status5xx => ColorLabel::RED,
            RuleSlot::Status4xx => ColorLabel::ORANGE,
            RuleSlot::Status3xx => ColorLabel::YELLOW,
            RuleSlot::Get => ColorLabel::GREEN,
            RuleSlot::GetJson => ColorLabel::GREEN,
            RuleSlot::GetHtml => ColorLabel::CYAN,
            RuleSlot::Post => ColorLabel::BLUE,
            RuleSlot::OtherMethod => ColorLabel::PINK,
            RuleSlot::StreamIncoming => ColorLabel::GREEN,
            RuleSlot::StreamOutgoing => ColorLabel::YELLOW
        }
    }
}

/// Read side of the user-configured preferences. Classifiers only see a snapshot through this.
pub(crate) trait SettingsStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_bool(&self, key: &str) -> bool;
}

impl<T: SettingsStore + ?Sized> SettingsStore for &T {
    fn get_string(&self, key: &str) -> Option<String> {
        (**self).get_string(key)
    }

    fn get_bool(&self, key: &str) -> bool {
        (**self).get_bool(key)
    }
}

/// Stored preferences. Color names are kept as free text, so a garbled value
/// survives loading and is reported when it is resolved.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct HighlightSettings {
    #[serde(default)]
    pub(crate) logging_enabled: bool,
    #[serde(default)]
    pub(crate) debug_mode: bool,
    #[serde(default = "default_colors")]
    pub(crate) colors: BTreeMap<String, String>
}

fn default_colors() -> BTreeMap<String, String> {
    RuleSlot::ALL
        .iter()
        .map(|slot| (slot.key().to_string(), slot.default_color().name().to_string()))
        .collect()
}

impl Default for HighlightSettings {
    fn default() -> Self {
        HighlightSettings {
            logging_enabled: false,
            debug_mode: false,
            colors: default_colors()
        }
    }
}

impl SettingsStore for HighlightSettings {
    fn get_string(&self, key: &str) -> Option<String> {
        self.colors.get(key).cloned()
    }

    fn get_bool(&self, key: &str) -> bool {
        match key {
            LOG_ENABLED_KEY => self.logging_enabled,
            DEBUG_MODE_KEY => self.debug_mode,
            _ => false
        }
    }
}

#[cfg(test)]
impl HighlightSettings {
    /// No slot configured at all
    pub(crate) fn empty() -> Self {
        HighlightSettings {
            logging_enabled: false,
            debug_mode: false,
            colors: BTreeMap::new()
        }
    }

    pub(crate) fn with(mut self, slot: RuleSlot, value: &str) -> Self {
        self.colors.insert(slot.key().to_string(), value.to_string());
        self
    }

    pub(crate) fn without(mut self, slot: RuleSlot) -> Self {
        self.colors.remove(slot.key());
        self
    }
}

// ---------------------------------------------------------------------------------------------- //

pub(crate) mod resolve;

use std::{fmt::Display, str::FromStr};
use serde::{Serialize, Deserialize};

/// Highlight labels an operator can see in the traffic table.
///
/// `NONE` is a real value of the palette: it means "no highlight" and is what
/// the annotation slot holds until something marks the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum ColorLabel {
    RED,
    ORANGE,
    YELLOW,
    GREEN,
    CYAN,
    BLUE,
    PINK,
    MAGENTA,
    GRAY,
    NONE
}

impl Default for ColorLabel {
    fn default() -> Self {
        ColorLabel::NONE
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct UnknownColor(pub(crate) String);

impl ColorLabel {
    pub(crate) const ALL: [ColorLabel; 10] = [
        ColorLabel::RED,
        ColorLabel::ORANGE,
        ColorLabel::YELLOW,
        ColorLabel::GREEN,
        ColorLabel::CYAN,
        ColorLabel::BLUE,
        ColorLabel::PINK,
        ColorLabel::MAGENTA,
        ColorLabel::GRAY,
        ColorLabel::NONE
    ];

    pub(crate) fn name(&self) -> &'static str {
        match self {
            ColorLabel::RED => "RED",
            ColorLabel::ORANGE => "ORANGE",
            ColorLabel::YELLOW => "YELLOW",
            ColorLabel::GREEN => "GREEN",
            ColorLabel::CYAN => "CYAN",
            ColorLabel::BLUE => "BLUE",
            ColorLabel::PINK => "PINK",
            ColorLabel::MAGENTA => "MAGENTA",
            ColorLabel::GRAY => "GRAY",
            ColorLabel::NONE => "NONE"
        }
    }

    pub(crate) fn is_none(&self) -> bool {
        *self == ColorLabel::NONE
    }
}

impl FromStr for ColorLabel {
    type Err = UnknownColor;

    // Exact, case-sensitive match against the palette names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorLabel::ALL
            .iter()
            .find(|color| color.name() == s)
            .copied()
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

impl Display for ColorLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_palette_name() {
        for color in ColorLabel::ALL {
            assert_eq!(color.name().parse::<ColorLabel>(), Ok(color));
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!("red".parse::<ColorLabel>(), Err(UnknownColor("red".to_string())));
        assert!("Green".parse::<ColorLabel>().is_err());
        assert!("NOT_A_COLOR".parse::<ColorLabel>().is_err());
        assert!("".parse::<ColorLabel>().is_err());
    }

    #[test]
    fn default_slot_value_is_none() {
        assert!(ColorLabel::default().is_none());
        assert!(!ColorLabel::RED.is_none());
    }

    #[test]
    fn serializes_as_palette_name() {
        assert_eq!(serde_json::to_string(&ColorLabel::MAGENTA).unwrap(), "\"MAGENTA\"");
        let parsed: ColorLabel = serde_json::from_str("\"CYAN\"").unwrap();
        assert_eq!(parsed, ColorLabel::CYAN);
    }
}

use crate::palette::ColorLabel;

/// Anything carrying a highlight slot: HTTP records and stream frames.
pub(crate) trait Annotated {
    fn annotation(&self) -> ColorLabel;
    /// Write access is reserved to [`HighlightGateway`]
    fn annotation_slot(&mut self) -> &mut ColorLabel;

    fn is_annotated(&self) -> bool {
        !self.annotation().is_none()
    }
}

/// The only write path into annotation slots.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct HighlightGateway;

impl HighlightGateway {
    /// Stamps `color` on the target. A resolved `NONE` means "do not write" and leaves the
    /// slot as it is. Returns whether the slot changed.
    pub(crate) fn apply<T: Annotated + ?Sized>(&self, target: &mut T, color: ColorLabel) -> bool {
        if color.is_none() {
            return false;
        }

        let slot = target.annotation_slot();
        if *slot == color {
            return false;
        }

        *slot = color;
        true
    }

    /// Resets the slot to the "no highlight" sentinel. Returns whether the slot changed.
    pub(crate) fn clear<T: Annotated + ?Sized>(&self, target: &mut T) -> bool {
        let slot = target.annotation_slot();
        if slot.is_none() {
            return false;
        }

        *slot = ColorLabel::NONE;
        true
    }
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traffic::{Direction, StreamMessage, StreamPayload, TrafficRecord, TrafficRequest};

    fn record() -> TrafficRecord {
        TrafficRecord::new(0, TrafficRequest::new("GET", "https://example.com/"))
    }

    #[test]
    fn apply_is_idempotent() {
        let gateway = HighlightGateway;
        let mut once = record();
        let mut twice = record();

        assert!(gateway.apply(&mut once, ColorLabel::RED));
        assert!(gateway.apply(&mut twice, ColorLabel::RED));
        assert!(!gateway.apply(&mut twice, ColorLabel::RED));
        assert_eq!(once.annotation(), twice.annotation());
        assert_eq!(twice.annotation(), ColorLabel::RED);
    }

    #[test]
    fn clear_after_apply_always_yields_none() {
        let gateway = HighlightGateway;
        for color in ColorLabel::ALL {
            let mut target = record();
            gateway.apply(&mut target, color);
            gateway.clear(&mut target);
            assert_eq!(target.annotation(), ColorLabel::NONE);
            assert!(!target.is_annotated());
        }
    }

    #[test]
    fn resolved_none_does_not_overwrite() {
        let gateway = HighlightGateway;
        let mut target = record();
        gateway.apply(&mut target, ColorLabel::PINK);
        assert!(!gateway.apply(&mut target, ColorLabel::NONE));
        assert_eq!(target.annotation(), ColorLabel::PINK);
    }

    #[test]
    fn works_on_stream_messages() {
        let gateway = HighlightGateway;
        let mut message = StreamMessage::new(StreamPayload::Binary(vec![1, 2]), Direction::ToServer);
        assert!(gateway.apply(&mut message, ColorLabel::YELLOW));
        assert_eq!(message.annotation(), ColorLabel::YELLOW);
        assert!(gateway.clear(&mut message));
        assert!(!gateway.clear(&mut message));
    }
}

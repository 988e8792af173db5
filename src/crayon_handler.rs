pub(crate) mod events;

use events::{ProxyEvents, StreamOrigin};

use crate::{
    classify::{classify_request, classify_request_content, classify_response, classify_stream},
    gateway::{Annotated, HighlightGateway},
    http_storage::{HttpStorage, TrafficHistory},
    logging::HostLog,
    palette::resolve::PaletteResolver,
    propagation::{self, PropagationMode},
    settings::SettingsStore,
    traffic::{StreamMessage, StreamPayload, TrafficRecord, TrafficRequest, TrafficResponse},
    utils::CrayonError
};

// Characters of a stream payload shown in debug lines
const PREVIEW_LENGTH: usize = 30;

/// What the host should do with the traffic after a handler ran.
/// Payloads are never touched, only their highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Disposition {
    Continue
}

/// Entry points the host calls for every traffic event and bulk action.
pub(crate) struct CrayonHandler<S: SettingsStore, L: HostLog> {
    settings: S,
    log: L,
    gateway: HighlightGateway
}

impl<S: SettingsStore, L: HostLog> CrayonHandler<S, L> {
    pub(crate) fn new(settings: S, log: L, gateway: HighlightGateway) -> Self {
        CrayonHandler { settings, log, gateway }
    }

    fn resolver(&self) -> PaletteResolver<'_> {
        PaletteResolver::new(&self.settings, &self.log)
    }

    // ------------------------------------------------------------------------------------------ //

    pub(crate) fn handle_request_sent(&self, record: &mut TrafficRecord) -> Disposition {
        if let Err(err) = self.try_handle_request_sent(record) {
            self.log.error(&format!("Crayon: request to {} left unannotated, {}", &record.request.url, err));
        }

        Disposition::Continue
    }

    fn try_handle_request_sent(&self, record: &mut TrafficRecord) -> Result<(), CrayonError> {
        if record.request.method.trim().is_empty() {
            return Err(CrayonError::MalformedRecord(format!("record {} has no method", record.id)));
        }

        // The operator or an earlier pass already marked it
        if record.is_annotated() {
            self.log.debug(&format!("Crayon: request to {} is already highlighted, skipped", &record.request.url));
            return Ok(());
        }

        let resolver = self.resolver();
        let color = classify_request(&record.request.method)
            .or_else(|| classify_request_content(&record.request, &resolver));

        if let Some(color) = color {
            if self.gateway.apply(record, color) {
                self.log.info(&format!("Crayon Request: {} {} -> {}", &record.request.method, &record.request.url, color));
            }
        }

        Ok(())
    }

    pub(crate) fn handle_response_received(&self, record: &mut TrafficRecord) -> Disposition {
        if let Err(err) = self.try_handle_response_received(record) {
            self.log.error(&format!("Crayon: response for {} left unannotated, {}", &record.request.url, err));
        }

        Disposition::Continue
    }

    fn try_handle_response_received(&self, record: &mut TrafficRecord) -> Result<(), CrayonError> {
        self.log.info(&format!("Processing response for: {}", &record.request.url));

        let status = match record.response.as_ref() {
            Some(response) => response.status,
            None => return Ok(())
        };

        if !(100..=599).contains(&status) {
            return Err(CrayonError::MalformedRecord(format!("status {} of record {} is out of range", status, record.id)));
        }

        if let Some(color) = classify_response(record, &self.resolver()) {
            if self.gateway.apply(record, color) {
                self.log.info(&format!("Crayon Response: {} -> {}", &record.request.url, color));
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------------------------------ //

    pub(crate) fn handle_stream_created(&self, url: &str, origin: StreamOrigin) {
        self.log.info(&format!("Crayon: {} created for: {}", origin, url));
    }

    pub(crate) fn handle_stream_message(&self, message: &mut StreamMessage, origin: StreamOrigin) -> Disposition {
        self.log.debug(
            &format!(
                "Crayon {} ({}) {}: {}...",
                origin,
                message.payload.kind(),
                message.direction,
                message.payload.preview(PREVIEW_LENGTH)
            )
        );

        if let Some(color) = classify_stream(message.direction, &self.resolver()) {
            if self.gateway.apply(message, color) {
                self.log.info(&format!("Crayon {} ({}): {} -> {}", origin, message.payload.kind(), message.direction, color));
            }
        }

        Disposition::Continue
    }

    // ------------------------------------------------------------------------------------------ //

    /// "Apply rules to matching prefix"
    pub(crate) fn apply_rules_to_prefix<H: TrafficHistory + ?Sized>(&self, reference: &TrafficRecord, history: &mut H) -> usize {
        propagation::propagate(reference, history, PropagationMode::Apply, &self.resolver(), &self.gateway)
    }

    /// "Clear highlights for matching prefix"
    pub(crate) fn clear_prefix<H: TrafficHistory + ?Sized>(&self, reference: &TrafficRecord, history: &mut H) -> usize {
        propagation::propagate(reference, history, PropagationMode::Clear, &self.resolver(), &self.gateway)
    }

    pub(crate) fn highlight_selected(&self, records: Vec<&mut TrafficRecord>) -> usize {
        propagation::highlight_selection(records, &self.resolver(), &self.gateway)
    }

    pub(crate) fn clear_selected(&self, records: Vec<&mut TrafficRecord>) -> usize {
        propagation::clear_selection(records, &self.resolver(), &self.gateway)
    }

    // ------------------------------------------------------------------------------------------ //

    /// Feeds one host event through the matching handler. HTTP records land in `storage`,
    /// stream frames are handed back once classified.
    pub(crate) fn dispatch(&self, event: ProxyEvents, storage: &mut HttpStorage) -> Result<Option<StreamMessage>, CrayonError> {
        match event {
            ProxyEvents::RequestSent { context, request } => {
                let request = TrafficRequest::try_from(&request)?;
                let id = storage.put_request(request, context);
                if let Some(record) = storage.get_mut_by_id(id) {
                    self.handle_request_sent(record);
                }
                Ok(None)
            },
            ProxyEvents::ResponseReceived { context, response } => {
                let response = TrafficResponse::try_from(&response)?;
                let id = storage
                    .put_response(response, &context)
                    .ok_or_else(|| CrayonError::RecordNotFound(format!("no request was sent within context {}", context)))?;
                if let Some(record) = storage.get_mut_by_id(id) {
                    self.handle_response_received(record);
                }
                Ok(None)
            },
            ProxyEvents::WebSocketCreated { url, origin } => {
                self.handle_stream_created(&url, origin);
                Ok(None)
            },
            ProxyEvents::WebSocketMessage { direction, origin, payload } => {
                let mut message = StreamMessage::new(StreamPayload::try_from(payload)?, direction);
                self.handle_stream_message(&mut message, origin);
                Ok(Some(message))
            }
        }
    }
}

// ---------------------------------------------------------------------------------------------- //

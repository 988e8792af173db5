use super::{show::paint, CrayonCLIError};
use crate::{
    crayon_handler::{events::read_capture, CrayonHandler},
    gateway::Annotated,
    http_storage::HttpStorage,
    logging::HostLog,
    settings::SettingsStore,
    traffic::{Direction, StreamMessage}
};

const PREVIEW_LENGTH: usize = 60;

#[derive(Debug, Default, PartialEq)]
pub(crate) struct IngestSummary {
    pub(crate) records: usize,
    pub(crate) frames: usize,
    pub(crate) skipped: usize
}

fn print_frame(message: &StreamMessage) {
    let arrow = match message.direction {
        Direction::ToServer => "==>",
        Direction::ToClient => "<=="
    };
    let label = message.annotation();
    println!(
        "wskt {} [{}] {}",
        arrow,
        paint(label.name(), label),
        message.payload.preview(PREVIEW_LENGTH)
    );
}

/// Replays a capture log into the stored history, highlighting as the host would
pub(crate) fn execute<S: SettingsStore, L: HostLog>(
    capture_path: &str,
    http_data_path: &str,
    handler: &CrayonHandler<S, L>
) -> Result<IngestSummary, CrayonCLIError> {
    let events = read_capture(capture_path)?;

    let mut storage = HttpStorage::default();
    storage.load(http_data_path)?;
    let records_before = storage.len();

    let mut summary = IngestSummary::default();
    for event in events {
        match handler.dispatch(event, &mut storage) {
            Ok(Some(message)) => {
                print_frame(&message);
                summary.frames += 1;
            },
            Ok(None) => {},
            Err(err) => {
                eprintln!("Event skipped: {}", err);
                summary.skipped += 1;
            }
        }
    }

    storage.store(http_data_path)?;
    summary.records = storage.len() - records_before;
    println!(
        "Stored {} new record(s), {} stream frame(s) seen, {} event(s) skipped",
        summary.records,
        summary.frames,
        summary.skipped
    );

    Ok(summary)
}

// ---------------------------------------------------------------------------------------------- //

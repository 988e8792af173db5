use clap::ArgMatches;

use super::{show::{self, HTTPTableRange}, CrayonCLIError};
use crate::{
    crayon_handler::CrayonHandler,
    logging::HostLog,
    http_storage::HttpStorage,
    propagation::{get_prefix, PropagationMode},
    scope::Scope,
    settings::SettingsStore,
    traffic::TrafficRecord
};

/// Which stored records a bulk command works on
pub(crate) struct SelectionSettings {
    range: HTTPTableRange,
    scope: Scope
}

impl SelectionSettings {
    pub(crate) fn contains(&self, record: &TrafficRecord) -> bool {
        self.range.contains(record.id) && self.scope.contains(record)
    }
}

fn collect_strings(args: &ArgMatches, name: &str) -> Vec<String> {
    match args.get_many::<String>(name) {
        Some(values) => values.cloned().collect(),
        None => Vec::new()
    }
}

impl TryFrom<&ArgMatches> for SelectionSettings {
    type Error = CrayonCLIError;
    fn try_from(args: &ArgMatches) -> Result<Self, Self::Error> {
        let str_range = args
            .get_one::<String>("RANGE")
            .ok_or(CrayonCLIError::from("'RANGE' arg not found"))?;

        Ok(
            SelectionSettings {
                range: show::parse_range(str_range)?,
                scope: Scope::new(&collect_strings(args, "include"), &collect_strings(args, "exclude"))?
            }
        )
    }
}

/// Applies the rules to (or clears) the selected records and writes the history back
pub(crate) fn execute<S: SettingsStore, L: HostLog>(
    selection: &SelectionSettings,
    mode: PropagationMode,
    http_data_path: &str,
    handler: &CrayonHandler<S, L>
) -> Result<usize, CrayonCLIError> {
    let mut storage = HttpStorage::default();
    storage.load(http_data_path)?;

    let selected: Vec<&mut TrafficRecord> = storage
        .records_mut()
        .filter(|record| selection.contains(record))
        .collect();

    if selected.is_empty() {
        return Err(CrayonCLIError::from("Nothing is found"));
    }

    let total = selected.len();
    let count = match mode {
        PropagationMode::Apply => handler.highlight_selected(selected),
        PropagationMode::Clear => handler.clear_selected(selected)
    };

    storage.store(http_data_path)?;
    match mode {
        PropagationMode::Apply => println!("Highlighted {} of {} record(s)", count, total),
        PropagationMode::Clear => println!("Removed highlights from {} record(s)", count)
    }

    Ok(count)
}

/// Same as `execute`, but the records are those sharing the URL prefix of record `id`
pub(crate) fn execute_prefix<S: SettingsStore, L: HostLog>(
    id: usize,
    mode: PropagationMode,
    http_data_path: &str,
    handler: &CrayonHandler<S, L>
) -> Result<usize, CrayonCLIError> {
    let mut storage = HttpStorage::default();
    storage.load(http_data_path)?;

    let reference = match storage.get_by_id(id) {
        Some(record) => record.clone(),
        None => return Err(CrayonCLIError::from(format!("There is no record with id {}", id)))
    };

    let count = match mode {
        PropagationMode::Apply => handler.apply_rules_to_prefix(&reference, &mut storage),
        PropagationMode::Clear => handler.clear_prefix(&reference, &mut storage)
    };

    storage.store(http_data_path)?;
    println!("{} record(s) with prefix {}", count, get_prefix(&reference.request.url));

    Ok(count)
}

// ---------------------------------------------------------------------------------------------- //

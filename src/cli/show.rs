use colored::{Color, ColoredString, Colorize};

use super::{highlight::SelectionSettings, CrayonCLIError};
use crate::{
    gateway::Annotated,
    http_storage::HttpStorage,
    logging::HostLog,
    palette::{resolve::PaletteResolver, ColorLabel},
    settings::{RuleSlot, SettingsStore},
    traffic::TrafficRecord
};

/// Inclusive range of record ids
#[derive(Debug, PartialEq)]
pub(crate) struct HTTPTableRange {
    from: usize,
    to: usize,
    all: bool,
}

impl HTTPTableRange {
    pub(crate) fn contains(&self, id: usize) -> bool {
        self.all || (self.from <= id && id <= self.to)
    }
}

pub(crate) fn parse_range(str_range: &str) -> Result<HTTPTableRange, CrayonCLIError> {
    let right_bound_re = regex::Regex::new(r"^\d+$")?;
    let strict_index_re = regex::Regex::new(r"^\d+\$$")?;
    let range_re = regex::Regex::new(r"^\d+-\d+$")?;

    if right_bound_re.is_match(str_range) {
        let count: usize = str_range.parse()?;
        if count == 0 {
            return Err(CrayonCLIError::from("Range must select at least one record"));
        }

        return Ok(
            HTTPTableRange {
                from: 0,
                to: count - 1,
                all: false
            }
        );
    }

    if strict_index_re.is_match(str_range) {
        let index: usize = str_range[..(str_range.len() - 1)].parse()?;
        return Ok(
            HTTPTableRange {
                from: index,
                to: index,
                all: false
            }
        );
    }

    if range_re.is_match(str_range) {
        let parts: Vec<&str> = str_range.split('-').collect();
        let range = HTTPTableRange {
            from: parts[0].parse()?,
            to: parts[1].parse()?,
            all: false
        };

        if range.to < range.from {
            return Err(CrayonCLIError::from("Right bound of range cannot be lower than left one"));
        }

        return Ok(range);
    }

    if str_range == "a" {
        return Ok(
            HTTPTableRange {
                from: 0,
                to: 0,
                all: true
            }
        );
    }

    Err(CrayonCLIError::from("Range arg has wrong format"))
}

// ---------------------------------------------------------------------------------------------- //

fn terminal_color(label: ColorLabel) -> Option<Color> {
    match label {
        ColorLabel::RED => Some(Color::Red),
        ColorLabel::ORANGE => Some(Color::TrueColor { r: 255, g: 165, b: 0 }),
        ColorLabel::YELLOW => Some(Color::Yellow),
        ColorLabel::GREEN => Some(Color::Green),
        ColorLabel::CYAN => Some(Color::Cyan),
        ColorLabel::BLUE => Some(Color::Blue),
        ColorLabel::PINK => Some(Color::TrueColor { r: 255, g: 175, b: 200 }),
        ColorLabel::MAGENTA => Some(Color::Magenta),
        ColorLabel::GRAY => Some(Color::BrightBlack),
        ColorLabel::NONE => None
    }
}

pub(super) fn paint(text: &str, label: ColorLabel) -> ColoredString {
    match terminal_color(label) {
        Some(color) => text.color(color),
        None => text.normal()
    }
}

// Cut by characters, stored URLs and methods may hold any UTF-8
fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

pub(super) fn print_briefly(record: &TrafficRecord, with_header: bool) {
    let method = &record.request.method;
    let hostname = record.request.get_hostname();
    let path = record.request.get_request_path();

    let (status, length) = match record.response.as_ref() {
        Some(response) => (response.status.to_string(), response.body.len().to_string()),
        None => ("<UNKNOWN>".to_string(), "<UNKNOWN>".to_string())
    };

    if with_header {
        println!("{:>6} {:>8} {:>32} {:<70} {:>11} {:>15} {:>10}\n", "ID", "METHOD", "HOSTNAME", "PATH", "STATUS", "LENGTH", "HIGHLIGHT");
    }

    let label = record.annotation();
    println!(
        "{:>6} {:>8} {:>32} {:<70} {:>11} {:>15} {:>10}",
        record.id,
        truncate(method, 8),
        truncate(&hostname, 32),
        truncate(&path, 70),
        status,
        length,
        paint(label.name(), label)
    );
}

pub(super) fn print_urls(record: &TrafficRecord) {
    let label = record.annotation();
    println!(
        "{:>6} {:>8} {}",
        record.id,
        paint(label.name(), label),
        &record.request.url
    );
}

pub(crate) fn execute(selection: &SelectionSettings, print_urls_only: bool, http_data_path: &str) -> Result<(), CrayonCLIError> {
    let mut storage = HttpStorage::default();
    storage.load(http_data_path)?;

    let mut first = true;
    for record in &storage {
        if !selection.contains(record) {
            continue;
        }

        if print_urls_only {
            print_urls(record);
        }
        else {
            print_briefly(record, first);
        }
        first = false;
    }

    if first {
        return Err(CrayonCLIError::from("Nothing is found"));
    }

    Ok(())
}

/// Every rule slot with its stored value and the color it resolves to
pub(crate) fn print_settings(settings: &dyn SettingsStore, log: &dyn HostLog) {
    let resolver = PaletteResolver::new(settings, log);
    println!("{:<22} {:<12} {}\n", "SLOT", "STORED", "RESOLVED");
    for slot in RuleSlot::ALL {
        let stored = settings
            .get_string(slot.key())
            .unwrap_or_else(|| "<absent>".to_string());
        let resolved = match resolver.resolve(slot) {
            Some(color) => paint(color.name(), color),
            None => "<unresolved>".normal()
        };

        println!("{:<22} {:<12} {}", slot.key(), stored, resolved);
    }
}

// ---------------------------------------------------------------------------------------------- //

use regex::Regex;
use log::debug;

use crate::{traffic::TrafficRecord, utils::CrayonError};

pub(crate) fn make_re_list(str_re: &[String]) -> Result<Vec<Regex>, CrayonError> {
    let mut result: Vec<Regex> = Vec::with_capacity(str_re.len());
    for s in str_re {
        let re = Regex::new(s)
            .map_err(|e| CrayonError::RegexError(format!("Cannot compile regex from '{}': {}", s, e)))?;
        result.push(re);
    }

    Ok(result)
}

fn fit_regex_list(s: &str, res: &[Regex]) -> bool {
    let fit = res.iter().any(|re| re.is_match(s));
    debug!("URL {} fits {:?}: {}", s, res, fit);
    return fit;
}

pub(super) fn fit_included(url: &str, inc: &[Regex]) -> bool {
    if inc.is_empty() {
        true
    }
    else {
        fit_regex_list(url, inc)
    }
}

/// Returns `true` if no matches found, `false` otherwise
pub(super) fn fit_excluded(url: &str, exc: &[Regex]) -> bool {
    if exc.is_empty() {
        true
    }
    else {
        !fit_regex_list(url, exc)
    }
}

pub(crate) fn fit(url: &str, inc: &[Regex], exc: &[Regex]) -> bool {
    return fit_included(url, inc) && fit_excluded(url, exc);
}

/// URL based selection of stored records for the bulk actions
#[derive(Debug, Default)]
pub(crate) struct Scope {
    include: Vec<Regex>,
    exclude: Vec<Regex>
}

impl Scope {
    pub(crate) fn new(include: &[String], exclude: &[String]) -> Result<Self, CrayonError> {
        Ok(
            Scope {
                include: make_re_list(include)?,
                exclude: make_re_list(exclude)?
            }
        )
    }

    pub(crate) fn contains(&self, record: &TrafficRecord) -> bool {
        fit(&record.request.url, &self.include, &self.exclude)
    }
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traffic::TrafficRequest;

    fn record(url: &str) -> TrafficRecord {
        TrafficRecord::new(0, TrafficRequest::new("GET", url))
    }

    #[test]
    fn empty_scope_takes_everything() {
        let scope = Scope::default();
        assert!(scope.contains(&record("https://anything/")));
    }

    #[test]
    fn include_then_exclude() {
        let scope = Scope::new(
            &["^https://h/api/".to_string()],
            &[r"\.js$".to_string()]
        ).unwrap();
        assert!(scope.contains(&record("https://h/api/users")));
        assert!(!scope.contains(&record("https://h/api/app.js")));
        assert!(!scope.contains(&record("https://other/api/users")));
    }

    #[test]
    fn bad_regex_is_an_error() {
        let result = Scope::new(&["(".to_string()], &[]);
        assert!(matches!(result, Err(CrayonError::RegexError(_))));
    }
}

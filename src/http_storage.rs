pub(crate) mod serializable;

use std::collections::HashMap;

use crate::{
    traffic::{TrafficRecord, TrafficRequest, TrafficResponse},
    utils::CrayonError
};

// Highest id accepted from a stored history
const MAX_RECORD_ID: usize = u32::MAX as usize;

/// Prefix lookup over previously observed traffic
pub(crate) trait TrafficHistory {
    /// Records whose request URL starts with `prefix`, order unspecified
    fn query_by_prefix(&mut self, prefix: &str) -> Vec<&mut TrafficRecord>;
}

pub(crate) struct HttpStorageIterator<'a> {
    object: &'a HttpStorage,
    counter: usize
}

#[derive(Clone)]
pub(crate) struct HttpStorage {
    storage: Vec<TrafficRecord>,
    // exchange context -> index of the record still waiting for its response
    context_reference: HashMap<usize, usize>,
    // record id -> index in storage
    id_reference: HashMap<usize, usize>,
    next_id: usize,
}

impl Default for HttpStorage {
    fn default() -> Self {
        HttpStorage {
            storage: Vec::with_capacity(1000),
            context_reference: HashMap::new(),
            id_reference: HashMap::with_capacity(1000),
            next_id: 0,
        }
    }
}

impl<'a> Iterator for HttpStorageIterator<'a> {
    type Item = &'a TrafficRecord;
    fn next(&mut self) -> Option<Self::Item> {
        let tmp = self.object.storage.get(self.counter);
        self.counter += 1;
        tmp
    }
}

impl<'a> IntoIterator for &'a HttpStorage {
    type Item = &'a TrafficRecord;
    type IntoIter = HttpStorageIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        HttpStorageIterator {
            object: self,
            counter: 0
        }
    }
}

impl TrafficHistory for HttpStorage {
    fn query_by_prefix(&mut self, prefix: &str) -> Vec<&mut TrafficRecord> {
        self.storage
            .iter_mut()
            .filter(|record| record.request.url.starts_with(prefix))
            .collect()
    }
}

impl HttpStorage {
    /// Stores a freshly sent request and remembers its exchange context. Returns the record id.
    pub(crate) fn put_request(&mut self, request: TrafficRequest, context: usize) -> usize {
        let index = self.storage.len();
        let id = self.next_id;
        self.insert_with_explicit_id(TrafficRecord::new(id, request));
        self.context_reference.insert(context, index);
        return id;
    }

    /// Attaches a response to the request sent within the same context, if any
    pub(crate) fn put_response(&mut self, response: TrafficResponse, context: &usize) -> Option<usize> {
        let index = self.context_reference.remove(context)?;
        let record = &mut self.storage[index];
        record.response = Some(response);
        Some(record.id)
    }

    fn index_of(&self, id: usize) -> Option<usize> {
        self.id_reference.get(&id).copied()
    }

    pub(crate) fn get_by_id(&self, id: usize) -> Option<&TrafficRecord> {
        let index = self.index_of(id)?;
        self.storage.get(index)
    }

    pub(crate) fn get_mut_by_id(&mut self, id: usize) -> Option<&mut TrafficRecord> {
        let index = self.index_of(id)?;
        self.storage.get_mut(index)
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut TrafficRecord> {
        self.storage.iter_mut()
    }

    /// Keeps the id the record already carries; later ids continue after the highest one seen.
    /// Ids must be unique and not above `MAX_RECORD_ID`.
    pub(crate) fn restore(&mut self, record: TrafficRecord) -> Result<(), CrayonError> {
        if record.id > MAX_RECORD_ID {
            return Err(CrayonError::MalformedRecord(format!("record id {} is out of range", record.id)));
        }

        if self.id_reference.contains_key(&record.id) {
            return Err(CrayonError::MalformedRecord(format!("record id {} is stored twice", record.id)));
        }

        self.insert_with_explicit_id(record);
        Ok(())
    }

    fn insert_with_explicit_id(&mut self, record: TrafficRecord) {
        let id = record.id;
        self.id_reference.insert(id, self.storage.len());
        self.storage.push(record);
        self.next_id = self.next_id.max(id + 1);
    }

    pub(crate) fn len(&self) -> usize {
        return self.storage.len();
    }
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;
    use crate::{gateway::{Annotated, HighlightGateway}, palette::ColorLabel};

    #[test]
    fn pairs_responses_by_context() {
        let mut storage = HttpStorage::default();
        let first = storage.put_request(TrafficRequest::new("GET", "https://h/a"), 11);
        let second = storage.put_request(TrafficRequest::new("GET", "https://h/b"), 22);
        assert_eq!((first, second), (0, 1));

        assert_eq!(storage.put_response(TrafficResponse::new(404, HeaderMap::new(), vec![]), &22), Some(1));
        assert_eq!(storage.put_response(TrafficResponse::new(200, HeaderMap::new(), vec![]), &22), None);
        assert_eq!(storage.put_response(TrafficResponse::new(200, HeaderMap::new(), vec![]), &33), None);

        assert!(storage.get_by_id(0).unwrap().response.is_none());
        assert_eq!(storage.get_by_id(1).unwrap().response.as_ref().unwrap().status, 404);
        assert_eq!(storage.get_by_id(1).unwrap().request.url, "https://h/b");
        assert!(storage.get_by_id(2).is_none());
        assert!(storage.get_by_id(100_000).is_none());
    }

    #[test]
    fn restored_ids_are_kept() {
        let mut storage = HttpStorage::default();
        storage.restore(TrafficRecord::restore(
            5000,
            TrafficRequest::new("GET", "https://h/x"),
            None,
            ColorLabel::BLUE
        )).unwrap();
        assert_eq!(storage.get_by_id(5000).unwrap().annotation(), ColorLabel::BLUE);

        let next = storage.put_request(TrafficRequest::new("GET", "https://h/y"), 1);
        assert_eq!(next, 5001);
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn restore_rejects_huge_and_duplicate_ids() {
        let mut storage = HttpStorage::default();
        for id in [usize::MAX, MAX_RECORD_ID + 1] {
            let record = TrafficRecord::restore(id, TrafficRequest::new("GET", "https://h/"), None, ColorLabel::NONE);
            assert!(matches!(storage.restore(record), Err(CrayonError::MalformedRecord(_))));
        }

        let record = TrafficRecord::restore(MAX_RECORD_ID, TrafficRequest::new("GET", "https://h/a"), None, ColorLabel::NONE);
        storage.restore(record.clone()).unwrap();
        assert!(matches!(storage.restore(record), Err(CrayonError::MalformedRecord(_))));
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.put_request(TrafficRequest::new("GET", "https://h/b"), 1), MAX_RECORD_ID + 1);
    }

    #[test]
    fn prefix_query_filters_and_allows_writes() {
        let mut storage = HttpStorage::default();
        storage.put_request(TrafficRequest::new("GET", "https://h/api/a"), 1);
        storage.put_request(TrafficRequest::new("GET", "https://h/apx"), 2);
        storage.put_request(TrafficRequest::new("GET", "https://h/api/b?q=1"), 3);

        let matches = storage.query_by_prefix("https://h/api/");
        assert_eq!(matches.len(), 2);
        for record in matches {
            HighlightGateway.apply(record, ColorLabel::ORANGE);
        }

        let colors: Vec<ColorLabel> = storage.into_iter().map(|r| r.annotation()).collect();
        assert_eq!(colors, vec![ColorLabel::ORANGE, ColorLabel::NONE, ColorLabel::ORANGE]);
    }
}

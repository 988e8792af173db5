use std::{fmt::Display, fs, io::{BufRead, BufReader}};
use serde::{Serialize, Deserialize};
use serde_json as json;

use crate::{
    http_storage::serializable::{SerializableTrafficRequest, SerializableTrafficResponse},
    traffic::{Direction, StreamPayload},
    utils::CrayonError
};

/// Where a message stream was observed. Only used to tell log lines apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum StreamOrigin {
    Plain,
    Proxied
}

impl Default for StreamOrigin {
    fn default() -> Self {
        StreamOrigin::Proxied
    }
}

impl Display for StreamOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamOrigin::Plain => write!(f, "WebSocket"),
            StreamOrigin::Proxied => write!(f, "Proxy WebSocket")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub(crate) enum SerializablePayload {
    Text(String),
    // base64
    Binary(String)
}

impl TryFrom<SerializablePayload> for StreamPayload {
    type Error = CrayonError;
    fn try_from(payload: SerializablePayload) -> Result<Self, Self::Error> {
        match payload {
            SerializablePayload::Text(text) => Ok(StreamPayload::Text(text)),
            SerializablePayload::Binary(encoded) => Ok(StreamPayload::Binary(base64::decode(encoded)?))
        }
    }
}

/// One line of a capture log, as delivered by the host proxy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub(crate) enum ProxyEvents {
    RequestSent {
        context: usize,
        request: SerializableTrafficRequest
    },
    ResponseReceived {
        context: usize,
        response: SerializableTrafficResponse
    },
    WebSocketCreated {
        url: String,
        #[serde(default)]
        origin: StreamOrigin
    },
    WebSocketMessage {
        direction: Direction,
        #[serde(default)]
        origin: StreamOrigin,
        payload: SerializablePayload
    }
}

pub(crate) fn read_capture(path: &str) -> Result<Vec<ProxyEvents>, CrayonError> {
    let fin = fs::File::open(path)?;
    let reader = BufReader::new(fin);
    let mut events = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event: ProxyEvents = json::from_str(&line)
            .map_err(|e| CrayonError::SerializationError(format!("line {} of {}: {}", number + 1, path, e)))?;
        events.push(event);
    }

    Ok(events)
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_event_kind() {
        let lines = [
            r#"{"event":"request-sent","context":1,"request":{"method":"GET","url":"https://h/"}}"#,
            r#"{"event":"response-received","context":1,"response":{"status":200}}"#,
            r#"{"event":"web-socket-created","url":"wss://h/ws","origin":"plain"}"#,
            r#"{"event":"web-socket-message","direction":"to-client","payload":{"kind":"binary","data":"AAE="}}"#
        ];

        let events: Vec<ProxyEvents> = lines
            .iter()
            .map(|l| json::from_str(l).unwrap())
            .collect();

        assert!(matches!(&events[0], ProxyEvents::RequestSent { context: 1, request } if request.url == "https://h/"));
        assert!(matches!(&events[1], ProxyEvents::ResponseReceived { context: 1, response } if response.status == 200));
        assert!(matches!(&events[2], ProxyEvents::WebSocketCreated { origin: StreamOrigin::Plain, .. }));
        match &events[3] {
            ProxyEvents::WebSocketMessage { direction, origin, payload } => {
                assert_eq!(*direction, Direction::ToClient);
                assert_eq!(*origin, StreamOrigin::Proxied);
                let payload = StreamPayload::try_from(payload.clone()).unwrap();
                assert_eq!(payload, StreamPayload::Binary(vec![0, 1]));
            },
            other => panic!("unexpected event {:?}", other)
        }
    }

    #[test]
    fn bad_line_reports_its_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.jsonl").to_string_lossy().to_string();
        fs::write(&path, "\n{\"event\":\"web-socket-created\",\"url\":\"wss://h\"}\n{\"event\":\"nope\"}\n").unwrap();

        match read_capture(&path) {
            Err(CrayonError::SerializationError(msg)) => assert!(msg.starts_with("line 3 of")),
            other => panic!("unexpected result {:?}", other)
        }
    }
}

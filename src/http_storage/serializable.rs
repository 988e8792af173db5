use std::{io::{Write, BufReader, BufRead}, str::FromStr};
use serde_json as json;
use std::{collections::HashMap, fs};
use serde::{Serialize, Deserialize};
use http::{HeaderMap, header::HeaderName, HeaderValue as HTTPHeaderValue};

use super::HttpStorage;
use crate::{
    gateway::Annotated,
    palette::ColorLabel,
    traffic::{sniff, MimeKind, TrafficRecord, TrafficRequest, TrafficResponse},
    utils::CrayonError
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct HeaderValue {
    encoding: String,
    value: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct SerializableTrafficRequest {
    pub(crate) method: String,
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) headers: HashMap<String, HeaderValue>,
    #[serde(default)]
    pub(crate) body: Option<String>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct SerializableTrafficResponse {
    pub(crate) status: u16,
    #[serde(default)]
    pub(crate) headers: HashMap<String, HeaderValue>,
    #[serde(default)]
    pub(crate) body: Option<String>,
    // Sniffed from the body when the capture side did not provide it
    #[serde(default)]
    pub(crate) inferred_kind: Option<MimeKind>
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct SerializableTrafficRecord {
    index: usize,
    request: SerializableTrafficRequest,
    response: Option<SerializableTrafficResponse>,
    #[serde(default)]
    highlight: ColorLabel
}

impl HeaderValue {
    pub(crate) fn new<T: ToString, U: ToString>(encoding: T, value: U) -> Self {
        HeaderValue { encoding: encoding.to_string(), value: value.to_string() }
    }
}

fn headers_to_serializable(headers: &HeaderMap) -> HashMap<String, HeaderValue> {
    headers
        .iter()
        .map(|(k, v)| {
            let key = k.to_string();
            let value = if let Ok(decoded_value) = v.to_str() {
                HeaderValue::new("utf-8", decoded_value)
            }
            else {
                HeaderValue::new("base64", base64::encode(v.as_bytes()))
            };

            (key, value)
        })
        .collect()
}

fn headers_from_serializable(headers: &HashMap<String, HeaderValue>) -> Result<HeaderMap, CrayonError> {
    let mut result: HeaderMap<HTTPHeaderValue> = HeaderMap::default();
    for (k, v) in headers {
        let name = HeaderName::from_str(k)?;
        let value_bytes: Vec<u8> = match v.encoding.as_str() {
            "utf-8" => v.value.as_bytes().into(),
            "base64" => base64::decode(v.value.as_str())?,
            _ => {
                return Err(CrayonError::HeaderValueParseError(
                    format!("Unknown encoding '{}' of header '{}'", &v.encoding, k)
                ));
            }
        };

        let value = HTTPHeaderValue::from_bytes(value_bytes.as_slice())?;
        result.append(name, value);
    }

    Ok(result)
}

fn body_to_serializable(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        None
    }
    else {
        Some(base64::encode(body))
    }
}

fn body_from_serializable(body: &Option<String>) -> Result<Vec<u8>, CrayonError> {
    match body {
        Some(body_encoded) => Ok(base64::decode(body_encoded)?),
        None => Ok(Vec::default())
    }
}

impl From<&TrafficRequest> for SerializableTrafficRequest {
    fn from(request: &TrafficRequest) -> Self {
        SerializableTrafficRequest {
            method: request.method.clone(),
            url: request.url.clone(),
            headers: headers_to_serializable(&request.headers),
            body: body_to_serializable(&request.body)
        }
    }
}

impl TryFrom<&SerializableTrafficRequest> for TrafficRequest {
    type Error = CrayonError;
    fn try_from(request: &SerializableTrafficRequest) -> Result<Self, Self::Error> {
        Ok(
            TrafficRequest {
                method: request.method.clone(),
                url: request.url.clone(),
                headers: headers_from_serializable(&request.headers)?,
                body: body_from_serializable(&request.body)?
            }
        )
    }
}

impl From<&TrafficResponse> for SerializableTrafficResponse {
    fn from(response: &TrafficResponse) -> Self {
        SerializableTrafficResponse {
            status: response.status,
            headers: headers_to_serializable(&response.headers),
            body: body_to_serializable(&response.body),
            inferred_kind: Some(response.inferred_kind)
        }
    }
}

impl TryFrom<&SerializableTrafficResponse> for TrafficResponse {
    type Error = CrayonError;
    fn try_from(response: &SerializableTrafficResponse) -> Result<Self, Self::Error> {
        let body = body_from_serializable(&response.body)?;
        let inferred_kind = match response.inferred_kind {
            Some(kind) => kind,
            None => sniff::infer_kind(&body)
        };

        Ok(
            TrafficResponse {
                status: response.status,
                headers: headers_from_serializable(&response.headers)?,
                inferred_kind,
                body
            }
        )
    }
}

impl From<&TrafficRecord> for SerializableTrafficRecord {
    fn from(record: &TrafficRecord) -> Self {
        SerializableTrafficRecord {
            index: record.id,
            request: SerializableTrafficRequest::from(&record.request),
            response: record.response.as_ref().map(SerializableTrafficResponse::from),
            highlight: record.annotation()
        }
    }
}

impl TryFrom<SerializableTrafficRecord> for TrafficRecord {
    type Error = CrayonError;
    fn try_from(record: SerializableTrafficRecord) -> Result<Self, Self::Error> {
        let request = TrafficRequest::try_from(&record.request)?;
        let response = match record.response.as_ref() {
            Some(ser_response) => Some(TrafficResponse::try_from(ser_response)?),
            None => None
        };

        Ok(TrafficRecord::restore(record.index, request, response, record.highlight))
    }
}

impl HttpStorage {
    pub(crate) fn store(&self, path: &str) -> Result<(), CrayonError> {
        let mut fout = fs::File::create(path)?;
        for record in self {
            let serializable_record = SerializableTrafficRecord::from(record);
            let jsn = json::to_string(&serializable_record)?;
            fout.write_all(jsn.as_bytes())?;
            fout.write_all("\n".as_bytes())?;
        }

        Ok(())
    }

    /// Appends records from a JSON lines file; a missing file is an empty history
    pub(crate) fn load(&mut self, load_path: &str) -> Result<(), CrayonError> {
        let fin = match fs::File::open(load_path) {
            Ok(fin) => fin,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into())
        };

        let reader = BufReader::new(fin);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: SerializableTrafficRecord = json::from_str(&line)?;
            self.restore(TrafficRecord::try_from(record)?)?;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------------------------- //

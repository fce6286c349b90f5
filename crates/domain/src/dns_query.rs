use super::{ClientSubnet, RecordType};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The two DoH encodings a query can be sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DohProtocol {
    /// RFC 8484 binary DNS message (`application/dns-message`).
    #[default]
    Wire,

    /// JSON API (`application/dns-json`).
    Json,
}

impl DohProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wire => "wire",
            Self::Json => "json",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Wire => "application/dns-message",
            Self::Json => "application/dns-json",
        }
    }
}

impl fmt::Display for DohProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DohProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wire" | "wireformat" => Ok(Self::Wire),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Unknown protocol '{}'. Expected 'wire' or 'json'",
                s
            )),
        }
    }
}

/// Query-string parameters for the JSON API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonParams {
    pub name: Arc<str>,
    pub record_type: &'static str,
}

impl JsonParams {
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [("name", &*self.name), ("type", self.record_type)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPayload {
    /// Serialized DNS message, ready to POST.
    Wire(Bytes),
    Json(JsonParams),
}

/// One encoded question, built once per run and shared read-only by every
/// resolver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    name: Arc<str>,
    record_type: RecordType,
    client_subnet: Option<ClientSubnet>,
    payload: QueryPayload,
}

impl Query {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        client_subnet: Option<ClientSubnet>,
        payload: QueryPayload,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            client_subnet,
            payload,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn client_subnet(&self) -> Option<&ClientSubnet> {
        self.client_subnet.as_ref()
    }

    pub fn payload(&self) -> &QueryPayload {
        &self.payload
    }

    pub fn protocol(&self) -> DohProtocol {
        match self.payload {
            QueryPayload::Wire(_) => DohProtocol::Wire,
            QueryPayload::Json(_) => DohProtocol::Json,
        }
    }
}

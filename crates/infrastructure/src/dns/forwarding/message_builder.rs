//! DoH query builder
//!
//! Turns a (name, record type, optional client subnet) question into the
//! payload for one of the two DoH encodings. The result is built once per run
//! and shared read-only by every resolver invocation.

use super::client_subnet::append_client_subnet;
use bytes::Bytes;
use ferrous_doh_domain::{
    ClientSubnet, DohProtocol, DomainError, JsonParams, Query, QueryPayload, RecordType,
};
use hickory_proto::op::{Message, MessageType, OpCode, Query as HickoryQuery};
use hickory_proto::rr::{DNSClass, Name, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct QueryBuilder;

impl QueryBuilder {
    /// Validate the question and encode it for `protocol`.
    ///
    /// Every error here is fatal for the run: nothing has been dispatched yet.
    pub fn build(
        name: &str,
        record_type: &str,
        protocol: DohProtocol,
        client_subnet: Option<&str>,
    ) -> Result<Query, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "Domain name cannot be empty".to_string(),
            ));
        }

        let dns_name = Name::from_str(name).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e))
        })?;

        let record_type =
            RecordType::from_str(record_type).map_err(DomainError::UnknownRecordType)?;

        let client_subnet = client_subnet
            .map(ClientSubnet::from_str)
            .transpose()
            .map_err(DomainError::InvalidClientSubnet)?;

        match protocol {
            DohProtocol::Wire => {
                let bytes = Self::build_wire(dns_name, record_type, client_subnet.as_ref())?;
                debug!(
                    name = %name,
                    record_type = %record_type,
                    ecs = client_subnet.is_some(),
                    message_len = bytes.len(),
                    "Wire query built"
                );
                Ok(Query::new(
                    name,
                    record_type,
                    client_subnet,
                    QueryPayload::Wire(bytes),
                ))
            }
            DohProtocol::Json => {
                if let Some(subnet) = client_subnet {
                    warn!(ecs = %subnet, "JSON API has no client subnet field, ignoring");
                }
                let name: Arc<str> = Arc::from(name);
                let params = JsonParams {
                    name: Arc::clone(&name),
                    record_type: record_type.as_str(),
                };
                Ok(Query::new(
                    name,
                    record_type,
                    None,
                    QueryPayload::Json(params),
                ))
            }
        }
    }

    /// Serialize a recursive query: random id, RD set, one IN question, plus
    /// an EDNS0 client-subnet OPT record when a subnet is given.
    pub fn build_wire(
        name: Name,
        record_type: RecordType,
        client_subnet: Option<&ClientSubnet>,
    ) -> Result<Bytes, DomainError> {
        let mut query = HickoryQuery::new();
        query.set_name(name);
        query.set_query_type(HickoryRecordType::from(record_type.to_u16()));
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::QueryEncoding(e.to_string()))?;

        if let Some(subnet) = client_subnet {
            append_client_subnet(&mut buf, subnet);
        }

        Ok(Bytes::from(buf))
    }
}

use crate::dns::error_classifier::ErrorClassifier;
use ferrous_doh_domain::{Answer, DohProtocol, ErrorKind, Outcome, Record, RecordType};
use hickory_proto::op::Message;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const DNS_HEADER_LEN: usize = 12;

/// One entry of a JSON API `Answer` array.
#[derive(Debug, Deserialize)]
struct JsonAnswer {
    name: String,
    #[serde(rename = "type")]
    record_type: u16,
    #[serde(rename = "TTL")]
    ttl: u32,
    data: String,
}

/// Turns a DoH response body into an [`Outcome`]. Pure: the same bytes always
/// decode to the same outcome.
pub struct ResponseDecoder;

impl ResponseDecoder {
    pub fn decode(protocol: DohProtocol, body: &[u8]) -> Outcome {
        let decoded = match protocol {
            DohProtocol::Wire => Self::decode_wire(body).map(Outcome::Answers),
            DohProtocol::Json => Self::decode_json(body),
        };

        decoded.unwrap_or_else(Outcome::Failure)
    }

    /// Answer section of a wire-format response, in message order.
    pub fn decode_wire(body: &[u8]) -> Result<Vec<Answer>, ErrorKind> {
        if body.len() < DNS_HEADER_LEN {
            debug!(body_len = body.len(), "Response shorter than a DNS header");
            return Err(ErrorKind::MalformedWireHeader);
        }

        let message = Message::from_vec(body).map_err(|e| {
            let kind = ErrorClassifier::classify_decode(&e);
            debug!(error = %e, kind = %kind, "Failed to parse DNS response");
            kind
        })?;

        let answers: Vec<Answer> = message
            .answers()
            .iter()
            .map(|record| {
                Answer::Record(Record::new(
                    record.name().to_string(),
                    record.ttl(),
                    RecordType::label_for_code(u16::from(record.record_type())),
                    record.data().to_string(),
                ))
            })
            .collect();

        debug!(
            rcode = ?message.response_code(),
            answers = answers.len(),
            "DNS response parsed"
        );

        Ok(answers)
    }

    /// JSON API response. Bodies without an `Answer` array are passed through
    /// untouched.
    pub fn decode_json(body: &[u8]) -> Result<Outcome, ErrorKind> {
        let payload: Value = serde_json::from_slice(body).map_err(|e| {
            debug!(error = %e, "Failed to parse JSON response");
            ErrorKind::JsonDecodeFailure
        })?;

        if !payload.get("Answer").is_some_and(Value::is_array) {
            debug!("JSON response has no Answer array, passing through");
            return Ok(Outcome::Passthrough(payload));
        }

        let answers = payload["Answer"]
            .as_array()
            .map(|entries| entries.iter().map(Self::json_answer).collect())
            .unwrap_or_default();

        Ok(Outcome::Answers(answers))
    }

    fn json_answer(entry: &Value) -> Answer {
        match entry {
            Value::Object(_) => match JsonAnswer::deserialize(entry) {
                Ok(answer) => Answer::Record(Record::new(
                    answer.name,
                    answer.ttl,
                    RecordType::label_for_code(answer.record_type),
                    answer.data,
                )),
                Err(_) => Answer::Opaque(entry.to_string()),
            },
            Value::String(text) => Answer::Opaque(text.clone()),
            other => Answer::Opaque(other.to_string()),
        }
    }
}

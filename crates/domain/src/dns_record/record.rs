use serde::Serialize;
use std::fmt;

/// One normalized answer record, whatever encoding it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,

    pub ttl: u32,

    /// Mnemonic derived from the numeric type code ("A", "AAAA", "TYPE4242").
    pub type_label: String,

    /// Presentation-format rdata.
    pub data: String,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        ttl: u32,
        type_label: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ttl,
            type_label: type_label.into(),
            data: data.into(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.ttl, self.type_label, self.data
        )
    }
}

/// An entry of an answer section.
///
/// JSON resolvers do not agree on the shape of `Answer` entries, so anything
/// that is not a well-formed record object is kept as text instead of being
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Record(Record),
    Opaque(String),
}

impl Answer {
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Answer::Record(record) => Some(record),
            Answer::Opaque(_) => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Record(record) => record.fmt(f),
            Answer::Opaque(text) => f.write_str(text),
        }
    }
}

impl From<Record> for Answer {
    fn from(record: Record) -> Self {
        Answer::Record(record)
    }
}

mod record;
mod record_type;

pub use record::{Answer, Record};
pub use record_type::RecordType;

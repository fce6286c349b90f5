pub mod client_subnet;
pub mod message_builder;
pub mod response_parser;

pub use client_subnet::append_client_subnet;
pub use message_builder::QueryBuilder;
pub use response_parser::ResponseDecoder;

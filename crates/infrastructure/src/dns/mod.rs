pub mod error_classifier;
pub mod forwarding;
pub mod transport;

pub use error_classifier::ErrorClassifier;
pub use forwarding::{QueryBuilder, ResponseDecoder};
pub use transport::{DohResolverClient, DohSession, RequestTiming};

pub mod https;
pub mod timing;

pub use https::{DohResolverClient, DohSession};
pub use timing::RequestTiming;

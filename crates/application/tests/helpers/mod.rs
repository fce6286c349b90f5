pub mod mock_resolver_client;

#[allow(unused_imports)]
pub use mock_resolver_client::*;

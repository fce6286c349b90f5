pub mod builders;
pub mod doh_server_mock;

#[allow(unused_imports)]
pub use builders::{ResolverBuilder, TransportBuilder};
#[allow(unused_imports)]
pub use doh_server_mock::{
    build_wire_answer, refused_host, HangupServer, MockBehavior, MockDohServer, SilentServer,
};

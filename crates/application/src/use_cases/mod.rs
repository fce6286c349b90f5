pub mod fan_out;
pub mod load_resolvers;

// Re-export use cases
pub use fan_out::{FanOut, FanOutCoordinator};
pub use load_resolvers::LoadResolversUseCase;

pub mod forwarding;
pub mod ptr_resolver;
pub mod transport;

pub use forwarding::{MessageBuilder, PtrResponse, ResponseParser};
pub use ptr_resolver::HickoryPtrResolver;

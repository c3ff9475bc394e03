pub mod snapshot;
pub mod sse;
pub mod stream;

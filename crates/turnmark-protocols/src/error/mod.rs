//! Error types for turnmark protocols.

mod page;
mod protocol;
mod store;

pub use page::PageError;
pub use protocol::ProtocolError;
pub use store::StoreError;

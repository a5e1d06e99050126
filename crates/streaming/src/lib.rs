pub mod protocol;
pub mod request;

pub use protocol::*;
pub use request::*;

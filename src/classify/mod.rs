pub mod protocol;
pub mod record;

pub use protocol::translate_protocol;
pub use record::{classify, Classification};

pub mod writer;

pub use writer::{write_counts, PORT_PROTOCOL_HEADER, TAG_HEADER};

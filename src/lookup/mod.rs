pub mod table;

pub use table::{LookupTable, DEFAULT_TAG};

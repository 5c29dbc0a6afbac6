pub mod export;
pub mod output;

pub use export::{GraphDocument, LinkRecord, NodeRecord, Statistics};
pub use output::{write_json_atomic, JsonWriter};

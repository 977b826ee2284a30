mod backend;
mod sample;
mod source;

pub use backend::BackendClient;
pub use sample::{SampleData, SAMPLE_DOCUMENT_ID};
pub use source::{for_config, DataSource};

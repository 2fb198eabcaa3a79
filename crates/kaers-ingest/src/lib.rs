pub mod discovery;
pub mod error;
pub mod pipe_table;

pub use discovery::{DiscoveredFile, discover_extract_files, read_extract_file};
pub use error::{IngestError, Result};
pub use pipe_table::{parse_pipe_text, read_pipe_table};

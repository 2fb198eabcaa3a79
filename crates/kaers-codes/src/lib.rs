pub mod cache;
pub mod error;
pub mod loader;
pub mod maps;
pub mod table;

pub use cache::CodeTableCache;
pub use error::{CodesError, Result};
pub use loader::load_code_table;
pub use maps::StaticMap;
pub use table::{CodeTable, FileTable};

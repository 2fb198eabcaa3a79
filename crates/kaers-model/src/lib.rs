pub mod error;
pub mod kind;
pub mod narrative;
pub mod sheet;

pub use error::{ModelError, Result};
pub use kind::TableKind;
pub use narrative::{NARRATIVE_HEADER, NARRATIVE_SHEET_NAME, NarrativeRecord};
pub use sheet::{CASE_KEY_COLUMN, Sheet};

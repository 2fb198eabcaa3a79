pub mod dedupe;
pub mod narrative;
pub mod pipeline;

pub use dedupe::{apply_drop_set, compute_drop_set};
pub use narrative::assemble_narratives;
pub use pipeline::{ConversionInput, ConversionOutcome, DedupeResult, IngestResult, run_conversion};

//! Workbook generation.
//!
//! Two workbooks per conversion run: the submission workbook with one sheet
//! per table in the fixed kind order, and an independent narrative workbook
//! with a single summary sheet. Writing goes through the [`WorkbookSink`]
//! trait so the transformation stages never depend on the file format.

mod error;
mod names;
mod sink;
mod xlsx;

pub use error::{OutputError, Result};
pub use names::SheetNamer;
pub use sink::{WorkbookSink, write_narrative_workbook, write_submission_workbook};
pub use xlsx::XlsxSink;

pub mod error;
pub mod rules;
pub mod transform;

pub use error::{Result, TransformError};
pub use rules::{Derive, HeaderOp, SheetRules, ValueSource, rules_for};
pub use transform::transform_sheet;

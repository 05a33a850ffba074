//! Options passed into a comparison run

use crate::compare::Tolerance;
use crate::schema::Schema;

/// Everything a comparison needs besides the two tables
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Expected column layout of both files
    pub schema: Schema,
    pub tolerance: Tolerance,
}

impl CompareOptions {
    pub fn new(schema: Schema, tolerance: Tolerance) -> Self {
        Self { schema, tolerance }
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self::new(Schema::detected_sources(), Tolerance::default())
    }
}

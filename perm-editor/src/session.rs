//! Operator session handed to an editor at construction

/// Who is editing
///
/// Passed explicitly into every editor instead of living in global state;
/// the editor only reads it (for log context).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub operator_id: String,
    pub operator_name: String,
}

impl SessionContext {
    pub fn new(operator_id: impl Into<String>, operator_name: impl Into<String>) -> Self {
        Self {
            operator_id: operator_id.into(),
            operator_name: operator_name.into(),
        }
    }
}

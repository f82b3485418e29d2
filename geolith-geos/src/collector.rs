//! Per-context diagnostics.

/// Messages recorded by the last top-level operation of a context.
///
/// A [`crate::RelationContext`] resets its collector when an operation starts,
/// so whatever is held here always belongs to the most recent call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCollector {
    error: Option<String>,
    warning: Option<String>,
    aux_error: Option<String>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.error = None;
        self.warning = None;
        self.aux_error = None;
    }

    /// Engine failure.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Input the engine cannot represent.
    pub fn set_warning(&mut self, message: impl Into<String>) {
        self.warning = Some(message.into());
    }

    /// Input rejected before reaching the engine.
    pub fn set_aux_error(&mut self, message: impl Into<String>) {
        self.aux_error = Some(message.into());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn last_aux_error(&self) -> Option<&str> {
        self.aux_error.as_deref()
    }

    /// Whether an error or auxiliary error was recorded. Warnings do not count.
    pub fn has_error(&self) -> bool {
        self.error.is_some() || self.aux_error.is_some()
    }
}

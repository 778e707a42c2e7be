use super::{ErrorCode, Severity};

/// Display metadata registered for one [`ErrorCode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub id: ErrorCode,
    pub severity: Severity,
    /// Stable machine-readable code, e.g. `"E_SCANNER_UNTERM_STR"`.
    pub short_code: &'static str,
    /// Message with positional `{}` / `{N}` placeholders.
    pub message_template: &'static str,
    pub description: &'static str,
}

impl ErrorInfo {
    pub const fn new(
        id: ErrorCode,
        severity: Severity,
        short_code: &'static str,
        message_template: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            severity,
            short_code,
            message_template,
            description,
        }
    }
}

//! Execution hints and configuration

use tenacc_kernels::RoundingMode;

/// Default ceiling on the element count of any operand or result
pub const DEFAULT_MAX_ELEMENTS: u64 = 1 << 32;

/// Default ceiling on the size of a result buffer, in bytes
pub const DEFAULT_MAX_RESULT_BYTES: u64 = 1 << 32;

/// Execution hints for controlling dispatch
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecHints {
    /// Largest tensor, in elements, the accelerator will process
    pub max_elements: u64,
    /// Largest result buffer, in bytes, the accelerator will allocate
    pub max_result_bytes: u64,
    /// Reject input payloads wider than their data plus sentinel
    pub strict_payload: bool,
    /// Mode for hosts that have no rounding discriminant of their own
    pub default_rounding: Option<RoundingMode>,
}

impl Default for ExecHints {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_MAX_ELEMENTS,
            max_result_bytes: DEFAULT_MAX_RESULT_BYTES,
            strict_payload: false,
            default_rounding: None,
        }
    }
}

impl ExecHints {
    /// Create new execution hints with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element limit
    pub fn with_max_elements(mut self, max_elements: u64) -> Self {
        self.max_elements = max_elements;
        self
    }

    /// Set the result byte limit
    pub fn with_max_result_bytes(mut self, max_result_bytes: u64) -> Self {
        self.max_result_bytes = max_result_bytes;
        self
    }

    /// Set strict payload checking
    pub fn with_strict_payload(mut self, strict: bool) -> Self {
        self.strict_payload = strict;
        self
    }

    /// Set the fallback rounding mode
    pub fn with_default_rounding(mut self, mode: RoundingMode) -> Self {
        self.default_rounding = Some(mode);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let hints = ExecHints::new();
        assert_eq!(hints.max_elements, 1 << 32);
        assert_eq!(hints.max_result_bytes, 1 << 32);
        assert!(!hints.strict_payload);
        assert_eq!(hints.default_rounding, None);
    }

    #[test]
    fn test_builders() {
        let hints = ExecHints::new()
            .with_max_elements(16)
            .with_max_result_bytes(64)
            .with_strict_payload(true)
            .with_default_rounding(RoundingMode::Down);
        assert_eq!(hints.max_elements, 16);
        assert_eq!(hints.max_result_bytes, 64);
        assert!(hints.strict_payload);
        assert_eq!(hints.default_rounding, Some(RoundingMode::Down));
    }
}

//! Error taxonomy shared by the library and the `lc` binary.

use thiserror::Error;

/// Errors raised by curve evaluation, comparison, fitting and output.
///
/// Missing values (`NaN`) are not errors; they propagate through arithmetic
/// unless the caller asks for them to be dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// A numeric input lies outside the domain of the formula.
    #[error("invalid {field} = {value}: {reason}")]
    Domain {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Block bounds with `m > n`.
    #[error("invalid production block: m = {m} must not exceed n = {n}")]
    Range { m: f64, n: f64 },

    /// An enumerated option or sequence layout outside its accepted set.
    #[error("invalid {option} '{value}': {reason}")]
    Config {
        option: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Least-squares estimation could not produce a usable solution.
    #[error("fit failed: {message}")]
    Fit { message: String },

    /// Rendering a result for output failed.
    #[error("failed to write output: {message}")]
    Output { message: String },
}

impl CurveError {
    pub fn domain(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::Domain {
            field,
            value,
            reason,
        }
    }

    pub fn config(option: &'static str, value: impl Into<String>, reason: &'static str) -> Self {
        Self::Config {
            option,
            value: value.into(),
            reason,
        }
    }

    pub fn fit(message: impl Into<String>) -> Self {
        Self::Fit {
            message: message.into(),
        }
    }

    /// Process exit code used by the binary.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Domain { .. } | Self::Range { .. } | Self::Config { .. } => 2,
            Self::Fit { .. } => 3,
            Self::Output { .. } => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = CurveError::domain("t", -1.0, "must be > 0");
        assert_eq!(err.to_string(), "invalid t = -1: must be > 0");

        let err = CurveError::Range { m: 10.0, n: 5.0 };
        assert!(err.to_string().contains("m = 10"));
        assert_eq!(err.exit_code(), 2);

        assert_eq!(CurveError::fit("singular").exit_code(), 3);
    }

    #[test]
    fn output_failures_have_their_own_exit_code() {
        let err = CurveError::Output {
            message: "broken pipe".to_string(),
        };
        assert_eq!(err.to_string(), "failed to write output: broken pipe");
        assert_eq!(err.exit_code(), 4);
    }
}

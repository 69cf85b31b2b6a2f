//! Caller-selected modes and the intents they resolve to.

use std::fmt;

/// Mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Tracking,
    Return,
    /// Classify the query with the model first.
    #[default]
    Auto,
}

impl Mode {
    /// Intent for explicit modes; `None` when classification is required.
    pub fn explicit_intent(self) -> Option<Intent> {
        match self {
            Mode::Tracking => Some(Intent::Tracking),
            Mode::Return => Some(Intent::Return),
            Mode::Auto => None,
        }
    }
}

/// Purpose of a query after mode resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Tracking,
    Return,
    /// Anything else; escalated to a human agent.
    Complex,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Tracking => "tracking",
            Intent::Return => "return",
            Intent::Complex => "complex",
        }
    }

    /// Map raw classifier output to an intent.
    ///
    /// Surrounding whitespace, quotes, and trailing punctuation are ignored
    /// and the comparison is case-insensitive. Anything unrecognized is
    /// `Complex`.
    pub fn from_classification(output: &str) -> Intent {
        let label = output
            .trim()
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '.' | '!' | ':'))
            .trim()
            .to_ascii_lowercase();
        match label.as_str() {
            "tracking" => Intent::Tracking,
            "return" => Intent::Return,
            _ => Intent::Complex,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn classification_output_is_normalized() {
        assert_eq!(Intent::from_classification("tracking"), Intent::Tracking);
        assert_eq!(Intent::from_classification("  Return\n"), Intent::Return);
        assert_eq!(Intent::from_classification("'tracking'."), Intent::Tracking);
        assert_eq!(Intent::from_classification("complex"), Intent::Complex);
    }

    #[test]
    fn unrecognized_classification_escalates() {
        assert_eq!(Intent::from_classification(""), Intent::Complex);
        assert_eq!(
            Intent::from_classification("La consulta es de tracking"),
            Intent::Complex
        );
        assert_eq!(Intent::from_classification("refund"), Intent::Complex);
    }

    #[test]
    fn explicit_modes_skip_classification() {
        assert_eq!(Mode::Tracking.explicit_intent(), Some(Intent::Tracking));
        assert_eq!(Mode::Return.explicit_intent(), Some(Intent::Return));
        assert_eq!(Mode::Auto.explicit_intent(), None);
        assert_eq!(Mode::default(), Mode::Auto);
    }
}

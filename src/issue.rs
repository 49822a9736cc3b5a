use std::{cmp::Ordering, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingKey,
    MalformedPattern,
    ParseError,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::MalformedPattern => write!(f, "malformed-pattern"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub file_path: Option<String>,
    pub line: Option<usize>,
    pub col: Option<usize>,
    pub message: String,
    pub severity: Severity,
    pub rule: Rule,
    pub source_line: Option<String>,
    pub hint: Option<String>,
}

impl Issue {
    pub fn missing_key(
        file_path: &str,
        line: usize,
        col: usize,
        key: &str,
        source_line: Option<String>,
    ) -> Self {
        Self {
            file_path: Some(file_path.to_string()),
            line: Some(line),
            col: Some(col),
            message: key.to_string(),
            severity: Severity::Error,
            rule: Rule::MissingKey,
            source_line,
            hint: Some("add the key to the primary locale files".to_string()),
        }
    }

    /// A user-supplied usage regex template that failed to compile. The
    /// scan continues with the remaining patterns.
    pub fn malformed_pattern(message: impl Into<String>) -> Self {
        Self {
            file_path: None,
            line: None,
            col: None,
            message: message.into(),
            severity: Severity::Warning,
            rule: Rule::MalformedPattern,
            source_line: None,
            hint: Some("fix the template in 'usageMatchRegex'".to_string()),
        }
    }

    pub fn parse_error(file_path: &str, message: impl Into<String>) -> Self {
        Self {
            file_path: Some(file_path.to_string()),
            line: None,
            col: None,
            message: message.into(),
            severity: Severity::Warning,
            rule: Rule::ParseError,
            source_line: None,
            hint: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.file_path
            .cmp(&other.file_path)
            .then(self.line.cmp(&other.line))
            .then(self.col.cmp(&other.col))
            .then(self.rule.cmp(&other.rule))
            .then(self.message.cmp(&other.message))
    }
}

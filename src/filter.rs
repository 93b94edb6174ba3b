use std::fmt;
use std::str::FromStr;

/// Restricts a scan to file names ending with a given suffix.
///
/// Accepts glob-ish `*.json`, a bare `.json`, or just `json`. `*` and the
/// empty pattern match every file. Comparison ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixFilter {
    suffix: String,
}

impl SuffixFilter {
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let trimmed = pattern.trim().trim_start_matches('*');
        let suffix = if trimmed.is_empty() || trimmed.starts_with('.') {
            trimmed.to_string()
        } else {
            format!(".{trimmed}")
        };
        Self { suffix }
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        if self.suffix.is_empty() {
            return true;
        }
        name.len() >= self.suffix.len()
            && name
                .get(name.len() - self.suffix.len()..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(&self.suffix))
    }

    /// Suffix without the leading dot, for labels like "No JSON files found."
    #[must_use]
    pub fn label(&self) -> String {
        let label = self.suffix.trim_start_matches('.');
        if label.is_empty() {
            "matching".to_string()
        } else {
            label.to_uppercase()
        }
    }
}

impl Default for SuffixFilter {
    fn default() -> Self {
        Self::new("*.json")
    }
}

impl FromStr for SuffixFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for SuffixFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*{}", self.suffix)
    }
}

use regex::{Regex, RegexBuilder};

/// A set of `-e` patterns. A line matches if any pattern matches anywhere in
/// it; an empty set matches every line.
#[derive(Debug, Clone, Default)]
pub struct MatchPattern {
    regexes: Vec<Regex>,
    ignore_case: bool,
}

impl MatchPattern {
    pub fn new<I, S>(patterns: I, ignore_case: bool) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let regexes = patterns
            .into_iter()
            .map(|p| RegexBuilder::new(p.as_ref()).case_insensitive(ignore_case).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { regexes, ignore_case })
    }

    /// Matches every line.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub fn matches(&self, line: &str) -> bool {
        self.regexes.is_empty() || self.regexes.iter().any(|re| re.is_match(line))
    }
}

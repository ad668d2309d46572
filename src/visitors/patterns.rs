//! Question shapes understood by the visitor-log recognizer.

use regex::Regex;

use super::normalize::capitalize;

/// Phrase every visitor question must contain before the patterns run.
const VENUE: &str = "white house";

/// A question about White House visitors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisitorQuery {
    /// "Who visited the White House?" with no name attached.
    Everyone,
    /// A question about one person, as normalized name tokens.
    Named(Vec<String>),
}

/// The two compiled visitor question shapes.
#[derive(Clone, Debug)]
pub struct VisitorPatterns {
    unconditional: Regex,
    parameterized: Regex,
}

impl VisitorPatterns {
    /// Compile the question patterns.
    ///
    /// # Errors
    /// Returns an error if a pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // Who visit(s/ed) the White House?
            unconditional: Regex::new(r"^\s*who\svisit(?:ed|s)\sthe\swhite\shouse")?,

            // (When/how many times/why/who) did <name> visit (at|in) the White House?
            parameterized: Regex::new(
                r"^\s*(?:when|how\smany\stimes|why|who|has)?\s*(?:did|was|has)?\s*(?P<names>(?:\s?\w+)+)\s(?:visited|visit|visiting|been\sto)\s*(?:at|in)?\sthe\swhite\shouse",
            )?,
        })
    }

    /// Classify a question, or `None` if it is not about visitors.
    ///
    /// The unconditional shape is checked first and wins whenever it
    /// matches, since the parameterized shape would read "who" as a name.
    #[must_use]
    pub fn classify(&self, text: &str) -> Option<VisitorQuery> {
        let text = text.to_lowercase();
        if !text.contains(VENUE) {
            return None;
        }

        if self.unconditional.is_match(&text) {
            return Some(VisitorQuery::Everyone);
        }

        let caps = self.parameterized.captures(&text)?;
        let tokens: Vec<String> = caps
            .name("names")?
            .as_str()
            .split_whitespace()
            .map(capitalize)
            .collect();

        if tokens.is_empty() {
            return None;
        }
        Some(VisitorQuery::Named(tokens))
    }
}

mod prefix;

pub use prefix::BaselinePrefix;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// How candidate (protocol-variant) identifiers map onto baseline identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRule {
    /// Tag marking a candidate run, e.g. `https`
    pub candidate_tag: String,
    /// Tag the candidate tag is replaced with to find the baseline, e.g. `http`
    pub baseline_tag: String,
    /// Separator between name segments; the last segment is run specific
    pub separator: char,
    /// File-type marker that must follow the tag, e.g. `log`
    pub suffix: String,
}

impl Default for PairingRule {
    fn default() -> Self {
        Self {
            candidate_tag: "https".to_string(),
            baseline_tag: "http".to_string(),
            separator: '-',
            suffix: "log".to_string(),
        }
    }
}

/// A candidate identifier and the baseline it is compared against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePairing {
    pub candidate: String,
    pub baseline: String,
}

impl PairingRule {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Whether the identifier names a candidate run: the candidate tag followed,
    /// anywhere later in the name, by the suffix.
    pub fn is_candidate(&self, identifier: &str) -> bool {
        identifier
            .find(&self.candidate_tag)
            .is_some_and(|pos| identifier[pos + self.candidate_tag.len()..].contains(&self.suffix))
    }

    /// Derive the prefix a baseline identifier must start with
    pub fn baseline_prefix(&self, candidate: &str) -> BaselinePrefix {
        BaselinePrefix::derive(candidate, self)
    }

    /// Find the baseline for `candidate` among `identifiers`.
    ///
    /// The candidate itself and other candidate identifiers are never returned. When
    /// several identifiers match, the lexicographically smallest one wins.
    pub fn resolve<'a>(&self, candidate: &str, identifiers: &[&'a str]) -> Result<&'a str> {
        let prefix = self.baseline_prefix(candidate);
        tracing::debug!("Looking for baseline of {} with prefix '{}'", candidate, prefix);

        identifiers
            .iter()
            .copied()
            .filter(|id| *id != candidate && !self.is_candidate(id))
            .filter(|id| prefix.matches(id))
            .min()
            .ok_or_else(|| Error::PairNotFound {
                candidate: candidate.to_string(),
            })
    }

    /// Resolve every candidate among `identifiers`, in identifier order
    pub fn pair_all<'a>(&self, identifiers: &[&'a str]) -> Vec<(&'a str, Result<FilePairing>)> {
        let mut candidates: Vec<&str> = identifiers
            .iter()
            .copied()
            .filter(|id| self.is_candidate(id))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        candidates
            .into_iter()
            .map(|candidate| {
                let pairing = self.resolve(candidate, identifiers).map(|baseline| FilePairing {
                    candidate: candidate.to_string(),
                    baseline: baseline.to_string(),
                });
                (candidate, pairing)
            })
            .collect()
    }
}

use super::PairingRule;

/// Prefix that the identifier of a baseline run starts with
///
/// Derived from a candidate identifier by swapping the first candidate tag for the
/// baseline tag and dropping the last separator-delimited segment (typically a
/// timestamp). Anything may follow the prefix as long as it contains the suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselinePrefix {
    prefix: String,
    suffix: String,
}

impl BaselinePrefix {
    pub fn derive(candidate: &str, rule: &PairingRule) -> Self {
        let key = candidate.replacen(&rule.candidate_tag, &rule.baseline_tag, 1);

        let prefix = match key.rsplit_once(rule.separator) {
            Some((head, _run_specific)) => head.to_string(),
            None => key,
        };

        Self {
            prefix,
            suffix: rule.suffix.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Check whether an identifier starts with the prefix and carries the suffix after it
    pub fn matches(&self, identifier: &str) -> bool {
        identifier
            .strip_prefix(&self.prefix)
            .is_some_and(|rest| rest.contains(&self.suffix))
    }
}

impl std::fmt::Display for BaselinePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_drops_last_segment() {
        let rule = PairingRule::default();
        let prefix = BaselinePrefix::derive("run-https-0001.log", &rule);
        assert_eq!(prefix.as_str(), "run-http");
    }

    #[test]
    fn test_derive_replaces_first_tag_only() {
        let rule = PairingRule::default();
        let prefix = BaselinePrefix::derive("https-api-https-7.log", &rule);
        assert_eq!(prefix.as_str(), "http-api-https");
    }

    #[test]
    fn test_derive_without_separator_keeps_whole_key() {
        let rule = PairingRule::default();
        let prefix = BaselinePrefix::derive("https.log", &rule);
        assert_eq!(prefix.as_str(), "http.log");
        // the suffix must still appear after the prefix
        assert!(!prefix.matches("http.log"));
    }

    #[test]
    fn test_matches() {
        let rule = PairingRule::default();
        let prefix = BaselinePrefix::derive("shop-https-20150619.log", &rule);
        assert!(prefix.matches("shop-http-20150618.log"));
        assert!(prefix.matches("shop-http-20150618.logsummary"));
        assert!(!prefix.matches("shop-http-20150618.csv"));
        assert!(!prefix.matches("x-shop-http-20150618.log"));
    }
}

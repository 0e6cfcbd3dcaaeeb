mod comparison;

pub use comparison::{Comparison, MeasureChange, compare, percent_change};

use crate::pairing::PairingRule;
use crate::store::SummaryStore;
use serde::Serialize;
use std::fmt;

/// What happened to one candidate during analysis
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PairOutcome {
    Compared(Comparison),
    NoBaseline {
        candidate: String,
    },
    Failed {
        candidate: String,
        baseline: String,
        reason: String,
    },
}

/// Findings for every candidate in a store
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub outcomes: Vec<PairOutcome>,
}

impl AnalysisReport {
    /// Pair up candidates with baselines and compare each pair.
    ///
    /// Missing baselines and per-pair failures are recorded and analysis moves on.
    pub fn build(store: &SummaryStore, rule: &PairingRule) -> Self {
        let identifiers: Vec<&str> = store.identifiers().collect();
        let mut outcomes = Vec::new();

        for (candidate, pairing) in rule.pair_all(&identifiers) {
            let pairing = match pairing {
                Ok(pairing) => pairing,
                Err(e) => {
                    tracing::warn!("{}", e);
                    outcomes.push(PairOutcome::NoBaseline {
                        candidate: candidate.to_string(),
                    });
                    continue;
                }
            };

            let (Some(baseline), Some(candidate_record)) =
                (store.get(&pairing.baseline), store.get(&pairing.candidate))
            else {
                continue;
            };

            match compare(baseline, candidate_record) {
                Ok(comparison) => outcomes.push(PairOutcome::Compared(comparison)),
                Err(e) => {
                    tracing::warn!(
                        "Cannot compare {} against {}: {}",
                        pairing.candidate,
                        pairing.baseline,
                        e
                    );
                    outcomes.push(PairOutcome::Failed {
                        candidate: pairing.candidate,
                        baseline: pairing.baseline,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Analysis complete: {} compared, {} without baseline, {} failed",
            count(&outcomes, |o| matches!(o, PairOutcome::Compared(_))),
            count(&outcomes, |o| matches!(o, PairOutcome::NoBaseline { .. })),
            count(&outcomes, |o| matches!(o, PairOutcome::Failed { .. })),
        );

        Self { outcomes }
    }

    pub fn comparisons(&self) -> impl Iterator<Item = &Comparison> {
        self.outcomes.iter().filter_map(|o| match o {
            PairOutcome::Compared(c) => Some(c),
            _ => None,
        })
    }
}

fn count(outcomes: &[PairOutcome], pred: impl Fn(&PairOutcome) -> bool) -> usize {
    outcomes.iter().filter(|o| pred(o)).count()
}

impl fmt::Display for PairOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairOutcome::Compared(comparison) => write!(f, "{}", comparison),
            PairOutcome::NoBaseline { candidate } => {
                writeln!(f, "Couldn't find baseline file for {}", candidate)
            }
            PairOutcome::Failed {
                candidate,
                baseline,
                reason,
            } => writeln!(
                f,
                "Analysis of {} against {} failed: {}",
                candidate, baseline, reason
            ),
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            writeln!(f, "{}", outcome)?;
        }
        Ok(())
    }
}

//! Symptom-to-diagnosis rule table.
//!
//! The table is plain data built once at startup and shared read-only through
//! application state. Matching walks the input in order; symptoms without a
//! rule (including every [`Symptom::Unknown`]) contribute nothing.

use super::metrics::record_diagnosis;
use crate::models::{DiagnosisResult, Severity, Symptom};
use serde::Serialize;
use std::collections::HashMap;

/// Currency suffix used by [`format_summary`].
pub const CURRENCY_SUFFIX: &str = "€";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisRule {
    pub symptom: Symptom,
    pub issue: String,
    pub cost: u64,
}

impl DiagnosisRule {
    pub fn new(symptom: Symptom, issue: impl Into<String>, cost: u64) -> Self {
        Self {
            symptom,
            issue: issue.into(),
            cost,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosisTable {
    rules: Vec<DiagnosisRule>,
    index: HashMap<Symptom, usize>,
}

impl DiagnosisTable {
    /// Build a table from rules. A later rule for the same symptom replaces the
    /// earlier one; rules for [`Symptom::Unknown`] are ignored.
    pub fn new(rules: impl IntoIterator<Item = DiagnosisRule>) -> Self {
        let mut table = Self {
            rules: Vec::new(),
            index: HashMap::new(),
        };

        for rule in rules {
            if !rule.symptom.is_known() {
                continue;
            }
            match table.index.get(&rule.symptom) {
                Some(&position) => table.rules[position] = rule,
                None => {
                    table.index.insert(rule.symptom.clone(), table.rules.len());
                    table.rules.push(rule);
                }
            }
        }

        table
    }

    pub fn rule_for(&self, symptom: &Symptom) -> Option<&DiagnosisRule> {
        self.index.get(symptom).map(|&position| &self.rules[position])
    }

    pub fn rules(&self) -> &[DiagnosisRule] {
        &self.rules
    }
}

impl Default for DiagnosisTable {
    fn default() -> Self {
        Self::new([
            DiagnosisRule::new(Symptom::EngineNoise, "Possible timing-belt wear", 800),
            DiagnosisRule::new(Symptom::OilLeak, "Oil loss — check seal", 200),
            DiagnosisRule::new(Symptom::BrakeNoise, "Brake pads worn — inspect discs", 350),
            DiagnosisRule::new(
                Symptom::BatteryWarning,
                "Weak battery or faulty alternator",
                150,
            ),
            DiagnosisRule::new(Symptom::Overheating, "Coolant loss — check thermostat", 500),
        ])
    }
}

/// One row of the public symptom catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogueEntry {
    pub symptom: String,
    pub label: String,
    pub issue: String,
    pub cost: u64,
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosisEngine {
    table: DiagnosisTable,
}

impl DiagnosisEngine {
    pub fn new(table: DiagnosisTable) -> Self {
        Self { table }
    }

    pub fn recognizes(&self, symptom: &Symptom) -> bool {
        self.table.rule_for(symptom).is_some()
    }

    pub fn compute_diagnosis(&self, symptoms: &[Symptom]) -> DiagnosisResult {
        let matched: Vec<&DiagnosisRule> = symptoms
            .iter()
            .filter_map(|symptom| self.table.rule_for(symptom))
            .collect();

        DiagnosisResult {
            issues: matched.iter().map(|rule| rule.issue.clone()).collect(),
            severity: Severity::default(),
            estimated_cost: matched.iter().map(|rule| rule.cost).sum(),
            recommendations: Vec::new(),
        }
    }

    /// Compute the diagnosis and count the symptoms no rule matched.
    pub fn assess(&self, symptoms: &[Symptom]) -> DiagnosisOutcome {
        DiagnosisOutcome {
            unknown_symptoms: symptoms.iter().filter(|s| !self.recognizes(s)).count(),
            result: self.compute_diagnosis(symptoms),
        }
    }

    pub fn catalogue(&self) -> Vec<CatalogueEntry> {
        self.table
            .rules()
            .iter()
            .map(|rule| CatalogueEntry {
                symptom: rule.symptom.key().to_string(),
                label: rule.symptom.label().to_string(),
                issue: rule.issue.clone(),
                cost: rule.cost,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisOutcome {
    pub result: DiagnosisResult,
    pub unknown_symptoms: usize,
}

/// Entry point shared by the JSON API and the report page: assess the
/// symptoms and record the diagnosis counters.
pub fn run_diagnosis(engine: &DiagnosisEngine, symptoms: &[Symptom]) -> DiagnosisOutcome {
    let outcome = engine.assess(symptoms);
    record_diagnosis(outcome.unknown_symptoms);
    outcome
}

pub fn format_summary(result: &DiagnosisResult) -> String {
    let issues = if result.issues.is_empty() {
        "none".to_string()
    } else {
        result.issues.join(", ")
    };

    format!(
        "Possible issues: {}. Estimated cost: {} {}",
        issues, result.estimated_cost, CURRENCY_SUFFIX
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symptoms(keys: &[&str]) -> Vec<Symptom> {
        keys.iter().map(|key| Symptom::from(*key)).collect()
    }

    fn engine() -> DiagnosisEngine {
        DiagnosisEngine::default()
    }

    #[test]
    fn empty_input_yields_empty_result() {
        assert_eq!(engine().compute_diagnosis(&[]), DiagnosisResult::empty());
    }

    #[test]
    fn single_known_symptom() {
        let result = engine().compute_diagnosis(&symptoms(&["engine_noise"]));

        assert_eq!(
            result,
            DiagnosisResult {
                issues: vec!["Possible timing-belt wear".to_string()],
                severity: Severity::Low,
                estimated_cost: 800,
                recommendations: vec![],
            }
        );
    }

    #[test]
    fn two_symptoms_keep_input_order() {
        let result = engine().compute_diagnosis(&symptoms(&["engine_noise", "oil_leak"]));

        assert_eq!(
            result.issues,
            vec!["Possible timing-belt wear", "Oil loss — check seal"]
        );
        assert_eq!(result.estimated_cost, 1000);
        assert_eq!(result.severity, Severity::Low);
        assert!(result.recommendations.is_empty());

        let reversed = engine().compute_diagnosis(&symptoms(&["oil_leak", "engine_noise"]));
        assert_eq!(
            reversed.issues,
            vec!["Oil loss — check seal", "Possible timing-belt wear"]
        );
    }

    #[test]
    fn unknown_symptom_is_dropped() {
        let result = engine().compute_diagnosis(&symptoms(&["unknown_symptom"]));
        assert_eq!(result, DiagnosisResult::empty());
    }

    #[test]
    fn duplicates_are_counted_each_time() {
        let result = engine().compute_diagnosis(&symptoms(&["oil_leak", "oil_leak"]));

        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.estimated_cost, 400);
    }

    #[test]
    fn cost_and_issue_count_match_recognised_symptoms() {
        let engine = engine();
        let inputs: [&[&str]; 5] = [
            &["engine_noise", "mystery", "oil_leak", "engine_noise"],
            &["brake_noise", "battery_warning", "overheating"],
            &["", "ENGINE_NOISE", "oil leak"],
            &["overheating", "overheating", "noise"],
            &["battery_warning"],
        ];

        for keys in inputs {
            let input = symptoms(keys);
            let result = engine.compute_diagnosis(&input);

            let expected_cost: u64 = input
                .iter()
                .filter_map(|symptom| engine.table.rule_for(symptom))
                .map(|rule| rule.cost)
                .sum();
            let expected_issues = input.iter().filter(|s| engine.recognizes(s)).count();

            assert_eq!(result.estimated_cost, expected_cost, "input {:?}", keys);
            assert_eq!(result.issues.len(), expected_issues, "input {:?}", keys);
            assert_eq!(result.severity, Severity::Low);
            assert!(result.recommendations.is_empty());
        }
    }

    #[test]
    fn computation_is_repeatable() {
        let engine = engine();
        let input = symptoms(&["overheating", "nope", "brake_noise"]);

        assert_eq!(
            engine.compute_diagnosis(&input),
            engine.compute_diagnosis(&input)
        );
    }

    #[test]
    fn custom_table_replaces_duplicate_rules_and_skips_unknown() {
        let table = DiagnosisTable::new([
            DiagnosisRule::new(Symptom::OilLeak, "first", 1),
            DiagnosisRule::new(Symptom::Unknown("rattle".to_string()), "ignored", 99),
            DiagnosisRule::new(Symptom::OilLeak, "second", 2),
        ]);

        assert_eq!(table.rules().len(), 1);
        assert_eq!(table.rule_for(&Symptom::OilLeak).unwrap().issue, "second");
        assert!(table
            .rule_for(&Symptom::Unknown("rattle".to_string()))
            .is_none());

        let engine = DiagnosisEngine::new(table);
        let result = engine.compute_diagnosis(&symptoms(&["engine_noise", "oil_leak"]));
        assert_eq!(result.issues, vec!["second"]);
        assert_eq!(result.estimated_cost, 2);
    }

    #[test]
    fn assess_counts_unmatched_symptoms() {
        let outcome = engine().assess(&symptoms(&["oil_leak", "zzz", "", "oil_leak"]));

        assert_eq!(outcome.unknown_symptoms, 2);
        assert_eq!(outcome.result.estimated_cost, 400);
        assert_eq!(outcome.result.issues.len(), 2);
    }

    #[test]
    fn run_diagnosis_matches_pure_computation() {
        let engine = engine();
        let input = symptoms(&["engine_noise", "mystery"]);

        let outcome = run_diagnosis(&engine, &input);

        assert_eq!(outcome, engine.assess(&input));
        assert_eq!(outcome.result, engine.compute_diagnosis(&input));
    }

    #[test]
    fn catalogue_follows_table_order() {
        let keys: Vec<String> = engine()
            .catalogue()
            .into_iter()
            .map(|entry| entry.symptom)
            .collect();

        assert_eq!(
            keys,
            vec![
                "engine_noise",
                "oil_leak",
                "brake_noise",
                "battery_warning",
                "overheating"
            ]
        );
    }

    #[test]
    fn summary_joins_issues_and_cost() {
        let result = engine().compute_diagnosis(&symptoms(&["engine_noise", "oil_leak"]));

        assert_eq!(
            format_summary(&result),
            "Possible issues: Possible timing-belt wear, Oil loss — check seal. Estimated cost: 1000 €"
        );
    }

    #[test]
    fn summary_for_no_issues() {
        assert_eq!(
            format_summary(&DiagnosisResult::empty()),
            "Possible issues: none. Estimated cost: 0 €"
        );
    }
}

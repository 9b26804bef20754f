// Fair-practice deviation checks
//
// Four independent heuristics, each looking only at the first clause that
// mentions its topic. None of them depend on statutory violations.
use crate::extractors::numeric::extract_day_count;
use crate::patterns::{
    contains_any, find_foreign_jurisdiction, IMMEDIATE_KEYWORD, JURISDICTION_KEYWORDS,
    LIABILITY_KEYWORDS, PAYMENT_KEYWORDS, TERMINATION_KEYWORDS, UNLIMITED_KEYWORD,
};
use shared_types::{Clause, Deviation, DeviationCategory, DeviationLevel, FairBaseline};

/// Industry-standard payment window the explanations compare against
pub const STANDARD_PAYMENT_DAYS: u64 = 30;

/// Payment terms longer than this are a significant deviation
pub const SIGNIFICANT_PAYMENT_DAYS: u64 = 60;

/// Payment terms longer than this are an extreme deviation
pub const EXTREME_PAYMENT_DAYS: u64 = 90;

pub const DEFAULT_PAYMENT_STANDARD: &str = "Net 30 days";
pub const DEFAULT_TERMINATION_STANDARD: &str = "15-30 days written notice";
pub const DEFAULT_LIABILITY_STANDARD: &str = "Capped at contract value";
pub const LOCAL_COURTS_STANDARD: &str = "Local courts";

/// Run all fair-practice checks. Output order: payment, termination,
/// liability, jurisdiction.
pub fn check_fair_practice(clauses: &[Clause], baselines: &[FairBaseline]) -> Vec<Deviation> {
    let mut deviations = Vec::new();

    deviations.extend(check_payment_terms(clauses, baselines));
    deviations.extend(check_termination_notice(clauses, baselines));
    deviations.extend(check_liability_cap(clauses, baselines));
    deviations.extend(check_jurisdiction(clauses));

    deviations
}

/// First clause whose lower-cased text mentions any trigger keyword
fn find_trigger<'a>(clauses: &'a [Clause], triggers: &[&str]) -> Option<(&'a Clause, String)> {
    clauses.iter().find_map(|clause| {
        let text_lower = clause.text.to_lowercase();
        contains_any(&text_lower, triggers).then_some((clause, text_lower))
    })
}

/// Baseline phrasing for a category, or the built-in default
fn fair_standard(baselines: &[FairBaseline], category: DeviationCategory, default: &str) -> String {
    baselines
        .iter()
        .find(|b| b.category == category.baseline_key())
        .map(|b| b.fair_standard.trim())
        .filter(|standard| !standard.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Payment windows beyond Net 60 / Net 90
pub fn check_payment_terms(clauses: &[Clause], baselines: &[FairBaseline]) -> Option<Deviation> {
    let (clause, _) = find_trigger(clauses, PAYMENT_KEYWORDS)?;
    let days = extract_day_count(&clause.text)?;

    let (deviation_level, explanation) = if days > EXTREME_PAYMENT_DAYS {
        (
            DeviationLevel::Extreme,
            format!(
                "Your contract has {}-day payment terms, which is {} days beyond the standard Net {}. \
                 This creates significant cash flow risk for freelancers.",
                days,
                days - STANDARD_PAYMENT_DAYS,
                STANDARD_PAYMENT_DAYS
            ),
        )
    } else if days > SIGNIFICANT_PAYMENT_DAYS {
        (
            DeviationLevel::Significant,
            format!(
                "Payment terms are {} days beyond industry standard.",
                days - STANDARD_PAYMENT_DAYS
            ),
        )
    } else {
        return None;
    };

    Some(Deviation {
        category: DeviationCategory::PaymentTerms,
        found_in_contract: format!("Net {} days", days),
        fair_standard: fair_standard(
            baselines,
            DeviationCategory::PaymentTerms,
            DEFAULT_PAYMENT_STANDARD,
        ),
        deviation_level,
        explanation,
    })
}

/// Termination with no notice period
pub fn check_termination_notice(
    clauses: &[Clause],
    baselines: &[FairBaseline],
) -> Option<Deviation> {
    let (_, text_lower) = find_trigger(clauses, TERMINATION_KEYWORDS)?;
    if !text_lower.contains(IMMEDIATE_KEYWORD) {
        return None;
    }

    Some(Deviation {
        category: DeviationCategory::TerminationNotice,
        found_in_contract: "Immediate termination without notice".to_string(),
        fair_standard: fair_standard(
            baselines,
            DeviationCategory::TerminationNotice,
            DEFAULT_TERMINATION_STANDARD,
        ),
        deviation_level: DeviationLevel::Significant,
        explanation: "Client can terminate instantly without notice period, leaving you without income. \
                      Fair contracts have 15-30 day notice periods."
            .to_string(),
    })
}

/// Uncapped liability or indemnity
pub fn check_liability_cap(clauses: &[Clause], baselines: &[FairBaseline]) -> Option<Deviation> {
    let (_, text_lower) = find_trigger(clauses, LIABILITY_KEYWORDS)?;
    if !text_lower.contains(UNLIMITED_KEYWORD) {
        return None;
    }

    Some(Deviation {
        category: DeviationCategory::LiabilityCap,
        found_in_contract: "Unlimited liability".to_string(),
        fair_standard: fair_standard(
            baselines,
            DeviationCategory::LiabilityCap,
            DEFAULT_LIABILITY_STANDARD,
        ),
        deviation_level: DeviationLevel::Extreme,
        explanation: "You could be forced to pay unlimited damages. \
                      Fair contracts cap liability at the project value."
            .to_string(),
    })
}

/// Disputes routed to a foreign forum
pub fn check_jurisdiction(clauses: &[Clause]) -> Option<Deviation> {
    let (clause, _) = find_trigger(clauses, JURISDICTION_KEYWORDS)?;
    find_foreign_jurisdiction(&clause.text)?;

    Some(Deviation {
        category: DeviationCategory::Jurisdiction,
        found_in_contract: "Foreign jurisdiction (non-local)".to_string(),
        fair_standard: LOCAL_COURTS_STANDARD.to_string(),
        deviation_level: DeviationLevel::Significant,
        explanation: "Disputes must be resolved in foreign courts, which is expensive and impractical \
                      for local freelancers. This heavily favors the client."
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clauses(texts: &[&str]) -> Vec<Clause> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Clause {
                id: i as u32 + 1,
                text: text.to_string(),
                position: i as u32,
            })
            .collect()
    }

    fn payment(days: u32) -> Option<Deviation> {
        let text = format!("Payment is due Net {} days after the invoice date.", days);
        check_payment_terms(&clauses(&[&text]), &[])
    }

    #[test]
    fn test_payment_boundaries() {
        assert_eq!(payment(60), None);
        assert_eq!(
            payment(61).map(|d| d.deviation_level),
            Some(DeviationLevel::Significant)
        );
        assert_eq!(
            payment(91).map(|d| d.deviation_level),
            Some(DeviationLevel::Extreme)
        );
        assert_eq!(payment(30), None);
    }

    #[test]
    fn test_net_90_is_significant_per_threshold_rule() {
        let deviation = check_payment_terms(
            &clauses(&["Payment is due Net 90 days after invoice."]),
            &[],
        )
        .unwrap();
        assert_eq!(deviation.deviation_level, DeviationLevel::Significant);
        assert_eq!(deviation.found_in_contract, "Net 90 days");
        assert_eq!(
            deviation.explanation,
            "Payment terms are 60 days beyond industry standard."
        );
    }

    #[test]
    fn test_extreme_payment_deviation_text() {
        let deviation = payment(120).unwrap();
        assert_eq!(deviation.category, DeviationCategory::PaymentTerms);
        assert_eq!(deviation.found_in_contract, "Net 120 days");
        assert_eq!(deviation.fair_standard, DEFAULT_PAYMENT_STANDARD);
        assert!(deviation.explanation.contains("90 days beyond the standard Net 30"));
    }

    #[test]
    fn test_payment_uses_baseline() {
        let baselines = vec![FairBaseline {
            category: "payment_terms".to_string(),
            fair_standard: "Net 15 days".to_string(),
        }];
        let deviation = check_payment_terms(
            &clauses(&["Invoices are paid within 75 days."]),
            &baselines,
        )
        .unwrap();
        assert_eq!(deviation.fair_standard, "Net 15 days");
        assert_eq!(deviation.deviation_level, DeviationLevel::Significant);
    }

    #[test]
    fn test_blank_baseline_uses_default() {
        let baselines = vec![FairBaseline {
            category: "payment_terms".to_string(),
            fair_standard: "  ".to_string(),
        }];
        let deviation =
            check_payment_terms(&clauses(&["Invoice payable in 100 days."]), &baselines).unwrap();
        assert_eq!(deviation.fair_standard, DEFAULT_PAYMENT_STANDARD);
    }

    #[test]
    fn test_only_first_payment_clause_is_considered() {
        let deviation = check_payment_terms(
            &clauses(&[
                "Payment will be made upon delivery.",
                "Invoices are settled within 120 days.",
            ]),
            &[],
        );
        assert_eq!(deviation, None);
    }

    #[test]
    fn test_immediate_termination() {
        let deviation = check_termination_notice(
            &clauses(&[
                "The Contractor will deliver weekly reports.",
                "Client may TERMINATE this agreement with IMMEDIATE effect.",
            ]),
            &[],
        )
        .unwrap();
        assert_eq!(deviation.category, DeviationCategory::TerminationNotice);
        assert_eq!(deviation.deviation_level, DeviationLevel::Significant);
        assert_eq!(deviation.found_in_contract, "Immediate termination without notice");
        assert_eq!(deviation.fair_standard, DEFAULT_TERMINATION_STANDARD);
    }

    #[test]
    fn test_termination_with_notice_is_fair() {
        let deviation = check_termination_notice(
            &clauses(&["Either party may terminate with 30 days written notice."]),
            &[],
        );
        assert_eq!(deviation, None);
    }

    #[test]
    fn test_unlimited_liability() {
        let deviation = check_liability_cap(
            &clauses(&["The Freelancer shall indemnify the Client with unlimited exposure."]),
            &[FairBaseline {
                category: "liability_cap".to_string(),
                fair_standard: "Capped at fees paid in the last 12 months".to_string(),
            }],
        )
        .unwrap();
        assert_eq!(deviation.deviation_level, DeviationLevel::Extreme);
        assert_eq!(deviation.found_in_contract, "Unlimited liability");
        assert_eq!(deviation.fair_standard, "Capped at fees paid in the last 12 months");
    }

    #[test]
    fn test_capped_liability_is_fair() {
        let deviation = check_liability_cap(
            &clauses(&["Liability is limited to the total fees paid."]),
            &[],
        );
        assert_eq!(deviation, None);
    }

    #[test]
    fn test_foreign_jurisdiction() {
        let deviation = check_jurisdiction(&clauses(&[
            "This Agreement is governed by the laws of the State of California.",
        ]))
        .unwrap();
        assert_eq!(deviation.category, DeviationCategory::Jurisdiction);
        assert_eq!(deviation.found_in_contract, "Foreign jurisdiction (non-local)");
        assert_eq!(deviation.fair_standard, LOCAL_COURTS_STANDARD);
    }

    #[test]
    fn test_foreign_jurisdiction_adjective_forms() {
        for text in [
            "Disputes are subject to the exclusive jurisdiction of Singaporean courts.",
            "This Agreement is governed by Californian law.",
        ] {
            let deviation = check_jurisdiction(&clauses(&[text]));
            assert_eq!(
                deviation.map(|d| d.deviation_level),
                Some(DeviationLevel::Significant),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_local_jurisdiction_is_fair() {
        let deviation = check_jurisdiction(&clauses(&[
            "Courts in Bengaluru shall have exclusive jurisdiction.",
        ]));
        assert_eq!(deviation, None);
    }

    #[test]
    fn test_no_clauses_no_deviations() {
        assert!(check_fair_practice(&[], &[]).is_empty());
    }

    #[test]
    fn test_all_four_in_fixed_order() {
        let deviations = check_fair_practice(
            &clauses(&[
                "Jurisdiction: the courts of Singapore.",
                "Liability of the Contractor is unlimited.",
                "Client may terminate immediately.",
                "Payment is due 95 days from invoice.",
            ]),
            &[],
        );
        let categories: Vec<DeviationCategory> = deviations.iter().map(|d| d.category).collect();
        assert_eq!(
            categories,
            vec![
                DeviationCategory::PaymentTerms,
                DeviationCategory::TerminationNotice,
                DeviationCategory::LiabilityCap,
                DeviationCategory::Jurisdiction,
            ]
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: payment deviation level is a pure function of the day count
        #[test]
        fn payment_level_follows_thresholds(days in 0u32..1000) {
            let clause = Clause {
                id: 1,
                text: format!("Payment terms: Net {} days", days),
                position: 0,
            };
            let level = check_payment_terms(&[clause], &[]).map(|d| d.deviation_level);
            let expected = if days > 90 {
                Some(DeviationLevel::Extreme)
            } else if days > 60 {
                Some(DeviationLevel::Significant)
            } else {
                None
            };
            prop_assert_eq!(level, expected);
        }

        /// Property: at most one deviation per category, on any input
        #[test]
        fn at_most_one_per_category(texts in prop::collection::vec("\\PC{0,80}", 0..10)) {
            let clauses: Vec<Clause> = texts
                .into_iter()
                .enumerate()
                .map(|(i, text)| Clause { id: i as u32 + 1, text, position: i as u32 })
                .collect();
            let deviations = check_fair_practice(&clauses, &[]);
            prop_assert!(deviations.len() <= 4);
            for pair in deviations.windows(2) {
                prop_assert_ne!(pair[0].category, pair[1].category);
            }
        }
    }
}

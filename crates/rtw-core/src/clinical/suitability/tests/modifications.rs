use crate::clinical::suitability::compare::compare_demand_to_capability;
use crate::clinical::suitability::domain::{
    Capability, DemandComparison, DemandFrequency, DemandKind,
};
use crate::clinical::suitability::modifications::suggest_modifications;

fn problem(demand: DemandKind) -> DemandComparison {
    compare_demand_to_capability(demand, DemandFrequency::Frequently, Capability::Cannot)
}

#[test]
fn no_problems_means_no_suggestions() {
    let fine = compare_demand_to_capability(
        DemandKind::Sitting,
        DemandFrequency::Constantly,
        Capability::Can,
    );

    assert!(suggest_modifications(&[], true).is_empty());
    assert!(suggest_modifications(&[fine], true).is_empty());
}

#[test]
fn fixed_duty_gets_single_advisory_regardless_of_problem_count() {
    let many = vec![
        problem(DemandKind::Lifting),
        problem(DemandKind::Bending),
        problem(DemandKind::Twisting),
    ];

    let with_problems = suggest_modifications(&many, false);
    let without_problems = suggest_modifications(&[], false);

    assert_eq!(with_problems.len(), 1);
    assert_eq!(with_problems, without_problems);
    assert!(with_problems[0].contains("cannot be modified"));
}

#[test]
fn takes_two_per_demand_then_general_suggestions() {
    let suggestions = suggest_modifications(&[problem(DemandKind::Lifting)], true);

    assert_eq!(
        suggestions,
        vec![
            "Use mechanical aids (trolleys, hoists, lifting equipment)".to_string(),
            "Redistribute heavy lifting to team members".to_string(),
            "Gradual increase in duties over 2-4 weeks".to_string(),
            "Regular check-ins with supervisor to monitor capacity".to_string(),
        ]
    );
}

#[test]
fn shared_suggestions_appear_once() {
    let suggestions = suggest_modifications(
        &[problem(DemandKind::Lifting), problem(DemandKind::Carrying)],
        true,
    );

    let mechanical_aids = suggestions
        .iter()
        .filter(|suggestion| suggestion.starts_with("Use mechanical aids"))
        .count();
    assert_eq!(mechanical_aids, 1);
    assert_eq!(suggestions.len(), 5);
    assert!(suggestions.contains(&"Reduce carrying distances".to_string()));
}

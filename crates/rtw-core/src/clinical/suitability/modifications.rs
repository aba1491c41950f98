use super::domain::{DemandComparison, DemandKind};

const SUGGESTIONS_PER_DEMAND: usize = 2;

const NOT_MODIFIABLE_ADVISORY: &str =
    "This duty cannot be modified; consider alternative duties that match the worker's current capacity";

const GENERAL_SUGGESTIONS: [&str; 2] = [
    "Gradual increase in duties over 2-4 weeks",
    "Regular check-ins with supervisor to monitor capacity",
];

const MECHANICAL_AIDS: &str = "Use mechanical aids (trolleys, hoists, lifting equipment)";

fn candidates(demand: DemandKind) -> &'static [&'static str] {
    match demand {
        DemandKind::Sitting => &[
            "Provide sit-stand workstation",
            "Allow position changes every 30 minutes",
            "Ergonomic chair assessment",
        ],
        DemandKind::Standing => &[
            "Provide seating or perch stool",
            "Allow seated breaks every 30 minutes",
            "Provide anti-fatigue matting",
        ],
        DemandKind::Walking => &[
            "Relocate tasks to reduce walking distances",
            "Provide transport for longer distances",
        ],
        DemandKind::Bending => &[
            "Raise work surfaces to waist height",
            "Provide long-handled tools",
            "Store frequently used items between knee and shoulder height",
        ],
        DemandKind::Squatting => &[
            "Raise low work to waist height",
            "Provide a low stool for ground-level tasks",
        ],
        DemandKind::Kneeling => &[
            "Provide knee pads or kneeling mat",
            "Reassign ground-level tasks",
        ],
        DemandKind::Twisting => &[
            "Rearrange workstation to keep items in front of the worker",
            "Provide a swivel chair",
        ],
        DemandKind::ReachingOverhead => &[
            "Provide a step platform",
            "Relocate items to below shoulder height",
        ],
        DemandKind::ReachingForward => &[
            "Move frequently used items within close reach",
            "Adjust workstation layout",
        ],
        DemandKind::RepetitiveMovements => &[
            "Introduce task rotation",
            "Schedule micro-breaks every 20-30 minutes",
            "Use powered tools to reduce repetition",
        ],
        DemandKind::Lifting => &[
            MECHANICAL_AIDS,
            "Redistribute heavy lifting to team members",
            "Break loads into smaller weights",
            "Store items at optimal lifting height",
        ],
        DemandKind::Carrying => &[
            MECHANICAL_AIDS,
            "Reduce carrying distances",
            "Split loads into lighter carries",
        ],
        DemandKind::Concentration => &[
            "Provide a quiet work area",
            "Break complex tasks into smaller steps",
        ],
        DemandKind::StressTolerance => &[
            "Reduce time-critical tasks",
            "Provide regular supervisor support",
        ],
        DemandKind::WorkPace => &[
            "Allow self-paced work",
            "Extend deadlines during the graded return",
        ],
    }
}

/// Propose accommodations for the problematic comparisons.
///
/// A duty that cannot be modified gets a single advisory regardless of how many demands are
/// problematic. Otherwise each problem contributes its first two table entries, followed by the
/// general suggestions, with duplicates removed in first-seen order.
pub fn suggest_modifications(comparisons: &[DemandComparison], is_modifiable: bool) -> Vec<String> {
    if !is_modifiable {
        return vec![NOT_MODIFIABLE_ADVISORY.to_string()];
    }

    let problems: Vec<&DemandComparison> = comparisons
        .iter()
        .filter(|comparison| comparison.match_level.is_problem())
        .collect();

    if problems.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<String> = Vec::new();
    let specific = problems.iter().flat_map(|comparison| {
        candidates(comparison.demand)
            .iter()
            .take(SUGGESTIONS_PER_DEMAND)
    });

    for suggestion in specific.chain(GENERAL_SUGGESTIONS.iter()) {
        if !suggestions.iter().any(|existing| existing == suggestion) {
            suggestions.push((*suggestion).to_string());
        }
    }

    suggestions
}

use super::domain::{Capability, DemandComparison, DemandFrequency, DemandKind, SuitabilityLevel};

/// Largest weight gap, in kilograms, that mechanical aids are expected to bridge.
pub const WEIGHT_TOLERANCE_KG: f64 = 5.0;

const KG_EPSILON: f64 = 1e-9;

/// Compare one duty demand against the worker's capability for it.
pub fn compare_demand_to_capability(
    demand: DemandKind,
    frequency: DemandFrequency,
    capability: Capability,
) -> DemandComparison {
    let label = demand.label();

    let (match_level, reason) = match (frequency, capability) {
        (DemandFrequency::Never, _) => (
            SuitabilityLevel::Suitable,
            "Demand not required for this duty".to_string(),
        ),
        (_, Capability::Cannot) => (
            SuitabilityLevel::NotSuitable,
            format!(
                "{label} required {}; worker cannot perform this",
                frequency.label()
            ),
        ),
        (_, Capability::Can) => (
            SuitabilityLevel::Suitable,
            format!("Worker can perform {}", label.to_lowercase()),
        ),
        (DemandFrequency::Occasionally, Capability::WithModifications) => (
            SuitabilityLevel::SuitableWithModification,
            format!("{label} required occasionally; worker can perform with modifications"),
        ),
        (_, Capability::WithModifications) => (
            SuitabilityLevel::NotSuitable,
            format!(
                "{label} required {}; too frequent to modify effectively",
                frequency.label()
            ),
        ),
        (_, Capability::NotAssessed) => (
            SuitabilityLevel::SuitableWithModification,
            format!("{label} capacity not assessed; requires evaluation"),
        ),
    };

    DemandComparison {
        demand,
        frequency,
        capability,
        match_level,
        reason,
    }
}

/// Weight-limited comparison using the default tolerance.
pub fn compare_weight_limit(
    demand: DemandKind,
    duty_max_kg: Option<f64>,
    worker_max_kg: Option<f64>,
    frequency: DemandFrequency,
    capability: Capability,
) -> DemandComparison {
    compare_weight_limit_within(
        demand,
        duty_max_kg,
        worker_max_kg,
        frequency,
        capability,
        WEIGHT_TOLERANCE_KG,
    )
}

/// Weight-limited comparison. Falls back to [`compare_demand_to_capability`] when either side
/// lacks a figure or the demand is never required.
pub fn compare_weight_limit_within(
    demand: DemandKind,
    duty_max_kg: Option<f64>,
    worker_max_kg: Option<f64>,
    frequency: DemandFrequency,
    capability: Capability,
    tolerance_kg: f64,
) -> DemandComparison {
    let (duty_max, worker_max) = match (duty_max_kg, worker_max_kg, frequency) {
        (Some(duty), Some(worker), frequency) if frequency != DemandFrequency::Never => {
            (duty, worker)
        }
        _ => return compare_demand_to_capability(demand, frequency, capability),
    };

    let (match_level, reason) = if worker_max >= duty_max {
        (
            SuitabilityLevel::Suitable,
            format!(
                "Worker limit {} meets duty requirement {}",
                format_kg(worker_max),
                format_kg(duty_max)
            ),
        )
    } else {
        let difference = duty_max - worker_max;
        if difference <= tolerance_kg + KG_EPSILON && frequency == DemandFrequency::Occasionally {
            (
                SuitabilityLevel::SuitableWithModification,
                format!(
                    "Duty requires {} against worker limit {}; mechanical aids can bridge the {} gap",
                    format_kg(duty_max),
                    format_kg(worker_max),
                    format_kg(difference)
                ),
            )
        } else {
            (
                SuitabilityLevel::NotSuitable,
                format!(
                    "Duty requires {} {} against worker limit {}; difference too large to modify safely",
                    format_kg(duty_max),
                    frequency.label(),
                    format_kg(worker_max)
                ),
            )
        }
    };

    DemandComparison {
        demand,
        frequency,
        capability,
        match_level,
        reason,
    }
}

fn format_kg(value: f64) -> String {
    if value.fract().abs() < KG_EPSILON {
        format!("{value:.0}kg")
    } else {
        format!("{value:.1}kg")
    }
}

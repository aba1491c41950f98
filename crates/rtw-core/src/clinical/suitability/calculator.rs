use tracing::debug;

use super::compare::{
    compare_demand_to_capability, compare_weight_limit_within, WEIGHT_TOLERANCE_KG,
};
use super::domain::{
    Capability, DemandComparison, DemandKind, Duty, DutyDemands, FunctionalRestrictions,
    SuitabilityLevel, SuitabilityResult,
};
use super::modifications::suggest_modifications;

/// Thresholds for the suitability aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct SuitabilityPolicy {
    pub weight_tolerance_kg: f64,
    /// Most not-suitable demands a modifiable duty can absorb.
    pub max_modifiable_mismatches: usize,
    pub low_confidence_threshold: f64,
}

impl Default for SuitabilityPolicy {
    fn default() -> Self {
        Self {
            weight_tolerance_kg: WEIGHT_TOLERANCE_KG,
            max_modifiable_mismatches: 3,
            low_confidence_threshold: 0.5,
        }
    }
}

/// Stateless calculator comparing a duty's demands with a worker's restrictions.
#[derive(Debug, Clone, Default)]
pub struct SuitabilityCalculator {
    policy: SuitabilityPolicy,
}

impl SuitabilityCalculator {
    pub fn new(policy: SuitabilityPolicy) -> Self {
        Self { policy }
    }

    pub fn evaluate_duty(
        &self,
        duty: &Duty,
        restrictions: Option<&FunctionalRestrictions>,
    ) -> SuitabilityResult {
        self.calculate(duty.demands.as_ref(), restrictions, duty.is_modifiable)
    }

    pub fn calculate(
        &self,
        demands: Option<&DutyDemands>,
        restrictions: Option<&FunctionalRestrictions>,
        is_modifiable: bool,
    ) -> SuitabilityResult {
        let mut warnings = Vec::new();

        let default_restrictions;
        let (restrictions, confidence) = match restrictions {
            Some(restrictions) => (restrictions, restrictions.confidence()),
            None => {
                warnings.push(
                    "No functional restrictions on file; all capabilities treated as not assessed"
                        .to_string(),
                );
                default_restrictions = FunctionalRestrictions::default();
                (&default_restrictions, 0.0)
            }
        };

        let default_demands;
        let demands = match demands {
            Some(demands) => demands,
            None => {
                warnings.push(
                    "No demand profile recorded for this duty; assuming no physical or cognitive demands"
                        .to_string(),
                );
                default_demands = DutyDemands::default();
                &default_demands
            }
        };

        if confidence < self.policy.low_confidence_threshold {
            warnings.push(format!(
                "Low confidence ({:.0}%): only {} of {} capabilities assessed",
                confidence * 100.0,
                restrictions.assessed_count(),
                FunctionalRestrictions::CAPABILITY_FIELDS
            ));
        }

        let demand_comparisons = self.compare_all(demands, restrictions);

        let not_suitable_count = count(&demand_comparisons, SuitabilityLevel::NotSuitable);
        let modification_count =
            count(&demand_comparisons, SuitabilityLevel::SuitableWithModification);
        let overall_suitability = self.resolve(not_suitable_count, modification_count, is_modifiable);

        let suggested_modifications = if overall_suitability.is_problem() {
            suggest_modifications(&demand_comparisons, is_modifiable)
        } else {
            Vec::new()
        };

        debug!(
            overall = overall_suitability.label(),
            not_suitable_count,
            modification_count,
            confidence,
            "duty suitability calculated"
        );

        SuitabilityResult {
            overall_suitability,
            demand_comparisons,
            not_suitable_count,
            modification_count,
            suggested_modifications,
            confidence,
            warnings,
        }
    }

    fn compare_all(
        &self,
        demands: &DutyDemands,
        restrictions: &FunctionalRestrictions,
    ) -> Vec<DemandComparison> {
        let plain = [
            (DemandKind::Sitting, demands.sitting, restrictions.sitting),
            (DemandKind::Standing, demands.standing, restrictions.standing_walking),
            (DemandKind::Walking, demands.walking, restrictions.standing_walking),
            (DemandKind::Bending, demands.bending, restrictions.bending),
            (DemandKind::Squatting, demands.squatting, restrictions.squatting),
            (DemandKind::Kneeling, demands.kneeling, restrictions.kneeling_climbing),
            (DemandKind::Twisting, demands.twisting, restrictions.twisting),
            (
                DemandKind::ReachingOverhead,
                demands.reaching_overhead,
                restrictions.reaching_overhead,
            ),
            (
                DemandKind::ReachingForward,
                demands.reaching_forward,
                restrictions.reaching_forward,
            ),
            (
                DemandKind::RepetitiveMovements,
                demands.repetitive_movements,
                restrictions.repetitive_movements,
            ),
        ];

        let mut comparisons: Vec<DemandComparison> = plain
            .into_iter()
            .map(|(demand, frequency, capability)| {
                compare_demand_to_capability(demand, frequency, capability)
            })
            .collect();

        comparisons.push(compare_weight_limit_within(
            DemandKind::Lifting,
            demands.lifting_max_kg,
            restrictions.lifting_max_kg,
            demands.lifting,
            restrictions.lifting,
            self.policy.weight_tolerance_kg,
        ));
        comparisons.push(compare_weight_limit_within(
            DemandKind::Carrying,
            demands.carrying_max_kg,
            restrictions.carrying_max_kg,
            demands.carrying,
            restrictions.carrying,
            self.policy.weight_tolerance_kg,
        ));

        // Cognitive capacity is not captured on the restriction side.
        for (demand, frequency) in [
            (DemandKind::Concentration, demands.concentration),
            (DemandKind::StressTolerance, demands.stress_tolerance),
            (DemandKind::WorkPace, demands.work_pace),
        ] {
            comparisons.push(compare_demand_to_capability(
                demand,
                frequency,
                Capability::NotAssessed,
            ));
        }

        comparisons
    }

    fn resolve(
        &self,
        not_suitable_count: usize,
        modification_count: usize,
        is_modifiable: bool,
    ) -> SuitabilityLevel {
        match not_suitable_count {
            0 if modification_count > 0 => SuitabilityLevel::SuitableWithModification,
            0 => SuitabilityLevel::Suitable,
            _ if !is_modifiable => SuitabilityLevel::NotSuitable,
            n if n > self.policy.max_modifiable_mismatches => SuitabilityLevel::NotSuitable,
            _ => SuitabilityLevel::SuitableWithModification,
        }
    }
}

/// Calculate with the default thresholds.
pub fn calculate_duty_suitability(
    demands: Option<&DutyDemands>,
    restrictions: Option<&FunctionalRestrictions>,
    is_modifiable: bool,
) -> SuitabilityResult {
    SuitabilityCalculator::default().calculate(demands, restrictions, is_modifiable)
}

/// Evaluate every duty and keep the workable ones, suitable before suitable-with-modification,
/// preserving catalog order within each tier.
pub fn rank_duties<'a>(
    calculator: &SuitabilityCalculator,
    duties: impl IntoIterator<Item = &'a Duty>,
    restrictions: Option<&FunctionalRestrictions>,
) -> Vec<(&'a Duty, SuitabilityResult)> {
    let mut ranked: Vec<(&Duty, SuitabilityResult)> = duties
        .into_iter()
        .map(|duty| (duty, calculator.evaluate_duty(duty, restrictions)))
        .filter(|(_, result)| result.overall_suitability != SuitabilityLevel::NotSuitable)
        .collect();

    ranked.sort_by_key(|(_, result)| match result.overall_suitability {
        SuitabilityLevel::Suitable => 0,
        SuitabilityLevel::SuitableWithModification => 1,
        SuitabilityLevel::NotSuitable => 2,
    });

    ranked
}

fn count(comparisons: &[DemandComparison], level: SuitabilityLevel) -> usize {
    comparisons
        .iter()
        .filter(|comparison| comparison.match_level == level)
        .count()
}

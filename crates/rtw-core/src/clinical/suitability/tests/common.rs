use crate::clinical::suitability::domain::{
    Capability, DemandFrequency, DemandKind, Duty, DutyDemands, FunctionalRestrictions,
};

pub(super) const ALL_DEMANDS: [DemandKind; 15] = [
    DemandKind::Sitting,
    DemandKind::Standing,
    DemandKind::Walking,
    DemandKind::Bending,
    DemandKind::Squatting,
    DemandKind::Kneeling,
    DemandKind::Twisting,
    DemandKind::ReachingOverhead,
    DemandKind::ReachingForward,
    DemandKind::RepetitiveMovements,
    DemandKind::Lifting,
    DemandKind::Carrying,
    DemandKind::Concentration,
    DemandKind::StressTolerance,
    DemandKind::WorkPace,
];

pub(super) const ALL_CAPABILITIES: [Capability; 4] = [
    Capability::Can,
    Capability::WithModifications,
    Capability::Cannot,
    Capability::NotAssessed,
];

pub(super) const ALL_FREQUENCIES: [DemandFrequency; 4] = [
    DemandFrequency::Never,
    DemandFrequency::Occasionally,
    DemandFrequency::Frequently,
    DemandFrequency::Constantly,
];

pub(super) fn restrictions_all(capability: Capability) -> FunctionalRestrictions {
    FunctionalRestrictions {
        sitting: capability,
        standing_walking: capability,
        bending: capability,
        squatting: capability,
        kneeling_climbing: capability,
        twisting: capability,
        reaching_overhead: capability,
        reaching_forward: capability,
        neck_movement: capability,
        lifting: capability,
        lifting_max_kg: None,
        carrying: capability,
        carrying_max_kg: None,
        pushing: capability,
        pulling: capability,
        repetitive_movements: capability,
        use_of_injured_limb: capability,
    }
}

/// Physical demands only; cognitive demands stay at `Never`.
pub(super) fn physical_demands_all(frequency: DemandFrequency) -> DutyDemands {
    DutyDemands {
        sitting: frequency,
        standing: frequency,
        walking: frequency,
        bending: frequency,
        squatting: frequency,
        kneeling: frequency,
        twisting: frequency,
        reaching_overhead: frequency,
        reaching_forward: frequency,
        lifting: frequency,
        carrying: frequency,
        repetitive_movements: frequency,
        ..DutyDemands::default()
    }
}

pub(super) fn duty(id: &str, demands: Option<DutyDemands>, is_modifiable: bool) -> Duty {
    Duty {
        id: id.to_string(),
        name: format!("Duty {id}"),
        role: Some("Warehouse".to_string()),
        is_modifiable,
        demands,
    }
}

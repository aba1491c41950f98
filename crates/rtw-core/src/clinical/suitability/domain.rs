use serde::{Deserialize, Serialize};

/// Medically assessed ability to perform one physical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Can,
    WithModifications,
    Cannot,
    #[default]
    NotAssessed,
}

impl Capability {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Can => "can",
            Self::WithModifications => "with modifications",
            Self::Cannot => "cannot",
            Self::NotAssessed => "not assessed",
        }
    }
}

/// How often a duty requires an action, using the usual occupational frequency bands
/// (occasionally up to 1/3 of the shift, frequently 1/3 to 2/3, constantly beyond 2/3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandFrequency {
    #[default]
    Never,
    Occasionally,
    Frequently,
    Constantly,
}

impl DemandFrequency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Occasionally => "occasionally",
            Self::Frequently => "frequently",
            Self::Constantly => "constantly",
        }
    }

    /// Accepts the full words as well as the N/O/F/C shorthand used on job demand forms.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "never" | "n" | "none" => Some(Self::Never),
            "occasionally" | "occasional" | "o" => Some(Self::Occasionally),
            "frequently" | "frequent" | "f" => Some(Self::Frequently),
            "constantly" | "constant" | "c" => Some(Self::Constantly),
            _ => None,
        }
    }
}

/// Three-tier verdict. Every suitability computation resolves to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuitabilityLevel {
    Suitable,
    SuitableWithModification,
    NotSuitable,
}

impl SuitabilityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Suitable => "Suitable",
            Self::SuitableWithModification => "Suitable with modification",
            Self::NotSuitable => "Not suitable",
        }
    }

    pub const fn is_problem(self) -> bool {
        !matches!(self, Self::Suitable)
    }
}

/// Demands compared by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandKind {
    Sitting,
    Standing,
    Walking,
    Bending,
    Squatting,
    Kneeling,
    Twisting,
    ReachingOverhead,
    ReachingForward,
    RepetitiveMovements,
    Lifting,
    Carrying,
    Concentration,
    StressTolerance,
    WorkPace,
}

impl DemandKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sitting => "Sitting",
            Self::Standing => "Standing",
            Self::Walking => "Walking",
            Self::Bending => "Bending",
            Self::Squatting => "Squatting",
            Self::Kneeling => "Kneeling",
            Self::Twisting => "Twisting",
            Self::ReachingOverhead => "Reaching Overhead",
            Self::ReachingForward => "Reaching Forward",
            Self::RepetitiveMovements => "Repetitive Movements",
            Self::Lifting => "Lifting",
            Self::Carrying => "Carrying",
            Self::Concentration => "Concentration",
            Self::StressTolerance => "Stress Tolerance",
            Self::WorkPace => "Work Pace",
        }
    }

    pub const fn is_cognitive(self) -> bool {
        matches!(
            self,
            Self::Concentration | Self::StressTolerance | Self::WorkPace
        )
    }
}

/// Worker-side functional restrictions from medical evidence. Missing fields deserialize as
/// `NotAssessed`, never as `Can`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionalRestrictions {
    pub sitting: Capability,
    pub standing_walking: Capability,
    pub bending: Capability,
    pub squatting: Capability,
    pub kneeling_climbing: Capability,
    pub twisting: Capability,
    pub reaching_overhead: Capability,
    pub reaching_forward: Capability,
    pub neck_movement: Capability,
    pub lifting: Capability,
    pub lifting_max_kg: Option<f64>,
    pub carrying: Capability,
    pub carrying_max_kg: Option<f64>,
    pub pushing: Capability,
    pub pulling: Capability,
    pub repetitive_movements: Capability,
    pub use_of_injured_limb: Capability,
}

impl FunctionalRestrictions {
    pub const CAPABILITY_FIELDS: usize = 15;

    pub fn capabilities(&self) -> [Capability; Self::CAPABILITY_FIELDS] {
        [
            self.sitting,
            self.standing_walking,
            self.bending,
            self.squatting,
            self.kneeling_climbing,
            self.twisting,
            self.reaching_overhead,
            self.reaching_forward,
            self.neck_movement,
            self.lifting,
            self.carrying,
            self.pushing,
            self.pulling,
            self.repetitive_movements,
            self.use_of_injured_limb,
        ]
    }

    pub fn assessed_count(&self) -> usize {
        self.capabilities()
            .iter()
            .filter(|capability| **capability != Capability::NotAssessed)
            .count()
    }

    /// Fraction of capability fields with an actual assessment, in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        self.assessed_count() as f64 / Self::CAPABILITY_FIELDS as f64
    }
}

/// Duty-side demand profile. Missing fields deserialize as `Never`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DutyDemands {
    pub sitting: DemandFrequency,
    pub standing: DemandFrequency,
    pub walking: DemandFrequency,
    pub bending: DemandFrequency,
    pub squatting: DemandFrequency,
    pub kneeling: DemandFrequency,
    pub twisting: DemandFrequency,
    pub reaching_overhead: DemandFrequency,
    pub reaching_forward: DemandFrequency,
    pub lifting: DemandFrequency,
    pub lifting_max_kg: Option<f64>,
    pub carrying: DemandFrequency,
    pub carrying_max_kg: Option<f64>,
    pub repetitive_movements: DemandFrequency,
    pub concentration: DemandFrequency,
    pub stress_tolerance: DemandFrequency,
    pub work_pace: DemandFrequency,
}

/// A duty within a role, as held by the duty library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duty {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub is_modifiable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demands: Option<DutyDemands>,
}

/// Per-demand verdict; produced fresh on every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandComparison {
    pub demand: DemandKind,
    pub frequency: DemandFrequency,
    pub capability: Capability,
    pub match_level: SuitabilityLevel,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityResult {
    pub overall_suitability: SuitabilityLevel,
    pub demand_comparisons: Vec<DemandComparison>,
    pub not_suitable_count: usize,
    pub modification_count: usize,
    pub suggested_modifications: Vec<String>,
    pub confidence: f64,
    pub warnings: Vec<String>,
}

impl SuitabilityResult {
    pub fn summary(&self) -> String {
        match self.overall_suitability {
            SuitabilityLevel::Suitable => "suitable as described".to_string(),
            SuitabilityLevel::SuitableWithModification => format!(
                "suitable with modification ({} demand(s) need adjustment, {} exceed capacity)",
                self.modification_count, self.not_suitable_count
            ),
            SuitabilityLevel::NotSuitable => format!(
                "not suitable ({} demand(s) exceed current capacity)",
                self.not_suitable_count
            ),
        }
    }
}

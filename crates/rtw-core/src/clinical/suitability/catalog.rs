//! CSV import for the duty library: one row per duty, demand columns holding frequency words.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::info;

use super::domain::{DemandFrequency, Duty, DutyDemands};

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read duty catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid duty catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("duty {duty_id}: '{value}' is not a demand frequency in column {column}")]
    InvalidFrequency {
        duty_id: String,
        column: &'static str,
        value: String,
    },
    #[error("duty {duty_id}: '{value}' is not a weight in kilograms in column {column}")]
    InvalidWeight {
        duty_id: String,
        column: &'static str,
        value: String,
    },
}

/// Duties loaded from the catalog, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DutyCatalog {
    duties: Vec<Duty>,
}

impl DutyCatalog {
    pub fn new(duties: Vec<Duty>) -> Self {
        Self { duties }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut duties = Vec::new();

        for record in csv_reader.deserialize::<DutyRow>() {
            duties.push(record?.into_duty()?);
        }

        info!(duties = duties.len(), "duty catalog imported");
        Ok(Self { duties })
    }

    pub fn duties(&self) -> &[Duty] {
        &self.duties
    }

    /// Duties whose role matches case-insensitively.
    pub fn for_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a Duty> + 'a {
        self.duties.iter().filter(move |duty| {
            duty.role
                .as_deref()
                .map(|candidate| candidate.eq_ignore_ascii_case(role.trim()))
                .unwrap_or(false)
        })
    }
}

#[derive(Debug, Deserialize)]
struct DutyRow {
    duty_id: String,
    duty_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_modifiable: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sitting: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    standing: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    walking: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bending: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    squatting: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    kneeling: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    twisting: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reaching_overhead: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reaching_forward: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lifting: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lifting_max_kg: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    carrying: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    carrying_max_kg: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    repetitive_movements: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    concentration: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    stress_tolerance: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    work_pace: Option<String>,
}

impl DutyRow {
    fn into_duty(self) -> Result<Duty, CatalogImportError> {
        let is_modifiable = matches!(
            self.is_modifiable
                .as_deref()
                .map(|raw| raw.to_ascii_lowercase())
                .as_deref(),
            Some("true" | "yes" | "y" | "1")
        );

        let frequency_cells = [
            ("sitting", &self.sitting),
            ("standing", &self.standing),
            ("walking", &self.walking),
            ("bending", &self.bending),
            ("squatting", &self.squatting),
            ("kneeling", &self.kneeling),
            ("twisting", &self.twisting),
            ("reaching_overhead", &self.reaching_overhead),
            ("reaching_forward", &self.reaching_forward),
            ("lifting", &self.lifting),
            ("carrying", &self.carrying),
            ("repetitive_movements", &self.repetitive_movements),
            ("concentration", &self.concentration),
            ("stress_tolerance", &self.stress_tolerance),
            ("work_pace", &self.work_pace),
        ];

        // A row with no demand cells at all has no profile, which is not the same as "never".
        let has_profile = frequency_cells.iter().any(|(_, cell)| cell.is_some())
            || self.lifting_max_kg.is_some()
            || self.carrying_max_kg.is_some();

        let demands = if has_profile {
            let frequency = |column: &'static str, cell: &Option<String>| {
                parse_frequency(&self.duty_id, column, cell)
            };
            Some(DutyDemands {
                sitting: frequency("sitting", &self.sitting)?,
                standing: frequency("standing", &self.standing)?,
                walking: frequency("walking", &self.walking)?,
                bending: frequency("bending", &self.bending)?,
                squatting: frequency("squatting", &self.squatting)?,
                kneeling: frequency("kneeling", &self.kneeling)?,
                twisting: frequency("twisting", &self.twisting)?,
                reaching_overhead: frequency("reaching_overhead", &self.reaching_overhead)?,
                reaching_forward: frequency("reaching_forward", &self.reaching_forward)?,
                lifting: frequency("lifting", &self.lifting)?,
                lifting_max_kg: parse_weight(&self.duty_id, "lifting_max_kg", &self.lifting_max_kg)?,
                carrying: frequency("carrying", &self.carrying)?,
                carrying_max_kg: parse_weight(
                    &self.duty_id,
                    "carrying_max_kg",
                    &self.carrying_max_kg,
                )?,
                repetitive_movements: frequency(
                    "repetitive_movements",
                    &self.repetitive_movements,
                )?,
                concentration: frequency("concentration", &self.concentration)?,
                stress_tolerance: frequency("stress_tolerance", &self.stress_tolerance)?,
                work_pace: frequency("work_pace", &self.work_pace)?,
            })
        } else {
            None
        };

        Ok(Duty {
            id: self.duty_id,
            name: self.duty_name,
            role: self.role,
            is_modifiable,
            demands,
        })
    }
}

fn parse_frequency(
    duty_id: &str,
    column: &'static str,
    cell: &Option<String>,
) -> Result<DemandFrequency, CatalogImportError> {
    match cell {
        None => Ok(DemandFrequency::Never),
        Some(value) => {
            DemandFrequency::parse(value).ok_or_else(|| CatalogImportError::InvalidFrequency {
                duty_id: duty_id.to_string(),
                column,
                value: value.clone(),
            })
        }
    }
}

fn parse_weight(
    duty_id: &str,
    column: &'static str,
    cell: &Option<String>,
) -> Result<Option<f64>, CatalogImportError> {
    match cell {
        None => Ok(None),
        Some(value) => value
            .trim_end_matches("kg")
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|kg| kg.is_finite() && *kg >= 0.0)
            .map(Some)
            .ok_or_else(|| CatalogImportError::InvalidWeight {
                duty_id: duty_id.to_string(),
                column,
                value: value.clone(),
            }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

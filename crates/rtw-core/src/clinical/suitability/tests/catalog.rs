use std::io::Cursor;

use crate::clinical::suitability::catalog::{CatalogImportError, DutyCatalog};
use crate::clinical::suitability::domain::DemandFrequency;

const CATALOG: &str = "\
duty_id,duty_name,role,is_modifiable,sitting,standing,walking,bending,squatting,kneeling,twisting,reaching_overhead,reaching_forward,lifting,lifting_max_kg,carrying,carrying_max_kg,repetitive_movements,concentration,stress_tolerance,work_pace
D1,Stock picking,Warehouse,yes,,F,F,O,,,O,,O,O,15,O,10kg,F,,,O
D2,Inventory count,Warehouse,no,O,O,O,,,,,,,,,,,,F,,
D3,Reception cover,Front desk,true,,,,,,,,,,,,,,,,,
";

#[test]
fn parses_duties_with_frequency_shorthand_and_weights() {
    let catalog = DutyCatalog::from_reader(Cursor::new(CATALOG)).expect("catalog parses");

    let duties = catalog.duties();
    assert_eq!(duties.len(), 3);

    let picking = &duties[0];
    assert!(picking.is_modifiable);
    let demands = picking.demands.as_ref().expect("profile present");
    assert_eq!(demands.standing, DemandFrequency::Frequently);
    assert_eq!(demands.bending, DemandFrequency::Occasionally);
    assert_eq!(demands.sitting, DemandFrequency::Never);
    assert_eq!(demands.lifting_max_kg, Some(15.0));
    assert_eq!(demands.carrying_max_kg, Some(10.0));

    assert!(!duties[1].is_modifiable);
    assert_eq!(
        duties[1].demands.as_ref().expect("profile").concentration,
        DemandFrequency::Frequently
    );
}

#[test]
fn row_without_demand_cells_has_no_profile() {
    let catalog = DutyCatalog::from_reader(Cursor::new(CATALOG)).expect("catalog parses");

    assert!(catalog.duties()[2].demands.is_none());
}

#[test]
fn filters_by_role_case_insensitively() {
    let catalog = DutyCatalog::from_reader(Cursor::new(CATALOG)).expect("catalog parses");

    let ids: Vec<&str> = catalog
        .for_role("warehouse")
        .map(|duty| duty.id.as_str())
        .collect();

    assert_eq!(ids, vec!["D1", "D2"]);
}

#[test]
fn rejects_unknown_frequency_words() {
    let csv = "duty_id,duty_name,bending\nD9,Sweeping,sometimes\n";

    match DutyCatalog::from_reader(Cursor::new(csv)) {
        Err(CatalogImportError::InvalidFrequency {
            duty_id,
            column,
            value,
        }) => {
            assert_eq!(duty_id, "D9");
            assert_eq!(column, "bending");
            assert_eq!(value, "sometimes");
        }
        other => panic!("expected invalid frequency, got {other:?}"),
    }
}

#[test]
fn rejects_negative_weights() {
    let csv = "duty_id,duty_name,lifting,lifting_max_kg\nD9,Loading,O,-4\n";

    assert!(matches!(
        DutyCatalog::from_reader(Cursor::new(csv)),
        Err(CatalogImportError::InvalidWeight { .. })
    ));
}

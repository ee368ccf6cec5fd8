//! End-to-end scenarios through the session, store and file interchange.

use calc_core::code_tables::{CodeVersion, OccupancyClass};
use calc_core::file_io::{
    delete_named_project, list_named_projects, load_named_project, save_named_project,
};
use calc_core::project::{BuildingState, Project};
use calc_core::store::HISTORY_KEY;
use calc_core::validation::InputDraft;
use calc_core::{
    load_session, save_session, CalcError, CalculationOutcome, CalculationResult, CalculatorConfig, FileStore,
    MemoryStore, SanityDecision, Session, Store, UnitSystem,
};

fn business_draft(sprinklered: bool) -> InputDraft {
    InputDraft {
        state: Some("Texas".to_string()),
        code_version: Some(CodeVersion::Ibc2021),
        occupancy: Some(OccupancyClass::Business),
        floor_area: Some(10_000.0),
        sprinklered: Some(sprinklered),
        travel_distance: None,
        exit_doors: Some(2),
    }
}

fn run(session: &mut Session) -> CalculationResult {
    match session.run_calculation(|_| SanityDecision::Proceed).unwrap() {
        CalculationOutcome::Completed(result) => result,
        CalculationOutcome::Cancelled(w) => panic!("unexpected cancel: {}", w),
    }
}

#[test]
fn business_sprinklered() {
    let mut session = Session::default();
    session.edit_inputs(&business_draft(true));
    let result = run(&mut session);
    assert_eq!(result.occupant_load, 67);
    assert_eq!(result.stair_width_in, 14);
    assert_eq!(result.other_width_in, 11);
}

#[test]
fn business_unsprinklered() {
    let mut session = Session::default();
    session.edit_inputs(&business_draft(false));
    let result = run(&mut session);
    assert_eq!(result.occupant_load, 67);
    assert_eq!(result.stair_width_in, 21);
    assert_eq!(result.other_width_in, 14);
}

#[test]
fn advanced_door_width_floor() {
    let mut session = Session::default();
    session.project.set_show_advanced(true);
    session.edit_inputs(&business_draft(true));
    let result = run(&mut session);
    assert_eq!(result.total_exit_width_in, Some(11));
    assert_eq!(result.door_width_in, Some(32));
}

#[test]
fn older_edition_uses_older_factor() {
    let mut session = Session::default();
    let mut draft = business_draft(true);
    draft.code_version = Some(CodeVersion::Ibc2015);
    session.edit_inputs(&draft);
    // 10,000 / 100
    assert_eq!(run(&mut session).occupant_load, 100);
}

#[test]
fn metric_entry() {
    let mut session = Session::default();
    session.project.set_units(UnitSystem::Metric);
    let mut draft = business_draft(true);
    draft.floor_area = Some(929.03);
    session.edit_inputs(&draft);
    let result = run(&mut session);
    // 929.03 sq. m at 150 x 0.092903 sq. m per person
    assert_eq!(result.occupant_load, 67);
    assert_eq!(result.input.units, UnitSystem::Metric);
}

#[test]
fn fifty_one_calculations_evict_the_first() {
    let mut session = Session::default();
    session.edit_inputs(&business_draft(true));
    for i in 1..=51 {
        session.project.rename(format!("Run {}", i));
        run(&mut session);
    }
    let entries = session.history.entries();
    assert_eq!(entries.len(), 50);
    assert_eq!(entries[0].project_name, "Run 51");
    assert!(entries.iter().all(|e| e.project_name != "Run 1"));
}

#[test]
fn buildings_keep_their_own_inputs_and_results() {
    let mut session = Session::default();
    session.edit_inputs(&business_draft(true));
    run(&mut session);

    session.project.add_building();
    session.edit_inputs(&InputDraft {
        floor_area: Some(3_000.0),
        ..InputDraft::default()
    });
    assert_eq!(session.project.current_building().state(), BuildingState::HasInputs);

    session.project.select_building(0).unwrap();
    let first = session.project.current_building();
    assert_eq!(first.state(), BuildingState::HasResult);
    assert_eq!(first.results.as_ref().unwrap().occupant_load, 67);

    assert!(session.project.next_building());
    assert_eq!(session.project.current_building().inputs.floor_area, Some(3_000.0));
}

#[test]
fn import_missing_buildings_leaves_project_unchanged() {
    let mut session = Session::default();
    session.project.rename("Active");
    session.edit_inputs(&business_draft(true));
    run(&mut session);
    let before = session.project.clone();

    let err = session.import_project(r#"{ "name": "Incoming", "version": "2.0" }"#).unwrap_err();
    assert!(matches!(err, CalcError::MalformedImport { .. }));
    assert_eq!(session.project, before);
}

#[test]
fn stored_project_with_bad_index_is_repaired() {
    let mut value = serde_json::to_value(Project::new("Depot")).unwrap();
    value["current_building_index"] = serde_json::json!(7);
    value["buildings"] = serde_json::json!([]);
    let project: Project = serde_json::from_value(value).unwrap();

    let mut session = Session::default();
    session.replace_project(project);
    assert_eq!(session.project.building_count(), 1);
    assert_eq!(session.project.current_building_ordinal(), 1);
    assert!(session.summary().is_none());

    session.edit_inputs(&business_draft(true));
    assert_eq!(run(&mut session).occupant_load, 67);
}

#[test]
fn session_survives_restart_in_memory() {
    let mut store = MemoryStore::new();
    let mut session = Session::default();
    session.project.rename("Warehouse");
    session.edit_inputs(&business_draft(true));
    run(&mut session);
    session.project.add_building();
    save_session(&mut store, &session).unwrap();

    let restored = load_session(&store, CalculatorConfig::default());
    assert_eq!(restored.project.name, "Warehouse");
    assert_eq!(restored.project.building_count(), 2);
    assert_eq!(restored.project.current_building_index(), 1);
    assert_eq!(restored.history.len(), 1);
    assert_eq!(restored.history.entries()[0].summary.occupant_load, 67);
    assert!(store.get(HISTORY_KEY).unwrap().is_some());
}

#[test]
fn session_and_projects_on_disk() {
    let dir = std::env::temp_dir().join(format!("egress_calc_scenario_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let mut store = FileStore::open(&dir).unwrap();

    let mut session = Session::default();
    session.project.rename("North Wing");
    session.edit_inputs(&business_draft(false));
    run(&mut session);

    save_session(&mut store, &session).unwrap();
    save_named_project(&mut store, &session.project, false).unwrap();
    assert!(matches!(
        save_named_project(&mut store, &session.project, false),
        Err(CalcError::ProjectExists { .. })
    ));

    let reopened = FileStore::open(&dir).unwrap();
    let restored = load_session(&reopened, CalculatorConfig::default());
    assert_eq!(restored.project.name, "North Wing");
    assert_eq!(restored.history.len(), 1);

    assert_eq!(list_named_projects(&reopened).unwrap(), vec!["North Wing".to_string()]);
    let project = load_named_project(&reopened, "North Wing", UnitSystem::Imperial, false).unwrap();
    assert_eq!(project.buildings()[0].results.as_ref().unwrap().stair_width_in, 21);

    delete_named_project(&mut store, "North Wing").unwrap();
    assert!(list_named_projects(&store).unwrap().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

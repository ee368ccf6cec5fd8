//! # Egress Calculator CLI
//!
//! Command-line front end for `calc_core`. Every invocation loads the saved
//! session from the data directory, applies one command, and saves the
//! session back.
//!
//! ```text
//! egress calc --state Texas --code 2021 --occupancy business --area 10000 --sprinklered yes
//! egress building add
//! egress advanced on
//! egress calc --doors 2
//! egress report --save
//! ```

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use calc_core::code_tables::{
    canonical_jurisdiction, lookup_load_factor, AreaType, CodeTable, CodeVersion, OccupancyClass,
};
use calc_core::file_io::{
    delete_named_project, export_file_name, list_named_projects, load_named_project, save_named_project,
};
use calc_core::project::BuildingState;
use calc_core::report::{code_references, jurisdiction_notice, summary_file_name};
use calc_core::units::{convert, format_area, format_width, Direction, QuantityKind};
use calc_core::validation::InputDraft;
use calc_core::{
    load_config, load_session, save_session, CalcError, CalcResult, CalculationOutcome, CalculationResult,
    FileStore, MemoryStore, SanityDecision, Session, Store, UnitSystem,
};

#[derive(Parser)]
#[command(name = "egress")]
#[command(about = "Occupant load and means-of-egress width calculator", long_about = None)]
struct Cli {
    /// Directory holding the saved session and named projects
    #[arg(long, global = true, default_value = ".egress-calc")]
    data_dir: PathBuf,

    /// Configuration file (defaults to <data-dir>/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the current building's inputs and calculate
    Calc {
        #[command(flatten)]
        inputs: InputArgs,
        /// Proceed past the floor area plausibility warning without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Update the current building's inputs without calculating
    Input {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Show the open project and current building
    Status,
    /// Manage buildings in the open project
    #[command(subcommand)]
    Building(BuildingCommands),
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),
    /// Change the unit system
    #[command(subcommand)]
    Units(UnitsCommands),
    /// Turn advanced mode (door width, total exit width) on or off
    Advanced {
        #[arg(value_enum)]
        mode: Switch,
    },
    /// Show or clear the calculation history
    #[command(subcommand)]
    History(HistoryCommands),
    /// Print the occupant load factor table
    Tables,
    /// Print the calculation summary for the current building
    Report {
        /// Also write it to egress_summary_<timestamp>.txt
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand)]
enum BuildingCommands {
    /// Add an empty building and make it current
    Add,
    /// Make building N current (1-based)
    Select { number: usize },
    /// Move to the next building
    Next,
    /// Move to the previous building
    Prev,
    /// Remove building N (1-based)
    Remove { number: usize },
    /// Rename building N (1-based)
    Rename { number: usize, name: String },
    /// List buildings
    List,
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Start a new project with one empty building
    New { name: Option<String> },
    /// Rename the open project
    Rename { name: String },
    /// Save the open project under its name
    Save {
        /// Replace a saved project with the same name without asking
        #[arg(long)]
        overwrite: bool,
    },
    /// Open a saved project
    Load { name: String },
    /// List saved projects
    List,
    /// Delete a saved project
    Delete { name: String },
    /// Write the open project to a JSON file
    Export {
        /// Output path (defaults to egress_project_<timestamp>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the open project with one read from a JSON file
    Import { path: PathBuf },
}

#[derive(Subcommand)]
enum UnitsCommands {
    /// Switch between imperial and metric
    Toggle,
    /// Set the unit system (imperial or metric)
    Set { units: String },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Show recent calculations
    Show {
        /// Show every stored entry
        #[arg(long)]
        all: bool,
    },
    /// Delete all history entries
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

/// Form fields. Anything left out keeps its stored value.
#[derive(Args, Default)]
struct InputArgs {
    /// State or jurisdiction (e.g. Texas)
    #[arg(long)]
    state: Option<String>,
    /// IBC edition: 2021, 2018, 2015 or 2012
    #[arg(long = "code")]
    code_version: Option<String>,
    /// Occupancy classification (e.g. business, mercantile, standing)
    #[arg(long)]
    occupancy: Option<String>,
    /// Floor area in the active units
    #[arg(long, allow_negative_numbers = true)]
    area: Option<f64>,
    /// Automatic sprinkler system: yes or no
    #[arg(long)]
    sprinklered: Option<String>,
    /// Maximum exit access travel distance in the active units
    #[arg(long, allow_negative_numbers = true)]
    travel_distance: Option<f64>,
    /// Number of exit doors (advanced mode)
    #[arg(long)]
    doors: Option<u32>,
}

impl InputArgs {
    fn to_draft(&self) -> CalcResult<InputDraft> {
        Ok(InputDraft {
            state: self.state.clone(),
            code_version: self.code_version.as_deref().map(CodeVersion::from_str_flexible).transpose()?,
            occupancy: self.occupancy.as_deref().map(OccupancyClass::from_str_flexible).transpose()?,
            floor_area: self.area,
            sprinklered: self.sprinklered.as_deref().map(parse_yes_no).transpose()?,
            travel_distance: self.travel_distance,
            exit_doors: self.doors,
        })
    }
}

fn parse_yes_no(s: &str) -> CalcResult<bool> {
    match s.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => Err(CalcError::invalid_input("sprinklered", other, "Answer yes or no")),
    }
}

/// Ask a yes/no question on stdin. Anything but "y"/"yes" is no.
fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Convert a 1-based building number to an index. Errors report the number
/// as typed.
fn building_index(number: usize, count: usize) -> CalcResult<usize> {
    if number == 0 || number > count {
        return Err(CalcError::BuildingNotFound { index: number, count });
    }
    Ok(number - 1)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// The on-disk store, or an in-memory one when the directory is unusable.
fn open_store(data_dir: &Path) -> Box<dyn Store> {
    match FileStore::open(data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "storage unavailable, changes will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CalcResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(|| cli.data_dir.join("config.json"));
    let config = load_config(&config_path)?;

    let mut store = open_store(&cli.data_dir);
    let mut session = load_session(store.as_ref(), config);

    let result = dispatch(&cli, &mut session, store.as_mut());

    // Persist whatever state the command left, even after a rejection
    if let Err(e) = save_session(store.as_mut(), &session) {
        warn!(error = %e, "could not save session");
    }
    result
}

fn dispatch(cli: &Cli, session: &mut Session, store: &mut dyn Store) -> CalcResult<()> {
    match &cli.command {
        Commands::Calc { inputs, yes } => cmd_calc(session, inputs, *yes, cli.json),
        Commands::Input { inputs } => {
            session.edit_inputs(&inputs.to_draft()?);
            print_status(session, cli.json)
        }
        Commands::Status => print_status(session, cli.json),
        Commands::Building(cmd) => cmd_building(session, cmd),
        Commands::Project(cmd) => cmd_project(session, store, cmd),
        Commands::Units(cmd) => {
            let units = match cmd {
                UnitsCommands::Toggle => session.project.toggle_units(),
                UnitsCommands::Set { units } => {
                    let units = UnitSystem::from_str_flexible(units)?;
                    session.project.set_units(units);
                    units
                }
            };
            println!("Units: {}", units);
            Ok(())
        }
        Commands::Advanced { mode } => {
            let on = matches!(mode, Switch::On);
            session.project.set_show_advanced(on);
            println!("Advanced mode: {}", if on { "on" } else { "off" });
            Ok(())
        }
        Commands::History(cmd) => cmd_history(session, cmd, cli.json),
        Commands::Tables => print_tables(session.project.units, cli.json),
        Commands::Report { save } => cmd_report(session, *save),
    }
}

// ============================================================================
// Calculation
// ============================================================================

fn cmd_calc(session: &mut Session, inputs: &InputArgs, yes: bool, json: bool) -> CalcResult<()> {
    session.edit_inputs(&inputs.to_draft()?);

    if let Some(state) = &session.project.current_building().inputs.state {
        if canonical_jurisdiction(state).is_none() {
            warn!(state = %state, "jurisdiction is not in the state list");
        }
    }

    let outcome = session.run_calculation(|warning| {
        if yes {
            SanityDecision::Proceed
        } else if confirm(&format!("{} Continue?", warning)) {
            SanityDecision::Proceed
        } else {
            SanityDecision::Cancel
        }
    })?;

    match outcome {
        CalculationOutcome::Completed(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(session, &result);
            }
        }
        CalculationOutcome::Cancelled(_) => println!("Calculation cancelled."),
    }
    Ok(())
}

fn print_result(session: &Session, result: &CalculationResult) {
    let units = result.input.units;
    println!("═══════════════════════════════════════");
    println!(
        "  {} - Building {} of {}",
        session.project.display_name(),
        session.project.current_building_ordinal(),
        session.project.building_count()
    );
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Jurisdiction: {}", result.input.state);
    println!("  Code:         IBC {}", result.input.code_version);
    println!("  Occupancy:    {}", result.input.occupancy);
    println!(
        "  Floor area:   {} ({})",
        format_area(result.input.floor_area, units),
        result.area_type
    );
    println!(
        "  Load factor:  {:.2} {}/occupant",
        result.occupant_load_factor,
        units.area_label()
    );
    println!("  Sprinklered:  {}", if result.input.sprinklered { "Yes" } else { "No" });
    println!();
    println!("Results:");
    println!("  Occupant load:          {} occupants", result.occupant_load);
    println!("  Stair width:            {}", format_width(result.stair_width_in, units));
    println!("  Other components width: {}", format_width(result.other_width_in, units));
    if let (Some(door), Some(total)) = (result.door_width_in, result.total_exit_width_in) {
        println!("  Minimum door width:     {}", format_width(door, units));
        println!("  Total exit width:       {}", format_width(total, units));
    }
    println!();
    println!("{}", jurisdiction_notice(&result.input.state));
    println!();
    for reference in code_references(result) {
        println!("  {}", reference.citation());
    }
}

// ============================================================================
// Status
// ============================================================================

#[derive(Serialize)]
struct StatusView<'a> {
    project: &'a str,
    building: usize,
    building_count: usize,
    building_name: &'a str,
    state: BuildingState,
    units: UnitSystem,
    advanced: bool,
    inputs: &'a InputDraft,
    area_type: Option<AreaType>,
}

/// Gross or net, once the edition and occupancy are both chosen.
fn area_type_for(inputs: &InputDraft) -> Option<AreaType> {
    let (_, area_type) = lookup_load_factor(inputs.code_version?, inputs.occupancy?).ok()?;
    Some(area_type)
}

fn print_status(session: &Session, json: bool) -> CalcResult<()> {
    let project = &session.project;
    let building = project.current_building();
    let view = StatusView {
        project: project.display_name(),
        building: project.current_building_ordinal(),
        building_count: project.building_count(),
        building_name: &building.name,
        state: building.state(),
        units: project.units,
        advanced: project.show_advanced,
        inputs: &building.inputs,
        area_type: area_type_for(&building.inputs),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let dash = "-".to_string();
    let inputs = view.inputs;
    println!("Project:  {}", view.project);
    println!("Building: {} of {} ({})", view.building, view.building_count, view.building_name);
    println!("Units:    {}   Advanced: {}", view.units, if view.advanced { "on" } else { "off" });
    println!();
    println!("  State:           {}", inputs.state.as_ref().unwrap_or(&dash));
    println!(
        "  Code version:    {}",
        inputs.code_version.map(|v| v.to_string()).unwrap_or_else(|| dash.clone())
    );
    println!(
        "  Occupancy:       {}",
        inputs.occupancy.map(|o| o.to_string()).unwrap_or_else(|| dash.clone())
    );
    println!(
        "  Floor area:      {}",
        inputs.floor_area.map(|a| format_area(a, view.units)).unwrap_or_else(|| dash.clone())
    );
    if let Some(area_type) = view.area_type {
        println!("  Area type:       {}. {}", area_type, area_type.description());
    }
    println!(
        "  Sprinklered:     {}",
        inputs
            .sprinklered
            .map(|s| if s { "Yes" } else { "No" }.to_string())
            .unwrap_or_else(|| dash.clone())
    );
    if let Some(d) = inputs.travel_distance {
        println!("  Travel distance: {} {}", d, view.units.distance_label());
    }
    if view.advanced {
        println!(
            "  Exit doors:      {}",
            inputs.exit_doors.map(|d| d.to_string()).unwrap_or_else(|| dash.clone())
        );
    }
    Ok(())
}

// ============================================================================
// Buildings
// ============================================================================

fn cmd_building(session: &mut Session, cmd: &BuildingCommands) -> CalcResult<()> {
    let project = &mut session.project;
    match cmd {
        BuildingCommands::Add => {
            project.add_building();
            println!("Added {}", project.current_building().name);
        }
        BuildingCommands::Select { number } => {
            let index = building_index(*number, project.building_count())?;
            let building = project.select_building(index)?;
            println!("Now on {}", building.name);
        }
        BuildingCommands::Next => {
            if !project.next_building() {
                println!("Already on the last building.");
            }
            println!("Now on {}", project.current_building().name);
        }
        BuildingCommands::Prev => {
            if !project.previous_building() {
                println!("Already on the first building.");
            }
            println!("Now on {}", project.current_building().name);
        }
        BuildingCommands::Remove { number } => {
            let index = building_index(*number, project.building_count())?;
            let removed = project.remove_building(index)?;
            println!("Removed {}", removed.name);
        }
        BuildingCommands::Rename { number, name } => {
            let index = building_index(*number, project.building_count())?;
            project.rename_building(index, name.clone())?;
        }
        BuildingCommands::List => {
            for (i, building) in project.buildings().iter().enumerate() {
                let marker = if i == project.current_building_index() { "*" } else { " " };
                let summary = match &building.results {
                    Some(r) => format!("{} occupants", r.occupant_load),
                    None => format!("{:?}", building.state()),
                };
                println!("{} {}. {} ({})", marker, i + 1, building.name, summary);
            }
        }
    }
    Ok(())
}

// ============================================================================
// Projects
// ============================================================================

fn cmd_project(session: &mut Session, store: &mut dyn Store, cmd: &ProjectCommands) -> CalcResult<()> {
    match cmd {
        ProjectCommands::New { name } => {
            session.new_project(name.clone().unwrap_or_default());
            println!("Started {}", session.project.display_name());
        }
        ProjectCommands::Rename { name } => session.project.rename(name.clone()),
        ProjectCommands::Save { overwrite } => match save_named_project(store, &session.project, *overwrite) {
            Err(CalcError::ProjectExists { name }) => {
                if confirm(&format!("Project \"{}\" already exists. Overwrite?", name)) {
                    save_named_project(store, &session.project, true)?;
                    println!("Saved {}", name);
                } else {
                    println!("Not saved.");
                }
            }
            Err(e) => return Err(e),
            Ok(()) => println!("Saved {}", session.project.name.trim()),
        },
        ProjectCommands::Load { name } => {
            let project = load_named_project(store, name, session.project.units, session.project.show_advanced)?;
            session.replace_project(project);
            println!("Opened {}", session.project.display_name());
        }
        ProjectCommands::List => {
            let names = list_named_projects(store)?;
            if names.is_empty() {
                println!("No saved projects.");
            }
            for name in names {
                println!("{}", name);
            }
        }
        ProjectCommands::Delete { name } => {
            delete_named_project(store, name)?;
            println!("Deleted {}", name);
        }
        ProjectCommands::Export { output } => {
            let path = output.clone().unwrap_or_else(|| PathBuf::from(export_file_name(Utc::now())));
            let json = session.export_project()?;
            fs::write(&path, json)
                .map_err(|e| CalcError::file_error("write", path.display().to_string(), e.to_string()))?;
            println!("Exported to {}", path.display());
        }
        ProjectCommands::Import { path } => {
            let json = fs::read_to_string(path)
                .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
            session.import_project(&json)?;
            println!(
                "Imported {} ({} buildings)",
                session.project.display_name(),
                session.project.building_count()
            );
        }
    }
    Ok(())
}

// ============================================================================
// History, Tables, Report
// ============================================================================

fn cmd_history(session: &mut Session, cmd: &HistoryCommands, json: bool) -> CalcResult<()> {
    match cmd {
        HistoryCommands::Show { all } => {
            let entries = if *all {
                session.history.entries()
            } else {
                session.recent_history()
            };
            if json {
                println!("{}", serde_json::to_string_pretty(entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("No calculations yet.");
            }
            for entry in entries {
                println!("{}", entry.title());
                println!(
                    "  {} / IBC {} / {}: {} occupants, stair {}, other {}",
                    entry.input.state,
                    entry.input.code_version,
                    entry.input.occupancy,
                    entry.summary.occupant_load,
                    format_width(entry.summary.stair_width_in, entry.units),
                    format_width(entry.summary.other_width_in, entry.units),
                );
            }
        }
        HistoryCommands::Clear => {
            session.history.clear();
            println!("History cleared.");
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct TableRow {
    code_version: CodeVersion,
    occupancy: OccupancyClass,
    load_factor: f64,
    area_type: AreaType,
    units: UnitSystem,
}

fn table_rows(table: &CodeTable, units: UnitSystem) -> Vec<TableRow> {
    table
        .rows()
        .into_iter()
        .map(|row| TableRow {
            code_version: row.code_version,
            occupancy: row.occupancy,
            load_factor: match units {
                UnitSystem::Imperial => row.load_factor_sqft,
                UnitSystem::Metric => convert(row.load_factor_sqft, QuantityKind::Area, Direction::ToMetric),
            },
            area_type: row.area_type,
            units,
        })
        .collect()
}

fn print_tables(units: UnitSystem, json: bool) -> CalcResult<()> {
    let table = CodeTable::standard();
    if json {
        println!("{}", serde_json::to_string_pretty(&table_rows(table, units))?);
        return Ok(());
    }

    let label = format!("{}/occupant", units.area_label());

    print!("{:<30}", "Occupancy");
    for version in CodeVersion::ALL {
        print!("{:>10}", format!("IBC {}", version));
    }
    println!("  Area");

    for occupancy in OccupancyClass::ALL {
        print!("{:<30}", occupancy.display_name());
        let mut area_type = None;
        for version in CodeVersion::ALL {
            match table.load_factor_for_units(version, occupancy, units) {
                Ok((factor, kind)) => {
                    area_type = Some(kind);
                    print!("{:>10.2}", factor);
                }
                Err(_) => print!("{:>10}", "-"),
            }
        }
        println!("  {}", area_type.map(|a| a.to_string()).unwrap_or_default());
    }
    println!();
    println!("Factors in {}", label);
    Ok(())
}

fn cmd_report(session: &Session, save: bool) -> CalcResult<()> {
    let summary = session.summary().ok_or_else(|| {
        CalcError::missing_field("results", "Run a calculation for this building first")
    })?;
    println!("{}", summary);

    if save {
        let path = PathBuf::from(summary_file_name(Utc::now()));
        fs::write(&path, &summary)
            .map_err(|e| CalcError::file_error("write", path.display().to_string(), e.to_string()))?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_input_args_to_draft() {
        let args = InputArgs {
            state: Some("Texas".to_string()),
            code_version: Some("IBC 2018".to_string()),
            occupancy: Some("mercantile".to_string()),
            area: Some(2_500.0),
            sprinklered: Some("no".to_string()),
            travel_distance: None,
            doors: Some(2),
        };
        let draft = args.to_draft().unwrap();
        assert_eq!(draft.code_version, Some(CodeVersion::Ibc2018));
        assert_eq!(draft.occupancy, Some(OccupancyClass::Mercantile));
        assert_eq!(draft.sprinklered, Some(false));
        assert_eq!(draft.exit_doors, Some(2));
    }

    #[test]
    fn test_bad_sprinkler_answer() {
        let args = InputArgs {
            sprinklered: Some("maybe".to_string()),
            ..InputArgs::default()
        };
        assert!(args.to_draft().is_err());
    }

    #[test]
    fn test_area_type_needs_edition_and_occupancy() {
        let mut draft = InputDraft {
            occupancy: Some(OccupancyClass::Business),
            ..InputDraft::default()
        };
        assert_eq!(area_type_for(&draft), None);

        draft.code_version = Some(CodeVersion::Ibc2021);
        assert_eq!(area_type_for(&draft), Some(AreaType::Gross));
    }

    #[test]
    fn test_table_rows_follow_units() {
        let table = CodeTable::standard();
        let imperial = table_rows(table, UnitSystem::Imperial);
        let metric = table_rows(table, UnitSystem::Metric);
        assert_eq!(imperial.len(), table.len());
        assert_eq!(metric.len(), table.len());

        let business = imperial
            .iter()
            .position(|r| r.code_version == CodeVersion::Ibc2021 && r.occupancy == OccupancyClass::Business)
            .unwrap();
        assert_eq!(imperial[business].load_factor, 150.0);
        assert!((metric[business].load_factor - 13.93545).abs() < 1e-9);
    }

    #[test]
    fn test_building_numbers_are_one_based() {
        assert_eq!(building_index(1, 3).unwrap(), 0);
        assert_eq!(building_index(3, 3).unwrap(), 2);
        assert_eq!(building_index(0, 3).unwrap_err(), CalcError::BuildingNotFound { index: 0, count: 3 });

        let err = building_index(5, 2).unwrap_err();
        assert_eq!(err, CalcError::BuildingNotFound { index: 5, count: 2 });
        assert_eq!(err.to_string(), "Building 5 does not exist (project has 2)");
    }

    #[test]
    fn test_parse_calc_command() {
        let cli = Cli::try_parse_from([
            "egress", "calc", "--state", "Ohio", "--code", "2021", "--occupancy", "business", "--area", "5000",
            "--sprinklered", "yes", "--yes",
        ])
        .unwrap();
        match cli.command {
            Commands::Calc { inputs, yes } => {
                assert!(yes);
                assert_eq!(inputs.area, Some(5000.0));
            }
            _ => panic!("expected calc"),
        }
    }
}

//! # File I/O Module
//!
//! Everything that crosses the persistence boundary:
//!
//! - **[`FileStore`]**: a [`Store`] backed by one JSON file per key, with
//!   atomic writes (write `.tmp`, fsync, rename) and an advisory lock on the
//!   store directory while writing
//! - **Session state**: the `app_state` record and the standalone history
//!   record, loaded with a fallback to defaults
//! - **Named projects**: saved under `project:<name>`, overwrite only when
//!   confirmed
//! - **Export/import**: the self-contained project document
//!
//! ## Project Document
//!
//! ```json
//! {
//!   "name": "Campus Expansion",
//!   "buildings": [ { "id": "...", "name": "Building 1", "inputs": {}, "results": null } ],
//!   "created_date": "2025-03-01T14:05:00+00:00",
//!   "version": "2.0"
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::file_io::{export_project, import_project};
//! use calc_core::project::Project;
//! use calc_core::units::UnitSystem;
//!
//! let project = Project::new("Annex");
//! let json = export_project(&project).unwrap();
//!
//! let imported = import_project(&json, UnitSystem::Imperial, false).unwrap();
//! assert_eq!(imported.name, "Annex");
//!
//! assert!(import_project(r#"{ "name": "No buildings" }"#, UnitSystem::Imperial, false).is_err());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::CalculatorConfig;
use crate::errors::{CalcError, CalcResult};
use crate::history::{CalculationHistory, HistoryEntry};
use crate::project::{Building, Project};
use crate::session::Session;
use crate::store::{project_key, Store, APP_STATE_KEY, HISTORY_KEY, PROJECT_KEY_PREFIX};
use crate::units::UnitSystem;

#[cfg(not(target_arch = "wasm32"))]
pub use disk::{FileStore, LockInfo, StoreLock};

/// Current project document format
pub const FORMAT_VERSION: &str = "2.0";

// ============================================================================
// Session State
// ============================================================================

/// The persisted application state record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub unit_system: UnitSystem,
    pub project_name: String,
    pub buildings: Vec<Building>,
    pub current_building_index: usize,
    pub show_advanced: bool,
    pub calculation_history: Vec<HistoryEntry>,
}

impl AppState {
    /// Snapshot a session
    pub fn from_session(session: &Session) -> Self {
        let project = &session.project;
        AppState {
            unit_system: project.units,
            project_name: project.name.clone(),
            buildings: project.buildings().to_vec(),
            current_building_index: project.current_building_index(),
            show_advanced: project.show_advanced,
            calculation_history: session.history.entries().to_vec(),
        }
    }

    /// Rebuild a session, repairing an invalid building index
    pub fn into_session(self, config: CalculatorConfig) -> Session {
        let project = Project::from_parts(
            self.project_name,
            self.buildings,
            self.current_building_index,
            self.unit_system,
            self.show_advanced,
        );
        let history = CalculationHistory::from_entries(self.calculation_history, config.history_limit);
        Session::from_parts(project, history, config)
    }
}

/// Write the session under both the app-state key and the standalone
/// history key.
pub fn save_session(store: &mut dyn Store, session: &Session) -> CalcResult<()> {
    let state = AppState::from_session(session);
    store.set(APP_STATE_KEY, &serde_json::to_string(&state)?)?;
    store.set(HISTORY_KEY, &serde_json::to_string(&state.calculation_history)?)?;
    info!(
        buildings = state.buildings.len(),
        history = state.calculation_history.len(),
        "session saved"
    );
    Ok(())
}

/// Read the stored app state without any fallback.
pub fn read_app_state(store: &dyn Store) -> CalcResult<Option<AppState>> {
    match store.get(APP_STATE_KEY)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| CalcError::persistence_unavailable(format!("corrupt app state: {}", e))),
        None => Ok(None),
    }
}

fn read_standalone_history(store: &dyn Store) -> CalcResult<Vec<HistoryEntry>> {
    match store.get(HISTORY_KEY)? {
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| CalcError::persistence_unavailable(format!("corrupt history: {}", e))),
        None => Ok(Vec::new()),
    }
}

/// Load the session. Never fails: an unreachable store or corrupt record
/// falls back to a fresh session.
pub fn load_session(store: &dyn Store, config: CalculatorConfig) -> Session {
    match read_app_state(store) {
        Ok(Some(state)) => state.into_session(config),
        Ok(None) => {
            let history = read_standalone_history(store).unwrap_or_else(|e| {
                warn!(error = %e, "discarding stored history");
                Vec::new()
            });
            let history = CalculationHistory::from_entries(history, config.history_limit);
            Session::from_parts(Project::default(), history, config)
        }
        Err(e) => {
            warn!(error = %e, "falling back to default session");
            Session::new(config)
        }
    }
}

// ============================================================================
// Project Document
// ============================================================================

fn default_format_version() -> String {
    FORMAT_VERSION.to_string()
}

/// Self-contained project record used for named saves and export files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub name: String,
    pub buildings: Vec<Building>,
    /// ISO-8601 creation timestamp
    #[serde(default)]
    pub created_date: String,
    #[serde(rename = "version", alias = "format_version", default = "default_format_version")]
    pub format_version: String,
}

impl ProjectDocument {
    /// Document for a project, stamped `created`
    pub fn from_project(project: &Project, created: DateTime<Utc>) -> Self {
        ProjectDocument {
            name: project.display_name().to_string(),
            buildings: project.buildings().to_vec(),
            created_date: created.to_rfc3339(),
            format_version: FORMAT_VERSION.to_string(),
        }
    }

    /// Project opened at its first building
    pub fn into_project(self, units: UnitSystem, show_advanced: bool) -> Project {
        Project::from_parts(self.name, self.buildings, 0, units, show_advanced)
    }
}

/// Validate that a document version is readable by this release.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(FORMAT_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: FORMAT_VERSION.to_string(),
    };

    if file_parts.is_empty() || file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }
    if file_parts.len() > 1 && file_parts[1] > current_parts[1] {
        // written by a newer release
        return Err(mismatch());
    }
    Ok(())
}

/// Serialize a project as an export document.
pub fn export_project(project: &Project) -> CalcResult<String> {
    let doc = ProjectDocument::from_project(project, Utc::now());
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// File name for an export: `egress_project_YYYYMMDD_HHMMSS.json`
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("egress_project_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Parse an export document into a project.
///
/// All-or-nothing: the document must be a JSON object with a string
/// `name` and an array `buildings`, and every building must decode. The
/// caller's current project is only replaced on `Ok`.
pub fn import_project(json: &str, units: UnitSystem, show_advanced: bool) -> CalcResult<Project> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| CalcError::malformed_import(format!("file is not valid JSON: {}", e)))?;

    let obj = value
        .as_object()
        .ok_or_else(|| CalcError::malformed_import("expected a JSON object at the top level"))?;

    match obj.get("name") {
        Some(Value::String(_)) => {}
        Some(_) => return Err(CalcError::malformed_import("'name' must be a string")),
        None => return Err(CalcError::malformed_import("missing required field 'name'")),
    }
    match obj.get("buildings") {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(CalcError::malformed_import("'buildings' must be a list")),
        None => return Err(CalcError::malformed_import("missing required field 'buildings'")),
    }

    let doc: ProjectDocument = serde_json::from_value(value)
        .map_err(|e| CalcError::malformed_import(format!("invalid building data: {}", e)))?;
    validate_version(&doc.format_version)?;

    info!(name = %doc.name, buildings = doc.buildings.len(), "project imported");
    Ok(doc.into_project(units, show_advanced))
}

// ============================================================================
// Named Projects
// ============================================================================

/// Save the project under its name.
///
/// An existing record with the same name is only replaced when `overwrite`
/// is set; its creation date is kept.
pub fn save_named_project(store: &mut dyn Store, project: &Project, overwrite: bool) -> CalcResult<()> {
    let name = project.name.trim();
    if name.is_empty() {
        return Err(CalcError::missing_field("name", "Enter a project name before saving"));
    }

    let key = project_key(name);
    let mut created = Utc::now();
    if let Some(existing) = store.get(&key)? {
        if !overwrite {
            return Err(CalcError::ProjectExists { name: name.to_string() });
        }
        if let Ok(doc) = serde_json::from_str::<ProjectDocument>(&existing) {
            if let Ok(original) = DateTime::parse_from_rfc3339(&doc.created_date) {
                created = original.with_timezone(&Utc);
            }
        }
    }

    let mut doc = ProjectDocument::from_project(project, created);
    doc.name = name.to_string();
    store.set(&key, &serde_json::to_string_pretty(&doc)?)?;
    info!(name, "project saved");
    Ok(())
}

/// Open a saved project at its first building.
pub fn load_named_project(
    store: &dyn Store,
    name: &str,
    units: UnitSystem,
    show_advanced: bool,
) -> CalcResult<Project> {
    let name = name.trim();
    let json = store
        .get(&project_key(name))?
        .ok_or_else(|| CalcError::ProjectNotFound { name: name.to_string() })?;
    let doc: ProjectDocument = serde_json::from_str(&json)?;
    validate_version(&doc.format_version)?;
    Ok(doc.into_project(units, show_advanced))
}

/// Names of all saved projects, sorted
pub fn list_named_projects(store: &dyn Store) -> CalcResult<Vec<String>> {
    let mut names: Vec<String> = store
        .keys()?
        .into_iter()
        .filter_map(|k| k.strip_prefix(PROJECT_KEY_PREFIX).map(str::to_string))
        .collect();
    names.sort();
    Ok(names)
}

/// Delete a saved project
pub fn delete_named_project(store: &mut dyn Store, name: &str) -> CalcResult<()> {
    let name = name.trim();
    let key = project_key(name);
    if store.get(&key)?.is_none() {
        return Err(CalcError::ProjectNotFound { name: name.to_string() });
    }
    store.delete(&key)
}

// ============================================================================
// On-disk Store
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod disk {
    use std::fs::{self, File, OpenOptions};
    use std::io::{Read, Seek, SeekFrom, Write};
    use std::path::{Path, PathBuf};

    use chrono::{DateTime, Utc};
    use fs2::FileExt;
    use serde::{Deserialize, Serialize};
    use tracing::debug;

    use crate::errors::{CalcError, CalcResult};
    use crate::store::Store;

    const LOCK_FILE: &str = ".store.lock";
    const VALUE_EXT: &str = "json";

    /// Lock file metadata
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct LockInfo {
        /// User name of the lock holder
        pub user_id: String,
        /// Machine name where lock was acquired
        pub machine: String,
        /// Process ID that holds the lock
        pub pid: u32,
        /// When the lock was acquired
        pub locked_at: DateTime<Utc>,
    }

    impl LockInfo {
        /// Create new lock info for the current process
        pub fn new() -> Self {
            LockInfo {
                user_id: std::env::var("USER")
                    .or_else(|_| std::env::var("USERNAME"))
                    .unwrap_or_else(|_| "unknown".to_string()),
                machine: hostname().unwrap_or_else(|| "unknown".to_string()),
                pid: std::process::id(),
                locked_at: Utc::now(),
            }
        }
    }

    impl Default for LockInfo {
        fn default() -> Self {
            LockInfo::new()
        }
    }

    /// Get the hostname of the current machine
    fn hostname() -> Option<String> {
        #[cfg(windows)]
        {
            std::env::var("COMPUTERNAME").ok()
        }
        #[cfg(not(windows))]
        {
            std::env::var("HOSTNAME")
                .ok()
                .or_else(|| std::env::var("HOST").ok())
        }
    }

    /// Exclusive OS-level lock on a store directory, released on drop.
    pub struct StoreLock {
        file: File,
        path: PathBuf,
        /// Lock metadata
        pub info: LockInfo,
    }

    impl StoreLock {
        /// Acquire the lock without blocking.
        ///
        /// Returns `FileLocked` naming the current holder when another
        /// process has it.
        pub fn acquire(dir: &Path) -> CalcResult<Self> {
            let path = dir.join(LOCK_FILE);
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&path)
                .map_err(|e| CalcError::file_error("open lock", path.display().to_string(), e.to_string()))?;

            if file.try_lock_exclusive().is_err() {
                let mut contents = String::new();
                let holder = file
                    .read_to_string(&mut contents)
                    .ok()
                    .and_then(|_| serde_json::from_str::<LockInfo>(&contents).ok());
                return Err(match holder {
                    Some(info) => CalcError::file_locked(
                        dir.display().to_string(),
                        format!("{} ({})", info.user_id, info.machine),
                        info.locked_at.to_rfc3339(),
                    ),
                    None => CalcError::file_locked(dir.display().to_string(), "another process", "unknown"),
                });
            }

            let info = LockInfo::new();
            let lock_json = serde_json::to_string_pretty(&info)?;
            file.set_len(0)
                .and_then(|_| file.seek(SeekFrom::Start(0)))
                .and_then(|_| file.write_all(lock_json.as_bytes()))
                .map_err(|e| CalcError::file_error("write lock", path.display().to_string(), e.to_string()))?;

            Ok(StoreLock { file, path, info })
        }

        /// Path of the lock file
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for StoreLock {
        fn drop(&mut self) {
            let _ = FileExt::unlock(&self.file);
        }
    }

    /// Directory-backed store: each key is a `<encoded key>.json` file.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        root: PathBuf,
    }

    impl FileStore {
        /// Open (creating if needed) a store directory.
        pub fn open(root: impl Into<PathBuf>) -> CalcResult<Self> {
            let root = root.into();
            fs::create_dir_all(&root).map_err(|e| {
                CalcError::persistence_unavailable(format!("cannot create {}: {}", root.display(), e))
            })?;
            Ok(FileStore { root })
        }

        pub fn root(&self) -> &Path {
            &self.root
        }

        fn path_for(&self, key: &str) -> PathBuf {
            self.root.join(format!("{}.{}", encode_key(key), VALUE_EXT))
        }
    }

    impl Store for FileStore {
        fn get(&self, key: &str) -> CalcResult<Option<String>> {
            let path = self.path_for(key);
            if !path.exists() {
                return Ok(None);
            }
            let mut contents = String::new();
            File::open(&path)
                .and_then(|mut f| f.read_to_string(&mut contents))
                .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
            Ok(Some(contents))
        }

        /// Atomic write: temp file, fsync, rename.
        fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
            let _lock = StoreLock::acquire(&self.root)?;
            let path = self.path_for(key);
            let tmp_path = path.with_extension("json.tmp");

            let mut tmp_file = File::create(&tmp_path).map_err(|e| {
                CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
            })?;
            tmp_file.write_all(value.as_bytes()).map_err(|e| {
                CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
            })?;
            tmp_file.sync_all().map_err(|e| {
                CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
            })?;

            fs::rename(&tmp_path, &path).map_err(|e| {
                let _ = fs::remove_file(&tmp_path);
                CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
            })?;

            debug!(key, bytes = value.len(), "store write");
            Ok(())
        }

        fn delete(&mut self, key: &str) -> CalcResult<()> {
            let _lock = StoreLock::acquire(&self.root)?;
            let path = self.path_for(key);
            if path.exists() {
                fs::remove_file(&path)
                    .map_err(|e| CalcError::file_error("delete", path.display().to_string(), e.to_string()))?;
            }
            Ok(())
        }

        fn keys(&self) -> CalcResult<Vec<String>> {
            let entries = fs::read_dir(&self.root)
                .map_err(|e| CalcError::file_error("list", self.root.display().to_string(), e.to_string()))?;

            let mut keys = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some(VALUE_EXT) {
                    continue;
                }
                if let Some(key) = path.file_stem().and_then(|s| s.to_str()).and_then(decode_key) {
                    keys.push(key);
                }
            }
            keys.sort();
            Ok(keys)
        }
    }

    /// Keep `[A-Za-z0-9_-]`, escape every other byte as `%XX`.
    pub(super) fn encode_key(key: &str) -> String {
        let mut out = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                out.push(byte as char);
            } else {
                out.push_str(&format!("%{:02X}", byte));
            }
        }
        out
    }

    pub(super) fn decode_key(encoded: &str) -> Option<String> {
        let bytes = encoded.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let hex = encoded.get(i + 1..i + 3)?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            } else {
                out.push(bytes[i]);
                i += 1;
            }
        }
        String::from_utf8(out).ok()
    }
}

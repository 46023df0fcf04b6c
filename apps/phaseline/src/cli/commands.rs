//! # CLI Command Implementations

use crate::api;
use phaseline_core::{PhaselineError, SolutionId, Tracker};
use std::path::Path;

// =============================================================================
// TRACKER CONSTRUCTION
// =============================================================================

/// Open a tracker over the selected backend.
fn open_tracker(database: &Path, backend: &str) -> Result<Tracker, PhaselineError> {
    match backend {
        "memory" => {
            tracing::warn!("Using volatile in-memory backend: data will not persist");
            Ok(Tracker::in_memory())
        }
        "redb" => Tracker::with_redb(database),
        other => Err(PhaselineError::InvalidInput(format!(
            "Unknown backend '{other}' (expected \"redb\" or \"memory\")"
        ))),
    }
}

fn to_json(value: &impl serde::Serialize) -> Result<String, PhaselineError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PhaselineError::SerializationError(e.to_string()))
}

// =============================================================================
// SERVER
// =============================================================================

/// Start the HTTP server, seeding the built-in catalog first.
pub async fn cmd_server(
    database: &Path,
    backend: &str,
    host: &str,
    port: u16,
) -> Result<(), PhaselineError> {
    let mut tracker = open_tracker(database, backend)?;

    let seeded = tracker.seed_default_catalog()?;
    if seeded > 0 {
        tracing::info!("Seeded {} built-in phases", seeded);
    }

    let addr = format!("{host}:{port}");
    api::run_server(&addr, tracker).await
}

// =============================================================================
// STATUS
// =============================================================================

/// Show store counts.
pub fn cmd_status(database: &Path, backend: &str, json_mode: bool) -> Result<(), PhaselineError> {
    let tracker = open_tracker(database, backend)?;
    let counts = tracker.counts()?;

    if json_mode {
        println!(
            "{}",
            to_json(&serde_json::json!({
                "phases": counts.phases,
                "solutions": counts.solutions,
                "links": counts.links,
                "persistent": tracker.is_persistent(),
            }))?
        );
    } else {
        println!("Phases:    {}", counts.phases);
        println!("Solutions: {}", counts.solutions);
        println!("Links:     {}", counts.links);
    }
    Ok(())
}

// =============================================================================
// PHASES
// =============================================================================

/// List the phase catalog in sequence order.
pub fn cmd_phases(database: &Path, backend: &str, json_mode: bool) -> Result<(), PhaselineError> {
    let tracker = open_tracker(database, backend)?;
    let catalog = tracker.catalog()?;

    if json_mode {
        let phases: Vec<_> = catalog.ordered().into_iter().cloned().collect();
        println!("{}", to_json(&phases)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No phases in the catalog (run `phaseline seed`)");
        return Ok(());
    }
    for phase in catalog.ordered() {
        println!(
            "{:>4}  {:<32} {:<22} {}",
            phase.sequence,
            catalog.display_name(&phase.phase_id),
            phase.phase_group,
            phase.phase_id
        );
    }
    Ok(())
}

// =============================================================================
// SOLUTIONS
// =============================================================================

/// List solutions with status and progress.
pub fn cmd_solutions(
    database: &Path,
    backend: &str,
    json_mode: bool,
) -> Result<(), PhaselineError> {
    let tracker = open_tracker(database, backend)?;
    let solutions = tracker.solutions()?;

    if json_mode {
        println!("{}", to_json(&solutions)?);
        return Ok(());
    }

    if solutions.is_empty() {
        println!("No solutions");
        return Ok(());
    }
    let catalog = tracker.catalog()?;
    for solution in solutions {
        let percent = tracker.progress(&solution.solution_id)?;
        let phase = solution
            .current_phase
            .as_ref()
            .map(|id| catalog.display_name(id))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{:<38} {:<28} {:<12} {:<24} {:>3}%",
            solution.solution_id,
            solution.solution_name,
            solution.status.label(),
            phase,
            percent
        );
    }
    Ok(())
}

// =============================================================================
// PROGRESS
// =============================================================================

/// Show the resolved ordering and completion percentage for one solution.
pub fn cmd_progress(
    database: &Path,
    backend: &str,
    json_mode: bool,
    solution: &str,
) -> Result<(), PhaselineError> {
    let tracker = open_tracker(database, backend)?;
    let solution_id = SolutionId::new(solution);

    let record = tracker
        .get_solution(&solution_id)?
        .ok_or_else(|| PhaselineError::SolutionNotFound(solution_id.clone()))?;
    let ordered = tracker.ordered_phases(&solution_id)?;
    let percent = tracker.progress(&solution_id)?;

    if json_mode {
        println!(
            "{}",
            to_json(&serde_json::json!({
                "solution_id": solution_id,
                "percent": percent,
                "ordered_phases": ordered,
            }))?
        );
        return Ok(());
    }

    let catalog = tracker.catalog()?;
    println!(
        "{} — {} ({}%)",
        record.solution_name,
        record.status.label(),
        percent
    );
    for (i, phase_id) in ordered.iter().enumerate() {
        let marker = if record.current_phase.as_ref() == Some(phase_id) {
            ">"
        } else {
            " "
        };
        println!(
            "{} {:>2}. {}",
            marker,
            i + 1,
            catalog.display_name(phase_id)
        );
    }
    Ok(())
}

// =============================================================================
// SEED
// =============================================================================

/// Idempotently seed the built-in phase catalog.
pub fn cmd_seed(database: &Path, backend: &str, json_mode: bool) -> Result<(), PhaselineError> {
    let mut tracker = open_tracker(database, backend)?;
    let inserted = tracker.seed_default_catalog()?;

    if json_mode {
        println!("{}", to_json(&serde_json::json!({ "inserted": inserted }))?);
    } else if inserted > 0 {
        println!("Seeded {} built-in phases", inserted);
    } else {
        println!("Catalog already seeded");
    }
    Ok(())
}

// =============================================================================
// INIT
// =============================================================================

/// Initialize a new empty database (redb backend only).
pub fn cmd_init(database: &Path, force: bool) -> Result<(), PhaselineError> {
    if database.exists() {
        if !force {
            return Err(PhaselineError::InvalidInput(format!(
                "Database {} already exists (use --force to overwrite)",
                database.display()
            )));
        }
        std::fs::remove_file(database).map_err(|e| PhaselineError::IoError(e.to_string()))?;
    }

    let _ = Tracker::with_redb(database)?;
    println!("Initialized empty database at {}", database.display());
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_tracker_rejects_unknown_backend() {
        let dir = tempdir().expect("tempdir");
        let err = open_tracker(&dir.path().join("t.db"), "sqlite").expect_err("must reject");
        assert!(matches!(err, PhaselineError::InvalidInput(_)));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempdir().expect("tempdir");
        let db = dir.path().join("t.db");

        cmd_init(&db, false).expect("first init");
        assert!(db.exists());
        assert!(cmd_init(&db, false).is_err());
        cmd_init(&db, true).expect("forced init");
    }

    #[test]
    fn seed_and_status_round_trip() {
        let dir = tempdir().expect("tempdir");
        let db = dir.path().join("t.db");

        cmd_seed(&db, "redb", false).expect("seed");
        cmd_status(&db, "redb", true).expect("status");

        let tracker = Tracker::with_redb(&db).expect("open");
        assert_eq!(tracker.counts().expect("counts").phases, 17);
    }
}

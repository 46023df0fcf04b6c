//! # redb-backed Phase Store
//!
//! A disk-backed store using the redb embedded database, providing:
//! - ACID transactions
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//! - Zero configuration
//!
//! Values are postcard-encoded records; keys are the raw id strings.
//! Links use a composite `(solution_id, phase_id)` key so one
//! solution's links occupy a contiguous key range.

use crate::store::{PhaseStore, sort_catalog};
use crate::types::{Phase, PhaseId, PhaselineError, Solution, SolutionId, SolutionPhaseLink};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Table for catalog phases: phase_id -> serialized Phase.
const PHASES: TableDefinition<&str, &[u8]> = TableDefinition::new("phases");

/// Table for solutions: solution_id -> serialized Solution.
const SOLUTIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("solutions");

/// Table for links: (solution_id, phase_id) -> serialized SolutionPhaseLink.
const LINKS: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("solution_phases");

fn io_err(e: impl std::fmt::Display) -> PhaselineError {
    PhaselineError::IoError(e.to_string())
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, PhaselineError> {
    postcard::to_allocvec(value).map_err(|e| PhaselineError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PhaselineError> {
    postcard::from_bytes(bytes).map_err(|e| PhaselineError::SerializationError(e.to_string()))
}

/// A disk-backed phase store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a store database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PhaselineError> {
        let db = Database::create(path.as_ref()).map_err(io_err)?;

        // Initialize tables if they don't exist
        {
            let write_txn = db.begin_write().map_err(io_err)?;
            let _ = write_txn.open_table(PHASES).map_err(io_err)?;
            let _ = write_txn.open_table(SOLUTIONS).map_err(io_err)?;
            let _ = write_txn.open_table(LINKS).map_err(io_err)?;
            write_txn.commit().map_err(io_err)?;
        }

        Ok(Self { db })
    }
}

impl PhaseStore for RedbStore {
    fn insert_phase(&mut self, phase: Phase) -> Result<(), PhaselineError> {
        let bytes = encode(&phase)?;
        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(PHASES).map_err(io_err)?;
            table
                .insert(phase.phase_id.as_str(), bytes.as_slice())
                .map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)
    }

    fn get_phase(&self, id: &PhaseId) -> Result<Option<Phase>, PhaselineError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(PHASES).map_err(io_err)?;
        match table.get(id.as_str()).map_err(io_err)? {
            Some(guard) => Ok(Some(decode(guard.value())?)),
            None => Ok(None),
        }
    }

    fn phases(&self) -> Result<Vec<Phase>, PhaselineError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(PHASES).map_err(io_err)?;
        let mut out = Vec::new();
        for entry in table.iter().map_err(io_err)? {
            let (_, value) = entry.map_err(io_err)?;
            out.push(decode(value.value())?);
        }
        sort_catalog(&mut out);
        Ok(out)
    }

    fn phase_count(&self) -> Result<usize, PhaselineError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(PHASES).map_err(io_err)?;
        Ok(table.len().map_err(io_err)? as usize)
    }

    fn upsert_solution(&mut self, solution: Solution) -> Result<(), PhaselineError> {
        let bytes = encode(&solution)?;
        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(SOLUTIONS).map_err(io_err)?;
            table
                .insert(solution.solution_id.as_str(), bytes.as_slice())
                .map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)
    }

    fn get_solution(&self, id: &SolutionId) -> Result<Option<Solution>, PhaselineError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(SOLUTIONS).map_err(io_err)?;
        match table.get(id.as_str()).map_err(io_err)? {
            Some(guard) => Ok(Some(decode(guard.value())?)),
            None => Ok(None),
        }
    }

    fn solutions(&self) -> Result<Vec<Solution>, PhaselineError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(SOLUTIONS).map_err(io_err)?;
        let mut out = Vec::new();
        for entry in table.iter().map_err(io_err)? {
            let (_, value) = entry.map_err(io_err)?;
            out.push(decode(value.value())?);
        }
        Ok(out)
    }

    fn remove_solution(&mut self, id: &SolutionId) -> Result<bool, PhaselineError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        let existed;
        {
            let mut solutions = write_txn.open_table(SOLUTIONS).map_err(io_err)?;
            existed = solutions.remove(id.as_str()).map_err(io_err)?.is_some();

            let mut links = write_txn.open_table(LINKS).map_err(io_err)?;
            let stale: Vec<String> = collect_link_phase_ids(&links, id)?;
            for phase_id in stale {
                links
                    .remove((id.as_str(), phase_id.as_str()))
                    .map_err(io_err)?;
            }
        }
        write_txn.commit().map_err(io_err)?;
        Ok(existed)
    }

    fn solution_count(&self) -> Result<usize, PhaselineError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(SOLUTIONS).map_err(io_err)?;
        Ok(table.len().map_err(io_err)? as usize)
    }

    fn links_for(
        &self,
        solution_id: &SolutionId,
    ) -> Result<Vec<SolutionPhaseLink>, PhaselineError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(LINKS).map_err(io_err)?;
        let mut out = Vec::new();
        for entry in table
            .range((solution_id.as_str(), "")..)
            .map_err(io_err)?
        {
            let (key, value) = entry.map_err(io_err)?;
            let (sid, _) = key.value();
            if sid != solution_id.as_str() {
                break;
            }
            out.push(decode(value.value())?);
        }
        Ok(out)
    }

    fn put_links(
        &mut self,
        solution_id: &SolutionId,
        links: Vec<SolutionPhaseLink>,
    ) -> Result<(), PhaselineError> {
        let encoded: Vec<(String, Vec<u8>)> = links
            .iter()
            .map(|link| Ok((link.phase_id.0.clone(), encode(link)?)))
            .collect::<Result<_, PhaselineError>>()?;

        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(LINKS).map_err(io_err)?;
            let stale: Vec<String> = collect_link_phase_ids(&table, solution_id)?;
            for phase_id in stale {
                table
                    .remove((solution_id.as_str(), phase_id.as_str()))
                    .map_err(io_err)?;
            }
            for (phase_id, bytes) in &encoded {
                table
                    .insert((solution_id.as_str(), phase_id.as_str()), bytes.as_slice())
                    .map_err(io_err)?;
            }
        }
        write_txn.commit().map_err(io_err)
    }

    fn link_count(&self) -> Result<usize, PhaselineError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(LINKS).map_err(io_err)?;
        Ok(table.len().map_err(io_err)? as usize)
    }
}

/// Collect the phase-id halves of every link key belonging to one
/// solution. Keys are collected before removal since the table cannot
/// be mutated mid-iteration.
fn collect_link_phase_ids(
    table: &impl ReadableTable<(&'static str, &'static str), &'static [u8]>,
    solution_id: &SolutionId,
) -> Result<Vec<String>, PhaselineError> {
    let mut out = Vec::new();
    for entry in table
        .range((solution_id.as_str(), "")..)
        .map_err(io_err)?
    {
        let (key, _) = entry.map_err(io_err)?;
        let (sid, phase_id) = key.value();
        if sid != solution_id.as_str() {
            break;
        }
        out.push(phase_id.to_string());
    }
    Ok(out)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn temp_store() -> (RedbStore, NamedTempFile) {
        let file = NamedTempFile::new().expect("temp file");
        let store = RedbStore::open(file.path()).expect("open");
        (store, file)
    }

    #[test]
    fn phases_survive_reopen() {
        let file = NamedTempFile::new().expect("temp file");
        {
            let mut store = RedbStore::open(file.path()).expect("open");
            store
                .insert_phase(Phase::new("backlog", "Backlog", "Backlog", 1))
                .expect("insert");
            store
                .insert_phase(Phase::new("design", "Design", "Development", 2))
                .expect("insert");
        }

        let store = RedbStore::open(file.path()).expect("reopen");
        let phases = store.phases().expect("phases");
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].phase_id.as_str(), "backlog");
    }

    #[test]
    fn put_links_replaces_previous_set() {
        let (mut store, _file) = temp_store();
        let sid = SolutionId::new("s1");

        store
            .put_links(
                &sid,
                vec![SolutionPhaseLink::disabled(sid.clone(), PhaseId::new("p1"))],
            )
            .expect("put");
        store
            .put_links(
                &sid,
                vec![
                    SolutionPhaseLink::disabled(sid.clone(), PhaseId::new("p2")),
                    SolutionPhaseLink::disabled(sid.clone(), PhaseId::new("p3")),
                ],
            )
            .expect("put");

        let links = store.links_for(&sid).expect("links");
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.phase_id.as_str() != "p1"));
        assert_eq!(store.link_count().expect("count"), 2);
    }

    #[test]
    fn links_are_scoped_per_solution() {
        let (mut store, _file) = temp_store();
        let s1 = SolutionId::new("s1");
        let s2 = SolutionId::new("s2");

        store
            .put_links(&s1, vec![SolutionPhaseLink::disabled(s1.clone(), PhaseId::new("p1"))])
            .expect("put");
        store
            .put_links(&s2, vec![SolutionPhaseLink::disabled(s2.clone(), PhaseId::new("p2"))])
            .expect("put");

        let links = store.links_for(&s1).expect("links");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].phase_id.as_str(), "p1");
    }

    #[test]
    fn remove_solution_drops_record_and_links() {
        let (mut store, _file) = temp_store();
        let sid = SolutionId::new("s1");

        store
            .upsert_solution(Solution::new("s1", "Access Controls"))
            .expect("upsert");
        store
            .put_links(&sid, vec![SolutionPhaseLink::disabled(sid.clone(), PhaseId::new("p1"))])
            .expect("put");

        assert!(store.remove_solution(&sid).expect("remove"));
        assert!(store.get_solution(&sid).expect("get").is_none());
        assert_eq!(store.link_count().expect("count"), 0);
    }

    #[test]
    fn solution_round_trip_preserves_fields() {
        let (mut store, _file) = temp_store();
        let mut sol = Solution::new("s1", "Access Controls");
        sol.status = crate::types::SolutionStatus::Active;
        sol.current_phase = Some(PhaseId::new("design"));

        store.upsert_solution(sol.clone()).expect("upsert");
        let loaded = store
            .get_solution(&SolutionId::new("s1"))
            .expect("get")
            .expect("present");
        assert_eq!(loaded, sol);
    }
}

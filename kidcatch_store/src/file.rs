// JSON-file game store.
//
// The whole table lives in memory and is written to disk after every
// mutation: serialized to a temp file in the target directory, then renamed
// over the old file, so a crash mid-write leaves the previous version intact.
// Mutations run against a copy of the table that becomes live only once it
// is on disk.
// A missing file on open is an empty store.
//
// File format: `{"games": [GameRecord, ...]}` in id order.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use kidcatch_protocol::{GameId, UserId};

use crate::error::{Result, StoreError};
use crate::record::{GameRecord, NewGame};
use crate::store::{GameStore, GameTable};

#[derive(Deserialize)]
struct StoreFile {
    #[serde(default)]
    games: Vec<GameRecord>,
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    games: Vec<&'a GameRecord>,
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: Mutex<GameTable>,
}

impl JsonFileStore {
    /// Open (or start) a store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let file: StoreFile = serde_json::from_reader(reader)?;
            info!(path = %path.display(), games = file.games.len(), "game store loaded");
            GameTable::from_records(file.games)
        } else {
            info!(path = %path.display(), "starting empty game store");
            GameTable::default()
        };
        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&GameTable) -> Result<T>) -> Result<T> {
        let table = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        f(&table)
    }

    /// Apply a mutation to a copy of the table and persist it. The live
    /// table is replaced only once the file is written, so a failed save
    /// leaves both memory and disk at the previous state.
    fn write<T>(&self, f: impl FnOnce(&mut GameTable) -> Result<T>) -> Result<T> {
        let mut table = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        let mut next = table.clone();
        let out = f(&mut next)?;
        save(&self.path, &next)?;
        *table = next;
        Ok(out)
    }
}

fn save(path: &Path, table: &GameTable) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(
            &mut writer,
            &StoreFileRef {
                games: table.records(),
            },
        )?;
        writer.flush()?;
    }
    temp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    debug!(path = %path.display(), "game store saved");
    Ok(())
}

impl GameStore for JsonFileStore {
    fn kind(&self) -> &'static str {
        "json-file"
    }

    fn insert(&self, game: NewGame) -> Result<GameId> {
        self.write(|t| Ok(t.insert(game)))
    }

    fn get(&self, id: &GameId) -> Result<GameRecord> {
        self.read(|t| t.get(id))
    }

    fn list_by_user(&self, user: &UserId) -> Result<Vec<GameRecord>> {
        self.read(|t| Ok(t.list_by_user(user)))
    }

    fn record_play(&self, id: &GameId) -> Result<u64> {
        self.write(|t| t.record_play(id))
    }

    fn adjust_likes(&self, id: &GameId, delta: i64) -> Result<u64> {
        self.write(|t| t.adjust_likes(id, delta))
    }

    fn soft_delete(&self, id: &GameId, user: &UserId) -> Result<()> {
        self.write(|t| t.soft_delete(id, user))
    }
}

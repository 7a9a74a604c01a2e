// The `GameStore` port and the in-memory table both implementations share.
//
// `GameTable` holds the records in a `BTreeMap` keyed by id and implements
// every operation's semantics once. `MemoryStore` wraps it in a mutex;
// `JsonFileStore` (file.rs) additionally writes it out after each mutation.
//
// Counter rules: play counts only grow; likes move by ±1 per call and never
// drop below zero. Lookups by id return soft-deleted records too (callers
// decide visibility); listings skip them.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use kidcatch_protocol::{GameId, UserId};

use crate::error::{Result, StoreError};
use crate::record::{GameRecord, NewGame};

/// Persistence for created games.
pub trait GameStore: Send + Sync {
    /// Short backend name for status output.
    fn kind(&self) -> &'static str;

    fn insert(&self, game: NewGame) -> Result<GameId>;

    /// The record, including soft-deleted ones. `NotFound` if absent.
    fn get(&self, id: &GameId) -> Result<GameRecord>;

    /// The user's visible games, newest first.
    fn list_by_user(&self, user: &UserId) -> Result<Vec<GameRecord>>;

    /// Increment the play count; returns the new count.
    fn record_play(&self, id: &GameId) -> Result<u64>;

    /// Apply a like delta, clamped at zero; returns the new count.
    fn adjust_likes(&self, id: &GameId, delta: i64) -> Result<u64>;

    /// Mark deleted. `Forbidden` unless `user` created the game.
    fn soft_delete(&self, id: &GameId, user: &UserId) -> Result<()>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct GameTable {
    pub(crate) games: BTreeMap<GameId, GameRecord>,
}

impl GameTable {
    pub(crate) fn from_records(records: Vec<GameRecord>) -> Self {
        Self {
            games: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    pub(crate) fn records(&self) -> Vec<&GameRecord> {
        self.games.values().collect()
    }

    fn get_mut(&mut self, id: &GameId) -> Result<&mut GameRecord> {
        self.games
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    pub(crate) fn insert(&mut self, game: NewGame) -> GameId {
        let id = GameId::generate();
        let record = GameRecord::new(id.clone(), game, Utc::now());
        debug!(%id, user = %record.user_id, "game inserted");
        self.games.insert(id.clone(), record);
        id
    }

    pub(crate) fn get(&self, id: &GameId) -> Result<GameRecord> {
        self.games
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    pub(crate) fn list_by_user(&self, user: &UserId) -> Vec<GameRecord> {
        let mut games: Vec<GameRecord> = self
            .games
            .values()
            .filter(|r| &r.user_id == user && r.is_visible())
            .cloned()
            .collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        games
    }

    pub(crate) fn record_play(&mut self, id: &GameId) -> Result<u64> {
        let record = self.get_mut(id)?;
        record.play_count += 1;
        Ok(record.play_count)
    }

    pub(crate) fn adjust_likes(&mut self, id: &GameId, delta: i64) -> Result<u64> {
        let record = self.get_mut(id)?;
        record.likes = record.likes.saturating_add_signed(delta);
        Ok(record.likes)
    }

    pub(crate) fn soft_delete(&mut self, id: &GameId, user: &UserId) -> Result<()> {
        let record = self.get_mut(id)?;
        if record.is_deleted {
            return Err(StoreError::NotFound(id.clone()));
        }
        if &record.user_id != user {
            return Err(StoreError::Forbidden {
                id: id.clone(),
                user: user.clone(),
            });
        }
        record.is_deleted = true;
        record.deleted_at = Some(Utc::now());
        Ok(())
    }
}

/// Process-lifetime store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<GameTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_table<T>(&self, f: impl FnOnce(&mut GameTable) -> Result<T>) -> Result<T> {
        let mut table = self.table.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut table)
    }
}

impl GameStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn insert(&self, game: NewGame) -> Result<GameId> {
        self.with_table(|t| Ok(t.insert(game)))
    }

    fn get(&self, id: &GameId) -> Result<GameRecord> {
        self.with_table(|t| t.get(id))
    }

    fn list_by_user(&self, user: &UserId) -> Result<Vec<GameRecord>> {
        self.with_table(|t| Ok(t.list_by_user(user)))
    }

    fn record_play(&self, id: &GameId) -> Result<u64> {
        self.with_table(|t| t.record_play(id))
    }

    fn adjust_likes(&self, id: &GameId, delta: i64) -> Result<u64> {
        self.with_table(|t| t.adjust_likes(id, delta))
    }

    fn soft_delete(&self, id: &GameId, user: &UserId) -> Result<()> {
        self.with_table(|t| t.soft_delete(id, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::sample_game;

    #[test]
    fn insert_then_get() {
        let store = MemoryStore::new();
        let id = store.insert(sample_game("u1", "蘋果")).unwrap();
        let record = store.get(&id).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.game_config.object_type, "蘋果");
        assert_eq!(store.kind(), "memory");
    }

    #[test]
    fn missing_game_is_not_found() {
        let store = MemoryStore::new();
        let id = GameId("nope".into());
        assert!(matches!(store.get(&id), Err(StoreError::NotFound(_))));
        assert!(matches!(store.record_play(&id), Err(StoreError::NotFound(_))));
        assert!(matches!(store.adjust_likes(&id, 1), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn play_count_increments() {
        let store = MemoryStore::new();
        let id = store.insert(sample_game("u1", "蘋果")).unwrap();
        assert_eq!(store.record_play(&id).unwrap(), 1);
        assert_eq!(store.record_play(&id).unwrap(), 2);
        assert_eq!(store.get(&id).unwrap().play_count, 2);
    }

    #[test]
    fn likes_never_negative() {
        let store = MemoryStore::new();
        let id = store.insert(sample_game("u1", "蘋果")).unwrap();
        assert_eq!(store.adjust_likes(&id, -1).unwrap(), 0);
        assert_eq!(store.adjust_likes(&id, 1).unwrap(), 1);
        assert_eq!(store.adjust_likes(&id, 1).unwrap(), 2);
        assert_eq!(store.adjust_likes(&id, -1).unwrap(), 1);
    }

    #[test]
    fn soft_delete_rules() {
        let store = MemoryStore::new();
        let id = store.insert(sample_game("owner", "蘋果")).unwrap();

        let stranger = UserId("stranger".into());
        assert!(matches!(
            store.soft_delete(&id, &stranger),
            Err(StoreError::Forbidden { .. })
        ));
        assert!(store.get(&id).unwrap().is_visible());

        let owner = UserId("owner".into());
        store.soft_delete(&id, &owner).unwrap();
        let record = store.get(&id).unwrap();
        assert!(record.is_deleted);
        assert!(record.deleted_at.is_some());
        assert!(matches!(
            store.soft_delete(&id, &owner),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn listing_is_per_user_and_hides_deleted() {
        let store = MemoryStore::new();
        let a = store.insert(sample_game("u1", "蘋果")).unwrap();
        let _b = store.insert(sample_game("u1", "星星")).unwrap();
        let _c = store.insert(sample_game("u2", "愛心")).unwrap();

        let u1 = UserId("u1".into());
        assert_eq!(store.list_by_user(&u1).unwrap().len(), 2);
        store.soft_delete(&a, &u1).unwrap();
        let games = store.list_by_user(&u1).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].game_config.object_type, "星星");
        assert!(store.list_by_user(&UserId("nobody".into())).unwrap().is_empty());
    }

    #[test]
    fn store_is_shareable_across_threads() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let id = store.insert(sample_game("u1", "蘋果")).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = id.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.record_play(&id).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.get(&id).unwrap().play_count, 100);
    }
}

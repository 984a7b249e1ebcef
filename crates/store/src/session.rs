//! Session glue between a [`GameManager`] and a [`GameStore`]
//!
//! Persistence is never fatal to play: a save that cannot be loaded or
//! restored is logged and replaced by a fresh game.

use anyhow::Result;
use log::{info, warn};

use crate::core::{GameConfig, GameManager, GameRecord, TileSpawner};
use crate::record::SavedGame;
use crate::store::GameStore;

/// Keeps the best score seen and writes it through when beaten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScoreTracker {
    best: u64,
}

impl HighScoreTracker {
    /// Read the stored high score; an unreadable store counts as 0
    pub fn load<St: GameStore + ?Sized>(store: &St) -> Self {
        let best = store.high_score().unwrap_or_else(|err| {
            warn!("high score unavailable: {:#}", err);
            0
        });
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record `score` if it beats the best so far. Returns true on a new record.
    pub fn update_if_needed<St: GameStore + ?Sized>(
        &mut self,
        store: &mut St,
        score: u64,
    ) -> Result<bool> {
        if score <= self.best {
            return Ok(false);
        }
        store.save_high_score(score)?;
        self.best = score;
        Ok(true)
    }
}

/// Restore the saved game, or start a fresh one
///
/// A restored game that was already over is discarded. Load errors and
/// invalid records are logged as warnings and also yield a fresh game.
pub fn resume_or_new<St, S>(
    store: &mut St,
    config: GameConfig,
    spawner: S,
) -> Result<GameManager<S>>
where
    St: GameStore + ?Sized,
    S: TileSpawner + Clone,
{
    match store.load_game() {
        Ok(Some(saved)) if !saved.over => {
            let record = GameRecord::from(&saved);
            match GameManager::restore(config.clone(), spawner.clone(), &record) {
                Ok(mut game) => {
                    info!(
                        "resumed {}x{} game at score {}",
                        record.size, record.size, record.score
                    );
                    game.refresh_view();
                    return Ok(game);
                }
                Err(err) => warn!("saved game rejected, starting fresh: {}", err),
            }
        }
        Ok(Some(_)) => info!("saved game was over, starting fresh"),
        Ok(None) => {}
        Err(err) => warn!("could not load saved game, starting fresh: {:#}", err),
    }

    let mut game = GameManager::with_spawner(config, spawner)?;
    game.setup();
    Ok(game)
}

/// Persist the game and bump the high score
///
/// A finished game clears the saved slot so the next session starts fresh.
pub fn save_progress<St, S>(
    store: &mut St,
    tracker: &mut HighScoreTracker,
    game: &GameManager<S>,
) -> Result<()>
where
    St: GameStore + ?Sized,
    S: TileSpawner,
{
    tracker.update_if_needed(store, game.score())?;
    if game.over() {
        store.clear_game()
    } else {
        store.save_game(&SavedGame::from(&game.record()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Grid, RandomSpawner, ScriptedSpawner};
    use crate::record::SavedTile;
    use crate::store::MemoryStore;
    use crate::types::Direction;

    fn saved(tiles: Vec<SavedTile>) -> SavedGame {
        SavedGame {
            size: 4,
            score: 48,
            over: false,
            won: false,
            keep_playing: false,
            tiles,
        }
    }

    #[test]
    fn test_resume_restores_saved_game() {
        let mut store = MemoryStore::with_game(saved(vec![
            SavedTile { x: 0, y: 0, value: 8 },
            SavedTile { x: 1, y: 2, value: 16 },
        ]));

        let game = resume_or_new(&mut store, GameConfig::default(), RandomSpawner::new(3)).unwrap();
        assert_eq!(game.score(), 48);
        assert_eq!(game.grid().tile_count(), 2);
        assert_eq!(game.grid().to_rows()[2][1], 16);
    }

    #[test]
    fn test_resume_without_save_starts_fresh() {
        let mut store = MemoryStore::new();
        let game = resume_or_new(&mut store, GameConfig::default(), RandomSpawner::new(3)).unwrap();
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().tile_count(), 2);
    }

    #[test]
    fn test_resume_invalid_save_starts_fresh() {
        let mut store = MemoryStore::with_game(saved(vec![
            SavedTile { x: 0, y: 0, value: 8 },
            SavedTile { x: 0, y: 0, value: 8 },
        ]));

        let game = resume_or_new(&mut store, GameConfig::default(), RandomSpawner::new(3)).unwrap();
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().tile_count(), 2);
    }

    #[test]
    fn test_resume_finished_game_starts_fresh() {
        let mut finished = saved(vec![SavedTile { x: 0, y: 0, value: 8 }]);
        finished.over = true;
        let mut store = MemoryStore::with_game(finished);

        let game = resume_or_new(&mut store, GameConfig::default(), RandomSpawner::new(3)).unwrap();
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_high_score_only_increases() {
        let mut store = MemoryStore::new();
        let mut tracker = HighScoreTracker::load(&store);
        assert_eq!(tracker.best(), 0);

        assert!(tracker.update_if_needed(&mut store, 100).unwrap());
        assert!(!tracker.update_if_needed(&mut store, 40).unwrap());
        assert!(!tracker.update_if_needed(&mut store, 100).unwrap());
        assert_eq!(store.high_score().unwrap(), 100);
        assert_eq!(HighScoreTracker::load(&store).best(), 100);
    }

    #[test]
    fn test_save_progress_writes_game_and_score() {
        let mut game =
            GameManager::with_spawner(GameConfig::default(), ScriptedSpawner::default()).unwrap();
        let grid = Grid::from_rows(&[
            vec![2, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        game.set_grid(grid).unwrap();
        game.make_move(Direction::Left);

        let mut store = MemoryStore::new();
        let mut tracker = HighScoreTracker::default();
        save_progress(&mut store, &mut tracker, &game).unwrap();

        assert_eq!(store.high_score().unwrap(), 4);
        let stored = store.load_game().unwrap().unwrap();
        assert_eq!(stored.score, 4);
        assert_eq!(stored.tiles, vec![SavedTile { x: 0, y: 0, value: 4 }]);
    }
}

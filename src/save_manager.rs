use crate::constants::{SAVE_SCHEMA_VERSION, SAVE_VERSION_MAGIC};
use crate::game_state::GameState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Persists the game state with a checksummed binary format.
///
/// File layout:
/// - Version magic (8 bytes, little endian)
/// - Payload length (4 bytes, little endian)
/// - Bincode-serialized game state
/// - SHA-256 checksum over the three fields above
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager pointed at the platform save location.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "idle-rpg").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Creates a SaveManager using an explicit save file path.
    pub fn with_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    /// Saves the game state, stamping `last_update_time` and the player's
    /// `last_save_time` to `now` immediately before serialization.
    pub fn save(&self, state: &mut GameState, now: i64) -> io::Result<()> {
        state.last_update_time = now;
        state.player.last_save_time = now;

        let data = bincode::serialize(state)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        Ok(())
    }

    /// Loads the game state, verifying the version magic and checksum.
    ///
    /// Any failure (missing file, wrong magic, checksum mismatch, decode
    /// error) is an `io::Error`; callers treat all of them as "no usable
    /// prior save".
    pub fn load(&self) -> io::Result<GameState> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);

        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        let mut state: GameState = bincode::deserialize(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // Unrecognized schema versions are read as the earliest known schema.
        if state.version != SAVE_SCHEMA_VERSION {
            state.version = SAVE_SCHEMA_VERSION.to_string();
        }

        Ok(state)
    }

    /// Checks if a save file exists.
    pub fn exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Deletes the save file, if any.
    pub fn delete(&self) -> io::Result<()> {
        if self.save_path.exists() {
            fs::remove_file(&self.save_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::BattleState;
    use tempfile::TempDir;

    fn temp_manager() -> (TempDir, SaveManager) {
        let dir = TempDir::new().expect("temp dir");
        let manager = SaveManager::with_path(dir.path().join("save.dat"));
        (dir, manager)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, manager) = temp_manager();

        let mut state = GameState::new(1_000);
        state.player.level = 7;
        state.player.gold = 420;
        state.player.experience = 55;
        state.battle_state = BattleState::Idle;

        manager.save(&mut state, 2_000).expect("save");
        assert!(manager.exists());

        let loaded = manager.load().expect("load");
        assert_eq!(loaded, state);
        assert_eq!(loaded.player.level, 7);
        assert_eq!(loaded.player.gold, 420);
    }

    #[test]
    fn test_save_stamps_timestamps() {
        let (_dir, manager) = temp_manager();

        let mut state = GameState::new(1_000);
        manager.save(&mut state, 9_999).expect("save");

        assert_eq!(state.last_update_time, 9_999);
        assert_eq!(state.player.last_save_time, 9_999);

        let loaded = manager.load().expect("load");
        assert_eq!(loaded.last_update_time, 9_999);
        assert_eq!(loaded.player.last_save_time, 9_999);
    }

    #[test]
    fn test_load_missing_file() {
        let (_dir, manager) = temp_manager();
        let result = manager.load();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_load_rejects_corrupted_payload() {
        let (dir, manager) = temp_manager();

        let mut state = GameState::new(1_000);
        manager.save(&mut state, 2_000).expect("save");

        // Flip a byte in the middle of the payload
        let path = dir.path().join("save.dat");
        let mut bytes = fs::read(&path).expect("read");
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        fs::write(&path, bytes).expect("write");

        let result = manager.load();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_rejects_wrong_magic() {
        let (dir, manager) = temp_manager();

        fs::write(dir.path().join("save.dat"), [0u8; 64]).expect("write");

        let result = manager.load();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_rejects_truncated_file() {
        let (dir, manager) = temp_manager();

        let mut state = GameState::new(1_000);
        manager.save(&mut state, 2_000).expect("save");

        let path = dir.path().join("save.dat");
        let bytes = fs::read(&path).expect("read");
        fs::write(&path, &bytes[..bytes.len() / 2]).expect("write");

        assert!(manager.load().is_err());
    }

    #[test]
    fn test_unknown_schema_version_reads_as_earliest() {
        let (_dir, manager) = temp_manager();

        let mut state = GameState::new(1_000);
        state.version = "9.9".to_string();
        manager.save(&mut state, 2_000).expect("save");

        let loaded = manager.load().expect("load");
        assert_eq!(loaded.version, "1.0");
    }

    #[test]
    fn test_delete() {
        let (_dir, manager) = temp_manager();

        let mut state = GameState::new(1_000);
        manager.save(&mut state, 2_000).expect("save");
        assert!(manager.exists());

        manager.delete().expect("delete");
        assert!(!manager.exists());

        // Deleting again is fine
        manager.delete().expect("delete twice");
    }

    #[test]
    fn test_mid_battle_state_round_trips() {
        use crate::enemy::{Enemy, EnemyKind};
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let (_dir, manager) = temp_manager();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let mut state = GameState::new(1_000);
        state.current_enemy = Some(Enemy::create_for_level(3, EnemyKind::Normal, &mut rng));
        state.battle_state = BattleState::Fighting;

        manager.save(&mut state, 2_000).expect("save");
        let loaded = manager.load().expect("load");

        assert_eq!(loaded.battle_state, BattleState::Fighting);
        assert_eq!(loaded.current_enemy, state.current_enemy);
    }
}

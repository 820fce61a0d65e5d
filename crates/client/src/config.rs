//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration required to bootstrap the runtime and the command loop.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub save_data_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    pub session_id: Option<String>,
    pub world_map: String,
    pub command_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_data_dir: None,
            seed: None,
            session_id: None,
            world_map: "world".to_string(),
            command_buffer: 32,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_DATA_DIR` - Content directory (default: `data`)
    /// - `SAVE_DATA_DIR` - Directory for save slots (default: platform-specific)
    /// - `GAME_SEED` - Fixed game seed (default: random)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `GAME_WORLD_MAP` - Map id of the world map (default: `world`)
    /// - `GAME_COMMAND_BUFFER` - Runtime command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("GAME_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config.save_data_dir = env::var("SAVE_DATA_DIR").ok().map(PathBuf::from);

        config.seed = read_env::<u64>("GAME_SEED");

        config.session_id = env::var("GAME_SESSION_ID").ok();

        if let Ok(map) = env::var("GAME_WORLD_MAP") {
            config.world_map = map;
        }

        if let Some(capacity) = read_env::<usize>("GAME_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }

        config
    }

    /// Save directory, falling back to the platform data directory.
    pub fn save_dir(&self) -> PathBuf {
        self.save_data_dir
            .clone()
            .unwrap_or_else(crate::dirs::save_dir)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

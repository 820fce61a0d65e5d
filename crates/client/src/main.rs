//! Terminal client entry point.
use std::sync::Arc;

use anyhow::{Context, Result};
use caislean_client::{App, ClientConfig, logging};
use game_content::ContentFactory;
use runtime::{FileSaveRepository, Runtime, RuntimeConfig};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    logging::setup_logging(&config.session_id)?;

    let content = ContentFactory::new(&config.data_dir)
        .load_content(&config.world_map)
        .with_context(|| format!("loading game data from {}", config.data_dir.display()))?;

    let save_dir = config.save_dir();
    let repository = FileSaveRepository::new(&save_dir)
        .with_context(|| format!("opening save directory {}", save_dir.display()))?;

    let mut builder = Runtime::builder()
        .config(RuntimeConfig {
            command_buffer_size: config.command_buffer,
            ..RuntimeConfig::default()
        })
        .content(content)
        .repository(Arc::new(repository));
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let runtime = builder.build()?;
    tracing::info!(seed = runtime.seed(), saves = %save_dir.display(), "runtime ready");

    let mut app = App::new(runtime.handle(), std::io::stdout());
    app.run(BufReader::new(tokio::io::stdin())).await?;
    drop(app);

    runtime.shutdown().await?;
    Ok(())
}

use anyhow::Result;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

const DEFAULT_FILTER: &str = "info";

fn builder(env: Env<'_>) -> Builder {
    Builder::from_env(env.default_filter_or(DEFAULT_FILTER))
}

/// Route log output to `path`. The terminal belongs to the UI while it runs.
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    builder(Env::default())
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

/// Log to stderr, for one-shot commands.
pub fn init_stderr() {
    let _ = builder(Env::default()).try_init();
}

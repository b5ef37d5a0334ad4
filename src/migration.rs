use std::{fs, path::Path, path::PathBuf};

use anyhow::{anyhow, Context};
use sqlx::{Pool, Postgres};

/// Runs every `NNN_name.sql` file in `dir` in numeric order.
pub async fn migrate(p: &Pool<Postgres>, dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let migration_files = migration_files(dir.as_ref())?;

    log::info!("starting migration");
    for (_, path) in &migration_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        log::info!("migrating {}", path.display());
        sqlx::raw_sql(&content)
            .execute(p)
            .await
            .with_context(|| format!("migration {} failed", path.display()))?;
    }
    log::info!("migration end");

    Ok(())
}

fn migration_files(dir: &Path) -> anyhow::Result<Vec<(usize, PathBuf)>> {
    let mut migration_files: Vec<(usize, PathBuf)> = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("cannot read migrations in {}", dir.display()))?
    {
        let entry = entry?;

        if !entry.metadata()?.is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().map_or(true, |e| e != "sql") {
            continue;
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("invalid migration file name {}", path.display()))?;
        let migration_number: usize = file_name
            .get(..3)
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| anyhow!("migration {} must start with a 3 digit number", file_name))?;

        migration_files.push((migration_number, path))
    }

    migration_files.sort_by_key(|v| v.0);
    Ok(migration_files)
}

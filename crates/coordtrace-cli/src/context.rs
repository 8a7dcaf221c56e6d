use std::cell::RefCell;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;

use coordtrace_store::Store;

/// Lazily opens the store on first use, mirroring the teacher's
/// `ExecutionContext::workspace()` pattern: most subcommands need the store,
/// but opening it eagerly would mean every error path (including `--help`)
/// pays for a schema check.
pub struct ExecutionContext {
    db_path: PathBuf,
    store: OnceCell<RefCell<Store>>,
}

impl ExecutionContext {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            store: OnceCell::new(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn store(&self) -> Result<&RefCell<Store>> {
        self.store.get_or_try_init(|| {
            Store::open(&self.db_path)
                .map(RefCell::new)
                .with_context(|| format!("failed to open store at {}", self.db_path.display()))
        })
    }
}

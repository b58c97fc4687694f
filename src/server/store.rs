//! JSON data file holding the registry and the menu between restarts.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use crate::server::lifecycle::menu::Menu;
use crate::server::lifecycle::OrderLifecycle;

#[derive(Debug, Deserialize)]
pub(crate) struct Snapshot {
    pub lifecycle: OrderLifecycle,
    pub menu: Menu,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    lifecycle: &'a OrderLifecycle,
    menu: &'a Menu,
}

#[derive(Debug)]
pub(crate) struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` until a first snapshot has been written.
    pub fn load(&self) -> anyhow::Result<Option<Snapshot>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", self.path.display())),
        };
        let snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    /// Writes a sibling `.tmp` file and renames it over the previous snapshot.
    pub fn save(&self, lifecycle: &OrderLifecycle, menu: &Menu) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&SnapshotRef { lifecycle, menu })
            .context("failed to serialize snapshot")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

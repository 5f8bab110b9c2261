use autolobby_core::{MapClassifier, MapIteration, MapLister, RngState};
use log::{debug, warn};
use std::path::Path;

/// Ordered set of candidate map files for the configured pattern. Entries
/// are file names relative to the resolved directory; duplicates are
/// harmless and insertion order is enumeration order.
#[derive(Debug, Default)]
pub struct MapPool {
    entries: Vec<String>,
    cursor: usize,
}

impl MapPool {
    /// Re-enumerate candidates, replace the pool atomically and reset the
    /// cursor. Enumeration failure yields an empty pool, not an error.
    pub fn reload(
        &mut self,
        lister: &dyn MapLister,
        classifier: &dyn MapClassifier,
        dir: &str,
        pattern: &str,
    ) {
        self.cursor = 0;
        self.entries.clear();
        if pattern.is_empty() {
            return;
        }
        let names = match lister.list(pattern) {
            Ok(names) => names,
            Err(err) => {
                warn!("map enumeration failed for {pattern}: {err}");
                return;
            }
        };
        for name in names {
            let full = join_map_path(dir, &name);
            if classifier.classify(Path::new(&full)).loadable() {
                self.entries.push(name);
            }
        }
        debug!("map pool reloaded, {} candidates", self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Next candidate under `policy`, or `None` on an empty pool. `Sequence`
    /// advances the cursor, so call this only when a new selection is
    /// actually wanted.
    pub fn select_next(&mut self, policy: MapIteration, rng: &mut RngState) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let chosen = match policy {
            MapIteration::Random => rng.index(self.entries.len()),
            MapIteration::Sequence => {
                if self.cursor >= self.entries.len() {
                    self.cursor = 0;
                }
                let at = self.cursor;
                self.cursor += 1;
                at
            }
        };
        self.entries.get(chosen).map(String::as_str)
    }
}

pub fn join_map_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

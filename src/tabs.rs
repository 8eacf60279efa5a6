//! Named documents, one editing engine each, with a single active tab

use std::path::{Path, PathBuf};

use crate::config::EditorConfig;
use crate::editable::{EditingEngine, GlyphMetrics};
use crate::error::EditError;
use crate::file_source::FileSource;
use crate::file_source::document_name;

/// One open document
#[derive(Debug, Clone)]
pub struct Tab<M: GlyphMetrics> {
    pub name: String,
    /// Backing file, if the document was opened from one
    pub path: Option<PathBuf>,
    pub engine: EditingEngine<M>,
}

/// Ordered set of tabs keyed by name
#[derive(Debug, Clone)]
pub struct TabManager<M: GlyphMetrics + Clone> {
    config: EditorConfig,
    metrics: M,
    tabs: Vec<Tab<M>>,
    active: Option<usize>,
}

impl<M: GlyphMetrics + Clone> TabManager<M> {
    pub fn new(config: EditorConfig, metrics: M) -> Self {
        Self {
            config,
            metrics,
            tabs: Vec::new(),
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains_tab(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.name == name)
    }

    /// Open `text` under `name` and make it active.
    ///
    /// A name that is already open is activated without reloading. When the
    /// text does not fit, no tab is added and the active tab is unchanged.
    pub fn open_document(&mut self, name: &str, text: &str) -> Result<(), EditError> {
        self.open_with_path(name, None, text)
    }

    /// Load a file through `source` and open it under its file name
    pub fn open_file(&mut self, source: &dyn FileSource, path: &Path) -> Result<(), EditError> {
        let name = document_name(path);
        if let Some(index) = self.position(&name) {
            self.active = Some(index);
            return Ok(());
        }
        let text = source.load(path)?;
        self.open_with_path(&name, Some(path.to_path_buf()), &text)
    }

    fn open_with_path(
        &mut self,
        name: &str,
        path: Option<PathBuf>,
        text: &str,
    ) -> Result<(), EditError> {
        if let Some(index) = self.position(name) {
            tracing::debug!(name, "tab already open, activating");
            self.active = Some(index);
            return Ok(());
        }
        let engine = EditingEngine::with_text(&self.config, self.metrics.clone(), text)
            .inspect_err(|e| tracing::warn!(name, "Failed to open tab: {}", e))?;
        self.tabs.push(Tab {
            name: name.to_string(),
            path,
            engine,
        });
        self.active = Some(self.tabs.len() - 1);
        tracing::info!(name, tabs = self.tabs.len(), "opened tab");
        Ok(())
    }

    /// Activate the tab named `name`. Returns false if no such tab exists.
    pub fn set_active_tab(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> Option<&Tab<M>> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab<M>> {
        self.active.and_then(|i| self.tabs.get_mut(i))
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active().map(|tab| tab.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Tab<M>> {
        self.position(name).map(|i| &self.tabs[i])
    }

    pub fn tab_names(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|tab| tab.name.as_str())
    }

    /// Close a tab. The neighbour to its left (or the new first tab) becomes
    /// active when the closed tab was active.
    pub fn close_tab(&mut self, name: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        self.tabs.remove(index);
        self.active = match self.active {
            _ if self.tabs.is_empty() => None,
            Some(active) if active == index => Some(index.saturating_sub(1)),
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        tracing::debug!(name, tabs = self.tabs.len(), "closed tab");
        true
    }

    /// Save the active tab back to its file
    pub fn save_active(&self, source: &dyn FileSource) -> Result<(), EditError> {
        let tab = self
            .active()
            .ok_or_else(|| EditError::Io("No active tab".to_string()))?;
        let path = tab
            .path
            .as_deref()
            .ok_or_else(|| EditError::Io(format!("{} has no backing file", tab.name)))?;
        tab.engine.save(source, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::MonospaceMetrics;

    fn manager() -> TabManager<MonospaceMetrics> {
        TabManager::new(EditorConfig::default(), MonospaceMetrics::default())
    }

    #[test]
    fn test_open_activates_new_tab() {
        let mut tabs = manager();
        tabs.open_document("a.go", "package a").unwrap();
        tabs.open_document("b.go", "package b").unwrap();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.active_name(), Some("b.go"));
    }

    #[test]
    fn test_reopen_activates_without_reload() {
        let mut tabs = manager();
        tabs.open_document("a.go", "first").unwrap();
        tabs.open_document("b.go", "").unwrap();
        tabs.open_document("a.go", "second").unwrap();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.active_name(), Some("a.go"));
        assert_eq!(tabs.active().unwrap().engine.text(), "first");
    }

    #[test]
    fn test_close_active_tab_moves_left() {
        let mut tabs = manager();
        for name in ["a", "b", "c"] {
            tabs.open_document(name, "").unwrap();
        }
        assert!(tabs.set_active_tab("b"));
        assert!(tabs.close_tab("b"));
        assert_eq!(tabs.active_name(), Some("a"));
        assert!(tabs.close_tab("a"));
        assert_eq!(tabs.active_name(), Some("c"));
        assert!(tabs.close_tab("c"));
        assert!(tabs.active().is_none());
        assert!(!tabs.close_tab("c"));
    }
}

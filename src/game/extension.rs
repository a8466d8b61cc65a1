//! Extensions: named bundles of card definitions and effects.
//!
//! Extensions declare the names of the extensions they build on.
//! [`Game::load`] orders a batch depth-first so every dependency initializes
//! before its dependents, and refuses the whole batch if the graph is broken.

use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{GameError, Result};

use super::Game;

/// A loadable card set.
pub trait Extension {
    /// Unique name other extensions refer to.
    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "0.0.0"
    }

    /// Names of extensions that must initialize first.
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Register definitions and effects on `game`.
    fn initialize(&self, game: &mut Game) -> Result<()> {
        let _ = game;
        Ok(())
    }
}

impl Game {
    /// Load `extensions`, dependencies first.
    ///
    /// Extensions whose name is already loaded are skipped. Dependencies may
    /// be satisfied by earlier loads or by other members of the batch. A
    /// cycle or an unknown dependency fails before anything is initialized.
    pub fn load(&mut self, extensions: Vec<Box<dyn Extension>>) -> Result<()> {
        let supplied: Vec<Rc<dyn Extension>> = extensions.into_iter().map(Rc::from).collect();
        let by_name: FxHashMap<&str, &Rc<dyn Extension>> =
            supplied.iter().map(|extension| (extension.name(), extension)).collect();
        let loaded: FxHashSet<&str> = self.extensions.iter().map(|e| e.name()).collect();

        let mut order = Ordering {
            by_name: &by_name,
            loaded: &loaded,
            visiting: Vec::new(),
            done: FxHashSet::default(),
            order: Vec::new(),
        };
        for extension in &supplied {
            order.visit(extension)?;
        }
        let order = order.order;

        tracing::debug!(
            order = ?order.iter().map(|e| e.name()).collect::<Vec<_>>(),
            "extension load order"
        );

        for extension in order {
            extension.initialize(self)?;
            tracing::debug!(name = extension.name(), version = extension.version(), "extension loaded");
            self.extensions.push(extension);
        }
        Ok(())
    }

    /// Names of loaded extensions in initialization order.
    #[must_use]
    pub fn extension_names(&self) -> Vec<&str> {
        self.extensions.iter().map(|e| e.name()).collect()
    }

    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&dyn Extension> {
        self.extensions
            .iter()
            .find(|e| e.name() == name)
            .map(|e| &**e)
    }
}

/// Depth-first dependency walk over one batch.
struct Ordering<'a> {
    by_name: &'a FxHashMap<&'a str, &'a Rc<dyn Extension>>,
    loaded: &'a FxHashSet<&'a str>,
    visiting: Vec<String>,
    done: FxHashSet<String>,
    order: Vec<Rc<dyn Extension>>,
}

impl Ordering<'_> {
    fn visit(&mut self, extension: &Rc<dyn Extension>) -> Result<()> {
        let name = extension.name();
        if self.loaded.contains(name) || self.done.contains(name) {
            return Ok(());
        }
        if self.visiting.iter().any(|v| v == name) {
            return Err(GameError::CircularDependency {
                extension: name.to_string(),
            });
        }

        self.visiting.push(name.to_string());
        for dependency in extension.dependencies() {
            if self.loaded.contains(dependency.as_str()) {
                continue;
            }
            let Some(&next) = self.by_name.get(dependency.as_str()) else {
                return Err(GameError::MissingDependency {
                    extension: name.to_string(),
                    dependency,
                });
            };
            self.visit(next)?;
        }
        self.visiting.pop();

        self.done.insert(name.to_string());
        self.order.push(Rc::clone(extension));
        Ok(())
    }
}

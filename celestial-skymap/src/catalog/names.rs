//! Named-star catalog.
//!
//! An ordered set of star ids notable enough to be labelled individually.
//! Load order is the canonical order of the named-star bitmap: the star at
//! position `i` owns bit `i`.
//!
//! Text form is one star per line, an id optionally followed by a display
//! name. Blank lines and `#` comments are ignored.
//!
//! ```text
//! # Hipparcos id  name
//! 32349  Sirius
//! 30438  Canopus
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::StarId;
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct StarNames {
    ids: Vec<StarId>,
    names: Vec<Option<String>>,
    positions: HashMap<StarId, usize>,
}

impl StarNames {
    /// Build from ids in canonical order. Repeated ids keep their first position.
    pub fn from_ids(ids: impl IntoIterator<Item = StarId>) -> Self {
        let mut names = Self::default();
        for id in ids {
            names.insert(id, None);
        }
        names
    }

    /// Parse the line-oriented text form. Lines that do not start with an
    /// integer id are skipped with a warning.
    pub fn parse(content: &str) -> Self {
        let mut names = Self::default();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id_token, rest) = line
                .split_once(char::is_whitespace)
                .unwrap_or((line, ""));
            let Ok(id) = id_token.parse::<StarId>() else {
                warn!(line = line_no + 1, token = id_token, "skipping named star line");
                continue;
            };

            let name = rest.trim();
            names.insert(id, (!name.is_empty()).then(|| name.to_string()));
        }

        debug!(named_stars = names.len(), "loaded named-star catalog");
        names
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&content))
    }

    fn insert(&mut self, id: StarId, name: Option<String>) {
        if self.positions.contains_key(&id) {
            return;
        }
        self.positions.insert(id, self.ids.len());
        self.ids.push(id);
        self.names.push(name);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: StarId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Canonical bit position of `id`.
    pub fn position(&self, id: StarId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn name(&self, id: StarId) -> Option<&str> {
        self.position(id).and_then(|i| self.names[i].as_deref())
    }

    /// Ids in canonical order.
    pub fn ids(&self) -> &[StarId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = StarId> + '_ {
        self.ids.iter().copied()
    }
}

//! Constellation stick-figure catalog.
//!
//! The source is line oriented, one constellation per line:
//!
//! ```text
//! <code> <edge count> <reserved> <star id> <star id> <star id> <star id> ...
//! ```
//!
//! Lines whose first token starts with `#` are comments.
//!
//! Star ids after the three-token prefix are a flat list of edge endpoint
//! pairs. For every code the catalog keeps the deduplicated ascending list of
//! star ids touched by an edge, the edges themselves in source order, and the
//! same edges rewritten as positions into the sorted id list.
//!
//! Code order (first appearance in the source) and ascending star-id order are
//! the canonical orders used to assign bit positions when packing.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::{ConstellationCode, StarId};
use crate::error::{Error, Result};

/// Upper bound on catalog codes. The constellation mask is a 96-bit field.
pub const MAX_CONSTELLATIONS: usize = 96;

/// Edges of one constellation figure, in raw and index form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Figure {
    sorted_star_ids: Vec<StarId>,
    star_id_pairs: Vec<(StarId, StarId)>,
    star_index_pairs: Vec<(usize, usize)>,
}

impl Figure {
    fn from_pairs(star_id_pairs: Vec<(StarId, StarId)>) -> Self {
        let mut sorted_star_ids: Vec<StarId> = star_id_pairs
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .collect();
        sorted_star_ids.sort_unstable();
        sorted_star_ids.dedup();

        let star_index_pairs = star_id_pairs
            .iter()
            .filter_map(|&(a, b)| {
                let start = sorted_star_ids.binary_search(&a).ok()?;
                let end = sorted_star_ids.binary_search(&b).ok()?;
                Some((start, end))
            })
            .collect();

        Self {
            sorted_star_ids,
            star_id_pairs,
            star_index_pairs,
        }
    }

    /// Star ids touched by at least one edge, ascending and unique.
    pub fn sorted_star_ids(&self) -> &[StarId] {
        &self.sorted_star_ids
    }

    /// Edges as star-id pairs, in source order.
    pub fn star_id_pairs(&self) -> &[(StarId, StarId)] {
        &self.star_id_pairs
    }

    /// Edges as positions into [`Figure::sorted_star_ids`].
    pub fn star_index_pairs(&self) -> &[(usize, usize)] {
        &self.star_index_pairs
    }

    pub fn star_count(&self) -> usize {
        self.sorted_star_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.star_id_pairs.len()
    }

    /// True if `star_id` is an endpoint of at least one edge.
    pub fn contains_star(&self, star_id: StarId) -> bool {
        self.sorted_star_ids.binary_search(&star_id).is_ok()
    }

    /// Other endpoint of the first edge that contains `star_id`.
    pub fn find_pair(&self, star_id: StarId) -> Option<StarId> {
        self.star_id_pairs.iter().find_map(|&(a, b)| {
            if a == star_id {
                Some(b)
            } else if b == star_id {
                Some(a)
            } else {
                None
            }
        })
    }
}

/// The full figure catalog, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct ConstellationFigures {
    codes: Vec<ConstellationCode>,
    figures: Vec<Figure>,
    index: HashMap<ConstellationCode, usize>,
}

impl ConstellationFigures {
    /// Parse catalog text.
    ///
    /// Lines with fewer than three tokens and `#` comment lines are skipped
    /// silently. Lines whose endpoints are not integers are skipped with a
    /// warning. A code that appears on several lines keeps its first position
    /// and collects the edges of every line. An unpaired trailing endpoint is
    /// ignored.
    ///
    /// # Errors
    /// Returns [`Error::Catalog`] if the source names more than
    /// [`MAX_CONSTELLATIONS`] distinct codes.
    pub fn parse(content: &str) -> Result<Self> {
        let mut codes: Vec<ConstellationCode> = Vec::new();
        let mut pairs: Vec<Vec<(StarId, StarId)>> = Vec::new();
        let mut index: HashMap<ConstellationCode, usize> = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 3 || tokens[0].starts_with('#') {
                continue;
            }

            let endpoints = match parse_endpoints(&tokens[3..]) {
                Some(endpoints) => endpoints,
                None => {
                    warn!(
                        line = line_no + 1,
                        code = tokens[0],
                        "skipping figure line with non-numeric star id"
                    );
                    continue;
                }
            };

            let slot = *index.entry(tokens[0].to_string()).or_insert_with(|| {
                codes.push(tokens[0].to_string());
                pairs.push(Vec::new());
                codes.len() - 1
            });
            pairs[slot].extend(endpoints.chunks_exact(2).map(|p| (p[0], p[1])));
        }

        if codes.len() > MAX_CONSTELLATIONS {
            return Err(Error::Catalog(format!(
                "{} constellation codes exceed the limit of {}",
                codes.len(),
                MAX_CONSTELLATIONS
            )));
        }

        let figures: Vec<Figure> = pairs.into_iter().map(Figure::from_pairs).collect();

        debug!(
            constellations = codes.len(),
            edges = figures.iter().map(Figure::edge_count).sum::<usize>(),
            star_slots = figures.iter().map(Figure::star_count).sum::<usize>(),
            "loaded constellation figures"
        );

        Ok(Self {
            codes,
            figures,
            index,
        })
    }

    /// Read and parse a catalog file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Constellation codes in canonical (load) order.
    pub fn codes(&self) -> &[ConstellationCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Canonical bit position of `code`.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub fn figure(&self, code: &str) -> Option<&Figure> {
        self.position(code).map(|i| &self.figures[i])
    }

    /// `(code, figure)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Figure)> {
        self.codes.iter().map(String::as_str).zip(&self.figures)
    }

    pub fn sorted_star_ids(&self, code: &str) -> Option<&[StarId]> {
        self.figure(code).map(Figure::sorted_star_ids)
    }

    pub fn star_id_pairs(&self, code: &str) -> Option<&[(StarId, StarId)]> {
        self.figure(code).map(Figure::star_id_pairs)
    }

    pub fn star_index_pairs(&self, code: &str) -> Option<&[(usize, usize)]> {
        self.figure(code).map(Figure::star_index_pairs)
    }

    /// Other endpoint of the first edge of `code` containing `star_id`.
    pub fn find_pair(&self, code: &str, star_id: StarId) -> Option<StarId> {
        self.figure(code)?.find_pair(star_id)
    }

    /// True if `star_id` is drawn by at least one edge of `code`.
    pub fn is_edge_star(&self, code: &str, star_id: StarId) -> bool {
        self.figure(code).is_some_and(|f| f.contains_star(star_id))
    }

    /// Width of the star-edge bitmap: every code's star count, summed.
    pub fn total_star_slots(&self) -> usize {
        self.figures.iter().map(Figure::star_count).sum()
    }
}

fn parse_endpoints(tokens: &[&str]) -> Option<Vec<StarId>> {
    tokens.iter().map(|t| t.parse::<StarId>().ok()).collect()
}

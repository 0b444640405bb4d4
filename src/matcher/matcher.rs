use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::analysis::analysis_model::HeuristicMatch;
use crate::catalog::catalog_model::{ElementTag, HeuristicId, category_rank};
use crate::catalog::element_catalog::union_for;
use crate::error::MatchError;
use crate::repository::repository::HeuristicRepository;

// ============================================================================
// HeuristicMatcher: element tags → ordered, deduplicated heuristics
// ============================================================================

pub struct HeuristicMatcher<'a> {
    repository: &'a dyn HeuristicRepository,
}

impl<'a> HeuristicMatcher<'a> {
    pub fn new(repository: &'a dyn HeuristicRepository) -> Self {
        Self { repository }
    }

    /// Match element tags to heuristics.
    ///
    /// Identifiers are collected as a union over the catalog, resolved
    /// concurrently, deduplicated and stably sorted by category order.
    /// Identifiers that fail to resolve are dropped; only an unavailable
    /// repository fails the whole call.
    pub fn match_elements(&self, elements: &[ElementTag]) -> Result<Vec<HeuristicMatch>, MatchError> {
        self.repository
            .check_available()
            .map_err(MatchError::RepositoryUnavailable)?;

        let ids = union_for(elements);
        debug!(elements = elements.len(), identifiers = ids.len(), "resolving heuristics");

        let resolved = self.resolve_all(&ids);
        let mut matches = dedupe_by_id(resolved);
        sort_by_category(&mut matches);

        debug!(matched = matches.len(), "heuristic match complete");
        Ok(matches)
    }

    /// Fan out one resolution per identifier. Each branch fails on its own.
    /// The result keeps the input order.
    fn resolve_all(&self, ids: &[HeuristicId]) -> Vec<HeuristicMatch> {
        let repository = self.repository;

        ids.par_iter()
            .map(|id| match repository.resolve(id) {
                Ok(record) => Some(HeuristicMatch::from_record(id.clone(), record)),
                Err(e) => {
                    warn!(heuristic = %id, error = %e, "dropping unresolvable heuristic");
                    None
                }
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Keep one entry per identifier at its first position; a later duplicate
/// replaces the stored record.
pub fn dedupe_by_id(matches: Vec<HeuristicMatch>) -> Vec<HeuristicMatch> {
    let mut index: HashMap<HeuristicId, usize> = HashMap::new();
    let mut unique: Vec<HeuristicMatch> = Vec::with_capacity(matches.len());

    for m in matches {
        match index.get(&m.slug) {
            Some(&pos) => unique[pos] = m,
            None => {
                index.insert(m.slug.clone(), unique.len());
                unique.push(m);
            }
        }
    }

    unique
}

/// Stable sort by canonical category order, unranked categories last.
pub fn sort_by_category(matches: &mut [HeuristicMatch]) {
    matches.sort_by_key(|m| category_rank(&m.category));
}

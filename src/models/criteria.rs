use serde::{Deserialize, Serialize};

use super::CatalogItem;

/// Episode-count bucket used by the length filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LengthBucket {
    /// 12 episodes or fewer
    Short,
    /// 13 to 24 episodes
    Medium,
    /// 25 episodes or more
    Long,
}

impl LengthBucket {
    /// Buckets an episode count. Total over all counts; buckets are disjoint.
    pub fn of(episodes: u32) -> Self {
        match episodes {
            0..=12 => LengthBucket::Short,
            13..=24 => LengthBucket::Medium,
            _ => LengthBucket::Long,
        }
    }
}

/// Selectable ordering for browse results
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Ascending case-insensitive title order
    #[default]
    Title,
    /// Descending base community rating
    Rating,
    /// Descending computed relevance score
    Relevance,
}

/// Active filter facets; every facet is optional and they compose with AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring match on the title; empty = off
    pub search: String,
    /// Item must carry ALL selected genres; empty = off
    pub genres: Vec<String>,
    /// Exact mood match
    pub mood: Option<String>,
    /// Exact studio match
    pub studio: Option<String>,
    /// When true, keep only items flagged as graphic
    pub graphic_only: bool,
    /// Episode-count bucket match
    pub length: Option<LengthBucket>,
}

impl FilterCriteria {
    /// Whether an item passes every active facet.
    ///
    /// An unset facet imposes no constraint, so an empty criteria set
    /// matches everything.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if !self.search.is_empty()
            && !item
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }

        if !self.genres.iter().all(|g| item.genres.contains(g)) {
            return false;
        }

        if let Some(mood) = &self.mood {
            if item.mood != *mood {
                return false;
            }
        }

        if let Some(studio) = &self.studio {
            if item.studio != *studio {
                return false;
            }
        }

        if self.graphic_only && !item.graphic {
            return false;
        }

        if let Some(bucket) = self.length {
            if LengthBucket::of(item.episodes) != bucket {
                return false;
            }
        }

        true
    }
}

use crate::{
    error::AppResult,
    models::{CatalogBundle, CatalogItem, Platform, WatchHistoryEntry},
};

use super::CatalogProvider;

/// Serves the built-in demo catalog and watch history
///
/// Used whenever no catalog URL is configured, and by tests that need a
/// known dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalogProvider;

impl BundledCatalogProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CatalogProvider for BundledCatalogProvider {
    async fn fetch(&self) -> AppResult<CatalogBundle> {
        Ok(CatalogBundle {
            items: demo_catalog(),
            history: demo_history(),
        })
    }

    fn name(&self) -> &'static str {
        "bundled"
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: u32,
    title: &str,
    genres: &[&str],
    studio: &str,
    episodes: u32,
    rating: f64,
    mood: &str,
    graphic: bool,
    year: i32,
    source: Platform,
    streaming_url: &str,
) -> CatalogItem {
    CatalogItem {
        id,
        title: title.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        studio: studio.to_string(),
        episodes,
        rating,
        mood: mood.to_string(),
        graphic,
        year,
        source: Some(source),
        streaming_url: Some(streaming_url.to_string()),
        image_url: None,
    }
}

fn demo_catalog() -> Vec<CatalogItem> {
    vec![
        item(
            1,
            "Attack on Titan",
            &["Action", "Drama", "Fantasy"],
            "Wit Studio",
            87,
            8.5,
            "Dark",
            true,
            2013,
            Platform::Crunchyroll,
            "https://www.crunchyroll.com/attack-on-titan",
        ),
        item(
            2,
            "My Hero Academia",
            &["Action", "Comedy", "Superhero"],
            "Bones",
            138,
            8.0,
            "Uplifting",
            false,
            2016,
            Platform::Crunchyroll,
            "https://www.crunchyroll.com/my-hero-academia",
        ),
        item(
            3,
            "Spirited Away",
            &["Adventure", "Fantasy", "Drama"],
            "Studio Ghibli",
            1,
            8.6,
            "Whimsical",
            false,
            2001,
            Platform::Netflix,
            "https://www.netflix.com/title/60023642",
        ),
        item(
            4,
            "Death Note",
            &["Thriller", "Mystery", "Psychological"],
            "Madhouse",
            37,
            8.6,
            "Dark",
            true,
            2006,
            Platform::Netflix,
            "https://www.netflix.com/title/70204970",
        ),
        item(
            5,
            "Cowboy Bebop",
            &["Action", "Sci-Fi", "Adventure"],
            "Sunrise",
            26,
            8.9,
            "Cool",
            false,
            1998,
            Platform::Netflix,
            "https://www.netflix.com/title/80000445",
        ),
        item(
            6,
            "Demon Slayer",
            &["Action", "Fantasy", "Supernatural"],
            "ufotable",
            55,
            8.7,
            "Intense",
            true,
            2019,
            Platform::Crunchyroll,
            "https://www.crunchyroll.com/demon-slayer",
        ),
        item(
            7,
            "Neon Genesis Evangelion",
            &["Mecha", "Psychological", "Drama"],
            "Gainax",
            26,
            8.5,
            "Dark",
            true,
            1995,
            Platform::Netflix,
            "https://www.netflix.com/title/81033445",
        ),
        item(
            8,
            "Jujutsu Kaisen",
            &["Action", "Fantasy", "Horror"],
            "MAPPA",
            47,
            8.6,
            "Intense",
            true,
            2020,
            Platform::Crunchyroll,
            "https://www.crunchyroll.com/jujutsu-kaisen",
        ),
    ]
}

fn demo_history() -> Vec<WatchHistoryEntry> {
    vec![
        WatchHistoryEntry {
            id: 1,
            title: "Attack on Titan".to_string(),
            watched_episodes: 50,
            source: Platform::Crunchyroll,
        },
        WatchHistoryEntry {
            id: 4,
            title: "Death Note".to_string(),
            watched_episodes: 37,
            source: Platform::Netflix,
        },
        WatchHistoryEntry {
            id: 5,
            title: "Cowboy Bebop".to_string(),
            watched_episodes: 10,
            source: Platform::Netflix,
        },
    ]
}

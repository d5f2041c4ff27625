use crate::error::{Error, Result};
use crate::post::{Post, CATALOG, FEATURED};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listing: ListingConfig,
    pub effects: EffectsConfig,
    pub layout: LayoutConfig,
    pub catalog: Vec<Post>,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub batch_size: usize,
    pub load_delay_ms: u64,
    pub load_more_label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub navbar_threshold: f64,
    pub navbar_offset: f64,
    pub stagger_ms: u64,
    pub press_ms: u64,
    pub frame_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub grid_top: f64,
    pub grid_left: f64,
    pub columns: usize,
    pub card_width: f64,
    pub card_height: f64,
    pub gap: f64,
}

/// The anchors a page provides. Absent anchors stay `None` so that a page
/// missing one of them can be rejected when the session starts.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub grid: Option<String>,
    pub load_more: Option<String>,
    pub search: Option<String>,
    pub navbar: Option<String>,
    pub dropdown: Option<String>,
    #[serde(default)]
    pub cards: Vec<Post>,
    #[serde(default)]
    pub nav_links: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub offset_top: f64,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(Error::Io)?;
        Self::parse(text.as_str())
    }

    /// Reads `path` if it exists, otherwise falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{:?} not found, using default config", path);
            Ok(Config::default())
        }
    }

    pub fn parse(text: &str) -> Result<Config> {
        toml::from_str(text).map_err(Error::Toml)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing: ListingConfig::default(),
            effects: EffectsConfig::default(),
            layout: LayoutConfig::default(),
            catalog: CATALOG.clone(),
            page: PageConfig::default(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            batch_size: 3,
            load_delay_ms: 1000,
            load_more_label: "Load More".to_string(),
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            navbar_threshold: 50.0,
            navbar_offset: 80.0,
            stagger_ms: 100,
            press_ms: 150,
            frame_ms: 16,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
            grid_top: 620.0,
            grid_left: 40.0,
            columns: 3,
            card_width: 380.0,
            card_height: 440.0,
            gap: 24.0,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        };
        let section = |id: &str, offset_top: f64| SectionConfig {
            id: id.to_string(),
            offset_top,
        };

        Self {
            grid: Some("blogGrid".to_string()),
            load_more: Some("loadMoreBtn".to_string()),
            search: Some("searchInput".to_string()),
            navbar: Some("mainNav".to_string()),
            dropdown: Some("categoriesDropdown".to_string()),
            cards: FEATURED.clone(),
            nav_links: strings(&["#home", "#blog", "#about", "#contact"]),
            categories: strings(&[
                "all",
                "technology",
                "design",
                "business",
                "web-development",
                "lifestyle",
            ]),
            sections: vec![
                section("home", 0.0),
                section("blog", 560.0),
                section("about", 2400.0),
                section("contact", 3000.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.listing.batch_size, 3);
        assert_eq!(config.listing.load_delay_ms, 1000);
        assert_eq!(config.catalog.len(), 3);
        assert_eq!(config.page.grid.as_deref(), Some("blogGrid"));
        assert_eq!(config.page.cards.len(), 6);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
            [listing]
            batch_size = 2

            [effects]
            navbar_threshold = 120.0
            "#,
        )
        .unwrap();

        assert_eq!(config.listing.batch_size, 2);
        assert_eq!(config.listing.load_more_label, "Load More");
        assert_eq!(config.effects.navbar_threshold, 120.0);
        assert_eq!(config.effects.navbar_offset, 80.0);
    }

    #[test]
    fn explicit_page_omits_missing_anchors() {
        let config = Config::parse(
            r#"
            [page]
            load_more = "loadMoreBtn"
            search = "searchInput"
            navbar = "nav"
            "#,
        )
        .unwrap();

        assert!(config.page.grid.is_none());
        assert!(config.page.dropdown.is_none());
        assert!(config.page.cards.is_empty());
    }

    #[test]
    fn catalog_entries_parse() {
        let config = Config::parse(
            r#"
            [[catalog]]
            image = "a.jpg"
            category = "Design"
            title = "One"
            description = "First"
            author = { name = "A", avatar = "a.png", date = "1 Jan 2024" }
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.catalog[0].author.name, "A");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(matches!(
            Config::parse("listing = 3"),
            Err(Error::Toml(_))
        ));
    }
}

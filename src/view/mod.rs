mod grid;
mod render;

pub use self::grid::{Card, CardId, Grid, Rect};
pub use self::render::ListingRenderer;

use crate::config::{LayoutConfig, PageConfig};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct LoadMoreButton {
    pub id: String,
    pub visible: bool,
    pub loading: bool,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct SearchInput {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Navbar {
    pub id: String,
    pub scrolled: bool,
}

#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct CategoryLink {
    pub category: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct Dropdown {
    pub id: String,
    pub open: bool,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub offset_top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone)]
pub struct Window {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
    pub behavior: ScrollBehavior,
}

impl Window {
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_y = top.max(0.0);
        self.behavior = behavior;
    }
}

/// Every element the handlers touch, resolved once when the page is loaded.
#[derive(Debug, Clone)]
pub struct View {
    pub grid: Grid,
    pub load_more: LoadMoreButton,
    pub search: SearchInput,
    pub navbar: Navbar,
    pub dropdown: Option<Dropdown>,
    pub nav_links: Vec<NavLink>,
    pub category_links: Vec<CategoryLink>,
    pub sections: Vec<Section>,
    pub window: Window,
}

impl View {
    pub fn resolve(page: &PageConfig, layout: &LayoutConfig, label: &str) -> Result<View> {
        let grid = page.grid.as_ref().ok_or(Error::MissingAnchor("grid"))?;
        let load_more = page
            .load_more
            .as_ref()
            .ok_or(Error::MissingAnchor("load more button"))?;
        let search = page
            .search
            .as_ref()
            .ok_or(Error::MissingAnchor("search input"))?;
        let navbar = page.navbar.as_ref().ok_or(Error::MissingAnchor("navbar"))?;

        let mut grid = Grid::new(grid.clone());
        for post in &page.cards {
            grid.append(post.clone());
        }

        let category_links = page
            .categories
            .iter()
            .map(|category| CategoryLink {
                category: category.clone(),
                active: category == "all",
            })
            .collect();

        let view = View {
            grid,
            load_more: LoadMoreButton {
                id: load_more.clone(),
                visible: true,
                loading: false,
                label: label.to_string(),
            },
            search: SearchInput {
                id: search.clone(),
                value: String::new(),
            },
            navbar: Navbar {
                id: navbar.clone(),
                scrolled: false,
            },
            dropdown: page.dropdown.as_ref().map(|id| Dropdown {
                id: id.clone(),
                open: false,
            }),
            nav_links: page
                .nav_links
                .iter()
                .map(|href| NavLink {
                    href: href.clone(),
                    active: false,
                })
                .collect(),
            category_links,
            sections: page
                .sections
                .iter()
                .map(|section| Section {
                    id: section.id.clone(),
                    offset_top: section.offset_top,
                })
                .collect(),
            window: Window {
                scroll_y: 0.0,
                width: layout.viewport_width,
                height: layout.viewport_height,
                behavior: ScrollBehavior::Instant,
            },
        };

        log::debug!(
            "resolved view: {} cards, {} nav links, {} categories",
            view.grid.len(),
            view.nav_links.len(),
            view.category_links.len()
        );

        Ok(view)
    }

    /// Looks up a section by an internal `#id` href.
    pub fn section(&self, href: &str) -> Option<&Section> {
        let id = href.strip_prefix('#')?;
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn visible_titles(&self) -> Vec<&str> {
        self.grid
            .visible()
            .map(|card| card.post.title.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(page: &PageConfig) -> Result<View> {
        View::resolve(page, &LayoutConfig::default(), "Load More")
    }

    #[test]
    fn default_page_resolves() {
        let view = resolve(&PageConfig::default()).unwrap();

        assert_eq!(view.grid.len(), 6);
        assert_eq!(view.load_more.label, "Load More");
        assert!(view.dropdown.is_some());
        assert!(view.category_links.iter().any(|l| l.category == "all" && l.active));
        assert_eq!(view.section("#blog").map(|s| s.offset_top), Some(560.0));
        assert!(view.section("blog").is_none());
    }

    #[test]
    fn missing_grid_fails_fast() {
        let page = PageConfig {
            grid: None,
            ..PageConfig::default()
        };

        let error = resolve(&page).unwrap_err();
        assert!(matches!(error, Error::MissingAnchor("grid")));
        assert_eq!(error.to_string(), "page has no grid element");
    }

    #[test]
    fn missing_search_input_fails_fast() {
        let page = PageConfig {
            search: None,
            ..PageConfig::default()
        };

        assert!(matches!(
            resolve(&page),
            Err(Error::MissingAnchor("search input"))
        ));
    }

    #[test]
    fn missing_navbar_fails_fast() {
        let page = PageConfig {
            navbar: None,
            ..PageConfig::default()
        };

        let error = resolve(&page).unwrap_err();
        assert!(matches!(error, Error::MissingAnchor("navbar")));
        assert_eq!(error.to_string(), "page has no navbar element");
    }

    #[test]
    fn dropdown_is_optional() {
        let page = PageConfig {
            dropdown: None,
            ..PageConfig::default()
        };

        assert!(resolve(&page).unwrap().dropdown.is_none());
    }
}

use crate::error::{Error, Result};
use crate::view::{Card, View};
use handlebars::Handlebars;
use serde::Serialize;
use std::io::Write;

const CARD_TEMPLATE: &str = r#"<div class="col-lg-4 col-md-6 col-sm-12{{#if fade_in}} fade-in{{/if}}{{#if animated}} animated{{/if}}" data-card="{{id}}"{{#unless visible}} style="display: none"{{/unless}}>
    <div class="blog-card"{{#if pressed}} style="transform: translateY(-8px) scale(0.98)"{{/if}}>
        <div class="card-image">
            <img src="{{post.image}}" alt="{{post.title}}" class="img-fluid">
        </div>
        <div class="card-content">
            <span class="category">{{post.category}}</span>
            <h3 class="card-title">{{post.title}}</h3>
            <p class="card-description">{{post.description}}</p>
            <div class="author-info">
                <img src="{{post.author.avatar}}" alt="{{post.author.name}}" class="author-avatar">
                <div class="author-details">
                    <span class="author-name">{{post.author.name}}</span>
                    <span class="post-date">{{post.author.date}}</span>
                </div>
            </div>
        </div>
    </div>
</div>
"#;

const LISTING_TEMPLATE: &str = r#"<div id="{{grid}}" class="row g-4">
{{#each cards}}{{> card}}{{/each}}</div>
<button id="{{button.id}}" class="btn btn-load-more{{#if button.loading}} loading{{/if}}"{{#unless button.visible}} style="display: none"{{/unless}}>{{button.label}}</button>
"#;

#[derive(Serialize)]
struct ButtonData<'a> {
    id: &'a str,
    visible: bool,
    loading: bool,
    label: &'a str,
}

#[derive(Serialize)]
struct ListingData<'a> {
    grid: &'a str,
    cards: &'a [Card],
    button: ButtonData<'a>,
}

/// Renders cards and the listing through handlebars. Every interpolated
/// value goes through the registry's HTML escaping.
pub struct ListingRenderer<'a> {
    registry: Handlebars<'a>,
}

impl<'a> ListingRenderer<'a> {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_partial("card", CARD_TEMPLATE)
            .map_err(Error::Template)?;
        registry
            .register_template_string("card", CARD_TEMPLATE)
            .map_err(Error::Template)?;
        registry
            .register_template_string("listing", LISTING_TEMPLATE)
            .map_err(Error::Template)?;

        Ok(Self { registry })
    }

    pub fn render_card(&self, card: &Card) -> Result<String> {
        self.registry.render("card", card).map_err(Error::Render)
    }

    pub fn render(&self, view: &View) -> Result<String> {
        self.registry
            .render("listing", &listing_data(view))
            .map_err(Error::Render)
    }

    pub fn render_to_write<W: Write>(&self, view: &View, writer: W) -> Result<()> {
        self.registry
            .render_to_write("listing", &listing_data(view), writer)
            .map_err(Error::Render)
    }
}

fn listing_data(view: &View) -> ListingData<'_> {
    ListingData {
        grid: view.grid.id.as_str(),
        cards: view.grid.cards(),
        button: ButtonData {
            id: view.load_more.id.as_str(),
            visible: view.load_more.visible,
            loading: view.load_more.loading,
            label: view.load_more.label.as_str(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, PageConfig};
    use crate::post::{Author, Post};
    use crate::view::CardId;

    fn view_with(cards: Vec<Post>) -> View {
        let page = PageConfig {
            cards,
            ..PageConfig::default()
        };
        View::resolve(&page, &LayoutConfig::default(), "Load More").unwrap()
    }

    fn hostile_post() -> Post {
        Post {
            image: "x.jpg\" onerror=\"alert(1)".to_string(),
            category: "Design".to_string(),
            title: "<script>alert('t')</script>".to_string(),
            description: "Fish & Chips".to_string(),
            author: Author {
                name: "Ann".to_string(),
                avatar: "a.png".to_string(),
                date: "1 Jan 2024".to_string(),
            },
        }
    }

    #[test]
    fn card_follows_template() {
        let view = view_with(crate::post::CATALOG.clone());
        let renderer = ListingRenderer::new().unwrap();
        let html = renderer.render_card(&view.grid.cards()[1]).unwrap();

        assert!(html.contains(r#"<span class="category">Design</span>"#));
        assert!(html.contains(r#"<h3 class="card-title">Minimalist Design Principles</h3>"#));
        assert!(html.contains(r#"<span class="author-name">Marcus Chen</span>"#));
        assert!(html.contains(r#"<span class="post-date">10 Jan 2024</span>"#));
        assert!(html.contains("pexels-photo-3184680.jpeg?auto&#x3D;compress&amp;cs"));
        assert!(!html.contains("display: none"));
    }

    #[test]
    fn post_text_is_escaped() {
        let view = view_with(vec![hostile_post()]);
        let renderer = ListingRenderer::new().unwrap();
        let html = renderer.render_card(&view.grid.cards()[0]).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Fish &amp; Chips"));
        assert!(!html.contains("\" onerror=\""));
    }

    #[test]
    fn hidden_elements_render_display_none() {
        let mut view = view_with(crate::post::CATALOG.clone());
        view.grid.card_mut(CardId(2)).unwrap().visible = false;
        view.load_more.visible = false;

        let renderer = ListingRenderer::new().unwrap();
        let html = renderer.render(&view).unwrap();

        assert!(html.starts_with(r#"<div id="blogGrid" class="row g-4">"#));
        assert_eq!(html.matches(r#"data-card="#).count(), 3);
        assert!(html.contains(r#"data-card="2" style="display: none""#));
        assert!(html.contains(r#"<button id="loadMoreBtn" class="btn btn-load-more" style="display: none">Load More</button>"#));
    }
}

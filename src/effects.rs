use crate::config::{EffectsConfig, LayoutConfig};
use crate::view::{CardId, ScrollBehavior, View};
use std::time::Duration;

pub struct Effects {
    config: EffectsConfig,
    layout: LayoutConfig,
    frame_requested: bool,
}

impl Effects {
    pub fn new(config: EffectsConfig, layout: LayoutConfig) -> Self {
        Self {
            config,
            layout,
            frame_requested: false,
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.config.frame_ms)
    }

    pub fn press_duration(&self) -> Duration {
        Duration::from_millis(self.config.press_ms)
    }

    pub fn stagger(&self, position: usize) -> Duration {
        Duration::from_millis(self.config.stagger_ms * position as u64)
    }

    pub fn update_navbar(&self, view: &mut View) {
        view.navbar.scrolled = view.window.scroll_y > self.config.navbar_threshold;
    }

    /// Handles a window scroll. Returns true when the caller should schedule
    /// an animation frame; at most one frame is outstanding at a time.
    pub fn on_scroll(&mut self, scroll_y: f64, view: &mut View) -> bool {
        view.window.scroll_to(scroll_y, ScrollBehavior::Instant);
        self.update_navbar(view);

        if self.frame_requested {
            return false;
        }
        self.frame_requested = true;
        true
    }

    /// Runs the throttled scroll work scheduled by [`Effects::on_scroll`].
    pub fn on_frame(&mut self, view: &mut View) -> Vec<(CardId, Duration)> {
        self.frame_requested = false;
        self.scan_viewport(view)
    }

    /// Cards inside the viewport that still need their entrance animation,
    /// paired with the delay before it runs. Each card is returned only once.
    pub fn scan_viewport(&self, view: &mut View) -> Vec<(CardId, Duration)> {
        let rects = view.grid.layout(&self.layout, view.window.scroll_y);
        let (width, height) = (view.window.width, view.window.height);
        let mut scheduled = Vec::new();

        for (position, card) in view.grid.cards_mut().enumerate() {
            if card.animated || card.animation_scheduled {
                continue;
            }
            let in_view = rects
                .iter()
                .find(|(id, _)| *id == card.id)
                .map(|(_, rect)| rect.within(width, height))
                .unwrap_or(false);

            if in_view {
                card.animation_scheduled = true;
                scheduled.push((card.id, self.stagger(position)));
            }
        }

        if !scheduled.is_empty() {
            log::debug!("{} cards entering viewport", scheduled.len());
        }
        scheduled
    }

    pub fn mark_animated(&self, card: CardId, view: &mut View) {
        if let Some(card) = view.grid.card_mut(card) {
            card.fade_in = true;
            card.animated = true;
            card.animation_scheduled = false;
        }
    }

    /// Navigation link click. Scrolls below the fixed navbar and moves the
    /// active marker to the clicked link.
    pub fn navigate(&self, href: &str, view: &mut View) -> bool {
        if !view.nav_links.iter().any(|link| link.href == href) {
            log::debug!("{} is not a nav link", href);
            return false;
        }
        let Some(top) = view.section(href).map(|section| section.offset_top) else {
            log::debug!("no section for nav link {}", href);
            return false;
        };

        view.window
            .scroll_to(top - self.config.navbar_offset, ScrollBehavior::Smooth);
        for link in view.nav_links.iter_mut() {
            link.active = link.href == href;
        }
        self.update_navbar(view);
        true
    }

    /// Any other in-page anchor: scroll the target section into view.
    pub fn follow_anchor(&self, href: &str, view: &mut View) -> bool {
        let Some(top) = view.section(href).map(|section| section.offset_top) else {
            return false;
        };

        view.window.scroll_to(top, ScrollBehavior::Smooth);
        self.update_navbar(view);
        true
    }

    pub fn press(&self, card: CardId, view: &mut View) -> bool {
        match view.grid.card_mut(card) {
            Some(card) => {
                card.pressed = true;
                true
            }
            None => false,
        }
    }

    pub fn release(&self, card: CardId, view: &mut View) {
        if let Some(card) = view.grid.card_mut(card) {
            card.pressed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;

    fn setup() -> (Effects, View) {
        let layout = LayoutConfig::default();
        let view = View::resolve(&PageConfig::default(), &layout, "Load More").unwrap();
        (Effects::new(EffectsConfig::default(), layout), view)
    }

    #[test]
    fn navbar_toggles_past_threshold() {
        let (mut effects, mut view) = setup();

        effects.on_scroll(50.0, &mut view);
        assert!(!view.navbar.scrolled);
        effects.on_scroll(51.0, &mut view);
        assert!(view.navbar.scrolled);
        effects.on_scroll(0.0, &mut view);
        assert!(!view.navbar.scrolled);
    }

    #[test]
    fn scroll_requests_one_frame_at_a_time() {
        let (mut effects, mut view) = setup();

        assert!(effects.on_scroll(10.0, &mut view));
        assert!(!effects.on_scroll(20.0, &mut view));
        effects.on_frame(&mut view);
        assert!(effects.on_scroll(30.0, &mut view));
    }

    #[test]
    fn only_fully_visible_cards_are_scheduled_once() {
        let (effects, mut view) = setup();

        // grid_top 620 + card 440 overflows an 800px viewport at the top.
        assert!(effects.scan_viewport(&mut view).is_empty());

        view.window.scroll_y = 600.0;
        let scheduled = effects.scan_viewport(&mut view);
        assert_eq!(
            scheduled,
            vec![
                (CardId(1), Duration::ZERO),
                (CardId(2), Duration::from_millis(100)),
                (CardId(3), Duration::from_millis(200)),
            ]
        );
        assert!(effects.scan_viewport(&mut view).is_empty());

        effects.mark_animated(CardId(1), &mut view);
        let card = view.grid.card(CardId(1)).unwrap();
        assert!(card.animated && card.fade_in);
        assert!(effects.scan_viewport(&mut view).is_empty());
    }

    #[test]
    fn hidden_cards_are_not_in_viewport() {
        let (effects, mut view) = setup();
        view.grid.card_mut(CardId(1)).unwrap().visible = false;
        view.window.scroll_y = 600.0;

        let ids: Vec<CardId> = effects
            .scan_viewport(&mut view)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![CardId(2), CardId(3), CardId(4)]);
    }

    #[test]
    fn navigate_offsets_for_navbar() {
        let (effects, mut view) = setup();

        assert!(effects.navigate("#blog", &mut view));
        assert_eq!(view.window.scroll_y, 480.0);
        assert_eq!(view.window.behavior, ScrollBehavior::Smooth);
        assert!(view.navbar.scrolled);
        let active: Vec<&str> = view
            .nav_links
            .iter()
            .filter(|l| l.active)
            .map(|l| l.href.as_str())
            .collect();
        assert_eq!(active, vec!["#blog"]);

        assert!(effects.navigate("#home", &mut view));
        assert_eq!(view.window.scroll_y, 0.0);
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let (effects, mut view) = setup();

        assert!(!effects.navigate("#missing", &mut view));
        assert!(!effects.follow_anchor("https://example.com", &mut view));
        assert_eq!(view.window.scroll_y, 0.0);
        assert!(view.nav_links.iter().all(|l| !l.active));
    }

    #[test]
    fn navigate_ignores_hrefs_outside_nav_links() {
        let (effects, mut view) = setup();
        view.nav_links[1].active = true;

        // "#about" is a section but the page has no nav link pointing at it
        view.nav_links.retain(|l| l.href != "#about");
        assert!(!effects.navigate("#about", &mut view));
        assert_eq!(view.window.scroll_y, 0.0);
        assert!(view.nav_links[1].active);
    }

    #[test]
    fn anchor_scrolls_without_offset() {
        let (effects, mut view) = setup();

        assert!(effects.follow_anchor("#about", &mut view));
        assert_eq!(view.window.scroll_y, 2400.0);
    }

    #[test]
    fn press_and_release() {
        let (effects, mut view) = setup();

        assert!(effects.press(CardId(2), &mut view));
        assert!(view.grid.card(CardId(2)).unwrap().pressed);
        effects.release(CardId(2), &mut view);
        assert!(!view.grid.card(CardId(2)).unwrap().pressed);
        assert!(!effects.press(CardId(99), &mut view));
    }
}

use crate::catalog::Catalog;
use crate::config::Config;
use crate::effects::Effects;
use crate::error::Result;
use crate::listing::{ListingController, LoadRequest, LoadTicket};
use crate::timer::{TimerId, TimerQueue};
use crate::view::{CardId, ListingRenderer, View};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// Input events delivered to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LoadMore,
    CancelLoad,
    CategorySelected(String),
    SearchInput(String),
    CardClicked(CardId),
    NavLinkClicked(String),
    AnchorClicked(String),
    Scroll(f64),
    WindowLoaded,
    ToggleDropdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    CompleteLoad(LoadTicket),
    FadeIn(CardId),
    Release(CardId),
    AnimationFrame,
    MarkAnimated(CardId),
}

/// One page session: the resolved view, the listing controller, the
/// presentation effects and every deferred continuation they scheduled.
/// Events and timers are handled one at a time, each to completion.
pub struct Session<'a> {
    view: View,
    listing: ListingController,
    effects: Effects,
    timers: TimerQueue<Task>,
    renderer: ListingRenderer<'a>,
    load_delay: Duration,
    load_timer: Option<TimerId>,
}

impl<'a> Session<'a> {
    pub fn start(config: &Config) -> Result<Self> {
        let mut view = View::resolve(
            &config.page,
            &config.layout,
            config.listing.load_more_label.as_str(),
        )?;
        let catalog = Catalog::new(config.catalog.clone());
        let listing = ListingController::new(catalog, &config.listing, &mut view);
        let effects = Effects::new(config.effects.clone(), config.layout.clone());

        log::info!(
            "session started: {} cards on page, {} in catalog",
            view.grid.len(),
            listing.catalog().len()
        );

        Ok(Self {
            view,
            listing,
            effects,
            timers: TimerQueue::new(),
            renderer: ListingRenderer::new()?,
            load_delay: Duration::from_millis(config.listing.load_delay_ms),
            load_timer: None,
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn listing(&self) -> &ListingController {
        &self.listing
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn render(&self) -> Result<String> {
        self.renderer.render(&self.view)
    }

    pub fn render_to_write<W: std::io::Write>(&self, writer: W) -> Result<()> {
        self.renderer.render_to_write(&self.view, writer)
    }

    pub fn dispatch(&mut self, event: Event, now: Instant) {
        log::debug!("event {:?}", event);

        match event {
            Event::LoadMore => {
                if let LoadRequest::Started(ticket) = self.listing.request_load(&mut self.view) {
                    let id = self
                        .timers
                        .schedule(now + self.load_delay, Task::CompleteLoad(ticket));
                    self.load_timer = Some(id);
                }
            }
            Event::CancelLoad => {
                if self.listing.cancel_load(&mut self.view).is_some() {
                    if let Some(id) = self.load_timer.take() {
                        self.timers.cancel(id);
                    }
                }
            }
            Event::CategorySelected(category) => self.select_category(category.as_str()),
            Event::SearchInput(text) => {
                self.view.search.value = text;
                let term = self.view.search.value.clone();
                self.listing.search(term.as_str(), &mut self.view);
            }
            Event::CardClicked(card) => {
                if self.effects.press(card, &mut self.view) {
                    let at = now + self.effects.press_duration();
                    self.timers.schedule(at, Task::Release(card));
                }
            }
            Event::NavLinkClicked(href) => {
                self.effects.navigate(href.as_str(), &mut self.view);
            }
            Event::AnchorClicked(href) => {
                self.effects.follow_anchor(href.as_str(), &mut self.view);
            }
            Event::Scroll(scroll_y) => {
                if self.effects.on_scroll(scroll_y, &mut self.view) {
                    let at = now + self.effects.frame_delay();
                    self.timers.schedule(at, Task::AnimationFrame);
                }
            }
            Event::WindowLoaded => {
                let scheduled = self.effects.scan_viewport(&mut self.view);
                self.schedule_animations(scheduled, now);
            }
            Event::ToggleDropdown => {
                if let Some(dropdown) = self.view.dropdown.as_mut() {
                    dropdown.open = !dropdown.open;
                }
            }
        }
    }

    /// Fires every timer due at `now`, including timers scheduled by the
    /// ones that fire. Returns the number of tasks run.
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(task) = self.timers.pop_due(now) {
            self.fire(task, now);
            fired += 1;
        }
        fired
    }

    /// Drives the session from `events` until the channel closes and no
    /// deferred work remains.
    pub async fn run(&mut self, mut events: mpsc::Receiver<Event>) {
        let mut open = true;

        loop {
            let deadline = self.next_deadline();
            if !open && deadline.is_none() {
                break;
            }

            tokio::select! {
                event = events.recv(), if open => match event {
                    Some(event) => self.dispatch(event, Instant::now()),
                    None => open = false,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.advance(Instant::now());
                }
            }
        }

        log::info!(
            "session finished: {} of {} cards visible",
            self.view.grid.visible().count(),
            self.view.grid.len()
        );
    }

    fn select_category(&mut self, category: &str) {
        let category = category.trim().to_lowercase();
        self.listing.filter_by_category(category.as_str(), &mut self.view);

        for link in self.view.category_links.iter_mut() {
            link.active = link.category == category;
        }
        if let Some(dropdown) = self.view.dropdown.as_mut() {
            dropdown.open = false;
        }
    }

    fn fire(&mut self, task: Task, now: Instant) {
        match task {
            Task::CompleteLoad(ticket) => {
                self.load_timer = None;
                let appended = self.listing.complete_load(ticket, &mut self.view);
                for (i, card) in appended.into_iter().enumerate() {
                    let at = now + self.effects.stagger(i);
                    self.timers.schedule(at, Task::FadeIn(card));
                }
            }
            Task::FadeIn(card) => {
                if let Some(card) = self.view.grid.card_mut(card) {
                    card.fade_in = true;
                }
            }
            Task::Release(card) => self.effects.release(card, &mut self.view),
            Task::AnimationFrame => {
                let scheduled = self.effects.on_frame(&mut self.view);
                self.schedule_animations(scheduled, now);
            }
            Task::MarkAnimated(card) => self.effects.mark_animated(card, &mut self.view),
        }
    }

    fn schedule_animations(&mut self, scheduled: Vec<(CardId, Duration)>, now: Instant) {
        for (card, delay) in scheduled {
            self.timers.schedule(now + delay, Task::MarkAnimated(card));
        }
    }
}

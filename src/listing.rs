use crate::catalog::Catalog;
use crate::config::ListingConfig;
use crate::view::{CardId, View};

pub const ALL_CATEGORIES: &str = "all";

/// Lower-cased copies of a card's searchable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedCard {
    pub card: CardId,
    pub title: String,
    pub description: String,
    pub category: String,
}

/// Which cards the grid shows. The most recent filter or search replaces
/// whatever was active before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    All,
    Category(String),
    Search(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Pending(LoadTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadRequest {
    Started(LoadTicket),
    AlreadyPending,
    Exhausted,
}

pub struct ListingController {
    catalog: Catalog,
    cursor: usize,
    index: Vec<IndexedCard>,
    load: LoadState,
    mode: ViewMode,
    batch_size: usize,
    label: String,
    next_ticket: u64,
}

impl ListingController {
    /// Indexes the cards already in the grid and sets the initial visibility
    /// of the load more button.
    pub fn new(catalog: Catalog, config: &ListingConfig, view: &mut View) -> Self {
        let index = view
            .grid
            .cards()
            .iter()
            .map(|card| IndexedCard {
                card: card.id,
                title: card.post.title.to_lowercase(),
                description: card.post.description.to_lowercase(),
                category: card.post.category.to_lowercase(),
            })
            .collect();

        let controller = Self {
            catalog,
            cursor: 0,
            index,
            load: LoadState::Idle,
            mode: ViewMode::All,
            batch_size: config.batch_size.max(1),
            label: config.load_more_label.clone(),
            next_ticket: 1,
        };

        view.load_more.visible = controller.has_more();
        view.load_more.label = controller.label.clone();
        controller
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &[IndexedCard] {
        self.index.as_slice()
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn has_more(&self) -> bool {
        self.cursor < self.catalog.len()
    }

    /// Enters the loading state. The caller completes the load with
    /// [`ListingController::complete_load`] once its delay has elapsed.
    pub fn request_load(&mut self, view: &mut View) -> LoadRequest {
        if !self.has_more() {
            view.load_more.visible = false;
            return LoadRequest::Exhausted;
        }

        if let LoadState::Pending(ticket) = self.load {
            log::debug!("load {:?} still pending, ignoring request", ticket);
            return LoadRequest::AlreadyPending;
        }

        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        self.load = LoadState::Pending(ticket);

        view.load_more.loading = true;
        view.load_more.label.clear();

        log::debug!("load {:?} started at cursor {}", ticket, self.cursor);
        LoadRequest::Started(ticket)
    }

    /// Appends the next batch for a pending load and returns the new cards
    /// in the order they were appended. Stale tickets append nothing.
    pub fn complete_load(&mut self, ticket: LoadTicket, view: &mut View) -> Vec<CardId> {
        if self.load != LoadState::Pending(ticket) {
            log::debug!("load {:?} is no longer pending", ticket);
            return Vec::new();
        }

        let batch = self.catalog.batch(self.cursor, self.batch_size).to_vec();
        let mut appended = Vec::with_capacity(batch.len());

        for post in batch {
            let entry = IndexedCard {
                card: CardId(0),
                title: post.title.to_lowercase(),
                description: post.description.to_lowercase(),
                category: post.category.to_lowercase(),
            };
            let visible = self.matches(&entry);
            let id = view.grid.append(post);
            if let Some(card) = view.grid.card_mut(id) {
                card.visible = visible;
            }

            self.index.push(IndexedCard { card: id, ..entry });
            appended.push(id);
        }

        self.cursor += appended.len();
        self.load = LoadState::Idle;

        view.load_more.loading = false;
        view.load_more.label = self.label.clone();
        if !self.has_more() {
            view.load_more.visible = false;
        }

        log::debug!(
            "load {:?} appended {} cards, cursor {}/{}",
            ticket,
            appended.len(),
            self.cursor,
            self.catalog.len()
        );
        appended
    }

    /// Drops a pending load without advancing the cursor.
    pub fn cancel_load(&mut self, view: &mut View) -> Option<LoadTicket> {
        match self.load {
            LoadState::Pending(ticket) => {
                self.load = LoadState::Idle;
                view.load_more.loading = false;
                view.load_more.label = self.label.clone();
                log::debug!("load {:?} cancelled", ticket);
                Some(ticket)
            }
            LoadState::Idle => None,
        }
    }

    pub fn filter_by_category(&mut self, category: &str, view: &mut View) {
        let category = category.trim().to_lowercase();
        self.mode = if category == ALL_CATEGORIES {
            ViewMode::All
        } else {
            ViewMode::Category(category.replace('-', " "))
        };

        self.apply(view);
        view.search.value.clear();
        view.load_more.visible = self.mode == ViewMode::All && self.has_more();

        log::debug!("filter {:?}: {} visible", self.mode, view.grid.visible().count());
    }

    pub fn search(&mut self, term: &str, view: &mut View) {
        let term = term.trim().to_lowercase();
        self.mode = if term.is_empty() {
            ViewMode::All
        } else {
            ViewMode::Search(term)
        };

        self.apply(view);
        view.load_more.visible = self.mode == ViewMode::All && self.has_more();

        log::debug!("search {:?}: {} visible", self.mode, view.grid.visible().count());
    }

    fn matches(&self, entry: &IndexedCard) -> bool {
        match &self.mode {
            ViewMode::All => true,
            ViewMode::Category(category) => entry.category == *category,
            ViewMode::Search(term) => {
                entry.title.contains(term.as_str())
                    || entry.description.contains(term.as_str())
                    || entry.category.contains(term.as_str())
            }
        }
    }

    fn apply(&self, view: &mut View) {
        for entry in &self.index {
            let visible = self.matches(entry);
            if let Some(card) = view.grid.card_mut(entry.card) {
                card.visible = visible;
                if visible {
                    card.fade_in = true;
                }
            }
        }
    }
}

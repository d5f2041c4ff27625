use crate::config::LayoutConfig;
use crate::post::Post;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardId(pub u64);

impl Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub id: CardId,
    pub post: Post,
    pub visible: bool,
    pub fade_in: bool,
    pub animated: bool,
    pub pressed: bool,
    #[serde(skip)]
    pub animation_scheduled: bool,
}

impl Card {
    fn new(id: CardId, post: Post) -> Self {
        Self {
            id,
            post,
            visible: true,
            fade_in: false,
            animated: false,
            pressed: false,
            animation_scheduled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn within(&self, width: f64, height: f64) -> bool {
        self.top >= 0.0 && self.left >= 0.0 && self.bottom <= height && self.right <= width
    }
}

/// The container holding every card element, in document order.
#[derive(Debug, Clone)]
pub struct Grid {
    pub id: String,
    cards: Vec<Card>,
    next_id: u64,
}

impl Grid {
    pub fn new(id: String) -> Self {
        Self {
            id,
            cards: Vec::new(),
            next_id: 1,
        }
    }

    pub fn append(&mut self, post: Post) -> CardId {
        let id = CardId(self.next_id);
        self.next_id += 1;
        self.cards.push(Card::new(id, post));
        id
    }

    pub fn cards(&self) -> &[Card] {
        self.cards.as_slice()
    }

    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| card.visible)
    }

    /// Client rectangles of the visible cards for a window scrolled to
    /// `scroll_y`. Hidden cards take no space in the flow.
    pub fn layout(&self, layout: &LayoutConfig, scroll_y: f64) -> Vec<(CardId, Rect)> {
        let columns = layout.columns.max(1);

        self.visible()
            .enumerate()
            .map(|(slot, card)| {
                let row = (slot / columns) as f64;
                let column = (slot % columns) as f64;
                let top = layout.grid_top + row * (layout.card_height + layout.gap) - scroll_y;
                let left = layout.grid_left + column * (layout.card_width + layout.gap);
                let rect = Rect {
                    top,
                    left,
                    bottom: top + layout.card_height,
                    right: left + layout.card_width,
                };
                (card.id, rect)
            })
            .collect()
    }
}

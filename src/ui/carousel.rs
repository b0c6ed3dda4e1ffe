/// Carousel View screen
///
/// Shows the built-in items plus whatever the item store holds in a looping,
/// auto-advancing carousel. Clicking a tile opens an expanded detail overlay.
use iced::keyboard::{self, key, Key};
use iced::widget::{
    button, column, container, mouse_area, row, scrollable, stack, text, Column, Row,
};
use iced::{time, Alignment, Color, Element, Length, Subscription, Task};
use std::time::{Duration, Instant};

use super::image_cache::{picture, ImageCache};
use crate::config::AppConfig;
use crate::navigation::{Navigation, Route};
use crate::state::carousel::{track, AutoAdvance, Carousel, TRACK_COPIES};
use crate::state::catalog;
use crate::state::data::CarouselItem;
use crate::state::store::ItemStore;

/// Width of one tile; the viewport shows `TRACK_COPIES` tiles
const TILE_WIDTH: f32 = 320.0;
const TILE_HEIGHT: f32 = 240.0;
const VIEWPORT_WIDTH: f32 = TILE_WIDTH * TRACK_COPIES as f32;

/// Resolution of the auto-advance clock
const TICK: Duration = Duration::from_millis(200);

fn track_id() -> scrollable::Id {
    scrollable::Id::new("carousel-track")
}

#[derive(Debug, Clone)]
pub enum Message {
    Next,
    Prev,
    GoTo(usize),
    Expand(usize),
    CloseExpanded,
    EscapePressed,
    Tick(Instant),
    Enquire,
    AddItem,
}

/// What the application should do after an update
pub enum Action {
    None,
    Run(Task<Message>),
    OpenExternal(String),
    Navigate(Navigation),
}

#[derive(Debug)]
pub struct CarouselView {
    items: Vec<CarouselItem>,
    carousel: Carousel,
    expanded: Option<CarouselItem>,
    auto_advance: AutoAdvance,
    enquiry_url: String,
}

impl CarouselView {
    /// Build the item set: built-ins plus items derived from the store
    pub fn mount(store: &ItemStore, config: &AppConfig, now: Instant) -> Self {
        let added = catalog::added_items(store.get(), &config.placeholder_image);
        let items = catalog::merge(catalog::seed_items(), added);

        tracing::info!("🎠 Carousel mounted with {} items", items.len());

        Self {
            carousel: Carousel::new(items.len()),
            items,
            expanded: None,
            auto_advance: AutoAdvance::new(config.auto_advance(), now),
            enquiry_url: config.enquiry_url.clone(),
        }
    }

    #[cfg(test)]
    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.carousel.index()
    }

    #[cfg(test)]
    pub fn expanded(&self) -> Option<&CarouselItem> {
        self.expanded.as_ref()
    }

    /// Every image source this screen can show
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.image_source.as_str())
    }

    pub fn update(&mut self, message: Message) -> Action {
        let before = self.carousel.index();
        let now = match message {
            Message::Tick(now) => now,
            _ => Instant::now(),
        };

        match message {
            Message::Next => self.carousel.next(),
            Message::Prev => self.carousel.prev(),
            Message::GoTo(index) => self.carousel.go_to(index),
            Message::Tick(_) => {
                if !self.auto_advance.is_due(now) {
                    return Action::None;
                }
                self.carousel.next();
                self.auto_advance.reset(now);
            }
            Message::Expand(index) => {
                self.expanded = self.items.get(index).cloned();
                return Action::None;
            }
            Message::CloseExpanded => {
                self.expanded = None;
                return Action::None;
            }
            Message::EscapePressed => {
                if self.expanded.take().is_some() {
                    tracing::debug!("Closed expanded view");
                }
                return Action::None;
            }
            Message::Enquire => return Action::OpenExternal(self.enquiry_url.clone()),
            Message::AddItem => return Action::Navigate(Navigation::Redirect(Route::Add)),
        }

        if self.carousel.index() == before {
            return Action::None;
        }

        self.auto_advance.reset(now);
        Action::Run(self.scroll_to_current())
    }

    fn scroll_to_current(&self) -> Task<Message> {
        let x = self.carousel.offset_percent() / 100.0 * VIEWPORT_WIDTH;
        scrollable::scroll_to(track_id(), scrollable::AbsoluteOffset { x, y: 0.0 })
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let escape = keyboard::on_key_press(|pressed, _modifiers| match pressed {
            Key::Named(key::Named::Escape) => Some(Message::EscapePressed),
            _ => None,
        });

        Subscription::batch([time::every(TICK).map(Message::Tick), escape])
    }

    pub fn view<'a>(&'a self, cache: &ImageCache) -> Element<'a, Message> {
        let len = self.items.len();

        let tiles = track(&self.items).map(|(position, item)| {
            let tile = column![
                picture(cache, &item.image_source, TILE_WIDTH - 16.0, TILE_HEIGHT),
                text(&item.title).size(18),
            ]
            .spacing(6)
            .align_x(Alignment::Center);

            mouse_area(container(tile).width(TILE_WIDTH).padding(8))
                .on_press(Message::Expand(position % len))
                .into()
        });

        let strip = scrollable(Row::with_children(tiles))
            .id(track_id())
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(0.0).scroller_width(0.0),
            ))
            .width(VIEWPORT_WIDTH);

        let controls = row![
            button(text("<").size(20)).on_press(Message::Prev).padding(10),
            container(strip).width(VIEWPORT_WIDTH),
            button(text(">").size(20)).on_press(Message::Next).padding(10),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let indicators = Row::with_children((0..len).map(|index| {
            let dot = if index == self.carousel.index() { "●" } else { "○" };
            button(text(dot).size(16))
                .on_press(Message::GoTo(index))
                .style(button::text)
                .into()
        }))
        .spacing(4);

        let content: Column<Message> = column![
            controls,
            indicators,
            button("Add Item").on_press(Message::AddItem).padding(10),
        ]
        .spacing(20)
        .align_x(Alignment::Center);

        let page = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill);

        match &self.expanded {
            Some(item) => stack![page, expanded_overlay(cache, item)].into(),
            None => page.into(),
        }
    }
}

fn expanded_overlay<'a>(cache: &ImageCache, item: &'a CarouselItem) -> Element<'a, Message> {
    let details = column![
        text(&item.title).size(32),
        text(&item.description).size(16),
        text(&item.item_type).size(14),
        button("Enquire").on_press(Message::Enquire).padding(10),
    ]
    .spacing(14)
    .width(320.0);

    let body = row![picture(cache, &item.image_source, 560.0, 420.0), details]
        .spacing(30)
        .align_y(Alignment::Center);

    let card = column![
        container(button(text("×").size(24)).on_press(Message::CloseExpanded).style(button::text))
            .width(Length::Fill)
            .align_right(Length::Fill),
        body,
    ]
    .spacing(10);

    container(container(card).padding(30).style(container::rounded_box))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.85).into()),
            ..container::Style::default()
        })
        .into()
}

use iced::{Element, Subscription, Task, Theme};
use std::time::Instant;

mod config;
mod error;
mod media;
mod navigation;
mod state;
mod ui;

use config::AppConfig;
use error::{EncodeError, FetchError};
use navigation::{Navigation, Route};
use state::data::ItemRecord;
use state::store::ItemStore;
use ui::add::{self, AddForm};
use ui::carousel::{self, CarouselView};
use ui::image_cache::ImageCache;

/// The screen currently mounted
enum Screen {
    Add(AddForm),
    View(CarouselView),
}

/// Main application state
struct ItemShowcase {
    /// Hand-off slot between the Add Form and the Carousel View.
    /// Lives as long as the application, independent of the mounted screen.
    store: ItemStore,
    config: AppConfig,
    /// Decoded and downloaded images, dropped on a full reload
    images: ImageCache,
    http: reqwest::Client,
    screen: Screen,
    /// Id handed to the next Add Form that is mounted
    next_form_id: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    Add(add::Message),
    Carousel(carousel::Message),
    /// A deferred submission finished encoding, tagged with the form that sent it
    Submitted(u64, Result<ItemRecord, EncodeError>),
    /// Background download of a remote image finished
    ImageFetched(String, Result<Vec<u8>, FetchError>),
}

impl ItemShowcase {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        Self::with_config(AppConfig::load())
    }

    fn with_config(config: AppConfig) -> (Self, Task<Message>) {
        tracing::info!("🎨 Item Showcase starting at {}", Route::Add.path());

        (
            ItemShowcase {
                store: ItemStore::new(),
                config,
                images: ImageCache::new(),
                http: media::remote::client(),
                screen: Screen::Add(AddForm::new(0)),
                next_form_id: 1,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Add(message) => {
                // Results for a screen that is no longer mounted are dropped
                let Screen::Add(form) = &mut self.screen else {
                    return Task::none();
                };

                let form_id = form.id();
                match form.update(message, &mut self.store) {
                    add::Action::None => Task::none(),
                    add::Action::Run(task) => task.map(Message::Add),
                    add::Action::Publish(task) => {
                        task.map(move |result| Message::Submitted(form_id, result))
                    }
                    add::Action::Navigate(navigation) => self.navigate(navigation),
                }
            }
            Message::Carousel(message) => {
                let Screen::View(view) = &mut self.screen else {
                    return Task::none();
                };

                match view.update(message) {
                    carousel::Action::None => Task::none(),
                    carousel::Action::Run(task) => task.map(Message::Carousel),
                    carousel::Action::OpenExternal(url) => {
                        tracing::info!("🔗 Opening {url}");
                        if let Err(e) = open::that_detached(&url) {
                            tracing::warn!("⚠️  Could not open {url}: {e}");
                        }
                        Task::none()
                    }
                    carousel::Action::Navigate(navigation) => self.navigate(navigation),
                }
            }
            Message::Submitted(form_id, Ok(record)) => {
                // The store is written even if the form is gone
                if let Err(e) = self.store.set(&record) {
                    tracing::error!("❌ Could not store item \"{}\": {e}", record.name);
                    return Task::none();
                }

                match &mut self.screen {
                    Screen::Add(form) if form.id() == form_id => form.show_published(record),
                    _ => tracing::debug!("Stored item \"{}\" after its form closed", record.name),
                }
                Task::none()
            }
            Message::Submitted(_, Err(e)) => {
                tracing::error!("❌ Item not added: {e}");
                Task::none()
            }
            Message::ImageFetched(source, Ok(bytes)) => {
                self.images.insert_bytes(source, bytes);
                Task::none()
            }
            Message::ImageFetched(source, Err(e)) => {
                tracing::warn!("⚠️  {e}");
                self.images.mark_failed(source);
                Task::none()
            }
        }
    }

    /// Mount the target screen
    fn navigate(&mut self, navigation: Navigation) -> Task<Message> {
        let route = navigation.route();

        if navigation.is_reload() {
            tracing::info!("🔄 Reloading {}", route.path());
            self.images.clear();
        } else {
            tracing::info!("🧭 Navigating to {}", route.path());
        }

        match route {
            Route::Add => {
                self.screen = Screen::Add(AddForm::new(self.next_form_id));
                self.next_form_id += 1;
                Task::none()
            }
            Route::View => {
                let view = CarouselView::mount(&self.store, &self.config, Instant::now());
                let missing = self.images.prepare(view.sources());
                self.screen = Screen::View(view);
                self.fetch_all(missing)
            }
        }
    }

    /// Download remote images in the background
    fn fetch_all(&self, urls: Vec<String>) -> Task<Message> {
        Task::batch(urls.into_iter().map(|url| {
            let source = url.clone();
            Task::perform(
                media::remote::fetch_image(self.http.clone(), url),
                move |result| Message::ImageFetched(source.clone(), result),
            )
        }))
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match &self.screen {
            Screen::Add(form) => form.view().map(Message::Add),
            Screen::View(view) => view.view(&self.images).map(Message::Carousel),
        }
    }

    /// Timers and key listeners exist only while the Carousel View is mounted
    fn subscription(&self) -> Subscription<Message> {
        match &self.screen {
            Screen::Add(_) => Subscription::none(),
            Screen::View(view) => view.subscription().map(Message::Carousel),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,item_showcase=debug".into()),
        )
        .init();

    iced::application("Item Showcase", ItemShowcase::update, ItemShowcase::view)
        .subscription(ItemShowcase::subscription)
        .theme(ItemShowcase::theme)
        .centered()
        .run_with(ItemShowcase::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::StoreRead;
    use std::path::PathBuf;

    fn app() -> ItemShowcase {
        ItemShowcase::with_config(AppConfig::default()).0
    }

    fn form(app: &ItemShowcase) -> &AddForm {
        match &app.screen {
            Screen::Add(form) => form,
            Screen::View(_) => panic!("add form is not mounted"),
        }
    }

    fn fill(app: &mut ItemShowcase, name: &str, item_type: &str) {
        for (field, value) in [(add::Field::Name, name), (add::Field::Type, item_type)] {
            let _ = app.update(Message::Add(add::Message::FieldChanged(field, value.into())));
        }
    }

    /// Fill the form and submit with a cover that still has to be read
    fn submit_deferred(app: &mut ItemShowcase, name: &str) -> u64 {
        fill(app, name, "Food");
        let cover = PathBuf::from("/tmp/cover.png");
        let _ = app.update(Message::Add(add::Message::CoverSelected(Some(cover))));
        let _ = app.update(Message::Add(add::Message::Submit));
        form(app).id()
    }

    fn record(name: &str) -> ItemRecord {
        ItemRecord {
            name: name.into(),
            item_type: "Food".into(),
            ..ItemRecord::default()
        }
    }

    fn submit(app: &mut ItemShowcase, name: &str, item_type: &str) {
        fill(app, name, item_type);
        let _ = app.update(Message::Add(add::Message::Submit));
    }

    fn mounted_titles(app: &ItemShowcase) -> Vec<String> {
        match &app.screen {
            Screen::View(view) => view.items().iter().map(|item| item.title.clone()).collect(),
            Screen::Add(_) => panic!("carousel is not mounted"),
        }
    }

    #[test]
    fn test_submitted_item_reaches_carousel() {
        let mut app = app();
        submit(&mut app, "Samosa", "Food");

        let _ = app.update(Message::Add(add::Message::GoToView));

        let titles = mounted_titles(&app);
        assert_eq!(titles.len(), 5);
        assert_eq!(titles[4], "Samosa");
    }

    #[test]
    fn test_store_survives_redirect() {
        let mut app = app();
        submit(&mut app, "Samosa", "Food");
        let _ = app.update(Message::Add(add::Message::GoToView));

        let _ = app.update(Message::Carousel(carousel::Message::AddItem));
        assert!(matches!(app.screen, Screen::Add(_)));

        let _ = app.navigate(Navigation::Transition(Route::View));
        assert_eq!(mounted_titles(&app).len(), 5);
    }

    #[test]
    fn test_redirect_clears_image_cache() {
        let mut app = app();
        let _ = app.navigate(Navigation::Transition(Route::View));
        let url = "https://i.redd.it/wciu6rx0duq41.jpg";
        app.images.insert_bytes(url.to_string(), vec![1, 2, 3]);

        let _ = app.navigate(Navigation::Transition(Route::View));
        assert!(app.images.get(url).is_some());

        let _ = app.navigate(Navigation::Redirect(Route::View));
        assert!(matches!(
            app.images.get(url),
            Some(ui::image_cache::Entry::Loading)
        ));
    }

    #[test]
    fn test_messages_for_unmounted_screen_are_dropped() {
        let mut app = app();

        let _ = app.update(Message::Carousel(carousel::Message::Next));

        assert!(matches!(app.screen, Screen::Add(_)));
    }

    #[test]
    fn test_failed_download_is_marked() {
        let mut app = app();
        let url = "https://example.com/missing.png".to_string();
        let error = FetchError::Status {
            url: url.clone(),
            status: 404,
        };

        let _ = app.update(Message::ImageFetched(url.clone(), Err(error)));

        assert!(matches!(
            app.images.get(&url),
            Some(ui::image_cache::Entry::Failed)
        ));
    }

    #[test]
    fn test_latest_submission_replaces_earlier_one() {
        let mut app = app();
        submit(&mut app, "Samosa", "Food");
        let _ = app.update(Message::Add(add::Message::CloseConfirmation));
        submit(&mut app, "Lassi", "Drink");

        let stored = app.store.get();
        assert!(matches!(
            stored,
            StoreRead::Present(ItemRecord { ref name, .. }) if name == "Lassi"
        ));
    }

    #[test]
    fn test_deferred_submit_confirms_on_issuing_form() {
        let mut app = app();
        let form_id = submit_deferred(&mut app, "Samosa");
        assert_eq!(app.store.get(), StoreRead::Empty);

        let _ = app.update(Message::Submitted(form_id, Ok(record("Samosa"))));

        assert_eq!(app.store.get(), StoreRead::Present(record("Samosa")));
        assert_eq!(form(&app).draft(), &add::Draft::default());
        assert!(form(&app).confirmation().is_some());
    }

    #[test]
    fn test_deferred_submit_is_stored_after_leaving_form() {
        let mut app = app();
        let form_id = submit_deferred(&mut app, "Samosa");
        let _ = app.update(Message::Add(add::Message::GoToView));

        let _ = app.update(Message::Submitted(form_id, Ok(record("Samosa"))));

        assert_eq!(app.store.get(), StoreRead::Present(record("Samosa")));
        let _ = app.navigate(Navigation::Transition(Route::View));
        assert_eq!(mounted_titles(&app)[4], "Samosa");
    }

    #[test]
    fn test_deferred_submit_leaves_newer_form_alone() {
        let mut app = app();
        let form_id = submit_deferred(&mut app, "Samosa");
        let _ = app.update(Message::Add(add::Message::GoToView));
        let _ = app.update(Message::Carousel(carousel::Message::AddItem));
        assert_ne!(form(&app).id(), form_id);
        fill(&mut app, "Lassi", "Drink");

        let _ = app.update(Message::Submitted(form_id, Ok(record("Samosa"))));

        assert_eq!(app.store.get(), StoreRead::Present(record("Samosa")));
        assert_eq!(form(&app).draft().name, "Lassi");
        assert!(form(&app).confirmation().is_none());
    }

    #[test]
    fn test_failed_deferred_submit_stores_nothing() {
        let mut app = app();
        let form_id = submit_deferred(&mut app, "Samosa");
        let error = EncodeError::Read {
            path: PathBuf::from("/tmp/cover.png"),
            source: std::sync::Arc::new(std::io::Error::from(std::io::ErrorKind::NotFound)),
        };

        let _ = app.update(Message::Submitted(form_id, Err(error)));

        assert_eq!(app.store.get(), StoreRead::Empty);
        assert_eq!(form(&app).draft().name, "Samosa");
        assert!(form(&app).confirmation().is_none());
    }
}

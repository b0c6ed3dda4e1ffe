/// Add Form screen
///
/// Collects the item's text fields and images, encodes the images into data
/// URLs, publishes the finished record to the item store and shows a
/// confirmation overlay.
use futures::future::try_join_all;
use iced::widget::{button, column, container, image, row, stack, text, text_input, Column, Row};
use iced::{Alignment, Color, ContentFit, Element, Length, Task};
use rfd::FileDialog;
use std::path::PathBuf;

use crate::error::EncodeError;
use crate::media::encoder;
use crate::navigation::{Navigation, Route};
use crate::state::data::{ItemRecord, StoredImage};
use crate::state::store::ItemStore;

/// Extensions offered by the file pickers
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "avif", "tif", "tiff", "ico",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Type,
    Description,
}

/// An image picked by the user
#[derive(Debug, Clone, PartialEq)]
pub enum ImageHolder {
    /// Selected but not encoded yet
    Pending(PathBuf),
    /// Ready-to-store data URL
    Encoded(String),
}

/// The record being filled in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: String,
    pub item_type: String,
    pub description: String,
    pub cover: Option<ImageHolder>,
    pub additional: Vec<ImageHolder>,
}

impl Draft {
    /// Name and type are required
    pub fn can_submit(&self) -> bool {
        !self.name.is_empty() && !self.item_type.is_empty()
    }

    fn is_encoded(&self) -> bool {
        self.cover
            .iter()
            .chain(self.additional.iter())
            .all(|holder| matches!(holder, ImageHolder::Encoded(_)))
    }
}

/// What the last submission looked like, with decoded thumbnails
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub record: ItemRecord,
    cover: Option<image::Handle>,
    additional: Vec<image::Handle>,
}

impl Confirmation {
    fn new(record: ItemRecord) -> Self {
        let decode = |stored: &StoredImage| match stored {
            StoredImage::Encoded(data_url) => encoder::decode_data_url(data_url)
                .map(|(_, bytes)| image::Handle::from_bytes(bytes)),
            StoredImage::Preview { .. } => None,
        };

        let cover = record.cover_image.as_ref().and_then(decode);
        let additional = record.additional_images.iter().filter_map(decode).collect();

        Self {
            record,
            cover,
            additional,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    FieldChanged(Field, String),
    PickCover,
    CoverSelected(Option<PathBuf>),
    CoverEncoded(PathBuf, Result<Option<String>, EncodeError>),
    PickAdditional,
    AdditionalSelected(Vec<PathBuf>),
    AdditionalEncoded(Vec<PathBuf>, Result<Vec<String>, EncodeError>),
    Submit,
    CloseConfirmation,
    GoToView,
}

/// What the application should do after an update
pub enum Action {
    None,
    Run(Task<Message>),
    /// Finish encoding a submission; the application stores the result
    Publish(Task<Result<ItemRecord, EncodeError>>),
    Navigate(Navigation),
}

#[derive(Debug, Default)]
pub struct AddForm {
    /// Tells this mount apart from earlier Add Forms
    id: u64,
    draft: Draft,
    confirmation: Option<Confirmation>,
    /// Restored when the encode of a new selection fails
    previous_cover: Option<ImageHolder>,
    previous_additional: Vec<ImageHolder>,
}

impl AddForm {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    #[cfg(test)]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    #[cfg(test)]
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    pub fn update(&mut self, message: Message, store: &mut ItemStore) -> Action {
        match message {
            Message::FieldChanged(field, value) => {
                match field {
                    Field::Name => self.draft.name = value,
                    Field::Type => self.draft.item_type = value,
                    Field::Description => self.draft.description = value,
                }
                Action::None
            }
            Message::PickCover => {
                let file = FileDialog::new()
                    .set_title("Select Cover Image")
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_file();

                self.update(Message::CoverSelected(file), store)
            }
            Message::CoverSelected(None) => {
                self.draft.cover = None;
                Action::None
            }
            Message::CoverSelected(Some(path)) => {
                let replaced = self.draft.cover.replace(ImageHolder::Pending(path.clone()));
                if !matches!(replaced, Some(ImageHolder::Pending(_))) {
                    self.previous_cover = replaced;
                }

                Action::Run(Task::perform(
                    encoder::encode_file(Some(path.clone())),
                    move |result| Message::CoverEncoded(path.clone(), result),
                ))
            }
            Message::CoverEncoded(path, result) => {
                // A newer selection (or a reset) supersedes this result
                if self.draft.cover != Some(ImageHolder::Pending(path.clone())) {
                    return Action::None;
                }

                match result {
                    Ok(Some(data_url)) => self.draft.cover = Some(ImageHolder::Encoded(data_url)),
                    Ok(None) => self.draft.cover = None,
                    Err(e) => {
                        tracing::warn!("⚠️  Cover image not encoded: {e}");
                        self.draft.cover = self.previous_cover.take();
                    }
                }
                Action::None
            }
            Message::PickAdditional => {
                let files = FileDialog::new()
                    .set_title("Select Additional Images")
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_files()
                    .unwrap_or_default();

                self.update(Message::AdditionalSelected(files), store)
            }
            Message::AdditionalSelected(paths) => {
                let selected = paths.iter().cloned().map(ImageHolder::Pending).collect();
                let replaced = std::mem::replace(&mut self.draft.additional, selected);
                if !replaced
                    .iter()
                    .any(|holder| matches!(holder, ImageHolder::Pending(_)))
                {
                    self.previous_additional = replaced;
                }

                if paths.is_empty() {
                    return Action::None;
                }

                Action::Run(Task::perform(
                    encoder::encode_files(paths.clone()),
                    move |result| Message::AdditionalEncoded(paths.clone(), result),
                ))
            }
            Message::AdditionalEncoded(paths, result) => {
                let selected: Vec<ImageHolder> =
                    paths.into_iter().map(ImageHolder::Pending).collect();
                if self.draft.additional != selected {
                    return Action::None;
                }

                match result {
                    Ok(data_urls) => {
                        self.draft.additional =
                            data_urls.into_iter().map(ImageHolder::Encoded).collect();
                    }
                    Err(e) => {
                        tracing::warn!("⚠️  Additional images not encoded: {e}");
                        self.draft.additional = std::mem::take(&mut self.previous_additional);
                    }
                }
                Action::None
            }
            Message::Submit => {
                if !self.draft.can_submit() {
                    return Action::None;
                }

                if self.draft.is_encoded() {
                    let record = into_record(self.draft.clone());
                    self.publish(record, store);
                    return Action::None;
                }

                // Some image is still a bare selection; encode before publishing
                tracing::debug!("⏳ Encoding remaining images before submit");
                Action::Publish(Task::perform(
                    finish_encoding(self.draft.clone()),
                    std::convert::identity,
                ))
            }
            Message::CloseConfirmation => {
                self.confirmation = None;
                Action::None
            }
            Message::GoToView => Action::Navigate(Navigation::Transition(Route::View)),
        }
    }

    fn publish(&mut self, record: ItemRecord, store: &mut ItemStore) {
        if let Err(e) = store.set(&record) {
            tracing::error!("❌ Could not store item \"{}\": {e}", record.name);
            return;
        }

        self.show_published(record);
    }

    /// Confirm a stored record and start over with an empty draft
    pub fn show_published(&mut self, record: ItemRecord) {
        self.confirmation = Some(Confirmation::new(record));
        self.draft = Draft::default();
        self.previous_cover = None;
        self.previous_additional.clear();
    }

    pub fn view(&self) -> Element<'_, Message> {
        let field = |label: &'static str, field: Field, value: &str| {
            column![
                text(label).size(16),
                text_input(label, value)
                    .on_input(move |value| Message::FieldChanged(field, value))
                    .padding(10),
            ]
            .spacing(6)
        };

        let cover_status = match &self.draft.cover {
            None => "No file chosen".to_string(),
            Some(ImageHolder::Pending(_)) => "Encoding…".to_string(),
            Some(ImageHolder::Encoded(_)) => "1 image selected".to_string(),
        };

        let additional_status = match self.draft.additional.len() {
            0 => "No files chosen".to_string(),
            n if !self.draft.is_encoded() => format!("Encoding {} images…", n),
            n => format!("{} images selected", n),
        };

        let form: Column<Message> = column![
            text("Add Items").size(40),
            field("Item Name", Field::Name, &self.draft.name),
            field("Item Type", Field::Type, &self.draft.item_type),
            field("Item Description", Field::Description, &self.draft.description),
            column![
                text("Item Cover Image").size(16),
                row![
                    button("Choose File").on_press(Message::PickCover).padding(8),
                    text(cover_status).size(14),
                ]
                .spacing(10)
                .align_y(Alignment::Center),
            ]
            .spacing(6),
            column![
                text("Item Additional Images").size(16),
                row![
                    button("Choose Files").on_press(Message::PickAdditional).padding(8),
                    text(additional_status).size(14),
                ]
                .spacing(10)
                .align_y(Alignment::Center),
            ]
            .spacing(6),
            row![
                button("View Items")
                    .on_press(Message::GoToView)
                    .padding(10)
                    .width(Length::Fill),
                button("Add")
                    .on_press_maybe(self.draft.can_submit().then_some(Message::Submit))
                    .padding(10)
                    .width(Length::Fill),
            ]
            .spacing(10),
        ]
        .spacing(20)
        .padding(40)
        .max_width(520.0);

        let page = container(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill);

        match &self.confirmation {
            Some(confirmation) => stack![page, confirmation_overlay(confirmation)].into(),
            None => page.into(),
        }
    }
}

/// Draft to record, assuming every holder is encoded
fn into_record(draft: Draft) -> ItemRecord {
    let encoded = |holder: ImageHolder| match holder {
        ImageHolder::Encoded(data_url) => Some(StoredImage::Encoded(data_url)),
        ImageHolder::Pending(_) => None,
    };

    ItemRecord {
        name: draft.name,
        item_type: draft.item_type,
        description: draft.description,
        cover_image: draft.cover.and_then(encoded),
        additional_images: draft.additional.into_iter().filter_map(encoded).collect(),
    }
}

/// Encode whatever is still pending, then build the record
async fn finish_encoding(draft: Draft) -> Result<ItemRecord, EncodeError> {
    let cover = match draft.cover {
        Some(holder) => Some(resolve_holder(holder).await?),
        None => None,
    };
    let additional = try_join_all(draft.additional.into_iter().map(resolve_holder)).await?;

    Ok(ItemRecord {
        name: draft.name,
        item_type: draft.item_type,
        description: draft.description,
        cover_image: cover.map(StoredImage::Encoded),
        additional_images: additional.into_iter().map(StoredImage::Encoded).collect(),
    })
}

async fn resolve_holder(holder: ImageHolder) -> Result<String, EncodeError> {
    match holder {
        ImageHolder::Encoded(data_url) => Ok(data_url),
        ImageHolder::Pending(path) => Ok(encoder::encode_file(Some(path))
            .await?
            .unwrap_or_default()),
    }
}

fn confirmation_overlay(confirmation: &Confirmation) -> Element<'_, Message> {
    let record = &confirmation.record;

    let mut card: Column<Message> = column![
        text("Item Added!").size(28),
        text(format!("Name: {}", record.name)),
        text(format!("Type: {}", record.item_type)),
        text(format!("Description: {}", record.description)),
    ]
    .spacing(12);

    if let Some(cover) = &confirmation.cover {
        card = card.push(text("Cover Image:")).push(thumbnail(cover, 120.0));
    }

    if !confirmation.additional.is_empty() {
        let thumbnails = Row::with_children(
            confirmation
                .additional
                .iter()
                .map(|handle| thumbnail(handle, 60.0)),
        )
        .spacing(8)
        .wrap();

        card = card.push(text("Additional Images:")).push(thumbnails);
    }

    card = card.push(
        row![
            button("Close").on_press(Message::CloseConfirmation).padding(10),
            button("Go to View").on_press(Message::GoToView).padding(10),
        ]
        .spacing(10),
    );

    let card = container(card)
        .padding(30)
        .max_width(480.0)
        .style(container::rounded_box);

    container(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.6).into()),
            ..container::Style::default()
        })
        .into()
}

fn thumbnail<'a>(handle: &image::Handle, size: f32) -> Element<'a, Message> {
    image(handle.clone())
        .width(size)
        .height(size)
        .content_fit(ContentFit::Contain)
        .into()
}

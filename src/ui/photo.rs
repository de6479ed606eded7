//! Photo AI screen
use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Element, Length, Task};
use rfd::AsyncFileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::card;
use crate::error::PhotoError;
use crate::host::preview::{self, ImagePreview, IMAGE_EXTENSIONS};
use crate::host::random::{OsPicker, Picker};
use crate::state::config::AppConfig;
use crate::state::data::LandmarkRecord;
use crate::state::pending::Ticket;
use crate::state::photo::{self, ImageSource, PhotoAnalysis, PhotoStage};

#[derive(Debug, Clone)]
pub enum Message {
    /// Simulated camera capture
    TakePhoto,
    /// Open the file picker
    PickFile,
    /// File picker closed (None = cancelled)
    FilePicked(Option<PathBuf>),
    /// Background read + decode finished
    PreviewLoaded(Ticket, Result<ImagePreview, PhotoError>),
    /// Simulated classifier finished
    Analyzed(Ticket, &'static LandmarkRecord),
    /// Dismiss the current photo
    Clear,
}

pub struct PhotoScreen {
    state: PhotoAnalysis,
    picker: Arc<dyn Picker>,
    analysis_delay: Duration,
}

impl PhotoScreen {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: PhotoAnalysis::new(),
            picker: Arc::new(OsPicker),
            analysis_delay: config.analysis_delay(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TakePhoto => {
                let ticket = self.state.capture(self.picker.as_ref());
                self.analyze(ticket)
            }
            Message::PickFile => Task::perform(pick_image(), Message::FilePicked),
            Message::FilePicked(Some(path)) => {
                let ticket = self.state.begin_upload();
                Task::perform(preview::load_preview(path), move |result| {
                    Message::PreviewLoaded(ticket, result)
                })
            }
            Message::FilePicked(None) => Task::none(),
            Message::PreviewLoaded(ticket, result) => match self.state.finish_upload(ticket, result) {
                Some(analysis) => self.analyze(analysis),
                None => Task::none(),
            },
            Message::Analyzed(ticket, record) => {
                self.state.complete(ticket, record);
                Task::none()
            }
            Message::Clear => {
                self.state.clear();
                Task::none()
            }
        }
    }

    /// Run the simulated classifier for `ticket`
    fn analyze(&self, ticket: Ticket) -> Task<Message> {
        Task::perform(
            photo::analyze(self.analysis_delay, self.picker.clone()),
            move |record| Message::Analyzed(ticket, record),
        )
    }

    pub fn view(&self) -> Element<'_, Message> {
        let body: Element<Message> = match self.state.image() {
            None => self.prompt_view(),
            Some(image) => {
                let mut content = column![self.image_view(image)].spacing(16);

                match self.state.stage() {
                    PhotoStage::Analyzing => {
                        content = content.push(
                            container(
                                column![
                                    text("Analyzing your photo...").size(18),
                                    text("Using AI to identify landmarks, objects, and cultural context")
                                        .style(text::secondary),
                                ]
                                .spacing(4)
                                .align_x(Alignment::Center),
                            )
                            .padding(20)
                            .width(Length::Fill)
                            .center_x(Length::Fill),
                        );
                    }
                    PhotoStage::Identified(record) => {
                        content = content.push(result_view(record));
                    }
                    PhotoStage::Empty => {}
                }

                content.into()
            }
        };

        let mut layout = column![body].spacing(12);
        if let Some(status) = self.state.status() {
            layout = layout.push(text(format!("⚠️  {}", status)).style(text::danger));
        }

        card(
            "📷 AI Photo Recognition",
            "Take a photo and get instant information, fun facts, and visiting tips",
            layout,
        )
    }

    fn prompt_view(&self) -> Element<'_, Message> {
        let upload = button(text(if self.state.is_loading() {
            "Loading..."
        } else {
            "⬆️ Upload Image"
        }))
        .style(button::secondary)
        .on_press_maybe((!self.state.is_loading()).then_some(Message::PickFile))
        .padding(10);

        let features = row![
            feature("Landmarks", "Instant identification and description"),
            feature("Best time to visit", "Optimal timing recommendations"),
            feature("Fun facts", "Interesting historical details"),
        ]
        .spacing(12);

        column![
            container(
                column![
                    text("Snap a Photo").size(20),
                    text("Point your camera at landmarks, food, signs, or anything you're curious about")
                        .style(text::secondary),
                    row![
                        button(text("📷 Take Photo"))
                            .on_press(Message::TakePhoto)
                            .padding(10),
                        upload,
                    ]
                    .spacing(8),
                ]
                .spacing(12)
                .align_x(Alignment::Center),
            )
            .padding(32)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .style(container::bordered_box),
            features,
        ]
        .spacing(16)
        .into()
    }

    fn image_view<'a>(&'a self, image: &'a ImageSource) -> Element<'a, Message> {
        let picture: Element<Message> = match image {
            ImageSource::Uploaded(preview) => iced::widget::image(preview.handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(256.0))
                .into(),
            // Remote captures are not fetched; show where they came from
            ImageSource::Captured(url) => container(
                column![text("📸 Captured photo").size(18), text(*url).size(12).style(text::secondary)]
                    .spacing(6)
                    .align_x(Alignment::Center),
            )
            .width(Length::Fill)
            .height(Length::Fixed(256.0))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(256.0))
            .style(container::bordered_box)
            .into(),
        };

        column![
            row![
                text(image.describe()).size(12).style(text::secondary).width(Length::Fill),
                button(text("✕"))
                    .style(button::secondary)
                    .on_press(Message::Clear),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
            picture,
        ]
        .spacing(8)
        .into()
    }
}

/// Identification card: facts, best time, tips
fn result_view<'a>(record: &'static LandmarkRecord) -> Element<'a, Message> {
    let facts = record
        .facts
        .iter()
        .enumerate()
        .fold(Column::new().spacing(6), |col, (i, fact)| {
            col.push(text(format!("{}. {}", i + 1, fact)))
        });

    let tips = record
        .tips
        .iter()
        .fold(Column::new().spacing(6), |col, tip| col.push(text(format!("💡 {}", tip))));

    container(
        column![
            text(record.name).size(22),
            text(record.location).style(text::secondary),
            text("Interesting Facts").size(16),
            facts,
            text("Best Time to Visit").size(16),
            text(record.best_time_to_visit),
            text("Local Tips").size(16),
            tips,
        ]
        .spacing(10),
    )
    .padding(16)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

fn feature<'a>(title: &'a str, body: &'a str) -> Element<'a, Message> {
    container(column![text(title).size(16), text(body).size(13).style(text::secondary)].spacing(4))
        .padding(12)
        .width(Length::FillPortion(1))
        .style(container::rounded_box)
        .into()
}

/// Native file picker restricted to images
async fn pick_image() -> Option<PathBuf> {
    AsyncFileDialog::new()
        .set_title("Choose a photo")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

/// User interface module
///
/// One file per screen. Screens own their state and map their own
/// messages; `main.rs` only routes between them.
/// - Translate (translate.rs)
/// - Photo AI (photo.rs)
/// - Maps (maps.rs) with its canvas (canvas.rs)
/// - Events and Emergency lists (guide.rs)

pub mod canvas;
pub mod guide;
pub mod maps;
pub mod photo;
pub mod translate;

use iced::widget::{column, container, text};
use iced::{Element, Length};

/// Titled panel used by every screen
pub fn card<'a, Message: 'a>(
    title: &'a str,
    subtitle: &'a str,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = content.into();

    container(
        column![
            text(title).size(24),
            text(subtitle).size(14).style(text::secondary),
            content,
        ]
        .spacing(12),
    )
    .padding(20)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

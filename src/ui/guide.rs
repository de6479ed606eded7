//! Events and Emergency screens: read-only lists over the static tables
use iced::widget::{column, container, row, text, Column};
use iced::{Alignment, Element, Length};

use super::card;
use crate::state::data::{EMERGENCY_CONTACTS, LOCAL_EVENTS};

pub fn events_view<'a, Message: 'a>() -> Element<'a, Message> {
    let list = LOCAL_EVENTS.iter().fold(Column::new().spacing(12), |col, event| {
        col.push(
            container(
                column![
                    row![
                        text(event.name).size(18).width(Length::Fill),
                        text(event.category).size(12).style(text::secondary),
                    ]
                    .align_y(Alignment::Center),
                    row![text(format!("🕘 {}", event.time)), text(event.price)].spacing(16),
                ]
                .spacing(6),
            )
            .padding(14)
            .width(Length::Fill)
            .style(container::bordered_box),
        )
    });

    card(
        "📅 Local Events & Activities",
        "AI-curated events and activities happening near you",
        list,
    )
}

pub fn emergency_view<'a, Message: 'a>() -> Element<'a, Message> {
    let list = EMERGENCY_CONTACTS.iter().fold(Column::new().spacing(12), |col, contact| {
        col.push(
            container(
                column![
                    row![
                        column![
                            text(contact.name).size(18),
                            text(contact.kind).size(12).style(text::secondary),
                        ]
                        .width(Length::Fill),
                        text(contact.distance).size(12),
                    ]
                    .align_y(Alignment::Center),
                    text(contact.dial_label()).size(16).style(text::danger),
                ]
                .spacing(8),
            )
            .padding(14)
            .width(Length::Fill)
            .style(container::bordered_box),
        )
    });

    card(
        "🚨 Emergency Contacts & Services",
        "Location-based emergency contacts and important services",
        list,
    )
}

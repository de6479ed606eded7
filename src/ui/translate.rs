//! Translate screen
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Element, Length, Task, Theme};
use iced_aw::Wrap;
use std::sync::Arc;
use std::time::Duration;

use super::card;
use crate::state::config::AppConfig;
use crate::state::data::Language;
use crate::state::pending::Ticket;
use crate::state::translate::{self, CannedTranslator, Translation, Translator, VoiceState};

#[derive(Debug, Clone)]
pub enum Message {
    /// User edited the input box
    InputChanged(String),
    LanguageSelected(Language),
    /// "Translate with AI Context" pressed
    Translate,
    /// Voice input / stop listening
    ToggleVoice,
    /// Simulated speech recognition finished
    VoiceCaptured(Ticket, String),
}

pub struct TranslateScreen {
    state: Translation,
    translator: Arc<dyn Translator>,
    voice_delay: Duration,
}

impl TranslateScreen {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: Translation::new(config.default_language),
            translator: Arc::new(CannedTranslator),
            voice_delay: config.voice_delay(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(text) => {
                self.state.set_input(text);
                Task::none()
            }
            Message::LanguageSelected(language) => {
                self.state.select_language(language);
                Task::none()
            }
            Message::Translate => {
                self.state.submit(self.translator.as_ref());
                Task::none()
            }
            Message::ToggleVoice => match self.state.toggle_voice() {
                Some(ticket) => Task::perform(translate::listen(self.voice_delay), move |phrase| {
                    Message::VoiceCaptured(ticket, phrase)
                }),
                None => Task::none(),
            },
            Message::VoiceCaptured(ticket, phrase) => {
                self.state.finish_voice(ticket, phrase);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let listening = self.state.voice_state() == VoiceState::Listening;

        let voice_button = if listening {
            button(text("🛑 Stop Listening")).style(button::danger)
        } else {
            button(text("🎤 Voice Input")).style(button::secondary)
        }
        .on_press(Message::ToggleVoice)
        .padding(10);

        let input_side = column![
            text(format!("English → {}", self.state.language)).size(16),
            text_input("Type or speak your message...", &self.state.input)
                .on_input(Message::InputChanged)
                .padding(12),
            voice_button,
        ]
        .spacing(12)
        .width(Length::FillPortion(1));

        let translated = match &self.state.result {
            Some(result) => text(&result.text),
            None => text("Translation will appear here with cultural context and local slang explanations...")
                .style(text::secondary),
        };

        let output_side = column![
            text("Translation with Context").size(16),
            container(translated)
                .padding(16)
                .width(Length::Fill)
                .height(Length::Fixed(140.0))
                .style(container::bordered_box),
            button(text("⚡ Translate with AI Context"))
                .on_press(Message::Translate)
                .padding(10)
                .width(Length::Fill),
        ]
        .spacing(12)
        .width(Length::FillPortion(1));

        let languages: Vec<Element<Message>> = Language::ALL
            .iter()
            .map(|&language| {
                let style: fn(&Theme, button::Status) -> button::Style = if language == self.state.language {
                    button::primary
                } else {
                    button::secondary
                };
                button(text(language.name()))
                    .style(style)
                    .on_press(Message::LanguageSelected(language))
                    .padding([6, 16])
                    .into()
            })
            .collect();

        card(
            "🌐 Cultural Translation",
            "Get translations with cultural context and local slang explanations",
            column![
                row![input_side, output_side].spacing(24),
                Wrap::with_elements(languages).spacing(8.0).line_spacing(8.0),
            ]
            .spacing(20),
        )
    }
}

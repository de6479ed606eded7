use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

mod error;
mod host;
mod state;
mod ui;

use state::config::AppConfig;
use ui::maps::MapsScreen;
use ui::photo::PhotoScreen;
use ui::translate::TranslateScreen;

/// Default log filter; wgpu and friends are very chatty at info
const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn,iced_wgpu=warn";

/// Screens reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenKind {
    Translate,
    Photo,
    Events,
    Emergency,
    Maps,
}

impl ScreenKind {
    const ALL: [ScreenKind; 5] = [
        ScreenKind::Translate,
        ScreenKind::Photo,
        ScreenKind::Events,
        ScreenKind::Emergency,
        ScreenKind::Maps,
    ];

    fn label(&self) -> &'static str {
        match self {
            ScreenKind::Translate => "Translate",
            ScreenKind::Photo => "Photo AI",
            ScreenKind::Events => "Events",
            ScreenKind::Emergency => "Emergency",
            ScreenKind::Maps => "Maps",
        }
    }
}

/// The active screen and the state it owns.
/// Replacing it drops that state; late completions for it are discarded.
enum Screen {
    Translate(TranslateScreen),
    Photo(PhotoScreen),
    Events,
    Emergency,
    Maps(MapsScreen),
}

impl Screen {
    fn kind(&self) -> ScreenKind {
        match self {
            Screen::Translate(_) => ScreenKind::Translate,
            Screen::Photo(_) => ScreenKind::Photo,
            Screen::Events => ScreenKind::Events,
            Screen::Emergency => ScreenKind::Emergency,
            Screen::Maps(_) => ScreenKind::Maps,
        }
    }
}

/// Main application state
struct TravelCompanion {
    config: AppConfig,
    screen: Screen,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Navigation bar clicked
    Navigate(ScreenKind),
    Translate(ui::translate::Message),
    Photo(ui::photo::Message),
    Maps(ui::maps::Message),
}

impl TravelCompanion {
    /// Create a new instance of the application
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        tracing::info!("🧭 Travel Companion starting");

        let screen = Screen::Translate(TranslateScreen::new(&config));
        (TravelCompanion { config, screen }, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(kind) => {
                if self.screen.kind() == kind {
                    return Task::none();
                }
                tracing::info!("Switching to {}", kind.label());

                let (screen, task) = match kind {
                    ScreenKind::Translate => (Screen::Translate(TranslateScreen::new(&self.config)), Task::none()),
                    ScreenKind::Photo => (Screen::Photo(PhotoScreen::new(&self.config)), Task::none()),
                    ScreenKind::Events => (Screen::Events, Task::none()),
                    ScreenKind::Emergency => (Screen::Emergency, Task::none()),
                    ScreenKind::Maps => {
                        let (maps, task) = MapsScreen::new(&self.config);
                        (Screen::Maps(maps), task.map(Message::Maps))
                    }
                };
                self.screen = screen;
                task
            }
            Message::Translate(message) => match &mut self.screen {
                Screen::Translate(screen) => screen.update(message).map(Message::Translate),
                _ => stale(message),
            },
            Message::Photo(message) => match &mut self.screen {
                Screen::Photo(screen) => screen.update(message).map(Message::Photo),
                _ => stale(message),
            },
            Message::Maps(message) => match &mut self.screen {
                Screen::Maps(screen) => screen.update(message).map(Message::Maps),
                _ => stale(message),
            },
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let content: Element<Message> = match &self.screen {
            Screen::Translate(screen) => screen.view().map(Message::Translate),
            Screen::Photo(screen) => screen.view().map(Message::Photo),
            Screen::Events => ui::guide::events_view(),
            Screen::Emergency => ui::guide::emergency_view(),
            Screen::Maps(screen) => screen.view().map(Message::Maps),
        };

        column![
            self.nav_bar(),
            scrollable(container(content).padding(24).width(Length::Fill)).height(Length::Fill),
        ]
        .into()
    }

    fn nav_bar(&self) -> Element<'_, Message> {
        let active = self.screen.kind();
        let tabs = ScreenKind::ALL.iter().fold(row![].spacing(4), |tabs, &kind| {
            let style: fn(&Theme, button::Status) -> button::Style = if kind == active {
                button::primary
            } else {
                button::text
            };
            tabs.push(
                button(text(kind.label()))
                    .style(style)
                    .on_press(Message::Navigate(kind))
                    .padding([8, 14]),
            )
        });

        container(
            row![text("AI Travel Companion").size(22), horizontal_space(), tabs]
                .align_y(Alignment::Center)
                .padding([10, 24]),
        )
        .style(container::rounded_box)
        .width(Length::Fill)
        .into()
    }

    /// Only the Maps screen listens for anything in the background
    fn subscription(&self) -> Subscription<Message> {
        match &self.screen {
            Screen::Maps(screen) => screen.subscription().map(Message::Maps),
            _ => Subscription::none(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// A completion arrived for a screen that has since been closed
fn stale<T: std::fmt::Debug>(message: T) -> Task<Message> {
    tracing::debug!("Dropping message for inactive screen: {:?}", message);
    Task::none()
}

/// Install the global tracing subscriber (`RUST_LOG` overrides the default)
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load the config file, seeding it with defaults on first run.
/// Problems are logged and the defaults are used; the app always starts.
fn load_config() -> AppConfig {
    let path = match AppConfig::default_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("⚠️  {}; using default settings", e);
            return AppConfig::default();
        }
    };

    if !path.exists() {
        let config = AppConfig::default();
        match config.save_to(&path) {
            Ok(()) => tracing::info!("📁 Wrote default config to {}", path.display()),
            Err(e) => tracing::warn!("⚠️  Could not write default config: {}", e),
        }
        return config;
    }

    match AppConfig::load_from(&path) {
        Ok(config) => {
            tracing::info!("📁 Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("⚠️  {}; using default settings", e);
            AppConfig::default()
        }
    }
}

fn main() -> iced::Result {
    init_logging();
    let config = load_config();

    iced::application("Travel Companion", TravelCompanion::update, TravelCompanion::view)
        .subscription(TravelCompanion::subscription)
        .theme(TravelCompanion::theme)
        .centered()
        .run_with(move || TravelCompanion::new(config))
}

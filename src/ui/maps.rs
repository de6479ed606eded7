//! Maps screen
//!
//! On activation the screen asks for one position fix and starts polling
//! connectivity. "Retry Location" rebuilds the whole screen state, the
//! equivalent of reloading the page.
use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use std::sync::Arc;
use std::time::Duration;

use super::canvas::MapCanvas;
use super::card;
use crate::error::LocationError;
use crate::host::connectivity::{self, ConnectivityStatus};
use crate::host::location::{self, ConfiguredLocation, GeoPosition, LocationProvider, PositionOptions};
use crate::state::config::{AppConfig, ConnectivityConfig};
use crate::state::data::NEARBY_POINTS;
use crate::state::maps::{self, LocationStatus, MapView, TileBatch};
use crate::state::pending::{Pending, Ticket};

#[derive(Debug, Clone)]
pub enum Message {
    /// Position query answered
    Located(Ticket, Result<GeoPosition, LocationError>),
    RetryLocation,
    ZoomIn,
    ZoomOut,
    /// "Download Area" pressed
    Download,
    Downloaded(Ticket, TileBatch),
    /// Time for another reachability probe
    CheckConnectivity,
    Connectivity(Ticket, ConnectivityStatus),
    SearchChanged(String),
}

pub struct MapsScreen {
    view: MapView,
    provider: Arc<dyn LocationProvider>,
    options: PositionOptions,
    initial_zoom: u8,
    download_delay: Duration,
    connectivity: ConnectivityConfig,
    /// At most one reachability probe in flight
    probing: Pending,
}

impl MapsScreen {
    /// Build the screen and start its one-shot work
    pub fn new(config: &AppConfig) -> (Self, Task<Message>) {
        let mut screen = Self {
            view: MapView::new(config.initial_zoom()),
            provider: Arc::new(ConfiguredLocation::new(config.location.clone())),
            options: PositionOptions::fresh(config.location_timeout()),
            initial_zoom: config.initial_zoom(),
            download_delay: config.download_delay(),
            connectivity: config.connectivity.clone(),
            probing: Pending::new(),
        };
        let task = screen.activate();
        (screen, task)
    }

    /// Query the position once and take a first connectivity reading
    fn activate(&mut self) -> Task<Message> {
        let ticket = self.view.begin_locate();
        let locate = Task::perform(
            location::acquire_location(self.provider.clone(), self.options),
            move |result| Message::Located(ticket, result),
        );
        Task::batch([locate, self.probe()])
    }

    /// Start a reachability probe unless one is still running
    fn probe(&mut self) -> Task<Message> {
        if self.probing.is_pending() {
            tracing::debug!("Connectivity probe still running, skipping tick");
            return Task::none();
        }

        let ticket = self.probing.start();
        Task::perform(
            connectivity::probe(
                self.connectivity.probe_address.clone(),
                Duration::from_millis(self.connectivity.timeout_ms),
            ),
            move |status| Message::Connectivity(ticket, status),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Located(ticket, result) => {
                self.view.finish_locate(ticket, result);
                Task::none()
            }
            Message::RetryLocation => {
                tracing::info!("Retrying location with a fresh map state");
                self.view = MapView::new(self.initial_zoom);
                self.activate()
            }
            Message::ZoomIn => {
                self.view.zoom_in();
                Task::none()
            }
            Message::ZoomOut => {
                self.view.zoom_out();
                Task::none()
            }
            Message::Download => match self.view.begin_download() {
                Ok((ticket, zoom)) => Task::perform(maps::download_area(self.download_delay, zoom), move |batch| {
                    Message::Downloaded(ticket, batch)
                }),
                Err(e) => {
                    tracing::debug!("Download refused: {}", e);
                    Task::none()
                }
            },
            Message::Downloaded(ticket, batch) => {
                self.view.finish_download(ticket, batch);
                Task::none()
            }
            Message::CheckConnectivity => self.probe(),
            Message::Connectivity(ticket, status) => {
                if self.probing.settle(ticket) {
                    self.view.apply_connectivity(status);
                }
                Task::none()
            }
            Message::SearchChanged(query) => {
                self.view.search = query;
                Task::none()
            }
        }
    }

    #[cfg(test)]
    pub fn map_view_mut(&mut self) -> &mut MapView {
        &mut self.view
    }

    /// Poll connectivity while the screen is open
    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_millis(self.connectivity.interval_ms.max(250)))
            .map(|_| Message::CheckConnectivity)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let status = self.view.connectivity();
        let badge_style: fn(&Theme) -> container::Style = if status.is_online() {
            container::rounded_box
        } else {
            container::bordered_box
        };
        let badge = container(text(format!("{} {}", if status.is_online() { "📶" } else { "🚫" }, status.label())))
            .padding([4, 10])
            .style(badge_style);

        let header = row![
            text("Offline Maps").size(28).width(Length::Fill),
            badge,
        ]
        .align_y(Alignment::Center);

        let search = text_input("Search locations...", &self.view.search)
            .on_input(Message::SearchChanged)
            .padding(10);

        column![
            header,
            search,
            row![
                container(self.map_view()).width(Length::FillPortion(2)),
                self.sidebar_view().width(Length::FillPortion(1)),
            ]
            .spacing(20),
        ]
        .spacing(16)
        .into()
    }

    fn map_view(&self) -> Element<'_, Message> {
        let description = match self.view.position() {
            Some(position) => format!("Current location: {}", position.label()),
            None => "Getting your location...".to_string(),
        };

        let canvas = iced::widget::canvas(MapCanvas {
            position: self.view.position(),
            offline_ready: self.view.is_available_offline(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(360.0));

        let mut content = column![
            text(description).style(text::secondary),
            canvas,
            row![
                text(format!("Zoom: {}", self.view.zoom())).width(Length::Fill),
                button(text("+")).on_press(Message::ZoomIn).style(button::secondary),
                button(text("−")).on_press(Message::ZoomOut).style(button::secondary),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        ]
        .spacing(12);

        if let LocationStatus::Failed(error) = self.view.location() {
            content = content.push(
                container(
                    column![
                        text(error.to_string()).style(text::danger),
                        button(text("Retry Location"))
                            .on_press(Message::RetryLocation)
                            .style(button::secondary),
                    ]
                    .spacing(8)
                    .align_x(Alignment::Center),
                )
                .padding(16)
                .width(Length::Fill)
                .center_x(Length::Fill)
                .style(container::bordered_box),
            );
        }

        card("📍 Interactive Map", "Scroll over the map to zoom", content)
    }

    fn sidebar_view(&self) -> Column<'_, Message> {
        let location = match self.view.location() {
            LocationStatus::Located(position) => column![
                text("Coordinates:").style(text::secondary),
                text(position.precise()),
                text("Accuracy:").style(text::secondary),
                text("±10 meters"),
            ]
            .spacing(4),
            LocationStatus::Locating => column![text("Getting location...").style(text::secondary)],
            LocationStatus::Failed(_) => column![text("Location unavailable").style(text::secondary)],
        };

        let download_label = if self.view.is_downloading() {
            "Downloading..."
        } else {
            "⬇️ Download Area"
        };
        let mut offline = column![
            text("Downloaded tiles:").style(text::secondary),
            text(format!("{} tiles", self.view.tiles().len())),
            button(text(download_label))
                .on_press_maybe(self.view.can_download().then_some(Message::Download))
                .width(Length::Fill)
                .padding(10),
        ]
        .spacing(6);

        if self.view.is_available_offline() {
            offline = offline.push(text("✓ This area is available offline").style(text::success));
        }
        if let Some(at) = self.view.last_download() {
            offline = offline.push(
                text(format!("Last download: {}", at.format("%Y-%m-%d %H:%M UTC")))
                    .size(12)
                    .style(text::secondary),
            );
        }

        let nearby = NEARBY_POINTS.iter().fold(Column::new().spacing(8), |col, point| {
            col.push(
                row![
                    column![text(point.name), text(point.distance).size(12).style(text::secondary)]
                        .width(Length::Fill),
                    text(point.kind).size(12).style(text::secondary),
                ]
                .align_y(Alignment::Center),
            )
        });

        column![
            card("Current Location", "Device position", location),
            card("Offline Maps", "Download maps for offline use", offline),
            card("Nearby Points", "Around your position", nearby),
        ]
        .spacing(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn madrid() -> GeoPosition {
        GeoPosition {
            latitude: 40.4168,
            longitude: -3.7038,
        }
    }

    fn batch(zoom: u8) -> TileBatch {
        TileBatch {
            zoom,
            tiles: maps::tile_grid(zoom),
            completed_at: Utc::now(),
        }
    }

    /// Screen with a position fix and one finished download at zoom 16
    fn downloaded_screen() -> (MapsScreen, Ticket) {
        let (mut screen, _task) = MapsScreen::new(&AppConfig::default());

        let locate = screen.view.begin_locate();
        let _ = screen.update(Message::Located(locate, Ok(madrid())));
        let _ = screen.update(Message::ZoomIn);

        let (ticket, zoom) = screen.view.begin_download().unwrap();
        let _ = screen.update(Message::Downloaded(ticket, batch(zoom)));
        assert_eq!(screen.view.tiles().len(), 100);
        assert_eq!(screen.view.zoom(), 16);
        (screen, locate)
    }

    #[test]
    fn test_retry_rebuilds_map_state() {
        let (mut screen, _) = downloaded_screen();

        let _ = screen.update(Message::RetryLocation);

        assert!(screen.view.tiles().is_empty());
        assert!(!screen.view.is_available_offline());
        assert_eq!(screen.view.last_download(), None);
        assert_eq!(screen.view.zoom(), 15);
        assert_eq!(screen.view.location(), LocationStatus::Locating);
    }

    #[test]
    fn test_completions_from_before_retry_are_ignored() {
        let (mut screen, old_locate) = downloaded_screen();
        let (pending_download, zoom) = screen.view.begin_download().unwrap();

        let _ = screen.update(Message::RetryLocation);
        let _ = screen.update(Message::Downloaded(pending_download, batch(zoom)));
        let _ = screen.update(Message::Located(old_locate, Ok(madrid())));

        assert!(screen.view.tiles().is_empty());
        assert_eq!(screen.view.location(), LocationStatus::Locating);
    }

    #[test]
    fn test_overlapping_connectivity_ticks_are_skipped() {
        let (mut screen, _task) = MapsScreen::new(&AppConfig::default());
        assert!(screen.probing.is_pending());

        // Ticks while the first probe runs start nothing new
        let _ = screen.update(Message::CheckConnectivity);
        let _ = screen.update(Message::CheckConnectivity);
        let stray = Ticket::issue();
        let _ = screen.update(Message::Connectivity(stray, ConnectivityStatus::Offline));
        assert!(screen.view.connectivity().is_online());
        assert!(screen.probing.is_pending());
    }

    #[test]
    fn test_connectivity_reading_is_applied() {
        let (mut screen, _task) = MapsScreen::new(&AppConfig::default());
        screen.probing = Pending::new();
        let live = screen.probing.start();

        let _ = screen.update(Message::Connectivity(live, ConnectivityStatus::Offline));
        assert!(!screen.view.connectivity().is_online());
        assert!(!screen.probing.is_pending());

        // The next tick may check again
        let _ = screen.update(Message::CheckConnectivity);
        assert!(screen.probing.is_pending());
    }
}

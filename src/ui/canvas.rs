use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Path, Program, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Theme};

use super::maps::Message;
use crate::host::location::GeoPosition;

/// Columns and rows of the simulated map grid
const GRID_COLUMNS: usize = 8;
const GRID_ROWS: usize = 6;

/// Stand-in map: a plain grid with a marker at the device position.
/// There is no real cartography; the grid only gives the zoom controls and
/// the position fix something to show.
pub struct MapCanvas {
    /// Marker is drawn only once a fix is known
    pub position: Option<GeoPosition>,
    /// True once any offline tiles exist (tints the map green)
    pub offline_ready: bool,
}

impl Program<Message> for MapCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let background = if self.offline_ready {
            Color::from_rgb8(0xdc, 0xfc, 0xe7)
        } else {
            Color::from_rgb8(0xdb, 0xea, 0xfe)
        };
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), background);

        // Grid lines
        let line = || {
            Stroke::default()
                .with_color(Color::from_rgba(0.2, 0.4, 0.8, 0.25))
                .with_width(1.0)
        };

        for col in 1..GRID_COLUMNS {
            let x = bounds.width * col as f32 / GRID_COLUMNS as f32;
            frame.stroke(&Path::line(Point::new(x, 0.0), Point::new(x, bounds.height)), line());
        }
        for row in 1..GRID_ROWS {
            let y = bounds.height * row as f32 / GRID_ROWS as f32;
            frame.stroke(&Path::line(Point::new(0.0, y), Point::new(bounds.width, y)), line());
        }

        // Current location marker
        if self.position.is_some() {
            let center = frame.center();
            frame.fill(&Path::circle(center, 18.0), Color::from_rgba(0.15, 0.39, 0.92, 0.2));
            frame.fill(&Path::circle(center, 9.0), Color::from_rgb8(0x25, 0x63, 0xeb));
            frame.stroke(
                &Path::circle(center, 9.0),
                Stroke::default().with_color(Color::WHITE).with_width(3.0),
            );
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        // Mouse wheel zooms one level per notch
        if let canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) = event {
            if !cursor.is_over(bounds) {
                return (canvas::event::Status::Ignored, None);
            }

            let y = match delta {
                mouse::ScrollDelta::Lines { y, .. } => y,
                mouse::ScrollDelta::Pixels { y, .. } => y,
            };

            let message = if y > 0.0 {
                Some(Message::ZoomIn)
            } else if y < 0.0 {
                Some(Message::ZoomOut)
            } else {
                None
            };
            return (canvas::event::Status::Captured, message);
        }

        (canvas::event::Status::Ignored, None)
    }
}

//! Detail screen: read-only view of one POI.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};

use crate::model::Poi;

/// Renders the POI record handed over by the home screen. Nothing is
/// fetched or mutated here.
pub struct DetailScreen {
    poi: Poi,
}

impl DetailScreen {
    pub fn new(poi: Poi) -> Self {
        Self { poi }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(1), // title bar
            Constraint::Min(0),    // fields
            Constraint::Length(1), // help
        ])
        .split(area);

        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);

        // Title bar: the POI name.
        let title = Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.poi.name),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(title, chunks[0]);

        let lines: Vec<Line> = field_rows(&self.poi)
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label:<13}"), muted),
                    Span::styled(value, normal),
                ])
            })
            .collect();
        let fields =
            Paragraph::new(lines).block(Block::default().padding(Padding::new(2, 2, 1, 0)));
        frame.render_widget(fields, chunks[1]);

        let help = Paragraph::new(Line::from(Span::styled(" esc back  q quit", muted)));
        frame.render_widget(help, chunks[2]);
    }
}

/// Label/value rows for the field area. Coordinates appear only when
/// present, formatted to four decimal places.
fn field_rows(poi: &Poi) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Description", poi.description.clone()),
        ("Image", poi.image.clone()),
    ];
    if let Some(c) = poi.coordinates {
        rows.push(("Latitude", format!("{:.4}", c.latitude)));
        rows.push(("Longitude", format!("{:.4}", c.longitude)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::Coordinates;

    fn sample_poi(coordinates: Option<Coordinates>) -> Poi {
        Poi {
            id: "abc".into(),
            name: "Cafe".into(),
            description: "Corner cafe".into(),
            coordinates,
            image: "http://x/y.png".into(),
        }
    }

    #[test]
    fn coordinates_render_to_four_decimal_places() {
        let poi = sample_poi(Some(Coordinates {
            latitude: 41.385063,
            longitude: 2.173404,
        }));

        let rows = field_rows(&poi);
        assert!(rows.contains(&("Latitude", "41.3851".to_string())));
        assert!(rows.contains(&("Longitude", "2.1734".to_string())));
    }

    #[test]
    fn missing_coordinates_render_no_rows() {
        let rows = field_rows(&sample_poi(None));

        let labels: Vec<&str> = rows.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, ["Description", "Image"]);
    }
}

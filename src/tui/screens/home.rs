//! Home screen: map markers and POI list, with the creation modal.

use std::path::PathBuf;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Padding, Paragraph,
        canvas::{Canvas, Points},
    },
};

use crate::model::{Coordinates, NewPoi, Poi, Region};

use super::form::AddPoiForm;

/// Home screen state: the POI collection, the map viewport, the list
/// cursor, and the creation modal.
pub struct HomeScreen {
    loading: bool,
    pois: Vec<Poi>,
    region: Region,
    selected: usize,
    form: AddPoiForm,
    form_open: bool,
    gallery_dir: PathBuf,
}

impl HomeScreen {
    pub fn new(gallery_dir: PathBuf) -> Self {
        Self {
            loading: true,
            pois: Vec::new(),
            region: Region::default(),
            selected: 0,
            form: AddPoiForm::new(),
            form_open: false,
            gallery_dir,
        }
    }

    /// Applies the mount-time fetch: loading ends and the viewport refits
    /// around the markers. One-way; nothing flips the screen back.
    pub fn pois_loaded(&mut self, pois: Vec<Poi>) {
        self.region = Region::fit(&pois);
        self.pois = pois;
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.pois.len() {
            self.selected += 1;
        }
    }

    /// The POI under the list cursor.
    pub fn selected_poi(&self) -> Option<&Poi> {
        self.pois.get(self.selected)
    }

    /// POIs drawn as map markers: exactly those carrying coordinates.
    pub fn markers(&self) -> impl Iterator<Item = (&Poi, Coordinates)> {
        self.pois
            .iter()
            .filter_map(|poi| poi.coordinates.map(|c| (poi, c)))
    }

    // ── creation modal ──

    pub fn form_is_open(&self) -> bool {
        self.form_open
    }

    /// Opens the modal. Independent of the loading state; field values
    /// from an earlier dismissal are still in place.
    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn form_char(&mut self, c: char) {
        self.form.on_char(c);
    }

    pub fn form_backspace(&mut self) {
        self.form.on_backspace();
    }

    pub fn form_up(&mut self) {
        self.form.on_up();
    }

    pub fn form_down(&mut self) {
        self.form.on_down();
    }

    /// Esc in the modal: closes the picker first, then the modal itself.
    pub fn form_esc(&mut self) {
        if self.form.on_esc() {
            self.form_open = false;
        }
    }

    /// Enter in the modal. Returns the submission when the form completes.
    pub fn form_enter(&mut self) -> Option<NewPoi> {
        self.form.on_enter(&self.gallery_dir)
    }

    /// Applies a successful creation: the record joins the list without a
    /// re-fetch, the viewport refits, and the form resets for next time.
    pub fn apply_created(&mut self, poi: Poi) {
        self.pois.push(poi);
        self.region = Region::fit(&self.pois);
        self.form = AddPoiForm::new();
        self.form_open = false;
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(1),      // title bar
            Constraint::Percentage(55), // map
            Constraint::Min(0),         // list
            Constraint::Length(1),      // help
        ])
        .split(area);

        let muted = Style::default().fg(Color::DarkGray);

        // Title bar.
        let title = Paragraph::new(Line::from(Span::styled(
            " POI Map",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(title, chunks[0]);

        if self.loading {
            let loading = Paragraph::new(Line::from(Span::styled(
                "Loading points of interest...",
                muted,
            )))
            .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
            frame.render_widget(loading, chunks[1]);
        } else {
            self.render_map(frame, chunks[1]);
            self.render_list(frame, chunks[2]);
        }

        // Help line.
        let help = Paragraph::new(Line::from(Span::styled(
            " ↑↓ navigate  ⏎ details  a add  q quit",
            muted,
        )));
        frame.render_widget(help, chunks[3]);

        if self.form_open {
            self.form.render(frame);
        }
    }

    fn render_map(&self, frame: &mut Frame, area: Rect) {
        let selected = self.selected_poi();

        let map = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .marker(Marker::Braille)
            .x_bounds(self.region.x_bounds())
            .y_bounds(self.region.y_bounds())
            .paint(|ctx| {
                let points: Vec<(f64, f64)> = self
                    .markers()
                    .map(|(_, c)| (c.longitude, c.latitude))
                    .collect();
                ctx.draw(&Points {
                    coords: &points,
                    color: Color::Red,
                });

                // Highlight and label the selected marker.
                if let Some(poi) = selected {
                    if let Some(c) = poi.coordinates {
                        ctx.draw(&Points {
                            coords: &[(c.longitude, c.latitude)],
                            color: Color::Yellow,
                        });
                        ctx.print(
                            c.longitude,
                            c.latitude,
                            Line::styled(poi.name.clone(), Style::default().fg(Color::Yellow)),
                        );
                    }
                }
            });
        frame.render_widget(map, area);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let block = Block::default().padding(Padding::new(2, 2, 0, 0));

        if self.pois.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No points of interest yet. Press a to add one.",
                muted,
            )))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Window the rows so the cursor stays visible.
        let visible = block.inner(area).height as usize;
        let offset = self.selected.saturating_sub(visible.saturating_sub(1));

        let items: Vec<ListItem> = self
            .pois
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, poi)| {
                let style = if i == self.selected { highlight } else { normal };
                let pointer = if i == self.selected { "› " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(pointer, style),
                    Span::styled(&poi.name, style),
                    Span::styled(format!("  {}", poi.description), muted),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_widget(list, area);
    }
}

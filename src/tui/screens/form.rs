//! Modal form for creating a POI, with a nested gallery picker.

use std::path::Path;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use crate::gallery::{self, GalleryImage};
use crate::model::NewPoi;

/// Which form row has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Name,
    Description,
    Latitude,
    Longitude,
    Image,
    PickImage,
    Create,
}

/// The creation form: five text fields and two action rows.
///
/// Field values survive the modal being dismissed; they reset only after
/// a successful create.
pub struct AddPoiForm {
    row: Row,
    name: String,
    description: String,
    latitude: String,
    longitude: String,
    image: String,
    picker: Option<GalleryPicker>,
}

impl AddPoiForm {
    pub fn new() -> Self {
        Self {
            row: Row::Name,
            name: String::new(),
            description: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            image: String::new(),
            picker: None,
        }
    }

    /// Handle a character being typed into the focused field.
    pub fn on_char(&mut self, c: char) {
        if self.picker.is_some() {
            return;
        }
        if let Some(field) = self.focused_field() {
            field.push(c);
        }
    }

    /// Handle backspace in the focused field.
    pub fn on_backspace(&mut self) {
        if self.picker.is_some() {
            return;
        }
        if let Some(field) = self.focused_field() {
            field.pop();
        }
    }

    /// Move focus to the previous row, or the picker selection up.
    pub fn on_up(&mut self) {
        if let Some(picker) = &mut self.picker {
            picker.move_up();
            return;
        }
        self.row = match self.row {
            Row::Name => Row::Create,
            Row::Description => Row::Name,
            Row::Latitude => Row::Description,
            Row::Longitude => Row::Latitude,
            Row::Image => Row::Longitude,
            Row::PickImage => Row::Image,
            Row::Create => Row::PickImage,
        };
    }

    /// Move focus to the next row, or the picker selection down.
    pub fn on_down(&mut self) {
        if let Some(picker) = &mut self.picker {
            picker.move_down();
            return;
        }
        self.row = match self.row {
            Row::Name => Row::Description,
            Row::Description => Row::Latitude,
            Row::Latitude => Row::Longitude,
            Row::Longitude => Row::Image,
            Row::Image => Row::PickImage,
            Row::PickImage => Row::Create,
            Row::Create => Row::Name,
        };
    }

    /// Handle Enter. Returns Some(NewPoi) when the form submits.
    ///
    /// On a text field Enter advances focus; on the gallery row it opens
    /// the picker over `gallery_dir`; with the picker open it selects the
    /// highlighted image into the Image field.
    pub fn on_enter(&mut self, gallery_dir: &Path) -> Option<NewPoi> {
        if let Some(picker) = self.picker.take() {
            if let Some(image) = picker.images.get(picker.selected) {
                self.image = image.uri();
            }
            return None;
        }

        match self.row {
            Row::PickImage => {
                self.picker = Some(GalleryPicker::new(gallery::scan(gallery_dir)));
                None
            }
            Row::Create => Some(self.submit()),
            _ => {
                self.on_down();
                None
            }
        }
    }

    /// Handle Esc. Returns true when the modal should be dismissed; with
    /// the picker open, Esc only cancels the picker.
    pub fn on_esc(&mut self) -> bool {
        if self.picker.is_some() {
            self.picker = None;
            return false;
        }
        true
    }

    fn focused_field(&mut self) -> Option<&mut String> {
        match self.row {
            Row::Name => Some(&mut self.name),
            Row::Description => Some(&mut self.description),
            Row::Latitude => Some(&mut self.latitude),
            Row::Longitude => Some(&mut self.longitude),
            Row::Image => Some(&mut self.image),
            Row::PickImage | Row::Create => None,
        }
    }

    fn submit(&self) -> NewPoi {
        NewPoi::new(
            self.name.clone(),
            self.description.clone(),
            parse_coordinate(&self.latitude),
            parse_coordinate(&self.longitude),
            self.image.clone(),
        )
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = modal_area(frame.area(), 52, 13);
        frame.render_widget(Clear, area);

        let block = Block::bordered()
            .title(" Add New POI ")
            .border_style(Style::default().fg(Color::Blue));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let fields: [(Row, &str, &String); 5] = [
            (Row::Name, "Name", &self.name),
            (Row::Description, "Description", &self.description),
            (Row::Latitude, "Latitude", &self.latitude),
            (Row::Longitude, "Longitude", &self.longitude),
            (Row::Image, "Image URL", &self.image),
        ];

        let mut lines = Vec::new();
        for (row, label, value) in fields {
            let focused = self.row == row && self.picker.is_none();
            let pointer = if focused { "› " } else { "  " };
            let style = if focused { highlight } else { normal };

            let mut spans = vec![
                Span::styled(pointer, style),
                Span::styled(format!("{label:<13}"), muted),
                Span::styled(value, if focused { highlight } else { normal }),
            ];
            if focused {
                spans.push(Span::styled("█", Style::default().fg(Color::DarkGray)));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::default());
        for (row, label) in [
            (Row::PickImage, "Pick an image from gallery"),
            (Row::Create, "Create POI"),
        ] {
            let focused = self.row == row && self.picker.is_none();
            let pointer = if focused { "› " } else { "  " };
            let style = if focused { highlight } else { normal };
            lines.push(Line::from(vec![
                Span::styled(pointer, style),
                Span::styled(label, style),
            ]));
        }

        lines.push(Line::default());
        let help = if self.picker.is_some() {
            " ↑↓ navigate  ⏎ select  esc cancel"
        } else {
            " ↑↓ field  ⏎ select  esc close"
        };
        lines.push(Line::from(Span::styled(help, muted)));

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(picker) = &self.picker {
            picker.render(frame);
        }
    }
}

/// The nested gallery overlay: a cursor over the scanned images.
struct GalleryPicker {
    images: Vec<GalleryImage>,
    selected: usize,
}

impl GalleryPicker {
    fn new(images: Vec<GalleryImage>) -> Self {
        Self {
            images,
            selected: 0,
        }
    }

    fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn move_down(&mut self) {
        if self.selected + 1 < self.images.len() {
            self.selected += 1;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = modal_area(frame.area(), 44, 10);
        frame.render_widget(Clear, area);

        let block = Block::bordered()
            .title(" Gallery ")
            .border_style(Style::default().fg(Color::Blue));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        if self.images.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled("(no images found)", muted)));
            frame.render_widget(empty, inner);
            return;
        }

        // Window the list so the selection stays visible.
        let visible = inner.height as usize;
        let offset = self.selected.saturating_sub(visible.saturating_sub(1));

        let lines: Vec<Line> = self
            .images
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, image)| {
                let style = if i == self.selected { highlight } else { normal };
                let pointer = if i == self.selected { "› " } else { "  " };
                Line::from(vec![
                    Span::styled(pointer, style),
                    Span::styled(image.name(), style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// `parseFloat`-style coordinate parsing: anything that does not parse
/// as a float becomes NaN rather than an error.
fn parse_coordinate(input: &str) -> f64 {
    input.trim().parse().unwrap_or(f64::NAN)
}

/// Centers a `width` x `height` box inside `area`, clamped to fit.
fn modal_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    use crate::model::PLACEHOLDER_IMAGE;

    fn type_str(form: &mut AddPoiForm, s: &str) {
        for c in s.chars() {
            form.on_char(c);
        }
    }

    fn enter(form: &mut AddPoiForm) -> Option<NewPoi> {
        form.on_enter(Path::new(""))
    }

    #[test]
    fn filled_form_submits_a_new_poi() {
        let mut form = AddPoiForm::new();

        type_str(&mut form, "Cafe");
        assert!(enter(&mut form).is_none()); // to description
        type_str(&mut form, "Corner cafe");
        assert!(enter(&mut form).is_none()); // to latitude
        type_str(&mut form, "41.40");
        assert!(enter(&mut form).is_none()); // to longitude
        type_str(&mut form, "2.17");

        form.on_down(); // image
        form.on_down(); // pick from gallery
        form.on_down(); // create
        let new = enter(&mut form).unwrap();

        assert_eq!(new.name, "Cafe");
        assert_eq!(new.description, "Corner cafe");
        assert_eq!(new.latitude, 41.40);
        assert_eq!(new.longitude, 2.17);
        assert_eq!(new.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn typed_image_is_kept_verbatim() {
        let mut form = AddPoiForm::new();
        form.on_up(); // wrap to create
        form.on_up(); // pick from gallery
        form.on_up(); // image
        type_str(&mut form, "http://x/y.png");

        form.on_down();
        form.on_down();
        let new = enter(&mut form).unwrap();
        assert_eq!(new.image, "http://x/y.png");
    }

    #[test]
    fn unparsable_coordinates_become_nan() {
        let mut form = AddPoiForm::new();
        assert!(enter(&mut form).is_none()); // name left empty
        assert!(enter(&mut form).is_none()); // description left empty
        type_str(&mut form, "abc"); // latitude

        form.on_down(); // longitude, left empty
        form.on_down(); // image
        form.on_down(); // pick from gallery
        form.on_down(); // create
        let new = enter(&mut form).unwrap();

        assert!(new.latitude.is_nan());
        assert!(new.longitude.is_nan());
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = AddPoiForm::new();
        form.on_up();
        assert_eq!(form.row, Row::Create);
        form.on_down();
        assert_eq!(form.row, Row::Name);
    }

    #[test]
    fn backspace_edits_the_focused_field() {
        let mut form = AddPoiForm::new();
        type_str(&mut form, "ab");
        form.on_backspace();
        assert_eq!(form.name, "a");
    }

    #[test]
    fn picker_fills_the_image_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("photo.png"), b"").unwrap();

        let mut form = AddPoiForm::new();
        form.on_up(); // create
        form.on_up(); // pick from gallery
        assert!(form.on_enter(dir.path()).is_none());
        assert!(form.picker.is_some());

        assert!(form.on_enter(dir.path()).is_none());
        assert!(form.picker.is_none());
        assert_eq!(
            form.image,
            format!("file://{}", dir.path().join("photo.png").display())
        );
    }

    #[test]
    fn enter_on_an_empty_gallery_just_closes_the_picker() {
        let dir = TempDir::new().unwrap();
        let mut form = AddPoiForm::new();
        form.on_up();
        form.on_up();
        form.on_enter(dir.path());

        assert!(form.on_enter(dir.path()).is_none());
        assert!(form.picker.is_none());
        assert!(form.image.is_empty());
    }

    #[test]
    fn esc_closes_the_picker_before_the_form() {
        let dir = TempDir::new().unwrap();
        let mut form = AddPoiForm::new();
        form.on_up();
        form.on_up();
        form.on_enter(dir.path());

        assert!(!form.on_esc());
        assert!(form.picker.is_none());
        assert!(form.on_esc());
    }

    #[test]
    fn typing_is_ignored_while_the_picker_is_open() {
        let dir = TempDir::new().unwrap();
        let mut form = AddPoiForm::new();
        type_str(&mut form, "Cafe");
        form.on_up(); // wrap to create
        form.on_up(); // pick from gallery
        form.on_enter(dir.path());

        type_str(&mut form, "xyz");
        form.on_esc();
        assert_eq!(form.name, "Cafe");
    }

    #[test]
    fn parse_coordinate_is_permissive() {
        assert_eq!(parse_coordinate(" 41.40 "), 41.40);
        assert!(parse_coordinate("abc").is_nan());
        assert!(parse_coordinate("").is_nan());
    }

    #[test]
    fn modal_area_centers_and_clamps() {
        let centered = modal_area(Rect::new(0, 0, 80, 24), 52, 13);
        assert_eq!(centered, Rect::new(14, 5, 52, 13));

        let clamped = modal_area(Rect::new(0, 0, 40, 10), 52, 13);
        assert_eq!(clamped, Rect::new(0, 0, 40, 10));
    }
}

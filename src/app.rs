use eframe::egui;

use crate::geometry::Point;
use crate::interaction::{Corners, Interaction, PointerEvent};
use crate::loader::{ImageSource, PendingImage};
use crate::surface::{Surface, SURFACE_HEIGHT, SURFACE_WIDTH};

// ── App ─────────────────────────────────────────────────────────────────────

pub struct LabelizerApp {
    source: Option<ImageSource>,
    pending: Option<PendingImage>,

    surface: Surface,
    texture: Option<egui::TextureHandle>,
    // on-screen size of the surface as of the last frame
    display_size: Option<(u32, u32)>,

    interaction: Interaction,
    corners: Corners,
}

impl LabelizerApp {
    pub fn new(ctx: &egui::Context, location: &str) -> Self {
        let mut app = Self {
            source: None,
            pending: None,
            surface: Surface::default(),
            texture: None,
            display_size: None,
            interaction: Interaction::default(),
            corners: Corners::default(),
        };
        app.set_image_source(ctx, location);
        app
    }

    /// Start loading `location` unless it is already the current source.
    pub fn set_image_source(&mut self, ctx: &egui::Context, location: &str) {
        let source = ImageSource::parse(location);
        if self.source.as_ref() == Some(&source) {
            return;
        }
        tracing::info!(?source, "loading image");
        let ctx = ctx.clone();
        self.pending = Some(PendingImage::spawn(source.clone(), move || {
            ctx.request_repaint()
        }));
        self.source = Some(source);
    }

    fn poll_image(&mut self) {
        let Some(ref pending) = self.pending else {
            return;
        };
        let Some(result) = pending.poll() else {
            return;
        };
        match result {
            Ok(img) => {
                tracing::info!(
                    source = ?pending.source(),
                    width = img.width(),
                    height = img.height(),
                    "image loaded"
                );
                self.surface.draw_image(&img, self.display_size);
            }
            Err(err) => {
                tracing::warn!(source = ?pending.source(), "image load failed: {err}");
            }
        }
        self.pending = None;
    }

    /// Feed this frame's input events that land on the surface through the
    /// rectangle state machine.
    fn dispatch(&mut self, events: &[egui::Event], canvas_rect: egui::Rect) {
        for event in pointer_events(events, canvas_rect) {
            self.interaction
                .handle(event, &mut self.surface, &mut self.corners);
        }
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        if !self.surface.take_dirty() {
            return;
        }
        let pixels = self.surface.pixels();
        let size = [pixels.width() as usize, pixels.height() as usize];
        let color_image =
            egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_flat_samples().as_slice());
        match self.texture {
            Some(ref mut tex) => tex.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("surface", color_image, egui::TextureOptions::LINEAR));
            }
        }
    }

    fn show_canvas(&mut self, ui: &mut egui::Ui) {
        let (canvas_rect, _response) = ui.allocate_exact_size(
            egui::vec2(SURFACE_WIDTH as f32, SURFACE_HEIGHT as f32),
            egui::Sense::click_and_drag(),
        );
        self.display_size = Some((canvas_rect.width() as u32, canvas_rect.height() as u32));

        let events = ui.input(|i| i.events.clone());
        self.dispatch(&events, canvas_rect);
        self.sync_texture(ui.ctx());

        let painter = ui.painter_at(canvas_rect);
        painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(40));
        if let Some(ref tex) = self.texture {
            painter.image(
                tex.id(),
                canvas_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
    }
}

fn pointer_events(events: &[egui::Event], canvas_rect: egui::Rect) -> Vec<PointerEvent> {
    let to_surface = |pos: egui::Pos2| {
        let rel = pos - canvas_rect.min;
        Point::new(rel.x, rel.y)
    };
    events
        .iter()
        .filter_map(|event| match *event {
            egui::Event::PointerMoved(pos) if canvas_rect.contains(pos) => {
                Some(PointerEvent::Move(to_surface(pos)))
            }
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } if canvas_rect.contains(pos) => {
                let p = to_surface(pos);
                Some(if pressed {
                    PointerEvent::Down(p)
                } else {
                    PointerEvent::Up(p)
                })
            }
            _ => None,
        })
        .collect()
}

// ── Corner Form ─────────────────────────────────────────────────────────────

pub const SLOT_COUNT: usize = 4;

/// Text shown in form slot `index`; empty when no rectangle has been
/// committed at that position.
pub fn slot_text(corners: &Corners, index: usize) -> String {
    corners
        .get(index)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Placeholder submission. Nothing is sent and the corners stay as they are.
pub fn submit(corners: &Corners) {
    tracing::debug!(count = corners.len(), "submit requested, nothing to do");
}

/// Draw the read-only corner fields and the submit button.
pub fn show_form(ui: &mut egui::Ui, corners: &Corners) {
    egui::Grid::new("corner_form")
        .num_columns(2)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for i in 0..SLOT_COUNT {
                ui.label(format!("Corner {}:", i + 1));
                let text = slot_text(corners, i);
                ui.add(egui::TextEdit::singleline(&mut text.as_str()).desired_width(320.0));
                ui.end_row();
            }
        });
    ui.add_space(8.0);
    if ui.button("Submit and Next").clicked() {
        submit(corners);
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for LabelizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                self.show_canvas(ui);
                ui.add_space(16.0);
                ui.vertical(|ui| show_form(ui, &self.corners));
            });
        });
    }
}

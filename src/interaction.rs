use std::ops::Deref;

use crate::geometry::{Point, Rectangle};
use crate::surface::Surface;

/// Pointer input delivered to the drawing surface, in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        start: Point,
        current: Point,
        active: Rectangle,
    },
}

/// Rectangles finalized at pointer-up, oldest first.
///
/// Entries can only be appended; reads go through the `[Rectangle]` deref.
#[derive(Clone, Debug, Default)]
pub struct Corners {
    committed: Vec<Rectangle>,
}

impl Corners {
    pub fn push(&mut self, rect: Rectangle) {
        self.committed.push(rect);
    }
}

impl Deref for Corners {
    type Target = [Rectangle];

    fn deref(&self) -> &[Rectangle] {
        &self.committed
    }
}

/// Rectangle-drawing state machine for the drawing surface.
#[derive(Debug, Default)]
pub struct Interaction {
    drag: DragState,
}

impl Interaction {
    /// Apply one pointer event. Moves repaint `surface`; a release commits
    /// the active rectangle into `corners`. A move or release with no drag
    /// in progress does nothing, so a stray release never commits a stale
    /// zero rectangle.
    pub fn handle(&mut self, event: PointerEvent, surface: &mut Surface, corners: &mut Corners) {
        match (event, self.drag) {
            (PointerEvent::Down(p), _) => {
                self.drag = DragState::Dragging {
                    start: p,
                    current: p,
                    active: Rectangle::from_drag(p, p),
                };
            }
            (PointerEvent::Move(p), DragState::Dragging { start, .. }) => {
                let active = Rectangle::from_drag(start, p);
                self.drag = DragState::Dragging {
                    start,
                    current: p,
                    active,
                };
                surface.repaint(&active);
            }
            (PointerEvent::Up(_), DragState::Dragging { active, .. }) => {
                tracing::debug!(%active, index = corners.len(), "rectangle committed");
                corners.push(active);
                self.drag = DragState::Idle;
            }
            (PointerEvent::Move(_) | PointerEvent::Up(_), DragState::Idle) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::OVERLAY_COLOR;

    fn active(interaction: &Interaction) -> Option<Rectangle> {
        match interaction.drag {
            DragState::Dragging { active, .. } => Some(active),
            DragState::Idle => None,
        }
    }

    fn drag(
        interaction: &mut Interaction,
        surface: &mut Surface,
        corners: &mut Corners,
        from: (f32, f32),
        to: (f32, f32),
    ) {
        let events = [
            PointerEvent::Down(Point::new(from.0, from.1)),
            PointerEvent::Move(Point::new(to.0, to.1)),
            PointerEvent::Up(Point::new(to.0, to.1)),
        ];
        for event in events {
            interaction.handle(event, surface, corners);
        }
    }

    #[test]
    fn click_without_move_commits_degenerate_rectangle() {
        let mut interaction = Interaction::default();
        let mut surface = Surface::default();
        let mut corners = Corners::default();

        let p = Point::new(42.0, 17.0);
        interaction.handle(PointerEvent::Down(p), &mut surface, &mut corners);
        assert!(matches!(interaction.drag, DragState::Dragging { .. }));
        interaction.handle(PointerEvent::Up(p), &mut surface, &mut corners);

        assert_eq!(&corners[..], &[Rectangle::new(42.0, 17.0, 0.0, 0.0)]);
        assert_eq!(interaction.drag, DragState::Idle);
    }

    #[test]
    fn drags_commit_in_order_with_signed_extents() {
        let mut interaction = Interaction::default();
        let mut surface = Surface::default();
        let mut corners = Corners::default();

        drag(&mut interaction, &mut surface, &mut corners, (50.0, 50.0), (150.0, 120.0));
        drag(&mut interaction, &mut surface, &mut corners, (200.0, 200.0), (180.0, 170.0));

        assert_eq!(
            &corners[..],
            &[
                Rectangle::new(50.0, 50.0, 100.0, 70.0),
                Rectangle::new(200.0, 200.0, -20.0, -30.0),
            ]
        );
    }

    #[test]
    fn committed_rectangles_never_change() {
        let mut interaction = Interaction::default();
        let mut surface = Surface::default();
        let mut corners = Corners::default();

        drag(&mut interaction, &mut surface, &mut corners, (1.0, 2.0), (3.0, 5.0));
        let first = corners[..1].to_vec();

        for i in 0..5 {
            let f = i as f32 * 10.0;
            drag(&mut interaction, &mut surface, &mut corners, (f, f), (f + 7.0, f - 3.0));
            assert_eq!(&corners[..1], first.as_slice());
        }
        assert_eq!(corners.len(), 6);
    }

    #[test]
    fn release_uses_last_move_position() {
        let mut interaction = Interaction::default();
        let mut surface = Surface::default();
        let mut corners = Corners::default();

        interaction.handle(PointerEvent::Down(Point::new(10.0, 10.0)), &mut surface, &mut corners);
        interaction.handle(PointerEvent::Move(Point::new(30.0, 40.0)), &mut surface, &mut corners);
        assert_eq!(active(&interaction), Some(Rectangle::new(10.0, 10.0, 20.0, 30.0)));
        interaction.handle(PointerEvent::Up(Point::new(99.0, 99.0)), &mut surface, &mut corners);

        assert_eq!(corners.get(0), Some(&Rectangle::new(10.0, 10.0, 20.0, 30.0)));
        assert_eq!(active(&interaction), None);
    }

    #[test]
    fn idle_moves_and_releases_are_ignored() {
        let mut interaction = Interaction::default();
        let mut surface = Surface::default();
        let mut corners = Corners::default();
        surface.take_dirty();

        interaction.handle(PointerEvent::Move(Point::new(5.0, 5.0)), &mut surface, &mut corners);
        interaction.handle(PointerEvent::Up(Point::new(5.0, 5.0)), &mut surface, &mut corners);

        assert!(corners.is_empty());
        assert!(!surface.take_dirty());
    }

    #[test]
    fn stray_release_after_drag_commits_nothing() {
        let mut interaction = Interaction::default();
        let mut surface = Surface::default();
        let mut corners = Corners::default();

        drag(&mut interaction, &mut surface, &mut corners, (50.0, 50.0), (150.0, 120.0));
        interaction.handle(PointerEvent::Up(Point::new(150.0, 120.0)), &mut surface, &mut corners);

        assert_eq!(&corners[..], &[Rectangle::new(50.0, 50.0, 100.0, 70.0)]);
    }

    #[test]
    fn press_while_dragging_restarts() {
        let mut interaction = Interaction::default();
        let mut surface = Surface::default();
        let mut corners = Corners::default();

        interaction.handle(PointerEvent::Down(Point::new(10.0, 10.0)), &mut surface, &mut corners);
        interaction.handle(PointerEvent::Move(Point::new(50.0, 50.0)), &mut surface, &mut corners);
        interaction.handle(PointerEvent::Down(Point::new(70.0, 80.0)), &mut surface, &mut corners);
        interaction.handle(PointerEvent::Up(Point::new(70.0, 80.0)), &mut surface, &mut corners);

        assert_eq!(&corners[..], &[Rectangle::new(70.0, 80.0, 0.0, 0.0)]);
    }

    #[test]
    fn move_paints_active_rectangle() {
        let mut interaction = Interaction::default();
        let mut surface = Surface::default();
        let mut corners = Corners::default();

        interaction.handle(PointerEvent::Down(Point::new(50.0, 50.0)), &mut surface, &mut corners);
        interaction.handle(PointerEvent::Move(Point::new(150.0, 120.0)), &mut surface, &mut corners);

        assert_eq!(*surface.pixels().get_pixel(100, 100), OVERLAY_COLOR);
        assert_ne!(*surface.pixels().get_pixel(160, 100), OVERLAY_COLOR);

        // the last frame stays up after release
        interaction.handle(PointerEvent::Up(Point::new(150.0, 120.0)), &mut surface, &mut corners);
        assert_eq!(*surface.pixels().get_pixel(100, 100), OVERLAY_COLOR);
    }
}

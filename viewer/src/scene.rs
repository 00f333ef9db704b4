use std::collections::HashMap;

use gnsscore::catalog::{LatLng, SiteRecord};
use gnsscore::map::marker::{MarkerStyle, Rgb};
use gnsscore::map::tiles::visible_tiles;
use gnsscore::map::{MercatorHelper, TileId};
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::widget::image;
use iced::{mouse, Color, Event, Point, Rectangle, Renderer, Size, Theme, Vector};

use crate::Message;

/// Interactive slippy map: one raster tile layer plus the site pins.
/// Pan and zoom mirror the usual web-map gestures; clicking a pin selects
/// its site.
pub struct MapScene<'a> {
    pub sites: &'a [SiteRecord],
    pub selected: Option<usize>,
    pub centre: LatLng,
    pub zoom: u8,
    pub tiles: &'a HashMap<TileId, image::Handle>,
    pub cache: &'a canvas::Cache,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Interaction {
    drag_from: Option<Point>,
}

impl MapScene<'_> {
    fn screen_position(&self, location: LatLng, bounds: Rectangle) -> Point {
        let (cx, cy) = MercatorHelper::project(self.centre, self.zoom);
        let (x, y) = MercatorHelper::project(location, self.zoom);
        Point::new(
            (x - cx) as f32 + bounds.width / 2.0,
            (y - cy) as f32 + bounds.height / 2.0,
        )
    }

    /// Marker under the cursor; the enlarged selected pin wins ties.
    fn site_at(&self, position: Point, bounds: Rectangle) -> Option<usize> {
        if let Some(index) = self.selected {
            if let Some(site) = self.sites.get(index) {
                let anchor = self.screen_position(site.location, bounds);
                if anchor.distance(position) <= MarkerStyle::selected().hit_radius() {
                    return Some(index);
                }
            }
        }

        let radius = MarkerStyle::normal().hit_radius();
        let mut nearest = None;
        let mut best = f32::MAX;
        for (index, site) in self.sites.iter().enumerate() {
            let distance = self
                .screen_position(site.location, bounds)
                .distance(position);
            if distance <= radius && distance < best {
                best = distance;
                nearest = Some(index);
            }
        }
        nearest
    }

    fn draw_tiles(&self, frame: &mut Frame, bounds: Rectangle) {
        let (cx, cy) = MercatorHelper::project(self.centre, self.zoom);
        let tile = MercatorHelper::TILE_SIZE;
        let origin_x = cx - f64::from(bounds.width) / 2.0;
        let origin_y = cy - f64::from(bounds.height) / 2.0;

        for id in visible_tiles(self.centre, self.zoom, bounds.width, bounds.height) {
            if let Some(handle) = self.tiles.get(&id) {
                let x = f64::from(id.x) * tile - origin_x;
                let y = f64::from(id.y) * tile - origin_y;
                let area = Rectangle::new(
                    Point::new(x as f32, y as f32),
                    Size::new(tile as f32, tile as f32),
                );
                frame.draw_image(area, canvas::Image::new(handle.clone()));
            }
        }
    }

    fn draw_markers(&self, frame: &mut Frame, bounds: Rectangle) {
        for (index, site) in self.sites.iter().enumerate() {
            if self.selected == Some(index) {
                continue;
            }
            self.draw_pin(frame, bounds, site.location, MarkerStyle::normal());
        }
        // drawn last so it sits above its neighbours
        if let Some(site) = self.selected.and_then(|index| self.sites.get(index)) {
            self.draw_pin(frame, bounds, site.location, MarkerStyle::selected());
        }
    }

    fn draw_pin(&self, frame: &mut Frame, bounds: Rectangle, location: LatLng, style: MarkerStyle) {
        let anchor = self.screen_position(location, bounds);
        let margin = style.size;
        if anchor.x < -margin
            || anchor.y < -margin
            || anchor.x > bounds.width + margin
            || anchor.y > bounds.height + margin
        {
            return;
        }

        let [apex, left, right] = style.pin_vertices();
        let pin = Path::new(|builder| {
            builder.move_to(anchor + Vector::new(apex.0, apex.1));
            builder.line_to(anchor + Vector::new(left.0, left.1));
            builder.line_to(anchor + Vector::new(right.0, right.1));
            builder.close();
        });
        frame.fill(&pin, colour(style.fill));
        frame.stroke(
            &pin,
            Stroke::default()
                .with_width(style.border_width)
                .with_color(colour(style.border)),
        );
    }
}

impl canvas::Program<Message> for MapScene<'_> {
    type State = Interaction;

    fn update(
        &self,
        state: &mut Interaction,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                if let Some(index) = self.site_at(position, bounds) {
                    state.drag_from = None;
                    return Some(canvas::Action::publish(Message::SiteClicked(index)));
                }
                state.drag_from = Some(position);
                None
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let position = cursor.position_in(bounds)?;
                let from = state.drag_from?;
                state.drag_from = Some(position);
                let delta = position - from;
                if delta == Vector::new(0.0, 0.0) {
                    return None;
                }
                Some(canvas::Action::publish(Message::MapDragged(delta)))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                state.drag_from = None;
                None
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                cursor.position_in(bounds)?;
                let amount = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => *y,
                    mouse::ScrollDelta::Pixels { y, .. } => *y / 40.0,
                };
                if amount == 0.0 {
                    return None;
                }
                let step = if amount > 0.0 { 1 } else { -1 };
                Some(canvas::Action::publish(Message::MapZoomed(step)))
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Interaction,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            frame.fill_rectangle(
                Point::ORIGIN,
                bounds.size(),
                Color::from_rgb(0.85, 0.89, 0.93),
            );
            self.draw_tiles(frame, bounds);
            self.draw_markers(frame, bounds);
        });
        vec![geometry]
    }

    fn mouse_interaction(
        &self,
        state: &Interaction,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.drag_from.is_some() {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(position) if self.site_at(position, bounds).is_some() => {
                mouse::Interaction::Pointer
            }
            Some(_) => mouse::Interaction::Grab,
            None => mouse::Interaction::default(),
        }
    }
}

fn colour((r, g, b): Rgb) -> Color {
    Color::from_rgb8(r, g, b)
}

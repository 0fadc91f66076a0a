use crate::geo;
use crate::models::LatLng;

/// Center and integer zoom of the map surface. Container size is not part of
/// the viewport; callers pass it in because it changes with layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: LatLng,
    zoom: u8,
    max_zoom: u8,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: u8, max_zoom: u8) -> Self {
        let mut v = Self {
            center,
            zoom,
            max_zoom,
        };
        v.set_view(center, zoom);
        v
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Move to `center` at `zoom`, normalizing both.
    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.zoom = zoom.clamp(geo::MIN_ZOOM, self.max_zoom);
        self.center = LatLng::new(
            geo::clamp_latitude(center.lat),
            geo::wrap_longitude(center.lng),
        );
    }

    /// World pixel at the container's top-left corner.
    pub fn pixel_origin(&self, width: f64, height: f64) -> (f64, f64) {
        let (cx, cy) = geo::project(self.center, self.zoom);
        (cx - width / 2.0, cy - height / 2.0)
    }

    /// Container position of `p`, using whichever world copy is closest to
    /// the center so points near the antimeridian stay on screen.
    pub fn to_container(&self, p: LatLng, width: f64, height: f64) -> (f64, f64) {
        let size = geo::world_size(self.zoom);
        let (cx, _) = geo::project(self.center, self.zoom);
        let (mut px, py) = geo::project(p, self.zoom);
        let dx = px - cx;
        if dx > size / 2.0 {
            px -= size;
        } else if dx < -size / 2.0 {
            px += size;
        }
        let origin = self.pixel_origin(width, height);
        (px - origin.0, py - origin.1)
    }

    pub fn to_latlng(&self, x: f64, y: f64, width: f64, height: f64) -> LatLng {
        let origin = self.pixel_origin(width, height);
        geo::unproject(origin.0 + x, origin.1 + y, self.zoom)
    }

    /// Pan by a screen-space drag delta: dragging right reveals what is west.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let (cx, cy) = geo::project(self.center, self.zoom);
        let center = geo::unproject(cx - dx, cy - dy, self.zoom);
        self.set_view(center, self.zoom);
    }

    /// Change zoom keeping the coordinate under `anchor` fixed on screen.
    pub fn zoom_around(&mut self, new_zoom: u8, anchor: (f64, f64), width: f64, height: f64) {
        let new_zoom = new_zoom.clamp(geo::MIN_ZOOM, self.max_zoom);
        if new_zoom == self.zoom {
            return;
        }
        let fixed = self.to_latlng(anchor.0, anchor.1, width, height);
        let (fx, fy) = geo::project(fixed, new_zoom);
        let cx = fx - anchor.0 + width / 2.0;
        let cy = fy - anchor.1 + height / 2.0;
        let center = geo::unproject(cx, cy, new_zoom);
        self.set_view(center, new_zoom);
    }

    pub fn zoom_in(&mut self) {
        let z = self.zoom.saturating_add(1);
        let c = self.center;
        self.set_view(c, z);
    }

    pub fn zoom_out(&mut self) {
        let z = self.zoom.saturating_sub(1);
        let c = self.center;
        self.set_view(c, z);
    }
}

/// One pointer press tracked from down to up. Movement is reported as the
/// delta since the previous update, so a view change made mid-drag (a
/// refresh recentering the map) is panned from rather than overwritten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPan {
    start: (f64, f64),
    last: (f64, f64),
    threshold: f64,
    panning: bool,
}

impl DragPan {
    pub fn new(start: (f64, f64), threshold: f64) -> Self {
        Self {
            start,
            last: start,
            threshold,
            panning: false,
        }
    }

    /// Delta to pan by for a pointer now at `p`. `None` until the pointer
    /// has travelled past the threshold from where it went down.
    pub fn update(&mut self, p: (f64, f64)) -> Option<(f64, f64)> {
        if !self.panning {
            let (dx, dy) = (p.0 - self.start.0, p.1 - self.start.1);
            if (dx * dx + dy * dy).sqrt() <= self.threshold {
                return None;
            }
            self.panning = true;
        }
        let delta = (p.0 - self.last.0, p.1 - self.last.1);
        self.last = p;
        Some(delta)
    }

    pub fn start(&self) -> (f64, f64) {
        self.start
    }

    /// Released without ever panning.
    pub fn is_tap(&self) -> bool {
        !self.panning
    }
}

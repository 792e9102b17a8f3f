//! Web Mercator camera for the map surface.
//!
//! Screen coordinates are CSS pixels relative to the top-left corner of the
//! map element. World coordinates are pixels on the full Mercator square at
//! the current zoom.

use crate::models::LatLng;
use std::f64::consts::PI;

/// World width in pixels at zoom 0.
pub const WORLD_SIZE: f64 = 512.0;
/// Raster tile edge in pixels.
pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 6.0;
pub const INITIAL_ZOOM: f64 = 1.25;
pub const INITIAL_CENTER: LatLng = LatLng::new(0.0, 0.0);
/// Deepest level of the raster tile pyramid that is requested.
pub const MAX_TILE_ZOOM: u32 = 22;

const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileRef {
    pub z: u32,
    pub x: u32,
    pub y: u32,
    pub screen_x: f64,
    pub screen_y: f64,
    pub size: f64,
}

impl Camera {
    pub fn initial(width: f64, height: f64) -> Self {
        Self {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
            width,
            height,
        }
    }

    pub fn world_size(&self) -> f64 {
        WORLD_SIZE * 2f64.powf(self.zoom)
    }

    fn to_world(&self, p: LatLng) -> (f64, f64) {
        let size = self.world_size();
        let lat = p.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (p.lng + 180.0) / 360.0 * size;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
        (x, y)
    }

    fn from_world(&self, x: f64, y: f64) -> LatLng {
        let size = self.world_size();
        let lng = x / size * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * y / size);
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    pub fn project(&self, p: LatLng) -> (f64, f64) {
        let (wx, wy) = self.to_world(p);
        let (cx, cy) = self.to_world(self.center);
        (wx - cx + self.width / 2.0, wy - cy + self.height / 2.0)
    }

    pub fn unproject(&self, sx: f64, sy: f64) -> LatLng {
        let (cx, cy) = self.to_world(self.center);
        self.from_world(sx - self.width / 2.0 + cx, sy - self.height / 2.0 + cy)
    }

    pub fn with_zoom(self, zoom: f64) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..self
        }
    }

    pub fn zoom_in(self) -> Self {
        self.with_zoom(self.zoom + 1.0)
    }

    pub fn zoom_out(self) -> Self {
        self.with_zoom(self.zoom - 1.0)
    }

    /// Shifts the view so the content moves by `(dx, dy)` screen pixels.
    pub fn pan_by(self, dx: f64, dy: f64) -> Self {
        let center = self.unproject(self.width / 2.0 - dx, self.height / 2.0 - dy);
        Self {
            center: LatLng::new(
                center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
                center.lng.clamp(-180.0, 180.0),
            ),
            ..self
        }
    }

    /// Zooms to `zoom` keeping the point under screen position `(sx, sy)` fixed.
    pub fn zoom_around(self, zoom: f64, sx: f64, sy: f64) -> Self {
        let anchor = self.unproject(sx, sy);
        let zoomed = self.with_zoom(zoom);
        let (ax, ay) = zoomed.project(anchor);
        zoomed.pan_by(sx - ax, sy - ay)
    }

    pub fn reset(self) -> Self {
        Self::initial(self.width, self.height)
    }

    /// Moves a fraction `t` of the way toward `target`.
    pub fn ease_toward(self, target: Camera, t: f64) -> Self {
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self {
            center: LatLng::new(
                lerp(self.center.lat, target.center.lat),
                lerp(self.center.lng, target.center.lng),
            ),
            zoom: lerp(self.zoom, target.zoom),
            ..target
        }
    }

    pub fn is_close_to(&self, other: &Camera) -> bool {
        (self.zoom - other.zoom).abs() < 0.01
            && (self.center.lat - other.center.lat).abs() < 0.01
            && (self.center.lng - other.center.lng).abs() < 0.01
    }

    /// Raster tiles covering the viewport.
    ///
    /// The world is 512px at zoom 0 and tiles are 256px, so the pyramid level
    /// is one above the camera's integer zoom; tiles are drawn at native size
    /// on integer zooms and scaled up to 2x between them.
    pub fn visible_tiles(&self) -> Vec<TileRef> {
        let base = self.zoom.floor().max(0.0) as u32;
        let z = (base + 1).min(MAX_TILE_ZOOM);
        let count = 1u32 << z;
        let size = self.world_size() / count as f64;
        let (ox, oy) = self.project(LatLng::new(MAX_LATITUDE, -180.0));

        let mut tiles = Vec::new();
        for ty in 0..count {
            let sy = oy + ty as f64 * size;
            if sy + size <= 0.0 || sy >= self.height {
                continue;
            }
            for tx in 0..count {
                let sx = ox + tx as f64 * size;
                if sx + size <= 0.0 || sx >= self.width {
                    continue;
                }
                tiles.push(TileRef {
                    z,
                    x: tx,
                    y: ty,
                    screen_x: sx,
                    screen_y: sy,
                    size,
                });
            }
        }
        tiles
    }
}

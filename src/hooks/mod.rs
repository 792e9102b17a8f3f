
use crate::models::{CountryCode, LatLng};
use crate::state::MapState;
use crate::viewport::Camera;
use dioxus::prelude::*;
use tracing::debug;

/// Click, dismiss and navigation actions over the shared map state.
#[derive(Clone, Copy)]
pub struct CountryMapClient {
    state: MapState,
}

impl CountryMapClient {
    /// Resolves a click on the surface at screen coordinates.
    pub fn click_screen(&self, x: f64, y: f64) {
        let point = self.state.camera.peek().unproject(x, y);
        self.click_point(point);
    }

    /// Resolves a click at a geographic point against the boundary layer.
    pub fn click_point(&self, point: LatLng) {
        let hit = self.state.boundaries.peek().code_at(point);
        debug!("Click at {:.3},{:.3} -> {:?}", point.lat, point.lng, hit);
        self.select(hit);
    }

    /// Updates the selection immediately and fetches details for a hit.
    /// Earlier requests are not cancelled; their results are dropped on arrival.
    pub fn select(&self, hit: Option<CountryCode>) {
        let mut selection = self.state.selection;
        let Some(ticket) = selection.write().click(hit) else {
            return;
        };

        let countries = self.state.countries.peek().clone();
        spawn(async move {
            let result = countries.fetch_country(&ticket.code).await;
            selection.write().resolve(&ticket, result);
        });
    }

    pub fn dismiss(&self) {
        let mut selection = self.state.selection;
        selection.write().dismiss();
    }

    pub fn zoom_in(&self) {
        self.retarget(Camera::zoom_in);
    }

    pub fn zoom_out(&self) {
        self.retarget(Camera::zoom_out);
    }

    pub fn reset_view(&self) {
        self.retarget(Camera::reset);
    }

    /// Drags the map by a screen delta, without animation.
    pub fn pan_by(&self, dx: f64, dy: f64) {
        self.jump(|cam| cam.pan_by(dx, dy));
    }

    /// Wheel zoom by `delta` levels, anchored at the cursor.
    pub fn zoom_at(&self, delta: f64, x: f64, y: f64) {
        self.jump(|cam| cam.zoom_around(cam.zoom + delta, x, y));
    }

    fn retarget(&self, f: impl FnOnce(Camera) -> Camera) {
        let mut target = self.state.target_camera;
        let next = f(*target.peek());
        target.set(next);
    }

    // Direct manipulation starts from what is on screen and cancels any
    // running animation.
    fn jump(&self, f: impl FnOnce(Camera) -> Camera) {
        let mut camera = self.state.camera;
        let mut target = self.state.target_camera;
        let next = f(*camera.peek());
        camera.set(next);
        target.set(next);
    }
}

pub fn use_country_map() -> CountryMapClient {
    let state = use_context::<MapState>();
    CountryMapClient { state }
}

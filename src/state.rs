use crate::boundaries::BoundaryLayer;
use crate::config::MapSettings;
use crate::error::AppError;
use crate::models::{CountryCode, CountryDetail};
use crate::services::CountriesHandle;
use crate::viewport::Camera;
use dioxus::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A fetch issued for a selection. Results carrying an older generation are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchTicket {
    pub code: CountryCode,
    pub generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Reverted,
    Stale,
}

/// Highlight and popup state for the map.
///
/// `detail` is only ever `Some` while `selected` is `Some` and the latest
/// fetch for that selection succeeded.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SelectionState {
    selected: Option<CountryCode>,
    detail: Option<CountryDetail>,
    generation: u64,
}

impl SelectionState {
    pub fn selected(&self) -> Option<&CountryCode> {
        self.selected.as_ref()
    }

    pub fn detail(&self) -> Option<&CountryDetail> {
        self.detail.as_ref()
    }

    /// Applies a map click. A hit selects the country and returns the fetch to
    /// issue; a miss clears everything.
    pub fn click(&mut self, hit: Option<CountryCode>) -> Option<FetchTicket> {
        self.generation += 1;
        self.detail = None;
        match hit {
            Some(code) => {
                self.selected = Some(code.clone());
                Some(FetchTicket {
                    code,
                    generation: self.generation,
                })
            }
            None => {
                self.selected = None;
                None
            }
        }
    }

    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        result: Result<CountryDetail, AppError>,
    ) -> Resolution {
        if ticket.generation != self.generation {
            debug!(
                "Dropping stale result for {} (generation {} != {})",
                ticket.code, ticket.generation, self.generation
            );
            return Resolution::Stale;
        }

        match result {
            Ok(detail) => {
                info!("Loaded details for {}: {}", ticket.code, detail.name.common);
                self.detail = Some(detail);
                Resolution::Applied
            }
            Err(e) => {
                warn!("Country lookup for {} failed ({}): {}", ticket.code, e.kind(), e);
                self.selected = None;
                self.detail = None;
                Resolution::Reverted
            }
        }
    }

    /// Closes the popup. The highlight stays.
    pub fn dismiss(&mut self) {
        self.detail = None;
    }
}

/// Shared map state, provided once at the root of the tree.
#[derive(Clone, Copy)]
pub struct MapState {
    pub selection: Signal<SelectionState>,
    pub camera: Signal<Camera>,
    pub target_camera: Signal<Camera>,
    pub boundaries: Signal<Arc<BoundaryLayer>>,
    pub map_settings: Signal<MapSettings>,
    pub countries: Signal<CountriesHandle>,
}

#[component]
pub fn MapStateProvider(
    map_settings: MapSettings,
    boundaries: Arc<BoundaryLayer>,
    countries: CountriesHandle,
    children: Element,
) -> Element {
    let initial = Camera::initial(map_settings.width as f64, map_settings.height as f64);
    let selection = use_signal(SelectionState::default);
    let camera = use_signal(|| initial);
    let target_camera = use_signal(|| initial);
    let boundaries = use_signal(|| boundaries);
    let map_settings = use_signal(|| map_settings);
    let countries = use_signal(|| countries);

    use_context_provider(|| MapState {
        selection,
        camera,
        target_camera,
        boundaries,
        map_settings,
        countries,
    });

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountryName, LatLng};
    use reqwest::StatusCode;

    fn code(s: &str) -> CountryCode {
        s.parse().unwrap()
    }

    fn detail(name: &str, lat: f64, lng: f64) -> CountryDetail {
        CountryDetail {
            name: CountryName {
                common: name.to_string(),
                official: String::new(),
            },
            capital: vec![],
            area: 0.0,
            population: 0,
            currencies: Default::default(),
            languages: Default::default(),
            idd: Default::default(),
            car: Default::default(),
            tld: vec![],
            flags: Default::default(),
            latlng: LatLng::new(lat, lng),
        }
    }

    fn server_error() -> AppError {
        AppError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_hit_selects_immediately() {
        let mut state = SelectionState::default();
        assert!(state.selected().is_none());

        let ticket = state.click(Some(code("FR"))).unwrap();
        assert_eq!(ticket.code, code("FR"));
        assert_eq!(state.selected(), Some(&code("FR")));
        assert_eq!(ticket.generation, 1);
        assert!(state.detail().is_none());
    }

    #[test]
    fn test_success_sets_detail_and_keeps_selection() {
        let mut state = SelectionState::default();
        let ticket = state.click(Some(code("FR"))).unwrap();

        let res = state.resolve(&ticket, Ok(detail("France", 46.0, 2.0)));
        assert_eq!(res, Resolution::Applied);
        assert_eq!(state.selected(), Some(&code("FR")));
        assert_eq!(state.detail().unwrap().latlng, LatLng::new(46.0, 2.0));
    }

    #[test]
    fn test_failure_reverts_to_idle() {
        let mut state = SelectionState::default();
        let ticket = state.click(Some(code("FR"))).unwrap();

        let res = state.resolve(&ticket, Err(server_error()));
        assert_eq!(res, Resolution::Reverted);
        assert!(state.selected().is_none());
        assert!(state.detail().is_none());
    }

    #[test]
    fn test_miss_clears_both_cells() {
        let mut state = SelectionState::default();
        let ticket = state.click(Some(code("FR"))).unwrap();
        state.resolve(&ticket, Ok(detail("France", 46.0, 2.0)));

        assert!(state.click(None).is_none());
        assert!(state.selected().is_none());
        assert!(state.detail().is_none());
    }

    #[test]
    fn test_dismiss_keeps_highlight() {
        let mut state = SelectionState::default();
        let ticket = state.click(Some(code("FR"))).unwrap();
        state.resolve(&ticket, Ok(detail("France", 46.0, 2.0)));

        state.dismiss();
        assert!(state.detail().is_none());
        assert_eq!(state.selected(), Some(&code("FR")));
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut state = SelectionState::default();
        let first = state.click(Some(code("FR"))).unwrap();
        let second = state.click(Some(code("DE"))).unwrap();

        // the older request finishes last in either order
        assert_eq!(
            state.resolve(&second, Ok(detail("Germany", 51.0, 9.0))),
            Resolution::Applied
        );
        assert_eq!(
            state.resolve(&first, Ok(detail("France", 46.0, 2.0))),
            Resolution::Stale
        );
        assert_eq!(state.detail().unwrap().name.common, "Germany");

        assert_eq!(state.resolve(&first, Err(server_error())), Resolution::Stale);
        assert_eq!(state.selected(), Some(&code("DE")));
    }

    #[test]
    fn test_late_result_after_miss_is_ignored() {
        let mut state = SelectionState::default();
        let ticket = state.click(Some(code("FR"))).unwrap();
        state.click(None);

        assert_eq!(
            state.resolve(&ticket, Ok(detail("France", 46.0, 2.0))),
            Resolution::Stale
        );
        assert!(state.detail().is_none());
    }
}

#![allow(non_snake_case)]

pub mod boundaries;
pub mod components;
pub mod config;
pub mod error;
pub mod hooks;
pub mod icons;
pub mod models;
pub mod services;
pub mod state;
pub mod style;
pub mod viewport;

use dioxus::prelude::*;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::boundaries::BoundaryLayer;
use crate::components::WorldMap;
use crate::config::{MapSettings, Settings};
use crate::error::AppResult;
use crate::services::{CountriesHandle, RestCountriesService};
use crate::state::MapStateProvider;

/// Everything the UI needs that is loaded before launch.
#[derive(Clone)]
pub struct AtlasResources {
    pub settings: Settings,
    pub boundaries: Arc<BoundaryLayer>,
    pub countries: CountriesHandle,
}

pub fn App() -> Element {
    let resources = use_context::<AtlasResources>();

    rsx! {
        document::Stylesheet { href: asset!("/assets/main.css") }
        MapStateProvider {
            map_settings: resources.settings.map.clone(),
            boundaries: resources.boundaries.clone(),
            countries: resources.countries.clone(),
            WorldMap {}
        }
    }
}

pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn load_boundaries(map: &MapSettings) -> AppResult<BoundaryLayer> {
    match &map.boundaries_path {
        Some(path) => {
            info!("Loading boundary dataset from {:?}", path);
            BoundaryLayer::load(path)
        }
        None => BoundaryLayer::bundled(),
    }
}

pub fn run_app() -> AppResult<()> {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing("info");
            return Err(e.into());
        }
    };
    init_tracing(&settings.log_level);

    let boundaries = load_boundaries(&settings.map)?;
    info!(
        "Loaded {} boundary features, base map {}",
        boundaries.len(),
        settings.map.redacted_style_url()
    );

    let countries = CountriesHandle::new(RestCountriesService::new(&settings.countries)?);
    info!("Countries API at {}", settings.countries.base_url);

    launch_with(AtlasResources {
        settings,
        boundaries: Arc::new(boundaries),
        countries,
    });
    Ok(())
}

#[cfg(feature = "desktop")]
fn launch_with(resources: AtlasResources) {
    use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

    let map = &resources.settings.map;
    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Country Atlas")
                .with_inner_size(LogicalSize::new(map.width as f64, map.height as f64))
                .with_resizable(false),
        )
        .with_menu(None)
        .with_resource_directory(".");

    LaunchBuilder::new()
        .with_cfg(config)
        .with_context(resources)
        .launch(App);
}

#[cfg(not(feature = "desktop"))]
fn launch_with(resources: AtlasResources) {
    LaunchBuilder::new().with_context(resources).launch(App);
}

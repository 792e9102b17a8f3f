use crate::hooks::use_country_map;
use crate::icons::{Globe, Minus, Plus};
use dioxus::prelude::*;

#[component]
pub fn NavigationControl() -> Element {
    let client = use_country_map();

    rsx! {
        div { class: "atlas-nav",
            button { title: "Zoom in", onclick: move |_| client.zoom_in(), Plus { size: 16 } }
            button { title: "Zoom out", onclick: move |_| client.zoom_out(), Minus { size: 16 } }
            button { title: "Reset view", onclick: move |_| client.reset_view(), Globe { size: 16 } }
        }
    }
}

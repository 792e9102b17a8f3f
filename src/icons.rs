use dioxus::prelude::*;

#[component]
fn IconBase(
    size: u32,
    #[props(default)] class: Option<String>,
    #[props(default = 2)] stroke_width: u32,
    children: Element,
) -> Element {
    let class = class.unwrap_or_default();
    rsx! {
        svg {
            width: "{size}",
            height: "{size}",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "{stroke_width}",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            class,
            {children}
        }
    }
}

#[component]
pub fn Globe(size: u32, #[props(default)] class: Option<String>) -> Element {
    rsx! {
        IconBase { size, class,
            circle { cx: "12", cy: "12", r: "10" }
            path { d: "M12 2a15.3 15.3 0 0 1 4 10 15.3 15.3 0 0 1-4 10 15.3 15.3 0 0 1-4-10 15.3 15.3 0 0 1 4-10z" }
            path { d: "M2 12h20" }
        }
    }
}

#[component]
pub fn X(size: u32, #[props(default)] class: Option<String>) -> Element {
    rsx! {
        IconBase { size, class,
            path { d: "M18 6 6 18" }
            path { d: "M6 6l12 12" }
        }
    }
}

#[component]
pub fn Plus(size: u32, #[props(default)] class: Option<String>) -> Element {
    rsx! {
        IconBase { size, class,
            path { d: "M5 12h14" }
            path { d: "M12 5v14" }
        }
    }
}

#[component]
pub fn Minus(size: u32, #[props(default)] class: Option<String>) -> Element {
    rsx! {
        IconBase { size, class,
            path { d: "M5 12h14" }
        }
    }
}

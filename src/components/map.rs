use crate::components::{CountryPopup, NavigationControl};
use crate::hooks::use_country_map;
use crate::state::MapState;
use crate::style::{BorderLayerStyle, FillLayerStyle};
use dioxus::html::geometry::WheelDelta;
use dioxus::prelude::*;

const ANIMATION_SPEED: f64 = 0.2;
const MAX_ANIMATION_STEPS: u32 = 120;
/// Pointer travel in pixels after which a press counts as a drag, not a click.
const DRAG_THRESHOLD: f64 = 4.0;
/// Wheel travel in pixels for one zoom level.
const WHEEL_PIXELS_PER_ZOOM: f64 = 400.0;
const WHEEL_LINE_PIXELS: f64 = 40.0;

fn wheel_zoom_delta(delta: WheelDelta) -> f64 {
    let dy = match delta {
        WheelDelta::Pixels(v) => v.y,
        WheelDelta::Lines(v) => v.y * WHEEL_LINE_PIXELS,
        WheelDelta::Pages(v) => v.y * WHEEL_PIXELS_PER_ZOOM,
    };
    (-dy / WHEEL_PIXELS_PER_ZOOM).clamp(-1.0, 1.0)
}

#[component]
pub fn WorldMap() -> Element {
    let state = use_context::<MapState>();
    let client = use_country_map();
    let mut camera = state.camera;
    let target_camera = state.target_camera;
    let mut drag_origin = use_signal(|| None::<(f64, f64)>);
    let mut drag_travel = use_signal(|| 0.0f64);

    use_effect(move || {
        let target = target_camera();
        spawn(async move {
            let mut steps = 0;
            loop {
                // a newer target has its own animation
                if *target_camera.peek() != target {
                    break;
                }
                let current = *camera.peek();
                let next = current.ease_toward(target, ANIMATION_SPEED);
                if next.is_close_to(&target) {
                    camera.set(target);
                    break;
                }
                camera.set(next);
                tokio::time::sleep(std::time::Duration::from_millis(16)).await;

                steps += 1;
                if steps > MAX_ANIMATION_STEPS {
                    camera.set(target);
                    break;
                }
            }
        });
    });

    let cam = camera();
    let settings = state.map_settings.read();
    let boundaries = state.boundaries.read();
    let selection = state.selection.read();

    let fill = FillLayerStyle::for_selection(selection.selected());
    let border = BorderLayerStyle;
    let width = cam.width;
    let height = cam.height;
    let opacity = fill.opacity();
    let stroke_width = border.width();

    let tiles: Vec<(String, String, f64, f64, f64)> = cam
        .visible_tiles()
        .into_iter()
        .map(|t| {
            (
                format!("{}/{}/{}", t.z, t.x, t.y),
                settings.tile_url(t.z, t.x, t.y),
                t.screen_x,
                t.screen_y,
                t.size,
            )
        })
        .collect();

    let shapes: Vec<(usize, String, &'static str)> = boundaries
        .features()
        .iter()
        .enumerate()
        .map(|(i, f)| (i, f.svg_path(&cam), fill.evaluate(&f.properties)))
        .collect();

    let popup = selection.detail().cloned().map(|detail| {
        let (x, y) = cam.project(detail.latlng);
        (detail, x, y)
    });

    let map_class = if drag_origin().is_some() {
        "atlas-map dragging"
    } else {
        "atlas-map"
    };

    rsx! {
        div {
            class: map_class,
            style: "width: {width}px; height: {height}px;",
            svg {
                width: "{width}",
                height: "{height}",
                view_box: "0 0 {width} {height}",
                onmousedown: move |evt| {
                    let p = evt.client_coordinates();
                    drag_origin.set(Some((p.x, p.y)));
                    drag_travel.set(0.0);
                },
                onmousemove: move |evt| {
                    let Some((x0, y0)) = *drag_origin.peek() else {
                        return;
                    };
                    let p = evt.client_coordinates();
                    let (dx, dy) = (p.x - x0, p.y - y0);
                    drag_origin.set(Some((p.x, p.y)));
                    *drag_travel.write() += dx.hypot(dy);
                    client.pan_by(dx, dy);
                },
                onmouseup: move |_| drag_origin.set(None),
                onmouseleave: move |_| drag_origin.set(None),
                onwheel: move |evt| {
                    evt.prevent_default();
                    let dz = wheel_zoom_delta(evt.delta());
                    if dz != 0.0 {
                        let p = evt.element_coordinates();
                        client.zoom_at(dz, p.x, p.y);
                    }
                },
                onclick: move |evt| {
                    // the press was a drag
                    if *drag_travel.peek() > DRAG_THRESHOLD {
                        return;
                    }
                    let p = evt.element_coordinates();
                    client.click_screen(p.x, p.y);
                },
                rect { width: "100%", height: "100%", class: "atlas-ocean" }
                g { class: "atlas-basemap", pointer_events: "none",
                    for (key, href, x, y, size) in tiles {
                        image {
                            key: "{key}",
                            href: "{href}",
                            x: "{x:.1}",
                            y: "{y:.1}",
                            width: "{size:.1}",
                            height: "{size:.1}",
                        }
                    }
                }
                g { id: fill.id(), pointer_events: "none",
                    for (i, d, color) in shapes.iter().cloned() {
                        path {
                            key: "fill-{i}",
                            d: "{d}",
                            fill: color,
                            fill_opacity: "{opacity}",
                            fill_rule: "evenodd",
                        }
                    }
                }
                g { id: border.id(), pointer_events: "none",
                    for (i, d, _) in shapes.iter().cloned() {
                        path {
                            key: "border-{i}",
                            d: "{d}",
                            fill: "none",
                            stroke: border.color(),
                            stroke_width: "{stroke_width}",
                        }
                    }
                }
            }
            NavigationControl {}
            if let Some((detail, x, y)) = popup {
                CountryPopup { detail, x, y }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::html::geometry::euclid::Vector3D;

    #[test]
    fn test_wheel_down_zooms_out() {
        let dz = wheel_zoom_delta(WheelDelta::Pixels(Vector3D::new(0.0, 100.0, 0.0)));
        assert!((dz + 0.25).abs() < 1e-9);
        let dz = wheel_zoom_delta(WheelDelta::Lines(Vector3D::new(0.0, -3.0, 0.0)));
        assert!((dz - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_step_is_capped() {
        let dz = wheel_zoom_delta(WheelDelta::Pages(Vector3D::new(0.0, -5.0, 0.0)));
        assert_eq!(dz, 1.0);
    }
}

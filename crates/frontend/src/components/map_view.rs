use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use quake_shared::config::MapConfig;
use quake_shared::controller::MapViewController;
use quake_shared::geo;
use quake_shared::markers::{MarkerId, MarkerSet};
use quake_shared::viewport::{DragPan, Viewport};

use crate::coords;

pub const MAP_CONTAINER_ID: &str = "map";

/// Drag threshold in pixels — movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold — larger than mouse because touch is less precise.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

/// Finger spread ratio that triggers one pinch zoom step.
const PINCH_STEP_RATIO: f64 = 1.6;

/// Accumulated wheel distance that triggers one zoom step.
const WHEEL_ZOOM_THRESHOLD: f64 = 100.0;

/// Container size used until the element has been laid out.
const REFERENCE_WIDTH: f64 = 960.0;
const REFERENCE_HEIGHT: f64 = 600.0;

// Pin geometry, relative to the tip at the marker's coordinate.
const PIN_HEAD_OFFSET: f64 = 22.0;
const PIN_HEAD_RADIUS: f64 = 9.0;
const PIN_HIT_RADIUS: f64 = 12.0;
const POPUP_OFFSET: f64 = 34.0;

/// Markers this far outside the container are not drawn.
const OFFSCREEN_MARGIN: f64 = 40.0;

const PIN_FILL: &str = "#2a81cb";
const PIN_FILL_ACTIVE: &str = "#d9480f";

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Container position of every marker's tip.
fn marker_anchors(
    markers: &MarkerSet,
    view: &Viewport,
    width: f64,
    height: f64,
) -> Vec<(MarkerId, (f64, f64))> {
    markers
        .iter()
        .map(|m| (m.id, view.to_container(m.position(), width, height)))
        .collect()
}

fn on_screen(p: (f64, f64), width: f64, height: f64) -> bool {
    p.0 >= -OFFSCREEN_MARGIN
        && p.0 <= width + OFFSCREEN_MARGIN
        && p.1 >= -OFFSCREEN_MARGIN
        && p.1 <= height + OFFSCREEN_MARGIN
}

/// Marker whose pin head is closest to `click`, within the hit radius.
/// Later markers are drawn on top, so they win ties.
fn find_marker_at(anchors: &[(MarkerId, (f64, f64))], click: (f64, f64)) -> Option<MarkerId> {
    let mut best = None;
    let mut best_dist = PIN_HIT_RADIUS;
    for &(id, (x, y)) in anchors {
        let d = coords::distance((x, y - PIN_HEAD_OFFSET), click);
        if d <= best_dist {
            best_dist = d;
            best = Some(id);
        }
    }
    best
}

/// Build the marker overlay as SVG markup in container pixel space.
fn build_marker_svg(
    anchors: &[(MarkerId, (f64, f64))],
    open: Option<MarkerId>,
    width: f64,
    height: f64,
) -> String {
    let mut svg = String::with_capacity(256 * anchors.len() + 256);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" style="position:absolute;top:0;left:0;width:100%;height:100%;pointer-events:none;z-index:5;">"#
    ));
    for &(id, (x, y)) in anchors {
        if !on_screen((x, y), width, height) {
            continue;
        }
        let fill = if open == Some(id) {
            PIN_FILL_ACTIVE
        } else {
            PIN_FILL
        };
        let hy = y - PIN_HEAD_OFFSET;
        let r = PIN_HEAD_RADIUS;
        svg.push_str(&format!(
            r##"<g class="quake-marker"><polygon points="{},{} {},{} {x},{y}" fill="{fill}" stroke="white" stroke-width="1.5"/><circle cx="{x}" cy="{hy}" r="{r}" fill="{fill}" stroke="white" stroke-width="2"/><circle cx="{x}" cy="{hy}" r="3" fill="white"/></g>"##,
            x - 6.0,
            hy + 6.0,
            x + 6.0,
            hy + 6.0,
        ));
    }
    svg.push_str("</svg>");
    svg
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Zoom step for accumulated wheel travel, if it crossed the threshold.
fn wheel_zoom_step(accumulated: f64) -> Option<i8> {
    if accumulated <= -WHEEL_ZOOM_THRESHOLD {
        Some(1)
    } else if accumulated >= WHEEL_ZOOM_THRESHOLD {
        Some(-1)
    } else {
        None
    }
}

/// Zoom step for a pinch that went from `start` to `now` finger distance.
fn pinch_zoom_step(start: f64, now: f64) -> Option<i8> {
    if start < 1.0 {
        return None;
    }
    let ratio = now / start;
    if ratio >= PINCH_STEP_RATIO {
        Some(1)
    } else if ratio <= 1.0 / PINCH_STEP_RATIO {
        Some(-1)
    } else {
        None
    }
}

fn step_zoom(zoom: u8, step: i8) -> u8 {
    if step >= 0 {
        zoom.saturating_add(step as u8)
    } else {
        zoom.saturating_sub(step.unsigned_abs())
    }
}

// ---------------------------------------------------------------------------
// Shared pointer logic (used by both mouse and touch handlers)
// ---------------------------------------------------------------------------

/// Feed a pointer position into the active drag and pan by the step since
/// the last one.
fn drag_to(
    drag: &mut Signal<Option<DragPan>>,
    controller: &mut Signal<MapViewController>,
    client: (f64, f64),
) {
    if drag.peek().is_none() {
        return;
    }
    let step = drag.write().as_mut().and_then(|d| d.update(client));
    if let Some((dx, dy)) = step {
        controller.write().viewport_mut().pan_by(dx, dy);
    }
}

/// Open the popup of the marker under `client`, or close the open one.
fn tap_at(controller: &mut Signal<MapViewController>, client: (f64, f64), size: (f64, f64)) {
    let Some(p) = coords::client_to_element(client.0, client.1, MAP_CONTAINER_ID) else {
        return;
    };
    let hit = {
        let ctrl = controller.read();
        let anchors = marker_anchors(ctrl.markers(), ctrl.viewport(), size.0, size.1);
        find_marker_at(&anchors, p)
    };
    match hit {
        Some(id) => controller.write().open_popup(id),
        None => controller.write().close_popup(),
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
struct TileView {
    key: String,
    url: String,
    left: f64,
    top: f64,
}

#[component]
pub fn MapView(controller: Signal<MapViewController>, config: MapConfig) -> Element {
    let mut size = use_signal(|| (REFERENCE_WIDTH, REFERENCE_HEIGHT));

    let mut measure = move || {
        if let Some(s) = coords::element_size(MAP_CONTAINER_ID) {
            if *size.peek() != s {
                size.set(s);
            }
        }
    };

    // Pointer state
    let mut drag = use_signal(|| None::<DragPan>);
    let mut touch = use_signal(|| None::<DragPan>);
    let mut pinch_distance = use_signal(|| None::<f64>);
    let mut wheel_accum = use_signal(|| 0.0_f64);

    // Markers only change with the controller or the container size.
    let svg_html = use_memo(move || {
        let ctrl = controller.read();
        let (w, h) = *size.read();
        let anchors = marker_anchors(ctrl.markers(), ctrl.viewport(), w, h);
        build_marker_svg(&anchors, ctrl.open_popup_id(), w, h)
    });

    let (w, h) = *size.read();
    let (tiles, popup, zoom, max_zoom) = {
        let ctrl = controller.read();
        let view = ctrl.viewport();
        let origin = view.pixel_origin(w, h);
        let tiles: Vec<TileView> = geo::visible_tiles(origin, view.zoom(), w, h)
            .into_iter()
            .map(|t| TileView {
                key: format!("{}/{}/{}", t.coord.z, t.column, t.coord.y),
                url: geo::tile_url(&config.tile_url, &config.tile_subdomains, t.coord),
                left: t.left,
                top: t.top,
            })
            .collect();
        let popup = ctrl.open_popup_id().and_then(|id| {
            let marker = ctrl.markers().get(id)?;
            let (x, y) = view.to_container(marker.position(), w, h);
            Some((marker.event.popup(), x, y - POPUP_OFFSET))
        });
        (tiles, popup, view.zoom(), view.max_zoom())
    };

    let container_class = if drag.read().is_some_and(|d| !d.is_tap()) {
        "map-container dragging"
    } else {
        "map-container"
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onmounted: move |_| measure(),
            onresize: move |_| measure(),

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let total = *wheel_accum.read() + wheel_delta_y(evt.data().delta());
                let Some(step) = wheel_zoom_step(total) else {
                    wheel_accum.set(total);
                    return;
                };
                wheel_accum.set(0.0);

                let client = evt.data().client_coordinates();
                let Some(anchor) = coords::client_to_element(client.x, client.y, MAP_CONTAINER_ID) else {
                    return;
                };
                let (w, h) = *size.read();
                let mut ctrl = controller.write();
                let new_zoom = step_zoom(ctrl.viewport().zoom(), step);
                ctrl.viewport_mut().zoom_around(new_zoom, anchor, w, h);
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                drag.set(Some(DragPan::new((client.x, client.y), DRAG_THRESHOLD)));
            },

            onmousemove: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                drag_to(&mut drag, &mut controller, (client.x, client.y));
            },

            onmouseup: move |evt: Event<MouseData>| {
                let released = *drag.peek();
                drag.set(None);
                if released.is_some_and(|d| d.is_tap()) {
                    let client = evt.client_coordinates();
                    tap_at(&mut controller, (client.x, client.y), *size.read());
                }
            },

            onmouseleave: move |_| drag.set(None),

            // --- Touch event handlers ---

            ontouchstart: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if touches.len() == 1 {
                    let c = touches[0].client_coordinates();
                    touch.set(Some(DragPan::new((c.x, c.y), TOUCH_DRAG_THRESHOLD)));
                    pinch_distance.set(None);
                } else if touches.len() >= 2 {
                    let c0 = touches[0].client_coordinates();
                    let c1 = touches[1].client_coordinates();
                    pinch_distance.set(Some(coords::distance((c0.x, c0.y), (c1.x, c1.y))));
                    // A second finger cancels tap tracking
                    touch.set(None);
                }
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if touches.len() >= 2 {
                    let Some(start) = *pinch_distance.peek() else {
                        return;
                    };
                    let c0 = touches[0].client_coordinates();
                    let c1 = touches[1].client_coordinates();
                    let d = coords::distance((c0.x, c0.y), (c1.x, c1.y));
                    let Some(step) = pinch_zoom_step(start, d) else {
                        return;
                    };
                    let mid = ((c0.x + c1.x) / 2.0, (c0.y + c1.y) / 2.0);
                    let Some(anchor) = coords::client_to_element(mid.0, mid.1, MAP_CONTAINER_ID) else {
                        return;
                    };
                    let (w, h) = *size.read();
                    let mut ctrl = controller.write();
                    let new_zoom = step_zoom(ctrl.viewport().zoom(), step);
                    ctrl.viewport_mut().zoom_around(new_zoom, anchor, w, h);
                    pinch_distance.set(Some(d));
                } else if touches.len() == 1 {
                    let c = touches[0].client_coordinates();
                    drag_to(&mut touch, &mut controller, (c.x, c.y));
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let remaining = evt.data().touches().len();

                if pinch_distance.peek().is_some() {
                    // Wait for all fingers to lift before resetting pinch state
                    if remaining == 0 {
                        pinch_distance.set(None);
                    }
                    return;
                }

                if remaining == 0 {
                    let released = *touch.peek();
                    touch.set(None);
                    if let Some(d) = released.filter(|d| d.is_tap()) {
                        tap_at(&mut controller, d.start(), *size.read());
                    }
                }
            },

            ontouchcancel: move |_evt: Event<TouchData>| {
                touch.set(None);
                pinch_distance.set(None);
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                let Some(anchor) = coords::client_to_element(client.x, client.y, MAP_CONTAINER_ID) else {
                    return;
                };
                let (w, h) = *size.read();
                let mut ctrl = controller.write();
                let new_zoom = step_zoom(ctrl.viewport().zoom(), 1);
                ctrl.viewport_mut().zoom_around(new_zoom, anchor, w, h);
            },

            div { class: "tile-layer",
                for tile in tiles {
                    img {
                        key: "{tile.key}",
                        class: "map-tile",
                        src: "{tile.url}",
                        alt: "",
                        draggable: "false",
                        style: "left: {tile.left}px; top: {tile.top}px;",
                    }
                }
            }

            div { dangerous_inner_html: "{svg_html}" }

            if let Some((content, x, y)) = popup {
                div {
                    class: "marker-popup",
                    style: "left: {x}px; top: {y}px;",
                    onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                    onmouseup: move |evt: Event<MouseData>| evt.stop_propagation(),
                    ondoubleclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                    ontouchstart: move |evt: Event<TouchData>| evt.stop_propagation(),
                    ontouchend: move |evt: Event<TouchData>| evt.stop_propagation(),
                    button {
                        class: "popup-close",
                        "aria-label": "Close popup",
                        onclick: move |_| controller.write().close_popup(),
                        "×"
                    }
                    b { "{content.title}" }
                    for line in content.lines.iter() {
                        div { "{line}" }
                    }
                }
            }

            div {
                class: "zoom-control",
                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                onmouseup: move |evt: Event<MouseData>| evt.stop_propagation(),
                ondoubleclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                ontouchstart: move |evt: Event<TouchData>| evt.stop_propagation(),
                ontouchend: move |evt: Event<TouchData>| evt.stop_propagation(),
                button {
                    "aria-label": "Zoom in",
                    disabled: zoom >= max_zoom,
                    onclick: move |_| controller.write().viewport_mut().zoom_in(),
                    "+"
                }
                button {
                    "aria-label": "Zoom out",
                    disabled: zoom == geo::MIN_ZOOM,
                    onclick: move |_| controller.write().viewport_mut().zoom_out(),
                    "−"
                }
            }

            div {
                class: "attribution",
                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                onmouseup: move |evt: Event<MouseData>| evt.stop_propagation(),
                ontouchstart: move |evt: Event<TouchData>| evt.stop_propagation(),
                ontouchend: move |evt: Event<TouchData>| evt.stop_propagation(),
                "© "
                a {
                    href: "{config.attribution_url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "{config.attribution_label}"
                }
                " contributors"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_shared::models::{EarthquakeEvent, LatLng};

    fn event(lat: f64, lng: f64) -> EarthquakeEvent {
        EarthquakeEvent {
            latitude: lat,
            longitude: lng,
            place: "somewhere".to_string(),
            magnitude: 4.8,
            depth_km: 33.0,
            date: "2025-05-05 05:05:05".to_string(),
        }
    }

    fn anchors_at(points: &[(f64, f64)]) -> Vec<(MarkerId, (f64, f64))> {
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| (MarkerId(i as u64), p))
            .collect()
    }

    #[test]
    fn test_marker_anchors_center_event() {
        let mut set = MarkerSet::new();
        set.replace_all(1, vec![event(0.0, 0.0)]);
        let view = Viewport::new(LatLng::new(0.0, 0.0), 2, 18);
        let anchors = marker_anchors(&set, &view, 800.0, 600.0);
        assert_eq!(anchors.len(), 1);
        let (_, (x, y)) = anchors[0];
        assert!((x - 400.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_marker_at_pin_head() {
        let anchors = anchors_at(&[(100.0, 100.0)]);
        let hit = find_marker_at(&anchors, (100.0, 100.0 - PIN_HEAD_OFFSET));
        assert_eq!(hit, Some(MarkerId(0)));
    }

    #[test]
    fn test_find_marker_at_miss() {
        let anchors = anchors_at(&[(100.0, 100.0)]);
        assert!(find_marker_at(&anchors, (200.0, 200.0)).is_none());
    }

    #[test]
    fn test_find_marker_at_prefers_topmost_on_tie() {
        let anchors = anchors_at(&[(50.0, 50.0), (50.0, 50.0)]);
        let hit = find_marker_at(&anchors, (50.0, 50.0 - PIN_HEAD_OFFSET));
        assert_eq!(hit, Some(MarkerId(1)));
    }

    #[test]
    fn test_find_marker_at_picks_closest() {
        let anchors = anchors_at(&[(50.0, 50.0), (58.0, 50.0)]);
        let hit = find_marker_at(&anchors, (57.0, 50.0 - PIN_HEAD_OFFSET));
        assert_eq!(hit, Some(MarkerId(1)));
    }

    #[test]
    fn test_svg_one_group_per_visible_marker() {
        let anchors = anchors_at(&[(10.0, 40.0), (300.0, 200.0), (5000.0, 200.0)]);
        let svg = build_marker_svg(&anchors, None, 800.0, 600.0);
        assert_eq!(svg.matches(r#"class="quake-marker""#).count(), 2);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_svg_highlights_open_marker() {
        let anchors = anchors_at(&[(10.0, 40.0), (300.0, 200.0)]);
        let svg = build_marker_svg(&anchors, Some(MarkerId(1)), 800.0, 600.0);
        assert_eq!(svg.matches(PIN_FILL_ACTIVE).count(), 2);
    }

    #[test]
    fn test_svg_empty() {
        let svg = build_marker_svg(&[], None, 800.0, 600.0);
        assert!(!svg.contains("quake-marker"));
    }

    #[test]
    fn test_wheel_zoom_step() {
        assert_eq!(wheel_zoom_step(-120.0), Some(1));
        assert_eq!(wheel_zoom_step(120.0), Some(-1));
        assert_eq!(wheel_zoom_step(30.0), None);
    }

    #[test]
    fn test_pinch_zoom_step() {
        assert_eq!(pinch_zoom_step(100.0, 170.0), Some(1));
        assert_eq!(pinch_zoom_step(100.0, 60.0), Some(-1));
        assert_eq!(pinch_zoom_step(100.0, 120.0), None);
        assert_eq!(pinch_zoom_step(0.0, 50.0), None);
    }

    #[test]
    fn test_step_zoom_saturates() {
        assert_eq!(step_zoom(0, -1), 0);
        assert_eq!(step_zoom(3, 1), 4);
        assert_eq!(step_zoom(255, 1), 255);
    }
}

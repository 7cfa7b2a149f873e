//! Leaflet scripts run inside the webview.
//!
//! The bootstrap script creates the map and both markers once Leaflet and the
//! container element exist, then reports every candidate drag-end back over
//! the eval channel. Commands issued before that are queued and replayed.

use crate::domain::entities::geo::LatLng;
use crate::usecase::ports::map::MarkerRole;

pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
pub const MAP_ELEMENT_ID: &str = "store-map";

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: LatLng::new(-28.0, 25.0),
            zoom: 10,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
        }
    }
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn js_point(position: LatLng) -> String {
    format!("[{}, {}]", position.lat, position.lng)
}

pub fn bootstrap_script(settings: &MapSettings) -> String {
    let element_id = js_string(MAP_ELEMENT_ID);
    let center = js_point(settings.center);
    let zoom = settings.zoom;
    let tile_url = js_string(&settings.tile_url);
    let attribution = js_string(&settings.attribution);

    format!(
        r#"
const queue = window.__storeMapQueue = window.__storeMapQueue || [];
const dot = (color) => L.divIcon({{
    className: "",
    iconSize: [20, 20],
    html: `<div style="width:20px;height:20px;border-radius:50%;background:${{color}};opacity:0.9"></div>`,
}});
const boot = () => {{
    const element = document.getElementById({element_id});
    if (!window.L || !element) {{
        setTimeout(boot, 200);
        return;
    }}
    if (!window.__storeMap) {{
        const map = L.map(element).setView({center}, {zoom});
        L.tileLayer({tile_url}, {{ maxZoom: 19, attribution: {attribution} }}).addTo(map);
        window.__storeMap = {{
            map,
            anchor: L.marker({center}, {{ icon: dot("red"), draggable: false, title: "Original Location (Unmovable)" }}),
            candidate: L.marker({center}, {{ icon: dot("green"), draggable: true, title: "Drag to New Location" }}),
        }};
    }}
    window.__storeMap.candidate.off("dragend");
    window.__storeMap.candidate.on("dragend", (event) => {{
        const position = event.target.getLatLng();
        dioxus.send({{ lat: position.lat, lng: position.lng }});
    }});
    window.__storeMapRun = (command) => command(window.__storeMap);
    while (queue.length) {{
        queue.shift()(window.__storeMap);
    }}
}};
boot();
await new Promise(() => {{}});
"#
    )
}

fn command_script(body: &str) -> String {
    format!(
        "(window.__storeMapRun || ((command) => (window.__storeMapQueue = window.__storeMapQueue || []).push(command)))((m) => {{ {body} }});"
    )
}

pub fn show_marker_script(marker: MarkerRole, position: LatLng) -> String {
    command_script(&format!(
        "m.{}.setLatLng({}).addTo(m.map);",
        marker.key(),
        js_point(position)
    ))
}

pub fn hide_marker_script(marker: MarkerRole) -> String {
    command_script(&format!("m.{}.remove();", marker.key()))
}

pub fn set_view_script(position: LatLng, zoom: u8) -> String {
    command_script(&format!("m.map.setView({}, {zoom});", js_point(position)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_go_through_the_replay_queue() {
        let script = show_marker_script(MarkerRole::Candidate, LatLng::new(-26.2, 28.1));

        assert!(script.starts_with("(window.__storeMapRun ||"));
        assert!(script.contains("m.candidate.setLatLng([-26.2, 28.1]).addTo(m.map);"));
    }

    #[test]
    fn hide_and_view_commands_target_expected_objects() {
        assert!(hide_marker_script(MarkerRole::Anchor).contains("m.anchor.remove();"));
        let view = set_view_script(LatLng::new(1.5, -2.0), 15);
        assert!(view.contains("m.map.setView([1.5, -2], 15);"));
        assert!(!view.contains("panTo") && !view.contains("setZoom"));
    }

    #[test]
    fn bootstrap_escapes_settings_and_reports_drags() {
        let settings = MapSettings {
            tile_url: "https://tiles.example/{z}/{x}/{y}.png?note=\"quoted\"".to_string(),
            ..MapSettings::default()
        };

        let script = bootstrap_script(&settings);

        assert!(script.contains(r#"L.tileLayer("https://tiles.example/{z}/{x}/{y}.png?note=\"quoted\"""#));
        assert!(script.contains("setView([-28, 25], 10)"));
        assert!(script.contains("dioxus.send({ lat: position.lat, lng: position.lng });"));
        assert!(script.contains(r#"document.getElementById("store-map")"#));
    }
}

use dioxus::document;
use tracing::trace;

use crate::domain::entities::geo::LatLng;
use crate::infra::map::leaflet::{hide_marker_script, set_view_script, show_marker_script};
use crate::usecase::ports::map::{MapWidget, MarkerRole};

/// Sends map commands into the webview. Fire-and-forget: results are not awaited.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebviewMap;

impl WebviewMap {
    fn run(&self, script: String) {
        trace!(%script, "map command");
        let _ = document::eval(&script);
    }
}

impl MapWidget for WebviewMap {
    fn show_marker(&mut self, marker: MarkerRole, position: LatLng) {
        self.run(show_marker_script(marker, position));
    }

    fn hide_marker(&mut self, marker: MarkerRole) {
        self.run(hide_marker_script(marker));
    }

    fn set_view(&mut self, position: LatLng, zoom: u8) {
        self.run(set_view_script(position, zoom));
    }
}

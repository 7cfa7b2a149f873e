use crate::domain::entities::geo::LatLng;

/// The two markers the review screen places on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRole {
    /// Red, fixed at the imported position.
    Anchor,
    /// Green, draggable, proposes the new position.
    Candidate,
}

impl MarkerRole {
    pub fn key(self) -> &'static str {
        match self {
            MarkerRole::Anchor => "anchor",
            MarkerRole::Candidate => "candidate",
        }
    }
}

/// Commands sent to the map widget. Map and marker creation happen when the
/// widget boots; drag-end events flow back through the UI layer.
pub trait MapWidget {
    fn show_marker(&mut self, marker: MarkerRole, position: LatLng);
    fn hide_marker(&mut self, marker: MarkerRole);
    /// Centers and zooms in one step, so a pending pan cannot leave the
    /// map on the previous view.
    fn set_view(&mut self, position: LatLng, zoom: u8);
}

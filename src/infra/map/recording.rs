use crate::domain::entities::geo::LatLng;
use crate::usecase::ports::map::{MapWidget, MarkerRole};

#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    Show(MarkerRole, LatLng),
    Hide(MarkerRole),
    View(LatLng, u8),
}

/// Keeps every command in order instead of drawing anything.
#[derive(Debug, Default)]
pub struct RecordingMap {
    pub commands: Vec<MapCommand>,
}

impl MapWidget for RecordingMap {
    fn show_marker(&mut self, marker: MarkerRole, position: LatLng) {
        self.commands.push(MapCommand::Show(marker, position));
    }

    fn hide_marker(&mut self, marker: MarkerRole) {
        self.commands.push(MapCommand::Hide(marker));
    }

    fn set_view(&mut self, position: LatLng, zoom: u8) {
        self.commands.push(MapCommand::View(position, zoom));
    }
}

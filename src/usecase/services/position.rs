use crate::domain::entities::edit::EditEntry;
use crate::domain::entities::geo::LatLng;
use crate::domain::entities::record::RowRecord;
use crate::domain::errors::WorkflowError;
use crate::usecase::ports::map::{MapWidget, MarkerRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevels {
    pub record: u8,
    pub search: u8,
}

impl Default for ZoomLevels {
    fn default() -> Self {
        Self {
            record: 12,
            search: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerState {
    /// No current store: nothing imported or the review pass is over.
    Hidden,
    Unresolvable { store_name: String },
    Idle { anchor: LatLng },
    Dirty { anchor: LatLng, candidate: LatLng },
}

/// Tracks the anchor/candidate pair for the store under the cursor and keeps
/// the map markers in step with it.
#[derive(Debug, Clone)]
pub struct PositionController {
    state: MarkerState,
    zoom: ZoomLevels,
}

impl PositionController {
    pub fn new(zoom: ZoomLevels) -> Self {
        Self {
            state: MarkerState::Hidden,
            zoom,
        }
    }

    pub fn state(&self) -> &MarkerState {
        &self.state
    }

    pub fn is_moved(&self) -> bool {
        matches!(self.state, MarkerState::Dirty { .. })
    }

    pub fn anchor(&self) -> Option<LatLng> {
        match self.state {
            MarkerState::Idle { anchor } | MarkerState::Dirty { anchor, .. } => Some(anchor),
            MarkerState::Hidden | MarkerState::Unresolvable { .. } => None,
        }
    }

    pub fn candidate(&self) -> Option<LatLng> {
        match self.state {
            MarkerState::Idle { anchor } => Some(anchor),
            MarkerState::Dirty { candidate, .. } => Some(candidate),
            MarkerState::Hidden | MarkerState::Unresolvable { .. } => None,
        }
    }

    /// Re-seeds both markers from `record`. Runs on every cursor change.
    pub fn focus(&mut self, record: Option<&RowRecord>, map: &mut dyn MapWidget) {
        let Some(record) = record else {
            self.hide(map);
            self.state = MarkerState::Hidden;
            return;
        };

        match record.coordinates() {
            Some(anchor) => {
                map.show_marker(MarkerRole::Anchor, anchor);
                map.show_marker(MarkerRole::Candidate, anchor);
                map.set_view(anchor, self.zoom.record);
                self.state = MarkerState::Idle { anchor };
            }
            None => {
                self.hide(map);
                self.state = MarkerState::Unresolvable {
                    store_name: record.store_name(),
                };
            }
        }
    }

    /// The widget already moved the marker; only the state follows.
    pub fn drag_to(&mut self, position: LatLng) -> Result<(), WorkflowError> {
        let anchor = self.require_anchor()?;
        self.state = Self::settle(anchor, position);
        Ok(())
    }

    /// Moves the map to a geocoded position and, when a store is under
    /// review, the candidate marker with it. Returns whether a candidate was set.
    pub fn relocate(&mut self, position: LatLng, map: &mut dyn MapWidget) -> bool {
        map.set_view(position, self.zoom.search);

        let Some(anchor) = self.anchor() else {
            return false;
        };
        map.show_marker(MarkerRole::Candidate, position);
        self.state = Self::settle(anchor, position);
        true
    }

    pub fn confirm(&self, record: &RowRecord) -> Result<EditEntry, WorkflowError> {
        match self.state {
            MarkerState::Dirty { anchor, candidate } => Ok(EditEntry::new(
                record.store_name(),
                record.province(),
                anchor,
                candidate,
            )),
            _ => Err(WorkflowError::NotDirty),
        }
    }

    fn require_anchor(&self) -> Result<LatLng, WorkflowError> {
        match &self.state {
            MarkerState::Idle { anchor } | MarkerState::Dirty { anchor, .. } => Ok(*anchor),
            MarkerState::Hidden => Err(WorkflowError::NoRecord),
            MarkerState::Unresolvable { store_name } => Err(WorkflowError::Unresolvable {
                store_name: store_name.clone(),
            }),
        }
    }

    fn settle(anchor: LatLng, candidate: LatLng) -> MarkerState {
        if candidate == anchor {
            MarkerState::Idle { anchor }
        } else {
            MarkerState::Dirty { anchor, candidate }
        }
    }

    fn hide(&self, map: &mut dyn MapWidget) {
        map.hide_marker(MarkerRole::Anchor);
        map.hide_marker(MarkerRole::Candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::record::{LATITUDE, LONGITUDE, PROVINCE, STORE_NAME};
    use crate::infra::map::recording::{MapCommand, RecordingMap};

    fn record(lat: &str, lng: &str) -> RowRecord {
        RowRecord::new()
            .with(STORE_NAME, "A")
            .with(PROVINCE, "P1")
            .with(LATITUDE, lat)
            .with(LONGITUDE, lng)
    }

    #[test]
    fn focus_places_both_markers_on_anchor() {
        let mut map = RecordingMap::default();
        let mut position = PositionController::new(ZoomLevels::default());
        let anchor = LatLng::new(-26.1, 28.0);

        position.focus(Some(&record("-26.1", "28.0")), &mut map);

        assert_eq!(position.state(), &MarkerState::Idle { anchor });
        assert_eq!(
            map.commands,
            vec![
                MapCommand::Show(MarkerRole::Anchor, anchor),
                MapCommand::Show(MarkerRole::Candidate, anchor),
                MapCommand::View(anchor, 12),
            ]
        );
    }

    #[test]
    fn focus_on_unresolvable_record_hides_markers() {
        let mut map = RecordingMap::default();
        let mut position = PositionController::new(ZoomLevels::default());

        position.focus(Some(&record("N/A", "28.0")), &mut map);

        assert_eq!(
            position.state(),
            &MarkerState::Unresolvable {
                store_name: "A".to_string()
            }
        );
        assert_eq!(
            map.commands,
            vec![
                MapCommand::Hide(MarkerRole::Anchor),
                MapCommand::Hide(MarkerRole::Candidate),
            ]
        );
        assert!(matches!(
            position.drag_to(LatLng::new(1.0, 1.0)),
            Err(WorkflowError::Unresolvable { .. })
        ));
    }

    #[test]
    fn drag_marks_dirty_without_map_commands() {
        let mut map = RecordingMap::default();
        let mut position = PositionController::new(ZoomLevels::default());
        position.focus(Some(&record("-26.1", "28.0")), &mut map);
        map.commands.clear();

        position
            .drag_to(LatLng::new(-26.2, 28.1))
            .expect("drag should be accepted");

        assert!(position.is_moved());
        assert_eq!(position.candidate(), Some(LatLng::new(-26.2, 28.1)));
        assert!(map.commands.is_empty(), "drag must not pan the map");
    }

    #[test]
    fn drag_back_onto_anchor_returns_to_idle() {
        let mut map = RecordingMap::default();
        let mut position = PositionController::new(ZoomLevels::default());
        position.focus(Some(&record("-26.1", "28.0")), &mut map);

        position
            .drag_to(LatLng::new(-26.2, 28.1))
            .expect("drag should be accepted");
        position
            .drag_to(LatLng::new(-26.1, 28.0))
            .expect("drag should be accepted");

        assert!(!position.is_moved());
    }

    #[test]
    fn relocate_pans_and_moves_candidate() {
        let mut map = RecordingMap::default();
        let mut position = PositionController::new(ZoomLevels::default());
        position.focus(Some(&record("-26.1", "28.0")), &mut map);
        map.commands.clear();
        let found = LatLng::new(-25.7, 28.2);

        assert!(position.relocate(found, &mut map));

        assert!(position.is_moved());
        assert_eq!(
            map.commands,
            vec![
                MapCommand::View(found, 15),
                MapCommand::Show(MarkerRole::Candidate, found),
            ]
        );
    }

    #[test]
    fn relocate_without_store_only_pans() {
        let mut map = RecordingMap::default();
        let mut position = PositionController::new(ZoomLevels::default());

        assert!(!position.relocate(LatLng::new(1.0, 2.0), &mut map));

        assert_eq!(position.state(), &MarkerState::Hidden);
        assert_eq!(map.commands.len(), 2);
    }

    #[test]
    fn confirm_requires_dirty_state() {
        let mut map = RecordingMap::default();
        let mut position = PositionController::new(ZoomLevels::default());
        let current = record("-26.1", "28.0");
        position.focus(Some(&current), &mut map);

        assert_eq!(position.confirm(&current), Err(WorkflowError::NotDirty));

        position
            .drag_to(LatLng::new(-26.2, 28.1))
            .expect("drag should be accepted");
        let entry = position.confirm(&current).expect("confirm should succeed");

        assert_eq!(entry.store_name, "A");
        assert_eq!(entry.province, "P1");
        assert_eq!(entry.old_position(), LatLng::new(-26.1, 28.0));
        assert_eq!(entry.new_position(), LatLng::new(-26.2, 28.1));
    }
}

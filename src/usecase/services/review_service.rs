use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::geo::{GeocodeHit, LatLng};
use crate::domain::entities::record::RowRecord;
use crate::domain::errors::{ExportError, GeocodeError, ImportError, WorkflowError};
use crate::usecase::ports::codec::SpreadsheetCodec;
use crate::usecase::ports::map::MapWidget;
use crate::usecase::ports::storage::KeyValueStore;
use crate::usecase::services::edit_ledger::{EditLedger, LedgerChange};
use crate::usecase::services::position::{MarkerState, PositionController, ZoomLevels};
use crate::usecase::services::record_store::RecordStore;

const READY_MESSAGE: &str = "Upload an Excel file to start.";

/// Drives one review pass: import, reposition, save or skip, export.
///
/// Every operation leaves a human-readable line in [`ReviewService::status`];
/// errors are also returned so callers can branch on them.
pub struct ReviewService {
    codec: Arc<dyn SpreadsheetCodec>,
    storage: Arc<dyn KeyValueStore>,
    records: RecordStore,
    ledger: EditLedger,
    position: PositionController,
    status: String,
}

impl ReviewService {
    pub fn new(
        codec: Arc<dyn SpreadsheetCodec>,
        storage: Arc<dyn KeyValueStore>,
        zoom: ZoomLevels,
    ) -> Self {
        Self {
            codec,
            storage,
            records: RecordStore::new(),
            ledger: EditLedger::new(),
            position: PositionController::new(zoom),
            status: READY_MESSAGE.to_string(),
        }
    }

    /// Starts with the ledger found in `storage`. A corrupt or unreadable
    /// ledger is reported and replaced by an empty one.
    pub fn restore(
        codec: Arc<dyn SpreadsheetCodec>,
        storage: Arc<dyn KeyValueStore>,
        zoom: ZoomLevels,
    ) -> Self {
        let mut service = Self::new(codec, storage, zoom);
        match EditLedger::load(service.storage.as_ref()) {
            Ok(ledger) if ledger.is_empty() => {}
            Ok(ledger) => {
                info!(entries = ledger.len(), "restored edit ledger");
                service.status = format!(
                    "Loaded {} previous updates from local storage.",
                    ledger.len()
                );
                service.ledger = ledger;
            }
            Err(err) => {
                warn!(%err, "failed to load edit ledger, starting empty");
                service.status = format!("Error loading data from local storage: {err}");
            }
        }
        service
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn report(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn ledger(&self) -> &EditLedger {
        &self.ledger
    }

    pub fn position(&self) -> &PositionController {
        &self.position
    }

    pub fn current(&self) -> Option<&RowRecord> {
        self.records.current()
    }

    pub fn can_save(&self) -> bool {
        self.current().is_some() && self.position.is_moved()
    }

    /// Skip is offered while the marker is untouched and a store is current.
    pub fn skip_visible(&self) -> bool {
        self.current().is_some() && !self.position.is_moved()
    }

    pub fn can_skip(&self) -> bool {
        self.skip_visible() && self.records.has_next()
    }

    pub fn can_export(&self) -> bool {
        !self.ledger.is_empty()
    }

    pub fn import(
        &mut self,
        bytes: &[u8],
        file_name: &str,
        map: &mut dyn MapWidget,
    ) -> Result<usize, ImportError> {
        match self.records.import(self.codec.as_ref(), bytes) {
            Ok(count) => {
                info!(file_name, count, "imported stores");
                let focus = self.focus_current(map);
                self.status = format!(
                    "Excel file \"{file_name}\" loaded successfully with {count} stores. {focus}"
                )
                .trim_end()
                .to_string();
                Ok(count)
            }
            Err(err) => {
                warn!(file_name, %err, "import rejected");
                self.status = match &err {
                    ImportError::Schema { missing } => format!(
                        "Error: Missing required columns in Excel file: {}. Please ensure your Excel has 'StoreName', 'Province', 'Latitude', and 'Longitude' columns.",
                        missing.join(", ")
                    ),
                    ImportError::Parse(_) => {
                        "Error processing Excel file. Please ensure it is a valid .xlsx file."
                            .to_string()
                    }
                };
                Err(err)
            }
        }
    }

    pub fn drag_candidate(&mut self, position: LatLng) -> Result<(), WorkflowError> {
        if let Err(err) = self.position.drag_to(position) {
            debug!(%err, "ignored marker drag");
            self.status = format!("Cannot move marker: {err}.");
            return Err(err);
        }

        self.status = if self.position.is_moved() {
            format!(
                "Green marker moved to ({}). Click Save to confirm new location.",
                position.display()
            )
        } else {
            "Green marker is back on the original location.".to_string()
        };
        Ok(())
    }

    pub fn begin_search(&mut self, query: &str) {
        self.status = format!("Searching for \"{}\"...", query.trim());
    }

    /// Applies a finished lookup. Lookups are not sequenced: the last one to
    /// finish wins.
    pub fn apply_geocode(
        &mut self,
        result: Result<GeocodeHit, GeocodeError>,
        map: &mut dyn MapWidget,
    ) -> Result<(), GeocodeError> {
        match result {
            Ok(hit) => {
                let moved = self.position.relocate(hit.position, map);
                info!(address = %hit.formatted_address, moved, "geocoded address");
                self.status = if moved {
                    format!("Location found: {}", hit.formatted_address)
                } else {
                    format!(
                        "Location found: {}. No store is under review.",
                        hit.formatted_address
                    )
                };
                Ok(())
            }
            Err(err) => {
                warn!(%err, "address search failed");
                self.status = match &err {
                    GeocodeError::EmptyQuery => "Please enter a valid address.".to_string(),
                    GeocodeError::NotFound => {
                        "Address not found. Please try a different search.".to_string()
                    }
                    other => format!("Address search failed: {other}"),
                };
                Err(err)
            }
        }
    }

    /// Confirms the candidate unless `skip`, then moves to the next store.
    /// Skipping stops at the last store; saving may move past it.
    pub fn next(&mut self, skip: bool, map: &mut dyn MapWidget) -> Result<(), WorkflowError> {
        let Some(current) = self.records.current() else {
            self.status = "No store data to save or markers not set.".to_string();
            return Err(WorkflowError::NoRecord);
        };
        let store_name = current.store_name();

        let mut message = if skip {
            if !self.records.has_next() {
                self.status = "Already at the last store.".to_string();
                return Err(WorkflowError::Exhausted);
            }
            debug!(%store_name, "skipped store");
            format!("Skipped {store_name}.")
        } else {
            let entry = match self.position.confirm(current) {
                Ok(entry) => entry,
                Err(err) => {
                    self.status = "Move the green marker before saving.".to_string();
                    return Err(err);
                }
            };
            let change = self.ledger.upsert(entry);
            debug!(%store_name, ?change, "ledger updated");
            let mut saved = format!("Saved new coordinates for {store_name}.");
            if let Some(warning) = self.ledger_changed(change) {
                saved.push(' ');
                saved.push_str(&warning);
            }
            saved
        };

        self.records.advance();
        let focus = self.focus_current(map);
        if !focus.is_empty() {
            message.push(' ');
            message.push_str(&focus);
        }
        self.status = message;
        Ok(())
    }

    pub fn save_and_next(&mut self, map: &mut dyn MapWidget) -> Result<(), WorkflowError> {
        self.next(false, map)
    }

    pub fn skip(&mut self, map: &mut dyn MapWidget) -> Result<(), WorkflowError> {
        self.next(true, map)
    }

    /// Serializes every imported row with the ledger's coordinates applied.
    pub fn export(&mut self) -> Result<Vec<u8>, ExportError> {
        let result = if self.records.is_empty() {
            Err(ExportError::EmptyImport)
        } else if self.ledger.is_empty() {
            Err(ExportError::EmptyLedger)
        } else {
            let merged = self.ledger.merge_onto(self.records.records());
            self.codec.serialize(&merged)
        };

        match &result {
            Ok(bytes) => {
                info!(bytes = bytes.len(), edits = self.ledger.len(), "built export");
                self.status = format!(
                    "Updated Excel file ready with {} changed stores.",
                    self.ledger.len()
                );
            }
            Err(err) => {
                warn!(%err, "export refused");
                self.status = match err {
                    ExportError::EmptyImport => {
                        "No original Excel data loaded to download.".to_string()
                    }
                    ExportError::EmptyLedger => {
                        "No stores have been updated yet to download.".to_string()
                    }
                    ExportError::Serialize(reason) => {
                        format!("Failed to build the updated Excel file: {reason}")
                    }
                };
            }
        }
        result
    }

    /// Persists after every ledger change. A failed write keeps the
    /// in-memory ledger and comes back as a warning for the status line.
    fn ledger_changed(&mut self, change: LedgerChange) -> Option<String> {
        match self.ledger.persist(self.storage.as_ref()) {
            Ok(()) => {
                debug!(?change, entries = self.ledger.len(), "ledger persisted");
                None
            }
            Err(err) => {
                warn!(%err, "failed to persist edit ledger");
                Some(format!("Error saving data to local storage: {err}"))
            }
        }
    }

    fn focus_current(&mut self, map: &mut dyn MapWidget) -> String {
        self.position.focus(self.records.current(), map);
        match self.position.state() {
            MarkerState::Idle { .. } | MarkerState::Dirty { .. } => {
                let name = self.current().map(RowRecord::store_name).unwrap_or_default();
                format!("Viewing store: {name}")
            }
            MarkerState::Unresolvable { store_name } => {
                format!("Invalid coordinates for store: {store_name}. Skip it to continue.")
            }
            MarkerState::Hidden if self.records.is_complete() => {
                info!(stores = self.records.len(), "review pass complete");
                "All stores processed!".to_string()
            }
            MarkerState::Hidden => String::new(),
        }
    }
}

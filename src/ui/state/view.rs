use crate::domain::entities::edit::EditEntry;
use crate::usecase::services::review_service::ReviewService;

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentStoreView {
    pub name: String,
    pub province: String,
    pub original: String,
    pub candidate: Option<String>,
    pub progress: String,
}

/// Everything the screen renders, copied out of the session so no borrow of
/// the signal outlives the render.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewView {
    pub status: String,
    pub current: Option<CurrentStoreView>,
    pub show_save: bool,
    pub show_skip: bool,
    pub skip_enabled: bool,
    pub show_export: bool,
    pub ledger_lines: Vec<String>,
}

impl From<&ReviewService> for ReviewView {
    fn from(session: &ReviewService) -> Self {
        let records = session.records();
        let current = session.current().map(|record| {
            let (lat, lng) = record.raw_coordinates();
            CurrentStoreView {
                name: record.store_name(),
                province: record.province(),
                original: format!("{lat}, {lng}"),
                candidate: session.position().candidate().map(|pos| pos.display()),
                progress: format!("{} / {}", records.cursor() + 1, records.len()),
            }
        });

        Self {
            status: session.status().to_string(),
            current,
            show_save: session.can_save(),
            show_skip: session.skip_visible(),
            skip_enabled: session.can_skip(),
            show_export: session.can_export(),
            ledger_lines: session
                .ledger()
                .entries()
                .iter()
                .map(EditEntry::summary)
                .collect(),
        }
    }
}

use super::response::ImportResult;

/// Delay before a clean import closes the dialog
pub const AUTO_CLOSE_DELAY_MS: u32 = 3000;

/// Result and error shown by the import dialog.
///
/// The epoch changes whenever the shown result is discarded (new file,
/// close). A pending auto-close only fires if the epoch it captured is still
/// current.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportDialogState {
    epoch: u64,
    result: Option<ImportResult>,
    error: Option<String>,
}

impl ImportDialogState {
    pub fn result(&self) -> Option<&ImportResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// A new file was picked: previous outcome no longer applies.
    pub fn select_file(&mut self) {
        self.discard();
    }

    pub fn close(&mut self) {
        self.discard();
    }

    pub fn start(&mut self) {
        self.error = None;
    }

    /// Stores the result; returns the epoch to auto-close at, if any.
    pub fn finish(&mut self, result: ImportResult) -> Option<u64> {
        let auto_close = result.auto_closes();
        self.result = Some(result);
        self.error = None;
        auto_close.then_some(self.epoch)
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn should_auto_close(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.result.is_some()
    }

    fn discard(&mut self) {
        self.epoch += 1;
        self.result = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_import_excel::SheetError;

    fn clean() -> ImportResult {
        ImportResult {
            success: true,
            rows_added: 12,
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_result_schedules_auto_close() {
        let mut state = ImportDialogState::default();
        state.select_file();

        let epoch = state.finish(clean()).unwrap();
        assert!(state.should_auto_close(epoch));
    }

    #[test]
    fn test_result_with_errors_stays_open() {
        let mut state = ImportDialogState::default();
        let result = ImportResult {
            success: true,
            errors: vec![SheetError {
                sheet: "Feuil1".into(),
                error: "empty".into(),
                message: "Feuille vide".into(),
            }],
            ..Default::default()
        };

        assert_eq!(state.finish(result), None);
        assert!(state.result().is_some());
    }

    #[test]
    fn test_new_file_cancels_pending_auto_close() {
        let mut state = ImportDialogState::default();
        let epoch = state.finish(clean()).unwrap();

        state.select_file();
        assert!(!state.should_auto_close(epoch));
        assert!(state.result().is_none());
    }

    #[test]
    fn test_manual_close_cancels_pending_auto_close() {
        let mut state = ImportDialogState::default();
        let epoch = state.finish(clean()).unwrap();

        state.close();
        assert!(!state.should_auto_close(epoch));
    }

    #[test]
    fn test_failure_is_cleared_by_next_start() {
        let mut state = ImportDialogState::default();
        state.fail("Erreur lors de l'importation".into());
        assert_eq!(state.error(), Some("Erreur lors de l'importation"));

        state.start();
        assert_eq!(state.error(), None);
    }
}

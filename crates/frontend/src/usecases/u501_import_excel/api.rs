use crate::shared::api_utils::{logged, post_form};
use contracts::shared::api_error::ApiError;
use contracts::usecases::u501_import_excel::ImportResult;
use web_sys::{File, FormData};

/// Multipart field the service reads the workbook from
const FILE_FIELD: &str = "file";

/// Uploads a workbook; tables are created or merged server side.
pub async fn import_excel(file: &File) -> Result<ImportResult, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Transport(format!("{:?}", e)))?;
    form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())
        .map_err(|e| ApiError::Transport(format!("{:?}", e)))?;

    logged("POST /import-excel", post_form("/import-excel", form).await)
}

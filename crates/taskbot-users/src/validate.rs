//! Pure validation rules for user operations. No I/O.

use taskbot_core::errors::ValidationError;

use crate::params::CreateParams;

pub fn create(params: &CreateParams) -> Result<(), ValidationError> {
    if params.telegram_id == 0 {
        return Err(ValidationError::EmptyRequiredFields(vec!["TelegramID"]));
    }
    Ok(())
}

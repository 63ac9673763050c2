//! Pure validation rules for task operations. No I/O.
//!
//! Creation collects every violated required-field check into one error;
//! updates fail on the first violated rule, required-ID check first.

use taskbot_core::errors::ValidationError;

use crate::params::{CreateParams, SearchByDateParams, UpdateParams};

pub fn create(params: &CreateParams) -> Result<(), ValidationError> {
    let mut empty = Vec::new();
    if params.user_id == 0 {
        empty.push("UserID");
    }
    if params.title.is_empty() {
        empty.push("Title");
    }
    if empty.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EmptyRequiredFields(empty))
    }
}

pub fn update(params: &UpdateParams) -> Result<(), ValidationError> {
    if params.task_id == 0 {
        return Err(ValidationError::MissingId("TaskID"));
    }
    if params.title.as_ref().is_some_and(String::is_empty) {
        return Err(ValidationError::EmptyField("title"));
    }
    if params.user_id == Some(0) {
        return Err(ValidationError::EmptyField("userID"));
    }
    Ok(())
}

pub fn search_by_date(params: &SearchByDateParams) -> Result<(), ValidationError> {
    if params.user_id == 0 {
        return Err(ValidationError::MissingId("UserID"));
    }
    if params.from.is_none() && params.to.is_none() {
        return Err(ValidationError::MissingSearchBounds);
    }
    Ok(())
}

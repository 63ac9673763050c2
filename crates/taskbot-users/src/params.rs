//! Parameter structs for the user service.

/// Input for [`crate::UserService::create`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CreateParams {
    /// External chat identity; required, non-zero.
    pub telegram_id: i64,
}

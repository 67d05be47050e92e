pub mod confirm_dialog;
pub mod dialog;
pub mod form_modal;
pub mod layout;
pub mod require_auth;
pub mod submit_button;

pub use confirm_dialog::ConfirmDialog;
pub use dialog::Dialog;
pub use form_modal::FormModal;
pub use layout::MainLayout;
pub use require_auth::RequireAuth;
pub use submit_button::SubmitButton;

pub mod auth;
mod cell;
pub mod collection;
pub mod confirm;
pub mod form;
pub mod resources;
pub mod session;

pub use auth::AuthState;
pub use cell::StateCell;
pub use collection::ResourceCollection;
pub use confirm::{ConfirmOutcome, confirm};
pub use form::{
    FieldDescriptor, FieldKind, FormError, FormModal, FormState, ModalPhase,
    SubmitOutcome,
};
pub use resources::CollectionState;
pub use session::{MemoryTokenStore, SESSION_TOKEN_KEY, Session, TokenStore};

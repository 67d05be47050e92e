pub mod use_auth;
pub mod use_resources;
pub mod use_session;
pub mod use_state_cell;

pub use use_auth::{AuthHandle, use_auth};
pub use use_resources::{
    ResourcesHandle, use_categories, use_products, use_resources,
};
pub use use_session::use_session;
pub use use_state_cell::{HookCell, use_state_cell};

use yewdux::prelude::*;

/// App-wide state shared through yewdux.
#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    /// Mirrors whether the session holds a token, so components re-render
    /// when it changes.
    pub signed_in: bool,
    /// Confirmation from the last successful mutation.
    pub notice: Option<String>,
}

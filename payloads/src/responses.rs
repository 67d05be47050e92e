use serde::{Deserialize, Serialize};

/// Body returned by create and update calls: the stored record and a
/// human-readable confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved<R> {
    pub record: R,
    pub message: String,
}

/// A bare confirmation, as returned by delete and register.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginToken {
    pub token: String,
}

/// Shape of every failure body the backend sends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

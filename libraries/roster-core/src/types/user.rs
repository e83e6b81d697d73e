/// User domain type
use serde::{Deserialize, Serialize};

/// User account as exposed over the API.
///
/// The credential hash deliberately has no field here: nothing that
/// serializes a `User` can ever leak it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, immutable once created
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,
}

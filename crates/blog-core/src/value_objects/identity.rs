//! Verified caller identity carried by a session

use serde::{Deserialize, Serialize};

use super::Id;

/// Who is making a request, as proven by a verified session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: Id,
    pub is_admin: bool,
}

impl Identity {
    pub const fn new(user_id: Id, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// True when the caller is the given user
    #[inline]
    pub fn is(&self, user_id: Id) -> bool {
        self.user_id == user_id
    }
}

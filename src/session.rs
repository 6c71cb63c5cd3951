//! Who is looking at the sheet.
//!
//! Login itself happens outside the engine; the host hands over the role it
//! resolved. Players can drag items around, only the game master can use
//! the item actions (create, edit, rotate, image, remove, delete, stress).

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Player,
    Master,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<String>,
    pub role: Role,
}

impl Session {
    pub fn new(user: impl Into<String>, role: Role) -> Self {
        Self {
            user: Some(user.into()),
            role,
        }
    }

    pub fn player() -> Self {
        Self::default()
    }

    pub fn master() -> Self {
        Self {
            user: None,
            role: Role::Master,
        }
    }

    pub fn can_edit(&self) -> bool {
        self.role == Role::Master
    }
}

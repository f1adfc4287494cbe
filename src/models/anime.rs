use serde::{Deserialize, Serialize};

use crate::entities::anime;

/// The Anime resource as it travels over the API.
///
/// `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anime {
    pub id: Option<i64>,
    pub name: String,
}

impl Anime {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn has_valid_name(&self) -> bool {
        !self.name.is_empty()
    }
}

impl From<anime::Model> for Anime {
    fn from(model: anime::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
        }
    }
}

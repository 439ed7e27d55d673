use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Id,
    /// Column this task lives in
    pub column_id: Id,
    pub content: String,
}

impl Task {
    pub fn new(id: impl Into<Id>, column_id: impl Into<Id>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            content: content.into(),
        }
    }

    pub fn update_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn set_column(&mut self, column_id: Id) {
        self.column_id = column_id;
    }
}

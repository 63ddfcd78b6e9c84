//! Child profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tumbuh_core::error::CoreError;
use tumbuh_core::growth::Sex;
use tumbuh_core::types::{Date, DbId, Timestamp};
use validator::Validate;

/// A child row from the `children` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Child {
    pub id: DbId,
    /// Owning parent account.
    pub user_id: DbId,
    pub name: String,
    pub birth_date: Date,
    /// `"male"` or `"female"`; use [`Child::sex`] for the typed value.
    pub sex: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Child {
    pub fn sex(&self) -> Result<Sex, CoreError> {
        self.sex.parse()
    }
}

/// DTO for creating a child profile. The owner comes from the session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateChild {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    pub birth_date: Date,
    pub sex: Sex,
}

/// DTO for updating a child profile. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateChild {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: Option<String>,
    pub birth_date: Option<Date>,
    pub sex: Option<Sex>,
}

/// Result of [`ChildRepo::update`](crate::repositories::ChildRepo::update).
#[derive(Debug, Clone)]
pub enum ChildUpdate {
    /// The child was updated. `ages_rewritten` counts growth records whose
    /// `age_months` changed with the birth date.
    Updated { child: Child, ages_rewritten: u64 },
    /// No row with the given id is owned by the user.
    NotFound,
    /// The new birth date falls after an existing record. Nothing was written.
    RecordBeforeBirth { record_id: DbId, recorded_date: Date },
}

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod child_repo;
pub mod growth_record_repo;
pub mod nutrition_intake_repo;
pub mod recipe_repo;
pub mod session_repo;
pub mod standard_repo;
pub mod user_repo;

pub use child_repo::ChildRepo;
pub use growth_record_repo::GrowthRecordRepo;
pub use nutrition_intake_repo::NutritionIntakeRepo;
pub use recipe_repo::RecipeRepo;
pub use session_repo::SessionRepo;
pub use standard_repo::StandardRepo;
pub use user_repo::UserRepo;

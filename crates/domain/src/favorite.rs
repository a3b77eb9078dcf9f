use crate::{DeleteError, Exercise, ExerciseID, ReadError, UpdateError};

/// Saved exercises. Failures are logged and degrade to "not saved" or an empty list.
#[allow(async_fn_in_trait)]
pub trait FavoriteService {
    async fn is_favorite(&self, id: &ExerciseID) -> bool;
    async fn add_favorite(&self, exercise: &Exercise);
    async fn remove_favorite(&self, id: &ExerciseID);
    async fn get_favorites(&self) -> Vec<Exercise>;

    /// Returns whether the exercise is saved afterwards.
    async fn toggle_favorite(&self, exercise: &Exercise) -> bool;
}

#[allow(async_fn_in_trait)]
pub trait FavoriteRepository {
    async fn contains_favorite(&self, id: &ExerciseID) -> Result<bool, ReadError>;
    async fn read_favorites(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn write_favorite(&self, exercise: &Exercise) -> Result<(), UpdateError>;
    async fn delete_favorite(&self, id: &ExerciseID) -> Result<(), DeleteError>;
}

use log::{debug, error};

use crate::{
    DeleteError, Exercise, ExerciseID, FavoriteRepository, FavoriteService, Quote,
    QuoteRepository, QuoteService, ReadError, UpdateError,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: FavoriteRepository> FavoriteService for Service<R> {
    async fn is_favorite(&self, id: &ExerciseID) -> bool {
        log_on_error!(
            self.repository.contains_favorite(id),
            ReadError,
            "check",
            "favorite"
        )
        .unwrap_or(false)
    }

    async fn add_favorite(&self, exercise: &Exercise) {
        let _ = log_on_error!(
            self.repository.write_favorite(exercise),
            UpdateError,
            "add",
            "favorite"
        );
    }

    async fn remove_favorite(&self, id: &ExerciseID) {
        let _ = log_on_error!(
            self.repository.delete_favorite(id),
            DeleteError,
            "remove",
            "favorite"
        );
    }

    async fn get_favorites(&self) -> Vec<Exercise> {
        log_on_error!(
            self.repository.read_favorites(),
            ReadError,
            "get",
            "favorites"
        )
        .unwrap_or_default()
    }

    async fn toggle_favorite(&self, exercise: &Exercise) -> bool {
        if self.is_favorite(&exercise.id).await {
            log_on_error!(
                self.repository.delete_favorite(&exercise.id),
                DeleteError,
                "remove",
                "favorite"
            )
            .is_err()
        } else {
            log_on_error!(
                self.repository.write_favorite(exercise),
                UpdateError,
                "add",
                "favorite"
            )
            .is_ok()
        }
    }
}

impl<R: QuoteRepository> QuoteService for Service<R> {
    async fn get_quote(&self) -> Quote {
        match log_on_error!(
            self.repository.read_random_quote(),
            ReadError,
            "get",
            "quote"
        ) {
            Ok(quote) if !quote.content.trim().is_empty() => quote,
            _ => Quote::fallback(),
        }
    }
}

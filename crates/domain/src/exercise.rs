use std::{fmt, slice::Iter, str::FromStr};

use derive_more::{Deref, Display};

use crate::{Name, catalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub body_part: BodyPart,
    pub equipment: String,
    pub image: String,
    pub description: String,
    pub video_url: Option<String>,
    pub beginner_tips: Option<String>,
}

#[derive(Deref, Debug, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(String);

impl ExerciseID {
    pub fn new(id: &str) -> Result<Self, ExerciseIDError> {
        let trimmed_id = id.trim();

        if trimmed_id.is_empty() {
            return Err(ExerciseIDError::Empty);
        }

        Ok(Self(trimmed_id.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseIDError {
    #[error("Exercise ID must not be empty")]
    Empty,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum BodyPart {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
}

impl Property for BodyPart {
    fn iter() -> Iter<'static, BodyPart> {
        static BODY_PARTS: [BodyPart; 6] = [
            BodyPart::Chest,
            BodyPart::Back,
            BodyPart::Legs,
            BodyPart::Shoulders,
            BodyPart::Arms,
            BodyPart::Core,
        ];
        BODY_PARTS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            BodyPart::Chest => "Chest",
            BodyPart::Back => "Back",
            BodyPart::Legs => "Legs",
            BodyPart::Shoulders => "Shoulders",
            BodyPart::Arms => "Arms",
            BodyPart::Core => "Core",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BodyPart {
    type Err = BodyPartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        BodyPart::iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| BodyPartError::Invalid(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum BodyPartError {
    #[error("Unknown body part: {0}")]
    Invalid(String),
}

pub const ALL_CATEGORIES: &str = "all";

/// Criteria for narrowing down a list of exercises.
///
/// An empty name and no body part select every exercise.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseFilter {
    pub name: String,
    pub body_part: Option<BodyPart>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a Exercise>,
    ) -> Vec<&'a Exercise> {
        exercises.filter(|e| self.matches(e)).collect()
    }

    #[must_use]
    pub fn catalog(&self) -> Vec<&'static Exercise> {
        self.exercises(catalog::EXERCISES.iter())
    }

    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        exercise.name.matches(&self.name)
            && self.body_part.is_none_or(|b| b == exercise.body_part)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() && self.body_part.is_none()
    }

    #[must_use]
    pub fn body_part_list(&self) -> Vec<(BodyPart, bool)> {
        BodyPart::iter_filter()
            .map(|b| (*b, self.body_part == Some(*b)))
            .collect::<Vec<_>>()
    }

    pub fn toggle_body_part(&mut self, body_part: BodyPart) {
        if self.body_part == Some(body_part) {
            self.body_part = None;
        } else {
            self.body_part = Some(body_part);
        }
    }

    /// Selects a category by its name. `"all"` (in any case) removes the restriction.
    pub fn set_category(&mut self, category: &str) -> Result<(), BodyPartError> {
        if category.trim().eq_ignore_ascii_case(ALL_CATEGORIES) {
            self.body_part = None;
        } else {
            self.body_part = Some(category.parse()?);
        }
        Ok(())
    }
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn iter_filter() -> Iter<'static, Self> {
        Self::iter()
    }
    fn name(self) -> &'static str;
}

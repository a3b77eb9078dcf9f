#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
mod error;
mod exercise;
mod favorite;
mod name;
mod quote;
mod service;
mod step;
mod step_tracker;

pub use error::{DeleteError, ReadError, SensorError, StorageError, UpdateError};
pub use exercise::{
    ALL_CATEGORIES, BodyPart, BodyPartError, Exercise, ExerciseFilter, ExerciseID,
    ExerciseIDError, Property,
};
pub use favorite::{FavoriteRepository, FavoriteService};
pub use name::{Name, NameError};
pub use quote::{Quote, QuoteRepository, QuoteService};
pub use service::Service;
pub use step::{
    CALORIES_PER_STEP, ChartBar, DAILY_GOAL, DAYS_PER_WEEK, DaySlot, StepGoal,
    StepHistoryRepository, WeeklySteps, WeeklyStepsError, calories, day_name,
    progress_percentage, step_label, weekday, weekday_index,
};
pub use step_tracker::{Availability, Clock, Pedometer, StepTracker, SystemClock};

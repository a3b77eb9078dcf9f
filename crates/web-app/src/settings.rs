use fitdex_domain::{CALORIES_PER_STEP, DAILY_GOAL, StepGoal};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub daily_goal: u32,
    pub calories_per_step: f64,
    pub theme: Theme,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.daily_goal == 0 {
            return Err(SettingsError::InvalidDailyGoal);
        }

        if !self.calories_per_step.is_finite() || self.calories_per_step < 0.0 {
            return Err(SettingsError::InvalidCaloriesPerStep(self.calories_per_step));
        }

        Ok(())
    }

    #[must_use]
    pub fn step_goal(&self) -> StepGoal {
        StepGoal {
            daily_goal: self.daily_goal,
            calories_per_step: self.calories_per_step,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal: DAILY_GOAL,
            calories_per_step: CALORIES_PER_STEP,
            theme: Theme::Light,
        }
    }
}

/// Theme chosen by the user. Applying it is left to the presentation layer.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("Daily goal must be greater than zero")]
    InvalidDailyGoal,
    #[error("Calories per step must be a non-negative number ({0})")]
    InvalidCaloriesPerStep(f64),
}

//! Key-Value Repository
//!
//! Maps the domain repositories onto any [`KeyValueStore`]. Each favorite is stored under its own
//! key, the weekly step record, the settings and the application log under a fixed key each.
//! Persisted values are JSON and are validated when read; entries that fail validation are skipped.

use std::collections::VecDeque;

use chrono::NaiveDate;
use fitdex_web_app::{
    Settings, SettingsRepository,
    log::{self as app_log, Entry},
};
use log::{debug, error};
use strum::AsRefStr;

use fitdex_domain as domain;

use super::{BlockingKeyValueStore, KeyValueStore};

const FAVORITE_PREFIX: &str = "@fav_";
const STEP_HISTORY_VERSION: u32 = 1;

#[derive(AsRefStr)]
pub enum Key {
    #[strum(serialize = "@step_history")]
    StepHistory,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

fn favorite_key(id: &domain::ExerciseID) -> String {
    format!("{FAVORITE_PREFIX}{id}")
}

#[derive(Debug, Default, Clone)]
pub struct KeyValue<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KeyValue<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> domain::FavoriteRepository for KeyValue<S> {
    async fn contains_favorite(&self, id: &domain::ExerciseID) -> Result<bool, domain::ReadError> {
        Ok(self.store.get(&favorite_key(id)).await?.is_some())
    }

    async fn read_favorites(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let keys = self
            .store
            .get_all_keys()
            .await?
            .into_iter()
            .filter(|key| key.starts_with(FAVORITE_PREFIX))
            .collect::<Vec<_>>();

        let mut favorites = vec![];
        for (key, value) in self.store.multi_get(&keys).await? {
            let Some(value) = value else {
                continue;
            };
            match parse_favorite(&value) {
                Ok(exercise) if favorite_key(&exercise.id) == key => favorites.push(exercise),
                Ok(exercise) => {
                    error!("skipped favorite {key}: stored id {} does not match", exercise.id);
                }
                Err(err) => error!("skipped favorite {key}: {err}"),
            }
        }

        Ok(favorites)
    }

    async fn write_favorite(&self, exercise: &domain::Exercise) -> Result<(), domain::UpdateError> {
        let value = serde_json::to_string(&ExerciseRecord::from(exercise))
            .map_err(|err| domain::UpdateError::Other(Box::new(err)))?;
        Ok(self.store.set(&favorite_key(&exercise.id), &value).await?)
    }

    async fn delete_favorite(&self, id: &domain::ExerciseID) -> Result<(), domain::DeleteError> {
        Ok(self.store.remove(&favorite_key(id)).await?)
    }
}

fn parse_favorite(value: &str) -> Result<domain::Exercise, Box<dyn std::error::Error>> {
    let record = serde_json::from_str::<ExerciseRecord>(value)?;
    Ok(domain::Exercise::try_from(record)?)
}

impl<S: KeyValueStore> domain::StepHistoryRepository for KeyValue<S> {
    async fn read_step_history(&self) -> Result<Option<domain::WeeklySteps>, domain::ReadError> {
        let Some(value) = self.store.get(Key::StepHistory.as_ref()).await? else {
            return Ok(None);
        };
        let record = serde_json::from_str::<StepHistoryRecord>(&value)
            .map_err(|err| domain::ReadError::Other(Box::new(err)))?;
        if matches!(record, StepHistoryRecord::Legacy(_)) {
            debug!("read step history without version");
        }
        Ok(Some(
            domain::WeeklySteps::try_from(record)
                .map_err(|err| domain::ReadError::Other(Box::new(err)))?,
        ))
    }

    async fn write_step_history(
        &self,
        weekly_steps: &domain::WeeklySteps,
    ) -> Result<(), domain::UpdateError> {
        let value = serde_json::to_string(&StepHistoryRecord::from(weekly_steps))
            .map_err(|err| domain::UpdateError::Other(Box::new(err)))?;
        Ok(self.store.set(Key::StepHistory.as_ref(), &value).await?)
    }

    async fn delete_step_history(&self) -> Result<(), domain::DeleteError> {
        Ok(self.store.remove(Key::StepHistory.as_ref()).await?)
    }
}

impl<S: KeyValueStore> SettingsRepository for KeyValue<S> {
    async fn read_settings(&self) -> Result<Settings, String> {
        match self
            .store
            .get(Key::Settings.as_ref())
            .await
            .map_err(|err| err.to_string())?
        {
            Some(value) => serde_json::from_str(&value).map_err(|err| err.to_string()),
            None => Ok(Settings::default()),
        }
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        let value = serde_json::to_string(&settings).map_err(|err| err.to_string())?;
        self.store
            .set(Key::Settings.as_ref(), &value)
            .await
            .map_err(|err| err.to_string())
    }
}

/// Application log kept under a single key, newest entry first.
#[derive(Debug, Default, Clone)]
pub struct Log<S: BlockingKeyValueStore> {
    store: S,
}

impl<S: BlockingKeyValueStore> Log<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: BlockingKeyValueStore + Send + Sync + 'static> app_log::Repository for Log<S> {
    fn read_entries(&self) -> Result<VecDeque<Entry>, app_log::Error> {
        match self
            .store
            .get_blocking(Key::Log.as_ref())
            .map_err(|err| app_log::Error::Unknown(err.to_string()))?
        {
            Some(value) => serde_json::from_str(&value)
                .map_err(|err| app_log::Error::Unknown(err.to_string())),
            None => Ok(VecDeque::new()),
        }
    }

    fn write_entry(&self, entry: Entry) -> Result<(), app_log::Error> {
        let mut entries = self.read_entries()?;
        app_log::prepend(&mut entries, entry);
        let value =
            serde_json::to_string(&entries).map_err(|err| app_log::Error::Unknown(err.to_string()))?;
        self.store
            .set_blocking(Key::Log.as_ref(), &value)
            .map_err(|err| app_log::Error::Unknown(err.to_string()))
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct ExerciseRecord {
    id: String,
    name: String,
    body_part: String,
    equipment: String,
    image: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    beginner_tips: Option<String>,
}

impl From<&domain::Exercise> for ExerciseRecord {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            body_part: value.body_part.to_string(),
            equipment: value.equipment.clone(),
            image: value.image.clone(),
            description: value.description.clone(),
            video_url: value.video_url.clone(),
            beginner_tips: value.beginner_tips.clone(),
        }
    }
}

impl TryFrom<ExerciseRecord> for domain::Exercise {
    type Error = ExerciseError;

    fn try_from(value: ExerciseRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain::ExerciseID::new(&value.id)?,
            name: domain::Name::new(&value.name)?,
            body_part: value.body_part.parse()?,
            equipment: value.equipment,
            image: value.image,
            description: value.description,
            video_url: value.video_url,
            beginner_tips: value.beginner_tips,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseError {
    #[error(transparent)]
    Id(#[from] domain::ExerciseIDError),
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    BodyPart(#[from] domain::BodyPartError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
enum StepHistoryRecord {
    Versioned(VersionedStepHistory),
    /// Bare list of days written before the record carried a version.
    Legacy(Vec<DayRecord>),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct VersionedStepHistory {
    version: u32,
    updated_on: Option<NaiveDate>,
    days: Vec<DayRecord>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct DayRecord {
    day: String,
    steps: u32,
    is_today: bool,
}

impl From<&domain::WeeklySteps> for StepHistoryRecord {
    fn from(value: &domain::WeeklySteps) -> Self {
        Self::Versioned(VersionedStepHistory {
            version: STEP_HISTORY_VERSION,
            updated_on: value.updated_on(),
            days: value
                .days()
                .iter()
                .map(|slot| DayRecord {
                    day: slot.name().to_string(),
                    steps: slot.steps,
                    is_today: slot.is_today,
                })
                .collect(),
        })
    }
}

impl TryFrom<StepHistoryRecord> for domain::WeeklySteps {
    type Error = StepHistoryError;

    fn try_from(value: StepHistoryRecord) -> Result<Self, Self::Error> {
        let (updated_on, days) = match value {
            StepHistoryRecord::Versioned(VersionedStepHistory {
                version: STEP_HISTORY_VERSION,
                updated_on,
                days,
            }) => (updated_on, days),
            StepHistoryRecord::Versioned(VersionedStepHistory { version, .. }) => {
                return Err(StepHistoryError::UnsupportedVersion(version));
            }
            StepHistoryRecord::Legacy(days) => (None, days),
        };

        let slots = days
            .into_iter()
            .map(|day| {
                Ok(domain::DaySlot {
                    day: parse_day(&day.day)?,
                    steps: day.steps,
                    is_today: day.is_today,
                })
            })
            .collect::<Result<Vec<_>, StepHistoryError>>()?;
        let slots: [domain::DaySlot; domain::DAYS_PER_WEEK] =
            slots.try_into().map_err(|slots: Vec<domain::DaySlot>| {
                domain::WeeklyStepsError::InvalidLength(slots.len())
            })?;

        Ok(domain::WeeklySteps::from_days(updated_on, slots)?)
    }
}

fn parse_day(name: &str) -> Result<chrono::Weekday, StepHistoryError> {
    (0..domain::DAYS_PER_WEEK)
        .map(domain::weekday)
        .find(|day| domain::day_name(*day) == name)
        .ok_or_else(|| StepHistoryError::InvalidDay(name.to_string()))
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum StepHistoryError {
    #[error("Unsupported step history version ({0})")]
    UnsupportedVersion(u32),
    #[error("Invalid day ({0})")]
    InvalidDay(String),
    #[error(transparent)]
    WeeklySteps(#[from] domain::WeeklyStepsError),
}

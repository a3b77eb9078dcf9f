use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use futures_util::{Stream, StreamExt};
use log::{debug, error, warn};

use crate::{ChartBar, SensorError, StepGoal, StepHistoryRepository, WeeklySteps};

pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[allow(async_fn_in_trait)]
pub trait Pedometer {
    /// Live feed of step deltas. Dropping the subscription unsubscribes from the sensor.
    type Subscription: Stream<Item = u32> + Unpin;

    async fn is_available(&self) -> Result<bool, SensorError>;
    async fn step_count(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<u32, SensorError>;
    fn watch_step_count(&self) -> Result<Self::Subscription, SensorError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Checking,
    Unavailable(SensorError),
    Available,
}

/// Today's step count and the weekly history of a step tracking screen.
///
/// The tracker holds the sensor subscription while it is mounted. The subscription is released
/// by `deactivate`, or when the tracker is dropped.
pub struct StepTracker<R, P: Pedometer, C> {
    repository: R,
    pedometer: P,
    clock: C,
    goal: StepGoal,
    availability: Availability,
    day: NaiveDate,
    steps: u32,
    weekly_steps: WeeklySteps,
    subscription: Option<P::Subscription>,
}

impl<R, P: Pedometer, C: Clock> StepTracker<R, P, C> {
    pub fn new(repository: R, pedometer: P, clock: C, goal: StepGoal) -> Self {
        let today = clock.today();
        Self {
            repository,
            pedometer,
            clock,
            goal,
            availability: Availability::Checking,
            day: today,
            steps: 0,
            weekly_steps: WeeklySteps::new(today),
            subscription: None,
        }
    }

    /// Today's step count. Reads as zero once the day has changed, even before the next sensor
    /// update arrives.
    #[must_use]
    pub fn steps(&self) -> u32 {
        if self.clock.today() == self.day {
            self.steps
        } else {
            0
        }
    }

    #[must_use]
    pub fn progress_percentage(&self) -> u8 {
        self.goal.progress_percentage(self.steps())
    }

    #[must_use]
    pub fn calories(&self) -> u32 {
        self.goal.calories(self.steps())
    }

    fn roll_over(&mut self) {
        let today = self.clock.today();
        if today != self.day {
            debug!("starting step count of {today}");
            self.day = today;
            self.steps = 0;
            self.weekly_steps.roll_to(today);
        }
    }
}

impl<R, P: Pedometer, C> StepTracker<R, P, C> {
    #[must_use]
    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    #[must_use]
    pub fn weekly_steps(&self) -> &WeeklySteps {
        &self.weekly_steps
    }

    #[must_use]
    pub fn goal(&self) -> StepGoal {
        self.goal
    }

    #[must_use]
    pub fn chart(&self) -> Vec<ChartBar> {
        self.weekly_steps.chart(self.goal.daily_goal)
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Stops receiving sensor updates until the tracker is mounted again.
    pub fn deactivate(&mut self) {
        if self.subscription.take().is_some() {
            debug!("unsubscribed from step counter");
        }
    }
}

impl<R, P, C> StepTracker<R, P, C>
where
    R: StepHistoryRepository,
    P: Pedometer,
    C: Clock,
{
    /// Loads the weekly history and connects to the sensor.
    ///
    /// A tracker whose sensor turned out to be unavailable stays unavailable.
    pub async fn mount(&mut self) -> &Availability {
        self.load_weekly_steps().await;

        if let Availability::Unavailable(_) = self.availability {
            return &self.availability;
        }

        match self.activate().await {
            Ok(()) => {
                self.availability = Availability::Available;
            }
            Err(err) => {
                warn!("step counter unavailable: {err}");
                self.subscription = None;
                self.availability = Availability::Unavailable(err);
            }
        }

        &self.availability
    }

    /// Waits for the next sensor update and returns the new step count of today.
    ///
    /// Returns `None` if the tracker is not subscribed or the sensor feed has ended.
    pub async fn next_update(&mut self) -> Option<u32> {
        self.roll_over();
        let delta = self.subscription.as_mut()?.next().await;
        if let Some(delta) = delta {
            self.record_steps(delta).await;
            Some(self.steps)
        } else {
            debug!("step counter feed ended");
            self.subscription = None;
            None
        }
    }

    pub async fn record_steps(&mut self, delta: u32) {
        if self.availability != Availability::Available {
            debug!("ignoring {delta} steps while step counter is not available");
            return;
        }

        self.roll_over();
        self.steps = self.steps.saturating_add(delta);
        self.store().await;
    }

    pub async fn reset(&mut self) {
        self.day = self.clock.today();
        self.steps = 0;
        self.weekly_steps = WeeklySteps::new(self.day);

        if let Err(err) = self.repository.delete_step_history().await {
            error!("failed to delete step history: {err}");
        }
    }

    async fn activate(&mut self) -> Result<(), SensorError> {
        if !self.pedometer.is_available().await? {
            return Err(SensorError::Unavailable);
        }

        let now = self.clock.now();
        let midnight = now.date().and_time(NaiveTime::MIN);
        let steps_since_midnight = self.pedometer.step_count(midnight, now).await?;
        let subscription = self.pedometer.watch_step_count()?;

        self.day = now.date();
        self.steps = steps_since_midnight.max(self.weekly_steps.steps_on(self.day));
        self.subscription = Some(subscription);
        self.store().await;

        Ok(())
    }

    async fn load_weekly_steps(&mut self) {
        let today = self.clock.today();

        self.weekly_steps = match self.repository.read_step_history().await {
            Ok(Some(weekly_steps)) => weekly_steps,
            Ok(None) => WeeklySteps::new(today),
            Err(err) => {
                error!("failed to read step history: {err}");
                WeeklySteps::new(today)
            }
        };
        self.weekly_steps.roll_to(today);
    }

    async fn store(&mut self) {
        self.weekly_steps.merge(self.day, self.steps);

        if let Err(err) = self
            .repository
            .write_step_history(&self.weekly_steps)
            .await
        {
            error!("failed to write step history: {err}");
        }
    }
}

impl<R, P: Pedometer, C> Drop for StepTracker<R, P, C> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

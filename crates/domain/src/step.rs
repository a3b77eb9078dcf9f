use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

use crate::{DeleteError, ReadError, UpdateError};

pub const DAYS_PER_WEEK: usize = 7;
pub const DAILY_GOAL: u32 = 10_000;
pub const CALORIES_PER_STEP: f64 = 0.04;

#[allow(async_fn_in_trait)]
pub trait StepHistoryRepository {
    async fn read_step_history(&self) -> Result<Option<WeeklySteps>, ReadError>;
    async fn write_step_history(&self, weekly_steps: &WeeklySteps) -> Result<(), UpdateError>;
    async fn delete_step_history(&self) -> Result<(), DeleteError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepGoal {
    pub daily_goal: u32,
    pub calories_per_step: f64,
}

impl Default for StepGoal {
    fn default() -> Self {
        Self {
            daily_goal: DAILY_GOAL,
            calories_per_step: CALORIES_PER_STEP,
        }
    }
}

impl StepGoal {
    #[must_use]
    pub fn progress_percentage(&self, steps: u32) -> u8 {
        progress_percentage(steps, self.daily_goal)
    }

    #[must_use]
    pub fn calories(&self, steps: u32) -> u32 {
        calories(steps, self.calories_per_step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlot {
    pub day: Weekday,
    pub steps: u32,
    pub is_today: bool,
}

impl DaySlot {
    #[must_use]
    pub fn name(&self) -> &'static str {
        day_name(self.day)
    }
}

/// Step counts of the seven days up to the most recent write, ordered from Sunday to Saturday.
///
/// Each slot holds the latest occurrence of its weekday. A slot is cleared when its weekday comes
/// around again, so the record always covers a rolling window of seven days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySteps {
    updated_on: Option<NaiveDate>,
    days: [DaySlot; DAYS_PER_WEEK],
}

impl WeeklySteps {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let mut days = [DaySlot {
            day: Weekday::Sun,
            steps: 0,
            is_today: false,
        }; DAYS_PER_WEEK];
        for (idx, slot) in days.iter_mut().enumerate() {
            slot.day = weekday(idx);
        }
        days[weekday_index(today)].is_today = true;
        Self {
            updated_on: Some(today),
            days,
        }
    }

    /// Restores a persisted record. A missing `updated_on` marks data written before the date of
    /// the last write was recorded.
    pub fn from_days(
        updated_on: Option<NaiveDate>,
        days: [DaySlot; DAYS_PER_WEEK],
    ) -> Result<Self, WeeklyStepsError> {
        for (idx, slot) in days.iter().enumerate() {
            if slot.day != weekday(idx) {
                return Err(WeeklyStepsError::InvalidDayOrder);
            }
        }

        if days.iter().filter(|slot| slot.is_today).count() > 1 {
            return Err(WeeklyStepsError::MultipleTodays);
        }

        if let Some(updated_on) = updated_on {
            if !days[weekday_index(updated_on)].is_today {
                return Err(WeeklyStepsError::TodayMismatch(updated_on));
            }
        }

        Ok(Self { updated_on, days })
    }

    #[must_use]
    pub fn updated_on(&self) -> Option<NaiveDate> {
        self.updated_on
    }

    #[must_use]
    pub fn days(&self) -> &[DaySlot; DAYS_PER_WEEK] {
        &self.days
    }

    #[must_use]
    pub fn today(&self) -> Option<&DaySlot> {
        self.days.iter().find(|slot| slot.is_today)
    }

    /// Steps recorded on `date`, or zero if `date` lies outside the seven days ending with the
    /// last write.
    #[must_use]
    pub fn steps_on(&self, date: NaiveDate) -> u32 {
        match self.updated_on {
            Some(updated_on) if date <= updated_on && updated_on - date < TimeDelta::days(7) => {
                self.days[weekday_index(date)].steps
            }
            _ => 0,
        }
    }

    /// Moves the window forward so that it ends with `today`. The slots of all days passed
    /// since the last write, including today, start over at zero.
    pub fn roll_to(&mut self, today: NaiveDate) {
        match self.updated_on {
            Some(updated_on) if today > updated_on => {
                for date in updated_on
                    .iter_days()
                    .skip(1)
                    .take_while(|date| *date <= today)
                    .take(DAYS_PER_WEEK)
                {
                    self.days[weekday_index(date)].steps = 0;
                }
            }
            Some(_) => {}
            None => {
                if self.today().is_some_and(|slot| slot.day != today.weekday()) {
                    self.days[weekday_index(today)].steps = 0;
                }
            }
        }
        self.updated_on = Some(today);

        let today_idx = weekday_index(today);
        for (idx, slot) in self.days.iter_mut().enumerate() {
            slot.is_today = idx == today_idx;
        }
    }

    /// Overwrites the step count of `today`.
    pub fn merge(&mut self, today: NaiveDate, steps: u32) {
        self.roll_to(today);
        self.days[weekday_index(today)].steps = steps;
    }

    #[must_use]
    pub fn max_steps(&self) -> u32 {
        self.days.iter().map(|slot| slot.steps).max().unwrap_or_default()
    }

    #[must_use]
    pub fn total_steps(&self) -> u64 {
        self.days.iter().map(|slot| u64::from(slot.steps)).sum()
    }

    /// Upper bound of the chart, large enough for both the goal line and the busiest day.
    #[must_use]
    pub fn chart_scale(&self, daily_goal: u32) -> u32 {
        self.max_steps().max(daily_goal)
    }

    #[must_use]
    pub fn bar_heights(&self, daily_goal: u32) -> [f64; DAYS_PER_WEEK] {
        let scale = f64::from(self.chart_scale(daily_goal));
        self.days.map(|slot| {
            if scale > 0.0 {
                f64::from(slot.steps) / scale
            } else {
                0.0
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub day: &'static str,
    pub height: f64,
    pub is_today: bool,
    pub label: Option<String>,
}

impl WeeklySteps {
    #[must_use]
    pub fn chart(&self, daily_goal: u32) -> Vec<ChartBar> {
        self.days
            .iter()
            .zip(self.bar_heights(daily_goal))
            .map(|(slot, height)| ChartBar {
                day: slot.name(),
                height,
                is_today: slot.is_today,
                label: step_label(slot.steps),
            })
            .collect()
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeeklyStepsError {
    #[error("Day of last update must be flagged as today ({0})")]
    TodayMismatch(NaiveDate),
    #[error("Days must be ordered from Sunday to Saturday")]
    InvalidDayOrder,
    #[error("Only one day can be today")]
    MultipleTodays,
    #[error("A week must have exactly 7 days ({0} != 7)")]
    InvalidLength(usize),
}

#[must_use]
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

#[must_use]
pub fn weekday(index: usize) -> Weekday {
    match index % DAYS_PER_WEEK {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

#[must_use]
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_percentage(steps: u32, daily_goal: u32) -> u8 {
    if daily_goal == 0 {
        return 100;
    }
    (f64::from(steps) * 100.0 / f64::from(daily_goal))
        .round()
        .min(100.0) as u8
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn calories(steps: u32, calories_per_step: f64) -> u32 {
    (f64::from(steps) * calories_per_step).round().max(0.0) as u32
}

/// Compact step count for chart labels; days without steps get no label.
#[must_use]
pub fn step_label(steps: u32) -> Option<String> {
    match steps {
        0 => None,
        1..=999 => Some(steps.to_string()),
        _ => Some(format!("{:.1}k", f64::from(steps) / 1000.0)),
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_weekly_steps_new() {
        let weekly_steps = WeeklySteps::new(date(2026, 10, 21));

        assert_eq!(weekly_steps.updated_on(), Some(date(2026, 10, 21)));
        assert_eq!(
            weekly_steps
                .days()
                .iter()
                .map(DaySlot::name)
                .collect::<Vec<_>>(),
            vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert!(weekly_steps.days().iter().all(|slot| slot.steps == 0));
        assert_eq!(
            weekly_steps
                .days()
                .iter()
                .filter(|slot| slot.is_today)
                .map(|slot| slot.day)
                .collect::<Vec<_>>(),
            vec![Weekday::Wed]
        );
    }

    #[rstest]
    #[case::sunday(date(2026, 10, 18), 0)]
    #[case::wednesday(date(2026, 10, 21), 3)]
    #[case::saturday(date(2026, 10, 24), 6)]
    #[case::year_boundary(date(2027, 1, 1), 5)]
    fn test_weekday_index(#[case] today: NaiveDate, #[case] expected: usize) {
        assert_eq!(weekday_index(today), expected);
        assert_eq!(weekday(expected), today.weekday());
    }

    #[test]
    fn test_weekly_steps_merge() {
        let mut weekly_steps = WeeklySteps::new(date(2026, 10, 19));

        weekly_steps.merge(date(2026, 10, 19), 1200);

        assert_eq!(weekly_steps.steps_on(date(2026, 10, 19)), 1200);
        assert_eq!(weekly_steps.today().map(|slot| slot.steps), Some(1200));

        let merged_once = weekly_steps.clone();
        weekly_steps.merge(date(2026, 10, 19), 1200);

        assert_eq!(weekly_steps, merged_once);
    }

    #[test]
    fn test_weekly_steps_merge_next_day() {
        let mut weekly_steps = WeeklySteps::new(date(2026, 10, 19));
        weekly_steps.merge(date(2026, 10, 19), 1200);

        weekly_steps.merge(date(2026, 10, 20), 300);

        assert_eq!(weekly_steps.steps_on(date(2026, 10, 19)), 1200);
        assert_eq!(weekly_steps.steps_on(date(2026, 10, 20)), 300);
        assert_eq!(weekly_steps.today().map(|slot| slot.day), Some(Weekday::Tue));
        assert_eq!(weekly_steps.total_steps(), 1500);
    }

    #[test]
    fn test_weekly_steps_merge_across_week_boundary() {
        let mut weekly_steps = WeeklySteps::new(date(2026, 10, 24));
        weekly_steps.merge(date(2026, 10, 23), 8000);
        weekly_steps.merge(date(2026, 10, 24), 10_000);

        weekly_steps.merge(date(2026, 10, 25), 50);

        assert_eq!(
            weekly_steps
                .days()
                .iter()
                .map(|slot| slot.steps)
                .collect::<Vec<_>>(),
            vec![50, 0, 0, 0, 0, 8000, 10_000]
        );
        assert_eq!(weekly_steps.steps_on(date(2026, 10, 24)), 10_000);
        assert_eq!(weekly_steps.steps_on(date(2026, 10, 23)), 8000);
        assert_eq!(weekly_steps.steps_on(date(2026, 10, 25)), 50);
        assert_eq!(weekly_steps.today().map(|slot| slot.day), Some(Weekday::Sun));
    }

    #[test]
    fn test_weekly_steps_merge_after_gap() {
        let mut weekly_steps = WeeklySteps::new(date(2026, 10, 19));
        weekly_steps.merge(date(2026, 10, 19), 1200);
        weekly_steps.merge(date(2026, 10, 20), 900);
        weekly_steps.merge(date(2026, 10, 23), 800);

        weekly_steps.merge(date(2026, 10, 26), 50);

        assert_eq!(
            weekly_steps
                .days()
                .iter()
                .map(|slot| slot.steps)
                .collect::<Vec<_>>(),
            vec![0, 50, 900, 0, 0, 800, 0]
        );
        assert_eq!(weekly_steps.steps_on(date(2026, 10, 19)), 0);
        assert_eq!(weekly_steps.steps_on(date(2026, 10, 20)), 900);
        assert_eq!(weekly_steps.steps_on(date(2026, 10, 27)), 0);
    }

    #[test]
    fn test_weekly_steps_roll_to_after_long_absence() {
        let mut weekly_steps = WeeklySteps::new(date(2026, 10, 19));
        weekly_steps.merge(date(2026, 10, 19), 1200);
        weekly_steps.merge(date(2026, 10, 22), 300);

        weekly_steps.roll_to(date(2026, 12, 1));

        assert_eq!(weekly_steps.total_steps(), 0);
        assert_eq!(weekly_steps.updated_on(), Some(date(2026, 12, 1)));
        assert_eq!(weekly_steps.today().map(|slot| slot.day), Some(Weekday::Tue));
    }

    #[test]
    fn test_weekly_steps_roll_to_same_day() {
        let mut weekly_steps = WeeklySteps::new(date(2026, 10, 19));
        weekly_steps.merge(date(2026, 10, 19), 1200);
        let before = weekly_steps.clone();

        weekly_steps.roll_to(date(2026, 10, 19));

        assert_eq!(weekly_steps, before);
    }

    #[test]
    fn test_weekly_steps_roll_to_unknown_date() {
        let mut days = WeeklySteps::new(date(2026, 10, 19)).days;
        days[1].steps = 4000;
        days[4].steps = 700;
        let mut weekly_steps = WeeklySteps::from_days(None, days).unwrap();

        weekly_steps.roll_to(date(2026, 10, 22));

        assert_eq!(weekly_steps.updated_on(), Some(date(2026, 10, 22)));
        assert_eq!(weekly_steps.steps_on(date(2026, 10, 19)), 4000);
        assert_eq!(weekly_steps.steps_on(date(2026, 10, 22)), 0);
        assert_eq!(weekly_steps.today().map(|slot| slot.day), Some(Weekday::Thu));
    }

    #[test]
    fn test_weekly_steps_from_days() {
        let days = WeeklySteps::new(date(2026, 10, 19)).days;

        assert_eq!(
            WeeklySteps::from_days(Some(date(2026, 10, 20)), days),
            Err(WeeklyStepsError::TodayMismatch(date(2026, 10, 20)))
        );

        let mut swapped = days;
        swapped.swap(0, 1);
        assert_eq!(
            WeeklySteps::from_days(None, swapped),
            Err(WeeklyStepsError::InvalidDayOrder)
        );

        let mut two_todays = days;
        two_todays[0].is_today = true;
        assert_eq!(
            WeeklySteps::from_days(None, two_todays),
            Err(WeeklyStepsError::MultipleTodays)
        );

        assert!(WeeklySteps::from_days(Some(date(2026, 10, 19)), days).is_ok());
        assert!(WeeklySteps::from_days(Some(date(2026, 10, 12)), days).is_ok());
    }

    #[rstest]
    #[case(0, 10_000, 0)]
    #[case(5000, 10_000, 50)]
    #[case(12_000, 10_000, 100)]
    #[case(4, 1000, 0)]
    #[case(5, 1000, 1)]
    #[case(9_949, 10_000, 99)]
    #[case(1, 0, 100)]
    fn test_progress_percentage(#[case] steps: u32, #[case] goal: u32, #[case] expected: u8) {
        assert_eq!(progress_percentage(steps, goal), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1000, 40)]
    #[case(12, 0)]
    #[case(13, 1)]
    #[case(10_000, 400)]
    fn test_calories(#[case] steps: u32, #[case] expected: u32) {
        assert_eq!(calories(steps, CALORIES_PER_STEP), expected);
    }

    #[test]
    fn test_step_goal_default() {
        let goal = StepGoal::default();

        assert_eq!(goal.daily_goal, 10_000);
        assert_approx_eq!(goal.calories_per_step, 0.04);
        assert_eq!(goal.progress_percentage(5000), 50);
        assert_eq!(goal.calories(1000), 40);
    }

    #[test]
    fn test_weekly_steps_bar_heights() {
        let mut weekly_steps = WeeklySteps::new(date(2026, 10, 18));

        assert_eq!(weekly_steps.chart_scale(DAILY_GOAL), DAILY_GOAL);
        assert!(weekly_steps.bar_heights(DAILY_GOAL).iter().all(|h| *h == 0.0));

        weekly_steps.merge(date(2026, 10, 18), 5000);
        weekly_steps.merge(date(2026, 10, 19), 20_000);

        let heights = weekly_steps.bar_heights(DAILY_GOAL);

        assert_eq!(weekly_steps.chart_scale(DAILY_GOAL), 20_000);
        assert_approx_eq!(heights[0], 0.25);
        assert_approx_eq!(heights[1], 1.0);
        assert_approx_eq!(heights[2], 0.0);
        assert_eq!(weekly_steps.bar_heights(0), heights);
        assert!(WeeklySteps::new(date(2026, 10, 19)).bar_heights(0).iter().all(|h| *h == 0.0));
    }

    #[test]
    fn test_weekly_steps_chart() {
        let mut weekly_steps = WeeklySteps::new(date(2026, 10, 20));
        weekly_steps.merge(date(2026, 10, 20), 2500);

        let chart = weekly_steps.chart(DAILY_GOAL);

        assert_eq!(chart.len(), DAYS_PER_WEEK);
        assert_eq!(
            chart[2],
            ChartBar {
                day: "Tue",
                height: 0.25,
                is_today: true,
                label: Some(String::from("2.5k")),
            }
        );
        assert_eq!(
            chart[3],
            ChartBar {
                day: "Wed",
                height: 0.0,
                is_today: false,
                label: None,
            }
        );
    }

    #[rstest]
    #[case(0, None)]
    #[case(999, Some("999"))]
    #[case(1000, Some("1.0k"))]
    #[case(12_345, Some("12.3k"))]
    fn test_step_label(#[case] steps: u32, #[case] expected: Option<&str>) {
        assert_eq!(step_label(steps).as_deref(), expected);
    }
}

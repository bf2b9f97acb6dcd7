use crate::clock::Clock;
use crate::config::{Configuration, parse_date, same_name};
use crate::error::{PratacError, Result};
use crate::offset::{PersonOffset, PersonSlot, RoomOffset};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub participant: String,
    pub area: String,
}

/// Everything assigned during one rotation week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub week_offset: i64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub assignments: Vec<Assignment>,
    /// Areas nobody covers this week (more areas than participants).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unassigned: Vec<String>,
}

impl WeekSchedule {
    pub fn area_for(&self, participant: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| same_name(&a.participant, participant))
            .map(|a| a.area.as_str())
    }
}

/// Whole weeks elapsed since `start_date`, floored, plus `manual_offset`.
pub fn week_offset(today: NaiveDate, start_date: &str, manual_offset: i64) -> Result<i64> {
    let start = parse_date(start_date)?;
    let days = (today - start).num_days();
    days.div_euclid(DAYS_PER_WEEK)
        .checked_add(manual_offset)
        .ok_or_else(|| {
            PratacError::WeekOutOfRange(format!(
                "{} weeks after {start} shifted by {manual_offset}",
                days.div_euclid(DAYS_PER_WEEK)
            ))
        })
}

pub fn current_week_offset<C: Clock + ?Sized>(
    clock: &C,
    config: &Configuration,
    manual_offset: i64,
) -> Result<i64> {
    let offset = week_offset(clock.today(), &config.start_date, manual_offset)?;
    tracing::debug!(today = %clock.today(), offset, "computed week offset");
    Ok(offset)
}

/// First and last day of the given rotation week. Fails when the week lies
/// outside the calendar chrono can represent.
pub fn week_range(start_date: NaiveDate, week_offset: i64) -> Result<(NaiveDate, NaiveDate)> {
    let shift = |days: Option<i64>, from: NaiveDate| {
        days.and_then(TimeDelta::try_days)
            .and_then(|delta| from.checked_add_signed(delta))
    };
    let starts_on = shift(week_offset.checked_mul(DAYS_PER_WEEK), start_date);
    let ends_on = starts_on.and_then(|day| shift(Some(DAYS_PER_WEEK - 1), day));
    match (starts_on, ends_on) {
        (Some(starts_on), Some(ends_on)) => Ok((starts_on, ends_on)),
        _ => Err(PratacError::WeekOutOfRange(format!(
            "week {week_offset} from {start_date} is not a representable date"
        ))),
    }
}

fn room_index(person_index: usize, week_offset: i64, rooms: usize) -> usize {
    (person_index as i128 + week_offset as i128).rem_euclid(rooms as i128) as usize
}

pub fn assign(
    person_key: &str,
    week_offset: i64,
    persons: &PersonOffset,
    rooms: &RoomOffset,
) -> Result<Vec<Assignment>> {
    if rooms.is_empty() {
        return Err(PratacError::NoAreas);
    }
    let slot = persons
        .resolve(person_key)
        .ok_or_else(|| PratacError::UnknownPerson(person_key.to_string()))?;
    let indices: Vec<usize> = match slot {
        PersonSlot::Single(index) => vec![index],
        PersonSlot::All => (0..persons.participant_count()).collect(),
    };

    let mut out = Vec::with_capacity(indices.len());
    for index in indices {
        let Some(entry) = persons.entry(index) else {
            return Err(PratacError::UnknownPerson(person_key.to_string()));
        };
        let room = room_index(index, week_offset, rooms.len());
        let Some(area) = rooms.get(room) else {
            return Err(PratacError::NoAreas);
        };
        out.push(Assignment {
            participant: entry.name.clone(),
            area: area.to_string(),
        });
    }
    Ok(out)
}

pub fn week_schedule(config: &Configuration, week_offset: i64) -> Result<WeekSchedule> {
    let start = config.start_date()?;
    let persons = PersonOffset::build(config)?;
    let rooms = RoomOffset::build(config);
    let assignments = assign(crate::offset::ALL_KEY, week_offset, &persons, &rooms)?;
    let unassigned = rooms
        .iter()
        .filter(|(_, area)| !assignments.iter().any(|a| a.area == *area))
        .map(|(_, area)| area.to_string())
        .collect();
    let (starts_on, ends_on) = week_range(start, week_offset)?;
    Ok(WeekSchedule {
        week_offset,
        starts_on,
        ends_on,
        assignments,
        unassigned,
    })
}

pub fn rotation_plan(
    config: &Configuration,
    first_week: i64,
    weeks: usize,
) -> Result<Vec<WeekSchedule>> {
    (0..weeks as i64)
        .map(|i| {
            let week = first_week.checked_add(i).ok_or_else(|| {
                PratacError::WeekOutOfRange(format!("{first_week} + {i} weeks"))
            })?;
            week_schedule(config, week)
        })
        .collect()
}

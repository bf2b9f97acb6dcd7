use chrono::{Duration, NaiveDate};
use pratac::{
    Configuration, FixedClock, PersonOffset, PratacError, RoomOffset, assign,
    current_week_offset, rotation_plan, week_offset,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn areas_of(assignments: &[pratac::Assignment]) -> Vec<&str> {
    assignments.iter().map(|a| a.area.as_str()).collect()
}

#[test]
fn week_offset_around_start_date() {
    let start = d(2022, 9, 14);
    assert_eq!(week_offset(start, "2022-09-14", 0).unwrap(), 0);
    assert_eq!(week_offset(start + Duration::days(7), "2022-09-14", 0).unwrap(), 1);
    assert_eq!(week_offset(start - Duration::days(7), "2022-09-14", 0).unwrap(), -1);
    assert_eq!(week_offset(start - Duration::days(1), "2022-09-14", 0).unwrap(), -1);
}

#[test]
fn unparseable_start_date_is_invalid_date() {
    let err = week_offset(d(2022, 9, 14), "2022/09/14", 0).unwrap_err();
    assert!(matches!(err, PratacError::InvalidDate { .. }));
}

#[test]
fn default_config_one_week_after_start() {
    let config = Configuration::default();
    let clock = FixedClock(d(2022, 9, 21));
    let week = current_week_offset(&clock, &config, 0).unwrap();
    assert_eq!(week, 1);

    let persons = PersonOffset::build(&config).unwrap();
    let rooms = RoomOffset::build(&config);
    assert_eq!(persons.get("mato"), Some(0));
    assert_eq!(areas_of(&assign("mato", 0, &persons, &rooms).unwrap()), ["shower"]);
    assert_eq!(areas_of(&assign("mato", week, &persons, &rooms).unwrap()), ["toilet"]);
    assert_eq!(
        assign("Mato", week, &persons, &rooms).unwrap()[0].participant,
        "Martin"
    );
}

#[test]
fn assignment_repeats_every_area_count_weeks() {
    let config = Configuration::default();
    let persons = PersonOffset::build(&config).unwrap();
    let rooms = RoomOffset::build(&config);
    let m = rooms.len() as i64;
    for key in ["martin", "peto", "samo", "all"] {
        for w in -10..10 {
            assert_eq!(
                assign(key, w, &persons, &rooms).unwrap(),
                assign(key, w + m, &persons, &rooms).unwrap(),
                "{key} week {w}"
            );
        }
    }
}

#[test]
fn negative_weeks_still_land_on_real_areas() {
    let config = Configuration::default();
    let persons = PersonOffset::build(&config).unwrap();
    let rooms = RoomOffset::build(&config);
    assert_eq!(areas_of(&assign("martin", -1, &persons, &rooms).unwrap()), ["hallway"]);
    assert_eq!(areas_of(&assign("samuel", -2, &persons, &rooms).unwrap()), ["shower"]);
}

#[test]
fn all_covers_every_participant_in_index_order() {
    let config = Configuration::default();
    let persons = PersonOffset::build(&config).unwrap();
    let rooms = RoomOffset::build(&config);
    let week = assign("ALL", 2, &persons, &rooms).unwrap();
    let names: Vec<&str> = week.iter().map(|a| a.participant.as_str()).collect();
    assert_eq!(names, ["Martin", "Peter", "Samuel"]);
    assert_eq!(areas_of(&week), ["kitchen", "hallway", "shower"]);
}

#[test]
fn unknown_person_is_reported() {
    let config = Configuration::default();
    let persons = PersonOffset::build(&config).unwrap();
    let rooms = RoomOffset::build(&config);
    match assign("nobody", 0, &persons, &rooms) {
        Err(PratacError::UnknownPerson(key)) => assert_eq!(key, "nobody"),
        other => panic!("expected unknown person, got {other:?}"),
    }
}

#[test]
fn empty_area_list_is_rejected() {
    let mut config = Configuration::default();
    config.cleaning_areas.clear();
    let persons = PersonOffset::build(&config).unwrap();
    let rooms = RoomOffset::build(&config);
    assert!(matches!(
        assign("mato", 0, &persons, &rooms),
        Err(PratacError::NoAreas)
    ));
}

#[test]
fn rotation_plan_walks_consecutive_weeks() {
    let plan = rotation_plan(&Configuration::default(), -1, 3).unwrap();
    let weeks: Vec<i64> = plan.iter().map(|w| w.week_offset).collect();
    assert_eq!(weeks, [-1, 0, 1]);
    assert_eq!(plan[0].starts_on, d(2022, 9, 7));
    assert_eq!(plan[2].ends_on, d(2022, 9, 27));
    assert_eq!(plan[1].area_for("Peter"), Some("toilet"));
    assert_eq!(plan[2].unassigned, ["shower"]);
}

pub mod clock;
pub mod config;
pub mod error;
pub mod offset;
pub mod persistence;
pub mod schedule;
pub mod wizard;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Configuration;
pub use error::{PratacError, Result};
pub use offset::{PersonEntry, PersonOffset, PersonSlot, RoomOffset};
pub use persistence::{
    ConfigStore, JsonConfigStore, default_config_path, resolve_config_path, save_plan_to_csv,
    save_plan_to_json,
};
pub use schedule::{
    Assignment, WeekSchedule, assign, current_week_offset, rotation_plan, week_offset, week_range,
    week_schedule,
};

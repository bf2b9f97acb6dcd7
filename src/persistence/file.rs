use super::ConfigStore;
use crate::config::{Configuration, DATE_FORMAT};
use crate::error::{PratacError, Result};
use crate::schedule::WeekSchedule;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

/// Configuration kept as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.temp_path();
        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(err) = written.and_then(|_| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }
        Ok(())
    }
}

impl ConfigStore for JsonConfigStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<Configuration> {
        let read_error = |source| PratacError::ConfigRead {
            path: self.path.clone(),
            source,
        };
        match fs::metadata(&self.path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file, using defaults");
                return Ok(Configuration::default());
            }
            Err(err) => return Err(read_error(err)),
            Ok(meta) if !meta.is_file() => {
                return Err(read_error(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "not a regular file",
                )));
            }
            Ok(_) => {}
        }
        let file = File::open(&self.path).map_err(|source| PratacError::ConfigRead {
            path: self.path.clone(),
            source,
        })?;
        let config: Configuration = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| PratacError::ConfigParse {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            path = %self.path.display(),
            participants = config.participants.len(),
            areas = config.cleaning_areas.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    fn save(&self, config: &Configuration) -> Result<()> {
        let mut json = serde_json::to_vec_pretty(config).map_err(|err| {
            PratacError::ConfigWrite {
                path: self.path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidData, err),
            }
        })?;
        json.push(b'\n');
        self.write_atomically(&json)
            .map_err(|source| PratacError::ConfigWrite {
                path: self.path.clone(),
                source,
            })?;
        tracing::info!(path = %self.path.display(), "saved configuration");
        Ok(())
    }
}

#[derive(Serialize)]
struct PlanCsvRecord<'a> {
    week_offset: i64,
    starts_on: String,
    ends_on: String,
    participant: &'a str,
    area: &'a str,
}

fn export_error(path: &Path, err: impl std::fmt::Display) -> PratacError {
    PratacError::Export {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// One row per participant per week. Unassigned areas get a row with an
/// empty participant.
pub fn save_plan_to_csv<P: AsRef<Path>>(plan: &[WeekSchedule], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| export_error(path, e))?;
    for week in plan {
        let starts_on = week.starts_on.format(DATE_FORMAT).to_string();
        let ends_on = week.ends_on.format(DATE_FORMAT).to_string();
        let rows = week
            .assignments
            .iter()
            .map(|a| (a.participant.as_str(), a.area.as_str()))
            .chain(week.unassigned.iter().map(|area| ("", area.as_str())));
        for (participant, area) in rows {
            writer
                .serialize(PlanCsvRecord {
                    week_offset: week.week_offset,
                    starts_on: starts_on.clone(),
                    ends_on: ends_on.clone(),
                    participant,
                    area,
                })
                .map_err(|e| export_error(path, e))?;
        }
    }
    writer.flush().map_err(|e| export_error(path, e))?;
    tracing::info!(path = %path.display(), weeks = plan.len(), "exported plan as csv");
    Ok(())
}

pub fn save_plan_to_json<P: AsRef<Path>>(plan: &[WeekSchedule], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| export_error(path, e))?;
    serde_json::to_writer_pretty(file, plan).map_err(|e| export_error(path, e))?;
    tracing::info!(path = %path.display(), weeks = plan.len(), "exported plan as json");
    Ok(())
}

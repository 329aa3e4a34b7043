//! Routine state persistence with file locking.
//!
//! Tracks which profile the user follows and where they are in the
//! three-week cycle. Calendars themselves are never stored; they are cheap to
//! regenerate from this state.

use crate::calendar::{cycle_week_for_date, next_cycle_week, week_start};
use crate::{CycleWeek, Error, Result};
use chrono::{Days, NaiveDate};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The user's place in their care routine
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RoutineState {
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub cycle_week: CycleWeek,
    #[serde(default)]
    pub cycle_started_on: Option<NaiveDate>,
}

impl RoutineState {
    /// Follow a new profile, restarting the cycle at week 1
    pub fn select_profile(&mut self, profile_id: &str, today: NaiveDate) {
        self.profile_id = Some(profile_id.to_string());
        self.cycle_week = CycleWeek::One;
        self.cycle_started_on = Some(today);
    }

    /// Cycle week that covers `date`
    ///
    /// Counted from the cycle start when one is recorded, so the week moves
    /// on by itself as time passes. Without a start, the stored week.
    pub fn week_on(&self, date: NaiveDate) -> CycleWeek {
        match self.cycle_started_on {
            Some(start) => cycle_week_for_date(start, date),
            None => self.cycle_week,
        }
    }

    /// Move the week containing `today` to the next cycle week, wrapping 3 to 1
    ///
    /// The cycle start is moved back so that [`week_on`](Self::week_on)
    /// agrees with the stored week for every date from now on.
    pub fn advance(&mut self, today: NaiveDate) -> CycleWeek {
        let next = next_cycle_week(self.week_on(today));
        self.cycle_week = next;
        if self.cycle_started_on.is_some() {
            let weeks_back = Days::new(7 * u64::from(next.number() - 1));
            self.cycle_started_on = week_start(today).checked_sub_days(weeks_back);
        }
        next
    }

    /// Load state from a file with shared locking
    ///
    /// Returns default state if file doesn't exist.
    /// If file is corrupted, logs a warning and returns default state.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No state file found, using default state");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;

        if let Err(e) = read {
            tracing::warn!(
                "Failed to read state file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Ok(Self::default());
        }

        match serde_json::from_str::<RoutineState>(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded routine state from {:?}", path);
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse state file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save state atomically: temp file, fsync, rename over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::State(format!("state path {:?} has no parent", path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved routine state to {:?}", path);
        Ok(())
    }

    /// Load state, modify it, and save it back
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut RoutineState) -> Result<()>,
    {
        let mut state = Self::load(path)?;
        f(&mut state)?;
        state.save(path)?;
        Ok(state)
    }
}

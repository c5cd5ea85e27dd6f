use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One class entry of the lecture timetable.
///
/// Field names on the wire follow the database nodes exactly; any attribute
/// missing from a node is read as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    #[serde(rename = "hari")]
    pub day: String,
    #[serde(rename = "matakuliah")]
    pub course_name: String,
    #[serde(rename = "kode")]
    pub course_code: String,
    #[serde(rename = "kelas")]
    pub section: String,
    #[serde(rename = "dosen")]
    pub instructor: String,
    #[serde(rename = "jam")]
    pub time: String,
    #[serde(rename = "ruang")]
    pub room: String,
}

/// Snapshot handed from the login screen to the list screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleHandoff {
    pub schedules: Vec<Schedule>,
    pub fetched_at: DateTime<Utc>,
}

impl ScheduleHandoff {
    pub fn new(schedules: Vec<Schedule>) -> Self {
        Self {
            schedules,
            fetched_at: Utc::now(),
        }
    }
}

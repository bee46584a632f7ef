use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Category, ShotDetail, ShotRecord, TextField, SENTINEL};

const HEADER: [&str; 12] = [
    "User",
    "Date",
    "SessionName",
    "Time",
    "Category",
    "Club_Dist",
    "Impact",
    "Trajectory",
    "Length_Speed",
    "Proximity",
    "Error_Dir",
    "Rating",
];

// Raw wire row; everything is kept as text so one bad cell degrades to a
// missing field instead of losing the whole record.
#[derive(Debug, Serialize, Deserialize)]
struct ShotRow {
    #[serde(rename = "User")]
    user: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "SessionName")]
    session_name: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Club_Dist")]
    club_dist: String,
    #[serde(rename = "Impact")]
    impact: String,
    #[serde(rename = "Trajectory")]
    trajectory: String,
    #[serde(rename = "Length_Speed")]
    length_speed: String,
    #[serde(rename = "Proximity")]
    proximity: String,
    #[serde(rename = "Error_Dir")]
    error_dir: String,
    #[serde(rename = "Rating")]
    rating: String,
}

pub struct ShotLog {
    path: PathBuf,
}

impl ShotLog {
    pub fn new(path: impl Into<PathBuf>) -> ShotLog {
        ShotLog { path: path.into() }
    }

    pub fn init(&self) -> anyhow::Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        writer.write_record(HEADER).context("failed to write header")?;
        writer.flush().context("failed to write header")?;
        Ok(true)
    }

    // An unreadable or structurally broken log counts as "no data".
    pub fn read_all(&self) -> Vec<ShotRecord> {
        match self.try_read_all() {
            Ok(records) => records,
            Err(err) => {
                eprintln!("warning: shot log unavailable, continuing with no data: {err:#}");
                Vec::new()
            }
        }
    }

    fn try_read_all(&self) -> anyhow::Result<Vec<ShotRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut records = Vec::new();
        for row in reader.deserialize::<ShotRow>() {
            let row = row.with_context(|| format!("malformed row in {}", self.path.display()))?;
            if let Some(record) = decode_row(row) {
                records.push(record);
            }
        }
        Ok(records)
    }

    pub fn append(&self, record: &ShotRecord) -> anyhow::Result<()> {
        let fresh = std::fs::metadata(&self.path)
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(fresh)
            .from_writer(file);
        writer
            .serialize(encode_row(record))
            .context("failed to append shot")?;
        writer.flush().context("failed to append shot")?;
        Ok(())
    }

    pub fn import(&self, csv_path: &Path) -> anyhow::Result<(usize, usize)> {
        let mut reader = csv::Reader::from_path(csv_path)
            .with_context(|| format!("failed to open {}", csv_path.display()))?;
        let mut inserted = 0usize;
        let mut skipped = 0usize;
        for row in reader.deserialize::<ShotRow>() {
            let row = row.with_context(|| format!("malformed row in {}", csv_path.display()))?;
            match decode_row(row) {
                Some(record) => {
                    self.append(&record)?;
                    inserted += 1;
                }
                None => skipped += 1,
            }
        }
        Ok((inserted, skipped))
    }

    pub fn seed(&self, user: &str, session_name: &str) -> anyhow::Result<usize> {
        let today = Local::now().date_naive();
        let samples: [(i64, &str, Category, [&str; 6], i32); 9] = [
            (
                2,
                "10:05",
                Category::LongGame,
                ["Driver", "Solid", "Straight", "On Target", "< 10m", "None (Target)"],
                3,
            ),
            (
                2,
                "10:12",
                Category::LongGame,
                ["Driver", "Heel", "Slice", "Short", "> 10m", "Right"],
                1,
            ),
            (
                2,
                "10:20",
                Category::LongGame,
                ["Long Irons", "Solid", "Draw", "On Target", "< 5m", "None (Target)"],
                3,
            ),
            (
                1,
                "17:40",
                Category::ShortGame,
                ["SW", "Solid", "Fairway", "On Target", "Close (<3m)", "-"],
                3,
            ),
            (
                1,
                "17:45",
                Category::ShortGame,
                ["SW", "Fat", "Rough", "Short", "Missed (>5m)", "-"],
                1,
            ),
            (
                1,
                "17:52",
                Category::ShortGame,
                ["LW", "Solid", "Bunker", "On Target", "Ok (<5m)", "-"],
                2,
            ),
            (
                0,
                "09:02",
                Category::Putting,
                ["2m", "Center", "On Line", "Perfect", "Holed", "-"],
                3,
            ),
            (
                0,
                "09:06",
                Category::Putting,
                ["5m", "Center", "Push (Right)", "Short", "Short (>1m)", "-"],
                1,
            ),
            (
                0,
                "09:11",
                Category::Putting,
                ["8m", "Toe", "On Line", "Perfect", "Tap-in (<50cm)", "-"],
                2,
            ),
        ];

        let mut inserted = 0usize;
        for (days_ago, time, category, [club, impact, trajectory, length, proximity, error_dir], rating) in
            samples
        {
            let record = ShotRecord {
                user: user.to_string(),
                date: Some(today - Duration::days(days_ago)),
                session_name: session_name.to_string(),
                time: time.to_string(),
                rating: Some(rating),
                detail: decode_detail(category, club, impact, trajectory, length, proximity, error_dir),
            };
            self.append(&record)?;
            inserted += 1;
        }
        Ok(inserted)
    }
}

fn decode_row(row: ShotRow) -> Option<ShotRecord> {
    let user = row.user.trim().to_uppercase();
    if user.is_empty() {
        return None;
    }
    let category = Category::parse(&row.category)?;
    Some(ShotRecord {
        user,
        date: parse_date(&row.date),
        session_name: row.session_name.trim().to_string(),
        time: row.time.trim().to_string(),
        rating: parse_rating(&row.rating),
        detail: decode_detail(
            category,
            &row.club_dist,
            &row.impact,
            &row.trajectory,
            &row.length_speed,
            &row.proximity,
            &row.error_dir,
        ),
    })
}

fn encode_row(record: &ShotRecord) -> ShotRow {
    ShotRow {
        user: record.user.clone(),
        date: record.date.map(|date| date.to_string()).unwrap_or_default(),
        session_name: record.session_name.clone(),
        time: record.time.clone(),
        category: record.category().label().to_string(),
        club_dist: column_value(record, TextField::Club),
        impact: column_value(record, TextField::Impact),
        trajectory: column_value(record, TextField::Trajectory),
        length_speed: column_value(record, TextField::LengthSpeed),
        proximity: column_value(record, TextField::Proximity),
        error_dir: column_value(record, TextField::ErrorDir),
        rating: record.rating.map(|rating| rating.to_string()).unwrap_or_default(),
    }
}

fn column_value(record: &ShotRecord, field: TextField) -> String {
    record.text(field).unwrap_or(SENTINEL).to_string()
}

fn decode_detail(
    category: Category,
    club: &str,
    impact: &str,
    trajectory: &str,
    length: &str,
    proximity: &str,
    error_dir: &str,
) -> ShotDetail {
    match category {
        Category::LongGame => ShotDetail::LongGame {
            club: clean(club),
            impact: clean(impact),
            trajectory: clean(trajectory),
            length: clean(length),
            proximity: clean(proximity),
            error_dir: clean(error_dir),
        },
        Category::ShortGame => ShotDetail::ShortGame {
            club: clean(club),
            impact: clean(impact),
            lie: clean(trajectory),
            distance_control: clean(length),
            proximity: clean(proximity),
        },
        Category::Putting => ShotDetail::Putting {
            start_distance: clean(club),
            impact: clean(impact),
            line: clean(trajectory),
            speed: clean(length),
            proximity: clean(proximity),
        },
    }
}

fn clean(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        SENTINEL.to_string()
    } else {
        value.to_string()
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_rating(raw: &str) -> Option<i32> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.fract() == 0.0 {
        Some(value as i32)
    } else {
        None
    }
}

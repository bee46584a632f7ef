use anyhow::bail;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

pub const SENTINEL: &str = "-";
pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 3;
pub const DEFAULT_SESSION: &str = "Standard Practice";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Category {
    LongGame,
    ShortGame,
    Putting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Club,
    Impact,
    Trajectory,
    LengthSpeed,
    Proximity,
    ErrorDir,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::LongGame, Category::ShortGame, Category::Putting];

    pub fn label(&self) -> &'static str {
        match self {
            Category::LongGame => "LONG GAME",
            Category::ShortGame => "SHORT GAME",
            Category::Putting => "PUTTING",
        }
    }

    pub fn parse(value: &str) -> Option<Category> {
        match value.trim().to_uppercase().as_str() {
            "LONG GAME" => Some(Category::LongGame),
            "SHORT GAME" => Some(Category::ShortGame),
            "PUTTING" => Some(Category::Putting),
            _ => None,
        }
    }

    pub fn text_fields(&self) -> &'static [TextField] {
        match self {
            Category::LongGame => &[
                TextField::Club,
                TextField::Impact,
                TextField::Trajectory,
                TextField::LengthSpeed,
                TextField::Proximity,
                TextField::ErrorDir,
            ],
            Category::ShortGame | Category::Putting => &[
                TextField::Club,
                TextField::Impact,
                TextField::Trajectory,
                TextField::LengthSpeed,
                TextField::Proximity,
            ],
        }
    }

    pub fn field_name(&self, field: TextField) -> &'static str {
        match (self, field) {
            (Category::Putting, TextField::Club) => "start distance",
            (_, TextField::Club) => "club",
            (_, TextField::Impact) => "impact",
            (Category::ShortGame, TextField::Trajectory) => "lie",
            (Category::Putting, TextField::Trajectory) => "line",
            (_, TextField::Trajectory) => "trajectory",
            (Category::ShortGame, TextField::LengthSpeed) => "distance control",
            (Category::Putting, TextField::LengthSpeed) => "speed",
            (_, TextField::LengthSpeed) => "length",
            (_, TextField::Proximity) => "proximity",
            (_, TextField::ErrorDir) => "miss direction",
        }
    }

    pub fn options(&self, field: TextField) -> &'static [&'static str] {
        match (self, field) {
            (Category::LongGame, TextField::Club) => &[
                "Driver",
                "Woods",
                "Hybrids",
                "Long Irons",
                "Short Irons",
                "Wedges",
            ],
            (Category::LongGame, TextField::Impact) => {
                &["Solid", "Thin", "Fat", "Heel", "Toe", "Shank"]
            }
            (Category::LongGame, TextField::Trajectory) => {
                &["Straight", "Draw", "Fade", "Pull", "Push", "Hook", "Slice"]
            }
            (Category::LongGame, TextField::LengthSpeed) => &["On Target", "Short", "Long"],
            (Category::LongGame, TextField::Proximity) => &["< 2m", "< 5m", "< 10m", "> 10m"],
            (Category::LongGame, TextField::ErrorDir) => &["None (Target)", "Left", "Right"],
            (Category::ShortGame, TextField::Club) => &["LW", "SW", "GW", "AW", "PW", "9I", "8I"],
            (Category::ShortGame, TextField::Impact) => &["Solid", "Thin", "Fat", "Shank"],
            (Category::ShortGame, TextField::Trajectory) => {
                &["Fairway", "Rough", "Bunker", "Fringe"]
            }
            (Category::ShortGame, TextField::LengthSpeed) => &["On Target", "Short", "Long"],
            (Category::ShortGame, TextField::Proximity) => {
                &["Tap-in (<1m)", "Close (<3m)", "Ok (<5m)", "Missed (>5m)"]
            }
            (Category::Putting, TextField::Club) => &["1m", "2m", "3m", "5m", "8m", "10m", ">15m"],
            (Category::Putting, TextField::Impact) => &["Center", "Toe", "Heel"],
            (Category::Putting, TextField::Trajectory) => {
                &["On Line", "Push (Right)", "Pull (Left)"]
            }
            (Category::Putting, TextField::LengthSpeed) => &["Perfect", "Short", "Long"],
            (Category::Putting, TextField::Proximity) => {
                &["Holed", "Tap-in (<50cm)", "Long (>1m)", "Short (>1m)"]
            }
            (_, TextField::ErrorDir) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShotDetail {
    LongGame {
        club: String,
        impact: String,
        trajectory: String,
        length: String,
        proximity: String,
        error_dir: String,
    },
    ShortGame {
        club: String,
        impact: String,
        lie: String,
        distance_control: String,
        proximity: String,
    },
    Putting {
        start_distance: String,
        impact: String,
        line: String,
        speed: String,
        proximity: String,
    },
}

#[derive(Debug, Clone)]
pub struct ShotEntry {
    pub club: String,
    pub impact: String,
    pub trajectory: String,
    pub length: String,
    pub proximity: String,
    pub error_dir: Option<String>,
}

impl ShotDetail {
    pub fn category(&self) -> Category {
        match self {
            ShotDetail::LongGame { .. } => Category::LongGame,
            ShotDetail::ShortGame { .. } => Category::ShortGame,
            ShotDetail::Putting { .. } => Category::Putting,
        }
    }

    pub fn from_entry(category: Category, entry: &ShotEntry) -> anyhow::Result<ShotDetail> {
        let club = checked_option(category, TextField::Club, &entry.club)?;
        let impact = checked_option(category, TextField::Impact, &entry.impact)?;
        let trajectory = checked_option(category, TextField::Trajectory, &entry.trajectory)?;
        let length = checked_option(category, TextField::LengthSpeed, &entry.length)?;
        let proximity = checked_option(category, TextField::Proximity, &entry.proximity)?;

        if entry.error_dir.is_some() && !category.text_fields().contains(&TextField::ErrorDir) {
            bail!("--error-dir does not apply to {} shots", category.label());
        }

        match category {
            Category::LongGame => {
                let error_dir = match entry.error_dir.as_deref() {
                    Some(value) => checked_option(category, TextField::ErrorDir, value)?,
                    None => bail!("--error-dir is required for long game shots"),
                };
                Ok(ShotDetail::LongGame {
                    club,
                    impact,
                    trajectory,
                    length,
                    proximity,
                    error_dir,
                })
            }
            Category::ShortGame => Ok(ShotDetail::ShortGame {
                club,
                impact,
                lie: trajectory,
                distance_control: length,
                proximity,
            }),
            Category::Putting => Ok(ShotDetail::Putting {
                start_distance: club,
                impact,
                line: trajectory,
                speed: length,
                proximity,
            }),
        }
    }

    pub fn text(&self, field: TextField) -> Option<&str> {
        let value: &str = match (self, field) {
            (ShotDetail::LongGame { club, .. }, TextField::Club) => club,
            (ShotDetail::LongGame { impact, .. }, TextField::Impact) => impact,
            (ShotDetail::LongGame { trajectory, .. }, TextField::Trajectory) => trajectory,
            (ShotDetail::LongGame { length, .. }, TextField::LengthSpeed) => length,
            (ShotDetail::LongGame { proximity, .. }, TextField::Proximity) => proximity,
            (ShotDetail::LongGame { error_dir, .. }, TextField::ErrorDir) => error_dir,
            (ShotDetail::ShortGame { club, .. }, TextField::Club) => club,
            (ShotDetail::ShortGame { impact, .. }, TextField::Impact) => impact,
            (ShotDetail::ShortGame { lie, .. }, TextField::Trajectory) => lie,
            (ShotDetail::ShortGame { distance_control, .. }, TextField::LengthSpeed) => {
                distance_control
            }
            (ShotDetail::ShortGame { proximity, .. }, TextField::Proximity) => proximity,
            (ShotDetail::Putting { start_distance, .. }, TextField::Club) => start_distance,
            (ShotDetail::Putting { impact, .. }, TextField::Impact) => impact,
            (ShotDetail::Putting { line, .. }, TextField::Trajectory) => line,
            (ShotDetail::Putting { speed, .. }, TextField::LengthSpeed) => speed,
            (ShotDetail::Putting { proximity, .. }, TextField::Proximity) => proximity,
            _ => return None,
        };
        if value.is_empty() || value == SENTINEL {
            None
        } else {
            Some(value)
        }
    }
}

fn checked_option(category: Category, field: TextField, value: &str) -> anyhow::Result<String> {
    let options = category.options(field);
    match options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(value.trim()))
    {
        Some(option) => Ok((*option).to_string()),
        None => bail!(
            "invalid {} {:?} for {}; expected one of: {}",
            category.field_name(field),
            value,
            category.label(),
            options.join(", ")
        ),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShotRecord {
    pub user: String,
    pub date: Option<NaiveDate>,
    pub session_name: String,
    pub time: String,
    pub rating: Option<i32>,
    pub detail: ShotDetail,
}

impl ShotRecord {
    pub fn category(&self) -> Category {
        self.detail.category()
    }

    pub fn text(&self, field: TextField) -> Option<&str> {
        self.detail.text(field)
    }

    // Out-of-range ratings stay out of the arithmetic entirely.
    pub fn scored_rating(&self) -> Option<i32> {
        self.rating
            .filter(|rating| (RATING_MIN..=RATING_MAX).contains(rating))
    }

    pub fn rating_value(&self) -> Option<f64> {
        self.scored_rating().map(f64::from)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueShare {
    pub value: String,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClubSummary {
    pub club: String,
    pub shots: usize,
    pub mean_rating: Option<f64>,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub shots: usize,
    pub mean_rating: Option<f64>,
    pub std_dev: f64,
    pub top_rating_share: f64,
    pub common_error: Option<String>,
    pub common_proximity: Option<String>,
    pub ratings: Vec<ValueShare>,
    pub impacts: Vec<ValueShare>,
    pub clubs: Vec<ClubSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_game_entry() -> ShotEntry {
        ShotEntry {
            club: "Driver".to_string(),
            impact: "Solid".to_string(),
            trajectory: "Straight".to_string(),
            length: "On Target".to_string(),
            proximity: "< 10m".to_string(),
            error_dir: Some("None (Target)".to_string()),
        }
    }

    fn putt(rating: Option<i32>) -> ShotRecord {
        ShotRecord {
            user: "MARIO".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10),
            session_name: DEFAULT_SESSION.to_string(),
            time: "09:00".to_string(),
            rating,
            detail: ShotDetail::Putting {
                start_distance: "3m".to_string(),
                impact: "Center".to_string(),
                line: "On Line".to_string(),
                speed: "Perfect".to_string(),
                proximity: SENTINEL.to_string(),
            },
        }
    }

    #[test]
    fn parse_accepts_known_labels_only() {
        assert_eq!(Category::parse("putting"), Some(Category::Putting));
        assert_eq!(Category::parse(" Long Game "), Some(Category::LongGame));
        assert_eq!(Category::parse("FOOTGOLF"), None);
    }

    #[test]
    fn text_hides_sentinel_and_inapplicable_fields() {
        let shot = putt(Some(2));
        assert_eq!(shot.text(TextField::Impact), Some("Center"));
        assert_eq!(shot.text(TextField::Proximity), None);
        assert_eq!(shot.text(TextField::ErrorDir), None);
    }

    #[test]
    fn scored_rating_excludes_out_of_range_values() {
        assert_eq!(putt(Some(3)).scored_rating(), Some(3));
        assert_eq!(putt(Some(0)).scored_rating(), None);
        assert_eq!(putt(Some(9)).scored_rating(), None);
        assert_eq!(putt(None).scored_rating(), None);
    }

    #[test]
    fn from_entry_canonicalizes_case() {
        let mut entry = long_game_entry();
        entry.club = "driver".to_string();
        let detail = ShotDetail::from_entry(Category::LongGame, &entry).unwrap();
        assert_eq!(detail.text(TextField::Club), Some("Driver"));
    }

    #[test]
    fn from_entry_rejects_unknown_values() {
        let mut entry = long_game_entry();
        entry.impact = "Perfect".to_string();
        let err = ShotDetail::from_entry(Category::LongGame, &entry).unwrap_err();
        assert!(err.to_string().contains("expected one of"));
    }

    #[test]
    fn from_entry_requires_miss_direction_for_long_game() {
        let mut entry = long_game_entry();
        entry.error_dir = None;
        assert!(ShotDetail::from_entry(Category::LongGame, &entry).is_err());
    }

    #[test]
    fn from_entry_rejects_miss_direction_for_putting() {
        let entry = ShotEntry {
            club: "3m".to_string(),
            impact: "Center".to_string(),
            trajectory: "On Line".to_string(),
            length: "Perfect".to_string(),
            proximity: "Holed".to_string(),
            error_dir: Some("Left".to_string()),
        };
        assert!(ShotDetail::from_entry(Category::Putting, &entry).is_err());
    }

    #[test]
    fn miss_direction_applies_to_long_game_only() {
        assert!(Category::LongGame
            .text_fields()
            .contains(&TextField::ErrorDir));
        assert!(!Category::ShortGame
            .text_fields()
            .contains(&TextField::ErrorDir));
        assert!(!Category::Putting.text_fields().contains(&TextField::ErrorDir));
    }
}

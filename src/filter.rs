use chrono::{Duration, NaiveDate};
use clap::ValueEnum;

use crate::auth::Session;
use crate::models::{Category, ShotRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Period {
    /// Shots from the current practice sitting
    Session,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// Last 365 days
    Year,
    /// Every recorded shot
    All,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Session => "Current session",
            Period::Week => "Last week",
            Period::Month => "Last month",
            Period::Year => "Last year",
            Period::All => "Lifelong",
        }
    }

    pub fn window_days(&self) -> Option<i64> {
        match self {
            Period::Session | Period::All => None,
            Period::Week => Some(7),
            Period::Month => Some(30),
            Period::Year => Some(365),
        }
    }

    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.window_days().map(|days| today - Duration::days(days))
    }
}

#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub user: String,
    pub category: Option<Category>,
    pub session_name: Option<String>,
    pub date_from: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn for_period(session: &Session, period: Period, today: NaiveDate) -> FilterSpec {
        FilterSpec {
            user: session.user.clone(),
            category: None,
            session_name: match period {
                Period::Session => Some(session.session_name.clone()),
                _ => None,
            },
            date_from: period.cutoff(today),
        }
    }

    fn matches(&self, record: &ShotRecord) -> bool {
        if record.user != self.user {
            return false;
        }
        if let Some(category) = self.category {
            if record.category() != category {
                return false;
            }
        }
        if let Some(session_name) = &self.session_name {
            if &record.session_name != session_name {
                return false;
            }
        }
        if let Some(date_from) = self.date_from {
            // A record without a date can never fall inside a dated window.
            match record.date {
                Some(date) if date >= date_from => {}
                _ => return false,
            }
        }
        true
    }
}

pub fn filter(records: &[ShotRecord], spec: &FilterSpec) -> Vec<ShotRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShotDetail;

    fn shot(user: &str, date: Option<NaiveDate>, session_name: &str) -> ShotRecord {
        ShotRecord {
            user: user.to_string(),
            date,
            session_name: session_name.to_string(),
            time: "09:00".to_string(),
            rating: Some(2),
            detail: ShotDetail::Putting {
                start_distance: "3m".to_string(),
                impact: "Center".to_string(),
                line: "On Line".to_string(),
                speed: "Perfect".to_string(),
                proximity: "Holed".to_string(),
            },
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn spec_for(user: &str) -> FilterSpec {
        FilterSpec {
            user: user.to_string(),
            category: None,
            session_name: None,
            date_from: None,
        }
    }

    #[test]
    fn week_window_boundary_is_inclusive() {
        let today = date(2024, 6, 10);
        let records = vec![
            shot("MARIO", Some(date(2024, 6, 3)), "Standard Practice"),
            shot("MARIO", Some(date(2024, 6, 2)), "Standard Practice"),
        ];
        let mut spec = spec_for("MARIO");
        spec.date_from = Period::Week.cutoff(today);

        let kept = filter(&records, &spec);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].date, Some(date(2024, 6, 3)));
    }

    #[test]
    fn undated_records_never_match_a_dated_window() {
        let today = date(2024, 6, 10);
        let records = vec![shot("MARIO", None, "Standard Practice")];
        let mut spec = spec_for("MARIO");
        spec.date_from = Period::Week.cutoff(today);
        assert!(filter(&records, &spec).is_empty());

        spec.date_from = None;
        assert_eq!(filter(&records, &spec).len(), 1);
    }

    #[test]
    fn only_the_requested_user_matches() {
        let records = vec![
            shot("MARIO", Some(date(2024, 6, 3)), "Standard Practice"),
            shot("ANNA", Some(date(2024, 6, 3)), "Standard Practice"),
        ];
        let kept = filter(&records, &spec_for("MARIO"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].user, "MARIO");
    }

    #[test]
    fn session_window_matches_the_sitting_label_exactly() {
        let session = Session {
            user: "MARIO".to_string(),
            session_name: "Evening drills".to_string(),
        };
        let records = vec![
            shot("MARIO", Some(date(2024, 6, 3)), "Evening drills"),
            shot("MARIO", Some(date(2024, 6, 3)), "Standard Practice"),
        ];
        let spec = FilterSpec::for_period(&session, Period::Session, date(2024, 6, 10));

        let kept = filter(&records, &spec);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].session_name, "Evening drills");
    }

    #[test]
    fn category_predicate_narrows_the_selection() {
        let records = vec![shot("MARIO", Some(date(2024, 6, 3)), "Standard Practice")];
        let mut spec = spec_for("MARIO");
        spec.category = Some(Category::LongGame);
        assert!(filter(&records, &spec).is_empty());

        spec.category = Some(Category::Putting);
        assert_eq!(filter(&records, &spec).len(), 1);
    }

    #[test]
    fn period_cutoffs_follow_the_window_lengths() {
        let today = date(2024, 6, 10);
        assert_eq!(Period::Week.cutoff(today), Some(date(2024, 6, 3)));
        assert_eq!(Period::Month.cutoff(today), Some(date(2024, 5, 11)));
        assert_eq!(Period::All.cutoff(today), None);
        assert_eq!(Period::Session.cutoff(today), None);
    }
}

use std::fmt::Write;

use chrono::NaiveDate;

use crate::auth::Session;
use crate::models::{Category, ShotRecord, TextField, RATING_MAX};
use crate::stats;

pub fn build_report(
    session: &Session,
    period_label: &str,
    today: NaiveDate,
    records: &[ShotRecord],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Practice Performance Report");
    let _ = writeln!(
        output,
        "Athlete: {} | Period: {} | Report date: {}",
        session.user, period_label, today
    );

    for category in Category::ALL {
        let summary = stats::summarize_category(category, records);

        let _ = writeln!(output);
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", category.label());

        if summary.shots == 0 {
            let _ = writeln!(output, "No shots recorded in this period.");
            continue;
        }

        let _ = writeln!(output, "- Total shots: {}", summary.shots);
        match summary.mean_rating {
            Some(mean) => {
                let _ = writeln!(
                    output,
                    "- Mean rating: {:.2} / {:.1} (std dev {:.2})",
                    mean,
                    f64::from(RATING_MAX),
                    summary.std_dev
                );
            }
            None => {
                let _ = writeln!(output, "- Mean rating: N/A");
            }
        }
        let _ = writeln!(
            output,
            "- Top-rated shots (rating {}): {:.1}%",
            RATING_MAX, summary.top_rating_share
        );
        let _ = writeln!(
            output,
            "- Most frequent miss direction: {}",
            summary.common_error.as_deref().unwrap_or("N/A")
        );
        let _ = writeln!(
            output,
            "- Most frequent proximity: {}",
            summary.common_proximity.as_deref().unwrap_or("N/A")
        );

        if !summary.clubs.is_empty() {
            let _ = writeln!(output, "- By {}:", category.field_name(TextField::Club));
            for club in &summary.clubs {
                match club.mean_rating {
                    Some(mean) => {
                        let _ = writeln!(
                            output,
                            "  - {}: {} shots, avg {:.2}, consistency {:.2}",
                            club.club, club.shots, mean, club.std_dev
                        );
                    }
                    None => {
                        let _ = writeln!(
                            output,
                            "  - {}: {} shots, avg N/A",
                            club.club, club.shots
                        );
                    }
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShotDetail;

    fn session() -> Session {
        Session {
            user: "MARIO".to_string(),
            session_name: "Standard Practice".to_string(),
        }
    }

    fn putt(rating: i32) -> ShotRecord {
        ShotRecord {
            user: "MARIO".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10),
            session_name: "Standard Practice".to_string(),
            time: "09:00".to_string(),
            rating: Some(rating),
            detail: ShotDetail::Putting {
                start_distance: "3m".to_string(),
                impact: "Center".to_string(),
                line: "On Line".to_string(),
                speed: "Perfect".to_string(),
                proximity: "Holed".to_string(),
            },
        }
    }

    fn long_shot(error_dir: &str, rating: i32) -> ShotRecord {
        ShotRecord {
            user: "MARIO".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 10),
            session_name: "Standard Practice".to_string(),
            time: "10:00".to_string(),
            rating: Some(rating),
            detail: ShotDetail::LongGame {
                club: "Driver".to_string(),
                impact: "Solid".to_string(),
                trajectory: "Straight".to_string(),
                length: "On Target".to_string(),
                proximity: "< 5m".to_string(),
                error_dir: error_dir.to_string(),
            },
        }
    }

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn header_names_the_athlete_period_and_date() {
        let report = build_report(&session(), "Last week", report_date(), &[]);
        assert!(report.starts_with("# Practice Performance Report"));
        assert!(report.contains("Athlete: MARIO | Period: Last week | Report date: 2024-06-10"));
    }

    #[test]
    fn every_category_section_appears_even_without_data() {
        let report = build_report(&session(), "Lifelong", report_date(), &[]);
        for label in ["## LONG GAME", "## SHORT GAME", "## PUTTING"] {
            assert!(report.contains(label), "missing section {label}");
        }
        assert_eq!(report.matches("No shots recorded in this period.").count(), 3);
    }

    #[test]
    fn putting_section_carries_the_summary_figures() {
        let records = vec![putt(3), putt(3), putt(1)];
        let report = build_report(&session(), "Lifelong", report_date(), &records);

        assert!(report.contains("## PUTTING"));
        assert!(report.contains("- Total shots: 3"));
        assert!(report.contains("- Mean rating: 2.33 / 3.0 (std dev 1.15)"));
        assert!(report.contains("- Top-rated shots (rating 3): 66.7%"));
        assert!(report.contains("- Most frequent proximity: Holed"));
        assert!(report.contains("- By start distance:"));
        assert!(report.contains("  - 3m: 3 shots, avg 2.33, consistency 1.15"));
    }

    #[test]
    fn long_game_section_reports_the_common_miss_direction() {
        let records = vec![
            long_shot("Left", 2),
            long_shot("Left", 1),
            long_shot("Right", 3),
        ];
        let report = build_report(&session(), "Lifelong", report_date(), &records);

        assert!(report.contains("- Most frequent miss direction: Left"));
        assert!(report.contains("- By club:"));
        assert!(report.contains("  - Driver: 3 shots, avg 2.00, consistency 1.00"));
    }

    #[test]
    fn sections_without_applicable_miss_direction_show_na() {
        let records = vec![putt(3)];
        let report = build_report(&session(), "Lifelong", report_date(), &records);
        assert!(report.contains("- Most frequent miss direction: N/A"));
    }
}

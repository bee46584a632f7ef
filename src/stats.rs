use crate::models::{
    Category, CategorySummary, ClubSummary, ShotRecord, TextField, ValueShare, RATING_MAX,
    RATING_MIN,
};

pub fn count(records: &[ShotRecord]) -> usize {
    records.len()
}

pub fn mean_rating(records: &[ShotRecord]) -> Option<f64> {
    let ratings = usable_ratings(records);
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
}

// Sample standard deviation; a degenerate sample has no spread.
pub fn std_dev_rating(records: &[ShotRecord]) -> f64 {
    let ratings = usable_ratings(records);
    if ratings.len() < 2 {
        return 0.0;
    }
    let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
    let variance = ratings
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (ratings.len() - 1) as f64;
    variance.sqrt()
}

pub fn rating_share(records: &[ShotRecord], target: i32) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let matches = records
        .iter()
        .filter(|record| record.scored_rating() == Some(target))
        .count();
    100.0 * matches as f64 / records.len() as f64
}

pub fn distribution(records: &[ShotRecord], field: TextField) -> Vec<ValueShare> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        if let Some(value) = record.text(field) {
            match counts.iter_mut().find(|(seen, _)| seen.as_str() == value) {
                Some((_, count)) => *count += 1,
                None => counts.push((value.to_string(), 1)),
            }
        }
    }
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    counts
        .into_iter()
        .map(|(value, count)| ValueShare {
            value,
            count,
            share: if total == 0 {
                0.0
            } else {
                100.0 * count as f64 / total as f64
            },
        })
        .collect()
}

// Ties keep the first value seen in entry order.
pub fn modal_value(records: &[ShotRecord], field: TextField) -> Option<String> {
    let mut best: Option<(String, usize)> = None;
    for entry in distribution(records, field) {
        let better = match &best {
            Some((_, top)) => entry.count > *top,
            None => true,
        };
        if better {
            best = Some((entry.value, entry.count));
        }
    }
    best.map(|(value, _)| value)
}

pub fn rating_distribution(records: &[ShotRecord]) -> Vec<ValueShare> {
    let scored: Vec<i32> = records
        .iter()
        .filter_map(|record| record.scored_rating())
        .collect();
    let total = scored.len();
    (RATING_MIN..=RATING_MAX)
        .map(|rating| {
            let count = scored.iter().filter(|value| **value == rating).count();
            ValueShare {
                value: rating.to_string(),
                count,
                share: if total == 0 {
                    0.0
                } else {
                    100.0 * count as f64 / total as f64
                },
            }
        })
        .collect()
}

pub fn group_by_club(records: &[ShotRecord]) -> Vec<(String, Vec<ShotRecord>)> {
    let mut groups: Vec<(String, Vec<ShotRecord>)> = Vec::new();
    for record in records {
        let Some(club) = record.text(TextField::Club) else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| name.as_str() == club) {
            Some((_, members)) => members.push(record.clone()),
            None => groups.push((club.to_string(), vec![record.clone()])),
        }
    }
    groups
}

pub fn by_category(records: &[ShotRecord], category: Category) -> Vec<ShotRecord> {
    records
        .iter()
        .filter(|record| record.category() == category)
        .cloned()
        .collect()
}

pub fn summarize_category(category: Category, records: &[ShotRecord]) -> CategorySummary {
    let subset = by_category(records, category);
    let clubs = group_by_club(&subset)
        .into_iter()
        .map(|(club, members)| ClubSummary {
            club,
            shots: count(&members),
            mean_rating: mean_rating(&members),
            std_dev: std_dev_rating(&members),
        })
        .collect();

    CategorySummary {
        category: category.label().to_string(),
        shots: count(&subset),
        mean_rating: mean_rating(&subset),
        std_dev: std_dev_rating(&subset),
        top_rating_share: rating_share(&subset, RATING_MAX),
        common_error: modal_value(&subset, TextField::ErrorDir),
        common_proximity: modal_value(&subset, TextField::Proximity),
        ratings: rating_distribution(&subset),
        impacts: distribution(&subset, TextField::Impact),
        clubs,
    }
}

pub fn summarize_all(records: &[ShotRecord]) -> Vec<CategorySummary> {
    Category::ALL
        .iter()
        .map(|&category| summarize_category(category, records))
        .collect()
}

fn usable_ratings(records: &[ShotRecord]) -> Vec<f64> {
    records
        .iter()
        .filter_map(|record| record.rating_value())
        .collect()
}

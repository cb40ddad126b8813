//! Wellness score aggregation.
//!
//! Four factors (mood, sleep, hydration, work) each score up to 20 points from
//! the entries in the recent window. The final score is the mean of the
//! factors that had at least one entry, rounded to the nearest integer. A
//! factor with no entries is left out of the mean entirely.

use crate::models::hydration::HydrationEntry;
use crate::models::mood::MoodEntry;
use crate::models::sleep::SleepEntry;
use crate::models::work::WorkEntry;

/// Mapped value for labels outside the known mood set.
const NEUTRAL_MOOD_VALUE: f64 = 3.0;
const LITERS_PER_GLASS: f64 = 0.25;

/// Map a mood label onto 1..=5.
pub fn mood_value(label: &str) -> f64 {
    match label {
        "happy" => 5.0,
        "neutral" => 4.0,
        "anxious" => 3.0,
        "sad" => 2.0,
        "angry" => 1.0,
        _ => NEUTRAL_MOOD_VALUE,
    }
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean mapped mood value scaled to 4..=20.
pub fn mood_factor<'a>(labels: impl IntoIterator<Item = &'a str>) -> Option<f64> {
    mean(labels.into_iter().map(mood_value)).map(|avg| avg * 4.0)
}

/// 20 for an average in 7..=9 hours, 15 within 6..=10, else 5.
pub fn sleep_factor(hours: impl IntoIterator<Item = f64>) -> Option<f64> {
    mean(hours).map(|avg| {
        if (7.0..=9.0).contains(&avg) {
            20.0
        } else if (6.0..=10.0).contains(&avg) {
            15.0
        } else {
            5.0
        }
    })
}

/// 20 for at least 2 liters on average, 15 for at least 1, else 5.
pub fn hydration_factor(glasses: impl IntoIterator<Item = f64>) -> Option<f64> {
    mean(glasses).map(|avg| {
        let liters = avg * LITERS_PER_GLASS;
        if liters >= 2.0 {
            20.0
        } else if liters >= 1.0 {
            15.0
        } else {
            5.0
        }
    })
}

/// 20 for an average in 7..=8 hours, 5 above 10 or below 4, else 15.
pub fn work_factor(hours: impl IntoIterator<Item = f64>) -> Option<f64> {
    mean(hours).map(|avg| {
        if (7.0..=8.0).contains(&avg) {
            20.0
        } else if avg > 10.0 || avg < 4.0 {
            5.0
        } else {
            15.0
        }
    })
}

/// Average the contributing factors and round half away from zero. No
/// contributing factors yields 0.
pub fn combine(factors: &[Option<f64>]) -> u8 {
    match mean(factors.iter().flatten().copied()) {
        Some(avg) => avg.round().clamp(0.0, 100.0) as u8,
        None => 0,
    }
}

/// Wellness score in 0..=100 for one user's recent entries.
pub fn calculate_wellness_score(
    mood: &[MoodEntry],
    sleep: &[SleepEntry],
    hydration: &[HydrationEntry],
    work: &[WorkEntry],
) -> u8 {
    combine(&[
        mood_factor(mood.iter().map(|e| e.mood.as_str())),
        sleep_factor(sleep.iter().map(|e| e.hours)),
        hydration_factor(hydration.iter().map(|e| f64::from(e.glasses))),
        work_factor(work.iter().map(|e| e.hours)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mood::MoodKind;
    use chrono::Utc;
    use uuid::Uuid;

    fn mood(kind: MoodKind) -> MoodEntry {
        let now = Utc::now();
        MoodEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: now,
            mood: kind,
            stress: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn work(hours: f64) -> WorkEntry {
        let now = Utc::now();
        WorkEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: now,
            hours,
            tasks_completed: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn sleep(hours: f64) -> SleepEntry {
        let now = Utc::now();
        SleepEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: now,
            hours,
            quality: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn hydration(glasses: i32) -> HydrationEntry {
        let now = Utc::now();
        HydrationEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: now,
            glasses,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_no_factors_scores_zero() {
        assert_eq!(calculate_wellness_score(&[], &[], &[], &[]), 0);
        assert_eq!(combine(&[None, None, None, None]), 0);
    }

    #[test]
    fn test_mood_only() {
        assert_eq!(calculate_wellness_score(&[mood(MoodKind::Happy)], &[], &[], &[]), 20);
        assert_eq!(calculate_wellness_score(&[mood(MoodKind::Angry)], &[], &[], &[]), 4);
    }

    #[test]
    fn test_mood_averages_across_window() {
        // (5 + 2) / 2 = 3.5 -> 14
        let entries = [mood(MoodKind::Happy), mood(MoodKind::Sad)];
        assert_eq!(calculate_wellness_score(&entries, &[], &[], &[]), 14);
    }

    #[test]
    fn test_unrecognized_mood_falls_back_to_neutral_value() {
        assert_eq!(mood_value("ecstatic"), 3.0);
        assert_eq!(mood_factor(["ecstatic"]), Some(12.0));
        assert_eq!(combine(&[mood_factor(["ecstatic"])]), 12);
    }

    #[test]
    fn test_sleep_bands() {
        assert_eq!(sleep_factor([8.0]), Some(20.0));
        assert_eq!(sleep_factor([7.0]), Some(20.0));
        assert_eq!(sleep_factor([9.0]), Some(20.0));
        assert_eq!(sleep_factor([6.5]), Some(15.0));
        assert_eq!(sleep_factor([10.0]), Some(15.0));
        assert_eq!(sleep_factor([5.5]), Some(5.0));
        assert_eq!(sleep_factor([11.0]), Some(5.0));
        // average of 5 and 11 is 8
        assert_eq!(sleep_factor([5.0, 11.0]), Some(20.0));
        assert_eq!(sleep_factor(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_hydration_bands() {
        assert_eq!(hydration_factor([2.0]), Some(5.0));
        assert_eq!(hydration_factor([4.0]), Some(15.0));
        assert_eq!(hydration_factor([8.0]), Some(20.0));
        assert_eq!(hydration_factor([0.0]), Some(5.0));
        assert_eq!(hydration_factor(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_work_bands() {
        assert_eq!(work_factor([7.5]), Some(20.0));
        assert_eq!(work_factor([12.0]), Some(5.0));
        assert_eq!(work_factor([6.0]), Some(15.0));
        assert_eq!(work_factor([3.0]), Some(5.0));
        assert_eq!(work_factor([10.0]), Some(15.0));
        assert_eq!(work_factor(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_missing_factors_do_not_count_toward_divisor() {
        // (20 + 5) / 2 = 12.5 rounds to 13
        let score = calculate_wellness_score(&[mood(MoodKind::Happy)], &[], &[], &[work(12.0)]);
        assert_eq!(score, 13);
    }

    #[test]
    fn test_all_factors() {
        // mood neutral 16, sleep 8h 20, hydration 8 glasses 20, work 9h 15 -> 71 / 4 = 17.75
        let score = calculate_wellness_score(
            &[mood(MoodKind::Neutral)],
            &[sleep(8.0)],
            &[hydration(8)],
            &[work(9.0)],
        );
        assert_eq!(score, 18);
    }

    #[test]
    fn test_score_always_within_bounds() {
        let moods = [
            MoodKind::Happy,
            MoodKind::Sad,
            MoodKind::Neutral,
            MoodKind::Angry,
            MoodKind::Anxious,
        ];
        for kind in moods {
            for hours in [0.0, 3.9, 6.0, 7.5, 9.5, 24.0] {
                for glasses in [0, 3, 4, 8, 40] {
                    let score = calculate_wellness_score(
                        &[mood(kind)],
                        &[sleep(hours)],
                        &[hydration(glasses)],
                        &[work(hours)],
                    );
                    assert!(score <= 100);
                    assert!(score >= 4, "every factor contributes at least 4");
                }
            }
        }
    }
}

//! Calendar-day bookkeeping: daily-quest resets and login streaks.

use chrono::{DateTime, NaiveDate, Utc};

use crate::player::{PlayerRecord, QuestProgress};

/// Whether a daily reset is due.
///
/// Date-only comparison — time of day is irrelevant. A reset that already ran
/// today reports `false`, which is what makes repeated sweeps on the same
/// calendar day no-ops.
pub fn needs_daily_reset(last_reset: Option<NaiveDate>, now: DateTime<Utc>) -> bool {
    match last_reset {
        Some(date) => date < now.date_naive(),
        None => true,
    }
}

/// Reinitialize the player's daily-quest progress map.
///
/// Quest keys are kept; progress, completion, and claim flags are cleared.
pub fn reset_daily_quests(player: &mut PlayerRecord) {
    for progress in player.daily_quests.values_mut() {
        *progress = QuestProgress::default();
    }
}

/// Update login streak bookkeeping for a login at `now`.
///
/// Consecutive calendar days extend the streak, a gap resets it to 1, and a
/// second login on the same day changes nothing. Returns the current streak.
pub fn record_login(player: &mut PlayerRecord, now: DateTime<Utc>) -> u32 {
    let today = now.date_naive();
    let last = player.last_login.map(|t| t.date_naive());

    match last {
        Some(date) if date == today => {}
        Some(date) if date.succ_opt() == Some(today) => {
            player.login_streak += 1;
            player.last_login = Some(now);
        }
        _ => {
            player.login_streak = 1;
            player.last_login = Some(now);
        }
    }

    player.login_streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn reset_due_only_on_new_calendar_day() {
        let now = at(2024, 3, 10, 23);
        assert!(needs_daily_reset(None, now));
        assert!(needs_daily_reset(
            NaiveDate::from_ymd_opt(2024, 3, 9),
            now
        ));
        // Same day, even hours apart: no reset.
        assert!(!needs_daily_reset(
            NaiveDate::from_ymd_opt(2024, 3, 10),
            now
        ));
    }

    #[test]
    fn reset_clears_progress_but_keeps_keys() {
        let mut p = PlayerRecord::new(PlayerId::from("p1"), "Qi Condensation", "Early");
        p.daily_quests.insert(
            "slay-10".into(),
            QuestProgress {
                progress: 7,
                completed: true,
                claimed: true,
            },
        );
        reset_daily_quests(&mut p);
        assert_eq!(p.daily_quests["slay-10"], QuestProgress::default());
    }

    #[test]
    fn streak_extends_resets_and_ignores_same_day() {
        let mut p = PlayerRecord::new(PlayerId::from("p1"), "Qi Condensation", "Early");

        assert_eq!(record_login(&mut p, at(2024, 3, 10, 8)), 1);
        assert_eq!(record_login(&mut p, at(2024, 3, 10, 20)), 1);
        assert_eq!(record_login(&mut p, at(2024, 3, 11, 1)), 2);
        // Two-day gap resets.
        assert_eq!(record_login(&mut p, at(2024, 3, 14, 9)), 1);
    }
}

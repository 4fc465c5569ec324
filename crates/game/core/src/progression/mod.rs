//! Progression engine: leveling math, set bonuses, techniques, achievements,
//! and daily bookkeeping.
//!
//! Everything here is pure and fails closed: a malformed realm/stage never
//! propagates an error into a reward flow, it degrades to the documented safe
//! default instead (level 1, cap 1000, fallback technique).

mod achievements;
mod daily;
mod level;
mod sets;
mod technique;

pub use achievements::check_achievements;
pub use daily::{needs_daily_reset, record_login, reset_daily_quests};
pub use level::{BreakthroughError, attempt_breakthrough, exp_cap_of, grant_exp, level_of};
pub use sets::{compute_set_bonus, total_power_of};
pub use technique::generate_technique;

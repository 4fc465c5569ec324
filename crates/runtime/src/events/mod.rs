//! Topic-based notification events.
//!
//! The core never formats display text; it publishes typed events and the
//! chat front-end subscribes to the topics it renders.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{BattleEvent, DefeatReason, PartyEvent, PlayerReward, WorldEvent};

//! Party lifecycle and membership registry.
//!
//! The registry is the single owner of party state: a case-insensitive name
//! table plus a reverse index (player → party key). Every mutation updates
//! both sides before returning, so the bidirectional consistency invariant
//! holds after any operation sequence.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::player::PlayerId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartyError {
    #[error("a party named '{0}' already exists")]
    NameTaken(String),

    #[error("player is already in a party")]
    AlreadyInParty,

    #[error("player is not in a party")]
    NotInParty,

    #[error("only the party leader may do that")]
    NotLeader,

    #[error("no pending invite to party '{0}'")]
    NotInvited(String),

    #[error("party is full (capacity {0})")]
    PartyFull(usize),

    #[error("no party named '{0}'")]
    PartyNotFound(String),
}

/// Role recorded in the reverse index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyRole {
    Leader,
    Member,
}

/// A party of up to ten players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Display name as given at creation; uniqueness is case-insensitive.
    pub name: String,
    pub leader: PlayerId,
    /// Join order, leader first. Leadership transfers to the first remaining
    /// member when the leader leaves.
    pub members: Vec<PlayerId>,
    pub invites: BTreeSet<PlayerId>,
    pub last_active: DateTime<Utc>,
}

impl Party {
    /// Ready is informational only: no operation gates on it.
    pub fn is_ready(&self) -> bool {
        self.members.len() >= GameConfig::PARTY_READY_THRESHOLD
    }
}

/// Outcome of a leave, so the caller can emit the right notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    LeadershipTransferred { new_leader: PlayerId },
    Disbanded,
}

/// Registry of all parties plus the player → party reverse index.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PartyRegistry {
    /// Keyed by lowercased name.
    parties: HashMap<String, Party>,
    index: HashMap<PlayerId, String>,
}

impl PartyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.to_lowercase()
    }

    /// Create a party led by `leader`.
    pub fn create(
        &mut self,
        leader: &PlayerId,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<&Party, PartyError> {
        let key = Self::key(name);
        if self.parties.contains_key(&key) {
            return Err(PartyError::NameTaken(name.to_string()));
        }
        if self.index.contains_key(leader) {
            return Err(PartyError::AlreadyInParty);
        }

        self.parties.insert(
            key.clone(),
            Party {
                name: name.to_string(),
                leader: leader.clone(),
                members: vec![leader.clone()],
                invites: BTreeSet::new(),
                last_active: now,
            },
        );
        self.index.insert(leader.clone(), key.clone());

        Ok(&self.parties[&key])
    }

    /// Invite `target` to the inviter's party (leader only).
    ///
    /// A target already in any party is a silent no-op; repeated invites are
    /// idempotent. Returns whether a new invite was actually recorded, so the
    /// caller knows whether to announce it.
    pub fn invite(
        &mut self,
        inviter: &PlayerId,
        target: &PlayerId,
        now: DateTime<Utc>,
    ) -> Result<bool, PartyError> {
        let key = self.index.get(inviter).ok_or(PartyError::NotInParty)?.clone();
        let party = self
            .parties
            .get_mut(&key)
            .ok_or_else(|| PartyError::PartyNotFound(key.clone()))?;
        if party.leader != *inviter {
            return Err(PartyError::NotLeader);
        }

        party.last_active = now;
        if self.index.contains_key(target) {
            return Ok(false);
        }
        Ok(party.invites.insert(target.clone()))
    }

    /// Join a party by name, consuming a pending invite.
    pub fn join(
        &mut self,
        player: &PlayerId,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<&Party, PartyError> {
        if self.index.contains_key(player) {
            return Err(PartyError::AlreadyInParty);
        }
        let key = Self::key(name);
        let party = self
            .parties
            .get_mut(&key)
            .ok_or_else(|| PartyError::PartyNotFound(name.to_string()))?;

        if !party.invites.contains(player) {
            return Err(PartyError::NotInvited(name.to_string()));
        }
        if party.members.len() >= GameConfig::PARTY_CAPACITY {
            return Err(PartyError::PartyFull(GameConfig::PARTY_CAPACITY));
        }

        party.invites.remove(player);
        party.members.push(player.clone());
        party.last_active = now;
        self.index.insert(player.clone(), key.clone());

        Ok(&self.parties[&key])
    }

    /// Leave the current party.
    ///
    /// A leaving leader hands leadership to the first remaining member; the
    /// last member leaving deletes the party. The reverse-index entry is
    /// removed unconditionally.
    pub fn leave(
        &mut self,
        player: &PlayerId,
        now: DateTime<Utc>,
    ) -> Result<(String, LeaveOutcome), PartyError> {
        let key = self.index.remove(player).ok_or(PartyError::NotInParty)?;
        let Some(party) = self.parties.get_mut(&key) else {
            // Index said we were in a party that no longer exists; the entry
            // is gone now either way.
            return Err(PartyError::NotInParty);
        };

        let name = party.name.clone();
        party.members.retain(|m| m != player);
        party.last_active = now;

        if party.members.is_empty() {
            self.parties.remove(&key);
            return Ok((name, LeaveOutcome::Disbanded));
        }

        if party.leader == *player {
            let new_leader = party.members[0].clone();
            party.leader = new_leader.clone();
            return Ok((name, LeaveOutcome::LeadershipTransferred { new_leader }));
        }

        Ok((name, LeaveOutcome::Left))
    }

    /// Disband the whole party (leader only). Returns the removed members.
    pub fn disband(&mut self, leader: &PlayerId) -> Result<(String, Vec<PlayerId>), PartyError> {
        let key = self.index.get(leader).ok_or(PartyError::NotInParty)?.clone();
        let party = self
            .parties
            .get(&key)
            .ok_or_else(|| PartyError::PartyNotFound(key.clone()))?;
        if party.leader != *leader {
            return Err(PartyError::NotLeader);
        }

        let Some(party) = self.parties.remove(&key) else {
            return Err(PartyError::PartyNotFound(key));
        };
        for member in &party.members {
            self.index.remove(member);
        }
        Ok((party.name, party.members))
    }

    /// Party a player currently belongs to.
    pub fn party_of(&self, player: &PlayerId) -> Option<&Party> {
        let key = self.index.get(player)?;
        self.parties.get(key)
    }

    /// Membership with the role recorded for the reverse index.
    pub fn membership(&self, player: &PlayerId) -> Option<(&Party, PartyRole)> {
        let party = self.party_of(player)?;
        let role = if party.leader == *player {
            PartyRole::Leader
        } else {
            PartyRole::Member
        };
        Some((party, role))
    }

    /// Case-insensitive lookup by name.
    pub fn get(&self, name: &str) -> Option<&Party> {
        self.parties.get(&Self::key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Party> {
        self.parties.values()
    }

    /// Remove empty or inactive parties, clearing member index entries.
    ///
    /// Returns the display names of removed parties.
    pub fn cleanup(&mut self, now: DateTime<Utc>, inactivity: Duration) -> Vec<String> {
        let stale: Vec<String> = self
            .parties
            .iter()
            .filter(|(_, p)| p.members.is_empty() || now - p.last_active > inactivity)
            .map(|(key, _)| key.clone())
            .collect();

        let mut removed = Vec::new();
        for key in stale {
            if let Some(party) = self.parties.remove(&key) {
                for member in &party.members {
                    self.index.remove(member);
                }
                removed.push(party.name);
            }
        }
        removed
    }

    /// Merge another registry's parties into this one, overwriting matching
    /// keys. Used by snapshot restore.
    ///
    /// Replacing a party first drops the old roster's index entries, so
    /// members absent from the incoming version never dangle in the index.
    pub fn merge(&mut self, other: PartyRegistry) {
        for (key, party) in other.parties {
            if let Some(replaced) = self.parties.remove(&key) {
                for member in &replaced.members {
                    if self.index.get(member) == Some(&key) {
                        self.index.remove(member);
                    }
                }
            }
            for member in &party.members {
                self.index.insert(member.clone(), key.clone());
            }
            self.parties.insert(key, party);
        }
    }

    /// Bidirectional consistency between index and member lists.
    ///
    /// Exposed for tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        let forward = self.index.iter().all(|(player, key)| {
            self.parties
                .get(key)
                .is_some_and(|p| p.members.contains(player))
        });
        let backward = self.parties.iter().all(|(key, party)| {
            party.members.contains(&party.leader)
                && party
                    .members
                    .iter()
                    .all(|m| self.index.get(m) == Some(key))
        });
        forward && backward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn registry_with_party(members: &[&str]) -> PartyRegistry {
        let mut reg = PartyRegistry::new();
        let leader = PlayerId::from(members[0]);
        reg.create(&leader, "Heaven Seekers", now()).expect("create");
        for member in &members[1..] {
            let id = PlayerId::from(*member);
            reg.invite(&leader, &id, now()).expect("invite");
            reg.join(&id, "heaven seekers", now()).expect("join");
        }
        reg
    }

    #[test]
    fn create_rejects_case_insensitive_collision() {
        let mut reg = PartyRegistry::new();
        reg.create(&PlayerId::from("a"), "Heaven Seekers", now())
            .expect("create");
        assert_eq!(
            reg.create(&PlayerId::from("b"), "HEAVEN SEEKERS", now())
                .unwrap_err(),
            PartyError::NameTaken("HEAVEN SEEKERS".into())
        );
    }

    #[test]
    fn create_rejects_player_already_partied() {
        let mut reg = registry_with_party(&["a"]);
        assert_eq!(
            reg.create(&PlayerId::from("a"), "Other", now()).unwrap_err(),
            PartyError::AlreadyInParty
        );
    }

    #[test]
    fn invite_requires_leader() {
        let mut reg = registry_with_party(&["a", "b"]);
        assert_eq!(
            reg.invite(&PlayerId::from("b"), &PlayerId::from("c"), now())
                .unwrap_err(),
            PartyError::NotLeader
        );
    }

    #[test]
    fn invite_to_already_partied_target_is_noop() {
        let mut reg = registry_with_party(&["a", "b"]);
        reg.create(&PlayerId::from("x"), "Others", now()).expect("create");
        let recorded = reg
            .invite(&PlayerId::from("a"), &PlayerId::from("x"), now())
            .expect("no-op invite");
        assert!(!recorded);
        assert!(reg.get("Heaven Seekers").unwrap().invites.is_empty());
    }

    #[test]
    fn invite_reports_whether_recorded() {
        let mut reg = registry_with_party(&["a"]);
        let leader = PlayerId::from("a");
        let target = PlayerId::from("b");

        assert!(reg.invite(&leader, &target, now()).expect("invite"));
        // Repeating the invite adds nothing.
        assert!(!reg.invite(&leader, &target, now()).expect("repeat invite"));
    }

    #[test]
    fn join_requires_invite() {
        let mut reg = registry_with_party(&["a"]);
        assert_eq!(
            reg.join(&PlayerId::from("b"), "Heaven Seekers", now())
                .unwrap_err(),
            PartyError::NotInvited("Heaven Seekers".into())
        );
    }

    #[test]
    fn join_respects_capacity() {
        let mut reg = PartyRegistry::new();
        let leader = PlayerId::from("p0");
        reg.create(&leader, "Full House", now()).expect("create");
        for i in 1..GameConfig::PARTY_CAPACITY {
            let id = PlayerId::new(format!("p{i}"));
            reg.invite(&leader, &id, now()).expect("invite");
            reg.join(&id, "Full House", now()).expect("join");
        }
        let extra = PlayerId::from("extra");
        reg.invite(&leader, &extra, now()).expect("invite");
        assert_eq!(
            reg.join(&extra, "Full House", now()).unwrap_err(),
            PartyError::PartyFull(GameConfig::PARTY_CAPACITY)
        );
    }

    #[test]
    fn leader_leaving_transfers_to_earliest_member() {
        let mut reg = registry_with_party(&["a", "b", "c"]);
        let (_, outcome) = reg.leave(&PlayerId::from("a"), now()).expect("leave");
        assert_eq!(
            outcome,
            LeaveOutcome::LeadershipTransferred {
                new_leader: PlayerId::from("b")
            }
        );
        assert_eq!(reg.get("Heaven Seekers").unwrap().leader, PlayerId::from("b"));
        assert!(reg.is_consistent());
    }

    #[test]
    fn last_member_leaving_deletes_party() {
        let mut reg = registry_with_party(&["a"]);
        let (_, outcome) = reg.leave(&PlayerId::from("a"), now()).expect("leave");
        assert_eq!(outcome, LeaveOutcome::Disbanded);
        assert!(reg.get("Heaven Seekers").is_none());
        assert!(reg.is_consistent());
    }

    #[test]
    fn consistency_holds_across_operation_sequences() {
        let mut reg = registry_with_party(&["a", "b", "c"]);
        assert!(reg.is_consistent());

        reg.leave(&PlayerId::from("b"), now()).expect("leave");
        assert!(reg.is_consistent());

        let d = PlayerId::from("d");
        reg.invite(&PlayerId::from("a"), &d, now()).expect("invite");
        reg.join(&d, "Heaven Seekers", now()).expect("join");
        assert!(reg.is_consistent());

        reg.leave(&PlayerId::from("a"), now()).expect("leave");
        assert!(reg.is_consistent());

        reg.disband(&PlayerId::from("c")).expect("disband");
        assert!(reg.is_consistent());
        assert!(reg.party_of(&d).is_none());
    }

    #[test]
    fn merge_overwrite_drops_replaced_members_from_index() {
        let mut reg = registry_with_party(&["a", "b", "c"]);

        // Incoming version of the same party has shed two members.
        let mut other = PartyRegistry::new();
        other
            .create(&PlayerId::from("a"), "Heaven Seekers", now())
            .expect("create");

        reg.merge(other);
        assert!(reg.is_consistent());
        assert_eq!(reg.get("Heaven Seekers").unwrap().members.len(), 1);
        assert!(reg.party_of(&PlayerId::from("b")).is_none());
        assert!(reg.party_of(&PlayerId::from("c")).is_none());
    }

    #[test]
    fn cleanup_removes_inactive_parties() {
        let start = now();
        let mut reg = PartyRegistry::new();
        reg.create(&PlayerId::from("a"), "Stale", start).expect("create");
        reg.create(&PlayerId::from("b"), "Fresh", start + Duration::hours(2))
            .expect("create");

        let removed = reg.cleanup(start + Duration::hours(2), Duration::hours(1));
        assert_eq!(removed, vec!["Stale".to_string()]);
        assert!(reg.party_of(&PlayerId::from("a")).is_none());
        assert!(reg.get("Fresh").is_some());
        assert!(reg.is_consistent());
    }
}

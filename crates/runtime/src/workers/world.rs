//! World worker that owns the authoritative mutable registries.
//!
//! Receives commands from [`RuntimeHandle`] and the battle loops, mutates
//! parties / boss timers / active battles in one place, and publishes events
//! to the EventBus. Because every mutation is a command, battle rounds,
//! challenges, and maintenance sweeps observe each other in a strict order
//! and no update can be lost to interleaving.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use game_core::{
    BattleMember, BossOracle, CultivationOracle, GameConfig, Party, PartyError, PartyRegistry,
    PlayerId, PlayerRecord, Technique, attack_damage, attempt_breakthrough, check_achievements,
    completes_boss_set, counter_attack, generate_technique, grant_exp, needs_daily_reset,
    record_login, reset_daily_quests, roll_drop, split_rewards, total_power_of,
};

use super::{Command, RoundOutcome, battle_loop};
use crate::api::{Result, RuntimeError};
use crate::events::{BattleEvent, DefeatReason, Event, EventBus, PartyEvent, PlayerReward, WorldEvent};
use crate::oracle::OracleManager;
use crate::repository::{PlayerRepository, SnapshotRepository};
use crate::runtime::RuntimeConfig;
use crate::types::{BattleHandle, BattleState, BossState, BossStatus, WorldSnapshot};

/// Background task that owns all mutable world state.
pub(crate) struct WorldWorker {
    players: Arc<dyn PlayerRepository>,
    snapshots: Arc<dyn SnapshotRepository>,
    oracles: OracleManager,
    config: RuntimeConfig,
    command_rx: mpsc::Receiver<Command>,
    /// Cloned into battle loops so rounds flow back through the queue.
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    parties: PartyRegistry,
    /// Lowercased boss name → last spawn time.
    boss_timers: HashMap<String, DateTime<Utc>>,
    /// Lowercased boss name → in-flight battle.
    battles: HashMap<String, BattleState>,
    battle_tasks: HashMap<String, JoinHandle<()>>,
    last_daily_reset: Option<NaiveDate>,
    rng: StdRng,
}

impl WorldWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        players: Arc<dyn PlayerRepository>,
        snapshots: Arc<dyn SnapshotRepository>,
        oracles: OracleManager,
        config: RuntimeConfig,
        command_rx: mpsc::Receiver<Command>,
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        restored: WorldSnapshot,
    ) -> Self {
        info!(
            parties = restored.parties.iter().count(),
            battles = restored.battles.len(),
            "world worker initialized"
        );

        Self {
            players,
            snapshots,
            oracles,
            config,
            command_rx,
            command_tx,
            event_bus,
            parties: restored.parties,
            boss_timers: restored.boss_timers,
            battles: restored.battles,
            battle_tasks: HashMap::new(),
            last_daily_reset: restored.last_daily_reset,
            rng: StdRng::from_entropy(),
        }
    }

    /// Main worker loop. Restored battles get their round loops back first,
    /// with deadlines measured from the persisted start time.
    pub(crate) async fn run(mut self) {
        let now = Utc::now();
        let restored: Vec<(String, DateTime<Utc>)> = self
            .battles
            .iter()
            .map(|(key, battle)| (key.clone(), battle.started_at))
            .collect();
        for (key, started_at) in restored {
            debug!(boss = %key, "respawning battle loop from snapshot");
            self.spawn_battle_task(&key, started_at, now);
        }

        loop {
            let Some(cmd) = self.command_rx.recv().await else {
                break;
            };
            if self.handle_command(cmd) {
                break;
            }
        }
    }

    /// Returns `true` when the worker should shut down.
    fn handle_command(&mut self, cmd: Command) -> bool {
        let now = Utc::now();
        match cmd {
            Command::RegisterPlayer { id, race, reply } => {
                let result = self.handle_register(id, race, now);
                if reply.send(result).is_err() {
                    debug!("RegisterPlayer reply channel closed (caller dropped)");
                }
            }
            Command::GetPlayer { id, reply } => {
                let result = self.load_player(&id);
                if reply.send(result).is_err() {
                    debug!("GetPlayer reply channel closed (caller dropped)");
                }
            }
            Command::RecordLogin { id, reply } => {
                let result = self.handle_login(&id, now);
                if reply.send(result).is_err() {
                    debug!("RecordLogin reply channel closed (caller dropped)");
                }
            }
            Command::Breakthrough { id, reply } => {
                let result = self.handle_breakthrough(&id);
                if reply.send(result).is_err() {
                    debug!("Breakthrough reply channel closed (caller dropped)");
                }
            }
            Command::LearnTechnique { id, reply } => {
                let result = self.handle_learn_technique(&id);
                if reply.send(result).is_err() {
                    debug!("LearnTechnique reply channel closed (caller dropped)");
                }
            }
            Command::CreateParty {
                leader,
                name,
                reply,
            } => {
                let result = self.handle_create_party(&leader, &name, now);
                if reply.send(result).is_err() {
                    debug!("CreateParty reply channel closed (caller dropped)");
                }
            }
            Command::InviteToParty {
                inviter,
                target,
                reply,
            } => {
                let result = self.handle_invite(&inviter, &target, now);
                if reply.send(result).is_err() {
                    debug!("InviteToParty reply channel closed (caller dropped)");
                }
            }
            Command::JoinParty {
                player,
                name,
                reply,
            } => {
                let result = self.handle_join(&player, &name, now);
                if reply.send(result).is_err() {
                    debug!("JoinParty reply channel closed (caller dropped)");
                }
            }
            Command::LeaveParty { player, reply } => {
                let result = self.handle_leave(&player, now);
                if reply.send(result).is_err() {
                    debug!("LeaveParty reply channel closed (caller dropped)");
                }
            }
            Command::DisbandParty { leader, reply } => {
                let result = self.handle_disband(&leader);
                if reply.send(result).is_err() {
                    debug!("DisbandParty reply channel closed (caller dropped)");
                }
            }
            Command::PartyInfo { player, reply } => {
                if reply.send(self.parties.party_of(&player).cloned()).is_err() {
                    debug!("PartyInfo reply channel closed (caller dropped)");
                }
            }
            Command::ChallengeBoss {
                player,
                boss_name,
                reply,
            } => {
                let result = self.handle_challenge(&player, &boss_name, now);
                if reply.send(result).is_err() {
                    debug!("ChallengeBoss reply channel closed (caller dropped)");
                }
            }
            Command::WorldBossStatus { reply } => {
                if reply.send(self.handle_boss_status(now)).is_err() {
                    debug!("WorldBossStatus reply channel closed (caller dropped)");
                }
            }
            Command::BattleRound { boss_key, reply } => {
                let outcome = self.resolve_round(&boss_key);
                // A closed reply means the battle loop died; drop the record
                // so the boss is not stuck in-battle forever.
                if reply.send(outcome).is_err() {
                    warn!(boss = %boss_key, "battle loop gone, cancelling battle");
                    self.cancel_battle(&boss_key);
                }
            }
            Command::BattleTimeout { boss_key } => {
                self.handle_battle_timeout(&boss_key);
            }
            Command::SpawnCheck => self.handle_spawn_check(now),
            Command::Maintenance => self.handle_maintenance(now),
            Command::DailyReset { reply } => {
                let result = self.handle_daily_reset(now);
                if reply.send(result).is_err() {
                    debug!("DailyReset reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => {
                info!("world worker shutting down");
                for (_, task) in self.battle_tasks.drain() {
                    task.abort();
                }
                self.save_snapshot();
                let _ = reply.send(());
                return true;
            }
        }
        false
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    fn load_player(&self, id: &PlayerId) -> Result<PlayerRecord> {
        self.players
            .get(id)?
            .ok_or_else(|| RuntimeError::PlayerNotFound(id.clone()))
    }

    fn handle_register(
        &mut self,
        id: PlayerId,
        race: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<PlayerRecord> {
        if self.players.exists(&id) {
            return Err(RuntimeError::AlreadyRegistered(id));
        }
        if let Some(race) = race.as_deref()
            && !self.oracles.races().iter().any(|r| r.name == race)
        {
            return Err(RuntimeError::UnknownRace(race.to_string()));
        }

        let (realm, stage) = self.oracles.starting_point().ok_or(RuntimeError::EmptyCatalog)?;
        let mut record = PlayerRecord::new(id, realm, stage);
        record.race = race;
        record_login(&mut record, now);

        self.players.put(&record)?;
        info!(player = %record.id, "registered new player");
        Ok(record)
    }

    fn handle_login(&mut self, id: &PlayerId, now: DateTime<Utc>) -> Result<PlayerRecord> {
        let mut record = self.load_player(id)?;
        record_login(&mut record, now);

        let env = self.oracles.as_world_env();
        check_achievements(&mut record, env.achievements, env.cultivation, env.set_bonuses);

        self.players.put(&record)?;
        Ok(record)
    }

    fn handle_breakthrough(&mut self, id: &PlayerId) -> Result<PlayerRecord> {
        let mut record = self.load_player(id)?;
        attempt_breakthrough(&mut record, &self.oracles)?;

        let env = self.oracles.as_world_env();
        check_achievements(&mut record, env.achievements, env.cultivation, env.set_bonuses);

        self.players.put(&record)?;
        info!(player = %record.id, realm = %record.realm, stage = %record.stage, "breakthrough");
        Ok(record)
    }

    fn handle_learn_technique(&mut self, id: &PlayerId) -> Result<Technique> {
        let record = self.load_player(id)?;
        let realm_idx = self.oracles.realm_index(&record.realm).unwrap_or(0);
        let stage_idx = self
            .oracles
            .stage_index(&record.realm, &record.stage)
            .unwrap_or(0);
        Ok(generate_technique(
            realm_idx,
            stage_idx,
            &self.oracles,
            &mut self.rng,
        ))
    }

    // ------------------------------------------------------------------
    // Parties
    // ------------------------------------------------------------------

    fn handle_create_party(
        &mut self,
        leader: &PlayerId,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Party> {
        if !self.players.exists(leader) {
            return Err(RuntimeError::PlayerNotFound(leader.clone()));
        }
        let party = self.parties.create(leader, name, now)?.clone();
        self.event_bus.publish(Event::Party(PartyEvent::Created {
            party_name: party.name.clone(),
            leader: leader.clone(),
        }));
        Ok(party)
    }

    fn handle_invite(
        &mut self,
        inviter: &PlayerId,
        target: &PlayerId,
        now: DateTime<Utc>,
    ) -> Result<()> {
        // Only announce invites that were actually recorded; no-op invites
        // (target already partied, repeats) stay silent.
        if self.parties.invite(inviter, target, now)? {
            let party_name = self
                .parties
                .party_of(inviter)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            self.event_bus.publish(Event::Party(PartyEvent::InviteSent {
                party_name,
                target: target.clone(),
            }));
        }
        Ok(())
    }

    fn handle_join(&mut self, player: &PlayerId, name: &str, now: DateTime<Utc>) -> Result<Party> {
        let party = self.parties.join(player, name, now)?.clone();
        self.event_bus.publish(Event::Party(PartyEvent::MemberJoined {
            party_name: party.name.clone(),
            player: player.clone(),
        }));
        Ok(party)
    }

    fn handle_leave(&mut self, player: &PlayerId, now: DateTime<Utc>) -> Result<()> {
        let (party_name, outcome) = self.parties.leave(player, now)?;
        self.event_bus.publish(Event::Party(PartyEvent::MemberLeft {
            party_name: party_name.clone(),
            player: player.clone(),
        }));
        match outcome {
            game_core::LeaveOutcome::Left => {}
            game_core::LeaveOutcome::LeadershipTransferred { new_leader } => {
                self.event_bus
                    .publish(Event::Party(PartyEvent::LeadershipTransferred {
                        party_name,
                        new_leader,
                    }));
            }
            game_core::LeaveOutcome::Disbanded => {
                self.event_bus
                    .publish(Event::Party(PartyEvent::Disbanded { party_name }));
            }
        }
        Ok(())
    }

    fn handle_disband(&mut self, leader: &PlayerId) -> Result<()> {
        let (party_name, _members) = self.parties.disband(leader)?;
        self.event_bus
            .publish(Event::Party(PartyEvent::Disbanded { party_name }));
        Ok(())
    }

    // ------------------------------------------------------------------
    // World bosses
    // ------------------------------------------------------------------

    fn handle_challenge(
        &mut self,
        player: &PlayerId,
        boss_name: &str,
        now: DateTime<Utc>,
    ) -> Result<BattleHandle> {
        if !self.players.exists(player) {
            return Err(RuntimeError::PlayerNotFound(player.clone()));
        }
        let party = self.parties.party_of(player).ok_or(PartyError::NotInParty)?;
        if party.leader != *player {
            return Err(PartyError::NotLeader.into());
        }
        let party_name = party.name.clone();
        let members: Vec<BattleMember> = party
            .members
            .iter()
            .map(|p| BattleMember::new(p.clone(), GameConfig::MEMBER_BATTLE_HP))
            .collect();

        let boss = self
            .oracles
            .boss_by_name(boss_name)
            .ok_or_else(|| RuntimeError::BossNotFound(boss_name.to_string()))?
            .clone();
        let key = boss.name.to_lowercase();

        let spawned = self.boss_timers.get(&key).is_some_and(|spawn_time| {
            let elapsed = (now - *spawn_time).num_seconds();
            elapsed >= 0 && elapsed as u64 <= boss.spawn_interval_secs
        });
        if !spawned {
            return Err(RuntimeError::BossNotSpawned(boss.name.clone()));
        }
        if let Some(existing) = self.battles.get(&key) {
            return Err(RuntimeError::BossAlreadyEngaged {
                boss: boss.name.clone(),
                party: existing.party_name.clone(),
            });
        }

        let handle = BattleHandle {
            boss_name: boss.name.clone(),
            party_name: party_name.clone(),
            members: members.len(),
        };
        self.event_bus.publish(Event::Battle(BattleEvent::Started {
            boss_name: boss.name.clone(),
            party_name: party_name.clone(),
            members: members.iter().map(|m| m.player.clone()).collect(),
        }));
        self.battles.insert(
            key.clone(),
            BattleState {
                boss_name: boss.name.clone(),
                party_name,
                boss_health: boss.max_health,
                members,
                round: 0,
                started_at: now,
            },
        );
        self.spawn_battle_task(&key, now, now);

        info!(boss = %boss.name, party = %handle.party_name, "battle started");
        Ok(handle)
    }

    fn handle_boss_status(&self, now: DateTime<Utc>) -> Vec<BossStatus> {
        self.oracles
            .bosses()
            .iter()
            .map(|boss| {
                let key = boss.name.to_lowercase();
                let state = if let Some(battle) = self.battles.get(&key) {
                    BossState::InBattle {
                        percent_hp: battle.boss_health as f64 * 100.0
                            / boss.max_health.max(1) as f64,
                    }
                } else {
                    match self.boss_timers.get(&key) {
                        Some(spawn_time) => {
                            let elapsed = (now - *spawn_time).num_seconds().max(0) as u64;
                            if elapsed <= boss.spawn_interval_secs {
                                BossState::Spawned {
                                    secs_until_despawn: boss.spawn_interval_secs - elapsed,
                                }
                            } else {
                                BossState::Dormant { secs_until_spawn: 0 }
                            }
                        }
                        None => BossState::Dormant { secs_until_spawn: 0 },
                    }
                };
                BossStatus {
                    name: boss.name.clone(),
                    flavor: boss.flavor.clone(),
                    level: boss.level,
                    state,
                }
            })
            .collect()
    }

    fn handle_spawn_check(&mut self, now: DateTime<Utc>) {
        let bosses: Vec<(String, u64)> = self
            .oracles
            .bosses()
            .iter()
            .map(|b| (b.name.clone(), b.spawn_interval_secs))
            .collect();

        for (name, interval_secs) in bosses {
            let key = name.to_lowercase();
            // A boss mid-battle keeps its current spawn window.
            if self.battles.contains_key(&key) {
                continue;
            }
            let due = match self.boss_timers.get(&key) {
                None => true,
                Some(spawn_time) => (now - *spawn_time).num_seconds() >= interval_secs as i64,
            };
            if due {
                self.boss_timers.insert(key, now);
                info!(boss = %name, "world boss spawned");
                self.event_bus
                    .publish(Event::World(WorldEvent::BossSpawned { boss_name: name }));
            }
        }
    }

    // ------------------------------------------------------------------
    // Battle rounds
    // ------------------------------------------------------------------

    fn spawn_battle_task(&mut self, boss_key: &str, started_at: DateTime<Utc>, now: DateTime<Utc>) {
        let elapsed = (now - started_at).to_std().unwrap_or_default();
        let remaining = self.config.battle_deadline.saturating_sub(elapsed);
        let task = tokio::spawn(battle_loop(
            boss_key.to_string(),
            self.command_tx.clone(),
            self.config.round_delay,
            remaining,
        ));
        if let Some(old) = self.battle_tasks.insert(boss_key.to_string(), task) {
            old.abort();
        }
    }

    fn resolve_round(&mut self, boss_key: &str) -> RoundOutcome {
        let Some(battle) = self.battles.get_mut(boss_key) else {
            self.battle_tasks.remove(boss_key);
            // Events carry the catalog display name, not the registry key.
            let boss_name = self
                .oracles
                .boss_by_name(boss_key)
                .map(|b| b.name.clone())
                .unwrap_or_else(|| boss_key.to_string());
            self.event_bus.publish(Event::Battle(BattleEvent::Defeat {
                boss_name,
                reason: DefeatReason::Cancelled,
            }));
            return RoundOutcome::Finished;
        };
        let Some(boss) = self.oracles.boss_by_name(&battle.boss_name).cloned() else {
            warn!(boss = %battle.boss_name, "boss vanished from catalog, cancelling battle");
            self.cancel_battle(boss_key);
            return RoundOutcome::Finished;
        };

        battle.round += 1;
        let mut party_damage = 0u64;
        for member in battle.members.iter_mut().filter(|m| m.alive()) {
            // A store outage means this member sits the round out; the
            // in-memory battle stays coherent either way.
            let power = match self.players.get(&member.player) {
                Ok(Some(record)) => record.total_power,
                Ok(None) => {
                    warn!(player = %member.player, "battle member has no record, skipping");
                    continue;
                }
                Err(e) => {
                    warn!(player = %member.player, error = %e, "player store unavailable this round");
                    continue;
                }
            };
            let damage = attack_damage(power, boss.weakness, &mut self.rng);
            member.damage_dealt += damage;
            party_damage += damage;
        }
        battle.boss_health = battle.boss_health.saturating_sub(party_damage);

        if battle.boss_health == 0 {
            self.event_bus.publish(Event::Battle(BattleEvent::RoundUpdate {
                boss_name: battle.boss_name.clone(),
                round: battle.round,
                boss_health: 0,
                max_health: boss.max_health,
                party_damage,
                counter_target: None,
                counter_damage: None,
            }));
            self.finalize_victory(boss_key, &boss.name);
            return RoundOutcome::Finished;
        }

        let counter = counter_attack(&mut battle.members, boss.damage, &mut self.rng);
        let (counter_target, counter_damage) = match counter {
            Some((target, damage)) => (Some(target), Some(damage)),
            None => (None, None),
        };
        self.event_bus.publish(Event::Battle(BattleEvent::RoundUpdate {
            boss_name: battle.boss_name.clone(),
            round: battle.round,
            boss_health: battle.boss_health,
            max_health: boss.max_health,
            party_damage,
            counter_target,
            counter_damage,
        }));

        if battle.living_members() == 0 {
            let boss_name = battle.boss_name.clone();
            self.battles.remove(boss_key);
            self.battle_tasks.remove(boss_key);
            info!(boss = %boss_name, "party wiped");
            self.event_bus.publish(Event::Battle(BattleEvent::Defeat {
                boss_name,
                reason: DefeatReason::PartyWiped,
            }));
            return RoundOutcome::Finished;
        }

        RoundOutcome::Continue
    }

    /// Distribute victory rewards and drop the battle record.
    ///
    /// A store failure for one survivor skips that survivor only; the battle
    /// entry is removed regardless so the boss is never wedged in-battle.
    fn finalize_victory(&mut self, boss_key: &str, boss_name: &str) {
        self.battle_tasks.remove(boss_key);
        let Some(battle) = self.battles.remove(boss_key) else {
            return;
        };
        let Some(boss) = self.oracles.boss_by_name(boss_name).cloned() else {
            return;
        };

        let shares = split_rewards(boss.rewards, &battle.members);
        let mut rewards = Vec::with_capacity(shares.len());
        for (player, share) in shares {
            let mut record = match self.players.get(&player) {
                Ok(Some(record)) => record,
                Ok(None) => {
                    warn!(player = %player, "survivor has no record, skipping reward");
                    continue;
                }
                Err(e) => {
                    warn!(player = %player, error = %e, "store unavailable, skipping reward");
                    continue;
                }
            };

            let env = self.oracles.as_world_env();
            grant_exp(&mut record, share.exp, env.cultivation);
            record.qi += share.qi;
            record.spirit_stones += share.spirit_stones;
            record.record_boss_kill(&boss.name);

            let drop = roll_drop(&boss.drop_table, &mut self.rng);
            let mut full_set_bonus = None;
            if let Some(item) = drop.clone() {
                let set = item.set.clone();
                let had_set = set
                    .as_deref()
                    .is_some_and(|s| completes_boss_set(&record.equipment, &boss, s));
                record.equipment.push(item);
                if let Some(set) = set.as_deref()
                    && !had_set
                    && completes_boss_set(&record.equipment, &boss, set)
                {
                    record.base_power += boss.full_set_bonus;
                    full_set_bonus = Some(boss.full_set_bonus);
                }
            }

            let achievements =
                check_achievements(&mut record, env.achievements, env.cultivation, env.set_bonuses);
            record.total_power = total_power_of(&record, env.set_bonuses);

            if let Err(e) = self.players.put(&record) {
                warn!(player = %player, error = %e, "failed to persist reward, skipping");
                continue;
            }

            rewards.push(PlayerReward {
                player,
                exp: share.exp,
                qi: share.qi,
                spirit_stones: share.spirit_stones,
                drop,
                full_set_bonus,
                achievements,
            });
        }

        info!(boss = %boss.name, party = %battle.party_name, rounds = battle.round, "boss defeated");
        self.event_bus.publish(Event::Battle(BattleEvent::Victory {
            boss_name: boss.name.clone(),
            rewards,
        }));
    }

    fn handle_battle_timeout(&mut self, boss_key: &str) {
        self.battle_tasks.remove(boss_key);
        if let Some(battle) = self.battles.remove(boss_key) {
            info!(boss = %battle.boss_name, "battle deadline elapsed");
            self.event_bus.publish(Event::Battle(BattleEvent::Defeat {
                boss_name: battle.boss_name,
                reason: DefeatReason::Timeout,
            }));
        }
    }

    fn cancel_battle(&mut self, boss_key: &str) {
        if let Some(task) = self.battle_tasks.remove(boss_key) {
            task.abort();
        }
        if let Some(battle) = self.battles.remove(boss_key) {
            self.event_bus.publish(Event::Battle(BattleEvent::Defeat {
                boss_name: battle.boss_name,
                reason: DefeatReason::Cancelled,
            }));
        }
    }

    // ------------------------------------------------------------------
    // Maintenance
    // ------------------------------------------------------------------

    fn handle_maintenance(&mut self, now: DateTime<Utc>) {
        let inactivity = chrono::Duration::from_std(self.config.party_inactivity)
            .unwrap_or_else(|_| chrono::Duration::hours(1));
        let removed = self.parties.cleanup(now, inactivity);
        if !removed.is_empty() {
            info!(count = removed.len(), "cleaned up inactive parties");
            self.event_bus
                .publish(Event::World(WorldEvent::PartiesCleaned { removed }));
        }

        if let Err(e) = self.handle_daily_reset(now) {
            warn!(error = %e, "daily reset sweep failed, will retry next pass");
        }

        self.save_snapshot();
    }

    /// Runs at most once per calendar-day transition.
    fn handle_daily_reset(&mut self, now: DateTime<Utc>) -> Result<bool> {
        if !needs_daily_reset(self.last_daily_reset, now) {
            return Ok(false);
        }

        let ids = self.players.list_ids()?;
        for id in ids {
            match self.players.get(&id) {
                Ok(Some(mut record)) => {
                    reset_daily_quests(&mut record);
                    if let Err(e) = self.players.put(&record) {
                        warn!(player = %id, error = %e, "failed to reset daily quests");
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(player = %id, error = %e, "failed to load player for reset"),
            }
        }

        self.last_daily_reset = Some(now.date_naive());
        info!(date = %now.date_naive(), "daily reset complete");
        self.event_bus.publish(Event::World(WorldEvent::DailyReset));
        Ok(true)
    }

    fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            parties: self.parties.clone(),
            boss_timers: self.boss_timers.clone(),
            battles: self.battles.clone(),
            last_daily_reset: self.last_daily_reset,
        }
    }

    fn save_snapshot(&self) {
        if let Err(e) = self.snapshots.save(&self.snapshot()) {
            warn!(error = %e, "failed to save world snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;
    use crate::repository::{InMemoryPlayerRepo, InMemorySnapshotRepo};

    fn test_worker(bus: EventBus) -> WorldWorker {
        let (tx, rx) = mpsc::channel(8);
        WorldWorker::new(
            Arc::new(InMemoryPlayerRepo::new()),
            Arc::new(InMemorySnapshotRepo::new()),
            OracleManager::new(game_content::builtin()),
            RuntimeConfig::default(),
            rx,
            tx,
            bus,
            WorldSnapshot::default(),
        )
    }

    #[test]
    fn cancelled_round_for_missing_battle_uses_catalog_name() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(Topic::Battle);
        let mut worker = test_worker(bus.clone());

        // A round arriving for a battle that no longer exists finishes the
        // loop and announces the cancellation under the display name, even
        // though the round command carries the lowercased key.
        let outcome = worker.resolve_round("flame tyrant");
        assert!(matches!(outcome, RoundOutcome::Finished));

        match rx.try_recv().expect("defeat event") {
            Event::Battle(BattleEvent::Defeat { boss_name, reason }) => {
                assert_eq!(reason, DefeatReason::Cancelled);
                assert_eq!(boss_name, "Flame Tyrant");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}

//! The round engine: lifecycle, spawn window and role assignment wired
//! together behind [`RoundEventHandler`].

use laterjoin_types::{ParticipantId, Role, Team};
use laterjoin_window::{SpawnWindow, WindowLength};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    EngineConfig, HazardState, Host, PickupVerdict, RespawnQueue, RoleAssigner, RolePool,
    RoundError, RoundEventHandler, RoundLifecycle, RoundPhase, SpawnLedger, SpawnOutcome,
    TeamPicker,
};

/// Whether the engine is active after a configuration reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadState {
    /// Disabled, effective immediately.
    DisabledNow,
    /// Enabled, effective from the next round.
    EnabledNextRound,
}

/// Serializable view of the engine's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub spawn_allowed: bool,
    pub hazards: HazardState,
    pub pool: Vec<Role>,
    pub granted_participants: usize,
    pub granted_teams: Vec<Team>,
    pub elapsed_secs: f64,
    pub disabled: bool,
    pub disabled_this_round: bool,
}

/// The later-join engine for one game server.
///
/// Owns every piece of per-round state. All methods run on the host's
/// event thread; the only thing shared with another thread is the spawn
/// window's timer, which touches nothing but the window's atomic word.
pub struct RoundEngine {
    config: EngineConfig,
    lifecycle: RoundLifecycle,
    window: SpawnWindow,
    hazards: HazardState,
    pool: RolePool,
    ledger: SpawnLedger,
    picker: TeamPicker,
    rng: StdRng,
    disabled_this_round: bool,
}

impl RoundEngine {
    /// Creates an engine. Bad role entries in `config` are logged and
    /// skipped.
    ///
    /// The spawn window starts closed; it opens at the first
    /// waiting-for-players event.
    pub fn new(config: EngineConfig) -> Self {
        report_config_errors(&config);
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            lifecycle: RoundLifecycle::default(),
            window: SpawnWindow::new(WindowLength::from_seconds(config.spawn_window_seconds)),
            hazards: HazardState::default(),
            pool: RolePool::new(config.scp_roster()),
            ledger: SpawnLedger::new(),
            picker: picker_for(&config),
            rng,
            disabled_this_round: config.disabled,
            config,
        }
    }

    /// Creates an engine from a JSON configuration document.
    ///
    /// # Errors
    /// Returns [`RoundError::Config`] if the document cannot be parsed.
    pub fn from_json_str(json: &str) -> Result<Self, RoundError> {
        Ok(Self::new(EngineConfig::from_json_str(json)?))
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.lifecycle.phase()
    }

    pub fn hazards(&self) -> HazardState {
        self.hazards
    }

    pub fn pool(&self) -> &RolePool {
        &self.pool
    }

    pub fn ledger(&self) -> &SpawnLedger {
        &self.ledger
    }

    pub fn is_spawn_allowed(&self) -> bool {
        self.window.is_allowed()
    }

    pub fn is_disabled_this_round(&self) -> bool {
        self.disabled_this_round
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.lifecycle.phase(),
            spawn_allowed: self.window.is_allowed(),
            hazards: self.hazards,
            pool: self.pool.roles().to_vec(),
            granted_participants: self.ledger.participant_count(),
            granted_teams: self.ledger.teams().to_vec(),
            elapsed_secs: self.lifecycle.clock().elapsed().as_secs_f64(),
            disabled: self.config.disabled,
            disabled_this_round: self.disabled_this_round,
        }
    }

    // -----------------------------------------------------------------
    // Role resolution
    // -----------------------------------------------------------------

    /// Resolves a role for the next spawn without granting it.
    ///
    /// Returns [`Role::Unassigned`] if nothing could be resolved.
    pub fn resolve_role(&mut self) -> Role {
        let assigner = RoleAssigner {
            picker: &self.picker,
            pool: &self.pool,
            hazards: self.hazards,
            granted: self.ledger.teams(),
        };
        assigner.resolve(&mut self.rng)
    }

    /// Runs the join path for `participant`.
    pub fn attempt_spawn(&mut self, host: &mut dyn Host, participant: ParticipantId) -> SpawnOutcome {
        if self.disabled_this_round {
            return SpawnOutcome::Disabled;
        }

        if !self.lifecycle.phase().has_round_started() && !self.config.explore_before_round {
            debug!(%participant, "round not started, leaving spawn to the host");
            return SpawnOutcome::Deferred;
        }

        if !self.window.is_allowed() {
            debug!(%participant, "spawn is no longer allowed");
            host.change_role(participant, Role::Spectator);
            return SpawnOutcome::WindowClosed;
        }

        if self.ledger.contains(participant) {
            debug!(%participant, "already spawned this round");
            host.change_role(participant, Role::Spectator);
            return SpawnOutcome::Duplicate;
        }

        let role = self.resolve_role();
        if role == Role::Unassigned {
            info!(%participant, "participant is unlucky, no role resolved");
            host.change_role(participant, Role::Spectator);
            return SpawnOutcome::Unlucky;
        }

        info!(%participant, %role, "granting role");
        host.change_role(participant, role);
        self.record_grant(participant, role);
        SpawnOutcome::Granted(role)
    }

    /// Accounts for `participant` now holding `role`: the first time a
    /// role is seen for them it leaves the pool if it is an SCP, and the
    /// participant's first grant of the round enters the ledger.
    ///
    /// Returns `false` if the role was already accounted for.
    fn record_grant(&mut self, participant: ParticipantId, role: Role) -> bool {
        let Some(team) = role.team() else {
            return false;
        };
        if !self.ledger.note_role(participant, role) {
            return false;
        }
        if role.is_scp() {
            self.pool.remove_one(role);
        }
        self.ledger.try_grant(participant, team);
        true
    }

    fn arm_window(&mut self) -> Result<bool, RoundError> {
        Ok(self.window.arm()?)
    }

    // -----------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------

    /// Turns the engine off now: sets the master switch, disables the
    /// current round and closes the spawn window.
    pub fn disable_now(&mut self) {
        self.config.disabled = true;
        self.disabled_this_round = true;
        self.window.close();
        info!("later join disabled");
    }

    /// Clears the master switch. Takes effect at the next round reset.
    pub fn enable_next_round(&mut self) {
        self.config.disabled = false;
        info!("later join enabled from next round");
    }

    /// Replaces the configuration.
    ///
    /// Pool and queue changes apply from the next round. A disabled
    /// configuration disables the engine immediately.
    pub fn reload(&mut self, config: EngineConfig) -> ReloadState {
        report_config_errors(&config);
        self.pool.set_roster(config.scp_roster());
        self.picker = picker_for(&config);
        self.window
            .set_length(WindowLength::from_seconds(config.spawn_window_seconds));
        if let Some(seed) = config.rng_seed.filter(|seed| Some(*seed) != self.config.rng_seed) {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.config = config;
        info!("configuration reloaded");

        if self.config.disabled {
            self.disable_now();
            ReloadState::DisabledNow
        } else {
            ReloadState::EnabledNextRound
        }
    }
}

impl RoundEventHandler for RoundEngine {
    fn on_waiting_for_players(&mut self, host: &mut dyn Host) {
        self.lifecycle.enter(RoundPhase::WaitingForPlayers);
        self.ledger.reset();
        self.hazards.reset();
        self.pool.reset();
        self.window.open();
        self.disabled_this_round = self.config.disabled;
        host.set_door_locked(&self.config.exploit_door, true);
        info!(
            pool = self.pool.len(),
            disabled = self.disabled_this_round,
            "waiting for players, round state reset"
        );
    }

    fn on_pre_round_start(&mut self, _host: &mut dyn Host) {
        self.lifecycle.enter(RoundPhase::PreRound);
        debug!("pre-round started");
    }

    fn on_round_start(&mut self, host: &mut dyn Host) {
        self.lifecycle.enter(RoundPhase::InProgress);
        host.set_door_locked(&self.config.exploit_door, false);
        if self.disabled_this_round {
            info!("round started, later join disabled this round");
            return;
        }
        match self.arm_window() {
            Ok(true) => info!(secs = self.config.spawn_window_seconds, "round started, spawn window armed"),
            Ok(false) if self.window.is_allowed() => info!("round started, spawn window never closes"),
            Ok(false) => info!("round started, spawn window already closed"),
            Err(e) => warn!(error = %e, "round started without a spawn window timer"),
        }
    }

    fn on_round_end(&mut self, _host: &mut dyn Host) {
        if !self.lifecycle.past_grace() {
            warn!(
                elapsed_ms = self.lifecycle.clock().elapsed().as_millis() as u64,
                "ignoring round end fired right after round start"
            );
            return;
        }
        self.window.close();
        self.ledger.reset();
        self.lifecycle.enter(RoundPhase::Ended);
        info!("round ended");
    }

    fn on_participant_join(&mut self, host: &mut dyn Host, participant: ParticipantId) -> SpawnOutcome {
        self.attempt_spawn(host, participant)
    }

    fn on_role_set(&mut self, host: &mut dyn Host, participant: ParticipantId, role: Role) -> Option<Role> {
        if self.disabled_this_round {
            return None;
        }

        if role.is_playable() {
            // Assignment by the host: book it so late joiners rotate past
            // it, and take a reassigned SCP out of the pool even when the
            // participant already spawned this round.
            if self.lifecycle.is_settling() && self.record_grant(participant, role) {
                debug!(%participant, %role, "host assignment recorded");
            }
            return None;
        }

        if role != Role::Spectator {
            return None;
        }
        if self.lifecycle.past_grace() {
            debug!(%participant, "straggler left as spectator");
            return None;
        }
        if !self.config.explore_before_round {
            return None;
        }

        match self.attempt_spawn(host, participant) {
            SpawnOutcome::Granted(role) => Some(role),
            _ => None,
        }
    }

    fn on_item_pickup(&mut self, _host: &mut dyn Host, participant: ParticipantId) -> PickupVerdict {
        if self.disabled_this_round
            || !self.config.explore_before_round
            || self.lifecycle.phase().has_round_started()
        {
            return PickupVerdict::Allow;
        }
        debug!(%participant, "item pickup denied before round start");
        PickupVerdict::Deny
    }

    fn on_decontaminate(&mut self, _host: &mut dyn Host) {
        let removed = self.pool.remove_all(Role::DECONTAMINATION_AFFECTED);
        self.hazards.mark_decontaminated();
        info!(removed, "light containment decontaminated");
    }

    fn on_detonate(&mut self, _host: &mut dyn Host) {
        self.pool.clear();
        self.hazards.mark_detonated();
        info!("warhead detonated, SCP pool cleared");
    }
}

fn picker_for(config: &EngineConfig) -> TeamPicker {
    TeamPicker::new(
        RespawnQueue::parse(&config.team_respawn_queue),
        config.filler_team(),
        config.smart_team_picker,
    )
}

fn report_config_errors(config: &EngineConfig) {
    for e in config.role_entry_errors() {
        error!(error = %e, "configuration error, entry skipped");
    }
    if config.filler_team().is_none() {
        warn!(id = config.filler_team_id, "filler team id names no team");
    }
}

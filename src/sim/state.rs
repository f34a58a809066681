//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; there is no ambient
//! state anywhere else in the crate.

use std::collections::{HashMap, VecDeque};

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Menu,
    /// Active gameplay
    Playing,
    /// Round decided, waiting for restart
    GameOver,
}

/// Seat of a player in the duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// What a bound key does for its player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Request a new heading (unit vector on one axis)
    Move(IVec2),
    /// Fire the laser if armed
    Shoot,
}

/// Key symbol to action table for one player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Controls {
    bindings: HashMap<String, Action>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, key: &str, action: Action) -> Self {
        self.bindings.insert(key.to_string(), action);
        self
    }

    pub fn action(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Arrow keys to steer, space to shoot
    pub fn arrows() -> Self {
        Self::new()
            .bind("ArrowLeft", Action::Move(IVec2::new(-1, 0)))
            .bind("ArrowUp", Action::Move(IVec2::new(0, -1)))
            .bind("ArrowRight", Action::Move(IVec2::new(1, 0)))
            .bind("ArrowDown", Action::Move(IVec2::new(0, 1)))
            .bind(" ", Action::Shoot)
    }

    /// WASD to steer, `e` to shoot
    pub fn wasd() -> Self {
        Self::new()
            .bind("a", Action::Move(IVec2::new(-1, 0)))
            .bind("w", Action::Move(IVec2::new(0, -1)))
            .bind("d", Action::Move(IVec2::new(1, 0)))
            .bind("s", Action::Move(IVec2::new(0, 1)))
            .bind("e", Action::Shoot)
    }
}

/// Fruit variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FruitKind {
    /// Grows the tail and scores a point
    Regular,
    /// Temporary faster move cadence
    Speed,
    /// Arms one laser shot
    Laser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fruit {
    pub pos: IVec2,
    pub kind: FruitKind,
}

/// A projectile in flight, moving a fraction of a cell per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
    /// Unit vector, exactly one axis nonzero
    pub vel: Vec2,
}

impl Laser {
    /// Cell the laser currently occupies
    pub fn cell(&self) -> IVec2 {
        Grid::cell_of(self.pos)
    }
}

/// A snake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub pos: IVec2,
    pub vel: IVec2,
    /// Velocity used by the most recent step (zero before the first step)
    pub last_vel: IVec2,
    /// Occupied cells, head first
    pub tail: VecDeque<IVec2>,
    pub max_tail: usize,
    pub score: u32,
    /// Absolute time (ms) the speed boost ends, 0 when inactive
    pub speed_boost_end: f64,
    /// Current step interval (ms)
    pub current_speed: f64,
    pub has_laser: bool,
    pub laser: Option<Laser>,
    pub controls: Controls,
}

impl Player {
    pub fn new(id: PlayerId, tuning: &Tuning) -> Self {
        let pos = tuning.spawn_points()[id.index()];
        let (name, color, controls) = match id {
            PlayerId::One => ("Player 1", "green", Controls::arrows()),
            PlayerId::Two => ("Player 2", "blue", Controls::wasd()),
        };
        Self {
            id,
            name: name.to_string(),
            color: color.to_string(),
            pos,
            vel: IVec2::ZERO,
            last_vel: IVec2::ZERO,
            tail: VecDeque::from([pos]),
            max_tail: tuning.initial_tail_length,
            score: 0,
            speed_boost_end: 0.0,
            current_speed: tuning.normal_speed,
            has_laser: false,
            laser: None,
            controls,
        }
    }

    pub fn head(&self) -> IVec2 {
        self.tail.front().copied().unwrap_or(self.pos)
    }

    pub fn is_stationary(&self) -> bool {
        self.vel == IVec2::ZERO
    }

    /// True if any trail segment covers `cell`
    pub fn occupies(&self, cell: IVec2) -> bool {
        self.tail.contains(&cell)
    }

    pub fn speed_boost_active(&self) -> bool {
        self.speed_boost_end > 0.0
    }

    /// Direction the snake is really travelling in: the last step taken, or the
    /// requested velocity if it has not stepped yet
    pub fn heading(&self) -> IVec2 {
        if self.last_vel != IVec2::ZERO {
            self.last_vel
        } else {
            self.vel
        }
    }

    /// Color name with a capital first letter
    pub fn display_color(&self) -> String {
        let mut chars = self.color.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(PlayerId),
    Draw,
}

/// Things that happened during a tick, for hosts that react to them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FruitCollected {
        player: PlayerId,
        kind: FruitKind,
    },
    ScoreChanged {
        player: PlayerId,
        score: u32,
    },
    SpeedBoostExpired { player: PlayerId },
    LaserFired { player: PlayerId },
    LaserExpired { player: PlayerId },
    RoundOver { outcome: Outcome },
}

/// Timestamps driving per-player move cadence and render throttling (ms)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoopClock {
    pub last_move: [f64; 2],
    pub last_render: f64,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub grid: Grid,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Indexed by [`PlayerId::index`]
    pub players: [Player; 2],
    /// Insertion order matters for pickup resolution
    pub fruits: Vec<Fruit>,
    pub clock: LoopClock,
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Create a state in the menu phase. Call [`GameState::reset`] to start playing.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let grid = Grid::new(tuning.tile_count);
        let players = [
            Player::new(PlayerId::One, &tuning),
            Player::new(PlayerId::Two, &tuning),
        ];
        Self {
            grid,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            players,
            fruits: Vec::new(),
            clock: LoopClock::default(),
            outcome: None,
            tuning,
        }
    }

    /// Fresh players, fresh fruit, clocks at zero, phase `Playing`
    pub fn reset(&mut self) {
        self.players = [
            Player::new(PlayerId::One, &self.tuning),
            Player::new(PlayerId::Two, &self.tuning),
        ];
        self.clock = LoopClock::default();
        self.outcome = None;
        self.fruits.clear();
        self.phase = GamePhase::Playing;
        super::fruit::spawn_fruit(self);
        log::info!("Round started with {} fruits", self.fruits.len());
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Mutable access to a player and its opponent at the same time
    pub fn player_and_opponent_mut(&mut self, id: PlayerId) -> (&mut Player, &mut Player) {
        let [one, two] = &mut self.players;
        match id {
            PlayerId::One => (one, two),
            PlayerId::Two => (two, one),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// End the round. Later calls keep the first outcome.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.outcome = Some(outcome);
        log::info!("Round over: {:?}", outcome);
        true
    }

    /// Terminal banner text, once the round is decided
    pub fn outcome_message(&self) -> Option<String> {
        self.outcome.map(|outcome| match outcome {
            Outcome::Winner(id) => format!("{} Player Wins!", self.player(id).display_color()),
            Outcome::Draw => "Draw!".to_string(),
        })
    }
}

//! The immutable per-tick snapshot handed to rendering and audio
//! collaborators.

use bevy_ecs::query::{With, Without};
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};
use glam::Vec2;

use crate::map::builder::Maze;
use crate::map::direction::Direction;
use crate::map::tile::Tile;
use crate::systems::attack::AttackWave;
use crate::systems::bonus::{Bonus, BonusState};
use crate::systems::components::{GameData, Ghost, GhostName, GhostState, HiscoreRecord, PacMan, PacManState, Regime};
use crate::systems::controller::GameStage;
use crate::systems::movement::Actor;

/// One-shot sound cues emitted during the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    AtePellet,
    AteEnergizer,
    AteGhost,
    AteFruit,
    ExtraLife,
    PacManDied,
    LevelComplete,
    IntroComplete,
}

/// Cues collected while systems run, drained into the snapshot at tick end.
#[derive(Resource, Debug, Default)]
pub struct CueBuffer(Vec<AudioCue>);

impl CueBuffer {
    pub fn push(&mut self, cue: AudioCue) {
        self.0.push(cue);
    }
}

/// Kinematic view of one actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorView {
    pub tile: Tile,
    /// Pixel offset of the collision box inside its tile.
    pub offset: Vec2,
    pub direction: Direction,
    pub visible: bool,
}

impl ActorView {
    fn of(actor: &Actor) -> ActorView {
        ActorView {
            tile: actor.tile(),
            offset: actor.tile_offset(),
            direction: actor.move_dir,
            visible: actor.visible,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacManView {
    pub actor: ActorView,
    pub state: PacManState,
    pub power_ticks: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GhostView {
    pub actor: ActorView,
    pub name: GhostName,
    pub state: GhostState,
    pub next_state: Regime,
    pub target: Option<Tile>,
    pub path: Vec<Tile>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusView {
    pub symbol: crate::level::BonusSymbol,
    pub state: BonusState,
    pub remaining_ticks: u32,
    pub tile: Tile,
}

/// Everything a collaborator may observe about one tick.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub level: u32,
    pub score: u32,
    pub hiscore: HiscoreRecord,
    pub lives: u32,
    pub food_remaining: u32,
    pub stage: GameStage,
    pub regime: Regime,
    pub regime_ticks: Option<u32>,
    pub pacman: PacManView,
    pub ghosts: Vec<GhostView>,
    pub bonus: BonusView,
    pub cues: Vec<AudioCue>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot {
            tick: 0,
            level: 1,
            score: 0,
            hiscore: HiscoreRecord::default(),
            lives: 0,
            food_remaining: 0,
            stage: GameStage::Intro,
            regime: Regime::Scattering,
            regime_ticks: None,
            pacman: PacManView {
                actor: ActorView {
                    tile: Tile::new(0, 0),
                    offset: Vec2::ZERO,
                    direction: Direction::Left,
                    visible: false,
                },
                state: PacManState::InBed,
                power_ticks: 0,
            },
            ghosts: Vec::new(),
            bonus: BonusView {
                symbol: crate::level::BonusSymbol::Cherries,
                state: BonusState::Inactive,
                remaining_ticks: 0,
                tile: Tile::new(0, 0),
            },
            cues: Vec::new(),
        }
    }
}

/// Builds the tick's snapshot; runs last in the schedule.
#[allow(clippy::too_many_arguments)]
pub fn snapshot_system(
    data: Res<GameData>,
    stage: Res<GameStage>,
    maze: Res<Maze>,
    wave: Res<AttackWave>,
    bonus: Res<Bonus>,
    mut cues: ResMut<CueBuffer>,
    pacman: Query<(&PacMan, &Actor), With<PacMan>>,
    ghosts: Query<(&Ghost, &Actor), Without<PacMan>>,
    mut snapshot: ResMut<Snapshot>,
) {
    let pacman_view = pacman
        .single()
        .map(|(pac, actor)| PacManView {
            actor: ActorView::of(actor),
            state: pac.state,
            power_ticks: pac.power,
        })
        .unwrap_or(snapshot.pacman);

    let mut ghost_views: Vec<GhostView> = ghosts
        .iter()
        .map(|(ghost, actor)| GhostView {
            actor: ActorView::of(actor),
            name: ghost.name,
            state: ghost.state,
            next_state: ghost.next_state,
            target: ghost.target,
            path: ghost.path.clone(),
        })
        .collect();
    ghost_views.sort_by_key(|view| view.name);

    *snapshot = Snapshot {
        tick: data.tick,
        level: data.level,
        score: data.score,
        hiscore: data.hiscore,
        lives: data.lives,
        food_remaining: maze.food_remaining(),
        stage: *stage,
        regime: wave.regime(),
        regime_ticks: wave.remaining_ticks(),
        pacman: pacman_view,
        ghosts: ghost_views,
        bonus: BonusView {
            symbol: bonus.symbol,
            state: bonus.state,
            remaining_ticks: bonus.remaining_ticks(),
            tile: maze.bonus_seat,
        },
        cues: std::mem::take(&mut cues.0),
    };
}

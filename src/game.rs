//! The `Game` struct: world construction, the tick schedule, and the public
//! command/snapshot interface.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::{schedule::Schedule, world::World};

use crate::commands::{CommandQueue, GameCommand, InputIntent};
use crate::config::Config;
use crate::error::GameResult;
use crate::events::GameEvent;
use crate::map::builder::Maze;
use crate::map::direction::Direction;
use crate::rng::GameRng;
use crate::snapshot::{snapshot_system, CueBuffer, Snapshot};
use crate::systems::attack::{attack_wave_system, AttackWave};
use crate::systems::bonus::{bonus_system, Bonus};
use crate::systems::collision::collision_system;
use crate::systems::command::command_system;
use crate::systems::components::{GameData, Ghost, GhostBundle, GhostName, PacMan, PacManBundle};
use crate::systems::controller::{controller_system, GameStage, IntroGate};
use crate::systems::ghost::ghost_system;
use crate::systems::house::{doorman_system, Doorman};
use crate::systems::movement::Actor;
use crate::systems::pacman::pacman_system;
use crate::systems::scoring::scoring_system;

/// The whole simulation: a `bevy_ecs` world plus one deterministic schedule.
///
/// Each call to [`Game::tick`] advances the fixed-step clock by one tick and
/// returns the snapshot collaborators render from.
pub struct Game {
    pub world: World,
    schedule: Schedule,
}

impl Game {
    pub fn new(config: Config) -> GameResult<Game> {
        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameEvent>(&mut world);

        let maze = Maze::new()?;
        let wave = AttackWave::new(1);

        // Park the cast on their seats; the controller re-seats them when a
        // round actually starts.
        let mut pac_actor = Actor::new();
        pac_actor.park_on(&maze.pacman_seat);
        world.spawn(PacManBundle {
            pacman: PacMan::new(),
            actor: pac_actor,
        });

        for name in GhostName::ALL {
            let bed = match name {
                GhostName::Blinky => &maze.house.entry,
                GhostName::Pinky => &maze.house.pinky_bed,
                GhostName::Inky => &maze.house.inky_bed,
                GhostName::Clyde => &maze.house.clyde_bed,
            };
            let mut actor = Actor::new();
            actor.park_on(bed);
            world.spawn(GhostBundle {
                ghost: Ghost::new(name),
                actor,
            });
        }

        world.insert_resource(GameRng::from_seed(config.seed));
        world.insert_resource(Doorman::new(1));
        world.insert_resource(wave);
        world.insert_resource(maze);
        world.insert_resource(GameData::new());
        world.insert_resource(GameStage::Intro);
        world.insert_resource(IntroGate::default());
        world.insert_resource(Bonus::new());
        world.insert_resource(CommandQueue::default());
        world.insert_resource(InputIntent::default());
        world.insert_resource(CueBuffer::default());
        world.insert_resource(Snapshot::default());
        world.insert_resource(config);

        // The fixed per-tick order; every system sees a consistent prefix.
        schedule.add_systems(
            (
                command_system,
                controller_system,
                pacman_system,
                attack_wave_system,
                doorman_system,
                ghost_system,
                bonus_system,
                collision_system,
                scoring_system,
                snapshot_system,
            )
                .chain(),
        );

        Ok(Game { world, schedule })
    }

    /// Queues a one-shot command for the next tick boundary.
    pub fn queue_command(&mut self, command: GameCommand) {
        self.world.resource_mut::<CommandQueue>().0.push(command);
    }

    /// Sets Pac-Man's direction intent, as a held key would.
    pub fn set_direction_intent(&mut self, dir: Option<Direction>) {
        self.world.resource_mut::<InputIntent>().0 = dir;
    }

    /// Advances the simulation one tick and returns the resulting snapshot.
    pub fn tick(&mut self) -> Snapshot {
        // Age out the event buffers: events written during the previous
        // tick's drain stay readable for exactly one more tick.
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.schedule.run(&mut self.world);
        self.world.resource::<Snapshot>().clone()
    }

    /// The last snapshot produced.
    pub fn snapshot(&self) -> &Snapshot {
        self.world.resource::<Snapshot>()
    }

    /// The configured clock frequency, for the driving loop.
    pub fn frequency(&self) -> u32 {
        self.world.resource::<Config>().frequency
    }

    pub fn config(&self) -> &Config {
        self.world.resource::<Config>()
    }
}

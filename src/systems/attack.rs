//! The attack-wave timer: the alternating scatter/chase schedule.

use bevy_ecs::event::EventWriter;
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use tracing::debug;

use crate::constants::sec;
use crate::events::GameEvent;
use crate::systems::components::Regime;
use crate::systems::controller::GameStage;

/// One scatter or chase phase; `None` duration means "until further notice".
type Phase = (Regime, Option<u32>);

/// Level-indexed schedule of alternating scatter/chase phases.
///
/// The timer pauses while Pac-Man is powerful and resumes with the remaining
/// duration of the interrupted phase.
#[derive(Resource, Debug)]
pub struct AttackWave {
    phases: [Phase; 8],
    index: usize,
    remaining: Option<u32>,
    pub suspended: bool,
}

fn schedule(level: u32) -> [Phase; 8] {
    use Regime::{Chasing, Scattering};

    match level {
        1 => [
            (Scattering, Some(sec(7.0))),
            (Chasing, Some(sec(20.0))),
            (Scattering, Some(sec(7.0))),
            (Chasing, Some(sec(20.0))),
            (Scattering, Some(sec(5.0))),
            (Chasing, Some(sec(20.0))),
            (Scattering, Some(sec(5.0))),
            (Chasing, None),
        ],
        2..=4 => [
            (Scattering, Some(sec(7.0))),
            (Chasing, Some(sec(20.0))),
            (Scattering, Some(sec(7.0))),
            (Chasing, Some(sec(20.0))),
            (Scattering, Some(sec(5.0))),
            (Chasing, Some(sec(20.0))),
            (Scattering, Some(1)),
            (Chasing, None),
        ],
        _ => [
            (Scattering, Some(sec(5.0))),
            (Chasing, Some(sec(20.0))),
            (Scattering, Some(sec(5.0))),
            (Chasing, Some(sec(20.0))),
            (Scattering, Some(sec(5.0))),
            (Chasing, Some(sec(20.0))),
            (Scattering, Some(1)),
            (Chasing, None),
        ],
    }
}

impl AttackWave {
    pub fn new(level: u32) -> AttackWave {
        let phases = schedule(level);
        AttackWave {
            phases,
            index: 0,
            remaining: phases[0].1,
            suspended: false,
        }
    }

    /// Restarts the schedule for a level.
    pub fn init(&mut self, level: u32) {
        *self = AttackWave::new(level);
    }

    /// The regime ghosts should currently follow.
    pub fn regime(&self) -> Regime {
        self.phases[self.index].0
    }

    /// Ticks left in the current phase; `None` for the final infinite chase.
    pub fn remaining_ticks(&self) -> Option<u32> {
        self.remaining
    }

    /// Advances the timer one tick; returns the new regime on a phase change.
    fn tick(&mut self) -> Option<Regime> {
        let remaining = self.remaining?;
        if remaining > 1 {
            self.remaining = Some(remaining - 1);
            return None;
        }
        self.index = (self.index + 1).min(self.phases.len() - 1);
        self.remaining = self.phases[self.index].1;
        Some(self.regime())
    }
}

/// Runs the attack-wave timer and announces phase changes on the bus.
pub fn attack_wave_system(stage: Res<GameStage>, mut wave: ResMut<AttackWave>, mut events: EventWriter<GameEvent>) {
    if *stage != GameStage::Playing || wave.suspended {
        return;
    }
    if let Some(regime) = wave.tick() {
        debug!(?regime, phase = wave.index, "Attack wave phase change");
        events.write(match regime {
            Regime::Scattering => GameEvent::StartScattering,
            Regime::Chasing => GameEvent::StartChasing,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_schedule() {
        let mut wave = AttackWave::new(1);
        assert_eq!(wave.regime(), Regime::Scattering);
        assert_eq!(wave.remaining_ticks(), Some(sec(7.0)));

        // Run out the first scatter phase
        for _ in 0..sec(7.0) - 1 {
            assert_eq!(wave.tick(), None);
        }
        assert_eq!(wave.tick(), Some(Regime::Chasing));
        assert_eq!(wave.remaining_ticks(), Some(sec(20.0)));
    }

    #[test]
    fn test_final_chase_is_infinite() {
        let mut wave = AttackWave::new(1);
        let total: u32 = sec(7.0) + sec(20.0) + sec(7.0) + sec(20.0) + sec(5.0) + sec(20.0) + sec(5.0);
        for _ in 0..total {
            wave.tick();
        }
        assert_eq!(wave.regime(), Regime::Chasing);
        assert_eq!(wave.remaining_ticks(), None);
        for _ in 0..1000 {
            assert_eq!(wave.tick(), None);
        }
        assert_eq!(wave.regime(), Regime::Chasing);
    }

    #[test]
    fn test_late_levels_have_one_tick_scatter() {
        let mut wave = AttackWave::new(2);
        // Skip to the penultimate phase
        while wave.index < 6 {
            wave.tick();
        }
        assert_eq!(wave.regime(), Regime::Scattering);
        assert_eq!(wave.remaining_ticks(), Some(1));
        assert_eq!(wave.tick(), Some(Regime::Chasing));
        assert_eq!(wave.remaining_ticks(), None);
    }

    #[test]
    fn test_elapsed_prefix_matches_schedule() {
        // The elapsed tick sum equals the scheduled prefix.
        let mut wave = AttackWave::new(5);
        let mut elapsed = 0u32;
        let mut changes = Vec::new();
        for _ in 0..sec(60.0) {
            elapsed += 1;
            if let Some(regime) = wave.tick() {
                changes.push((elapsed, regime));
            }
        }
        assert_eq!(
            changes[..4],
            [
                (sec(5.0), Regime::Chasing),
                (sec(25.0), Regime::Scattering),
                (sec(30.0), Regime::Chasing),
                (sec(50.0), Regime::Scattering),
            ]
        );
    }
}

//! The bonus fruit at the seat below the house.

use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Res, ResMut};
use tracing::debug;

use crate::level::BonusSymbol;
use crate::systems::controller::GameStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusState {
    Inactive,
    /// Edible, for a jittered window of roughly nine seconds.
    Active { remaining: u32 },
    /// Eaten; the score number stays visible briefly.
    Consumed { remaining: u32 },
}

/// The current bonus: symbol and value come from the level table when the
/// pellet milestones activate it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Bonus {
    pub state: BonusState,
    pub symbol: BonusSymbol,
    pub value: u32,
}

impl Bonus {
    pub fn new() -> Bonus {
        Bonus {
            state: BonusState::Inactive,
            symbol: BonusSymbol::Cherries,
            value: 0,
        }
    }

    pub fn clear(&mut self) {
        self.state = BonusState::Inactive;
    }

    pub fn activate(&mut self, symbol: BonusSymbol, value: u32, display_ticks: u32) {
        self.symbol = symbol;
        self.value = value;
        self.state = BonusState::Active {
            remaining: display_ticks,
        };
        debug!(symbol = symbol.as_ref(), value, display_ticks, "Bonus activated");
    }

    pub fn consume(&mut self, display_ticks: u32) {
        self.state = BonusState::Consumed {
            remaining: display_ticks,
        };
    }

    pub const fn is_active(&self) -> bool {
        matches!(self.state, BonusState::Active { .. })
    }

    pub fn remaining_ticks(&self) -> u32 {
        match self.state {
            BonusState::Inactive => 0,
            BonusState::Active { remaining } | BonusState::Consumed { remaining } => remaining,
        }
    }
}

impl Default for Bonus {
    fn default() -> Self {
        Bonus::new()
    }
}

/// Counts down the bonus display windows.
pub fn bonus_system(stage: Res<GameStage>, mut bonus: ResMut<Bonus>) {
    if !stage.is_playing() {
        return;
    }
    bonus.state = match bonus.state {
        BonusState::Inactive => BonusState::Inactive,
        BonusState::Active { remaining } => {
            if remaining > 1 {
                BonusState::Active {
                    remaining: remaining - 1,
                }
            } else {
                debug!("Bonus expired uneaten");
                BonusState::Inactive
            }
        }
        BonusState::Consumed { remaining } => {
            if remaining > 1 {
                BonusState::Consumed {
                    remaining: remaining - 1,
                }
            } else {
                BonusState::Inactive
            }
        }
    };
}

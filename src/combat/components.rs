//! Combat domain: fighter components and the action state machine.

use bevy::prelude::*;

/// Marks the human-controlled fighter.
#[derive(Component, Debug)]
pub struct Player;

/// Marks the AI-controlled fighter.
#[derive(Component, Debug)]
pub struct Rival;

/// Hitbox extents shared by both fighters.
#[derive(Component, Debug, Clone, Copy)]
pub struct Fighter {
    pub width: f32,
    pub height: f32,
}

/// Health pool for a fighter.
///
/// `current` is allowed to go negative between a killing blow and the
/// terminal check that consumes it; only the reporting accessors clamp.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn damage(&mut self, amount: f32) {
        self.current -= amount;
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Clamped value for display.
    pub fn display(&self) -> f32 {
        self.current.clamp(0.0, self.max)
    }

    /// Clamped fraction for health bars.
    pub fn percent(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }
}

/// Per-tick velocity, integrated by the owning resolver.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Horizontal orientation; determines attack direction and sprite mirroring.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Facing that looks from `from_x` toward `to_x`.
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x > from_x {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}

/// Frames during which the fighter cannot act.
#[derive(Component, Debug, Default, Clone)]
pub struct Stun {
    pub frames: u32,
}

impl Stun {
    pub fn is_stunned(&self) -> bool {
        self.frames > 0
    }

    pub fn tick(&mut self) {
        self.frames = self.frames.saturating_sub(1);
    }
}

/// Countdown used by frame-gated attacks to fire their hit check at a fixed
/// offset inside the animation.
#[derive(Component, Debug, Default, Clone)]
pub struct AttackFrame(pub u32);

/// Mutually exclusive action tag; exactly one is active per fighter at any
/// tick. Transitions go through [`ActionState::apply`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Moving,
    Dashing,
    Barrage,
    Hurt,
    Dead,
    Attacking,
    Teleporting,
    PreparingTimeStop,
    StarFinger,
    HeavyPunch,
    SpecialMove,
}

/// Inputs to the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTrigger {
    Walk,
    Halt,
    StartBarrage,
    StartStarFinger,
    StartHeavyPunch,
    StartVolley,
    BeginTimeStopPrep,
    ResolveTimeStopPrep,
    FinishAttack,
    FinishBarrage,
    ForceSpecial,
    FinishSpecial,
    Struck,
    StunExpired,
    Defeat,
}

impl ActionState {
    /// States from which a new ability may be started.
    pub fn interruptible(self) -> bool {
        matches!(self, ActionState::Idle | ActionState::Moving)
    }

    /// States that refuse jump and movement input.
    pub fn committed_attack(self) -> bool {
        matches!(
            self,
            ActionState::Barrage
                | ActionState::StarFinger
                | ActionState::HeavyPunch
                | ActionState::SpecialMove
        )
    }

    /// Transition table: `from-state x trigger -> to-state`.
    /// Returns `None` for transitions the state machine does not allow.
    pub fn apply(self, trigger: ActionTrigger) -> Option<ActionState> {
        use ActionState::*;
        use ActionTrigger::*;

        match (self, trigger) {
            (Dead, _) => None,
            (_, Defeat) => Some(Dead),
            (_, ForceSpecial) => Some(SpecialMove),
            (Idle | Moving, Walk) => Some(Moving),
            (Idle | Moving, Halt) => Some(Idle),
            (s, StartBarrage) if s.interruptible() => Some(Barrage),
            (s, StartStarFinger) if s.interruptible() => Some(StarFinger),
            (s, StartHeavyPunch) if s.interruptible() => Some(HeavyPunch),
            (s, StartVolley) if s.interruptible() => Some(Attacking),
            (s, BeginTimeStopPrep) if s.interruptible() => Some(PreparingTimeStop),
            (PreparingTimeStop | Teleporting, ResolveTimeStopPrep) => Some(Idle),
            (StarFinger | HeavyPunch | Attacking, FinishAttack) => Some(Idle),
            (Barrage, FinishBarrage) => Some(Idle),
            (SpecialMove, FinishSpecial) => Some(Idle),
            (s, Struck) if s != SpecialMove => Some(Hurt),
            (Hurt, StunExpired) => Some(Idle),
            _ => None,
        }
    }

    /// Apply a trigger in place when the table allows it; returns whether a
    /// transition happened.
    pub fn try_transition(&mut self, trigger: ActionTrigger) -> bool {
        match self.apply(trigger) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }
}

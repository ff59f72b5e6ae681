//! Gameplay trigger zones reading actor state.
//!
//! Triggers observe the actor after a locomotion step and fire events on
//! enter/exit; they never participate in collision resolution. Timed
//! behavior is an explicit state machine advanced by tick-provided `dt`
//! rather than stored callbacks, so a sequence can be inspected and
//! tested without executing side effects, and every timer lives on the
//! zone instance so independent simulations stay isolated.

use glam::Vec3;

use crate::actor::Actor;

/// Event produced by a trigger zone during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The actor was moved to a teleport target.
    Teleported,
    /// A pickup was collected.
    Collected,
}

/// A zone that reacts to the actor's position once per tick.
pub trait TriggerZone {
    /// Advance the zone one tick against the actor's current state.
    ///
    /// `eye_height` is the vertical extent of the actor body above its
    /// feet, used by the overlap test.
    fn update(&mut self, actor: &mut Actor, eye_height: f32, dt: f32) -> Option<TriggerEvent>;
}

/// Cylindrical overlap test shared by all zones: the zone volume spans
/// `height` vertically around its center, the actor spans from its feet
/// to `eye_height` above.
fn overlaps(center: Vec3, radius: f32, height: f32, actor_pos: Vec3, eye_height: f32) -> bool {
    let bottom = center.y - height * 0.5;
    let top = center.y + height * 0.5;
    if actor_pos.y + eye_height < bottom || actor_pos.y > top {
        return false;
    }
    let dx = actor_pos.x - center.x;
    let dz = actor_pos.z - center.z;
    dx * dx + dz * dz <= radius * radius
}

/// Phase of a timed teleport sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleportPhase {
    /// Waiting for an actor to enter the zone.
    Idle,
    /// Actor inside; counting down the activation delay.
    Delaying,
    /// Sequence committed; counting down the transition (the screen fade
    /// runs here in the full game) before the actor is moved.
    Transitioning,
    /// Recently fired; ignoring actors until the cooldown elapses.
    Cooldown,
}

/// A teleport zone: after an actor stays inside for `delay` seconds the
/// sequence commits, and `transition` seconds later the actor is moved
/// to `target` with its velocity zeroed.
///
/// Leaving the zone during the delay disarms the pad; once committed,
/// the teleport completes regardless. After firing, the pad ignores
/// actors for `cooldown` seconds and re-arms only once the zone is clear,
/// so standing on the destination of a paired pad cannot ping-pong.
#[derive(Debug, Clone)]
pub struct TeleportPad {
    /// Center of the activation volume.
    pub center: Vec3,
    /// Destination the actor is moved to.
    pub target: Vec3,
    /// Horizontal activation radius.
    pub radius: f32,
    /// Vertical extent of the activation volume.
    pub height: f32,
    /// Seconds the actor must stay inside before the sequence commits.
    pub delay: f32,
    /// Seconds between commitment and the actual move.
    pub transition: f32,
    /// Seconds after firing during which the pad ignores actors.
    pub cooldown: f32,
    phase: TeleportPhase,
    timer: f32,
}

impl TeleportPad {
    pub fn new(center: Vec3, target: Vec3) -> Self {
        Self {
            center,
            target,
            radius: 1.2,
            height: 2.5,
            delay: 1.0,
            transition: 0.65,
            cooldown: 6.0,
            phase: TeleportPhase::Idle,
            timer: 0.0,
        }
    }

    /// Current phase of the teleport sequence.
    pub fn phase(&self) -> TeleportPhase {
        self.phase
    }
}

impl TriggerZone for TeleportPad {
    fn update(&mut self, actor: &mut Actor, eye_height: f32, dt: f32) -> Option<TriggerEvent> {
        let inside = overlaps(self.center, self.radius, self.height, actor.position, eye_height);

        match self.phase {
            TeleportPhase::Idle => {
                if inside {
                    self.phase = TeleportPhase::Delaying;
                    self.timer = 0.0;
                    tracing::debug!(center = ?self.center, "teleport pad armed");
                }
                None
            }
            TeleportPhase::Delaying => {
                if !inside {
                    self.phase = TeleportPhase::Idle;
                    self.timer = 0.0;
                    return None;
                }
                self.timer += dt;
                if self.timer >= self.delay {
                    self.phase = TeleportPhase::Transitioning;
                    self.timer = 0.0;
                }
                None
            }
            TeleportPhase::Transitioning => {
                self.timer += dt;
                if self.timer >= self.transition {
                    actor.position = self.target;
                    actor.velocity = Vec3::ZERO;
                    self.phase = TeleportPhase::Cooldown;
                    self.timer = 0.0;
                    tracing::debug!(target = ?self.target, "teleported actor");
                    return Some(TriggerEvent::Teleported);
                }
                None
            }
            TeleportPhase::Cooldown => {
                self.timer += dt;
                if self.timer >= self.cooldown && !inside {
                    self.phase = TeleportPhase::Idle;
                    self.timer = 0.0;
                }
                None
            }
        }
    }
}

/// A one-shot pickup zone. Fires exactly once, when the actor first
/// enters; collected zones never re-fire.
#[derive(Debug, Clone)]
pub struct PickupZone {
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
    collected: bool,
    inside: bool,
}

impl PickupZone {
    pub fn new(center: Vec3) -> Self {
        Self {
            center,
            radius: 1.2,
            height: 2.5,
            collected: false,
            inside: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }
}

impl TriggerZone for PickupZone {
    fn update(&mut self, actor: &mut Actor, eye_height: f32, _dt: f32) -> Option<TriggerEvent> {
        if self.collected {
            return None;
        }
        let inside_now = overlaps(self.center, self.radius, self.height, actor.position, eye_height);
        let entered = inside_now && !self.inside;
        self.inside = inside_now;

        if entered {
            self.collected = true;
            tracing::debug!(center = ?self.center, "pickup collected");
            return Some(TriggerEvent::Collected);
        }
        None
    }
}

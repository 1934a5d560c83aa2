//! Narrative state machine
//!
//! [`NarrativeState`] holds everything the story depends on: the active
//! [`Location`], the inventory, the flags, the timers and the four text
//! fields. Input only records a pending [`Side`]; the next
//! [`NarrativeState::update`] resolves it through [`transition`], a pure
//! function of the current snapshot, and applies the result in one step.
//!
//! Some locations hold several beats (the prison cell cycles through digging,
//! looking around and calling the guard). Those beats are told apart by the
//! prompt currently shown on the chosen side.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::story::{Item, Location, Message, Outcome, Prompt, Side};

/// Items held by the player
pub type Inventory = BTreeSet<Item>;

/// Narrative flags gating alternate branches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// The cell guard has been knocked out
    pub past_guard: bool,

    /// Hurt while fighting the prison guards
    pub injured: bool,

    /// The crewmate has been freed and follows the player
    pub buddy: bool,
}

/// Complete next state produced by [`transition`]
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Location after the step
    pub location: Location,

    /// Scene description, `None` once the story has ended
    pub message: Option<Message>,

    /// Left choice, `None` when disabled
    pub left: Option<Prompt>,

    /// Right choice, `None` when disabled
    pub right: Option<Prompt>,

    /// Result text
    pub result: Outcome,

    /// Inventory after grants and revokes
    pub items: Inventory,

    /// Flags after the step
    pub flags: Flags,

    /// Crate arrival time, latched once
    pub time_to_crate: Option<f32>,
}

impl Transition {
    fn from_state(state: &NarrativeState) -> Self {
        Self {
            location: state.location,
            message: state.message,
            left: state.left,
            right: state.right,
            result: state.result,
            items: state.items.clone(),
            flags: state.flags,
            time_to_crate: state.time_to_crate,
        }
    }

    /// Move to `location` with its entry message and choices
    fn arrive(&mut self, location: Location, result: Outcome) {
        let (message, left, right) = location.entry();
        self.location = location;
        self.message = Some(message);
        self.left = left;
        self.right = right;
        self.result = result;
    }

    /// Story over: clear the message and both choices
    fn end(&mut self, result: Outcome) {
        self.message = None;
        self.left = None;
        self.right = None;
        self.result = result;
    }

    fn arrive_at_crate(&mut self, elapsed_time: f32) {
        let result = match self.time_to_crate {
            Some(_) => Outcome::CrateReturn,
            None => {
                self.time_to_crate = Some(elapsed_time);
                Outcome::CrateReached { seconds: elapsed_time as u32 }
            }
        };
        self.arrive(Location::Crate, result);
    }

    fn has(&self, item: Item) -> bool {
        self.items.contains(&item)
    }
}

/// Resolve a choice against a snapshot of the state.
///
/// Returns `None` when the chosen side is disabled or the location has no
/// transition for it; the state must then be left untouched. Calling this
/// twice on the same snapshot yields the same result.
pub fn transition(state: &NarrativeState, side: Side) -> Option<Transition> {
    use Prompt as P;

    let prompt = match side {
        Side::Left => state.left?,
        Side::Right => state.right?,
    };
    let mut next = Transition::from_state(state);

    match state.location {
        Location::Prison => match (side, prompt) {
            (Side::Left, P::DigTunnel) => {
                next.left = Some(P::LookAround);
                next.result = Outcome::NoItem;
            }
            (Side::Left, P::LookAround) => {
                next.items.insert(Item::Rock);
                next.left = Some(if next.flags.past_guard { P::TryRight } else { P::GiveUp });
                next.result = Outcome::LookAround;
            }
            (Side::Left, P::AskNicely) => next.end(Outcome::GuardLeaves),
            (Side::Left, P::TryRight) => next.arrive(Location::Guards, Outcome::RightTurn),
            (Side::Left, P::GiveUp) => next.end(Outcome::GiveUp),
            (Side::Right, P::CallGuard) => {
                next.left = Some(P::AskNicely);
                next.right = Some(if next.has(Item::Rock) { P::UseRock } else { P::AttackGuard });
                next.result = Outcome::CallGuard;
            }
            (Side::Right, P::AttackGuard | P::UseRock) => {
                next.flags.past_guard = true;
                next.items.remove(&Item::Rock);
                next.arrive(Location::Dungeon, Outcome::KnockOut);
            }
            (Side::Right, P::TryLeft) => next.arrive(Location::Table, Outcome::LeftTurn),
            _ => return None,
        },
        Location::Dungeon => match side {
            Side::Left => next.arrive(Location::Table, Outcome::LeftTurn),
            Side::Right => next.arrive(Location::Guards, Outcome::RightTurn),
        },
        Location::Table => {
            next.items.insert(Item::Sword);
            next.items.insert(Item::Shovel);
            match side {
                Side::Left => next.arrive(Location::Guards, Outcome::RightTurn),
                Side::Right => next.arrive(Location::Coast, Outcome::LeftCell),
            }
        }
        Location::Guards => match (side, prompt) {
            (Side::Left, _) => {
                if next.has(Item::Sword) {
                    next.flags.injured = true;
                    next.arrive(Location::Coast, Outcome::FightSword);
                } else {
                    next.end(Outcome::FightNoSword);
                }
            }
            (Side::Right, P::Distraction) => {
                if next.items.remove(&Item::Shovel) {
                    next.arrive(Location::Coast, Outcome::DistractionShovel);
                } else if next.items.remove(&Item::Rock) {
                    next.arrive(Location::Coast, Outcome::DistractionRock);
                } else {
                    next.right = Some(P::CellReturn);
                    next.result = Outcome::NoItem;
                }
            }
            (Side::Right, P::CellReturn) => {
                next.arrive(Location::Prison, Outcome::RightCell);
                next.left = Some(P::LookAround);
                next.right = Some(P::TryLeft);
            }
            _ => return None,
        },
        Location::Coast => match side {
            Side::Left => next.arrive_at_crate(state.elapsed_time),
            Side::Right => {
                let result = if next.flags.buddy {
                    Outcome::BuddyFollows
                } else if next.has(Item::Key) {
                    next.flags.buddy = true;
                    Outcome::BuddyFreed
                } else {
                    Outcome::CrewmateLocked
                };
                next.arrive(Location::Forest, result);
            }
        },
        Location::Crate => {
            next.items.insert(Item::Key);
            match side {
                Side::Left => next.arrive(Location::CoastGuards, Outcome::ShipSighted),
                Side::Right => next.arrive(Location::Coast, Outcome::CoastReturn),
            }
        }
        Location::CoastGuards => match side {
            Side::Left => {
                if next.has(Item::Sword) && (next.flags.buddy || !next.flags.injured) {
                    next.arrive(Location::Ship, Outcome::ShipWon);
                } else {
                    next.end(Outcome::ShipFightLost);
                }
            }
            Side::Right => next.arrive_at_crate(state.elapsed_time),
        },
        Location::Forest => match side {
            Side::Left => next.arrive(Location::Deepwoods, Outcome::WoodsDeeper),
            Side::Right => next.arrive(Location::Coast, Outcome::CoastReturn),
        },
        Location::Deepwoods => match side {
            Side::Left => {
                let result = if next.items.insert(Item::Oar) {
                    Outcome::OarFound
                } else {
                    Outcome::NothingElse
                };
                next.arrive(Location::OarLoc, result);
            }
            Side::Right => {
                next.arrive(Location::Raft, Outcome::NoOar);
                if next.has(Item::Oar) {
                    next.left = None;
                    next.right = None;
                    next.result = Outcome::RaftEscape;
                }
            }
        },
        Location::OarLoc | Location::Raft => match side {
            Side::Left => next.end(Outcome::GiveUp),
            Side::Right => next.arrive(Location::Deepwoods, Outcome::WoodsReturn),
        },
        Location::Ship => return None,
    }

    Some(next)
}

/// Live narrative state for one play session
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeState {
    location: Location,
    pending: Option<Side>,
    items: Inventory,
    flags: Flags,
    message: Option<Message>,
    left: Option<Prompt>,
    right: Option<Prompt>,
    result: Outcome,
    elapsed_time: f32,
    time_to_crate: Option<f32>,
}

impl Default for NarrativeState {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrativeState {
    /// Fresh session in the prison cell
    pub fn new() -> Self {
        let (message, left, right) = Location::Prison.entry();
        Self {
            location: Location::Prison,
            pending: None,
            items: Inventory::new(),
            flags: Flags::default(),
            message: Some(message),
            left,
            right,
            result: Outcome::Default,
            elapsed_time: 0.0,
            time_to_crate: None,
        }
    }

    /// Record a choice for the next update.
    ///
    /// Returns `false` and leaves the state alone if a choice is already
    /// pending; input is edge-triggered.
    pub fn choose(&mut self, side: Side) -> bool {
        if let Some(pending) = self.pending {
            log::warn!("Ignoring {:?} while {:?} is pending", side, pending);
            return false;
        }
        self.pending = Some(side);
        true
    }

    /// Advance the clock and resolve the pending choice, if any.
    ///
    /// `elapsed` is always added to the session time first, so a latch taken
    /// in this step sees the updated value. Returns `true` when a transition
    /// was applied. The pending choice is cleared either way.
    pub fn update(&mut self, elapsed: f32) -> bool {
        self.elapsed_time += elapsed;

        let Some(side) = self.pending.take() else {
            return false;
        };

        match transition(self, side) {
            Some(next) => {
                log::debug!(
                    "{} --{:?}--> {} ({:?})",
                    self.location,
                    side,
                    next.location,
                    next.result
                );
                self.apply(next);
                true
            }
            None => {
                log::debug!("{:?} is disabled at {}", side, self.location);
                false
            }
        }
    }

    /// Replace the story fields with a resolved transition
    pub fn apply(&mut self, next: Transition) {
        self.location = next.location;
        self.message = next.message;
        self.left = next.left;
        self.right = next.right;
        self.result = next.result;
        self.items = next.items;
        self.flags = next.flags;
        self.time_to_crate = next.time_to_crate;
    }

    /// Start over from the prison cell
    pub fn reset(&mut self) {
        log::info!("Session reset after {:.1}s", self.elapsed_time);
        *self = Self::new();
    }

    /// Both choices are disabled; no further input has an effect
    pub fn is_over(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Active location
    pub fn location(&self) -> Location {
        self.location
    }

    /// Choice waiting for the next update
    pub fn pending(&self) -> Option<Side> {
        self.pending
    }

    /// Items currently held
    pub fn items(&self) -> &Inventory {
        &self.items
    }

    /// Whether `item` is held
    pub fn has(&self, item: Item) -> bool {
        self.items.contains(&item)
    }

    /// Current flags
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Scene description, `None` once the story has ended
    pub fn message(&self) -> Option<Message> {
        self.message
    }

    /// Left choice
    pub fn left(&self) -> Option<Prompt> {
        self.left
    }

    /// Right choice
    pub fn right(&self) -> Option<Prompt> {
        self.right
    }

    /// Result of the last action
    pub fn result(&self) -> Outcome {
        self.result
    }

    /// Seconds since the session started
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Session time of the first arrival at the crate
    pub fn time_to_crate(&self) -> Option<f32> {
        self.time_to_crate
    }

    /// Message, left choice, right choice and result, in draw order.
    /// Disabled fields are empty strings.
    pub fn ui_text(&self) -> [Cow<'static, str>; 4] {
        let prompt = |p: Option<Prompt>| Cow::Borrowed(p.map_or("", Prompt::text));
        [
            Cow::Borrowed(self.message.map_or("", Message::text)),
            prompt(self.left),
            prompt(self.right),
            self.result.text(),
        ]
    }
}

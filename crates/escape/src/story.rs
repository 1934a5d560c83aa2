//! Story tables
//!
//! Every piece of text the player sees lives here, keyed by enum. The
//! narrative state machine only moves these keys around; turning them into
//! strings happens at draw time.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A narrative location. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    /// The starting cell
    Prison,
    /// Below the cell, past the guard
    Dungeon,
    /// Room with the sword and shovel
    Table,
    /// Two guards block the way out
    Guards,
    /// Outside the prison
    Coast,
    /// Guards in front of the ship
    CoastGuards,
    /// Crate by the docks holding the key
    Crate,
    /// Aboard the ship (terminal)
    Ship,
    /// Edge of the forest
    Forest,
    /// Deep in the woods
    Deepwoods,
    /// Clearing where the oar is hidden
    OarLoc,
    /// Riverbank with the raft
    Raft,
}

impl Location {
    /// All locations, in declaration order
    pub const ALL: [Self; 12] = [
        Self::Prison,
        Self::Dungeon,
        Self::Table,
        Self::Guards,
        Self::Coast,
        Self::CoastGuards,
        Self::Crate,
        Self::Ship,
        Self::Forest,
        Self::Deepwoods,
        Self::OarLoc,
        Self::Raft,
    ];

    /// Message and choices shown when arriving at this location
    pub const fn entry(self) -> (Message, Option<Prompt>, Option<Prompt>) {
        use Prompt::*;
        match self {
            Self::Prison => (Message::InPrison, Some(DigTunnel), Some(CallGuard)),
            Self::Dungeon => (Message::Dungeon, Some(TurnLeft), Some(TurnRight)),
            Self::Table => (Message::AtTable, Some(TryRight), Some(CellReturn)),
            Self::Guards => (Message::NearGuards, Some(Charge), Some(Distraction)),
            Self::Coast => (Message::Coast, Some(CheckCrate), Some(EnterForest)),
            Self::Crate => (Message::Crate, Some(SneakToShip), Some(BackToCoast)),
            Self::CoastGuards => (Message::CoastGuards, Some(FightForShip), Some(BackToCrate)),
            Self::Ship => (Message::Ship, None, None),
            Self::Forest => (Message::Forest, Some(GoDeeper), Some(BackToCoast)),
            Self::Deepwoods => (Message::Deepwoods, Some(SearchArea), Some(GoToRiver)),
            Self::OarLoc => (Message::Clearing, Some(GiveUp), Some(BackToWoods)),
            Self::Raft => (Message::Riverbank, Some(GiveUp), Some(BackToWoods)),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Collectible items. Membership only, no counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Item {
    /// Found on the table
    Sword,
    /// Found by looking around the cell
    Rock,
    /// Found on the table
    Shovel,
    /// Hidden in the clearing
    Oar,
    /// Inside the crate
    Key,
}

/// Which of the two choices the player picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// A choice label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prompt {
    /// Dig out of the cell
    DigTunnel,
    /// Search the cell
    LookAround,
    /// Ask the guard to open the cell
    AskNicely,
    /// Head for the guards
    TryRight,
    /// End the game
    GiveUp,
    /// Get the guard to the bars
    CallGuard,
    /// Hit the guard through the bars
    AttackGuard,
    /// Throw the rock at the guard
    UseRock,
    /// Head for the table
    TryLeft,
    /// Dungeon fork toward the table
    TurnLeft,
    /// Dungeon fork toward the guards
    TurnRight,
    /// Walk back toward the cell
    CellReturn,
    /// Fight the guards
    Charge,
    /// Throw something past the guards
    Distraction,
    /// Coast path to the crate
    CheckCrate,
    /// Coast path into the forest
    EnterForest,
    /// Crate path to the ship
    SneakToShip,
    /// Return to the coast
    BackToCoast,
    /// Fight the ship guards
    FightForShip,
    /// Return to the crate
    BackToCrate,
    /// Forest path deeper in
    GoDeeper,
    /// Look for the oar
    SearchArea,
    /// Head for the raft
    GoToRiver,
    /// Return to the deep woods
    BackToWoods,
}

impl Prompt {
    /// Label drawn for this choice
    pub const fn text(self) -> &'static str {
        match self {
            Self::DigTunnel => "Dig a tunnel.",
            Self::LookAround => "Look around.",
            Self::AskNicely => "Ask him nicely to let you go.",
            Self::TryRight => "Go right this time.",
            Self::GiveUp => "Give up.",
            Self::CallGuard => "Call the guard.",
            Self::AttackGuard => "Attack him!",
            Self::UseRock => "Use the rock.",
            Self::TryLeft => "Go left this time.",
            Self::TurnLeft => "Turn left.",
            Self::TurnRight => "Turn right.",
            Self::CellReturn => "Back to the cell.",
            Self::Charge => "Charge!",
            Self::Distraction => "Cause a distraction.",
            Self::CheckCrate => "Check out the crate.",
            Self::EnterForest => "Walk into the forest.",
            Self::SneakToShip => "Sneak toward the ship.",
            Self::BackToCoast => "Back to the coast.",
            Self::FightForShip => "Fight for the ship!",
            Self::BackToCrate => "Back to the crate.",
            Self::GoDeeper => "Go deeper into the woods.",
            Self::SearchArea => "Search the area.",
            Self::GoToRiver => "Head to the river.",
            Self::BackToWoods => "Back into the woods.",
        }
    }
}

/// Scene description line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    /// Start of the game
    InPrison,
    /// Table with the sword and shovel
    AtTable,
    /// Two guards block the way
    NearGuards,
    /// Fork outside the cell
    Dungeon,
    /// Out of the dungeon
    Coast,
    /// Crate holding the key
    Crate,
    /// Guarded ship
    CoastGuards,
    /// Aboard the ship
    Ship,
    /// Edge of the forest
    Forest,
    /// Chained crewmate
    Deepwoods,
    /// Where the oar is hidden
    Clearing,
    /// Where the raft is tied
    Riverbank,
}

impl Message {
    /// Text drawn for this message
    pub const fn text(self) -> &'static str {
        match self {
            Self::InPrison => "You are in the prison. What do you do to escape?",
            Self::AtTable => "You are at the table. Where do you go?",
            Self::NearGuards => "You are near the guards. What do you do?",
            Self::Dungeon => "You are in the dungeon. Where do you go?",
            Self::Coast => "You are on the coast. What do you do?",
            Self::Crate => "You are at a crate by the docks. A key lies inside.",
            Self::CoastGuards => "You are near the ship. Guards stand in the way.",
            Self::Ship => "You are aboard the ship.",
            Self::Forest => "You are in the forest. Where do you go?",
            Self::Deepwoods => "You are deep in the woods. What do you do?",
            Self::Clearing => "You are in a small clearing. What do you do?",
            Self::Riverbank => "You are at the river. What do you do?",
        }
    }
}

/// Result of the last action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Shown at the start
    Default,
    /// The action needs an item the player lacks
    NoItem,
    /// Rock picked up
    LookAround,
    /// Give-up ending
    GiveUp,
    /// Guard walks away ending
    GuardLeaves,
    /// Guard comes to the bars
    CallGuard,
    /// Guard knocked out, cell opened
    KnockOut,
    /// Table seen
    LeftTurn,
    /// Guards seen
    RightTurn,
    /// Tunnel dug
    LeftCell,
    /// Back in the cell
    RightCell,
    /// Shovel thrown past the guards
    DistractionShovel,
    /// Rock thrown past the guards
    DistractionRock,
    /// Guards death ending
    FightNoSword,
    /// Guards beaten, injured
    FightSword,
    /// First arrival at the crate
    CrateReached {
        /// Whole seconds since the session started
        seconds: u32,
    },
    /// Back at the crate after the first visit
    CrateReturn,
    /// Ship guards seen
    ShipSighted,
    /// Back on the coast
    CoastReturn,
    /// Crewmate already freed
    BuddyFollows,
    /// Crewmate unchained with the key
    BuddyFreed,
    /// Crewmate chained, no key
    CrewmateLocked,
    /// Deeper into the woods
    WoodsDeeper,
    /// Oar picked up
    OarFound,
    /// Oar already taken
    NothingElse,
    /// Raft without an oar
    NoOar,
    /// Raft win ending
    RaftEscape,
    /// Ship win ending
    ShipWon,
    /// Ship fight loss ending
    ShipFightLost,
    /// Back in the deep woods
    WoodsReturn,
}

impl Outcome {
    /// Text drawn for this result
    pub fn text(self) -> Cow<'static, str> {
        let text = match self {
            Self::CrateReached { seconds } => {
                return Cow::Owned(format!("You reach the crate in {} seconds.", seconds));
            }
            Self::Default => "Good luck!",
            Self::NoItem => "With what? Nice try.",
            Self::LookAround => "You see a rock and pick it up.",
            Self::GiveUp => "It's a tough game for sure! Game over.",
            Self::GuardLeaves => "The guard leaves and won't come back. Game over.",
            Self::CallGuard => "The guard approaches.",
            Self::KnockOut => "The guard is knocked out. You take and use the key.",
            Self::LeftTurn => "You see a table. There is a sword and shovel.",
            Self::RightTurn => "You see two guards.",
            Self::LeftCell => "You use the shovel to dig your way out of the prison.",
            Self::RightCell => "Guess captivity is preferable to death.",
            Self::DistractionShovel => "You throw the shovel and sneak by the guards.",
            Self::DistractionRock => "You throw the rock and sneak by the guards.",
            Self::FightNoSword => "You die. Game over.",
            Self::FightSword => "You use the sword to beat them, but now you're injured.",
            Self::CrateReturn => "You return to the crate.",
            Self::ShipSighted => "Two guards stand watch over the ship.",
            Self::CoastReturn => "You head back along the coast.",
            Self::BuddyFollows => "Your crewmate follows you through the trees.",
            Self::BuddyFreed => "You unlock your crewmate's chains. They join you.",
            Self::CrewmateLocked => "Your crewmate is chained to a tree. You need a key.",
            Self::WoodsDeeper => "The trees close in around you.",
            Self::OarFound => "You find an oar hidden in the brush.",
            Self::NothingElse => "There is nothing else here.",
            Self::NoOar => "There is a raft, but no oar.",
            Self::RaftEscape => "You row the raft down the river to freedom. You win!",
            Self::ShipWon => "You fight off the guards and sail away. You win!",
            Self::ShipFightLost => "You are too weak to win this fight. Game over.",
            Self::WoodsReturn => "You make your way back into the woods.",
        };
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ship_has_no_choices() {
        for location in Location::ALL {
            let (_, left, right) = location.entry();
            assert_eq!(left.is_none() && right.is_none(), location == Location::Ship, "{}", location);
        }
    }

    #[test]
    fn test_crate_reached_embeds_seconds() {
        let text = Outcome::CrateReached { seconds: 12 }.text();
        assert_eq!(text, "You reach the crate in 12 seconds.");
        assert!(text.ends_with("12 seconds."));
    }

    #[test]
    fn test_fixed_texts_are_borrowed() {
        assert!(matches!(Outcome::Default.text(), Cow::Borrowed("Good luck!")));
        assert_eq!(Prompt::DigTunnel.text(), "Dig a tunnel.");
        assert_eq!(Message::InPrison.text(), "You are in the prison. What do you do to escape?");
    }
}

//! Static double-elimination topology: which slot feeds which.

use crate::models::{Placeholder, SlotId};

/// Number of qualifiers seeded into the upper bracket.
pub const SEED_COUNT: usize = 8;

/// Source of one side of a slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Feed {
    /// 0-based qualification rank.
    Seed(usize),
    Winner(SlotId),
    Loser(SlotId),
}

impl Feed {
    /// What to show while the feeder is unresolved.
    pub fn placeholder(self) -> Placeholder {
        match self {
            Feed::Seed(_) => Placeholder::Unseeded,
            Feed::Winner(slot) => Placeholder::WinnerOf(slot),
            Feed::Loser(slot) => Placeholder::LoserOf(slot),
        }
    }

    pub fn source(self) -> Option<SlotId> {
        match self {
            Feed::Seed(_) => None,
            Feed::Winner(slot) | Feed::Loser(slot) => Some(slot),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotNode {
    pub id: SlotId,
    pub top: Feed,
    pub bottom: Feed,
}

const fn slot(id: SlotId, top: Feed, bottom: Feed) -> SlotNode {
    SlotNode { id, top, bottom }
}

/// Every slot, listed so that each feeder precedes the slots it feeds.
pub const TOPOLOGY: [SlotNode; 15] = {
    use Feed::*;
    use SlotId::*;
    [
        slot(G1, Seed(0), Seed(7)),
        slot(G2, Seed(1), Seed(6)),
        slot(G3, Seed(2), Seed(5)),
        slot(G4, Seed(3), Seed(4)),
        slot(G5, Winner(G1), Winner(G2)),
        slot(G6, Winner(G3), Winner(G4)),
        slot(G7, Winner(G5), Winner(G6)),
        slot(L1, Loser(G1), Loser(G2)),
        slot(L2, Loser(G3), Loser(G4)),
        slot(L3, Winner(L1), Loser(G5)),
        slot(L4, Winner(L2), Loser(G6)),
        slot(L5, Winner(L3), Winner(L4)),
        slot(L6, Winner(L5), Loser(G7)),
        slot(Bronze, Winner(L6), Loser(G7)),
        slot(GrandFinal, Winner(G7), Winner(L6)),
    ]
};

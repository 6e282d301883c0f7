//! Double-elimination bracket: slot ids, participants, matches and the grouped bracket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed structural identifier of a bracket slot.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum SlotId {
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    G7,
    L1,
    L2,
    L3,
    L4,
    L5,
    L6,
    #[serde(rename = "BF")]
    Bronze,
    #[serde(rename = "GF")]
    GrandFinal,
}

impl SlotId {
    pub const ALL: [SlotId; 15] = [
        SlotId::G1,
        SlotId::G2,
        SlotId::G3,
        SlotId::G4,
        SlotId::G5,
        SlotId::G6,
        SlotId::G7,
        SlotId::L1,
        SlotId::L2,
        SlotId::L3,
        SlotId::L4,
        SlotId::L5,
        SlotId::L6,
        SlotId::Bronze,
        SlotId::GrandFinal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotId::G1 => "G1",
            SlotId::G2 => "G2",
            SlotId::G3 => "G3",
            SlotId::G4 => "G4",
            SlotId::G5 => "G5",
            SlotId::G6 => "G6",
            SlotId::G7 => "G7",
            SlotId::L1 => "L1",
            SlotId::L2 => "L2",
            SlotId::L3 => "L3",
            SlotId::L4 => "L4",
            SlotId::L5 => "L5",
            SlotId::L6 => "L6",
            SlotId::Bronze => "BF",
            SlotId::GrandFinal => "GF",
        }
    }

    /// True for `G*` slots.
    pub fn is_upper(self) -> bool {
        self.as_str().starts_with('G')
    }

    pub fn title(self) -> String {
        let s = self.as_str();
        match self {
            SlotId::Bronze => "Bronze match".to_string(),
            SlotId::GrandFinal => "Grand final".to_string(),
            _ if self.is_upper() => format!("Game {}", &s[1..]),
            _ => format!("Lower bracket {}", &s[1..]),
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotId::ALL.into_iter().find(|id| id.as_str() == s).ok_or(())
    }
}

/// Why a participant is not known yet.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Placeholder {
    /// Nothing to show: not enough qualified teams, or no feeder.
    Unseeded,
    WinnerOf(SlotId),
    LoserOf(SlotId),
}

impl Placeholder {
    /// Renderable label: `—`, `W3`, `W-L1`, `L5`, `L-L2`.
    pub fn label(&self) -> String {
        let (prefix, slot) = match self {
            Placeholder::Unseeded => return "—".to_string(),
            Placeholder::WinnerOf(slot) => ('W', slot),
            Placeholder::LoserOf(slot) => ('L', slot),
        };
        if slot.is_upper() {
            format!("{}{}", prefix, &slot.as_str()[1..])
        } else {
            format!("{}-{}", prefix, slot)
        }
    }
}

/// Who sits in one side of a bracket slot.
///
/// On the wire every side carries its display `label`, so a client can render
/// the bracket without knowing the placeholder rules:
/// `{"kind":"placeholder","hint":"winner_of","slot":"G1","label":"W1"}`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(into = "ParticipantWire", try_from = "ParticipantWire")]
pub enum Participant {
    Team(String),
    Placeholder(Placeholder),
}

impl Default for Participant {
    fn default() -> Self {
        Participant::Placeholder(Placeholder::Unseeded)
    }
}

impl Participant {
    pub fn is_unseeded(&self) -> bool {
        matches!(self, Participant::Placeholder(Placeholder::Unseeded))
    }

    pub fn label(&self) -> String {
        match self {
            Participant::Team(name) => name.clone(),
            Participant::Placeholder(p) => p.label(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ParticipantKind {
    Team,
    Placeholder,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PlaceholderHint {
    Unseeded,
    WinnerOf,
    LoserOf,
}

#[derive(Serialize, Deserialize)]
struct ParticipantWire {
    kind: ParticipantKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<PlaceholderHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slot: Option<SlotId>,
    label: String,
}

impl From<Participant> for ParticipantWire {
    fn from(participant: Participant) -> Self {
        let label = participant.label();
        let (kind, hint, slot) = match participant {
            Participant::Team(_) => (ParticipantKind::Team, None, None),
            Participant::Placeholder(Placeholder::Unseeded) => {
                (ParticipantKind::Placeholder, Some(PlaceholderHint::Unseeded), None)
            }
            Participant::Placeholder(Placeholder::WinnerOf(slot)) => {
                (ParticipantKind::Placeholder, Some(PlaceholderHint::WinnerOf), Some(slot))
            }
            Participant::Placeholder(Placeholder::LoserOf(slot)) => {
                (ParticipantKind::Placeholder, Some(PlaceholderHint::LoserOf), Some(slot))
            }
        };
        ParticipantWire {
            kind,
            hint,
            slot,
            label,
        }
    }
}

impl TryFrom<ParticipantWire> for Participant {
    type Error = String;

    fn try_from(wire: ParticipantWire) -> Result<Self, Self::Error> {
        let placeholder = match (wire.kind, wire.hint, wire.slot) {
            (ParticipantKind::Team, _, _) => return Ok(Participant::Team(wire.label)),
            (ParticipantKind::Placeholder, None | Some(PlaceholderHint::Unseeded), _) => {
                Placeholder::Unseeded
            }
            (ParticipantKind::Placeholder, Some(PlaceholderHint::WinnerOf), Some(slot)) => {
                Placeholder::WinnerOf(slot)
            }
            (ParticipantKind::Placeholder, Some(PlaceholderHint::LoserOf), Some(slot)) => {
                Placeholder::LoserOf(slot)
            }
            (ParticipantKind::Placeholder, Some(hint), None) => {
                return Err(format!("placeholder {:?} needs a slot", hint));
            }
        };
        Ok(Participant::Placeholder(placeholder))
    }
}

/// Progress of a slot. Only ever moves forward.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Unseeded,
    Pending,
    Played,
}

/// One slot in the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: SlotId,
    pub title: String,
    pub top: Participant,
    pub bottom: Participant,
    /// `"home:away"`, or `None` while unplayed.
    pub score: Option<String>,
    pub winner: Option<String>,
    pub loser: Option<String>,
}

impl BracketMatch {
    /// Empty slot with both sides unseeded.
    pub fn empty(id: SlotId) -> Self {
        Self {
            id,
            title: id.title(),
            top: Participant::default(),
            bottom: Participant::default(),
            score: None,
            winner: None,
            loser: None,
        }
    }

    pub fn state(&self) -> SlotState {
        if self.score.is_some() {
            SlotState::Played
        } else if self.top.is_unseeded() && self.bottom.is_unseeded() {
            SlotState::Unseeded
        } else {
            SlotState::Pending
        }
    }
}

/// The full double-elimination bracket, grouped the way bracket views lay it out.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    pub upper_quarterfinals: [BracketMatch; 4],
    pub upper_semifinals: [BracketMatch; 2],
    pub upper_final: BracketMatch,
    pub lower_round1: [BracketMatch; 2],
    pub lower_round2: [BracketMatch; 2],
    pub lower_round3: [BracketMatch; 2],
    pub bronze_final: BracketMatch,
    pub grand_final: BracketMatch,
}

impl Default for Bracket {
    fn default() -> Self {
        Self::skeleton()
    }
}

impl Bracket {
    /// Every slot present, every participant unseeded.
    pub fn skeleton() -> Self {
        use SlotId::*;
        let e = BracketMatch::empty;
        Self {
            upper_quarterfinals: [e(G1), e(G2), e(G3), e(G4)],
            upper_semifinals: [e(G5), e(G6)],
            upper_final: e(G7),
            lower_round1: [e(L1), e(L2)],
            lower_round2: [e(L3), e(L4)],
            lower_round3: [e(L5), e(L6)],
            bronze_final: e(Bronze),
            grand_final: e(GrandFinal),
        }
    }

    pub fn slot(&self, id: SlotId) -> &BracketMatch {
        use SlotId::*;
        match id {
            G1 => &self.upper_quarterfinals[0],
            G2 => &self.upper_quarterfinals[1],
            G3 => &self.upper_quarterfinals[2],
            G4 => &self.upper_quarterfinals[3],
            G5 => &self.upper_semifinals[0],
            G6 => &self.upper_semifinals[1],
            G7 => &self.upper_final,
            L1 => &self.lower_round1[0],
            L2 => &self.lower_round1[1],
            L3 => &self.lower_round2[0],
            L4 => &self.lower_round2[1],
            L5 => &self.lower_round3[0],
            L6 => &self.lower_round3[1],
            Bronze => &self.bronze_final,
            GrandFinal => &self.grand_final,
        }
    }

    pub fn slot_mut(&mut self, id: SlotId) -> &mut BracketMatch {
        use SlotId::*;
        match id {
            G1 => &mut self.upper_quarterfinals[0],
            G2 => &mut self.upper_quarterfinals[1],
            G3 => &mut self.upper_quarterfinals[2],
            G4 => &mut self.upper_quarterfinals[3],
            G5 => &mut self.upper_semifinals[0],
            G6 => &mut self.upper_semifinals[1],
            G7 => &mut self.upper_final,
            L1 => &mut self.lower_round1[0],
            L2 => &mut self.lower_round1[1],
            L3 => &mut self.lower_round2[0],
            L4 => &mut self.lower_round2[1],
            L5 => &mut self.lower_round3[0],
            L6 => &mut self.lower_round3[1],
            Bronze => &mut self.bronze_final,
            GrandFinal => &mut self.grand_final,
        }
    }

    /// All slots in topology order.
    pub fn slots(&self) -> impl Iterator<Item = &BracketMatch> {
        SlotId::ALL.into_iter().map(move |id| self.slot(id))
    }
}

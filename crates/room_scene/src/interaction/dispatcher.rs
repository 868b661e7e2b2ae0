//! Selection routing by node name

use crate::config::NodeNames;

/// Discrete action triggered by selecting a named node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Push the chair along X and play the movement cue
    MoveChair,
    /// Toggle the ambient music and the note stream
    ToggleMusic,
    /// Send the chair back to where it stood at load
    RestoreChair,
}

impl Interaction {
    /// Action bound to `name`; `None` for every other node
    pub fn from_node_name(name: &str, names: &NodeNames) -> Option<Self> {
        if name == names.chair {
            Some(Self::MoveChair)
        } else if name == names.speaker {
            Some(Self::ToggleMusic)
        } else if name == names.plant {
            Some(Self::RestoreChair)
        } else {
            None
        }
    }
}

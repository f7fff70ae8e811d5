/// Anatomical tier of a node.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Spinal nerve roots C5 to T1.
    Root,
    /// Superior, middle and inferior trunks.
    Trunk,
    /// Anterior and posterior divisions.
    Division,
    /// Lateral, posterior and medial cords.
    Cord,
    /// Terminal branches.
    Branch,
    /// Branches given off before the terminal branches.
    NonTerminalBranch,
}

impl Tier {
    /// Position along the proximal-to-distal axis. Non-terminal branches rank with the
    /// terminal ones: they are leaves given off by roots, trunks or cords.
    pub fn rank(self) -> u8 {
        match self {
            Tier::Root => 0,
            Tier::Trunk => 1,
            Tier::Division => 2,
            Tier::Cord => 3,
            Tier::Branch | Tier::NonTerminalBranch => 4,
        }
    }

    /// `true` when an edge may run from `self` to `other`.
    pub fn is_upstream_of(self, other: Tier) -> bool {
        self.rank() < other.rank()
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Tier::Root => "root",
            Tier::Trunk => "trunk",
            Tier::Division => "division",
            Tier::Cord => "cord",
            Tier::Branch => "branch",
            Tier::NonTerminalBranch => "non-terminal branch",
        };
        f.write_str(s)
    }
}

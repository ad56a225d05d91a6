use gemcascade_core::{Fall, Gem, Position};

/// A discrete, ordered notification for presentation layers.
///
/// A cascade emits
/// `Swapped` → (`NoMatch` | (`Cleared`* → `Fell`* → `Filled`*)+) → `Settled`;
/// taps outside a cascade emit `Selected` and `Deselected`.
///
/// Events carry enough data to animate without querying the engine: gem
/// identities and types, source and target cells, and fall distances. World
/// positions are available through [`Grid::world_center`].
///
/// [`Grid::world_center`]: gemcascade_core::Grid::world_center
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Event {
    /// A gem was selected.
    #[display("selected {_0}")]
    Selected(Position),
    /// The selection was cleared.
    #[display("deselected {_0}")]
    Deselected(Position),
    /// The gems at `a` and `b` exchanged places.
    #[display("swapped {a} <-> {b}")]
    Swapped {
        /// The first cell of the swap.
        a: Position,
        /// The second cell of the swap.
        b: Position,
    },
    /// The swap formed no match and was undone.
    #[display("no match, swap {a} <-> {b} reverted")]
    NoMatch {
        /// The first cell of the swap.
        a: Position,
        /// The second cell of the swap.
        b: Position,
    },
    /// A matched gem was removed.
    #[display("cleared {pos} {} {} (chain {chain})", gem.gem_type(), gem.id())]
    Cleared {
        /// The cell that was emptied.
        pos: Position,
        /// The removed gem.
        gem: Gem,
        /// One-based chain number within the cascade.
        chain: usize,
    },
    /// A gem fell into an empty cell below.
    #[display("fell {} {} {} -> {} ({})", _0.gem.gem_type(), _0.gem.id(), _0.from, _0.to, _0.distance())]
    Fell(Fall),
    /// A new gem was placed in an empty cell.
    #[display("filled {pos} {} {}{}", gem.gem_type(), gem.id(), if *fallback { " (fallback)" } else { "" })]
    Filled {
        /// The cell that was filled.
        pos: Position,
        /// The new gem.
        gem: Gem,
        /// `true` if the type was chosen by the full-palette fallback.
        fallback: bool,
    },
    /// The cascade ended with no matches on the board.
    #[display("settled after {chains} chain(s)")]
    Settled {
        /// Number of clear rounds performed.
        chains: usize,
    },
}

impl Event {
    /// Returns the cell this event concerns, or the destination for falls.
    ///
    /// Swap and settle events have no single cell and return `None`.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Selected(pos)
            | Self::Deselected(pos)
            | Self::Cleared { pos, .. }
            | Self::Filled { pos, .. } => Some(*pos),
            Self::Fell(fall) => Some(fall.to),
            Self::Swapped { .. } | Self::NoMatch { .. } | Self::Settled { .. } => None,
        }
    }
}

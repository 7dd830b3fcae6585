use crate::ship::ShipKind;

/// Side length of every board.
pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;
/// The fleet every player must place before shots are accepted. A ship's
/// marker code is its position in this table plus one.
pub const SHIPS: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Number of cells covered by `fleet`.
pub const fn fleet_cells(fleet: &[ShipKind]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fleet.len() {
        total += fleet[i].length();
        i += 1;
    }
    total
}

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = fleet_cells(&SHIPS);

/// Players per match.
pub const MAX_PLAYERS: usize = 2;

/// Who may fire next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnOrder {
    /// Either player may fire at any time.
    #[default]
    Free,
    /// The first joiner fires first, then players strictly alternate.
    Alternating,
}

/// What happens when a cell that was already attacked is targeted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatAttacks {
    /// The shot is accepted and its result recorded again.
    #[default]
    Allow,
    /// The shot is rejected with `AlreadyAttacked`.
    Reject,
}

/// Rule switches fixed for a match when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    pub turn_order: TurnOrder,
    pub repeat_attacks: RepeatAttacks,
}

impl Rules {
    /// Alternating turns and no repeated shots.
    pub const fn strict() -> Self {
        Rules {
            turn_order: TurnOrder::Alternating,
            repeat_attacks: RepeatAttacks::Reject,
        }
    }
}

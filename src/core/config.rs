pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIP_LENGTHS: [usize; NUM_SHIPS] = [5, 4, 3, 2, 1];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 2 + 1;

/// Random origins tried per ship before falling back to a deterministic scan.
pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

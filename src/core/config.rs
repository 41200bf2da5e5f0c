use super::field::BoatType;

pub const FIELD_ROWS: usize = 6;
pub const FIELD_COLS: usize = 10;

pub const FIELD_BOAT_LIVES_SMALL: u8 = 3;
pub const FIELD_BOAT_LIVES_MEDIUM: u8 = 4;
pub const FIELD_BOAT_LIVES_LARGE: u8 = 5;
pub const FIELD_BOAT_LIVES_HUGE: u8 = 6;

pub const NUM_BOATS: usize = 4;

/// Boats in ascending size order; also the bit order of boat status fields.
pub const BOATS: [BoatType; NUM_BOATS] = [
    BoatType::Small,
    BoatType::Medium,
    BoatType::Large,
    BoatType::Huge,
];

/// Total number of boat cells in a fleet.
pub const TOTAL_BOAT_CELLS: usize = 3 + 4 + 5 + 6;

/// Longest payload (the bytes between `$` and `*`) the parser will buffer.
pub const PROTOCOL_MAX_PAYLOAD_LEN: usize = 64;

/// Longest full sentence: `$`, payload, `*`, two checksum digits, newline.
pub const PROTOCOL_MAX_MESSAGE_LEN: usize = PROTOCOL_MAX_PAYLOAD_LEN + 5;

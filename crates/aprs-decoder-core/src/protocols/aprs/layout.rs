/// Anchored `SOURCE>DEST[,PATH]*:PAYLOAD` grammar. Path tokens keep an
/// optional trailing `*` (has been digipeated).
pub const HEADER_PATTERN: &str = r"(?s)^([A-Z0-9-]+)>([A-Z0-9-]+)((?:,[A-Z0-9-]+\*?)*):(.*)$";
pub const PATH_DELIMITER: char = ',';

pub const POSITION_NO_MESSAGING: char = '!';
pub const POSITION_WITH_MESSAGING: char = '=';
pub const STATUS: char = '>';
pub const MESSAGE: char = ':';
pub const TELEMETRY: char = 'T';

// Offsets below are relative to the position body, after the `!`/`=`.
pub const LAT_DEGREES_RANGE: std::ops::Range<usize> = 0..2;
pub const LAT_MINUTES_RANGE: std::ops::Range<usize> = 2..7;
pub const LAT_HEMISPHERE_OFFSET: usize = 7;
pub const SYMBOL_TABLE_OFFSET: usize = 8;
pub const LON_DEGREES_RANGE: std::ops::Range<usize> = 9..12;
pub const LON_MINUTES_RANGE: std::ops::Range<usize> = 12..17;
pub const LON_HEMISPHERE_OFFSET: usize = 17;
pub const SYMBOL_CODE_OFFSET: usize = 18;

pub const MIN_POSITION_LEN: usize = SYMBOL_CODE_OFFSET;

/// Offset of the decimal point inside a `MM.mm` minutes field.
pub const MINUTES_POINT_OFFSET: usize = 2;

pub const SYMBOL_TABLE: u8 = b'/';

pub const MINUTES_PER_DEGREE: f64 = 60.0;

use rust_decimal::Decimal;

/// Grams in one tola (traditional South Asian mass unit).
pub const GRAMS_PER_TOLA: Decimal = Decimal::from_parts(11664, 0, 0, false, 3);

/// Milligrams in one gram.
pub const MILLIGRAMS_PER_GRAM: i64 = 1000;

/// Default number of records returned by rate history queries
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

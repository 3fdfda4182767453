/// No company valuation may be repriced below this many currency units.
pub const VALUATION_FLOOR: i64 = 100;

/// Minimum length accepted for a client login password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum digits for the operator contact number (country code + number).
pub const MIN_PHONE_DIGITS: usize = 10;

/// Domain appended to a client's username to form the login email.
pub const LOGIN_EMAIL_DOMAIN: &str = "finvest.app";

/// Display name used in outbound message templates.
pub const FIRM_NAME: &str = "Finvest";

/// Base URL of the messaging handoff deep-link.
pub const HANDOFF_BASE_URL: &str = "https://wa.me";

/// Decimal places shown for percentage figures.
pub const PERCENT_DISPLAY_PRECISION: u32 = 2;

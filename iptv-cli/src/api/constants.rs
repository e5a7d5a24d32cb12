//! Google API endpoints and auth constants

/// Sheets v4 base URL
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Drive v3 files endpoint, used to resolve a spreadsheet by name
pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// OAuth scopes the service account is authorized for: spreadsheet
/// read/write plus Drive file listing for the by-name lookup.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

/// JWT bearer grant type for the token exchange
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each signed assertion, in seconds
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this many seconds before they expire
pub const TOKEN_REFRESH_MARGIN_SECS: u64 = 60;

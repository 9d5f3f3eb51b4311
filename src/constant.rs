pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_ENTRY_LIMIT: usize = 9;
pub const DEFAULT_MAIL_WINDOW_HOURS: u32 = 24;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_PAGE_TITLE: &str = "CBC News Headlines";
pub const DEFAULT_WEATHER_LOCATION: &str = "Dartmouth NS";

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-001";
pub const DEFAULT_GMAIL_API_BASE: &str = "https://gmail.googleapis.com";
pub const DEFAULT_GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

pub const MISSING_TITLE: &str = "(untitled)";
pub const MISSING_LINK: &str = "#";

pub const NO_SUBJECT: &str = "No Subject";
pub const UNKNOWN_SENDER: &str = "Unknown Sender";
// Deliberately fixed to "24 hours" whatever window was queried.
pub const NO_RECENT_MAIL: &str = "No new emails in the last 24 hours.";

pub const NO_USER_CONTEXT: &str = "No user context file found.";

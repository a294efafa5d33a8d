pub mod theme;

// http endpoints
//
// these are shared between the server router and anything that wants to
// talk to it, so that the two cannot drift apart
pub const SEASON_ENDPOINT: &str = "/api/season";
pub const THEME_ENDPOINT: &str = "/api/theme";
pub const THEMES_ENDPOINT: &str = "/api/themes";
pub const THEME_CSS_ENDPOINT: &str = "/theme.css";

// static assets referenced by theme records live under this prefix of
// the http document root
pub const ASSET_PATH: &str = "assets";

pub mod outfmt;
pub mod render;

// Version is of the format 0.YY.MM[.i], matching when the statement layout
// handling was last updated.
pub const CASPARSE_APP_VERSION: &str = "0.24.11";

//! The dialect's built-in attribute defaults and the hosted-font table.
//!
//! These are the *dialect's* defaults, used when parsing markup the editor
//! did not produce. They are deliberately distinct from the editor's
//! new-block defaults, which live with each registry handler.

pub const DIALECT_BODY_BACKGROUND: &str = "#ffffff";
pub const DIALECT_BODY_WIDTH: u32 = 600;
pub const DIALECT_FONT_FAMILY: &str = "Ubuntu, Helvetica, Arial, sans-serif";

/// Default attribute value for a (tag, attribute) pair, per the dialect's
/// built-in table. Empty string means "no default".
pub fn dialect_default(tag: &str, attr: &str) -> &'static str {
    match (tag, attr) {
        ("mj-section", "background-color") => "transparent",
        ("mj-section", "background-size") => "auto",
        ("mj-section", "background-repeat") => "repeat",
        ("mj-section", "padding") => "20px 0",
        ("mj-section", "border-radius") => "0",

        ("mj-text", "color") => "#000000",
        ("mj-text", "font-size") => "13px",
        ("mj-text", "line-height") => "1",
        ("mj-text", "align") => "left",
        ("mj-text", "padding") => "10px 25px",

        ("mj-heading", "color") => "#000000",
        ("mj-heading", "font-size") => "24px",
        ("mj-heading", "align") => "left",
        ("mj-heading", "level") => "h2",
        ("mj-heading", "padding") => "10px 25px",

        ("mj-button", "background-color") => "#414141",
        ("mj-button", "color") => "#ffffff",
        ("mj-button", "border-radius") => "3px",
        ("mj-button", "font-size") => "13px",
        ("mj-button", "align") => "center",
        ("mj-button", "padding") => "10px 25px",

        ("mj-image", "align") => "center",
        ("mj-image", "padding") => "10px 25px",

        ("mj-divider", "border-color") => "#000000",
        ("mj-divider", "border-style") => "solid",
        ("mj-divider", "border-width") => "4px",
        ("mj-divider", "width") => "100%",
        ("mj-divider", "padding") => "10px 25px",

        ("mj-spacer", "height") => "20px",

        ("mj-social", "icon-size") => "20px",
        ("mj-social", "align") => "center",
        ("mj-social", "padding") => "10px 25px",

        ("mj-navbar", "color") => "#000000",
        ("mj-navbar", "font-size") => "13px",
        ("mj-navbar", "align") => "center",
        ("mj-navbar", "padding") => "10px 25px",

        ("mj-hero", "background-color") => "#ffffff",
        ("mj-hero", "padding") => "0px",
        ("mj-hero", "align") => "center",

        _ => "",
    }
}

/// Hosted web fonts the generator knows how to declare. Only families in
/// this table get a font declaration in the head.
pub const FONT_URLS: &[(&str, &str)] = &[
    ("Open Sans", "https://fonts.googleapis.com/css?family=Open+Sans:300,400,500,700"),
    ("Roboto", "https://fonts.googleapis.com/css?family=Roboto:300,400,500,700"),
    ("Lato", "https://fonts.googleapis.com/css?family=Lato:300,400,500,700"),
    ("Montserrat", "https://fonts.googleapis.com/css?family=Montserrat:300,400,500,700"),
    ("Ubuntu", "https://fonts.googleapis.com/css?family=Ubuntu:300,400,500,700"),
    ("Raleway", "https://fonts.googleapis.com/css?family=Raleway:300,400,500,700"),
    ("Merriweather", "https://fonts.googleapis.com/css?family=Merriweather:300,400,700"),
    ("Oswald", "https://fonts.googleapis.com/css?family=Oswald:300,400,500,700"),
    ("Source Sans Pro", "https://fonts.googleapis.com/css?family=Source+Sans+Pro:300,400,600,700"),
    ("Nunito", "https://fonts.googleapis.com/css?family=Nunito:300,400,600,700"),
];

/// Hosted URL for the first family in a CSS font stack, if known.
pub fn font_url(font_family: &str) -> Option<(&'static str, &'static str)> {
    let first = font_family
        .split(',')
        .next()?
        .trim()
        .trim_matches(|c| c == '"' || c == '\'');
    FONT_URLS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(first))
        .copied()
}

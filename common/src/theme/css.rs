use std::fmt::Write;

use api::theme::Theme;

// render a theme as css custom properties scoped to its class name
//
// the layout puts the class on its root element, so every component below it
// can use var(--theme-primary) and friends without knowing the season
pub fn css_variables(theme: &Theme) -> String {
    let mut css = String::new();

    // writing into a String cannot fail
    let _ = writeln!(css, ".{} {{", theme.presentation.class_name);
    let _ = writeln!(css, "  --theme-primary: {};", theme.palette.primary);
    let _ = writeln!(css, "  --theme-secondary: {};", theme.palette.secondary);
    let _ = writeln!(css, "  --theme-accent: {};", theme.palette.accent);
    let _ = writeln!(css, "  --theme-background: {};", theme.palette.background);
    let _ = writeln!(
        css,
        "  --theme-background-image: url(\"{}\");",
        theme.assets.background_image
    );
    let _ = writeln!(
        css,
        "  --theme-hero-image: url(\"{}\");",
        theme.assets.hero_image
    );

    if let Some(font_family) = &theme.presentation.font_family {
        let _ = writeln!(css, "  --theme-font-family: {font_family};");
    }

    css.push_str("}\n");
    css
}

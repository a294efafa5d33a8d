use std::path::Path;

use api::ASSET_PATH;
use common::theme::ThemeTable;

pub fn doc_root_exists(doc_root: &Path) -> anyhow::Result<()> {
    if !doc_root.is_dir() {
        return Err(anyhow::Error::msg(format!(
            "http doc_root {doc_root:?} is not a directory"
        )));
    }

    Ok(())
}

// every asset path named by the theme table that has no file under doc_root
//
// theme asset paths are absolute urls, so the leading slash is dropped before
// joining them onto the document root
pub fn missing_theme_assets(doc_root: &Path, table: &ThemeTable) -> Vec<String> {
    let mut missing = Vec::new();

    for theme in table.themes() {
        let assets = &theme.assets;

        for url in [
            &assets.header_logo,
            &assets.footer_logo,
            &assets.background_image,
            &assets.hero_image,
        ] {
            if !doc_root.join(url.trim_start_matches('/')).is_file() {
                missing.push(url.clone());
            }
        }
    }

    missing
}

// assets outside the asset prefix are still served, but they are probably a typo
pub fn stray_theme_assets(table: &ThemeTable) -> Vec<String> {
    let prefix = format!("/{ASSET_PATH}/");

    table
        .themes()
        .iter()
        .flat_map(|theme| {
            let assets = &theme.assets;
            [
                &assets.header_logo,
                &assets.footer_logo,
                &assets.background_image,
                &assets.hero_image,
            ]
        })
        .filter(|url| !url.starts_with(&prefix))
        .cloned()
        .collect()
}

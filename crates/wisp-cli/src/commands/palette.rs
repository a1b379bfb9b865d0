//! Palette command - list smoke colors per theme

use anyhow::Result;
use wisp_core::Theme;
use wisp_particles::Palette;

pub fn run(theme: Option<Theme>) -> Result<()> {
    let themes: Vec<Theme> = match theme {
        Some(t) => vec![t],
        None => Theme::ALL.to_vec(),
    };

    for theme in themes {
        println!("{theme}:");
        for line in palette_lines(theme) {
            println!("  {line}");
        }
    }
    Ok(())
}

fn palette_lines(theme: Theme) -> Vec<String> {
    Palette::for_theme(theme)
        .colors()
        .enumerate()
        .map(|(i, c)| format!("{i}: {}", c.to_css()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_entry_as_css() {
        let lines = palette_lines(Theme::Light);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "0: rgba(251,191,36,0.8)");
    }
}

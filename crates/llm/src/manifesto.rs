use cyons_common::{CyonsError, Result, Style};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

const BUILTIN_SHERLOCK: &str = include_str!("../manifestos/sherlock.txt");
const BUILTIN_POLICY: &str = include_str!("../manifestos/policy.txt");
const BUILTIN_CRITIC: &str = include_str!("../manifestos/critic.txt");

/// Manifesto texts keyed by style
///
/// Loaded once at startup and shared read-only. Lookups never fail: a style
/// without a manifesto resolves to the default style's text.
#[derive(Debug, Clone)]
pub struct ManifestoSet {
    entries: HashMap<Style, String>,
    default_style: Style,
}

impl ManifestoSet {
    /// Manifestos shipped with the crate
    pub fn builtin(default_style: Style) -> Self {
        let entries = Style::ALL
            .into_iter()
            .map(|style| (style, builtin_text(style).to_string()))
            .collect();

        Self {
            entries,
            default_style,
        }
    }

    /// Build from explicit entries
    ///
    /// Fails if the default style has no entry.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Style, String)>,
        default_style: Style,
    ) -> Result<Self> {
        let entries: HashMap<Style, String> = entries.into_iter().collect();
        if !entries.contains_key(&default_style) {
            return Err(CyonsError::config(format!(
                "No manifesto for default style '{}'",
                default_style.key()
            )));
        }

        Ok(Self {
            entries,
            default_style,
        })
    }

    /// Built-in manifestos overlaid with `<style>.txt` files from `dir`
    ///
    /// A missing directory leaves the built-ins in place.
    pub fn load_dir(dir: &Path, default_style: Style) -> Result<Self> {
        let mut set = Self::builtin(default_style);

        if !dir.is_dir() {
            info!(
                "Manifesto directory {} not found, using built-in manifestos",
                dir.display()
            );
            return Ok(set);
        }

        let read_dir = std::fs::read_dir(dir).map_err(|e| {
            CyonsError::file_system(format!(
                "Failed to read manifesto directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        for entry in read_dir {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let style = match stem.parse::<Style>() {
                Ok(style) => style,
                Err(_) => {
                    warn!("Skipping manifesto {}: unknown style '{}'", path.display(), stem);
                    continue;
                }
            };

            let text = std::fs::read_to_string(&path).map_err(|e| {
                CyonsError::file_system(format!(
                    "Failed to read manifesto {}: {}",
                    path.display(),
                    e
                ))
            })?;

            debug!("Loaded manifesto for '{}' from {}", style.key(), path.display());
            set.entries.insert(style, text);
        }

        info!(
            "Manifestos loaded: {}",
            set.styles()
                .iter()
                .map(|s| s.key())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(set)
    }

    /// Manifesto for `style`, or the default style's manifesto
    pub fn get(&self, style: Style) -> &str {
        self.entries
            .get(&style)
            .or_else(|| self.entries.get(&self.default_style))
            .map(String::as_str)
            .unwrap_or_else(|| builtin_text(self.default_style))
    }

    /// Resolve a raw style key to a style and its manifesto
    pub fn resolve(&self, key: &str) -> (Style, &str) {
        self.resolve_style(Style::parse_or(key, self.default_style))
    }

    /// Style whose manifesto would actually be used for `style`, with that manifesto
    pub fn resolve_style(&self, style: Style) -> (Style, &str) {
        let style = if self.entries.contains_key(&style) {
            style
        } else {
            warn!(
                "No manifesto for style '{}', using default style '{}'",
                style.key(),
                self.default_style.key()
            );
            self.default_style
        };
        (style, self.get(style))
    }

    /// Styles with a manifesto, in presentation order
    pub fn styles(&self) -> Vec<Style> {
        Style::ALL
            .into_iter()
            .filter(|style| self.entries.contains_key(style))
            .collect()
    }

    /// Fallback style
    pub fn default_style(&self) -> Style {
        self.default_style
    }
}

fn builtin_text(style: Style) -> &'static str {
    match style {
        Style::Sherlock => BUILTIN_SHERLOCK,
        Style::Policy => BUILTIN_POLICY,
        Style::Critic => BUILTIN_CRITIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_all_styles() {
        let set = ManifestoSet::builtin(Style::Sherlock);
        assert_eq!(set.styles(), Style::ALL.to_vec());
        assert!(set.get(Style::Sherlock).contains("Sherlock"));
        assert!(set.get(Style::Policy).contains("policy analyst"));
    }

    #[test]
    fn test_from_entries_requires_default() {
        let result = ManifestoSet::from_entries(
            [(Style::Policy, "policy text".to_string())],
            Style::Sherlock,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_style_falls_back_to_default() {
        let set = ManifestoSet::from_entries(
            [(Style::Sherlock, "sherlock text".to_string())],
            Style::Sherlock,
        )
        .unwrap();

        assert_eq!(set.get(Style::Critic), "sherlock text");
        assert_eq!(set.resolve("critic"), (Style::Sherlock, "sherlock text"));
        assert_eq!(set.resolve_style(Style::Critic), (Style::Sherlock, "sherlock text"));
        assert_eq!(set.resolve_style(Style::Sherlock), (Style::Sherlock, "sherlock text"));
        assert_eq!(set.styles(), vec![Style::Sherlock]);
    }

    #[test]
    fn test_resolve_unknown_key() {
        let set = ManifestoSet::from_entries(
            [
                (Style::Sherlock, "sherlock text".to_string()),
                (Style::Critic, "critic text".to_string()),
            ],
            Style::Critic,
        )
        .unwrap();

        assert_eq!(set.resolve("Sherlock"), (Style::Sherlock, "sherlock text"));
        assert_eq!(set.resolve("haiku"), (Style::Critic, "critic text"));
    }

    #[test]
    fn test_load_dir_overrides_builtins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Policy.txt"), "custom policy").unwrap();
        std::fs::write(dir.path().join("poet.txt"), "ignored").unwrap();
        std::fs::write(dir.path().join("critic.md"), "ignored").unwrap();

        let set = ManifestoSet::load_dir(dir.path(), Style::Sherlock).unwrap();
        assert_eq!(set.get(Style::Policy), "custom policy");
        assert_eq!(set.get(Style::Critic), BUILTIN_CRITIC);
        assert_eq!(set.styles().len(), 3);
    }

    #[test]
    fn test_load_missing_dir_uses_builtins() {
        let set = ManifestoSet::load_dir(Path::new("/nonexistent/prompts"), Style::Policy).unwrap();
        assert_eq!(set.default_style(), Style::Policy);
        assert_eq!(set.get(Style::Sherlock), BUILTIN_SHERLOCK);
    }
}

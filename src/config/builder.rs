//! Default configuration file creation.
//!
//! The generated file documents every setting with an aligned trailing
//! comment, produced by [`ConfigBuilder`].

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;
use crate::geo::Position;

/// Create a default config file, optionally pre-filled with coordinates.
///
/// Without coordinates the location lines are written commented out, so the
/// `auto` provider falls through to the (permission-gated) network lookup.
pub fn create_default_config(path: &Path, position: Option<Position>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let mut builder = ConfigBuilder::new()
        .add_section("Location")
        .add_setting(
            "provider",
            &format!("\"{DEFAULT_LOCATION_PROVIDER}\""),
            "Location source: \"auto\", \"manual\", \"network\", \"off\"",
        )
        .add_setting(
            "allow_network",
            &DEFAULT_ALLOW_NETWORK.to_string(),
            "Allow IP-based location lookup (sends a request to the network)",
        );

    builder = match position {
        Some(position) => builder
            .add_setting(
                "latitude",
                &format!("{:.6}", position.latitude()),
                "Geographic latitude (-90 to 90)",
            )
            .add_setting(
                "longitude",
                &format!("{:.6}", position.longitude()),
                "Geographic longitude (-180 to 180)",
            ),
        None => builder
            .add_setting(
                "#latitude",
                "51.507400",
                "Geographic latitude (-90 to 90)",
            )
            .add_setting(
                "#longitude",
                "-0.127800",
                "Geographic longitude (-180 to 180)",
            ),
    };

    let content = builder
        .add_section("Place names")
        .add_setting(
            "reverse_geocoding",
            &DEFAULT_REVERSE_GEOCODING.to_string(),
            "Look up a place name for the position",
        )
        .add_setting(
            "geocoding_url",
            &format!("\"{DEFAULT_GEOCODING_URL}\""),
            "Nominatim-compatible reverse geocoding endpoint",
        )
        .add_setting(
            "network_location_url",
            &format!("\"{DEFAULT_NETWORK_LOCATION_URL}\""),
            "IP geolocation endpoint",
        )
        .add_setting(
            "lookup_timeout",
            &DEFAULT_LOOKUP_TIMEOUT.to_string(),
            &format!(
                "Seconds before a lookup is abandoned ({MINIMUM_LOOKUP_TIMEOUT}-{MAXIMUM_LOOKUP_TIMEOUT})"
            ),
        )
        .add_section("Backgrounds")
        .add_setting(
            "day_background",
            &format!("\"{DEFAULT_DAY_BACKGROUND}\""),
            "Shown between sunrise and sunset",
        )
        .add_setting(
            "night_background",
            &format!("\"{DEFAULT_NIGHT_BACKGROUND}\""),
            "Shown between sunset and sunrise",
        )
        .build();

    fs::write(path, content + "\n")
        .with_context(|| format!("Failed to write config to {}", path.display()))
}

/// Builder for properly formatted configuration files.
struct ConfigBuilder {
    entries: Vec<Entry>,
}

enum Entry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(Entry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(Entry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    /// Render the entries, aligning comments within each section.
    fn build(self) -> String {
        let mut sections: Vec<Vec<String>> = Vec::new();
        let mut current: Vec<&Entry> = Vec::new();
        let mut groups = Vec::new();

        for entry in &self.entries {
            if matches!(entry, Entry::Section(_)) && !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            current.push(entry);
        }
        if !current.is_empty() {
            groups.push(current);
        }

        for group in groups {
            // URLs make some lines very long; align only the short ones
            let width = group
                .iter()
                .filter_map(|entry| match entry {
                    Entry::Setting { line, .. } if line.len() <= 40 => Some(line.len()),
                    _ => None,
                })
                .max()
                .unwrap_or(0)
                + 1;

            let lines = group
                .into_iter()
                .map(|entry| match entry {
                    Entry::Section(title) => title.clone(),
                    Entry::Setting { line, comment } => {
                        let padding = " ".repeat(width.saturating_sub(line.len()).max(1));
                        format!("{line}{padding}{comment}")
                    }
                })
                .collect();
            sections.push(lines);
        }

        sections
            .into_iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

//! Closed sets of opaque selections handed to the animation core by the UI:
//! the active content section, the interaction mode, and the weather tag.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Error returned when a section or weather tag does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} tag: {tag:?}")]
pub struct ParseTagError {
    /// Which tag family was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub tag: String,
}

/// A named content view. Each one has a fixed camera vantage point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Landing view, plane centered.
    #[default]
    Home,
    /// Work history.
    Experience,
    /// Skill categories.
    Skills,
    /// Project cards.
    Projects,
    /// Contact details.
    Contact,
}

impl Section {
    /// Every section, in navigation order.
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Experience,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ];

    /// Camera position for this section, relative to the plane at the origin.
    #[must_use]
    pub fn camera_target(self) -> Vec3 {
        match self {
            Section::Home => Vec3::new(0.0, 1.0, 9.0),
            Section::Experience => Vec3::new(-8.0, 2.0, 4.0),
            Section::Skills => Vec3::new(-6.0, 2.0, 6.0),
            Section::Projects => Vec3::new(8.0, 3.0, 6.0),
            Section::Contact => Vec3::new(-10.0, 3.0, 2.0),
        }
    }

    /// Whether a side content panel is open for this section.
    #[must_use]
    pub fn has_side_panel(self) -> bool {
        self != Section::Home
    }

    /// Lowercase tag used in config files and on the command line.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Experience => "experience",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Section {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTagError {
                kind: "section",
                tag: s.to_string(),
            })
    }
}

/// Which camera-writing controller runs this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Section-driven camera choreography around a stationary plane.
    #[default]
    Portfolio,
    /// The user pilots the plane; the camera chases it.
    FreeFlight,
}

/// Weather preset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    /// Clear blue sky.
    Day,
    /// Warm low sun.
    Sunset,
    /// Dark sky with stars over a lit city.
    #[default]
    Midnight,
    /// Overcast with rain.
    Rainy,
    /// Soft pink sky with falling petals.
    Sakura,
}

impl WeatherKind {
    /// Every weather preset.
    pub const ALL: [WeatherKind; 5] = [
        WeatherKind::Day,
        WeatherKind::Sunset,
        WeatherKind::Midnight,
        WeatherKind::Rainy,
        WeatherKind::Sakura,
    ];

    /// Lowercase tag used in config files and on the command line.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            WeatherKind::Day => "day",
            WeatherKind::Sunset => "sunset",
            WeatherKind::Midnight => "midnight",
            WeatherKind::Rainy => "rainy",
            WeatherKind::Sakura => "sakura",
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for WeatherKind {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherKind::ALL
            .into_iter()
            .find(|weather| weather.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTagError {
                kind: "weather",
                tag: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_tags_roundtrip() {
        for section in Section::ALL {
            assert_eq!(section.tag().parse::<Section>().unwrap(), section);
        }
        assert_eq!(" Skills ".parse::<Section>().unwrap(), Section::Skills);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = "about".parse::<Section>().unwrap_err();
        assert_eq!(err.kind, "section");
        assert_eq!(err.to_string(), "unknown section tag: \"about\"");
    }

    #[test]
    fn test_only_home_has_no_side_panel() {
        assert!(!Section::Home.has_side_panel());
        for section in &Section::ALL[1..] {
            assert!(section.has_side_panel());
        }
    }

    #[test]
    fn test_camera_targets_distinct() {
        for (i, a) in Section::ALL.iter().enumerate() {
            for b in &Section::ALL[i + 1..] {
                assert_ne!(a.camera_target(), b.camera_target());
            }
        }
    }

    #[test]
    fn test_weather_tags_parse() {
        assert_eq!("MIDNIGHT".parse::<WeatherKind>().unwrap(), WeatherKind::Midnight);
        assert!("hail".parse::<WeatherKind>().is_err());
    }
}

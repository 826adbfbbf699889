use skyfolio_scene::{Rgb, WeatherKind};

/// Falling particle style carried by a weather preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precipitation {
    /// No particles.
    None,
    /// Fast straight streaks.
    Rain,
    /// Slow petals with a sideways sway.
    Petals,
}

/// Which variant of the recycled ground chunks is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundStyle {
    /// Trees and low hills.
    Nature,
    /// Blocks with lit windows.
    City,
}

/// Visual parameters of one weather preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherProfile {
    /// Clear color behind everything.
    pub background: Rgb,
    /// Fog color.
    pub fog_color: Rgb,
    /// Distance where fog begins.
    pub fog_near: f32,
    /// Distance where fog is fully opaque.
    pub fog_far: f32,
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Key light color.
    pub sun_color: Rgb,
    /// Key light intensity.
    pub sun_intensity: f32,
    /// Rim/accent light color.
    pub accent: Rgb,
    /// Whether the star field is drawn.
    pub stars: bool,
    /// Tint applied to clouds and ground chunks.
    pub scenery_tint: Rgb,
    /// Particle style.
    pub precipitation: Precipitation,
    /// Fraction of the particle pool that is visible, in `[0, 1]`.
    pub particle_density: f32,
    /// Ground chunk variant.
    pub ground: GroundStyle,
}

const DAY: WeatherProfile = WeatherProfile {
    background: Rgb::hex(0x87ceeb),
    fog_color: Rgb::hex(0xbfe3f5),
    fog_near: 20.0,
    fog_far: 140.0,
    ambient_intensity: 0.9,
    sun_color: Rgb::hex(0xfff4d6),
    sun_intensity: 1.4,
    accent: Rgb::hex(0xf59e0b),
    stars: false,
    scenery_tint: Rgb::WHITE,
    precipitation: Precipitation::None,
    particle_density: 0.0,
    ground: GroundStyle::Nature,
};

const SUNSET: WeatherProfile = WeatherProfile {
    background: Rgb::hex(0xfb923c),
    fog_color: Rgb::hex(0xfdba74),
    fog_near: 15.0,
    fog_far: 100.0,
    ambient_intensity: 0.6,
    sun_color: Rgb::hex(0xfb7185),
    sun_intensity: 1.1,
    accent: Rgb::hex(0xf43f5e),
    stars: false,
    scenery_tint: Rgb::hex(0xfed7aa),
    precipitation: Precipitation::None,
    particle_density: 0.0,
    ground: GroundStyle::Nature,
};

const MIDNIGHT: WeatherProfile = WeatherProfile {
    background: Rgb::hex(0x0f172a),
    fog_color: Rgb::hex(0x0f172a),
    fog_near: 10.0,
    fog_far: 50.0,
    ambient_intensity: 0.35,
    sun_color: Rgb::hex(0xa5b4fc),
    sun_intensity: 0.5,
    accent: Rgb::hex(0x8b5cf6),
    stars: true,
    scenery_tint: Rgb::hex(0x475569),
    precipitation: Precipitation::None,
    particle_density: 0.0,
    ground: GroundStyle::City,
};

const RAINY: WeatherProfile = WeatherProfile {
    background: Rgb::hex(0x475569),
    fog_color: Rgb::hex(0x64748b),
    fog_near: 8.0,
    fog_far: 60.0,
    ambient_intensity: 0.5,
    sun_color: Rgb::hex(0xcbd5e1),
    sun_intensity: 0.6,
    accent: Rgb::hex(0x38bdf8),
    stars: false,
    scenery_tint: Rgb::hex(0x94a3b8),
    precipitation: Precipitation::Rain,
    particle_density: 1.0,
    ground: GroundStyle::Nature,
};

const SAKURA: WeatherProfile = WeatherProfile {
    background: Rgb::hex(0xfce7f3),
    fog_color: Rgb::hex(0xfbcfe8),
    fog_near: 15.0,
    fog_far: 110.0,
    ambient_intensity: 0.85,
    sun_color: Rgb::hex(0xfff1f2),
    sun_intensity: 1.2,
    accent: Rgb::hex(0xec4899),
    stars: false,
    scenery_tint: Rgb::hex(0xfdf2f8),
    precipitation: Precipitation::Petals,
    particle_density: 0.6,
    ground: GroundStyle::Nature,
};

/// Looks up the profile for a weather tag.
#[must_use]
pub fn profile(kind: WeatherKind) -> &'static WeatherProfile {
    match kind {
        WeatherKind::Day => &DAY,
        WeatherKind::Sunset => &SUNSET,
        WeatherKind::Midnight => &MIDNIGHT,
        WeatherKind::Rainy => &RAINY,
        WeatherKind::Sakura => &SAKURA,
    }
}

impl WeatherProfile {
    /// Number of visible particles out of a pool of `capacity`.
    #[must_use]
    pub fn visible_particles(&self, capacity: usize) -> usize {
        if self.precipitation == Precipitation::None {
            return 0;
        }
        let visible = (self.particle_density.clamp(0.0, 1.0) * capacity as f32).round() as usize;
        visible.min(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_midnight_shows_stars() {
        for kind in WeatherKind::ALL {
            assert_eq!(profile(kind).stars, kind == WeatherKind::Midnight, "{kind}");
        }
    }

    #[test]
    fn test_fog_ranges_ordered() {
        for kind in WeatherKind::ALL {
            let p = profile(kind);
            assert!(p.fog_near < p.fog_far, "{kind}");
        }
    }

    #[test]
    fn test_midnight_literal_values() {
        let p = profile(WeatherKind::Midnight);
        assert_eq!(p.fog_far, 50.0);
        assert_eq!(p.ambient_intensity, 0.35);
        assert_eq!(p.ground, GroundStyle::City);
    }

    #[test]
    fn test_precipitation_presets() {
        assert_eq!(profile(WeatherKind::Rainy).precipitation, Precipitation::Rain);
        assert_eq!(profile(WeatherKind::Sakura).precipitation, Precipitation::Petals);
        assert_eq!(profile(WeatherKind::Day).precipitation, Precipitation::None);
    }

    #[test]
    fn test_visible_particles() {
        assert_eq!(profile(WeatherKind::Rainy).visible_particles(400), 400);
        assert_eq!(profile(WeatherKind::Sakura).visible_particles(400), 240);
        assert_eq!(profile(WeatherKind::Day).visible_particles(400), 0);
        assert_eq!(profile(WeatherKind::Rainy).visible_particles(0), 0);
    }
}

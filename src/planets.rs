//! Planetary presets
//!
//! Each body maps to a base hue and a breathing frequency. The table is fixed
//! at compile time and never mutated, so it is safe to share freely.

/// Hue and breathing frequency for one celestial body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetConfig {
    pub name: &'static str,
    pub base_hue_deg: f32,
    pub frequency_hz: f32,
}

/// The ten bodies offered as presets. Hues evoke the body's appearance;
/// frequencies fall with orbital distance (Mercury races, Neptune barely
/// breathes).
pub const PLANETS: [PlanetConfig; 10] = [
    PlanetConfig { name: "Sun", base_hue_deg: 50.0, frequency_hz: 0.5 },
    PlanetConfig { name: "Moon", base_hue_deg: 210.0, frequency_hz: 0.25 },
    PlanetConfig { name: "Mercury", base_hue_deg: 180.0, frequency_hz: 1.4 },
    PlanetConfig { name: "Venus", base_hue_deg: 330.0, frequency_hz: 1.1 },
    PlanetConfig { name: "Earth", base_hue_deg: 120.0, frequency_hz: 1.0 },
    PlanetConfig { name: "Mars", base_hue_deg: 10.0, frequency_hz: 0.8 },
    PlanetConfig { name: "Jupiter", base_hue_deg: 30.0, frequency_hz: 0.4 },
    PlanetConfig { name: "Saturn", base_hue_deg: 45.0, frequency_hz: 0.3 },
    PlanetConfig { name: "Uranus", base_hue_deg: 190.0, frequency_hz: 0.18 },
    PlanetConfig { name: "Neptune", base_hue_deg: 240.0, frequency_hz: 0.12 },
];

/// Look up a preset by name. Unknown names return `None`, never panic.
pub fn planet_config(name: &str) -> Option<&'static PlanetConfig> {
    PLANETS.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_preset_is_pinned() {
        let sun = planet_config("Sun").unwrap();
        assert_eq!(sun.base_hue_deg, 50.0);
        assert_eq!(sun.frequency_hz, 0.5);
    }

    #[test]
    fn mercury_breathes_fast() {
        assert!(planet_config("Mercury").unwrap().frequency_hz > 1.0);
    }

    #[test]
    fn neptune_breathes_slow() {
        assert!(planet_config("Neptune").unwrap().frequency_hz < 0.2);
    }

    #[test]
    fn unknown_body_is_absent() {
        assert!(planet_config("Pluto").is_none());
        assert!(planet_config("").is_none());
    }

    #[test]
    fn all_main_bodies_are_present() {
        for name in [
            "Sun", "Moon", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus",
            "Neptune",
        ] {
            assert!(planet_config(name).is_some(), "missing preset for {}", name);
        }
    }
}

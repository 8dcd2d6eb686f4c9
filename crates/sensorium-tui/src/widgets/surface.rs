//! The display surface: four addressable text mounts, one per sensor field.
//!
//! Mount ids mirror the station's field names. Writing to an id that is not
//! mounted is a [`RenderError::MissingElement`]; the caller logs it and
//! abandons that render without touching the poll loop.

use indexmap::IndexMap;
use thiserror::Error;

use sensorium_api::Reading;

pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";
pub const AIR_QUALITY: &str = "air-quality";
pub const WATER_LEVEL: &str = "water-level";

/// Mount ids in display order.
pub const MOUNTS: [&str; 4] = [TEMPERATURE, HUMIDITY, AIR_QUALITY, WATER_LEVEL];

/// Errors from projecting a reading onto the surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The surface lacks an expected mount element.
    #[error("display surface has no mount element '{id}'")]
    MissingElement { id: String },
}

/// Text-bearing mounts, keyed by id, in display order.
#[derive(Debug)]
pub struct Surface {
    fields: IndexMap<&'static str, String>,
}

impl Surface {
    /// A surface with all four standard mounts, initially empty.
    pub fn new() -> Self {
        let mut fields = IndexMap::with_capacity(MOUNTS.len());
        for id in MOUNTS {
            fields.insert(id, String::new());
        }
        Self { fields }
    }

    /// Write the four formatted fields for a reading.
    ///
    /// Fails without partial effect: all mounts are checked before any text
    /// changes, so a `MissingElement` leaves the previous reading visible.
    pub fn write_reading(&mut self, reading: &Reading) -> Result<(), RenderError> {
        for id in MOUNTS {
            if !self.fields.contains_key(id) {
                return Err(RenderError::MissingElement { id: id.to_owned() });
            }
        }

        self.set(TEMPERATURE, format!("{}°C", reading.temperature));
        self.set(HUMIDITY, format!("{}%", reading.humidity));
        self.set(AIR_QUALITY, format!("{} ppm", reading.air_quality));
        self.set(WATER_LEVEL, reading.water_level.label().to_owned());
        Ok(())
    }

    /// The text currently shown at a mount.
    pub fn text(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    /// Remove a mount. Exists for tests exercising the MissingElement path;
    /// the dashboard never unmounts fields.
    #[cfg(test)]
    pub fn unmount(&mut self, id: &str) {
        self.fields.shift_remove(id);
    }

    fn set(&mut self, id: &'static str, value: String) {
        if let Some(slot) = self.fields.get_mut(id) {
            *slot = value;
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use sensorium_api::WaterLevel;

    use super::*;

    fn reading() -> Reading {
        Reading {
            temperature: 23.5,
            humidity: 60.0,
            air_quality: 400.0,
            water_level: WaterLevel::High,
        }
    }

    #[test]
    fn formats_all_four_fields() {
        let mut surface = Surface::new();
        surface.write_reading(&reading()).expect("all mounts present");

        assert_eq!(surface.text(TEMPERATURE), Some("23.5°C"));
        assert_eq!(surface.text(HUMIDITY), Some("60%"));
        assert_eq!(surface.text(AIR_QUALITY), Some("400 ppm"));
        assert_eq!(surface.text(WATER_LEVEL), Some("High"));
    }

    #[test]
    fn integral_values_format_without_decimals() {
        let mut surface = Surface::new();
        let low = Reading {
            temperature: 18.0,
            humidity: 45.0,
            air_quality: 120.0,
            water_level: WaterLevel::Low,
        };
        surface.write_reading(&low).expect("all mounts present");

        assert_eq!(surface.text(TEMPERATURE), Some("18°C"));
        assert_eq!(surface.text(HUMIDITY), Some("45%"));
        assert_eq!(surface.text(AIR_QUALITY), Some("120 ppm"));
        assert_eq!(surface.text(WATER_LEVEL), Some("Low"));
    }

    #[test]
    fn writing_twice_is_idempotent() {
        let snapshot = |surface: &Surface| -> Vec<Option<String>> {
            MOUNTS
                .iter()
                .map(|id| surface.text(id).map(str::to_owned))
                .collect()
        };

        let mut surface = Surface::new();
        surface.write_reading(&reading()).expect("first write");
        let first = snapshot(&surface);

        surface.write_reading(&reading()).expect("second write");
        assert_eq!(first, snapshot(&surface));
    }

    #[test]
    fn missing_mount_fails_without_partial_writes() {
        let mut surface = Surface::new();
        surface.write_reading(&reading()).expect("first write");

        surface.unmount(WATER_LEVEL);
        let newer = Reading {
            temperature: 30.0,
            ..reading()
        };
        let err = surface.write_reading(&newer).expect_err("mount removed");
        assert_eq!(
            err,
            RenderError::MissingElement {
                id: WATER_LEVEL.to_owned()
            }
        );

        // The previous reading is still displayed untouched
        assert_eq!(surface.text(TEMPERATURE), Some("23.5°C"));
    }
}

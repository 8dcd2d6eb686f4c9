//! Wire model for one sensor sample as served by the station's
//! `/data_endpoint`.
//!
//! Decoding is strict: every field must be present with the right type, and
//! the water level code must be exactly 0 or 1. Anything else is rejected so
//! the poller treats the tick as failed instead of rendering garbage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete water level code: `0` = Low, `1` = High.
///
/// No other codes are defined by the station firmware; out-of-range values
/// fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WaterLevel {
    Low,
    High,
}

impl WaterLevel {
    /// The wire code for this level.
    pub fn code(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }

    /// Display label, as shown in the water level field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

impl TryFrom<u8> for WaterLevel {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Low),
            1 => Ok(Self::High),
            other => Err(format!("unknown water level code {other} (expected 0 or 1)")),
        }
    }
}

impl From<WaterLevel> for u8 {
    fn from(level: WaterLevel) -> Self {
        level.code()
    }
}

impl fmt::Display for WaterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One environmental sensor sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Air quality, parts per million.
    pub air_quality: f64,
    /// Water level code.
    pub water_level: WaterLevel,
}

impl Reading {
    /// The four values as one data series, in display order
    /// (temperature, humidity, air quality, water level code).
    pub fn series(&self) -> [f64; 4] {
        [
            self.temperature,
            self.humidity,
            self.air_quality,
            f64::from(self.water_level.code()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decodes_a_full_reading() {
        let body = r#"{"temperature": 23.5, "humidity": 60, "air_quality": 400, "water_level": 1}"#;
        let reading: Reading = serde_json::from_str(body).expect("valid reading");

        assert_eq!(
            reading,
            Reading {
                temperature: 23.5,
                humidity: 60.0,
                air_quality: 400.0,
                water_level: WaterLevel::High,
            }
        );
        assert_eq!(reading.series(), [23.5, 60.0, 400.0, 1.0]);
    }

    #[test]
    fn rejects_unknown_water_level_codes() {
        let body = r#"{"temperature": 20, "humidity": 50, "air_quality": 100, "water_level": 2}"#;
        let err = serde_json::from_str::<Reading>(body).expect_err("code 2 is undefined");
        assert!(err.to_string().contains("unknown water level code 2"));
    }

    #[test]
    fn rejects_missing_fields() {
        let body = r#"{"temperature": 20, "humidity": 50, "water_level": 0}"#;
        assert!(serde_json::from_str::<Reading>(body).is_err());
    }

    #[test]
    fn rejects_wrong_types() {
        let body =
            r#"{"temperature": "warm", "humidity": 50, "air_quality": 100, "water_level": 0}"#;
        assert!(serde_json::from_str::<Reading>(body).is_err());
    }

    #[test]
    fn water_level_labels() {
        assert_eq!(WaterLevel::Low.label(), "Low");
        assert_eq!(WaterLevel::High.to_string(), "High");
    }
}

//! Legacy anchor parameter strings.
//!
//! Older builds persisted each placed anchor as a single delimited string:
//! seven comma-separated decimals `lat,lng,alt,qx,qy,qz,qw`, prefixed with
//! `Terrain` for anchors resolved against terrain. This module only converts
//! between that format and [`AnchorParameters`]; importing into a graph goes
//! through [`crate::NavigationSession::import_legacy`].

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::waypoint::Position;

const TERRAIN_MARKER: &str = "Terrain";
const FIELD_COUNT: usize = 7;

/// Parameters an anchor was created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorParameters {
    /// Anchor was resolved on terrain rather than at an absolute altitude.
    pub terrain: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// East-up-south rotation as `[x, y, z, w]`.
    pub quaternion: [f32; 4],
}

impl AnchorParameters {
    /// Map the geodetic coordinates onto a waypoint position.
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude, self.altitude)
    }
}

impl FromStr for AnchorParameters {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let terrain = trimmed.contains(TERRAIN_MARKER);
        let stripped = trimmed.replace(TERRAIN_MARKER, "");

        let fields: Vec<&str> = stripped.trim_end_matches(',').split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(invalid(
                input,
                format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
            ));
        }

        let mut numbers = [0f64; FIELD_COUNT];
        for (slot, field) in numbers.iter_mut().zip(&fields) {
            *slot = field
                .trim()
                .parse::<f64>()
                .map_err(|err| invalid(input, format!("field '{}': {err}", field.trim())))?;
        }

        Ok(Self {
            terrain,
            latitude: numbers[0],
            longitude: numbers[1],
            altitude: if terrain { 0.0 } else { numbers[2] },
            quaternion: [
                numbers[3] as f32,
                numbers[4] as f32,
                numbers[5] as f32,
                numbers[6] as f32,
            ],
        })
    }
}

impl fmt::Display for AnchorParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terrain {
            f.write_str(TERRAIN_MARKER)?;
        }
        let [qx, qy, qz, qw] = self.quaternion;
        write!(
            f,
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            self.latitude, self.longitude, self.altitude, qx, qy, qz, qw
        )
    }
}

fn invalid(input: &str, message: String) -> Error {
    Error::InvalidAnchorParameters {
        input: input.to_string(),
        message,
    }
}

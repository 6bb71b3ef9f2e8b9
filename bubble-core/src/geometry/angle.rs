use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Degrees,
    Radians,
}

/// An angle that remembers the unit it was created in.
///
/// Conversions are done lazily by [`Angle::degrees`] and
/// [`Angle::radians`]; [`Angle::normalized`] always returns degrees in
/// `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub unit: AngleUnit,
    pub raw_value: f64,
}

impl Angle {
    pub const fn from_degrees(value: f64) -> Self {
        Self {
            unit: AngleUnit::Degrees,
            raw_value: value,
        }
    }

    pub const fn from_radians(value: f64) -> Self {
        Self {
            unit: AngleUnit::Radians,
            raw_value: value,
        }
    }

    pub fn radians(self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.raw_value.to_radians(),
            AngleUnit::Radians => self.raw_value,
        }
    }

    pub fn degrees(self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.raw_value,
            AngleUnit::Radians => self.raw_value.to_degrees(),
        }
    }

    /// The same direction expressed in degrees within `[0, 360)`.
    pub fn normalized(self) -> Self {
        let mut deg = self.degrees().rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if deg >= 360.0 {
            deg = 0.0;
        }
        Self::from_degrees(deg)
    }

    pub fn is_zero(self) -> bool {
        self.raw_value == 0.0
    }

    /// Point at this angle on the circle of `radius` around `center`.
    ///
    /// With `clockwise` set the angle is mirrored (`-θ`).
    pub fn point_along_circle(self, radius: f64, center: Point, clockwise: bool) -> Point {
        let theta = if clockwise {
            -self.radians()
        } else {
            self.radians()
        };
        Point::new(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin(),
        )
    }

    /// Angle halfway along the arc swept from `self` to `other`.
    ///
    /// The result is in degrees and normalized to `[0, 360)`.
    pub fn mid_angle(self, other: Angle, clockwise: bool) -> Self {
        let leading = self.normalized().degrees();
        let trailing = other.normalized().degrees();

        let mut sweep = if clockwise {
            leading - trailing
        } else {
            trailing - leading
        };
        if sweep < 0.0 {
            sweep += 360.0;
        }

        let mid = if clockwise {
            leading - sweep / 2.0
        } else {
            leading + sweep / 2.0
        };
        Self::from_degrees(mid).normalized()
    }
}

impl Add for Angle {
    type Output = Angle;

    /// Same-unit angles keep their unit, mixed units add in degrees.
    fn add(self, rhs: Angle) -> Angle {
        if self.unit == rhs.unit {
            Angle {
                unit: self.unit,
                raw_value: self.raw_value + rhs.raw_value,
            }
        } else {
            Angle::from_degrees(self.degrees() + rhs.degrees())
        }
    }
}

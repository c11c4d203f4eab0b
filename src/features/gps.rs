use crate::features::error::CoordinateError;
use crate::features::metadata::Fraction;

/// Hemisphere reference letter stored next to each GPS angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

/// Which angle of a position a hemisphere letter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Hemisphere {
    pub fn parse(flag: &str) -> Result<Self, CoordinateError> {
        match flag.trim_end_matches('\0').trim() {
            "N" => Ok(Self::North),
            "S" => Ok(Self::South),
            "E" => Ok(Self::East),
            "W" => Ok(Self::West),
            other => Err(CoordinateError::MalformedCoordinate(format!(
                "unknown hemisphere reference {other:?}"
            ))),
        }
    }

    pub const fn axis(self) -> Axis {
        match self {
            Self::North | Self::South => Axis::Latitude,
            Self::East | Self::West => Axis::Longitude,
        }
    }

    const fn max_degrees(self) -> f64 {
        match self.axis() {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    const fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }
}

fn fraction_to_f64(fraction: Fraction) -> Result<f64, CoordinateError> {
    if fraction.denom == 0 {
        return Err(CoordinateError::MalformedCoordinate(format!(
            "zero denominator in {}/{}",
            fraction.num, fraction.denom
        )));
    }
    Ok(f64::from(fraction.num) / f64::from(fraction.denom))
}

/// Converts a degrees/minutes/seconds triple plus its hemisphere letter into
/// signed decimal degrees.
pub fn decimal_degrees(dms: &[Fraction], hemisphere: &str) -> Result<f64, CoordinateError> {
    signed_degrees(dms, Hemisphere::parse(hemisphere)?)
}

/// Like [`decimal_degrees`], but the letter must belong to `axis`: N/S for a
/// latitude, E/W for a longitude.
pub fn axis_degrees(axis: Axis, dms: &[Fraction], hemisphere: &str) -> Result<f64, CoordinateError> {
    let parsed = Hemisphere::parse(hemisphere)?;
    if parsed.axis() != axis {
        return Err(CoordinateError::MalformedCoordinate(format!(
            "{parsed:?} is not a {axis:?} reference"
        )));
    }
    signed_degrees(dms, parsed)
}

fn signed_degrees(dms: &[Fraction], hemisphere: Hemisphere) -> Result<f64, CoordinateError> {
    let [degrees, minutes, seconds] = match dms {
        [d, m, s, ..] => [*d, *m, *s],
        _ => {
            return Err(CoordinateError::MalformedCoordinate(format!(
                "expected 3 DMS components, found {}",
                dms.len()
            )));
        }
    };

    let magnitude = fraction_to_f64(degrees)?
        + fraction_to_f64(minutes)? / 60.0
        + fraction_to_f64(seconds)? / 3600.0;
    if magnitude > hemisphere.max_degrees() {
        return Err(CoordinateError::MalformedCoordinate(format!(
            "{magnitude} degrees is out of range for {hemisphere:?}"
        )));
    }

    Ok(if hemisphere.is_negative() {
        -magnitude
    } else {
        magnitude
    })
}

pub fn altitude_meters(fraction: Fraction) -> Result<f64, CoordinateError> {
    fraction_to_f64(fraction)
}

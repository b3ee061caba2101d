#![cfg_attr(not(feature = "std"), no_std)]

//! Conversions between rotational speed, elapsed time and angle.
//!
//! Speed is in revolutions per minute, angle in degrees and time in seconds:
//! `360 * rpm / 60` is the angular speed in degrees per second.

/// Degrees in one revolution
pub const DEG_PER_REV: f64 = 360.0;

/// Seconds in one minute
pub const S_PER_MIN: f64 = 60.0;

/// Angle in degrees travelled in `time` seconds at `speed` rpm.
pub fn speed_time_to_angle(speed: f64, time: f64) -> f64 {
    time * DEG_PER_REV * speed / S_PER_MIN
}

/// Time in seconds needed to travel `angle` degrees at `speed` rpm.
///
/// A zero speed is not rejected: the result is `inf` for a nonzero angle and
/// `NaN` for a zero angle.
pub fn speed_angle_to_time(speed: f64, angle: f64) -> f64 {
    angle / (DEG_PER_REV * speed / S_PER_MIN)
}

pub fn rpm_to_deg_s(val: f64) -> f64 {
    val * DEG_PER_REV / S_PER_MIN
}

pub fn deg_s_to_rpm(val: f64) -> f64 {
    val * S_PER_MIN / DEG_PER_REV
}

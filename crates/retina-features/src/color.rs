//! Color-space conversion helpers.
//!
//! The blue-sky descriptor works in HSV with the 8-bit scaling used by the
//! reference data: H in 0-179 (degrees halved), S and V in 0-255.

/// Convert an 8-bit RGB pixel to HSV with H in 0-179 and S, V in 0-255.
#[must_use]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = max - min;

    let s = if max == 0.0 { 0.0 } else { 255.0 * diff / max };

    let h_deg = if diff == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / diff
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    // Halve to fit 0-359 degrees into a byte; 360/2 wraps back to 0.
    let h = ((h_deg / 2.0).round() as u16 % 180) as u8;
    (h, s.round() as u8, max as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
    }

    #[test]
    fn grays_have_zero_saturation() {
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
        assert_eq!(rgb_to_hsv(128, 128, 128), (0, 0, 128));
        assert_eq!(rgb_to_hsv(255, 255, 255), (0, 0, 255));
    }

    #[test]
    fn value_is_channel_max() {
        let (_, _, v) = rgb_to_hsv(10, 200, 50);
        assert_eq!(v, 200);
    }
}

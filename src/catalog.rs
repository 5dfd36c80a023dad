//! Static pad and drill catalogs
//!
//! Immutable lookup tables mapping recognized drawing-unit geometries to
//! photoplotter apertures and drill tools. All lookups are exact-match;
//! a miss is never an error, since callers fall back to the generic
//! aperture range or the default drill tool. 450 drawing units correspond
//! to 100 mil in the output.

/// First aperture id of the generic stroke range.
pub const GENERIC_FIRST: u32 = 20;

/// Width offsets beyond this saturate to the last generic aperture.
pub const MAX_GENERIC_APERTURE: u32 = 35;

/// Number of physical drill tools.
pub const TOOL_COUNT: usize = 12;

/// A round pad recognized by its drawing-unit radius. `knockout` names the
/// wider aperture flashed in the clear image so inner layers keep their
/// insulation annulus around the hole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundPad {
    pub fig_radius: i32,
    pub aperture: u32,
    pub diameter: f64,
    pub description: &'static str,
    pub knockout: u32,
}

/// A rectangular pad recognized by its exact drawing-unit bounding box.
/// Width and height are matched in that order; no swap is attempted, so
/// the table carries both orientations of every pad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPad {
    pub fig_width: i32,
    pub fig_height: i32,
    pub aperture: u32,
    pub width: f64,
    pub height: f64,
    pub description: &'static str,
}

/// One drill catalog row. Several drawing radii may share a physical tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrillSize {
    pub diameter: f64,
    pub fig_radius: i32,
    pub tool: usize,
}

pub const ROUND_PADS: [RoundPad; 17] = [
    RoundPad { fig_radius: 135, aperture: 102, diameter: 0.060, description: "standard round pad", knockout: 151 },
    RoundPad { fig_radius: 125, aperture: 103, diameter: 0.055, description: "small round pad", knockout: 102 },
    RoundPad { fig_radius: 101, aperture: 108, diameter: 0.045, description: "small round pad, 45 mil dia", knockout: 102 },
    RoundPad { fig_radius: 99, aperture: 109, diameter: 0.044, description: "small round pad, 44 mil dia", knockout: 102 },
    RoundPad { fig_radius: 95, aperture: 110, diameter: 0.042, description: "small round pad, 42 mil dia", knockout: 102 },
    RoundPad { fig_radius: 83, aperture: 128, diameter: 0.037, description: "via pad, 37 mil dia", knockout: 150 },
    RoundPad { fig_radius: 70, aperture: 129, diameter: 0.031, description: "via pad, 31 mil dia", knockout: 149 },
    RoundPad { fig_radius: 180, aperture: 133, diameter: 0.080, description: "medium round pad, 80 mil dia", knockout: 133 },
    RoundPad { fig_radius: 225, aperture: 134, diameter: 0.100, description: "medium round pad, 100 mil dia", knockout: 134 },
    RoundPad { fig_radius: 360, aperture: 135, diameter: 0.160, description: "large round pad, 160 mil dia", knockout: 135 },
    RoundPad { fig_radius: 405, aperture: 136, diameter: 0.180, description: "large round pad, 180 mil dia", knockout: 136 },
    RoundPad { fig_radius: 270, aperture: 141, diameter: 0.120, description: "medium round pad, 120 mil dia", knockout: 141 },
    RoundPad { fig_radius: 142, aperture: 142, diameter: 0.063, description: "small round pad, 63 mil dia", knockout: 142 },
    RoundPad { fig_radius: 106, aperture: 149, diameter: 0.047, description: "inner insulation pad, 47mil dia", knockout: 149 },
    RoundPad { fig_radius: 119, aperture: 150, diameter: 0.053, description: "inner insulation pad, 53 mil dia", knockout: 150 },
    RoundPad { fig_radius: 151, aperture: 151, diameter: 0.067, description: "inner insulation pad, 67 mil dia", knockout: 151 },
    RoundPad { fig_radius: 315, aperture: 170, diameter: 0.140, description: "BNC plug solder pad, 140 mil dia", knockout: 170 },
];

pub const RECT_PADS: [RectPad; 70] = [
    RectPad { fig_width: 216, fig_height: 324, aperture: 100, width: 0.072, height: 0.048, description: "DIL standard rect pad 72x48 mil" },
    RectPad { fig_width: 324, fig_height: 216, aperture: 101, width: 0.048, height: 0.072, description: "DIL standard rect pad 48x72 mil" },
    RectPad { fig_width: 90, fig_height: 360, aperture: 104, width: 0.080, height: 0.020, description: "SOIC pad (50 mil sep) 80x20 mil" },
    RectPad { fig_width: 360, fig_height: 90, aperture: 105, width: 0.020, height: 0.080, description: "SOIC pad (50 mil sep) 20x80 mil" },
    RectPad { fig_width: 120, fig_height: 225, aperture: 106, width: 0.050, height: 0.026, description: "SMD (0805) resistor pads, 50x26 mil" },
    RectPad { fig_width: 225, fig_height: 120, aperture: 107, width: 0.026, height: 0.050, description: "SMD (0805) resistor pads, 26x50 mil" },
    RectPad { fig_width: 72, fig_height: 180, aperture: 111, width: 0.040, height: 0.016, description: "TQFP-32 pads, 40x16mil" },
    RectPad { fig_width: 180, fig_height: 72, aperture: 112, width: 0.016, height: 0.040, description: "TQFP-32 pads, 16x40mil" },
    RectPad { fig_width: 315, fig_height: 495, aperture: 113, width: 0.110, height: 0.070, description: "SMD tantal cap (size D) pad 110x70mil" },
    RectPad { fig_width: 495, fig_height: 315, aperture: 114, width: 0.070, height: 0.110, description: "SMD tantal cap (size D) pad 70x110mil" },
    RectPad { fig_width: 288, fig_height: 450, aperture: 115, width: 0.100, height: 0.064, description: "Minicircuits mixer pad 100x64mil" },
    RectPad { fig_width: 450, fig_height: 288, aperture: 116, width: 0.064, height: 0.100, description: "Minicircuits mixer pad 64x100mil" },
    RectPad { fig_width: 270, fig_height: 270, aperture: 117, width: 0.060, height: 0.060, description: "Mini Circuits ROS package pad 60x60mil" },
    RectPad { fig_width: 270, fig_height: 360, aperture: 118, width: 0.080, height: 0.060, description: "Saronix crystal pad 80x60mil" },
    RectPad { fig_width: 360, fig_height: 270, aperture: 119, width: 0.064, height: 0.080, description: "Saronix crystal pad 60x80mil" },
    RectPad { fig_width: 135, fig_height: 270, aperture: 120, width: 0.060, height: 0.030, description: "SMD (1210) pads, 60x30mil" },
    RectPad { fig_width: 270, fig_height: 135, aperture: 121, width: 0.030, height: 0.060, description: "SMD (1210) pads, 30x60mil" },
    RectPad { fig_width: 90, fig_height: 135, aperture: 122, width: 0.030, height: 0.020, description: "SMD (0603) pads, 30x20mil" },
    RectPad { fig_width: 135, fig_height: 90, aperture: 123, width: 0.020, height: 0.030, description: "SMD (0603) pads, 20x30mil" },
    RectPad { fig_width: 120, fig_height: 180, aperture: 124, width: 0.040, height: 0.026, description: "SOT23-5 pico gate pads 40x26mil" },
    RectPad { fig_width: 180, fig_height: 120, aperture: 125, width: 0.026, height: 0.040, description: "SOT23-5 pico gate pads 26x40mil" },
    RectPad { fig_width: 315, fig_height: 54, aperture: 126, width: 0.012, height: 0.070, description: "SSOP pad (25 mil sep) 12x70mil" },
    RectPad { fig_width: 54, fig_height: 315, aperture: 127, width: 0.070, height: 0.012, description: "SSOP pad (25 mil sep) 70x12mil" },
    RectPad { fig_width: 315, fig_height: 315, aperture: 130, width: 0.070, height: 0.070, description: "SMD crystal pad 70x70mil" },
    RectPad { fig_width: 90, fig_height: 150, aperture: 131, width: 0.033, height: 0.020, description: "alt SMD (0603) pads, 33x20mil" },
    RectPad { fig_width: 150, fig_height: 90, aperture: 132, width: 0.020, height: 0.033, description: "alt SMD (0603) pads, 20x33mil" },
    RectPad { fig_width: 162, fig_height: 380, aperture: 137, width: 0.084, height: 0.036, description: "TO-263 pad, 84x36mil" },
    RectPad { fig_width: 380, fig_height: 162, aperture: 138, width: 0.036, height: 0.084, description: "TO-263 pad, 36x84mil" },
    RectPad { fig_width: 200, fig_height: 385, aperture: 139, width: 0.085, height: 0.044, description: "alt TO-263 pad, 85x44mil" },
    RectPad { fig_width: 385, fig_height: 200, aperture: 140, width: 0.044, height: 0.085, description: "alt TO-263 pad, 44x85mil" },
    RectPad { fig_width: 45, fig_height: 180, aperture: 143, width: 0.040, height: 0.010, description: "TSSOP pad 40x10mil" },
    RectPad { fig_width: 180, fig_height: 45, aperture: 144, width: 0.010, height: 0.040, description: "TSSOP pad 10x40mil" },
    RectPad { fig_width: 54, fig_height: 162, aperture: 145, width: 0.036, height: 0.012, description: "LFCSP_VQ pad 36x12mil" },
    RectPad { fig_width: 162, fig_height: 54, aperture: 146, width: 0.012, height: 0.036, description: "LFCSP_VQ pad 12x36mil" },
    RectPad { fig_width: 324, fig_height: 162, aperture: 147, width: 0.036, height: 0.072, description: "minicirc MAR pad 72x36mil" },
    RectPad { fig_width: 162, fig_height: 324, aperture: 148, width: 0.072, height: 0.036, description: "minicirc MAR pad 36x72mil" },
    RectPad { fig_width: 315, fig_height: 45, aperture: 152, width: 0.010, height: 0.070, description: "LQFP128 pad (19.7 mil sep) 10x70mil" },
    RectPad { fig_width: 45, fig_height: 315, aperture: 153, width: 0.070, height: 0.010, description: "LQFP128 pad (19.7 mil sep) 70x10mil" },
    RectPad { fig_width: 64, fig_height: 223, aperture: 154, width: 0.050, height: 0.014, description: "TSSOP pad 50x14mil" },
    RectPad { fig_width: 223, fig_height: 64, aperture: 155, width: 0.014, height: 0.050, description: "TSSOP pad 14x50mil" },
    RectPad { fig_width: 450, fig_height: 720, aperture: 156, width: 0.160, height: 0.100, description: "SOT-223 ground pad 160x100mil" },
    RectPad { fig_width: 720, fig_height: 450, aperture: 157, width: 0.100, height: 0.160, description: "SOT-223 ground pad 100x160mil" },
    RectPad { fig_width: 270, fig_height: 225, aperture: 158, width: 0.050, height: 0.060, description: "SMD Varicap pad 50x60mil" },
    RectPad { fig_width: 225, fig_height: 270, aperture: 159, width: 0.060, height: 0.050, description: "SMD Varicap pad 60x50mil" },
    RectPad { fig_width: 216, fig_height: 162, aperture: 160, width: 0.036, height: 0.048, description: "SOD-123 pad, 36x48mil" },
    RectPad { fig_width: 162, fig_height: 216, aperture: 161, width: 0.048, height: 0.036, description: "SOD-123 pad, 48x36mil" },
    RectPad { fig_width: 315, fig_height: 540, aperture: 162, width: 0.120, height: 0.070, description: "D2pak pad, 120x70mil" },
    RectPad { fig_width: 540, fig_height: 315, aperture: 163, width: 0.070, height: 0.120, description: "D2pak pad, 70x120mil" },
    RectPad { fig_width: 765, fig_height: 900, aperture: 164, width: 0.200, height: 0.170, description: "D2pak back, 200x170mil" },
    RectPad { fig_width: 900, fig_height: 765, aperture: 165, width: 0.170, height: 0.200, description: "D2pak back, 170x200mil" },
    RectPad { fig_width: 450, fig_height: 1350, aperture: 166, width: 0.300, height: 0.100, description: "Inductor S size, 300x100mil" },
    RectPad { fig_width: 1350, fig_height: 450, aperture: 167, width: 0.100, height: 0.300, description: "Inductor S size, 100x300mil" },
    RectPad { fig_width: 495, fig_height: 2250, aperture: 168, width: 0.500, height: 0.110, description: "Inductor XL size, 500x110mil" },
    RectPad { fig_width: 2250, fig_height: 495, aperture: 169, width: 0.110, height: 0.500, description: "Inductor XL size, 110x500mil" },
    RectPad { fig_width: 72, fig_height: 360, aperture: 171, width: 0.080, height: 0.016, description: "MFQP44 pad, 80x16mil" },
    RectPad { fig_width: 360, fig_height: 72, aperture: 172, width: 0.016, height: 0.080, description: "MFQP44 pad, 16x80mil" },
    RectPad { fig_width: 129, fig_height: 211, aperture: 173, width: 0.047, height: 0.029, description: "SOT23-5a pad, 47x29mil" },
    RectPad { fig_width: 211, fig_height: 129, aperture: 174, width: 0.029, height: 0.047, description: "SOT23-5a pad, 29x47mil" },
    RectPad { fig_width: 180, fig_height: 450, aperture: 175, width: 0.100, height: 0.040, description: "1008 coilcraft pad 100x40mil" },
    RectPad { fig_width: 450, fig_height: 180, aperture: 176, width: 0.040, height: 0.100, description: "1008 coilcraft pad 40x100mil" },
    RectPad { fig_width: 248, fig_height: 196, aperture: 177, width: 0.044, height: 0.055, description: "SMD crystal pad 43.5x55.1mil" },
    RectPad { fig_width: 196, fig_height: 248, aperture: 178, width: 0.055, height: 0.044, description: "SMD crystal pad 55.1x43.5mil" },
    RectPad { fig_width: 64, fig_height: 225, aperture: 179, width: 0.050, height: 0.014, description: "TSSOP pad2 50x14mil" },
    RectPad { fig_width: 225, fig_height: 64, aperture: 180, width: 0.014, height: 0.050, description: "TSSOP pad2 14x50mil" },
    RectPad { fig_width: 72, fig_height: 225, aperture: 181, width: 0.050, height: 0.016, description: "uusb pad 50x16mil" },
    RectPad { fig_width: 225, fig_height: 72, aperture: 182, width: 0.016, height: 0.050, description: "uusb pad 16x50mil" },
    RectPad { fig_width: 315, fig_height: 360, aperture: 183, width: 0.080, height: 0.070, description: "uusb pad2 80x70mil" },
    RectPad { fig_width: 360, fig_height: 315, aperture: 184, width: 0.070, height: 0.080, description: "uusb pad2 70x80mil" },
    RectPad { fig_width: 135, fig_height: 225, aperture: 185, width: 0.050, height: 0.030, description: "AT1532 pad 50x30mil" },
    RectPad { fig_width: 225, fig_height: 135, aperture: 186, width: 0.030, height: 0.050, description: "AT1532 pad 30x50mil" },
];

/// Drill toolset. The first row doubles as the default for unrecognized
/// radii.
pub const DRILL_SIZES: [DrillSize; 13] = [
    DrillSize { diameter: 0.028, fig_radius: 65, tool: 1 },   // #70
    DrillSize { diameter: 0.035, fig_radius: 66, tool: 2 },   // #65, standard pin size
    DrillSize { diameter: 0.042, fig_radius: 83, tool: 3 },
    DrillSize { diameter: 0.042, fig_radius: 99, tool: 3 },   // #58
    DrillSize { diameter: 0.052, fig_radius: 123, tool: 4 },  // #55
    DrillSize { diameter: 0.0595, fig_radius: 142, tool: 5 }, // #53
    DrillSize { diameter: 0.086, fig_radius: 203, tool: 6 },  // #44
    DrillSize { diameter: 0.104, fig_radius: 246, tool: 7 },  // #37, extra cost
    DrillSize { diameter: 0.125, fig_radius: 295, tool: 8 },  // 1/8", for 4-40 screws
    DrillSize { diameter: 0.152, fig_radius: 359, tool: 9 },  // #24, for 6-32 screws
    DrillSize { diameter: 0.0145, fig_radius: 31, tool: 10 }, // #79, for tiniest vias
    DrillSize { diameter: 0.021, fig_radius: 45, tool: 11 },  // #75, for small vias
    DrillSize { diameter: 0.177, fig_radius: 392, tool: 12 }, // #16, for M4/8-32 screws
];

/// Generic stroke aperture for a record's line width, saturating at both
/// ends of the reserved id range.
pub fn generic_aperture(width: i32) -> u32 {
    let lo = GENERIC_FIRST as i32;
    let hi = (GENERIC_FIRST + MAX_GENERIC_APERTURE) as i32;
    (width + lo).clamp(lo, hi) as u32
}

/// Emitted diameter of a generic aperture, by offset into the range.
pub fn generic_diameter(index: u32) -> f64 {
    match index {
        0 => 0.001,
        2 => 0.008,
        i => f64::from(i) * 0.003333,
    }
}

pub fn round_pad(fig_radius: i32) -> Option<&'static RoundPad> {
    ROUND_PADS.iter().find(|pad| pad.fig_radius == fig_radius)
}

pub fn rect_pad(fig_width: i32, fig_height: i32) -> Option<&'static RectPad> {
    RECT_PADS
        .iter()
        .find(|pad| pad.fig_width == fig_width && pad.fig_height == fig_height)
}

/// Drill catalog row for a hole radius; unrecognized radii get the default
/// tool.
pub fn drill_size(fig_radius: i32) -> &'static DrillSize {
    DRILL_SIZES
        .iter()
        .find(|size| size.fig_radius == fig_radius)
        .unwrap_or(&DRILL_SIZES[0])
}

/// Real diameter of a physical tool, for the usage report.
pub fn tool_diameter(tool: usize) -> f64 {
    DRILL_SIZES
        .iter()
        .find(|size| size.tool == tool)
        .unwrap_or(&DRILL_SIZES[0])
        .diameter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_lookup_is_exact() {
        assert_eq!(round_pad(135).unwrap().aperture, 102);
        assert!(round_pad(134).is_none());
        assert!(round_pad(136).is_none());
    }

    #[test]
    fn rect_lookup_is_axis_order_sensitive() {
        assert_eq!(rect_pad(216, 324).unwrap().aperture, 100);
        assert_eq!(rect_pad(324, 216).unwrap().aperture, 101);
        assert!(rect_pad(216, 325).is_none());
    }

    #[test]
    fn generic_aperture_saturates() {
        assert_eq!(generic_aperture(0), 20);
        assert_eq!(generic_aperture(-3), 20);
        assert_eq!(generic_aperture(5), 25);
        assert_eq!(generic_aperture(35), 55);
        assert_eq!(generic_aperture(500), 55);
    }

    #[test]
    fn unknown_radius_gets_default_tool() {
        assert_eq!(drill_size(65).tool, 1);
        assert_eq!(drill_size(9999).tool, 1);
        assert_eq!(drill_size(9999).diameter, 0.028);
    }

    #[test]
    fn shared_tools_resolve_to_one_diameter() {
        assert_eq!(drill_size(83).tool, drill_size(99).tool);
        assert_eq!(tool_diameter(3), 0.042);
        assert_eq!(tool_diameter(1), 0.028);
    }
}

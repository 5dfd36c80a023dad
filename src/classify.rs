//! Record routing and aperture matching
//!
//! Decides what each drawing record contributes to the current job and
//! resolves catalog apertures up front, so the emitter renders from the
//! action payload without recomputing any lookup.

use crate::catalog;
use crate::fig::{DrawingRecord, Point, Shape};
use crate::jobs::{JobKind, RenderPass};

/// Fill color marking hole circles (xfig white).
pub const HOLE_COLOR: i32 = 7;

/// Area-fill code for a fully saturated (solid) fill.
pub const SOLID_FILL: i32 = 20;

/// Axis-aligned bounding box of a polyline, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn of(points: &[Point]) -> Self {
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    pub fn center(&self) -> Point {
        Point::new((self.min.x + self.max.x) / 2, (self.min.y + self.max.y) / 2)
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }
}

/// What the emitter should do with a routed record. Aperture ids carried
/// here are final: `aperture` is the width-derived generic stroke
/// aperture, `pad` a catalog match when one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Skip,
    Hole,
    Line { aperture: u32 },
    Polygon { aperture: u32 },
    CircleOutline { aperture: u32 },
    FilledCircle { aperture: u32, pad: Option<u32> },
    RectPad { aperture: u32, pad: Option<u32>, bounds: Bounds },
    Arc { aperture: u32 },
}

pub fn classify(record: &DrawingRecord, pass: &RenderPass<'_>, kind: JobKind) -> Action {
    match kind {
        JobKind::Drill | JobKind::ToolReport => classify_hole(record),
        JobKind::Artwork => classify_artwork(record, pass),
    }
}

/// Hole candidates are solid white circles of zero width at depth 0,
/// independent of any layer set.
fn classify_hole(record: &DrawingRecord) -> Action {
    let is_hole = matches!(record.shape, Shape::Circle { .. })
        && record.sub_type == 3
        && record.line_style == 0
        && record.width == 0
        && record.depth == 0
        && record.fill_color == HOLE_COLOR
        && record.fill_mode == SOLID_FILL;
    if is_hole {
        Action::Hole
    } else {
        Action::Skip
    }
}

fn classify_artwork(record: &DrawingRecord, pass: &RenderPass<'_>) -> Action {
    if !pass.layers.contains(&record.depth) {
        return Action::Skip;
    }
    let aperture = catalog::generic_aperture(record.width);
    match &record.shape {
        Shape::Arc { .. } if record.sub_type == 1 => Action::Arc { aperture },

        Shape::Polyline { points } if (1..=3).contains(&record.sub_type) => {
            let solid = record.fill_mode == SOLID_FILL;
            // Boxes drawn pen-on-fill are pads and must resolve to named
            // apertures, not generic polygon fills.
            if record.sub_type == 2 && solid && record.pen_color == record.fill_color {
                let bounds = Bounds::of(points);
                let pad = catalog::rect_pad(bounds.width(), bounds.height())
                    .map(|entry| entry.aperture);
                Action::RectPad { aperture, pad, bounds }
            } else if solid {
                Action::Polygon { aperture }
            } else {
                Action::Line { aperture }
            }
        }

        Shape::Circle { radii, .. } if record.sub_type == 3 => {
            if record.fill_mode == SOLID_FILL {
                let pad = catalog::round_pad(radii.0).map(|entry| {
                    if pass.knockout_apertures {
                        entry.knockout
                    } else {
                        entry.aperture
                    }
                });
                Action::FilledCircle { aperture, pad }
            } else {
                Action::CircleOutline { aperture }
            }
        }

        _ => Action::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(depth: i32, width: i32, fill_color: i32, fill_mode: i32, radius: i32) -> DrawingRecord {
        DrawingRecord {
            sub_type: 3,
            line_style: 0,
            width,
            pen_color: 0,
            fill_color,
            depth,
            fill_mode,
            shape: Shape::Circle {
                center: Point::new(900, 900),
                radii: (radius, radius),
            },
        }
    }

    fn polyline(sub_type: i32, fill_mode: i32, pen: i32, fill: i32, points: Vec<Point>) -> DrawingRecord {
        DrawingRecord {
            sub_type,
            line_style: 0,
            width: 2,
            pen_color: pen,
            fill_color: fill,
            depth: 21,
            fill_mode,
            shape: Shape::Polyline { points },
        }
    }

    fn artwork_pass(layers: &[i32]) -> RenderPass<'_> {
        RenderPass {
            layers,
            knockout_apertures: false,
        }
    }

    #[test]
    fn drill_routing_ignores_layer_sets() {
        let hole = circle(0, 0, HOLE_COLOR, SOLID_FILL, 65);
        let pass = artwork_pass(&[]);
        assert_eq!(classify(&hole, &pass, JobKind::Drill), Action::Hole);
        assert_eq!(classify(&hole, &pass, JobKind::ToolReport), Action::Hole);
    }

    #[test]
    fn non_hole_circles_are_skipped_in_drill_jobs() {
        let pass = artwork_pass(&[]);
        // wrong depth
        let c = circle(1, 0, HOLE_COLOR, SOLID_FILL, 65);
        assert_eq!(classify(&c, &pass, JobKind::Drill), Action::Skip);
        // wrong fill color
        let c = circle(0, 0, 0, SOLID_FILL, 65);
        assert_eq!(classify(&c, &pass, JobKind::Drill), Action::Skip);
        // nonzero stroke width
        let c = circle(0, 2, HOLE_COLOR, SOLID_FILL, 65);
        assert_eq!(classify(&c, &pass, JobKind::Drill), Action::Skip);
        // unfilled
        let c = circle(0, 0, HOLE_COLOR, -1, 65);
        assert_eq!(classify(&c, &pass, JobKind::Drill), Action::Skip);
    }

    #[test]
    fn artwork_skips_foreign_layers() {
        let c = circle(22, 1, 0, SOLID_FILL, 135);
        assert_eq!(classify(&c, &artwork_pass(&[21]), JobKind::Artwork), Action::Skip);
        assert!(matches!(
            classify(&c, &artwork_pass(&[21, 22]), JobKind::Artwork),
            Action::FilledCircle { .. }
        ));
    }

    #[test]
    fn round_pad_match_is_exact() {
        let pass = artwork_pass(&[0]);
        let hit = circle(0, 1, 0, SOLID_FILL, 135);
        assert_eq!(
            classify(&hit, &pass, JobKind::Artwork),
            Action::FilledCircle {
                aperture: 21,
                pad: Some(102)
            }
        );
        for miss_radius in [134, 136] {
            let miss = circle(0, 1, 0, SOLID_FILL, miss_radius);
            assert_eq!(
                classify(&miss, &pass, JobKind::Artwork),
                Action::FilledCircle {
                    aperture: 21,
                    pad: None
                }
            );
        }
    }

    #[test]
    fn knockout_pass_selects_alternate_aperture() {
        let pass = RenderPass {
            layers: &[0],
            knockout_apertures: true,
        };
        let c = circle(0, 1, 0, SOLID_FILL, 135);
        assert_eq!(
            classify(&c, &pass, JobKind::Artwork),
            Action::FilledCircle {
                aperture: 21,
                pad: Some(151)
            }
        );
    }

    #[test]
    fn box_pad_overrides_polygon_classification() {
        let corners = vec![
            Point::new(0, 0),
            Point::new(216, 0),
            Point::new(216, 324),
            Point::new(0, 324),
            Point::new(0, 0),
        ];
        let pad = polyline(2, SOLID_FILL, 4, 4, corners.clone());
        match classify(&pad, &artwork_pass(&[21]), JobKind::Artwork) {
            Action::RectPad { pad, bounds, .. } => {
                assert_eq!(pad, Some(100));
                assert_eq!(bounds.center(), Point::new(108, 162));
            }
            other => panic!("expected rect pad, got {:?}", other),
        }

        // pen != fill: plain filled polygon
        let filled = polyline(2, SOLID_FILL, 0, 4, corners.clone());
        assert!(matches!(
            classify(&filled, &artwork_pass(&[21]), JobKind::Artwork),
            Action::Polygon { .. }
        ));

        // not solid: outline only
        let outline = polyline(2, -1, 4, 4, corners);
        assert!(matches!(
            classify(&outline, &artwork_pass(&[21]), JobKind::Artwork),
            Action::Line { .. }
        ));
    }

    #[test]
    fn rect_lookup_does_not_swap_axes() {
        let tall = vec![
            Point::new(0, 0),
            Point::new(324, 0),
            Point::new(324, 216),
            Point::new(0, 216),
            Point::new(0, 0),
        ];
        let pad = polyline(2, SOLID_FILL, 4, 4, tall);
        match classify(&pad, &artwork_pass(&[21]), JobKind::Artwork) {
            Action::RectPad { pad, .. } => assert_eq!(pad, Some(101)),
            other => panic!("expected rect pad, got {:?}", other),
        }
    }

    #[test]
    fn unsupported_sub_types_are_skipped() {
        let pass = artwork_pass(&[21]);
        // arc-box polyline
        let p = polyline(4, -1, 0, 7, vec![Point::new(0, 0), Point::new(9, 9)]);
        assert_eq!(classify(&p, &pass, JobKind::Artwork), Action::Skip);
        // pie-wedge arc
        let arc = DrawingRecord {
            sub_type: 2,
            line_style: 0,
            width: 1,
            pen_color: 0,
            fill_color: 7,
            depth: 21,
            fill_mode: -1,
            shape: Shape::Arc {
                start: Point::new(0, 0),
                mid: Point::new(5, 5),
                end: Point::new(10, 0),
                center: Point::new(5, 0),
            },
        };
        assert_eq!(classify(&arc, &pass, JobKind::Artwork), Action::Skip);
    }
}

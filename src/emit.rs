//! Output rendering
//!
//! One `Emitter` per output job renders classified records into the exact
//! textual grammar of its target format: plain Gerber (RS274D), extended
//! two-image Gerber (RS274X), Excellon-style drill programs, and the tool
//! usage report. Writes follow a fixed state machine; extended artwork
//! jobs pass through `SecondPassPending` between the dark and clear
//! images, which share the single aperture catalog declared in the header.

use std::io::Write;

use crate::catalog::{self, MAX_GENERIC_APERTURE, RECT_PADS, ROUND_PADS};
use crate::classify::{Action, Bounds};
use crate::drill::ToolSelector;
use crate::error::Result;
use crate::fig::{DrawingRecord, Point, Shape};
use crate::jobs::{Job, JobKind};
use crate::transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    HeaderPending,
    Body,
    SecondPassPending,
    Closed,
}

pub struct Emitter<W: Write> {
    out: W,
    kind: JobKind,
    extended: bool,
    image_name: &'static str,
    source_name: String,
    target_name: String,
    tools: ToolSelector,
    state: State,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, job: &Job, extended: bool, source_name: &str, target_name: &str) -> Self {
        Self {
            out,
            kind: job.kind,
            extended,
            image_name: job.image_name,
            source_name: source_name.to_string(),
            target_name: target_name.to_string(),
            tools: ToolSelector::new(),
            state: State::HeaderPending,
        }
    }

    /// Write the format header and enter the body state.
    pub fn begin(&mut self) -> Result<()> {
        debug_assert_eq!(self.state, State::HeaderPending);
        match self.kind {
            JobKind::Drill => self.drill_header()?,
            // the report renders entirely in its trailer
            JobKind::ToolReport => {}
            JobKind::Artwork => {
                if self.extended {
                    self.extended_header()?;
                } else {
                    self.gerber_header()?;
                }
            }
        }
        self.state = State::Body;
        Ok(())
    }

    /// Render one routed record.
    pub fn record(&mut self, record: &DrawingRecord, action: &Action) -> Result<()> {
        debug_assert_eq!(self.state, State::Body);
        match *action {
            Action::Skip => Ok(()),
            Action::Hole => self.hole(record),
            Action::Line { aperture } => {
                if let Shape::Polyline { ref points } = record.shape {
                    self.select_generic(aperture)?;
                    self.polyline(points, false)?;
                }
                Ok(())
            }
            Action::Polygon { aperture } => {
                if let Shape::Polyline { ref points } = record.shape {
                    self.select_generic(aperture)?;
                    self.polyline(points, true)?;
                }
                Ok(())
            }
            Action::CircleOutline { aperture } => {
                if let Shape::Circle { center, radii } = record.shape {
                    self.select_generic(aperture)?;
                    self.circle(center, radii.0, false)?;
                }
                Ok(())
            }
            Action::FilledCircle { aperture, pad } => {
                if let Shape::Circle { center, radii } = record.shape {
                    // the generic select precedes the pad resolution
                    self.select_generic(aperture)?;
                    match pad {
                        Some(id) => self.flash(id, transform::artwork_point(center))?,
                        None => self.circle(center, radii.0, true)?,
                    }
                }
                Ok(())
            }
            Action::RectPad { aperture, pad, bounds } => match pad {
                Some(id) => self.flash(id, transform::artwork_point(bounds.center())),
                None => {
                    self.select_generic(aperture)?;
                    self.filled_rect(&bounds)
                }
            },
            Action::Arc { aperture } => {
                if let Shape::Arc { start, mid, end, center } = record.shape {
                    self.select_generic(aperture)?;
                    self.arc(start, mid, end, center)?;
                }
                Ok(())
            }
        }
    }

    /// Close the dark image and open the clear (knockout) image. Only
    /// meaningful for extended artwork jobs.
    pub fn begin_clear_image(&mut self) -> Result<()> {
        debug_assert_eq!(self.state, State::Body);
        debug_assert!(self.extended && self.kind == JobKind::Artwork);
        writeln!(self.out, "D02*")?;
        self.state = State::SecondPassPending;
        writeln!(self.out, "%LN{}2*%", self.image_name)?;
        writeln!(self.out, "%LPC*%")?;
        self.state = State::Body;
        Ok(())
    }

    /// Write the format trailer and close the emitter; no further writes
    /// are permitted.
    pub fn finish(&mut self) -> Result<()> {
        debug_assert_eq!(self.state, State::Body);
        match self.kind {
            JobKind::Drill => writeln!(self.out, "M30")?,
            JobKind::ToolReport => self.tool_table()?,
            JobKind::Artwork => writeln!(self.out, "D02*M02*")?,
        }
        self.out.flush()?;
        self.state = State::Closed;
        Ok(())
    }

    // ----- headers -----

    fn gerber_header(&mut self) -> Result<()> {
        writeln!(self.out, "%FSLAX23Y23*%")?;
        writeln!(self.out, "%MOIN*%")?;
        self.aperture_catalog()
    }

    fn extended_header(&mut self) -> Result<()> {
        writeln!(self.out, "%FSLAX23Y23*%")?;
        writeln!(self.out, "%MOIN*%")?;
        writeln!(self.out, "%IN{}*%", self.image_name)?;
        self.aperture_catalog()?;
        writeln!(self.out, "%LN{}1*%", self.image_name)?;
        writeln!(self.out, "%LPD*%")?;
        Ok(())
    }

    /// Every aperture either image may reference: the generic stroke
    /// range, then both pad tables.
    fn aperture_catalog(&mut self) -> Result<()> {
        writeln!(self.out, "G04 Aperture definition for polygons or lines *")?;
        for index in 0..=MAX_GENERIC_APERTURE {
            writeln!(
                self.out,
                "%ADD{:2}C,{:8.6}*%",
                index + catalog::GENERIC_FIRST,
                catalog::generic_diameter(index)
            )?;
        }
        writeln!(self.out, "G04 Aperture definitions for round pads *")?;
        for pad in &ROUND_PADS {
            writeln!(self.out, "%ADD{:3}C,{:05.3}*%", pad.aperture, pad.diameter)?;
        }
        writeln!(self.out, "G04 Aperture definitions for square pads *")?;
        for pad in &RECT_PADS {
            writeln!(
                self.out,
                "%ADD{:03}R,{:05.3}X{:05.3}*%",
                pad.aperture, pad.width, pad.height
            )?;
        }
        Ok(())
    }

    fn drill_header(&mut self) -> Result<()> {
        let now = chrono::Local::now();
        writeln!(self.out)?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "/%********************************************************"
        )?;
        writeln!(self.out, "/%")?;
        writeln!(self.out, "/%")?;
        writeln!(
            self.out,
            "/%   Program: fig2gerber {}",
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(
            self.out,
            "/%   Date          : {}",
            now.format("%a %b %e %H:%M:%S %Y")
        )?;
        writeln!(self.out, "/%   Source file   : {}", self.source_name)?;
        writeln!(self.out, "/%   Dest file     : {}", self.target_name)?;
        writeln!(self.out, "/%   Format        : Drill file")?;
        writeln!(self.out, "/%")?;
        writeln!(self.out, "/%")?;
        writeln!(
            self.out,
            "/%********************************************************"
        )?;
        writeln!(self.out)?;
        writeln!(self.out)?;
        writeln!(self.out, "/DBGRID 1")?;
        writeln!(self.out, "/DBUNIT 8")?;
        writeln!(self.out, "M72")?;
        Ok(())
    }

    // ----- bodies -----

    fn select_generic(&mut self, aperture: u32) -> Result<()> {
        writeln!(self.out, "G54D{:02}*", aperture)?;
        Ok(())
    }

    fn polyline(&mut self, points: &[Point], filled: bool) -> Result<()> {
        let first = transform::artwork_point(points[0]);
        if filled {
            write!(self.out, "G36*")?;
        }
        write!(self.out, "G01X{:05}Y{:05}D02*", first.x, first.y)?;
        if points.len() == 1 {
            write!(self.out, "D03*D02*")?;
        } else {
            for point in &points[1..] {
                let p = transform::artwork_point(*point);
                write!(self.out, "X{:05}Y{:05}D01*", p.x, p.y)?;
            }
            if filled {
                write!(self.out, "D02*")?;
            }
        }
        if filled {
            write!(self.out, "G37*")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Full 360-degree circular interpolation, optionally as a filled
    /// region.
    fn circle(&mut self, center: Point, radius: i32, filled: bool) -> Result<()> {
        let c = transform::artwork_point(center);
        let r = transform::artwork_length(radius);
        if filled {
            writeln!(
                self.out,
                "G36*G75*G01*X{0:05}Y{1:05}D02*G03X{0:05}Y{1:05}I{2:06}J{3:05}D01*G01*D02*G37*",
                c.x + r,
                c.y,
                -r,
                0
            )?;
        } else {
            writeln!(
                self.out,
                "G75*G01*X{0:05}Y{1:05}D02*G03X{0:05}Y{1:05}I{2:06}J{3:05}D01*G01*",
                c.x + r,
                c.y,
                -r,
                0
            )?;
        }
        Ok(())
    }

    fn flash(&mut self, aperture: u32, at: Point) -> Result<()> {
        writeln!(
            self.out,
            "G54D{:03}*G01*X{:05}Y{:05}D02*D03*",
            aperture, at.x, at.y
        )?;
        Ok(())
    }

    fn filled_rect(&mut self, bounds: &Bounds) -> Result<()> {
        let c = transform::artwork_point(bounds.center());
        let half =
            transform::artwork_point(Point::new(bounds.width() / 2, bounds.height() / 2));
        write!(self.out, "G36*G01X{:05}Y{:05}D02*", c.x - half.x, c.y - half.y)?;
        write!(self.out, "X{:05}Y{:05}D01*", c.x + half.x, c.y - half.y)?;
        write!(self.out, "X{:05}Y{:05}D01*", c.x + half.x, c.y + half.y)?;
        write!(self.out, "X{:05}Y{:05}D01*", c.x - half.x, c.y + half.y)?;
        write!(self.out, "X{:05}Y{:05}D01*", c.x - half.x, c.y - half.y)?;
        writeln!(self.out, "X{:05}Y{:05}D02*G37*", c.x - half.x, c.y - half.y)?;
        Ok(())
    }

    fn arc(&mut self, start: Point, mid: Point, end: Point, center: Point) -> Result<()> {
        // sign of the cross product of the untransformed chords picks the
        // interpolation direction
        let cross = (mid.x - start.x) * (end.y - mid.y) - (mid.y - start.y) * (end.x - mid.x);
        let s = transform::artwork_point(start);
        let e = transform::artwork_point(end);
        let c = transform::artwork_point(center);
        writeln!(
            self.out,
            "G75*G01*X{:05}Y{:05}D02*{}X{:05}Y{:05}I{:05}J{:05}D01*G01*D02*",
            s.x,
            s.y,
            if cross > 0 { "G02" } else { "G03" },
            e.x,
            e.y,
            c.x - s.x,
            c.y - s.y
        )?;
        Ok(())
    }

    fn hole(&mut self, record: &DrawingRecord) -> Result<()> {
        let Shape::Circle { center, radii } = record.shape else {
            return Ok(());
        };
        match self.kind {
            JobKind::Drill => {
                let p = transform::drill_point(center);
                let (size, changed) = self.tools.select(radii.0);
                if changed {
                    writeln!(self.out, "T{}C{:05.3}", size.tool, size.diameter)?;
                }
                writeln!(self.out, "X{:06}Y{:06}", p.x, p.y)?;
            }
            JobKind::ToolReport => self.tools.record_usage(radii.0),
            JobKind::Artwork => {}
        }
        Ok(())
    }

    // ----- trailers -----

    fn tool_table(&mut self) -> Result<()> {
        writeln!(self.out, "TOOL\tCOUNT\tSIZE")?;
        let rows: Vec<(usize, u32)> = self.tools.usage().collect();
        for (tool, count) in rows {
            writeln!(
                self.out,
                "{}\t{}\t{:06.4}",
                tool,
                count,
                catalog::tool_diameter(tool)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, SOLID_FILL};
    use crate::jobs::RenderPass;

    fn render(job: &Job, extended: bool, records: &[DrawingRecord], layers: &[i32]) -> String {
        let mut buffer = Vec::new();
        let mut emitter = Emitter::new(&mut buffer, job, extended, "input.fig", "output");
        emitter.begin().unwrap();
        let pass = RenderPass {
            layers,
            knockout_apertures: false,
        };
        for record in records {
            let action = classify(record, &pass, job.kind);
            emitter.record(record, &action).unwrap();
        }
        if extended && job.kind == JobKind::Artwork {
            emitter.begin_clear_image().unwrap();
            let pass = job.clear_pass();
            for record in records {
                let action = classify(record, &pass, job.kind);
                emitter.record(record, &action).unwrap();
            }
        }
        emitter.finish().unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn solid_circle(depth: i32, radius: i32) -> DrawingRecord {
        DrawingRecord {
            sub_type: 3,
            line_style: 0,
            width: 1,
            pen_color: 0,
            fill_color: 0,
            depth,
            fill_mode: SOLID_FILL,
            shape: Shape::Circle {
                center: Point::new(900, 900),
                radii: (radius, radius),
            },
        }
    }

    fn hole_circle(radius: i32) -> DrawingRecord {
        DrawingRecord {
            sub_type: 3,
            line_style: 0,
            width: 0,
            pen_color: 7,
            fill_color: 7,
            depth: 0,
            fill_mode: SOLID_FILL,
            shape: Shape::Circle {
                center: Point::new(900, 900),
                radii: (radius, radius),
            },
        }
    }

    #[test]
    fn plain_header_declares_format_and_all_apertures() {
        let out = render(&Job::component_copper(), false, &[], &[21]);
        assert!(out.starts_with("%FSLAX23Y23*%\n%MOIN*%\n"));
        assert!(out.contains("%ADD20C,0.001000*%"));
        assert!(out.contains("%ADD22C,0.008000*%"));
        assert!(out.contains("%ADD55C,0.116655*%"));
        assert!(out.contains("%ADD102C,0.060*%"));
        assert!(out.contains("%ADD100R,0.072X0.048*%"));
        assert!(out.ends_with("D02*M02*\n"));
        // no image declarations in the plain variant
        assert!(!out.contains("%IN"));
        assert!(!out.contains("%LP"));
    }

    #[test]
    fn recognized_round_pad_flashes_after_generic_select() {
        let out = render(&Job::component_copper(), false, &[solid_circle(21, 135)], &[21]);
        assert!(out.contains("G54D21*\nG54D102*G01*X00200Y00200D02*D03*\n"));
        assert!(!out.contains("G36*"));
    }

    #[test]
    fn unrecognized_radius_falls_back_to_filled_outline() {
        let out = render(&Job::component_copper(), false, &[solid_circle(21, 999)], &[21]);
        // 999 -> 222 output units
        assert!(out.contains(
            "G36*G75*G01*X00422Y00200D02*G03X00422Y00200I-00222J00000D01*G01*D02*G37*"
        ));
        assert!(!out.contains("D03*"));
    }

    #[test]
    fn extended_output_has_two_images_and_one_catalog() {
        let records = [solid_circle(21, 135), solid_circle(20, 135)];
        let out = render(&Job::component_copper(), true, &records, &[21]);
        assert_eq!(out.matches("G04 Aperture definition").count(), 3);
        assert!(out.contains("%INCOMPONENTSIDE*%"));
        let dark = out.find("%LNCOMPONENTSIDE1*%\n%LPD*%").unwrap();
        let clear = out.find("%LNCOMPONENTSIDE2*%\n%LPC*%").unwrap();
        assert!(dark < clear);
        // ordinary aperture in the dark image, knockout aperture in the
        // clear image
        assert!(out[dark..clear].contains("G54D102*"));
        assert!(out[clear..].contains("G54D151*"));
        assert!(!out[clear..].contains("G54D102*"));
        assert!(out.ends_with("D02*M02*\n"));
    }

    #[test]
    fn drill_job_latches_tool_selection() {
        let records = [
            hole_circle(65),
            hole_circle(65),
            hole_circle(66),
            hole_circle(65),
        ];
        let out = render(&Job::drill(), false, &records, &[]);
        assert!(out.contains("M72\n"));
        let body: Vec<&str> = out
            .lines()
            .skip_while(|line| *line != "M72")
            .skip(1)
            .collect();
        assert_eq!(
            body,
            vec![
                "T1C0.028",
                "X002000Y002000",
                "X002000Y002000",
                "T2C0.035",
                "X002000Y002000",
                "T1C0.028",
                "X002000Y002000",
                "M30",
            ]
        );
    }

    #[test]
    fn tool_report_lists_only_used_tools() {
        let records = [hole_circle(65), hole_circle(65), hole_circle(142)];
        let out = render(&Job::tool_report(), false, &records, &[]);
        assert_eq!(out, "TOOL\tCOUNT\tSIZE\n1\t2\t0.0280\n5\t1\t0.0595\n");
    }

    #[test]
    fn polygon_is_bracketed_and_closed() {
        let record = DrawingRecord {
            sub_type: 1,
            line_style: 0,
            width: 2,
            pen_color: 0,
            fill_color: 4,
            depth: 21,
            fill_mode: SOLID_FILL,
            shape: Shape::Polyline {
                points: vec![
                    Point::new(0, 0),
                    Point::new(900, 0),
                    Point::new(900, 900),
                    Point::new(0, 0),
                ],
            },
        };
        let out = render(&Job::component_copper(), false, &[record], &[21]);
        assert!(out.contains(
            "G54D22*\nG36*G01X00000Y00000D02*X00000Y00200D01*X00200Y00200D01*X00000Y00000D01*D02*G37*\n"
        ));
    }

    #[test]
    fn unmatched_box_renders_as_filled_rectangle() {
        let record = DrawingRecord {
            sub_type: 2,
            line_style: 0,
            width: 3,
            pen_color: 4,
            fill_color: 4,
            depth: 21,
            fill_mode: SOLID_FILL,
            shape: Shape::Polyline {
                points: vec![
                    Point::new(0, 0),
                    Point::new(90, 0),
                    Point::new(90, 90),
                    Point::new(0, 90),
                    Point::new(0, 0),
                ],
            },
        };
        let out = render(&Job::component_copper(), false, &[record], &[21]);
        // center (45,45) -> (10,10); half-deltas (45,45) -> (10,10)
        assert!(out.contains("G54D23*\nG36*G01X00000Y00000D02*X00020Y00000D01*X00020Y00020D01*X00000Y00020D01*X00000Y00000D01*X00000Y00000D02*G37*\n"));
    }

    #[test]
    fn arc_direction_follows_three_point_orientation() {
        let mut record = DrawingRecord {
            sub_type: 1,
            line_style: 0,
            width: 1,
            pen_color: 0,
            fill_color: 7,
            depth: 21,
            fill_mode: -1,
            shape: Shape::Arc {
                start: Point::new(0, 900),
                mid: Point::new(450, 450),
                end: Point::new(900, 900),
                center: Point::new(450, 900),
            },
        };
        let out = render(&Job::component_copper(), false, &[record.clone()], &[21]);
        // (450,-450) x (450,450) -> positive cross: clockwise
        assert!(out.contains("G02"));

        if let Shape::Arc { mid, .. } = &mut record.shape {
            *mid = Point::new(450, 1350);
        }
        let out = render(&Job::component_copper(), false, &[record], &[21]);
        assert!(out.contains("G03"));
    }
}

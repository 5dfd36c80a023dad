//! XFig 3.2 record stream parsing
//!
//! This module decodes the subset of XFig object records the fabrication
//! pipeline consumes: circles/ellipses (class 1), polylines/polygons
//! (class 2) and arcs (class 5). Every other object class is skipped
//! together with its continuation lines. A reader is cheap to construct,
//! so each render pass runs over a fresh one instead of seeking the
//! underlying stream.

use crate::error::{Fig2GerberError, Result};
use tracing::debug;

/// Header marker required on the first line of a drawing.
pub const FIG_MARKER: &str = "#FIG 3.2";

/// Fixed header lines following the marker, skipped unconditionally.
const HEADER_LINES: usize = 8;

/// A point in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Kind-specific geometry of a drawing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Circle or ellipse; `radii` holds the x and y radius (equal for a
    /// true circle).
    Circle { center: Point, radii: (i32, i32) },

    /// Polyline, polygon or box; the declared points in drawing order.
    Polyline { points: Vec<Point> },

    /// Three-point arc. `mid` lies on the arc between `start` and `end`;
    /// `center` is the (truncated) circle center.
    Arc {
        start: Point,
        mid: Point,
        end: Point,
        center: Point,
    },
}

/// One decoded primitive. Immutable once parsed; produced once per record
/// group and consumed once by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingRecord {
    pub sub_type: i32,
    pub line_style: i32,
    pub width: i32,
    pub pen_color: i32,
    pub fill_color: i32,
    pub depth: i32,
    pub fill_mode: i32,
    pub shape: Shape,
}

/// Positional field cursor over one record line.
struct Fields<'a> {
    tokens: std::str::SplitAsciiWhitespace<'a>,
    line: usize,
}

impl<'a> Fields<'a> {
    fn new(line_text: &'a str, line: usize) -> Self {
        Self {
            tokens: line_text.split_ascii_whitespace(),
            line,
        }
    }

    fn raw(&mut self, what: &str) -> Result<&'a str> {
        self.tokens.next().ok_or_else(|| {
            Fig2GerberError::MalformedRecord {
                line: self.line,
                reason: format!("missing field {}", what),
            }
            .into()
        })
    }

    fn int(&mut self, what: &str) -> Result<i32> {
        let token = self.raw(what)?;
        token.parse().map_err(|_| {
            Fig2GerberError::MalformedRecord {
                line: self.line,
                reason: format!("field {} is not an integer: {:?}", what, token),
            }
            .into()
        })
    }

    fn float(&mut self, what: &str) -> Result<f64> {
        let token = self.raw(what)?;
        token.parse().map_err(|_| {
            Fig2GerberError::MalformedRecord {
                line: self.line,
                reason: format!("field {} is not a number: {:?}", what, token),
            }
            .into()
        })
    }
}

/// Lazy, restartable sequence of [`DrawingRecord`]s over an in-memory
/// drawing. Validates the format header on construction.
#[derive(Debug)]
pub struct RecordReader<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(source: &'a str) -> Result<Self> {
        let mut lines = source.lines();
        let first = lines.next().unwrap_or("");
        if !first.starts_with(FIG_MARKER) {
            return Err(Fig2GerberError::UnsupportedFormat {
                found: first.chars().take(16).collect(),
                expected: FIG_MARKER.to_string(),
            }
            .into());
        }
        let mut line_no = 1;
        for _ in 0..HEADER_LINES {
            if lines.next().is_none() {
                return Err(Fig2GerberError::TruncatedHeader { lines: line_no }.into());
            }
            line_no += 1;
        }
        Ok(Self { lines, line_no })
    }

    /// Next supported record, or `None` at end of stream.
    pub fn next_record(&mut self) -> Result<Option<DrawingRecord>> {
        while let Some(line) = self.lines.next() {
            self.line_no += 1;
            if line.is_empty() {
                continue;
            }
            if line.starts_with(' ') || line.starts_with('\t') {
                // continuation of a skipped object
                continue;
            }
            let mut fields = Fields::new(line, self.line_no);
            let class = fields.int("object class")?;
            match class {
                1 => return Ok(Some(Self::circle(fields)?)),
                2 => return Ok(Some(self.polyline(fields)?)),
                5 => return Ok(Some(Self::arc(fields)?)),
                other => {
                    debug!("skipping object class {} at line {}", other, self.line_no);
                }
            }
        }
        Ok(None)
    }

    fn circle(mut f: Fields) -> Result<DrawingRecord> {
        let sub_type = f.int("sub_type")?;
        let line_style = f.int("line_style")?;
        let width = f.int("thickness")?;
        let pen_color = f.int("pen_color")?;
        let fill_color = f.int("fill_color")?;
        let depth = f.int("depth")?;
        f.int("pen_style")?;
        let fill_mode = f.int("area_fill")?;
        f.float("style_val")?;
        f.int("direction")?;
        f.float("angle")?;
        let center = Point::new(f.int("center_x")?, f.int("center_y")?);
        let radii = (f.int("radius_x")?, f.int("radius_y")?);
        // start/end point fields trail on the same line; not used
        Ok(DrawingRecord {
            sub_type,
            line_style,
            width,
            pen_color,
            fill_color,
            depth,
            fill_mode,
            shape: Shape::Circle { center, radii },
        })
    }

    fn polyline(&mut self, mut f: Fields) -> Result<DrawingRecord> {
        let sub_type = f.int("sub_type")?;
        let line_style = f.int("line_style")?;
        let width = f.int("thickness")?;
        let pen_color = f.int("pen_color")?;
        let fill_color = f.int("fill_color")?;
        let depth = f.int("depth")?;
        f.int("pen_style")?;
        let fill_mode = f.int("area_fill")?;
        f.float("style_val")?;
        f.int("join_style")?;
        f.int("cap_style")?;
        f.int("radius")?;
        f.int("forward_arrow")?;
        f.int("backward_arrow")?;
        let npoints = f.int("npoints")?;
        if npoints < 1 {
            return Err(Fig2GerberError::MalformedRecord {
                line: f.line,
                reason: format!("polyline declares {} points", npoints),
            }
            .into());
        }
        let points = self.read_points(npoints as usize)?;
        Ok(DrawingRecord {
            sub_type,
            line_style,
            width,
            pen_color,
            fill_color,
            depth,
            fill_mode,
            shape: Shape::Polyline { points },
        })
    }

    /// Consume exactly `count` coordinate pairs as a flat token stream;
    /// pairs may span any number of physical lines.
    fn read_points(&mut self, count: usize) -> Result<Vec<Point>> {
        let mut values: Vec<i32> = Vec::with_capacity(count * 2);
        'lines: while values.len() < count * 2 {
            let Some(line) = self.lines.next() else {
                return Err(Fig2GerberError::TruncatedPolyline {
                    expected: count,
                    read: values.len() / 2,
                }
                .into());
            };
            self.line_no += 1;
            for token in line.split_ascii_whitespace() {
                let value = token.parse().map_err(|_| Fig2GerberError::MalformedRecord {
                    line: self.line_no,
                    reason: format!("point coordinate is not an integer: {:?}", token),
                })?;
                values.push(value);
                if values.len() == count * 2 {
                    continue 'lines;
                }
            }
        }
        Ok(values
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
            .collect())
    }

    fn arc(mut f: Fields) -> Result<DrawingRecord> {
        let sub_type = f.int("sub_type")?;
        let line_style = f.int("line_style")?;
        let width = f.int("thickness")?;
        let pen_color = f.int("pen_color")?;
        let fill_color = f.int("fill_color")?;
        let depth = f.int("depth")?;
        f.int("pen_style")?;
        let fill_mode = f.int("area_fill")?;
        f.float("style_val")?;
        f.int("cap_style")?;
        f.int("direction")?;
        f.int("forward_arrow")?;
        f.int("backward_arrow")?;
        let center = Point::new(f.float("center_x")? as i32, f.float("center_y")? as i32);
        let start = Point::new(f.int("x1")?, f.int("y1")?);
        let mid = Point::new(f.int("x2")?, f.int("y2")?);
        let end = Point::new(f.int("x3")?, f.int("y3")?);
        Ok(DrawingRecord {
            sub_type,
            line_style,
            width,
            pen_color,
            fill_color,
            depth,
            fill_mode,
            shape: Shape::Arc {
                start,
                mid,
                end,
                center,
            },
        })
    }
}

use crate::draw::ops::{self, Operation};
use crate::raster::color::Color;
use crate::raster::image::RImage;

/// Integer point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Point at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Line segment between two points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Start column.
    pub x1: i32,
    /// Start row.
    pub y1: i32,
    /// End column.
    pub x2: i32,
    /// End row.
    pub y2: i32,
}

impl Segment {
    /// Segment from `(x1, y1)` to `(x2, y2)`.
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// How point lists are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoordinateMode {
    /// Every point is an image coordinate.
    #[default]
    Absolute,
    /// Every point is an offset from the previous one (the first from the origin).
    Relative,
}

impl CoordinateMode {
    pub(crate) fn resolve(self, points: &[Point]) -> Vec<Point> {
        match self {
            Self::Absolute => points.to_vec(),
            Self::Relative => points
                .iter()
                .scan(Point::default(), |acc, p| {
                    acc.x = acc.x.saturating_add(p.x);
                    acc.y = acc.y.saturating_add(p.y);
                    Some(*acc)
                })
                .collect(),
        }
    }
}

const ABOVE: u8 = 1;
const BELOW: u8 = 1 << 1;
const LEFT: u8 = 1 << 2;
const RIGHT: u8 = 1 << 3;

fn out_code(x: i64, y: i64, xmax: i64, ymax: i64) -> u8 {
    let mut code = 0;
    if y > ymax {
        code |= BELOW;
    } else if y < 0 {
        code |= ABOVE;
    }
    if x > xmax {
        code |= RIGHT;
    } else if x < 0 {
        code |= LEFT;
    }
    code
}

/// Clipped line endpoints plus whether the far endpoint survived clipping unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ClippedLine {
    pub(crate) start: (i32, i32),
    pub(crate) end: (i32, i32),
    pub(crate) end_kept: bool,
}

/// Cohen-Sutherland clip of `p0..p1` against `[0, xmax] x [0, ymax]`.
pub(crate) fn clip_line(p0: Point, p1: Point, xmax: i32, ymax: i32) -> Option<ClippedLine> {
    let (xmax, ymax) = (i64::from(xmax), i64::from(ymax));
    let (mut x1, mut y1) = (i64::from(p0.x), i64::from(p0.y));
    let (mut x2, mut y2) = (i64::from(p1.x), i64::from(p1.y));
    let mut code1 = out_code(x1, y1, xmax, ymax);
    let mut code2 = out_code(x2, y2, xmax, ymax);
    let end_kept = code2 == 0;

    loop {
        if code1 == 0 && code2 == 0 {
            return Some(ClippedLine {
                start: (x1 as i32, y1 as i32),
                end: (x2 as i32, y2 as i32),
                end_kept,
            });
        }
        if code1 & code2 != 0 {
            return None;
        }

        let code = if code1 != 0 { code1 } else { code2 };
        let (x, y) = if code & BELOW != 0 {
            (x1 + (x2 - x1) * (ymax - y1) / (y2 - y1), ymax)
        } else if code & ABOVE != 0 {
            (x1 + (x2 - x1) * (0 - y1) / (y2 - y1), 0)
        } else if code & RIGHT != 0 {
            (xmax, y1 + (y2 - y1) * (xmax - x1) / (x2 - x1))
        } else {
            (0, y1 + (y2 - y1) * (0 - x1) / (x2 - x1))
        };

        if code == code1 {
            (x1, y1) = (x, y);
            code1 = out_code(x, y, xmax, ymax);
        } else {
            (x2, y2) = (x, y);
            code2 = out_code(x, y, xmax, ymax);
        }
    }
}

fn generic_line(
    img: &mut RImage,
    op: Operation,
    from: Point,
    to: Point,
    color: Color,
    skip_last: bool,
) {
    let xmax = img.width().saturating_sub(1).min(i32::MAX as u32) as i32;
    let ymax = img.height().saturating_sub(1).min(i32::MAX as u32) as i32;
    let Some(line) = clip_line(from, to, xmax, ymax) else {
        return;
    };
    let skip_last = skip_last && line.end_kept;

    let (x0, y0) = line.start;
    let (x1, y1) = line.end;
    let (dx, dy) = ((x1 - x0).abs(), (y1 - y0).abs());
    let step_x = if x0 < x1 { 1 } else { -1 };
    let step_y = if y0 < y1 { 1 } else { -1 };

    // Walk the major axis; the minor axis advances on error overflow.
    let x_major = dx >= dy;
    let (du, dv) = if x_major { (dx, dy) } else { (dy, dx) };
    let last = if skip_last { du - 1 } else { du };

    let ch = img.channels();
    let width = img.width() as usize;
    let buf = img.data_mut();
    let (mut x, mut y) = (x0, y0);
    let mut err = 0;
    for _ in 0..=last {
        let ofs = (y as usize * width + x as usize) * ch;
        ops::apply(&mut buf[ofs..ofs + ch], op, color);

        err += dv << 1;
        if err >= du {
            if x_major {
                y += step_y;
            } else {
                x += step_x;
            }
            err -= du << 1;
        }
        if x_major {
            x += step_x;
        } else {
            y += step_y;
        }
    }
}

/// Draw a blended line from `(x0, y0)` to `(x1, y1)`, clipped to the image.
pub fn draw_line(img: &mut RImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    operate_line(img, Operation::Normal, x0, y0, x1, y1, color);
}

/// Line from `(x0, y0)` to `(x1, y1)` applying `op` to every pixel, clipped to the image.
pub fn operate_line(
    img: &mut RImage,
    op: Operation,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    generic_line(
        img,
        op,
        Point::new(x0, y0),
        Point::new(x1, y1),
        color,
        false,
    );
}

/// Blended polyline through `points`.
pub fn draw_lines(img: &mut RImage, points: &[Point], mode: CoordinateMode, color: Color) {
    operate_lines(img, Operation::Normal, points, mode, color);
}

/// Polyline through `points`; every joint is touched exactly once.
///
/// A closed polyline (last point equal to the first) does not touch the first point again.
pub fn operate_lines(
    img: &mut RImage,
    op: Operation,
    points: &[Point],
    mode: CoordinateMode,
    color: Color,
) {
    let pts = mode.resolve(points);
    match pts.as_slice() {
        [] => {}
        [only] => generic_line(img, op, *only, *only, color, false),
        [first, .., last] => {
            let closed = first == last;
            let n = pts.len();
            for (i, pair) in pts.windows(2).enumerate() {
                let skip_last = i + 2 < n || closed;
                generic_line(img, op, pair[0], pair[1], color, skip_last);
            }
        }
    }
}

/// Blended independent segments.
pub fn draw_segments(img: &mut RImage, segments: &[Segment], color: Color) {
    operate_segments(img, Operation::Normal, segments, color);
}

/// Independent segments; pixels shared by two segments receive `op` twice.
pub fn operate_segments(img: &mut RImage, op: Operation, segments: &[Segment], color: Color) {
    for s in segments {
        operate_line(img, op, s.x1, s.y1, s.x2, s.y2, color);
    }
}

/// Apply `op` to the rectangle with corners `(x0, y0)` and `(x1, y1)` (inclusive), row by row.
pub fn operate_rectangle(
    img: &mut RImage,
    op: Operation,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    let top = y0.min(y1).max(0);
    let bottom = y0.max(y1).min(img.height().min(i32::MAX as u32) as i32 - 1);
    for y in top..=bottom {
        operate_line(img, op, x0, y, x1, y, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/line.rs"]
mod tests;

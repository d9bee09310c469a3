use super::*;
use crate::draw::pixel::get_pixel;

fn lit(img: &RImage) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for y in 0..img.height() as i32 {
        for x in 0..img.width() as i32 {
            if get_pixel(img, x, y).unwrap().red != 0 {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn horizontal_line_covers_both_endpoints() {
    let mut img = RImage::new(5, 3, false).unwrap();
    draw_line(&mut img, 1, 1, 3, 1, Color::WHITE);
    assert_eq!(lit(&img), vec![(1, 1), (2, 1), (3, 1)]);
}

#[test]
fn diagonal_line_is_bresenham() {
    let mut img = RImage::new(4, 4, false).unwrap();
    draw_line(&mut img, 3, 3, 0, 0, Color::WHITE);
    assert_eq!(lit(&img), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);

    let mut img = RImage::new(5, 3, false).unwrap();
    draw_line(&mut img, 0, 0, 4, 2, Color::WHITE);
    assert_eq!(lit(&img).len(), 5);
}

#[test]
fn lines_are_clipped_not_rejected() {
    let mut img = RImage::new(4, 4, false).unwrap();
    draw_line(&mut img, -10, 1, 10, 1, Color::WHITE);
    assert_eq!(lit(&img), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);

    let mut img = RImage::new(4, 4, false).unwrap();
    draw_line(&mut img, 1, -5, 1, 20, Color::WHITE);
    assert_eq!(lit(&img), vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn left_edge_clip_uses_left_boundary() {
    let clipped = clip_line(Point::new(-4, 0), Point::new(4, 8), 9, 9).unwrap();
    assert_eq!(clipped.start, (0, 4));
    assert_eq!(clipped.end, (4, 8));
    assert!(clipped.end_kept);
}

#[test]
fn fully_outside_line_is_a_noop() {
    let mut img = RImage::new(4, 4, false).unwrap();
    draw_line(&mut img, -5, -5, -1, 10, Color::WHITE);
    draw_line(&mut img, 4, 0, 9, 3, Color::WHITE);
    assert!(lit(&img).is_empty());
}

#[test]
fn polyline_joints_blend_once() {
    let mut img = RImage::new(5, 5, false).unwrap();
    let pts = [Point::new(0, 0), Point::new(4, 0), Point::new(4, 4)];
    operate_lines(
        &mut img,
        Operation::Add,
        &pts,
        CoordinateMode::Absolute,
        Color::rgb(10, 10, 10),
    );
    assert_eq!(get_pixel(&img, 4, 0).unwrap().red, 10);
    assert_eq!(get_pixel(&img, 4, 4).unwrap().red, 10);
    assert_eq!(get_pixel(&img, 0, 0).unwrap().red, 10);
}

#[test]
fn closed_polyline_does_not_revisit_start() {
    let mut img = RImage::new(4, 4, false).unwrap();
    let pts = [
        Point::new(0, 0),
        Point::new(3, 0),
        Point::new(3, 3),
        Point::new(0, 0),
    ];
    operate_lines(
        &mut img,
        Operation::Add,
        &pts,
        CoordinateMode::Absolute,
        Color::rgb(10, 10, 10),
    );
    assert_eq!(get_pixel(&img, 0, 0).unwrap().red, 10);
    assert_eq!(get_pixel(&img, 3, 3).unwrap().red, 10);
    assert_eq!(get_pixel(&img, 1, 1).unwrap().red, 10);
}

#[test]
fn relative_polyline_accumulates_offsets() {
    let mut img = RImage::new(4, 4, false).unwrap();
    let pts = [Point::new(1, 1), Point::new(2, 0), Point::new(0, 2)];
    draw_lines(&mut img, &pts, CoordinateMode::Relative, Color::WHITE);
    let lit = lit(&img);
    assert!(lit.contains(&(1, 1)));
    assert!(lit.contains(&(3, 1)));
    assert!(lit.contains(&(3, 3)));
    assert_eq!(lit.len(), 5);
}

#[test]
fn segments_double_blend_shared_points() {
    let mut img = RImage::new(4, 4, false).unwrap();
    let segs = [Segment::new(0, 0, 2, 0), Segment::new(2, 0, 2, 2)];
    operate_segments(&mut img, Operation::Add, &segs, Color::rgb(10, 10, 10));
    assert_eq!(get_pixel(&img, 2, 0).unwrap().red, 20);
    assert_eq!(get_pixel(&img, 1, 0).unwrap().red, 10);
}

#[test]
fn rectangle_fills_inclusive_area() {
    let mut img = RImage::new(5, 5, true).unwrap();
    operate_rectangle(&mut img, Operation::Copy, 1, 1, 2, 3, Color::WHITE);
    assert_eq!(lit(&img).len(), 6);
    assert_eq!(get_pixel(&img, 2, 3).unwrap(), Color::WHITE);
    assert_eq!(get_pixel(&img, 3, 3).unwrap(), Color::rgba(0, 0, 0, 0));
}

use super::*;

fn reds(img: &RImage) -> Vec<u8> {
    img.data().chunks_exact(3).map(|p| p[0]).collect()
}

fn gray(v: u8) -> Color {
    Color::rgb(v, v, v)
}

#[test]
fn three_stops_split_axis_into_equal_segments() {
    let colors = [gray(0), gray(100), gray(0)];
    let img = render_multi_gradient(5, 1, &colors, GradientStyle::Horizontal).unwrap();
    // Two segments of floor(5 / 2) = 2 samples, remainder takes the last stop.
    assert_eq!(reds(&img), vec![0, 50, 100, 50, 0]);
}

#[test]
fn vertical_multi_colors_rows() {
    let colors = [gray(0), gray(200), gray(100), gray(40)];
    let img = render_multi_gradient(2, 6, &colors, GradientStyle::Vertical).unwrap();
    // Three segments of two rows: 0..200, 200..100, 100..40.
    assert_eq!(
        reds(&img),
        vec![0, 0, 100, 100, 200, 200, 150, 150, 100, 100, 70, 70]
    );
}

#[test]
fn stop_count_is_capped_by_axis_length() {
    let colors = [gray(10), gray(20), gray(30), gray(40), gray(50)];
    let img = render_multi_gradient(3, 1, &colors, GradientStyle::Horizontal).unwrap();
    assert_eq!(reds(&img), vec![10, 20, 30]);
}

#[test]
fn one_or_two_colors_delegate() {
    let one = render_multi_gradient(3, 2, &[gray(7)], GradientStyle::Diagonal).unwrap();
    assert!(one.data().iter().all(|&b| b == 7));

    let two = render_multi_gradient(4, 4, &[gray(0), gray(255)], GradientStyle::Horizontal)
        .unwrap();
    assert_eq!(
        two,
        render_gradient(4, 4, gray(0), gray(255), GradientStyle::Horizontal).unwrap()
    );
}

#[test]
fn no_colors_is_an_error() {
    assert!(matches!(
        render_multi_gradient(2, 2, &[], GradientStyle::Vertical),
        Err(RasterError::Validation(_))
    ));
}

#[test]
fn diagonal_multi_fills_every_row() {
    let colors = [gray(0), gray(120), gray(240)];
    let img = render_multi_gradient(4, 3, &colors, GradientStyle::Diagonal).unwrap();
    assert_eq!((img.width(), img.height()), (4, 3));
    let r = reds(&img);
    assert_eq!(r[0], 0);
    assert!(r[11] > r[0]);
}

#[test]
fn interwoven_alternates_bands() {
    let img = render_interwoven_gradient(
        1,
        5,
        [gray(0), gray(0)],
        2,
        [gray(200), gray(200)],
        1,
    )
    .unwrap();
    assert_eq!(reds(&img), vec![0, 0, 200, 0, 0]);
}

#[test]
fn interwoven_bands_follow_their_own_gradient() {
    let img = render_interwoven_gradient(
        1,
        3,
        [gray(0), gray(100)],
        1,
        [gray(200), gray(0)],
        1,
    )
    .unwrap();
    assert_eq!(reds(&img), vec![0, 100, 100]);
}

#[test]
fn interwoven_rejects_zero_thickness() {
    assert!(
        render_interwoven_gradient(2, 2, [gray(0); 2], 0, [gray(1); 2], 1).is_err()
    );
}

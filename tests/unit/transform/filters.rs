use super::*;

#[test]
fn supports_match_kernels() {
    let expected = [0.5, 1.0, 1.5, 2.0, 3.0, 2.0];
    for (f, s) in Filter::ALL.into_iter().zip(expected) {
        assert_eq!(f.support(), s, "{f}");
        assert_eq!(f.weight(s + 0.01), 0.0, "{f}");
        assert_eq!(f.weight(-s - 0.01), 0.0, "{f}");
    }
}

#[test]
fn kernels_are_symmetric() {
    for f in Filter::ALL.into_iter().filter(|f| *f != Filter::Box) {
        for t in [0.1, 0.4, 0.9, 1.3, 1.9, 2.5] {
            assert!((f.weight(t) - f.weight(-t)).abs() < 1e-12, "{f} at {t}");
        }
    }
}

#[test]
fn center_values() {
    assert_eq!(Filter::Box.weight(0.0), 1.0);
    assert_eq!(Filter::Triangle.weight(0.0), 1.0);
    assert_eq!(Filter::Bell.weight(0.0), 0.75);
    assert!((Filter::BSpline.weight(0.0) - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(Filter::Lanczos3.weight(0.0), 1.0);
    assert!((Filter::Mitchell.weight(0.0) - 8.0 / 9.0).abs() < 1e-12);
}

#[test]
fn integer_samples_sum_to_one() {
    for f in [Filter::Triangle, Filter::BSpline, Filter::Mitchell] {
        let sum: f64 = (-3..=3).map(|i| f.weight(f64::from(i) + 0.25)).sum();
        assert!((sum - 1.0).abs() < 1e-9, "{f}: {sum}");
    }
}

#[test]
fn names_parse_back() {
    for f in Filter::ALL {
        assert_eq!(f.name().parse::<Filter>().unwrap(), f);
    }
    assert_eq!("B-Spline".parse::<Filter>().unwrap(), Filter::BSpline);
    assert!("gauss".parse::<Filter>().is_err());
    assert_eq!(Filter::default(), Filter::Mitchell);
}

#[test]
fn serde_uses_lowercase_names() {
    let json = serde_json::to_string(&Filter::Lanczos3).unwrap();
    assert_eq!(json, "\"lanczos3\"");
    let f: Filter = serde_json::from_str("\"bspline\"").unwrap();
    assert_eq!(f, Filter::BSpline);
}

use codex_impose::constants::GEOMETRY_TOLERANCE;
use codex_impose::geometry::{Angle, Dimensions, Length, Line, Point, Transform};

fn axes() -> Vec<Line> {
    vec![
        Line::vertical(Length::pt(120.0)),
        Line::horizontal(Length::mm(50.0)),
        Line::through(Point::new(10.0, 0.0), Point::new(40.0, 90.0)).unwrap(),
        Line::new(1.0, 1.0, -300.0).unwrap(),
    ]
}

fn transforms() -> Vec<Transform> {
    vec![
        Transform::IDENTITY,
        Transform::translate(Length::pt(15.0), Length::pt(-40.0)),
        Transform::rotate(Angle::degrees(30.0)),
        Transform::scale(2.0, 0.5).then(&Transform::translate(Length::pt(3.0), Length::pt(7.0))),
    ]
}

#[test]
fn test_mirror_is_an_involution() {
    for axis in axes() {
        let mirror = axis.mirror_transform();
        assert!(mirror.is_mirrored(), "{axis:?}");
        for t in transforms() {
            let twice = t.then(&mirror).then(&mirror);
            assert!(twice.approx_eq(&t, GEOMETRY_TOLERANCE), "{axis:?} {t:?}");
        }
    }
}

#[test]
fn test_mirror_fixes_the_axis() {
    for axis in axes() {
        let mirror = axis.mirror_transform();
        // Two points on the axis stay put; a point off it changes sides
        let (a, b, c) = axis.coefficients();
        let on_axis = if b.abs() > a.abs() {
            [Point::new(0.0, -c / b), Point::new(100.0, -(c + 100.0 * a) / b)]
        } else {
            [Point::new(-c / a, 0.0), Point::new(-(c + 100.0 * b) / a, 100.0)]
        };
        for p in on_axis {
            assert!(mirror.apply(p).approx_eq(p, GEOMETRY_TOLERANCE), "{axis:?}");
        }

        let off = Point::new(500.0, 500.0);
        let image = mirror.apply(off);
        assert!(!axis.same_side(off, image), "{axis:?}");
        assert!((axis.signed_distance(off) + axis.signed_distance(image)).abs() < 1e-6);
    }
}

#[test]
fn test_inverse_undoes_transform() {
    for t in transforms() {
        let inverse = t.inverse().unwrap();
        assert!(t.then(&inverse).approx_eq(&Transform::IDENTITY, GEOMETRY_TOLERANCE));
        assert!(inverse.then(&t).approx_eq(&Transform::IDENTITY, GEOMETRY_TOLERANCE));
    }
    assert!(Transform::scale(0.0, 1.0).inverse().is_none());
}

#[test]
fn test_composition_order() {
    // Translate first, then rotate by 90°: (1, 0) -> (3, 0) -> (0, 3)
    let t = Transform::translate(Length::pt(2.0), Length::ZERO)
        .then(&Transform::rotate(Angle::degrees(90.0)));
    assert!(
        t.apply(Point::new(1.0, 0.0))
            .approx_eq(Point::new(0.0, 3.0), GEOMETRY_TOLERANCE)
    );
}

#[test]
fn test_lengths_compare_across_units() {
    assert!(Length::inches(1.0) > Length::mm(25.0));
    assert!(Length::mm(25.4).approx_eq(Length::inches(1.0), Length::pt(1e-9)));
    assert!(Length::cm(1.0).approx_eq(Length::mm(10.0), Length::pt(1e-9)));
    assert_eq!(Length::pt(10.0).max(Length::pt(4.0)), Length::pt(10.0));
    assert_eq!((Length::pt(10.0) - Length::pt(14.0)).abs(), Length::pt(4.0));
}

#[test]
fn test_degenerate_inputs_rejected() {
    assert!(Line::new(0.0, 0.0, 1.0).is_err());
    assert!(Line::through(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_err());
    assert!(Dimensions::from_pt(10.0, -1.0).is_err());
    assert!(Dimensions::from_pt(f64::NAN, 10.0).is_err());
}

#[test]
fn test_zero_sized_dimensions_allowed() {
    assert!(Dimensions::from_pt(0.0, 10.0).is_ok());
    assert!(Dimensions::from_pt(0.0, 0.0).is_ok());
}

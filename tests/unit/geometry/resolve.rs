use super::*;

fn area(shape: AreaShape) -> InteractionArea {
    InteractionArea {
        id: "a".to_owned(),
        text: "text".to_owned(),
        order: 0,
        has_next_button: false,
        shape,
    }
}

fn quadrant() -> AreaShape {
    AreaShape::Polygon {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.0),
            Point::new(0.5, 0.5),
            Point::new(0.0, 0.5),
        ],
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn box_passes_through_as_percent() {
    let a = area(AreaShape::Box {
        bounding_box: Some(BoundingBox {
            x: 0.05,
            y: 0.1,
            width: 0.2,
            height: 0.08,
        }),
    });
    let r = resolve_area_rect(&a);
    assert!(approx(r.left, 5.0));
    assert!(approx(r.top, 10.0));
    assert!(approx(r.width, 20.0));
    assert!(approx(r.height, 8.0));
    assert_eq!(resolve_anchor(&a), r);
}

#[test]
fn polygon_bounds_and_centroid() {
    let a = area(quadrant());
    assert_eq!(
        resolve_area_rect(&a),
        PercentRect {
            left: 0.0,
            top: 0.0,
            width: 50.0,
            height: 50.0,
        }
    );
    let anchor = resolve_anchor(&a);
    assert_eq!(anchor.center(), (25.0, 25.0));
    assert!(anchor.is_degenerate());
}

#[test]
fn polygon_bounds_use_independent_extrema() {
    let a = area(AreaShape::Polygon {
        points: vec![
            Point::new(0.2, 0.1),
            Point::new(0.6, 0.3),
            Point::new(0.5, 0.7),
            Point::new(0.1, 0.4),
        ],
    });
    let r = resolve_area_rect(&a);
    assert!(approx(r.left, 10.0));
    assert!(approx(r.top, 10.0));
    assert!(approx(r.width, 50.0));
    assert!(approx(r.height, 60.0));
}

#[test]
fn malformed_areas_degrade_to_zero() {
    let missing = area(AreaShape::Oval { bounding_box: None });
    assert_eq!(resolve_area_rect(&missing), PercentRect::ZERO);
    assert_eq!(resolve_anchor(&missing), PercentRect::ZERO);
    assert!(highlight_shape(&missing, Size::new(100.0, 100.0)).is_none());

    let triangle = area(AreaShape::Polygon {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ],
    });
    assert_eq!(resolve_area_rect(&triangle), PercentRect::ZERO);
    assert_eq!(resolve_anchor(&triangle), PercentRect::ZERO);
    assert!(highlight_shape(&triangle, Size::new(100.0, 100.0)).is_none());
}

#[test]
fn percent_rect_scales_to_container() {
    let r = PercentRect {
        left: 25.0,
        top: 50.0,
        width: 50.0,
        height: 25.0,
    };
    assert_eq!(
        r.to_pixels(Size::new(200.0, 100.0)),
        Rect::new(50.0, 50.0, 150.0, 75.0)
    );
}

#[test]
fn highlight_shapes_hit_test_in_pixels() {
    let container = Size::new(200.0, 100.0);

    let poly = highlight_shape(&area(quadrant()), container).unwrap();
    assert_eq!(poly.bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
    assert!(poly.contains(Point::new(50.0, 25.0)));
    assert!(!poly.contains(Point::new(150.0, 75.0)));

    let oval = highlight_shape(
        &area(AreaShape::Oval {
            bounding_box: Some(BoundingBox {
                x: 0.5,
                y: 0.0,
                width: 0.5,
                height: 1.0,
            }),
        }),
        container,
    )
    .unwrap();
    assert!(oval.contains(Point::new(150.0, 50.0)));
    // Box corner lies outside the inscribed ellipse.
    assert!(!oval.contains(Point::new(101.0, 1.0)));
}

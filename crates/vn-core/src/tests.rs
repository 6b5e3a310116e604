//! Unit tests for vn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{FeatureId, NodeId};

    #[test]
    fn ordering() {
        assert!(FeatureId(0) < FeatureId(1));
        assert!(NodeId(-3) < NodeId(2));
    }

    #[test]
    fn invalid_sentinels_are_min() {
        assert_eq!(FeatureId::INVALID.0, i64::MIN);
        assert!(!NodeId::default().is_valid());
        assert!(NodeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(FeatureId(7).to_string(), "FeatureId(7)");
        assert_eq!(NodeId::from(-2).to_string(), "NodeId(-2)");
    }
}

#[cfg(test)]
mod arc {
    use crate::{Arc, Direction, FeatureId};

    #[test]
    fn signed_form() {
        assert_eq!(Arc::forward(FeatureId(5)).signed(), 5);
        assert_eq!(Arc::backward(FeatureId(5)).signed(), -5);
        assert_eq!(Arc::from_signed(-5), Arc::backward(FeatureId(5)));
        assert_eq!(Arc::from_signed(5), Arc::forward(FeatureId(5)));
    }

    #[test]
    fn reverse_flips_direction_only() {
        let a = Arc::forward(FeatureId(3));
        assert_eq!(a.reverse().direction, Direction::Backward);
        assert_eq!(a.reverse().feature, FeatureId(3));
        assert_eq!(a.reverse().reverse(), a);
    }

    #[test]
    fn display() {
        assert_eq!(Arc::backward(FeatureId(2)).to_string(), "(2, backward)");
    }
}

#[cfg(test)]
mod cost {
    use crate::{CoreError, Cost};

    #[test]
    fn sentinel_bridge() {
        assert_eq!(Cost::from_raw(-1.0), Ok(Cost::Closed));
        assert_eq!(Cost::from_raw(-0.5), Ok(Cost::Closed));
        assert_eq!(Cost::from_raw(0.0), Ok(Cost::ZERO));
        assert_eq!(Cost::from_raw(4.5), Ok(Cost::Open(4.5)));
        assert_eq!(Cost::Closed.to_raw(), -1.0);
        assert_eq!(Cost::Open(2.0).to_raw(), 2.0);
    }

    #[test]
    fn non_finite_rejected() {
        assert!(matches!(Cost::from_raw(f64::NAN), Err(CoreError::InvalidCost(_))));
        assert!(Cost::from_raw(f64::INFINITY).is_err());
    }

    #[test]
    fn validity() {
        assert!(Cost::Closed.is_valid());
        assert!(Cost::Open(0.0).is_valid());
        assert!(!Cost::Open(-2.0).is_valid());
        assert!(!Cost::Open(f64::NAN).is_valid());
        assert_eq!(Cost::Closed.value(), None);
    }
}

#[cfg(test)]
mod geom {
    use approx::assert_abs_diff_eq;
    use geo::{Coord, LineString, coord, line_string};

    use crate::geom::{concat, line_length, project};
    use crate::{CoreError, Direction};

    fn l_shape() -> LineString<f64> {
        // (0,0) → (10,0) → (10,10), length 20
        line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0)]
    }

    #[test]
    fn length_sums_segments() {
        assert_abs_diff_eq!(line_length(&l_shape()), 20.0);
    }

    #[test]
    fn perpendicular_projection() {
        let p = project(&l_shape(), coord! { x: 4.0, y: 3.0 }).unwrap();
        assert_eq!(p.point, coord! { x: 4.0, y: 0.0 });
        assert_eq!(p.segment, 0);
        assert_abs_diff_eq!(p.along, 4.0);
        assert_abs_diff_eq!(p.distance, 3.0);
    }

    #[test]
    fn projection_on_second_segment() {
        let p = project(&l_shape(), coord! { x: 12.0, y: 6.0 }).unwrap();
        assert_eq!(p.point, coord! { x: 10.0, y: 6.0 });
        assert_eq!(p.segment, 1);
        assert_abs_diff_eq!(p.along, 16.0);
        assert_abs_diff_eq!(p.distance, 2.0);
    }

    #[test]
    fn beyond_end_returns_exact_vertex() {
        let line = line_string![(x: 0.1, y: 0.3), (x: 7.7, y: 1.9)];
        let p = project(&line, coord! { x: 100.0, y: 50.0 }).unwrap();
        assert_eq!(p.point, line.0[1]);
        let q = project(&line, coord! { x: -100.0, y: -50.0 }).unwrap();
        assert_eq!(q.point, line.0[0]);
        assert_eq!(q.along, 0.0);
    }

    #[test]
    fn degenerate_line_rejected() {
        let line = LineString::new(vec![Coord { x: 1.0, y: 1.0 }]);
        assert_eq!(
            project(&line, coord! { x: 0.0, y: 0.0 }),
            Err(CoreError::DegenerateLine(1))
        );
    }

    #[test]
    fn concat_drops_joint_duplicates() {
        let a = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        let b = line_string![(x: 2.0, y: 0.0), (x: 1.0, y: 0.0)];
        let joined = concat([(&a, Direction::Forward), (&b, Direction::Backward)]);
        assert_eq!(
            joined,
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)]
        );
    }
}

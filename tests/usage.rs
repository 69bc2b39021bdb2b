use neartree::{Error, NearTree};

fn abc() -> NearTree<&'static str> {
    let mut tree = NearTree::new(2).expect("Invalid dimension");
    tree.insert(&[0.0, 0.0], "A").unwrap();
    tree.insert(&[10.0, 0.0], "B").unwrap();
    tree.insert(&[0.0, 10.0], "C").unwrap();
    tree
}

#[test]
fn basic_usage() {
    let tree = abc();
    assert_eq!(tree.size(), 3);
    assert!(!tree.is_empty());

    // The nearest point to (1, 1) is A
    let (point, value) = tree.nearest(&[1.0, 1.0], None).unwrap().into_pair();
    assert_eq!(point, &[0.0, 0.0]);
    assert_eq!(*value, "A");

    // Two nearest of the origin: A itself, then one of B and C (both 10 away)
    let result = tree.k_nearest(&[0.0, 0.0], 2, None).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(*result[0].value, "A");
    assert_eq!(result[0].distance, 0.0);
    assert_eq!(result[1].distance, 10.0);

    // Nothing lies within 1 of (5, 5)
    assert_eq!(
        tree.nearest(&[5.0, 5.0], Some(1.0)).err(),
        Some(Error::NotFound)
    );
}

#[test]
fn empty_tree() {
    let tree = NearTree::<String>::new(3).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.nearest(&[1.0, 1.0, 1.0], None).err(), Some(Error::NotFound));
    assert_eq!(
        tree.k_nearest(&[1.0, 1.0, 1.0], 4, None).err(),
        Some(Error::NotFound)
    );
}

#[test]
fn dimension_mismatch() {
    let mut tree = abc();
    assert_eq!(
        tree.insert(&[1.0, 2.0, 3.0], "x"),
        Err(Error::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    );
    assert_eq!(tree.size(), 3);
    assert_eq!(tree.points().len(), 3);
    assert_eq!(tree.values(), &["A", "B", "C"]);
}

// Three points in 3-D, queried with and without radius bounds.
#[test]
fn three_dimensional() {
    let points = [
        ([0.0, 0.0, 0.0], "point 0"),
        ([10.0, 1.0, 0.5], "point 1"),
        ([1.0, 1.0, 1.0], "point 2"),
    ];
    let mut tree = NearTree::new(3).unwrap();
    for (i, (point, value)) in points.iter().enumerate() {
        tree.insert(point, *value).unwrap();
        assert_eq!(tree.points().len(), i + 1);
        assert_eq!(tree.points().last().unwrap(), point);
        assert_eq!(tree.values().last(), Some(value));
    }

    for radius in [None, Some(0.0), Some(100.0)] {
        for (point, value) in &points {
            let neighbor = tree.nearest(point, radius).unwrap();
            assert_eq!(neighbor.value, value);

            let result = tree.k_nearest(point, 1, radius).unwrap();
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].value, value);
        }
    }

    assert_eq!(*tree.nearest(&[0.0, 0.0, 1.0], None).unwrap().value, "point 0");
    assert!(tree.nearest(&[0.0, 0.0, 1.0], Some(0.5)).is_err());

    let values = |query: &[f64], radius: f64| {
        tree.k_nearest(query, 3, Some(radius))
            .unwrap()
            .iter()
            .map(|neighbor| *neighbor.value)
            .collect::<Vec<_>>()
    };
    assert_eq!(values(&points[0].0[..], 100.0), vec!["point 0", "point 2", "point 1"]);
    assert_eq!(values(&points[1].0[..], 100.0), vec!["point 1", "point 2", "point 0"]);
    assert_eq!(values(&points[2].0[..], 100.0), vec!["point 2", "point 0", "point 1"]);
    assert_eq!(values(&points[0].0[..], 2.0), vec!["point 0", "point 2"]);
    assert_eq!(values(&points[1].0[..], 1.0), vec!["point 1"]);
    assert_eq!(values(&points[2].0[..], 2.0), vec!["point 2", "point 0"]);
    assert!(values(&[0.0, 0.0, 1.0][..], 0.5).is_empty());
}

#[test]
fn invalid_arguments() {
    assert!(matches!(
        NearTree::<()>::new(0),
        Err(Error::InvalidArgument(_))
    ));

    let tree = abc();
    assert!(matches!(
        tree.k_nearest(&[0.0, 0.0], 0, None),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        tree.nearest(&[0.0, 0.0], Some(-3.4)),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        tree.k_nearest(&[0.0, 0.0], 1, Some(-3.4)),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        tree.nearest(&[], None),
        Err(Error::DimensionMismatch {
            expected: 2,
            actual: 0
        })
    ));
    assert!(matches!(
        tree.k_nearest(&[1.0, 2.0, 3.0, 4.0], 1, None),
        Err(Error::DimensionMismatch { .. })
    ));
}

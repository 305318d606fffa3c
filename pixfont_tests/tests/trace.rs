// Copyright 2025 the Pixfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use pixfont::pixfont_common::contour::{Contour, GridPoint, trace};
use pixfont::pixfont_common::grid::PixelGrid;
use pixfont::pixfont_common::kurbo::{Point, Shape};
use pixfont::pixfont_common::pixel::{FillMask, PX_FULL};
use pixfont_tests::grid;

fn areas(contours: &[Contour]) -> Vec<f64> {
    let mut areas: Vec<f64> = contours.iter().map(Contour::signed_area).collect();
    areas.sort_by(f64::total_cmp);
    areas
}

#[test]
fn unit_square() {
    let grid = PixelGrid::from_cells(1, 1, &[PX_FULL]).unwrap();
    let contours = trace(&grid, FillMask::Coarse);
    assert_eq!(contours.len(), 1, "one contour");
    let mut corners: Vec<Point> = contours[0].points().collect();
    corners.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    assert_eq!(
        corners,
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ],
        "the unit square"
    );
    assert_eq!(contours[0].signed_area(), 1.0, "outer contours wind positively");
}

#[test]
fn block_with_hole() {
    let contours = trace(&grid(&["@@@", "@.@", "@@@"]), FillMask::Coarse);
    assert_eq!(contours.len(), 2, "outer and inner");
    assert_eq!(areas(&contours), vec![-1.0, 9.0], "opposite windings");
}

#[test]
fn island_in_hole() {
    let contours = trace(
        &grid(&["@@@@@", "@...@", "@.@.@", "@...@", "@@@@@"]),
        FillMask::Coarse,
    );
    assert_eq!(areas(&contours), vec![-9.0, 1.0, 25.0], "nesting alternates");
}

#[test]
fn l_shape_has_six_corners() {
    let contours = trace(&grid(&["@.", "@@"]), FillMask::Fine);
    assert_eq!(contours.len(), 1, "one region");
    assert_eq!(contours[0].len(), 6, "collinear steps merged");
    assert_eq!(contours[0].signed_area(), 3.0, "three cells");
}

#[test]
fn diagonal_halves_join() {
    // A lower-right half next to a solid cell makes a ramp.
    let contours = trace(&grid(&["d@"]), FillMask::Fine);
    assert_eq!(contours.len(), 1, "one region");
    assert_eq!(contours[0].len(), 4, "a trapezoid");
    assert_eq!(contours[0].signed_area(), 1.5, "half plus whole");

    let coarse = trace(&grid(&["d@"]), FillMask::Coarse);
    assert_eq!(areas(&coarse), vec![2.0], "coarse reading is solid");
}

#[test]
fn dots_stay_apart() {
    let contours = trace(&grid(&["*.*"]), FillMask::Fine);
    assert_eq!(areas(&contours), vec![0.5, 0.5], "two diamonds");
    assert!(trace(&grid(&["*.*"]), FillMask::Coarse).is_empty(), "dots are not solid");
}

#[test]
fn tracing_is_deterministic() {
    let picture = grid(&["@@.@@", "@b.d@", "@@@@@", ".*.*."]);
    let first = trace(&picture, FillMask::Fine);
    let second = trace(&picture, FillMask::Fine);
    assert_eq!(first, second, "same grid, same contours");
}

#[test]
fn contours_stay_on_half_cells() {
    let contours = trace(&grid(&["bd", "@@"]), FillMask::Fine);
    for contour in &contours {
        for &GridPoint { x, y } in contour.grid_points() {
            assert!((0..=4).contains(&x) && (0..=4).contains(&y), "({x}, {y}) off the grid");
        }
    }
    let total: f64 = contours.iter().map(Contour::signed_area).sum();
    assert_eq!(total, 3.0, "two halves and two wholes");
}

#[test]
fn path_matches_contour() {
    let contours = trace(&grid(&["@@", "@@"]), FillMask::Coarse);
    let path = contours[0].to_path(8.0);
    assert_eq!(path.area().abs(), 256.0, "scaled area");
}

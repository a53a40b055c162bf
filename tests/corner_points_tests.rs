//! End-to-end tests on synthetic version 1 symbols
//!
//! Symbols carry only their three finder patterns on a white field, drawn at
//! a chosen module size with a quiet zone around them.

use qr_corners::config::LocatorConfig;
use qr_corners::detector::alignment::FinderOrdering;
use qr_corners::detector::dedup::DedupStrategy;
use qr_corners::detector::transform::sample_modules;
use qr_corners::{
    BitMatrix, CornerLocator, CornerPoints, LocateError, PixelGrid, Point, get_corner_points,
    get_corner_points_from_grayscale,
};

const MODULES: usize = 21;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 21x21 module grid with finders at module (0,0), (0,14) and (14,0)
fn module_grid() -> BitMatrix {
    let mut grid = BitMatrix::new(MODULES, MODULES);
    for (x0, y0) in [(0, 0), (14, 0), (0, 14)] {
        grid.fill_rect(x0, y0, 7, 7, true);
        grid.fill_rect(x0 + 1, y0 + 1, 5, 5, false);
        grid.fill_rect(x0 + 2, y0 + 2, 3, 3, true);
    }
    grid
}

/// Draw `modules` with `module_px` pixels per module and `quiet` white pixels on each side
fn render(modules: &BitMatrix, module_px: usize, quiet: usize) -> BitMatrix {
    let side = modules.width() * module_px + 2 * quiet;
    let mut img = BitMatrix::new(side, side);
    for y in 0..modules.height() {
        for x in 0..modules.width() {
            if modules.get(x, y) {
                img.fill_rect(
                    quiet + x * module_px,
                    quiet + y * module_px,
                    module_px,
                    module_px,
                    true,
                );
            }
        }
    }
    img
}

/// Pixel center of module `(mx, my)`
fn module_center(mx: usize, my: usize, module_px: usize, quiet: usize) -> Point {
    let half = (module_px as f32 - 1.0) / 2.0;
    Point::new(
        (quiet + mx * module_px) as f32 + half,
        (quiet + my * module_px) as f32 + half,
    )
}

fn assert_near(actual: Point, expected: Point, tolerance: f32, label: &str) {
    assert!(
        actual.distance(&expected) <= tolerance,
        "{label}: got ({}, {}), expected near ({}, {})",
        actual.x,
        actual.y,
        expected.x,
        expected.y
    );
}

fn assert_square(corners: &CornerPoints, side: f32) {
    let tl = corners.top_left;
    assert_eq!(corners.top_right, tl.translate(side, 0.0));
    assert_eq!(corners.bottom_left, tl.translate(0.0, side));
    assert_eq!(corners.alignment, tl.translate(side, side));
}

#[test]
fn test_unit_module_symbol() {
    init_logging();
    let grid = PixelGrid::from_bit_matrix(&module_grid());
    let corners = get_corner_points(&grid).unwrap();

    assert_eq!(
        corners.to_vec(),
        vec![
            Point::new(4.0, 2.0),
            Point::new(18.0, 2.0),
            Point::new(4.0, 16.0),
            Point::new(18.0, 16.0),
        ]
    );
    assert_square(&corners, 14.0);

    let expected = [(3, 3), (17, 3), (3, 17), (17, 17)];
    for (p, (mx, my)) in corners.to_array().into_iter().zip(expected) {
        assert_near(p, module_center(mx, my, 1, 0), 1.5, "unit module");
    }
}

#[test]
fn test_scaled_symbol_with_quiet_zone() {
    init_logging();
    let (module_px, quiet) = (3, 12);
    let image = render(&module_grid(), module_px, quiet);
    assert_eq!(image.height(), 87);

    let corners = CornerLocator::default().locate_binary(&image).unwrap();
    assert_square(&corners, 42.0);

    let expected = [(3, 3), (17, 3), (3, 17), (17, 17)];
    for (p, (mx, my)) in corners.to_array().into_iter().zip(expected) {
        assert_near(p, module_center(mx, my, module_px, quiet), 1.5, "scaled");
    }
}

#[test]
fn test_sampling_recovers_module_grid() {
    let modules = module_grid();
    let image = render(&modules, 3, 12);

    let corners = CornerLocator::default().locate_binary(&image).unwrap();
    let sampled = sample_modules(&image, &corners, MODULES).unwrap();
    assert_eq!(sampled, modules);
}

#[test]
fn test_strategies_agree() {
    let image = render(&module_grid(), 3, 12);
    let reference = CornerLocator::default().locate_binary(&image).unwrap();

    for dedup in [DedupStrategy::Sequential, DedupStrategy::Clustered] {
        for ordering in [FinderOrdering::Geometric, FinderOrdering::Discovery] {
            for parallel in [true, false] {
                let locator = CornerLocator::new(LocatorConfig {
                    dedup,
                    ordering,
                    parallel,
                    ..LocatorConfig::default()
                });
                assert_eq!(
                    locator.locate_binary(&image).unwrap(),
                    reference,
                    "{dedup:?} {ordering:?} parallel={parallel}"
                );
            }
        }
    }
}

#[test]
fn test_grayscale_bytes_match_unit_range() {
    let modules = module_grid();
    let bytes: Vec<u8> = (0..MODULES * MODULES)
        .map(|i| {
            if modules.get(i % MODULES, i / MODULES) {
                0
            } else {
                255
            }
        })
        .collect();

    let from_bytes = get_corner_points_from_grayscale(&bytes, MODULES, MODULES).unwrap();
    let from_unit = get_corner_points(&PixelGrid::from_bit_matrix(&modules)).unwrap();
    assert_eq!(from_bytes, from_unit);
}

#[test]
fn test_rgb_input_uses_first_channel() {
    let image = render(&module_grid(), 3, 12);
    let side = image.width();
    let mut samples = Vec::with_capacity(side * side * 3);
    for y in 0..side {
        for x in 0..side {
            let v: u8 = if image.get(x, y) { 0 } else { 255 };
            // Only channel 0 carries the symbol
            samples.extend_from_slice(&[v, 255, 0]);
        }
    }
    let grid = PixelGrid::from_samples(samples.as_slice(), side, side, 3).unwrap();

    let from_rgb = get_corner_points(&grid).unwrap();
    let from_binary = CornerLocator::default().locate_binary(&image).unwrap();
    assert_eq!(from_rgb, from_binary);
}

#[test]
fn test_missing_finder_is_reported() {
    let mut modules = module_grid();
    // Wipe the bottom-left finder
    modules.fill_rect(0, 14, 7, 7, false);
    let image = render(&modules, 3, 12);

    let (result, tel) = CornerLocator::default().locate_with_telemetry(&image);
    assert_eq!(result, Err(LocateError::FinderCount { found: 2 }));
    assert_eq!(tel.deduplicated, 2);
    assert!(tel.candidates >= tel.verified && tel.verified >= tel.deduplicated);
}

#[test]
fn test_mismatched_buffer_is_rejected() {
    let err = get_corner_points_from_grayscale(&[0u8; 10], 4, 4).unwrap_err();
    assert!(matches!(err, LocateError::Grid(_)));
}

#[test]
fn test_float_and_wide_integer_grids() {
    let image = render(&module_grid(), 3, 12);
    let side = image.width();
    let reference = CornerLocator::default().locate_binary(&image).unwrap();

    let unit: Vec<f64> = (0..side * side)
        .map(|i| if image.get(i % side, i / side) { 0.0 } else { 1.0 })
        .collect();
    let grid = PixelGrid::from_samples(unit.as_slice(), side, side, 1).unwrap();
    assert_eq!(get_corner_points(&grid).unwrap(), reference);

    let eight_bit: Vec<u32> = unit.iter().map(|&v| (v * 255.0) as u32).collect();
    let grid = PixelGrid::from_samples(eight_bit.as_slice(), side, side, 1).unwrap();
    assert_eq!(get_corner_points(&grid).unwrap(), reference);
}

// Host-side tests for viewport queries and the shared blob geometry.

use folio_core::constants::{BLOB_MARGIN, FALLBACK_BLOB_SCALE, MIN_AVAILABLE_EXTENT};
use folio_core::geometry::RotationPhase;
use folio_core::viewport::fallback_navbar_height;
use folio_core::{BlobGeometry, ChoreoError, Size, Viewport};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn measured(vp: &Viewport, w: f32, h: f32) -> BlobGeometry {
    let mut g = BlobGeometry::new();
    g.set_initial_dimensions(vp, w, h);
    g
}

#[test]
fn navbar_fallback_follows_breakpoints() {
    assert_eq!(fallback_navbar_height(1440.0), 100.0);
    assert_eq!(fallback_navbar_height(768.0), 100.0);
    assert_eq!(fallback_navbar_height(700.0), 96.0);
    assert_eq!(fallback_navbar_height(375.0), 92.0);
}

#[test]
fn measured_navbar_wins_unless_invalid() {
    let vp = Viewport::new(1440.0, 900.0).with_navbar(64.0);
    assert_eq!(vp.navbar_height(), 64.0);
    assert_eq!(vp.adjusted_center_y(), 64.0 + (900.0 - 64.0) / 2.0);

    let vp = Viewport::new(1440.0, 900.0).with_navbar(0.0);
    assert_eq!(vp.navbar_height(), 100.0);
    let vp = Viewport::new(1440.0, 900.0).with_navbar(f32::NAN);
    assert_eq!(vp.navbar_height(), 100.0);
}

#[test]
fn viewport_queries() {
    let vp = Viewport::new(1440.0, 900.0);
    assert!(!vp.is_mobile());
    assert!(Viewport::new(639.0, 900.0).is_mobile());
    assert_eq!(vp.available_height(), 800.0);
    assert_eq!(vp.adjusted_center().x, 720.0);
    assert_eq!(vp.adjusted_center().y, 500.0);
    assert_eq!(vp.center_line(2000.0), 1550.0);
    assert_eq!(Viewport::new(0.0, 900.0).aspect_ratio(), 0.0);
}

#[test]
fn desktop_scale_fits_the_area_below_the_navbar() {
    let vp = Viewport::new(1440.0, 900.0);
    let g = measured(&vp, 600.0, 400.0);
    // min(1420 / 600, 780 / 400)
    assert!(approx(g.scale(&vp), 1.95));
    assert!(approx(g.final_width(&vp, false), 1170.0));
    assert!(approx(g.bubble_scale(&vp, false), 1170.0 / 1536.0));
}

#[test]
fn mobile_scale_uses_the_rotated_box() {
    let vp = Viewport::new(375.0, 812.0);
    let g = BlobGeometry::new();
    let expected = BlobGeometry::expected_dimensions(&vp);
    assert!(approx(expected.width, 318.75));
    assert!(approx(expected.height, 212.5));
    // min(355 / 212.5, 700 / 318.75)
    assert!(approx(g.scale(&vp), 355.0 / 212.5));
    assert!(approx(g.final_width(&vp, true), 355.0));
}

#[test]
fn mobile_and_desktop_scales_are_symmetric_under_transposition() {
    for (w, h) in [(375.0, 812.0), (1440.0, 900.0), (800.0, 600.0), (320.0, 480.0)] {
        let vp = Viewport::new(w, h);
        let wide = measured(&vp, 600.0, 400.0);
        let tall = measured(&vp, 400.0, 600.0);
        assert!(approx(wide.scale_for(&vp, true), tall.scale_for(&vp, false)));
        assert!(approx(wide.scale_for(&vp, false), tall.scale_for(&vp, true)));
    }
}

#[test]
fn scale_is_positive_and_fits_across_viewports() {
    let mut w = 320.0;
    while w <= 3840.0 {
        let mut h = 480.0;
        while h <= 2160.0 {
            let vp = Viewport::new(w, h);
            for g in [BlobGeometry::new(), measured(&vp, 500.0, 333.0)] {
                let s = g.scale(&vp);
                assert!(s.is_finite() && s > 0.0, "{w}x{h}: {s}");

                let size = g.initial_dimensions(&vp);
                let (vw, vh) = if vp.is_mobile() {
                    (size.height, size.width)
                } else {
                    (size.width, size.height)
                };
                let avail_w = (w - 2.0 * BLOB_MARGIN).max(MIN_AVAILABLE_EXTENT);
                let avail_h =
                    (h - vp.navbar_height() - 2.0 * BLOB_MARGIN).max(MIN_AVAILABLE_EXTENT);
                assert!(vw * s <= avail_w + 0.01, "{w}x{h} width overflow");
                assert!(vh * s <= avail_h + 0.01, "{w}x{h} height overflow");
            }
            h += 120.0;
        }
        w += 160.0;
    }
}

#[test]
fn invalid_measurement_falls_back_to_expected_size() {
    let vp = Viewport::new(1440.0, 900.0);
    let g = measured(&vp, 0.0, f32::NAN);
    assert!(g.has_measurement());
    assert_eq!(g.initial_dimensions(&vp), BlobGeometry::expected_dimensions(&vp));
    assert!(g.scale(&vp).is_finite());
}

#[test]
fn generation_tracks_writes() {
    let vp = Viewport::new(1440.0, 900.0);
    let mut g = BlobGeometry::new();
    assert_eq!(g.generation(), 0);
    g.set_initial_dimensions(&vp, 600.0, 400.0);
    assert_eq!(g.generation(), 1);
    g.reset();
    assert_eq!(g.generation(), 2);
    // Nothing to forget.
    g.reset();
    assert_eq!(g.generation(), 2);
}

#[test]
fn tiny_viewports_never_collapse() {
    let vp = Viewport::new(50.0, 60.0);
    let g = BlobGeometry::new();
    let s = g.scale(&vp);
    assert!(s.is_finite() && s > 0.0);
    assert_eq!(BlobGeometry::expected_dimensions(&vp).width, 320.0 * 0.85);
    assert_ne!(s, FALLBACK_BLOB_SCALE);
}

#[test]
fn rotations_and_centering() {
    assert_eq!(BlobGeometry::rotation(false, RotationPhase::Initial), 0.0);
    assert_eq!(BlobGeometry::rotation(false, RotationPhase::Final), 0.0);
    assert_eq!(BlobGeometry::rotation(true, RotationPhase::Initial), 120.0);
    assert_eq!(BlobGeometry::rotation(true, RotationPhase::Final), 90.0);

    let vp = Viewport::new(1440.0, 900.0);
    let origin = BlobGeometry::centered_origin(&vp, Size::new(600.0, 400.0));
    assert_eq!(origin.x, 420.0);
    assert_eq!(origin.y, 300.0);
}

#[test]
fn invalid_measurement_names_the_bad_side() {
    let err = ChoreoError::InvalidMeasurement { what: "blob width", value: 0.0 };
    assert_eq!(err.to_string(), "invalid measurement for blob width: 0");

    // Either bad side still lands on the expected size.
    let vp = Viewport::new(1440.0, 900.0);
    let expected = BlobGeometry::expected_dimensions(&vp);
    assert_eq!(measured(&vp, 300.0, f32::NAN).initial_dimensions(&vp), expected);
    assert_eq!(measured(&vp, -1.0, 300.0).initial_dimensions(&vp), expected);
}

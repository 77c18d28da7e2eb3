use proptest::prelude::*;

use shotframe_layout::solver::{solve, LayoutConfig};
use shotframe_layout::text::{text_layout, TextConfig};
use shotframe_model::device;

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn preview_scenario_matches_hand_computed_layout() {
    // 600x1200 preview, iPhone shell 390x844 with a 26,58,338,732 screen.
    let iphone = device::lookup("iphone");
    let layout = solve(600.0, 1200.0, iphone, &LayoutConfig::default());

    // max_w = 504, max_h = 1200 - 144 - 60 = 996; height-bound.
    let scale = 996.0 / 844.0;
    assert_close(layout.scale, scale, "scale");
    assert_close(layout.scale, 1.180_094_786_7, "scale literal");

    let f = layout.frame_rect;
    assert_close(f.w, 460.236_966_824_6, "frame w");
    assert_close(f.h, 996.0, "frame h");
    assert_close(f.h, 1200.0 * 0.95 - 1200.0 * 0.12, "frame h from bands");
    assert_close(f.x, 69.881_516_587_7, "frame x");
    assert_close(f.y, 144.0, "frame y");

    let s = layout.screen_dest_rect;
    assert_close(s.x, 100.563_981_042_7, "screen x");
    assert_close(s.y, 212.445_497_630_3, "screen y");
    assert_close(s.w, 398.872_037_914_7, "screen w");
    assert_close(s.h, 863.829_383_886_3, "screen h");
}

#[test]
fn batch_sizes_share_preview_fractions_when_aspect_matches() {
    // 1290x2796 is not 1:2, so compare against a 1:2 export instead.
    let config = LayoutConfig::default();
    for d in device::all() {
        let preview = solve(600.0, 1200.0, d, &config).to_fractions(600.0, 1200.0);
        let export = solve(1800.0, 3600.0, d, &config).to_fractions(1800.0, 3600.0);
        for (a, b) in [(preview.0, export.0), (preview.1, export.1)] {
            assert_close(a.x, b.x, &d.key);
            assert_close(a.y, b.y, &d.key);
            assert_close(a.w, b.w, &d.key);
            assert_close(a.h, b.h, &d.key);
        }
    }
}

proptest! {
    #[test]
    fn layout_fractions_are_scale_invariant(
        device_index in 0usize..3,
        w1 in 16.0f64..4000.0,
        aspect in 0.25f64..4.0,
        factor in 0.1f64..10.0,
    ) {
        let d = &device::all()[device_index];
        let config = LayoutConfig::default();
        let (h1, w2) = (w1 / aspect, w1 * factor);
        let h2 = w2 / aspect;

        let (f1, s1) = solve(w1, h1, d, &config).to_fractions(w1, h1);
        let (f2, s2) = solve(w2, h2, d, &config).to_fractions(w2, h2);

        for (a, b) in [(f1, f2), (s1, s2)] {
            for (x, y) in [(a.x, b.x), (a.y, b.y), (a.w, b.w), (a.h, b.h)] {
                prop_assert!((x - y).abs() <= 1e-9 * x.abs().max(1.0));
            }
        }
    }

    #[test]
    fn text_metrics_are_scale_invariant(
        w1 in 16.0f64..4000.0,
        aspect in 0.25f64..4.0,
        factor in 0.1f64..10.0,
    ) {
        let config = TextConfig::default();
        let (h1, w2) = (w1 / aspect, w1 * factor);
        let h2 = w2 / aspect;
        let t1 = text_layout(w1, h1, &config);
        let t2 = text_layout(w2, h2, &config);

        prop_assert!((t1.title_size / h1 - t2.title_size / h2).abs() <= 1e-9);
        prop_assert!((t1.subtitle_baseline / h1 - t2.subtitle_baseline / h2).abs() <= 1e-9);
        prop_assert!((t1.center_x / w1 - t2.center_x / w2).abs() <= 1e-9);
    }
}

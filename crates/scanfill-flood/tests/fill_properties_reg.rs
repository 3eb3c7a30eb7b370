//! Randomized fill properties
//!
//! Random dot fields checked against a plain 4-connected breadth-first
//! search: every reachable matching pixel is filled exactly once, spread 0
//! is binary, seed order does not change merged selections and gap closing
//! only ever grows the filled region.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scanfill_core::{PaintDevice, Pixel, Point, Rect, Rgba, Selection, SelectionAction};
use scanfill_flood::{FillInterval, FillIntervalMap, ScanlineFill};
use std::collections::{HashSet, VecDeque};

const BOUNDS: Rect = Rect::new_unchecked(-12, -7, 31, 23);

/// Transparent field with opaque dots at the given density
fn random_field(rng: &mut StdRng, density: f64) -> PaintDevice {
    let mut dev = PaintDevice::new();
    for y in BOUNDS.y - 2..BOUNDS.bottom() + 2 {
        for x in BOUNDS.x - 2..BOUNDS.right() + 2 {
            if rng.random_bool(density) {
                let v = rng.random_range(1..=255u8);
                dev.set_pixel(x, y, Rgba::new(v, v, v, 255));
            }
        }
    }
    dev
}

fn random_point(rng: &mut StdRng) -> Point {
    Point::new(
        rng.random_range(BOUNDS.x..BOUNDS.right()),
        rng.random_range(BOUNDS.y..BOUNDS.bottom()),
    )
}

/// 4-connected pixels within `threshold` of the seed color
fn reachable(dev: &PaintDevice, seed: Point, threshold: u8) -> HashSet<(i32, i32)> {
    let reference = dev.pixel(seed.x, seed.y);
    let matches = |x: i32, y: i32| {
        BOUNDS.contains_point(x, y) && dev.pixel(x, y).difference(&reference) <= threshold
    };

    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    if matches(seed.x, seed.y) {
        seen.insert((seed.x, seed.y));
        queue.push_back((seed.x, seed.y));
    }
    while let Some((x, y)) = queue.pop_front() {
        for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
            if matches(nx, ny) && seen.insert((nx, ny)) {
                queue.push_back((nx, ny));
            }
        }
    }
    seen
}

fn selected(sel: &Selection) -> HashSet<(i32, i32)> {
    let mut out = HashSet::new();
    for y in BOUNDS.y - 3..BOUNDS.bottom() + 3 {
        for x in BOUNDS.x - 3..BOUNDS.right() + 3 {
            if sel.pixel(x, y) != 0 {
                out.insert((x, y));
            }
        }
    }
    out
}

// ============================================================================
// traversal
// ============================================================================

#[test]
fn test_fill_matches_breadth_first_search() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..40 {
        let density = [0.2, 0.35, 0.45, 0.55][round % 4];
        let mut dev = random_field(&mut rng, density);
        let seed = random_point(&mut rng);
        let threshold = [0, 0, 60, 200][round % 4];
        let expected = reachable(&dev, seed, threshold);

        let mut sel = Selection::new();
        let mut fill = ScanlineFill::new(&mut dev, seed, BOUNDS);
        fill.set_sanity_checks(true);
        fill.set_threshold(threshold as i32);
        let stats = fill.fill_selection(&mut sel);

        // each pixel reaches the sink once
        assert_eq!(stats.pixels_filled as usize, expected.len(), "round {round}");
        assert_eq!(selected(&sel), expected, "round {round}");
    }
}

#[test]
fn test_color_and_selection_fill_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..20 {
        let mut dev = random_field(&mut rng, 0.4);
        let seed = random_point(&mut rng);

        let mut sel = Selection::new();
        ScanlineFill::new(&mut dev, seed, BOUNDS).fill_selection(&mut sel);
        let by_selection = selected(&sel);

        let marker = Rgba::rgb(1, 2, 3);
        ScanlineFill::new(&mut dev, seed, BOUNDS).fill_color(marker);
        let mut by_color = HashSet::new();
        for y in BOUNDS.y..BOUNDS.bottom() {
            for x in BOUNDS.x..BOUNDS.right() {
                if dev.pixel(x, y) == marker {
                    by_color.insert((x, y));
                }
            }
        }
        assert_eq!(by_color, by_selection, "round {round}");
    }
}

#[test]
fn test_uniform_field_from_any_seed() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..10 {
        let mut dev = PaintDevice::with_default_pixel(Rgba::rgb(40, 80, 120));
        let seed = random_point(&mut rng);
        let stats = ScanlineFill::new(&mut dev, seed, BOUNDS).fill_color(Rgba::BLUE);
        assert_eq!(stats.pixels_filled as i64, BOUNDS.area());
    }
}

#[test]
fn test_seed_order_does_not_matter() {
    let mut rng = StdRng::seed_from_u64(42);
    for round in 0..15 {
        let mut dev = random_field(&mut rng, 0.45);
        let seeds: Vec<Point> = (0..4).map(|_| random_point(&mut rng)).collect();

        let mut merged = Vec::new();
        for order in [seeds.clone(), seeds.iter().rev().copied().collect()] {
            let mut total = Selection::new();
            for seed in order {
                let mut sel = Selection::new();
                ScanlineFill::new(&mut dev, seed, BOUNDS).fill_selection(&mut sel);
                total.apply_selection(&sel, SelectionAction::Add);
            }
            merged.push(selected(&total));
        }
        assert_eq!(merged[0], merged[1], "round {round}");
    }
}

// ============================================================================
// confidence and gap closing
// ============================================================================

#[test]
fn test_zero_spread_is_binary() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let mut dev = random_field(&mut rng, 0.7);
        let seed = random_point(&mut rng);
        let mut sel = Selection::new();
        let mut fill = ScanlineFill::new(&mut dev, seed, BOUNDS);
        fill.set_threshold(rng.random_range(0..=255));
        fill.set_opacity_spread(0);
        fill.fill_selection(&mut sel);
        assert_eq!(sel.count_pixels(&BOUNDS, |v| v != 0 && v != 255), 0);
    }
}

#[test]
fn test_gap_closing_is_monotonic() {
    let mut rng = StdRng::seed_from_u64(1234);
    for round in 0..15 {
        let mut dev = random_field(&mut rng, 0.3 + 0.02 * round as f64);
        let seed = random_point(&mut rng);

        let mut previous: Option<HashSet<(i32, i32)>> = None;
        for gap in 0..5 {
            let mut sel = Selection::new();
            let mut fill = ScanlineFill::new(&mut dev, seed, BOUNDS);
            fill.set_close_gap_size(gap);
            fill.fill_selection(&mut sel);
            let current = selected(&sel);
            if let Some(prev) = &previous {
                assert!(
                    prev.is_subset(&current),
                    "round {round}: gap {gap} lost pixels"
                );
            }
            previous = Some(current);
        }
    }
}

// ============================================================================
// interval map
// ============================================================================

#[test]
fn test_interval_map_insert_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let mut map = FillIntervalMap::new();
        let mut inserted = Vec::new();
        for _ in 0..rng.random_range(1..12) {
            let start = rng.random_range(-30..30);
            let end = start + rng.random_range(0..8);
            let iv = FillInterval::up(start, end, rng.random_range(0..3));
            map.insert_interval(iv);
            inserted.push(iv);
        }
        let once = map.intervals();
        for iv in &inserted {
            map.insert_interval(*iv);
        }
        assert_eq!(map.intervals(), once);

        // stored intervals per row neither overlap nor touch
        for pair in once.windows(2) {
            if pair[0].row == pair[1].row {
                assert!(pair[0].end + 1 < pair[1].start);
            }
        }
        // and cover exactly the inserted columns
        let covered: HashSet<(i32, i32)> = once
            .iter()
            .flat_map(|iv| (iv.start..=iv.end).map(move |x| (iv.row, x)))
            .collect();
        let wanted: HashSet<(i32, i32)> = inserted
            .iter()
            .flat_map(|iv| (iv.start..=iv.end).map(move |x| (iv.row, x)))
            .collect();
        assert_eq!(covered, wanted);
    }
}

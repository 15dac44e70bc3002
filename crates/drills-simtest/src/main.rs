//! Drills Headless Validation Harness
//!
//! Sweeps the pure exercise logic without a console: every guessing target,
//! the summing and timing parsers, and the bubble layout. Runs entirely
//! in-process with no user input and no rendering.
//!
//! Usage:
//!   cargo run -p drills-simtest
//!   cargo run -p drills-simtest -- --verbose

use std::time::Duration;

use rust_decimal::Decimal;

use drills_logic::bubble::{self, Dataset};
use drills_logic::guessing::{
    bisection_bound, bisection_guess, Feedback, GameSettings, GameStatus, GuessingGame,
};
use drills_logic::summing::{format_number, parse_number, NumberError, RunningTotal};
use drills_logic::timing::{
    format_duration, format_seconds, parse_duration, TimeAverager, TimingError,
};

// ── Sample data (same file the CLI docs point at) ───────────────────────
const SAMPLE_BUBBLES_TOML: &str = include_str!("../../../data/bubbles.toml");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Drills Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Guessing game sweep
    results.extend(validate_guessing(verbose));

    // 2. Summing
    results.extend(validate_summing(verbose));

    // 3. Timing
    results.extend(validate_timing(verbose));

    // 4. Bubble layout
    results.extend(validate_bubble(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Guessing ─────────────────────────────────────────────────────────

/// Bisection player; returns the final status and the number of turns taken.
fn play_bisection(game: &mut GuessingGame) -> (GameStatus, u32) {
    let (mut lo, mut hi) = (game.min(), game.max());
    let mut turns = 0;
    while !game.is_over() {
        let guess = bisection_guess(lo, hi);
        let Ok(turn) = game.guess(guess) else {
            break;
        };
        turns += 1;
        match turn.feedback {
            Feedback::TooLow => lo = guess + 1,
            Feedback::TooHigh => hi = guess - 1,
            Feedback::Correct => {}
        }
    }
    (game.status(), turns)
}

fn validate_guessing(verbose: bool) -> Vec<TestResult> {
    println!("--- Guessing Game ---");
    let mut results = Vec::new();
    let settings = GameSettings::default();

    // Bisection wins every target within the limit
    let bound = bisection_bound(settings.range_len());
    let mut worst = 0;
    let mut not_won = Vec::new();
    for target in settings.min..=settings.max {
        let Ok(mut game) = GuessingGame::with_target(&settings, target) else {
            not_won.push(target);
            continue;
        };
        match play_bisection(&mut game) {
            (GameStatus::Won { attempts }, _) => worst = worst.max(attempts),
            _ => not_won.push(target),
        }
    }
    results.push(TestResult {
        name: "guess_bisection_wins".into(),
        passed: not_won.is_empty() && worst <= bound && bound <= settings.max_attempts,
        detail: if not_won.is_empty() {
            format!(
                "all {} targets won, worst case {} guesses (bound {})",
                settings.range_len(),
                worst,
                bound
            )
        } else {
            format!("{} targets not won: {:?}", not_won.len(), not_won)
        },
    });

    // Direction of feedback for every guess against a fixed target
    let target = 63;
    let wide = GameSettings {
        max_attempts: u32::MAX,
        ..settings.clone()
    };
    let mut wrong = 0;
    if let Ok(mut game) = GuessingGame::with_target(&wide, target) {
        for guess in settings.min..=settings.max {
            if guess == target {
                continue;
            }
            let expected = if guess < target {
                Feedback::TooLow
            } else {
                Feedback::TooHigh
            };
            match game.guess(guess) {
                Ok(turn) if turn.feedback == expected => {}
                _ => wrong += 1,
            }
        }
    } else {
        wrong += 1;
    }
    results.push(TestResult {
        name: "guess_feedback_direction".into(),
        passed: wrong == 0,
        detail: format!("{} wrong hints against target {}", wrong, target),
    });

    // Always-wrong player loses after exactly max_attempts
    let mut bad_loss = 0;
    for target in [2, 50, 100] {
        match GuessingGame::with_target(&settings, target) {
            Ok(mut game) => {
                let mut turns = 0;
                while !game.is_over() && turns <= settings.max_attempts {
                    let _ = game.guess(1);
                    turns += 1;
                }
                if turns != settings.max_attempts || game.status() != (GameStatus::Lost { target })
                {
                    bad_loss += 1;
                }
            }
            Err(_) => bad_loss += 1,
        }
    }
    results.push(TestResult {
        name: "guess_loss_at_limit".into(),
        passed: bad_loss == 0,
        detail: format!(
            "always-wrong player loses after {} attempts ({} failures)",
            settings.max_attempts, bad_loss
        ),
    });

    // Random targets stay in range, and seeding is reproducible
    let seeded = GameSettings {
        seed: Some(2024),
        ..settings.clone()
    };
    let draw = |s: &GameSettings| -> Vec<i64> {
        let mut rng = s.rng();
        (0..1000)
            .filter_map(|_| GuessingGame::new(s, &mut rng).ok())
            .map(|g| g.target())
            .collect()
    };
    let first = draw(&seeded);
    let second = draw(&seeded);
    let in_range = first
        .iter()
        .all(|t| (settings.min..=settings.max).contains(t));
    let distinct = {
        let mut v = first.clone();
        v.sort_unstable();
        v.dedup();
        v.len()
    };
    results.push(TestResult {
        name: "guess_random_targets".into(),
        passed: first.len() == 1000 && in_range && first == second && distinct > 50,
        detail: format!(
            "{} draws, {} distinct, reproducible={}",
            first.len(),
            distinct,
            first == second
        ),
    });

    // Out-of-range and non-numeric input cost nothing
    let free = match GuessingGame::with_target(&settings, 10) {
        Ok(mut game) => {
            let rejected = game.parse_guess("abc").is_err()
                && game.parse_guess("150").is_err()
                && game.guess(0).is_err();
            rejected && game.attempts() == 0
        }
        Err(_) => false,
    };
    results.push(TestResult {
        name: "guess_invalid_input_free".into(),
        passed: free,
        detail: "rejected input leaves attempts at 0".into(),
    });

    if verbose {
        println!("  Bisection bound by range size:");
        for len in [10u64, 100, 1000, 1_000_000] {
            println!("    {:>9}: {} guesses", len, bisection_bound(len));
        }
    }

    results
}

// ── 2. Summing ──────────────────────────────────────────────────────────

fn validate_summing(_verbose: bool) -> Vec<TestResult> {
    println!("--- Sum Numbers ---");
    let mut results = Vec::new();

    let total = RunningTotal::from_values([2, 5, 3].map(Decimal::from));
    let shown = total.map(|t| (format_number(t.total()), t.count()));
    results.push(TestResult {
        name: "sum_example".into(),
        passed: shown == Ok(("10".to_string(), 3)),
        detail: format!("[2, 5, 3] → {:?}", shown),
    });

    // Integer sums are exact
    let n: i64 = 1000;
    let total = RunningTotal::from_values((1..=n).map(Decimal::from)).map(|t| t.total());
    let expected = Decimal::from(n * (n + 1) / 2);
    results.push(TestResult {
        name: "sum_integer_series".into(),
        passed: total == Ok(expected),
        detail: format!("1..={} → {:?} (expected {})", n, total, expected),
    });

    // Decimal entries carry no binary rounding: 0.1 added ten times is 1
    let tenth = parse_number("0.1");
    let total = tenth
        .and_then(|t| RunningTotal::from_values(std::iter::repeat(t).take(10)))
        .map(|t| format_number(t.total()));
    results.push(TestResult {
        name: "sum_decimal_exact".into(),
        passed: total.as_deref() == Ok("1"),
        detail: format!("0.1 × 10 → {:?}", total),
    });

    // Overflow is refused and the running total kept
    let mut full = RunningTotal::new();
    let kept = full.add(Decimal::MAX).is_ok()
        && full.add(Decimal::ONE) == Err(NumberError::Overflow)
        && full.total() == Decimal::MAX
        && full.count() == 1;
    results.push(TestResult {
        name: "sum_overflow_refused".into(),
        passed: kept,
        detail: "MAX + 1 rejected, total unchanged".into(),
    });

    let invalid = ["abc", "", "1,5", "NaN", "inf", "--3"];
    let accepted: Vec<_> = invalid
        .iter()
        .filter(|s| parse_number(s).is_ok())
        .collect();
    results.push(TestResult {
        name: "sum_rejects_invalid".into(),
        passed: accepted.is_empty(),
        detail: if accepted.is_empty() {
            format!("all {} invalid entries rejected", invalid.len())
        } else {
            format!("accepted: {:?}", accepted)
        },
    });

    results
}

// ── 3. Timing ───────────────────────────────────────────────────────────

fn validate_timing(_verbose: bool) -> Vec<TestResult> {
    println!("--- Average Time ---");
    let mut results = Vec::new();

    let mean = TimeAverager::from_durations([10, 20, 30].map(Duration::from_secs))
        .and_then(|averager| averager.mean());
    results.push(TestResult {
        name: "timing_example".into(),
        passed: mean == Ok(Duration::from_secs(20)),
        detail: format!("[10, 20, 30]s → {:?}", mean.map(format_duration)),
    });

    let empty = TimeAverager::new().mean();
    results.push(TestResult {
        name: "timing_empty_no_data".into(),
        passed: empty == Err(TimingError::NoData),
        detail: "empty input reports NoData".into(),
    });

    let good = [
        ("45", 45.0),
        ("1:30", 90.0),
        ("1:02:03", 3723.0),
        ("0:07.5", 7.5),
    ];
    let good_failures: Vec<_> = good
        .iter()
        .filter(|(s, secs)| parse_duration(s).map(|d| d.as_secs_f64()) != Ok(*secs))
        .map(|(s, _)| *s)
        .collect();
    results.push(TestResult {
        name: "timing_formats_accepted".into(),
        passed: good_failures.is_empty(),
        detail: format!("{} formats, failures: {:?}", good.len(), good_failures),
    });

    let bad = ["1:60", "-5", "a:b", "1:2:3:4", "1::2", ""];
    let bad_accepted: Vec<_> = bad.iter().filter(|s| parse_duration(s).is_ok()).collect();
    results.push(TestResult {
        name: "timing_formats_rejected".into(),
        passed: bad_accepted.is_empty(),
        detail: format!("{} malformed entries, accepted: {:?}", bad.len(), bad_accepted),
    });

    // Mean that rounds up to a whole second prints the same in both forms
    let mean = Duration::from_millis(19_999);
    let shown = (format_duration(mean), format_seconds(mean));
    results.push(TestResult {
        name: "timing_rounding_consistent".into(),
        passed: shown == ("0:20".to_string(), "20".to_string()),
        detail: format!("19.999s → {} ({} seconds)", shown.0, shown.1),
    });

    results
}

// ── 4. Bubble ───────────────────────────────────────────────────────────

fn check_dataset(name: &str, dataset: &Dataset, results: &mut Vec<TestResult>) {
    let errors = bubble::validate_dataset(dataset);
    results.push(TestResult {
        name: format!("{}_valid", name),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!("{} points", dataset.points.len())
        } else {
            format!("{} errors: {:?}", errors.len(), errors)
        },
    });

    let Ok(layout) = bubble::layout(dataset, 40.0) else {
        return;
    };

    results.push(TestResult {
        name: format!("{}_one_marker_per_point", name),
        passed: layout.markers.len() == dataset.points.len(),
        detail: format!(
            "{} markers for {} points",
            layout.markers.len(),
            dataset.points.len()
        ),
    });

    // Larger size ⇒ radius at least as large
    let mut pairs: Vec<(f64, f64)> = dataset
        .points
        .iter()
        .zip(&layout.markers)
        .map(|(p, m)| (p.size, m.radius))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    let monotonic = pairs.windows(2).all(|w| w[0].1 <= w[1].1);
    results.push(TestResult {
        name: format!("{}_radius_monotonic", name),
        passed: monotonic,
        detail: "marker radius non-decreasing in size".into(),
    });
}

fn validate_bubble(verbose: bool) -> Vec<TestResult> {
    println!("--- Bubble Diagram ---");
    let mut results = Vec::new();

    let sample = bubble::sample_dataset();
    check_dataset("bubble_builtin", &sample, &mut results);

    match toml::from_str::<Dataset>(SAMPLE_BUBBLES_TOML) {
        Ok(file) => {
            if verbose {
                println!("  data/bubbles.toml: {:?} ({} points)", file.title, file.points.len());
            }
            check_dataset("bubble_sample_file", &file, &mut results);
        }
        Err(e) => results.push(TestResult {
            name: "bubble_sample_file_parse".into(),
            passed: false,
            detail: format!("TOML parse error: {}", e),
        }),
    }

    results
}

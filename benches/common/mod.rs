//! Common utilities for benchmarks.
//!
//! Provides test data generators with fixed seeds for reproducibility.

#![allow(dead_code)]

use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Fixed seed for reproducible benchmark data
const SEED: u64 = 42;

/// Context lines around every change, as `git diff` emits by default
const CONTEXT: usize = 3;

/// Create a seeded RNG for reproducible test data
pub fn seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(SEED)
}

/// Generate a git diff touching `file_count` files with `hunks_per_file` hunks each.
///
/// Every hunk is framed by context lines and carries accurate line counts,
/// so each one yields exactly one suggestion.
pub fn generate_diff(file_count: usize, hunks_per_file: usize) -> String {
    let mut rng = seeded_rng();
    let mut out = String::new();

    for f in 0..file_count {
        let path = format!("src/module_{}/file_{}.rs", f % 7, f);
        out.push_str(&format!("diff --git a/{path} b/{path}\n"));
        out.push_str("index 366b30f7..f17e3c88 100644\n");
        out.push_str(&format!("--- a/{path}\n+++ b/{path}\n"));

        let mut old_start = 1 + rng.random_range(0..20);
        for h in 0..hunks_per_file {
            let (body, old_lines, new_lines) = generate_hunk_body(&mut rng, h);
            out.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                old_start, old_lines, old_start, new_lines
            ));
            out.push_str(&body);
            old_start += old_lines + rng.random_range(10..40);
        }
    }

    out
}

/// Returns the hunk body with its old and new line counts.
fn generate_hunk_body(rng: &mut ChaCha8Rng, hunk: usize) -> (String, usize, usize) {
    let mut body = String::new();
    let (mut old_lines, mut new_lines) = (0, 0);

    let context = |body: &mut String, rng: &mut ChaCha8Rng, n: usize| {
        for i in 0..n {
            body.push_str(&format!(" {}\n", generate_code_line(rng, hunk * 100 + i)));
        }
        n
    };

    let n = context(&mut body, rng, CONTEXT);
    old_lines += n;
    new_lines += n;

    for i in 0..rng.random_range(1..12) {
        let content = generate_code_line(rng, hunk * 100 + CONTEXT + i);
        match rng.random_range(0..10u8) {
            0..=3 => {
                body.push_str(&format!("+{}\n", content));
                new_lines += 1;
            }
            4..=7 => {
                body.push_str(&format!("-{}\n", content));
                old_lines += 1;
            }
            _ => {
                body.push_str(&format!(" {}\n", content));
                old_lines += 1;
                new_lines += 1;
            }
        }
    }

    let n = context(&mut body, rng, CONTEXT);
    old_lines += n;
    new_lines += n;

    (body, old_lines, new_lines)
}

/// Generate a line of realistic Rust-like code
fn generate_code_line(rng: &mut ChaCha8Rng, line_num: usize) -> String {
    let templates = [
        "    let x = value.unwrap_or_default();",
        "    fn process_data(input: &str) -> Result<String> {",
        "    }",
        "    if condition { return Ok(()); }",
        "    for item in items.iter() {",
        "    match result {",
        "        Ok(v) => v,",
        "        Err(e) => return Err(e),",
        "    use std::collections::HashMap;",
        "    pub struct Config {",
        "        field: String,",
        "    impl Default for Config {",
        "    #[derive(Debug, Clone)]",
        "    /// Documentation comment",
        "    // Regular comment",
        "    assert_eq!(expected, actual);",
        "    println!(\"Debug: {}\", value);",
        "    self.inner.lock().unwrap()",
        "    async fn fetch_data() -> Result<Vec<u8>> {",
        "    .map(|x| x * 2)",
    ];

    let idx = rng.random_range(0..templates.len());
    format!("{} // line {}", templates[idx], line_num)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_generate_diff_reproducible() {
        assert_eq!(super::generate_diff(3, 4), super::generate_diff(3, 4));
    }

    #[test]
    fn test_generate_diff_shape() {
        let diff = super::generate_diff(5, 2);
        assert_eq!(diff.matches("diff --git ").count(), 5);
        assert_eq!(diff.lines().filter(|l| l.starts_with("@@")).count(), 10);
    }
}

use anyhow::{Context, Result, bail};
use std::collections::HashSet;

/// Seed used when the command line names none.
pub const DEFAULT_SEED: u64 = 1337;

/// Upper bound on how many seeds a single range token may expand to.
const MAX_RANGE_LEN: u64 = 100_000;

/// Split a comma-separated CLI argument into trimmed, non-empty tokens.
#[must_use]
pub fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve CLI seed tokens into a de-duplicated, ordered seed list.
///
/// Supports literal integers (negative values use their magnitude),
/// half-open ranges `a..b` and inclusive ranges `a..=b`.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    let mut seen = HashSet::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }
        for seed in expand_token(token)? {
            if seen.insert(seed) {
                seeds.push(seed);
            }
        }
    }

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }
    Ok(seeds)
}

fn expand_token(token: &str) -> Result<Vec<u64>> {
    if let Some((start, end)) = token.split_once("..") {
        let (end, inclusive) = match end.strip_prefix('=') {
            Some(end) => (end, true),
            None => (end, false),
        };
        let start = parse_seed(start)?;
        let end = parse_seed(end)?;
        if start > end {
            bail!("Seed range is reversed: {token}");
        }
        if start == end && !inclusive {
            bail!("Seed range is empty: {token}");
        }
        if (end - start).saturating_add(u64::from(inclusive)) > MAX_RANGE_LEN {
            bail!("Seed range {token} expands to more than {MAX_RANGE_LEN} seeds");
        }
        return Ok(if inclusive {
            (start..=end).collect()
        } else {
            (start..end).collect()
        });
    }
    Ok(vec![parse_seed(token)?])
}

fn parse_seed(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value.unsigned_abs());
    }
    raw.parse::<u64>()
        .with_context(|| format!("Unrecognized seed token: {raw}"))
}

//! `-X` diagnostics: ingest counters, detection state, chart geometry.

use crate::core::config::ChartConfig;
use crate::core::constants::DETECT_ATTEMPTS;
use crate::core::ingest::Loaded;

/// Full post-chart report on stderr so it never mixes into a piped chart.
pub fn print_report(cfg: &ChartConfig, loaded: &Loaded, cells: usize, factor: usize) {
    let stats = &loaded.stats;
    let fields = &loaded.fields;
    let hits = &loaded.detector;

    let bytes = stats.bytes as f64;
    let rate = if stats.load_secs > 0.02 && stats.bytes > 0 {
        format!("{}/s", human_bytes(bytes / stats.load_secs))
    } else {
        String::new()
    };
    let te = cfg.width.unwrap_or(cfg.term_cols);
    let width_note = if cfg.width.is_some() { "(-x limit)" } else { "" };
    let compression = if factor > 1 {
        factor.to_string()
    } else {
        "No".to_owned()
    };
    let detected = match fields.first_hit {
        Some((line, attempt)) => {
            format!("{} line (attempt {attempt}/{DETECT_ATTEMPTS})", ordinal(line))
        }
        None => "Undetected".to_owned(),
    };

    eprint!(
        "\n\
         \x20Total lines:     {lines} ({size}) {rate}\n\
         \x20  Processed:     {processed} ({processed_pct}%)\n\
         \x20  Error:         {errors} ({error_pct}%) {preview}\n\
         \x20  Skipped:       {skipped} ({skipped_pct}%)\n\
         \x20Error match:     {mismatches}\n\
         \x20Values in chart: {charted}\n\
         \x20Terminal width:  {te} {width_note}\n\
         \x20Chart width:     {cells} ({cells_pct}%)\n\
         \x20Compression:     {compression}\n\
         \x20Amount Σ:        {bucket_count}\n\
         \x20Filter ta/fr/to: {target}, {from}, {to}\n\
         \x20First timestamp: {detected}\n\
         \x20  Hit li/TS/D/T: ({attempts},{ts_hits},{date_hits},{time_hits})\n\
         \x20  f: TS='{first_ts}', D='{first_date}', T='{first_time}'\n\
         \x20  l: TS='{last_ts}', D='{last_date}', T='{last_time}'\n\n",
        lines = stats.lines,
        size = human_bytes(bytes),
        processed = loaded.processed,
        processed_pct = percent(loaded.processed, stats.lines, 3),
        errors = stats.errors,
        error_pct = percent(stats.errors, stats.lines, 3),
        preview = error_preview(&stats.error_lines),
        skipped = stats.skipped,
        skipped_pct = percent(stats.skipped, stats.lines, 3),
        mismatches = fields.format_errors,
        charted = loaded.values.len(),
        cells_pct = percent(cells, te, 1),
        bucket_count = loaded.bucket_count,
        target = shown(cfg.target.as_deref()),
        from = shown(cfg.from.as_deref()),
        to = shown(cfg.to.as_deref()),
        attempts = hits.attempts,
        ts_hits = hits.timestamp_hits,
        date_hits = hits.date_hits,
        time_hits = hits.time_hits,
        first_ts = shown(fields.first_timestamp.as_deref()),
        first_date = shown(fields.first_date.as_deref()),
        first_time = shown(fields.first_time.as_deref()),
        last_ts = shown(fields.last_timestamp.as_deref()),
        last_date = shown(fields.last_date.as_deref()),
        last_time = shown(fields.last_time.as_deref()),
    );
}

/// Counters for a run that charted nothing. Stdout, like the chart itself.
pub fn print_empty(loaded: &Loaded) {
    println!(
        "\n\
         \x20    Total lines: {}\n\
         \x20Processed lines: {}\n\
         \x20    Error lines: {}\n\
         \x20  Skipped lines: {}\n",
        loaded.stats.lines, loaded.processed, loaded.stats.errors, loaded.stats.skipped
    );
}

/// Binary-prefix size, trimmed to at most two significant decimals.
fn human_bytes(mut b: f64) -> String {
    for unit in ["Bytes", "KiB", "MiB"] {
        if b < 1024.0 {
            return scaled(b, unit);
        }
        b /= 1024.0;
    }
    scaled(b, "GiB")
}

fn scaled(b: f64, unit: &str) -> String {
    if b.fract() == 0.0 {
        return format!("{b:.0} {unit}");
    }
    let fixed = format!("{b:.2}");
    format!("{} {unit}", fixed.trim_end_matches('0').trim_end_matches('.'))
}

/// Percentage with trailing zeros trimmed; `n/a` when the whole is zero.
fn percent(part: usize, whole: usize, decimals: usize) -> String {
    if whole == 0 {
        return "n/a".to_owned();
    }
    let pct = part as f64 / whole as f64 * 100.0;
    let fixed = format!("{pct:.decimals$}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// First three offending line numbers, with a marker when more were seen.
fn error_preview(lines: &[usize]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let head: Vec<String> = lines.iter().take(3).map(ToString::to_string).collect();
    let list = format!("[{}]", head.join(", "));
    if lines.len() > 3 {
        format!("{list}...")
    } else {
        list
    }
}

fn ordinal(n: usize) -> String {
    let teens = (11..=13).contains(&(n % 100));
    let suffix = if teens {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

fn shown(v: Option<&str>) -> &str {
    v.unwrap_or("None")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_sizes_climb_the_ladder() {
        assert_eq!(human_bytes(0.0), "0 Bytes");
        assert_eq!(human_bytes(1023.0), "1023 Bytes");
        assert_eq!(human_bytes(1024.0), "1 KiB");
        assert_eq!(human_bytes(1536.0), "1.5 KiB");
        assert_eq!(human_bytes(2_621.44), "2.56 KiB");
        assert_eq!(human_bytes(1024.0 * 1024.0), "1 MiB");
        assert_eq!(human_bytes(5.0 * 1024.0 * 1024.0 * 1024.0), "5 GiB");
        assert_eq!(human_bytes(2048.0 * 1024.0 * 1024.0 * 1024.0), "2048 GiB");
    }

    #[test]
    fn fractions_trim_trailing_zeros() {
        assert_eq!(human_bytes(1126.4), "1.1 KiB");
        assert_eq!(percent(1, 1, 3), "100");
        assert_eq!(percent(1, 3, 3), "33.333");
        assert_eq!(percent(50, 80, 1), "62.5");
        assert_eq!(percent(0, 5, 3), "0");
        assert_eq!(percent(3, 0, 3), "n/a");
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(101), "101st");
        assert_eq!(ordinal(111), "111th");
    }

    #[test]
    fn error_line_preview_caps_at_three() {
        assert_eq!(error_preview(&[]), "");
        assert_eq!(error_preview(&[5]), "[5]");
        assert_eq!(error_preview(&[1, 2, 3]), "[1, 2, 3]");
        assert_eq!(error_preview(&[1, 2, 3, 4]), "[1, 2, 3]...");
    }
}

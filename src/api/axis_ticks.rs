/// One axis tick: domain value plus its formatted label.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct AxisTick {
    pub value: f64,
    pub label: String,
}

/// Step of the form `{1, 2, 5} * 10^n` closest to `span / count`.
pub(super) fn nice_step(span: f64, count: usize) -> f64 {
    let raw = span / count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let power = 10_f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Decimals needed to tell neighbouring ticks apart.
pub(super) fn label_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

/// Decimals needed to print `value` exactly, capped at 6.
fn value_precision(value: f64) -> usize {
    (0..=6)
        .find(|&decimals| {
            let scaled = value * 10_f64.powi(decimals as i32);
            (scaled - scaled.round()).abs() < 1e-9 * scaled.abs().max(1.0)
        })
        .unwrap_or(6)
}

pub(super) fn format_tick(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    // "-0" and "-0.00" read as noise on an axis.
    if text.starts_with('-') && text[1..].chars().all(|ch| ch == '0' || ch == '.') {
        return text[1..].to_owned();
    }
    text
}

/// Ticks inside `[min, max]`.
///
/// Explicit `tick_values` are kept in the given order, minus non-finite or
/// out-of-domain entries; otherwise roughly `tick_count` nice values are
/// generated.
pub(super) fn axis_ticks(min: f64, max: f64, tick_values: &[f64], tick_count: usize) -> Vec<AxisTick> {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };

    if !tick_values.is_empty() {
        let values: Vec<f64> = tick_values
            .iter()
            .copied()
            .filter(|value| value.is_finite() && (low..=high).contains(value))
            .collect();
        let precision = values.iter().copied().map(value_precision).max().unwrap_or(0);
        return values
            .into_iter()
            .map(|value| AxisTick {
                value,
                label: format_tick(value, precision),
            })
            .collect();
    }

    let step = nice_step(high - low, tick_count);
    if step == 0.0 {
        return vec![AxisTick {
            value: low,
            label: format_tick(low, 0),
        }];
    }

    let precision = label_precision(step);
    let first = (low / step).ceil() as i64;
    let last = (high / step).floor() as i64;
    (first..=last)
        .map(|index| {
            let value = index as f64 * step;
            AxisTick {
                value,
                label: format_tick(value, precision),
            }
        })
        .collect()
}

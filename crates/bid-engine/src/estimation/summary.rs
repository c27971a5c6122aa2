use super::a_value::AValueLine;
use super::domain::BidEstimate;

/// Formats a whole-won amount with comma thousands separators.
pub fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn won(amount: f64) -> String {
    format!("{} KRW", group_thousands(amount.round() as i64))
}

/// Human-readable walk-through of how an estimate was derived.
pub fn explain(estimate: &BidEstimate, a_value_lines: &[AValueLine]) -> String {
    let mut lines = Vec::new();

    let basis_note = if estimate.used_fallback {
        " (fallback amount)"
    } else {
        ""
    };
    lines.push(format!(
        "Basis amount: {}{}",
        won(estimate.basis_amount),
        basis_note
    ));

    if let Some(range) = estimate.price_range {
        lines.push(format!(
            "Preliminary price range: {:.3}% ~ {:.3}%",
            range.begin_rate, range.end_rate
        ));
    }

    lines.push(format!("A-value: {}", won(estimate.a_value)));
    for line in a_value_lines.iter().filter(|line| line.included && line.amount != 0.0) {
        lines.push(format!("  - {}: {}", line.component.label(), won(line.amount)));
    }

    lines.push(format!("Lower-limit rate: {}%", estimate.lower_limit_rate));

    let mut rate_line = format!(
        "Assessment rate: {:.3}% via {}",
        estimate.assessment_rate,
        estimate.strategy.label()
    );
    if let Some(classification) = estimate.classification {
        rate_line.push_str(&format!(
            " [{} / {} / {}]",
            classification.region_scope.label(),
            classification.license_group.label(),
            classification.amount_range.label()
        ));
    }
    if let Some(tier) = estimate.lookup_tier {
        rate_line.push_str(&format!(" ({tier:?})"));
    }
    lines.push(rate_line);

    lines.push(format!(
        "Estimated price: {} KRW",
        group_thousands(estimate.estimated_price)
    ));
    lines.push(format!(
        "Estimated lower bound: {} KRW",
        group_thousands(estimate.estimated_lower_bound)
    ));
    lines.push(format!(
        "Recommended bid: {} KRW",
        group_thousands(estimate.optimal_bid_price)
    ));
    lines.push(format!(
        "Lower bound interval: {} ~ {} KRW",
        group_thousands(estimate.confidence_range.low),
        group_thousands(estimate.confidence_range.high)
    ));

    for point in &estimate.price_points {
        lines.push(format!(
            "  * {} ({:.2}%): {} KRW, bid rate {:.2}%",
            point.label.label(),
            point.assessment_rate,
            group_thousands(point.price),
            point.bid_rate
        ));
    }

    lines.join("\n")
}

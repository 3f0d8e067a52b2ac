use chrono::NaiveDate;

/// Inclusive price range treated as "the same level" as some centre price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub low: i64,
    pub high: i64,
}

impl PriceBand {
    pub fn contains(&self, price: i64) -> bool {
        price >= self.low && price <= self.high
    }
}

/// Calculate the similarity band around `price`.
///
/// Both bounds are truncated toward zero after scaling, so membership is not
/// symmetric: `a` inside the band of `b` does not imply the reverse.
pub fn similarity_band(price: i64, tolerance: f64) -> PriceBand {
    let price = price as f64;
    let low = (price * (1.0 - tolerance)) as i64;
    let high = (price * (1.0 + tolerance)) as i64;
    // negative prices flip the bounds
    PriceBand {
        low: low.min(high),
        high: low.max(high),
    }
}

/// Format a price with thousands separators, e.g. 1234567 -> "1,234,567"
pub fn format_price(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if price < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_date(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}

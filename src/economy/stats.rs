use crate::shared::round2;

/// Lifetime economy statistics for the status display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EconomyStats {
    pub total_earned: f64,
    pub total_spent: f64,
    pub total_harvests: u64,
    pub total_transactions: u64,
}

impl EconomyStats {
    pub fn record_spend(&mut self, amount: f64) {
        self.total_spent = round2(self.total_spent + amount);
        self.total_transactions += 1;
    }

    pub fn record_earning(&mut self, amount: f64) {
        self.total_earned = round2(self.total_earned + amount);
        self.total_transactions += 1;
    }

    pub fn record_harvest(&mut self, earnings: f64) {
        self.record_earning(earnings);
        self.total_harvests += 1;
    }
}

/// Format a currency amount as a display string (e.g. "$1,234.50").
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = (cents / 100).abs().to_string();
    let frac = (cents % 100).abs();

    let mut result = String::new();
    if cents < 0 {
        result.push('-');
    }
    result.push('$');
    let digits: Vec<char> = whole.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result.push('.');
    result.push_str(&format!("{:02}", frac));
    result
}

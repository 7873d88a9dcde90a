use tracing::debug;

/// Digit-only price entry with a thousands-separated display value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceInput {
    value: Option<u64>,
    display: String,
}

impl PriceInput {
    /// Apply raw text from the input box.
    ///
    /// Every non-digit character is dropped. Text without digits clears the
    /// price. Input too large for a `u64` is declined and the previous value
    /// is kept.
    pub fn set(&mut self, raw: &str) {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            self.clear();
            return;
        }

        match digits.parse::<u64>() {
            Ok(value) => {
                self.value = Some(value);
                self.display = format_thousands(value);
            }
            Err(e) => debug!("Ignoring price input {:?}: {}", raw, e),
        }
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.display.clear();
    }

    pub fn value(&self) -> Option<u64> {
        self.value
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

/// Render an integer with `,` between digit groups
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

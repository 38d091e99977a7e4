pub fn with_commas(value: i64) -> String {
    let is_negative = value < 0;
    let digits = value.abs().to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    let formatted: String = out.into_iter().rev().collect();
    if is_negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

pub fn amount(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as i64;
    format!("{}{}.{:02}", sign, with_commas(cents / 100), cents % 100)
}

// Signed variant used by list rows: spent renders as "− 250.00".
pub fn signed_amount(value: f64, spent: bool) -> String {
    if spent {
        format!("− {}", amount(value))
    } else {
        format!("+ {}", amount(value))
    }
}

// The backend stores calendar dates but may echo them back with a time part.
pub fn calendar_date(raw: &str) -> &str {
    raw.split('T').next().unwrap_or(raw)
}

#[cfg(target_arch = "wasm32")]
pub fn today() -> String {
    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    calendar_date(&iso).to_string()
}

#[cfg(target_arch = "wasm32")]
pub fn current_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

// Native builds only exist for the test suite; nothing date-driven runs there.
#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> String {
    String::new()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_year() -> i32 {
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_group_thousands() {
        assert_eq!(with_commas(0), "0");
        assert_eq!(with_commas(999), "999");
        assert_eq!(with_commas(1000), "1,000");
        assert_eq!(with_commas(1234567), "1,234,567");
        assert_eq!(with_commas(-4500), "-4,500");
    }

    #[test]
    fn amount_renders_two_decimals() {
        assert_eq!(amount(0.0), "0.00");
        assert_eq!(amount(250.0), "250.00");
        assert_eq!(amount(1234.5), "1,234.50");
        assert_eq!(amount(-99.99), "-99.99");
    }

    #[test]
    fn amount_rounds_fractional_cents() {
        assert_eq!(amount(10.005), "10.01");
        assert_eq!(amount(0.004), "0.00");
    }

    #[test]
    fn calendar_date_strips_time_part() {
        assert_eq!(calendar_date("2024-03-01T00:00:00.000Z"), "2024-03-01");
        assert_eq!(calendar_date("2024-03-01"), "2024-03-01");
        assert_eq!(calendar_date(""), "");
    }
}

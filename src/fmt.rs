use chrono::NaiveDate;

/// Two decimals with thousands separators: 1,234.56
pub fn number(val: f64) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative {
        format!("-{grouped}.{dec_part}")
    } else {
        format!("{grouped}.{dec_part}")
    }
}

/// Amount with a currency label: `KSh 1,234.56`. An empty label drops the prefix.
pub fn money(val: f64, currency: &str) -> String {
    if currency.is_empty() {
        number(val)
    } else {
        format!("{currency} {}", number(val))
    }
}

/// DD/MM/YYYY
pub fn date(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(1234.56), "1,234.56");
        assert_eq!(number(-500.00), "-500.00");
        assert_eq!(number(0.0), "0.00");
        assert_eq!(number(1000000.99), "1,000,000.99");
        assert_eq!(number(42.10), "42.10");
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.5, "KSh"), "KSh 1,234.50");
        assert_eq!(money(-20.0, "AED"), "AED -20.00");
        assert_eq!(money(7.0, ""), "7.00");
    }

    #[test]
    fn test_date_formatting() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(date(d), "05/01/2024");
    }
}

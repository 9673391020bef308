//! 통화/숫자/백분율 표시 및 관대한 파싱 도우미 (en-US 표기).

/// 소수 자릿수에 맞춰 반올림(0에서 먼 쪽)한 뒤 천 단위 구분 기호를 넣는다.
fn grouped(value: f64, decimals: usize) -> (bool, String) {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value.abs() * factor).round() / factor;
    let text = format!("{rounded:.decimals$}");
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text.clone(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + decimals + 1);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    let negative = value < 0.0 && rounded != 0.0;
    (negative, out)
}

/// 미국 달러 표기. 예: `$1,234,567`, `-$1,234.50`
pub fn format_currency(value: f64, decimals: usize) -> String {
    let (negative, body) = grouped(value, decimals);
    if negative {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// 천 단위 구분 숫자. 예: `1,234,567`
pub fn format_number(value: f64, decimals: usize) -> String {
    let (negative, body) = grouped(value, decimals);
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// 비율(0.4)을 백분율(`40%`)로 표기한다.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}%", format_number(value * 100.0, decimals))
}

/// 숫자, `.`, `-` 이외 문자를 제거한 뒤 앞쪽의 유효한 숫자만 읽는다.
fn lenient_parse(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        match c {
            '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            d if d.is_ascii_digit() => seen_digit = true,
            _ => break,
        }
        end = i + 1;
    }
    if !seen_digit {
        return None;
    }
    cleaned[..end].trim_end_matches('.').parse().ok()
}

/// `$1,234,567` 형태의 문자열을 숫자로 읽는다. 실패하면 0.
pub fn parse_currency(value: &str) -> f64 {
    lenient_parse(value).unwrap_or(0.0)
}

/// `1,234,567` 형태의 문자열을 숫자로 읽는다. 실패하면 0.
pub fn parse_number(value: &str) -> f64 {
    lenient_parse(value).unwrap_or(0.0)
}

/// `40%` 또는 `40`을 0.4로 읽는다. 1 이하의 값은 이미 비율로 본다.
pub fn parse_percent(value: &str) -> f64 {
    match lenient_parse(value) {
        Some(v) if v > 1.0 => v / 100.0,
        Some(v) => v,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_grouping_and_sign() {
        assert_eq!(format_currency(1_139_475.0, 0), "$1,139,475");
        assert_eq!(format_currency(-1234.5, 2), "-$1,234.50");
        assert_eq!(format_currency(999.5, 0), "$1,000");
        assert_eq!(format_currency(-0.2, 0), "$0");
    }

    #[test]
    fn number_and_percent() {
        assert_eq!(format_number(7680.0, 0), "7,680");
        assert_eq!(format_number(123.456, 1), "123.5");
        assert_eq!(format_percent(0.4, 0), "40%");
        assert_eq!(format_percent(0.125, 1), "12.5%");
    }

    #[test]
    fn lenient_parsing() {
        assert_eq!(parse_currency("$1,234,567"), 1_234_567.0);
        assert_eq!(parse_number("-42.5 units"), -42.5);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("1.2.3"), 1.2);
        assert_eq!(parse_percent("40%"), 0.4);
        assert_eq!(parse_percent("0.15"), 0.15);
    }
}

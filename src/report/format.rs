use bigdecimal::BigDecimal;

/// 截断为整数 (向零取整) 并按千位加逗号, 例如 -80000.9 -> "-80,000"
pub fn thousands(value: &BigDecimal) -> String {
    let digits = value.with_scale(0).to_string();
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}")
}

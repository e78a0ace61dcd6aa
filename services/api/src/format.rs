/// Formats an amount as Brazilian reais, e.g. `R$ 1.234.567,89`. Works on the decimal
/// rendering, so any finite amount keeps all of its digits.
pub(crate) fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return format!("R$ {value}");
    }

    let rendered = format!("{:.2}", value.abs());
    let (digits, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && rendered != "0.00" { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction}")
}

pub(crate) fn format_percent(value: f64) -> String {
    let rendered = format!("{value:.1}").replace('.', ",");
    let rendered = rendered.strip_suffix(",0").unwrap_or(&rendered);
    format!("{rendered}%")
}

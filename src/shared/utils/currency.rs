/// 金額を表示用の通貨文字列に変換するフォーマッタ
pub trait CurrencyFormatter {
    /// 金額をフォーマットする（非有限値は0として扱う）
    fn format(&self, amount: f64) -> String;
}

/// トルコリラ（tr-TR）のフォーマッタ
///
/// 例: `₺1.234,56`, `-₺5,00`
#[derive(Debug, Default, Clone, Copy)]
pub struct TryFormatter;

impl CurrencyFormatter for TryFormatter {
    fn format(&self, amount: f64) -> String {
        format_try(amount)
    }
}

/// トルコリラ形式で金額をフォーマットする
///
/// # 引数
/// * `amount` - 金額
///
/// # 戻り値
/// 桁区切りに`.`、小数点に`,`を使用した文字列
pub fn format_try(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };

    // 小数第2位で四捨五入（0から遠い方向）
    let cents = (amount.abs() * 100.0).round();
    let negative = amount < 0.0 && cents > 0.0;

    let whole = (cents / 100.0).trunc() as u128;
    let fraction = (cents % 100.0) as u8;

    let sign = if negative { "-" } else { "" };
    format!("{sign}₺{},{fraction:02}", group_thousands(whole))
}

/// 3桁ごとに`.`で区切る
fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }

    out
}

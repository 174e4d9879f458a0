use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;

/// ロケールに応じた文字列比較戦略
pub trait Collator {
    /// 2つの文字列を比較する
    fn compare(&self, a: &str, b: &str) -> Ordering;

    /// この戦略が対象とするロケール識別子
    fn locale(&self) -> &str;
}

/// ロケール識別子から比較戦略を取得する
///
/// # 引数
/// * `locale` - ロケール識別子（例: "tr", "tr-TR"）
///
/// # 戻り値
/// トルコ語ロケールの場合は`TurkishCollator`、それ以外は`CodepointCollator`
pub fn collator_for(locale: &str) -> Box<dyn Collator> {
    let normalized = locale.trim().to_ascii_lowercase().replace('_', "-");
    if normalized == "tr" || normalized.starts_with("tr-") {
        Box::new(TurkishCollator)
    } else {
        log::debug!("ロケール {locale} は未対応のため、コードポイント順で比較します");
        Box::new(CodepointCollator)
    }
}

/// Unicodeコードポイント順の比較
#[derive(Debug, Default, Clone, Copy)]
pub struct CodepointCollator;

impl Collator for CodepointCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }

    fn locale(&self) -> &str {
        "und"
    }
}

/// トルコ語アルファベット順の比較
///
/// 比較は3段階で行う:
/// 1. 文字（大文字小文字・アクセントを無視）
/// 2. アクセント（â, î, û など）
/// 3. 大文字小文字（小文字が先）
#[derive(Debug, Default, Clone, Copy)]
pub struct TurkishCollator;

/// トルコ語アルファベット（q, w, x は外来文字として該当位置に置く）
const TURKISH_ALPHABET: &str = "abcçdefgğhıijklmnoöpqrsştuüvwxyz";

static LETTER_WEIGHTS: Lazy<HashMap<char, u32>> = Lazy::new(|| {
    TURKISH_ALPHABET
        .chars()
        .enumerate()
        .map(|(i, c)| (c, i as u32))
        .collect()
});

/// トルコ語アルファベットに含まれないアクセント付き文字と基底文字の対応
static ACCENT_BASES: Lazy<HashMap<char, char>> = Lazy::new(|| {
    [
        ('á', 'a'),
        ('à', 'a'),
        ('â', 'a'),
        ('ä', 'a'),
        ('ã', 'a'),
        ('å', 'a'),
        ('é', 'e'),
        ('è', 'e'),
        ('ê', 'e'),
        ('ë', 'e'),
        ('í', 'i'),
        ('ì', 'i'),
        ('î', 'i'),
        ('ï', 'i'),
        ('ó', 'o'),
        ('ò', 'o'),
        ('ô', 'o'),
        ('õ', 'o'),
        ('ú', 'u'),
        ('ù', 'u'),
        ('û', 'u'),
        ('ñ', 'n'),
        ('ý', 'y'),
        ('ÿ', 'y'),
    ]
    .into_iter()
    .collect()
});

/// 1文字分の照合キー
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Primary {
    class: u8,
    weight: u32,
}

#[derive(Debug, Default)]
struct SortKey {
    primary: Vec<Primary>,
    secondary: Vec<u32>,
    tertiary: Vec<u8>,
}

/// Unicodeの句読点（一般カテゴリP）
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{P}$").unwrap());

/// 句読点かどうか（ASCII記号を含む）
fn is_punctuation(c: char) -> bool {
    let mut buf = [0u8; 4];
    c.is_ascii_punctuation() || PUNCTUATION.is_match(c.encode_utf8(&mut buf))
}

/// トルコ語の規則で小文字化する（I → ı, İ → i）
fn turkish_lower(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

impl TurkishCollator {
    fn sort_key(s: &str) -> SortKey {
        let mut key = SortKey::default();

        for c in s.chars() {
            let lower = turkish_lower(c);
            key.tertiary.push(u8::from(lower != c));

            if let Some(&weight) = LETTER_WEIGHTS.get(&lower) {
                key.primary.push(Primary { class: 3, weight });
                key.secondary.push(0);
            } else if let Some(base) = ACCENT_BASES.get(&lower) {
                key.primary.push(Primary {
                    class: 3,
                    weight: LETTER_WEIGHTS[base],
                });
                key.secondary.push(lower as u32);
            } else if let Some(digit) = lower.to_digit(10) {
                key.primary.push(Primary {
                    class: 2,
                    weight: digit,
                });
                key.secondary.push(0);
            } else if lower.is_whitespace() || is_punctuation(lower) {
                key.primary.push(Primary {
                    class: 1,
                    weight: lower as u32,
                });
                key.secondary.push(0);
            } else {
                key.primary.push(Primary {
                    class: 4,
                    weight: lower as u32,
                });
                key.secondary.push(0);
            }
        }

        key
    }
}

impl Collator for TurkishCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let ka = Self::sort_key(a);
        let kb = Self::sort_key(b);

        ka.primary
            .cmp(&kb.primary)
            .then_with(|| ka.secondary.cmp(&kb.secondary))
            .then_with(|| ka.tertiary.cmp(&kb.tertiary))
            .then_with(|| a.cmp(b))
    }

    fn locale(&self) -> &str {
        "tr"
    }
}

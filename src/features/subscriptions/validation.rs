use super::models::{PriceInput, RawSubscriptionInput, SubscriptionFields, CATEGORIES};
use super::presets::{self, OTHER_SERVICE_KEY};
use crate::shared::errors::{ValidationError, ValidationErrors};
use once_cell::sync::Lazy;
use regex::Regex;

/// 名前に必要な最小文字数
pub const MIN_NAME_CHARS: usize = 2;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 名前を正規化する（前後の空白を除去し、連続する空白を1つにまとめる）
pub fn sanitize_name(name: &str) -> String {
    WHITESPACE_RUN.replace_all(name.trim(), " ").into_owned()
}

/// 金額を解析する
///
/// テキストは前後の空白を除去してから解析する。空文字列・解析失敗・非有限値・負の値は無効。
/// `-0`は`0`として返す
pub fn parse_price(price: &PriceInput) -> Result<f64, ValidationError> {
    let value = match price {
        PriceInput::Number(n) => *n,
        PriceInput::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidPrice)?,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidPrice);
    }

    // -0.0 + 0.0 == +0.0
    Ok(value + 0.0)
}

/// フォーム入力を検証し、正規化したフィールドを返す
///
/// # 引数
/// * `input` - 未検証のフォーム入力
///
/// # 戻り値
/// 正規化済みフィールド、または項目ごとのバリデーションエラー（名前 → 金額 → カテゴリの順）
pub fn validate(input: &RawSubscriptionInput) -> Result<SubscriptionFields, ValidationErrors> {
    let mut errors = Vec::new();

    // 文字数はUnicodeスカラー値で数える
    let name = sanitize_name(&input.name);
    if name.chars().count() < MIN_NAME_CHARS {
        errors.push(ValidationError::NameTooShort);
    }

    let price = parse_price(&input.price).unwrap_or_else(|e| {
        errors.push(e);
        0.0
    });

    let category = input.category.trim();
    if !CATEGORIES.contains(&category) {
        errors.push(ValidationError::MissingCategory);
    }

    if let Some(errors) = ValidationErrors::from_vec(errors) {
        return Err(errors);
    }

    // 未知のサービスキーは"other"として扱う
    let service_key = input
        .service_key
        .as_deref()
        .map(str::trim)
        .filter(|key| presets::is_known(key))
        .unwrap_or(OTHER_SERVICE_KEY);
    let preset = presets::find_preset(service_key);

    Ok(SubscriptionFields {
        name,
        price,
        category: category.to_string(),
        service_key: preset.key.to_string(),
        icon: preset.icon.to_string(),
    })
}

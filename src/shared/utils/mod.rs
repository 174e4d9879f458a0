/// ロケール別の文字列比較
pub mod collation;

/// 通貨フォーマット
pub mod currency;

pub use collation::{collator_for, Collator, CodepointCollator, TurkishCollator};
pub use currency::{format_try, CurrencyFormatter, TryFormatter};

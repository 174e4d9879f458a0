use super::models::Subscription;
use crate::shared::utils::collation::Collator;
use serde::Serialize;
use std::cmp::Ordering;

/// 全カテゴリを表すフィルタの識別子
pub const ALL_CATEGORIES: &str = "ALL";

/// カテゴリフィルタ
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// すべてのレコード
    #[default]
    All,
    /// カテゴリが完全一致するレコードのみ
    Only(String),
}

impl CategoryFilter {
    /// フィルタ選択値から変換する（"ALL" は全件）
    pub fn from_selection(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    fn matches(&self, subscription: &Subscription) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => subscription.category == *category,
        }
    }
}

/// 並び順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    NameAsc,
    Newest,
    /// 並べ替えない（フィルタ後の一覧順のまま）
    #[default]
    Unsorted,
}

impl SortKey {
    /// 並び順の選択値から変換する（未知の値は`Unsorted`）
    pub fn from_selection(value: &str) -> Self {
        match value {
            "PRICE_ASC" => SortKey::PriceAsc,
            "PRICE_DESC" => SortKey::PriceDesc,
            "NAME_ASC" => SortKey::NameAsc,
            "NEWEST" => SortKey::Newest,
            _ => SortKey::Unsorted,
        }
    }
}

/// 合計金額（常に全レコードで計算する）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub monthly_total: f64,
    pub yearly_total: f64,
}

/// 表示用の一覧と合計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub items: Vec<Subscription>,
    pub totals: Totals,
}

/// 全レコードの月額・年額合計を計算する
///
/// 合計は一覧の順に加算するため、同じ一覧からは常に同じ値になる
pub fn compute_totals(subscriptions: &[Subscription]) -> Totals {
    let monthly_total = subscriptions.iter().fold(0.0, |acc, sub| acc + sub.price);
    Totals {
        monthly_total,
        yearly_total: monthly_total * 12.0,
    }
}

/// 金額を比較する（0 と -0 は等しい）
fn compare_price(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// フィルタと並べ替えを適用した表示用の一覧を作成する
///
/// # 引数
/// * `subscriptions` - 全レコード
/// * `filter` - カテゴリフィルタ
/// * `sort` - 並び順
/// * `collator` - 名前順に使用する文字列比較
///
/// # 戻り値
/// 表示用の一覧と、フィルタに関係なく全レコードから計算した合計
///
/// 並べ替えは安定ソートで、同じキーのレコードは元の順序を保つ
pub fn derive_view(
    subscriptions: &[Subscription],
    filter: &CategoryFilter,
    sort: SortKey,
    collator: &dyn Collator,
) -> View {
    let mut items: Vec<Subscription> = subscriptions
        .iter()
        .filter(|sub| filter.matches(sub))
        .cloned()
        .collect();

    match sort {
        SortKey::PriceAsc => items.sort_by(|a, b| compare_price(a.price, b.price)),
        SortKey::PriceDesc => items.sort_by(|a, b| compare_price(b.price, a.price)),
        SortKey::NameAsc => items.sort_by(|a, b| collator.compare(&a.name, &b.name)),
        SortKey::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Unsorted => {}
    }

    View {
        items,
        totals: compute_totals(subscriptions),
    }
}

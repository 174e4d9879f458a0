use super::presets::{self, OTHER_SERVICE_KEY};
use serde::{Deserialize, Serialize};

/// ユーザーに提示するカテゴリ一覧
pub const CATEGORIES: [&str; 7] = [
    "Streaming",
    "Müzik",
    "Yazılım",
    "Oyun",
    "Bulut",
    "Eğitim",
    "Diğer",
];

/// サブスクリプションデータモデル
///
/// 永続化時のフィールド名はcamelCase（`serviceKey`, `createdAt`）。
/// `serviceKey`と`icon`を持たない保存データはそのまま書き戻す
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    /// 月額料金（TRY）
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// 作成時刻（Unixエポックからのミリ秒）
    pub created_at: i64,
}

impl Subscription {
    /// 検証済みフィールドからレコードを組み立てる
    pub fn from_fields(id: String, created_at: i64, fields: SubscriptionFields) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            category: fields.category,
            service_key: Some(fields.service_key),
            icon: Some(fields.icon),
            created_at,
        }
    }

    /// サービスキー（未設定の場合は"other"）
    pub fn service_key(&self) -> &str {
        self.service_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(OTHER_SERVICE_KEY)
    }

    /// 表示用アイコン（未設定の場合はサービスキーのプリセットのアイコン）
    pub fn icon(&self) -> &str {
        match self.icon.as_deref().filter(|icon| !icon.is_empty()) {
            Some(icon) => icon,
            None => presets::find_preset(self.service_key()).icon,
        }
    }

    /// id と createdAt 以外のフィールドを置き換える
    pub fn apply(&mut self, fields: SubscriptionFields) {
        self.name = fields.name;
        self.price = fields.price;
        self.category = fields.category;
        self.service_key = Some(fields.service_key);
        self.icon = Some(fields.icon);
    }

    /// 編集フォームに読み込むための入力値に変換する
    pub fn to_input(&self) -> RawSubscriptionInput {
        RawSubscriptionInput {
            name: self.name.clone(),
            price: PriceInput::Number(self.price),
            category: self.category.clone(),
            service_key: Some(self.service_key().to_string()),
        }
    }
}

/// バリデーション済みのフィールド集合
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionFields {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub service_key: String,
    pub icon: String,
}

/// フォームから受け取る金額
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    /// 数値として受け取った金額
    Number(f64),
    /// テキストとして受け取った金額（検証時に解析する）
    Text(String),
}

impl Default for PriceInput {
    fn default() -> Self {
        PriceInput::Text(String::new())
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Text(value.to_string())
    }
}

/// 未検証のフォーム入力
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubscriptionInput {
    pub name: String,
    pub price: PriceInput,
    pub category: String,
    #[serde(default)]
    pub service_key: Option<String>,
}

impl RawSubscriptionInput {
    pub fn new(name: &str, price: impl Into<PriceInput>, category: &str) -> Self {
        Self {
            name: name.to_string(),
            price: price.into(),
            category: category.to_string(),
            service_key: None,
        }
    }

    /// サービスキーを設定する
    pub fn with_service(mut self, service_key: &str) -> Self {
        self.service_key = Some(service_key.to_string());
        self
    }
}

/// サブスクリプション更新用DTO（指定された項目のみ編集フォームに上書きする）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionDto {
    pub name: Option<String>,
    pub price: Option<PriceInput>,
    pub category: Option<String>,
    pub service_key: Option<String>,
}

impl UpdateSubscriptionDto {
    /// 編集フォームの値に上書きする
    pub fn apply_to(self, form: &mut RawSubscriptionInput) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(service_key) = self.service_key {
            form.service_key = Some(service_key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_service_fields() {
        // serviceKey / icon を持たない旧形式のレコード
        let json = r#"{"id":"a","name":"Netflix","price":19.99,"category":"Streaming","createdAt":100}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();

        assert_eq!(sub.service_key, None);
        assert_eq!(sub.service_key(), "other");
        assert_eq!(sub.icon(), presets::find_preset("other").icon);
        assert_eq!(sub.created_at, 100);

        // 書き戻しても存在しなかった項目は追加されない
        let value = serde_json::to_value(&sub).unwrap();
        assert!(value.get("serviceKey").is_none());
        assert!(value.get("icon").is_none());
    }

    #[test]
    fn test_missing_icon_follows_service_preset() {
        let json = r#"{"id":"a","name":"Netflix","price":19.99,"category":"Streaming","serviceKey":"netflix","createdAt":100}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();

        assert_eq!(sub.icon(), "🎬");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let sub = Subscription {
            id: "a".to_string(),
            name: "Spotify".to_string(),
            price: 9.99,
            category: "Müzik".to_string(),
            service_key: Some("spotify".to_string()),
            icon: Some("🎵".to_string()),
            created_at: 200,
        };
        let value = serde_json::to_value(&sub).unwrap();

        assert_eq!(value["serviceKey"], "spotify");
        assert_eq!(value["createdAt"], 200);
        assert!(value.get("service_key").is_none());
    }

    #[test]
    fn test_price_input_untagged() {
        let number: PriceInput = serde_json::from_str("12.5").unwrap();
        let text: PriceInput = serde_json::from_str("\"12.5\"").unwrap();

        assert_eq!(number, PriceInput::Number(12.5));
        assert_eq!(text, PriceInput::Text("12.5".to_string()));
    }

    #[test]
    fn test_to_input_round_trips_fields() {
        let sub = Subscription {
            id: "a".to_string(),
            name: "Netflix".to_string(),
            price: 19.99,
            category: "Streaming".to_string(),
            service_key: Some("netflix".to_string()),
            icon: Some("🎬".to_string()),
            created_at: 100,
        };
        let input = sub.to_input();

        assert_eq!(input.name, "Netflix");
        assert_eq!(input.price, PriceInput::Number(19.99));
        assert_eq!(input.service_key.as_deref(), Some("netflix"));
    }
}

use super::models::{PriceInput, RawSubscriptionInput};

/// プリセットに該当しないサービスのキー
pub const OTHER_SERVICE_KEY: &str = "other";

/// サービスプリセット（フォームの初期値としてのみ使用）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServicePreset {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub default_name: &'static str,
}

/// サービスプリセット一覧（"other"は常に末尾）
pub static PRESETS: [ServicePreset; 12] = [
    ServicePreset {
        key: "netflix",
        label: "Netflix",
        icon: "🎬",
        category: "Streaming",
        default_name: "Netflix",
    },
    ServicePreset {
        key: "youtube",
        label: "YouTube Premium",
        icon: "▶️",
        category: "Streaming",
        default_name: "YouTube Premium",
    },
    ServicePreset {
        key: "disney",
        label: "Disney+",
        icon: "🏰",
        category: "Streaming",
        default_name: "Disney+",
    },
    ServicePreset {
        key: "amazon",
        label: "Amazon Prime",
        icon: "📦",
        category: "Streaming",
        default_name: "Amazon Prime",
    },
    ServicePreset {
        key: "spotify",
        label: "Spotify",
        icon: "🎵",
        category: "Müzik",
        default_name: "Spotify",
    },
    ServicePreset {
        key: "apple_music",
        label: "Apple Music",
        icon: "🎧",
        category: "Müzik",
        default_name: "Apple Music",
    },
    ServicePreset {
        key: "icloud",
        label: "iCloud+",
        icon: "☁️",
        category: "Bulut",
        default_name: "iCloud+",
    },
    ServicePreset {
        key: "google_one",
        label: "Google One",
        icon: "🗂️",
        category: "Bulut",
        default_name: "Google One",
    },
    ServicePreset {
        key: "chatgpt",
        label: "ChatGPT Plus",
        icon: "🤖",
        category: "Yazılım",
        default_name: "ChatGPT Plus",
    },
    ServicePreset {
        key: "xbox",
        label: "Xbox Game Pass",
        icon: "🎮",
        category: "Oyun",
        default_name: "Xbox Game Pass",
    },
    ServicePreset {
        key: "duolingo",
        label: "Duolingo",
        icon: "🦉",
        category: "Eğitim",
        default_name: "Duolingo",
    },
    ServicePreset {
        key: OTHER_SERVICE_KEY,
        label: "Diğer",
        icon: "🔖",
        category: "Diğer",
        default_name: "",
    },
];

/// キーでプリセットを検索する
///
/// 未知のキーの場合は"other"プリセットを返す
pub fn find_preset(key: &str) -> &'static ServicePreset {
    PRESETS
        .iter()
        .find(|preset| preset.key == key)
        .unwrap_or(&PRESETS[PRESETS.len() - 1])
}

/// 既知のプリセットキーかどうか
pub fn is_known(key: &str) -> bool {
    PRESETS.iter().any(|preset| preset.key == key)
}

/// プリセットからフォームの初期値を作成する
///
/// 返される値は未検証の入力であり、保存前に必ずバリデーションを通る
pub fn prefill(key: &str) -> RawSubscriptionInput {
    let preset = find_preset(key);
    RawSubscriptionInput {
        name: preset.default_name.to_string(),
        price: PriceInput::default(),
        category: preset.category.to_string(),
        service_key: Some(preset.key.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::subscriptions::models::CATEGORIES;

    #[test]
    fn test_find_known_preset() {
        let preset = find_preset("spotify");
        assert_eq!(preset.label, "Spotify");
        assert_eq!(preset.category, "Müzik");
    }

    #[test]
    fn test_unknown_key_falls_back_to_other() {
        assert_eq!(find_preset("hbo").key, OTHER_SERVICE_KEY);
        assert!(!is_known("hbo"));
        assert!(is_known("netflix"));
    }

    #[test]
    fn test_preset_categories_are_offered() {
        // すべてのプリセットのカテゴリは選択肢に含まれる
        for preset in PRESETS.iter() {
            assert!(CATEGORIES.contains(&preset.category), "{}", preset.key);
        }
    }

    #[test]
    fn test_prefill_leaves_price_empty() {
        let input = prefill("netflix");
        assert_eq!(input.name, "Netflix");
        assert_eq!(input.category, "Streaming");
        assert_eq!(input.service_key.as_deref(), Some("netflix"));
        assert_eq!(input.price, PriceInput::Text(String::new()));
    }
}

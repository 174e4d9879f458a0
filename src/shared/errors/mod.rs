use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// データベース関連のエラー
    #[error("データベースエラー: {0}")]
    Database(String),

    /// バリデーション関連のエラー
    #[error("バリデーションエラー: {0}")]
    Validation(#[from] ValidationErrors),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// 永続化スロットへの書き込みエラー
    #[error("永続化エラー: {0}")]
    Persistence(String),

    /// 確認プロトコル関連のエラー
    #[error("確認エラー: {0}")]
    Confirmation(String),

    /// I/O関連のエラー
    #[error("I/Oエラー: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV出力エラー
    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),
}

/// フォーム入力のバリデーションエラー
///
/// メッセージはユーザーにそのまま表示される
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 正規化後の名前が2文字未満
    #[error("Ad en az 2 karakter olmalı.")]
    NameTooShort,

    /// 金額が数値でない、有限でない、または負の値
    #[error("Ücret geçerli olmalı.")]
    InvalidPrice,

    /// カテゴリが未選択、または選択肢にない
    #[error("Kategori seçmelisin.")]
    MissingCategory,
}

impl ValidationError {
    /// エラーの対象となるフォーム項目名を取得
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NameTooShort => "name",
            ValidationError::InvalidPrice => "price",
            ValidationError::MissingCategory => "category",
        }
    }
}

/// 1回の検証で見つかったすべてのバリデーションエラー（空にはならない）
///
/// 項目の順序は 名前 → 金額 → カテゴリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// エラー一覧から作成する（空の場合はNone）
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// 最初のエラー
    pub fn first(&self) -> &ValidationError {
        &self.0[0]
    }

    /// 指定したエラーを含むかどうか
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error.into())
    }
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（ファイル操作の一時的エラーなど）
    Medium,
    /// 高重要度（データベースエラーなど）
    High,
}

impl ErrorSeverity {
    /// 重要度に対応するログレベル
    pub fn log_level(&self) -> log::Level {
        match self {
            ErrorSeverity::Low => log::Level::Info,
            ErrorSeverity::Medium => log::Level::Warn,
            ErrorSeverity::High => log::Level::Error,
        }
    }
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(_) => "データベース操作でエラーが発生しました".to_string(),
            AppError::Validation(e) => e.to_string(),
            AppError::Configuration(_) => "設定エラーが発生しました".to_string(),
            AppError::Persistence(_) => {
                "データを保存できませんでした。変更は反映されていません".to_string()
            }
            AppError::Confirmation(msg) => msg.clone(),
            AppError::Io(_) => "ファイル操作でエラーが発生しました".to_string(),
            AppError::Json(_) => "データ形式の解析でエラーが発生しました".to_string(),
            AppError::Csv(_) => "CSVの書き出しでエラーが発生しました".to_string(),
        }
    }

    /// エラーの詳細情報を取得
    ///
    /// # 戻り値
    /// エラーの詳細情報（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    ///
    /// # 戻り値
    /// エラーの重要度レベル
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Database(_) => ErrorSeverity::High,
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Persistence(_) => ErrorSeverity::High,
            AppError::Confirmation(_) => ErrorSeverity::Low,
            AppError::Io(_) => ErrorSeverity::Medium,
            AppError::Json(_) => ErrorSeverity::Medium,
            AppError::Csv(_) => ErrorSeverity::Medium,
        }
    }

    /// 重要度に応じたレベルでエラーを記録し、ユーザー向けメッセージを返す
    ///
    /// # 引数
    /// * `context` - ログに付与する操作名
    pub fn report(&self, context: &str) -> String {
        log::log!(self.severity().log_level(), "{context}: {}", self.details());
        self.user_message()
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// 永続化エラーを作成するヘルパー関数
    pub fn persistence<S: Into<String>>(message: S) -> Self {
        AppError::Persistence(message.into())
    }

    /// 確認エラーを作成するヘルパー関数
    pub fn confirmation<S: Into<String>>(message: S) -> Self {
        AppError::Confirmation(message.into())
    }
}

/// AppErrorからStringへの変換（コマンド層での使用のため）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message()
    }
}

/// rusqlite::ErrorからAppErrorへの変換
impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        AppError::Database(error.to_string())
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

/// 環境設定とログ初期化
pub mod environment;

pub use environment::{
    get_database_filename, get_environment, initialize_logging_system,
    load_environment_variables, Environment, EnvironmentConfig, DEFAULT_COLLATION_LOCALE,
    DEFAULT_STORAGE_KEY, DEFAULT_THEME_KEY,
};

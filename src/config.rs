/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 文档存储目录（每个文档一个 JSON 文件）
    pub data_dir: String,
    /// 待导入的 TOML 试卷目录
    pub toml_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 固定随机种子，便于复现题目顺序
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "quiz_data".to_string(),
            toml_folder: "quiz_toml".to_string(),
            verbose_logging: false,
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_dir: std::env::var("QUIZ_DATA_DIR").unwrap_or(default.data_dir),
            toml_folder: std::env::var("QUIZ_TOML_FOLDER").unwrap_or(default.toml_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            rng_seed: std::env::var("QUIZ_SEED").ok().and_then(|v| v.parse().ok()).or(default.rng_seed),
        }
    }
}

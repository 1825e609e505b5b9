use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: HTTP 监听地址、端口、worker 数量
/// - database: 数据库连接与重试配置
/// - seed: 启动时的 IP 段导入
/// - convert: 原始数据集转换
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：IPL，分隔符：__
    /// 示例：IPL__SERVER__PORT=9999
    pub fn load() -> Self {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: &str) -> Self {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 IPL，分隔符 __
            .add_source(
                Environment::with_prefix("IPL")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config = match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        };

        config.override_with_legacy_env();
        config
    }

    /// 兼容旧部署使用的无前缀环境变量
    ///
    /// PORT / DATABASE_URL / SEED_FILE_PATH / LOG_LEVEL
    fn override_with_legacy_env(&mut self) {
        use std::env;

        if let Ok(port) = env::var("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => eprintln!("[WARN] Invalid PORT: {}", port),
            }
        }
        if let Ok(database_url) = env::var("DATABASE_URL")
            && !database_url.is_empty()
        {
            self.database.database_url = database_url;
        }
        if let Ok(seed_file) = env::var("SEED_FILE_PATH")
            && !seed_file.is_empty()
        {
            self.seed.file_path = seed_file;
        }
        if let Ok(level) = env::var("LOG_LEVEL")
            && !level.is_empty()
        {
            self.logging.level = level;
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlite:// / postgres:// / mysql:// 或 memory://
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// IP 段导入配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
    /// gzip 压缩的 TSV 文件
    #[serde(default = "default_seed_file_path")]
    pub file_path: String,
    /// 数据集版本标识，更换数据集时必须修改以触发重新导入
    #[serde(default = "default_seed_name")]
    pub name: String,
    #[serde(default = "default_seed_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_seed_progress_interval")]
    pub progress_interval_secs: u64,
}

/// 原始数据集转换配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default = "default_convert_input_path")]
    pub input_path: String,
    #[serde(default = "default_seed_file_path")]
    pub output_path: String,
    /// gzip 压缩等级 0-9
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,
    #[serde(default = "default_convert_progress_interval")]
    pub progress_interval_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://iplocate.db?mode=rwc".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_seed_enabled() -> bool {
    true
}

fn default_seed_file_path() -> String {
    "./data/ip_blocks.tsv.gz".to_string()
}

fn default_seed_name() -> String {
    crate::services::seed::DEFAULT_SEED_NAME.to_string()
}

fn default_seed_batch_size() -> usize {
    crate::services::seed::DEFAULT_BATCH_SIZE
}

fn default_seed_progress_interval() -> u64 {
    2
}

fn default_convert_input_path() -> String {
    "./IP2LOCATION-LITE-DB11.CSV".to_string()
}

fn default_compression_level() -> u32 {
    9
}

fn default_convert_progress_interval() -> u64 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
            file_path: default_seed_file_path(),
            name: default_seed_name(),
            batch_size: default_seed_batch_size(),
            progress_interval_secs: default_seed_progress_interval(),
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: default_convert_input_path(),
            output_path: default_seed_file_path(),
            compression_level: default_compression_level(),
            progress_interval_secs: default_convert_progress_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

use std::fmt;

#[derive(Debug, Clone)]
pub enum IplocateError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Compression(String),
    Validation(String),
    Serialization(String),
}

impl IplocateError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IplocateError::DatabaseConfig(_) => "E001",
            IplocateError::DatabaseConnection(_) => "E002",
            IplocateError::DatabaseOperation(_) => "E003",
            IplocateError::FileOperation(_) => "E004",
            IplocateError::Compression(_) => "E005",
            IplocateError::Validation(_) => "E006",
            IplocateError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IplocateError::DatabaseConfig(_) => "Database Configuration Error",
            IplocateError::DatabaseConnection(_) => "Database Connection Error",
            IplocateError::DatabaseOperation(_) => "Database Operation Error",
            IplocateError::FileOperation(_) => "File Operation Error",
            IplocateError::Compression(_) => "Compression Error",
            IplocateError::Validation(_) => "Validation Error",
            IplocateError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            IplocateError::DatabaseConfig(msg)
            | IplocateError::DatabaseConnection(msg)
            | IplocateError::DatabaseOperation(msg)
            | IplocateError::FileOperation(msg)
            | IplocateError::Compression(msg)
            | IplocateError::Validation(msg)
            | IplocateError::Serialization(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for IplocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IplocateError {}

// 便捷的构造函数
impl IplocateError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        IplocateError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        IplocateError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        IplocateError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        IplocateError::FileOperation(msg.into())
    }

    pub fn compression<T: Into<String>>(msg: T) -> Self {
        IplocateError::Compression(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        IplocateError::Validation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        IplocateError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for IplocateError {
    fn from(err: sea_orm::DbErr) -> Self {
        IplocateError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for IplocateError {
    fn from(err: std::io::Error) -> Self {
        IplocateError::FileOperation(err.to_string())
    }
}

impl From<csv::Error> for IplocateError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => IplocateError::FileOperation(err.to_string()),
            _ => IplocateError::Serialization(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for IplocateError {
    fn from(err: serde_json::Error) -> Self {
        IplocateError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IplocateError>;

//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_assignhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AssignHubError {
            $($variant(String),)*
        }

        impl AssignHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AssignHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AssignHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AssignHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AssignHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AssignHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_assignhub_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    ConstraintConflict("E013", "Constraint Conflict"),
}

impl AssignHubError {
    /// 唯一约束等完整性冲突，调用方需映射为业务层的 Conflict 拒绝
    pub fn is_conflict(&self) -> bool {
        matches!(self, AssignHubError::ConstraintConflict(_))
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AssignHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AssignHubError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AssignHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        // SQLite: "UNIQUE constraint failed"; PostgreSQL: "duplicate key value
        // violates unique constraint"; MySQL: "Duplicate entry"
        let message = err.to_string();
        let lower = message.to_lowercase();
        if lower.contains("unique constraint") || lower.contains("duplicate") {
            return AssignHubError::ConstraintConflict(message);
        }
        AssignHubError::DatabaseOperation(message)
    }
}

impl From<std::io::Error> for AssignHubError {
    fn from(err: std::io::Error) -> Self {
        AssignHubError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AssignHubError {
    fn from(err: serde_json::Error) -> Self {
        AssignHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AssignHubError {
    fn from(err: chrono::ParseError) -> Self {
        AssignHubError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssignHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AssignHubError::cache_connection("test").code(), "E001");
        assert_eq!(AssignHubError::database_config("test").code(), "E003");
        assert_eq!(AssignHubError::validation("test").code(), "E007");
        assert_eq!(AssignHubError::authentication("test").code(), "E011");
        assert_eq!(AssignHubError::constraint_conflict("dup").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AssignHubError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            AssignHubError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AssignHubError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_conflict_flag() {
        assert!(AssignHubError::constraint_conflict("dup row").is_conflict());
        assert!(!AssignHubError::validation("nope").is_conflict());
    }

    #[test]
    fn test_format_simple() {
        let err = AssignHubError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}

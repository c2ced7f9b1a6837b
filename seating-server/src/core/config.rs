use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 |
/// | LOG_DIR | (未设置) | 设置后写入按天滚动的日志文件 |
/// | DB_FILE | seating.redb | 数据库文件名 (位于 WORK_DIR 下) |
/// | SEATING_CHUNK_SIZE | 4 | 超大亲和组拆分大小 |
/// | SEATING_LOW_OCCUPANCY_RATIO | 0.7 | 低入座率警告阈值 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/wedding HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    /// 默认日志级别 (RUST_LOG 优先)
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
    /// 数据库文件名
    pub db_file: String,
    /// 排座引擎参数
    pub seating: SeatingConfig,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            db_file: std::env::var("DB_FILE").unwrap_or_else(|_| "seating.redb".into()),
            seating: SeatingConfig::new(
                std::env::var("SEATING_CHUNK_SIZE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(SeatingConfig::DEFAULT_CHUNK_SIZE),
                std::env::var("SEATING_LOW_OCCUPANCY_RATIO")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(SeatingConfig::DEFAULT_LOW_OCCUPANCY_RATIO),
            ),
        }
    }

    /// 使用自定义工作目录和端口覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库文件完整路径
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 排座引擎参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeatingConfig {
    /// 无法整桌安置的亲和组按此大小拆分
    pub chunk_size: usize,
    /// 入座率低于此比例时记录警告
    pub low_occupancy_ratio: f64,
}

impl SeatingConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 4;
    pub const DEFAULT_LOW_OCCUPANCY_RATIO: f64 = 0.7;

    /// 创建参数，非法值回退到默认值并记录警告
    pub fn new(chunk_size: usize, low_occupancy_ratio: f64) -> Self {
        let chunk_size = if chunk_size == 0 {
            tracing::warn!("SEATING_CHUNK_SIZE must be at least 1, using {}", Self::DEFAULT_CHUNK_SIZE);
            Self::DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        let low_occupancy_ratio = if (0.0..=1.0).contains(&low_occupancy_ratio) {
            low_occupancy_ratio
        } else {
            tracing::warn!(
                "SEATING_LOW_OCCUPANCY_RATIO must be within 0..=1, using {}",
                Self::DEFAULT_LOW_OCCUPANCY_RATIO
            );
            Self::DEFAULT_LOW_OCCUPANCY_RATIO
        };
        Self {
            chunk_size,
            low_occupancy_ratio,
        }
    }
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            low_occupancy_ratio: Self::DEFAULT_LOW_OCCUPANCY_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seating_config_falls_back_on_invalid_values() {
        assert_eq!(SeatingConfig::new(0, 0.5).chunk_size, 4);
        assert_eq!(SeatingConfig::new(3, 1.5).low_occupancy_ratio, 0.7);
        assert_eq!(SeatingConfig::new(3, f64::NAN).low_occupancy_ratio, 0.7);
        assert_eq!(SeatingConfig::new(6, 0.5), SeatingConfig {
            chunk_size: 6,
            low_occupancy_ratio: 0.5
        });
    }

    #[test]
    fn test_db_path_is_under_work_dir() {
        let mut config = Config::with_overrides("/tmp/wedding", 0);
        config.db_file = "plan.redb".into();
        assert_eq!(config.db_path(), PathBuf::from("/tmp/wedding/plan.redb"));
    }
}

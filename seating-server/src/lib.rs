//! Seating Server - 婚宴排座服务
//!
//! # 架构概述
//!
//! - **排座引擎** (`seating`): 亲和分组、装桌、冲突调整、座位分配
//! - **数据库** (`db`): 嵌入式 redb 存储 (宾客、桌台、关系、座位)
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! seating-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── db/            # 存储层和仓库
//! ├── seating/       # 排座引擎
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 应用组装、oneshot 调用
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod routes;
pub mod seating;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, SeatingConfig, Server, ServerState};
pub use db::{SeatingStorage, StorageError};
pub use routes::{OneshotRouter, build_app};
pub use seating::{SeatingEngine, SeatingError, SnapshotStore};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 .env，初始化日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 文件可选
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        return Err(e.into());
    }

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    init_logger_with_file(Some(&log_level), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____            __  _
  / ___/___  ____ _/ /_(_)___  ____ _
  \__ \/ _ \/ __ `/ __/ / __ \/ __ `/
 ___/ /  __/ /_/ / /_/ / / / / /_/ /
/____/\___/\__,_/\__/_/_/ /_/\__, /
                            /____/
    "#
    );
}

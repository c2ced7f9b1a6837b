use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::SeatingStorage;
use crate::db::repository::{ConnectionRepository, DiningTableRepository, GuestRepository};
use crate::seating::SeatingEngine;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | storage | SeatingStorage | 嵌入式数据库 (redb) |
/// | engine | Arc<SeatingEngine> | 排座引擎 (内部串行化运行) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库
    pub storage: SeatingStorage,
    /// 排座引擎
    pub engine: Arc<SeatingEngine<SeatingStorage>>,
}

impl ServerState {
    /// 用已打开的存储创建服务器状态
    pub fn new(config: Config, storage: SeatingStorage) -> Self {
        let engine = Arc::new(SeatingEngine::new(storage.clone(), config.seating));
        Self {
            config,
            storage,
            engine,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录 (不存在则创建)
    /// 2. 数据库 (work_dir/db_file)
    pub fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir()?;

        let db_path = config.db_path();
        let storage = SeatingStorage::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Seating database opened");

        Ok(Self::new(config.clone(), storage))
    }

    pub fn guests(&self) -> GuestRepository {
        GuestRepository::new(self.storage.clone())
    }

    pub fn tables(&self) -> DiningTableRepository {
        DiningTableRepository::new(self.storage.clone())
    }

    pub fn connections(&self) -> ConnectionRepository {
        ConnectionRepository::new(self.storage.clone())
    }
}

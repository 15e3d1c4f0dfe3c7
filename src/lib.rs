// ==========================================
// 供应商质量管理门户 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 供应商绩效汇总与排名 (月度 KPI / 不良分析 / 分类排名)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 汇总与排名规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 共享状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{MonthKey, PpmStatus, SupplierCategory, SupplierStatus};

// 领域实体
pub use domain::{
    DailyLog, DefectCount, MonthlyAggregate, ParetoRow, PeriodSummary, RankedSupplier,
    RejectionItem, Supplier,
};

// 引擎
pub use engine::{
    DateRange, DefectBreakdownReducer, LegacyCauseAttribution, MonthlyAggregator, PartFilter,
    RankingEngine,
};

// API
pub use api::{ApiError, ApiResult, PerformanceApi};

// 应用状态
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "供应商质量管理门户";

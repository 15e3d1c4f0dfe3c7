// ==========================================
// 供应商质量管理门户 - 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// RUST_LOG 优先,缺省时使用 DEFAULT_DIRECTIVE
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 缺省日志级别
pub const DEFAULT_DIRECTIVE: &str = "info";

fn env_filter_or(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// 初始化日志系统 (文本格式)
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=supplier_quality_portal=debug
///
/// # 示例
/// ```no_run
/// use supplier_quality_portal::logging;
/// logging::init();
/// ```
pub fn init() {
    fmt()
        .with_env_filter(env_filter_or(DEFAULT_DIRECTIVE))
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 初始化日志系统 (JSON 行格式,供日志采集使用)
pub fn init_json() {
    fmt()
        .json()
        .with_env_filter(env_filter_or(DEFAULT_DIRECTIVE))
        .with_current_span(true)
        .init();
}

/// 初始化测试环境的日志系统
///
/// 可重复调用; 输出交给测试框架捕获
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("supplier_quality_portal=debug"))
        .with_test_writer()
        .try_init();
}

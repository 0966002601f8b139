//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量回放和流程调度，不包含评测逻辑。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量作答回放器
//! - 管理应用生命周期（初始化、运行）
//! - 加载题库和作答脚本（Vec<AttemptScript>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `attempt_processor` - 单份作答回放器
//! - 为一份作答创建 QuizSession
//! - 依次回放选择题和编程题提交
//! - 写入测验结果
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<AttemptScript>)
//!     ↓
//! attempt_processor (处理单份作答)
//!     ↓
//! workflow::QuizSession / GradingFlow (处理单次评测)
//!     ↓
//! services (能力层：validator / heuristics / harness / scoring)
//!     ↓
//! clients (远程评测：JudgeClient)
//! ```

pub mod attempt_processor;
pub mod batch_processor;

// 重新导出主要类型
pub use attempt_processor::process_attempt;
pub use batch_processor::{App, ProcessingStats};

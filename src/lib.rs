//! # Quiz Grader
//!
//! 编程语言测验的评测引擎：选择题判分、编程题评测、计分和证书资格判定
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 与外部评测服务通信，只暴露能力
//! - `JudgeClient` - Judge0 兼容 API 客户端，实现 `CodeJudge`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单道题、单份代码
//! - `validator` - 代码结构校验
//! - `heuristics` - 静态启发式评测（按语言和题目注册的规则）
//! - `harness` - 远程评测的测试驱动生成
//! - `scoring` - 计分和证书资格
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次评测"和"一次测验"的完整流程
//! - `GradingFlow` - 评测编排（远程评测 → 失败回退启发式）
//! - `QuizSession` - 测验状态（选择题 → 编程题 → 完成）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量作答回放，管理并发
//! - `orchestrator/attempt_processor` - 单份作答回放
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{CodeJudge, JudgeClient};
pub use config::{Config, GradingMode};
pub use error::{AppError, AppResult, GradingError};
pub use models::{CodingQuestion, Language, QuestionCatalog, QuizOutcome, TestVerdict};
pub use orchestrator::App;
pub use workflow::{GradingFlow, QuizSession, SessionCtx};

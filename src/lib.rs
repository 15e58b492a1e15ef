//! LogiFlow - 物流网络最大流分析引擎
//!
//! 对两级物流网络（终端 → 仓库 → 商店）建模，提供：
//! - 容量网络模型（按序号寻址的容量修改与重置）
//! - 基于 BFS 最短增广路径的最大流求解（两种可互换策略）
//! - 最小割 / 最优性分析（最大流最小割定理）
//! - 面向报告的比例流量归因

pub mod algorithm;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod network;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    analyze, attribute, Attribution, CapacitySummary, CutAnalysis, CutMember, FlowSolver, MaxFlow,
    NodeSaturation, SourceShare, Strategy,
};
pub use error::{Error, Result};
pub use network::{Edge, FlowNetwork, Node, NodeId};
pub use types::{Capacity, FlowValue, NodeRole};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

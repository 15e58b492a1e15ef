//! 图算法模块
//!
//! 包含最大流求解、最小割分析与比例流量归因

mod attribution;
mod max_flow;
mod min_cut;
mod residual;

pub use attribution::{attribute, Attribution, SourceShare};
pub use max_flow::{FlowSolver, MaxFlow, Strategy};
pub use min_cut::{analyze, CapacitySummary, CutAnalysis, CutMember, NodeSaturation};

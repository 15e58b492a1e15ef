//! 容量网络模型
//!
//! 节点 arena + 扁平有序边表，支持容量修改与重置

mod edge;
mod model;
mod node;

pub use edge::Edge;
pub use model::FlowNetwork;
pub use node::{Node, NodeId};

//! 边定义
//!
//! 有向边带两个容量字段：当前容量可被修改，原始容量只在创建时写入一次，
//! 用于 `reset` 恢复。

use crate::network::node::NodeId;
use crate::types::Capacity;
use serde::{Deserialize, Serialize};

/// 有向边
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// 源节点 ID
    src: NodeId,
    /// 目标节点 ID
    dst: NodeId,
    /// 当前容量
    capacity: Capacity,
    /// 原始容量（创建后不再变化）
    original_capacity: Capacity,
}

impl Edge {
    /// 创建新边，原始容量等于初始容量
    pub fn new(src: NodeId, dst: NodeId, capacity: Capacity) -> Self {
        Self {
            src,
            dst,
            capacity,
            original_capacity: capacity,
        }
    }

    /// 获取源节点 ID
    pub fn src(&self) -> NodeId {
        self.src
    }

    /// 获取目标节点 ID
    pub fn dst(&self) -> NodeId {
        self.dst
    }

    /// 获取当前容量
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// 获取原始容量
    pub fn original_capacity(&self) -> Capacity {
        self.original_capacity
    }

    /// 当前容量是否偏离原始容量
    pub fn is_modified(&self) -> bool {
        self.capacity != self.original_capacity
    }

    pub(crate) fn set_capacity(&mut self, value: Capacity) {
        self.capacity = value;
    }

    pub(crate) fn reset(&mut self) {
        self.capacity = self.original_capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_set_and_reset() {
        let mut e = Edge::new(NodeId::new(0), NodeId::new(1), 25);
        assert_eq!(e.capacity(), 25);
        assert_eq!(e.original_capacity(), 25);
        assert!(!e.is_modified());

        e.set_capacity(0);
        assert_eq!(e.capacity(), 0);
        assert_eq!(e.original_capacity(), 25);
        assert!(e.is_modified());

        e.reset();
        assert_eq!(e.capacity(), 25);
        assert!(!e.is_modified());

        // reset 幂等
        e.reset();
        assert_eq!(e.capacity(), 25);
    }
}

//! 节点定义

use crate::types::NodeRole;
use serde::{Deserialize, Serialize};

/// 节点 ID（网络内的稠密索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// 节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// 节点 ID
    id: NodeId,
    /// 节点名称（外部稳定标识）
    name: String,
    /// 节点角色
    role: NodeRole,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, name: impl Into<String>, role: NodeRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }

    /// 获取节点 ID
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// 获取节点名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取节点角色
    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn is_terminal(&self) -> bool {
        self.role == NodeRole::Terminal
    }

    pub fn is_warehouse(&self) -> bool {
        self.role == NodeRole::Warehouse
    }

    pub fn is_store(&self) -> bool {
        self.role == NodeRole::Store
    }
}

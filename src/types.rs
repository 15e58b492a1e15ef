//! 物流网络的通用类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 容量（非负整数）
pub type Capacity = u64;

/// 流量值
pub type FlowValue = u64;

/// 节点角色（构建时确定，之后不可变更）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    /// 发货终端（纯源点，流量只从这里产生）
    Terminal,
    /// 中转仓库（中间节点，须满足流量守恒）
    Warehouse,
    /// 商店（纯汇点，流量只在这里终止）
    Store,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Terminal => "Terminal",
            NodeRole::Warehouse => "Warehouse",
            NodeRole::Store => "Store",
        }
    }

    /// 按节点名称前缀推断角色（"Terminal 1" / "Warehouse 2" / "Store 3"）
    pub fn from_name(name: &str) -> Option<Self> {
        if name.starts_with("Terminal") {
            Some(NodeRole::Terminal)
        } else if name.starts_with("Warehouse") {
            Some(NodeRole::Warehouse)
        } else if name.starts_with("Store") {
            Some(NodeRole::Store)
        } else {
            None
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

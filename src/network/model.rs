//! 容量网络模型
//!
//! 节点存放在稠密 arena 中，边按插入顺序存放在扁平序列里，
//! 对外以 1 开始的边序号寻址。邻接表只记录边下标。

use crate::error::{Error, Result};
use crate::network::edge::Edge;
use crate::network::node::{Node, NodeId};
use crate::types::{Capacity, NodeRole};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 容量网络
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowNetwork {
    /// 节点 arena
    nodes: Vec<Node>,
    /// 边（插入顺序即外部寻址顺序）
    edges: Vec<Edge>,
    /// 名称 -> 节点 ID（保持插入顺序）
    name_index: IndexMap<String, NodeId>,
    /// 节点 -> 出边下标（0 基）
    out_adj: Vec<Vec<usize>>,
    /// 节点 -> 入边下标（0 基）
    in_adj: Vec<Vec<usize>>,
}

impl FlowNetwork {
    /// 创建空网络
    pub fn new() -> Self {
        Self::default()
    }

    /// 从有序的 (源, 目标, 容量) 三元组构建网络，
    /// 节点在首次出现时按 `classify` 给出的角色创建
    pub fn from_edges<F>(triples: &[(&str, &str, Capacity)], classify: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<NodeRole>,
    {
        let mut network = Self::new();
        for &(src, dst, capacity) in triples {
            for name in [src, dst] {
                if !network.name_index.contains_key(name) {
                    let role = classify(name).ok_or_else(|| {
                        Error::InvalidArgument(format!("无法确定节点角色: {}", name))
                    })?;
                    network.add_node(name, role)?;
                }
            }
            network.add_edge(src, dst, capacity)?;
        }
        Ok(network)
    }

    // ==================== 构建操作 ====================

    /// 添加节点，名称重复时报错
    pub fn add_node(&mut self, name: impl Into<String>, role: NodeRole) -> Result<NodeId> {
        let name = name.into();
        if self.name_index.contains_key(&name) {
            return Err(Error::NodeAlreadyExists(name));
        }
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, name.clone(), role));
        self.name_index.insert(name, id);
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        Ok(id)
    }

    /// 添加边，返回 1 开始的边序号
    pub fn add_edge(&mut self, src: &str, dst: &str, capacity: Capacity) -> Result<usize> {
        let src_id = self
            .node_by_name(src)
            .ok_or_else(|| Error::NodeNotFound(src.to_string()))?;
        let dst_id = self
            .node_by_name(dst)
            .ok_or_else(|| Error::NodeNotFound(dst.to_string()))?;

        let idx0 = self.edges.len();
        self.edges.push(Edge::new(src_id, dst_id, capacity));
        self.out_adj[src_id.index()].push(idx0);
        self.in_adj[dst_id.index()].push(idx0);
        Ok(idx0 + 1)
    }

    // ==================== 容量操作 ====================

    /// 获取指定边的当前容量（序号从 1 开始）
    pub fn get_capacity(&self, index: usize) -> Result<Capacity> {
        let idx0 = self.check_index(index)?;
        Ok(self.edges[idx0].capacity())
    }

    /// 设置指定边的当前容量，原始容量不受影响
    pub fn set_capacity(&mut self, index: usize, value: Capacity) -> Result<()> {
        let idx0 = self.check_index(index)?;
        self.edges[idx0].set_capacity(value);
        Ok(())
    }

    /// 将所有边的当前容量恢复为原始容量（幂等）
    pub fn reset(&mut self) {
        for edge in &mut self.edges {
            edge.reset();
        }
    }

    /// 按插入顺序列出所有边：(序号, 源名称, 目标名称, 当前容量)
    pub fn list_edges(&self) -> Vec<(usize, &str, &str, Capacity)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, e)| {
                (
                    i + 1,
                    self.node_name(e.src()),
                    self.node_name(e.dst()),
                    e.capacity(),
                )
            })
            .collect()
    }

    // ==================== 查询 ====================

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// 按 ID 获取节点
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// 按名称查找节点 ID
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// 节点名称（ID 必须来自本网络）
    pub fn node_name(&self, id: NodeId) -> &str {
        self.nodes[id.index()].name()
    }

    /// 按角色筛选节点 ID（插入顺序）
    pub fn nodes_by_role(&self, role: NodeRole) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.role() == role)
            .map(|n| n.id())
            .collect()
    }

    /// 所有终端
    pub fn terminals(&self) -> Vec<NodeId> {
        self.nodes_by_role(NodeRole::Terminal)
    }

    /// 所有仓库
    pub fn warehouses(&self) -> Vec<NodeId> {
        self.nodes_by_role(NodeRole::Warehouse)
    }

    /// 所有商店
    pub fn stores(&self) -> Vec<NodeId> {
        self.nodes_by_role(NodeRole::Store)
    }

    /// 节点的出边下标（0 基）
    pub fn outgoing(&self, id: NodeId) -> &[usize] {
        &self.out_adj[id.index()]
    }

    /// 节点的入边下标（0 基）
    pub fn incoming(&self, id: NodeId) -> &[usize] {
        &self.in_adj[id.index()]
    }

    /// 节点出边容量之和
    pub fn out_capacity(&self, id: NodeId) -> Capacity {
        self.out_adj[id.index()]
            .iter()
            .map(|&i| self.edges[i].capacity())
            .sum()
    }

    /// 节点入边容量之和
    pub fn in_capacity(&self, id: NodeId) -> Capacity {
        self.in_adj[id.index()]
            .iter()
            .map(|&i| self.edges[i].capacity())
            .sum()
    }

    /// 校验 1 基序号并换算为 0 基下标
    fn check_index(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.edges.len() {
            return Err(Error::EdgeIndexOutOfRange {
                index,
                count: self.edges.len(),
            });
        }
        Ok(index - 1)
    }
}

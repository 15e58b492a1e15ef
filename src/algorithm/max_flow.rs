//! 最大流求解器
//!
//! 两种可互换的增广路径策略，均为基于 BFS 最短增广路径的
//! Edmonds-Karp（Ford-Fulkerson 的多项式界改进，复杂度 O(V·E²)）：
//!
//! - `Strategy::Default`：稠密容量矩阵实现（教科书标准形式）
//! - `Strategy::Custom`：成对残量弧的邻接表实现
//!
//! 同一输入下两种策略的总流量必须一致；边级分配允许不同，
//! 因为最大流的分解不唯一。

use crate::algorithm::residual::{net_outflow, Residual};
use crate::error::{Error, Result};
use crate::network::{FlowNetwork, NodeId};
use crate::types::FlowValue;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, info};

/// 求解策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// 容量矩阵实现
    #[default]
    Default,
    /// 残量弧邻接表实现
    Custom,
}

/// 最大流结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 最大流量值
    pub value: FlowValue,
    /// 每条边的流量（与边的插入顺序对齐）
    pub edge_flows: Vec<FlowValue>,
    /// 本次求解使用的源点
    pub sources: Vec<NodeId>,
    /// 本次求解使用的汇点
    pub sinks: Vec<NodeId>,
}

impl MaxFlow {
    /// 指定边的流量（序号从 1 开始）
    pub fn edge_flow(&self, index: usize) -> Option<FlowValue> {
        if index == 0 {
            return None;
        }
        self.edge_flows.get(index - 1).copied()
    }
}

/// 最大流求解器
pub struct FlowSolver<'a> {
    network: &'a FlowNetwork,
}

impl<'a> FlowSolver<'a> {
    /// 创建求解器实例
    pub fn new(network: &'a FlowNetwork) -> Self {
        Self { network }
    }

    /// 计算从单个源点到单个汇点的最大流
    pub fn solve(&self, source: NodeId, sink: NodeId, strategy: Strategy) -> Result<MaxFlow> {
        if source == sink {
            return Err(Error::InvalidArgument(
                "源点与汇点不能是同一个节点".to_string(),
            ));
        }
        self.run(&[source], &[sink], strategy)
    }

    /// 计算多源多汇最大流（通过超级源点与超级汇点归约为单源单汇）
    pub fn solve_multi(
        &self,
        sources: &[NodeId],
        sinks: &[NodeId],
        strategy: Strategy,
    ) -> Result<MaxFlow> {
        if sources.is_empty() || sinks.is_empty() {
            return Err(Error::InvalidArgument(
                "源点集合与汇点集合都不能为空".to_string(),
            ));
        }
        if sources.iter().any(|s| sinks.contains(s)) {
            return Err(Error::InvalidArgument(
                "同一节点不能既是源点又是汇点".to_string(),
            ));
        }
        // 源汇按集合语义处理，重复 ID 会重复计入超级弧容量
        for set in [sources, sinks] {
            let mut seen = HashSet::with_capacity(set.len());
            if !set.iter().all(|id| seen.insert(id)) {
                return Err(Error::InvalidArgument(
                    "源点集合与汇点集合内不允许重复节点".to_string(),
                ));
            }
        }
        self.run(sources, sinks, strategy)
    }

    fn run(&self, sources: &[NodeId], sinks: &[NodeId], strategy: Strategy) -> Result<MaxFlow> {
        let node_count = self.network.node_count();
        for &id in sources.iter().chain(sinks.iter()) {
            if id.index() >= node_count {
                return Err(Error::InvalidArgument(format!(
                    "节点 ID 超出范围: {}",
                    id.0
                )));
            }
        }

        let (value, edge_flows) = match strategy {
            Strategy::Default => self.solve_matrix(sources, sinks),
            Strategy::Custom => self.solve_residual(sources, sinks),
        };

        let result = MaxFlow {
            value,
            edge_flows,
            sources: sources.to_vec(),
            sinks: sinks.to_vec(),
        };
        self.validate(&result)?;

        info!(
            strategy = ?strategy,
            sources = sources.len(),
            sinks = sinks.len(),
            value,
            "最大流求解完成"
        );
        Ok(result)
    }

    /// 残量弧实现：每条真实边保留独立的弧对，平行边天然各自受自身容量约束
    fn solve_residual(&self, sources: &[NodeId], sinks: &[NodeId]) -> (FlowValue, Vec<FlowValue>) {
        let mut residual = Residual::build(self.network, sources, sinks);
        let mut total: u64 = 0;
        let mut iteration: u64 = 0;

        while let Some((path, bottleneck)) = residual.find_augmenting_path() {
            residual.augment(&path, bottleneck);
            total += bottleneck;
            iteration += 1;
            debug!(iteration, bottleneck, hops = path.len(), "找到增广路径");
        }

        let flows = (0..self.network.edge_count())
            .map(|i| residual.arc_flow(residual.edge_arcs[i]))
            .collect();
        (total, flows)
    }

    /// 容量矩阵实现：节点对之间的平行边在矩阵中累加容量，
    /// 求解后再按插入顺序把节点对流量拆回各条边
    fn solve_matrix(&self, sources: &[NodeId], sinks: &[NodeId]) -> (FlowValue, Vec<FlowValue>) {
        let n = self.network.node_count() + 2;
        let super_source = n - 2;
        let super_sink = n - 1;

        let mut capacity = vec![vec![0i64; n]; n];
        for edge in self.network.edges() {
            capacity[edge.src().index()][edge.dst().index()] += edge.capacity() as i64;
        }
        for &s in sources {
            capacity[super_source][s.index()] += self.network.out_capacity(s) as i64;
        }
        for &t in sinks {
            capacity[t.index()][super_sink] += self.network.in_capacity(t) as i64;
        }

        let mut flow = vec![vec![0i64; n]; n];
        let mut total: i64 = 0;
        let mut iteration: u64 = 0;

        while let Some(parent) = bfs_parents(&capacity, &flow, super_source, super_sink) {
            // 沿路径回溯求瓶颈
            let mut path_flow = i64::MAX;
            let mut v = super_sink;
            while v != super_source {
                let u = parent[v];
                path_flow = path_flow.min(capacity[u][v] - flow[u][v]);
                v = u;
            }

            // 更新正反两个方向的流量
            let mut v = super_sink;
            while v != super_source {
                let u = parent[v];
                flow[u][v] += path_flow;
                flow[v][u] -= path_flow;
                v = u;
            }

            total += path_flow;
            iteration += 1;
            debug!(iteration, bottleneck = path_flow, "找到增广路径");
        }

        // 节点对净流量按插入顺序拆回各条边，单条边不超过自身容量
        let mut pair_flow: HashMap<(usize, usize), i64> = HashMap::new();
        for edge in self.network.edges() {
            let key = (edge.src().index(), edge.dst().index());
            pair_flow
                .entry(key)
                .or_insert_with(|| flow[key.0][key.1].max(0));
        }

        let mut flows = Vec::with_capacity(self.network.edge_count());
        for edge in self.network.edges() {
            let key = (edge.src().index(), edge.dst().index());
            let remaining = pair_flow.entry(key).or_insert(0);
            let take = (*remaining).min(edge.capacity() as i64);
            *remaining -= take;
            flows.push(take as u64);
        }
        (total as u64, flows)
    }

    /// 求解结果校验：容量上界、非端点节点的流量守恒、总量一致。
    /// 任何违反都说明求解器内部出错，绝不把非法分配交给调用方。
    fn validate(&self, result: &MaxFlow) -> Result<()> {
        if result.edge_flows.len() != self.network.edge_count() {
            return Err(Error::AlgorithmError(
                "流量分配与边数不一致".to_string(),
            ));
        }
        for (i, edge) in self.network.edges().iter().enumerate() {
            if result.edge_flows[i] > edge.capacity() {
                return Err(Error::AlgorithmError(format!(
                    "边 {} 的流量 {} 超出容量 {}",
                    i + 1,
                    result.edge_flows[i],
                    edge.capacity()
                )));
            }
        }

        for node in self.network.nodes() {
            let id = node.id();
            if result.sources.contains(&id) || result.sinks.contains(&id) {
                continue;
            }
            let inflow: u64 = self
                .network
                .incoming(id)
                .iter()
                .map(|&i| result.edge_flows[i])
                .sum();
            let outflow: u64 = self
                .network
                .outgoing(id)
                .iter()
                .map(|&i| result.edge_flows[i])
                .sum();
            if inflow != outflow {
                return Err(Error::AlgorithmError(format!(
                    "节点 {} 不满足流量守恒: 流入 {} 流出 {}",
                    node.name(),
                    inflow,
                    outflow
                )));
            }
        }

        let from_sources: u64 = result
            .sources
            .iter()
            .map(|&s| net_outflow(self.network, &result.edge_flows, s))
            .sum();
        if from_sources != result.value {
            return Err(Error::AlgorithmError(format!(
                "总流量 {} 与源点净流出 {} 不一致",
                result.value, from_sources
            )));
        }
        Ok(())
    }
}

/// BFS 在矩阵形式的残量图上找增广路径，返回 parent 数组
fn bfs_parents(
    capacity: &[Vec<i64>],
    flow: &[Vec<i64>],
    source: usize,
    sink: usize,
) -> Option<Vec<usize>> {
    let n = capacity.len();
    let mut visited = vec![false; n];
    let mut parent = vec![usize::MAX; n];

    visited[source] = true;
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if !visited[v] && capacity[u][v] - flow[u][v] > 0 {
                visited[v] = true;
                parent[v] = u;
                if v == sink {
                    return Some(parent);
                }
                queue.push_back(v);
            }
        }
    }
    None
}

//! 残量图
//!
//! 每次求解或割分析时临时构建，用完即弃，不做任何持久化。
//! 弧成对存放：下标 i 为正向弧时，i ^ 1 即对应反向弧。
//! 真实节点占用 0..n，超级源为 n，超级汇为 n + 1；
//! 超级源到终端的弧容量取该终端的出口总容量，
//! 商店到超级汇的弧容量取该商店的入口总容量。

use crate::network::{FlowNetwork, NodeId};
use crate::types::FlowValue;
use std::collections::VecDeque;

/// 残量弧
#[derive(Debug, Clone)]
pub(crate) struct ResidualArc {
    /// 目标节点（残量图内部编号）
    pub to: usize,
    /// 剩余容量
    pub cap: u64,
}

/// 残量图
pub(crate) struct Residual {
    /// 节点 -> 关联弧下标
    pub adj: Vec<Vec<usize>>,
    /// 全部弧（正反成对）
    pub arcs: Vec<ResidualArc>,
    /// 第 i 条真实边对应的正向弧下标
    pub edge_arcs: Vec<usize>,
    /// (终端, 超级源弧下标)
    pub source_arcs: Vec<(NodeId, usize)>,
    /// (商店, 超级汇弧下标)
    pub sink_arcs: Vec<(NodeId, usize)>,
    /// 超级源编号
    pub source: usize,
    /// 超级汇编号
    pub sink: usize,
}

impl Residual {
    /// 从当前容量构建残量图（含超级源 / 超级汇）
    pub fn build(network: &FlowNetwork, sources: &[NodeId], sinks: &[NodeId]) -> Self {
        let n = network.node_count();
        let mut residual = Self {
            adj: vec![Vec::new(); n + 2],
            arcs: Vec::with_capacity(2 * (network.edge_count() + sources.len() + sinks.len())),
            edge_arcs: Vec::with_capacity(network.edge_count()),
            source_arcs: Vec::with_capacity(sources.len()),
            sink_arcs: Vec::with_capacity(sinks.len()),
            source: n,
            sink: n + 1,
        };

        for edge in network.edges() {
            let arc = residual.add_arc(edge.src().index(), edge.dst().index(), edge.capacity());
            residual.edge_arcs.push(arc);
        }
        for &s in sources {
            let arc = residual.add_arc(n, s.index(), network.out_capacity(s));
            residual.source_arcs.push((s, arc));
        }
        for &t in sinks {
            let arc = residual.add_arc(t.index(), n + 1, network.in_capacity(t));
            residual.sink_arcs.push((t, arc));
        }
        residual
    }

    fn add_arc(&mut self, from: usize, to: usize, cap: u64) -> usize {
        let i = self.arcs.len();
        self.arcs.push(ResidualArc { to, cap });
        self.arcs.push(ResidualArc { to: from, cap: 0 });
        self.adj[from].push(i);
        self.adj[to].push(i + 1);
        i
    }

    /// BFS 找最短增广路径，返回 (沿途弧下标, 瓶颈容量)
    pub fn find_augmenting_path(&self) -> Option<(Vec<usize>, u64)> {
        let node_count = self.adj.len();
        let mut visited = vec![false; node_count];
        let mut parent_arc = vec![usize::MAX; node_count];

        visited[self.source] = true;
        let mut queue = VecDeque::new();
        queue.push_back(self.source);

        'search: while let Some(u) = queue.pop_front() {
            for &ai in &self.adj[u] {
                let arc = &self.arcs[ai];
                if arc.cap > 0 && !visited[arc.to] {
                    visited[arc.to] = true;
                    parent_arc[arc.to] = ai;
                    if arc.to == self.sink {
                        break 'search;
                    }
                    queue.push_back(arc.to);
                }
            }
        }

        if !visited[self.sink] {
            return None;
        }

        // 从汇点回溯，同时求瓶颈
        let mut path = Vec::new();
        let mut bottleneck = u64::MAX;
        let mut v = self.sink;
        while v != self.source {
            let ai = parent_arc[v];
            bottleneck = bottleneck.min(self.arcs[ai].cap);
            path.push(ai);
            v = self.arcs[ai ^ 1].to;
        }
        path.reverse();
        Some((path, bottleneck))
    }

    /// 沿路径增广：正向弧减容量，反向弧加容量
    pub fn augment(&mut self, path: &[usize], amount: u64) {
        for &ai in path {
            self.arcs[ai].cap -= amount;
            self.arcs[ai ^ 1].cap += amount;
        }
    }

    /// 正向弧上已用的流量
    pub fn arc_flow(&self, forward: usize) -> u64 {
        self.arcs[forward ^ 1].cap
    }

    /// 按给定的边流量直接写入残量状态（供割分析复原求解终点）
    pub fn apply_edge_flows(&mut self, network: &FlowNetwork, flows: &[FlowValue]) {
        for (i, &f) in flows.iter().enumerate() {
            let ai = self.edge_arcs[i];
            self.arcs[ai].cap -= f;
            self.arcs[ai ^ 1].cap += f;
        }
        // 超级弧承载的流量等于对应节点的净流出 / 净流入
        for i in 0..self.source_arcs.len() {
            let (node, ai) = self.source_arcs[i];
            let used = net_outflow(network, flows, node);
            self.arcs[ai].cap -= used;
            self.arcs[ai ^ 1].cap += used;
        }
        for i in 0..self.sink_arcs.len() {
            let (node, ai) = self.sink_arcs[i];
            let used = net_inflow(network, flows, node);
            self.arcs[ai].cap -= used;
            self.arcs[ai ^ 1].cap += used;
        }
    }

    /// 从超级源出发在残量图上可达的节点集合
    pub fn reachable_from_source(&self) -> Vec<bool> {
        let mut visited = vec![false; self.adj.len()];
        visited[self.source] = true;
        let mut queue = VecDeque::new();
        queue.push_back(self.source);

        while let Some(u) = queue.pop_front() {
            for &ai in &self.adj[u] {
                let arc = &self.arcs[ai];
                if arc.cap > 0 && !visited[arc.to] {
                    visited[arc.to] = true;
                    queue.push_back(arc.to);
                }
            }
        }
        visited
    }
}

/// 节点净流出量（出边流量和减入边流量和）
pub(crate) fn net_outflow(network: &FlowNetwork, flows: &[FlowValue], node: NodeId) -> u64 {
    let out: u64 = network.outgoing(node).iter().map(|&i| flows[i]).sum();
    let inn: u64 = network.incoming(node).iter().map(|&i| flows[i]).sum();
    out.saturating_sub(inn)
}

/// 节点净流入量（入边流量和减出边流量和）
pub(crate) fn net_inflow(network: &FlowNetwork, flows: &[FlowValue], node: NodeId) -> u64 {
    let out: u64 = network.outgoing(node).iter().map(|&i| flows[i]).sum();
    let inn: u64 = network.incoming(node).iter().map(|&i| flows[i]).sum();
    inn.saturating_sub(out)
}

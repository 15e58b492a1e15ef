//! 比例流量归因
//!
//! 把联合求解得到的总流量按报告口径分摊到各个汇点及其贡献源点。
//! 汇点的比例值 = 入口总容量 × 全网流量比（总流量 / 汇点总容量）。
//! 分摊规则（见 DESIGN.md）：汇点的每条入边均分其比例值，经由中间
//! 节点到达的份额再均分给喂入该中间节点的各个源点；源点直连的入边
//! 份额全部记给该源点。这是纯报告变换，不回馈求解器。

use crate::algorithm::max_flow::MaxFlow;
use crate::error::{Error, Result};
use crate::network::{FlowNetwork, NodeId};
use crate::types::Capacity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// 某个源点对汇点的归因值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceShare {
    pub source: String,
    pub value: f64,
}

/// 单个汇点的归因报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribution {
    pub sink: String,
    /// 汇点入口总容量
    pub capacity: Capacity,
    /// 按容量比例分得的流量
    pub proportional: f64,
    /// 各源点的份额（按节点创建顺序）
    pub shares: Vec<SourceShare>,
}

/// 对联合求解结果做比例归因，每个汇点一条记录（按求解时的汇点顺序）
pub fn attribute(network: &FlowNetwork, flow: &MaxFlow) -> Result<Vec<Attribution>> {
    if flow.edge_flows.len() != network.edge_count() {
        return Err(Error::InvalidArgument(
            "流量分配与网络的边数不一致".to_string(),
        ));
    }
    for &id in flow.sources.iter().chain(flow.sinks.iter()) {
        if id.index() >= network.node_count() {
            return Err(Error::InvalidArgument(format!(
                "节点 ID 超出范围: {}",
                id.0
            )));
        }
    }

    let total_sink_capacity: Capacity = flow.sinks.iter().map(|&t| network.in_capacity(t)).sum();
    let ratio = if total_sink_capacity == 0 {
        0.0
    } else {
        flow.value as f64 / total_sink_capacity as f64
    };

    let source_set: HashSet<NodeId> = flow.sources.iter().copied().collect();
    let mut result = Vec::with_capacity(flow.sinks.len());

    for &sink in &flow.sinks {
        let capacity = network.in_capacity(sink);
        let proportional = capacity as f64 * ratio;
        let in_edges = network.incoming(sink);

        // 按节点 ID 聚合，保证输出顺序稳定
        let mut shares: BTreeMap<u32, f64> = BTreeMap::new();
        if !in_edges.is_empty() {
            let slice = proportional / in_edges.len() as f64;
            for &ei in in_edges {
                let feeder = network.edges()[ei].src();
                if source_set.contains(&feeder) {
                    *shares.entry(feeder.0).or_insert(0.0) += slice;
                    continue;
                }
                // 经由中间节点：均分给喂入它的各个源点（静态拓扑比例，不重新求解）
                let mut upstream: Vec<NodeId> = network
                    .incoming(feeder)
                    .iter()
                    .map(|&j| network.edges()[j].src())
                    .filter(|id| source_set.contains(id))
                    .collect();
                upstream.sort_by_key(|id| id.0);
                upstream.dedup();
                if upstream.is_empty() {
                    continue;
                }
                let part = slice / upstream.len() as f64;
                for up in upstream {
                    *shares.entry(up.0).or_insert(0.0) += part;
                }
            }
        }

        result.push(Attribution {
            sink: network.node_name(sink).to_string(),
            capacity,
            proportional,
            shares: shares
                .into_iter()
                .map(|(id, value)| SourceShare {
                    source: network.node_name(NodeId::new(id)).to_string(),
                    value,
                })
                .collect(),
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::max_flow::{FlowSolver, Strategy};
    use crate::types::NodeRole;

    #[test]
    fn test_even_split_through_shared_warehouse() {
        let mut n = FlowNetwork::new();
        n.add_node("Terminal 1", NodeRole::Terminal).unwrap();
        n.add_node("Terminal 2", NodeRole::Terminal).unwrap();
        n.add_node("Warehouse 1", NodeRole::Warehouse).unwrap();
        n.add_node("Store 1", NodeRole::Store).unwrap();
        n.add_edge("Terminal 1", "Warehouse 1", 10).unwrap();
        n.add_edge("Terminal 2", "Warehouse 1", 10).unwrap();
        n.add_edge("Warehouse 1", "Store 1", 20).unwrap();

        let solver = FlowSolver::new(&n);
        let flow = solver
            .solve_multi(&n.terminals(), &n.stores(), Strategy::Custom)
            .unwrap();
        assert_eq!(flow.value, 20);

        let report = attribute(&n, &flow).unwrap();
        assert_eq!(report.len(), 1);
        let store = &report[0];
        assert_eq!(store.sink, "Store 1");
        assert_eq!(store.capacity, 20);
        assert!((store.proportional - 20.0).abs() < 1e-9);
        assert_eq!(store.shares.len(), 2);
        assert_eq!(store.shares[0].source, "Terminal 1");
        assert!((store.shares[0].value - 10.0).abs() < 1e-9);
        assert_eq!(store.shares[1].source, "Terminal 2");
        assert!((store.shares[1].value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_source_edge_keeps_whole_slice() {
        let mut n = FlowNetwork::new();
        n.add_node("Terminal 1", NodeRole::Terminal).unwrap();
        n.add_node("Terminal 2", NodeRole::Terminal).unwrap();
        n.add_node("Warehouse 1", NodeRole::Warehouse).unwrap();
        n.add_node("Store 1", NodeRole::Store).unwrap();
        // Store 1 有两条入边：一条直连 Terminal 1，一条经 Warehouse 1（由 Terminal 2 喂入）
        n.add_edge("Terminal 1", "Store 1", 10).unwrap();
        n.add_edge("Terminal 2", "Warehouse 1", 10).unwrap();
        n.add_edge("Warehouse 1", "Store 1", 10).unwrap();

        let solver = FlowSolver::new(&n);
        let flow = solver
            .solve_multi(&n.terminals(), &n.stores(), Strategy::Default)
            .unwrap();
        assert_eq!(flow.value, 20);

        let report = attribute(&n, &flow).unwrap();
        let store = &report[0];
        // 两条入边各占一半比例值
        assert!((store.proportional - 20.0).abs() < 1e-9);
        assert_eq!(store.shares.len(), 2);
        assert!((store.shares[0].value - 10.0).abs() < 1e-9);
        assert!((store.shares[1].value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_shares_sum_to_network_flow() {
        let mut n = FlowNetwork::new();
        n.add_node("Terminal 1", NodeRole::Terminal).unwrap();
        n.add_node("Warehouse 1", NodeRole::Warehouse).unwrap();
        n.add_node("Store 1", NodeRole::Store).unwrap();
        n.add_node("Store 2", NodeRole::Store).unwrap();
        n.add_edge("Terminal 1", "Warehouse 1", 12).unwrap();
        n.add_edge("Warehouse 1", "Store 1", 15).unwrap();
        n.add_edge("Warehouse 1", "Store 2", 5).unwrap();

        let solver = FlowSolver::new(&n);
        let flow = solver
            .solve_multi(&n.terminals(), &n.stores(), Strategy::Custom)
            .unwrap();

        let report = attribute(&n, &flow).unwrap();
        // 各汇点比例值之和恢复总流量
        let total: f64 = report.iter().map(|a| a.proportional).sum();
        assert!((total - flow.value as f64).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_node_id_rejected() {
        let mut n = FlowNetwork::new();
        n.add_node("Terminal 1", NodeRole::Terminal).unwrap();
        n.add_node("Store 1", NodeRole::Store).unwrap();
        n.add_edge("Terminal 1", "Store 1", 10).unwrap();

        // 来自其他网络的过期节点 ID 必须被拒绝，而不是越界访问
        let flow = MaxFlow {
            value: 0,
            edge_flows: vec![0],
            sources: n.terminals(),
            sinks: vec![NodeId::new(99)],
        };
        assert!(matches!(
            attribute(&n, &flow),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sink_without_feeders_gets_empty_shares() {
        let mut n = FlowNetwork::new();
        n.add_node("Terminal 1", NodeRole::Terminal).unwrap();
        n.add_node("Warehouse 1", NodeRole::Warehouse).unwrap();
        n.add_node("Store 1", NodeRole::Store).unwrap();
        n.add_node("Store 2", NodeRole::Store).unwrap();
        n.add_edge("Terminal 1", "Warehouse 1", 10).unwrap();
        n.add_edge("Warehouse 1", "Store 1", 10).unwrap();

        let solver = FlowSolver::new(&n);
        let flow = solver
            .solve_multi(&n.terminals(), &n.stores(), Strategy::Custom)
            .unwrap();

        let report = attribute(&n, &flow).unwrap();
        let orphan = report.iter().find(|a| a.sink == "Store 2").unwrap();
        assert_eq!(orphan.capacity, 0);
        assert!(orphan.shares.is_empty());
        assert!(orphan.proportional.abs() < 1e-9);
    }
}

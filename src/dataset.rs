//! 内置示例数据集
//!
//! 物流任务的基准网络：2 个终端、4 个仓库、14 个商店，共 20 个节点、
//! 20 条边。边的顺序与任务表一致，序号 1 即 Terminal 1 → Warehouse 1。

use crate::error::Result;
use crate::network::FlowNetwork;
use crate::types::{Capacity, NodeRole};

/// 基准网络的边表（源, 目标, 容量）
pub const LOGISTICS_EDGES: [(&str, &str, Capacity); 20] = [
    ("Terminal 1", "Warehouse 1", 25),
    ("Terminal 1", "Warehouse 2", 20),
    ("Terminal 1", "Warehouse 3", 15),
    ("Terminal 2", "Warehouse 3", 15),
    ("Terminal 2", "Warehouse 4", 30),
    ("Terminal 2", "Warehouse 2", 10),
    ("Warehouse 1", "Store 1", 15),
    ("Warehouse 1", "Store 2", 10),
    ("Warehouse 1", "Store 3", 20),
    ("Warehouse 2", "Store 4", 15),
    ("Warehouse 2", "Store 5", 10),
    ("Warehouse 2", "Store 6", 25),
    ("Warehouse 3", "Store 7", 20),
    ("Warehouse 3", "Store 8", 15),
    ("Warehouse 3", "Store 9", 10),
    ("Warehouse 4", "Store 10", 20),
    ("Warehouse 4", "Store 11", 10),
    ("Warehouse 4", "Store 12", 15),
    ("Warehouse 4", "Store 13", 5),
    ("Warehouse 4", "Store 14", 10),
];

/// 构建基准物流网络，节点角色按名称前缀分类
pub fn logistics_network() -> Result<FlowNetwork> {
    FlowNetwork::from_edges(&LOGISTICS_EDGES, NodeRole::from_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{analyze, attribute, CutMember, FlowSolver, Strategy};

    #[test]
    fn test_dataset_shape() {
        let n = logistics_network().unwrap();
        assert_eq!(n.node_count(), 20);
        assert_eq!(n.edge_count(), 20);
        assert_eq!(n.terminals().len(), 2);
        assert_eq!(n.warehouses().len(), 4);
        assert_eq!(n.stores().len(), 14);

        let edges = n.list_edges();
        assert_eq!(edges[0], (1, "Terminal 1", "Warehouse 1", 25));
    }

    #[test]
    fn test_network_max_flow_is_115() {
        let n = logistics_network().unwrap();
        let solver = FlowSolver::new(&n);
        for strategy in [Strategy::Default, Strategy::Custom] {
            let flow = solver
                .solve_multi(&n.terminals(), &n.stores(), strategy)
                .unwrap();
            assert_eq!(flow.value, 115, "strategy {:?}", strategy);
        }
    }

    #[test]
    fn test_conservation_and_capacity_bounds() {
        let n = logistics_network().unwrap();
        let solver = FlowSolver::new(&n);
        let flow = solver
            .solve_multi(&n.terminals(), &n.stores(), Strategy::Custom)
            .unwrap();

        for (i, edge) in n.edges().iter().enumerate() {
            assert!(flow.edge_flows[i] <= edge.capacity());
        }
        for w in n.warehouses() {
            let inflow: u64 = n.incoming(w).iter().map(|&i| flow.edge_flows[i]).sum();
            let outflow: u64 = n.outgoing(w).iter().map(|&i| flow.edge_flows[i]).sum();
            assert_eq!(inflow, outflow, "仓库 {} 守恒", n.node_name(w));
        }
    }

    #[test]
    fn test_min_cut_equals_max_flow_on_dataset() {
        let n = logistics_network().unwrap();
        let solver = FlowSolver::new(&n);
        let flow = solver
            .solve_multi(&n.terminals(), &n.stores(), Strategy::Default)
            .unwrap();
        let analysis = analyze(&n, &flow).unwrap();

        assert_eq!(analysis.min_cut_value, 115);
        assert!(analysis.optimal);
        // 基准网络受终端出口容量约束：割由两个终端上界构成 (60 + 55)
        assert_eq!(analysis.cut.len(), 2);
        assert!(analysis
            .cut
            .iter()
            .all(|m| matches!(m, CutMember::SourceBound { .. })));
        assert_eq!(analysis.summary.source_total_capacity, 115);
        assert_eq!(analysis.summary.sink_total_capacity, 200);
        assert!((analysis.summary.utilization - 100.0).abs() < 1e-9);

        // 两个终端都被完全占满
        for name in ["Terminal 1", "Terminal 2"] {
            let s = analysis.saturation.iter().find(|s| s.node == name).unwrap();
            assert!(s.saturated, "{} 应当饱和", name);
        }
    }

    #[test]
    fn test_reducing_edge_one_never_increases_flow() {
        let mut n = logistics_network().unwrap();
        let solver = FlowSolver::new(&n);
        let before = solver
            .solve_multi(&n.terminals(), &n.stores(), Strategy::Custom)
            .unwrap()
            .value;

        n.set_capacity(1, 0).unwrap();
        let solver = FlowSolver::new(&n);
        let after = solver
            .solve_multi(&n.terminals(), &n.stores(), Strategy::Custom)
            .unwrap()
            .value;

        // 关闭 Terminal 1 -> Warehouse 1（容量 25）最多损失 25，绝不增加
        assert!(after <= before);
        assert!(before - after <= 25);
    }

    #[test]
    fn test_reset_after_mutation_restores_dataset() {
        let mut n = logistics_network().unwrap();
        n.set_capacity(1, 0).unwrap();
        n.set_capacity(12, 999).unwrap();
        n.reset();

        for (i, &(_, _, cap)) in LOGISTICS_EDGES.iter().enumerate() {
            assert_eq!(n.get_capacity(i + 1).unwrap(), cap);
        }
    }

    #[test]
    fn test_store_6_attribution_split() {
        let n = logistics_network().unwrap();
        let solver = FlowSolver::new(&n);
        let flow = solver
            .solve_multi(&n.terminals(), &n.stores(), Strategy::Custom)
            .unwrap();
        let report = attribute(&n, &flow).unwrap();

        // Store 6 容量 25，比例值 25 × (115 / 200) = 14.375，
        // 经 Warehouse 2 由两个终端等权喂入，各得 7.1875
        let store6 = report.iter().find(|a| a.sink == "Store 6").unwrap();
        assert_eq!(store6.capacity, 25);
        assert!((store6.proportional - 14.375).abs() < 1e-9);
        assert_eq!(store6.shares.len(), 2);
        assert_eq!(store6.shares[0].source, "Terminal 1");
        assert!((store6.shares[0].value - 7.1875).abs() < 1e-9);
        assert_eq!(store6.shares[1].source, "Terminal 2");
        assert!((store6.shares[1].value - 7.1875).abs() < 1e-9);

        // 所有商店的比例值之和恢复总流量
        let total: f64 = report.iter().map(|a| a.proportional).sum();
        assert!((total - 115.0).abs() < 1e-9);
    }
}

//! 报表打印器
//!
//! 把网络状态、流量分配与分析结果渲染成表格文本。
//! 渲染只发生在 CLI 这一层，核心库不承担任何展示职责。

use crate::algorithm::{Attribution, CutAnalysis, CutMember, MaxFlow};
use crate::network::FlowNetwork;
use colored::Colorize;
use prettytable::{format, row, Table};
use std::collections::HashSet;

fn boxed_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

/// 网络状态：节点/边统计、源汇索引表、边表
pub fn network_status(network: &FlowNetwork) -> String {
    let mut out = String::new();

    let mut stats = boxed_table();
    stats.set_titles(row!["Metric", "Value"]);
    stats.add_row(row!["Nodes", network.node_count()]);
    stats.add_row(row!["Edges", network.edge_count()]);
    out.push_str(&stats.to_string());

    let mut sources = boxed_table();
    sources.set_titles(row!["#", "Source"]);
    for (i, id) in network.terminals().iter().enumerate() {
        sources.add_row(row![i + 1, network.node_name(*id)]);
    }
    out.push_str(&sources.to_string());

    let mut targets = boxed_table();
    targets.set_titles(row!["#", "Target"]);
    for (i, id) in network.stores().iter().enumerate() {
        targets.add_row(row![i + 1, network.node_name(*id)]);
    }
    out.push_str(&targets.to_string());

    let mut edges = boxed_table();
    edges.set_titles(row!["#", "Source", "Target", "Capacity", "Original"]);
    for (i, edge) in network.edges().iter().enumerate() {
        edges.add_row(row![
            i + 1,
            network.node_name(edge.src()),
            network.node_name(edge.dst()),
            edge.capacity(),
            edge.original_capacity()
        ]);
    }
    out.push_str(&edges.to_string());
    out
}

/// 每条边的流量分配表
pub fn flow_table(network: &FlowNetwork, flow: &MaxFlow) -> String {
    let mut table = boxed_table();
    table.set_titles(row!["#", "Source", "Target", "Flow", "Capacity"]);
    for (i, edge) in network.edges().iter().enumerate() {
        table.add_row(row![
            i + 1,
            network.node_name(edge.src()),
            network.node_name(edge.dst()),
            flow.edge_flows[i],
            edge.capacity()
        ]);
    }
    table.to_string()
}

/// 终端到商店的实际流量表
///
/// 对每个 (终端, 商店) 对，经由各共享仓库的实际流量取
/// min(终端→仓库流量, 仓库→商店流量)，再对仓库求和。
pub fn pair_flow_table(network: &FlowNetwork, flow: &MaxFlow) -> String {
    let mut table = boxed_table();
    table.set_titles(row!["Terminal", "Store", "Actual Flow"]);

    for &t in &flow.sources {
        for &s in &flow.sinks {
            let mut actual: u64 = 0;
            let mut seen = HashSet::new();
            for &ei in network.outgoing(t) {
                let w = network.edges()[ei].dst();
                if !network.nodes()[w.index()].is_warehouse() || !seen.insert(w.0) {
                    continue;
                }
                let to_warehouse: u64 = network
                    .outgoing(t)
                    .iter()
                    .filter(|&&j| network.edges()[j].dst() == w)
                    .map(|&j| flow.edge_flows[j])
                    .sum();
                let to_store: u64 = network
                    .outgoing(w)
                    .iter()
                    .filter(|&&j| network.edges()[j].dst() == s)
                    .map(|&j| flow.edge_flows[j])
                    .sum();
                actual += to_warehouse.min(to_store);
            }
            table.add_row(row![network.node_name(t), network.node_name(s), actual]);
        }
    }
    table.to_string()
}

/// 最优性分析报告：结论、割成员、饱和度与容量概览
pub fn analysis_report(analysis: &CutAnalysis) -> String {
    let mut out = String::new();

    let verdict = if analysis.optimal {
        "✓ OPTIMAL FLOW ACHIEVED".green().bold()
    } else {
        "✗ OPTIMAL FLOW NOT ACHIEVED".red().bold()
    };
    out.push_str(&format!(
        "{}  (max flow = {}, min cut = {})\n",
        verdict, analysis.max_flow, analysis.min_cut_value
    ));
    out.push_str(&analysis.explanation);

    let mut cut = boxed_table();
    cut.set_titles(row!["Cut Member", "Capacity"]);
    for member in &analysis.cut {
        match member {
            CutMember::Edge {
                index, src, dst, capacity,
            } => {
                cut.add_row(row![format!("edge {} ({} → {})", index, src, dst), capacity]);
            }
            CutMember::SourceBound { node, capacity } => {
                cut.add_row(row![format!("{} outgoing capacity", node), capacity]);
            }
            CutMember::SinkBound { node, capacity } => {
                cut.add_row(row![format!("{} incoming capacity", node), capacity]);
            }
        }
    }
    out.push_str(&cut.to_string());

    let mut saturation = boxed_table();
    saturation.set_titles(row!["Node", "Role", "Used", "Total", "Saturated"]);
    for s in &analysis.saturation {
        saturation.add_row(row![
            s.node,
            s.role,
            s.used,
            s.total,
            if s.saturated { "yes" } else { "no" }
        ]);
    }
    out.push_str(&saturation.to_string());

    let mut summary = boxed_table();
    summary.set_titles(row!["Metric", "Value"]);
    summary.add_row(row![
        "Total terminal capacity",
        analysis.summary.source_total_capacity
    ]);
    summary.add_row(row![
        "Total store capacity",
        analysis.summary.sink_total_capacity
    ]);
    summary.add_row(row![
        "Theoretical max flow",
        analysis.summary.max_possible_flow
    ]);
    summary.add_row(row![
        "Utilization",
        format!("{:.1}%", analysis.summary.utilization)
    ]);
    out.push_str(&summary.to_string());
    out
}

/// 比例归因表
pub fn attribution_table(report: &[Attribution]) -> String {
    let mut table = boxed_table();
    table.set_titles(row!["Store", "Capacity", "Proportional", "Sources"]);

    let mut total_capacity: u64 = 0;
    let mut total_proportional = 0.0;
    for entry in report {
        let sources = if entry.shares.is_empty() {
            "No incoming warehouse".to_string()
        } else {
            entry
                .shares
                .iter()
                .map(|s| format!("{}: {:.2}", s.source, s.value))
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(row![
            entry.sink,
            entry.capacity,
            format!("{:.2}", entry.proportional),
            sources
        ]);
        total_capacity += entry.capacity;
        total_proportional += entry.proportional;
    }
    table.add_row(row![
        "TOTAL",
        total_capacity,
        format!("{:.2}", total_proportional),
        ""
    ]);
    table.to_string()
}

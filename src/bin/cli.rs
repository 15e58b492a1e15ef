//! LogiFlow CLI 工具
//!
//! 加载内置物流网络，运行最大流 / 最小割 / 归因分析并打印报表

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use logiflow::cli::printer;
use logiflow::{analyze, attribute, dataset, FlowSolver, Strategy};
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum StrategyArg {
    /// 容量矩阵实现
    Default,
    /// 残量弧邻接表实现
    Custom,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Default => Strategy::Default,
            StrategyArg::Custom => Strategy::Custom,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "logiflow-cli")]
#[command(about = "物流网络最大流分析工具")]
struct Args {
    /// 求解策略
    #[arg(long, value_enum, default_value_t = StrategyArg::Default)]
    strategy: StrategyArg,

    /// 以 JSON 输出原始结果
    #[arg(long)]
    json: bool,

    /// 求解前覆盖边容量，格式 INDEX=VALUE，可重复
    #[arg(long = "set", value_name = "INDEX=VALUE")]
    overrides: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示网络状态与边表
    Status,
    /// 求单对源点到汇点的最大流
    Solve { source: String, sink: String },
    /// 全网多源多汇最优流分析（最小割、饱和度、容量概览）
    Analyze,
    /// 按比例归因各商店的流量来源
    Attribute,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut network = dataset::logistics_network()?;

    for entry in &args.overrides {
        let (index, value) = parse_override(entry)?;
        let old = network.get_capacity(index)?;
        network.set_capacity(index, value)?;
        println!("边 {} 容量: {} → {}", index, old, value);
    }

    let strategy = Strategy::from(args.strategy);
    let solver = FlowSolver::new(&network);

    match &args.command {
        Command::Status => {
            println!("{}", printer::network_status(&network));
        }
        Command::Solve { source, sink } => {
            let s = network
                .node_by_name(source)
                .ok_or_else(|| anyhow!("未知节点: {}", source))?;
            let t = network
                .node_by_name(sink)
                .ok_or_else(|| anyhow!("未知节点: {}", sink))?;
            let flow = solver.solve(s, t, strategy)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&flow)?);
            } else {
                println!("最大流 {} → {}: {} units", source, sink, flow.value);
                println!("{}", printer::flow_table(&network, &flow));
            }
        }
        Command::Analyze => {
            let flow = solver.solve_multi(&network.terminals(), &network.stores(), strategy)?;
            let analysis = analyze(&network, &flow)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!("{}", printer::flow_table(&network, &flow));
                println!("{}", printer::pair_flow_table(&network, &flow));
                println!("{}", printer::analysis_report(&analysis));
            }
        }
        Command::Attribute => {
            let flow = solver.solve_multi(&network.terminals(), &network.stores(), strategy)?;
            let report = attribute(&network, &flow)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Total network flow: {} units", flow.value);
                println!("{}", printer::attribution_table(&report));
            }
        }
    }
    Ok(())
}

fn parse_override(entry: &str) -> Result<(usize, u64)> {
    let (index, value) = entry
        .split_once('=')
        .ok_or_else(|| anyhow!("容量覆盖格式应为 INDEX=VALUE: {}", entry))?;
    let index = index.trim().parse().context("边序号应为正整数")?;
    let value = value.trim().parse().context("容量应为非负整数")?;
    Ok((index, value))
}

//! CLI 支撑模块
//!
//! 只负责把核心库的结果渲染成报表，求解逻辑全部在 `algorithm` 中

pub mod printer;

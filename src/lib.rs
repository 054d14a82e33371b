//! # astar-align
//!
//! 基于 A* 与间隙链种子启发式的 DNA 全局比对（单位编辑代价）。
//!
//! 给定两条序列 A、B，求把 A 变成 B 所需的最少替换、插入、删除次数，并给出一份达到该代价的编辑脚本。
//! 搜索在 (n+1)×(m+1) 的编辑图上进行，启发式把 A 切成长度为 k 的种子：
//!
//! - **匹配查找**：鸽巢原理切片后在 B 的 FM 索引上精确查找，再用锚定 DP 校验代价 ≤ r 的近似出现
//! - **间隙链启发式**：沿匹配链接计算下界，跨过无匹配的种子至少花费 r + 1
//! - **剪枝**：展开匹配起点（可选：终点）时移除该匹配，启发式只升不降
//! - **快速通道**：沿对角线贪心跳过精确匹配，但不越过种子起止行
//!
//! ## 快速示例
//!
//! ```rust
//! use astar_align::align::align;
//!
//! let r = align(b"ACTCGCT", b"AACTCGTT").unwrap();
//! assert_eq!(r.cost, 2);
//! assert_eq!(r.cigar.to_string(), "=I4=X=");
//! ```
//!
//! ## 模块说明
//!
//! - [`align`]：比对入口、A* 搜索、编辑图、回溯与 CIGAR，以及参照用的 DP 比对
//! - [`heuristic`]：种子、匹配、间隙链启发式与剪枝
//! - [`index`]：B 上的 FM 索引（后缀数组 + BWT），可保存到文件复用
//! - [`io`]：FASTA 与成对序列文件读取
//! - [`config`]：比对参数与预设
//! - [`util`]：位置、序列视图与 DNA 字母表

pub mod align;
pub mod config;
pub mod error;
pub mod heuristic;
pub mod index;
pub mod io;
pub mod stats;
pub mod util;

pub use align::{align, align_batch, align_explicit, align_tuned_a, align_tuned_b, align_with_config, align_with_index, Alignment, Cigar, CigarOp};
pub use config::{AlignConfig, ConfigError, Prune};
pub use error::{AlignError, Result};
pub use stats::AstarStats;
